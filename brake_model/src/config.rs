/*
 * Copyright (c):
 * 2026 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of brake-bench.
 *
 * brake-bench is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * brake-bench is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with brake-bench. If not, see <https://www.gnu.org/licenses/>.
 */

use itertools::iproduct;
use serde::{Deserialize, Serialize};
use utils::numeric::linspace;
use utils::units::{inches_to_mm, mm_to_m};

use crate::error::{ensure_fraction, ensure_friction, ensure_part_count, ensure_positive, ensure_positive_length,
                   BrakeModelError, Result};
use crate::STANDARD_GRAVITY;

/// A value that is specified separately for the front and rear axle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AxlePair<T> {
    pub front: T,
    pub rear: T,
}

impl<T> AxlePair<T> {
    pub fn new(front: T, rear: T) -> AxlePair<T> {
        AxlePair { front, rear }
    }

    pub fn map<U, F: Fn(&T) -> U>(&self, f: F) -> AxlePair<U> {
        AxlePair { front: f(&self.front), rear: f(&self.rear) }
    }
}

impl AxlePair<f64> {
    pub fn total(&self) -> f64 {
        self.front + self.rear
    }

    /// Share of the total carried by the front axle. None when the total is zero
    pub fn front_share(&self) -> Option<f64> {
        let total = self.total();
        if total == 0.0 {
            return None;
        }
        Some(self.front / total)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub mass_kg: f64,
    /// Fraction of the mass carried by the front axle when stationary
    pub static_front_fraction: f64,
    pub cg_height_m: f64,
    pub wheelbase_m: f64,
    /// Loaded (static) tyre radius
    pub tire_radius_mm: f64,
    #[serde(default = "default_gravity")]
    pub gravity_mps2: f64,
}

fn default_gravity() -> f64 {
    STANDARD_GRAVITY
}

impl Default for VehicleConfig {
    fn default() -> Self {
        VehicleConfig {
            mass_kg: 975.0,
            static_front_fraction: 0.43,
            cg_height_m: mm_to_m(381.0),
            wheelbase_m: mm_to_m(2202.0),
            tire_radius_mm: 273.0,
            gravity_mps2: STANDARD_GRAVITY,
        }
    }
}

impl VehicleConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("mass_kg", self.mass_kg)?;
        ensure_fraction("static_front_fraction", self.static_front_fraction)?;
        ensure_positive_length("cg_height_m", self.cg_height_m)?;
        ensure_positive_length("wheelbase_m", self.wheelbase_m)?;
        ensure_positive_length("tire_radius_mm", self.tire_radius_mm)?;
        ensure_positive("gravity_mps2", self.gravity_mps2)?;
        Ok(())
    }

    pub fn static_weights(&self) -> AxlePair<f64> {
        AxlePair::new(self.mass_kg * self.static_front_fraction,
                      self.mass_kg * (1.0 - self.static_front_fraction))
    }
}

/// How the force on the pedal pushrod is shared between master cylinders
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasterCylinderLayout {
    /// One master cylinder feeding both axle circuits
    Single,
    /// One master cylinder per axle circuit behind a balance bar; each sees half the plunger force
    Dual,
}

impl MasterCylinderLayout {
    pub fn force_divisor(&self) -> f64 {
        match self {
            MasterCylinderLayout::Single => 1.0,
            MasterCylinderLayout::Dual => 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaliperGeometry {
    pub pads_per_caliper: u32,
    pub calipers_per_axle: u32,
}

impl Default for CaliperGeometry {
    fn default() -> Self {
        CaliperGeometry { pads_per_caliper: 2, calipers_per_axle: 2 }
    }
}

impl CaliperGeometry {
    /// Number of pad to rotor contacts on a single axle
    pub fn clamp_multiplier(&self) -> f64 {
        (self.pads_per_caliper * self.calipers_per_axle) as f64
    }

    pub fn validate(&self) -> Result<()> {
        ensure_part_count("caliper_geometry.pads_per_caliper", self.pads_per_caliper as usize)?;
        ensure_part_count("caliper_geometry.calipers_per_axle", self.calipers_per_axle as usize)
    }
}

/// The pedal lever distances that set the lever motion ratio
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeverGeometry {
    pub fulcrum_to_plunger_mm: f64,
    pub plunger_to_rod_mm: f64,
}

impl LeverGeometry {
    pub fn new(fulcrum_to_plunger_mm: f64, plunger_to_rod_mm: f64) -> Result<LeverGeometry> {
        let geometry = LeverGeometry { fulcrum_to_plunger_mm, plunger_to_rod_mm };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive_length("fulcrum_to_plunger_mm", self.fulcrum_to_plunger_mm)?;
        ensure_positive_length("plunger_to_rod_mm", self.plunger_to_rod_mm)
    }

    pub fn motion_ratio(&self) -> f64 {
        self.plunger_to_rod_mm / self.fulcrum_to_plunger_mm
    }
}

/// Candidate lever distances to compare. Every fulcrum distance is paired
/// with every rod distance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeverSweep {
    pub fulcrum_to_plunger_mm: Vec<f64>,
    pub plunger_to_rod_mm: Vec<f64>,
}

impl Default for LeverSweep {
    fn default() -> Self {
        LeverSweep { fulcrum_to_plunger_mm: vec![81.0], plunger_to_rod_mm: vec![146.0] }
    }
}

impl LeverSweep {
    pub fn validate(&self) -> Result<()> {
        if self.fulcrum_to_plunger_mm.is_empty() {
            return Err(BrakeModelError::InvalidInput {
                parameter: "fulcrum_to_plunger_mm", reason: "no candidate distances".to_string()
            });
        }
        if self.plunger_to_rod_mm.is_empty() {
            return Err(BrakeModelError::InvalidInput {
                parameter: "plunger_to_rod_mm", reason: "no candidate distances".to_string()
            });
        }
        self.geometries().iter().try_for_each(|g| g.validate())
    }

    /// Every combination of the candidate distances, rod distance major
    pub fn geometries(&self) -> Vec<LeverGeometry> {
        iproduct!(self.plunger_to_rod_mm.iter(), self.fulcrum_to_plunger_mm.iter())
            .map(|(&plunger_to_rod_mm, &fulcrum_to_plunger_mm)| {
                LeverGeometry { fulcrum_to_plunger_mm, plunger_to_rod_mm }
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HydraulicConfig {
    pub master_cylinder_bore_mm: AxlePair<f64>,
    pub master_cylinder_stroke_mm: f64,
    pub master_cylinder_layout: MasterCylinderLayout,
    /// Diameter of every piston in one caliper
    pub caliper_piston_diameters_mm: AxlePair<Vec<f64>>,
    pub caliper_geometry: CaliperGeometry,
    pub pedal_motion_ratio: f64,
    pub pad_friction: AxlePair<f64>,
    pub rotor_effective_radius_mm: AxlePair<f64>,
    pub lever_sweep: LeverSweep,
}

impl Default for HydraulicConfig {
    fn default() -> Self {
        HydraulicConfig {
            master_cylinder_bore_mm: AxlePair::new(inches_to_mm(5.0 / 8.0), inches_to_mm(5.0 / 8.0)),
            master_cylinder_stroke_mm: inches_to_mm(1.25),
            master_cylinder_layout: MasterCylinderLayout::Dual,
            caliper_piston_diameters_mm: AxlePair::new(
                vec![inches_to_mm(1.38), inches_to_mm(1.38)],
                vec![inches_to_mm(1.0), inches_to_mm(1.0)]
            ),
            caliper_geometry: CaliperGeometry::default(),
            pedal_motion_ratio: 3.5,
            pad_friction: AxlePair::new(0.51, 0.51),
            rotor_effective_radius_mm: AxlePair::new(220.0, 220.0),
            lever_sweep: LeverSweep::default(),
        }
    }
}

impl HydraulicConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive_length("master_cylinder_bore_mm.front", self.master_cylinder_bore_mm.front)?;
        ensure_positive_length("master_cylinder_bore_mm.rear", self.master_cylinder_bore_mm.rear)?;
        ensure_positive_length("master_cylinder_stroke_mm", self.master_cylinder_stroke_mm)?;
        validate_pistons("caliper_piston_diameters_mm.front", &self.caliper_piston_diameters_mm.front)?;
        validate_pistons("caliper_piston_diameters_mm.rear", &self.caliper_piston_diameters_mm.rear)?;
        self.caliper_geometry.validate()?;
        ensure_positive_length("pedal_motion_ratio", self.pedal_motion_ratio)?;
        ensure_friction("pad_friction.front", self.pad_friction.front)?;
        ensure_friction("pad_friction.rear", self.pad_friction.rear)?;
        ensure_positive_length("rotor_effective_radius_mm.front", self.rotor_effective_radius_mm.front)?;
        ensure_positive_length("rotor_effective_radius_mm.rear", self.rotor_effective_radius_mm.rear)?;
        self.lever_sweep.validate()
    }
}

fn validate_pistons(parameter: &'static str, diameters: &[f64]) -> Result<()> {
    ensure_part_count(parameter, diameters.len())?;
    diameters.iter().try_for_each(|d| ensure_positive_length(parameter, *d))
}

/// An evenly spaced range of samples for one independent variable
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub start: f64,
    pub end: f64,
    pub samples: usize,
}

impl Sweep {
    pub fn new(start: f64, end: f64, samples: usize) -> Sweep {
        Sweep { start, end, samples }
    }

    /// Checks the sweep is usable for an input that can't go negative
    pub fn validate_non_negative(&self, parameter: &'static str) -> Result<()> {
        if self.samples < 2 {
            return Err(BrakeModelError::InvalidInput {
                parameter, reason: format!("need at least 2 samples, got {}", self.samples)
            });
        }
        if !(self.start.is_finite() && self.end.is_finite()) || self.start < 0.0 || self.end < self.start {
            return Err(BrakeModelError::InvalidInput {
                parameter, reason: format!("range {}..{} must be ascending and non-negative", self.start, self.end)
            });
        }
        Ok(())
    }

    pub fn values(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.samples)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{AxlePair, CaliperGeometry, HydraulicConfig, LeverGeometry, LeverSweep,
                        MasterCylinderLayout, Sweep, VehicleConfig};
    use crate::error::BrakeModelError;
    use utils::numeric::approx_eq;

    #[test]
    fn default_hydraulics_match_imperial_parts() {
        let hydraulics = HydraulicConfig::default();
        assert!(approx_eq(hydraulics.master_cylinder_bore_mm.front, 15.875, 9));
        assert!(approx_eq(hydraulics.master_cylinder_stroke_mm, 31.75, 9));
        assert!(approx_eq(hydraulics.caliper_piston_diameters_mm.front[0], 35.052, 9));
        assert!(approx_eq(hydraulics.caliper_piston_diameters_mm.rear[1], 25.4, 9));
        assert_eq!(hydraulics.master_cylinder_layout, MasterCylinderLayout::Dual);
        assert_eq!(hydraulics.caliper_geometry.clamp_multiplier(), 4.0);
    }

    #[test]
    fn layout_divisors() {
        assert_eq!(MasterCylinderLayout::Single.force_divisor(), 1.0);
        assert_eq!(MasterCylinderLayout::Dual.force_divisor(), 2.0);
    }

    #[test]
    fn caliper_geometry_needs_contacts() {
        let geometry = CaliperGeometry { pads_per_caliper: 2, calipers_per_axle: 0 };
        assert_eq!(geometry.validate(),
                   Err(BrakeModelError::InvalidGeometry { parameter: "caliper_geometry.calipers_per_axle", value: 0.0 }));
        let geometry = CaliperGeometry { pads_per_caliper: 0, calipers_per_axle: 2 };
        assert_eq!(geometry.validate(),
                   Err(BrakeModelError::InvalidGeometry { parameter: "caliper_geometry.pads_per_caliper", value: 0.0 }));
        let geometry = CaliperGeometry { pads_per_caliper: 1, calipers_per_axle: 2 };
        assert_eq!(geometry.clamp_multiplier(), 2.0);
    }

    #[test]
    fn lever_geometry_validation() {
        let lever = LeverGeometry::new(81.0, 146.0).unwrap();
        assert!(approx_eq(lever.motion_ratio(), 1.8025, 4));
        assert_eq!(LeverGeometry::new(0.0, 146.0),
                   Err(BrakeModelError::InvalidGeometry { parameter: "fulcrum_to_plunger_mm", value: 0.0 }));
        assert!(LeverGeometry::new(81.0, -1.0).is_err());
    }

    #[test]
    fn lever_sweep_is_cartesian_product_rod_major() {
        let sweep = LeverSweep {
            fulcrum_to_plunger_mm: vec![59.0, 64.0, 81.0],
            plunger_to_rod_mm: vec![146.0, 164.0],
        };
        let geometries = sweep.geometries();
        assert_eq!(geometries.len(), 6);
        let pairs: Vec<(f64, f64)> = geometries.iter()
            .map(|g| (g.plunger_to_rod_mm, g.fulcrum_to_plunger_mm))
            .collect();
        assert_eq!(pairs, vec![(146.0, 59.0), (146.0, 64.0), (146.0, 81.0),
                               (164.0, 59.0), (164.0, 64.0), (164.0, 81.0)]);
    }

    #[test]
    fn lever_sweep_rejects_empty_axis() {
        let sweep = LeverSweep { fulcrum_to_plunger_mm: vec![], plunger_to_rod_mm: vec![146.0] };
        assert!(sweep.validate().is_err());
        let sweep = LeverSweep { fulcrum_to_plunger_mm: vec![81.0, -2.0], plunger_to_rod_mm: vec![146.0] };
        assert!(matches!(sweep.validate(), Err(BrakeModelError::InvalidGeometry { .. })));
    }

    #[test]
    fn vehicle_validation() {
        assert!(VehicleConfig::default().validate().is_ok());
        let vehicle = VehicleConfig { static_front_fraction: 0.0, ..VehicleConfig::default() };
        assert!(matches!(vehicle.validate(), Err(BrakeModelError::InvalidFraction { .. })));
        let vehicle = VehicleConfig { wheelbase_m: 0.0, ..VehicleConfig::default() };
        assert_eq!(vehicle.validate(),
                   Err(BrakeModelError::InvalidGeometry { parameter: "wheelbase_m", value: 0.0 }));
    }

    #[test]
    fn hydraulic_validation() {
        let mut hydraulics = HydraulicConfig::default();
        hydraulics.caliper_piston_diameters_mm.front = vec![];
        assert_eq!(hydraulics.validate(),
                   Err(BrakeModelError::InvalidGeometry { parameter: "caliper_piston_diameters_mm.front", value: 0.0 }));

        let mut hydraulics = HydraulicConfig::default();
        hydraulics.caliper_piston_diameters_mm.rear = vec![25.4, 0.0];
        assert_eq!(hydraulics.validate(),
                   Err(BrakeModelError::InvalidGeometry { parameter: "caliper_piston_diameters_mm.rear", value: 0.0 }));
    }

    #[test]
    fn hydraulic_ratio_and_friction_validation() {
        let hydraulics = HydraulicConfig { pedal_motion_ratio: 0.0, ..HydraulicConfig::default() };
        assert_eq!(hydraulics.validate(),
                   Err(BrakeModelError::InvalidGeometry { parameter: "pedal_motion_ratio", value: 0.0 }));

        let mut hydraulics = HydraulicConfig::default();
        hydraulics.pad_friction.front = 0.0;
        assert_eq!(hydraulics.validate(),
                   Err(BrakeModelError::InvalidFraction { parameter: "pad_friction.front", value: 0.0 }));

        let mut hydraulics = HydraulicConfig::default();
        hydraulics.pad_friction.rear = -0.4;
        assert!(matches!(hydraulics.validate(), Err(BrakeModelError::InvalidFraction { parameter: "pad_friction.rear", .. })));

        let mut hydraulics = HydraulicConfig::default();
        hydraulics.caliper_geometry.pads_per_caliper = 0;
        assert!(matches!(hydraulics.validate(), Err(BrakeModelError::InvalidGeometry { .. })));
    }

    #[test]
    fn static_weights_split_mass() {
        let weights = VehicleConfig::default().static_weights();
        assert!(approx_eq(weights.front, 419.25, 9));
        assert!(approx_eq(weights.rear, 555.75, 9));
        assert!(approx_eq(weights.total(), 975.0, 9));
    }

    #[test]
    fn axle_pair_front_share() {
        assert_eq!(AxlePair::new(3.0, 1.0).front_share(), Some(0.75));
        assert_eq!(AxlePair::new(0.0, 0.0).front_share(), None);
        assert_eq!(AxlePair::new(2.0, 3.0).map(|v| v * 2.0), AxlePair::new(4.0, 6.0));
    }

    #[test]
    fn sweep_validation() {
        assert!(Sweep::new(0.0, 311.0, 100).validate_non_negative("pedal_force_n").is_ok());
        assert!(Sweep::new(0.0, 311.0, 1).validate_non_negative("pedal_force_n").is_err());
        assert!(Sweep::new(-1.0, 311.0, 10).validate_non_negative("pedal_force_n").is_err());
        assert!(Sweep::new(10.0, 5.0, 10).validate_non_negative("pedal_force_n").is_err());
        let values = Sweep::new(0.0, 1.5, 50).values();
        assert_eq!(values.len(), 50);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[49], 1.5);
    }

    #[test]
    fn hydraulics_round_trip_through_toml() {
        let hydraulics = HydraulicConfig::default();
        let encoded = toml::to_string(&hydraulics).unwrap();
        assert!(encoded.contains("master_cylinder_layout = \"dual\""));
        let decoded: HydraulicConfig = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, hydraulics);
    }

    #[test]
    fn gravity_defaults_when_omitted() {
        let vehicle: VehicleConfig = toml::from_str(
            "mass_kg = 975.0\nstatic_front_fraction = 0.43\ncg_height_m = 0.381\nwheelbase_m = 2.202\ntire_radius_mm = 273.0\n"
        ).unwrap();
        assert_eq!(vehicle, VehicleConfig::default());
    }
}
