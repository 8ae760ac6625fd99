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

use serde::Serialize;
use tracing::debug;

use crate::config::{AxlePair, LeverGeometry};
use crate::error::ModelWarning;
use crate::BrakeModel;

/// The independent variable a curve was swept over
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepVariable {
    PedalForce,
    Deceleration,
}

impl SweepVariable {
    pub fn unit(&self) -> &'static str {
        match self {
            SweepVariable::PedalForce => "N",
            SweepVariable::Deceleration => "g",
        }
    }
}

/// Front and rear braking force (N) produced for one input sample
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ForcePoint {
    pub input: f64,
    pub front_n: f64,
    pub rear_n: f64,
}

impl ForcePoint {
    pub fn new(input: f64, forces: AxlePair<f64>) -> ForcePoint {
        ForcePoint { input, front_n: forces.front, rear_n: forces.rear }
    }

    pub fn total_n(&self) -> f64 {
        self.front_n + self.rear_n
    }

    /// Brake bias: fraction of the total force produced at the front
    pub fn front_share(&self) -> Option<f64> {
        AxlePair::new(self.front_n, self.rear_n).front_share()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BrakeCurve {
    variable: SweepVariable,
    points: Vec<ForcePoint>,
    warnings: Vec<ModelWarning>,
}

impl BrakeCurve {
    pub fn variable(&self) -> SweepVariable {
        self.variable
    }

    /// Points in sample order
    pub fn points(&self) -> &[ForcePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn warnings(&self) -> &[ModelWarning] {
        &self.warnings
    }

    pub fn inputs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.input).collect()
    }

    pub fn front_series(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.front_n).collect()
    }

    pub fn rear_series(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.rear_n).collect()
    }

    /// (front, rear) pairs ready to be plotted force-vs-force
    pub fn front_vs_rear(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.front_n, p.rear_n)).collect()
    }

    pub fn max_front_n(&self) -> f64 {
        self.points.iter().fold(0.0, |acc, p| acc.max(p.front_n))
    }

    pub fn max_rear_n(&self) -> f64 {
        self.points.iter().fold(0.0, |acc, p| acc.max(p.rear_n))
    }

    /// The point whose input is closest to `input`
    pub fn point_nearest(&self, input: f64) -> Option<&ForcePoint> {
        self.points.iter().min_by(|a, b| {
            (a.input - input).abs().total_cmp(&(b.input - input).abs())
        })
    }
}

/// A hydraulic output curve for one candidate lever geometry
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActualCurve {
    pub geometry: LeverGeometry,
    pub lever_motion_ratio: f64,
    pub pedal_max_stroke_mm: f64,
    pub curve: BrakeCurve,
}

impl BrakeModel {
    /// Force each axle would need to produce at `deceleration_g` to use all of its
    /// dynamically available grip, and any liftoff warning raised getting there
    pub fn ideal_point(&self, deceleration_g: f64) -> (ForcePoint, Option<ModelWarning>) {
        let gravity = self.vehicle().gravity_mps2;
        let (weights, warning) = self.checked_dynamic_weights_at(deceleration_g);
        let point = ForcePoint {
            input: deceleration_g,
            front_n: weights.front_kg * deceleration_g * gravity,
            rear_n: weights.rear_kg * deceleration_g * gravity,
        };
        (point, warning)
    }

    /// The ideal brake force distribution over the supplied deceleration samples (g).
    ///
    /// Samples beyond rear liftoff are clamped so that the rear force is zero and are
    /// reported through [`BrakeCurve::warnings`].
    pub fn ideal_curve(&self, deceleration_samples: &[f64]) -> BrakeCurve {
        let mut points = Vec::with_capacity(deceleration_samples.len());
        let mut warnings = Vec::new();
        for decel in deceleration_samples {
            let (point, warning) = self.ideal_point(*decel);
            points.push(point);
            warnings.extend(warning);
        }
        debug!("Computed ideal curve with {} points ({} beyond rear liftoff)", points.len(), warnings.len());
        BrakeCurve { variable: SweepVariable::Deceleration, points, warnings }
    }

    /// Stopping force produced by the hydraulic system over the supplied pedal forces (N)
    pub fn actual_curve(&self, pedal_force_samples: &[f64], lever: &LeverGeometry) -> BrakeCurve {
        let points = pedal_force_samples.iter()
            .map(|pedal_force| ForcePoint::new(*pedal_force, self.stopping_force(*pedal_force, lever)))
            .collect();
        BrakeCurve { variable: SweepVariable::PedalForce, points, warnings: Vec::new() }
    }

    /// One actual curve for every lever geometry in the configured sweep
    pub fn actual_curves(&self, pedal_force_samples: &[f64]) -> Vec<ActualCurve> {
        self.hydraulics().lever_sweep.geometries().into_iter().map(|geometry| {
            ActualCurve {
                lever_motion_ratio: geometry.motion_ratio(),
                pedal_max_stroke_mm: self.pedal_max_stroke(&geometry),
                curve: self.actual_curve(pedal_force_samples, &geometry),
                geometry,
            }
        }).collect()
    }
}

#[cfg(test)]
mod tests {
    use utils::numeric::{approx_eq, linspace};
    use crate::config::{HydraulicConfig, LeverGeometry, LeverSweep, VehicleConfig};
    use crate::curve::{ForcePoint, SweepVariable};
    use crate::error::ModelWarning;
    use crate::BrakeModel;

    fn default_model() -> BrakeModel {
        BrakeModel::new(VehicleConfig::default(), HydraulicConfig::default()).unwrap()
    }

    #[test]
    fn ideal_curve_golden_value_at_one_g() {
        let curve = default_model().ideal_curve(&[1.0]);
        let point = curve.points()[0];
        assert_eq!(point.input, 1.0);
        assert!(approx_eq(point.front_n, 5765.427012, 5));
        assert!(approx_eq(point.rear_n, 3795.422988, 5));
        assert!(curve.warnings().is_empty());
    }

    #[test]
    fn ideal_curve_starts_at_zero() {
        let curve = default_model().ideal_curve(&linspace(0.0, 1.5, 50));
        assert_eq!(curve.len(), 50);
        assert_eq!(curve.variable(), SweepVariable::Deceleration);
        let first = curve.points()[0];
        assert_eq!(first.front_n, 0.0);
        assert_eq!(first.rear_n, 0.0);
        assert_eq!(curve.points()[49].input, 1.5);
    }

    #[test]
    fn ideal_bias_moves_forward_with_deceleration() {
        let curve = default_model().ideal_curve(&[0.2, 0.6, 1.0, 1.4]);
        let shares: Vec<f64> = curve.points().iter().filter_map(|p| p.front_share()).collect();
        assert_eq!(shares.len(), 4);
        assert!(shares.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn ideal_curve_clamps_beyond_liftoff() {
        let model = default_model();
        let curve = model.ideal_curve(&[1.0, 3.0, 3.5, 4.0]);
        assert_eq!(curve.len(), 4);
        assert_eq!(curve.warnings().len(), 2);
        assert!(matches!(curve.warnings()[0], ModelWarning::RearLiftoff { deceleration_g, .. } if deceleration_g == 3.5));
        let beyond = curve.points()[3];
        assert_eq!(beyond.rear_n, 0.0);
        assert!(approx_eq(beyond.front_n, 975.0 * 4.0 * 9.806, 6));
        assert!(curve.points().iter().all(|p| p.rear_n >= 0.0));
    }

    #[test]
    fn actual_curve_matches_stopping_force() {
        let model = default_model();
        let lever = LeverGeometry::new(81.0, 146.0).unwrap();
        let samples = linspace(0.0, 311.0, 100);
        let curve = model.actual_curve(&samples, &lever);
        assert_eq!(curve.variable(), SweepVariable::PedalForce);
        assert_eq!(curve.len(), 100);
        assert_eq!(curve.inputs(), samples);
        for point in curve.points() {
            let expected = model.stopping_force(point.input, &lever);
            assert_eq!(point.front_n, expected.front);
            assert_eq!(point.rear_n, expected.rear);
        }
        assert!(curve.front_series().windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(curve.max_front_n(), *curve.front_series().last().unwrap());
        assert_eq!(curve.max_rear_n(), *curve.rear_series().last().unwrap());
    }

    #[test]
    fn actual_bias_is_constant() {
        let model = default_model();
        let lever = LeverGeometry::new(81.0, 146.0).unwrap();
        let curve = model.actual_curve(&[50.0, 100.0, 311.0], &lever);
        let shares: Vec<f64> = curve.points().iter().filter_map(|p| p.front_share()).collect();
        assert!(approx_eq(shares[0], 0.655695, 6));
        assert!(shares.iter().all(|s| approx_eq(*s, shares[0], 9)));
    }

    #[test]
    fn one_actual_curve_per_lever_combination() {
        let mut hydraulics = HydraulicConfig::default();
        hydraulics.lever_sweep = LeverSweep {
            fulcrum_to_plunger_mm: vec![59.0, 64.0, 81.0],
            plunger_to_rod_mm: vec![146.0, 164.0],
        };
        let model = BrakeModel::new(VehicleConfig::default(), hydraulics).unwrap();
        let curves = model.actual_curves(&linspace(0.0, 311.0, 10));
        assert_eq!(curves.len(), 6);
        assert_eq!(curves[0].geometry, LeverGeometry { fulcrum_to_plunger_mm: 59.0, plunger_to_rod_mm: 146.0 });
        assert_eq!(curves[5].geometry, LeverGeometry { fulcrum_to_plunger_mm: 81.0, plunger_to_rod_mm: 164.0 });
        for curve in &curves {
            assert_eq!(curve.curve.len(), 10);
            assert_eq!(curve.lever_motion_ratio, curve.geometry.motion_ratio());
            assert_eq!(curve.pedal_max_stroke_mm, model.pedal_max_stroke(&curve.geometry));
        }
        // a longer lever arm ratio gives more force for the same pedal effort
        assert!(curves[0].curve.max_front_n() > curves[2].curve.max_front_n());
    }

    #[test]
    fn nearest_point_lookup() {
        let curve = default_model().ideal_curve(&linspace(0.0, 1.5, 50));
        let nearest = curve.point_nearest(1.0).unwrap();
        assert!((nearest.input - 1.0).abs() < 1.5 / 49.0);
        assert!(default_model().ideal_curve(&[]).point_nearest(1.0).is_none());
    }

    #[test]
    fn force_point_share() {
        let point = ForcePoint { input: 0.0, front_n: 0.0, rear_n: 0.0 };
        assert_eq!(point.front_share(), None);
        let point = ForcePoint { input: 1.0, front_n: 600.0, rear_n: 400.0 };
        assert_eq!(point.total_n(), 1000.0);
        assert_eq!(point.front_share(), Some(0.6));
    }

    #[test]
    fn curve_serializes_for_export() {
        let curve = default_model().ideal_curve(&[0.0]);
        let json = serde_json::to_value(&curve).unwrap();
        assert_eq!(json["variable"], "deceleration");
        assert_eq!(json["points"][0]["front_n"], 0.0);
    }
}
