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

use std::f64::consts::PI;

use crate::config::{AxlePair, LeverGeometry};
use crate::BrakeModel;

/// Area of a circle from its diameter. Diameters are in mm so this is mm².
pub fn area(diameter: f64) -> f64 {
    (PI * diameter.powi(2)) / 4.0
}

impl BrakeModel {
    /// Force pushed into the master cylinder plunger(s) for the given pedal effort (N)
    pub fn force_on_plunger(&self, pedal_force_n: f64, lever: &LeverGeometry) -> f64 {
        pedal_force_n * self.hydraulics().pedal_motion_ratio * lever.motion_ratio()
    }

    /// Line pressure in each axle circuit (N/mm²)
    pub fn hydraulic_pressure(&self, pedal_force_n: f64, lever: &LeverGeometry) -> AxlePair<f64> {
        let hydraulics = self.hydraulics();
        let force_on_plunger = self.force_on_plunger(pedal_force_n, lever);
        let divisor = hydraulics.master_cylinder_layout.force_divisor();
        hydraulics.master_cylinder_bore_mm.map(|bore| force_on_plunger / (area(*bore) * divisor))
    }

    /// Total piston area of a single caliper on each axle (mm²)
    pub fn piston_area(&self) -> AxlePair<f64> {
        self.hydraulics().caliper_piston_diameters_mm.map(|pistons| {
            pistons.iter().map(|d| area(*d)).sum()
        })
    }

    /// Clamping force summed over every pad contact on each axle (N)
    pub fn clamping_force(&self, pedal_force_n: f64, lever: &LeverGeometry) -> AxlePair<f64> {
        let pressure = self.hydraulic_pressure(pedal_force_n, lever);
        let piston_area = self.piston_area();
        let multiplier = self.hydraulics().caliper_geometry.clamp_multiplier();
        AxlePair::new(pressure.front * piston_area.front * multiplier,
                      pressure.rear * piston_area.rear * multiplier)
    }

    /// Braking force available at the tyre contact patch on each axle (N).
    ///
    /// The pad friction force acts at the rotor effective radius so it's scaled by
    /// the ratio of that radius to the tyre's loaded radius.
    pub fn stopping_force(&self, pedal_force_n: f64, lever: &LeverGeometry) -> AxlePair<f64> {
        let hydraulics = self.hydraulics();
        let tire_radius = self.vehicle().tire_radius_mm;
        let clamping = self.clamping_force(pedal_force_n, lever);
        let front_braking_force = clamping.front * hydraulics.pad_friction.front;
        let rear_braking_force = clamping.rear * hydraulics.pad_friction.rear;
        AxlePair::new(front_braking_force * (hydraulics.rotor_effective_radius_mm.front / tire_radius),
                      rear_braking_force * (hydraulics.rotor_effective_radius_mm.rear / tire_radius))
    }

    /// Maximum travel (mm) implied by the lever geometry when the master cylinder
    /// reaches the end of its stroke
    pub fn pedal_max_stroke(&self, lever: &LeverGeometry) -> f64 {
        let hydraulics = self.hydraulics();
        hydraulics.master_cylinder_stroke_mm * hydraulics.pedal_motion_ratio * lever.motion_ratio()
    }
}
