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

//! Brake force distribution model.
//!
//! Converts pedal effort into front/rear wheel braking force through the pedal lever,
//! master cylinders, caliper pistons, pads and rotors, and compares that against the
//! ideal distribution implied by longitudinal weight transfer.
//!
//! Units: every hydraulic and brake length (bores, pistons, lever arms, rotor and tyre
//! radii, master cylinder stroke) is in millimetres, so hydraulic pressure comes out in
//! N/mm². Vehicle CG height and wheelbase are in metres, mass is in kg and deceleration
//! is expressed in g. Forces are in Newtons.

pub mod error;
pub mod config;
pub mod hydraulic;
pub mod dynamics;
pub mod curve;

pub use error::{BrakeModelError, ModelWarning, Result};
pub use config::{AxlePair, CaliperGeometry, HydraulicConfig, LeverGeometry, LeverSweep,
                 MasterCylinderLayout, Sweep, VehicleConfig};
pub use hydraulic::area;
pub use dynamics::{dynamic_weights, DynamicWeights};
pub use curve::{ActualCurve, BrakeCurve, ForcePoint, SweepVariable};

pub const STANDARD_GRAVITY: f64 = 9.806; // m/s^2

/// Holds a validated vehicle and hydraulic configuration that every
/// force calculation is performed against.
#[derive(Clone, Debug)]
pub struct BrakeModel {
    vehicle: VehicleConfig,
    hydraulics: HydraulicConfig,
}

impl BrakeModel {
    pub fn new(vehicle: VehicleConfig, hydraulics: HydraulicConfig) -> Result<BrakeModel> {
        vehicle.validate()?;
        hydraulics.validate()?;
        Ok(BrakeModel { vehicle, hydraulics })
    }

    pub fn vehicle(&self) -> &VehicleConfig {
        &self.vehicle
    }

    pub fn hydraulics(&self) -> &HydraulicConfig {
        &self.hydraulics
    }
}
