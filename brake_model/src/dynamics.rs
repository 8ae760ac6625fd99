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
use tracing::warn;

use crate::error::ModelWarning;
use crate::BrakeModel;

/// Apparent load (kg) on each axle under longitudinal deceleration
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DynamicWeights {
    pub front_kg: f64,
    pub rear_kg: f64,
}

impl DynamicWeights {
    pub fn total_kg(&self) -> f64 {
        self.front_kg + self.rear_kg
    }

    /// More load has transferred forward than the rear axle carried statically.
    /// Beyond this point the weight transfer formula no longer describes a real car.
    pub fn is_rear_lifted(&self) -> bool {
        self.rear_kg < 0.0
    }

    /// Limit the weights to what is physically possible. Once the rear has lifted
    /// the front axle carries everything.
    pub fn clamped(&self) -> DynamicWeights {
        if !self.is_rear_lifted() {
            return *self;
        }
        DynamicWeights { front_kg: self.total_kg(), rear_kg: 0.0 }
    }
}

/// Classic longitudinal load transfer.
///
/// The result is not clamped; at a high enough deceleration `rear_kg` goes negative.
/// Use [`DynamicWeights::is_rear_lifted`] and [`DynamicWeights::clamped`] to deal with that.
pub fn dynamic_weights(mass_kg: f64,
                       cg_height_m: f64,
                       wheelbase_m: f64,
                       deceleration_g: f64,
                       static_front_fraction: f64) -> DynamicWeights
{
    let static_front_weight = mass_kg * static_front_fraction;
    let static_rear_weight = mass_kg * (1.0 - static_front_fraction);
    let weight_transfer = mass_kg * (cg_height_m / wheelbase_m) * deceleration_g;
    DynamicWeights {
        front_kg: static_front_weight + weight_transfer,
        rear_kg: static_rear_weight - weight_transfer,
    }
}

impl BrakeModel {
    pub fn dynamic_weights_at(&self, deceleration_g: f64) -> DynamicWeights {
        let vehicle = self.vehicle();
        dynamic_weights(vehicle.mass_kg,
                        vehicle.cg_height_m,
                        vehicle.wheelbase_m,
                        deceleration_g,
                        vehicle.static_front_fraction)
    }

    /// Same as [`BrakeModel::dynamic_weights_at`] but clamped at rear liftoff, returning
    /// a warning when the clamp had to be applied
    pub fn checked_dynamic_weights_at(&self, deceleration_g: f64) -> (DynamicWeights, Option<ModelWarning>) {
        let weights = self.dynamic_weights_at(deceleration_g);
        if !weights.is_rear_lifted() {
            return (weights, None);
        }
        let warning = ModelWarning::RearLiftoff { deceleration_g, rear_weight_kg: weights.rear_kg };
        warn!("{}", warning);
        (weights.clamped(), Some(warning))
    }

    /// Deceleration (g) at which the rear axle carries no load at all
    pub fn rear_liftoff_deceleration(&self) -> f64 {
        let vehicle = self.vehicle();
        (1.0 - vehicle.static_front_fraction) * vehicle.wheelbase_m / vehicle.cg_height_m
    }
}
