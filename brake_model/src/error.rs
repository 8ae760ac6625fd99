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

pub type Result<T> = std::result::Result<T, BrakeModelError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BrakeModelError {
    #[error("invalid geometry `{parameter}`: {value} must be a positive length")]
    InvalidGeometry { parameter: &'static str, value: f64 },
    #[error("invalid fraction `{parameter}`: {value} is out of range")]
    InvalidFraction { parameter: &'static str, value: f64 },
    #[error("invalid input `{parameter}`: {reason}")]
    InvalidInput { parameter: &'static str, reason: String },
}

/// Non-fatal conditions where the model has been asked for something
/// outside of the range where its results mean anything physically.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelWarning {
    #[error("rear axle has lifted at {deceleration_g:.3}g (dynamic rear weight {rear_weight_kg:.1}kg)")]
    RearLiftoff { deceleration_g: f64, rear_weight_kg: f64 },
}

pub(crate) fn ensure_positive_length(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(BrakeModelError::InvalidGeometry { parameter, value })
}

/// A count of physical parts, such as pads or pistons, that has to be at least one
pub(crate) fn ensure_part_count(parameter: &'static str, count: usize) -> Result<()> {
    if count > 0 {
        return Ok(());
    }
    Err(BrakeModelError::InvalidGeometry { parameter, value: count as f64 })
}

/// Friction coefficients have no upper bound but must be positive
pub(crate) fn ensure_friction(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(BrakeModelError::InvalidFraction { parameter, value })
}

pub(crate) fn ensure_fraction(parameter: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        return Ok(());
    }
    Err(BrakeModelError::InvalidFraction { parameter, value })
}

pub(crate) fn ensure_positive(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(BrakeModelError::InvalidInput { parameter, reason: format!("{} must be greater than 0", value) })
}

#[cfg(test)]
mod tests {
    use crate::error::{ensure_fraction, ensure_friction, ensure_part_count, ensure_positive,
                       ensure_positive_length, BrakeModelError, ModelWarning};

    #[test]
    fn positive_length_checks() {
        assert!(ensure_positive_length("wheelbase_m", 2.202).is_ok());
        assert_eq!(ensure_positive_length("wheelbase_m", 0.0),
                   Err(BrakeModelError::InvalidGeometry { parameter: "wheelbase_m", value: 0.0 }));
        assert!(ensure_positive_length("wheelbase_m", -1.0).is_err());
        assert!(ensure_positive_length("wheelbase_m", f64::NAN).is_err());
        assert!(ensure_positive_length("wheelbase_m", f64::INFINITY).is_err());
    }

    #[test]
    fn fraction_checks() {
        assert!(ensure_fraction("static_front_fraction", 0.43).is_ok());
        assert!(ensure_fraction("static_front_fraction", 0.0).is_err());
        assert!(ensure_fraction("static_front_fraction", 1.0).is_err());
        assert!(ensure_fraction("static_front_fraction", f64::NAN).is_err());
    }

    #[test]
    fn positive_value_checks() {
        assert!(ensure_positive("mass_kg", 975.0).is_ok());
        assert!(matches!(ensure_positive("mass_kg", 0.0), Err(BrakeModelError::InvalidInput { .. })));
    }

    #[test]
    fn part_count_checks() {
        assert!(ensure_part_count("pads_per_caliper", 2).is_ok());
        assert_eq!(ensure_part_count("pads_per_caliper", 0),
                   Err(BrakeModelError::InvalidGeometry { parameter: "pads_per_caliper", value: 0.0 }));
    }

    #[test]
    fn friction_checks() {
        assert!(ensure_friction("pad_friction.front", 0.51).is_ok());
        assert!(ensure_friction("pad_friction.front", 1.2).is_ok());
        assert_eq!(ensure_friction("pad_friction.front", 0.0),
                   Err(BrakeModelError::InvalidFraction { parameter: "pad_friction.front", value: 0.0 }));
        assert!(matches!(ensure_friction("pad_friction.rear", -0.3), Err(BrakeModelError::InvalidFraction { .. })));
        assert!(ensure_friction("pad_friction.rear", f64::NAN).is_err());
    }

    #[test]
    fn warning_message() {
        let warning = ModelWarning::RearLiftoff { deceleration_g: 3.5, rear_weight_kg: -12.34 };
        assert_eq!(warning.to_string(), "rear axle has lifted at 3.500g (dynamic rear weight -12.3kg)");
    }
}
