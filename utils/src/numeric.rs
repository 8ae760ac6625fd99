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

use ndarray::Array1;

pub fn round_float_to(float: f64, decimal_places: u32) -> f64 {
    let precision_base: u64 = 10;
    let precision_factor = precision_base.pow(decimal_places) as f64;
    (float * precision_factor).round() / precision_factor
}

pub fn round_up_to_nearest_multiple(val: f64, multiple: f64) -> f64 {
    if val < multiple {
        return multiple;
    }
    (val / multiple).ceil() * multiple
}

pub fn is_valid_percentage(val: i32) -> bool {
    if val >= 0 && val <= 100 {
        return true;
    }
    false
}

/// Generate `num` evenly spaced samples over the closed interval `[start, end]`.
///
/// Both end points are included. A `num` of 1 yields just `start` and a `num` of 0
/// yields an empty vec.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    Array1::linspace(start, end, num).to_vec()
}

/// Compare two floats after rounding both to `decimal_places`
pub fn approx_eq(a: f64, b: f64, decimal_places: u32) -> bool {
    round_float_to(a, decimal_places) == round_float_to(b, decimal_places)
}
