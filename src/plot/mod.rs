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

mod brake;
mod injector;

pub use brake::draw_brake_chart;
pub use injector::draw_injector_chart;

pub type PlotResult = Result<(), Box<dyn std::error::Error>>;

pub(crate) const FONT: &str = "sans-serif";

pub(crate) fn as_usize(x: &f64) -> String {
    format!("{}", *x as usize)
}

/// Axis limit comfortably above `max_value`, rounded up to a whole multiple of `step`
pub(crate) fn axis_limit(max_value: f64, step: f64) -> f64 {
    utils::numeric::round_up_to_nearest_multiple(max_value * 1.05, step)
}
