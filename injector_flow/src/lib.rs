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

//! Fuel injector bench test analysis.
//!
//! Each bench run collects fuel from every injector for a fixed time at a fixed duty
//! cycle and RPM. Runs are normalised into a flow rate so that runs of differing
//! length can be compared, then summarised per cylinder.

pub mod error;
pub mod measurement;
pub mod analysis;

pub use error::{FlowError, Result};
pub use measurement::{bench_data, load_csv, load_csv_path, BenchRun};
pub use analysis::{consistency, flow_rate, normalize, rpm_groups, runs_at_rpm, summarize,
                   CylinderSummary, FlowRun, RunConsistency};
