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

use itertools::Itertools;
use serde::Serialize;
use statrs::statistics::Statistics;

use crate::error::{FlowError, Result};
use crate::measurement::BenchRun;

/// Flow rate in ml/min from a volume (ml) collected over `time_s` seconds
pub fn flow_rate(collected_ml: f64, time_s: f64) -> f64 {
    (collected_ml / time_s) * 60.0
}

/// A bench run with its collected volumes normalised to flow rates
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlowRun {
    pub duty_cycle_pct: u32,
    pub rpm: u32,
    pub flow_ml_per_min: Vec<f64>,
}

pub fn normalize(runs: &[BenchRun]) -> Vec<FlowRun> {
    runs.iter().map(|run| {
        FlowRun {
            duty_cycle_pct: run.duty_cycle_pct,
            rpm: run.rpm,
            flow_ml_per_min: run.collected_ml.iter().map(|ml| flow_rate(*ml, run.time_s)).collect(),
        }
    }).collect()
}

/// Distinct RPMs in the order they were first tested
pub fn rpm_groups(runs: &[FlowRun]) -> Vec<u32> {
    runs.iter().map(|run| run.rpm).unique().collect()
}

pub fn runs_at_rpm(runs: &[FlowRun], rpm: u32) -> Vec<&FlowRun> {
    runs.iter().filter(|run| run.rpm == rpm).collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CylinderSummary {
    /// 1 based cylinder number
    pub cylinder: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl CylinderSummary {
    pub fn label(&self) -> String {
        format!("C{}", self.cylinder)
    }
}

/// Min, max and average flow rate of every cylinder across the duty cycles tested at `rpm`
pub fn summarize(runs: &[FlowRun], rpm: u32) -> Result<Vec<CylinderSummary>> {
    let rpm_runs = runs_at_rpm(runs, rpm);
    let cylinder_count = rpm_runs.iter().map(|run| run.flow_ml_per_min.len()).min().unwrap_or(0);
    if cylinder_count == 0 {
        return Err(FlowError::NoData { rpm });
    }
    Ok((0..cylinder_count).map(|idx| {
        let rates: Vec<f64> = rpm_runs.iter().map(|run| run.flow_ml_per_min[idx]).collect();
        CylinderSummary {
            cylinder: idx + 1,
            min: Statistics::min(&rates),
            max: Statistics::max(&rates),
            mean: Statistics::mean(&rates),
        }
    }).collect())
}

/// How evenly the injectors flowed against each other during a single run
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunConsistency {
    pub duty_cycle_pct: u32,
    pub rpm: u32,
    pub mean: f64,
    /// Sample standard deviation across cylinders
    pub std_dev: f64,
    /// (max - min) / mean
    pub spread: f64,
}

pub fn consistency(run: &FlowRun) -> Option<RunConsistency> {
    let rates = &run.flow_ml_per_min;
    if rates.len() < 2 {
        return None;
    }
    let mean = Statistics::mean(rates);
    if mean == 0.0 {
        return None;
    }
    Some(RunConsistency {
        duty_cycle_pct: run.duty_cycle_pct,
        rpm: run.rpm,
        mean,
        std_dev: Statistics::std_dev(rates),
        spread: (Statistics::max(rates) - Statistics::min(rates)) / mean,
    })
}
