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

use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use tracing::info;
use utils::numeric::is_valid_percentage;

use crate::error::{FlowError, Result};

const TIME_COLUMN: usize = 0;
const DUTY_CYCLE_COLUMN: usize = 1;
const RPM_COLUMN: usize = 2;
const FIRST_CYLINDER_COLUMN: usize = 3;

/// Fuel collected from each injector during one timed bench run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenchRun {
    pub time_s: f64,
    pub duty_cycle_pct: u32,
    pub rpm: u32,
    /// Volume collected per cylinder in cylinder order
    pub collected_ml: Vec<f64>,
}

impl BenchRun {
    pub fn new(time_s: f64, duty_cycle_pct: u32, rpm: u32, collected_ml: Vec<f64>) -> BenchRun {
        BenchRun { time_s, duty_cycle_pct, rpm, collected_ml }
    }

    pub fn cylinder_count(&self) -> usize {
        self.collected_ml.len()
    }

    pub fn validate(&self, row: usize) -> Result<()> {
        if !(self.time_s.is_finite() && self.time_s > 0.0) {
            return Err(FlowError::InvalidMeasurement { row, reason: format!("run time {}s must be positive", self.time_s) });
        }
        if !is_valid_percentage(self.duty_cycle_pct as i32) {
            return Err(FlowError::InvalidMeasurement { row, reason: format!("duty cycle {}% is out of range", self.duty_cycle_pct) });
        }
        if self.collected_ml.is_empty() {
            return Err(FlowError::InvalidMeasurement { row, reason: "no cylinder volumes recorded".to_string() });
        }
        if let Some(volume) = self.collected_ml.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
            return Err(FlowError::InvalidMeasurement { row, reason: format!("collected volume {}ml is invalid", volume) });
        }
        Ok(())
    }
}

/// The bench results for the 6 cylinder injector set
pub fn bench_data() -> Vec<BenchRun> {
    vec![
        BenchRun::new(60.0, 30, 3000, vec![68.0, 70.0, 71.0, 69.0, 72.0, 74.0]),
        BenchRun::new(30.0, 60, 3000, vec![74.0, 75.0, 75.0, 74.0, 76.0, 78.0]),
        BenchRun::new(30.0, 90, 3000, vec![110.0, 115.0, 114.0, 111.0, 115.0, 120.0]),
        BenchRun::new(30.0, 100, 3000, vec![124.0, 132.0, 132.0, 123.0, 135.0, 139.0]),
        BenchRun::new(60.0, 30, 6000, vec![56.0, 59.0, 59.0, 58.0, 61.0, 63.0]),
        BenchRun::new(30.0, 60, 6000, vec![69.0, 70.0, 70.0, 70.0, 72.0, 74.0]),
        BenchRun::new(30.0, 90, 6000, vec![105.0, 110.0, 110.0, 107.0, 112.0, 115.0]),
        BenchRun::new(30.0, 100, 6000, vec![124.0, 132.0, 132.0, 123.0, 135.0, 139.0]),
    ]
}

/// Load bench runs from CSV laid out as `time,dutyCycle,rpm,c1,c2,...`.
///
/// The first row is a header. Every row must have the same number of cylinder columns.
pub fn load_csv<R: io::Read>(reader: R) -> Result<Vec<BenchRun>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let cylinder_count = rdr.headers()?.len().saturating_sub(FIRST_CYLINDER_COLUMN);
    if cylinder_count == 0 {
        return Err(FlowError::InvalidMeasurement { row: 0, reason: "header has no cylinder columns".to_string() });
    }

    let mut runs = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        let row = idx + 1;
        if record.len() != FIRST_CYLINDER_COLUMN + cylinder_count {
            return Err(FlowError::InvalidMeasurement {
                row,
                reason: format!("expected {} cylinder columns, found {}",
                                cylinder_count, record.len().saturating_sub(FIRST_CYLINDER_COLUMN))
            });
        }
        let collected_ml = (0..cylinder_count)
            .map(|c| parse_field::<f64>(&record, FIRST_CYLINDER_COLUMN + c, row))
            .collect::<Result<Vec<f64>>>()?;
        let run = BenchRun {
            time_s: parse_field(&record, TIME_COLUMN, row)?,
            duty_cycle_pct: parse_field(&record, DUTY_CYCLE_COLUMN, row)?,
            rpm: parse_field(&record, RPM_COLUMN, row)?,
            collected_ml,
        };
        run.validate(row)?;
        runs.push(run);
    }
    Ok(runs)
}

pub fn load_csv_path(path: &Path) -> Result<Vec<BenchRun>> {
    let runs = load_csv(File::open(path)?)?;
    info!("Loaded {} bench runs from {}", runs.len(), path.display());
    Ok(runs)
}

fn parse_field<T>(record: &csv::StringRecord, index: usize, row: usize) -> Result<T>
    where
        T: FromStr, <T as FromStr>::Err: fmt::Display
{
    let field = record.get(index).ok_or_else(|| {
        FlowError::InvalidMeasurement { row, reason: format!("missing column {}", index + 1) }
    })?;
    field.parse::<T>().map_err(|e| {
        FlowError::InvalidMeasurement {
            row,
            reason: format!("cannot convert '{}' in column {} to {}. {}", field, index + 1, std::any::type_name::<T>(), e)
        }
    })
}
