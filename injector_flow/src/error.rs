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

use std::io;

pub type Result<T> = std::result::Result<T, FlowError>;

#[derive(thiserror::Error, Debug)]
pub enum FlowError {
    #[error("io error")]
    IoError(#[from] io::Error),
    #[error("csv error. `{0}`")]
    CsvError(#[from] csv::Error),
    #[error("invalid measurement in row {row}. {reason}")]
    InvalidMeasurement { row: usize, reason: String },
    #[error("no bench data recorded at {rpm} RPM")]
    NoData { rpm: u32 },
}
