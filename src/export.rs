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

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use serde::Serialize;
use tracing::info;

use brake_model::{ActualCurve, BrakeCurve, HydraulicConfig, VehicleConfig};

/// Everything needed to redraw the brake chart elsewhere
#[derive(Serialize)]
pub struct CurveExport<'a> {
    pub vehicle: &'a VehicleConfig,
    pub hydraulics: &'a HydraulicConfig,
    pub ideal: &'a BrakeCurve,
    pub actual: &'a [ActualCurve],
}

impl<'a> CurveExport<'a> {
    pub fn write(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        info!("Brake curves exported to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use brake_model::{BrakeModel, HydraulicConfig, VehicleConfig};
    use crate::export::CurveExport;

    #[test]
    fn export_contains_every_curve() {
        let model = BrakeModel::new(VehicleConfig::default(), HydraulicConfig::default()).unwrap();
        let ideal = model.ideal_curve(&[0.0, 1.0]);
        let actual = model.actual_curves(&[0.0, 50.0]);
        let export = CurveExport { vehicle: model.vehicle(), hydraulics: model.hydraulics(), ideal: &ideal, actual: &actual };
        let value: serde_json::Value = serde_json::to_value(&export).unwrap();
        assert_eq!(value["vehicle"]["mass_kg"], 975.0);
        assert_eq!(value["ideal"]["points"].as_array().unwrap().len(), 2);
        assert_eq!(value["actual"][0]["geometry"]["fulcrum_to_plunger_mm"], 81.0);
        assert_eq!(value["actual"][0]["curve"]["variable"], "pedal_force");
        assert_eq!(value["hydraulics"]["master_cylinder_layout"], "dual");
    }
}
