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

mod settings;
mod plot;
mod report;
mod export;

use std::env;
use std::error::Error;
use std::fs;
use tracing_subscriber;
use tracing_appender;
use tracing::{error, info};

use brake_model::BrakeModel;
use injector_flow::{bench_data, load_csv_path, normalize};
use crate::export::CurveExport;
use crate::settings::Settings;


fn main() -> Result<(), Box<dyn Error>> {
    match env::current_dir() {
        Ok(current_dir) => {
            let file_appender = tracing_appender::rolling::never(current_dir, "brake_bench.log");
            let subscriber = tracing_subscriber::fmt()
                .with_writer(file_appender)
                .with_ansi(false)
                .compact()
                .finish();
            match tracing::subscriber::set_global_default(subscriber) {
                Ok(_) => {
                    info!("Logging initialised");
                }
                Err(e) => {
                    eprintln!("Failed to init logging. {}", e.to_string());
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to init logging. Couldn't determine current dir {}", e.to_string());
        }
    }

    let settings = Settings::load()?;
    if let Err(e) = settings.validate() {
        error!("Invalid settings. {}", e.to_string());
        return Err(e.into());
    }
    fs::create_dir_all(settings.output_directory())?;

    run_brake_analysis(&settings)?;
    run_injector_analysis(&settings)?;
    Ok(())
}

fn run_brake_analysis(settings: &Settings) -> Result<(), Box<dyn Error>> {
    let model = BrakeModel::new(settings.vehicle.clone(), settings.hydraulics.clone())?;

    let ideal = model.ideal_curve(&settings.sweeps.deceleration_g.values());
    let actual = model.actual_curves(&settings.sweeps.pedal_force_n.values());
    for curve in &actual {
        info!("{}", report::stroke_line(curve));
    }
    println!("{}", report::brake_summary(&model, &ideal, &actual));

    plot::draw_brake_chart(&settings.brake_chart_path(),
                           model.vehicle(),
                           &ideal,
                           &actual,
                           settings.sweeps.marker_interval)?;
    CurveExport {
        vehicle: model.vehicle(),
        hydraulics: model.hydraulics(),
        ideal: &ideal,
        actual: &actual,
    }.write(&settings.curve_export_path())
}

fn run_injector_analysis(settings: &Settings) -> Result<(), Box<dyn Error>> {
    let bench_runs = match settings.bench_data_csv() {
        Some(path) => load_csv_path(&path)?,
        None => {
            info!("Using built in injector bench data");
            bench_data()
        }
    };
    let flow_runs = normalize(&bench_runs);
    plot::draw_injector_chart(&settings.injector_chart_path(), &flow_runs)?;
    println!("{}", report::flow_summary(&flow_runs)?);
    Ok(())
}
