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

use std::path::Path;
use plotters::prelude::*;
use tracing::info;

use injector_flow::{rpm_groups, runs_at_rpm, FlowRun};
use crate::plot::{as_usize, axis_limit, PlotResult, FONT};

const CYLINDER_COLOURS: [RGBColor; 6] = [
    RGBColor(255, 0, 0),
    RGBColor(0, 128, 0),
    RGBColor(0, 0, 255),
    RGBColor(255, 165, 0),
    RGBColor(165, 42, 42),
    RGBColor(128, 0, 128),
];

/// Scatter plot of duty cycle against flow rate with one panel per tested RPM
pub fn draw_injector_chart(path: &Path, runs: &[FlowRun]) -> PlotResult {
    let rpms = rpm_groups(runs);
    let cylinder_count = runs.iter().map(|run| run.flow_ml_per_min.len()).max().unwrap_or(0);
    let max_flow = runs.iter()
        .flat_map(|run| run.flow_ml_per_min.iter())
        .fold(0.0f64, |acc, flow| acc.max(*flow));

    let root = SVGBackend::new(path, (800 * rpms.len().max(1) as u32, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Fuel Injector Flow Rate Comparison", (FONT, 28))?;
    let panels = root.split_evenly((1, rpms.len().max(1)));

    for (panel, rpm) in panels.iter().zip(rpms) {
        let rpm_runs = runs_at_rpm(runs, rpm);
        let mut context = ChartBuilder::on(panel)
            .margin(15)
            .caption(format!("{} RPM", rpm), (FONT, 20))
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .build_cartesian_2d(0f64..110f64, 0f64..axis_limit(max_flow, 50.0))?;

        context
            .configure_mesh()
            .x_label_formatter(&as_usize)
            .x_desc("Duty Cycle (%)")
            .y_label_formatter(&as_usize)
            .y_desc("Flow Rate (ml/min)")
            .light_line_style(BLACK.mix(0.05))
            .draw()?;

        for cylinder in 0..cylinder_count {
            let colour = CYLINDER_COLOURS[cylinder % CYLINDER_COLOURS.len()];
            context
                .draw_series(rpm_runs.iter().filter_map(|run| {
                    run.flow_ml_per_min.get(cylinder).map(|flow| {
                        Circle::new((run.duty_cycle_pct as f64, *flow), 6, colour.mix(0.7).filled())
                    })
                }))?
                .label(format!("c{}", cylinder + 1))
                .legend(move |(x, y)| Circle::new((x + 10, y), 5, colour.filled()));
        }

        context
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    info!("Injector chart written to {}", path.display());
    Ok(())
}
