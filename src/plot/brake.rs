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

use brake_model::{ActualCurve, BrakeCurve, VehicleConfig};
use crate::plot::{as_usize, axis_limit, PlotResult, FONT};

const ANNOTATION_FILL: RGBColor = RGBColor(255, 255, 224);

pub fn actual_curve_label(curve: &ActualCurve) -> String {
    format!("Actual Distribution (stroke={})", curve.pedal_max_stroke_mm as usize)
}

pub fn vehicle_annotation(vehicle: &VehicleConfig) -> Vec<String> {
    vec![
        format!("Vehicle Mass: {} kg", vehicle.mass_kg),
        format!("CG Height: {} m", vehicle.cg_height_m),
        format!("Wheelbase: {} m", vehicle.wheelbase_m),
        format!("Front Weight Distribution: {:.1}%", vehicle.static_front_fraction * 100.0),
    ]
}

/// Plot the ideal curve and every actual curve as rear force against front force
pub fn draw_brake_chart(path: &Path,
                        vehicle: &VehicleConfig,
                        ideal: &BrakeCurve,
                        actual: &[ActualCurve],
                        marker_interval: usize) -> PlotResult
{
    let max_front = actual.iter().fold(ideal.max_front_n(), |acc, c| acc.max(c.curve.max_front_n()));
    let max_rear = actual.iter().fold(ideal.max_rear_n(), |acc, c| acc.max(c.curve.max_rear_n()));

    let root = SVGBackend::new(path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut context = ChartBuilder::on(&root)
        .margin(15)
        .caption("Ideal Brake Force Distribution", (FONT, 24))
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .build_cartesian_2d(0f64..axis_limit(max_front, 1000.0),
                            0f64..axis_limit(max_rear, 1000.0))?;

    context
        .configure_mesh()
        .x_label_formatter(&as_usize)
        .x_desc("Front Brake Force (N)")
        .y_label_formatter(&as_usize)
        .y_desc("Rear Brake Force (N)")
        .axis_desc_style((FONT, 16))
        .bold_line_style(BLACK.mix(0.2))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    context
        .draw_series(LineSeries::new(ideal.front_vs_rear(), BLUE.stroke_width(3)))?
        .label("Ideal Brake Curve")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(3)));

    for (idx, curve) in actual.iter().enumerate() {
        let colour = Palette99::pick(idx + 1).to_rgba();
        context
            .draw_series(LineSeries::new(curve.curve.front_vs_rear(), colour.stroke_width(2)))?
            .label(actual_curve_label(curve))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2)));
    }

    context.draw_series(
        ideal.points().iter().step_by(marker_interval.max(1)).map(|point| {
            EmptyElement::at((point.front_n, point.rear_n))
                + Circle::new((0, 0), 4, BLACK.filled())
                + Text::new(format!("{:.1}g", point.input), (10, -7), (FONT, 14).into_font())
        })
    )?;

    context
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    let lines = vehicle_annotation(vehicle);
    let (left, top) = (100, 70);
    root.draw(&Rectangle::new([(left, top), (left + 300, top + 20 + 22 * lines.len() as i32)],
                              ANNOTATION_FILL.mix(0.8).filled()))?;
    let text_style = TextStyle::from((FONT, 15)).color(&BLACK);
    for (idx, line) in lines.iter().enumerate() {
        root.draw_text(line, &text_style, (left + 10, top + 10 + 22 * idx as i32))?;
    }

    root.present()?;
    info!("Brake chart written to {}", path.display());
    Ok(())
}
