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

use brake_model::{ActualCurve, BrakeCurve, BrakeModel};
use injector_flow::{consistency, rpm_groups, runs_at_rpm, summarize, FlowRun};

/// Deceleration the ideal front share is reported at
const REFERENCE_DECELERATION_G: f64 = 1.0;

fn as_percent(share: Option<f64>) -> String {
    match share {
        Some(s) => format!("{:.1}%", s * 100.0),
        None => "n/a".to_string()
    }
}

pub fn stroke_line(curve: &ActualCurve) -> String {
    format!("lever_motion_ratio {:.2} pedal_stroke {}", curve.lever_motion_ratio, curve.pedal_max_stroke_mm as usize)
}

pub fn brake_summary(model: &BrakeModel, ideal: &BrakeCurve, actual: &[ActualCurve]) -> String {
    let mut lines = vec!["Brake Bias Summary:".to_string()];
    lines.extend(actual.iter().map(|curve| {
        let share = curve.curve.points().iter().find_map(|p| p.front_share());
        format!("fulcrum_to_plunger {} plunger_to_rod {}: {}, front bias {}",
                curve.geometry.fulcrum_to_plunger_mm,
                curve.geometry.plunger_to_rod_mm,
                stroke_line(curve),
                as_percent(share))
    }));
    if let Some(point) = ideal.point_nearest(REFERENCE_DECELERATION_G) {
        lines.push(format!("Ideal front bias at {:.2}g: {}", point.input, as_percent(point.front_share())));
    }
    lines.push(format!("Rear liftoff at {:.2}g", model.rear_liftoff_deceleration()));
    lines.extend(ideal.warnings().iter().map(|warning| format!("Warning: {}", warning)));
    as_block(lines)
}

pub fn flow_summary(runs: &[FlowRun]) -> injector_flow::Result<String> {
    let mut lines = vec!["Flow Rate Summary:".to_string()];
    for rpm in rpm_groups(runs) {
        lines.push(String::new());
        lines.push(format!("{} RPM:", rpm));
        for cylinder in summarize(runs, rpm)? {
            lines.push(format!("{}: Min = {:.2}, Max = {:.2}, Avg = {:.2} ml/min",
                               cylinder.label(), cylinder.min, cylinder.max, cylinder.mean));
        }
        let spreads = runs_at_rpm(runs, rpm).into_iter()
            .filter_map(consistency)
            .map(|c| format!("{}%: {:.1}%", c.duty_cycle_pct, c.spread * 100.0))
            .join(", ");
        lines.push(format!("Cylinder spread by duty cycle: {}", spreads));
    }
    Ok(as_block(lines))
}

fn as_block(lines: Vec<String>) -> String {
    let mut block = lines.join("\n");
    block.push('\n');
    block
}
