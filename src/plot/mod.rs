//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

use crate::config::{Config, Layout};
use crate::data::{Method, OpLabel, Operation, Outcome, Table, METHODS, OPERATIONS, OUTCOMES};
use crate::error::Error;

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use std::fmt::Display;
use std::ops::Range;
use std::path::Path;

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

const COLOURS: &[RGBColor] = &[
    hexcolour!(0x332288),
    hexcolour!(0x117733),
    hexcolour!(0x44AA99),
    hexcolour!(0x88CCEE),
    hexcolour!(0xCC6677),
    hexcolour!(0x882255),
];

/// The load factors kept by the `window` layout, and its fixed x range.
const WINDOW_ALPHAS: [f64; 3] = [0.5, 0.6, 0.7];
const WINDOW_X_MIN: f64 = 0.45;
const WINDOW_X_MAX: f64 = 0.75;

const X_DESC: &str = "α (load factor)";
const Y_DESC: &str = "time (ns)";

type FacetChart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub fn render(table: &Table, config: &Config) -> Result<(), Error> {
    let output = config.output();
    let size = (config.width(), config.height());
    let caption = config.caption();
    match config.layout() {
        Layout::PerMethod => per_method(table, &output, size, &caption),
        Layout::Grid => facets(table, &output, size, &caption, false),
        Layout::Window => facets(table, &output, size, &caption, true),
    }
}

/// 1x3 panels, one per hashing method, all six operation series in each.
fn per_method(table: &Table, path: &Path, size: (u32, u32), caption: &str) -> Result<(), Error> {
    let alphas = table.alphas();
    if alphas.is_empty() {
        return Err(Error::EmptyInput);
    }
    let x_range = alpha_range(&alphas);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;
    let body = root.titled(caption, ("sans-serif", 30)).map_err(draw_err)?;
    let panels = body.split_evenly((1, METHODS.len()));

    for (panel, &method) in panels.iter().zip(METHODS.iter()) {
        let mut series = Vec::new();
        for &operation in &OPERATIONS {
            for &outcome in &OUTCOMES {
                series.push((
                    OpLabel::new(operation, outcome),
                    selection(table, method, operation, outcome, None)?,
                ));
            }
        }
        let y_max = series
            .iter()
            .flat_map(|(_, points)| points.iter().map(|&(_, y)| y))
            .fold(0.0f64, f64::max);

        let mut chart = ChartBuilder::on(panel)
            .caption(method.name(), ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.clone(), 0.0..y_max * 1.05)
            .map_err(draw_err)?;
        mesh(&mut chart, alphas.len())?;

        for (i, (label, points)) in series.iter().enumerate() {
            let colour = COLOURS[i % COLOURS.len()];
            draw_pair(&mut chart, points, &label.to_string(), colour, label.outcome)?;
        }
        legend(&mut chart)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Method x operation panels, success vs failure in each. The window
/// variant subsets the load factors and rounds the y limit up to the
/// next hundred.
fn facets(
    table: &Table,
    path: &Path,
    size: (u32, u32),
    caption: &str,
    window: bool,
) -> Result<(), Error> {
    let alphas = table.alphas();
    if alphas.is_empty() {
        return Err(Error::EmptyInput);
    }
    let (subset, x_range, x_labels) = if window {
        (
            Some(&WINDOW_ALPHAS[..]),
            WINDOW_X_MIN..WINDOW_X_MAX,
            WINDOW_ALPHAS.len(),
        )
    } else {
        (None, alpha_range(&alphas), alphas.len())
    };

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;
    let body = root.titled(caption, ("sans-serif", 30)).map_err(draw_err)?;
    let panels = body.split_evenly((METHODS.len(), OPERATIONS.len()));

    for (i, &method) in METHODS.iter().enumerate() {
        for (j, &operation) in OPERATIONS.iter().enumerate() {
            let panel = &panels[i * OPERATIONS.len() + j];
            let success = selection(table, method, operation, Outcome::Success, subset)?;
            let failure = selection(table, method, operation, Outcome::Failure, subset)?;

            let y_max = success
                .iter()
                .chain(failure.iter())
                .map(|&(_, y)| y)
                .fold(0.0f64, f64::max);
            let y_end = if window {
                ceil_hundred(y_max)
            } else {
                y_max * 1.05
            };

            let mut chart = ChartBuilder::on(panel)
                .caption(format!("{} - {}", method, operation), ("sans-serif", 18))
                .margin(8)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(x_range.clone(), 0.0..y_end)
                .map_err(draw_err)?;
            mesh(&mut chart, x_labels)?;

            draw_pair(&mut chart, &success, "success", GREEN, Outcome::Success)?;
            draw_pair(&mut chart, &failure, "failure", RED, Outcome::Failure)?;
            legend(&mut chart)?;
        }
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

/// The points for one series, optionally restricted to a load-factor
/// subset. An empty selection is an error, not a blank panel.
fn selection(
    table: &Table,
    method: Method,
    operation: Operation,
    outcome: Outcome,
    window: Option<&[f64]>,
) -> Result<Vec<(f64, f64)>, Error> {
    let mut points = table.series(method, operation, outcome);
    if let Some(alphas) = window {
        points.retain(|(a, _)| alphas.iter().any(|w| (a - w).abs() < 1e-9));
    }
    if points.is_empty() {
        return Err(Error::EmptySelection {
            method: method.name().to_string(),
            label: OpLabel::new(operation, outcome).to_string(),
        });
    }
    Ok(points)
}

/// Success series draw as solid lines with circle markers, failure
/// series as dashed lines with cross markers.
fn draw_pair(
    chart: &mut FacetChart<'_, '_>,
    points: &[(f64, f64)],
    label: &str,
    colour: RGBColor,
    outcome: Outcome,
) -> Result<(), Error> {
    match outcome {
        Outcome::Success => {
            chart
                .draw_series(LineSeries::new(
                    points.iter().copied(),
                    colour.stroke_width(2),
                ))
                .map_err(draw_err)?
                .label(label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2))
                });
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 3, colour.filled())),
                )
                .map_err(draw_err)?;
        }
        Outcome::Failure => {
            chart
                .draw_series(DashedLineSeries::new(
                    points.iter().copied(),
                    6,
                    4,
                    colour.stroke_width(2),
                ))
                .map_err(draw_err)?
                .label(label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2))
                });
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| Cross::new((x, y), 3, colour.stroke_width(2))),
                )
                .map_err(draw_err)?;
        }
    }
    Ok(())
}

fn mesh(chart: &mut FacetChart<'_, '_>, labels: usize) -> Result<(), Error> {
    chart
        .configure_mesh()
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .x_labels(labels)
        .draw()
        .map_err(draw_err)
}

fn legend<'a, 'b: 'a>(chart: &mut FacetChart<'a, 'b>) -> Result<(), Error> {
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(draw_err)
}

fn alpha_range(alphas: &[f64]) -> Range<f64> {
    let min = alphas[0];
    let max = alphas[alphas.len() - 1];
    let pad = ((max - min) * 0.1).max(0.05);
    (min - pad)..(max + pad)
}

/// From 0 up to the next multiple of 100 above the maximum.
fn ceil_hundred(value: f64) -> f64 {
    ((value as i64 / 100) + 1) as f64 * 100.0
}

fn draw_err<E: Display>(e: E) -> Error {
    Error::Plot(e.to_string())
}
