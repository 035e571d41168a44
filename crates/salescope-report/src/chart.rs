//! Chart rendering — one fixed-size PNG per summary view.

use std::path::Path;

use plotters::prelude::*;

use crate::aggregate::{ChartKind, SummaryView};
use crate::error::{ReportError, Result};

/// Nominal raster size of every chart, in pixels.
pub const CHART_WIDTH_PX: u32 = 800;
pub const CHART_HEIGHT_PX: u32 = 480;

/// Render `view` as a PNG at `path`.
///
/// Bar views draw one filled column per category; line views draw the series
/// with point markers. A drawing error is reported to the caller, which
/// omits this chart and continues with the rest of the report.
pub fn render(view: &SummaryView, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (CHART_WIDTH_PX, CHART_HEIGHT_PX)).into_drawing_area();
    root.fill(&WHITE).map_err(to_chart_error)?;

    let y_max = view
        .entries
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(view.title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(64)
        .build_cartesian_2d(0usize..view.entries.len(), 0f64..y_max)
        .map_err(to_chart_error)?;

    let entries = &view.entries;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(entries.len() + 1)
        .x_label_formatter(&|idx| {
            entries
                .get(*idx)
                .map(|(label, _)| label.clone())
                .unwrap_or_default()
        })
        .y_desc(view.value_label)
        .draw()
        .map_err(to_chart_error)?;

    match view.kind {
        ChartKind::Bar => {
            chart
                .draw_series(entries.iter().enumerate().map(|(i, (_, v))| {
                    let mut bar = Rectangle::new([(i, 0.0), (i + 1, *v)], BLUE.mix(0.55).filled());
                    bar.set_margin(0, 0, 10, 10);
                    bar
                }))
                .map_err(to_chart_error)?;
        }
        ChartKind::Line => {
            chart
                .draw_series(LineSeries::new(
                    entries.iter().enumerate().map(|(i, (_, v))| (i, *v)),
                    &BLUE,
                ))
                .map_err(to_chart_error)?;
            chart
                .draw_series(
                    entries
                        .iter()
                        .enumerate()
                        .map(|(i, (_, v))| Circle::new((i, *v), 4, BLUE.filled())),
                )
                .map_err(to_chart_error)?;
        }
    }

    root.present().map_err(to_chart_error)?;
    Ok(())
}

fn to_chart_error<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Chart(e.to_string())
}
