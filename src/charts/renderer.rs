//! Static Chart Renderer
//! Writes the three salary charts as PNG files with plotters.
//!
//! Figure sizes follow the interactive charts at 100 px per inch:
//! 1. Histogram: 1000x500
//! 2. Job title pie: 800x600
//! 3. Pay vs year scatter: 1000x600

use crate::charts::plotter::{
    label_anchor, palette_color, percent_label, slice_angles, wedge_outline, ChartSet,
    HISTOGRAM_FILL, HISTOGRAM_TITLE, PIE_TITLE, SCATTER_ALPHA, SCATTER_COLOR, SCATTER_TITLE,
};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const HISTOGRAM_FILE: &str = "histogram.png";
pub const PIE_FILE: &str = "job_titles.png";
pub const SCATTER_FILE: &str = "pay_vs_year.png";

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cannot create output directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Nothing to draw for {0}")]
    NoData(&'static str),
}

fn drawing<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

/// Padded axis range; a degenerate range is widened by one unit each side.
fn padded(lo: f64, hi: f64) -> Range<f64> {
    if lo == hi {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render all three charts into `dir`, returning the written paths.
    pub fn render_all(charts: &ChartSet, dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
        fs::create_dir_all(dir)?;

        let histogram = dir.join(HISTOGRAM_FILE);
        Self::render_histogram(charts, &histogram)?;
        let pie = dir.join(PIE_FILE);
        Self::render_pie(charts, &pie)?;
        let scatter = dir.join(SCATTER_FILE);
        Self::render_scatter(charts, &scatter)?;

        log::info!("Saved charts to {}", dir.display());
        Ok(vec![histogram, pie, scatter])
    }

    pub fn render_histogram(charts: &ChartSet, path: &Path) -> Result<(), RenderError> {
        let (first, last) = match (charts.histogram.first(), charts.histogram.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(RenderError::NoData("histogram")),
        };
        let y_max = charts.histogram.iter().map(|b| b.count).max().unwrap_or(0);

        let root = BitMapBackend::new(path, (1000, 500)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(HISTOGRAM_TITLE, (FONT, 24))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(padded(first.start, last.end), 0u32..(y_max + y_max / 20 + 1))
            .map_err(drawing)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(charts.pay_label.as_str())
            .y_desc("Frequency")
            .x_label_formatter(&|v| format!("{v:.0}"))
            .draw()
            .map_err(drawing)?;

        let (r, g, b) = HISTOGRAM_FILL;
        let fill = RGBColor(r, g, b);
        chart
            .draw_series(charts.histogram.iter().map(|bin| {
                Rectangle::new([(bin.start, 0), (bin.end, bin.count)], fill.filled())
            }))
            .map_err(drawing)?;
        chart
            .draw_series(charts.histogram.iter().map(|bin| {
                Rectangle::new([(bin.start, 0), (bin.end, bin.count)], BLACK.stroke_width(1))
            }))
            .map_err(drawing)?;

        root.present().map_err(drawing)?;
        Ok(())
    }

    pub fn render_pie(charts: &ChartSet, path: &Path) -> Result<(), RenderError> {
        if charts.job_titles.is_empty() {
            return Err(RenderError::NoData("job title pie"));
        }

        let (width, height) = (800u32, 600u32);
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        let root = root
            .titled(PIE_TITLE, (FONT, 22))
            .map_err(drawing)?;
        let (area_w, area_h) = root.dim_in_pixel();
        let center = (area_w as f64 / 2.0, area_h as f64 / 2.0);
        let radius = (area_w.min(area_h) as f64) * 0.32;

        // Plot coordinates have y pointing up; pixels have y pointing down.
        let to_pixel = |[x, y]: [f64; 2]| -> (i32, i32) {
            (
                (center.0 + x * radius).round() as i32,
                (center.1 - y * radius).round() as i32,
            )
        };

        let angles = slice_angles(&charts.job_titles);
        for (i, (slice, &(start, end))) in charts.job_titles.iter().zip(angles.iter()).enumerate() {
            let (r, g, b) = palette_color(i);
            let outline: Vec<(i32, i32)> = wedge_outline(start, end, 1.0)
                .into_iter()
                .map(to_pixel)
                .collect();
            root.draw(&Polygon::new(outline.clone(), RGBColor(r, g, b).filled()))
                .map_err(drawing)?;
            root.draw(&PathElement::new(outline, WHITE.stroke_width(1)))
                .map_err(drawing)?;

            let centered = Pos::new(HPos::Center, VPos::Center);
            root.draw(&Text::new(
                percent_label(slice.fraction),
                to_pixel(label_anchor(start, end, 0.6)),
                (FONT, 13).into_font().color(&BLACK).pos(centered),
            ))
            .map_err(drawing)?;

            let anchor = label_anchor(start, end, 1.1);
            let h_pos = if anchor[0] >= 0.0 { HPos::Left } else { HPos::Right };
            root.draw(&Text::new(
                slice.label.clone(),
                to_pixel(anchor),
                (FONT, 12).into_font().color(&BLACK).pos(Pos::new(h_pos, VPos::Center)),
            ))
            .map_err(drawing)?;
        }

        root.present().map_err(drawing)?;
        Ok(())
    }

    pub fn render_scatter(charts: &ChartSet, path: &Path) -> Result<(), RenderError> {
        if charts.scatter.is_empty() {
            return Err(RenderError::NoData("scatter plot"));
        }
        let bounds = |axis: usize| {
            charts.scatter.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[axis]), hi.max(p[axis]))
            })
        };
        let (x_lo, x_hi) = bounds(0);
        let (y_lo, y_hi) = bounds(1);

        let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(SCATTER_TITLE, (FONT, 24))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(padded(x_lo, x_hi), padded(y_lo, y_hi))
            .map_err(drawing)?;

        chart
            .configure_mesh()
            .x_desc(charts.pay_label.as_str())
            .y_desc(charts.year_label.as_str())
            .x_label_formatter(&|v| format!("{v:.0}"))
            .y_label_formatter(&|v| format!("{v:.0}"))
            .draw()
            .map_err(drawing)?;

        let (r, g, b) = SCATTER_COLOR;
        let style = RGBColor(r, g, b).mix(SCATTER_ALPHA).filled();
        chart
            .draw_series(
                charts
                    .scatter
                    .iter()
                    .map(|&[x, y]| Circle::new((x, y), 3, style)),
            )
            .map_err(drawing)?;

        root.present().map_err(drawing)?;
        Ok(())
    }
}
