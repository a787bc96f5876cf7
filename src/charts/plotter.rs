//! Chart Plotter Module
//! Chart data for the three salary charts and their interactive egui_plot rendering.

use crate::config::AnalysisConfig;
use crate::stats::{HistogramBin, StatsCalculator, StatsError};
use egui::{Align2, Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Points, Polygon, Text};
use serde::Serialize;
use std::f64::consts::TAU;

pub const HISTOGRAM_TITLE: &str = "Distribution of Salaries";
pub const PIE_TITLE: &str = "Proportion of Employees in Different Departments";
pub const SCATTER_TITLE: &str = "Scatter Plot of Year vs Salary";

/// Histogram bar fill (orange); edges are black
pub const HISTOGRAM_FILL: (u8, u8, u8) = (255, 165, 0);
pub const SCATTER_COLOR: (u8, u8, u8) = (31, 119, 180);
pub const SCATTER_ALPHA: f64 = 0.5;

/// Slice colors, cycled when there are more slices than colors
pub const PALETTE: [(u8, u8, u8); 12] = [
    (52, 152, 219),  // Blue
    (231, 76, 60),   // Red
    (46, 204, 113),  // Green
    (155, 89, 182),  // Purple
    (243, 156, 18),  // Orange
    (26, 188, 156),  // Teal
    (233, 30, 99),   // Pink
    (0, 188, 212),   // Cyan
    (255, 87, 34),   // Deep Orange
    (121, 85, 72),   // Brown
    (96, 125, 139),  // Blue Grey
    (205, 220, 57),  // Lime
];

/// Segments used to approximate a full circle.
const CIRCLE_SEGMENTS: f64 = 180.0;

/// One pie wedge: a job title and its share of the displayed titles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
}

/// Precomputed data for the histogram, pie and scatter charts.
#[derive(Debug, Clone, Default)]
pub struct ChartSet {
    pub pay_label: String,
    pub year_label: String,
    pub histogram: Vec<HistogramBin>,
    pub job_titles: Vec<PieSlice>,
    pub scatter: Vec<[f64; 2]>,
}

impl ChartSet {
    /// Compute all chart data from the full table.
    pub fn build(
        df: &polars::prelude::DataFrame,
        config: &AnalysisConfig,
    ) -> Result<Self, StatsError> {
        let pay = StatsCalculator::column_values(df, &config.pay_column)?;
        let year = StatsCalculator::column_values(df, &config.year_column)?;

        let present: Vec<f64> = pay.iter().flatten().copied().collect();
        let histogram = StatsCalculator::histogram(&present, config.bins);

        let counts = StatsCalculator::value_counts(df, &config.group_column)?;
        let job_titles = pie_slices(
            counts
                .into_iter()
                .take(config.top)
                .map(|c| (c.value, c.count)),
        );

        let scatter: Vec<[f64; 2]> = pay
            .iter()
            .zip(year.iter())
            .filter_map(|(p, y)| Some([(*p)?, (*y)?]))
            .collect();

        log::debug!(
            "Chart data: {} bins, {} slices, {} scatter points",
            histogram.len(),
            job_titles.len(),
            scatter.len()
        );

        Ok(Self {
            pay_label: "Salary".to_string(),
            year_label: "Year".to_string(),
            histogram,
            job_titles,
            scatter,
        })
    }
}

/// Normalize counts into slices whose fractions sum to 1.
pub fn pie_slices(counts: impl IntoIterator<Item = (String, usize)>) -> Vec<PieSlice> {
    let counts: Vec<(String, usize)> = counts.into_iter().collect();
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    if total == 0 {
        return Vec::new();
    }
    counts
        .into_iter()
        .map(|(label, count)| PieSlice {
            label,
            count,
            fraction: count as f64 / total as f64,
        })
        .collect()
}

/// Start and end angle (radians, counter-clockwise from +x) of each slice.
pub fn slice_angles(slices: &[PieSlice]) -> Vec<(f64, f64)> {
    let mut start = 0.0;
    slices
        .iter()
        .map(|s| {
            let end = start + s.fraction * TAU;
            let span = (start, end);
            start = end;
            span
        })
        .collect()
}

/// Outline of a wedge of the circle centered at the origin, starting at the center.
pub fn wedge_outline(start: f64, end: f64, radius: f64) -> Vec<[f64; 2]> {
    let steps = (((end - start) / TAU) * CIRCLE_SEGMENTS).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = start + (end - start) * i as f64 / steps as f64;
        points.push([radius * angle.cos(), radius * angle.sin()]);
    }
    points
}

/// Point at `radius` along the bisector of a wedge.
pub fn label_anchor(start: f64, end: f64, radius: f64) -> [f64; 2] {
    let mid = (start + end) / 2.0;
    [radius * mid.cos(), radius * mid.sin()]
}

/// Percentage label as printed on the pie.
pub fn percent_label(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

pub fn palette_color(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

fn color32((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Draws the charts of a [`ChartSet`] into an egui Ui.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn draw_histogram(ui: &mut egui::Ui, charts: &ChartSet) {
        ui.label(RichText::new(HISTOGRAM_TITLE).size(16.0).strong());

        let bars: Vec<Bar> = charts
            .histogram
            .iter()
            .map(|bin| {
                Bar::new((bin.start + bin.end) / 2.0, bin.count as f64)
                    .width(bin.end - bin.start)
                    .fill(color32(HISTOGRAM_FILL))
                    .stroke(Stroke::new(1.0, Color32::BLACK))
                    .name(format!("{:.0} – {:.0}", bin.start, bin.end))
            })
            .collect();

        Plot::new("salary_histogram")
            .x_axis_label(charts.pay_label.clone())
            .y_axis_label("Frequency")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(color32(HISTOGRAM_FILL)));
            });
    }

    pub fn draw_pie(ui: &mut egui::Ui, charts: &ChartSet) {
        ui.label(RichText::new(PIE_TITLE).size(16.0).strong());

        if charts.job_titles.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No job titles").size(20.0));
            });
            return;
        }

        let angles = slice_angles(&charts.job_titles);

        Plot::new("job_title_pie")
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_scroll(false)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for (i, (slice, &(start, end))) in
                    charts.job_titles.iter().zip(angles.iter()).enumerate()
                {
                    let color = color32(palette_color(i));
                    plot_ui.polygon(
                        Polygon::new(wedge_outline(start, end, 1.0))
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE))
                            .name(&slice.label),
                    );

                    let [px, py] = label_anchor(start, end, 0.6);
                    plot_ui.text(
                        Text::new(PlotPoint::new(px, py), percent_label(slice.fraction))
                            .color(Color32::BLACK),
                    );

                    let [lx, ly] = label_anchor(start, end, 1.1);
                    let anchor = if lx >= 0.0 {
                        Align2::LEFT_CENTER
                    } else {
                        Align2::RIGHT_CENTER
                    };
                    plot_ui.text(
                        Text::new(PlotPoint::new(lx, ly), slice.label.clone()).anchor(anchor),
                    );
                }
            });
    }

    pub fn draw_scatter(ui: &mut egui::Ui, charts: &ChartSet) {
        ui.label(RichText::new(SCATTER_TITLE).size(16.0).strong());

        let (r, g, b) = SCATTER_COLOR;
        let color = Color32::from_rgba_unmultiplied(r, g, b, (SCATTER_ALPHA * 255.0) as u8);

        Plot::new("pay_vs_year")
            .x_axis_label(charts.pay_label.clone())
            .y_axis_label(charts.year_label.clone())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(charts.scatter.clone())
                        .radius(2.5)
                        .color(color)
                        .name("Employees"),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_pie_slices_sum_to_one() {
        let slices = pie_slices(vec![("A".to_string(), 3), ("B".to_string(), 1)]);
        assert_eq!(slices[0].fraction, 0.75);
        assert_eq!(slices[1].fraction, 0.25);
        assert!(pie_slices(Vec::new()).is_empty());
    }

    #[test]
    fn test_slice_angles_cover_full_circle() {
        let slices = pie_slices(vec![
            ("A".to_string(), 1),
            ("B".to_string(), 1),
            ("C".to_string(), 2),
        ]);
        let angles = slice_angles(&slices);
        assert_eq!(angles[0].0, 0.0);
        assert_eq!(angles[0].1, angles[1].0);
        assert!((angles[2].1 - TAU).abs() < 1e-12);
    }

    #[test]
    fn test_wedge_outline_starts_at_center_and_stays_on_circle() {
        let outline = wedge_outline(0.0, TAU / 4.0, 2.0);
        assert_eq!(outline[0], [0.0, 0.0]);
        assert_eq!(outline[1], [2.0, 0.0]);
        let last = outline.last().unwrap();
        assert!(last[0].abs() < 1e-12 && (last[1] - 2.0).abs() < 1e-12);
        for p in &outline[1..] {
            assert!(((p[0] * p[0] + p[1] * p[1]).sqrt() - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_percent_label() {
        assert_eq!(percent_label(0.1234), "12.3%");
        assert_eq!(percent_label(1.0), "100.0%");
    }

    #[test]
    fn test_build_chart_set() {
        let df = df!(
            "JobTitle" => [Some("CLERK"), Some("NURSE"), Some("CLERK"), Some("MAYOR"), None],
            "TotalPay" => [Some(10.0), None, Some(30.0), Some(50.0), Some(70.0)],
            "Year" => [2011i64, 2012, 2013, 2014, 2014],
        )
        .unwrap();
        let config = AnalysisConfig {
            bins: 4,
            top: 2,
            ..AnalysisConfig::default()
        };

        let charts = ChartSet::build(&df, &config).unwrap();

        assert_eq!(charts.histogram.len(), 4);
        assert_eq!(charts.histogram.iter().map(|b| b.count).sum::<u32>(), 4);

        let labels: Vec<&str> = charts.job_titles.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["CLERK", "MAYOR"]);
        let total: f64 = charts.job_titles.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-12);

        assert_eq!(charts.scatter.len(), 4);
        assert_eq!(charts.scatter[0], [10.0, 2011.0]);
    }
}
