//! Salary Insights Viewer Window
//! Summary panel on the left, the selected chart in the center.

use crate::charts::{ChartSet, StaticChartRenderer};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::report::SalaryReport;
use egui::SidePanel;

/// Main application window.
pub struct SalaryViewerApp {
    report: SalaryReport,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl SalaryViewerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, report: SalaryReport, charts: ChartSet) -> Self {
        Self {
            report,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(charts),
        }
    }

    /// Ask for a folder and write the three charts into it.
    fn handle_export_png(&mut self) {
        let Some(dir) = rfd::FileDialog::new()
            .set_title("Save charts to folder")
            .pick_folder()
        else {
            return;
        };

        match StaticChartRenderer::render_all(&self.chart_viewer.charts, &dir) {
            Ok(paths) => {
                self.control_panel.set_status(&format!(
                    "Saved {} charts to {}",
                    paths.len(),
                    dir.display()
                ));
            }
            Err(e) => {
                log::error!("Chart export failed: {e}");
                self.control_panel.set_status(&format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for SalaryViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui, &self.report) {
                        ControlPanelAction::SelectChart(kind) => self.chart_viewer.select(kind),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(kind) = self.chart_viewer.show(ui) {
                self.control_panel.selected = kind;
            }
        });
    }
}
