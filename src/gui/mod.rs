//! GUI module - Interactive chart window

mod app;
mod chart_viewer;
mod control_panel;

pub use app::SalaryViewerApp;
pub use chart_viewer::{ChartKind, ChartViewer};
pub use control_panel::{ControlPanel, ControlPanelAction};

use crate::charts::ChartSet;
use crate::report::SalaryReport;
use eframe::egui;

/// Open the viewer window and block until it is closed.
pub fn run_viewer(report: SalaryReport, charts: ChartSet) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1300.0, 760.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Salary Insights"),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Insights",
        options,
        Box::new(|cc| Ok(Box::new(SalaryViewerApp::new(cc, report, charts)))),
    )
}
