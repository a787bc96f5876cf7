//! Control Panel Widget
//! Left side panel with the dataset summary, chart selection and PNG export.

use crate::gui::ChartKind;
use crate::report::SalaryReport;
use egui::{Color32, Grid, RichText};

fn fmt_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Left side control panel.
pub struct ControlPanel {
    pub selected: ChartKind,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selected: ChartKind::Histogram,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, report: &SalaryReport) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("💰 Salary Insights")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new(&report.source).size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Dataset Section =====
        ui.label(RichText::new("📁 Dataset").size(14.0).strong());
        ui.add_space(5.0);
        Grid::new("dataset_grid").num_columns(2).show(ui, |ui| {
            ui.label("Rows:");
            ui.label(report.rows.to_string());
            ui.end_row();
            ui.label("Columns:");
            ui.label(report.columns.to_string());
            ui.end_row();
            ui.label("Rows after cleaning:");
            ui.label(report.cleaned_rows.to_string());
            ui.end_row();
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Salary Section =====
        ui.label(RichText::new(format!("📈 {}", report.pay_column)).size(14.0).strong());
        ui.add_space(5.0);
        let stats = &report.salary.describe;
        let rows = [
            ("Mean", fmt_stat(stats.mean)),
            ("Median", fmt_stat(stats.median)),
            ("Mode", report.salary.mode.map(fmt_stat).unwrap_or_else(|| "NaN".into())),
            ("Min", fmt_stat(stats.min)),
            ("Max", fmt_stat(stats.max)),
            ("Range", fmt_stat(report.salary.range)),
            ("Std", fmt_stat(stats.std)),
            (
                "Corr. with Year",
                report
                    .correlation
                    .map(|r| format!("{r:.4}"))
                    .unwrap_or_else(|| "NaN".into()),
            ),
        ];
        Grid::new("salary_grid").num_columns(2).striped(true).show(ui, |ui| {
            for (name, value) in rows {
                ui.label(name);
                ui.label(RichText::new(value).monospace());
                ui.end_row();
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Chart Section =====
        ui.label(RichText::new("📊 Charts").size(14.0).strong());
        ui.add_space(5.0);
        for kind in ChartKind::ALL {
            if ui
                .radio(self.selected == kind, kind.title())
                .clicked()
                && self.selected != kind
            {
                self.selected = kind;
                action = ControlPanelAction::SelectChart(kind);
            }
        }

        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            if ui
                .add_sized([200.0, 30.0], egui::Button::new("💾 Save charts as PNG"))
                .clicked()
            {
                action = ControlPanelAction::ExportPng;
            }
        });

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Saved") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectChart(ChartKind),
    ExportPng,
}
