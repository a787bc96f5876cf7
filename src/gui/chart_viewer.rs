//! Chart Viewer Widget
//! Central panel showing one of the three salary charts at a time.

use crate::charts::{ChartPlotter, ChartSet, HISTOGRAM_TITLE, PIE_TITLE, SCATTER_TITLE};
use egui::RichText;

/// The three charts the viewer can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Histogram,
    JobTitles,
    PayVsYear,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::Histogram,
        ChartKind::JobTitles,
        ChartKind::PayVsYear,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Histogram => HISTOGRAM_TITLE,
            ChartKind::JobTitles => PIE_TITLE,
            ChartKind::PayVsYear => SCATTER_TITLE,
        }
    }
}

pub struct ChartViewer {
    pub charts: ChartSet,
    pub current: ChartKind,
}

impl ChartViewer {
    pub fn new(charts: ChartSet) -> Self {
        Self {
            charts,
            current: ChartKind::Histogram,
        }
    }

    pub fn select(&mut self, kind: ChartKind) {
        self.current = kind;
    }

    /// Tab strip plus the selected chart.
    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<ChartKind> {
        let mut changed = None;
        ui.horizontal(|ui| {
            for kind in ChartKind::ALL {
                if ui
                    .selectable_label(self.current == kind, RichText::new(kind.title()).size(13.0))
                    .clicked()
                    && self.current != kind
                {
                    self.current = kind;
                    changed = Some(kind);
                }
            }
        });
        ui.separator();

        match self.current {
            ChartKind::Histogram => ChartPlotter::draw_histogram(ui, &self.charts),
            ChartKind::JobTitles => ChartPlotter::draw_pie(ui, &self.charts),
            ChartKind::PayVsYear => ChartPlotter::draw_scatter(ui, &self.charts),
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_are_distinct() {
        let titles: Vec<&str> = ChartKind::ALL.iter().map(|k| k.title()).collect();
        assert_eq!(titles[0], "Distribution of Salaries");
        assert_ne!(titles[1], titles[2]);
    }

    #[test]
    fn test_select() {
        let mut viewer = ChartViewer::new(ChartSet::default());
        assert_eq!(viewer.current, ChartKind::Histogram);
        viewer.select(ChartKind::PayVsYear);
        assert_eq!(viewer.current, ChartKind::PayVsYear);
    }
}
