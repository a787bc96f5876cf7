//! Charts module - Chart data, interactive plotting and PNG export

mod plotter;
mod renderer;

pub use plotter::{ChartPlotter, ChartSet, HISTOGRAM_TITLE, PIE_TITLE, SCATTER_TITLE};
pub use renderer::StaticChartRenderer;
