//! Salary Insights - Exploratory analysis of a salary CSV
//!
//! Loads the table, prints descriptive statistics, missing-value counts before
//! and after cleaning, average pay per job title and the pay/year correlation,
//! then shows the salary charts.

mod charts;
mod config;
mod data;
mod gui;
mod report;
mod stats;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use charts::{ChartSet, StaticChartRenderer};
use config::{AnalysisConfig, Cli};
use data::{DataCleaner, DataLoader};
use report::SalaryReport;

/// Input path, falling back to a file dialog when the default file is absent.
fn resolve_input(config: &AnalysisConfig) -> PathBuf {
    if config.csv.is_file() || !config.show_gui {
        return config.csv.clone();
    }
    log::warn!("{} not found, asking for a CSV file", config.csv.display());
    rfd::FileDialog::new()
        .add_filter("CSV", &["csv"])
        .pick_file()
        .unwrap_or_else(|| config.csv.clone())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AnalysisConfig::try_from(Cli::parse())?;
    let input = resolve_input(&config);

    // 1. Load
    let mut loader = DataLoader::new(config.csv_options.clone());
    loader
        .load_csv(&input)
        .with_context(|| format!("loading {}", input.display()))?;
    loader.require_columns(&[
        config.pay_column.as_str(),
        config.year_column.as_str(),
        config.group_column.as_str(),
    ])?;
    let data = loader
        .get_dataframe()
        .context("no table after loading")?;

    // 2. Clean into a separate copy
    let cleaned = DataCleaner::clean(data, config.cleaning)?;

    // 3. Statistics, grouping, correlation
    let report = SalaryReport::build(data, &cleaned, &input, &config)?;
    print!("{report}");

    if let Some(path) = &config.json {
        let json = report.to_json()?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote JSON report to {}", path.display());
    }

    // 4. Charts
    let chart_set = ChartSet::build(data, &config)?;
    if let Some(dir) = &config.save_charts {
        StaticChartRenderer::render_all(&chart_set, dir)
            .with_context(|| format!("saving charts to {}", dir.display()))?;
    }

    if config.show_gui {
        gui::run_viewer(report, chart_set)
            .map_err(|e| anyhow::anyhow!("chart window failed: {e}"))?;
    }

    Ok(())
}
