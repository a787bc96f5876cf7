//! Command line configuration.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::data::{CleaningStrategy, CsvOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CleaningMode {
    /// Remove every row that has a missing value
    Drop,
    /// Replace missing values with --fill-value
    Fill,
}

#[derive(Parser, Debug)]
#[command(
    name = "salary-insights",
    version,
    about = "Exploratory analysis of a salary CSV: statistics, grouping, correlation and charts"
)]
pub struct Cli {
    /// Input CSV file
    #[arg(default_value = "Salaries.csv")]
    pub csv: PathBuf,

    /// Numeric salary column
    #[arg(long, default_value = "TotalPay")]
    pub pay_column: String,

    /// Numeric year column, correlated against pay
    #[arg(long, default_value = "Year")]
    pub year_column: String,

    /// Categorical column used for grouping and the pie chart
    #[arg(long, default_value = "JobTitle")]
    pub group_column: String,

    /// Field separator
    #[arg(long, default_value_t = ',')]
    pub separator: char,

    /// Rows scanned to infer column types (all rows when omitted)
    #[arg(long)]
    pub infer_schema_length: Option<usize>,

    /// Histogram bins
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u16).range(1..))]
    pub bins: u16,

    /// Job titles shown in the pie chart
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u16).range(1..))]
    pub top: u16,

    /// How missing values are cleaned
    #[arg(long, value_enum, default_value_t = CleaningMode::Drop)]
    pub cleaning: CleaningMode,

    /// Replacement for missing values when --cleaning fill
    #[arg(long, default_value_t = 0.0)]
    pub fill_value: f64,

    /// Write the three charts as PNG files into this directory
    #[arg(long)]
    pub save_charts: Option<PathBuf>,

    /// Write the report as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Do not open the chart window
    #[arg(long)]
    pub no_gui: bool,
}

/// Resolved settings for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub csv: PathBuf,
    pub pay_column: String,
    pub year_column: String,
    pub group_column: String,
    pub csv_options: CsvOptions,
    pub bins: usize,
    pub top: usize,
    pub cleaning: CleaningStrategy,
    pub save_charts: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub show_gui: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            csv: PathBuf::from("Salaries.csv"),
            pay_column: "TotalPay".to_string(),
            year_column: "Year".to_string(),
            group_column: "JobTitle".to_string(),
            csv_options: CsvOptions::default(),
            bins: 25,
            top: 12,
            cleaning: CleaningStrategy::DropRows,
            save_charts: None,
            json: None,
            show_gui: true,
        }
    }
}

impl TryFrom<Cli> for AnalysisConfig {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if !cli.separator.is_ascii() {
            anyhow::bail!("Separator must be a single ASCII character, got '{}'", cli.separator);
        }

        let cleaning = match cli.cleaning {
            CleaningMode::Drop => CleaningStrategy::DropRows,
            CleaningMode::Fill => CleaningStrategy::Fill(cli.fill_value),
        };

        Ok(Self {
            csv: cli.csv,
            pay_column: cli.pay_column,
            year_column: cli.year_column,
            group_column: cli.group_column,
            csv_options: CsvOptions {
                separator: cli.separator as u8,
                infer_schema_length: cli.infer_schema_length,
            },
            bins: cli.bins as usize,
            top: cli.top as usize,
            cleaning,
            save_charts: cli.save_charts,
            json: cli.json,
            show_gui: !cli.no_gui,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AnalysisConfig {
        let argv = std::iter::once("salary-insights").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();
        AnalysisConfig::try_from(cli).unwrap()
    }

    #[test]
    fn test_defaults_match_the_salary_dataset() {
        let config = parse(&[]);
        assert_eq!(config.csv, PathBuf::from("Salaries.csv"));
        assert_eq!(config.pay_column, "TotalPay");
        assert_eq!(config.year_column, "Year");
        assert_eq!(config.group_column, "JobTitle");
        assert_eq!(config.bins, 25);
        assert_eq!(config.top, 12);
        assert_eq!(config.cleaning, CleaningStrategy::DropRows);
        assert_eq!(config.csv_options.separator, b',');
        assert!(config.csv_options.infer_schema_length.is_none());
        assert!(config.show_gui);
    }

    #[test]
    fn test_overrides() {
        let config = parse(&[
            "data.tsv",
            "--separator",
            "\t",
            "--bins",
            "10",
            "--top",
            "5",
            "--cleaning",
            "fill",
            "--fill-value",
            "10",
            "--no-gui",
            "--save-charts",
            "out",
        ]);
        assert_eq!(config.csv, PathBuf::from("data.tsv"));
        assert_eq!(config.csv_options.separator, b'\t');
        assert_eq!(config.bins, 10);
        assert_eq!(config.top, 5);
        assert_eq!(config.cleaning, CleaningStrategy::Fill(10.0));
        assert!(!config.show_gui);
        assert_eq!(config.save_charts, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_zero_bins_rejected() {
        assert!(Cli::try_parse_from(["salary-insights", "--bins", "0"]).is_err());
    }

    #[test]
    fn test_non_ascii_separator_rejected() {
        let cli = Cli::try_parse_from(["salary-insights", "--separator", "§"]).unwrap();
        assert!(AnalysisConfig::try_from(cli).is_err());
    }
}
