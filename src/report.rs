//! Analysis Report Module
//! Runs the analysis steps over the loaded table and renders the console summary.

use polars::prelude::DataFrame;
use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::config::AnalysisConfig;
use crate::data::{ColumnSummary, DataCleaner};
use crate::stats::{GroupMean, SalaryStats, StatsCalculator};

/// Everything printed at the end of a run.
#[derive(Debug, Clone, Serialize)]
pub struct SalaryReport {
    pub source: String,
    pub rows: usize,
    pub columns: usize,
    pub column_summary: Vec<ColumnSummary>,
    pub salary: SalaryStats,
    pub cleaned_rows: usize,
    pub cleaned_summary: Vec<ColumnSummary>,
    pub pay_column: String,
    pub group_column: String,
    pub year_column: String,
    pub group_means: Vec<GroupMean>,
    pub correlation: Option<f64>,
}

impl SalaryReport {
    /// Compute the report from the full table and its cleaned copy.
    pub fn build(
        data: &DataFrame,
        cleaned: &DataFrame,
        source: &Path,
        config: &AnalysisConfig,
    ) -> anyhow::Result<Self> {
        let salary = StatsCalculator::salary_stats(data, &config.pay_column)?;
        log::info!(
            "{}: mean {:.2}, median {:.2} over {} values",
            config.pay_column,
            salary.describe.mean,
            salary.describe.median,
            salary.describe.count
        );

        let group_means =
            StatsCalculator::group_means(data, &config.group_column, &config.pay_column)?;
        let correlation =
            StatsCalculator::correlation(data, &config.pay_column, &config.year_column)?;

        Ok(Self {
            source: source.display().to_string(),
            rows: data.height(),
            columns: data.width(),
            column_summary: DataCleaner::summarize_columns(data),
            salary,
            cleaned_rows: cleaned.height(),
            cleaned_summary: DataCleaner::summarize_columns(cleaned),
            pay_column: config.pay_column.clone(),
            group_column: config.group_column.clone(),
            year_column: config.year_column.clone(),
            group_means,
            correlation,
        })
    }

    /// Pretty-printed JSON form of the report.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn fmt_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        value.to_string()
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(fmt_value).unwrap_or_else(|| "NaN".to_string())
}

/// Two aligned columns of `name  value` lines.
fn write_table<'a>(
    f: &mut fmt::Formatter<'_>,
    rows: impl Iterator<Item = (&'a str, String)> + Clone,
) -> fmt::Result {
    let width = rows.clone().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
    for (name, value) in rows {
        writeln!(f, "{name:<width$}    {value}")?;
    }
    Ok(())
}

impl fmt::Display for SalaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.salary.describe;

        writeln!(f, "Number of rows: {}", self.rows)?;
        writeln!(f, "Number of columns: {}", self.columns)?;
        writeln!(f)?;

        writeln!(f, "Data Types of Columns:")?;
        write_table(
            f,
            self.column_summary.iter().map(|c| (c.name.as_str(), c.dtype.clone())),
        )?;
        writeln!(f)?;

        writeln!(f, "Missing Values:")?;
        write_table(
            f,
            self.column_summary.iter().map(|c| (c.name.as_str(), c.missing.to_string())),
        )?;
        writeln!(f)?;

        writeln!(f, "Mean Salary: {}", fmt_value(stats.mean))?;
        writeln!(f, "Median Salary: {}", fmt_value(stats.median))?;
        writeln!(f, "Mode Salary: {}", fmt_opt(self.salary.mode))?;
        writeln!(f, "Minimum Salary: {}", fmt_value(stats.min))?;
        writeln!(f, "Maximum Salary: {}", fmt_value(stats.max))?;
        writeln!(f, "Salary Range: {}", fmt_value(self.salary.range))?;
        writeln!(f, "Standard Deviation of Salary: {}", fmt_value(stats.std))?;
        writeln!(f)?;

        writeln!(f, "Missing Values after cleaning ({} rows kept):", self.cleaned_rows)?;
        write_table(
            f,
            self.cleaned_summary.iter().map(|c| (c.name.as_str(), c.missing.to_string())),
        )?;
        writeln!(f)?;

        writeln!(f, "Average Salary by Department:")?;
        writeln!(f, "{}", self.group_column)?;
        write_table(
            f,
            self.group_means.iter().map(|g| (g.group.as_str(), fmt_opt(g.mean))),
        )?;
        writeln!(f, "Name: {}, Length: {}", self.pay_column, self.group_means.len())?;
        writeln!(f)?;

        writeln!(f, "Correlation between Year and Salary: {}", fmt_opt(self.correlation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CleaningStrategy;
    use polars::df;

    fn sample() -> DataFrame {
        df!(
            "Id" => [1i64, 2, 3, 4],
            "JobTitle" => ["CLERK", "CLERK", "NURSE", "NURSE"],
            "TotalPay" => [Some(10.0), Some(20.0), Some(30.0), None],
            "Year" => [2011i64, 2012, 2013, 2014],
        )
        .unwrap()
    }

    fn report() -> SalaryReport {
        let data = sample();
        let cleaned = DataCleaner::clean(&data, CleaningStrategy::DropRows).unwrap();
        SalaryReport::build(&data, &cleaned, Path::new("Salaries.csv"), &AnalysisConfig::default())
            .unwrap()
    }

    #[test]
    fn test_build_collects_every_section() {
        let report = report();
        assert_eq!(report.rows, 4);
        assert_eq!(report.columns, 4);
        assert_eq!(report.cleaned_rows, 3);
        assert!(report.cleaned_summary.iter().all(|c| c.missing == 0));
        assert_eq!(report.column_summary[2].missing, 1);
        assert_eq!(report.salary.describe.count, 3);
        assert_eq!(report.group_means.len(), 2);
        assert!((report.correlation.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_contains_console_lines() {
        let text = report().to_string();
        assert!(text.starts_with("Number of rows: 4\nNumber of columns: 4\n"));
        assert!(text.contains("Mean Salary: 20\n"));
        assert!(text.contains("Median Salary: 20\n"));
        assert!(text.contains("Mode Salary: 10\n"));
        assert!(text.contains("Salary Range: 20\n"));
        assert!(text.contains("Standard Deviation of Salary: 10\n"));
        assert!(text.contains("CLERK    15\n"));
        assert!(text.contains("NURSE    30\n"));
        assert!(text.contains("TotalPay    1\n"));
        assert!(text.contains("Name: TotalPay, Length: 2\n"));
        assert!(text.contains("Correlation between Year and Salary: "));
    }

    #[test]
    fn test_missing_correlation_prints_nan() {
        let data = df!(
            "JobTitle" => ["A", "B"],
            "TotalPay" => [5.0, 5.0],
            "Year" => [2011i64, 2012],
        )
        .unwrap();
        let config = AnalysisConfig::default();
        let report = SalaryReport::build(&data, &data, Path::new("x.csv"), &config).unwrap();
        assert_eq!(report.correlation, None);
        assert!(report.to_string().ends_with("Correlation between Year and Salary: NaN\n"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert!(json["correlation"].is_null());
        assert_eq!(json["salary"]["mode"], 5.0);
    }

    #[test]
    fn test_missing_group_column_fails() {
        let data = sample();
        let config = AnalysisConfig {
            group_column: "Department".to_string(),
            ..AnalysisConfig::default()
        };
        assert!(SalaryReport::build(&data, &data, Path::new("x.csv"), &config).is_err());
    }
}
