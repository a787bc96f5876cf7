//! Statistics Calculator Module
//! Descriptive statistics, grouped means and correlation over table columns.

use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::cmp::Ordering;
use std::collections::HashMap;
use thiserror::Error;

use crate::data::is_numeric;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),
}

/// The `describe()` summary of a numeric column.
#[derive(Debug, Clone, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl Default for DescriptiveStats {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            median: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

impl DescriptiveStats {
    /// max - min
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Summary of the salary column.
#[derive(Debug, Clone, Serialize)]
pub struct SalaryStats {
    pub describe: DescriptiveStats,
    pub mode: Option<f64>,
    pub range: f64,
}

/// Mean of the value column for one group key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean {
    pub group: String,
    pub mean: Option<f64>,
}

/// One equal-width histogram bin, `[start, end)` except the last which is closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Handles statistical calculations over a DataFrame.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Values of a numeric column as f64; missing and NaN cells are `None`.
    pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, StatsError> {
        let column = df.column(name)?;
        if !is_numeric(column.dtype()) {
            return Err(StatsError::NotNumeric(name.to_string()));
        }
        let as_f64 = column.cast(&DataType::Float64)?;
        Ok(as_f64
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    /// Non-missing values of a numeric column.
    pub fn present_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, StatsError> {
        Ok(Self::column_values(df, name)?.into_iter().flatten().collect())
    }

    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> DescriptiveStats {
        let n = values.len();
        if n == 0 {
            return DescriptiveStats::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        DescriptiveStats {
            count: n,
            mean: values.iter().mean(),
            // Sample standard deviation; NaN for a single value
            std: values.iter().std_dev(),
            min: sorted[0],
            p25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Most frequent value. Ties resolve to the smallest of the tied values.
    pub fn mode(values: &[f64]) -> Option<f64> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mut best: Option<(f64, usize)> = None;
        let mut i = 0;
        while i < sorted.len() {
            let value = sorted[i];
            let run = sorted[i..].iter().take_while(|&&v| v == value).count();
            if best.map_or(true, |(_, count)| run > count) {
                best = Some((value, run));
            }
            i += run;
        }
        best.map(|(value, _)| value)
    }

    /// Describe, mode and range of one numeric column.
    pub fn salary_stats(df: &DataFrame, name: &str) -> Result<SalaryStats, StatsError> {
        let values = Self::present_values(df, name)?;
        let describe = Self::compute_descriptive_stats(&values);
        if describe.count == 0 {
            log::warn!("Column '{name}' has no values; statistics are undefined");
        }
        let range = describe.range();
        Ok(SalaryStats {
            describe,
            mode: Self::mode(&values),
            range,
        })
    }

    /// Mean of `value_col` per distinct `group_col`, ordered by group key.
    ///
    /// Rows with a missing group key are left out.
    pub fn group_means(
        df: &DataFrame,
        group_col: &str,
        value_col: &str,
    ) -> Result<Vec<GroupMean>, StatsError> {
        let value_dtype = df.column(value_col)?.dtype().clone();
        if !is_numeric(&value_dtype) {
            return Err(StatsError::NotNumeric(value_col.to_string()));
        }

        let grouped = df
            .clone()
            .lazy()
            .filter(col(group_col).is_not_null())
            .group_by([col(group_col)])
            .agg([col(value_col).cast(DataType::Float64).mean()])
            .sort_by_exprs([col(group_col)], SortMultipleOptions::default())
            .collect()?;

        let keys = grouped.column(group_col)?.cast(&DataType::String)?;
        let means = grouped.column(value_col)?.cast(&DataType::Float64)?;

        let result: Vec<GroupMean> = keys
            .str()?
            .into_iter()
            .zip(means.f64()?.into_iter())
            .filter_map(|(key, mean)| {
                key.map(|k| GroupMean {
                    group: k.to_string(),
                    mean: mean.filter(|m| !m.is_nan()),
                })
            })
            .collect();

        log::debug!("Computed means for {} groups of '{group_col}'", result.len());
        Ok(result)
    }

    /// Pearson correlation of two columns over rows where both are present.
    pub fn correlation(
        df: &DataFrame,
        x_col: &str,
        y_col: &str,
    ) -> Result<Option<f64>, StatsError> {
        let xs = Self::column_values(df, x_col)?;
        let ys = Self::column_values(df, y_col)?;
        let (x, y): (Vec<f64>, Vec<f64>) = xs
            .into_iter()
            .zip(ys)
            .filter_map(|(a, b)| Some((a?, b?)))
            .unzip();

        let r = Self::pearson(&x, &y);
        if r.is_none() {
            log::warn!(
                "Correlation of '{x_col}' and '{y_col}' is undefined (constant or too few rows)"
            );
        }
        Ok(r)
    }

    /// Pearson coefficient of paired samples; `None` with fewer than two pairs or zero variance.
    pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
        if x.len() != y.len() || x.len() < 2 {
            return None;
        }
        let sx = x.iter().std_dev();
        let sy = y.iter().std_dev();
        if sx == 0.0 || sy == 0.0 || !sx.is_finite() || !sy.is_finite() {
            return None;
        }
        let cov = x.iter().covariance(y.iter());
        Some((cov / (sx * sy)).clamp(-1.0, 1.0))
    }

    /// Equal-width bins spanning min..max of `values`.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        if values.is_empty() || bins == 0 {
            return Vec::new();
        }
        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0u32; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: lo + i as f64 * width,
                end: if i + 1 == bins { hi } else { lo + (i + 1) as f64 * width },
                count,
            })
            .collect()
    }

    /// Occurrences of each distinct non-missing value, most frequent first.
    ///
    /// Equal counts are ordered by value.
    pub fn value_counts(df: &DataFrame, name: &str) -> Result<Vec<ValueCount>, StatsError> {
        let as_text = df.column(name)?.cast(&DataType::String)?;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in as_text.str()?.into_iter().flatten() {
            *counts.entry(value).or_default() += 1;
        }

        let mut result: Vec<ValueCount> = counts
            .into_iter()
            .map(|(value, count)| ValueCount {
                value: value.to_string(),
                count,
            })
            .collect();
        result.sort_by(|a, b| match b.count.cmp(&a.count) {
            Ordering::Equal => a.value.cmp(&b.value),
            other => other,
        });
        Ok(result)
    }
}
