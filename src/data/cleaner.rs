//! Data Cleaner Module
//! Missing-value accounting and the two cleaning strategies (drop rows, fill cells).

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use super::loader::is_numeric;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// How missing cells are handled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CleaningStrategy {
    /// Keep only rows with no missing value in any column
    #[default]
    DropRows,
    /// Replace missing cells; numeric columns get the value, text columns its text form
    Fill(f64),
}

/// Type and missing-value count of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: String,
    pub missing: usize,
}

/// Stateless cleaning operations; inputs are never modified.
pub struct DataCleaner;

impl DataCleaner {
    /// Per-column dtype and missing count, in column order.
    pub fn summarize_columns(df: &DataFrame) -> Vec<ColumnSummary> {
        df.get_columns()
            .par_iter()
            .map(|col| ColumnSummary {
                name: col.name().to_string(),
                dtype: col.dtype().to_string(),
                missing: col.null_count(),
            })
            .collect()
    }

    /// Total number of missing cells in the table.
    pub fn total_missing(df: &DataFrame) -> usize {
        df.get_columns().iter().map(|col| col.null_count()).sum()
    }

    /// Apply `strategy` and return the cleaned copy.
    pub fn clean(df: &DataFrame, strategy: CleaningStrategy) -> Result<DataFrame, CleanerError> {
        let cleaned = match strategy {
            CleaningStrategy::DropRows => Self::drop_missing(df)?,
            CleaningStrategy::Fill(value) => Self::fill_missing(df, value)?,
        };
        log::info!(
            "Cleaning ({:?}) kept {} of {} rows",
            strategy,
            cleaned.height(),
            df.height()
        );
        Ok(cleaned)
    }

    /// Rows with no missing value in any column.
    pub fn drop_missing(df: &DataFrame) -> Result<DataFrame, CleanerError> {
        let mut mask = BooleanChunked::full("complete".into(), true, df.height());
        for col in df.get_columns() {
            if col.null_count() > 0 {
                mask = &mask & &col.is_not_null();
            }
        }
        Ok(df.filter(&mask)?)
    }

    /// Fill numeric and text columns, then drop rows still missing in other column types.
    pub fn fill_missing(df: &DataFrame, value: f64) -> Result<DataFrame, CleanerError> {
        let exprs: Vec<Expr> = df
            .get_columns()
            .iter()
            .filter(|c| c.null_count() > 0)
            .filter_map(|c| {
                let name = c.name().as_str();
                if is_numeric(c.dtype()) {
                    Some(col(name).fill_null(lit(value)))
                } else if c.dtype() == &DataType::String {
                    Some(col(name).fill_null(lit(format_fill_text(value))))
                } else {
                    None
                }
            })
            .collect();

        let filled = if exprs.is_empty() {
            df.clone()
        } else {
            df.clone().lazy().with_columns(exprs).collect()?
        };

        if Self::total_missing(&filled) > 0 {
            log::warn!(
                "Some columns cannot be filled with {value}; dropping their incomplete rows"
            );
            return Self::drop_missing(&filled);
        }
        Ok(filled)
    }
}

/// `10.0` renders as `10`, other values as written.
fn format_fill_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df!(
            "JobTitle" => [Some("CLERK"), None, Some("NURSE"), Some("CLERK")],
            "TotalPay" => [Some(10.0), Some(20.0), None, Some(40.0)],
            "Year" => [2011i64, 2012, 2013, 2014],
        )
        .unwrap()
    }

    #[test]
    fn test_summarize_columns_counts_missing() {
        let summary = DataCleaner::summarize_columns(&sample());
        let missing: Vec<(String, usize)> = summary
            .iter()
            .map(|c| (c.name.clone(), c.missing))
            .collect();
        assert_eq!(
            missing,
            vec![
                ("JobTitle".to_string(), 1),
                ("TotalPay".to_string(), 1),
                ("Year".to_string(), 0),
            ]
        );
        assert_eq!(DataCleaner::total_missing(&sample()), 2);
    }

    #[test]
    fn test_drop_missing_leaves_no_missing_values() {
        let df = sample();
        let cleaned = DataCleaner::clean(&df, CleaningStrategy::DropRows).unwrap();

        assert_eq!(cleaned.height(), 2);
        assert!(DataCleaner::summarize_columns(&cleaned)
            .iter()
            .all(|c| c.missing == 0));
        let years: Vec<Option<i64>> = cleaned
            .column("Year")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(years, vec![Some(2011), Some(2014)]);
    }

    #[test]
    fn test_original_table_is_untouched() {
        let df = sample();
        let _ = DataCleaner::drop_missing(&df).unwrap();
        assert_eq!(df.height(), 4);
        assert_eq!(DataCleaner::total_missing(&df), 2);
    }

    #[test]
    fn test_drop_missing_on_complete_table_keeps_everything() {
        let df = df!("a" => [1, 2, 3], "b" => ["x", "y", "z"]).unwrap();
        let cleaned = DataCleaner::drop_missing(&df).unwrap();
        assert_eq!(cleaned.shape(), (3, 2));
    }

    #[test]
    fn test_fill_missing_keeps_rows() {
        let df = sample();
        let filled = DataCleaner::clean(&df, CleaningStrategy::Fill(10.0)).unwrap();

        assert_eq!(filled.height(), 4);
        assert_eq!(DataCleaner::total_missing(&filled), 0);

        let pay = filled.column("TotalPay").unwrap().f64().unwrap().get(2);
        assert_eq!(pay, Some(10.0));
        let title = filled.column("JobTitle").unwrap().str().unwrap().get(1);
        assert_eq!(title, Some("10"));
    }

    #[test]
    fn test_default_strategy_drops_rows() {
        assert_eq!(CleaningStrategy::default(), CleaningStrategy::DropRows);
    }

    #[test]
    fn test_format_fill_text() {
        assert_eq!(format_fill_text(0.0), "0");
        assert_eq!(format_fill_text(-3.0), "-3");
        assert_eq!(format_fill_text(2.5), "2.5");
    }
}
