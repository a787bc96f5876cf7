//! Stats module - Descriptive statistics, grouping and correlation

mod calculator;

pub use calculator::{GroupMean, HistogramBin, SalaryStats, StatsCalculator, StatsError};
