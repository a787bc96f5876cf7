//! CSV Data Loader Module
//! Reads the salary table with Polars and answers schema questions about it.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Tokens read as missing values, in addition to empty fields.
pub const NA_VALUES: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "<NA>", "N/A", "NA",
    "NULL", "NaN", "None", "n/a", "nan", "null", "1.#IND", "1.#QNAN",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Column '{0}' does not exist in the dataset")]
    MissingColumn(String),
    #[error("No data loaded")]
    NoData,
}

/// CSV parsing options.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub separator: u8,
    /// Rows scanned for type inference; `None` scans the whole file.
    pub infer_schema_length: Option<usize>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            infer_schema_length: None,
        }
    }
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: Option<DataFrame>,
    options: CsvOptions,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(CsvOptions::default())
    }
}

impl DataLoader {
    pub fn new(options: CsvOptions) -> Self {
        Self {
            df: None,
            options,
        }
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::FileNotFound(file_path.to_path_buf()));
        }

        let null_values = NullValues::AllColumns(NA_VALUES.iter().map(|s| (*s).into()).collect());

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_separator(self.options.separator)
            .with_infer_schema_length(self.options.infer_schema_length)
            .with_null_values(Some(null_values))
            .finish()?
            .collect()?;

        log::info!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Fail with the first name in `names` that is not a column of the loaded table.
    pub fn require_columns(&self, names: &[&str]) -> Result<(), LoaderError> {
        let df = self.df.as_ref().ok_or(LoaderError::NoData)?;
        let columns = df.get_column_names();
        for name in names {
            if !columns.iter().any(|c| c.as_str() == *name) {
                return Err(LoaderError::MissingColumn((*name).to_string()));
            }
        }
        Ok(())
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }
}

/// True for the integer and floating point dtypes.
pub fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const SAMPLE: &str = "Id,JobTitle,TotalPay,Year,Notes\n\
        1,CAPTAIN,120000.5,2011,\n\
        2,CLERK,45000,2012,NA\n\
        3,CLERK,,2013,late\n\
        4,NURSE,88000,2014,\n";

    #[test]
    fn test_load_reports_rows_and_columns() {
        let file = write_csv(SAMPLE);
        let mut loader = DataLoader::default();
        let df = loader.load_csv(file.path()).unwrap();

        assert_eq!(df.height(), 4);
        assert_eq!(df.width(), 5);
        let names: Vec<&str> = df.get_column_names().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["Id", "JobTitle", "TotalPay", "Year", "Notes"]);
    }

    #[test]
    fn test_numeric_and_text_types_are_inferred() {
        let file = write_csv(SAMPLE);
        let mut loader = DataLoader::default();
        let df = loader.load_csv(file.path()).unwrap();

        assert!(is_numeric(df.column("TotalPay").unwrap().dtype()));
        assert!(is_numeric(df.column("Year").unwrap().dtype()));
        assert_eq!(df.column("JobTitle").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_na_tokens_become_nulls() {
        let file = write_csv(SAMPLE);
        let mut loader = DataLoader::default();
        let df = loader.load_csv(file.path()).unwrap();

        assert_eq!(df.column("TotalPay").unwrap().null_count(), 1);
        assert_eq!(df.column("Notes").unwrap().null_count(), 3);
    }

    #[test]
    fn test_windows_nan_spellings_become_nulls() {
        let file = write_csv("TotalPay,Year\n-1.#IND,2011\n-1.#QNAN,2012\n1.#IND,2013\n5.5,2014\n");
        let mut loader = DataLoader::default();
        let df = loader.load_csv(file.path()).unwrap();

        let pay = df.column("TotalPay").unwrap();
        assert!(is_numeric(pay.dtype()));
        assert_eq!(pay.null_count(), 3);
    }

    #[test]
    fn test_custom_separator() {
        let file = write_csv("a;b\n1;x\n2;y\n");
        let mut loader = DataLoader::new(CsvOptions {
            separator: b';',
            infer_schema_length: Some(100),
        });
        let df = loader.load_csv(file.path()).unwrap();
        assert_eq!(df.shape(), (2, 2));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut loader = DataLoader::default();
        let err = loader
            .load_csv(Path::new("/definitely/not/here/Salaries.csv"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
        assert!(loader.get_dataframe().is_none());
    }

    #[test]
    fn test_require_columns() {
        let file = write_csv(SAMPLE);
        let mut loader = DataLoader::default();
        loader.load_csv(file.path()).unwrap();

        assert!(loader.require_columns(&["TotalPay", "Year", "JobTitle"]).is_ok());
        match loader.require_columns(&["TotalPay", "Benefits"]) {
            Err(LoaderError::MissingColumn(name)) => assert_eq!(name, "Benefits"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_require_columns_without_data() {
        let loader = DataLoader::default();
        assert!(matches!(
            loader.require_columns(&["TotalPay"]),
            Err(LoaderError::NoData)
        ));
    }
}
