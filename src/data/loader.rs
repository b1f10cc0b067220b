//! CSV Data Loader Module
//! Reads the survey file into a Polars DataFrame.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Cell contents read as missing, in addition to empty fields.
const MISSING_MARKERS: [&str; 6] = ["NA", "N/A", "NaN", "nan", "null", "NULL"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("No data loaded")]
    NoData,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a CSV file with a header row.
    ///
    /// Parse errors are not ignored: a malformed file fails the load.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }
        self.file_path = Some(file_path.to_path_buf());

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_null_values(Some(NullValues::AllColumns(
                MISSING_MARKERS.iter().map(|m| (*m).into()).collect(),
            )))
            .finish()?
            .collect()?;

        info!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );
        self.df = Some(df);
        debug!("Columns: {:?}", self.get_columns());

        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Move the loaded DataFrame out of the loader.
    pub fn take_dataframe(&mut self) -> Result<DataFrame, LoaderError> {
        self.df.take().ok_or(LoaderError::NoData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file.flush().expect("flush csv");
        file
    }

    #[test]
    fn test_load_csv() {
        let file = write_csv(
            "Time_spent_Alone,Stage_fear,Personality\n4.0,No,Extrovert\n9.0,Yes,Introvert\n",
        );
        let mut loader = DataLoader::new();
        let df = loader.load_csv(file.path()).expect("load");

        assert_eq!(df.height(), 2);
        assert_eq!(
            loader.get_columns(),
            vec!["Time_spent_Alone", "Stage_fear", "Personality"]
        );
        assert_eq!(loader.get_row_count(), 2);
        assert_eq!(loader.get_file_path().map(|p| p.as_path()), Some(file.path()));

        let df = loader.take_dataframe().expect("take");
        assert_eq!(df.width(), 3);
        assert!(matches!(loader.take_dataframe(), Err(LoaderError::NoData)));
    }

    #[test]
    fn test_missing_file() {
        let mut loader = DataLoader::new();
        let result = loader.load_csv(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(LoaderError::NotFound(_))));
        assert_eq!(loader.get_row_count(), 0);
    }

    #[test]
    fn test_empty_fields_load_as_null() {
        let file = write_csv("a,b\n1.0,Yes\n,No\n3.0,\nNA,Yes\n");
        let mut loader = DataLoader::new();
        let df = loader.load_csv(file.path()).expect("load");

        assert_eq!(df.height(), 4);
        assert_eq!(df.column("a").unwrap().null_count(), 2);
        assert_eq!(df.column("b").unwrap().null_count(), 1);
    }
}
