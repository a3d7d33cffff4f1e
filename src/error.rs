//! Error types for loading, aggregating and exporting the dataset.

use thiserror::Error;

/// Reading the source table failed. Fatal at startup.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    #[error("Workbook has no worksheet")]
    NoWorksheet,

    #[error("Source table has no header row")]
    NoHeader,

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Failed to decode arrow data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Required column '{column}' is missing")]
    MissingColumn { column: &'static str },

    #[error("Row {row}: column '{column}' is empty")]
    MissingValue { row: usize, column: &'static str },

    #[error("Row {row}: column '{column}' has invalid value '{value}'")]
    InvalidCell {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Duplicate observation for {region} / {cereal} / {year}")]
    DuplicateKey {
        region: String,
        cereal: String,
        year: i32,
    },
}

/// Descriptive statistics could not be computed.
#[derive(Error, Debug, PartialEq)]
pub enum AggregateError {
    #[error("No rows to describe")]
    EmptyView,

    #[error("Column '{0}' is not categorical and cannot be grouped on")]
    NotCategorical(&'static str),

    #[error("Column '{0}' is not numeric")]
    NotNumeric(&'static str),
}

/// The export workbook could not be produced.
#[derive(Error, Debug)]
pub enum SerializeError {
    #[error("Nothing to export: the view is empty")]
    EmptyView,

    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
