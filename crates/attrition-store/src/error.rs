use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dataset file not found: {0}")]
    NotFound(std::path::PathBuf),

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("null value in column '{column}' at row {row}")]
    NullValue { column: String, row: usize },

    #[error("unexpected value {value:?} in column '{column}' at row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "duckdb")]
    #[error("duckdb error: {0}")]
    DuckDb(#[from] ::duckdb::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
