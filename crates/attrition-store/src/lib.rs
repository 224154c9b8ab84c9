//! Storage layer: the HR employee table from CSV (Arrow reader) or DuckDB.

mod error;
mod extract;
mod reader;

pub use error::StoreError;
pub use extract::dataset_from_batches;
pub use reader::{CsvSource, read_csv};

#[cfg(feature = "duckdb")]
mod duck;
#[cfg(feature = "duckdb")]
pub use duck::DuckSource;

use attrition_core::Dataset;

/// Supplies the employee dataset. Called once at startup.
pub trait DatasetProvider {
    fn load(&self) -> Result<Dataset, StoreError>;
}
