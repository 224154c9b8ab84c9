//! DuckDB-backed loading of the employee table.

use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;
use attrition_core::Dataset;
use duckdb::Connection;
use tracing::info;

use crate::{DatasetProvider, StoreError, dataset_from_batches};

/// Employee table imported into an in-memory DuckDB database.
///
/// The CSV goes through DuckDB's `read_csv_auto` sniffer instead of the Arrow
/// reader; batches come back through `query_arrow` and decode with the same
/// extraction as [`CsvSource`](crate::CsvSource).
pub struct DuckSource {
    conn: Connection,
    path: PathBuf,
}

impl DuckSource {
    /// Open an in-memory database for the CSV at `path`. Nothing is read yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn,
            path: path.into(),
        })
    }

    /// Import the CSV into the `employees` table.
    pub fn import(&self) -> Result<usize, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound(self.path.clone()));
        }
        let sql = format!(
            "CREATE OR REPLACE TABLE employees AS SELECT * FROM read_csv_auto('{}', header = true)",
            escape(&self.path)
        );
        self.conn.execute_batch(&sql)?;
        let count = self.employee_count()?;
        info!(count, path = %self.path.display(), "imported employees table");
        Ok(count)
    }

    /// Number of rows in the `employees` table.
    pub fn employee_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT count(*) FROM employees", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Execute arbitrary SQL and return Arrow RecordBatches.
    pub fn query_arrow(&self, sql: &str) -> Result<Vec<RecordBatch>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let batches: Vec<RecordBatch> = stmt.query_arrow([])?.collect();
        Ok(batches)
    }
}

impl DatasetProvider for DuckSource {
    fn load(&self) -> Result<Dataset, StoreError> {
        self.import()?;
        let batches = self.query_arrow("SELECT * FROM employees")?;
        let dataset = dataset_from_batches(&batches)?;
        info!(employees = dataset.len(), "loaded employee dataset via duckdb");
        Ok(dataset)
    }
}

/// Quote a path for a single-quoted SQL literal.
fn escape(path: &Path) -> String {
    path.display().to_string().replace('\'', "''")
}
