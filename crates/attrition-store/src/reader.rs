//! CSV ingestion through the Arrow CSV reader.

use std::fs::File;
use std::io::Seek;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::record_batch::RecordBatch;
use attrition_core::Dataset;
use tracing::info;

use crate::{DatasetProvider, StoreError, dataset_from_batches};

/// Read a headered CSV file into Arrow RecordBatches, inferring column types.
pub fn read_csv(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }

    let mut file = File::open(path)?;
    let format = Format::default().with_header(true);
    let (schema, rows) = format.infer_schema(&mut file, None)?;
    file.rewind()?;

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_format(format)
        .build(file)?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;

    info!(rows, path = %path.display(), "read csv");
    Ok(batches)
}

/// The employee table stored as a CSV file (IBM HR attrition layout).
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetProvider for CsvSource {
    fn load(&self) -> Result<Dataset, StoreError> {
        let batches = read_csv(&self.path)?;
        let dataset = dataset_from_batches(&batches)?;
        info!(
            employees = dataset.len(),
            attrition_rate = dataset.attrition_rate().unwrap_or_default(),
            "loaded employee dataset"
        );
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Age,Attrition,BusinessTravel,Department,EducationField,EmployeeNumber,JobRole,JobSatisfaction,MonthlyIncome,OverTime,WorkLifeBalance,YearsAtCompany";

    fn write_csv(dir: &Path, rows: &[&str]) -> PathBuf {
        let path = dir.join("employees.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        path
    }

    #[test]
    fn load_missing_file_errors() {
        let source = CsvSource::new("/nonexistent/employees.csv");
        assert!(matches!(source.load(), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn load_maps_yes_no_labels() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_csv(
            tmp.path(),
            &[
                "41,Yes,Travel_Rarely,Sales,Life Sciences,1,Sales Executive,4,5993,Yes,1,6",
                "49,No,Travel_Frequently,Research & Development,Life Sciences,2,Research Scientist,2,5130,No,3,10",
                "37,Yes,Travel_Rarely,Research & Development,Other,4,Laboratory Technician,3,2090,Yes,3,0",
            ],
        );

        let dataset = CsvSource::new(&path).load().unwrap();
        assert_eq!(dataset.len(), 3);

        let records = dataset.records();
        assert!(records[0].attrition);
        assert!(!records[1].attrition);
        assert!(records[2].overtime);
        assert_eq!(records[1].department, "Research & Development");
        assert_eq!(records[1].monthly_income, 5130.0);
        assert_eq!(records[2].years_at_company, 0);
        assert!((dataset.attrition_rate().unwrap() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn load_rejects_unknown_label() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_csv(
            tmp.path(),
            &["41,Unknown,Travel_Rarely,Sales,Life Sciences,1,Sales Executive,4,5993,Yes,1,6"],
        );
        let err = CsvSource::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::InvalidValue { ref column, .. } if column == "Attrition"));
    }

    #[test]
    fn load_rejects_missing_column() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("partial.csv");
        std::fs::write(&path, "Age,Attrition\n30,No\n").unwrap();
        let err = CsvSource::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::MissingColumn(_)));
    }

    #[test]
    fn read_csv_returns_all_rows() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_csv(
            tmp.path(),
            &[
                "41,Yes,Travel_Rarely,Sales,Life Sciences,1,Sales Executive,4,5993,Yes,1,6",
                "49,No,Travel_Frequently,Research & Development,Life Sciences,2,Research Scientist,2,5130,No,3,10",
            ],
        );
        let batches = read_csv(&path).unwrap();
        let total: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total, 2);
        assert_eq!(batches[0].num_columns(), 12);
    }
}
