//! Decode Arrow RecordBatches of the employee table into [`EmployeeRecord`]s.
//!
//! Works on batches from either the CSV reader or DuckDB: numeric columns are
//! cast to Int64/Float64 first, so any integer width or float layout decodes.

use arrow::array::{Array, ArrayRef, AsArray, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use attrition_core::{Dataset, EmployeeRecord, hr};

use crate::StoreError;

/// Build a [`Dataset`] from employee table batches.
///
/// Every column of [`hr::employee_schema`] must be present. `Attrition` and
/// `OverTime` must hold exactly "Yes" or "No" (or be boolean-typed).
pub fn dataset_from_batches(batches: &[RecordBatch]) -> Result<Dataset, StoreError> {
    let schema = hr::employee_schema();
    let total: usize = batches.iter().map(|b| b.num_rows()).sum();
    let mut records = Vec::with_capacity(total);
    let mut offset = 0;

    for batch in batches {
        for field in schema.fields() {
            column(batch, field.name())?;
        }

        let age = int_column(batch, hr::AGE)?;
        let income = float_column(batch, hr::MONTHLY_INCOME)?;
        let overtime = flag_column(batch, hr::OVERTIME)?;
        let satisfaction = int_column(batch, hr::JOB_SATISFACTION)?;
        let balance = int_column(batch, hr::WORK_LIFE_BALANCE)?;
        let years = int_column(batch, hr::YEARS_AT_COMPANY)?;
        let department = string_column(batch, hr::DEPARTMENT)?;
        let education = string_column(batch, hr::EDUCATION_FIELD)?;
        let role = string_column(batch, hr::JOB_ROLE)?;
        let attrition = flag_column(batch, hr::ATTRITION)?;

        for row in 0..batch.num_rows() {
            let at = offset + row;
            records.push(EmployeeRecord {
                age: narrow(hr::AGE, int_at(&age, hr::AGE, row, at)?, at)?,
                monthly_income: float_at(&income, hr::MONTHLY_INCOME, row, at)?,
                overtime: overtime.get(hr::OVERTIME, row, at)?,
                job_satisfaction: narrow(
                    hr::JOB_SATISFACTION,
                    int_at(&satisfaction, hr::JOB_SATISFACTION, row, at)?,
                    at,
                )?,
                work_life_balance: narrow(
                    hr::WORK_LIFE_BALANCE,
                    int_at(&balance, hr::WORK_LIFE_BALANCE, row, at)?,
                    at,
                )?,
                years_at_company: narrow(
                    hr::YEARS_AT_COMPANY,
                    int_at(&years, hr::YEARS_AT_COMPANY, row, at)?,
                    at,
                )?,
                department: string_at(&department, hr::DEPARTMENT, row, at)?,
                education_field: string_at(&education, hr::EDUCATION_FIELD, row, at)?,
                job_role: string_at(&role, hr::JOB_ROLE, row, at)?,
                attrition: attrition.get(hr::ATTRITION, row, at)?,
            });
        }
        offset += batch.num_rows();
    }

    Ok(Dataset::new(records))
}

// ── Column access ──

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, StoreError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| StoreError::MissingColumn(name.to_string()))
}

fn int_column(batch: &RecordBatch, name: &str) -> Result<Int64Array, StoreError> {
    let cast_col = cast(column(batch, name)?, &DataType::Int64)?;
    Ok(cast_col.as_primitive::<Int64Type>().clone())
}

fn float_column(batch: &RecordBatch, name: &str) -> Result<Float64Array, StoreError> {
    let cast_col = cast(column(batch, name)?, &DataType::Float64)?;
    Ok(cast_col.as_primitive::<Float64Type>().clone())
}

fn string_column(batch: &RecordBatch, name: &str) -> Result<StringArray, StoreError> {
    let cast_col = cast(column(batch, name)?, &DataType::Utf8)?;
    Ok(cast_col.as_string::<i32>().clone())
}

/// A Yes/No column, either as text or already boolean.
enum FlagColumn {
    Text(StringArray),
    Bool(BooleanArray),
}

fn flag_column(batch: &RecordBatch, name: &str) -> Result<FlagColumn, StoreError> {
    let col = column(batch, name)?;
    if let Some(arr) = col.as_boolean_opt() {
        return Ok(FlagColumn::Bool(arr.clone()));
    }
    Ok(FlagColumn::Text(string_column(batch, name)?))
}

impl FlagColumn {
    fn get(&self, name: &str, row: usize, at: usize) -> Result<bool, StoreError> {
        match self {
            Self::Bool(arr) => {
                check_null(arr, name, row, at)?;
                Ok(arr.value(row))
            }
            Self::Text(arr) => match string_at(arr, name, row, at)?.as_str() {
                "Yes" => Ok(true),
                "No" => Ok(false),
                other => Err(StoreError::InvalidValue {
                    column: name.to_string(),
                    row: at,
                    value: other.to_string(),
                }),
            },
        }
    }
}

// ── Value access ──

fn check_null(arr: &dyn Array, name: &str, row: usize, at: usize) -> Result<(), StoreError> {
    if arr.is_null(row) {
        return Err(StoreError::NullValue {
            column: name.to_string(),
            row: at,
        });
    }
    Ok(())
}

fn int_at(arr: &Int64Array, name: &str, row: usize, at: usize) -> Result<i64, StoreError> {
    check_null(arr, name, row, at)?;
    Ok(arr.value(row))
}

fn float_at(arr: &Float64Array, name: &str, row: usize, at: usize) -> Result<f64, StoreError> {
    check_null(arr, name, row, at)?;
    Ok(arr.value(row))
}

fn string_at(arr: &StringArray, name: &str, row: usize, at: usize) -> Result<String, StoreError> {
    check_null(arr, name, row, at)?;
    Ok(arr.value(row).to_string())
}

/// Narrow an i64 into a smaller unsigned type, rejecting negatives and overflow.
fn narrow<T: TryFrom<i64>>(name: &str, value: i64, at: usize) -> Result<T, StoreError> {
    T::try_from(value).map_err(|_| StoreError::InvalidValue {
        column: name.to_string(),
        row: at,
        value: value.to_string(),
    })
}
