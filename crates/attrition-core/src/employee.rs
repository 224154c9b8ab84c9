//! Employee records and the six-field prediction input.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Model feature names, in the column order the classifier was trained on.
pub const FEATURE_NAMES: [&str; 6] = [
    "Age",
    "MonthlyIncome",
    "OverTime",
    "JobSatisfaction",
    "WorkLifeBalance",
    "YearsAtCompany",
];

pub const AGE_RANGE: RangeInclusive<u32> = 18..=60;
pub const MONTHLY_INCOME_RANGE: RangeInclusive<u32> = 1_000..=20_000;
pub const SATISFACTION_RANGE: RangeInclusive<u8> = 1..=4;
pub const YEARS_AT_COMPANY_RANGE: RangeInclusive<u32> = 0..=40;

/// One row of the HR dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub age: u32,
    pub monthly_income: f64,
    pub overtime: bool,
    pub job_satisfaction: u8,
    pub work_life_balance: u8,
    pub years_at_company: u32,
    pub department: String,
    pub education_field: String,
    pub job_role: String,
    /// `true` when the source label was "Yes".
    pub attrition: bool,
}

/// The loaded HR dataset. Immutable once constructed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<EmployeeRecord>,
}

impl Dataset {
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Overall attrition rate across all employees, `None` when empty.
    pub fn attrition_rate(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let left = self.records.iter().filter(|r| r.attrition).count();
        Some(left as f64 / self.records.len() as f64)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },
}

/// Six attributes fed to the risk model.
///
/// Built through [`PredictionInput::new`], which rejects values outside the
/// ranges the input controls allow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionInput {
    age: u32,
    monthly_income: u32,
    overtime: bool,
    job_satisfaction: u8,
    work_life_balance: u8,
    years_at_company: u32,
}

impl Default for PredictionInput {
    fn default() -> Self {
        Self {
            age: 30,
            monthly_income: 5_000,
            overtime: true,
            job_satisfaction: 3,
            work_life_balance: 3,
            years_at_company: 5,
        }
    }
}

impl PredictionInput {
    pub fn new(
        age: u32,
        monthly_income: u32,
        overtime: bool,
        job_satisfaction: u8,
        work_life_balance: u8,
        years_at_company: u32,
    ) -> Result<Self, InputError> {
        check("Age", age, &AGE_RANGE)?;
        check("MonthlyIncome", monthly_income, &MONTHLY_INCOME_RANGE)?;
        check_ordinal("JobSatisfaction", job_satisfaction)?;
        check_ordinal("WorkLifeBalance", work_life_balance)?;
        check("YearsAtCompany", years_at_company, &YEARS_AT_COMPANY_RANGE)?;

        Ok(Self {
            age,
            monthly_income,
            overtime,
            job_satisfaction,
            work_life_balance,
            years_at_company,
        })
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn monthly_income(&self) -> u32 {
        self.monthly_income
    }

    pub fn overtime(&self) -> bool {
        self.overtime
    }

    pub fn job_satisfaction(&self) -> u8 {
        self.job_satisfaction
    }

    pub fn work_life_balance(&self) -> u8 {
        self.work_life_balance
    }

    pub fn years_at_company(&self) -> u32 {
        self.years_at_company
    }

    /// Feature vector in [`FEATURE_NAMES`] order. OverTime encodes as 1/0.
    pub fn features(&self) -> [f32; 6] {
        [
            self.age as f32,
            self.monthly_income as f32,
            if self.overtime { 1.0 } else { 0.0 },
            self.job_satisfaction as f32,
            self.work_life_balance as f32,
            self.years_at_company as f32,
        ]
    }
}

fn check(field: &'static str, value: u32, range: &RangeInclusive<u32>) -> Result<(), InputError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            min: *range.start(),
            max: *range.end(),
            value,
        })
    }
}

fn check_ordinal(field: &'static str, value: u8) -> Result<(), InputError> {
    let range = *SATISFACTION_RANGE.start() as u32..=*SATISFACTION_RANGE.end() as u32;
    check(field, value as u32, &range)
}
