/// Arrow schema definitions for the HR attrition dataset.
pub mod hr {
    use arrow::datatypes::{DataType, Field, Schema};

    pub const AGE: &str = "Age";
    pub const ATTRITION: &str = "Attrition";
    pub const DEPARTMENT: &str = "Department";
    pub const EDUCATION_FIELD: &str = "EducationField";
    pub const JOB_ROLE: &str = "JobRole";
    pub const JOB_SATISFACTION: &str = "JobSatisfaction";
    pub const MONTHLY_INCOME: &str = "MonthlyIncome";
    pub const OVERTIME: &str = "OverTime";
    pub const WORK_LIFE_BALANCE: &str = "WorkLifeBalance";
    pub const YEARS_AT_COMPANY: &str = "YearsAtCompany";

    /// Columns the agent reads from the employee table.
    ///
    /// The source CSV carries ~35 columns; only these are required. `Attrition`
    /// and `OverTime` arrive as "Yes"/"No" text and are decoded on load.
    pub fn employee_schema() -> Schema {
        Schema::new(vec![
            Field::new(AGE, DataType::Int64, false),
            Field::new(ATTRITION, DataType::Utf8, false),
            Field::new(DEPARTMENT, DataType::Utf8, false),
            Field::new(EDUCATION_FIELD, DataType::Utf8, false),
            Field::new(JOB_ROLE, DataType::Utf8, false),
            Field::new(JOB_SATISFACTION, DataType::Int64, false),
            Field::new(MONTHLY_INCOME, DataType::Int64, false),
            Field::new(OVERTIME, DataType::Utf8, false),
            Field::new(WORK_LIFE_BALANCE, DataType::Int64, false),
            Field::new(YEARS_AT_COMPANY, DataType::Int64, false),
        ])
    }

    /// Schema of the single-row frame handed to the risk model.
    pub fn prediction_input_schema() -> Schema {
        Schema::new(
            crate::FEATURE_NAMES
                .iter()
                .map(|name| Field::new(*name, DataType::Float32, false))
                .collect::<Vec<_>>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::hr;

    #[test]
    fn employee_schema_has_expected_fields() {
        let schema = hr::employee_schema();
        assert_eq!(schema.fields().len(), 10);
        assert!(schema.field_with_name("Attrition").is_ok());
        assert!(schema.field_with_name("JobRole").is_ok());
    }

    #[test]
    fn prediction_input_schema_follows_feature_order() {
        let schema = hr::prediction_input_schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            names,
            [
                "Age",
                "MonthlyIncome",
                "OverTime",
                "JobSatisfaction",
                "WorkLifeBalance",
                "YearsAtCompany"
            ]
        );
    }
}
