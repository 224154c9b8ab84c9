//! Keyword routing of HR analytics questions.
//!
//! A question is lowercased and checked against [`ROUTES`] in order; the first
//! entry with a keyword contained in the text decides the intent. Order is
//! observable because keywords overlap: "department and income" is a
//! department question, and "average" contains "age".

use serde::Serialize;
use tracing::debug;

use crate::EmployeeRecord;
use crate::stats::{self, GroupRate, IncomeDistribution};

/// Questions offered to the user as a starting point.
pub const EXAMPLE_QUESTIONS: &[&str] = &[
    "Which department has highest attrition?",
    "How does overtime affect attrition?",
    "Show attrition by age group.",
    "Average income of employees who left.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QueryIntent {
    ByDepartment,
    ByOvertime,
    ByAgeGroup,
    ByIncome,
    ByEducation,
    ByRole,
    ByFactor,
    Unknown,
}

/// Keyword table, checked top to bottom.
const ROUTES: &[(QueryIntent, &[&str])] = &[
    (QueryIntent::ByDepartment, &["department"]),
    (QueryIntent::ByOvertime, &["overtime"]),
    (QueryIntent::ByAgeGroup, &["age"]),
    (QueryIntent::ByIncome, &["income", "salary"]),
    (QueryIntent::ByEducation, &["education"]),
    (QueryIntent::ByRole, &["job", "role"]),
    (QueryIntent::ByFactor, &["reason", "factor", "why"]),
];

const OVERTIME_SUMMARY: &str =
    "Employees working overtime have a significantly higher attrition rate.";
const AGE_SUMMARY: &str = "Attrition tends to be higher among younger employees (18–35).";
const INCOME_SUMMARY: &str = "Lower income groups show higher attrition tendency.";
const EDUCATION_SUMMARY: &str =
    "Attrition varies slightly by education field, highest in HR and Sales.";
const FACTOR_SUMMARY: &str =
    "Top influencing factors are OverTime, Monthly Income, and Job Satisfaction.";
const FALLBACK_SUMMARY: &str =
    "I can answer HR-related questions about attrition, overtime, age, income, or departments.";
const NO_DATA_SUMMARY: &str = "No employee data is available to answer that.";

const TOP_ROLES: usize = 3;

impl QueryIntent {
    /// Resolve the intent of a question. Never fails; unmatched text is `Unknown`.
    pub fn detect(query: &str) -> Self {
        let q = query.to_lowercase();
        ROUTES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| q.contains(k)))
            .map(|(intent, _)| *intent)
            .unwrap_or(Self::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByDepartment => "by_department",
            Self::ByOvertime => "by_overtime",
            Self::ByAgeGroup => "by_age_group",
            Self::ByIncome => "by_income",
            Self::ByEducation => "by_education",
            Self::ByRole => "by_role",
            Self::ByFactor => "by_factor",
            Self::Unknown => "unknown",
        }
    }
}

/// Aggregated data behind a response, tagged with how it is drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ChartData {
    Bar(Vec<GroupRate>),
    Line(Vec<GroupRate>),
    BoxPlot(Vec<IncomeDistribution>),
}

impl ChartData {
    /// Grouped series for bar and line charts.
    pub fn series(&self) -> Option<&[GroupRate]> {
        match self {
            Self::Bar(s) | Self::Line(s) => Some(s),
            Self::BoxPlot(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResponse {
    pub intent: QueryIntent,
    pub chart: Option<ChartData>,
    pub summary: String,
}

impl QueryResponse {
    fn text(intent: QueryIntent, summary: &str) -> Self {
        Self {
            intent,
            chart: None,
            summary: summary.to_string(),
        }
    }

    fn charted(intent: QueryIntent, chart: ChartData, summary: impl Into<String>) -> Self {
        Self {
            intent,
            chart: Some(chart),
            summary: summary.into(),
        }
    }
}

/// Answer a question over the dataset.
///
/// Pure in `(query, records)`: the same inputs always produce the same response.
pub fn route(query: &str, records: &[EmployeeRecord]) -> QueryResponse {
    let intent = QueryIntent::detect(query);
    debug!(intent = intent.as_str(), records = records.len(), "routed query");

    match intent {
        QueryIntent::ByDepartment => {
            let mut rates = stats::group_rates(records, |r| r.department.as_str());
            stats::sort_descending(&mut rates);
            let summary = match rates.first() {
                Some(top) => format!("Attrition is highest in **{}** department.", top.group),
                None => NO_DATA_SUMMARY.to_string(),
            };
            QueryResponse::charted(intent, ChartData::Bar(rates), summary)
        }
        QueryIntent::ByOvertime => {
            let rates = stats::group_rates(records, |r| if r.overtime { "Yes" } else { "No" });
            let summary = if rates.is_empty() {
                NO_DATA_SUMMARY
            } else {
                OVERTIME_SUMMARY
            };
            QueryResponse::charted(intent, ChartData::Bar(rates), summary)
        }
        QueryIntent::ByAgeGroup => {
            let rates = stats::age_bucket_rates(records);
            QueryResponse::charted(intent, ChartData::Line(rates), AGE_SUMMARY)
        }
        QueryIntent::ByIncome => {
            let dists = stats::income_by_attrition(records);
            QueryResponse::charted(intent, ChartData::BoxPlot(dists), INCOME_SUMMARY)
        }
        QueryIntent::ByEducation => {
            let rates = stats::group_rates(records, |r| r.education_field.as_str());
            let summary = if rates.is_empty() {
                NO_DATA_SUMMARY
            } else {
                EDUCATION_SUMMARY
            };
            QueryResponse::charted(intent, ChartData::Bar(rates), summary)
        }
        QueryIntent::ByRole => {
            let mut rates = stats::group_rates(records, |r| r.job_role.as_str());
            stats::sort_descending(&mut rates);
            let summary = if rates.is_empty() {
                NO_DATA_SUMMARY.to_string()
            } else {
                let top: Vec<&str> = rates
                    .iter()
                    .take(TOP_ROLES)
                    .map(|g| g.group.as_str())
                    .collect();
                format!("Top attrition roles: {}.", top.join(", "))
            };
            QueryResponse::charted(intent, ChartData::Bar(rates), summary)
        }
        QueryIntent::ByFactor => QueryResponse::text(intent, FACTOR_SUMMARY),
        QueryIntent::Unknown => QueryResponse::text(intent, FALLBACK_SUMMARY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emp(department: &str, role: &str, overtime: bool, attrition: bool) -> EmployeeRecord {
        EmployeeRecord {
            age: 33,
            monthly_income: 4_500.0,
            overtime,
            job_satisfaction: 2,
            work_life_balance: 3,
            years_at_company: 3,
            department: department.into(),
            education_field: "Medical".into(),
            job_role: role.into(),
            attrition,
        }
    }

    #[test]
    fn detect_is_case_insensitive() {
        assert_eq!(QueryIntent::detect("DEPARTMENT?"), QueryIntent::ByDepartment);
        assert_eq!(QueryIntent::detect("OverTime impact"), QueryIntent::ByOvertime);
    }

    #[test]
    fn detect_alternative_keywords() {
        assert_eq!(QueryIntent::detect("salary gap"), QueryIntent::ByIncome);
        assert_eq!(QueryIntent::detect("which role?"), QueryIntent::ByRole);
        assert_eq!(QueryIntent::detect("job hopping"), QueryIntent::ByRole);
        assert_eq!(QueryIntent::detect("reasons people quit"), QueryIntent::ByFactor);
        assert_eq!(QueryIntent::detect("main factor"), QueryIntent::ByFactor);
        assert_eq!(QueryIntent::detect("Why do they leave?"), QueryIntent::ByFactor);
        assert_eq!(QueryIntent::detect("education level"), QueryIntent::ByEducation);
    }

    #[test]
    fn detect_is_lexical() {
        // "average" contains "age".
        assert_eq!(
            QueryIntent::detect("Average income of employees who left."),
            QueryIntent::ByAgeGroup
        );
        // "overtime" is checked before "job".
        assert_eq!(QueryIntent::detect("job overtime"), QueryIntent::ByOvertime);
    }

    #[test]
    fn empty_and_blank_are_unknown() {
        assert_eq!(QueryIntent::detect(""), QueryIntent::Unknown);
        assert_eq!(QueryIntent::detect("   "), QueryIntent::Unknown);
    }

    #[test]
    fn role_summary_lists_top_three() {
        let records = vec![
            emp("Sales", "Sales Representative", false, true),
            emp("Sales", "Sales Representative", false, true),
            emp("R&D", "Laboratory Technician", false, true),
            emp("R&D", "Laboratory Technician", false, false),
            emp("HR", "Human Resources", false, true),
            emp("HR", "Human Resources", false, false),
            emp("HR", "Human Resources", false, false),
            emp("R&D", "Research Director", false, false),
        ];
        let resp = route("Which job role leaves most?", &records);
        assert_eq!(resp.intent, QueryIntent::ByRole);
        assert_eq!(
            resp.summary,
            "Top attrition roles: Sales Representative, Laboratory Technician, Human Resources."
        );
        assert_eq!(resp.chart.as_ref().unwrap().series().unwrap().len(), 4);
    }

    #[test]
    fn role_summary_with_fewer_roles() {
        let records = vec![emp("Sales", "Manager", false, true)];
        let resp = route("role", &records);
        assert_eq!(resp.summary, "Top attrition roles: Manager.");
    }

    #[test]
    fn department_summary_names_top_group() {
        let records = vec![
            emp("Sales", "a", false, true),
            emp("Sales", "a", false, false),
            emp("Research & Development", "a", false, false),
            emp("Human Resources", "a", false, true),
        ];
        let resp = route("department", &records);
        assert_eq!(
            resp.summary,
            "Attrition is highest in **Human Resources** department."
        );
        let series = resp.chart.as_ref().unwrap().series().unwrap();
        assert_eq!(series[0].rate, Some(1.0));
        assert_eq!(series[1].rate, Some(0.5));
        assert_eq!(series[2].rate, Some(0.0));
    }

    #[test]
    fn overtime_groups_no_then_yes() {
        let records = vec![
            emp("Sales", "a", true, true),
            emp("Sales", "a", false, false),
            emp("Sales", "a", true, false),
        ];
        let resp = route("overtime", &records);
        let series = resp.chart.as_ref().unwrap().series().unwrap();
        assert_eq!(series[0].group, "No");
        assert_eq!(series[1].group, "Yes");
        assert_eq!(series[1].rate, Some(0.5));
        assert_eq!(resp.summary, OVERTIME_SUMMARY);
    }

    #[test]
    fn age_uses_line_chart_and_income_uses_box_plot() {
        let records = vec![emp("Sales", "a", false, true)];
        assert!(matches!(
            route("age", &records).chart,
            Some(ChartData::Line(_))
        ));
        let income = route("income", &records);
        assert!(matches!(income.chart, Some(ChartData::BoxPlot(ref d)) if d.len() == 2));
        assert_eq!(income.summary, INCOME_SUMMARY);
    }

    #[test]
    fn factor_has_no_chart() {
        let resp = route("what factors matter", &[]);
        assert_eq!(resp.intent, QueryIntent::ByFactor);
        assert!(resp.chart.is_none());
        assert_eq!(resp.summary, FACTOR_SUMMARY);
    }

    #[test]
    fn empty_dataset_does_not_fail() {
        let dept = route("department", &[]);
        assert_eq!(dept.summary, NO_DATA_SUMMARY);
        assert_eq!(dept.chart, Some(ChartData::Bar(vec![])));

        let role = route("role", &[]);
        assert_eq!(role.summary, NO_DATA_SUMMARY);

        let age = route("age", &[]);
        assert_eq!(age.chart.unwrap().series().unwrap().len(), 4);
    }

    #[test]
    fn response_serializes_with_tagged_chart() {
        let resp = route("education", &[emp("Sales", "a", false, true)]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["intent"], "ByEducation");
        assert_eq!(json["chart"]["kind"], "bar");
        assert_eq!(json["chart"]["data"][0]["group"], "Medical");
        assert_eq!(json["summary"], EDUCATION_SUMMARY);
    }
}
