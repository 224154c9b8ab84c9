pub mod employee;
pub mod risk;
pub mod router;
pub mod schema;
pub mod stats;

pub use employee::{Dataset, EmployeeRecord, FEATURE_NAMES, InputError, PredictionInput};
pub use risk::{RiskAssessment, RiskLevel, classify};
pub use router::{ChartData, EXAMPLE_QUESTIONS, QueryIntent, QueryResponse, route};
pub use schema::hr;
pub use stats::{BoxStats, GroupRate, IncomeDistribution};
