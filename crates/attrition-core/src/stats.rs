//! Group-by aggregations over employee records.
//!
//! Attrition is treated as 0/1, so the mean per group is the attrition rate.
//! Groups come out in ascending key order, the order a sorted group-by yields.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::EmployeeRecord;

/// Age buckets as `(label, first age, last age)`, both ends inclusive.
///
/// Integer ages make `(25, 35]` the same as `26..=35`.
pub const AGE_BUCKETS: [(&str, u32, u32); 4] = [
    ("18-25", 18, 25),
    ("26-35", 26, 35),
    ("36-45", 36, 45),
    ("46-60", 46, 60),
];

/// Mean attrition for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRate {
    pub group: String,
    pub employees: usize,
    /// `None` for a bucket with no employees.
    pub rate: Option<f64>,
}

impl GroupRate {
    fn from_counts(group: &str, employees: usize, left: usize) -> Self {
        let rate = (employees > 0).then(|| left as f64 / employees as f64);
        Self {
            group: group.to_string(),
            employees,
            rate,
        }
    }
}

/// Mean attrition per distinct key, keys ascending.
pub fn group_rates<'a>(
    records: &'a [EmployeeRecord],
    key: impl Fn(&'a EmployeeRecord) -> &'a str,
) -> Vec<GroupRate> {
    // key → (employees, left)
    let mut accum: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for record in records {
        let entry = accum.entry(key(record)).or_insert((0, 0));
        entry.0 += 1;
        if record.attrition {
            entry.1 += 1;
        }
    }

    accum
        .into_iter()
        .map(|(group, (employees, left))| GroupRate::from_counts(group, employees, left))
        .collect()
}

/// Stable sort by rate, highest first. Empty groups sink to the end.
pub fn sort_descending(rates: &mut [GroupRate]) {
    rates.sort_by(|a, b| match (a.rate, b.rate) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Mean attrition per [`AGE_BUCKETS`] entry, always four rows in bucket order.
///
/// Ages outside 18..=60 fall in no bucket and are ignored.
pub fn age_bucket_rates(records: &[EmployeeRecord]) -> Vec<GroupRate> {
    AGE_BUCKETS
        .iter()
        .map(|&(label, first, last)| {
            let (employees, left) = records
                .iter()
                .filter(|r| (first..=last).contains(&r.age))
                .fold((0, 0), |(n, l), r| (n + 1, l + usize::from(r.attrition)));
            GroupRate::from_counts(label, employees, left)
        })
        .collect()
}

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest observation within `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest observation within `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Summarise an ascending-sorted sample. `None` when empty.
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        let (&min, &max) = (sorted.first()?, sorted.last()?);
        let q1 = quantile(sorted, 0.25);
        let median = quantile(sorted, 0.5);
        let q3 = quantile(sorted, 0.75);

        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(min);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < low_fence || v > high_fence)
            .collect();

        Some(Self {
            count: sorted.len(),
            min,
            q1,
            median,
            q3,
            max,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// Quantile with linear interpolation between closest ranks.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Monthly incomes of one attrition class, for a box plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeDistribution {
    pub attrition: bool,
    /// Ascending.
    pub incomes: Vec<f64>,
    pub stats: Option<BoxStats>,
}

/// Split monthly income by attrition: stayed first, then left.
pub fn income_by_attrition(records: &[EmployeeRecord]) -> Vec<IncomeDistribution> {
    [false, true]
        .into_iter()
        .map(|attrition| {
            let mut incomes: Vec<f64> = records
                .iter()
                .filter(|r| r.attrition == attrition)
                .map(|r| r.monthly_income)
                .collect();
            incomes.sort_by(f64::total_cmp);
            let stats = BoxStats::from_sorted(&incomes);
            IncomeDistribution {
                attrition,
                incomes,
                stats,
            }
        })
        .collect()
}
