//! Terminal rendering of risk assessments and analytics responses.
//!
//! Charts are drawn as fixed-width text: bars for grouped rates, a row per
//! bucket for the age trend, and a five-number summary per box plot.

use attrition_core::{
    BoxStats, ChartData, EXAMPLE_QUESTIONS, GroupRate, IncomeDistribution, PredictionInput,
    QueryResponse, RiskAssessment, RiskLevel,
};
use serde::Serialize;

const BAR_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 28;

/// Everything the prediction view shows, for `--json` output.
#[derive(Serialize)]
pub struct PredictionReport<'a> {
    pub input: &'a PredictionInput,
    pub probability: f64,
    pub level: RiskLevel,
    pub headline: &'static str,
    pub recommendations: &'static [&'static str],
    pub progress: u8,
}

impl<'a> PredictionReport<'a> {
    pub fn new(input: &'a PredictionInput, assessment: &RiskAssessment) -> Self {
        Self {
            input,
            probability: assessment.probability,
            level: assessment.level,
            headline: assessment.level.headline(),
            recommendations: assessment.level.recommendations(),
            progress: assessment.progress(),
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ── Prediction ──

pub fn print_assessment(assessment: &RiskAssessment) {
    for line in assessment_lines(assessment) {
        println!("{line}");
    }
}

fn assessment_lines(assessment: &RiskAssessment) -> Vec<String> {
    let level = assessment.level;
    let mut lines = vec![
        format!(
            "Predicted Attrition Risk: {} ({:.2})",
            level, assessment.probability
        ),
        String::new(),
        plain(level.headline()),
    ];
    lines.extend(level.recommendations().iter().map(|r| format!("  - {r}")));
    lines.push(String::new());
    lines.push(progress_bar(assessment.progress()));
    lines
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {percent:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

// ── Analytics ──

pub fn print_response(response: &QueryResponse) {
    for line in response_lines(response) {
        println!("{line}");
    }
}

pub fn response_lines(response: &QueryResponse) -> Vec<String> {
    let mut lines = Vec::new();
    match &response.chart {
        Some(ChartData::Bar(series)) => lines.extend(series_lines(series)),
        Some(ChartData::Line(series)) => lines.extend(series_lines(series)),
        Some(ChartData::BoxPlot(dists)) => lines.extend(dists.iter().map(box_line)),
        None => {}
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(plain(&response.summary));
    lines
}

fn series_lines(series: &[GroupRate]) -> Vec<String> {
    let max = series
        .iter()
        .filter_map(|g| g.rate)
        .fold(0.0f64, f64::max);

    series
        .iter()
        .map(|g| match g.rate {
            Some(rate) => {
                let filled = if max > 0.0 {
                    ((rate / max) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                format!(
                    "  {:<LABEL_WIDTH$} {:<BAR_WIDTH$} {:>5.1}%  (n={})",
                    truncate(&g.group),
                    "█".repeat(filled),
                    rate * 100.0,
                    g.employees
                )
            }
            None => format!("  {:<LABEL_WIDTH$} (no employees)", truncate(&g.group)),
        })
        .collect()
}

fn box_line(dist: &IncomeDistribution) -> String {
    let label = if dist.attrition { "Attrition = 1" } else { "Attrition = 0" };
    match &dist.stats {
        Some(BoxStats {
            count,
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
            ..
        }) => format!(
            "  {label} (n={count}): whiskers {lower_whisker:.0}..{upper_whisker:.0}, \
             IQR {q1:.0}..{q3:.0}, median {median:.0}, {} outliers",
            outliers.len()
        ),
        None => format!("  {label}: no employees"),
    }
}

pub fn print_examples() {
    println!("You can ask questions like:");
    for q in EXAMPLE_QUESTIONS {
        println!("  - '{q}'");
    }
}

// ── Helpers ──

/// Strip markdown bold markers for terminal output.
fn plain(text: &str) -> String {
    text.replace("**", "")
}

fn truncate(label: &str) -> String {
    if label.chars().count() > LABEL_WIDTH {
        let cut: String = label.chars().take(LABEL_WIDTH - 3).collect();
        format!("{cut}...")
    } else {
        label.to_string()
    }
}
