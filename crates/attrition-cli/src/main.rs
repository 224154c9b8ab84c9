mod chat;
mod display;

use std::path::PathBuf;

use anyhow::Context;
use attrition_ai::{RiskModel, assess, load_model};
use attrition_core::{Dataset, EXAMPLE_QUESTIONS, PredictionInput, route};
use attrition_store::{CsvSource, DatasetProvider};
use clap::{Args, Parser, Subcommand, ValueEnum, value_parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA: &str = "WA_Fn-UseC_-HR-Employee-Attrition.csv";
const DEFAULT_MODEL: &str = "attrition_model.onnx";

#[derive(Parser)]
#[command(
    name = "attrition",
    version,
    about = "HR attrition prediction & analytics agent"
)]
struct Cli {
    /// Employee dataset (CSV with a header row).
    #[arg(long, env = "ATTRITION_DATA", default_value = DEFAULT_DATA, global = true)]
    data: PathBuf,

    /// Pre-trained risk model (.onnx or .json).
    #[arg(long, env = "ATTRITION_MODEL", default_value = DEFAULT_MODEL, global = true)]
    model: PathBuf,

    /// How the dataset is read.
    #[arg(long, env = "ATTRITION_LOADER", value_enum, default_value_t = Loader::Arrow, global = true)]
    loader: Loader,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Loader {
    /// Arrow CSV reader.
    Arrow,
    /// DuckDB `read_csv_auto` (needs the `duckdb` feature).
    Duckdb,
}

#[derive(Subcommand)]
enum Command {
    /// Predict attrition risk for one employee profile.
    Predict(PredictArgs),
    /// Ask one analytics question about the dataset.
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Ask questions interactively, one per line.
    Chat,
    /// List example questions.
    Examples,
}

#[derive(Args)]
struct PredictArgs {
    #[arg(long, default_value_t = 30, value_parser = value_parser!(u32).range(18..=60))]
    age: u32,

    /// Monthly income in dollars.
    #[arg(long, default_value_t = 5000, value_parser = value_parser!(u32).range(1000..=20000))]
    monthly_income: u32,

    #[arg(long, value_enum, default_value_t = YesNo::Yes)]
    overtime: YesNo,

    /// Job satisfaction, 1-4.
    #[arg(long, default_value_t = 3, value_parser = value_parser!(u8).range(1..=4))]
    job_satisfaction: u8,

    /// Work-life balance, 1-4.
    #[arg(long, default_value_t = 3, value_parser = value_parser!(u8).range(1..=4))]
    work_life_balance: u8,

    #[arg(long, default_value_t = 5, value_parser = value_parser!(u32).range(0..=40))]
    years_at_company: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum YesNo {
    Yes,
    No,
}

impl PredictArgs {
    fn to_input(&self) -> anyhow::Result<PredictionInput> {
        Ok(PredictionInput::new(
            self.age,
            self.monthly_income,
            self.overtime == YesNo::Yes,
            self.job_satisfaction,
            self.work_life_balance,
            self.years_at_company,
        )?)
    }
}

/// Dataset and model, loaded once before any command runs.
pub struct AppState {
    pub dataset: Dataset,
    pub model: Box<dyn RiskModel>,
}

impl AppState {
    fn load(cli: &Cli) -> anyhow::Result<Self> {
        let model = load_model(&cli.model)
            .with_context(|| format!("loading risk model {}", cli.model.display()))?;
        let dataset = load_dataset(cli.loader, &cli.data)
            .with_context(|| format!("loading dataset {}", cli.data.display()))?;
        Ok(Self { dataset, model })
    }
}

fn load_dataset(loader: Loader, path: &std::path::Path) -> anyhow::Result<Dataset> {
    match loader {
        Loader::Arrow => Ok(CsvSource::new(path).load()?),
        #[cfg(feature = "duckdb")]
        Loader::Duckdb => Ok(attrition_store::DuckSource::open(path)?.load()?),
        #[cfg(not(feature = "duckdb"))]
        Loader::Duckdb => anyhow::bail!("the duckdb loader needs the `duckdb` feature"),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("attrition v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::load(&cli)?;

    match &cli.command {
        Command::Predict(args) => {
            let input = args.to_input()?;
            let assessment = assess(state.model.as_ref(), &input)?;
            if cli.json {
                display::print_json(&display::PredictionReport::new(&input, &assessment))?;
            } else {
                display::print_assessment(&assessment);
            }
        }
        Command::Ask { question } => {
            let question = question.join(" ");
            anyhow::ensure!(!question.trim().is_empty(), "question must not be empty");
            let response = route(&question, state.dataset.records());
            if cli.json {
                display::print_json(&response)?;
            } else {
                display::print_response(&response);
            }
        }
        Command::Chat => {
            let stdin = std::io::stdin();
            chat::run(&state, stdin.lock(), cli.json)?;
        }
        Command::Examples => {
            if cli.json {
                display::print_json(&EXAMPLE_QUESTIONS)?;
            } else {
                display::print_examples();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn predict_defaults_match_controls() {
        let cli = Cli::try_parse_from(["attrition", "predict"]).unwrap();
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.to_input().unwrap(), PredictionInput::default());
    }

    #[test]
    fn predict_rejects_out_of_range_age() {
        assert!(Cli::try_parse_from(["attrition", "predict", "--age", "61"]).is_err());
        assert!(Cli::try_parse_from(["attrition", "predict", "--job-satisfaction", "5"]).is_err());
    }

    #[test]
    fn predict_parses_overtime_flag() {
        let cli = Cli::try_parse_from(["attrition", "predict", "--overtime", "no"]).unwrap();
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert!(!args.to_input().unwrap().overtime());
    }

    #[test]
    fn ask_joins_words() {
        let cli = Cli::try_parse_from(["attrition", "ask", "which", "department?"]).unwrap();
        let Command::Ask { question } = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(question.join(" "), "which department?");
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli =
            Cli::try_parse_from(["attrition", "examples", "--json", "--model", "m.json"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.model, PathBuf::from("m.json"));
    }
}
