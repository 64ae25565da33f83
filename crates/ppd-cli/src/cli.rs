//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use ppd_cli::answers::PartialAnswers;

#[derive(Parser)]
#[command(
    name = "ppd-screen",
    version,
    about = "Postpartum depression risk screening from survey answers",
    long_about = "Screen survey respondents for postpartum depression risk.\n\n\
                  Answers are mapped to the codes the classifiers were trained on.\n\
                  Single answers are scored by the tree ensemble, batch files by\n\
                  the neural network."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include the emitting module in each log line.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,

    /// Include respondent answers in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Category definition CSV (Field,Option,Code). Overrides PPD_CATEGORIES_FILE.
    #[arg(long = "categories", value_name = "PATH", global = true)]
    pub categories: Option<PathBuf>,

    /// LightGBM text model (default: $PPD_MODELS_DIR/lightgbm_model.txt).
    #[arg(long = "tree-model", value_name = "PATH", global = true)]
    pub tree_model: Option<PathBuf>,

    /// Dense network JSON model (default: $PPD_MODELS_DIR/ann_model.json).
    #[arg(long = "network-model", value_name = "PATH", global = true)]
    pub network_model: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify one respondent.
    Predict(AnswerArgs),

    /// Print one respondent's encoded feature vector.
    Encode(AnswerArgs),

    /// Classify every row of a CSV file and write it back with a Prediction column.
    Batch(BatchArgs),

    /// List every survey field, option, and code.
    Categories,

    /// Show whether each model loads, with its path and fingerprint.
    Models,
}

/// One respondent's answers. Unanswered questions default to "Not sure",
/// age to 18.
#[derive(Args)]
pub struct AnswerArgs {
    /// JSON file with answers keyed by the long flag names (snake_case).
    #[arg(long = "answers", value_name = "PATH")]
    pub answers: Option<PathBuf>,

    /// How often depressed since birth (MH_PPDPR).
    #[arg(long = "depression-frequency", value_name = "OPTION")]
    pub depression_frequency: Option<String>,

    /// Household income in the past 12 months (INCOME8).
    #[arg(long = "household-income", value_name = "OPTION")]
    pub household_income: Option<String>,

    /// Race (MAT_RACE_PU).
    #[arg(long = "maternal-race", value_name = "OPTION")]
    pub maternal_race: Option<String>,

    /// Age in years, 17 to 45 (MAT_AGE_PU).
    #[arg(long = "maternal-age", value_name = "YEARS")]
    pub maternal_age: Option<f64>,

    /// Partner's education (PAT_ED).
    #[arg(long = "paternal-education", value_name = "OPTION")]
    pub paternal_education: Option<String>,

    /// Own education (MAT_ED).
    #[arg(long = "maternal-education", value_name = "OPTION")]
    pub maternal_education: Option<String>,

    /// State (STATE).
    #[arg(long = "state", value_name = "OPTION")]
    pub state: Option<String>,

    /// Depression diagnosed after birth (MH_PPDX).
    #[arg(long = "depression-after-birth", value_name = "OPTION")]
    pub depression_after_birth: Option<String>,
}

impl AnswerArgs {
    /// Answers given as flags; the `--answers` file is merged separately.
    pub fn flag_answers(&self) -> PartialAnswers {
        PartialAnswers {
            depression_frequency: self.depression_frequency.clone(),
            household_income: self.household_income.clone(),
            maternal_race: self.maternal_race.clone(),
            maternal_age: self.maternal_age,
            paternal_education: self.paternal_education.clone(),
            maternal_education: self.maternal_education.clone(),
            state: self.state.clone(),
            depression_after_birth: self.depression_after_birth.clone(),
        }
    }
}

#[derive(Args)]
pub struct BatchArgs {
    /// CSV file with one respondent per row and the survey columns as header.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (default: batch_predictions.csv beside the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Validate and encode without scoring or writing.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
