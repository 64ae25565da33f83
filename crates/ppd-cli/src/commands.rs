use anyhow::Result;
use tracing::info_span;

use ppd_cli::answers::PartialAnswers;
use ppd_cli::pipeline::{
    BatchOptions, BatchOutcome, encode_answers, load_registry, predict_answers, run_batch,
};
use ppd_cli::report::{categories_table, models_table};
use ppd_model::{FeatureRow, Prediction};
use ppd_predict::{ModelPaths, RiskClassifier};

use crate::cli::{AnswerArgs, BatchArgs, Cli};

pub fn run_predict(cli: &Cli, args: &AnswerArgs) -> Result<Prediction> {
    let _span = info_span!("predict").entered();
    let registry = load_registry(cli.categories.as_deref())?;
    let classifier = classifier(cli);
    predict_answers(&registry, &classifier, gather_answers(args)?)
}

pub fn run_encode(cli: &Cli, args: &AnswerArgs) -> Result<FeatureRow> {
    let registry = load_registry(cli.categories.as_deref())?;
    encode_answers(&registry, gather_answers(args)?)
}

pub fn run_batch_file(cli: &Cli, args: &BatchArgs) -> Result<BatchOutcome> {
    let registry = load_registry(cli.categories.as_deref())?;
    let classifier = classifier(cli);
    run_batch(
        &registry,
        &classifier,
        BatchOptions {
            input: &args.input,
            output: args.output.as_deref(),
            dry_run: args.dry_run,
        },
    )
}

pub fn run_categories(cli: &Cli) -> Result<()> {
    let registry = load_registry(cli.categories.as_deref())?;
    if let Some(source) = &registry.source {
        println!("Source: {source}");
    }
    println!("{}", categories_table(&registry));
    Ok(())
}

pub fn run_models(cli: &Cli) -> Result<()> {
    let classifier = classifier(cli);
    let statuses = [classifier.tree().status(), classifier.network().status()];
    println!("{}", models_table(&statuses));
    Ok(())
}

fn classifier(cli: &Cli) -> RiskClassifier {
    let paths = ModelPaths::resolve(cli.tree_model.clone(), cli.network_model.clone());
    RiskClassifier::from_paths(&paths)
}

fn gather_answers(args: &AnswerArgs) -> Result<PartialAnswers> {
    let flags = args.flag_answers();
    match &args.answers {
        Some(path) => Ok(flags.or(PartialAnswers::from_json_file(path)?)),
        None => Ok(flags),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Command;

    #[test]
    fn predict_flags_parse() {
        let cli = Cli::try_parse_from([
            "ppd-screen",
            "predict",
            "--state",
            "Utah",
            "--maternal-age",
            "30",
        ])
        .unwrap();
        let Command::Predict(args) = &cli.command else {
            panic!("expected predict");
        };
        let answers = gather_answers(args).unwrap();
        assert_eq!(answers.state.as_deref(), Some("Utah"));
        assert_eq!(answers.maternal_age, Some(30.0));
        assert_eq!(answers.household_income, None);
    }

    #[test]
    fn global_model_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ppd-screen",
            "batch",
            "survey.csv",
            "--dry-run",
            "--network-model",
            "nn.json",
        ])
        .unwrap();
        assert_eq!(cli.network_model.as_deref(), Some(std::path::Path::new("nn.json")));
        let Command::Batch(args) = &cli.command else {
            panic!("expected batch");
        };
        assert!(args.dry_run);
    }
}
