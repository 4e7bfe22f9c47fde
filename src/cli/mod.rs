// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and hands off to Layer 2.
//
// Two commands are supported:
//   1. `train` — loads the corpus, trains, writes the artifact
//   2. `crawl` — loads the artifact and filters a page's images
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, CrawlArgs, TrainArgs};

use crate::infra::logging::{LogConfig, LogLevel};

#[derive(Parser, Debug)]
#[command(
    name = "concept-classifier",
    version,
    about = "Train a binary image concept classifier, then crawl pages for matching images."
)]
pub struct Cli {
    /// minimal: progress and results; verbose: adds debug detail
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Minimal)]
    pub log_level: LogLevel,

    /// File that receives a copy of every log line (truncated on start)
    #[arg(long, global = true, default_value = "training.log")]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level:    self.log_level,
            log_file: self.log_file.clone(),
        }
    }

    /// Dispatch to the selected use case.
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => run_train(args).await,
            Commands::Crawl(args) => run_crawl(args).await,
        }
    }
}

async fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on '{}' and '{}'", args.concept_dir, args.no_concept_dir);

    let report = TrainUseCase::new(args.into()).execute().await?;

    println!(
        "Training complete: {} epochs, loss {:.4}, accuracy {:.4}, {:.2}s. Model saved to {}",
        report.history.epochs_completed,
        report.history.final_loss,
        report.history.final_accuracy,
        report.elapsed.as_secs_f64(),
        report.artifact_path.display(),
    );
    if let Some(prediction) = report.prediction {
        println!("Prediction: {prediction}");
    }
    Ok(())
}

async fn run_crawl(args: CrawlArgs) -> Result<()> {
    use crate::application::crawl_use_case::CrawlUseCase;
    use crate::infra::http::HttpFetcher;

    let use_case = CrawlUseCase::new(args.into(), HttpFetcher::new()?);
    let report   = use_case.execute().await?;

    println!(
        "Crawl complete: {} of {} candidate images matched",
        report.triggers.len(),
        report.candidates,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::TrainConfig;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_train_defaults() {
        let cli = Cli::try_parse_from(["concept-classifier", "train"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Minimal);

        let Commands::Train(args) = cli.command else { panic!("expected train") };
        let cfg: TrainConfig = args.into();
        assert_eq!(cfg.epochs, 10);
        assert_eq!(cfg.batch_size, 32);
        assert_eq!(cfg.input_shape, vec![224, 224, 3]);
        assert_eq!(cfg.artifact_path(), PathBuf::from("models/simulated_model.json"));
    }

    #[test]
    fn test_train_flags() {
        let cli = Cli::try_parse_from([
            "concept-classifier", "train",
            "--epochs", "3", "--batch-size", "4", "--input-shape", "64,64,1",
            "--log-level", "verbose", "--name", "cats",
        ])
        .unwrap();
        assert_eq!(cli.log_level, LogLevel::Verbose);

        let Commands::Train(args) = cli.command else { panic!("expected train") };
        assert_eq!(args.input_shape, vec![64, 64, 1]);
        assert_eq!((args.epochs, args.batch_size), (3, 4));
        assert_eq!(args.name, "cats");
    }

    #[test]
    fn test_crawl_requires_url_and_name() {
        assert!(Cli::try_parse_from(["concept-classifier", "crawl", "--name", "cats"]).is_err());
        assert!(Cli::try_parse_from(["concept-classifier", "crawl", "--url", "https://x.test"]).is_err());

        let cli = Cli::try_parse_from([
            "concept-classifier", "crawl", "--url", "https://x.test", "--name", "cats",
        ])
        .unwrap();
        let Commands::Crawl(args) = cli.command else { panic!("expected crawl") };
        assert_eq!(args.predict_delay_ms, 50);
    }
}
