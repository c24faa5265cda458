use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;

use polarity::{AnalyzeRequest, EvaluateSample, SentimentService, ServiceConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze the sentiment of a single text
    Analyze {
        text: String,
        /// Include token contribution weights in the output
        #[arg(short, long)]
        explain: bool,
    },
    /// Analyze a batch of texts
    Batch { texts: Vec<String> },
    /// Evaluate the configured backend against labeled samples
    Evaluate {
        /// JSON file with an array of {"text", "label"} samples; the
        /// built-in fixture is used when omitted
        #[arg(short, long)]
        samples: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = ServiceConfig::from_env();
    info!("starting sentiment service with config {:?}", config);
    let service = SentimentService::from_config(&config)?;
    info!("service ready: {:?}", service.info());

    match args.command {
        Command::Analyze { text, explain } => {
            let mut request = AnalyzeRequest::new(text);
            if explain {
                request = request.with_explanation();
            }
            let response = service.analyze(&request)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Batch { texts } => {
            let response = service.analyze_batch(&texts)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Evaluate { samples } => {
            let samples = match samples {
                Some(path) => {
                    let raw = fs::read_to_string(&path)
                        .with_context(|| format!("failed to read samples from {:?}", path))?;
                    let parsed: Vec<EvaluateSample> = serde_json::from_str(&raw)
                        .with_context(|| format!("failed to parse samples from {:?}", path))?;
                    Some(parsed)
                }
                None => None,
            };
            let report = service.evaluate(samples.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
