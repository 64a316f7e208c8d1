use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mule_ring_detector::action::{ActionPipeline, AlertAction, LogAction};
use mule_ring_detector::config::Args;
use mule_ring_detector::ingest::read_transactions_file;
use mule_ring_detector::AnalysisHandler;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let transactions = read_transactions_file(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;

    let action_pipeline = ActionPipeline::new()
        .add_handler(LogAction::new())
        .add_handler(AlertAction::new(args.alert_webhook_url.clone(), args.alert_min_level));

    let handler = AnalysisHandler::new(action_pipeline)
        .with_graph(args.include_graph)
        .with_concurrency(args.concurrent);

    let report = handler.process(transactions).await?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }

    Ok(())
}
