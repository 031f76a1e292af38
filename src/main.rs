mod cli;
mod config;
mod error;
mod helix;
mod kubernetes;
mod logs;
mod pipeline;
mod process;
mod report;
mod types;

use clap::Parser;
use crossterm::style::Stylize;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::error;

use cli::{Cli, PodFormat};
use config::HelixSettings;
use error::ReporterError;
use kubernetes::{JsonSource, PodSource, TableSource};
use pipeline::{Outcome, RunOptions};
use process::Kubectl;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout only carries the report or the session URL.
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(outcome) => {
            print_outcome(&outcome);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{:#}", err);
            if let Some(ReporterError::Configuration { missing }) =
                err.downcast_ref::<ReporterError>()
            {
                eprintln!("Please set the following environment variables:");
                for var in missing {
                    eprintln!("  export {}='your_value_here'", var);
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let settings = HelixSettings::load(cli.config.as_deref())?;
    let runner = Kubectl::new(cli.kubectl, cli.context);
    let source: Box<dyn PodSource> = match cli.format {
        PodFormat::Table => Box::new(TableSource),
        PodFormat::Json => Box::new(JsonSource),
    };
    let options = RunOptions {
        namespace: cli.namespace,
        dry_run: cli.dry_run,
    };

    pipeline::run(&runner, source.as_ref(), &options, &settings).await
}

const DRY_RUN_BANNER: &str = "=== DRY RUN - Message that would be sent to Helix ===";

fn print_outcome(outcome: &Outcome) {
    if let Some(text) = render_outcome(outcome, std::io::stdout().is_terminal()) {
        println!("{}", text);
    }
}

/// What goes to stdout for a finished run. Styling only when `styled`.
fn render_outcome(outcome: &Outcome, styled: bool) -> Option<String> {
    match outcome {
        Outcome::NoPods => None,
        Outcome::DryRun(report) if styled => {
            Some(format!("{}\n\n{}", DRY_RUN_BANNER.bold(), report))
        }
        Outcome::DryRun(report) => Some(format!("{}\n\n{}", DRY_RUN_BANNER, report)),
        Outcome::Sent { session_url } if styled => Some(format!(
            "Session URL: {}",
            session_url.as_str().cyan().underlined()
        )),
        Outcome::Sent { session_url } => Some(session_url.clone()),
    }
}
