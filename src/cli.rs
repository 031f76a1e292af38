use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pod-reporter")]
#[command(about = "Collect Kubernetes pod status and logs and send them to Helix for analysis")]
pub struct Cli {
    /// Namespace
    #[arg(short = 'n', long)]
    pub namespace: Option<String>,

    /// Print the report instead of sending it to Helix
    #[arg(long)]
    pub dry_run: bool,

    /// How pods are listed: kubectl's table output or its JSON output
    #[arg(long, value_enum, default_value_t = PodFormat::Json)]
    pub format: PodFormat,

    /// Context
    #[arg(long)]
    pub context: Option<String>,

    /// kubectl binary to invoke
    #[arg(long, default_value = "kubectl")]
    pub kubectl: String,

    /// YAML file with helix_url, helix_api_key and app_id (environment wins)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PodFormat {
    /// `kubectl get pod` table, one log section per pod
    Table,
    /// `kubectl get pods -o json`, one log section per container
    Json,
}
