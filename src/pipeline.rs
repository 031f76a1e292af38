use crate::config::HelixSettings;
use crate::helix::HelixClient;
use crate::kubernetes::{PodSource, list_pods};
use crate::process::CommandRunner;
use crate::report::build_report;
use anyhow::Context;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub namespace: Option<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoPods,
    DryRun(String),
    Sent { session_url: String },
}

/// List pods once, collect their logs, and either hand back the report
/// (dry run) or open a Helix session with it.
pub async fn run<R, S>(
    runner: &R,
    source: &S,
    options: &RunOptions,
    settings: &HelixSettings,
) -> anyhow::Result<Outcome>
where
    R: CommandRunner,
    S: PodSource + ?Sized,
{
    let namespace = options.namespace.as_deref();

    info!("Gathering pod information...");
    let snapshot = list_pods(runner, source, namespace)
        .await
        .context("Error getting pod list")?;

    if snapshot.is_empty() {
        warn!("No pods found");
        return Ok(Outcome::NoPods);
    }

    info!("Found {} pods, collecting logs...", snapshot.pods.len());
    let report = build_report(runner, source, &snapshot, namespace).await;

    if options.dry_run {
        return Ok(Outcome::DryRun(report));
    }

    let client = HelixClient::new(settings.validate()?)?;
    info!("Sending data to Helix...");
    let session_url = client.send(&report).await?;
    info!("Data sent to Helix");

    Ok(Outcome::Sent { session_url })
}
