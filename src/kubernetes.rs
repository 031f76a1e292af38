use crate::error::Result;
use crate::process::CommandRunner;
use crate::report;
use crate::types::{LogTarget, PodRecord, PodSnapshot};
use serde::Deserialize;
use tracing::debug;

/// Number of log lines requested per container.
pub const TAIL_LINES: u32 = 10;

/// How pods are listed, summarised and which log streams they expand to.
pub trait PodSource {
    fn list_args(&self, namespace: Option<&str>) -> Vec<String>;

    fn parse(&self, output: String) -> Result<PodSnapshot>;

    /// Text placed between the report header and the log sections.
    fn summary(&self, snapshot: &PodSnapshot) -> String;

    fn log_targets<'a>(&self, pod: &'a PodRecord) -> Vec<LogTarget<'a>>;

    fn logs_args(&self, target: LogTarget<'_>, namespace: Option<&str>) -> Vec<String>;
}

/// List pods once through `runner`.
pub async fn list_pods<R, S>(runner: &R, source: &S, namespace: Option<&str>) -> Result<PodSnapshot>
where
    R: CommandRunner,
    S: PodSource + ?Sized,
{
    let output = runner.run(&source.list_args(namespace)).await?;
    source.parse(output)
}

fn push_namespace(args: &mut Vec<String>, namespace: Option<&str>) {
    if let Some(ns) = namespace {
        args.push("-n".to_string());
        args.push(ns.to_string());
    }
}

/// `kubectl get pod` human readable table.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableSource;

impl PodSource for TableSource {
    fn list_args(&self, namespace: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "get".to_string(),
            "pod".to_string(),
            "--no-headers=false".to_string(),
        ];
        push_namespace(&mut args, namespace);
        args
    }

    fn parse(&self, output: String) -> Result<PodSnapshot> {
        let pods = parse_pod_table(&output);
        Ok(PodSnapshot { raw: output, pods })
    }

    fn summary(&self, snapshot: &PodSnapshot) -> String {
        format!("Pod List:\n```\n{}```\n\n", snapshot.raw)
    }

    fn log_targets<'a>(&self, pod: &'a PodRecord) -> Vec<LogTarget<'a>> {
        vec![LogTarget {
            pod: &pod.name,
            container: None,
        }]
    }

    fn logs_args(&self, target: LogTarget<'_>, namespace: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "logs".to_string(),
            format!("--tail={}", TAIL_LINES),
            target.pod.to_string(),
        ];
        push_namespace(&mut args, namespace);
        args
    }
}

/// Parse the table printed by `kubectl get pod`: skip the header, ignore blank
/// lines and lines with fewer than three columns (NAME READY STATUS ...).
/// Dropped lines are not pods, so a table of nothing but malformed lines
/// yields an empty list and the run ends as "no pods found".
pub fn parse_pod_table(output: &str) -> Vec<PodRecord> {
    output
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 3 {
                debug!("Skipping malformed pod line: {}", line);
                return None;
            }
            Some(PodRecord::from_table_fields(fields[0], fields[2]))
        })
        .collect()
}

/// `kubectl get pods -o json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSource;

impl PodSource for JsonSource {
    fn list_args(&self, namespace: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "get".to_string(),
            "pods".to_string(),
            "-o".to_string(),
            "json".to_string(),
        ];
        push_namespace(&mut args, namespace);
        args
    }

    fn parse(&self, output: String) -> Result<PodSnapshot> {
        let pods = parse_pod_list(&output)?;
        Ok(PodSnapshot { raw: output, pods })
    }

    fn summary(&self, snapshot: &PodSnapshot) -> String {
        report::summary_table(&snapshot.pods)
    }

    fn log_targets<'a>(&self, pod: &'a PodRecord) -> Vec<LogTarget<'a>> {
        pod.containers
            .iter()
            .map(|c| LogTarget {
                pod: &pod.name,
                container: Some(c.as_str()),
            })
            .collect()
    }

    fn logs_args(&self, target: LogTarget<'_>, namespace: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "logs".to_string(),
            format!("--tail={}", TAIL_LINES),
            "--timestamps".to_string(),
            target.pod.to_string(),
        ];
        if let Some(container) = target.container {
            args.push("-c".to_string());
            args.push(container.to_string());
        }
        push_namespace(&mut args, namespace);
        args
    }
}

#[derive(Debug, Deserialize)]
struct PodList {
    items: Vec<PodItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PodItem {
    metadata: Metadata,
    spec: Spec,
    status: Status,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Metadata {
    name: Option<String>,
    creation_timestamp: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Spec {
    containers: Option<Vec<Container>>,
}

#[derive(Debug, Deserialize)]
struct Container {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Status {
    phase: Option<String>,
    container_statuses: Option<Vec<ContainerStatus>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ContainerStatus {
    restart_count: i64,
}

const UNKNOWN: &str = "unknown";

/// Parse a `kubectl get pods -o json` document, keeping item order.
pub fn parse_pod_list(output: &str) -> Result<Vec<PodRecord>> {
    let list: PodList = serde_json::from_str(output)?;
    Ok(list.items.into_iter().map(into_record).collect())
}

fn into_record(item: PodItem) -> PodRecord {
    let restarts = item
        .status
        .container_statuses
        .as_ref()
        .map(|statuses| {
            statuses.iter().fold(0u64, |total, cs| {
                total.saturating_add(u64::try_from(cs.restart_count).unwrap_or(0))
            })
        })
        .unwrap_or(0);
    PodRecord {
        name: item.metadata.name.unwrap_or_else(|| UNKNOWN.to_string()),
        phase: item.status.phase.unwrap_or_else(|| UNKNOWN.to_string()),
        restarts,
        created: item
            .metadata
            .creation_timestamp
            .unwrap_or_else(|| UNKNOWN.to_string()),
        containers: item
            .spec
            .containers
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.name)
            .collect(),
    }
}
