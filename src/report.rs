use crate::kubernetes::{PodSource, TAIL_LINES};
use crate::logs::fetch_tail;
use crate::process::CommandRunner;
use crate::types::{LogTarget, PodRecord, PodSnapshot};
use std::fmt::Write;

pub fn header(namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) => format!("Current status of Kubernetes pods in namespace '{}':\n\n", ns),
        None => "Current status of Kubernetes pods:\n\n".to_string(),
    }
}

/// Fixed width POD/STATUS/RESTARTS/AGE table. Long values push the row out
/// rather than being cut.
pub fn summary_table(pods: &[PodRecord]) -> String {
    let mut out = String::from("Pod Summary:\n```\n");
    let _ = writeln!(
        out,
        "{:<40} {:<12} {:<8} {:<10}",
        "POD", "STATUS", "RESTARTS", "AGE"
    );
    out.push_str(&"-".repeat(75));
    out.push('\n');
    for pod in pods {
        let _ = writeln!(
            out,
            "{:<40} {:<12} {:<8} {:<10}",
            pod.name, pod.phase, pod.restarts, pod.created
        );
    }
    out.push_str("```\n\n");
    out
}

pub fn section_title(target: LogTarget<'_>, phase: &str) -> String {
    match target.container {
        Some(container) => format!(
            "## Pod: {} | Container: {} (Status: {})\n",
            target.pod, container, phase
        ),
        None => format!("## Pod: {} (Status: {})\n", target.pod, phase),
    }
}

pub fn log_block(logs: &str) -> String {
    format!("Last {} log lines:\n```\n{}```\n\n", TAIL_LINES, logs)
}

/// Render the full report for one snapshot, fetching logs one stream at a
/// time in listing order.
pub async fn build_report<R, S>(
    runner: &R,
    source: &S,
    snapshot: &PodSnapshot,
    namespace: Option<&str>,
) -> String
where
    R: CommandRunner,
    S: PodSource + ?Sized,
{
    let mut report = header(namespace);
    report.push_str(&source.summary(snapshot));
    report.push_str("Detailed pod logs:\n\n");

    for pod in &snapshot.pods {
        for target in source.log_targets(pod) {
            report.push_str(&section_title(target, &pod.phase));
            let logs = fetch_tail(runner, &source.logs_args(target, namespace)).await;
            report.push_str(&log_block(&logs));
        }
    }

    report
}
