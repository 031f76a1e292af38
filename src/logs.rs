use crate::error::ReporterError;
use crate::process::CommandRunner;
use tracing::warn;

/// Fetch the tail of one log stream. Failures never propagate: they are turned
/// into a line of text so that one broken pod does not sink the whole report.
pub async fn fetch_tail<R: CommandRunner>(runner: &R, args: &[String]) -> String {
    match runner.run(args).await {
        Ok(logs) => logs,
        Err(e) => {
            warn!("Could not fetch logs ({}): {}", args.join(" "), e);
            placeholder(&e)
        }
    }
}

/// Inline replacement for logs that could not be fetched.
pub fn placeholder(err: &ReporterError) -> String {
    match err {
        ReporterError::ExternalCommand { stderr, .. } => {
            let msg = if stderr.is_empty() {
                "Unknown error"
            } else {
                stderr.as_str()
            };
            format!("Error getting logs: {}", msg)
        }
        ReporterError::Timeout { .. } => "Error: Timeout while fetching logs".to_string(),
        other => format!("Unexpected error: {}", other),
    }
}
