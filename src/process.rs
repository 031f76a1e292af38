use crate::error::{ReporterError, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Every kubectl call is bounded by this.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs the cluster CLI with a list of arguments and hands back its stdout.
pub trait CommandRunner {
    async fn run(&self, args: &[String]) -> Result<String>;
}

/// Shells out to a real kubectl binary.
#[derive(Debug, Clone)]
pub struct Kubectl {
    program: String,
    context: Option<String>,
    timeout: Duration,
}

impl Kubectl {
    pub fn new(program: impl Into<String>, context: Option<String>) -> Self {
        Self {
            program: program.into(),
            context,
            timeout: COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl CommandRunner for Kubectl {
    async fn run(&self, args: &[String]) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        if let Some(ctx) = &self.context {
            cmd.args(["--context", ctx.as_str()]);
        }
        // The child is killed when the timed out future is dropped.
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Running {} {}", self.program, args.join(" "));

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(ReporterError::Invocation {
                    program: self.program.clone(),
                    source,
                });
            }
            Err(_) => {
                return Err(ReporterError::Timeout {
                    what: format!("running {} {}", self.program, args.join(" ")),
                    secs: self.timeout.as_secs(),
                });
            }
        };

        if !output.status.success() {
            return Err(ReporterError::ExternalCommand {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
