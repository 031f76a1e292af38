use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between listing pods and creating the Helix session.
#[derive(Error, Debug)]
pub enum ReporterError {
    /// The cluster CLI could not be started at all.
    #[error("failed to run {program}: {source}")]
    Invocation {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    ExternalCommand {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("timeout after {secs}s while {what}")]
    Timeout { what: String, secs: u64 },

    #[error("missing required environment variables: {}", missing.join(", "))]
    Configuration { missing: Vec<&'static str> },

    #[error("failed to load config file {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },

    #[error("error communicating with Helix: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Helix responded with {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("unexpected Helix response: {0}")]
    ResponseFormat(String),

    #[error("could not parse pod list: {0}")]
    PodListFormat(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReporterError>;
