/// One pod as seen in a single listing. Never re-queried during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodRecord {
    pub name: String,
    pub phase: String,
    /// Sum of restartCount over container statuses.
    pub restarts: u64,
    /// Passed through untouched from the cluster, not parsed.
    pub created: String,
    /// Declared containers. Empty when listed from the table output.
    pub containers: Vec<String>,
}

impl PodRecord {
    pub fn from_table_fields(name: &str, phase: &str) -> Self {
        Self {
            name: name.to_string(),
            phase: phase.to_string(),
            restarts: 0,
            created: String::new(),
            containers: Vec::new(),
        }
    }
}

/// Result of listing pods once: the records plus whatever raw text the
/// source wants to quote in the summary.
#[derive(Debug, Clone, Default)]
pub struct PodSnapshot {
    pub raw: String,
    pub pods: Vec<PodRecord>,
}

impl PodSnapshot {
    pub fn is_empty(&self) -> bool {
        self.pods.is_empty()
    }
}

/// A single stream of log output to tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogTarget<'a> {
    pub pod: &'a str,
    pub container: Option<&'a str>,
}
