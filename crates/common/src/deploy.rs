//! Deployment log stream types.
//!
//! The deployment executor emits a `LogEntry` for every step of a deployment.
//! Listeners receive them in order over an `mpsc` channel and must keep up with
//! the producer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of step a log entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    CommandStart,
    CommandOutput,
    CommandSuccess,
    CommandFail,
    StageStart,
    StageSuccess,
    StageFail,
    DeploymentStart,
    DeploymentSuccess,
    DeploymentFail,
    KillReceived,
}

impl EntryType {
    /// Whether this entry marks the final outcome of a whole deployment.
    pub fn is_outcome(self) -> bool {
        matches!(self, EntryType::DeploymentSuccess | EntryType::DeploymentFail)
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryType::CommandStart => write!(f, "COMMAND_START"),
            EntryType::CommandOutput => write!(f, "COMMAND_OUTPUT"),
            EntryType::CommandSuccess => write!(f, "COMMAND_SUCCESS"),
            EntryType::CommandFail => write!(f, "COMMAND_FAIL"),
            EntryType::StageStart => write!(f, "STAGE_START"),
            EntryType::StageSuccess => write!(f, "STAGE_SUCCESS"),
            EntryType::StageFail => write!(f, "STAGE_FAIL"),
            EntryType::DeploymentStart => write!(f, "DEPLOYMENT_START"),
            EntryType::DeploymentSuccess => write!(f, "DEPLOYMENT_SUCCESS"),
            EntryType::DeploymentFail => write!(f, "DEPLOYMENT_FAIL"),
            EntryType::KillReceived => write!(f, "KILL_RECEIVED"),
        }
    }
}

/// A single event emitted during a deployment's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub deployment_id: i64,
    pub entry_type: EntryType,
    /// Host or stage that produced the entry (empty for deployment-level entries)
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(deployment_id: i64, entry_type: EntryType) -> Self {
        Self {
            deployment_id,
            entry_type,
            origin: String::new(),
            message: String::new(),
            timestamp: Utc::now(),
        }
    }
}
