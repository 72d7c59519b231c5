use launchpad_common::error::{AppError, EntityKind};
use thiserror::Error;

/// Everything that can end a notification attempt early.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{kind} '{key}' not found")]
    NotFound { kind: EntityKind, key: String },

    #[error("Storage error: {0}")]
    Storage(#[from] AppError),

    #[error("Render error: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Webhook responded with {0}")]
    Status(reqwest::StatusCode),
}

impl NotifyError {
    pub fn not_found(kind: EntityKind, key: impl ToString) -> Self {
        NotifyError::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    /// Transport errors and non-200 responses are one failure class.
    pub fn is_delivery_failure(&self) -> bool {
        matches!(self, NotifyError::Transport(_) | NotifyError::Status(_))
    }

    /// The missing entity kind, for resolution failures.
    pub fn missing_entity(&self) -> Option<EntityKind> {
        match self {
            NotifyError::NotFound { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = NotifyError::not_found(EntityKind::Deployment, 42);
        assert_eq!(err.to_string(), "deployment '42' not found");
        assert_eq!(err.missing_entity(), Some(EntityKind::Deployment));
        assert!(!err.is_delivery_failure());
    }

    #[test]
    fn test_status_is_delivery_failure() {
        let err = NotifyError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_delivery_failure());
        assert!(err.missing_entity().is_none());
        assert!(err.to_string().contains("500"));
    }
}
