use thiserror::Error;

/// Common error types used across the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// The kinds of record a deployment notification has to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Deployment,
    Application,
    Target,
    User,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Deployment => write!(f, "deployment"),
            EntityKind::Application => write!(f, "application"),
            EntityKind::Target => write!(f, "target"),
            EntityKind::User => write!(f, "user"),
        }
    }
}
