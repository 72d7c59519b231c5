//! The process-wide, read-only set of configured applications and their targets.
//!
//! Loaded once at startup from a JSON file of the form:
//!
//! ```json
//! [
//!   {
//!     "name": "app",
//!     "github_owner": "acme",
//!     "github_repo": "app",
//!     "targets": [{ "name": "production", "slack_url": "https://hooks.slack.com/..." }]
//!   }
//! ]
//! ```

use std::collections::HashSet;
use std::path::Path;

use crate::error::AppError;
use crate::types::Application;

/// Registry of configured applications.
#[derive(Debug, Clone, Default)]
pub struct ApplicationRegistry {
    applications: Vec<Application>,
}

impl ApplicationRegistry {
    /// Build a registry, rejecting duplicate application names.
    pub fn new(applications: Vec<Application>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for app in &applications {
            if !seen.insert(app.name.as_str()) {
                return Err(AppError::Config(format!(
                    "Duplicate application '{}'",
                    app.name
                )));
            }
        }

        Ok(Self { applications })
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let applications: Vec<Application> = serde_json::from_str(json)
            .map_err(|e| AppError::Config(format!("Invalid applications config: {}", e)))?;
        Self::new(applications)
    }

    /// Read and parse the applications config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let registry = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            applications = registry.len(),
            "Loaded application registry"
        );
        Ok(registry)
    }

    pub fn find_application(&self, name: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.name == name)
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CONFIG: &str = r#"[
        {
            "name": "app",
            "github_owner": "acme",
            "github_repo": "app",
            "targets": [
                { "name": "production", "slack_url": "https://hooks.slack.com/services/T0/B0/X" },
                { "name": "staging" }
            ]
        },
        { "name": "worker", "github_owner": "acme", "github_repo": "worker" }
    ]"#;

    #[test]
    fn test_from_json() {
        let registry = ApplicationRegistry::from_json(CONFIG).unwrap();
        assert_eq!(registry.len(), 2);

        let app = registry.find_application("app").unwrap();
        assert_eq!(app.github_owner, "acme");
        assert_eq!(app.targets.len(), 2);
        assert!(registry.find_application("worker").unwrap().targets.is_empty());
        assert!(registry.find_application("missing").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let json = r#"[
            { "name": "app", "github_owner": "a", "github_repo": "a" },
            { "name": "app", "github_owner": "b", "github_repo": "b" }
        ]"#;
        let err = ApplicationRegistry::from_json(json).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("Duplicate")));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = ApplicationRegistry::from_json("{ not json").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();

        let registry = ApplicationRegistry::load(file.path()).unwrap();
        assert!(registry.find_application("app").is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ApplicationRegistry::load("/nonexistent/applications.json").unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("Cannot read")));
    }
}
