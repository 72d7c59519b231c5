use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single deployment of an application's commit to one of its targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Deployment {
    pub id: i64,
    pub application_name: String,
    pub target_name: String,
    pub user_id: i64,
    pub branch: String,
    pub commit_sha: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// A user who can trigger deployments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// A deployable application, as declared in the applications config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    pub github_owner: String,
    pub github_repo: String,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Application {
    /// Find one of this application's targets by name.
    pub fn find_target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }
}

/// A named deployment destination (e.g. `production`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    /// Slack incoming-webhook URL. Empty means notifications are disabled.
    #[serde(default)]
    pub slack_url: String,
}

impl Target {
    pub fn notifications_enabled(&self) -> bool {
        !self.slack_url.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> Application {
        Application {
            name: "app".to_string(),
            github_owner: "acme".to_string(),
            github_repo: "app".to_string(),
            targets: vec![
                Target {
                    name: "staging".to_string(),
                    slack_url: String::new(),
                },
                Target {
                    name: "production".to_string(),
                    slack_url: "https://hooks.slack.com/services/T0/B0/X".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_find_target() {
        let app = app();
        assert_eq!(app.find_target("production").unwrap().name, "production");
        assert!(app.find_target("Production").is_none());
        assert!(app.find_target("qa").is_none());
    }

    #[test]
    fn test_notifications_enabled() {
        let app = app();
        assert!(!app.find_target("staging").unwrap().notifications_enabled());
        assert!(app.find_target("production").unwrap().notifications_enabled());

        let blank = Target {
            name: "blank".to_string(),
            slack_url: "   ".to_string(),
        };
        assert!(!blank.notifications_enabled());
    }

    #[test]
    fn test_target_without_slack_url_deserializes_disabled() {
        let target: Target = serde_json::from_str(r#"{"name": "staging"}"#).unwrap();
        assert!(!target.notifications_enabled());
    }
}
