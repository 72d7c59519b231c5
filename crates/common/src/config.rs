use std::time::Duration;

use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Public host name of the Launchpad web UI, used in deployment links
    pub host: String,

    /// Whether the web UI is served over TLS (selects `https` vs `http` links)
    pub ssl_enabled: bool,

    /// PostgreSQL connection string
    pub database_url: String,

    /// Maximum number of PostgreSQL connections in the pool (default: 5)
    pub db_max_connections: u32,

    /// Path to the JSON file describing applications and their targets
    pub applications_config: String,

    /// Optional request timeout for webhook delivery, in seconds
    pub webhook_timeout_secs: Option<u64>,
}

/// The slice of configuration the notification renderer needs.
///
/// Handed to the notifier at construction time instead of being read from
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotifierConfig {
    pub host: String,
    pub ssl_enabled: bool,
}

impl NotifierConfig {
    pub fn new(host: impl Into<String>, ssl_enabled: bool) -> Self {
        Self {
            host: host.into(),
            ssl_enabled,
        }
    }

    /// URL scheme for links back to the web UI.
    pub fn scheme(&self) -> &'static str {
        if self.ssl_enabled { "https" } else { "http" }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            host: std::env::var("HOST")
                .map_err(|_| anyhow::anyhow!("HOST environment variable is required"))?,
            ssl_enabled: parse_bool(
                "SSL_ENABLED",
                &std::env::var("SSL_ENABLED").unwrap_or_else(|_| "false".to_string()),
            )?,
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid u32"))?,
            applications_config: std::env::var("APPLICATIONS_CONFIG")
                .unwrap_or_else(|_| "applications.json".to_string()),
            webhook_timeout_secs: std::env::var("WEBHOOK_TIMEOUT_SECS")
                .ok()
                .map(|v| {
                    v.parse()
                        .map_err(|_| anyhow::anyhow!("WEBHOOK_TIMEOUT_SECS must be a valid u64"))
                })
                .transpose()?,
        })
    }

    pub fn notifier(&self) -> NotifierConfig {
        NotifierConfig::new(self.host.clone(), self.ssl_enabled)
    }

    pub fn webhook_timeout(&self) -> Option<Duration> {
        self.webhook_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_bool(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(anyhow::anyhow!(
            "{} must be a boolean (true/false), got '{}'",
            name,
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_follows_ssl_flag() {
        assert_eq!(NotifierConfig::new("ci.acme.com", true).scheme(), "https");
        assert_eq!(NotifierConfig::new("ci.acme.com", false).scheme(), "http");
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("SSL_ENABLED", "true").unwrap());
        assert!(parse_bool("SSL_ENABLED", "1").unwrap());
        assert!(parse_bool("SSL_ENABLED", " TRUE ").unwrap());
        assert!(!parse_bool("SSL_ENABLED", "false").unwrap());
        assert!(!parse_bool("SSL_ENABLED", "").unwrap());
        assert!(parse_bool("SSL_ENABLED", "maybe").is_err());
    }

    #[test]
    fn test_notifier_projection() {
        let config = AppConfig {
            host: "ci.acme.com".to_string(),
            ssl_enabled: true,
            database_url: "unused".to_string(),
            db_max_connections: 5,
            applications_config: "applications.json".to_string(),
            webhook_timeout_secs: Some(10),
        };
        assert_eq!(config.notifier(), NotifierConfig::new("ci.acme.com", true));
        assert_eq!(config.webhook_timeout(), Some(Duration::from_secs(10)));
    }
}
