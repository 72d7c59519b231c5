//! Entity resolver — looks up everything needed to describe a deployment.
//!
//! Lookups run in a fixed order and stop at the first miss:
//! deployment → application → target → user. A target without a webhook
//! stops resolution before the user lookup.

use std::sync::Arc;

use launchpad_common::error::EntityKind;
use launchpad_common::registry::ApplicationRegistry;
use launchpad_common::store::DeploymentStore;
use launchpad_common::types::{Application, Deployment, Target, User};

use crate::error::NotifyError;

/// The records describing one deployment.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub deployment: Deployment,
    pub application: Application,
    pub target: Target,
    pub user: User,
}

/// Result of a successful resolution.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The target has no webhook; nothing else was looked up.
    Disabled { deployment: Deployment, target: Target },
    Ready(Resolved),
}

pub struct EntityResolver<S> {
    store: Arc<S>,
    registry: Arc<ApplicationRegistry>,
}

impl<S: DeploymentStore> EntityResolver<S> {
    pub fn new(store: Arc<S>, registry: Arc<ApplicationRegistry>) -> Self {
        Self { store, registry }
    }

    pub async fn resolve(&self, deployment_id: i64) -> Result<Resolution, NotifyError> {
        let deployment = self
            .store
            .get_deployment(deployment_id)
            .await?
            .ok_or_else(|| NotifyError::not_found(EntityKind::Deployment, deployment_id))?;

        let application = self
            .registry
            .find_application(&deployment.application_name)
            .ok_or_else(|| {
                NotifyError::not_found(EntityKind::Application, &deployment.application_name)
            })?;

        let target = application
            .find_target(&deployment.target_name)
            .ok_or_else(|| NotifyError::not_found(EntityKind::Target, &deployment.target_name))?
            .clone();
        if !target.notifications_enabled() {
            return Ok(Resolution::Disabled { deployment, target });
        }
        let application = application.clone();

        let user = self
            .store
            .get_user(deployment.user_id)
            .await?
            .ok_or_else(|| NotifyError::not_found(EntityKind::User, deployment.user_id))?;

        Ok(Resolution::Ready(Resolved {
            deployment,
            application,
            target,
            user,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use launchpad_common::store::MemoryStore;

    fn registry() -> Arc<ApplicationRegistry> {
        let json = r#"[{
            "name": "app",
            "github_owner": "acme",
            "github_repo": "app",
            "targets": [
                { "name": "production", "slack_url": "http://127.0.0.1:1/hook" },
                { "name": "staging", "slack_url": "" }
            ]
        }]"#;
        Arc::new(ApplicationRegistry::from_json(json).unwrap())
    }

    fn deployment(id: i64, application: &str, target: &str, user_id: i64) -> Deployment {
        Deployment {
            id,
            application_name: application.to_string(),
            target_name: target.to_string(),
            user_id,
            branch: "main".to_string(),
            commit_sha: "abc123".to_string(),
            comment: "fix bug".to_string(),
            created_at: Utc::now(),
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_deployment(deployment(1, "app", "production", 10))
            .with_deployment(deployment(2, "ghost", "production", 10))
            .with_deployment(deployment(3, "app", "qa", 10))
            .with_deployment(deployment(4, "app", "production", 99))
            .with_deployment(deployment(5, "app", "staging", 99))
            .with_user(User {
                id: 10,
                name: "alice".to_string(),
            })
    }

    async fn resolve(id: i64) -> Result<Resolution, NotifyError> {
        EntityResolver::new(Arc::new(store()), registry())
            .resolve(id)
            .await
    }

    #[tokio::test]
    async fn test_resolves_all_entities() {
        let Resolution::Ready(resolved) = resolve(1).await.unwrap() else {
            panic!("expected a ready resolution");
        };
        assert_eq!(resolved.deployment.id, 1);
        assert_eq!(resolved.application.github_repo, "app");
        assert_eq!(resolved.target.name, "production");
        assert_eq!(resolved.user.name, "alice");
    }

    #[tokio::test]
    async fn test_missing_entities_in_order() {
        let cases = [
            (42, EntityKind::Deployment),
            (2, EntityKind::Application),
            (3, EntityKind::Target),
            (4, EntityKind::User),
        ];
        for (id, kind) in cases {
            let err = resolve(id).await.unwrap_err();
            assert_eq!(err.missing_entity(), Some(kind), "deployment {}", id);
        }
    }

    #[tokio::test]
    async fn test_disabled_target_skips_user_lookup() {
        // User 99 does not exist, but the staging target has no webhook.
        match resolve(5).await.unwrap() {
            Resolution::Disabled { deployment, target } => {
                assert_eq!(deployment.id, 5);
                assert_eq!(target.name, "staging");
            }
            other => panic!("expected disabled target, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_found_carries_lookup_key() {
        let err = resolve(2).await.unwrap_err();
        assert_eq!(err.to_string(), "application 'ghost' not found");
    }
}
