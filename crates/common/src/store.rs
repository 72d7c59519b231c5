//! Read-only access to deployment and user records.

use std::collections::HashMap;
use std::future::Future;

use sqlx::PgPool;

use crate::error::AppError;
use crate::types::{Deployment, User};

/// Lookups the notifier needs from storage.
///
/// `Ok(None)` means the record does not exist; `Err` is reserved for storage
/// failures.
pub trait DeploymentStore: Send + Sync {
    fn get_deployment(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<Deployment>, AppError>> + Send;

    fn get_user(&self, id: i64) -> impl Future<Output = Result<Option<User>, AppError>> + Send;
}

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DeploymentStore for PgStore {
    async fn get_deployment(&self, id: i64) -> Result<Option<Deployment>, AppError> {
        let deployment: Option<Deployment> = sqlx::query_as(
            r#"
            SELECT id, application_name, target_name, user_id, branch, commit_sha, comment, created_at
            FROM deployments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deployment)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        let user: Option<User> = sqlx::query_as("SELECT id, name FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}

/// In-memory store for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    deployments: HashMap<i64, Deployment>,
    users: HashMap<i64, User>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deployment(mut self, deployment: Deployment) -> Self {
        self.deployments.insert(deployment.id, deployment);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id, user);
        self
    }
}

impl DeploymentStore for MemoryStore {
    async fn get_deployment(&self, id: i64) -> Result<Option<Deployment>, AppError> {
        Ok(self.deployments.get(&id).cloned())
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users.get(&id).cloned())
    }
}
