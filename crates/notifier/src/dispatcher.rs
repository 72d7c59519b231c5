//! Event dispatcher — turns deployment outcomes on the log stream into Slack
//! notifications.
//!
//! The listener loop only filters and spawns; each notification runs as its
//! own task so a slow webhook never holds up the stream. Spawned tasks are
//! not joined or capped: when the stream closes, in-flight notifications
//! finish on their own. A process that wants to exit after the stream closes
//! can use `spawn_tracked` and wait on the returned `InFlight` so the runtime
//! outlives those tasks.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use launchpad_common::config::NotifierConfig;
use launchpad_common::deploy::{EntryType, LogEntry};
use launchpad_common::registry::ApplicationRegistry;
use launchpad_common::store::DeploymentStore;

use crate::delivery::DeliveryClient;
use crate::error::NotifyError;
use crate::resolver::{EntityResolver, Resolution};
use crate::summary::SummaryRenderer;

/// Terminal state of a single notification attempt.
#[derive(Debug)]
pub enum Outcome {
    Delivered,
    /// The target has no webhook configured.
    Disabled,
    ResolutionFailed(NotifyError),
    RenderFailed(NotifyError),
    DeliveryFailed(NotifyError),
}

/// Completes once every notification launched by a tracked listener has
/// reached a terminal state.
///
/// Each spawned task holds a sender clone; the receiver sees the channel close
/// when the listener loop and all of its tasks are gone.
#[derive(Debug)]
pub struct InFlight {
    done: mpsc::Receiver<()>,
}

impl InFlight {
    pub async fn wait(mut self) {
        while self.done.recv().await.is_some() {}
    }
}

pub struct SlackNotifier<S> {
    resolver: EntityResolver<S>,
    renderer: SummaryRenderer,
    delivery: DeliveryClient,
}

impl<S: DeploymentStore + 'static> SlackNotifier<S> {
    pub fn new(
        store: Arc<S>,
        registry: Arc<ApplicationRegistry>,
        config: NotifierConfig,
        delivery: DeliveryClient,
    ) -> Self {
        Self {
            resolver: EntityResolver::new(store, registry),
            renderer: SummaryRenderer::new(config),
            delivery,
        }
    }

    /// Run the listener loop as its own task.
    ///
    /// The handle resolves to the number of notifications launched once the
    /// stream is closed.
    pub fn spawn(self: Arc<Self>, logs: mpsc::Receiver<LogEntry>) -> JoinHandle<usize> {
        tokio::spawn(self.listen(logs))
    }

    /// Like `spawn`, but also returns an `InFlight` that resolves after the
    /// stream has closed and every launched notification has finished.
    pub fn spawn_tracked(
        self: Arc<Self>,
        logs: mpsc::Receiver<LogEntry>,
    ) -> (JoinHandle<usize>, InFlight) {
        let (guard, done) = mpsc::channel(1);
        let handle = tokio::spawn(self.run(logs, Some(guard)));
        (handle, InFlight { done })
    }

    /// Consume the log stream until it closes, launching one notification task
    /// per deployment outcome. Returns the number of tasks launched.
    pub async fn listen(self: Arc<Self>, logs: mpsc::Receiver<LogEntry>) -> usize {
        self.run(logs, None).await
    }

    async fn run(
        self: Arc<Self>,
        mut logs: mpsc::Receiver<LogEntry>,
        guard: Option<mpsc::Sender<()>>,
    ) -> usize {
        let mut launched = 0usize;

        while let Some(entry) = logs.recv().await {
            if !entry.entry_type.is_outcome() {
                tracing::trace!(
                    deployment_id = entry.deployment_id,
                    entry_type = %entry.entry_type,
                    "Ignoring log entry"
                );
                continue;
            }
            let success = entry.entry_type == EntryType::DeploymentSuccess;

            let notifier = Arc::clone(&self);
            let guard = guard.clone();
            tokio::spawn(async move {
                notifier.notify(entry.deployment_id, success).await;
                drop(guard);
            });
            launched += 1;
        }

        tracing::debug!(launched, "Log stream closed, Slack listener stopping");
        launched
    }

    /// Resolve, render and deliver the notification for one deployment.
    ///
    /// Every terminal state is logged here; callers may ignore the result.
    pub async fn notify(&self, deployment_id: i64, success: bool) -> Outcome {
        let resolved = match self.resolver.resolve(deployment_id).await {
            Ok(Resolution::Ready(resolved)) => resolved,
            Ok(Resolution::Disabled { deployment, .. }) => {
                tracing::debug!(
                    deployment_id,
                    application = %deployment.application_name,
                    target = %deployment.target_name,
                    "Slack notifications disabled for target"
                );
                return Outcome::Disabled;
            }
            Err(e) => {
                match e.missing_entity() {
                    Some(kind) => tracing::warn!(
                        deployment_id,
                        missing = %kind,
                        error = %e,
                        "Could not resolve deployment for Slack notification"
                    ),
                    None => tracing::error!(
                        deployment_id,
                        error = %e,
                        "Storage lookup failed for Slack notification"
                    ),
                }
                return Outcome::ResolutionFailed(e);
            }
        };

        let deployment = &resolved.deployment;
        let summary = match self.renderer.render(
            deployment,
            &resolved.application,
            &resolved.user,
            success,
        ) {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(
                    deployment_id,
                    error = %e,
                    "Could not render Slack deployment summary"
                );
                return Outcome::RenderFailed(e);
            }
        };

        match self
            .delivery
            .deliver(&resolved.target.slack_url, &summary)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    deployment_id,
                    application = %deployment.application_name,
                    target = %deployment.target_name,
                    commit = %deployment.commit_sha,
                    success,
                    "Notified Slack about deployment"
                );
                Outcome::Delivered
            }
            Err(e) => {
                if let NotifyError::Encoding(_) = e {
                    tracing::error!(
                        deployment_id,
                        error = %e,
                        "Could not encode Slack notification"
                    );
                    return Outcome::DeliveryFailed(e);
                }
                tracing::error!(
                    deployment_id,
                    application = %deployment.application_name,
                    target = %deployment.target_name,
                    commit = %deployment.commit_sha,
                    error = %e,
                    "Error while notifying Slack about deployment"
                );
                Outcome::DeliveryFailed(e)
            }
        }
    }
}
