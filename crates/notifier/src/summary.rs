//! Formats the Slack message for a finished deployment.

use std::fmt::Write;

use launchpad_common::config::NotifierConfig;
use launchpad_common::types::{Application, Deployment, User};

use crate::error::NotifyError;

/// Renders deployment summaries using links back to the configured host.
#[derive(Debug, Clone)]
pub struct SummaryRenderer {
    config: NotifierConfig,
}

impl SummaryRenderer {
    pub fn new(config: NotifierConfig) -> Self {
        Self { config }
    }

    /// Render the summary text for a deployment outcome.
    ///
    /// Output is fully determined by the inputs and the renderer's config.
    pub fn render(
        &self,
        deployment: &Deployment,
        application: &Application,
        user: &User,
        success: bool,
    ) -> Result<String, NotifyError> {
        let status = if success {
            "Successfully Deployed"
        } else {
            "Deploy Failed"
        };

        let mut summary = String::new();
        writeln!(summary, "{} {}:", application.github_repo, status)?;
        writeln!(
            summary,
            "{} deployed {} on {} :pizza:",
            user.name, deployment.branch, deployment.target_name
        )?;
        writeln!(summary)?;
        writeln!(summary, "> {}", deployment.comment)?;
        writeln!(
            summary,
            "<{}|View latest commit on GitHub>",
            Self::commit_url(deployment, application)
        )?;
        write!(
            summary,
            "<{}|Open deployment in Launchpad>",
            self.deployment_url(deployment, application)
        )?;

        Ok(summary)
    }

    pub fn commit_url(deployment: &Deployment, application: &Application) -> String {
        format!(
            "https://github.com/{}/{}/commit/{}",
            application.github_owner, application.github_repo, deployment.commit_sha
        )
    }

    pub fn deployment_url(&self, deployment: &Deployment, application: &Application) -> String {
        format!(
            "{}://{}/{}/deployments/{}",
            self.config.scheme(),
            self.config.host,
            application.github_repo,
            deployment.id
        )
    }
}
