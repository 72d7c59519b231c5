//! Slack notifications for finished deployments.
//!
//! The dispatcher listens to the deployment log stream and, for every
//! `DEPLOYMENT_SUCCESS` / `DEPLOYMENT_FAIL` entry, spawns a task that:
//! 1. Resolves the deployment, application, target and user (`EntityResolver`)
//! 2. Renders a short summary (`SummaryRenderer`)
//! 3. POSTs it to the target's Slack webhook (`DeliveryClient`)

pub mod delivery;
pub mod dispatcher;
pub mod error;
pub mod resolver;
pub mod summary;

pub use delivery::{DeliveryClient, SlackMessage};
pub use dispatcher::{InFlight, Outcome, SlackNotifier};
pub use error::NotifyError;
pub use resolver::{EntityResolver, Resolution, Resolved};
pub use summary::SummaryRenderer;
