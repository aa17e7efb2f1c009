//! Mail-sending collaborator used by reminder dispatch.

use async_trait::async_trait;

use crate::project::{ProjectStatus, ProjectType};
use crate::reminder::Tier;
use crate::types::Timestamp;

/// Everything needed to render and send one reminder email.
///
/// Payment reminders reuse this shape: `phase` is
/// [`ProjectStatus::Payment`] and `link` carries the payment URL instead of
/// the project's drive folder.
#[derive(Debug, Clone, PartialEq)]
pub struct DeadlineReminderEmail {
    pub to_email: String,
    pub to_name: String,
    pub project_id: String,
    pub phase: ProjectStatus,
    pub project_type: ProjectType,
    pub deadline: Timestamp,
    pub days_until: i64,
    pub tier: Tier,
    pub action_required: String,
    pub link: Option<String>,
}

/// A reminder email could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct DeliveryError(pub String);

#[async_trait]
pub trait ReminderMailer: Send + Sync {
    async fn send_deadline_reminder(&self, email: &DeadlineReminderEmail)
        -> Result<(), DeliveryError>;
}
