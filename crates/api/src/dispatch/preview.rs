use serde::Serialize;
use sitecraft_core::error::CoreError;
use sitecraft_core::project::ProjectStatus;
use sitecraft_core::reminder::{copy, evaluate, Eligibility};
use sitecraft_core::store::ProjectStore;
use sitecraft_core::types::Timestamp;

use crate::error::AppResult;

/// What the sweep would do for one project right now.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPreview {
    pub project_id: String,
    pub status: ProjectStatus,
    #[serde(flatten)]
    pub eligibility: Eligibility,
    /// Action text the email would carry; absent when nothing would be sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_required: Option<&'static str>,
    pub reminder_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reminder_sent: Option<Timestamp>,
}

/// Evaluate a single project without sending anything.
pub async fn preview_reminder(
    store: &ProjectStore,
    project_id: &str,
    now: Timestamp,
) -> AppResult<ReminderPreview> {
    let project = store
        .load(project_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Project",
            id: project_id.to_string(),
        })?;

    let eligibility = evaluate(&project, now);
    let action_required = eligibility
        .tier
        .filter(|_| eligibility.should_send)
        .map(|tier| copy::action_required(&project.status, tier));

    Ok(ReminderPreview {
        project_id: project.id,
        status: project.status,
        eligibility,
        action_required,
        reminder_count: project.onboarding_data.reminder_count,
        last_reminder_sent: project.onboarding_data.last_reminder_sent,
    })
}
