//! Reminder dispatch (scheduled sweep and manual sends).
//!
//! [`ReminderDispatcher`] ties the eligibility rules to the collaborators:
//! it loads projects from the store, sends through the mailer, writes the
//! bookkeeping back and appends to the email log. Projects are handled one
//! at a time; there is no locking against concurrent writers.

pub mod manual;
pub mod payment;
pub mod preview;
pub mod sweep;

use std::sync::Arc;

use sitecraft_core::email_log::{EmailLog, EmailType, NewEmailLogEntry};
use sitecraft_core::mailer::{DeadlineReminderEmail, DeliveryError, ReminderMailer};
use sitecraft_core::project::Project;
use sitecraft_core::reminder::{copy, Tier};
use sitecraft_core::store::{ProjectStore, StoreError};
use sitecraft_core::types::Timestamp;

use crate::error::AppError;

pub use manual::{ManualReminderRequest, ManualReminderResponse, ReminderKind};
pub use preview::ReminderPreview;
pub use sweep::{SweepResult, SweepSummary};

// ---------------------------------------------------------------------------
// Failure
// ---------------------------------------------------------------------------

/// Why a single reminder was not delivered and recorded.
#[derive(Debug, thiserror::Error)]
pub enum DispatchFailure {
    #[error("Project has no customer email address")]
    MissingRecipient,

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DispatchFailure> for AppError {
    fn from(failure: DispatchFailure) -> Self {
        match failure {
            DispatchFailure::MissingRecipient => AppError::BadRequest(failure.to_string()),
            DispatchFailure::Delivery(err) => AppError::DeliveryFailed(err.0),
            DispatchFailure::Store(err) => AppError::Store(err),
        }
    }
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// Recipient and wording of one deadline reminder.
#[derive(Debug, Clone)]
pub struct DeadlinePlan {
    pub tier: Tier,
    pub deadline: Timestamp,
    pub days_until: i64,
    pub recipient_email: String,
    pub recipient_name: String,
}

impl DeadlinePlan {
    /// Plan addressed to the project's own customer.
    pub fn for_customer(project: &Project, tier: Tier, deadline: Timestamp, days_until: i64) -> Self {
        Self {
            tier,
            deadline,
            days_until,
            recipient_email: project.customer.email.trim().to_string(),
            recipient_name: project.customer.display_name().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// ReminderDispatcher
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct ReminderDispatcher {
    store: ProjectStore,
    mailer: Arc<dyn ReminderMailer>,
    email_log: Arc<dyn EmailLog>,
    public_base_url: String,
}

impl ReminderDispatcher {
    pub fn new(
        store: ProjectStore,
        mailer: Arc<dyn ReminderMailer>,
        email_log: Arc<dyn EmailLog>,
        public_base_url: String,
    ) -> Self {
        Self {
            store,
            mailer,
            email_log,
            public_base_url,
        }
    }

    /// Send a deadline reminder and, once delivered, record it on the project
    /// and persist the project. Nothing is written to the project on failure.
    pub async fn deliver_deadline_reminder(
        &self,
        project: &mut Project,
        plan: &DeadlinePlan,
        now: Timestamp,
    ) -> Result<(), DispatchFailure> {
        let email = DeadlineReminderEmail {
            to_email: plan.recipient_email.clone(),
            to_name: plan.recipient_name.clone(),
            project_id: project.id.clone(),
            phase: project.status.clone(),
            project_type: project.project_type.clone(),
            deadline: plan.deadline,
            days_until: plan.days_until,
            tier: plan.tier,
            action_required: copy::action_required(&project.status, plan.tier).to_string(),
            link: project.google_drive_url.clone(),
        };
        let details = copy::reminder_details(&project.status, plan.tier, plan.days_until);

        self.send_and_log(&email, EmailType::Reminder, details).await?;

        project.record_reminder_sent(now);
        self.store.save(project).await?;
        Ok(())
    }

    /// Send `email` and append the outcome to the email log.
    async fn send_and_log(
        &self,
        email: &DeadlineReminderEmail,
        email_type: EmailType,
        details: String,
    ) -> Result<(), DispatchFailure> {
        if email.to_email.is_empty() {
            return Err(DispatchFailure::MissingRecipient);
        }

        let result = self.mailer.send_deadline_reminder(email).await;

        let entry = NewEmailLogEntry {
            project_id: email.project_id.clone(),
            customer_name: email.to_name.clone(),
            recipient: email.to_email.clone(),
            email_type,
            subject: copy::subject(&email.phase, email.tier).to_string(),
            details,
            success: result.is_ok(),
        };
        if let Err(e) = self.email_log.log_email_sent(entry).await {
            tracing::warn!(
                project_id = %email.project_id,
                error = %e,
                "Failed to append email log entry"
            );
        }

        result.map_err(DispatchFailure::from)
    }
}
