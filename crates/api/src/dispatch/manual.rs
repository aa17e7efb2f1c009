use serde::{Deserialize, Serialize};
use sitecraft_core::error::CoreError;
use sitecraft_core::reminder::eligibility::resolve_deadline;
use sitecraft_core::reminder::{evaluate, PaymentTemplate, SuppressReason, Tier};
use sitecraft_core::types::Timestamp;
use validator::Validate;

use super::{DeadlinePlan, ReminderDispatcher};
use crate::error::{AppError, AppResult};

/// Which reminder family a manual request targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Payment,
    /// Phase deadline reminder. Any unrecognised `type` lands here.
    #[default]
    #[serde(other)]
    Deadline,
}

/// Body of `POST /api/v1/reminders`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ManualReminderRequest {
    pub project_id: Option<String>,
    #[serde(default)]
    pub force: bool,
    #[serde(default, rename = "type")]
    pub kind: ReminderKind,
    pub template: Option<String>,
    #[validate(email)]
    pub recipient_email: Option<String>,
    pub recipient_name: Option<String>,
    pub business_name: Option<String>,
    pub payment_url: Option<String>,
}

impl ManualReminderRequest {
    /// The trimmed project id, or 400 when absent or blank.
    pub fn project_id(&self) -> AppResult<&str> {
        self.project_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::BadRequest("projectId is required".into()))
    }

    pub(crate) fn recipient_email_override(&self) -> Option<&str> {
        non_blank(self.recipient_email.as_deref())
    }

    pub(crate) fn recipient_name_override(&self) -> Option<&str> {
        non_blank(self.recipient_name.as_deref())
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Response of the manual path. Which optional fields are present depends on
/// whether a deadline reminder, a payment reminder or nothing was sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualReminderResponse {
    pub success: bool,
    pub sent: bool,
    pub message: String,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SuppressReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PaymentTemplate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
}

impl ReminderDispatcher {
    /// Handle a manual request for a single project.
    pub async fn send_manual(
        &self,
        request: &ManualReminderRequest,
        now: Timestamp,
    ) -> AppResult<ManualReminderResponse> {
        let project_id = request.project_id()?;
        let mut project = self
            .store
            .load(project_id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "Project",
                id: project_id.to_string(),
            })?;

        if request.kind == ReminderKind::Payment {
            return self.send_payment_reminder(&mut project, request, now).await;
        }

        let eligibility = evaluate(&project, now);
        if !eligibility.should_send && !request.force {
            let reason = eligibility.reason;
            let message = reason
                .map(SuppressReason::message)
                .unwrap_or("No reminder needed");
            return Ok(ManualReminderResponse {
                success: true,
                sent: false,
                message: format!("No reminder needed: {message}"),
                project_id: project.id,
                deadline: eligibility.deadline,
                days_until: eligibility.days_until,
                reason,
                ..Default::default()
            });
        }

        let deadline = eligibility
            .deadline
            .unwrap_or_else(|| resolve_deadline(&project));
        let days_until = eligibility.days_until.unwrap_or(0);
        let tier = eligibility
            .tier
            .or_else(|| Tier::for_days_until(days_until))
            .unwrap_or(Tier::Upcoming);

        let mut plan = DeadlinePlan::for_customer(&project, tier, deadline, days_until);
        if let Some(email) = request.recipient_email_override() {
            plan.recipient_email = email.to_string();
        }
        if let Some(name) = request.recipient_name_override() {
            plan.recipient_name = name.to_string();
        }

        self.deliver_deadline_reminder(&mut project, &plan, now)
            .await?;

        tracing::info!(
            project_id = %project.id,
            tier = %tier,
            forced = request.force && !eligibility.should_send,
            "Manual reminder sent"
        );

        Ok(ManualReminderResponse {
            success: true,
            sent: true,
            message: format!("Reminder sent to {}", plan.recipient_email),
            project_id: project.id,
            tier: Some(tier),
            deadline: Some(deadline),
            days_until: Some(days_until),
            recipient: Some(plan.recipient_email),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn parse(json: &str) -> ManualReminderRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn kind_defaults_to_deadline() {
        assert_eq!(parse(r#"{"projectId":"p-1"}"#).kind, ReminderKind::Deadline);
        assert_eq!(
            parse(r#"{"projectId":"p-1","type":"deadline"}"#).kind,
            ReminderKind::Deadline
        );
        assert_eq!(
            parse(r#"{"projectId":"p-1","type":"something"}"#).kind,
            ReminderKind::Deadline
        );
        assert_eq!(
            parse(r#"{"projectId":"p-1","type":"payment"}"#).kind,
            ReminderKind::Payment
        );
    }

    #[test]
    fn project_id_is_required() {
        assert!(parse("{}").project_id().is_err());
        assert!(parse(r#"{"projectId":"   "}"#).project_id().is_err());
        assert_eq!(parse(r#"{"projectId":" p-1 "}"#).project_id().unwrap(), "p-1");
    }

    #[test]
    fn recipient_email_must_be_valid() {
        assert!(parse(r#"{"projectId":"p-1","recipientEmail":"nope"}"#)
            .validate()
            .is_err());
        assert!(parse(r#"{"projectId":"p-1","recipientEmail":"anna@example.nl"}"#)
            .validate()
            .is_ok());
        assert!(parse(r#"{"projectId":"p-1"}"#).validate().is_ok());
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let request = parse(r#"{"projectId":"p-1","recipientName":"  "}"#);
        assert_eq!(request.recipient_name_override(), None);
    }

    #[test]
    fn not_needed_response_omits_send_fields() {
        let response = ManualReminderResponse {
            success: true,
            sent: false,
            message: "No reminder needed".into(),
            project_id: "p-1".into(),
            reason: Some(SuppressReason::TooEarly),
            days_until: Some(9),
            ..Default::default()
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["reason"], "too_early");
        assert_eq!(json["daysUntil"], 9);
        assert!(json.get("tier").is_none());
        assert!(json.get("paymentUrl").is_none());
    }
}
