use chrono::Duration;
use sitecraft_core::email_log::EmailType;
use sitecraft_core::mailer::DeadlineReminderEmail;
use sitecraft_core::project::{Project, ProjectStatus};
use sitecraft_core::reminder::payment::default_payment_url;
use sitecraft_core::reminder::{copy, PaymentTemplate};
use sitecraft_core::types::Timestamp;

use super::manual::{non_blank, ManualReminderRequest, ManualReminderResponse};
use super::ReminderDispatcher;
use crate::error::AppResult;

impl ReminderDispatcher {
    /// Send a payment reminder. Not gated by eligibility; the template picks
    /// the wording and only the payment bookkeeping pair is updated.
    pub(super) async fn send_payment_reminder(
        &self,
        project: &mut Project,
        request: &ManualReminderRequest,
        now: Timestamp,
    ) -> AppResult<ManualReminderResponse> {
        let template = request
            .template
            .as_deref()
            .map(str::parse::<PaymentTemplate>)
            .transpose()?
            .unwrap_or_default();
        let (days_until, tier) = template.wording();

        let business_name = non_blank(request.business_name.as_deref())
            .unwrap_or_else(|| project.customer.display_name())
            .to_string();
        let recipient_email = request
            .recipient_email_override()
            .unwrap_or(project.customer.email.trim())
            .to_string();
        let recipient_name = request
            .recipient_name_override()
            .unwrap_or_else(|| project.customer.display_name())
            .to_string();
        let payment_url = non_blank(request.payment_url.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| default_payment_url(&self.public_base_url, &project.id));

        let email = DeadlineReminderEmail {
            to_email: recipient_email,
            to_name: recipient_name,
            project_id: project.id.clone(),
            phase: ProjectStatus::Payment,
            project_type: project.project_type.clone(),
            deadline: now + Duration::days(days_until),
            days_until,
            tier,
            action_required: copy::payment_action(&business_name),
            link: Some(payment_url.clone()),
        };
        let details = copy::payment_details(template, &payment_url);

        self.send_and_log(&email, EmailType::PaymentLink, details)
            .await?;

        project.record_payment_reminder_sent(now);
        self.store.save(project).await?;

        tracing::info!(
            project_id = %project.id,
            template = %template,
            "Payment reminder sent"
        );

        Ok(ManualReminderResponse {
            success: true,
            sent: true,
            message: format!("Payment reminder sent to {}", email.to_email),
            project_id: project.id.clone(),
            tier: Some(tier),
            recipient: Some(email.to_email),
            template: Some(template),
            payment_url: Some(payment_url),
            ..Default::default()
        })
    }
}
