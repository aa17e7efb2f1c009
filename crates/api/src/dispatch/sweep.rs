use serde::Serialize;
use sitecraft_core::reminder::{evaluate, Tier};
use sitecraft_core::store::StoreError;
use sitecraft_core::types::Timestamp;

use super::{DeadlinePlan, ReminderDispatcher};

/// Outcome for one project the sweep attempted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepResult {
    pub project_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SweepResult {
    fn sent(project_id: &str, tier: Tier) -> Self {
        Self {
            project_id: project_id.to_string(),
            success: true,
            tier: Some(tier),
            error: None,
        }
    }

    fn failed(project_id: &str, tier: Option<Tier>, error: String) -> Self {
        Self {
            project_id: project_id.to_string(),
            success: false,
            tier,
            error: Some(error),
        }
    }
}

/// Aggregate returned by [`ReminderDispatcher::run_sweep`].
///
/// `total` counts attempted dispatches, `evaluated` counts loaded projects.
/// `results` is left out for cron invocations.
#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    pub message: String,
    pub sent: usize,
    pub total: usize,
    pub evaluated: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<SweepResult>>,
}

impl ReminderDispatcher {
    /// Evaluate every stored project and send the reminders that are due.
    ///
    /// Only listing the project ids can fail the sweep as a whole. Each
    /// project is handled in isolation: a failed load or send is recorded in
    /// the results and the sweep moves on.
    pub async fn run_sweep(&self, now: Timestamp, is_cron: bool) -> Result<SweepSummary, StoreError> {
        let ids = self.store.list_ids().await?;

        let mut results = Vec::new();
        let mut evaluated = 0;

        for id in &ids {
            let mut project = match self.store.load(id).await {
                Ok(Some(project)) => project,
                Ok(None) => {
                    tracing::debug!(project_id = %id, "Listed project has no record, skipping");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(project_id = %id, error = %e, "Failed to load project");
                    results.push(SweepResult::failed(id, None, e.to_string()));
                    continue;
                }
            };
            evaluated += 1;

            let eligibility = evaluate(&project, now);
            if !eligibility.should_send {
                continue;
            }
            let (Some(tier), Some(deadline), Some(days_until)) =
                (eligibility.tier, eligibility.deadline, eligibility.days_until)
            else {
                continue;
            };

            let plan = DeadlinePlan::for_customer(&project, tier, deadline, days_until);
            match self.deliver_deadline_reminder(&mut project, &plan, now).await {
                Ok(()) => {
                    tracing::info!(project_id = %id, tier = %tier, days_until, "Reminder sent");
                    results.push(SweepResult::sent(id, tier));
                }
                Err(e) => {
                    tracing::warn!(project_id = %id, tier = %tier, error = %e, "Reminder failed");
                    results.push(SweepResult::failed(id, Some(tier), e.to_string()));
                }
            }
        }

        let sent = results.iter().filter(|r| r.success).count();
        let total = results.len();

        tracing::info!(sent, total, evaluated, is_cron, "Reminder sweep finished");

        Ok(SweepSummary {
            message: format!("Sent {sent} of {total} reminders"),
            sent,
            total,
            evaluated,
            results: (!is_cron).then_some(results),
        })
    }
}
