//! Periodic in-process reminder sweep.
//!
//! Runs the same sweep as `GET /api/v1/reminders` with cron semantics on a
//! fixed interval. Only spawned when `REMINDER_SWEEP_INTERVAL_HOURS` is set;
//! the external cron trigger remains the primary way to send reminders.

use std::time::Duration;

use chrono::Utc;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;

use crate::dispatch::ReminderDispatcher;

/// Run the sweep loop until `cancel` is triggered.
///
/// The first sweep happens one `period` after startup, so restarts do not
/// trigger an extra run.
pub async fn run(dispatcher: ReminderDispatcher, period: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = period.as_secs(),
        "Reminder sweep job started"
    );

    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Reminder sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                match dispatcher.run_sweep(Utc::now(), true).await {
                    Ok(summary) => {
                        if summary.total > 0 {
                            tracing::info!(
                                sent = summary.sent,
                                total = summary.total,
                                "Reminder sweep: dispatched reminders"
                            );
                        } else {
                            tracing::debug!(
                                evaluated = summary.evaluated,
                                "Reminder sweep: nothing due"
                            );
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Reminder sweep: failed to list projects");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use sitecraft_core::mailer::{DeadlineReminderEmail, DeliveryError, ReminderMailer};
    use sitecraft_core::store::ProjectStore;
    use sitecraft_db::{MemoryEmailLog, MemoryKeyValueStore};

    use super::*;

    struct NoopMailer;

    #[async_trait]
    impl ReminderMailer for NoopMailer {
        async fn send_deadline_reminder(
            &self,
            _email: &DeadlineReminderEmail,
        ) -> Result<(), DeliveryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn stops_when_cancelled() {
        let dispatcher = ReminderDispatcher::new(
            ProjectStore::new(Arc::new(MemoryKeyValueStore::new())),
            Arc::new(NoopMailer),
            Arc::new(MemoryEmailLog::new()),
            "http://localhost:5173".into(),
        );
        let cancel = CancellationToken::new();
        cancel.cancel();

        let finished = tokio::time::timeout(
            Duration::from_secs(1),
            run(dispatcher, Duration::from_secs(3600), cancel),
        )
        .await;
        assert!(finished.is_ok());
    }
}
