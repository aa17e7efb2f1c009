use std::sync::Arc;

use sitecraft_core::email_log::EmailLog;
use sitecraft_core::mailer::ReminderMailer;
use sitecraft_core::store::ProjectStore;

use crate::config::ServerConfig;
use crate::dispatch::ReminderDispatcher;
use crate::error::{AppError, AppResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Collaborators are optional: a missing database or SMTP configuration
/// leaves the field `None` and the endpoints that need it answer 503.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Database connection pool, used for health reporting.
    pub pool: Option<sitecraft_db::DbPool>,
    /// Project records in the key-value store.
    pub store: Option<ProjectStore>,
    /// Audit trail of customer emails.
    pub email_log: Option<Arc<dyn EmailLog>>,
    /// SMTP mailer.
    pub mailer: Option<Arc<dyn ReminderMailer>>,
}

impl AppState {
    pub fn project_store(&self) -> AppResult<&ProjectStore> {
        self.store
            .as_ref()
            .ok_or_else(|| AppError::ServiceUnavailable("Project store is not configured".into()))
    }

    pub fn require_email_log(&self) -> AppResult<&Arc<dyn EmailLog>> {
        self.email_log
            .as_ref()
            .ok_or_else(|| AppError::ServiceUnavailable("Email log is not configured".into()))
    }

    /// Dispatcher over the configured collaborators, or 503 if any is missing.
    pub fn reminder_dispatcher(&self) -> AppResult<ReminderDispatcher> {
        let store = self.project_store()?.clone();
        let email_log = Arc::clone(self.require_email_log()?);
        let mailer = self
            .mailer
            .clone()
            .ok_or_else(|| AppError::ServiceUnavailable("SMTP is not configured".into()))?;

        Ok(ReminderDispatcher::new(
            store,
            mailer,
            email_log,
            self.config.public_base_url.clone(),
        ))
    }
}
