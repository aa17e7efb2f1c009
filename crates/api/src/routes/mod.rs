pub mod email_log;
pub mod health;
pub mod reminders;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /reminders                       sweep (GET), manual (POST)
/// /reminders/{project_id}/preview  eligibility preview
/// /email-log                       sent email audit trail
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/reminders", reminders::router())
        .nest("/email-log", email_log::router())
}
