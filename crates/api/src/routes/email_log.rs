use axum::routing::get;
use axum::Router;

use crate::handlers::email_log;
use crate::state::AppState;

/// Routes mounted at `/email-log`.
///
/// ```text
/// GET /  -> list_email_log
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(email_log::list_email_log))
}
