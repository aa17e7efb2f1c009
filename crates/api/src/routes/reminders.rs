//! Route definitions for the `/reminders` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::reminders;
use crate::state::AppState;

/// Routes mounted at `/reminders`.
///
/// ```text
/// GET     /                      -> run_sweep
/// POST    /                      -> send_manual_reminder
/// GET     /{project_id}/preview  -> preview
/// ```
///
/// CORS preflight (`OPTIONS`) is answered by the `CorsLayer` in the router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reminders::run_sweep).post(reminders::send_manual_reminder),
        )
        .route("/{project_id}/preview", get(reminders::preview))
}
