//! Handlers for the `/email-log` resource.

use axum::extract::{Query, State};
use axum::Json;
use sitecraft_core::email_log::{EmailLogEntry, EmailLogQuery};

use crate::error::AppResult;
use crate::query::EmailLogParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/email-log
///
/// List sent customer emails, newest first. Defaults to 50 per page,
/// capped at 200.
pub async fn list_email_log(
    State(state): State<AppState>,
    Query(params): Query<EmailLogParams>,
) -> AppResult<Json<DataResponse<Vec<EmailLogEntry>>>> {
    let log = state.require_email_log()?;
    let entries = log.list(&EmailLogQuery::from(params)).await?;
    Ok(Json(DataResponse { data: entries }))
}
