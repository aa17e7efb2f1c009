//! Shared query parameter types for API handlers.

use serde::Deserialize;
use sitecraft_core::email_log::EmailLogQuery;

/// Query parameters for `GET /email-log` (`?projectId=&limit=&offset=`).
///
/// Values are clamped by [`EmailLogQuery`] before they reach the log.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailLogParams {
    pub project_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl From<EmailLogParams> for EmailLogQuery {
    fn from(params: EmailLogParams) -> Self {
        Self {
            project_id: params.project_id.filter(|id| !id.trim().is_empty()),
            limit: params.limit,
            offset: params.offset,
        }
    }
}
