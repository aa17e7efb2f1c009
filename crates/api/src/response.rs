//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope for listing endpoints.
///
/// The reminder endpoints answer with bare payloads, which cron jobs and the
/// admin dashboard read directly.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
