//! Append-only audit trail of customer emails.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::store::StoreError;
use crate::types::{DbId, Timestamp};

/// Default page size for email log listings.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailType {
    Reminder,
    PaymentLink,
}

impl EmailType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reminder => "reminder",
            Self::PaymentLink => "payment_link",
        }
    }
}

impl FromStr for EmailType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reminder" => Ok(Self::Reminder),
            "payment_link" => Ok(Self::PaymentLink),
            other => Err(CoreError::Validation(format!("Unknown email type '{other}'"))),
        }
    }
}

impl fmt::Display for EmailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry to append. `sent_at` is assigned by the log.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmailLogEntry {
    pub project_id: String,
    pub customer_name: String,
    pub recipient: String,
    pub email_type: EmailType,
    pub subject: String,
    pub details: String,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailLogEntry {
    pub id: DbId,
    pub project_id: String,
    pub customer_name: String,
    pub recipient: String,
    pub email_type: EmailType,
    pub subject: String,
    pub details: String,
    pub success: bool,
    pub sent_at: Timestamp,
}

/// Filter for [`EmailLog::list`].
#[derive(Debug, Clone, Default)]
pub struct EmailLogQuery {
    pub project_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl EmailLogQuery {
    pub fn clamped_limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn clamped_offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[async_trait]
pub trait EmailLog: Send + Sync {
    async fn log_email_sent(&self, entry: NewEmailLogEntry) -> Result<(), StoreError>;

    /// Entries matching `query`, newest first.
    async fn list(&self, query: &EmailLogQuery) -> Result<Vec<EmailLogEntry>, StoreError>;
}
