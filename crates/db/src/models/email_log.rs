//! Email log row (append-only, no `updated_at`).

use sqlx::FromRow;
use sitecraft_core::email_log::{EmailLogEntry, EmailType};
use sitecraft_core::types::{DbId, Timestamp};

/// A row from the `email_log` table.
#[derive(Debug, Clone, FromRow)]
pub struct EmailLogRow {
    pub id: DbId,
    pub project_id: String,
    pub customer_name: String,
    pub recipient: String,
    pub email_type: String,
    pub subject: String,
    pub details: String,
    pub success: bool,
    pub sent_at: Timestamp,
}

impl TryFrom<EmailLogRow> for EmailLogEntry {
    type Error = sitecraft_core::error::CoreError;

    fn try_from(row: EmailLogRow) -> Result<Self, Self::Error> {
        let email_type: EmailType = row.email_type.parse()?;
        Ok(Self {
            id: row.id,
            project_id: row.project_id,
            customer_name: row.customer_name,
            recipient: row.recipient,
            email_type,
            subject: row.subject,
            details: row.details,
            success: row.success,
            sent_at: row.sent_at,
        })
    }
}
