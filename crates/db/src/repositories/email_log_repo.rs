//! Repository for the `email_log` table.

use sqlx::PgPool;
use sitecraft_core::email_log::{EmailLogQuery, NewEmailLogEntry};

use crate::models::email_log::EmailLogRow;

/// Column list for `email_log` SELECT queries.
const COLUMNS: &str = "\
    id, project_id, customer_name, recipient, email_type, \
    subject, details, success, sent_at";

/// Provides append and query operations for the email log.
pub struct EmailLogRepo;

impl EmailLogRepo {
    /// Append a log entry. `sent_at` defaults to `NOW()`.
    pub async fn insert(
        pool: &PgPool,
        entry: &NewEmailLogEntry,
    ) -> Result<EmailLogRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO email_log \
                (project_id, customer_name, recipient, email_type, subject, details, success) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmailLogRow>(&query)
            .bind(&entry.project_id)
            .bind(&entry.customer_name)
            .bind(&entry.recipient)
            .bind(entry.email_type.as_str())
            .bind(&entry.subject)
            .bind(&entry.details)
            .bind(entry.success)
            .fetch_one(pool)
            .await
    }

    /// List entries newest first, optionally restricted to one project.
    pub async fn list(
        pool: &PgPool,
        params: &EmailLogQuery,
    ) -> Result<Vec<EmailLogRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM email_log \
             WHERE ($1::TEXT IS NULL OR project_id = $1) \
             ORDER BY sent_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, EmailLogRow>(&query)
            .bind(params.project_id.as_deref())
            .bind(params.clamped_limit())
            .bind(params.clamped_offset())
            .fetch_all(pool)
            .await
    }
}
