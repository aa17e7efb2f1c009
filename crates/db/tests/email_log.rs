//! Integration tests for the PostgreSQL email log.

use sqlx::PgPool;
use sitecraft_core::email_log::{EmailLog, EmailLogQuery, EmailType, NewEmailLogEntry};
use sitecraft_db::PgEmailLog;

fn entry(project_id: &str, email_type: EmailType, success: bool) -> NewEmailLogEntry {
    NewEmailLogEntry {
        project_id: project_id.to_string(),
        customer_name: "Bakkerij Anna".into(),
        recipient: "anna@example.nl".into(),
        email_type,
        subject: "Herinnering: je deadline komt eraan".into(),
        details: "upcoming reminder for phase design (2 days until deadline)".into(),
        success,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn entries_are_listed_newest_first(pool: PgPool) {
    let log = PgEmailLog::new(pool);
    log.log_email_sent(entry("p-1", EmailType::Reminder, true))
        .await
        .unwrap();
    log.log_email_sent(entry("p-1", EmailType::PaymentLink, false))
        .await
        .unwrap();

    let entries = log.list(&EmailLogQuery::default()).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].email_type, EmailType::PaymentLink);
    assert!(!entries[0].success);
    assert_eq!(entries[1].email_type, EmailType::Reminder);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_project_and_paginates(pool: PgPool) {
    let log = PgEmailLog::new(pool);
    for project_id in ["p-1", "p-2", "p-1", "p-1"] {
        log.log_email_sent(entry(project_id, EmailType::Reminder, true))
            .await
            .unwrap();
    }

    let page = log
        .list(&EmailLogQuery {
            project_id: Some("p-1".into()),
            limit: Some(2),
            offset: Some(1),
        })
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert!(page.iter().all(|e| e.project_id == "p-1"));
}
