#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sitecraft_core::email_log::EmailLog;
use sitecraft_core::mailer::{DeadlineReminderEmail, DeliveryError, ReminderMailer};
use sitecraft_core::store::{project_key, KeyValueStore, ProjectStore, PROJECTS_SET_KEY};
use sitecraft_db::{MemoryEmailLog, MemoryKeyValueStore};
use tower::ServiceExt;

use sitecraft_api::config::ServerConfig;
use sitecraft_api::router::build_app_router;
use sitecraft_api::state::AppState;

pub const CRON_SECRET: &str = "test-cron-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        cron_secret: Some(CRON_SECRET.to_string()),
        public_base_url: "https://portal.example.nl".to_string(),
        sweep_interval: None,
    }
}

// ---------------------------------------------------------------------------
// Recording mailer
// ---------------------------------------------------------------------------

/// Mailer that records every email and fails for selected recipients.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<DeadlineReminderEmail>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<DeadlineReminderEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_for(&self, recipient: &str) {
        self.failing.lock().unwrap().insert(recipient.to_string());
    }
}

#[async_trait]
impl ReminderMailer for RecordingMailer {
    async fn send_deadline_reminder(
        &self,
        email: &DeadlineReminderEmail,
    ) -> Result<(), DeliveryError> {
        if self.failing.lock().unwrap().contains(&email.to_email) {
            return Err(DeliveryError("SMTP connection refused".into()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Test app
// ---------------------------------------------------------------------------

/// Router plus handles on the in-memory collaborators behind it.
pub struct TestApp {
    pub router: Router,
    pub kv: Arc<MemoryKeyValueStore>,
    pub email_log: Arc<MemoryEmailLog>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    /// Fully configured app over empty in-memory collaborators.
    pub fn new() -> Self {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let email_log = Arc::new(MemoryEmailLog::new());
        let mailer = Arc::new(RecordingMailer::default());

        let state = AppState {
            config: Arc::new(test_config()),
            pool: None,
            store: Some(ProjectStore::new(kv.clone())),
            email_log: Some(email_log.clone() as Arc<dyn EmailLog>),
            mailer: Some(mailer.clone() as Arc<dyn ReminderMailer>),
        };

        Self {
            router: build_app_router(state, &test_config()),
            kv,
            email_log,
            mailer,
        }
    }

    /// Store a raw project document and register its id.
    pub async fn insert_project(&self, project: Value) {
        let id = project["id"].as_str().unwrap().to_string();
        self.kv.set(&project_key(&id), &project).await.unwrap();
        self.kv.add_member(PROJECTS_SET_KEY, &id).await.unwrap();
    }

    /// Raw stored document for `id`.
    pub async fn project(&self, id: &str) -> Value {
        self.kv.document(&project_key(id)).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        get(self.router.clone(), uri).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        post_json(self.router.clone(), uri, body).await
    }
}

/// App with no store, log or mailer configured.
pub fn unconfigured_app() -> Router {
    let state = AppState {
        config: Arc::new(test_config()),
        pool: None,
        store: None,
        email_log: None,
        mailer: None,
    };
    build_app_router(state, &test_config())
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A project document in `status` whose phase deadline is `deadline`.
pub fn project_json(id: &str, status: &str, deadline: DateTime<Utc>) -> Value {
    json!({
        "id": id,
        "status": status,
        "projectType": "website",
        "customer": {
            "name": "Anna de Vries",
            "email": format!("{id}@example.nl"),
            "companyName": format!("Bakkerij {id}"),
            "phone": "0612345678"
        },
        "googleDriveUrl": format!("https://drive.example/{id}"),
        "onboardingData": {
            "uploadsCompleted": false,
            "logoUploaded": true
        },
        "phaseDeadlines": { status: deadline },
        "createdAt": (deadline - chrono::Duration::days(10)),
        "packageName": "Starter"
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
