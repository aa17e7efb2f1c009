use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sitecraft_core::email_log::EmailLog;
use sitecraft_core::mailer::ReminderMailer;
use sitecraft_core::store::ProjectStore;
use sitecraft_db::{PgEmailLog, PgKeyValueStore};
use sitecraft_mail::{EmailConfig, EmailDelivery};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitecraft_api::background;
use sitecraft_api::config::ServerConfig;
use sitecraft_api::router::build_app_router;
use sitecraft_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitecraft_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database (project store + email log) ---
    let pool = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = sitecraft_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            sitecraft_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            sitecraft_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Some(pool)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; reminder endpoints will return 503");
            None
        }
    };

    let store = pool
        .clone()
        .map(|pool| ProjectStore::new(Arc::new(PgKeyValueStore::new(pool))));
    let email_log = pool
        .clone()
        .map(|pool| Arc::new(PgEmailLog::new(pool)) as Arc<dyn EmailLog>);

    // --- Mailer ---
    let mailer = match EmailConfig::from_env() {
        Some(email_config) => {
            let delivery = EmailDelivery::new(email_config).expect("Invalid SMTP configuration");
            tracing::info!("SMTP mailer configured");
            Some(Arc::new(delivery) as Arc<dyn ReminderMailer>)
        }
        None => {
            tracing::warn!("SMTP_HOST not set; reminder endpoints will return 503");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        pool,
        store,
        email_log,
        mailer,
    };

    // --- Background sweep ---
    let sweep_cancel = CancellationToken::new();
    let sweep_handle = match (config.sweep_interval, state.reminder_dispatcher()) {
        (Some(period), Ok(dispatcher)) => Some(tokio::spawn(background::reminder_sweep::run(
            dispatcher,
            period,
            sweep_cancel.clone(),
        ))),
        (Some(_), Err(e)) => {
            tracing::warn!(error = %e, "Reminder sweep interval set but dispatch is unavailable");
            None
        }
        (None, _) => None,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweep_cancel.cancel();
    if let Some(handle) = sweep_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Reminder sweep stopped");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
