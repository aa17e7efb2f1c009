use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Bearer secret that marks a `GET` sweep as a cron invocation.
    pub cron_secret: Option<String>,
    /// Public URL of the customer portal, used to build payment links.
    pub public_base_url: String,
    /// Interval of the in-process reminder sweep; `None` disables it.
    pub sweep_interval: Option<Duration>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                 |
    /// |---------------------------------|-------------------------|
    /// | `HOST`                          | `0.0.0.0`               |
    /// | `PORT`                          | `3000`                  |
    /// | `CORS_ORIGINS`                  | `*`                     |
    /// | `REQUEST_TIMEOUT_SECS`          | `30`                    |
    /// | `CRON_SECRET`                   | unset                   |
    /// | `PUBLIC_BASE_URL`               | `http://localhost:5173` |
    /// | `REMINDER_SWEEP_INTERVAL_HOURS` | unset (disabled)        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let cron_secret = std::env::var("CRON_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5173".into());

        let sweep_interval = std::env::var("REMINDER_SWEEP_INTERVAL_HOURS")
            .ok()
            .map(|v| {
                v.parse::<u64>()
                    .expect("REMINDER_SWEEP_INTERVAL_HOURS must be a valid u64")
            })
            .filter(|hours| *hours > 0)
            .map(|hours| Duration::from_secs(hours * 3600));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            cron_secret,
            public_base_url,
            sweep_interval,
        }
    }

    /// Whether any origin may call the API.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_filtered() {
        assert_eq!(
            parse_origins(" https://a.nl , ,https://b.nl"),
            vec!["https://a.nl", "https://b.nl"]
        );
    }

    #[test]
    fn wildcard_allows_any_origin() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec!["*".into()],
            request_timeout_secs: 30,
            cron_secret: None,
            public_base_url: "http://localhost:5173".into(),
            sweep_interval: None,
        };
        assert!(config.allows_any_origin());
    }
}
