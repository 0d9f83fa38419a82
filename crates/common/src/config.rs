use crate::FreshnessMode;

/// All configuration loaded from environment variables at startup.
/// Missing required variables cause an immediate panic with a clear message,
/// before any network activity.
#[derive(Debug, Clone)]
pub struct Config {
    // Quote provider
    pub api_key: String,

    // SMTP
    pub smtp_server: String,
    pub smtp_port: u16,
    pub email_user: String,
    pub email_password: String,
    pub recipient_email: String,

    // Limits file
    pub limits_path: String,

    // Evaluation
    pub freshness_mode: FreshnessMode,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any missing required variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let freshness_mode = match optional_env("FRESHNESS_MODE")
            .map(|v| v.to_lowercase())
            .as_deref()
        {
            None | Some("day-of-month") => FreshnessMode::DayOfMonth,
            Some("full-date") => FreshnessMode::FullDate,
            Some(other) => panic!(
                "ERROR: FRESHNESS_MODE must be 'day-of-month' or 'full-date', got: '{other}'"
            ),
        };

        Config {
            api_key: required_env("API_KEY"),
            smtp_server: required_env("SMTP_SERVER"),
            smtp_port: optional_env("SMTP_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            email_user: required_env("EMAIL_USER"),
            email_password: required_env("EMAIL_PASSWORD"),
            recipient_email: required_env("RECIPIENT_EMAIL"),
            limits_path: optional_env("LIMITS_PATH")
                .unwrap_or_else(|| "configuration/limits.json".to_string()),
            freshness_mode,
        }
    }
}

fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        panic!("Required environment variable '{key}' is not set. Check your .env file.")
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
