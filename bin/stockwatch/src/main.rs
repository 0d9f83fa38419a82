use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use alerts::BatchRunner;
use common::{Config, LimitsConfig};
use notify::SmtpNotifier;
use quotes::AlphaVantageClient;

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config (must be complete before any network activity) ────────────────
    let cfg = Config::from_env();
    let limits = LimitsConfig::load(&cfg.limits_path);
    info!(
        symbols = limits.len(),
        freshness = %cfg.freshness_mode,
        "stockwatch starting"
    );

    // ── Adapters ─────────────────────────────────────────────────────────────
    let source = AlphaVantageClient::new(&cfg.api_key);
    let notifier = match SmtpNotifier::new(
        &cfg.smtp_server,
        cfg.smtp_port,
        &cfg.email_user,
        &cfg.email_password,
    ) {
        Ok(notifier) => notifier,
        Err(e) => {
            error!(error = %e, "Failed to set up SMTP notifier");
            std::process::exit(1);
        }
    };

    // ── Batch run ────────────────────────────────────────────────────────────
    let runner = BatchRunner::new(
        &source,
        &notifier,
        &limits,
        &cfg.recipient_email,
        cfg.freshness_mode,
    );
    let summary = runner.run(Utc::now().date_naive()).await;

    if summary.has_failures() {
        error!(
            failed_symbols = summary.symbols_failed,
            failed_sends = summary.sends_failed,
            "Batch finished with failures"
        );
        std::process::exit(1);
    }
}
