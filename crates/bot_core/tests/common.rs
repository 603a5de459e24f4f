use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static START: Once = Once::new();

/// Initialize test environment: dotenv and tracing (stderr).
/// Idempotent: safe to call multiple times.
pub fn init() {
    START.call_once(|| {
        let _ = dotenvy::dotenv();
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .expect("env filter");

        let _ = fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init();

        tracing::info!(target: "test_init", "Test tracing initialized (stderr)");
    });
}
