//! Logging setup.
//!
//! `RUST_LOG` takes precedence over the settings file's `logging.level`.
//! Logs go to stderr so JSON output on stdout stays clean.

use crate::config::LoggingCfg;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize the global subscriber. Only the first call has an effect.
pub fn init_with_config(config: &LoggingCfg) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("warn"))
        };
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

pub fn init() {
    init_with_config(&LoggingCfg::default());
}
