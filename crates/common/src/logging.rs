//! Logging and tracing initialization.
//!
//! Logs go to stderr so CLI reports on stdout stay machine-readable.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Targets raised to `debug` by `--verbose`.
const FLOATFX_TARGETS: [&str; 4] = ["floatfx", "floatfx_common", "floatfx_core", "floatfx_driver"];

/// Filter directive for the configured level, with the floatfx crates raised
/// to `debug` when `verbose` is set.
pub fn filter_directive(config: &LoggingConfig, verbose: bool) -> String {
    if !verbose {
        return config.level.clone();
    }
    let mut directive = config.level.clone();
    for target in FLOATFX_TARGETS {
        directive.push_str(&format!(",{target}=debug"));
    }
    directive
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Later calls leave
/// the first subscriber in place.
pub fn init_logging(config: &LoggingConfig, verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config, verbose)));

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(verbose)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}
