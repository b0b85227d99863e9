//! Logging initialization and configuration.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Crates that log at the configured level. Everything else stays at `warn`.
const HEGIRA_TARGETS: [&str; 4] = ["hegira", "hegira_app", "domain", "shared"];

/// Filter directives for a configured level.
///
/// A bare level such as `debug` is scoped to the Hegira crates so config
/// loading and other dependencies stay quiet. A value that already carries
/// directives (`domain=trace,warn`) is used as written.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    std::iter::once("warn".to_string())
        .chain(HEGIRA_TARGETS.iter().map(|target| format!("{}={}", target, level)))
        .collect::<Vec<_>>()
        .join(",")
}

fn span_events(config: &LoggingConfig) -> FmtSpan {
    if config.span_events {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

/// Initializes the logging subsystem based on configuration.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(&config.level)));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            let json_layer = fmt::layer()
                .json()
                .with_span_events(span_events(config))
                .with_current_span(true)
                .with_target(true);
            subscriber.with(json_layer).init();
        }
        "compact" => {
            let compact_layer = fmt::layer()
                .compact()
                .with_span_events(span_events(config))
                .with_target(false);
            subscriber.with(compact_layer).init();
        }
        _ => {
            let pretty_layer = fmt::layer()
                .pretty()
                .with_span_events(span_events(config))
                .with_target(true);
            subscriber.with(pretty_layer).init();
        }
    }
}
