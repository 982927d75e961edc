use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or unparsable. The game screen shares the
/// terminal with stderr, so only warnings and errors get through by default.
pub const DEFAULT_LOG_DIRECTIVE: &str = "warn";

/// Build the log filter from an optional `RUST_LOG`-style directive
pub fn log_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

/// Install the fmt subscriber on stderr, stdout belongs to the game screen
pub fn init() {
    let directive = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(directive.as_deref()))
        .init();
}
