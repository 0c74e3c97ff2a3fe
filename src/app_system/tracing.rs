use tracing_subscriber::EnvFilter;

/// Installs the global subscriber: compact lines with uptime timestamps.
///
/// `RUST_LOG` wins over `default_filter`. Calling this again is a no-op.
pub fn setup_tracing(default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .try_init();
}
