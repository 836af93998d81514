use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// An explicit level wins; otherwise RUST_LOG is honored, falling back to
/// `info`.
pub fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
