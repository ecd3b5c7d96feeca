use crate::config::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Parses `directives`, falling back to the default filter with a warning.
pub fn build_filter(directives: &str) -> (EnvFilter, Option<String>) {
    match EnvFilter::try_new(directives) {
        Ok(filter) => (filter, None),
        Err(err) => (
            EnvFilter::new(DEFAULT_LOG_FILTER),
            Some(format!(
                "invalid log filter {directives:?} ({err}), using {DEFAULT_LOG_FILTER:?}"
            )),
        ),
    }
}

/// Installs the global fmt subscriber writing to stderr. Fails when a global
/// subscriber is already set.
pub fn init(directives: &str) -> Result<Option<String>, TryInitError> {
    let (filter, warning) = build_filter(directives);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
        .try_init()?;
    Ok(warning)
}
