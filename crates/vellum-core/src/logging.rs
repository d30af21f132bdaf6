use tracing_subscriber::EnvFilter;

use crate::config::RuntimeConfig;

/// Default filter: our crates at `info`, chatty dependencies at `warn`.
pub const DEFAULT_FILTER: &str = "info,cosmic_text=warn,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Install the global fmt subscriber with [`DEFAULT_FILTER`].
///
/// `RUST_LOG` takes precedence when set.
pub fn init() {
    init_with(&RuntimeConfig::default());
}

/// Install the global fmt subscriber using the filter from `config`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_with(config: &RuntimeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}
