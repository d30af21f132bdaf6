use crate::logging::DEFAULT_FILTER;

/// Process-wide settings for the ambient stack (logging and profiling).
///
/// Effect tuning lives in the per-crate configs; this only covers what the
/// host sets up once at startup.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub profiling: ProfilingMode,
    /// `EnvFilter` directive string used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            profiling: ProfilingMode::Off,
            log_filter: String::from(DEFAULT_FILTER),
        }
    }
}

impl RuntimeConfig {
    pub fn with_profiling(mut self, profiling: ProfilingMode) -> Self {
        self.profiling = profiling;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingMode {
    /// Scopes are compiled in but not recorded.
    Off,
    /// Scopes are recorded in-process.
    On,
    /// Scopes are recorded and served to `puffin_viewer`
    /// (requires the `profiling-server` feature).
    WithWebServer,
}
