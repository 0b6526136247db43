//! Runtime configuration
//!
//! Read once when a runtime is bootstrapped. The process-wide runtime takes
//! its settings from the environment:
//! - `KINDRT_MAX_CALL_DEPTH`: cap on `__call__` hops (`0` or `none` disables it)
//! - `KINDRT_LOG_*`: see [`LogConfig::from_env`]

use crate::logging::LogConfig;

/// Default cap on `__call__` re-dispatch hops
pub const DEFAULT_MAX_CALL_DEPTH: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Maximum number of `__call__` hops in one application, `None` for no cap
    pub max_call_depth: Option<usize>,
    pub log: LogConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            log: LogConfig::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        let mut config = Self {
            log: LogConfig::from_env(),
            ..Self::default()
        };

        if let Ok(value) = std::env::var("KINDRT_MAX_CALL_DEPTH") {
            if let Some(depth) = parse_call_depth(&value) {
                config.max_call_depth = depth;
            }
        }

        config
    }

    pub fn with_max_call_depth(mut self, max_call_depth: Option<usize>) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }
}

/// `Some(None)` disables the cap, `None` means the value was not understood
fn parse_call_depth(value: &str) -> Option<Option<usize>> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") {
        return Some(None);
    }

    match value.parse::<usize>().ok()? {
        0 => Some(None),
        depth => Some(Some(depth)),
    }
}
