//! Logging infrastructure - structured tracing throughout the runtime
//!
//! Design: Uses `tracing` for structured, contextual logging with:
//! - Configurable log level, overridable per target through `RUST_LOG`
//! - Zero-cost when no subscriber is installed
//! - Console output (human-readable or JSON) plus an optional log file
//!
//! The runtime never installs a subscriber on its own; hosts call [`init`]
//! (or `kindrt_runtime_init`) when they want output.

use once_cell::sync::{Lazy, OnceCell};
use parking_lot::Mutex;
use std::io;
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

// Re-export tracing macros for use throughout the runtime
pub use tracing::{debug, error, info, trace, warn};

static LOGGER_INITIALIZED: OnceCell<()> = OnceCell::new();

/// Keeps the file writer's worker alive until [`shutdown`]
static FILE_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

const DEFAULT_LOG_FILE: &str = "kindrt.log";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Default log level
    pub level: Level,
    /// Log file path, in addition to stderr
    pub log_path: Option<String>,
    /// Enable JSON format (vs human-readable)
    pub json_format: bool,
    /// Show span events (enter/exit)
    pub show_spans: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            log_path: None,
            json_format: false,
            show_spans: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // KINDRT_LOG_LEVEL: trace, debug, info, warn, error
        if let Ok(level_str) = std::env::var("KINDRT_LOG_LEVEL") {
            config.level = parse_level(&level_str).unwrap_or(Level::INFO);
        }

        // KINDRT_LOG_FILE: path to log file
        if let Ok(path) = std::env::var("KINDRT_LOG_FILE") {
            if !path.is_empty() {
                config.log_path = Some(path);
            }
        }

        config.json_format = std::env::var("KINDRT_LOG_JSON").is_ok();
        config.show_spans = std::env::var("KINDRT_LOG_SPANS").is_ok();

        config
    }

    /// Create debug config (verbose logging)
    pub fn debug() -> Self {
        Self {
            level: Level::TRACE,
            log_path: Some(DEFAULT_LOG_FILE.to_string()),
            json_format: false,
            show_spans: true,
        }
    }
}

pub(crate) fn parse_level(value: &str) -> Option<Level> {
    match value.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Initialize logging with configuration from the environment
pub fn init() {
    init_with_config(&LogConfig::from_env());
}

/// Initialize logging with custom configuration (first call wins)
pub fn init_with_config(config: &LogConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("kindrt={}", config.level.as_str().to_lowercase()))
        });

        let span_events = || {
            if config.show_spans {
                FmtSpan::ENTER | FmtSpan::CLOSE
            } else {
                FmtSpan::NONE
            }
        };

        let console = (!config.json_format).then(|| {
            fmt::layer()
                .with_writer(io::stderr)
                .with_span_events(span_events())
                .with_target(true)
                .with_thread_ids(cfg!(debug_assertions))
                .with_line_number(cfg!(debug_assertions))
        });

        let json = config.json_format.then(|| {
            fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_span_events(span_events())
        });

        let file = config.log_path.as_deref().map(|path| {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(path));
            *FILE_GUARD.lock() = Some(guard);
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_span_events(span_events())
        });

        // Ignore error if the host already installed a subscriber
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(console)
            .with(json)
            .with(file)
            .try_init();
    });
}

fn file_appender(path: &str) -> tracing_appender::rolling::RollingFileAppender {
    let path = Path::new(path);
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.into());

    tracing_appender::rolling::never(directory, file_name)
}

/// Check if logging is initialized
pub fn is_initialized() -> bool {
    LOGGER_INITIALIZED.get().is_some()
}

/// Flush and stop the log file writer
pub fn shutdown() {
    drop(FILE_GUARD.lock().take());
}

// ============================================================================
// Runtime-specific logging functions
// ============================================================================

/// Log memory allocation
#[inline]
pub fn log_allocation(size: usize, ptr: *const u8) {
    trace!(
        event = "allocation",
        size_bytes = size,
        address = ?ptr,
        "Memory allocated"
    );
}

/// Log memory deallocation
#[inline]
pub fn log_deallocation(ptr: *const u8) {
    trace!(
        event = "deallocation",
        address = ?ptr,
        "Memory deallocated"
    );
}

/// Log FFI function call
#[inline]
pub fn log_ffi_call(fn_name: &str, arg_count: usize) {
    trace!(
        event = "ffi_call",
        function = fn_name,
        args = arg_count,
        "FFI function called"
    );
}

/// Log runtime initialization
pub fn log_runtime_init() {
    info!(event = "runtime_init", "kindrt runtime initializing");
}

/// Log runtime shutdown
pub fn log_runtime_shutdown() {
    info!(event = "runtime_shutdown", "kindrt runtime shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = LogConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(config.log_path.is_none());

        let debug_config = LogConfig::debug();
        assert_eq!(debug_config.level, Level::TRACE);
        assert_eq!(debug_config.log_path.as_deref(), Some(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("TRACE"), Some(Level::TRACE));
        assert_eq!(parse_level(" warn "), Some(Level::WARN));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn test_init_idempotent() {
        init_with_config(&LogConfig::default());
        init_with_config(&LogConfig::default()); // Should not panic
        assert!(is_initialized());
    }
}
