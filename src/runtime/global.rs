//! Process-wide runtime used by the C ABI

use super::Runtime;
use crate::config::RuntimeConfig;
use once_cell::sync::Lazy;

static GLOBAL: Lazy<Runtime> = Lazy::new(|| Runtime::with_config(RuntimeConfig::from_env()));

/// The runtime behind every `extern "C"` entry point
///
/// Bootstrapped on first use, or explicitly by `kindrt_runtime_init`.
#[inline]
pub fn global() -> &'static Runtime {
    &GLOBAL
}
