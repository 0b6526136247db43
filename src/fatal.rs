//! Fatal-error reporter
//!
//! A violated runtime invariant is the equivalent of a corrupted heap: there
//! is nothing to unwind to. The message goes to stderr and the process aborts.

use crate::logging::error;
use std::io::Write;

/// Write `Panic: <message>` to stderr and abort the process.
#[cold]
#[inline(never)]
pub fn panic(message: &str) -> ! {
    error!(event = "fatal", reason = message, "Runtime invariant violated");
    crate::logging::shutdown();

    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = writeln!(handle, "Panic: {}", message);
    let _ = handle.flush();

    std::process::abort()
}
