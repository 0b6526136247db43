//! Runtime invariant violations
//!
//! Every variant describes a bug in generated code or in the registration
//! bootstrap. Inside the crate they travel as `Result`s; the C ABI turns
//! each one into a fatal abort (see [`crate::fatal`]).

use crate::object::KindId;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    UnregisteredKind { kind: KindId },
    UnregisteredMember { kind: KindId, name: String },
    RefCountUnderflow { kind: KindId, count: i64 },
    Uncallable { kind: KindId },
    DuplicateKind { kind: KindId },
    CallDepthExceeded { depth: usize },
    NullObject { operation: &'static str },
    InvalidName,
    InvalidArgCount { count: i64 },
    AllocationFailed { size: usize },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnregisteredKind { kind } => {
                write!(f, "Unregistered kind: {}", kind)
            }
            Self::UnregisteredMember { kind, name } => {
                write!(f, "Kind {} has no member '{}'", kind, name)
            }
            Self::RefCountUnderflow { kind, count } => {
                write!(f, "Negative reference count! (kind {}, count {})", kind, count)
            }
            Self::Uncallable { kind } => {
                write!(f, "Object of kind {} is not callable", kind)
            }
            Self::DuplicateKind { kind } => {
                write!(f, "Kind {} is already registered", kind)
            }
            Self::CallDepthExceeded { depth } => {
                write!(f, "__call__ chain exceeded depth {}", depth)
            }
            Self::NullObject { operation } => {
                write!(f, "Null object passed to {}", operation)
            }
            Self::InvalidName => {
                write!(f, "Member name is not valid UTF-8")
            }
            Self::InvalidArgCount { count } => {
                write!(f, "Invalid argument count: {}", count)
            }
            Self::AllocationFailed { size } => {
                write!(f, "Allocation of {} bytes failed", size)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

pub type Result<T> = std::result::Result<T, RuntimeError>;

impl RuntimeError {
    /// Abort the process with this error as the diagnostic.
    pub fn fatal(&self) -> ! {
        crate::fatal::panic(&self.to_string())
    }
}

/// Unwrap a runtime result, aborting the process on error.
#[inline]
pub fn or_fatal<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => err.fatal(),
    }
}
