//! Per-kind capabilities - what happens on destruction and on application
//!
//! Each slot is one of: nothing registered, a native (C ABI) callback, or a
//! Rust closure. Native callbacks are what generated code registers; closures
//! let Rust hosts define kinds without going through `extern "C"`.

use crate::error::Result;
use crate::object::RawObj;
use crate::runtime::Runtime;
use core::ffi::c_int;
use core::fmt;
use std::sync::Arc;

/// Native destructor: release the object's fields, then its storage
pub type DestructorFn = unsafe extern "C" fn(obj: RawObj);

/// Native apply: `(self, arg_count, args) -> new reference`
pub type ApplyFn = unsafe extern "C" fn(callee: RawObj, arg_count: c_int, args: *const RawObj) -> RawObj;

pub type DestructorClosure = Arc<dyn Fn(&Runtime, RawObj) + Send + Sync>;
pub type ApplyClosure = Arc<dyn Fn(&Runtime, RawObj, &[RawObj]) -> Result<RawObj> + Send + Sync>;

/// Last-reference behavior of a kind
#[derive(Clone, Default)]
pub enum Destructor {
    /// Nothing runs; the storage is not reclaimed by this path
    #[default]
    Noop,
    Native(DestructorFn),
    Custom(DestructorClosure),
}

impl Destructor {
    pub fn custom(f: impl Fn(&Runtime, RawObj) + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Map a nullable C callback onto a slot
    #[inline]
    pub fn from_native(f: Option<DestructorFn>) -> Self {
        f.map_or(Self::Noop, Self::Native)
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop)
    }
}

/// Call behavior of a kind
#[derive(Clone, Default)]
pub enum Apply {
    /// Not directly callable: dispatch goes through the `__call__` member
    #[default]
    ViaCallMember,
    Native(ApplyFn),
    Custom(ApplyClosure),
}

impl Apply {
    pub fn custom(
        f: impl Fn(&Runtime, RawObj, &[RawObj]) -> Result<RawObj> + Send + Sync + 'static,
    ) -> Self {
        Self::Custom(Arc::new(f))
    }

    #[inline]
    pub fn from_native(f: Option<ApplyFn>) -> Self {
        f.map_or(Self::ViaCallMember, Self::Native)
    }

    pub fn is_direct(&self) -> bool {
        !matches!(self, Self::ViaCallMember)
    }
}

impl fmt::Debug for Destructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Noop => f.write_str("Noop"),
            Self::Native(func) => f.debug_tuple("Native").field(&(*func as *const ())).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl fmt::Debug for Apply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ViaCallMember => f.write_str("ViaCallMember"),
            Self::Native(func) => f.debug_tuple("Native").field(&(*func as *const ())).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
