//! Owned object handle
//!
//! Scope-based ownership on top of the manual protocol: creating a handle
//! adopts or takes a reference, cloning takes another one and dropping gives
//! one back. Rust-side code never has to pair increments and decrements.

use super::header::{header, KindId, ObjHeader, RawObj};
use crate::error::{self, Result, RuntimeError};
use crate::runtime::Runtime;
use core::fmt;
use core::ptr::NonNull;

/// One counted reference to a heap object, tied to the runtime that
/// dispatches on it
pub struct ObjRef<'rt> {
    ptr: NonNull<ObjHeader>,
    runtime: &'rt Runtime,
}

impl<'rt> ObjRef<'rt> {
    /// Take over a reference the caller already owns (no increment)
    ///
    /// # Safety
    /// `obj` must be null or a live object, and the caller must own one of
    /// its references, which is transferred to the handle.
    #[inline]
    pub unsafe fn from_owned(runtime: &'rt Runtime, obj: RawObj) -> Option<Self> {
        NonNull::new(obj).map(|ptr| Self { ptr, runtime })
    }

    /// Take a new reference to a borrowed object (increments)
    ///
    /// # Safety
    /// `obj` must be null or a live object.
    #[inline]
    pub unsafe fn from_borrowed(runtime: &'rt Runtime, obj: RawObj) -> Option<Self> {
        let handle = Self::from_owned(runtime, obj)?;
        runtime.inc_ref(obj);
        Some(handle)
    }

    /// Adopt the result of a runtime operation, rejecting null
    unsafe fn adopt(runtime: &'rt Runtime, obj: RawObj, operation: &'static str) -> Result<Self> {
        Self::from_owned(runtime, obj).ok_or(RuntimeError::NullObject { operation })
    }

    #[inline]
    pub fn as_ptr(&self) -> RawObj {
        self.ptr.as_ptr()
    }

    /// Give up the handle without releasing its reference
    #[inline]
    pub fn into_raw(self) -> RawObj {
        let ptr = self.ptr.as_ptr();
        core::mem::forget(self);
        ptr
    }

    #[inline]
    pub fn runtime(&self) -> &'rt Runtime {
        self.runtime
    }

    #[inline]
    pub fn ref_count(&self) -> i64 {
        unsafe { header(self.as_ptr()).ref_count() }
    }

    #[inline]
    pub fn kind(&self) -> KindId {
        unsafe { header(self.as_ptr()).kind() }
    }

    /// Look up a member of this object's kind
    pub fn lookup(&self, name: &str) -> Result<ObjRef<'rt>> {
        unsafe {
            let member = self.runtime.lookup(self.as_ptr(), name)?;
            Self::adopt(self.runtime, member, "lookup")
        }
    }

    /// Apply this object to `args`
    pub fn call(&self, args: &[&ObjRef<'_>]) -> Result<ObjRef<'rt>> {
        let raw: Vec<RawObj> = args.iter().map(|arg| arg.as_ptr()).collect();
        unsafe {
            let result = self.runtime.apply(self.as_ptr(), &raw)?;
            Self::adopt(self.runtime, result, "apply")
        }
    }

    /// Call the member `name` with `args`
    pub fn method_call(&self, name: &str, args: &[&ObjRef<'_>]) -> Result<ObjRef<'rt>> {
        let raw: Vec<RawObj> = args.iter().map(|arg| arg.as_ptr()).collect();
        unsafe {
            let result = self.runtime.method_call(self.as_ptr(), name, &raw)?;
            Self::adopt(self.runtime, result, "method_call")
        }
    }
}

impl Clone for ObjRef<'_> {
    #[inline]
    fn clone(&self) -> Self {
        unsafe { self.runtime.inc_ref(self.as_ptr()) };
        Self {
            ptr: self.ptr,
            runtime: self.runtime,
        }
    }
}

impl Drop for ObjRef<'_> {
    #[inline]
    fn drop(&mut self) {
        error::or_fatal(unsafe { self.runtime.dec_ref(self.as_ptr()) });
    }
}

impl PartialEq for ObjRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl Eq for ObjRef<'_> {}

impl fmt::Debug for ObjRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjRef")
            .field("address", &self.ptr)
            .field("kind", &self.kind())
            .field("ref_count", &self.ref_count())
            .finish()
    }
}

impl Runtime {
    /// Owned handle to the nil singleton
    pub fn nil_ref(&self) -> ObjRef<'_> {
        ObjRef {
            ptr: unsafe { NonNull::new_unchecked(self.nil()) },
            runtime: self,
        }
    }
}
