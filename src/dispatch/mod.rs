//! Dispatch engine - attribute lookup, application and method calls
//!
//! Everything is resolved through the kind of the receiving object. Members
//! belong to the kind, never to an instance.
//!
//! Application of an object without a direct apply behavior re-dispatches
//! on its kind's `__call__` member. The chain is followed iteratively; a
//! `__call__` that leads back to the same shape of object loops until the
//! configured depth cap (if any) is hit.


use crate::error::{Result, RuntimeError};
use crate::kind::Apply;
use crate::logging::trace;
use crate::object::{header, KindId, RawObj};
use crate::runtime::Runtime;
use core::ffi::c_int;

/// Member consulted when an object's kind has no apply behavior
pub const CALL_MEMBER: &str = "__call__";

impl Runtime {
    /// New reference to the member `name` of `obj`'s kind
    ///
    /// # Safety
    /// `obj` must be a live object.
    pub unsafe fn lookup(&self, obj: RawObj, name: &str) -> Result<RawObj> {
        let kind = non_null(obj, "lookup")?;
        let member = self.kinds().member(kind, name)?;

        self.inc_ref(member);
        trace!(event = "lookup", kind, member = name);
        Ok(member)
    }

    /// Invoke `callee` with `args`, returning the reference produced by the
    /// apply behavior unmodified
    ///
    /// # Safety
    /// `callee` and every element of `args` must be live objects.
    pub unsafe fn apply(&self, callee: RawObj, args: &[RawObj]) -> Result<RawObj> {
        let mut target = callee;
        let mut depth = 0usize;

        loop {
            let kind = non_null(target, "apply")?;

            match self.kinds().apply(kind)? {
                Apply::Native(apply_fn) => {
                    trace!(event = "apply", kind, args = args.len(), depth);
                    let arg_count = c_int::try_from(args.len()).map_err(|_| RuntimeError::InvalidArgCount {
                        count: args.len() as i64,
                    })?;
                    return Ok(apply_fn(target, arg_count, args.as_ptr()));
                }
                Apply::Custom(apply_fn) => {
                    trace!(event = "apply", kind, args = args.len(), depth);
                    return apply_fn(self, target, args);
                }
                Apply::ViaCallMember => {
                    target = match self.kinds().member(kind, CALL_MEMBER) {
                        Ok(call) => call,
                        Err(RuntimeError::UnregisteredMember { .. }) => {
                            return Err(RuntimeError::Uncallable { kind });
                        }
                        Err(err) => return Err(err),
                    };

                    depth += 1;
                    if let Some(limit) = self.config().max_call_depth {
                        if depth > limit {
                            return Err(RuntimeError::CallDepthExceeded { depth: limit });
                        }
                    }
                }
            }
        }
    }

    /// `apply(lookup(obj, name), args)`
    ///
    /// The looked-up reference is held for the duration of the application
    /// and released once it returns, whether or not it succeeded.
    ///
    /// # Safety
    /// `obj` and every element of `args` must be live objects.
    pub unsafe fn method_call(&self, obj: RawObj, name: &str, args: &[RawObj]) -> Result<RawObj> {
        let kind = non_null(obj, "method_call")?;
        let method = self.lookup(obj, name)?;

        trace!(event = "method_call", kind, member = name, args = args.len());
        let result = self.apply(method, args);
        self.dec_ref(method)?;
        result
    }
}

/// Kind of a receiver that must not be null
#[inline]
unsafe fn non_null(obj: RawObj, operation: &'static str) -> Result<KindId> {
    if obj.is_null() {
        return Err(RuntimeError::NullObject { operation });
    }
    Ok(header(obj).kind())
}
