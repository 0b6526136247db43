//! Reference counting - increment, decrement and last-reference destruction
//!
//! Hot path operations are inlined; destruction is kept out of line.

use super::Runtime;
use crate::error::{Result, RuntimeError};
use crate::kind::Destructor;
use crate::logging::trace;
use crate::object::{header, RawObj};

impl Runtime {
    /// Record a new, independent reference to `obj` (null is a no-op)
    ///
    /// # Safety
    /// `obj` must be null or a live object.
    #[inline(always)]
    pub unsafe fn inc_ref(&self, obj: RawObj) {
        if obj.is_null() {
            return;
        }

        header(obj).increment();
    }

    /// Release one reference to `obj`, destroying it when none remain
    ///
    /// A count that goes negative is reported as an underflow and the object
    /// is left alone.
    ///
    /// # Safety
    /// `obj` must be null or a live object; after the last reference is
    /// released the caller must not touch it again.
    #[inline(always)]
    pub unsafe fn dec_ref(&self, obj: RawObj) -> Result<()> {
        if obj.is_null() {
            return Ok(());
        }

        let header = header(obj);
        let remaining = header.decrement();

        if remaining > 0 {
            return Ok(());
        }

        if remaining < 0 {
            return Err(RuntimeError::RefCountUnderflow {
                kind: header.kind(),
                count: remaining,
            });
        }

        self.destroy(obj)
    }

    /// Run the kind's destructor on an object with no references left
    #[cold]
    #[inline(never)]
    unsafe fn destroy(&self, obj: RawObj) -> Result<()> {
        let kind = header(obj).kind();
        let destructor = self.kinds().destructor(kind)?;

        trace!(event = "object_destroy", kind, address = ?obj, count = 0);

        match destructor {
            Destructor::Noop => {}
            Destructor::Native(drop_fn) => drop_fn(obj),
            Destructor::Custom(drop_fn) => drop_fn(self, obj),
        }

        Ok(())
    }
}
