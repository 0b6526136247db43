//! Reference counting - C API for refcount operations
//!
//! Hot path operations with minimal overhead. Null-safe: a null object is a
//! no-op for inc/dec and reads as zero.

use crate::error;
use crate::object::{header, KindId, RawObj};
use crate::runtime;

/// Increment reference count
///
/// # Safety
/// `obj` must be null or a live object.
#[no_mangle]
pub unsafe extern "C" fn obj_inc_ref(obj: RawObj) {
    runtime::global().inc_ref(obj);
}

/// Decrement reference count, destroying the object when it reaches zero
///
/// # Safety
/// `obj` must be null or a live object. Aborts on underflow.
#[no_mangle]
pub unsafe extern "C" fn obj_dec_ref(obj: RawObj) {
    error::or_fatal(runtime::global().dec_ref(obj));
}

/// Current reference count (for debugging/testing)
///
/// # Safety
/// `obj` must be null or a live object.
#[no_mangle]
pub unsafe extern "C" fn obj_ref_count(obj: RawObj) -> i64 {
    if obj.is_null() {
        return 0;
    }
    header(obj).ref_count()
}

/// Kind of an object
///
/// # Safety
/// `obj` must be null or a live object.
#[no_mangle]
pub unsafe extern "C" fn obj_kind(obj: RawObj) -> KindId {
    if obj.is_null() {
        return 0;
    }
    header(obj).kind()
}
