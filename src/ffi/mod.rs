//! C FFI - Stable ABI for generated code
//!
//! Design: thin `extern "C"` wrappers over the global [`Runtime`]:
//! 1. Reference counting (inc, dec, inspection)
//! 2. Dispatch (lookup, apply, method call)
//! 3. Kind registration
//! 4. Object creation, built-ins and the raw allocator
//!
//! There is no error channel across the boundary: every `RuntimeError` is
//! reported through `kindrt_panic` and the process aborts.
//!
//! Ownership convention (documented, not enforced): arguments are borrowed;
//! every returned object is a new reference the caller must release.
//!
//! [`Runtime`]: crate::runtime::Runtime

mod dispatch;
mod kind;
mod object;
mod refcount;

pub use dispatch::{obj_apply, obj_lookup, obj_method_call};
pub use kind::{kindrt_kind_set_apply, kindrt_kind_set_destructor, kindrt_kind_set_member, kindrt_new_kind};
pub use object::{
    kindrt_alloc, kindrt_create_native_function, kindrt_free, kindrt_free_object, kindrt_nil, kindrt_obj_new,
    kindrt_panic, kindrt_set_allocator,
};
pub use refcount::{obj_dec_ref, obj_inc_ref, obj_kind, obj_ref_count};

use crate::error::{Result, RuntimeError};
use crate::object::RawObj;
use core::ffi::c_int;

/// Member name passed as (pointer, length)
///
/// # Safety
/// `ptr` must be valid for `len` bytes (or `len` must be zero).
pub(crate) unsafe fn name_from_raw<'a>(ptr: *const u8, len: u64) -> Result<&'a str> {
    if len == 0 {
        return Ok("");
    }
    if ptr.is_null() {
        return Err(RuntimeError::InvalidName);
    }

    let len = usize::try_from(len).map_err(|_| RuntimeError::InvalidName)?;
    let bytes = core::slice::from_raw_parts(ptr, len);
    core::str::from_utf8(bytes).map_err(|_| RuntimeError::InvalidName)
}

/// Argument array passed as (count, pointer)
///
/// # Safety
/// `args` must be null or valid for `arg_count` elements.
pub(crate) unsafe fn args_from_raw<'a>(arg_count: c_int, args: *const RawObj) -> Result<&'a [RawObj]> {
    if arg_count < 0 {
        return Err(RuntimeError::InvalidArgCount {
            count: i64::from(arg_count),
        });
    }
    if args.is_null() {
        if arg_count == 0 {
            return Ok(&[]);
        }
        return Err(RuntimeError::NullObject { operation: "argument array" });
    }

    // An empty slice still carries the caller's array pointer
    Ok(core::slice::from_raw_parts(args, arg_count as usize))
}
