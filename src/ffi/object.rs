//! Object lifecycle - C API for object creation, built-ins and storage
//!
//! Objects created here start with one reference owned by the caller.

use crate::allocator::{self, AllocFn, FreeFn, RawAllocator};
use crate::builtins::{self, NativeCode, NativeFunction};
use crate::error::{self, Result, RuntimeError};
use crate::fatal;
use crate::object::{self, KindId, RawObj};
use crate::runtime;
use core::ffi::{c_char, CStr};

/// Wrap a native callback in a function object (null is fatal)
#[no_mangle]
pub extern "C" fn kindrt_create_native_function(code: Option<NativeCode>) -> *mut NativeFunction {
    error::or_fatal(create_native_function(code))
}

fn create_native_function(code: Option<NativeCode>) -> Result<*mut NativeFunction> {
    let code = code.ok_or(RuntimeError::NullObject {
        operation: "create_native_function",
    })?;
    builtins::create_native_function(code)
}

/// New reference to the nil singleton
#[no_mangle]
pub extern "C" fn kindrt_nil() -> RawObj {
    runtime::global().nil()
}

/// Allocate an object of `kind` with `payload_size` zeroed bytes after the
/// header
#[no_mangle]
pub extern "C" fn kindrt_obj_new(kind: KindId, payload_size: usize) -> RawObj {
    error::or_fatal(runtime::global().new_object(kind, payload_size))
}

/// Stock destructor: reclaim storage only
///
/// # Safety
/// `obj` must come from the raw allocator and must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn kindrt_free_object(obj: RawObj) {
    object::free_object(obj);
}

/// Allocate raw storage through the installed pair
#[no_mangle]
pub extern "C" fn kindrt_alloc(size: usize) -> *mut u8 {
    unsafe { allocator::allocate(size) }
}

/// Release raw storage through the installed pair
///
/// # Safety
/// `ptr` must come from [`kindrt_alloc`] and must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn kindrt_free(ptr: *mut u8) {
    allocator::release(ptr);
}

/// Replace the raw allocate/free pair
#[no_mangle]
pub extern "C" fn kindrt_set_allocator(alloc: AllocFn, free: FreeFn) {
    allocator::set_allocator(RawAllocator { alloc, free });
}

/// Report a fatal error and abort
///
/// # Safety
/// `message` must be null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn kindrt_panic(message: *const c_char) -> ! {
    if message.is_null() {
        fatal::panic("(no message)");
    }
    fatal::panic(&CStr::from_ptr(message).to_string_lossy())
}
