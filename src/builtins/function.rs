//! Native function - a heap object wrapping a host callback
//!
//! The kind's apply slot forwards straight to the wrapped code with the
//! caller's argument count and array, and hands back whatever it returns.

use super::KIND_FUNCTION;
use crate::error::Result;
use crate::object::{self, ObjHeader, RawObj};
use core::ffi::c_int;

/// Host callback: `(self, arg_count, args) -> new reference`
pub type NativeCode =
    unsafe extern "C" fn(function: *mut NativeFunction, arg_count: c_int, args: *const RawObj) -> RawObj;

#[repr(C)]
pub struct NativeFunction {
    pub header: ObjHeader,
    pub code: NativeCode,
}

impl NativeFunction {
    #[inline]
    pub fn as_obj(function: *mut NativeFunction) -> RawObj {
        function as RawObj
    }
}

/// Wrap `code` in a function object holding one reference
pub fn create_native_function(code: NativeCode) -> Result<*mut NativeFunction> {
    unsafe {
        object::allocate(NativeFunction {
            header: ObjHeader::new(KIND_FUNCTION),
            code,
        })
    }
}

/// Apply slot of the native function kind
pub(super) unsafe extern "C" fn native_function_apply(
    callee: RawObj,
    arg_count: c_int,
    args: *const RawObj,
) -> RawObj {
    let function = callee as *mut NativeFunction;
    ((*function).code)(function, arg_count, args)
}
