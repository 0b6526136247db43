//! Dispatch - C API for lookup, application and method calls

use super::{args_from_raw, name_from_raw};
use crate::error::{self, Result};
use crate::logging::log_ffi_call;
use crate::object::RawObj;
use crate::runtime;
use core::ffi::c_int;

/// New reference to the member `name` of `obj`'s kind
///
/// # Safety
/// `obj` must be a live object; `name` must be valid for `name_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn obj_lookup(obj: RawObj, name: *const u8, name_len: u64) -> RawObj {
    error::or_fatal(lookup(obj, name, name_len))
}

unsafe fn lookup(obj: RawObj, name: *const u8, name_len: u64) -> Result<RawObj> {
    let name = name_from_raw(name, name_len)?;
    runtime::global().lookup(obj, name)
}

/// Apply `fn_obj` to `arg_count` arguments; the result is a new reference
///
/// # Safety
/// `fn_obj` must be a live object; `args` must hold `arg_count` live objects.
#[no_mangle]
pub unsafe extern "C" fn obj_apply(fn_obj: RawObj, arg_count: c_int, args: *const RawObj) -> RawObj {
    error::or_fatal(apply(fn_obj, arg_count, args))
}

unsafe fn apply(fn_obj: RawObj, arg_count: c_int, args: *const RawObj) -> Result<RawObj> {
    let args = args_from_raw(arg_count, args)?;
    log_ffi_call("obj_apply", args.len());
    runtime::global().apply(fn_obj, args)
}

/// Call the member `name` of `obj` with `arg_count` arguments
///
/// # Safety
/// As for [`obj_lookup`] and [`obj_apply`].
#[no_mangle]
pub unsafe extern "C" fn obj_method_call(
    obj: RawObj,
    name: *const u8,
    name_len: u64,
    arg_count: c_int,
    args: *const RawObj,
) -> RawObj {
    error::or_fatal(method_call(obj, name, name_len, arg_count, args))
}

unsafe fn method_call(
    obj: RawObj,
    name: *const u8,
    name_len: u64,
    arg_count: c_int,
    args: *const RawObj,
) -> Result<RawObj> {
    let name = name_from_raw(name, name_len)?;
    let args = args_from_raw(arg_count, args)?;
    log_ffi_call("obj_method_call", args.len());
    runtime::global().method_call(obj, name, args)
}
