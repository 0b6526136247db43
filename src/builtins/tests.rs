//! Tests for built-in kinds

use super::*;
use crate::error::RuntimeError;
use crate::object::header;
use crate::runtime::Runtime;
use core::ffi::c_int;
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ARG_COUNT: AtomicI64 = AtomicI64::new(-1);

unsafe extern "C" fn count_args(function: *mut NativeFunction, arg_count: c_int, _args: *const RawObj) -> RawObj {
    LAST_ARG_COUNT.store(i64::from(arg_count), Ordering::SeqCst);
    // Return ourselves, obeying the new-reference protocol
    let obj = NativeFunction::as_obj(function);
    header(obj).increment();
    obj
}

#[test]
fn test_native_function_layout() {
    let function = create_native_function(count_args).unwrap();
    unsafe {
        let obj = NativeFunction::as_obj(function);
        assert_eq!(header(obj).kind(), KIND_FUNCTION);
        assert_eq!(header(obj).ref_count(), 1);
        assert_eq!((*function).code as usize, count_args as usize);
        object::free_object(obj);
    }
}

#[test]
fn test_native_function_apply_forwards() {
    let rt = Runtime::new();
    let function = NativeFunction::as_obj(create_native_function(count_args).unwrap());
    let nil = rt.nil();

    unsafe {
        let result = rt.apply(function, &[nil, nil, nil]).unwrap();
        assert_eq!(LAST_ARG_COUNT.load(Ordering::SeqCst), 3);
        assert_eq!(result, function);
        assert_eq!(rt.ref_count(function), 2);

        rt.dec_ref(result).unwrap();
        rt.dec_ref(nil).unwrap();
        // Last reference: the function kind's destructor frees it
        rt.dec_ref(function).unwrap();
    }
}

#[test]
fn test_function_kind_descriptor() {
    let rt = Runtime::new();
    assert!(rt.kinds().apply(KIND_FUNCTION).unwrap().is_direct());
    assert!(!rt.kinds().destructor(KIND_FUNCTION).unwrap().is_noop());
    assert!(rt.kinds().member_names(KIND_FUNCTION).unwrap().is_empty());
}

#[test]
fn test_nil_kind_is_inert() {
    let rt = Runtime::new();
    assert!(rt.kinds().member_names(KIND_NIL).unwrap().is_empty());
    assert!(rt.kinds().destructor(KIND_NIL).unwrap().is_noop());

    let nil = rt.nil();
    unsafe {
        assert_eq!(rt.lookup(nil, "anything").unwrap_err(), RuntimeError::UnregisteredMember {
            kind: KIND_NIL,
            name: "anything".to_string(),
        });
        assert_eq!(rt.apply(nil, &[]), Err(RuntimeError::Uncallable { kind: KIND_NIL }));
        rt.dec_ref(nil).unwrap();
    }
}

#[test]
fn test_each_runtime_has_its_own_nil() {
    let first = Runtime::new();
    let second = Runtime::new();
    let a = first.nil();
    let b = second.nil();
    assert_ne!(a, b);
    unsafe {
        first.dec_ref(a).unwrap();
        second.dec_ref(b).unwrap();
    }
}
