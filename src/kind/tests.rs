//! Tests for the kind registry

use super::*;
use crate::object::ObjHeader;

/// Header-only object owned by the test
struct Dummy(RawObj);

impl Dummy {
    fn new(kind: KindId) -> Self {
        Self(Box::into_raw(Box::new(ObjHeader::new(kind))))
    }
}

impl Drop for Dummy {
    fn drop(&mut self) {
        unsafe { drop(Box::from_raw(self.0)) };
    }
}

unsafe extern "C" fn noop_destructor(_obj: RawObj) {}

unsafe extern "C" fn null_apply(_callee: RawObj, _argc: core::ffi::c_int, _args: *const RawObj) -> RawObj {
    core::ptr::null_mut()
}

#[test]
fn test_register_creates_empty_descriptor() {
    let registry = KindRegistry::new();
    assert!(registry.is_empty());

    registry.register(5).unwrap();
    assert!(registry.contains(5));
    assert_eq!(registry.len(), 1);
    assert!(registry.destructor(5).unwrap().is_noop());
    assert!(!registry.apply(5).unwrap().is_direct());
    assert!(registry.member_names(5).unwrap().is_empty());
}

#[test]
fn test_register_duplicate() {
    let registry = KindRegistry::new();
    registry.register(6).unwrap();
    assert_eq!(registry.register(6), Err(RuntimeError::DuplicateKind { kind: 6 }));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_unregistered_kind_everywhere() {
    let registry = KindRegistry::new();
    let member = Dummy::new(1);
    let missing = Err(RuntimeError::UnregisteredKind { kind: 7 });

    assert_eq!(registry.set_destructor(7, Destructor::Noop), missing);
    assert_eq!(registry.set_apply(7, Apply::ViaCallMember), missing);
    assert_eq!(registry.insert_member(7, "x", member.0).map(|_| ()), missing);
    assert_eq!(registry.member(7, "x").map(|_| ()), missing);
    assert_eq!(registry.member_names(7).map(|_| ()), missing);
    assert!(registry.destructor(7).is_err());
    assert!(registry.apply(7).is_err());
}

#[test]
fn test_callbacks_last_write_wins() {
    let registry = KindRegistry::new();
    registry.register(8).unwrap();

    registry.set_destructor(8, Destructor::Native(noop_destructor)).unwrap();
    assert!(matches!(registry.destructor(8).unwrap(), Destructor::Native(_)));
    registry.set_destructor(8, Destructor::custom(|_, _| {})).unwrap();
    assert!(matches!(registry.destructor(8).unwrap(), Destructor::Custom(_)));

    registry.set_apply(8, Apply::Native(null_apply)).unwrap();
    assert!(registry.apply(8).unwrap().is_direct());
    registry.set_apply(8, Apply::from_native(None)).unwrap();
    assert!(!registry.apply(8).unwrap().is_direct());
}

#[test]
fn test_from_native_maps_null() {
    assert!(Destructor::from_native(None).is_noop());
    assert!(matches!(Destructor::from_native(Some(noop_destructor)), Destructor::Native(_)));
    assert!(matches!(Apply::from_native(None), Apply::ViaCallMember));
    assert!(matches!(Apply::from_native(Some(null_apply)), Apply::Native(_)));
}

#[test]
fn test_members_are_per_kind() {
    let registry = KindRegistry::new();
    registry.register(9).unwrap();
    registry.register(10).unwrap();

    let a = Dummy::new(1);
    let b = Dummy::new(1);
    registry.insert_member(9, "left", a.0).unwrap();
    registry.insert_member(10, "right", b.0).unwrap();

    assert_eq!(registry.member(9, "left"), Ok(a.0));
    assert_eq!(registry.member(10, "right"), Ok(b.0));
    assert_eq!(
        registry.member(9, "right"),
        Err(RuntimeError::UnregisteredMember {
            kind: 9,
            name: "right".to_string()
        })
    );
    assert_eq!(registry.member_names(10).unwrap(), vec!["right".to_string()]);
}

#[test]
fn test_insert_member_reports_replaced() {
    let registry = KindRegistry::new();
    registry.register(11).unwrap();

    let first = Dummy::new(1);
    let second = Dummy::new(1);
    assert_eq!(registry.insert_member(11, "slot", first.0), Ok(None));
    assert_eq!(registry.insert_member(11, "slot", second.0), Ok(Some(first.0)));
    assert_eq!(registry.member(11, "slot"), Ok(second.0));

    // The registry itself never touches counts
    unsafe {
        assert_eq!((*first.0).ref_count(), 1);
        assert_eq!((*second.0).ref_count(), 1);
    }
}

#[test]
fn test_member_names_sorted() {
    let registry = KindRegistry::new();
    registry.register(12).unwrap();

    let member = Dummy::new(1);
    for name in ["zeta", "alpha", "__call__", "mid"] {
        registry.insert_member(12, name, member.0).unwrap();
    }

    assert_eq!(
        registry.member_names(12).unwrap(),
        vec!["__call__", "alpha", "mid", "zeta"]
    );
}
