//! Object header - the common prefix of every heap object
//!
//! Layout is part of the binary calling convention shared with generated
//! code and must not change: a signed 64-bit count followed by the kind id.

use std::sync::atomic::{fence, AtomicI64, Ordering};

/// Identifier of a kind in the [`KindRegistry`](crate::kind::KindRegistry)
pub type KindId = u64;

/// Pointer to any heap object (objects start with their header)
pub type RawObj = *mut ObjHeader;

/// Object header (16 bytes)
///
/// `ref_count` is signed so that a decrement below zero is observable as a
/// violated invariant instead of wrapping around.
#[repr(C, align(8))]
#[derive(Debug)]
pub struct ObjHeader {
    pub ref_count: AtomicI64,
    pub kind: KindId,
}

impl ObjHeader {
    /// Header for a freshly constructed object, owned by exactly one holder
    #[inline]
    pub const fn new(kind: KindId) -> Self {
        Self {
            ref_count: AtomicI64::new(1),
            kind,
        }
    }

    #[inline]
    pub fn ref_count(&self) -> i64 {
        self.ref_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn kind(&self) -> KindId {
        self.kind
    }

    /// Add one reference, returning the new count
    #[inline(always)]
    pub(crate) fn increment(&self) -> i64 {
        self.ref_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Drop one reference, returning the new count
    ///
    /// When the result is zero the caller is about to destroy the object, so
    /// synchronize with every earlier release first.
    #[inline(always)]
    pub(crate) fn decrement(&self) -> i64 {
        let remaining = self.ref_count.fetch_sub(1, Ordering::Release) - 1;
        if remaining == 0 {
            fence(Ordering::Acquire);
        }
        remaining
    }
}

/// Borrow the header behind a raw object pointer
///
/// # Safety
/// `obj` must be non-null and point to a live object.
#[inline(always)]
pub(crate) unsafe fn header<'a>(obj: RawObj) -> &'a ObjHeader {
    &*obj
}
