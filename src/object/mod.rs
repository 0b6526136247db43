//! Heap objects - header layout, storage and owned handles
//!
//! Design: every object is a `#[repr(C)]` struct whose first field is an
//! [`ObjHeader`], so a pointer to the object is a pointer to its header.
//! Storage comes from the pluggable raw allocator; a kind's destructor is
//! responsible for giving it back (see [`free_object`]).

mod handle;
mod header;


pub use handle::ObjRef;
pub use header::{KindId, ObjHeader, RawObj};

pub(crate) use header::header;

use crate::allocator;
use crate::error::{Result, RuntimeError};
use crate::logging::trace;

/// Object pointer that may be shared across the registry's shards
///
/// Safety: members and the nil singleton are only dereferenced by the
/// runtime operations, which follow the single-mutator model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SharedObj(pub(crate) RawObj);

unsafe impl Send for SharedObj {}
unsafe impl Sync for SharedObj {}

/// Allocate header plus `payload_size` zeroed bytes, with a count of 1
///
/// # Safety
/// The caller must eventually arrange for the storage to be released, usually
/// by registering [`free_object`] (or a destructor that calls it) on `kind`.
pub unsafe fn allocate_object(kind: KindId, payload_size: usize) -> Result<RawObj> {
    let header_size = core::mem::size_of::<ObjHeader>();
    let size = header_size
        .checked_add(payload_size)
        .ok_or(RuntimeError::AllocationFailed { size: usize::MAX })?;

    let ptr = allocator::allocate(size);
    if ptr.is_null() {
        return Err(RuntimeError::AllocationFailed { size });
    }

    let obj = ptr as RawObj;
    obj.write(ObjHeader::new(kind));
    ptr.add(header_size).write_bytes(0, payload_size);

    trace!(event = "object_new", kind, size_bytes = size, address = ?obj);
    Ok(obj)
}

/// Move `value` into raw-allocator storage
///
/// # Safety
/// `T` must be `#[repr(C)]` with an [`ObjHeader`] as its first field, and
/// its alignment must not exceed what the raw allocator guarantees (16).
pub unsafe fn allocate<T>(value: T) -> Result<*mut T> {
    debug_assert!(core::mem::align_of::<T>() <= 16, "over-aligned object");

    let size = core::mem::size_of::<T>();
    let ptr = allocator::allocate(size) as *mut T;
    if ptr.is_null() {
        return Err(RuntimeError::AllocationFailed { size });
    }

    ptr.write(value);
    Ok(ptr)
}

/// Stock destructor: reclaim the object's storage and nothing else
///
/// Suitable for kinds whose objects own no other references.
///
/// # Safety
/// `obj` must have been allocated through the raw allocator and must not be
/// used afterwards.
pub unsafe extern "C" fn free_object(obj: RawObj) {
    if obj.is_null() {
        return;
    }

    trace!(event = "object_free", address = ?obj);
    allocator::release(obj as *mut u8);
}
