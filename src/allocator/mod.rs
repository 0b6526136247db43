//! Raw allocator - the pluggable allocate/free pair behind object storage
//!
//! Design: the runtime has no allocation strategy of its own.
//! 1. A pair of C callbacks (`alloc(size)`, `free(ptr)`) does the work
//! 2. The system heap backs the default pair
//! 3. Hosts swap in their own pair during bootstrap, before any object exists
//!
//! Counters track live and total allocations for diagnostics.

mod system;


use crate::logging::{debug, log_allocation, log_deallocation};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

pub type AllocFn = unsafe extern "C" fn(size: usize) -> *mut u8;
pub type FreeFn = unsafe extern "C" fn(ptr: *mut u8);

/// Matching allocate/free callbacks
#[derive(Debug, Clone, Copy)]
pub struct RawAllocator {
    pub alloc: AllocFn,
    pub free: FreeFn,
}

impl RawAllocator {
    /// Pair backed by the platform heap
    pub const fn system() -> Self {
        Self {
            alloc: system::system_alloc,
            free: system::system_free,
        }
    }
}

impl Default for RawAllocator {
    fn default() -> Self {
        Self::system()
    }
}

static ALLOCATOR: Lazy<RwLock<RawAllocator>> = Lazy::new(|| RwLock::new(RawAllocator::system()));

static LIVE_ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);
static TOTAL_ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);

/// Install a new pair, returning the previous one
///
/// Storage obtained from the old pair is still released through whichever
/// pair is installed at release time, so swap only while nothing is live or
/// when both pairs share a heap.
pub fn set_allocator(allocator: RawAllocator) -> RawAllocator {
    let previous = core::mem::replace(&mut *ALLOCATOR.write(), allocator);
    debug!(event = "allocator_replaced", "Raw allocator replaced");
    previous
}

#[inline]
pub fn current() -> RawAllocator {
    *ALLOCATOR.read()
}

/// Allocate `size` bytes (null on failure)
///
/// # Safety
/// The installed pair must uphold the malloc contract: at least 16-byte
/// alignment and no aliasing of live blocks.
#[inline]
pub unsafe fn allocate(size: usize) -> *mut u8 {
    let ptr = (current().alloc)(size);
    if !ptr.is_null() {
        LIVE_ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
        TOTAL_ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
        log_allocation(size, ptr);
    }
    ptr
}

/// Give back storage from [`allocate`] (null is a no-op)
///
/// # Safety
/// `ptr` must come from the installed pair and must not be used afterwards.
#[inline]
pub unsafe fn release(ptr: *mut u8) {
    if ptr.is_null() {
        return;
    }

    log_deallocation(ptr);
    (current().free)(ptr);
    LIVE_ALLOCATIONS.fetch_sub(1, Ordering::Relaxed);
}

pub fn stats() -> AllocatorStats {
    AllocatorStats {
        live_allocations: LIVE_ALLOCATIONS.load(Ordering::Relaxed),
        total_allocations: TOTAL_ALLOCATIONS.load(Ordering::Relaxed),
    }
}

/// Allocator statistics for monitoring and debugging
#[derive(Debug, Clone, Copy)]
pub struct AllocatorStats {
    pub live_allocations: usize,
    pub total_allocations: usize,
}
