//! Platform heap backing the default allocate/free pair

#[cfg(unix)]
pub(super) unsafe extern "C" fn system_alloc(size: usize) -> *mut u8 {
    // malloc(0) may legitimately return null
    libc::malloc(size.max(1)) as *mut u8
}

#[cfg(unix)]
pub(super) unsafe extern "C" fn system_free(ptr: *mut u8) {
    libc::free(ptr as *mut libc::c_void);
}

#[cfg(windows)]
pub(super) unsafe extern "C" fn system_alloc(size: usize) -> *mut u8 {
    use winapi::um::heapapi::{GetProcessHeap, HeapAlloc};

    HeapAlloc(GetProcessHeap(), 0, size.max(1)) as *mut u8
}

#[cfg(windows)]
pub(super) unsafe extern "C" fn system_free(ptr: *mut u8) {
    use winapi::um::heapapi::{GetProcessHeap, HeapFree};

    HeapFree(GetProcessHeap(), 0, ptr as winapi::shared::minwindef::LPVOID);
}

#[cfg(not(any(unix, windows)))]
mod fallback {
    use std::alloc::{alloc, dealloc, Layout};

    const ALIGN: usize = 16;

    // Size is stashed in front of the block so free() can rebuild the layout.
    pub(in crate::allocator) unsafe extern "C" fn system_alloc(size: usize) -> *mut u8 {
        let Ok(layout) = Layout::from_size_align(size.max(1) + ALIGN, ALIGN) else {
            return core::ptr::null_mut();
        };
        let base = alloc(layout);
        if base.is_null() {
            return base;
        }
        (base as *mut usize).write(layout.size());
        base.add(ALIGN)
    }

    pub(in crate::allocator) unsafe extern "C" fn system_free(ptr: *mut u8) {
        let base = ptr.sub(ALIGN);
        let size = (base as *const usize).read();
        dealloc(base, Layout::from_size_align_unchecked(size, ALIGN));
    }
}

#[cfg(not(any(unix, windows)))]
pub(super) use fallback::{system_alloc, system_free};
