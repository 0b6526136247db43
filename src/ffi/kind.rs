//! Kind registration - C API used by the bootstrap code of compiled modules

use super::name_from_raw;
use crate::error::{self, Result};
use crate::kind::{Apply, ApplyFn, Destructor, DestructorFn};
use crate::object::{KindId, RawObj};
use crate::runtime;

/// Register an empty descriptor for `kind` (aborts if already registered)
#[no_mangle]
pub extern "C" fn kindrt_new_kind(kind: KindId) {
    error::or_fatal(runtime::global().register_kind(kind));
}

/// Attach a destructor to `kind`; null clears it
#[no_mangle]
pub extern "C" fn kindrt_kind_set_destructor(kind: KindId, destructor: Option<DestructorFn>) {
    error::or_fatal(runtime::global().set_destructor(kind, Destructor::from_native(destructor)));
}

/// Attach call behavior to `kind`; null restores `__call__` dispatch
#[no_mangle]
pub extern "C" fn kindrt_kind_set_apply(kind: KindId, apply: Option<ApplyFn>) {
    error::or_fatal(runtime::global().set_apply(kind, Apply::from_native(apply)));
}

/// Bind `name` on `kind` to `member`; the member table takes a reference
///
/// Rebinding a name leaves the previous member's reference in place.
///
/// # Safety
/// `name` must be valid for `name_len` bytes; `member` must be a live object.
#[no_mangle]
pub unsafe extern "C" fn kindrt_kind_set_member(kind: KindId, name: *const u8, name_len: u64, member: RawObj) {
    error::or_fatal(set_member(kind, name, name_len, member));
}

unsafe fn set_member(kind: KindId, name: *const u8, name_len: u64, member: RawObj) -> Result<()> {
    let name = name_from_raw(name, name_len)?;
    runtime::global().set_member(kind, name, member)
}
