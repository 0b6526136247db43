//! Nil - singleton marker with no members and no behavior

use super::KIND_NIL;
use crate::error::Result;
use crate::object::{self, ObjHeader, RawObj};

#[repr(C)]
pub struct Nil {
    pub header: ObjHeader,
}

pub(super) fn new_nil() -> Result<RawObj> {
    let nil = unsafe {
        object::allocate(Nil {
            header: ObjHeader::new(KIND_NIL),
        })?
    };
    Ok(nil as RawObj)
}
