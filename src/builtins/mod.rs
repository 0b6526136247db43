//! Built-in kinds - registered by every runtime before user kinds
//!
//! Design: only what generated code cannot live without:
//! 1. Nil - the canonical "no value" result
//! 2. Native function - bridge from generated code to host primitives

mod function;
mod nil;

#[cfg(test)]
mod tests;

pub use function::{create_native_function, NativeCode, NativeFunction};
pub use nil::Nil;

use crate::error::Result;
use crate::kind::{Apply, Destructor, KindRegistry};
use crate::logging::debug;
use crate::object::{self, KindId, RawObj};

pub const KIND_NIL: KindId = 1;
pub const KIND_FUNCTION: KindId = 2;

/// Register the built-in kinds and allocate the nil singleton
///
/// The returned nil carries the one reference the runtime keeps forever.
pub(crate) fn bootstrap(kinds: &KindRegistry) -> Result<RawObj> {
    kinds.register(KIND_NIL)?;

    kinds.register(KIND_FUNCTION)?;
    kinds.set_apply(KIND_FUNCTION, Apply::Native(function::native_function_apply))?;
    kinds.set_destructor(KIND_FUNCTION, Destructor::Native(object::free_object))?;

    let nil = nil::new_nil()?;
    debug!(nil = ?nil, "Built-in kinds registered (nil, function)");
    Ok(nil)
}
