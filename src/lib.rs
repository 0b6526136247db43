//! kindrt - object runtime for kind-dispatched, reference-counted heap objects
//!
//! Generated code links against this crate to create, reference-count,
//! inspect and invoke heap objects whose behavior is selected at run time by
//! a kind tag. Kinds are registered at startup with a destructor, an apply
//! behavior and a table of members.
//!
//! There is no garbage collector: lifetimes are local reference counts and
//! cyclic object graphs leak.

pub mod allocator;
pub mod builtins;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fatal;
pub mod ffi;
pub mod kind;
pub mod logging;
pub mod object;
pub mod runtime;

// Re-export core types
pub use builtins::{NativeCode, NativeFunction, KIND_FUNCTION, KIND_NIL};
pub use config::RuntimeConfig;
pub use dispatch::CALL_MEMBER;
pub use error::RuntimeError;
pub use kind::{Apply, Destructor, KindRegistry};
pub use object::{KindId, ObjHeader, ObjRef, RawObj};
pub use runtime::Runtime;

/// Runtime initialization: install logging and bootstrap the global runtime
#[no_mangle]
pub extern "C" fn kindrt_runtime_init() {
    let runtime = runtime::global();
    logging::init_with_config(&runtime.config().log);
    logging::log_runtime_init();
}

/// Runtime cleanup: flush logs (registrations live until process exit)
#[no_mangle]
pub extern "C" fn kindrt_runtime_cleanup() {
    logging::log_runtime_shutdown();
    logging::shutdown();
}
