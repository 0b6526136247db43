//! Runtime - the explicit owner of the kind registry
//!
//! Every operation is a method on a [`Runtime`]. Rust hosts create their own
//! instance (and may share it through an `Arc`); the C ABI works against the
//! process-wide instance returned by [`global`].

mod global;
mod refcount;


pub use global::global;

use crate::builtins;
use crate::config::RuntimeConfig;
use crate::error::{self, Result, RuntimeError};
use crate::kind::{Apply, Destructor, KindRegistry};
use crate::logging::{debug, info};
use crate::object::{self, header, KindId, RawObj, SharedObj};

pub struct Runtime {
    kinds: KindRegistry,
    config: RuntimeConfig,
    nil: SharedObj,
}

impl Runtime {
    /// Runtime with default configuration and the built-in kinds registered
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Bootstrap a runtime; an allocation failure here is fatal
    pub fn with_config(config: RuntimeConfig) -> Self {
        error::or_fatal(Self::try_with_config(config))
    }

    pub fn try_with_config(config: RuntimeConfig) -> Result<Self> {
        let kinds = KindRegistry::new();
        let nil = builtins::bootstrap(&kinds)?;

        info!(
            kinds = kinds.len(),
            max_call_depth = ?config.max_call_depth,
            "Runtime bootstrapped"
        );

        Ok(Self {
            kinds,
            config,
            nil: SharedObj(nil),
        })
    }

    #[inline]
    pub fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }

    #[inline]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// New reference to the nil singleton
    #[inline]
    pub fn nil(&self) -> RawObj {
        unsafe { self.inc_ref(self.nil.0) };
        self.nil.0
    }

    pub fn register_kind(&self, kind: KindId) -> Result<()> {
        self.kinds.register(kind)
    }

    pub fn set_destructor(&self, kind: KindId, destructor: Destructor) -> Result<()> {
        self.kinds.set_destructor(kind, destructor.clone())?;
        debug!(kind, destructor = ?destructor, "Destructor attached");
        Ok(())
    }

    pub fn set_apply(&self, kind: KindId, apply: Apply) -> Result<()> {
        self.kinds.set_apply(kind, apply.clone())?;
        debug!(kind, apply = ?apply, "Apply attached");
        Ok(())
    }

    /// Bind `name` on `kind` to `member`; the member table takes a reference
    ///
    /// Rebinding a name does not release the previous occupant.
    ///
    /// # Safety
    /// `member` must be a live object.
    pub unsafe fn set_member(&self, kind: KindId, name: &str, member: RawObj) -> Result<()> {
        if member.is_null() {
            return Err(RuntimeError::NullObject { operation: "set_member" });
        }

        self.kinds.insert_member(kind, name, member)?;
        self.inc_ref(member);
        Ok(())
    }

    /// Allocate an object of a registered kind with `payload_size` zeroed bytes
    pub fn new_object(&self, kind: KindId, payload_size: usize) -> Result<RawObj> {
        if !self.kinds.contains(kind) {
            return Err(RuntimeError::UnregisteredKind { kind });
        }

        unsafe { object::allocate_object(kind, payload_size) }
    }

    /// Current count of `obj`
    ///
    /// # Safety
    /// `obj` must be a live object.
    #[inline]
    pub unsafe fn ref_count(&self, obj: RawObj) -> i64 {
        header(obj).ref_count()
    }

    /// # Safety
    /// `obj` must be a live object.
    #[inline]
    pub unsafe fn kind_of(&self, obj: RawObj) -> KindId {
        header(obj).kind()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
