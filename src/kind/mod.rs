//! Kind registry - per-kind descriptors consulted by every dispatch
//!
//! Design: populated once during bootstrap, read-mostly afterwards.
//! - Sharded concurrent map so registration never races a lookup
//! - Accessors copy the callback or member out before returning, so no
//!   shard lock is held while user code runs
//! - Registrations live as long as the registry (process lifetime)

mod behavior;

#[cfg(test)]
mod tests;

pub use behavior::{Apply, ApplyClosure, ApplyFn, Destructor, DestructorClosure, DestructorFn};

use crate::error::{Result, RuntimeError};
use crate::logging::{debug, warn};
use crate::object::{KindId, RawObj, SharedObj};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashMap;

/// Behavior bundle of one kind
#[derive(Debug, Default)]
pub struct KindDescriptor {
    destructor: Destructor,
    apply: Apply,
    members: HashMap<String, SharedObj>,
}

impl KindDescriptor {
    pub fn destructor(&self) -> &Destructor {
        &self.destructor
    }

    pub fn apply(&self) -> &Apply {
        &self.apply
    }

    pub fn member(&self, name: &str) -> Option<RawObj> {
        self.members.get(name).map(|member| member.0)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Mapping from kind id to descriptor
#[derive(Debug, Default)]
pub struct KindRegistry {
    kinds: DashMap<KindId, KindDescriptor>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self {
            kinds: DashMap::with_capacity(16),
        }
    }

    /// Create an empty descriptor for `kind`; each kind registers exactly once
    pub fn register(&self, kind: KindId) -> Result<()> {
        match self.kinds.entry(kind) {
            Entry::Occupied(_) => Err(RuntimeError::DuplicateKind { kind }),
            Entry::Vacant(slot) => {
                slot.insert(KindDescriptor::default());
                debug!(event = "kind_registered", kind, "Kind registered");
                Ok(())
            }
        }
    }

    pub fn set_destructor(&self, kind: KindId, destructor: Destructor) -> Result<()> {
        self.with_descriptor_mut(kind, |descriptor| descriptor.destructor = destructor)
    }

    pub fn set_apply(&self, kind: KindId, apply: Apply) -> Result<()> {
        self.with_descriptor_mut(kind, |descriptor| descriptor.apply = apply)
    }

    /// Bind `name` to `member`, returning the previous occupant if any
    ///
    /// Reference counting is the caller's job: the registry neither takes
    /// nor releases references.
    pub(crate) fn insert_member(&self, kind: KindId, name: &str, member: RawObj) -> Result<Option<RawObj>> {
        let replaced = self.with_descriptor_mut(kind, |descriptor| {
            descriptor
                .members
                .insert(name.to_owned(), SharedObj(member))
                .map(|old| old.0)
        })?;

        if let Some(old) = replaced {
            // The old occupant keeps the reference the table took for it.
            warn!(
                event = "member_overwrite",
                kind,
                member = name,
                replaced = ?old,
                "Member replaced without releasing previous value"
            );
        }

        Ok(replaced)
    }

    pub fn destructor(&self, kind: KindId) -> Result<Destructor> {
        self.with_descriptor(kind, |descriptor| descriptor.destructor.clone())
    }

    pub fn apply(&self, kind: KindId) -> Result<Apply> {
        self.with_descriptor(kind, |descriptor| descriptor.apply.clone())
    }

    /// Borrow a member (no reference is taken)
    pub fn member(&self, kind: KindId, name: &str) -> Result<RawObj> {
        self.with_descriptor(kind, |descriptor| descriptor.member(name))?
            .ok_or_else(|| RuntimeError::UnregisteredMember {
                kind,
                name: name.to_owned(),
            })
    }

    pub fn member_names(&self, kind: KindId) -> Result<Vec<String>> {
        self.with_descriptor(kind, |descriptor| {
            let mut names: Vec<String> = descriptor.members.keys().cloned().collect();
            names.sort_unstable();
            names
        })
    }

    #[inline]
    pub fn contains(&self, kind: KindId) -> bool {
        self.kinds.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    #[inline]
    fn with_descriptor<T>(&self, kind: KindId, f: impl FnOnce(&KindDescriptor) -> T) -> Result<T> {
        self.kinds
            .get(&kind)
            .map(|descriptor| f(descriptor.value()))
            .ok_or(RuntimeError::UnregisteredKind { kind })
    }

    fn with_descriptor_mut<T>(&self, kind: KindId, f: impl FnOnce(&mut KindDescriptor) -> T) -> Result<T> {
        self.kinds
            .get_mut(&kind)
            .map(|mut descriptor| f(descriptor.value_mut()))
            .ok_or(RuntimeError::UnregisteredKind { kind })
    }
}
