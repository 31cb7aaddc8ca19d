//! Child registry
//!
//! A [`Registry`] maps child ids to child values for exactly one parent.
//! Children are linked once while the tree is assembled; afterwards entries
//! are only replaced, by the fan-out engine, as each update cycle produces
//! new child values.

use dashmap::DashMap;
use std::sync::Arc;

use crate::command::Command;
use crate::id::NodeId;
use crate::node::Child;

/// Cheap-clone handle to a parent's children.
///
/// Copies of the owning node share one registry. Concurrent `store` calls
/// from fan-out tasks are safe; a traversal running at the same time may see
/// either the old or the new value of an entry, never a torn one.
#[derive(Clone, Default)]
pub struct Registry {
    entries: Arc<DashMap<NodeId, Child>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a new child and return its id.
    ///
    /// # Panics
    ///
    /// Panics if a child with the same id is already linked; that is a tree
    /// assembly bug.
    pub fn link(&self, child: Child) -> NodeId {
        let id = child.id().clone();
        if self.entries.contains_key(&id) {
            panic!("node '{}' is already linked in this registry", id);
        }
        tracing::debug!(node_id = %id, "Linked child node");
        self.entries.insert(id.clone(), child);
        id
    }

    pub fn get(&self, id: &str) -> Option<Child> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    /// Look up a child that must exist.
    ///
    /// # Panics
    ///
    /// Panics if `id` was never linked; callers only hold ids returned by
    /// [`link`](Self::link).
    pub fn must_get(&self, id: &str) -> Child {
        match self.get(id) {
            Some(child) => child,
            None => panic!("cannot load node '{}' from registry", id),
        }
    }

    /// Replace the entry for `child`'s id with the new value.
    pub fn store(&self, child: Child) {
        self.entries.insert(child.id().clone(), child);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Clone every entry out of the map. No shard lock is held once this
    /// returns.
    pub fn snapshot(&self) -> Vec<Child> {
        self.entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Batch the `init` commands of every child.
    pub fn init_all(&self) -> Command {
        Command::batch(self.snapshot().iter().map(Child::init))
    }

    /// Find a node anywhere below this registry.
    pub fn find(&self, id: &str) -> Option<Child> {
        if let Some(child) = self.get(id) {
            return Some(child);
        }
        self.snapshot()
            .iter()
            .filter_map(Child::registry)
            .find_map(|registry| registry.find(id))
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("children", &self.ids())
            .finish()
    }
}
