//! Node identity
//!
//! Every node in the tree carries an opaque [`NodeId`]. Ids are produced at
//! assembly time by an [`IdGenerator`] owned by whoever builds the tree, so
//! there is no process-wide counter.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Opaque node identifier, e.g. `configurator-1`.
///
/// Cloning is cheap; ids are compared by value and never reused within one
/// generator.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Arc<str>);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId(Arc::from(value))
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId(Arc::from(value))
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Hands out ids of the form `<kind>-<n>`, with one counter per kind.
///
/// # Examples
///
/// ```rust
/// use arbor_core::id::IdGenerator;
///
/// let mut ids = IdGenerator::new();
/// assert_eq!(ids.next("leaf").as_str(), "leaf-1");
/// assert_eq!(ids.next("leaf").as_str(), "leaf-2");
/// assert_eq!(ids.next("branch").as_str(), "branch-1");
/// ```
#[derive(Debug, Default)]
pub struct IdGenerator {
    counters: HashMap<String, u64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, kind: &str) -> NodeId {
        let counter = self.counters.entry(kind.to_string()).or_insert(0);
        *counter += 1;
        NodeId::from(format!("{}-{}", kind, counter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_per_generator() {
        let mut ids = IdGenerator::new();
        let mut seen = HashSet::new();
        for kind in ["leaf", "branch", "leaf", "leaf", "branch"] {
            assert!(seen.insert(ids.next(kind)));
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_generators_are_independent() {
        let mut a = IdGenerator::new();
        let mut b = IdGenerator::new();
        assert_eq!(a.next("x"), b.next("x"));
    }

    #[test]
    fn test_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(NodeId::from("cfg"), 1);
        assert_eq!(map.get("cfg"), Some(&1));
    }
}
