//! Key hierarchies for `isa`-based resolution.

use multiwrap_core::{DispatchKey, HierarchyError};
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, RwLock},
};

/// A hierarchy shared between engines.
pub type SharedHierarchy<K> = Arc<RwLock<Hierarchy<K>>>;

/// A directed acyclic parent relation between keys.
///
/// A key `isa` another when they are equal or when the second is an ancestor
/// of the first.
#[derive(Debug, Clone)]
pub struct Hierarchy<K> {
    parents: HashMap<K, HashSet<K>>,
}

impl<K> Default for Hierarchy<K> {
    fn default() -> Self {
        Self {
            parents: HashMap::new(),
        }
    }
}

impl<K: DispatchKey> Hierarchy<K> {
    /// Create an empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the hierarchy for sharing between engines.
    pub fn shared(self) -> SharedHierarchy<K> {
        Arc::new(RwLock::new(self))
    }

    /// Make `parent` a direct parent of `child`.
    ///
    /// Deriving an existing direct edge again is a no-op. An edge to a key
    /// that is already an indirect ancestor is rejected.
    pub fn derive(&mut self, child: K, parent: K) -> Result<&mut Self, HierarchyError> {
        if child == parent {
            return Err(HierarchyError::SelfDerivation(format!("{child:?}")));
        }
        if self.parents.get(&child).is_some_and(|set| set.contains(&parent)) {
            return Ok(self);
        }
        if self.ancestors(&child).contains(&parent) {
            return Err(HierarchyError::AlreadyAncestor {
                child: format!("{child:?}"),
                parent: format!("{parent:?}"),
            });
        }
        if self.isa(&parent, &child) {
            return Err(HierarchyError::Cyclic {
                child: format!("{child:?}"),
                parent: format!("{parent:?}"),
            });
        }
        self.parents.entry(child).or_default().insert(parent);
        Ok(self)
    }

    /// Remove the direct edge from `child` to `parent`, if present.
    pub fn underive(&mut self, child: &K, parent: &K) -> &mut Self {
        if let Some(set) = self.parents.get_mut(child) {
            set.remove(parent);
            if set.is_empty() {
                self.parents.remove(child);
            }
        }
        self
    }

    /// Direct parents of `key`.
    pub fn parents(&self, key: &K) -> HashSet<K> {
        self.parents.get(key).cloned().unwrap_or_default()
    }

    /// All transitive ancestors of `key`.
    pub fn ancestors(&self, key: &K) -> HashSet<K> {
        let mut seen = HashSet::new();
        let mut stack: Vec<&K> = self.parents.get(key).into_iter().flatten().collect();
        while let Some(k) = stack.pop() {
            if seen.insert(k.clone()) {
                stack.extend(self.parents.get(k).into_iter().flatten());
            }
        }
        seen
    }

    /// All transitive descendants of `key`.
    pub fn descendants(&self, key: &K) -> HashSet<K> {
        self.parents
            .keys()
            .filter(|child| self.ancestors(child).contains(key))
            .cloned()
            .collect()
    }

    /// Returns `true` if `child` equals `parent` or derives from it.
    pub fn isa(&self, child: &K, parent: &K) -> bool {
        child == parent || self.ancestors(child).contains(parent)
    }
}
