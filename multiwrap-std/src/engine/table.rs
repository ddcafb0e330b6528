//! In-memory reference engine.

use super::hierarchy::{Hierarchy, SharedHierarchy};
use multiwrap_core::{DispatchEngine, DispatchError, DispatchKey, MethodTable, PreferTable};
use std::{
    marker::PhantomData,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

struct Tables<K, H> {
    methods: MethodTable<K, H>,
    prefers: PreferTable<K>,
}

/// A hash-table engine with hierarchy-aware, preference-respecting lookup.
///
/// Resolution order:
///
/// 1. the handler registered at exactly `key`;
/// 2. otherwise the handler whose key dominates every other key that `key`
///    `isa` (see [`Hierarchy::isa`]); two non-dominating matches are
///    [`DispatchError::Ambiguous`];
/// 3. otherwise the handler registered at the default key, if configured.
///
/// All state sits behind `RwLock`s, so the engine can be shared across
/// threads and mutated while other threads resolve.
pub struct TableEngine<K, H> {
    name: String,
    default_key: Option<K>,
    hierarchy: SharedHierarchy<K>,
    tables: RwLock<Tables<K, H>>,
}

impl<K, H> std::fmt::Debug for TableEngine<K, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableEngine")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<K: DispatchKey, H: Clone> TableEngine<K, H> {
    /// Create an engine with a private, empty hierarchy and no default key.
    pub fn new(name: impl Into<String>) -> Self {
        Self::builder().name(name).build()
    }

    /// Start configuring an engine.
    pub fn builder() -> TableEngineBuilder<K, H> {
        TableEngineBuilder::default()
    }

    /// The key whose handler serves otherwise unmatched keys.
    pub fn default_key(&self) -> Option<&K> {
        self.default_key.as_ref()
    }

    /// The hierarchy consulted during resolution.
    pub fn hierarchy(&self) -> &SharedHierarchy<K> {
        &self.hierarchy
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables<K, H>> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables<K, H>> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_hierarchy(&self) -> RwLockReadGuard<'_, Hierarchy<K>> {
        self.hierarchy.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn find_best(
        &self,
        tables: &Tables<K, H>,
        hierarchy: &Hierarchy<K>,
        key: &K,
    ) -> Result<Option<H>, DispatchError> {
        if let Some(handler) = tables.methods.get(key) {
            return Ok(Some(handler.clone()));
        }

        let candidates: Vec<(&K, &H)> = tables
            .methods
            .iter()
            .filter(|(candidate, _)| hierarchy.isa(key, candidate))
            .collect();
        let beats = |x: &K, y: &K| dominates(&tables.prefers, hierarchy, x, y);

        let winner = candidates.iter().find(|(c, _)| {
            candidates
                .iter()
                .all(|(other, _)| c == other || beats(c, other))
        });
        if let Some((_, handler)) = winner {
            return Ok(Some((*handler).clone()));
        }

        if candidates.len() > 1 {
            let mut undominated = candidates
                .iter()
                .map(|(c, _)| *c)
                .filter(|c| {
                    !candidates
                        .iter()
                        .any(|(other, _)| c != other && beats(other, c))
                });
            let first = undominated.next().unwrap_or(candidates[0].0);
            let second = undominated.next().unwrap_or(candidates[1].0);
            return Err(DispatchError::Ambiguous {
                name: self.name.clone(),
                key: format!("{key:?}"),
                first: format!("{first:?}"),
                second: format!("{second:?}"),
            });
        }

        Ok(self
            .default_key
            .as_ref()
            .and_then(|default| tables.methods.get(default))
            .cloned())
    }
}

/// `x` is preferred to `y` directly, through a parent of `y`, or through a
/// parent of `x`.
fn prefers<K: DispatchKey>(
    table: &PreferTable<K>,
    hierarchy: &Hierarchy<K>,
    x: &K,
    y: &K,
) -> bool {
    if table.get(x).is_some_and(|set| set.contains(y)) {
        return true;
    }
    if hierarchy
        .parents(y)
        .iter()
        .any(|parent| prefers(table, hierarchy, x, parent))
    {
        return true;
    }
    hierarchy
        .parents(x)
        .iter()
        .any(|parent| prefers(table, hierarchy, parent, y))
}

fn dominates<K: DispatchKey>(
    table: &PreferTable<K>,
    hierarchy: &Hierarchy<K>,
    x: &K,
    y: &K,
) -> bool {
    prefers(table, hierarchy, x, y) || hierarchy.isa(x, y)
}

impl<K, H> DispatchEngine<K, H> for TableEngine<K, H>
where
    K: DispatchKey,
    H: Clone + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, key: &K) -> Result<Option<H>, DispatchError> {
        let tables = self.read();
        let hierarchy = self.read_hierarchy();
        self.find_best(&tables, &hierarchy, key)
    }

    fn register(&self, key: K, handler: H) -> Result<&Self, DispatchError> {
        #[cfg(feature = "tracing")]
        tracing::trace!(engine = %self.name, key = ?key, "register method");

        self.write().methods.insert(key, handler);
        Ok(self)
    }

    fn unregister(&self, key: &K) -> Result<&Self, DispatchError> {
        #[cfg(feature = "tracing")]
        tracing::trace!(engine = %self.name, key = ?key, "unregister method");

        self.write().methods.remove(key);
        Ok(self)
    }

    fn prefer(&self, preferred: K, other: K) -> Result<&Self, DispatchError> {
        let mut tables = self.write();
        let hierarchy = self.read_hierarchy();
        if prefers(&tables.prefers, &hierarchy, &other, &preferred) {
            return Err(DispatchError::PreferenceConflict {
                name: self.name.clone(),
                preferred: format!("{other:?}"),
                other: format!("{preferred:?}"),
            });
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(engine = %self.name, preferred = ?preferred, other = ?other, "prefer method");

        tables.prefers.entry(preferred).or_default().insert(other);
        Ok(self)
    }

    fn reset(&self) -> Result<&Self, DispatchError> {
        #[cfg(feature = "tracing")]
        tracing::trace!(engine = %self.name, "reset tables");

        let mut tables = self.write();
        tables.methods.clear();
        tables.prefers.clear();
        Ok(self)
    }

    fn method_table(&self) -> MethodTable<K, H> {
        self.read().methods.clone()
    }

    fn prefer_table(&self) -> Result<PreferTable<K>, DispatchError> {
        Ok(self.read().prefers.clone())
    }
}

/// Builder for [`TableEngine`].
pub struct TableEngineBuilder<K, H> {
    name: String,
    default_key: Option<K>,
    hierarchy: Option<SharedHierarchy<K>>,
    _handler: PhantomData<fn() -> H>,
}

impl<K, H> Default for TableEngineBuilder<K, H> {
    fn default() -> Self {
        Self {
            name: String::from("anonymous"),
            default_key: None,
            hierarchy: None,
            _handler: PhantomData,
        }
    }
}

impl<K: DispatchKey, H: Clone> TableEngineBuilder<K, H> {
    /// Set the engine name used in diagnostics.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Serve unmatched keys with the handler registered at `key`.
    pub fn default_key(mut self, key: K) -> Self {
        self.default_key = Some(key);
        self
    }

    /// Resolve through a hierarchy shared with other engines.
    pub fn hierarchy(mut self, hierarchy: SharedHierarchy<K>) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    /// Build the engine.
    pub fn build(self) -> TableEngine<K, H> {
        TableEngine {
            name: self.name,
            default_key: self.default_key,
            hierarchy: self
                .hierarchy
                .unwrap_or_else(|| Hierarchy::new().shared()),
            tables: RwLock::new(Tables {
                methods: MethodTable::new(),
                prefers: PreferTable::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiwrap_core::Keyword;

    fn kw(s: &str) -> Keyword {
        Keyword::new(s)
    }

    fn zoo_engine() -> TableEngine<Keyword, &'static str> {
        let mut h = Hierarchy::new();
        h.derive(kw("animal/dog"), kw("animal/mammal")).unwrap();
        h.derive(kw("animal/dog"), kw("role/pet")).unwrap();
        h.derive(kw("animal/mammal"), kw("animal/any")).unwrap();
        TableEngine::builder()
            .name("zoo")
            .hierarchy(h.shared())
            .default_key(kw("default"))
            .build()
    }

    #[test]
    fn exact_match_wins() {
        let engine = zoo_engine();
        engine
            .register(kw("animal/dog"), "dog")
            .unwrap()
            .register(kw("animal/mammal"), "mammal")
            .unwrap();
        assert_eq!(engine.resolve(&kw("animal/dog")).unwrap(), Some("dog"));
    }

    #[test]
    fn most_specific_ancestor_wins() {
        let engine = zoo_engine();
        engine.register(kw("animal/any"), "any").unwrap();
        engine.register(kw("animal/mammal"), "mammal").unwrap();
        assert_eq!(engine.resolve(&kw("animal/dog")).unwrap(), Some("mammal"));
    }

    #[test]
    fn unrelated_matches_are_ambiguous_until_preferred() {
        let engine = zoo_engine();
        engine.register(kw("animal/mammal"), "mammal").unwrap();
        engine.register(kw("role/pet"), "pet").unwrap();

        let err = engine.resolve(&kw("animal/dog")).unwrap_err();
        assert!(matches!(err, DispatchError::Ambiguous { .. }));

        engine.prefer(kw("role/pet"), kw("animal/mammal")).unwrap();
        assert_eq!(engine.resolve(&kw("animal/dog")).unwrap(), Some("pet"));
    }

    #[test]
    fn preference_through_parent() {
        let engine = zoo_engine();
        engine.register(kw("animal/mammal"), "mammal").unwrap();
        engine.register(kw("role/pet"), "pet").unwrap();
        // preferring over :animal/any covers its descendant :animal/mammal
        engine.prefer(kw("role/pet"), kw("animal/any")).unwrap();
        assert_eq!(engine.resolve(&kw("animal/dog")).unwrap(), Some("pet"));
    }

    #[test]
    fn conflicting_preference_is_rejected() {
        let engine = zoo_engine();
        engine.prefer(kw("role/pet"), kw("animal/mammal")).unwrap();
        let err = engine
            .prefer(kw("animal/mammal"), kw("role/pet"))
            .unwrap_err();
        assert!(matches!(err, DispatchError::PreferenceConflict { .. }));
    }

    #[test]
    fn default_key_serves_unmatched() {
        let engine = zoo_engine();
        assert_eq!(engine.resolve(&kw("plant/fern")).unwrap(), None);
        engine.register(kw("default"), "fallback").unwrap();
        assert_eq!(engine.resolve(&kw("plant/fern")).unwrap(), Some("fallback"));
    }

    #[test]
    fn reset_clears_methods_and_preferences() {
        let engine = zoo_engine();
        engine.register(kw("animal/dog"), "dog").unwrap();
        engine.prefer(kw("role/pet"), kw("animal/mammal")).unwrap();
        engine.reset().unwrap();
        assert!(engine.method_table().is_empty());
        assert!(engine.prefer_table().unwrap().is_empty());
        assert_eq!(engine.resolve(&kw("animal/dog")).unwrap(), None);
    }

    #[test]
    fn shared_hierarchy_changes_are_visible() {
        let hierarchy = Hierarchy::new().shared();
        let engine: TableEngine<Keyword, &str> =
            TableEngine::builder().hierarchy(hierarchy.clone()).build();
        engine.register(kw("shape/any"), "shape").unwrap();
        assert_eq!(engine.resolve(&kw("shape/square")).unwrap(), None);

        hierarchy
            .write()
            .unwrap()
            .derive(kw("shape/square"), kw("shape/any"))
            .unwrap();
        assert_eq!(engine.resolve(&kw("shape/square")).unwrap(), Some("shape"));
    }
}
