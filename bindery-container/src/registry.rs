//! Binding registry: one record per bound name.
//!
//! A [`Binding`] keeps a name's factory, sharing mode, declared
//! dependencies and cached value together, so rebinding swaps all four
//! at once and a fresh binding never sees a stale cached value.

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::factory::Factory;
use crate::resolved::Instance;
use crate::sharing::Sharing;

/// Registration entry for a single name.
pub(crate) struct Binding {
    pub name: String,
    pub factory: Arc<dyn Factory>,
    pub sharing: Sharing,
    pub dependencies: Vec<String>,
    cache: OnceCell<Instance>,
}

impl Binding {
    pub fn new(
        name: String,
        factory: Arc<dyn Factory>,
        sharing: Sharing,
        dependencies: Vec<String>,
    ) -> Self {
        Self {
            name,
            factory,
            sharing,
            dependencies,
            cache: OnceCell::new(),
        }
    }

    /// The cached value, if this binding is shared and already built.
    pub fn cached(&self) -> Option<&Instance> {
        if self.sharing.is_cached() {
            self.cache.get()
        } else {
            None
        }
    }

    /// Records a freshly built value and returns the one callers should see.
    ///
    /// First write wins: when two resolutions race, both get the value
    /// that reached the cache first.
    pub fn store(&self, value: Instance) -> Instance {
        if !self.sharing.is_cached() {
            return value;
        }
        self.cache.get_or_init(|| value).clone()
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("sharing", &self.sharing)
            .field("dependencies", &self.dependencies)
            .field("cached", &self.cache.get().is_some())
            .finish()
    }
}

/// Stores all bindings of a container.
///
/// Bindings may be added at any time, including from inside a running
/// factory. Lookups hand out `Arc` clones so no map guard outlives the
/// call.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    bindings: DashMap<String, Arc<Binding>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a binding, replacing any previous binding of the same name.
    ///
    /// Returns the replaced binding. Resolutions already holding it finish
    /// against it.
    pub fn register(&self, binding: Binding, warn_on_rebind: bool) -> Option<Arc<Binding>> {
        let name = binding.name.clone();
        let sharing = binding.sharing;
        let dependencies = binding.dependencies.len();

        let previous = self.bindings.insert(name.clone(), Arc::new(binding));

        match previous {
            Some(_) if warn_on_rebind => {
                warn!(name = %name, sharing = %sharing, "Rebound name, cached value discarded");
            }
            Some(_) => {
                debug!(name = %name, sharing = %sharing, "Rebound name");
            }
            None => {
                debug!(name = %name, sharing = %sharing, dependencies, "Bound name");
            }
        }

        previous
    }

    /// Looks up a binding by name.
    pub fn get(&self, name: &str) -> Option<Arc<Binding>> {
        self.bindings.get(name).map(|entry| entry.value().clone())
    }

    /// Returns `true` if `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Returns the number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns all bound names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::ValueFactory;

    fn make_binding(name: &str, sharing: Sharing) -> Binding {
        Binding::new(
            name.to_owned(),
            Arc::new(ValueFactory::new(42i32)),
            sharing,
            vec![],
        )
    }

    #[test]
    fn register_and_get() {
        let reg = Registry::new();
        assert!(reg.register(make_binding("db", Sharing::Shared), false).is_none());

        let binding = reg.get("db").unwrap();
        assert_eq!(binding.name, "db");
        assert!(reg.contains("db"));
        assert!(reg.get("cache").is_none());
    }

    #[test]
    fn rebind_replaces_whole_record() {
        let reg = Registry::new();
        reg.register(make_binding("db", Sharing::Shared), false);
        reg.get("db").unwrap().store(Arc::new(1u8));

        let previous = reg.register(make_binding("db", Sharing::Transient), true);
        assert!(previous.unwrap().cached().is_some());

        let current = reg.get("db").unwrap();
        assert_eq!(current.sharing, Sharing::Transient);
        assert!(current.cached().is_none());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn first_store_wins() {
        let binding = make_binding("db", Sharing::Shared);
        let first: Instance = Arc::new(1u8);
        let second: Instance = Arc::new(2u8);

        let a = binding.store(first.clone());
        let b = binding.store(second);
        assert!(Arc::ptr_eq(&a, &first));
        assert!(Arc::ptr_eq(&b, &first));
    }

    #[test]
    fn transient_never_caches() {
        let binding = make_binding("req", Sharing::Transient);
        let value: Instance = Arc::new(1u8);

        let returned = binding.store(value.clone());
        assert!(Arc::ptr_eq(&returned, &value));
        assert!(binding.cached().is_none());
    }

    #[test]
    fn names_are_sorted() {
        let reg = Registry::new();
        reg.register(make_binding("b", Sharing::Shared), false);
        reg.register(make_binding("a", Sharing::Shared), false);
        assert_eq!(reg.names(), vec!["a", "b"]);
        assert!(!reg.is_empty());
    }
}
