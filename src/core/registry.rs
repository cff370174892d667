//! Namespace to logger registry
//!
//! The registry owns every logger it creates and guarantees one instance per
//! canonical namespace. Loggers are created on first lookup together with any
//! missing ancestors, and live as long as the registry does.

use super::logger::Logger;
use super::namespace::Namespace;
use crate::handlers::ConsoleHandler;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub(crate) struct RegistryInner {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
}

static GLOBAL_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Cheaply cloneable handle to a logger tree
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

impl Registry {
    /// Empty registry; the root logger has no handlers
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                loggers: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Registry whose root logger writes to the console
    pub fn with_console() -> Self {
        let registry = Self::new();
        registry
            .root()
            .push_handler(Arc::new(ConsoleHandler::new()));
        registry
    }

    /// Process-wide registry, created with a console root on first use
    pub fn global() -> &'static Registry {
        GLOBAL_REGISTRY.get_or_init(Self::with_console)
    }

    pub(crate) fn from_inner(inner: Arc<RegistryInner>) -> Self {
        Self { inner }
    }

    /// Canonical logger for `namespace`, creating it and its ancestors if
    /// needed
    pub fn get_logger(&self, namespace: impl Into<Namespace>) -> Arc<Logger> {
        let namespace = namespace.into();
        if let Some(logger) = self.inner.loggers.read().get(namespace.as_str()) {
            return Arc::clone(logger);
        }

        // Ancestors first, outside the write lock
        let parent = namespace.parent().map(|parent| self.get_logger(parent));

        let key = namespace.as_str().to_string();
        let mut loggers = self.inner.loggers.write();
        let logger = loggers.entry(key).or_insert_with(|| {
            Arc::new(Logger::new(namespace, parent, Arc::downgrade(&self.inner)))
        });
        Arc::clone(logger)
    }

    pub fn root(&self) -> Arc<Logger> {
        self.get_logger(Namespace::root())
    }

    /// Namespaces of every logger created so far, sorted
    pub fn loggers(&self) -> Vec<String> {
        let mut namespaces: Vec<String> = self.inner.loggers.read().keys().cloned().collect();
        namespaces.sort();
        namespaces
    }

    pub fn len(&self) -> usize {
        self.inner.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.loggers.read().is_empty()
    }

    pub fn contains(&self, namespace: impl Into<Namespace>) -> bool {
        self.inner
            .loggers
            .read()
            .contains_key(namespace.into().as_str())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("loggers", &self.loggers())
            .finish()
    }
}

/// Logger from the process-wide registry
pub fn get_logger(namespace: impl Into<Namespace>) -> Arc<Logger> {
    Registry::global().get_logger(namespace)
}

pub fn root_logger() -> Arc<Logger> {
    Registry::global().root()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_per_namespace() {
        let registry = Registry::new();
        let a = registry.get_logger("a.b");
        let b = registry.get_logger("a.b");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_normalised_forms_share_logger() {
        let registry = Registry::new();
        let dotted = registry.get_logger("a.b");
        assert!(Arc::ptr_eq(&dotted, &registry.get_logger(["a", "b"].as_slice())));
        assert!(Arc::ptr_eq(&dotted, &registry.get_logger("a..b.")));
        assert!(Arc::ptr_eq(&dotted, &registry.get_logger(vec!["a.b"])));
    }

    #[test]
    fn test_root_from_empty_or_missing() {
        let registry = Registry::new();
        let root = registry.root();
        assert!(Arc::ptr_eq(&root, &registry.get_logger("")));
        assert!(Arc::ptr_eq(&root, &registry.get_logger(None::<&str>)));
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_ancestors_materialised() {
        let registry = Registry::new();
        let abc = registry.get_logger("a.b.c");
        assert_eq!(registry.loggers(), vec!["", "a", "a.b", "a.b.c"]);

        let ab = abc.parent().expect("parent of a.b.c");
        assert_eq!(ab.namespace(), "a.b");
        assert!(Arc::ptr_eq(ab, &registry.get_logger("a.b")));

        let a = ab.parent().expect("parent of a.b");
        let root = a.parent().expect("parent of a");
        assert!(root.is_root());
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_registries_are_independent() {
        let one = Registry::new();
        let two = Registry::new();
        assert!(!Arc::ptr_eq(&one.get_logger("a"), &two.get_logger("a")));
        assert!(one.contains("a"));
        assert!(!one.contains("b"));
    }

    #[test]
    fn test_with_console_configures_root_only() {
        let registry = Registry::with_console();
        assert_eq!(registry.root().handlers().len(), 1);
        assert_eq!(registry.root().handlers()[0].name(), "console");
        assert!(registry.get_logger("a").handlers().is_empty());
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(Registry::global(), Registry::global()));
        assert!(Arc::ptr_eq(&get_logger("g.x"), &Registry::global().get_logger("g.x")));
        assert!(Arc::ptr_eq(&root_logger(), &Registry::global().root()));
    }
}
