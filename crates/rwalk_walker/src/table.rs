//! Dispatch tables and walker construction.

use crate::cont::Cont;
use crate::error::WalkResult;
use crate::handlers;
use indexmap::IndexMap;
use rwalk_ast::Node;
use std::fmt;
use std::sync::Arc;

/// How to walk one node type or category.
///
/// A handler receives the node, the caller's state and the continuation it
/// uses to recurse into children. Children it does not pass to the
/// continuation are never visited.
pub type Handler<S> = Arc<
    dyn for<'r, 'w, 'n> Fn(&'n Node, &'r S, &'r Cont<'w, 'n, S>) -> WalkResult + Send + Sync,
>;

/// A mapping from dispatch key (node type or category name) to handler.
///
/// Insertion order is kept so tables print and iterate predictably. Two
/// tables compare equal when they have the same keys and share the same
/// handler for each of them.
pub struct Table<S> {
    handlers: IndexMap<String, Handler<S>>,
}

impl<S> Table<S> {
    /// An empty table. Mostly useful as an override set for [`make`].
    pub fn new() -> Self {
        Self {
            handlers: IndexMap::new(),
        }
    }

    /// Register `handler` under `key`, replacing any previous entry.
    pub fn insert<F>(&mut self, key: impl Into<String>, handler: F) -> &mut Self
    where
        F: for<'r, 'w, 'n> Fn(&'n Node, &'r S, &'r Cont<'w, 'n, S>) -> WalkResult
            + Send
            + Sync
            + 'static,
    {
        self.handlers.insert(key.into(), Arc::new(handler));
        self
    }

    /// Builder form of [`Table::insert`].
    pub fn with<F>(mut self, key: impl Into<String>, handler: F) -> Self
    where
        F: for<'r, 'w, 'n> Fn(&'n Node, &'r S, &'r Cont<'w, 'n, S>) -> WalkResult
            + Send
            + Sync
            + 'static,
    {
        self.insert(key, handler);
        self
    }

    /// Register an already shared handler, e.g. one taken from another table.
    pub fn insert_handler(&mut self, key: impl Into<String>, handler: Handler<S>) -> Option<Handler<S>> {
        self.handlers.insert(key.into(), handler)
    }

    pub fn get(&self, key: &str) -> Option<&Handler<S>> {
        self.handlers.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Whether both tables dispatch `key` to the very same handler.
    pub fn shares_handler(&self, other: &Table<S>, key: &str) -> bool {
        match (self.get(key), other.get(key)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<S> Default for Table<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for Table<S> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<S> PartialEq for Table<S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.keys().all(|key| self.shares_handler(other, key))
    }
}

impl<S> fmt::Debug for Table<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("keys", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Layer `overrides` over `base` (the default table when `None`).
///
/// The result has exactly the keys of `base`. For each key it uses the
/// override registered under that exact key, else the base handler. Override
/// keys the base does not know are dropped without error, so a misspelled
/// key silently never fires.
pub fn make<S: 'static>(overrides: &Table<S>, base: Option<&Table<S>>) -> Table<S> {
    with_base(base, |base| {
        for key in overrides.keys().filter(|key| !base.contains(key)) {
            tracing::debug!(key, "override has no entry in the base table, ignoring");
        }
        let handlers = base
            .handlers
            .iter()
            .map(|(key, handler)| {
                let chosen = overrides.get(key).unwrap_or(handler);
                (key.clone(), Arc::clone(chosen))
            })
            .collect();
        Table { handlers }
    })
}

/// Run `f` against `base`, or against a freshly built default table.
pub(crate) fn with_base<S: 'static, R>(base: Option<&Table<S>>, f: impl FnOnce(&Table<S>) -> R) -> R {
    match base {
        Some(table) => f(table),
        None => f(&handlers::base()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop<'n>(_: &'n Node, _: &(), _: &Cont<'_, 'n, ()>) -> WalkResult {
        Ok(())
    }

    #[test]
    fn test_insert_replaces_and_keeps_order() {
        let mut table: Table<()> = Table::new();
        table.insert("B", noop).insert("A", noop);
        let first = table.get("B").cloned();
        table.insert("B", noop);

        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(table.len(), 2);
        assert!(!Arc::ptr_eq(&first.expect("B"), table.get("B").expect("B")));
    }

    #[test]
    fn test_clone_shares_handlers() {
        let table: Table<()> = Table::new().with("A", noop);
        let copy = table.clone();
        assert!(table.shares_handler(&copy, "A"));
        assert_eq!(table, copy);
    }

    #[test]
    fn test_equality_is_handler_identity() {
        let a: Table<()> = Table::new().with("A", noop);
        let b: Table<()> = Table::new().with("A", noop);
        assert_ne!(a, b);
        assert!(!a.shares_handler(&b, "missing"));
    }

    #[test]
    fn test_debug_lists_keys() {
        let table: Table<()> = Table::new().with("Program", noop);
        assert_eq!(format!("{:?}", table), r#"Table { keys: ["Program"] }"#);
    }
}
