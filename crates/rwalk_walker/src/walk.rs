//! Traversal drivers.
//!
//! All drivers take the state by shared reference and thread it unchanged
//! to every handler and visitor. State that must change during a walk uses
//! interior mutability (`Cell`, `RefCell`, atomics); every later visit,
//! siblings included, observes those changes.

use crate::cont::{Cont, Observer, Target};
use crate::error::WalkResult;
use crate::table::{make, with_base, Table};
use rustc_hash::FxHashMap;
use rwalk_ast::Node;
use std::sync::Arc;

/// An observation callback for [`simple`].
pub type Visitor<S> = Arc<dyn Fn(&Node, &S) + Send + Sync>;

/// An observation callback for [`ancestor`]; the slice is the path from the
/// root down to and including the visited node.
pub type AncestorVisitor<S> = Arc<dyn Fn(&Node, &S, &[&Node]) + Send + Sync>;

/// Visitors keyed by node type or category name.
pub struct Visitors<S> {
    map: FxHashMap<String, Visitor<S>>,
}

impl<S> Visitors<S> {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    /// Register `visit` for `key`, replacing any previous visitor.
    pub fn on<F>(mut self, key: impl Into<String>, visit: F) -> Self
    where
        F: Fn(&Node, &S) + Send + Sync + 'static,
    {
        self.map.insert(key.into(), Arc::new(visit));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Visitor<S>> {
        self.map.get(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<S> Default for Visitors<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Visitors for [`ancestor`], keyed like [`Visitors`].
pub struct AncestorVisitors<S> {
    map: FxHashMap<String, AncestorVisitor<S>>,
}

impl<S> AncestorVisitors<S> {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    pub fn on<F>(mut self, key: impl Into<String>, visit: F) -> Self
    where
        F: Fn(&Node, &S, &[&Node]) + Send + Sync + 'static,
    {
        self.map.insert(key.into(), Arc::new(visit));
        self
    }

    pub fn get(&self, key: &str) -> Option<&AncestorVisitor<S>> {
        self.map.get(key)
    }
}

impl<S> Default for AncestorVisitors<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk `node` through `base` (the default table when `None`), calling the
/// visitor registered for each dispatch key on the way down.
///
/// A node routed through a category hits the category's visitor and then
/// its own type's visitor. Visitors cannot alter the descent.
pub fn simple<'n, S: 'static>(
    node: &'n Node,
    visitors: &Visitors<S>,
    base: Option<&Table<S>>,
    state: &S,
) -> WalkResult {
    with_base(base, |table| {
        tracing::debug!(handlers = table.len(), visitors = visitors.len(), "simple walk");
        Cont::new(table, Observer::Simple(visitors)).walk(node, state, None)
    })
}

/// Walk `node` through `make(overrides, base)`.
///
/// An override replaces the default recursion for its key entirely: the
/// subtree below it is walked only through the continuation calls it makes.
pub fn recursive<'n, S: 'static>(
    node: &'n Node,
    state: &S,
    overrides: &Table<S>,
    base: Option<&Table<S>>,
) -> WalkResult {
    let table = make(overrides, base);
    tracing::debug!(handlers = table.len(), overrides = overrides.len(), "recursive walk");
    Cont::new(&table, Observer::Silent).walk(node, state, None)
}

/// Like [`simple`], but each visitor runs after the node's children and
/// also receives the ancestor path.
pub fn ancestor<'n, S: 'static>(
    node: &'n Node,
    visitors: &AncestorVisitors<S>,
    base: Option<&Table<S>>,
    state: &S,
) -> WalkResult {
    with_base(base, |table| {
        tracing::debug!(handlers = table.len(), "ancestor walk");
        Cont::new(table, Observer::Ancestor(visitors)).walk(node, state, None)
    })
}

/// Find a node whose range starts at `start` and ends at `end` (either bound
/// may be left open) and for which `test(key, node)` holds.
///
/// Only nodes whose range covers the bounds are descended into; children are
/// checked before their parent, so the innermost match wins. The walk stops
/// at the first match.
pub fn find_node_at<'n, S: 'static>(
    node: &'n Node,
    start: Option<u32>,
    end: Option<u32>,
    test: impl Fn(&str, &Node) -> bool,
    base: Option<&Table<S>>,
    state: &S,
) -> WalkResult<Option<&'n Node>> {
    let target = Target::At { start, end };
    with_base(base, |table| {
        let cont = Cont::new(table, Observer::Find(&test, target));
        cont.walk(node, state, None)?;
        Ok(cont.found())
    })
}

/// Find the innermost node whose range contains `pos` (both ends inclusive)
/// and for which `test(key, node)` holds.
pub fn find_node_around<'n, S: 'static>(
    node: &'n Node,
    pos: u32,
    test: impl Fn(&str, &Node) -> bool,
    base: Option<&Table<S>>,
    state: &S,
) -> WalkResult<Option<&'n Node>> {
    with_base(base, |table| {
        let cont = Cont::new(table, Observer::Find(&test, Target::Around(pos)));
        cont.walk(node, state, None)?;
        Ok(cont.found())
    })
}

/// A `find_*` test accepting any node.
pub fn any_node(_key: &str, _node: &Node) -> bool {
    true
}

/// A `find_*` test accepting nodes dispatched under `key`.
pub fn of_type(key: &str) -> impl Fn(&str, &Node) -> bool + '_ {
    move |candidate, _| candidate == key
}
