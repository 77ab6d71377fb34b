//! The continuation handed to every handler.

use crate::category::Category;
use crate::error::{WalkError, WalkResult};
use crate::table::Table;
use crate::walk::{AncestorVisitors, Visitors};
use rwalk_ast::Node;
use std::cell::{Cell, RefCell};

const RED_ZONE: usize = 128 * 1024;
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Grow the stack when less than [`RED_ZONE`] remains, so deeply nested trees
/// do not overflow it.
#[inline]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// Recursion entry point for handlers.
///
/// `'w` is the lifetime of the driver's table and visitors, `'n` the
/// lifetime of the tree being walked.
pub struct Cont<'w, 'n, S> {
    table: &'w Table<S>,
    observer: Observer<'w, S>,
    ancestors: RefCell<Vec<&'n Node>>,
    found: Cell<Option<&'n Node>>,
}

/// What a driver does around each dispatch, besides calling the handler.
pub(crate) enum Observer<'w, S> {
    Silent,
    Simple(&'w Visitors<S>),
    Ancestor(&'w AncestorVisitors<S>),
    Find(&'w dyn Fn(&str, &Node) -> bool, Target),
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Target {
    At { start: Option<u32>, end: Option<u32> },
    Around(u32),
}

impl<'w, 'n, S> Cont<'w, 'n, S> {
    pub(crate) fn new(table: &'w Table<S>, observer: Observer<'w, S>) -> Self {
        Self {
            table,
            observer,
            ancestors: RefCell::new(Vec::new()),
            found: Cell::new(None),
        }
    }

    /// The table this walk dispatches through.
    pub fn table(&self) -> &'w Table<S> {
        self.table
    }

    /// Walk `node` with `state`.
    ///
    /// Dispatches through the entry for `category` when given, else through
    /// the entry for the node's own type. Fails with
    /// [`WalkError::UnknownType`] when the table has no such entry.
    pub fn walk(&self, node: &'n Node, state: &S, category: Option<Category>) -> WalkResult {
        if self.found.get().is_some() {
            return Ok(());
        }
        ensure_sufficient_stack(|| self.visit(node, state, category))
    }

    fn visit(&self, node: &'n Node, state: &S, category: Option<Category>) -> WalkResult {
        let key = match category {
            Some(category) => category.as_str(),
            None => node.type_name(),
        };

        match &self.observer {
            Observer::Silent => self.dispatch(key, node, state),
            Observer::Simple(visitors) => {
                if let Some(visit) = visitors.get(key) {
                    visit(node, state);
                }
                self.dispatch(key, node, state)
            }
            Observer::Ancestor(visitors) => {
                let entered = self.enter(node);
                let result = self.dispatch(key, node, state);
                if result.is_ok() {
                    if let Some(visit) = visitors.get(key) {
                        let path = self.ancestors.borrow();
                        visit(node, state, path.as_slice());
                    }
                }
                if entered {
                    self.ancestors.borrow_mut().pop();
                }
                result
            }
            Observer::Find(test, target) => self.try_match(key, node, state, *test, *target),
        }
    }

    pub(crate) fn found(&self) -> Option<&'n Node> {
        self.found.get()
    }

    fn dispatch(&self, key: &str, node: &'n Node, state: &S) -> WalkResult {
        let handler = self
            .table
            .get(key)
            .ok_or_else(|| WalkError::unknown_type(key))?;
        handler(node, state, self)
    }

    /// Push `node` on the ancestor path unless it is already on top (the
    /// same node re-dispatched under a category).
    fn enter(&self, node: &'n Node) -> bool {
        let mut path = self.ancestors.borrow_mut();
        if path.last().is_some_and(|top| std::ptr::eq(*top, node)) {
            return false;
        }
        path.push(node);
        true
    }

    fn try_match(
        &self,
        key: &str,
        node: &'n Node,
        state: &S,
        test: &dyn Fn(&str, &Node) -> bool,
        target: Target,
    ) -> WalkResult {
        match target {
            Target::At { start, end } => {
                let covers = match node.range() {
                    Some(range) => {
                        start.map_or(true, |s| range.pos <= s) && end.map_or(true, |e| range.end >= e)
                    }
                    None => start.is_none() && end.is_none(),
                };
                if covers {
                    self.dispatch(key, node, state)?;
                }
                let exact = start.map_or(true, |s| node.start == Some(s))
                    && end.map_or(true, |e| node.end == Some(e));
                if self.found.get().is_none() && exact && test(key, node) {
                    self.found.set(Some(node));
                }
            }
            Target::Around(pos) => {
                if !node.range().is_some_and(|range| range.contains_inclusive(pos)) {
                    return Ok(());
                }
                self.dispatch(key, node, state)?;
                if self.found.get().is_none() && test(key, node) {
                    self.found.set(Some(node));
                }
            }
        }
        Ok(())
    }
}
