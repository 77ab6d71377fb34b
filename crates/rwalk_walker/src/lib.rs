//! rwalk_walker: table-driven traversal of ESTree syntax trees.
//!
//! A walker is a [`Table`] mapping node types and categories to handlers.
//! [`base`] builds the default table; [`make`] layers overrides on top of a
//! table; the drivers in this crate ([`simple`], [`recursive`], [`ancestor`],
//! [`find_node_at`], [`find_node_around`]) start a walk at a root node and
//! dispatch every child through the table. [`scope_visitor`] is a ready-made
//! walker that records function and catch scopes.

mod category;
mod cont;
mod error;
mod handlers;
mod scope;
mod table;
mod walk;

pub use category::Category;
pub use cont::Cont;
pub use error::{WalkError, WalkResult};
pub use handlers::base;
pub use scope::{scope_tree, scope_visitor, Binding, BindingKind, Scope, ScopeKind, ScopeRef};
pub use table::{make, Handler, Table};
pub use walk::{
    ancestor, any_node, find_node_around, find_node_at, of_type, recursive, simple, AncestorVisitor,
    AncestorVisitors, Visitor, Visitors,
};
