//! Scope-tracking walker.
//!
//! A walker built on the default table that records which names each
//! function and catch clause introduces. Declarations follow function
//! scoping: `var` binds in the nearest function (or global) scope, blocks do
//! not open scopes, catch parameters are visible only inside their clause.

use crate::category::Category;
use crate::cont::Cont;
use crate::error::{WalkError, WalkResult};
use crate::table::{make, Table};
use crate::walk::recursive;
use indexmap::IndexMap;
use rwalk_ast::{Identifier, Node, NodeKind, TextRange};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Shared handle to a scope; the state type of [`scope_visitor`].
pub type ScopeRef = Rc<Scope>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Global,
    Function,
    Catch,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKind::Global => write!(f, "global"),
            ScopeKind::Function => write!(f, "function"),
            ScopeKind::Catch => write!(f, "catch"),
        }
    }
}

/// How a name entered a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Argument,
    Function,
    FunctionName,
    CatchParameter,
    Variable,
}

impl BindingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BindingKind::Argument => "argument",
            BindingKind::Function => "function",
            BindingKind::FunctionName => "function-name",
            BindingKind::CatchParameter => "catch-parameter",
            BindingKind::Variable => "variable",
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A name bound in a scope, with the identifier that introduced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub kind: BindingKind,
    /// A copy of the declaring `Identifier` node.
    pub node: Node,
}

impl Binding {
    pub fn name(&self) -> &str {
        self.node.as_identifier().map_or("", |id| id.name.as_str())
    }

    pub fn range(&self) -> Option<TextRange> {
        self.node.range()
    }
}

/// One level of the scope chain.
///
/// Child scopes are owned by their parent, so holding the outermost scope
/// keeps the whole tree alive; the link back to the parent is weak.
#[derive(Debug)]
pub struct Scope {
    kind: ScopeKind,
    vars: RefCell<IndexMap<String, Binding>>,
    parent: Option<Weak<Scope>>,
    children: RefCell<Vec<ScopeRef>>,
}

impl Scope {
    /// A fresh outermost scope.
    pub fn global() -> ScopeRef {
        Rc::new(Scope {
            kind: ScopeKind::Global,
            vars: RefCell::new(IndexMap::new()),
            parent: None,
            children: RefCell::new(Vec::new()),
        })
    }

    /// A new scope nested in `parent`.
    pub fn child(parent: &ScopeRef, kind: ScopeKind) -> ScopeRef {
        let scope = Rc::new(Scope {
            kind,
            vars: RefCell::new(IndexMap::new()),
            parent: Some(Rc::downgrade(parent)),
            children: RefCell::new(Vec::new()),
        });
        parent.children.borrow_mut().push(Rc::clone(&scope));
        tracing::trace!(%kind, depth = scope.depth(), "opened scope");
        scope
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// The enclosing scope, while it is still alive.
    pub fn parent(&self) -> Option<ScopeRef> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Nested scopes in the order they were opened.
    pub fn children(&self) -> Vec<ScopeRef> {
        self.children.borrow().clone()
    }

    /// Number of enclosing scopes.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent();
        while let Some(scope) = current {
            depth += 1;
            current = scope.parent();
        }
        depth
    }

    /// Bind `name` in this scope; a later declaration of the same name wins.
    pub fn declare(&self, name: impl Into<String>, binding: Binding) {
        self.vars.borrow_mut().insert(name.into(), binding);
    }

    /// The binding declared directly in this scope.
    pub fn get(&self, name: &str) -> Option<Binding> {
        self.vars.borrow().get(name).cloned()
    }

    /// Resolve `name` here or in the nearest enclosing scope that binds it.
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        if let Some(binding) = self.get(name) {
            return Some(binding);
        }
        let mut current = self.parent();
        while let Some(scope) = current {
            if let Some(binding) = scope.get(name) {
                return Some(binding);
            }
            current = scope.parent();
        }
        None
    }

    pub fn names(&self) -> Vec<String> {
        self.vars.borrow().keys().cloned().collect()
    }

    /// All bindings of this scope in declaration order.
    pub fn bindings(&self) -> Vec<(String, Binding)> {
        self.vars
            .borrow()
            .iter()
            .map(|(name, binding)| (name.clone(), binding.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.vars.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.borrow().is_empty()
    }
}

fn identifier<'n>(node: &'n Node, role: &'static str) -> WalkResult<&'n Identifier> {
    node.as_identifier()
        .ok_or_else(|| WalkError::malformed(role, node))
}

fn bind(scope: &Scope, node: &Node, kind: BindingKind, role: &'static str) -> WalkResult {
    let id = identifier(node, role)?;
    scope.declare(id.name.clone(), Binding {
        kind,
        node: node.clone(),
    });
    Ok(())
}

/// The default walker with scope bookkeeping for functions, `try` and `var`.
///
/// Its state is the current [`ScopeRef`]; start it with [`Scope::global`]
/// or use [`scope_tree`].
pub fn scope_visitor() -> Table<ScopeRef> {
    let overrides = Table::new()
        .with("Function", scoped_function)
        .with("TryStatement", scoped_try)
        .with("VariableDeclaration", scoped_variables);
    make(&overrides, None)
}

fn scoped_function<'n>(node: &'n Node, scope: &ScopeRef, c: &Cont<'_, 'n, ScopeRef>) -> WalkResult {
    let (func, is_declaration) = match &node.kind {
        NodeKind::FunctionDeclaration(func) => (func, true),
        NodeKind::FunctionExpression(func) => (func, false),
        _ => return Err(WalkError::malformed("function", node)),
    };
    let inner = Scope::child(scope, ScopeKind::Function);
    for param in &func.params {
        bind(&inner, param, BindingKind::Argument, "parameter identifier")?;
    }
    if let Some(id) = &func.id {
        if is_declaration {
            bind(scope, id, BindingKind::Function, "function name")?;
        } else {
            bind(&inner, id, BindingKind::FunctionName, "function name")?;
        }
    }
    c.walk(&func.body, &inner, Some(Category::ScopeBody))
}

fn scoped_try<'n>(node: &'n Node, scope: &ScopeRef, c: &Cont<'_, 'n, ScopeRef>) -> WalkResult {
    let NodeKind::TryStatement(stmt) = &node.kind else {
        return Err(WalkError::malformed("try statement", node));
    };
    c.walk(&stmt.block, scope, Some(Category::Statement))?;
    for clause in stmt.catch_clauses() {
        let inner = Scope::child(scope, ScopeKind::Catch);
        bind(&inner, &clause.param, BindingKind::CatchParameter, "catch parameter")?;
        c.walk(&clause.body, &inner, Some(Category::ScopeBody))?;
    }
    if let Some(finalizer) = &stmt.finalizer {
        c.walk(finalizer, scope, Some(Category::Statement))?;
    }
    Ok(())
}

fn scoped_variables<'n>(node: &'n Node, scope: &ScopeRef, c: &Cont<'_, 'n, ScopeRef>) -> WalkResult {
    let NodeKind::VariableDeclaration(decl) = &node.kind else {
        return Err(WalkError::malformed("variable declaration", node));
    };
    for declarator in &decl.declarations {
        bind(scope, &declarator.id, BindingKind::Variable, "declarator identifier")?;
        if let Some(init) = &declarator.init {
            c.walk(init, scope, Some(Category::Expression))?;
        }
    }
    Ok(())
}

/// Run [`scope_visitor`] over `root` from a fresh global scope and return
/// that scope; nested scopes hang off [`Scope::children`].
pub fn scope_tree(root: &Node) -> WalkResult<ScopeRef> {
    let global = Scope::global();
    recursive(root, &global, &Table::new(), Some(&scope_visitor()))?;
    Ok(global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rwalk_ast::factory::ident;

    fn binding(kind: BindingKind, name: &str) -> Binding {
        Binding {
            kind,
            node: ident(name),
        }
    }

    #[test]
    fn test_child_links_both_ways() {
        let global = Scope::global();
        let inner = Scope::child(&global, ScopeKind::Function);
        assert!(Rc::ptr_eq(&inner.parent().expect("parent"), &global));
        assert_eq!(global.children().len(), 1);
        assert_eq!(inner.depth(), 1);
        assert_eq!(global.depth(), 0);
    }

    #[test]
    fn test_lookup_walks_the_chain() {
        let global = Scope::global();
        global.declare("a", binding(BindingKind::Variable, "a"));
        let inner = Scope::child(&global, ScopeKind::Function);
        inner.declare("b", binding(BindingKind::Argument, "b"));

        assert_eq!(inner.lookup("a").map(|b| b.kind), Some(BindingKind::Variable));
        assert_eq!(inner.get("a"), None);
        assert_eq!(global.lookup("b"), None);
    }

    #[test]
    fn test_parent_is_weak() {
        let global = Scope::global();
        let inner = Scope::child(&global, ScopeKind::Catch);
        drop(global);
        assert!(inner.parent().is_none());
    }

    #[test]
    fn test_redeclaration_keeps_position() {
        let scope = Scope::global();
        scope.declare("x", binding(BindingKind::Argument, "x"));
        scope.declare("y", binding(BindingKind::Variable, "y"));
        scope.declare("x", binding(BindingKind::Variable, "x"));
        assert_eq!(scope.names(), vec!["x", "y"]);
        assert_eq!(scope.get("x").map(|b| b.kind), Some(BindingKind::Variable));
    }

    #[test]
    fn test_binding_kind_names() {
        assert_eq!(BindingKind::FunctionName.to_string(), "function-name");
        assert_eq!(BindingKind::CatchParameter.to_string(), "catch-parameter");
        assert_eq!(ScopeKind::Catch.to_string(), "catch");
    }
}
