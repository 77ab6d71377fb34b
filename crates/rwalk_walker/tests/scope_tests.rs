//! Scope walker integration tests.

use rwalk_ast::factory::*;
use rwalk_ast::{Node, TextRange};
use rwalk_walker::{
    recursive, scope_tree, scope_visitor, BindingKind, Scope, ScopeKind, ScopeRef, Table, WalkError,
};
use std::rc::Rc;

const TRY_SCOPES: &str = include_str!("fixtures/try_scopes.json");

fn kind_of(scope: &Scope, name: &str) -> Option<BindingKind> {
    scope.get(name).map(|binding| binding.kind)
}

fn only_child(scope: &ScopeRef) -> ScopeRef {
    let children = scope.children();
    assert_eq!(children.len(), 1, "expected exactly one nested scope");
    Rc::clone(&children[0])
}

#[test]
fn test_nested_function_scopes() {
    // function f(a) { var b; function g() {} }
    let tree = program(vec![func_decl(
        "f",
        &["a"],
        vec![var("b", None), func_decl("g", &[], vec![])],
    )]);
    let global = scope_tree(&tree).expect("walk");

    assert_eq!(global.kind(), ScopeKind::Global);
    assert_eq!(global.names(), vec!["f"]);
    assert_eq!(kind_of(&global, "f"), Some(BindingKind::Function));

    let f_scope = only_child(&global);
    assert_eq!(f_scope.kind(), ScopeKind::Function);
    assert_eq!(f_scope.names(), vec!["a", "b", "g"]);
    assert_eq!(kind_of(&f_scope, "a"), Some(BindingKind::Argument));
    assert_eq!(kind_of(&f_scope, "b"), Some(BindingKind::Variable));
    assert_eq!(kind_of(&f_scope, "g"), Some(BindingKind::Function));

    let g_scope = only_child(&f_scope);
    assert!(g_scope.is_empty());
    assert!(Rc::ptr_eq(&g_scope.parent().expect("parent"), &f_scope));
    assert_eq!(g_scope.depth(), 2);
    assert_eq!(g_scope.lookup("a").map(|b| b.kind), Some(BindingKind::Argument));
    // g's own scope did not overwrite anything in f's
    assert_eq!(f_scope.len(), 3);
}

#[test]
fn test_named_function_expression() {
    // var h = function named(x) {};
    let tree = program(vec![var("h", Some(func_expr(Some("named"), &["x"], vec![])))]);
    let global = scope_tree(&tree).expect("walk");

    assert_eq!(global.names(), vec!["h"]);
    assert_eq!(kind_of(&global, "h"), Some(BindingKind::Variable));
    assert!(global.lookup("named").is_none());

    let inner = only_child(&global);
    assert_eq!(kind_of(&inner, "named"), Some(BindingKind::FunctionName));
    assert_eq!(kind_of(&inner, "x"), Some(BindingKind::Argument));
}

#[test]
fn test_try_catch_finally_scopes() {
    let tree = Node::from_json(TRY_SCOPES).expect("fixture");
    let global = scope_tree(&tree).expect("walk");

    assert_eq!(global.names(), vec!["x", "z"]);
    assert!(global.get("e").is_none());

    let catch_scope = only_child(&global);
    assert_eq!(catch_scope.kind(), ScopeKind::Catch);
    assert_eq!(catch_scope.names(), vec!["e", "y"]);
    assert_eq!(kind_of(&catch_scope, "e"), Some(BindingKind::CatchParameter));
    assert_eq!(kind_of(&catch_scope, "y"), Some(BindingKind::Variable));
    assert_eq!(catch_scope.lookup("x").map(|b| b.kind), Some(BindingKind::Variable));
}

#[test]
fn test_binding_keeps_declaring_identifier() {
    let tree = Node::from_json(TRY_SCOPES).expect("fixture");
    let global = scope_tree(&tree).expect("walk");

    let x = global.get("x").expect("x");
    assert_eq!(x.name(), "x");
    assert_eq!(x.range(), Some(TextRange::new(10, 11)));

    let e = only_child(&global).get("e").expect("e");
    assert_eq!(e.range(), Some(TextRange::new(22, 23)));
}

#[test]
fn test_legacy_handler_list_opens_one_scope_per_clause() {
    let tree = program(vec![try_stmt(
        vec![],
        vec![catch("first", vec![]), catch("second", vec![var("v", None)])],
        None,
    )]);
    let global = scope_tree(&tree).expect("walk");

    let children = global.children();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].names(), vec!["first"]);
    assert_eq!(children[1].names(), vec!["second", "v"]);
    assert!(global.is_empty());
}

#[test]
fn test_var_in_blocks_binds_in_function_scope() {
    let tree = program(vec![func_decl(
        "f",
        &[],
        vec![
            if_stmt(ident("c"), block(vec![var("inner", None)]), None),
            for_stmt(Some(var("i", Some(num(0.0)))), None, None, block(vec![])),
            for_in(var("k", None), ident("o"), empty()),
        ],
    )]);
    let global = scope_tree(&tree).expect("walk");

    assert_eq!(only_child(&global).names(), vec!["inner", "i", "k"]);
}

#[test]
fn test_initializer_functions_nest_under_current_scope() {
    // function outer() { var cb = function () { var local; }; }
    let tree = program(vec![func_decl(
        "outer",
        &[],
        vec![var("cb", Some(func_expr(None, &[], vec![var("local", None)])))],
    )]);
    let global = scope_tree(&tree).expect("walk");

    let outer = only_child(&global);
    assert_eq!(outer.names(), vec!["cb"]);
    assert_eq!(only_child(&outer).names(), vec!["local"]);
}

#[test]
fn test_scope_visitor_with_caller_root() {
    let root = Scope::global();
    let tree = program(vec![var("a", None)]);
    recursive(&tree, &root, &Table::new(), Some(&scope_visitor())).expect("walk");

    assert_eq!(root.names(), vec!["a"]);
}

#[test]
fn test_non_identifier_parameter_is_malformed() {
    let json = r#"{
        "type": "Program",
        "body": [{
            "type": "FunctionDeclaration",
            "id": { "type": "Identifier", "name": "f" },
            "params": [{ "type": "Literal", "value": 1 }],
            "body": { "type": "BlockStatement", "body": [] }
        }]
    }"#;
    let tree = Node::from_json(json).expect("decode");

    assert_eq!(
        scope_tree(&tree).map(|_| ()),
        Err(WalkError::MalformedNode {
            expected: "parameter identifier",
            found: "Literal",
        })
    );
}
