//! Synthetic node construction.
//!
//! Builds trees in code for tests and benchmarks, without going through a
//! parser or JSON. Nodes created here carry no source offsets.
//!
//! # Example
//! ```
//! use rwalk_ast::factory::*;
//! // function f(a) { var b = a; }
//! let tree = program(vec![func_decl("f", &["a"], vec![var("b", Some(ident("a")))])]);
//! assert_eq!(tree.type_name(), "Program");
//! ```

use crate::node::*;

fn boxed(node: Node) -> Box<Node> {
    Box::new(node)
}

fn opt(node: Option<Node>) -> Option<Box<Node>> {
    node.map(Box::new)
}

// -- Program and statements --

pub fn program(body: Vec<Node>) -> Node {
    NodeKind::Program(Program { body }).into()
}

pub fn block(body: Vec<Node>) -> Node {
    NodeKind::BlockStatement(BlockStatement { body }).into()
}

pub fn empty() -> Node {
    NodeKind::EmptyStatement.into()
}

pub fn expr_stmt(expression: Node) -> Node {
    NodeKind::ExpressionStatement(ExpressionStatement {
        expression: boxed(expression),
    })
    .into()
}

pub fn if_stmt(test: Node, consequent: Node, alternate: Option<Node>) -> Node {
    NodeKind::IfStatement(IfStatement {
        test: boxed(test),
        consequent: boxed(consequent),
        alternate: opt(alternate),
    })
    .into()
}

pub fn labeled(label: &str, body: Node) -> Node {
    NodeKind::LabeledStatement(LabeledStatement {
        label: boxed(ident(label)),
        body: boxed(body),
    })
    .into()
}

pub fn break_stmt(label: Option<&str>) -> Node {
    NodeKind::BreakStatement(Jump {
        label: label.map(|l| boxed(ident(l))),
    })
    .into()
}

pub fn continue_stmt(label: Option<&str>) -> Node {
    NodeKind::ContinueStatement(Jump {
        label: label.map(|l| boxed(ident(l))),
    })
    .into()
}

pub fn with_stmt(object: Node, body: Node) -> Node {
    NodeKind::WithStatement(WithStatement {
        object: boxed(object),
        body: boxed(body),
    })
    .into()
}

pub fn switch_stmt(discriminant: Node, cases: Vec<SwitchCase>) -> Node {
    NodeKind::SwitchStatement(SwitchStatement {
        discriminant: boxed(discriminant),
        cases,
    })
    .into()
}

/// A `case test:` clause, or `default:` when `test` is `None`.
pub fn case(test: Option<Node>, consequent: Vec<Node>) -> SwitchCase {
    SwitchCase {
        test: opt(test),
        consequent,
    }
}

pub fn return_stmt(argument: Option<Node>) -> Node {
    NodeKind::ReturnStatement(ReturnStatement {
        argument: opt(argument),
    })
    .into()
}

pub fn throw_stmt(argument: Node) -> Node {
    NodeKind::ThrowStatement(ThrowStatement {
        argument: boxed(argument),
    })
    .into()
}

/// `try { block } catch (...) { ... } finally { finalizer }`.
/// `block` and `finalizer` are statement lists wrapped into blocks.
pub fn try_stmt(block_body: Vec<Node>, handlers: Vec<CatchClause>, finalizer: Option<Vec<Node>>) -> Node {
    NodeKind::TryStatement(TryStatement {
        block: boxed(block(block_body)),
        handler: None,
        handlers,
        finalizer: finalizer.map(|body| boxed(block(body))),
    })
    .into()
}

pub fn catch(param: &str, body: Vec<Node>) -> CatchClause {
    CatchClause {
        param: boxed(ident(param)),
        body: boxed(block(body)),
    }
}

pub fn while_stmt(test: Node, body: Node) -> Node {
    NodeKind::WhileStatement(Loop {
        test: boxed(test),
        body: boxed(body),
    })
    .into()
}

pub fn do_while(body: Node, test: Node) -> Node {
    NodeKind::DoWhileStatement(Loop {
        test: boxed(test),
        body: boxed(body),
    })
    .into()
}

pub fn for_stmt(init: Option<Node>, test: Option<Node>, update: Option<Node>, body: Node) -> Node {
    NodeKind::ForStatement(ForStatement {
        init: opt(init),
        test: opt(test),
        update: opt(update),
        body: boxed(body),
    })
    .into()
}

pub fn for_in(left: Node, right: Node, body: Node) -> Node {
    NodeKind::ForInStatement(ForInStatement {
        left: boxed(left),
        right: boxed(right),
        body: boxed(body),
    })
    .into()
}

pub fn debugger() -> Node {
    NodeKind::DebuggerStatement.into()
}

// -- Declarations --

fn function(id: Option<&str>, params: &[&str], body: Vec<Node>) -> Function {
    Function {
        id: id.map(|name| boxed(ident(name))),
        params: params.iter().map(|p| ident(p)).collect(),
        body: boxed(block(body)),
    }
}

pub fn func_decl(name: &str, params: &[&str], body: Vec<Node>) -> Node {
    NodeKind::FunctionDeclaration(function(Some(name), params, body)).into()
}

pub fn func_expr(name: Option<&str>, params: &[&str], body: Vec<Node>) -> Node {
    NodeKind::FunctionExpression(function(name, params, body)).into()
}

pub fn declarator(name: &str, init: Option<Node>) -> VariableDeclarator {
    VariableDeclarator {
        id: boxed(ident(name)),
        init: opt(init),
    }
}

pub fn var_decl(declarations: Vec<VariableDeclarator>) -> Node {
    NodeKind::VariableDeclaration(VariableDeclaration {
        declarations,
        kind: DeclarationKind::Var,
    })
    .into()
}

/// `var name = init;` with a single declarator.
pub fn var(name: &str, init: Option<Node>) -> Node {
    var_decl(vec![declarator(name, init)])
}

// -- Expressions --

pub fn this() -> Node {
    NodeKind::ThisExpression.into()
}

pub fn array(elements: Vec<Option<Node>>) -> Node {
    NodeKind::ArrayExpression(ArrayExpression { elements }).into()
}

/// Object literal with `init` properties keyed by identifiers.
pub fn object(properties: Vec<(&str, Node)>) -> Node {
    let properties = properties
        .into_iter()
        .map(|(key, value)| Property {
            key: boxed(ident(key)),
            value: boxed(value),
            kind: PropertyKind::Init,
        })
        .collect();
    NodeKind::ObjectExpression(ObjectExpression { properties }).into()
}

pub fn sequence(expressions: Vec<Node>) -> Node {
    NodeKind::SequenceExpression(SequenceExpression { expressions }).into()
}

pub fn unary(operator: &str, argument: Node) -> Node {
    NodeKind::UnaryExpression(Unary {
        operator: operator.to_string(),
        prefix: true,
        argument: boxed(argument),
    })
    .into()
}

pub fn update(operator: &str, prefix: bool, argument: Node) -> Node {
    NodeKind::UpdateExpression(Unary {
        operator: operator.to_string(),
        prefix,
        argument: boxed(argument),
    })
    .into()
}

fn binary_parts(operator: &str, left: Node, right: Node) -> Binary {
    Binary {
        operator: operator.to_string(),
        left: boxed(left),
        right: boxed(right),
    }
}

pub fn binary(operator: &str, left: Node, right: Node) -> Node {
    NodeKind::BinaryExpression(binary_parts(operator, left, right)).into()
}

pub fn assign(operator: &str, left: Node, right: Node) -> Node {
    NodeKind::AssignmentExpression(binary_parts(operator, left, right)).into()
}

pub fn logical(operator: &str, left: Node, right: Node) -> Node {
    NodeKind::LogicalExpression(binary_parts(operator, left, right)).into()
}

pub fn conditional(test: Node, consequent: Node, alternate: Node) -> Node {
    NodeKind::ConditionalExpression(ConditionalExpression {
        test: boxed(test),
        consequent: boxed(consequent),
        alternate: boxed(alternate),
    })
    .into()
}

pub fn call(callee: Node, arguments: Vec<Node>) -> Node {
    NodeKind::CallExpression(Call {
        callee: boxed(callee),
        arguments,
    })
    .into()
}

pub fn new_expr(callee: Node, arguments: Vec<Node>) -> Node {
    NodeKind::NewExpression(Call {
        callee: boxed(callee),
        arguments,
    })
    .into()
}

/// Static member access `object.name`.
pub fn member(object: Node, name: &str) -> Node {
    NodeKind::MemberExpression(MemberExpression {
        object: boxed(object),
        property: boxed(ident(name)),
        computed: false,
    })
    .into()
}

/// Computed member access `object[property]`.
pub fn index(object: Node, property: Node) -> Node {
    NodeKind::MemberExpression(MemberExpression {
        object: boxed(object),
        property: boxed(property),
        computed: true,
    })
    .into()
}

pub fn ident(name: &str) -> Node {
    NodeKind::Identifier(Identifier {
        name: name.to_string(),
    })
    .into()
}

fn literal(value: serde_json::Value) -> Node {
    NodeKind::Literal(Literal { value, raw: None }).into()
}

pub fn num(value: f64) -> Node {
    literal(serde_json::Value::from(value))
}

pub fn string(value: &str) -> Node {
    literal(serde_json::Value::from(value))
}

pub fn boolean(value: bool) -> Node {
    literal(serde_json::Value::from(value))
}

pub fn null() -> Node {
    literal(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_shapes() {
        let decl = func_decl("f", &["a", "b"], vec![return_stmt(Some(ident("a")))]);
        let func = decl.as_function().map(|f| f.params.len());
        assert_eq!(decl.type_name(), "FunctionDeclaration");
        assert_eq!(func, Some(2));

        let expr = func_expr(None, &[], vec![]);
        assert_eq!(expr.type_name(), "FunctionExpression");
        assert!(expr.as_function().is_some_and(|f| f.id.is_none()));
    }

    #[test]
    fn test_member_computed_flag() {
        let dotted = member(ident("a"), "b");
        let bracketed = index(ident("a"), string("b"));
        match (&dotted.kind, &bracketed.kind) {
            (NodeKind::MemberExpression(d), NodeKind::MemberExpression(b)) => {
                assert!(!d.computed);
                assert!(b.computed);
            }
            _ => panic!("expected member expressions"),
        }
    }

    #[test]
    fn test_literals() {
        match &num(1.5).kind {
            NodeKind::Literal(lit) => assert_eq!(lit.value, serde_json::json!(1.5)),
            other => panic!("unexpected {:?}", other),
        }
        match &null().kind {
            NodeKind::Literal(lit) => assert!(lit.value.is_null()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_try_wraps_blocks() {
        let node = try_stmt(vec![empty()], vec![catch("e", vec![])], Some(vec![]));
        match &node.kind {
            NodeKind::TryStatement(t) => {
                assert_eq!(t.block.type_name(), "BlockStatement");
                assert_eq!(t.catch_clauses().len(), 1);
                assert!(t.finalizer.is_some());
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
