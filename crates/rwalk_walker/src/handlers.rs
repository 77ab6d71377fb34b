//! Default handlers: the standard way to walk every supported node shape.
//!
//! Each handler walks exactly the child positions of its shape, routing each
//! child through the category matching its role. The category entries
//! themselves ("Statement", "Expression") just re-dispatch on the node's own
//! type; they exist as hooks a walker can override once to see every node of
//! that role.

use crate::category::Category;
use crate::cont::Cont;
use crate::error::{WalkError, WalkResult};
use crate::table::Table;
use rwalk_ast::{Node, NodeKind};

/// The default table every walker is built on unless told otherwise.
///
/// Contains an entry for each ESTree type in [`NodeKind::TYPE_NAMES`] and for
/// each [`Category`].
pub fn base<S: 'static>() -> Table<S> {
    let mut table = Table::new();
    table
        .insert("Program", statement_list::<S>)
        .insert("BlockStatement", statement_list::<S>)
        .insert("Statement", skip_through::<S>)
        .insert("EmptyStatement", ignore::<S>)
        .insert("ExpressionStatement", expression_statement::<S>)
        .insert("IfStatement", if_statement::<S>)
        .insert("LabeledStatement", labeled_statement::<S>)
        .insert("BreakStatement", ignore::<S>)
        .insert("ContinueStatement", ignore::<S>)
        .insert("WithStatement", with_statement::<S>)
        .insert("SwitchStatement", switch_statement::<S>)
        .insert("ReturnStatement", return_statement::<S>)
        .insert("ThrowStatement", throw_statement::<S>)
        .insert("TryStatement", try_statement::<S>)
        .insert("WhileStatement", loop_statement::<S>)
        .insert("DoWhileStatement", loop_statement::<S>)
        .insert("ForStatement", for_statement::<S>)
        .insert("ForInStatement", for_in_statement::<S>)
        .insert("ForInit", for_init::<S>)
        .insert("DebuggerStatement", ignore::<S>)
        .insert("FunctionDeclaration", as_function::<S>)
        .insert("VariableDeclaration", variable_declaration::<S>)
        .insert("Function", function::<S>)
        .insert("ScopeBody", scope_body::<S>)
        .insert("Expression", skip_through::<S>)
        .insert("ThisExpression", ignore::<S>)
        .insert("ArrayExpression", array_expression::<S>)
        .insert("ObjectExpression", object_expression::<S>)
        .insert("FunctionExpression", as_function::<S>)
        .insert("SequenceExpression", sequence_expression::<S>)
        .insert("UnaryExpression", unary::<S>)
        .insert("UpdateExpression", unary::<S>)
        .insert("BinaryExpression", binary::<S>)
        .insert("AssignmentExpression", binary::<S>)
        .insert("LogicalExpression", binary::<S>)
        .insert("ConditionalExpression", conditional_expression::<S>)
        .insert("NewExpression", call::<S>)
        .insert("CallExpression", call::<S>)
        .insert("MemberExpression", member_expression::<S>)
        .insert("Identifier", ignore::<S>)
        .insert("Literal", ignore::<S>);
    table
}

/// Re-dispatch the node under its own type.
fn skip_through<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    c.walk(node, st, None)
}

fn ignore<'n, S>(_node: &'n Node, _st: &S, _c: &Cont<'_, 'n, S>) -> WalkResult {
    Ok(())
}

fn statements<'n, S>(body: &'n [Node], st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    for stmt in body {
        c.walk(stmt, st, Some(Category::Statement))?;
    }
    Ok(())
}

// -- Statements --

fn statement_list<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    match &node.kind {
        NodeKind::Program(program) => statements(&program.body, st, c),
        NodeKind::BlockStatement(block) => statements(&block.body, st, c),
        _ => Err(WalkError::malformed("program or block", node)),
    }
}

fn expression_statement<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::ExpressionStatement(stmt) = &node.kind else {
        return Err(WalkError::malformed("expression statement", node));
    };
    c.walk(&stmt.expression, st, Some(Category::Expression))
}

fn if_statement<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::IfStatement(stmt) = &node.kind else {
        return Err(WalkError::malformed("if statement", node));
    };
    c.walk(&stmt.test, st, Some(Category::Expression))?;
    c.walk(&stmt.consequent, st, Some(Category::Statement))?;
    if let Some(alternate) = &stmt.alternate {
        c.walk(alternate, st, Some(Category::Statement))?;
    }
    Ok(())
}

fn labeled_statement<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::LabeledStatement(stmt) = &node.kind else {
        return Err(WalkError::malformed("labeled statement", node));
    };
    c.walk(&stmt.body, st, Some(Category::Statement))
}

fn with_statement<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::WithStatement(stmt) = &node.kind else {
        return Err(WalkError::malformed("with statement", node));
    };
    c.walk(&stmt.object, st, Some(Category::Expression))?;
    c.walk(&stmt.body, st, Some(Category::Statement))
}

fn switch_statement<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::SwitchStatement(stmt) = &node.kind else {
        return Err(WalkError::malformed("switch statement", node));
    };
    c.walk(&stmt.discriminant, st, Some(Category::Expression))?;
    for case in &stmt.cases {
        if let Some(test) = &case.test {
            c.walk(test, st, Some(Category::Expression))?;
        }
        statements(&case.consequent, st, c)?;
    }
    Ok(())
}

fn return_statement<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::ReturnStatement(stmt) = &node.kind else {
        return Err(WalkError::malformed("return statement", node));
    };
    match &stmt.argument {
        Some(argument) => c.walk(argument, st, Some(Category::Expression)),
        None => Ok(()),
    }
}

fn throw_statement<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::ThrowStatement(stmt) = &node.kind else {
        return Err(WalkError::malformed("throw statement", node));
    };
    c.walk(&stmt.argument, st, Some(Category::Expression))
}

/// Catch bodies go through "ScopeBody" so scope-aware walkers can open a
/// scope for the caught parameter.
fn try_statement<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::TryStatement(stmt) = &node.kind else {
        return Err(WalkError::malformed("try statement", node));
    };
    c.walk(&stmt.block, st, Some(Category::Statement))?;
    for clause in stmt.catch_clauses() {
        c.walk(&clause.body, st, Some(Category::ScopeBody))?;
    }
    if let Some(finalizer) = &stmt.finalizer {
        c.walk(finalizer, st, Some(Category::Statement))?;
    }
    Ok(())
}

/// `while` and `do-while`: test first, then body.
fn loop_statement<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let (NodeKind::WhileStatement(stmt) | NodeKind::DoWhileStatement(stmt)) = &node.kind else {
        return Err(WalkError::malformed("loop statement", node));
    };
    c.walk(&stmt.test, st, Some(Category::Expression))?;
    c.walk(&stmt.body, st, Some(Category::Statement))
}

fn for_statement<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::ForStatement(stmt) = &node.kind else {
        return Err(WalkError::malformed("for statement", node));
    };
    if let Some(init) = &stmt.init {
        c.walk(init, st, Some(Category::ForInit))?;
    }
    if let Some(test) = &stmt.test {
        c.walk(test, st, Some(Category::Expression))?;
    }
    if let Some(update) = &stmt.update {
        c.walk(update, st, Some(Category::Expression))?;
    }
    c.walk(&stmt.body, st, Some(Category::Statement))
}

fn for_in_statement<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::ForInStatement(stmt) = &node.kind else {
        return Err(WalkError::malformed("for-in statement", node));
    };
    c.walk(&stmt.left, st, Some(Category::ForInit))?;
    c.walk(&stmt.right, st, Some(Category::Expression))?;
    c.walk(&stmt.body, st, Some(Category::Statement))
}

/// A declaration keeps its own type; anything else is an expression.
fn for_init<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    if node.is_variable_declaration() {
        c.walk(node, st, None)
    } else {
        c.walk(node, st, Some(Category::Expression))
    }
}

// -- Declarations and functions --

fn as_function<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    c.walk(node, st, Some(Category::Function))
}

fn function<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let func = node
        .as_function()
        .ok_or_else(|| WalkError::malformed("function", node))?;
    c.walk(&func.body, st, Some(Category::ScopeBody))
}

fn scope_body<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    c.walk(node, st, Some(Category::Statement))
}

fn variable_declaration<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::VariableDeclaration(decl) = &node.kind else {
        return Err(WalkError::malformed("variable declaration", node));
    };
    for declarator in &decl.declarations {
        if let Some(init) = &declarator.init {
            c.walk(init, st, Some(Category::Expression))?;
        }
    }
    Ok(())
}

// -- Expressions --

fn array_expression<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::ArrayExpression(array) = &node.kind else {
        return Err(WalkError::malformed("array expression", node));
    };
    for element in array.elements.iter().flatten() {
        c.walk(element, st, Some(Category::Expression))?;
    }
    Ok(())
}

fn object_expression<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::ObjectExpression(object) = &node.kind else {
        return Err(WalkError::malformed("object expression", node));
    };
    for property in &object.properties {
        c.walk(&property.value, st, Some(Category::Expression))?;
    }
    Ok(())
}

fn sequence_expression<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::SequenceExpression(seq) = &node.kind else {
        return Err(WalkError::malformed("sequence expression", node));
    };
    for expr in &seq.expressions {
        c.walk(expr, st, Some(Category::Expression))?;
    }
    Ok(())
}

fn unary<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let (NodeKind::UnaryExpression(expr) | NodeKind::UpdateExpression(expr)) = &node.kind else {
        return Err(WalkError::malformed("unary expression", node));
    };
    c.walk(&expr.argument, st, Some(Category::Expression))
}

fn binary<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let (NodeKind::BinaryExpression(expr)
    | NodeKind::AssignmentExpression(expr)
    | NodeKind::LogicalExpression(expr)) = &node.kind
    else {
        return Err(WalkError::malformed("binary expression", node));
    };
    c.walk(&expr.left, st, Some(Category::Expression))?;
    c.walk(&expr.right, st, Some(Category::Expression))
}

fn conditional_expression<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::ConditionalExpression(expr) = &node.kind else {
        return Err(WalkError::malformed("conditional expression", node));
    };
    c.walk(&expr.test, st, Some(Category::Expression))?;
    c.walk(&expr.consequent, st, Some(Category::Expression))?;
    c.walk(&expr.alternate, st, Some(Category::Expression))
}

fn call<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let (NodeKind::CallExpression(expr) | NodeKind::NewExpression(expr)) = &node.kind else {
        return Err(WalkError::malformed("call expression", node));
    };
    c.walk(&expr.callee, st, Some(Category::Expression))?;
    for argument in &expr.arguments {
        c.walk(argument, st, Some(Category::Expression))?;
    }
    Ok(())
}

/// The property of `a.b` is a name, not an expression; only `a[b]` walks it.
fn member_expression<'n, S>(node: &'n Node, st: &S, c: &Cont<'_, 'n, S>) -> WalkResult {
    let NodeKind::MemberExpression(expr) = &node.kind else {
        return Err(WalkError::malformed("member expression", node));
    };
    c.walk(&expr.object, st, Some(Category::Expression))?;
    if expr.computed {
        c.walk(&expr.property, st, Some(Category::Expression))?;
    }
    Ok(())
}
