//! ESTree node definitions.
//!
//! Every node carries its `type` tag (through [`NodeKind`]) and the optional
//! `start`/`end` offsets acorn emits. Child positions are typed per shape;
//! helper records that are never dispatched on their own (switch cases,
//! catch clauses, declarators, object properties) are plain structs.

use crate::text::TextRange;
use serde::Deserialize;

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// One element of an ESTree syntax tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    /// The `type` tag together with the type-specific fields.
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Byte offset where the node starts, if the producer recorded it.
    #[serde(default)]
    pub start: Option<u32>,
    /// Byte offset where the node ends (exclusive).
    #[serde(default)]
    pub end: Option<u32>,
}

impl Node {
    /// Wrap a kind into a node without position information.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            start: None,
            end: None,
        }
    }

    /// Attach source offsets.
    pub fn with_range(mut self, start: u32, end: u32) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// The ESTree `type` name of this node.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// The source range, when both offsets are known.
    pub fn range(&self) -> Option<TextRange> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end >= start => Some(TextRange::new(start, end)),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match &self.kind {
            NodeKind::Identifier(id) => Some(id),
            _ => None,
        }
    }

    /// The function record of a function declaration or expression.
    pub fn as_function(&self) -> Option<&Function> {
        match &self.kind {
            NodeKind::FunctionDeclaration(f) | NodeKind::FunctionExpression(f) => Some(f),
            _ => None,
        }
    }

    pub fn is_variable_declaration(&self) -> bool {
        matches!(self.kind, NodeKind::VariableDeclaration(_))
    }
}

impl From<NodeKind> for Node {
    fn from(kind: NodeKind) -> Self {
        Node::new(kind)
    }
}

// ============================================================================
// Node Kinds
// ============================================================================

/// The supported ES5 grammar shapes, tagged by ESTree `type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    Program(Program),

    // -- Statements --
    EmptyStatement,
    BlockStatement(BlockStatement),
    ExpressionStatement(ExpressionStatement),
    IfStatement(IfStatement),
    LabeledStatement(LabeledStatement),
    BreakStatement(Jump),
    ContinueStatement(Jump),
    WithStatement(WithStatement),
    SwitchStatement(SwitchStatement),
    ReturnStatement(ReturnStatement),
    ThrowStatement(ThrowStatement),
    TryStatement(TryStatement),
    WhileStatement(Loop),
    DoWhileStatement(Loop),
    ForStatement(ForStatement),
    ForInStatement(ForInStatement),
    DebuggerStatement,

    // -- Declarations --
    FunctionDeclaration(Function),
    VariableDeclaration(VariableDeclaration),

    // -- Expressions --
    ThisExpression,
    ArrayExpression(ArrayExpression),
    ObjectExpression(ObjectExpression),
    FunctionExpression(Function),
    SequenceExpression(SequenceExpression),
    UnaryExpression(Unary),
    UpdateExpression(Unary),
    BinaryExpression(Binary),
    AssignmentExpression(Binary),
    LogicalExpression(Binary),
    ConditionalExpression(ConditionalExpression),
    NewExpression(Call),
    CallExpression(Call),
    MemberExpression(MemberExpression),
    Identifier(Identifier),
    Literal(Literal),
}

impl NodeKind {
    /// Every `type` name a [`NodeKind`] can carry, in declaration order.
    pub const TYPE_NAMES: &'static [&'static str] = &[
        "Program",
        "EmptyStatement",
        "BlockStatement",
        "ExpressionStatement",
        "IfStatement",
        "LabeledStatement",
        "BreakStatement",
        "ContinueStatement",
        "WithStatement",
        "SwitchStatement",
        "ReturnStatement",
        "ThrowStatement",
        "TryStatement",
        "WhileStatement",
        "DoWhileStatement",
        "ForStatement",
        "ForInStatement",
        "DebuggerStatement",
        "FunctionDeclaration",
        "VariableDeclaration",
        "ThisExpression",
        "ArrayExpression",
        "ObjectExpression",
        "FunctionExpression",
        "SequenceExpression",
        "UnaryExpression",
        "UpdateExpression",
        "BinaryExpression",
        "AssignmentExpression",
        "LogicalExpression",
        "ConditionalExpression",
        "NewExpression",
        "CallExpression",
        "MemberExpression",
        "Identifier",
        "Literal",
    ];

    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Program(_) => "Program",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::BlockStatement(_) => "BlockStatement",
            NodeKind::ExpressionStatement(_) => "ExpressionStatement",
            NodeKind::IfStatement(_) => "IfStatement",
            NodeKind::LabeledStatement(_) => "LabeledStatement",
            NodeKind::BreakStatement(_) => "BreakStatement",
            NodeKind::ContinueStatement(_) => "ContinueStatement",
            NodeKind::WithStatement(_) => "WithStatement",
            NodeKind::SwitchStatement(_) => "SwitchStatement",
            NodeKind::ReturnStatement(_) => "ReturnStatement",
            NodeKind::ThrowStatement(_) => "ThrowStatement",
            NodeKind::TryStatement(_) => "TryStatement",
            NodeKind::WhileStatement(_) => "WhileStatement",
            NodeKind::DoWhileStatement(_) => "DoWhileStatement",
            NodeKind::ForStatement(_) => "ForStatement",
            NodeKind::ForInStatement(_) => "ForInStatement",
            NodeKind::DebuggerStatement => "DebuggerStatement",
            NodeKind::FunctionDeclaration(_) => "FunctionDeclaration",
            NodeKind::VariableDeclaration(_) => "VariableDeclaration",
            NodeKind::ThisExpression => "ThisExpression",
            NodeKind::ArrayExpression(_) => "ArrayExpression",
            NodeKind::ObjectExpression(_) => "ObjectExpression",
            NodeKind::FunctionExpression(_) => "FunctionExpression",
            NodeKind::SequenceExpression(_) => "SequenceExpression",
            NodeKind::UnaryExpression(_) => "UnaryExpression",
            NodeKind::UpdateExpression(_) => "UpdateExpression",
            NodeKind::BinaryExpression(_) => "BinaryExpression",
            NodeKind::AssignmentExpression(_) => "AssignmentExpression",
            NodeKind::LogicalExpression(_) => "LogicalExpression",
            NodeKind::ConditionalExpression(_) => "ConditionalExpression",
            NodeKind::NewExpression(_) => "NewExpression",
            NodeKind::CallExpression(_) => "CallExpression",
            NodeKind::MemberExpression(_) => "MemberExpression",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::Literal(_) => "Literal",
        }
    }
}

// ============================================================================
// Program and Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Program {
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlockStatement {
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IfStatement {
    pub test: Box<Node>,
    pub consequent: Box<Node>,
    pub alternate: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabeledStatement {
    pub label: Box<Node>,
    pub body: Box<Node>,
}

/// `break` / `continue` with an optional label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Jump {
    pub label: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WithStatement {
    pub object: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SwitchStatement {
    pub discriminant: Box<Node>,
    pub cases: Vec<SwitchCase>,
}

/// A `case`/`default` clause; `test` is `None` for `default`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SwitchCase {
    pub test: Option<Box<Node>>,
    pub consequent: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReturnStatement {
    pub argument: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThrowStatement {
    pub argument: Box<Node>,
}

/// `try` statement.
///
/// Current ESTree has a single `handler`; older producers emit a `handlers`
/// list. Both are accepted, read them through [`TryStatement::catch_clauses`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TryStatement {
    pub block: Box<Node>,
    #[serde(default)]
    pub handler: Option<CatchClause>,
    #[serde(default)]
    pub handlers: Vec<CatchClause>,
    pub finalizer: Option<Box<Node>>,
}

impl TryStatement {
    /// The catch clauses in source order.
    pub fn catch_clauses(&self) -> &[CatchClause] {
        if !self.handlers.is_empty() {
            &self.handlers
        } else {
            self.handler.as_slice()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatchClause {
    pub param: Box<Node>,
    pub body: Box<Node>,
}

/// `while` and `do ... while` loops.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Loop {
    pub test: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForStatement {
    /// Either a `VariableDeclaration` or an expression.
    pub init: Option<Box<Node>>,
    pub test: Option<Box<Node>>,
    pub update: Option<Box<Node>>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForInStatement {
    pub left: Box<Node>,
    pub right: Box<Node>,
    pub body: Box<Node>,
}

// ============================================================================
// Declarations
// ============================================================================

/// Shared shape of function declarations and function expressions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Function {
    pub id: Option<Box<Node>>,
    #[serde(default)]
    pub params: Vec<Node>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VariableDeclaration {
    pub declarations: Vec<VariableDeclarator>,
    #[serde(default)]
    pub kind: DeclarationKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    #[default]
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VariableDeclarator {
    pub id: Box<Node>,
    pub init: Option<Box<Node>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArrayExpression {
    /// `None` entries are holes (`[a, , b]`).
    pub elements: Vec<Option<Node>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectExpression {
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Property {
    pub key: Box<Node>,
    pub value: Box<Node>,
    #[serde(default)]
    pub kind: PropertyKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    #[default]
    Init,
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SequenceExpression {
    pub expressions: Vec<Node>,
}

/// Unary and update expressions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Unary {
    pub operator: String,
    #[serde(default = "default_prefix")]
    pub prefix: bool,
    pub argument: Box<Node>,
}

fn default_prefix() -> bool {
    true
}

/// Binary, assignment and logical expressions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Binary {
    pub operator: String,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConditionalExpression {
    pub test: Box<Node>,
    pub consequent: Box<Node>,
    pub alternate: Box<Node>,
}

/// Call and `new` expressions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Call {
    pub callee: Box<Node>,
    #[serde(default)]
    pub arguments: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MemberExpression {
    pub object: Box<Node>,
    pub property: Box<Node>,
    /// `true` for `a[b]`, `false` for `a.b`.
    #[serde(default)]
    pub computed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identifier {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Literal {
    /// `null`, a boolean, a number or a string. Regular expressions decode to
    /// whatever the producer emitted (usually `{}` or `null`).
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub raw: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Node {
        Node::new(NodeKind::Identifier(Identifier {
            name: name.to_string(),
        }))
    }

    #[test]
    fn test_type_names_cover_every_kind() {
        let samples = [
            Node::new(NodeKind::EmptyStatement),
            Node::new(NodeKind::ThisExpression),
            Node::new(NodeKind::DebuggerStatement),
            ident("a"),
        ];
        for node in &samples {
            assert!(NodeKind::TYPE_NAMES.contains(&node.type_name()));
        }
        assert_eq!(NodeKind::TYPE_NAMES.len(), 36);
    }

    #[test]
    fn test_range_requires_both_offsets() {
        let mut node = ident("a");
        assert_eq!(node.range(), None);
        node.start = Some(3);
        assert_eq!(node.range(), None);
        let node = node.with_range(3, 4);
        assert_eq!(node.range(), Some(TextRange::new(3, 4)));
    }

    #[test]
    fn test_catch_clauses_prefers_list() {
        let clause = |name: &str| CatchClause {
            param: Box::new(ident(name)),
            body: Box::new(Node::new(NodeKind::BlockStatement(BlockStatement { body: vec![] }))),
        };
        let single = TryStatement {
            block: Box::new(Node::new(NodeKind::BlockStatement(BlockStatement { body: vec![] }))),
            handler: Some(clause("e")),
            handlers: vec![],
            finalizer: None,
        };
        assert_eq!(single.catch_clauses().len(), 1);

        let listed = TryStatement {
            handlers: vec![clause("a"), clause("b")],
            ..single.clone()
        };
        let names: Vec<_> = listed
            .catch_clauses()
            .iter()
            .filter_map(|c| c.param.as_identifier())
            .map(|id| id.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_as_function() {
        let body = Node::new(NodeKind::BlockStatement(BlockStatement { body: vec![] }));
        let func = Node::new(NodeKind::FunctionExpression(Function {
            id: None,
            params: vec![ident("x")],
            body: Box::new(body),
        }));
        assert_eq!(func.as_function().map(|f| f.params.len()), Some(1));
        assert!(ident("x").as_function().is_none());
    }
}
