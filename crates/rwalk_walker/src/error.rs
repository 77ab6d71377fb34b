//! Traversal errors.

use rwalk_ast::Node;

/// A failure that aborts a traversal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalkError {
    /// A continuation asked for a key the active table has no entry for.
    #[error("no handler registered for `{0}`")]
    UnknownType(String),

    /// A handler received a node whose shape it cannot walk.
    #[error("malformed node: expected {expected}, found `{found}`")]
    MalformedNode {
        expected: &'static str,
        found: &'static str,
    },
}

impl WalkError {
    pub fn unknown_type(key: &str) -> Self {
        WalkError::UnknownType(key.to_string())
    }

    pub fn malformed(expected: &'static str, node: &Node) -> Self {
        WalkError::MalformedNode {
            expected,
            found: node.type_name(),
        }
    }
}

pub type WalkResult<T = ()> = Result<T, WalkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rwalk_ast::factory::ident;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            WalkError::unknown_type("Statment").to_string(),
            "no handler registered for `Statment`"
        );
        assert_eq!(
            WalkError::malformed("function", &ident("x")).to_string(),
            "malformed node: expected function, found `Identifier`"
        );
    }
}
