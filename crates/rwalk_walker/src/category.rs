//! Category keys.
//!
//! A category names the syntactic role a child plays rather than its concrete
//! shape. Handlers pass one to the continuation to route a child through the
//! category's table entry; the node itself is never altered.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A node in statement position.
    Statement,
    /// A node in expression position.
    Expression,
    /// The body of a function or catch clause: the point where a new scope starts.
    ScopeBody,
    /// The `init` of a `for` or the `left` of a `for-in`: a declaration or an expression.
    ForInit,
    /// Function declarations and expressions alike.
    Function,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Statement,
        Category::Expression,
        Category::ScopeBody,
        Category::ForInit,
        Category::Function,
    ];

    /// The table key this category dispatches through.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Statement => "Statement",
            Category::Expression => "Expression",
            Category::ScopeBody => "ScopeBody",
            Category::ForInit => "ForInit",
            Category::Function => "Function",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_key() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!("Identifier".parse::<Category>().is_err());
    }
}
