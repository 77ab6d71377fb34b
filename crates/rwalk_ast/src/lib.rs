//! rwalk_ast: ESTree syntax tree definitions.
//!
//! Defines the node shapes the walker understands (the ES5 subset of ESTree),
//! JSON decoding for trees produced by external parsers, and a factory for
//! building trees in code.

pub mod factory;
mod load;
pub mod node;
pub mod text;

// Re-export key types
pub use load::{LoadError, MAX_DEPTH};
pub use node::*;
pub use text::{TextPos, TextRange};
