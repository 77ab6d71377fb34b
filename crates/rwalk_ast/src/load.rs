//! Decoding ESTree JSON into [`Node`] trees.
//!
//! Parsers emit one JSON nesting level per tree level (two inside lists), so
//! long operator chains nest deeper than `serde_json`'s default limit of 128.
//! Documents up to [`MAX_DEPTH`] levels are decoded; deeper ones run on a
//! stack grown in proportion to their depth.

use crate::node::Node;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Deepest JSON nesting the loader accepts.
pub const MAX_DEPTH: usize = 2048;

/// Depth up to which decoding runs on the caller's stack.
const SHALLOW_DEPTH: usize = 128;

const STACK_BASE: usize = 1024 * 1024;
const STACK_PER_LEVEL: usize = 64 * 1024;

/// Errors raised while reading a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read syntax tree: {0}")]
    Read(#[source] std::io::Error),

    #[error("syntax tree nests {depth} levels deep, the limit is {limit}")]
    TooDeep { depth: usize, limit: usize },

    #[error("invalid syntax tree: {0}")]
    Json(#[from] serde_json::Error),
}

impl Node {
    /// Decode a tree from ESTree JSON text.
    pub fn from_json(text: &str) -> Result<Node, LoadError> {
        let depth = nesting_depth(text);
        if depth > MAX_DEPTH {
            return Err(LoadError::TooDeep {
                depth,
                limit: MAX_DEPTH,
            });
        }
        if depth <= SHALLOW_DEPTH {
            return decode(text);
        }
        stacker::grow(STACK_BASE + depth * STACK_PER_LEVEL, || decode(text))
    }

    /// Decode a tree from a reader yielding ESTree JSON.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Node, LoadError> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(LoadError::Read)?;
        Node::from_json(&text)
    }

    /// Read and decode an ESTree JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Node, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Node::from_json(&text)
    }
}

fn decode(text: &str) -> Result<Node, LoadError> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let node = Node::deserialize(&mut de)?;
    de.end()?;
    Ok(node)
}

/// Maximum bracket nesting of a JSON document, ignoring brackets in strings.
fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0;
    let mut in_string = false;
    let mut escaped = false;
    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nesting_depth_skips_strings() {
        assert_eq!(nesting_depth("{}"), 1);
        assert_eq!(nesting_depth(r#"{"a": [{"b": 1}], "c": {}}"#), 3);
        assert_eq!(nesting_depth(r#"{"s": "[[{\"]"}"#), 1);
        assert_eq!(nesting_depth("1"), 0);
    }
}
