//! Report types printed by the subcommands, in text or JSON.

use rwalk_ast::{Node, NodeKind};
use rwalk_walker::{simple, Category, Scope, Visitors, WalkResult};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

// ============================================================================
// Scopes
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ScopeReport {
    pub kind: String,
    pub depth: usize,
    pub bindings: Vec<BindingReport>,
    pub children: Vec<ScopeReport>,
}

#[derive(Debug, Serialize)]
pub struct BindingReport {
    pub name: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
}

impl ScopeReport {
    pub fn from_scope(scope: &Scope) -> Self {
        let bindings = scope
            .bindings()
            .into_iter()
            .map(|(name, binding)| BindingReport {
                name,
                kind: binding.kind.as_str(),
                start: binding.node.start,
                end: binding.node.end,
            })
            .collect();
        Self {
            kind: scope.kind().to_string(),
            depth: scope.depth(),
            bindings,
            children: scope
                .children()
                .iter()
                .map(|child| ScopeReport::from_scope(child))
                .collect(),
        }
    }

    fn render(&self, out: &mut String) -> fmt::Result {
        let indent = "  ".repeat(self.depth);
        writeln!(out, "{}{} scope", indent, self.kind)?;
        for binding in &self.bindings {
            write!(out, "{}  {} ({})", indent, binding.name, binding.kind)?;
            if let (Some(start), Some(end)) = (binding.start, binding.end) {
                write!(out, " at {}..{}", start, end)?;
            }
            out.push('\n');
        }
        for child in &self.children {
            child.render(out)?;
        }
        Ok(())
    }
}

impl fmt::Display for ScopeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render(&mut out)?;
        f.write_str(out.trim_end())
    }
}

// ============================================================================
// Stats
// ============================================================================

/// Visit counts per dispatch key from a simple walk.
#[derive(Debug, Default, Serialize)]
pub struct StatsReport {
    /// Number of nodes visited under their own type.
    pub nodes: usize,
    pub types: BTreeMap<String, usize>,
    pub categories: BTreeMap<String, usize>,
}

type Counts = RefCell<BTreeMap<&'static str, usize>>;

impl StatsReport {
    pub fn collect(tree: &Node) -> WalkResult<Self> {
        let keys = NodeKind::TYPE_NAMES
            .iter()
            .copied()
            .chain(Category::ALL.iter().map(|category| category.as_str()));
        let visitors = keys.fold(Visitors::<Counts>::new(), |visitors, key| {
            visitors.on(key, move |_, counts: &Counts| {
                *counts.borrow_mut().entry(key).or_default() += 1;
            })
        });

        let counts = Counts::default();
        simple(tree, &visitors, None, &counts)?;

        let mut report = StatsReport::default();
        for (key, count) in counts.into_inner() {
            if key.parse::<Category>().is_ok() {
                report.categories.insert(key.to_string(), count);
            } else {
                report.nodes += count;
                report.types.insert(key.to_string(), count);
            }
        }
        Ok(report)
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} nodes", self.nodes)?;
        let mut types: Vec<_> = self.types.iter().collect();
        types.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (key, count) in types {
            writeln!(f, "{:>8}  {}", count, key)?;
        }
        write!(f, "categories:")?;
        for (key, count) in &self.categories {
            write!(f, "\n{:>8}  {}", count, key)?;
        }
        Ok(())
    }
}

// ============================================================================
// Find
// ============================================================================

#[derive(Debug, Serialize)]
pub struct FoundNode {
    #[serde(rename = "type")]
    pub node_type: &'static str,
    pub start: Option<u32>,
    pub end: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FoundNode {
    pub fn new(node: &Node) -> Self {
        Self {
            node_type: node.type_name(),
            start: node.start,
            end: node.end,
            name: node.as_identifier().map(|id| id.name.clone()),
        }
    }
}

impl fmt::Display for FoundNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node_type)?;
        if let Some(name) = &self.name {
            write!(f, " `{}`", name)?;
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            write!(f, " at {}..{}", start, end)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rwalk_ast::factory::*;
    use rwalk_walker::scope_tree;

    #[test]
    fn test_scope_report_text() {
        let tree = program(vec![func_decl("f", &["a"], vec![var("b", None)])]);
        let global = scope_tree(&tree).expect("walk");
        let report = ScopeReport::from_scope(&global);

        assert_eq!(
            report.to_string(),
            "global scope\n  f (function)\n  function scope\n    a (argument)\n    b (variable)"
        );
    }

    #[test]
    fn test_scope_report_json_skips_missing_offsets() {
        let tree = program(vec![var("x", None)]);
        let global = scope_tree(&tree).expect("walk");
        let json = serde_json::to_value(ScopeReport::from_scope(&global)).expect("json");

        assert_eq!(
            json,
            serde_json::json!({
                "kind": "global",
                "depth": 0,
                "bindings": [{ "name": "x", "kind": "variable" }],
                "children": []
            })
        );
    }

    #[test]
    fn test_stats_counts_types_and_categories() {
        let tree = program(vec![expr_stmt(binary("+", ident("a"), ident("b")))]);
        let stats = StatsReport::collect(&tree).expect("walk");

        assert_eq!(stats.nodes, 5);
        assert_eq!(stats.types.get("Identifier"), Some(&2));
        assert_eq!(stats.categories.get("Expression"), Some(&3));
        assert_eq!(stats.categories.get("Statement"), Some(&1));
        assert!(!stats.types.contains_key("Literal"));
    }

    #[test]
    fn test_found_node_display() {
        let node = ident("x").with_range(3, 4);
        assert_eq!(FoundNode::new(&node).to_string(), "Identifier `x` at 3..4");
        assert_eq!(FoundNode::new(&this()).to_string(), "ThisExpression");
    }
}
