//! Diagram rendering for evaluated set trees.

use std::fmt;
use std::str::FromStr;

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::TreeNode;
use crate::domain::entities::{Content, DataSet};
use crate::domain::evaluator::Evaluation;

/// Layout of the rendered diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// `|` connectors and `+- ` prefixes
    #[default]
    Ascii,
    /// Box-drawing connectors
    Tree,
}

/// Order in which set elements are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementOrder {
    /// First occurrence
    #[default]
    Insertion,
    Ascending,
}

impl FromStr for RenderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(RenderStyle::Ascii),
            "tree" => Ok(RenderStyle::Tree),
            other => Err(format!("unknown style '{}', expected ascii or tree", other)),
        }
    }
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStyle::Ascii => f.write_str("ascii"),
            RenderStyle::Tree => f.write_str("tree"),
        }
    }
}

impl FromStr for ElementOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "insertion" => Ok(ElementOrder::Insertion),
            "ascending" => Ok(ElementOrder::Ascending),
            other => Err(format!(
                "unknown element order '{}', expected insertion or ascending",
                other
            )),
        }
    }
}

impl fmt::Display for ElementOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementOrder::Insertion => f.write_str("insertion"),
            ElementOrder::Ascending => f.write_str("ascending"),
        }
    }
}

/// Turns an [`Evaluation`] into text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    style: RenderStyle,
    order: ElementOrder,
}

impl Renderer {
    pub fn new(style: RenderStyle, order: ElementOrder) -> Self {
        Self { style, order }
    }

    #[instrument(level = "debug", skip_all, fields(style = %self.style))]
    pub fn render(&self, evaluation: &Evaluation<'_>) -> String {
        match self.style {
            RenderStyle::Ascii => self.render_ascii(evaluation),
            RenderStyle::Tree => evaluation
                .tree()
                .root()
                .map(|root| self.to_tree_string(evaluation, root).to_string())
                .unwrap_or_default(),
        }
    }

    /// Pre-order walk with an explicit stack of `(node, depth)`.
    fn render_ascii(&self, evaluation: &Evaluation<'_>) -> String {
        let tree = evaluation.tree();
        let mut out = String::new();
        let mut stack: Vec<(Index, usize)> = tree.root().map(|r| (r, 0)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            let Some(node) = tree.get_node(idx) else {
                continue;
            };
            if depth > 0 {
                let indent = "|  ".repeat(depth - 1);
                out.push_str(&indent);
                out.push_str("|\n");
                out.push_str(&indent);
                out.push_str("+- ");
            }
            out.push_str(&self.node_line(evaluation, idx, node));
            out.push('\n');

            stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
        }
        out
    }

    fn to_tree_string(&self, evaluation: &Evaluation<'_>, idx: Index) -> Tree<String> {
        let Some(node) = evaluation.tree().get_node(idx) else {
            return Tree::new(String::new());
        };
        let leaves: Vec<_> = node
            .children
            .iter()
            .map(|&child| self.to_tree_string(evaluation, child))
            .collect();

        Tree::new(self.node_line(evaluation, idx, node)).with_leaves(leaves)
    }

    /// `<id> : <label> -> <result>`
    fn node_line(&self, evaluation: &Evaluation<'_>, idx: Index, node: &TreeNode) -> String {
        let result = evaluation
            .data(idx)
            .map(|set| self.format_set(set))
            .unwrap_or_else(|| self.format_set(&DataSet::new()));
        let label = match &node.data.content {
            Content::Operation(op) => op.token().to_string(),
            Content::Explicit(set) => self.format_set(set),
        };
        format!("{} : {} -> {}", node.data.id, label, result)
    }

    fn format_set(&self, set: &DataSet) -> String {
        match self.order {
            ElementOrder::Insertion => set.to_string(),
            ElementOrder::Ascending => set.sorted().to_string(),
        }
    }
}
