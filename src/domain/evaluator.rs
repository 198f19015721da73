//! Set evaluation over a built tree.
//!
//! A single post-order pass computes the result of every operation node once
//! and keeps it in a table keyed by arena index. Explicit nodes are answered
//! straight from their declaration.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::SetTree;
use crate::domain::entities::{Content, DataSet, NodeId, SetOp};

/// Resultant data sets of one tree.
#[derive(Debug)]
pub struct Evaluation<'a> {
    tree: &'a SetTree,
    results: HashMap<Index, DataSet>,
}

impl<'a> Evaluation<'a> {
    pub fn tree(&self) -> &'a SetTree {
        self.tree
    }

    /// Resultant data set of the node at `idx`.
    pub fn data(&self, idx: Index) -> Option<&DataSet> {
        lookup(self.tree, &self.results, idx)
    }

    /// Resultant data set of the node declared with `id`.
    pub fn data_of(&self, id: NodeId) -> Option<&DataSet> {
        self.tree.index_of(id).and_then(|idx| self.data(idx))
    }

    /// Number of operation results computed.
    pub fn combinations(&self) -> usize {
        self.results.len()
    }
}

fn lookup<'t>(
    tree: &'t SetTree,
    results: &'t HashMap<Index, DataSet>,
    idx: Index,
) -> Option<&'t DataSet> {
    match &tree.get_node(idx)?.data.content {
        Content::Explicit(set) => Some(set),
        Content::Operation(_) => results.get(&idx),
    }
}

/// Evaluate every operation node of `tree`, children before parents.
#[instrument(level = "debug", skip_all)]
pub fn evaluate(tree: &SetTree) -> Evaluation<'_> {
    let mut results: HashMap<Index, DataSet> = HashMap::new();

    for (idx, node) in tree.iter_postorder() {
        let Content::Operation(op) = node.data.content else {
            continue;
        };
        let combined = combine(
            op,
            node.children
                .iter()
                .filter_map(|&child| lookup(tree, &results, child)),
        );
        trace!(id = node.data.id, %op, result = %combined, "evaluated");
        results.insert(idx, combined);
    }

    debug!(combinations = results.len(), "evaluation complete");
    Evaluation { tree, results }
}

/// Fold `sets` left to right with `op`.
///
/// Both operations yield the empty set when there is nothing to fold.
pub fn combine<'s, I>(op: SetOp, sets: I) -> DataSet
where
    I: IntoIterator<Item = &'s DataSet>,
{
    let mut sets = sets.into_iter();
    match op {
        SetOp::Union => sets.fold(DataSet::new(), |acc, set| acc.union(set)),
        SetOp::Intersect => match sets.next() {
            Some(first) => sets.fold(first.clone(), |acc, set| acc.intersect(set)),
            None => DataSet::new(),
        },
    }
}
