//! Tree builder: turns declaration lines into a validated [`SetTree`].
//!
//! The build runs in two phases. The first pass parses every line in order
//! and records declarations plus `(child, parent)` edges, which lets a line
//! name a parent that is only declared further down. The second phase checks
//! that a root exists and every parent was declared, then links the edges
//! and rejects anything not reachable from the root.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::domain::arena::{NodeData, SetTree};
use crate::domain::entities::{NodeDecl, NodeId};
use crate::domain::error::{ParseError, TreeResult};
use crate::domain::grammar::LineGrammar;
use crate::domain::trace::{BuildTrace, TracingTrace};

/// Constructs set trees from declaration lines.
pub struct TreeBuilder {
    grammar: LineGrammar,
    skip_blank_lines: bool,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A declaration together with the line that produced it.
struct Declared {
    line_no: usize,
    decl: NodeDecl,
}

/// Result of the first pass.
#[derive(Default)]
struct Declarations {
    nodes: Vec<Declared>,
    positions: HashMap<NodeId, usize>,
    root: Option<usize>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            grammar: LineGrammar::new(),
            skip_blank_lines: false,
        }
    }

    /// Ignore empty and whitespace-only lines instead of rejecting them.
    /// Line numbers in errors still count the skipped lines.
    pub fn skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }

    /// Build a tree, reporting progress as `tracing` events.
    pub fn build<I, S>(&self, lines: I) -> TreeResult<SetTree>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.build_traced(lines, &mut TracingTrace)
    }

    /// Build a tree, reporting progress to `trace`.
    #[instrument(level = "debug", skip_all)]
    pub fn build_traced<I, S>(&self, lines: I, trace: &mut dyn BuildTrace) -> TreeResult<SetTree>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let result = match self.collect(lines, trace) {
            Ok(declarations) => Self::link(declarations, trace),
            Err(e) => Err(e),
        };

        match &result {
            Ok(tree) => debug!(nodes = tree.len(), depth = tree.depth(), "tree built"),
            Err(e) => trace.rejected(e),
        }
        result
    }

    fn collect<I, S>(&self, lines: I, trace: &mut dyn BuildTrace) -> TreeResult<Declarations>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut declarations = Declarations::default();

        for (i, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let line_no = i + 1;
            if self.skip_blank_lines && line.trim().is_empty() {
                continue;
            }

            let decl = self
                .grammar
                .parse(line)
                .ok_or_else(|| ParseError::MalformedLine {
                    line_no,
                    line: line.to_string(),
                })?;
            trace.line_parsed(line_no, &decl);

            if decl.is_root() && declarations.root.is_some() {
                return Err(ParseError::DuplicateRoot {
                    line_no,
                    line: line.to_string(),
                });
            }

            // An id seen so far only as a parent is not in `positions`
            if declarations.positions.contains_key(&decl.id) {
                return Err(ParseError::DuplicateId {
                    id: decl.id,
                    line_no,
                    line: line.to_string(),
                });
            }

            match decl.parent {
                None => declarations.root = Some(declarations.nodes.len()),
                Some(parent) if parent == decl.id => {
                    return Err(ParseError::SelfParentCycle {
                        id: decl.id,
                        line_no,
                        line: line.to_string(),
                    });
                }
                Some(parent) => {
                    if !declarations.positions.contains_key(&parent) {
                        trace.forward_reference(line_no, decl.id, parent);
                    }
                }
            }

            declarations
                .positions
                .insert(decl.id, declarations.nodes.len());
            declarations.nodes.push(Declared { line_no, decl });
        }

        Ok(declarations)
    }

    fn link(declarations: Declarations, trace: &mut dyn BuildTrace) -> TreeResult<SetTree> {
        let root_pos = declarations.root.ok_or(ParseError::MissingRoot)?;

        if let Some(parent) = declarations
            .nodes
            .iter()
            .filter_map(|d| d.decl.parent)
            .find(|parent| !declarations.positions.contains_key(parent))
        {
            return Err(ParseError::UnresolvedParent(parent));
        }

        let mut tree = SetTree::new();
        let indices: Vec<_> = declarations
            .nodes
            .iter()
            .map(|d| {
                tree.insert_node(NodeData {
                    id: d.decl.id,
                    content: d.decl.content.clone(),
                    line_no: d.line_no,
                })
            })
            .collect();
        tree.set_root(indices[root_pos]);

        for (pos, declared) in declarations.nodes.iter().enumerate() {
            if let Some(parent) = declared.decl.parent {
                let parent_pos = declarations.positions[&parent];
                tree.attach(indices[pos], indices[parent_pos]);
                trace.edge_linked(declared.decl.id, parent);
            }
        }

        // Every node has a declared parent, so whatever the root cannot reach
        // hangs off a cycle.
        let reachable: HashSet<_> = tree.iter().map(|(idx, _)| idx).collect();
        if let Some(pos) = (0..indices.len()).find(|&pos| !reachable.contains(&indices[pos])) {
            return Err(ParseError::CycleDetected(declarations.nodes[pos].decl.id));
        }

        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Content, SetOp};
    use crate::domain::trace::NoTrace;

    #[derive(Default)]
    struct Recorder {
        forward: Vec<(NodeId, NodeId)>,
        linked: usize,
        rejected: Option<ParseError>,
    }

    impl BuildTrace for Recorder {
        fn forward_reference(&mut self, _line_no: usize, child: NodeId, parent: NodeId) {
            self.forward.push((child, parent));
        }

        fn edge_linked(&mut self, _child: NodeId, _parent: NodeId) {
            self.linked += 1;
        }

        fn rejected(&mut self, error: &ParseError) {
            self.rejected = Some(error.clone());
        }
    }

    #[test]
    fn given_forward_reference_when_building_then_trace_reports_it() {
        let mut recorder = Recorder::default();
        let tree = TreeBuilder::new()
            .build_traced(["2,1,5", "1,,U"], &mut recorder)
            .unwrap();

        assert_eq!(recorder.forward, vec![(2, 1)]);
        assert_eq!(recorder.linked, 1);
        assert!(recorder.rejected.is_none());
        assert_eq!(tree.child_ids(1), vec![2]);
    }

    #[test]
    fn given_failure_when_building_then_trace_sees_rejection() {
        let mut recorder = Recorder::default();
        let result = TreeBuilder::new().build_traced(["abc"], &mut recorder);

        assert_eq!(result.as_ref().err(), recorder.rejected.as_ref());
    }

    #[test]
    fn given_root_line_when_building_then_root_holds_content() {
        let tree = TreeBuilder::new().build(["1,,I"]).unwrap();
        let root = tree.get_node(tree.root().unwrap()).unwrap();

        assert_eq!(root.data.id, 1);
        assert_eq!(root.data.content, Content::Operation(SetOp::Intersect));
        assert_eq!(root.data.line_no, 1);
        assert!(root.parent.is_none());
    }

    #[test]
    fn given_blank_lines_when_skipping_then_line_numbers_still_count_them() {
        let builder = TreeBuilder::new().skip_blank_lines(true);

        let tree = builder.build(["1,,U", "", "  ", "2,1,3"]).unwrap();
        assert_eq!(tree.get_by_id(2).unwrap().data.line_no, 4);

        let err = builder.build(["1,,U", "", "oops"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedLine {
                line_no: 3,
                line: "oops".to_string()
            }
        );
    }

    #[test]
    fn given_blank_line_by_default_when_building_then_malformed() {
        let err = TreeBuilder::new().build(["1,,U", ""]).unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { line_no: 2, .. }));
    }

    #[test]
    fn given_silent_trace_when_building_then_same_tree_as_traced_build() {
        let lines = ["3,1,7", "1,,U", "2,1,I"];

        let silent = TreeBuilder::new().build_traced(lines, &mut NoTrace).unwrap();
        let traced = TreeBuilder::new().build(lines).unwrap();

        assert_eq!(silent.child_ids(1), traced.child_ids(1));
        assert_eq!(silent.child_ids(1), vec![3, 2]);
    }

    #[test]
    fn given_mutual_parents_when_building_then_cycle_detected() {
        let result = TreeBuilder::new().build(["1,,U", "2,3,U", "3,2,U"]);
        assert_eq!(result.unwrap_err(), ParseError::CycleDetected(2));
    }
}
