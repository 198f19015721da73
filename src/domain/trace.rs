//! Observation hooks for the tree builder.
//!
//! The builder never prints. Callers that want to follow a build pass an
//! implementation of [`BuildTrace`]; all methods default to doing nothing.

use tracing::{debug, trace};

use crate::domain::entities::{NodeDecl, NodeId};
use crate::domain::error::ParseError;

pub trait BuildTrace {
    /// A line matched the grammar.
    fn line_parsed(&mut self, _line_no: usize, _decl: &NodeDecl) {}

    /// `child` names a `parent` that has not been declared yet.
    fn forward_reference(&mut self, _line_no: usize, _child: NodeId, _parent: NodeId) {}

    /// `child` was attached below `parent`.
    fn edge_linked(&mut self, _child: NodeId, _parent: NodeId) {}

    /// The build is about to fail with `error`.
    fn rejected(&mut self, _error: &ParseError) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl BuildTrace for NoTrace {}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTrace;

impl BuildTrace for TracingTrace {
    fn line_parsed(&mut self, line_no: usize, decl: &NodeDecl) {
        trace!(line_no, id = decl.id, parent = ?decl.parent, content = ?decl.content, "parsed");
    }

    fn forward_reference(&mut self, line_no: usize, child: NodeId, parent: NodeId) {
        debug!(line_no, child, parent, "parent referenced before its definition");
    }

    fn edge_linked(&mut self, child: NodeId, parent: NodeId) {
        trace!(child, parent, "linked");
    }

    fn rejected(&mut self, error: &ParseError) {
        debug!(%error, "build rejected");
    }
}
