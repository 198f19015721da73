//! Line grammar: `<id>,(<parentId>|<whitespace>),(<dataset>|U|I)`

use regex::{Captures, Regex};
use tracing::{instrument, trace};

use crate::domain::entities::{Content, DataSet, NodeDecl, SetOp, Value};

/// Recognizer for a single node declaration line.
///
/// An empty or whitespace-only parent field marks the root. The payload is
/// either a comma separated list of numbers or one of the operation tokens.
pub struct LineGrammar {
    line_regex: Regex,
}

impl Default for LineGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl LineGrammar {
    pub fn new() -> Self {
        Self {
            line_regex: Regex::new(
                r"^(?P<id>[0-9]+),(?:(?P<parent>[0-9]+)|(?P<root>\s*)),(?:(?P<data>[0-9]+(?:,[0-9]+)*)|(?P<op>[UI]))$",
            )
            .unwrap(),
        }
    }

    /// Extract the declaration from `line`, or `None` if it does not match.
    #[instrument(level = "trace", skip(self))]
    pub fn parse(&self, line: &str) -> Option<NodeDecl> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let caps = self.line_regex.captures(line)?;

        let id = caps.name("id")?.as_str().parse().ok()?;
        let parent = match caps.name("parent") {
            Some(m) => Some(m.as_str().parse().ok()?),
            None => None,
        };
        let content = Self::content(&caps)?;

        trace!(id, ?parent, ?content, "line matched");
        Some(NodeDecl {
            id,
            parent,
            content,
        })
    }

    fn content(caps: &Captures<'_>) -> Option<Content> {
        if let Some(op) = caps.name("op") {
            return op.as_str().parse::<SetOp>().ok().map(Content::Operation);
        }
        let values = caps
            .name("data")?
            .as_str()
            .split(',')
            .map(|v| v.parse::<Value>().ok())
            .collect::<Option<Vec<_>>>()?;
        Some(Content::Explicit(DataSet::from(values)))
    }
}
