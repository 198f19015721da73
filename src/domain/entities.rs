//! Domain entities: core data structures

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

/// Identifier of a node as written in the input.
pub type NodeId = u64;

/// Element type of every data set.
pub type Value = u64;

/// Set operation applied over the children of an operation node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOp {
    Union,
    Intersect,
}

impl SetOp {
    /// Single-letter token used in the input format and in the diagram.
    pub fn token(&self) -> &'static str {
        match self {
            SetOp::Union => "U",
            SetOp::Intersect => "I",
        }
    }
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Error for a token that is neither `U` nor `I`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSetOp(pub String);

impl fmt::Display for UnknownSetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown set operation: {:?}", self.0)
    }
}

impl std::error::Error for UnknownSetOp {}

impl FromStr for SetOp {
    type Err = UnknownSetOp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "U" => Ok(SetOp::Union),
            "I" => Ok(SetOp::Intersect),
            other => Err(UnknownSetOp(other.to_string())),
        }
    }
}

/// Ordered, duplicate-free collection of values.
///
/// Elements keep the order of their first occurrence. Building a set from a
/// sequence with repeats silently drops the later copies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSet {
    values: Vec<Value>,
}

impl DataSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        self.values.iter().copied()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Union in first-occurrence order: own elements, then unseen elements of `other`.
    pub fn union(&self, other: &DataSet) -> DataSet {
        self.iter().chain(other.iter()).collect()
    }

    /// Intersection keeping the order of `self`.
    pub fn intersect(&self, other: &DataSet) -> DataSet {
        let keep: HashSet<Value> = other.iter().collect();
        DataSet {
            values: self.iter().filter(|v| keep.contains(v)).collect(),
        }
    }

    /// Elements in ascending numeric order.
    pub fn sorted(&self) -> DataSet {
        DataSet {
            values: self.iter().sorted_unstable().collect(),
        }
    }
}

impl FromIterator<Value> for DataSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        DataSet {
            values: iter.into_iter().unique().collect(),
        }
    }
}

impl From<Vec<Value>> for DataSet {
    fn from(values: Vec<Value>) -> Self {
        values.into_iter().collect()
    }
}

impl<const N: usize> From<[Value; N]> for DataSet {
    fn from(values: [Value; N]) -> Self {
        values.into_iter().collect()
    }
}

/// `{v1, v2, ..., vn}`, or `{}` for the empty set.
impl fmt::Display for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.values.iter().join(", "))
    }
}

/// What a node holds: a declared set or a rule over its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Explicit(DataSet),
    Operation(SetOp),
}

impl Content {
    pub fn operation(&self) -> Option<SetOp> {
        match self {
            Content::Operation(op) => Some(*op),
            Content::Explicit(_) => None,
        }
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDecl {
    pub id: NodeId,
    /// Declared parent, `None` for the root line
    pub parent: Option<NodeId>,
    pub content: Content,
}

impl NodeDecl {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
