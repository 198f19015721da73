//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod evaluator;
pub mod grammar;
pub mod render;
pub mod trace;

pub use arena::{NodeData, SetTree, TreeNode};
pub use builder::TreeBuilder;
pub use entities::*;
pub use error::{ParseError, TreeResult};
pub use evaluator::{combine, evaluate, Evaluation};
pub use grammar::LineGrammar;
pub use render::{ElementOrder, RenderStyle, Renderer};
pub use trace::{BuildTrace, NoTrace, TracingTrace};
