//! Parse line-based set-operation trees, evaluate them and render ASCII diagrams.
//!
//! Each input line declares one node: `<id>,<parent>,<payload>`. An empty
//! parent marks the root, the payload is either a comma separated list of
//! numbers or `U`/`I` for the union/intersection of the node's children.
//!
//! ```text
//! 1,,I
//! 2,1,10,20,30
//! 3,1,20,30,40
//! ```
//!
//! renders as
//!
//! ```text
//! 1 : I -> {20, 30}
//! |
//! +- 2 : {10, 20, 30} -> {10, 20, 30}
//! |
//! +- 3 : {20, 30, 40} -> {20, 30, 40}
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
