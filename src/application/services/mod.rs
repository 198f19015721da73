//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (InputSource)
//! but are themselves concrete structs, not traits.

mod transduce;

pub use transduce::{transduce, Outcome, TransduceService};
