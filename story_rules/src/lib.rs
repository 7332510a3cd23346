//! # Story Rules
//!
//! The "World Bible" crate - entities, world state, the rule catalog, and the
//! interaction engine. This crate owns what the story *is*; it knows nothing
//! about exploration or graphs.
//!
//! The engine resolves one interaction at a time: a rule fires when the
//! player interacts with its trigger entity and its preconditions hold,
//! otherwise default behavior (plain pickup or travel) applies.

pub mod engine;
pub mod entities;
pub mod loader;
pub mod rules;
pub mod world_state;

pub use engine::*;
pub use entities::*;
pub use loader::*;
pub use rules::*;
pub use world_state::*;
