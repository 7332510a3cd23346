//! # Story Atlas
//!
//! Maps every possible playthrough of a story. Given a starting world state
//! and a rule engine, the atlas exhaustively explores the reachable state
//! space and compiles it into a directed graph: nodes are rule identifiers,
//! edges are "this rule can fire after that one," and one example path from
//! start to an ending is highlighted.
//!
//! ## Core Components
//!
//! - **view**: the observable projection of a world state, its equality
//!   (used for cycle detection), and the interactable enumeration
//! - **playthrough**: the five-way step classifier and the exhaustive
//!   depth-first explorer
//! - **graph**: nodes, edges, and the accumulator threaded through the walk
//! - **render**: DOT and JSON emission for renderers and host shells
//!
//! ## Design Philosophy
//!
//! - **Engine as a black box**: the explorer is generic over a [`WorldModel`]
//!   and only ever sees states through their observable projections
//! - **Termination by memoization**: previously seen views are never
//!   re-explored, so any finite story terminates
//! - **Minimal graph**: default pickups and travel pass through silently;
//!   only rules that fire appear as structure

pub mod graph;
pub mod playthrough;
pub mod render;
pub mod view;

pub use graph::*;
pub use playthrough::*;
pub use render::*;
pub use view::*;

/// Explore everything reachable from `start` and emit the finished document,
/// example path highlighted. The one-call entry point for host shells.
pub fn map_story<M: WorldModel>(
    model: &M,
    start: &M::State,
    config: ExploreConfig,
) -> GraphDocument {
    let graph = Explorer::with_config(model, config).build_graph(start);
    GraphDocument::from_graph(&graph)
}
