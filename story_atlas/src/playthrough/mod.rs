//! Exhaustive exploration - walks every reachable state of a story.
//!
//! The explorer drives everything:
//! 1. **Enumerate**: list every interactable at the current state
//! 2. **Attempt**: ask the engine what each interaction does
//! 3. **Classify**: resolve the attempt into one of five outcomes
//! 4. **Accumulate**: grow the graph and recurse where the outcome allows
//!
//! Termination holds because the visited set only grows and the reachable
//! state space of a story is finite. An engine that can produce unboundedly
//! many distinct observable states makes exploration diverge; that is a
//! documented limitation, not a guarded condition.

mod outcome;

pub use outcome::*;

use log::{debug, trace};

use story_rules::RuleId;

use crate::graph::{root_rule, Edge, PlaythroughGraph};
use crate::view::WorldModel;

/// Exploration configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExploreConfig {
    /// Keep flavor rules (rules that fire without changing anything new)
    /// as dead-end leaf nodes. Excluded by default.
    pub include_flavor_rules: bool,
}

/// Walks the full reachable state space of a story and accumulates the
/// graph of rule transitions.
pub struct Explorer<'a, M: WorldModel> {
    model: &'a M,
    config: ExploreConfig,
}

impl<'a, M: WorldModel> Explorer<'a, M> {
    /// Create an explorer with the default configuration.
    pub fn new(model: &'a M) -> Self {
        Self::with_config(model, ExploreConfig::default())
    }

    /// Create an explorer with an explicit configuration.
    pub fn with_config(model: &'a M, config: ExploreConfig) -> Self {
        Self { model, config }
    }

    /// Explore everything reachable from `start` and return the finished
    /// graph: nodes, deduplicated edges, and every completed playthrough.
    pub fn build_graph(&self, start: &M::State) -> PlaythroughGraph {
        let mut graph = PlaythroughGraph::new(self.model.view(start));

        self.explore(&[], start, &root_rule(), &mut graph);

        debug!(
            "exploration finished: {} nodes, {} edges, {} endings, {} states",
            graph.nodes().len(),
            graph.edges().len(),
            graph.completed_paths().len(),
            graph.visited().len(),
        );

        graph
    }

    /// Depth-first step: try every interactable at `state`, folding each
    /// outcome into the accumulator left to right.
    fn explore(
        &self,
        path: &[Edge],
        state: &M::State,
        last_rule: &RuleId,
        graph: &mut PlaythroughGraph,
    ) {
        for entity in self.model.view(state).interactables() {
            let (next_state, matched) = self.model.attempt(&entity, state);
            let next_view = self.model.view(&next_state);

            match StepOutcome::classify(matched, &next_view, graph.visited()) {
                StepOutcome::Ending(rule) => {
                    debug!("ending reached via '{}' (from '{}')", rule, last_rule);
                    let edge = Edge::new(last_rule.clone(), rule.clone());
                    graph.insert_node(rule);
                    graph.insert_edge(edge.clone());

                    let mut completed = path.to_vec();
                    completed.push(edge);
                    graph.record_completed_path(completed);
                }
                StepOutcome::FlavorLoop(rule) => {
                    // A leaf either way; recursing here would never end.
                    if self.config.include_flavor_rules && !graph.has_node(&rule) {
                        trace!("keeping flavor rule '{}' as a leaf", rule);
                        graph.insert_edge(Edge::new(last_rule.clone(), rule.clone()));
                        graph.insert_node(rule);
                    }
                }
                StepOutcome::Progress(rule) => {
                    trace!("rule '{}' progresses from '{}'", rule, last_rule);
                    let edge = Edge::new(last_rule.clone(), rule.clone());
                    graph.insert_node(rule.clone());
                    graph.insert_edge(edge.clone());
                    graph.mark_visited(next_view);

                    let mut extended = path.to_vec();
                    extended.push(edge);
                    self.explore(&extended, &next_state, &rule, graph);
                }
                StepOutcome::DefaultLoop => {
                    trace!("default interaction with '{}' loops; pruned", entity);
                }
                StepOutcome::DefaultProgress => {
                    trace!("default interaction with '{}' progresses silently", entity);
                    graph.mark_visited(next_view);
                    self.explore(path, &next_state, last_rule, graph);
                }
            }
        }
    }
}
