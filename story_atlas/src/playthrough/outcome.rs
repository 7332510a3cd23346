//! Step classification - the five possible outcomes of one interaction.

use story_rules::RuleId;

use crate::view::StateView;

/// What one interaction attempt means for the graph and for recursion.
///
/// Exactly one outcome applies to every attempt, resolved in this order:
///
/// 1. `Ending` - a rule fired and the next state carries an ending. The
///    edge joins the graph and the current path is complete. Never recurse.
/// 2. `FlavorLoop` - a rule fired but the next state was already seen. A
///    harmless flavor rule; optionally kept as a dead-end leaf. Never
///    recurse, whether or not the node is added.
/// 3. `Progress` - a rule fired and reached a novel state. The edge joins
///    the graph and exploration continues from the new state.
/// 4. `DefaultLoop` - no rule fired and the next state was already seen.
///    Nothing joins the graph and the branch stops here; this is the sole
///    guard against unbounded recursion through default actions.
/// 5. `DefaultProgress` - no rule fired but the state is novel (a plain
///    pickup or travel). Exploration continues silently: no edge, no node,
///    same last rule, same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Ending(RuleId),
    FlavorLoop(RuleId),
    Progress(RuleId),
    DefaultLoop,
    DefaultProgress,
}

impl StepOutcome {
    /// Classify an attempt's result against the states seen so far.
    pub fn classify(matched: Option<RuleId>, next: &StateView, visited: &[StateView]) -> Self {
        let seen = visited.iter().any(|view| view == next);

        match matched {
            Some(rule) if next.is_ending() => StepOutcome::Ending(rule),
            Some(rule) if seen => StepOutcome::FlavorLoop(rule),
            Some(rule) => StepOutcome::Progress(rule),
            None if seen => StepOutcome::DefaultLoop,
            None => StepOutcome::DefaultProgress,
        }
    }
}
