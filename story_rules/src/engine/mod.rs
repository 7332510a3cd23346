//! The interaction engine - resolves one interaction attempt at a time.

use log::trace;

use crate::entities::EntityId;
use crate::rules::{RuleBook, RuleId};
use crate::world_state::{LocationId, WorldState};

/// The result of one interaction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// The world after the interaction.
    pub state: WorldState,

    /// The rule that fired, if any. Default behavior (plain pickup or
    /// travel) reports `None`.
    pub matched: Option<RuleId>,
}

/// Resolves interactions against a rule catalog.
///
/// `attempt` is pure and deterministic: the same entity and state always
/// produce the same result, and the input state is never mutated. An ending
/// can only appear in the result of a matched rule, because only rule
/// effects can set one.
#[derive(Debug, Clone)]
pub struct StoryEngine {
    rules: RuleBook,
}

impl StoryEngine {
    /// Create an engine over a rule catalog.
    pub fn new(rules: RuleBook) -> Self {
        Self { rules }
    }

    /// The rule catalog.
    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Attempt an interaction with `entity` in `state`.
    ///
    /// The highest-priority rule triggered by the entity whose preconditions
    /// hold fires and applies its effects. With no matching rule, default
    /// behavior applies: an item at the current location is picked up, a
    /// discovered location is travelled to, and anything else (carried items,
    /// characters, unknown ids) leaves the world unchanged.
    pub fn attempt(&self, entity: &EntityId, state: &WorldState) -> Attempt {
        let mut next = state.clone();

        if let Some(rule) = self.rules.first_match(entity, state) {
            trace!("rule '{}' fired on '{}'", rule.id, entity);
            for effect in &rule.effects {
                effect.apply(&mut next);
            }
            return Attempt {
                state: next,
                matched: Some(rule.id.clone()),
            };
        }

        if next.items_here().contains(entity) {
            trace!("default pickup of '{}'", entity);
            next.take_item(entity);
        } else {
            let destination = LocationId::new(entity.as_str());
            if next.discovered.contains(&destination) {
                trace!("default travel to '{}'", destination);
                next.move_player(destination);
            }
        }

        Attempt {
            state: next,
            matched: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Effect, Precondition, Rule};
    use crate::world_state::{EndingId, SceneId};

    fn empty_state() -> WorldState {
        WorldState::new(LocationId::new("home"), SceneId::new("intro"))
    }

    #[test]
    fn test_default_pickup() {
        let mut state = empty_state();
        state.add_item_at(EntityId::new("umbrella"), LocationId::new("home"));
        let engine = StoryEngine::new(RuleBook::new());

        let attempt = engine.attempt(&EntityId::new("umbrella"), &state);

        assert!(attempt.matched.is_none());
        assert!(attempt.state.inventory.contains(&EntityId::new("umbrella")));
        // Input state untouched.
        assert!(state.inventory.is_empty());
    }

    #[test]
    fn test_default_travel() {
        let mut state = empty_state();
        state.discover(LocationId::new("garden"));
        let engine = StoryEngine::new(RuleBook::new());

        let attempt = engine.attempt(&EntityId::new("garden"), &state);

        assert!(attempt.matched.is_none());
        assert_eq!(attempt.state.player_location, LocationId::new("garden"));
    }

    #[test]
    fn test_default_unknown_entity_is_noop() {
        let state = empty_state();
        let engine = StoryEngine::new(RuleBook::new());

        let attempt = engine.attempt(&EntityId::new("dragon"), &state);

        assert!(attempt.matched.is_none());
        assert_eq!(attempt.state, state);
    }

    #[test]
    fn test_rule_takes_precedence_over_default() {
        let mut state = empty_state();
        state.add_item_at(EntityId::new("umbrella"), LocationId::new("home"));
        let engine = StoryEngine::new(RuleBook::new().with_rule(
            Rule::new("CursedUmbrella", "umbrella")
                .with_effect(Effect::EndStory(EndingId::new("soaked"))),
        ));

        let attempt = engine.attempt(&EntityId::new("umbrella"), &state);

        assert_eq!(attempt.matched, Some(RuleId::new("CursedUmbrella")));
        assert!(attempt.state.is_ended());
        // The rule's effects replace the default pickup entirely.
        assert!(attempt.state.inventory.is_empty());
    }

    #[test]
    fn test_unsatisfied_rule_falls_back_to_default() {
        let mut state = empty_state();
        state.add_item_at(EntityId::new("umbrella"), LocationId::new("home"));
        let engine = StoryEngine::new(RuleBook::new().with_rule(
            Rule::new("GatedUmbrella", "umbrella")
                .with_precondition(Precondition::SceneIs(SceneId::new("finale")))
                .with_effect(Effect::EndStory(EndingId::new("soaked"))),
        ));

        let attempt = engine.attempt(&EntityId::new("umbrella"), &state);

        assert!(attempt.matched.is_none());
        assert!(attempt.state.inventory.contains(&EntityId::new("umbrella")));
    }

    #[test]
    fn test_attempt_is_deterministic() {
        let mut state = empty_state();
        state.add_item_at(EntityId::new("umbrella"), LocationId::new("home"));
        let engine = StoryEngine::new(RuleBook::new());

        let first = engine.attempt(&EntityId::new("umbrella"), &state);
        let second = engine.attempt(&EntityId::new("umbrella"), &state);

        assert_eq!(first, second);
    }
}
