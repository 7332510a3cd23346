//! State views - the observable projection of an opaque world state.

use serde::Serialize;
use std::collections::BTreeSet;

use story_rules::{Attempt, EndingId, EntityId, LocationId, RuleId, SceneId, StoryEngine};

/// The seven observable projections of a world state.
///
/// Two world states are treated as the same state of the story iff their
/// views are equal; the derived equality compares every field, and omitting
/// any of them would either miss states or recurse forever. All collections
/// are ordered, so a view also fixes the enumeration order of interactables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateView {
    pub location: LocationId,
    pub items_here: BTreeSet<EntityId>,
    pub inventory: BTreeSet<EntityId>,
    pub discovered: BTreeSet<LocationId>,
    pub characters_here: BTreeSet<EntityId>,
    pub scene: SceneId,
    pub ending: Option<EndingId>,
}

impl StateView {
    /// Every entity the player could attempt to interact with right now:
    /// characters in the room, items in the room, carried items, and every
    /// discovered location (travel is itself an interaction).
    ///
    /// The order is stable - grouped as listed above, sorted within each
    /// group - and duplicates across groups are dropped.
    pub fn interactables(&self) -> Vec<EntityId> {
        let mut seen = BTreeSet::new();
        let mut entities = Vec::new();

        let groups = self
            .characters_here
            .iter()
            .chain(self.items_here.iter())
            .chain(self.inventory.iter())
            .cloned()
            .chain(self.discovered.iter().map(LocationId::as_entity));

        for entity in groups {
            if seen.insert(entity.clone()) {
                entities.push(entity);
            }
        }

        entities
    }

    /// Whether this view carries an ending.
    pub fn is_ending(&self) -> bool {
        self.ending.is_some()
    }
}

/// The abstract rule engine the explorer is built against.
///
/// Implementations must be pure and deterministic: `attempt` never mutates
/// the input state and always returns the same result for the same inputs.
/// Malformed behavior (an ending without a matched rule, nondeterminism) is
/// not detected; it silently invalidates the resulting graph.
pub trait WorldModel {
    /// The opaque world-state type.
    type State: Clone;

    /// Project the observable view out of a state.
    fn view(&self, state: &Self::State) -> StateView;

    /// Attempt an interaction, returning the next state and the rule that
    /// fired, if any.
    fn attempt(&self, entity: &EntityId, state: &Self::State) -> (Self::State, Option<RuleId>);
}

impl WorldModel for StoryEngine {
    type State = story_rules::WorldState;

    fn view(&self, state: &Self::State) -> StateView {
        StateView {
            location: state.player_location.clone(),
            items_here: state.items_here(),
            inventory: state.inventory.clone(),
            discovered: state.discovered.clone(),
            characters_here: state.characters_here(),
            scene: state.scene.clone(),
            ending: state.ending.clone(),
        }
    }

    fn attempt(&self, entity: &EntityId, state: &Self::State) -> (Self::State, Option<RuleId>) {
        let Attempt { state, matched } = StoryEngine::attempt(self, entity, state);
        (state, matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_rules::{Manifest, RuleBook, WorldState};

    fn sample_manifest() -> Manifest {
        Manifest::new("home", "intro")
            .with_location("home", "Home")
            .with_location("garden", "Garden")
            .with_item("umbrella", "Umbrella", "home")
            .with_item("key", "Key", "garden")
            .with_character("cat", "The Cat", "home")
            .with_discovered("garden")
    }

    fn view_of(state: &WorldState) -> StateView {
        let engine = StoryEngine::new(RuleBook::new());
        engine.view(state)
    }

    #[test]
    fn test_interactables_union_and_order() {
        let mut state = sample_manifest().initial_state();
        state.inventory.insert(EntityId::new("coin"));

        let entities = view_of(&state).interactables();

        // Characters here, items here, inventory, discovered locations.
        assert_eq!(
            entities,
            vec![
                EntityId::new("cat"),
                EntityId::new("umbrella"),
                EntityId::new("coin"),
                EntityId::new("garden"),
                EntityId::new("home"),
            ]
        );
    }

    #[test]
    fn test_interactables_deduplicated() {
        let mut state = sample_manifest().initial_state();
        // An item that shares its id with a discovered location.
        state.add_item_at(EntityId::new("garden"), LocationId::new("home"));

        let entities = view_of(&state).interactables();
        let gardens = entities
            .iter()
            .filter(|e| e.as_str() == "garden")
            .count();

        assert_eq!(gardens, 1);
    }

    #[test]
    fn test_views_equal_for_equal_states() {
        let state = sample_manifest().initial_state();
        assert_eq!(view_of(&state), view_of(&state.clone()));
    }

    #[test]
    fn test_every_projection_observed() {
        let base = sample_manifest().initial_state();
        let base_view = view_of(&base);

        let mut moved = base.clone();
        moved.move_player(LocationId::new("garden"));
        assert_ne!(view_of(&moved), base_view);

        let mut took = base.clone();
        took.take_item(&EntityId::new("umbrella"));
        assert_ne!(view_of(&took), base_view);

        let mut explored = base.clone();
        explored.discover(LocationId::new("cellar"));
        assert_ne!(view_of(&explored), base_view);

        let mut staged = base.clone();
        staged.set_scene(SceneId::new("finale"));
        assert_ne!(view_of(&staged), base_view);

        let mut ended = base.clone();
        ended.set_ending(EndingId::new("done"));
        assert_ne!(view_of(&ended), base_view);
    }
}
