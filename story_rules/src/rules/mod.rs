//! Rule definitions - triggers, preconditions, effects, and the catalog.

use serde::{Deserialize, Serialize};

use crate::entities::EntityId;
use crate::world_state::{EndingId, LocationId, SceneId, WorldState};

/// Unique identifier for rules (the rule's one-line summary).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub String);

impl RuleId {
    /// Create a rule ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A condition that must hold for a rule to fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precondition {
    /// The player is carrying the item.
    InInventory(EntityId),

    /// The player stands at the location.
    AtLocation(LocationId),

    /// The story is in the given scene.
    SceneIs(SceneId),

    /// The location has been discovered.
    Discovered(LocationId),

    /// The item lies at the player's current location.
    ItemPresent(EntityId),
}

impl Precondition {
    /// Evaluate this condition against a world state.
    pub fn holds(&self, state: &WorldState) -> bool {
        match self {
            Precondition::InInventory(item) => state.inventory.contains(item),
            Precondition::AtLocation(location) => &state.player_location == location,
            Precondition::SceneIs(scene) => &state.scene == scene,
            Precondition::Discovered(location) => state.discovered.contains(location),
            Precondition::ItemPresent(item) => state.items_here().contains(item),
        }
    }
}

/// A world mutation performed by a fired rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Move an item from the current location into the inventory.
    TakeItem(EntityId),

    /// Move an item from the inventory to a location.
    PlaceItem { item: EntityId, location: LocationId },

    /// Remove an item from the world entirely.
    RemoveItem(EntityId),

    /// Move the player to a location (discovering it).
    MoveTo(LocationId),

    /// Mark a location as discovered without travelling.
    Discover(LocationId),

    /// Switch to a new scene.
    SetScene(SceneId),

    /// End the story.
    EndStory(EndingId),
}

impl Effect {
    /// Apply this effect to a world state.
    pub fn apply(&self, state: &mut WorldState) {
        match self {
            Effect::TakeItem(item) => state.take_item(item),
            Effect::PlaceItem { item, location } => state.place_item(item, location.clone()),
            Effect::RemoveItem(item) => state.remove_item(item),
            Effect::MoveTo(location) => state.move_player(location.clone()),
            Effect::Discover(location) => state.discover(location.clone()),
            Effect::SetScene(scene) => state.set_scene(scene.clone()),
            Effect::EndStory(ending) => state.set_ending(ending.clone()),
        }
    }
}

/// A single narrative rule: fires when the player interacts with the
/// trigger entity and every precondition holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,

    /// The entity whose interaction this rule reacts to.
    pub trigger: EntityId,

    /// Higher priority rules are checked first; ties break by id.
    #[serde(default)]
    pub priority: i32,

    #[serde(default)]
    pub preconditions: Vec<Precondition>,

    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl Rule {
    /// Create a rule with no preconditions and no effects.
    pub fn new(id: impl Into<RuleId>, trigger: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            trigger: trigger.into(),
            priority: 0,
            preconditions: vec![],
            effects: vec![],
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Add a precondition.
    pub fn with_precondition(mut self, precondition: Precondition) -> Self {
        self.preconditions.push(precondition);
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Whether this rule fires for an interaction with `entity` in `state`.
    pub fn applies_to(&self, entity: &EntityId, state: &WorldState) -> bool {
        &self.trigger == entity && self.preconditions.iter().all(|p| p.holds(state))
    }
}

/// The rule catalog, kept in matching order: priority descending, id
/// ascending on ties.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleBook {
    rules: Vec<Rule>,
}

impl RuleBook {
    /// Create an empty rule book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, keeping the catalog in matching order.
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
        self.rules
            .sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)));
    }

    /// Builder-style `add_rule`.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.add_rule(rule);
        self
    }

    /// The first rule that fires for an interaction with `entity` in `state`.
    pub fn first_match(&self, entity: &EntityId, state: &WorldState) -> Option<&Rule> {
        self.rules.iter().find(|r| r.applies_to(entity, state))
    }

    /// Look up a rule by id.
    pub fn get(&self, id: &RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| &r.id == id)
    }

    /// Iterate over the catalog in matching order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Number of rules in the catalog.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
