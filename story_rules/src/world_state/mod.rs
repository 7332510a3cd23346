//! World state - the snapshot of the story world between interactions.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::entities::EntityId;

/// Unique identifier for locations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    /// Create a location ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The same identifier viewed as an interactable entity (travel is an
    /// interaction with a location).
    pub fn as_entity(&self) -> EntityId {
        EntityId::new(self.0.clone())
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LocationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Unique identifier for scenes (acts/chapters of the story).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub String);

impl SceneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for endings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndingId(pub String);

impl EndingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EndingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The complete state of the story world at one instant.
///
/// Ordered collections are used throughout so that iteration order, and
/// therefore everything derived from it, is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    /// Where the player currently is.
    pub player_location: LocationId,

    /// Items the player is carrying.
    pub inventory: BTreeSet<EntityId>,

    /// Locations the player knows about and can travel to.
    pub discovered: BTreeSet<LocationId>,

    /// Items lying around, per location.
    pub location_items: BTreeMap<LocationId, BTreeSet<EntityId>>,

    /// Characters present, per location.
    pub location_characters: BTreeMap<LocationId, BTreeSet<EntityId>>,

    /// The current scene of the story.
    pub scene: SceneId,

    /// Set once the story has reached an ending.
    pub ending: Option<EndingId>,
}

impl WorldState {
    /// Create a world state with the player at `start`, which is the only
    /// discovered location.
    pub fn new(start: LocationId, scene: SceneId) -> Self {
        let mut discovered = BTreeSet::new();
        discovered.insert(start.clone());

        Self {
            player_location: start,
            inventory: BTreeSet::new(),
            discovered,
            location_items: BTreeMap::new(),
            location_characters: BTreeMap::new(),
            scene,
            ending: None,
        }
    }

    /// Items at the player's current location.
    pub fn items_here(&self) -> BTreeSet<EntityId> {
        self.location_items
            .get(&self.player_location)
            .cloned()
            .unwrap_or_default()
    }

    /// Characters at the player's current location.
    pub fn characters_here(&self) -> BTreeSet<EntityId> {
        self.location_characters
            .get(&self.player_location)
            .cloned()
            .unwrap_or_default()
    }

    /// Place an item at a location.
    pub fn add_item_at(&mut self, item: EntityId, location: LocationId) {
        self.location_items.entry(location).or_default().insert(item);
    }

    /// Place a character at a location.
    pub fn add_character_at(&mut self, character: EntityId, location: LocationId) {
        self.location_characters
            .entry(location)
            .or_default()
            .insert(character);
    }

    /// Move an item from the current location into the inventory.
    ///
    /// Does nothing if the item is not lying at the current location.
    pub fn take_item(&mut self, item: &EntityId) {
        let taken = self
            .location_items
            .get_mut(&self.player_location)
            .map(|items| items.remove(item))
            .unwrap_or(false);

        if taken {
            self.inventory.insert(item.clone());
        }
    }

    /// Remove an item from the inventory and place it at a location.
    pub fn place_item(&mut self, item: &EntityId, location: LocationId) {
        if self.inventory.remove(item) {
            self.add_item_at(item.clone(), location);
        }
    }

    /// Remove an item from the world entirely (inventory or any location).
    pub fn remove_item(&mut self, item: &EntityId) {
        self.inventory.remove(item);
        for items in self.location_items.values_mut() {
            items.remove(item);
        }
    }

    /// Move the player to a location, discovering it in the process.
    pub fn move_player(&mut self, location: LocationId) {
        self.discovered.insert(location.clone());
        self.player_location = location;
    }

    /// Mark a location as discovered without travelling there.
    pub fn discover(&mut self, location: LocationId) {
        self.discovered.insert(location);
    }

    /// Switch to a new scene.
    pub fn set_scene(&mut self, scene: SceneId) {
        self.scene = scene;
    }

    /// Mark the story as ended.
    pub fn set_ending(&mut self, ending: EndingId) {
        self.ending = Some(ending);
    }

    /// Whether the story has reached an ending.
    pub fn is_ended(&self) -> bool {
        self.ending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> LocationId {
        LocationId::new("home")
    }

    #[test]
    fn test_new_state_discovers_start() {
        let state = WorldState::new(home(), SceneId::new("intro"));
        assert_eq!(state.player_location, home());
        assert!(state.discovered.contains(&home()));
        assert!(!state.is_ended());
    }

    #[test]
    fn test_take_item_moves_to_inventory() {
        let mut state = WorldState::new(home(), SceneId::new("intro"));
        let umbrella = EntityId::new("umbrella");
        state.add_item_at(umbrella.clone(), home());

        state.take_item(&umbrella);

        assert!(state.inventory.contains(&umbrella));
        assert!(!state.items_here().contains(&umbrella));
    }

    #[test]
    fn test_take_item_elsewhere_is_noop() {
        let mut state = WorldState::new(home(), SceneId::new("intro"));
        let umbrella = EntityId::new("umbrella");
        state.add_item_at(umbrella.clone(), LocationId::new("garden"));

        let before = state.clone();
        state.take_item(&umbrella);

        assert_eq!(state, before);
    }

    #[test]
    fn test_place_item() {
        let mut state = WorldState::new(home(), SceneId::new("intro"));
        let key = EntityId::new("key");
        state.inventory.insert(key.clone());

        state.place_item(&key, LocationId::new("garden"));

        assert!(!state.inventory.contains(&key));
        assert!(state
            .location_items
            .get(&LocationId::new("garden"))
            .unwrap()
            .contains(&key));
    }

    #[test]
    fn test_move_player_discovers_destination() {
        let mut state = WorldState::new(home(), SceneId::new("intro"));
        let garden = LocationId::new("garden");

        state.move_player(garden.clone());

        assert_eq!(state.player_location, garden);
        assert!(state.discovered.contains(&garden));
    }

    #[test]
    fn test_remove_item_everywhere() {
        let mut state = WorldState::new(home(), SceneId::new("intro"));
        let coin = EntityId::new("coin");
        state.add_item_at(coin.clone(), home());
        state.inventory.insert(coin.clone());

        state.remove_item(&coin);

        assert!(!state.inventory.contains(&coin));
        assert!(!state.items_here().contains(&coin));
    }

    #[test]
    fn test_ending() {
        let mut state = WorldState::new(home(), SceneId::new("intro"));
        state.set_ending(EndingId::new("done"));
        assert!(state.is_ended());
        assert_eq!(state.ending, Some(EndingId::new("done")));
    }
}
