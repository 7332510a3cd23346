//! The entity manifest - the static catalog of everything a story contains.

use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::world_state::{LocationId, SceneId, WorldState};

/// A location declared by the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
}

/// An item and where it starts out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: EntityId,
    pub name: String,
    pub location: LocationId,
}

/// A character and where they start out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: EntityId,
    pub name: String,
    pub location: LocationId,
}

/// The static catalog of items, locations, and characters in a story,
/// used only to seed the engine's initial world state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub start_location: LocationId,
    pub start_scene: SceneId,

    /// Locations known to the player from the start, in addition to the
    /// starting location itself.
    #[serde(default)]
    pub start_discovered: Vec<LocationId>,

    #[serde(default)]
    pub locations: Vec<Location>,

    #[serde(default)]
    pub items: Vec<Item>,

    #[serde(default)]
    pub characters: Vec<Character>,
}

impl Manifest {
    /// Create an empty manifest with the given starting point.
    pub fn new(start_location: impl Into<LocationId>, start_scene: impl Into<String>) -> Self {
        let start_location = start_location.into();
        Self {
            locations: vec![],
            items: vec![],
            characters: vec![],
            start_discovered: vec![],
            start_location,
            start_scene: SceneId::new(start_scene),
        }
    }

    /// Declare a location.
    pub fn with_location(mut self, id: impl Into<LocationId>, name: impl Into<String>) -> Self {
        self.locations.push(Location {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    /// Declare an item at a starting location.
    pub fn with_item(
        mut self,
        id: impl Into<EntityId>,
        name: impl Into<String>,
        location: impl Into<LocationId>,
    ) -> Self {
        self.items.push(Item {
            id: id.into(),
            name: name.into(),
            location: location.into(),
        });
        self
    }

    /// Declare a character at a starting location.
    pub fn with_character(
        mut self,
        id: impl Into<EntityId>,
        name: impl Into<String>,
        location: impl Into<LocationId>,
    ) -> Self {
        self.characters.push(Character {
            id: id.into(),
            name: name.into(),
            location: location.into(),
        });
        self
    }

    /// Mark a location as discovered from the start.
    pub fn with_discovered(mut self, location: impl Into<LocationId>) -> Self {
        self.start_discovered.push(location.into());
        self
    }

    /// Whether an id names a declared location.
    pub fn has_location(&self, id: &LocationId) -> bool {
        self.locations.iter().any(|l| &l.id == id)
    }

    /// Whether an id names any declared entity (item, character, or location).
    pub fn has_entity(&self, id: &EntityId) -> bool {
        self.items.iter().any(|i| &i.id == id)
            || self.characters.iter().any(|c| &c.id == id)
            || self.has_location(&LocationId::new(id.as_str()))
    }

    /// Seed the initial world state: the player stands at the starting
    /// location, every item and character is placed, and the starting
    /// location plus any `start_discovered` entries are known.
    pub fn initial_state(&self) -> WorldState {
        let mut state = WorldState::new(self.start_location.clone(), self.start_scene.clone());

        for location in &self.start_discovered {
            state.discover(location.clone());
        }

        for item in &self.items {
            state.add_item_at(item.id.clone(), item.location.clone());
        }

        for character in &self.characters {
            state.add_character_at(character.id.clone(), character.location.clone());
        }

        state
    }
}
