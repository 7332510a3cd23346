//! Scenario loading - reads a manifest and rule catalog from a TOML document.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::entities::{Character, EntityId, Item, Location, Manifest};
use crate::rules::{Effect, Precondition, Rule, RuleBook, RuleId};
use crate::world_state::{LocationId, SceneId};

/// Errors raised while loading a scenario.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{context} references unknown id '{id}'")]
    UnknownReference { context: String, id: String },

    #[error("duplicate rule id '{0}'")]
    DuplicateRule(RuleId),
}

/// A fully loaded and validated scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub manifest: Manifest,
    pub rules: RuleBook,
}

#[derive(Debug, Deserialize)]
struct ScenarioDoc {
    scenario: ScenarioHeader,

    #[serde(default)]
    locations: Vec<Location>,

    #[serde(default)]
    items: Vec<Item>,

    #[serde(default)]
    characters: Vec<Character>,

    #[serde(default)]
    rules: Vec<Rule>,
}

#[derive(Debug, Deserialize)]
struct ScenarioHeader {
    start_location: LocationId,
    start_scene: SceneId,

    #[serde(default)]
    discovered: Vec<LocationId>,
}

/// Load a scenario from a TOML file.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario, LoadError> {
    let text = std::fs::read_to_string(path)?;
    parse_scenario(&text)
}

/// Parse a scenario from TOML text and validate every cross-reference.
pub fn parse_scenario(text: &str) -> Result<Scenario, LoadError> {
    let doc: ScenarioDoc = toml::from_str(text)?;

    let manifest = Manifest {
        start_location: doc.scenario.start_location,
        start_scene: doc.scenario.start_scene,
        start_discovered: doc.scenario.discovered,
        locations: doc.locations,
        items: doc.items,
        characters: doc.characters,
    };

    validate_manifest(&manifest)?;

    let mut rules = RuleBook::new();
    for rule in doc.rules {
        if rules.get(&rule.id).is_some() {
            return Err(LoadError::DuplicateRule(rule.id));
        }
        validate_rule(&rule, &manifest)?;
        rules.add_rule(rule);
    }

    Ok(Scenario { manifest, rules })
}

fn unknown(context: impl Into<String>, id: impl std::fmt::Display) -> LoadError {
    LoadError::UnknownReference {
        context: context.into(),
        id: id.to_string(),
    }
}

fn check_location(manifest: &Manifest, context: &str, id: &LocationId) -> Result<(), LoadError> {
    if manifest.has_location(id) {
        Ok(())
    } else {
        Err(unknown(context, id))
    }
}

fn check_entity(manifest: &Manifest, context: &str, id: &EntityId) -> Result<(), LoadError> {
    if manifest.has_entity(id) {
        Ok(())
    } else {
        Err(unknown(context, id))
    }
}

fn validate_manifest(manifest: &Manifest) -> Result<(), LoadError> {
    check_location(manifest, "scenario start_location", &manifest.start_location)?;

    for location in &manifest.start_discovered {
        check_location(manifest, "scenario discovered", location)?;
    }

    for item in &manifest.items {
        check_location(
            manifest,
            &format!("item '{}' location", item.id),
            &item.location,
        )?;
    }

    for character in &manifest.characters {
        check_location(
            manifest,
            &format!("character '{}' location", character.id),
            &character.location,
        )?;
    }

    Ok(())
}

fn validate_rule(rule: &Rule, manifest: &Manifest) -> Result<(), LoadError> {
    let context = format!("rule '{}'", rule.id);

    check_entity(manifest, &format!("{context} trigger"), &rule.trigger)?;

    for precondition in &rule.preconditions {
        match precondition {
            Precondition::InInventory(item) | Precondition::ItemPresent(item) => {
                check_entity(manifest, &context, item)?;
            }
            Precondition::AtLocation(location) | Precondition::Discovered(location) => {
                check_location(manifest, &context, location)?;
            }
            // Scenes are free-form; any id is a valid scene.
            Precondition::SceneIs(_) => {}
        }
    }

    for effect in &rule.effects {
        match effect {
            Effect::TakeItem(item) | Effect::RemoveItem(item) => {
                check_entity(manifest, &context, item)?;
            }
            Effect::PlaceItem { item, location } => {
                check_entity(manifest, &context, item)?;
                check_location(manifest, &context, location)?;
            }
            Effect::MoveTo(location) | Effect::Discover(location) => {
                check_location(manifest, &context, location)?;
            }
            Effect::SetScene(_) | Effect::EndStory(_) => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const UMBRELLA_SCENARIO: &str = r#"
        [scenario]
        start_location = "home"
        start_scene = "intro"

        [[locations]]
        id = "home"
        name = "Home"

        [[items]]
        id = "umbrella"
        name = "Umbrella"
        location = "home"

        [[rules]]
        id = "TakeUmbrella"
        trigger = "umbrella"
        effects = [{ take_item = "umbrella" }]
    "#;

    #[test]
    fn test_parse_umbrella_scenario() {
        let scenario = parse_scenario(UMBRELLA_SCENARIO).unwrap();

        assert_eq!(scenario.manifest.items.len(), 1);
        assert_eq!(scenario.rules.len(), 1);

        let rule = scenario.rules.get(&RuleId::new("TakeUmbrella")).unwrap();
        assert_eq!(rule.trigger, EntityId::new("umbrella"));
        assert_eq!(rule.effects, vec![Effect::TakeItem(EntityId::new("umbrella"))]);
    }

    #[test]
    fn test_parse_preconditions_and_priority() {
        let text = r#"
            [scenario]
            start_location = "home"
            start_scene = "intro"

            [[locations]]
            id = "home"
            name = "Home"

            [[items]]
            id = "key"
            name = "Key"
            location = "home"

            [[rules]]
            id = "UseKey"
            trigger = "key"
            priority = 3
            preconditions = [{ in_inventory = "key" }, { scene_is = "finale" }]
            effects = [{ end_story = "escaped" }]
        "#;

        let scenario = parse_scenario(text).unwrap();
        let rule = scenario.rules.get(&RuleId::new("UseKey")).unwrap();

        assert_eq!(rule.priority, 3);
        assert_eq!(rule.preconditions.len(), 2);
        assert!(matches!(rule.effects[0], Effect::EndStory(_)));
    }

    #[test]
    fn test_unknown_trigger_rejected() {
        let text = r#"
            [scenario]
            start_location = "home"
            start_scene = "intro"

            [[locations]]
            id = "home"
            name = "Home"

            [[rules]]
            id = "PetDragon"
            trigger = "dragon"
        "#;

        let err = parse_scenario(text).unwrap_err();
        assert!(matches!(err, LoadError::UnknownReference { .. }));
    }

    #[test]
    fn test_unknown_item_location_rejected() {
        let text = r#"
            [scenario]
            start_location = "home"
            start_scene = "intro"

            [[locations]]
            id = "home"
            name = "Home"

            [[items]]
            id = "umbrella"
            name = "Umbrella"
            location = "atlantis"
        "#;

        let err = parse_scenario(text).unwrap_err();
        assert!(matches!(err, LoadError::UnknownReference { .. }));
    }

    #[test]
    fn test_duplicate_rule_rejected() {
        let text = r#"
            [scenario]
            start_location = "home"
            start_scene = "intro"

            [[locations]]
            id = "home"
            name = "Home"

            [[rules]]
            id = "Look"
            trigger = "home"

            [[rules]]
            id = "Look"
            trigger = "home"
        "#;

        let err = parse_scenario(text).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateRule(_)));
    }

    #[test]
    fn test_loaded_scenario_seeds_state() {
        let scenario = parse_scenario(UMBRELLA_SCENARIO).unwrap();
        let state = scenario.manifest.initial_state();

        assert_eq!(state.player_location, LocationId::new("home"));
        assert!(state.items_here().contains(&EntityId::new("umbrella")));
    }
}
