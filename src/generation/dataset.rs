//! # Scene Dataset
//!
//! Lenient decoding of the generated `game_data.json` into scene descriptors.
//!
//! Generated data is not trusted: numbers may arrive as strings, building lists may
//! arrive JSON-encoded inside a string, whole scenes may be missing. Nothing here
//! fails; bad input degrades to empty geometry or to a single default scene.

use crate::game::{ActorKind, CombatStats, Position, Rect, SpecRef};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Name used when the dataset does not configure a player.
pub const DEFAULT_PLAYER_NAME: &str = "Hero";

/// One line of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
}

impl DialogueLine {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// The player character as described by the story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub outfit: Option<String>,
}

/// Description of an NPC or minion.
///
/// Mutated in place when the actor is defeated or when its spawn position is
/// resolved; the first resolved position is kept for the rest of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSpec {
    pub name: String,
    pub outfit: Option<String>,
    pub sprite: Option<String>,
    pub avatar: Option<String>,
    pub dialogue: Vec<DialogueLine>,
    pub stats: CombatStats,
    pub position: Option<Position>,
    pub defeated: bool,
    pub is_minion: bool,
}

impl ActorSpec {
    /// Creates a story NPC with default stats and no placement.
    pub fn npc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outfit: None,
            sprite: None,
            avatar: None,
            dialogue: Vec::new(),
            stats: CombatStats::npc_default(),
            position: None,
            defeated: false,
            is_minion: false,
        }
    }

    /// Creates a minion with default stats and no placement.
    pub fn minion(name: impl Into<String>) -> Self {
        Self {
            stats: CombatStats::minion_default(),
            is_minion: true,
            ..Self::npc(name)
        }
    }

    pub fn with_dialogue(mut self, lines: Vec<DialogueLine>) -> Self {
        self.dialogue = lines;
        self
    }

    pub fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    fn from_value(value: &Value, is_minion: bool) -> Option<Self> {
        let obj = value.as_object()?;
        let defaults = if is_minion {
            CombatStats::minion_default()
        } else {
            CombatStats::npc_default()
        };

        let name = string_field(value, "name").unwrap_or_else(|| {
            if is_minion {
                "Minion".to_string()
            } else {
                "Stranger".to_string()
            }
        });

        // `hp` doubles as max hp; zero or missing means "use the default"
        let stat = |key: &str, fallback: u32| {
            number_field(value, key)
                .filter(|n| *n > 0.0)
                .map(|n| n as u32)
                .unwrap_or(fallback)
        };
        let stats = CombatStats::new(
            stat("hp", defaults.max_hp),
            stat("attack", defaults.attack),
            stat("defense", defaults.defense),
        );

        let position = match (number_field(value, "x"), number_field(value, "y")) {
            (Some(x), Some(y)) => Some(Position::new(x as f32, y as f32)),
            _ => None,
        };

        let dialogue = obj
            .get("dialogue")
            .and_then(Value::as_array)
            .map(|lines| lines.iter().filter_map(decode_line).collect())
            .unwrap_or_default();

        Some(Self {
            name,
            outfit: string_field(value, "outfit"),
            sprite: string_field(value, "sprite"),
            avatar: string_field(value, "avatar"),
            dialogue,
            stats,
            position,
            defeated: obj.get("defeated").and_then(Value::as_bool).unwrap_or(false),
            is_minion,
        })
    }
}

/// Static description of one scene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub background: Option<String>,
    pub location: String,
    pub buildings: Vec<Rect>,
    pub npcs: Vec<ActorSpec>,
    pub minions: Vec<ActorSpec>,
    pub opening_remarks: Option<String>,
    pub player: Option<PlayerProfile>,
}

impl SceneDescriptor {
    /// Decodes one scene object. Returns `None` if the value is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        let actors = |key: &str, is_minion: bool| -> Vec<ActorSpec> {
            obj.get(key)
                .and_then(Value::as_array)
                .map(|list| {
                    list.iter()
                        .filter_map(|v| ActorSpec::from_value(v, is_minion))
                        .collect()
                })
                .unwrap_or_default()
        };

        let player = obj.get("player").and_then(|p| {
            string_field(p, "name").map(|name| PlayerProfile {
                name,
                outfit: string_field(p, "outfit"),
            })
        });

        Some(Self {
            background: string_field(value, "background_image"),
            location: string_field(value, "location").unwrap_or_default(),
            buildings: obj
                .get("building_coordinates")
                .map(decode_buildings)
                .unwrap_or_default(),
            npcs: actors("npc", false),
            minions: actors("minions", true),
            opening_remarks: string_field(value, "opening_remarks").filter(|s| !s.is_empty()),
            player,
        })
    }

    /// The scene used when no usable data is available.
    pub fn fallback() -> Self {
        Self {
            background: Some("background_scene_0.png".to_string()),
            location: "Default".to_string(),
            player: Some(PlayerProfile {
                name: DEFAULT_PLAYER_NAME.to_string(),
                outfit: Some("Armor".to_string()),
            }),
            ..Self::default()
        }
    }
}

/// Ordered list of scenes making up one generated game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDataset {
    pub scenes: Vec<SceneDescriptor>,
}

impl Default for SceneDataset {
    fn default() -> Self {
        Self {
            scenes: vec![SceneDescriptor::fallback()],
        }
    }
}

impl SceneDataset {
    /// Creates a dataset from already-built scenes; an empty list becomes the default.
    pub fn new(scenes: Vec<SceneDescriptor>) -> Self {
        if scenes.is_empty() {
            Self::default()
        } else {
            Self { scenes }
        }
    }

    /// Decodes a dataset from JSON text. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleplay::SceneDataset;
    ///
    /// let dataset = SceneDataset::from_json_str("not json");
    /// assert_eq!(dataset.scene_count(), 1);
    /// assert_eq!(dataset.player_name(), "Hero");
    /// ```
    pub fn from_json_str(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                warn!("Scene data is not valid JSON ({}), using default scene", e);
                Self::default()
            }
        }
    }

    /// Decodes a dataset from a JSON value: a list of scenes or a single scene.
    pub fn from_value(value: &Value) -> Self {
        let scenes: Vec<SceneDescriptor> = match value {
            Value::Array(list) => list
                .iter()
                .enumerate()
                .filter_map(|(i, v)| {
                    let scene = SceneDescriptor::from_value(v);
                    if scene.is_none() {
                        warn!("Scene entry {} is not an object, skipping", i);
                    }
                    scene
                })
                .collect(),
            Value::Object(_) => SceneDescriptor::from_value(value).into_iter().collect(),
            _ => Vec::new(),
        };

        if scenes.is_empty() {
            warn!("No usable scenes in data, using default scene");
        } else {
            debug!("Decoded {} scenes", scenes.len());
        }
        Self::new(scenes)
    }

    /// Reads a dataset from disk. A missing or unreadable file yields the default scene.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json_str(&text),
            Err(e) => {
                warn!("Could not read {}: {}, using default scene", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn get(&self, index: usize) -> Option<&SceneDescriptor> {
        self.scenes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SceneDescriptor> {
        self.scenes.get_mut(index)
    }

    /// The spec a placed actor was built from.
    pub fn spec(&self, spec_ref: SpecRef) -> Option<&ActorSpec> {
        let scene = self.scenes.get(spec_ref.scene)?;
        match spec_ref.kind {
            ActorKind::Npc => scene.npcs.get(spec_ref.index),
            ActorKind::Minion => scene.minions.get(spec_ref.index),
        }
    }

    pub fn spec_mut(&mut self, spec_ref: SpecRef) -> Option<&mut ActorSpec> {
        let scene = self.scenes.get_mut(spec_ref.scene)?;
        match spec_ref.kind {
            ActorKind::Npc => scene.npcs.get_mut(spec_ref.index),
            ActorKind::Minion => scene.minions.get_mut(spec_ref.index),
        }
    }

    /// The player's configured name, taken from the first scene.
    pub fn player_name(&self) -> &str {
        self.scenes
            .first()
            .and_then(|s| s.player.as_ref())
            .map(|p| p.name.as_str())
            .unwrap_or(DEFAULT_PLAYER_NAME)
    }

    /// Text shown before play starts, if the first scene has any.
    pub fn opening_remarks(&self) -> Option<&str> {
        self.scenes.first().and_then(|s| s.opening_remarks.as_deref())
    }
}

/// Decodes building rectangles.
///
/// Accepts a list of `{x, y, w, h}` objects or a string holding such a list.
/// Entries with non-positive or non-numeric size are dropped; anything else
/// decodes to no buildings.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use taleplay::decode_buildings;
///
/// let buildings = decode_buildings(&json!("[{\"x\": 1, \"y\": 2, \"w\": 3, \"h\": \"4\"}]"));
/// assert_eq!(buildings.len(), 1);
/// assert!(decode_buildings(&json!("{broken")).is_empty());
/// ```
pub fn decode_buildings(value: &Value) -> Vec<Rect> {
    match value {
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(inner @ Value::Array(_)) => decode_buildings(&inner),
            _ => {
                warn!("Building list is malformed, treating as empty");
                Vec::new()
            }
        },
        Value::Array(list) => list
            .iter()
            .filter_map(|b| {
                let x = number_field(b, "x")?;
                let y = number_field(b, "y")?;
                let w = number_field(b, "w")?;
                let h = number_field(b, "h")?;
                (w > 0.0 && h > 0.0).then(|| Rect::new(x as f32, y as f32, w as f32, h as f32))
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn decode_line(value: &Value) -> Option<DialogueLine> {
    match value {
        Value::Array(pair) => match (pair.first()?, pair.get(1)?) {
            (Value::String(speaker), Value::String(text)) => {
                Some(DialogueLine::new(speaker.clone(), text.clone()))
            }
            _ => None,
        },
        Value::Object(_) => Some(DialogueLine::new(
            string_field(value, "speaker")?,
            string_field(value, "text")?,
        )),
        _ => None,
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Reads a finite number that may be encoded as a JSON number or a numeric string.
fn number_field(value: &Value, key: &str) -> Option<f64> {
    let n = match value.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!([
            {
                "player": {"name": "Harry", "outfit": "robes"},
                "location": "Hogwarts courtyard",
                "background_image": "background_scene_0.png",
                "opening_remarks": "It begins.",
                "building_coordinates": [
                    {"x": 300, "y": 300, "w": 200, "h": 150},
                    {"x": 900, "y": 200, "w": 0, "h": 100}
                ],
                "npc": [
                    {
                        "name": "Hermione",
                        "sprite": "npc_0_0.png",
                        "avatar": "npc_0_0_avatar.png",
                        "dialogue": [["Hermione", "Hello"], ["Harry", "Hi"], ["broken"]],
                        "hp": 120, "attack": 12, "defense": "8"
                    }
                ],
                "minions": [{"name": "Pixie", "sprite": "pixie.png"}]
            },
            "garbage",
            {"location": "Forest", "building_coordinates": "[{\"x\":10,\"y\":10,\"w\":5,\"h\":5}]"}
        ])
    }

    #[test]
    fn test_decode_full_dataset() {
        let dataset = SceneDataset::from_value(&sample());
        assert_eq!(dataset.scene_count(), 2);
        assert_eq!(dataset.player_name(), "Harry");
        assert_eq!(dataset.opening_remarks(), Some("It begins."));

        let first = dataset.get(0).unwrap();
        assert_eq!(first.buildings, vec![Rect::new(300.0, 300.0, 200.0, 150.0)]);
        assert_eq!(first.npcs.len(), 1);

        let hermione = &first.npcs[0];
        assert_eq!(hermione.dialogue.len(), 2);
        assert_eq!(hermione.stats, CombatStats::new(120, 12, 8));
        assert!(!hermione.is_minion);

        let pixie = &first.minions[0];
        assert!(pixie.is_minion);
        assert_eq!(pixie.stats, CombatStats::minion_default());
        assert!(pixie.dialogue.is_empty());
    }

    #[test]
    fn test_string_encoded_buildings() {
        let dataset = SceneDataset::from_value(&sample());
        let forest = dataset.get(1).unwrap();
        assert_eq!(forest.buildings, vec![Rect::new(10.0, 10.0, 5.0, 5.0)]);
        assert!(forest.npcs.is_empty());
    }

    #[test]
    fn test_single_scene_object_accepted() {
        let dataset = SceneDataset::from_value(&json!({"location": "Alone"}));
        assert_eq!(dataset.scene_count(), 1);
        assert_eq!(dataset.get(0).unwrap().location, "Alone");
        assert_eq!(dataset.player_name(), DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_malformed_degrades_to_default() {
        assert_eq!(SceneDataset::from_json_str("{{{"), SceneDataset::default());
        assert_eq!(SceneDataset::from_value(&json!([])), SceneDataset::default());
        assert_eq!(SceneDataset::from_value(&json!(42)), SceneDataset::default());
    }

    #[test]
    fn test_buildings_with_bad_sizes_dropped() {
        let buildings = decode_buildings(&json!([
            {"x": 0, "y": 0, "w": -5, "h": 10},
            {"x": 0, "y": 0, "w": 10},
            {"x": "abc", "y": 0, "w": 10, "h": 10},
            {"x": 1, "y": 1, "w": 10, "h": 10}
        ]));
        assert_eq!(buildings, vec![Rect::new(1.0, 1.0, 10.0, 10.0)]);
        assert!(decode_buildings(&json!({"x": 1})).is_empty());
    }

    #[test]
    fn test_fixed_position_decoded() {
        let spec = ActorSpec::from_value(&json!({"name": "Ron", "x": 400, "y": "500"}), false)
            .unwrap();
        assert_eq!(spec.position, Some(Position::new(400.0, 500.0)));
    }

    #[test]
    fn test_load_missing_file() {
        let dataset = SceneDataset::load(Path::new("/nope/game_data.json"));
        assert_eq!(dataset, SceneDataset::default());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game_data.json");
        std::fs::write(&path, sample().to_string()).unwrap();

        let dataset = SceneDataset::load(&path);
        assert_eq!(dataset.scene_count(), 2);
    }
}
