//! # Scene Loading
//!
//! Builds the runtime world of one scene from its descriptor: background,
//! solid obstacles, placed actors and the transition zones at the world edges.

use crate::game::{
    new_actor_id, ActorId, ActorInstance, ActorKind, GameConfig, Position, Rect, SpecRef,
    SpriteConfig, WorldConfig,
};
use crate::generation::{is_inside_building, AssetCatalog, SceneDataset, SpawnPlanner};
use log::{debug, info, warn};
use rand::Rng;

/// Runtime world of the scene the player is in.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub index: usize,
    /// Background asset, or the placeholder if the scene's own is missing
    pub background: String,
    /// Every valid building of the scene
    pub buildings: Vec<Rect>,
    /// Buildings that block movement; never inside the teleport clearance
    pub obstacles: Vec<Rect>,
    pub actors: Vec<ActorInstance>,
    /// Whether walking off the right edge leads to another scene
    pub has_next: bool,
    /// Whether walking off the left edge leads to another scene
    pub has_prev: bool,
}

impl SceneState {
    pub fn actor(&self, id: ActorId) -> Option<&ActorInstance> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut ActorInstance> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    /// Removes an actor from the scene for good.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<ActorInstance> {
        let idx = self.actors.iter().position(|a| a.id == id)?;
        Some(self.actors.remove(idx))
    }

    pub fn actor_positions(&self) -> Vec<Position> {
        self.actors.iter().map(|a| a.position).collect()
    }

    /// Closest actor strictly within `range` of `from`.
    pub fn nearest_actor_within(&self, from: Position, range: f32) -> Option<ActorId> {
        self.actors
            .iter()
            .map(|a| (a.id, a.position.distance(from)))
            .filter(|(_, d)| *d < range)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}

/// Checks if a building reaches into the left or right teleport margin.
///
/// # Examples
///
/// ```
/// use taleplay::{blocks_teleport, Rect};
///
/// assert!(blocks_teleport(&Rect::new(100.0, 0.0, 50.0, 50.0), 140.0, 2560.0));
/// assert!(blocks_teleport(&Rect::new(2400.0, 0.0, 50.0, 50.0), 140.0, 2560.0));
/// assert!(!blocks_teleport(&Rect::new(140.0, 0.0, 50.0, 50.0), 140.0, 2560.0));
/// ```
pub fn blocks_teleport(building: &Rect, clearance: f32, world_width: f32) -> bool {
    building.x < clearance || building.right() > world_width - clearance
}

/// Builds [`SceneState`]s from the dataset.
#[derive(Debug, Clone)]
pub struct SceneLoader {
    world: WorldConfig,
    sprites: SpriteConfig,
    footprint: (f32, f32),
    planner: SpawnPlanner,
}

impl SceneLoader {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            world: config.world.clone(),
            sprites: config.sprites.clone(),
            footprint: (
                config.movement.footprint_width,
                config.movement.footprint_height,
            ),
            planner: SpawnPlanner::new(&config.world),
        }
    }

    pub fn planner(&self) -> &SpawnPlanner {
        &self.planner
    }

    /// Selects the buildings that act as solid obstacles.
    pub fn obstacle_buildings(&self, buildings: &[Rect]) -> Vec<Rect> {
        buildings
            .iter()
            .filter(|b| !blocks_teleport(b, self.world.teleport_clearance, self.world.width))
            .copied()
            .collect()
    }

    /// Loads scene `index`.
    ///
    /// Returns `None` and changes nothing when the index is out of range. Otherwise
    /// places every non-defeated NPC and minion, writing resolved spawn points back
    /// into their specs, and moves the player out of any obstacle.
    pub fn load_scene<R: Rng + ?Sized>(
        &self,
        index: usize,
        dataset: &mut SceneDataset,
        player_position: &mut Position,
        assets: &dyn AssetCatalog,
        rng: &mut R,
    ) -> Option<SceneState> {
        let scene_count = dataset.scene_count();
        let Some(descriptor) = dataset.get_mut(index) else {
            warn!("Scene {} requested but only {} exist", index, scene_count);
            return None;
        };

        let background = match descriptor.background.as_deref() {
            Some(bg) if assets.contains(bg) => bg.to_string(),
            other => {
                warn!(
                    "Background {:?} for scene {} missing, using placeholder",
                    other, index
                );
                self.sprites.placeholder_background.clone()
            }
        };

        let buildings = descriptor.buildings.clone();
        let obstacles = self.obstacle_buildings(&buildings);
        let padding = self.world.building_padding;
        let max_tries = self.world.spawn_max_tries;
        let fallback_sprite = self.sprites.player_sprite();
        let fallback_avatar = self.sprites.player_avatar.as_str();

        let mut actors: Vec<ActorInstance> = Vec::new();
        let groups = [
            (ActorKind::Npc, &mut descriptor.npcs),
            (ActorKind::Minion, &mut descriptor.minions),
        ];
        for (kind, specs) in groups {
            for (spec_index, spec) in specs.iter_mut().enumerate() {
                if spec.defeated {
                    continue;
                }

                let position = match spec.position {
                    Some(p) if !is_inside_building(p, &obstacles, padding) => p,
                    _ => {
                        let existing: Vec<Position> = actors.iter().map(|a| a.position).collect();
                        let p = self
                            .planner
                            .find_safe_spawn(rng, &obstacles, &existing, max_tries);
                        spec.position = Some(p);
                        p
                    }
                };

                actors.push(ActorInstance {
                    id: new_actor_id(),
                    spec: SpecRef {
                        scene: index,
                        kind,
                        index: spec_index,
                    },
                    name: spec.name.clone(),
                    position,
                    footprint: Rect::centered(position, self.footprint.0, self.footprint.1),
                    sprite: assets
                        .resolve_or(spec.sprite.as_deref(), fallback_sprite)
                        .to_string(),
                    avatar: assets
                        .resolve_or(spec.avatar.as_deref(), fallback_avatar)
                        .to_string(),
                    stats: spec.stats,
                    disabled: false,
                });
            }
        }

        if is_inside_building(*player_position, &obstacles, padding) {
            let existing: Vec<Position> = actors.iter().map(|a| a.position).collect();
            let safe = self
                .planner
                .find_safe_spawn(rng, &obstacles, &existing, max_tries);
            debug!(
                "Player inside a building in scene {}, moved to ({}, {})",
                index, safe.x, safe.y
            );
            *player_position = safe;
        }

        info!(
            "Loaded scene {} ({} obstacles, {} actors)",
            index,
            obstacles.len(),
            actors.len()
        );

        Some(SceneState {
            index,
            background,
            buildings,
            obstacles,
            actors,
            has_next: index + 1 < scene_count,
            has_prev: index > 0,
        })
    }
}
