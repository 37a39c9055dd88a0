//! # Actors
//!
//! Combat stats and the runtime placement of NPCs and minions.
//!
//! Specs (see [`crate::ActorSpec`]) live in the scene dataset and are owned by the
//! session. An [`ActorInstance`] only refers back to its spec through a [`SpecRef`],
//! so the spec can be flagged defeated or given a sticky position while the
//! instance comes and goes with the scene.

use crate::game::{ActorId, Position, Rect};
use serde::{Deserialize, Serialize};

/// Hit points and fighting strength of a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
}

impl CombatStats {
    /// Creates full-health stats.
    pub fn new(max_hp: u32, attack: u32, defense: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            attack,
            defense,
        }
    }

    /// Default stats of a story NPC.
    pub fn npc_default() -> Self {
        Self::new(100, 10, 10)
    }

    /// Default stats of a minion.
    pub fn minion_default() -> Self {
        Self::new(50, 5, 0)
    }

    pub fn is_down(&self) -> bool {
        self.hp == 0
    }

    /// Applies damage, flooring hit points at zero. Returns the remaining hp.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.hp = self.hp.saturating_sub(damage);
        self.hp
    }
}

/// Whether an actor is a story character or a disposable minion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Npc,
    Minion,
}

/// Back-reference from a placed actor to the spec it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecRef {
    pub scene: usize,
    pub kind: ActorKind,
    pub index: usize,
}

/// A placed NPC or minion in the current scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorInstance {
    pub id: ActorId,
    pub spec: SpecRef,
    pub name: String,
    pub position: Position,
    /// Collision box, centered on the position
    pub footprint: Rect,
    pub sprite: String,
    pub avatar: String,
    /// Runtime copy of the spec's stats
    pub stats: CombatStats,
    /// Set when a story NPC has been beaten; it stays in the scene, tinted
    pub disabled: bool,
}

impl ActorInstance {
    pub fn is_minion(&self) -> bool {
        self.spec.kind == ActorKind::Minion
    }

    /// Moves the actor and its collision box.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        self.footprint = Rect::centered(position, self.footprint.w, self.footprint.h);
    }
}
