//! # Player Progression
//!
//! The player's stats, experience and skill points.

use crate::game::{CombatStats, Facing, Position, ProgressionConfig};
use crate::{TaleError, TaleResult};
use serde::{Deserialize, Serialize};

/// A stat that skill points can be spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
}

/// The player's persistent state. Survives scene changes and battles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub position: Position,
    pub facing: Facing,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    /// Progress towards the next level, always below the per-level amount
    pub experience: u32,
    pub skill_points: u32,
}

impl PlayerState {
    /// Creates a level 1 player.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleplay::{PlayerState, Position};
    ///
    /// let player = PlayerState::new("Hero", Position::new(128.0, 128.0));
    /// assert_eq!(player.level, 1);
    /// assert_eq!(player.hp, player.max_hp);
    /// assert_eq!(player.skill_points, 5);
    /// ```
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            facing: Facing::Down,
            level: 1,
            hp: 100,
            max_hp: 100,
            attack: 20,
            defense: 20,
            experience: 0,
            skill_points: 5,
        }
    }

    /// The player's numbers in battle form.
    pub fn combat_stats(&self) -> CombatStats {
        CombatStats {
            hp: self.hp,
            max_hp: self.max_hp,
            attack: self.attack,
            defense: self.defense,
        }
    }

    /// Applies damage, flooring hit points at zero. Returns the remaining hp.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.hp = self.hp.saturating_sub(damage);
        self.hp
    }

    pub fn full_heal(&mut self) {
        self.hp = self.max_hp;
    }

    /// Adds experience and applies every level-up it pays for.
    ///
    /// Each full `experience_per_level` is one level and grants skill points; the
    /// remainder is carried. Returns the number of levels gained.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleplay::{PlayerState, Position, ProgressionConfig};
    ///
    /// let mut player = PlayerState::new("Hero", Position::origin());
    /// player.experience = 95;
    /// let gained = player.award_experience(50, &ProgressionConfig::default());
    /// assert_eq!(gained, 1);
    /// assert_eq!(player.level, 2);
    /// assert_eq!(player.experience, 45);
    /// assert_eq!(player.skill_points, 10);
    /// ```
    pub fn award_experience(&mut self, amount: u32, rules: &ProgressionConfig) -> u32 {
        let per_level = rules.experience_per_level.max(1);
        self.experience = self.experience.saturating_add(amount);

        let mut gained = 0;
        while self.experience >= per_level {
            self.experience -= per_level;
            self.level += 1;
            self.skill_points += rules.skill_points_per_level;
            gained += 1;
        }
        gained
    }

    /// Spends one skill point on a stat.
    ///
    /// HP raises both max and current hit points. Fails without changing anything
    /// when no points are left.
    pub fn allocate_skill_point(
        &mut self,
        stat: StatKind,
        rules: &ProgressionConfig,
    ) -> TaleResult<()> {
        if self.skill_points == 0 {
            return Err(TaleError::InvalidAction("No skill points left".to_string()));
        }

        match stat {
            StatKind::Hp => {
                self.max_hp += rules.hp_per_point;
                self.hp += rules.hp_per_point;
            }
            StatKind::Attack => self.attack += 1,
            StatKind::Defense => self.defense += 1,
        }
        self.skill_points -= 1;
        Ok(())
    }

    /// Lines for the status profile.
    pub fn profile_lines(&self, rules: &ProgressionConfig) -> Vec<String> {
        vec![
            "PLAYER PROFILE".to_string(),
            format!("Name: {}", self.name),
            format!("Level: {}", self.level),
            format!("HP: {} / {}", self.hp, self.max_hp),
            format!("Attack: {}", self.attack),
            format!("Defense: {}", self.defense),
            format!("Skill Points: {}", self.skill_points),
            format!(
                "Experience: {} / {}",
                self.experience, rules.experience_per_level
            ),
        ]
    }

    /// Fraction of the way to the next level, for the experience bar.
    pub fn experience_fraction(&self, rules: &ProgressionConfig) -> f32 {
        (self.experience as f32 / rules.experience_per_level.max(1) as f32).min(1.0)
    }
}
