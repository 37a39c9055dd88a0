//! # Battle Engine
//!
//! Turn-based combat between the player and one actor.
//!
//! A battle is an explicit turn machine advanced by the elapsed time of each tick.
//! The player strikes once per turn interval and the target answers after the
//! counter delay. Once either side is down the battle resolves, stays on screen for
//! the close delay and then reports that it is closed. All pending turns live inside
//! the [`BattleSession`], so dropping the session cancels them.

use crate::game::{
    ActorId, ActorInstance, BattleConfig, CombatStats, PlayerState, ProgressionConfig,
};
use crate::generation::{SceneDataset, SceneState};
use log::info;
use std::time::Duration;

/// Damage dealt by an attacker to a defender. Never less than 1.
///
/// # Examples
///
/// ```
/// use taleplay::compute_damage;
///
/// assert_eq!(compute_damage(20, 10), 15);
/// assert_eq!(compute_damage(5, 100), 1);
/// ```
pub fn compute_damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense / 2).max(1)
}

/// Experience granted for beating an opponent: half of its max hp plus attack.
pub fn experience_reward(stats: &CombatStats) -> u32 {
    ((stats.max_hp as u64 + stats.attack as u64) / 2) as u32
}

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Something that happened while advancing a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleEvent {
    /// The player hit the target
    PlayerStrike { damage: u32, target_hp: u32 },
    /// The target hit the player
    CounterStrike { damage: u32, player_hp: u32 },
    /// One side is down; no more strikes will happen
    Resolved(BattleOutcome),
    /// The battle view should close
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BattlePhase {
    Fighting {
        until_strike: Duration,
        until_counter: Option<Duration>,
    },
    Resolved {
        outcome: BattleOutcome,
        until_close: Duration,
    },
    Closed(BattleOutcome),
}

/// A battle in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleSession {
    target: ActorId,
    target_name: String,
    target_stats: CombatStats,
    timing: BattleConfig,
    phase: BattlePhase,
    log: String,
}

impl BattleSession {
    /// Starts a battle against an actor. The first strike comes after one turn interval.
    pub fn start(target: &ActorInstance, timing: &BattleConfig) -> Self {
        Self {
            target: target.id,
            target_name: target.name.clone(),
            target_stats: target.stats,
            timing: timing.clone(),
            phase: BattlePhase::Fighting {
                until_strike: timing.turn_interval(),
                until_counter: None,
            },
            log: format!("VS {}", target.name),
        }
    }

    pub fn target(&self) -> ActorId {
        self.target
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn target_stats(&self) -> &CombatStats {
        &self.target_stats
    }

    /// Latest line of the battle log.
    pub fn log(&self) -> &str {
        &self.log
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Fighting { .. } => None,
            BattlePhase::Resolved { outcome, .. } | BattlePhase::Closed(outcome) => Some(outcome),
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.phase, BattlePhase::Closed(_))
    }

    /// Advances the battle by `elapsed`, applying every strike that falls due.
    ///
    /// Events are returned in the order they happened.
    pub fn advance(&mut self, elapsed: Duration, player: &mut PlayerState) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        let mut remaining = elapsed;

        loop {
            match self.phase {
                BattlePhase::Fighting {
                    until_strike,
                    until_counter,
                } => {
                    let next = until_counter.map_or(until_strike, |c| c.min(until_strike));
                    if remaining < next {
                        self.phase = BattlePhase::Fighting {
                            until_strike: until_strike - remaining,
                            until_counter: until_counter.map(|c| c - remaining),
                        };
                        break;
                    }
                    remaining -= next;
                    let until_strike = until_strike - next;
                    let until_counter = until_counter.map(|c| c - next);

                    if until_counter == Some(Duration::ZERO) {
                        let damage = compute_damage(self.target_stats.attack, player.defense);
                        let player_hp = player.take_damage(damage);
                        self.log = format!("Hit Player: {}", damage);
                        events.push(BattleEvent::CounterStrike { damage, player_hp });
                        self.phase = BattlePhase::Fighting {
                            until_strike,
                            until_counter: None,
                        };
                        if player_hp == 0 {
                            self.resolve(BattleOutcome::Defeat, &mut events);
                        }
                    } else {
                        let damage = compute_damage(player.attack, self.target_stats.defense);
                        let target_hp = self.target_stats.take_damage(damage);
                        self.log = format!("Hit {}: {}", self.target_name, damage);
                        events.push(BattleEvent::PlayerStrike { damage, target_hp });
                        self.phase = BattlePhase::Fighting {
                            until_strike: self.timing.turn_interval(),
                            until_counter: Some(self.timing.counter_delay()),
                        };
                        if target_hp == 0 {
                            self.resolve(BattleOutcome::Victory, &mut events);
                        }
                    }
                }
                BattlePhase::Resolved {
                    outcome,
                    until_close,
                } => {
                    if remaining < until_close {
                        self.phase = BattlePhase::Resolved {
                            outcome,
                            until_close: until_close - remaining,
                        };
                    } else {
                        self.phase = BattlePhase::Closed(outcome);
                        events.push(BattleEvent::Closed);
                    }
                    break;
                }
                BattlePhase::Closed(_) => break,
            }
        }

        events
    }

    fn resolve(&mut self, outcome: BattleOutcome, events: &mut Vec<BattleEvent>) {
        self.log = match outcome {
            BattleOutcome::Victory => "WIN!".to_string(),
            BattleOutcome::Defeat => "LOSE...".to_string(),
        };
        self.phase = BattlePhase::Resolved {
            outcome,
            until_close: self.timing.close_delay(),
        };
        events.push(BattleEvent::Resolved(outcome));
    }
}

/// What a resolved battle changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub experience_gained: u32,
    pub levels_gained: u32,
    /// The target was a minion and left the scene
    pub target_removed: bool,
}

/// Applies the consequences of a resolved battle.
///
/// Victory grants experience, flags the target's spec as defeated and either
/// removes a minion from the scene or disables a story NPC. Defeat leaves the
/// target untouched, since the fight only wore down the session's copy of its
/// stats. Either way the player is fully healed.
pub fn resolve_battle(
    session: &BattleSession,
    outcome: BattleOutcome,
    player: &mut PlayerState,
    scene: &mut SceneState,
    dataset: &mut SceneDataset,
    rules: &ProgressionConfig,
) -> BattleReport {
    let mut report = BattleReport {
        outcome,
        experience_gained: 0,
        levels_gained: 0,
        target_removed: false,
    };

    match outcome {
        BattleOutcome::Victory => {
            report.experience_gained = experience_reward(session.target_stats());
            report.levels_gained = player.award_experience(report.experience_gained, rules);

            if let Some(actor) = scene.actor_mut(session.target()) {
                if let Some(spec) = dataset.spec_mut(actor.spec) {
                    spec.defeated = true;
                }

                if actor.is_minion() {
                    scene.remove_actor(session.target());
                    report.target_removed = true;
                } else {
                    actor.disabled = true;
                }
            }
            info!(
                "Defeated {} (+{} xp, {} level(s))",
                session.target_name(),
                report.experience_gained,
                report.levels_gained
            );
        }
        BattleOutcome::Defeat => {
            info!("Lost against {}", session.target_name());
        }
    }

    player.full_heal();
    report
}
