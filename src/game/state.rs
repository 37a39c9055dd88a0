//! # Game Session Module
//!
//! Central session state and the per-tick controller.
//!
//! This module contains the [`GameSession`] struct that owns everything a running
//! game needs: the scene dataset, the current scene, the player and the active
//! interaction mode. The front-end calls [`GameSession::update`] once per frame
//! with the sampled input and the elapsed time, then drains the queued
//! [`GameEvent`]s to play sounds and show messages.

use crate::game::{
    resolve_battle, step_position, ActorId, AnimationState, BattleEvent, BattleOutcome,
    BattleSession, DialogueSession, DialogueStep, Facing, GameConfig, InteractionMenu,
    MenuChoice, PlayerState, Rect,
};
use crate::generation::{
    create_rng, AssetCatalog, SceneDataset, SceneLoader, SceneState, DEFAULT_SPAWN,
};
use crate::input::InputSample;
use crate::{TaleError, TaleResult};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use std::time::Duration;

/// How much attention a message deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageImportance {
    Info,
    Important,
    Critical,
}

/// Sounds the front-end should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    WalkStart,
    WalkStop,
    Hit,
    LevelUp,
}

/// Side effects queued by the session for the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Text for the message area
    Message {
        text: String,
        importance: MessageImportance,
    },
    Sound(SoundCue),
    /// A scene finished loading
    SceneEntered { index: usize },
    /// The player reached a new level
    LevelUp { level: u32 },
    /// An actor lost a battle; `removed` is true for minions
    ActorDefeated {
        actor: ActorId,
        name: String,
        removed: bool,
    },
    BattleResolved { outcome: BattleOutcome },
}

/// The interaction state that receives input. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    FreeRoam,
    Menu(InteractionMenu),
    Dialogue(DialogueSession),
    Battle(BattleSession),
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::FreeRoam => "free-roam",
            Mode::Menu(_) => "menu",
            Mode::Dialogue(_) => "dialogue",
            Mode::Battle(_) => "battle",
        }
    }

    /// Modal modes freeze the player in place.
    pub fn is_modal(&self) -> bool {
        matches!(self, Mode::Dialogue(_) | Mode::Battle(_))
    }
}

/// A running game.
///
/// Owns the dataset, so spec mutations (sticky spawn points, defeated flags)
/// persist across scene changes for the lifetime of the session.
pub struct GameSession {
    config: GameConfig,
    dataset: SceneDataset,
    loader: SceneLoader,
    assets: Box<dyn AssetCatalog>,
    rng: StdRng,
    player: PlayerState,
    animation: AnimationState,
    scene: SceneState,
    mode: Mode,
    /// Actor in interaction range, shown with a prompt
    prompt_target: Option<ActorId>,
    profile_visible: bool,
    walking: bool,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Starts a session on scene 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleplay::{AssetSet, GameConfig, GameSession, SceneDataset};
    ///
    /// let session = GameSession::new(
    ///     SceneDataset::default(),
    ///     GameConfig::default(),
    ///     Box::new(AssetSet::new()),
    ///     42,
    /// )
    /// .unwrap();
    /// assert_eq!(session.scene().index, 0);
    /// assert_eq!(session.player().name, "Hero");
    /// assert!(session.mode().name() == "free-roam");
    /// ```
    pub fn new(
        dataset: SceneDataset,
        config: GameConfig,
        assets: Box<dyn AssetCatalog>,
        seed: u64,
    ) -> TaleResult<Self> {
        let mut dataset = dataset;
        let loader = SceneLoader::new(&config);
        let mut rng = create_rng(seed);
        let mut player = PlayerState::new(dataset.player_name(), DEFAULT_SPAWN);

        let scene = loader
            .load_scene(0, &mut dataset, &mut player.position, assets.as_ref(), &mut rng)
            .ok_or_else(|| TaleError::InvalidState("Scene dataset has no scenes".to_string()))?;

        info!(
            "Session started for {} with {} scene(s)",
            player.name,
            dataset.scene_count()
        );

        Ok(Self {
            config,
            dataset,
            loader,
            assets,
            rng,
            player,
            animation: AnimationState::new(),
            scene,
            mode: Mode::FreeRoam,
            prompt_target: None,
            profile_visible: false,
            walking: false,
            events: vec![GameEvent::SceneEntered { index: 0 }],
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn dataset(&self) -> &SceneDataset {
        &self.dataset
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn prompt_target(&self) -> Option<ActorId> {
        self.prompt_target
    }

    pub fn profile_visible(&self) -> bool {
        self.profile_visible
    }

    pub fn is_menu_active(&self) -> bool {
        matches!(self.mode, Mode::Menu(_))
    }

    pub fn is_dialogue_active(&self) -> bool {
        matches!(self.mode, Mode::Dialogue(_))
    }

    pub fn is_battle_active(&self) -> bool {
        matches!(self.mode, Mode::Battle(_))
    }

    /// Events queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Runs one tick.
    ///
    /// Profile input is handled first and works in every mode. Then the scene
    /// boundary is checked, and finally the input goes to the active mode only.
    pub fn update(&mut self, input: &InputSample, elapsed: Duration) {
        self.handle_profile(input);
        self.check_boundary();

        match std::mem::take(&mut self.mode) {
            Mode::FreeRoam => self.update_free_roam(input, elapsed),
            Mode::Menu(menu) => self.update_menu(menu, input),
            Mode::Dialogue(dialogue) => {
                self.stop_walking();
                self.update_dialogue(dialogue, input);
            }
            Mode::Battle(battle) => {
                self.stop_walking();
                self.update_battle(battle, elapsed);
            }
        }
    }

    /// Loads scene `index`, tearing down any menu, dialogue or battle.
    ///
    /// Returns false and changes nothing when the index is out of range.
    pub fn load_scene(&mut self, index: usize) -> bool {
        let Some(scene) = self.loader.load_scene(
            index,
            &mut self.dataset,
            &mut self.player.position,
            self.assets.as_ref(),
            &mut self.rng,
        ) else {
            return false;
        };

        if self.mode != Mode::FreeRoam {
            debug!("Scene change closed the active {}", self.mode.name());
        }
        self.mode = Mode::FreeRoam;
        self.scene = scene;
        self.prompt_target = None;
        self.events.push(GameEvent::SceneEntered { index });
        true
    }

    /// Opens the interaction menu on an actor of the current scene.
    ///
    /// Does nothing outside free roam, for unknown actors, and for beaten minions.
    pub fn open_menu(&mut self, target: ActorId) -> bool {
        if self.mode != Mode::FreeRoam {
            return false;
        }
        let Some(actor) = self.scene.actor(target) else {
            return false;
        };

        let defeated = actor.disabled || self.spec_defeated(target);
        match InteractionMenu::open(actor, defeated) {
            Some(menu) => {
                self.stop_walking();
                self.mode = Mode::Menu(menu);
                true
            }
            None => false,
        }
    }

    /// Starts a conversation with an actor. An actor with nothing to say leaves
    /// the session in free roam.
    pub fn start_dialogue(&mut self, target: ActorId) -> bool {
        let Some(actor) = self.scene.actor(target) else {
            return false;
        };

        let lines = self
            .dataset
            .spec(actor.spec)
            .map(|spec| spec.dialogue.clone())
            .unwrap_or_default();

        match DialogueSession::start(
            lines,
            actor.avatar.clone(),
            self.player.name.clone(),
            self.config.sprites.player_avatar.clone(),
        ) {
            Some(dialogue) => {
                self.mode = Mode::Dialogue(dialogue);
                true
            }
            None => {
                debug!("{} has nothing to say", actor.name);
                self.mode = Mode::FreeRoam;
                false
            }
        }
    }

    /// Starts a battle against an actor. Unknown actors are ignored.
    pub fn start_battle(&mut self, target: ActorId) -> bool {
        let Some(actor) = self.scene.actor(target) else {
            warn!("Battle requested against missing actor {}", target);
            return false;
        };

        info!("Battle started against {}", actor.name);
        self.mode = Mode::Battle(BattleSession::start(actor, &self.config.battle));
        true
    }

    fn spec_defeated(&self, target: ActorId) -> bool {
        let Some(actor) = self.scene.actor(target) else {
            return false;
        };
        self.dataset
            .spec(actor.spec)
            .is_some_and(|spec| spec.defeated)
    }

    fn handle_profile(&mut self, input: &InputSample) {
        if input.toggle_profile {
            self.profile_visible = !self.profile_visible;
        }
        if !self.profile_visible {
            return;
        }
        let Some(stat) = input.allocate else {
            return;
        };

        match self
            .player
            .allocate_skill_point(stat, &self.config.progression)
        {
            Ok(()) => debug!(
                "Spent a skill point on {:?}, {} left",
                stat, self.player.skill_points
            ),
            Err(e) => {
                warn!("Skill allocation rejected: {}", e);
                self.events.push(GameEvent::Message {
                    text: "No skill points left".to_string(),
                    importance: MessageImportance::Info,
                });
            }
        }
    }

    fn check_boundary(&mut self) {
        let width = self.config.world.width;
        let trigger = self.config.world.teleport_trigger;
        let landing = self.config.world.teleport_landing;
        let x = self.player.position.x;

        let (target, landing_x) = if x > width - trigger && self.scene.has_next {
            (self.scene.index + 1, landing)
        } else if x < trigger && self.scene.has_prev {
            (self.scene.index - 1, width - landing)
        } else {
            return;
        };

        let previous_x = self.player.position.x;
        self.player.position.x = landing_x;
        if self.load_scene(target) {
            info!("Moved to scene {}", target);
        } else {
            self.player.position.x = previous_x;
        }
    }

    fn update_menu(&mut self, mut menu: InteractionMenu, input: &InputSample) {
        if input.cancel {
            self.mode = Mode::FreeRoam;
            return;
        }
        if input.up || input.down {
            menu.toggle();
        }
        if !input.confirm {
            self.mode = Mode::Menu(menu);
            return;
        }

        match menu.confirm() {
            MenuChoice::Chat(target) => {
                self.start_dialogue(target);
            }
            MenuChoice::Fight(target) => {
                if !self.start_battle(target) {
                    self.mode = Mode::FreeRoam;
                }
            }
        }
    }

    fn update_dialogue(&mut self, mut dialogue: DialogueSession, input: &InputSample) {
        if input.confirm && dialogue.advance() == DialogueStep::Finished {
            self.mode = Mode::FreeRoam;
            return;
        }
        self.mode = Mode::Dialogue(dialogue);
    }

    fn update_battle(&mut self, mut battle: BattleSession, elapsed: Duration) {
        for event in battle.advance(elapsed, &mut self.player) {
            match event {
                BattleEvent::PlayerStrike { .. } | BattleEvent::CounterStrike { .. } => {
                    self.events.push(GameEvent::Sound(SoundCue::Hit));
                }
                BattleEvent::Resolved(outcome) => self.finish_battle(&battle, outcome),
                BattleEvent::Closed => {
                    debug!("Battle view closed");
                    self.mode = Mode::FreeRoam;
                    return;
                }
            }
        }
        self.mode = Mode::Battle(battle);
    }

    fn finish_battle(&mut self, battle: &BattleSession, outcome: BattleOutcome) {
        let report = resolve_battle(
            battle,
            outcome,
            &mut self.player,
            &mut self.scene,
            &mut self.dataset,
            &self.config.progression,
        );

        self.events.push(GameEvent::BattleResolved { outcome });
        if outcome == BattleOutcome::Victory {
            self.events.push(GameEvent::ActorDefeated {
                actor: battle.target(),
                name: battle.target_name().to_string(),
                removed: report.target_removed,
            });
        }
        if report.levels_gained > 0 {
            self.events.push(GameEvent::Sound(SoundCue::LevelUp));
            self.events.push(GameEvent::Message {
                text: "Level Up!".to_string(),
                importance: MessageImportance::Important,
            });
            self.events.push(GameEvent::LevelUp {
                level: self.player.level,
            });
        }
        if report.target_removed && self.prompt_target == Some(battle.target()) {
            self.prompt_target = None;
        }
    }

    fn update_free_roam(&mut self, input: &InputSample, elapsed: Duration) {
        self.prompt_target = self
            .scene
            .nearest_actor_within(self.player.position, self.config.world.interaction_range);

        if input.confirm {
            if let Some(target) = self.prompt_target {
                if self.open_menu(target) {
                    return;
                }
            }
        }

        let Some(facing) = Facing::from_intent(input.move_x, input.move_y) else {
            self.stop_walking();
            return;
        };

        let blockers: Vec<Rect> = self
            .scene
            .obstacles
            .iter()
            .copied()
            .chain(self.scene.actors.iter().map(|a| a.footprint))
            .collect();
        self.player.position = step_position(
            self.player.position,
            input.move_x,
            input.move_y,
            input.run,
            elapsed,
            &self.config.movement,
            &self.config.world,
            &blockers,
        );
        self.player.facing = facing;
        self.animation.walk(
            facing,
            elapsed,
            Duration::from_millis(self.config.movement.frame_interval_ms),
        );

        if !self.walking {
            self.walking = true;
            self.events.push(GameEvent::Sound(SoundCue::WalkStart));
        }
    }

    fn stop_walking(&mut self) {
        self.animation.idle();
        if self.walking {
            self.walking = false;
            self.events.push(GameEvent::Sound(SoundCue::WalkStop));
        }
    }
}
