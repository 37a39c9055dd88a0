//! # Scene Management System
//!
//! Runs the front-end: the opening remarks first, then normal play.
//! All game rules live in [`GameSession`]; this loop only samples input, forwards
//! it, plays queued events and draws.

use crate::{
    AudioSink, DirectoryCatalog, GameEvent, GameSession, InputHandler, MacroquadDisplay,
    TaleResult,
};
use log::info;
use macroquad::prelude::*;
use std::time::Duration;

/// Fade-in time of the opening remarks.
pub const OPENING_FADE_IN: Duration = Duration::from_millis(2000);
/// Time the opening remarks stay fully visible.
pub const OPENING_HOLD: Duration = Duration::from_millis(2000);
/// Fade-out time of the opening remarks.
pub const OPENING_FADE_OUT: Duration = Duration::from_millis(1500);
/// Longest frame time fed into a single session update.
pub const MAX_TICK: Duration = Duration::from_millis(100);

/// Timing of the opening remarks shown before play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningSequence {
    text: String,
    elapsed: Duration,
}

impl OpeningSequence {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.elapsed = self.elapsed.saturating_add(elapsed);
    }

    /// Jumps to the end.
    pub fn skip(&mut self) {
        self.elapsed = Self::total();
    }

    pub fn total() -> Duration {
        OPENING_FADE_IN + OPENING_HOLD + OPENING_FADE_OUT
    }

    /// Text opacity in `0.0..=1.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use taleplay::OpeningSequence;
    ///
    /// let mut opening = OpeningSequence::new("Long ago...");
    /// assert_eq!(opening.alpha(), 0.0);
    /// opening.advance(Duration::from_millis(1000));
    /// assert_eq!(opening.alpha(), 0.5);
    /// opening.advance(Duration::from_millis(2000));
    /// assert_eq!(opening.alpha(), 1.0);
    /// ```
    pub fn alpha(&self) -> f32 {
        let t = self.elapsed;
        if t < OPENING_FADE_IN {
            t.as_secs_f32() / OPENING_FADE_IN.as_secs_f32()
        } else if t < OPENING_FADE_IN + OPENING_HOLD {
            1.0
        } else if t < Self::total() {
            let out = t - OPENING_FADE_IN - OPENING_HOLD;
            1.0 - out.as_secs_f32() / OPENING_FADE_OUT.as_secs_f32()
        } else {
            0.0
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= Self::total()
    }
}

/// Represents the current scene of the front-end
#[derive(Debug, Clone, PartialEq)]
pub enum SceneType {
    /// Opening remarks before play
    Opening(OpeningSequence),
    /// Normal gameplay
    Playing,
}

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    current_scene: SceneType,
    session: GameSession,
    display: MacroquadDisplay,
    audio: AudioSink,
    input_handler: InputHandler,
}

impl SceneManager {
    /// Creates the scene manager and loads the assets of the first scene.
    pub async fn new(
        session: GameSession,
        catalog: DirectoryCatalog,
        input_handler: InputHandler,
    ) -> TaleResult<Self> {
        let mut display = MacroquadDisplay::new(catalog.clone()).await?;
        display.load_player_textures(&session.config().sprites).await;
        display.add_message("WASD/arrows: move, SHIFT: run, SPACE: talk".to_string());
        display.add_message("P: profile, 1/2/3: spend skill points, F10: quit".to_string());

        let audio = AudioSink::load(&catalog).await;
        audio.start_music();

        let current_scene = match session.dataset().opening_remarks() {
            Some(text) if !text.trim().is_empty() => {
                SceneType::Opening(OpeningSequence::new(text))
            }
            _ => SceneType::Playing,
        };

        Ok(Self {
            current_scene,
            session,
            display,
            audio,
            input_handler,
        })
    }

    /// Runs the main scene loop until the game exits
    pub async fn run(&mut self) -> TaleResult<()> {
        loop {
            let elapsed = Duration::from_secs_f32(get_frame_time().max(0.0)).min(MAX_TICK);
            let input = self.input_handler.sample();
            if input.quit {
                info!("Quit requested");
                break;
            }

            match self.current_scene {
                SceneType::Opening(ref mut opening) => {
                    opening.advance(elapsed);
                    if input.confirm {
                        opening.skip();
                    }
                    self.display.render_opening(opening.text(), opening.alpha());
                    if opening.is_finished() {
                        self.current_scene = SceneType::Playing;
                    }
                }
                SceneType::Playing => {
                    self.session.update(&input, elapsed);
                    self.process_game_events().await;
                    self.display.render_game(&self.session);
                }
            }
            next_frame().await;
        }
        Ok(())
    }

    /// Plays sounds, shows messages and loads textures for new scenes.
    async fn process_game_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::Message { text, .. } => self.display.add_message(text),
                GameEvent::Sound(cue) => self.audio.play(cue),
                GameEvent::SceneEntered { index } => {
                    info!("Entered scene {}", index);
                    self.display.load_scene_textures(self.session.scene()).await;
                }
                GameEvent::ActorDefeated { name, .. } => {
                    self.display.add_message(format!("{} was defeated", name));
                }
                GameEvent::LevelUp { .. } | GameEvent::BattleResolved { .. } => {}
            }
        }
    }
}
