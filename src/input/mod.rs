//! # Input Module
//!
//! Per-tick input sampling for the game loop.
//!
//! The session never reads the keyboard itself. The front-end samples the keys once
//! per frame into an [`InputSample`] and hands it to the session.

use crate::game::StatKind;
use macroquad::prelude::*;

/// Everything the player asked for during one tick.
///
/// Movement is held (level-triggered); every other action is edge-triggered and
/// only true on the tick its key went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSample {
    /// Horizontal intent in {-1, 0, 1}
    pub move_x: i8,
    /// Vertical intent in {-1, 0, 1}, negative is up
    pub move_y: i8,
    /// Run modifier held
    pub run: bool,
    pub confirm: bool,
    pub cancel: bool,
    pub up: bool,
    pub down: bool,
    /// Show or hide the status profile
    pub toggle_profile: bool,
    /// Spend a skill point
    pub allocate: Option<StatKind>,
    pub quit: bool,
}

impl InputSample {
    /// A sample with nothing pressed.
    pub fn idle() -> Self {
        Self::default()
    }

    /// A sample holding a movement direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleplay::InputSample;
    ///
    /// let input = InputSample::moving(1, 0);
    /// assert_eq!((input.move_x, input.move_y), (1, 0));
    /// assert!(!input.confirm);
    /// ```
    pub fn moving(move_x: i8, move_y: i8) -> Self {
        Self {
            move_x: move_x.signum(),
            move_y: move_y.signum(),
            ..Self::default()
        }
    }

    pub fn confirm() -> Self {
        Self {
            confirm: true,
            ..Self::default()
        }
    }

    pub fn cancel() -> Self {
        Self {
            cancel: true,
            ..Self::default()
        }
    }

    /// Menu cursor movement; `up` picks the up key, otherwise down.
    pub fn navigate(up: bool) -> Self {
        Self {
            up,
            down: !up,
            ..Self::default()
        }
    }

    pub fn toggle_profile() -> Self {
        Self {
            toggle_profile: true,
            ..Self::default()
        }
    }

    pub fn allocate(stat: StatKind) -> Self {
        Self {
            allocate: Some(stat),
            ..Self::default()
        }
    }

    pub fn with_run(mut self) -> Self {
        self.run = true;
        self
    }

    pub fn is_moving(&self) -> bool {
        self.move_x != 0 || self.move_y != 0
    }
}

/// Reads the keyboard through macroquad.
pub struct InputHandler {
    /// Whether WASD moves as well as the arrow keys
    pub wasd_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self { wasd_enabled: true }
    }

    /// Samples the keyboard state for this frame.
    pub fn sample(&self) -> InputSample {
        let held = |arrow: KeyCode, letter: KeyCode| {
            is_key_down(arrow) || (self.wasd_enabled && is_key_down(letter))
        };
        let axis = |neg: bool, pos: bool| match (neg, pos) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        };

        let allocate = if is_key_pressed(KeyCode::Key1) {
            Some(StatKind::Hp)
        } else if is_key_pressed(KeyCode::Key2) {
            Some(StatKind::Attack)
        } else if is_key_pressed(KeyCode::Key3) {
            Some(StatKind::Defense)
        } else {
            None
        };

        InputSample {
            move_x: axis(held(KeyCode::Left, KeyCode::A), held(KeyCode::Right, KeyCode::D)),
            move_y: axis(held(KeyCode::Up, KeyCode::W), held(KeyCode::Down, KeyCode::S)),
            run: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
            confirm: is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter),
            cancel: is_key_pressed(KeyCode::Escape),
            up: is_key_pressed(KeyCode::Up) || (self.wasd_enabled && is_key_pressed(KeyCode::W)),
            down: is_key_pressed(KeyCode::Down)
                || (self.wasd_enabled && is_key_pressed(KeyCode::S)),
            toggle_profile: is_key_pressed(KeyCode::P),
            allocate,
            quit: is_key_pressed(KeyCode::F10),
        }
    }
}
