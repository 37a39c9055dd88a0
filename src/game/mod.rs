//! # Game Module
//!
//! Session state, interaction state machines and player progression.
//!
//! This module contains the fundamental building blocks of Taleplay:
//! - The game session and its per-tick controller
//! - Actor runtime placement and combat stats
//! - The interaction menu, dialogue and battle state machines
//! - Player progression and movement

pub mod battle;
pub mod config;
pub mod dialogue;
pub mod entities;
pub mod menu;
pub mod movement;
pub mod progression;
pub mod state;

pub use battle::*;
pub use config::*;
pub use dialogue::*;
pub use entities::*;
pub use menu::*;
pub use movement::*;
pub use progression::*;
pub use state::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a point in world space.
///
/// # Examples
///
/// ```
/// use taleplay::Position;
///
/// let pos = Position::new(10.0, 5.0);
/// assert_eq!(pos.x, 10.0);
/// assert_eq!(pos.y, 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Calculates the Euclidean distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleplay::Position;
    ///
    /// let a = Position::new(0.0, 0.0);
    /// let b = Position::new(3.0, 4.0);
    /// assert_eq!(a.distance(b), 5.0);
    /// ```
    pub fn distance(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// Used for building footprints, actor collision boxes and the world bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a rectangle of the given size centered on a position.
    pub fn centered(center: Position, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Checks if a point lies inside the rectangle grown by `padding` on every side.
    ///
    /// Edges are inclusive.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleplay::{Position, Rect};
    ///
    /// let r = Rect::new(100.0, 100.0, 50.0, 50.0);
    /// assert!(r.contains_padded(Position::new(95.0, 120.0), 10.0));
    /// assert!(!r.contains_padded(Position::new(95.0, 120.0), 0.0));
    /// ```
    pub fn contains_padded(&self, point: Position, padding: f32) -> bool {
        point.x >= self.x - padding
            && point.x <= self.right() + padding
            && point.y >= self.y - padding
            && point.y <= self.bottom() + padding
    }

    /// Checks if this rectangle overlaps another one (touching edges do not count).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Facing of a walking character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Picks a facing from a movement intent.
    ///
    /// Horizontal movement wins over vertical movement; a zero vector has no facing.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleplay::Facing;
    ///
    /// assert_eq!(Facing::from_intent(1, -1), Some(Facing::Right));
    /// assert_eq!(Facing::from_intent(0, -1), Some(Facing::Up));
    /// assert_eq!(Facing::from_intent(0, 0), None);
    /// ```
    pub fn from_intent(vx: i8, vy: i8) -> Option<Facing> {
        if vx > 0 {
            Some(Facing::Right)
        } else if vx < 0 {
            Some(Facing::Left)
        } else if vy < 0 {
            Some(Facing::Up)
        } else if vy > 0 {
            Some(Facing::Down)
        } else {
            None
        }
    }

    /// Lowercase name used in animation keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

/// Unique identifier for placed actors.
pub type ActorId = Uuid;

/// Creates a new unique actor ID.
pub fn new_actor_id() -> ActorId {
    Uuid::new_v4()
}
