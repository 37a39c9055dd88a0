//! # Movement
//!
//! Free-roam movement integration and the player's walk animation.

use crate::game::{
    Facing, MovementConfig, Position, Rect, SpriteConfig, SpriteStrategy, WorldConfig,
};
use crate::utils::{clamp_centered, normalize_intent};
use std::time::Duration;

/// Frames in one directional walk strip.
pub const WALK_FRAMES: usize = 3;

/// Facing and walk-cycle frame of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationState {
    pub facing: Facing,
    pub moving: bool,
    frame: usize,
    since_frame: Duration,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current frame of the walk cycle; 0 when idle.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Advances the walk cycle while moving in `facing`.
    pub fn walk(&mut self, facing: Facing, elapsed: Duration, frame_interval: Duration) {
        if !self.moving || self.facing != facing {
            self.frame = 0;
            self.since_frame = Duration::ZERO;
        }
        self.facing = facing;
        self.moving = true;

        if frame_interval.is_zero() {
            return;
        }
        self.since_frame += elapsed;
        while self.since_frame >= frame_interval {
            self.since_frame -= frame_interval;
            self.frame = (self.frame + 1) % WALK_FRAMES;
        }
    }

    /// Stops on the idle frame, keeping the facing.
    pub fn idle(&mut self) {
        self.moving = false;
        self.frame = 0;
        self.since_frame = Duration::ZERO;
    }
}

/// Which image and frame to draw for the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteFrame {
    pub asset: String,
    pub frame: usize,
    pub flip_x: bool,
}

/// Picks the player's sprite frame for the configured sheet layout.
///
/// The single sheet holds one frame per direction (right, left, up, down). The
/// directional strips hold a three-frame walk cycle each; left reuses the right
/// strip mirrored.
///
/// # Examples
///
/// ```
/// use taleplay::{player_sprite_frame, AnimationState, Facing, SpriteConfig};
///
/// let mut anim = AnimationState::new();
/// anim.facing = Facing::Left;
/// let frame = player_sprite_frame(&SpriteConfig::default(), &anim);
/// assert_eq!(frame.asset, "temp_right.png");
/// assert!(frame.flip_x);
/// ```
pub fn player_sprite_frame(sprites: &SpriteConfig, anim: &AnimationState) -> SpriteFrame {
    match sprites.strategy {
        SpriteStrategy::SingleSheet => SpriteFrame {
            asset: sprites.player_sheet.clone(),
            frame: match anim.facing {
                Facing::Right => 0,
                Facing::Left => 1,
                Facing::Up => 2,
                Facing::Down => 3,
            },
            flip_x: false,
        },
        SpriteStrategy::DirectionalStrips => {
            let [down, up, right] = &sprites.player_strips;
            let (asset, flip_x) = match anim.facing {
                Facing::Down => (down, false),
                Facing::Up => (up, false),
                Facing::Right => (right, false),
                Facing::Left => (right, true),
            };
            SpriteFrame {
                asset: asset.clone(),
                frame: anim.frame(),
                flip_x,
            }
        }
    }
}

/// Moves a footprint-sized body by one tick of input.
///
/// The intent is normalized so diagonals are not faster. The move is split into
/// steps no longer than the footprint's shorter side, so no blocker can be
/// skipped over however long the tick is. Within each step both axes are applied
/// separately and an axis is dropped once it would push the body into a blocker
/// it was not already touching, so the player slides along walls. The result
/// stays inside the world.
#[allow(clippy::too_many_arguments)]
pub fn step_position(
    from: Position,
    move_x: i8,
    move_y: i8,
    run: bool,
    elapsed: Duration,
    movement: &MovementConfig,
    world: &WorldConfig,
    blockers: &[Rect],
) -> Position {
    let (dx, dy) = normalize_intent(move_x, move_y);
    if dx == 0.0 && dy == 0.0 {
        return from;
    }

    let speed = if run {
        movement.run_speed
    } else {
        movement.walk_speed
    };
    let distance = speed * elapsed.as_secs_f32();
    let (w, h) = (movement.footprint_width, movement.footprint_height);

    let blocked = |at: Position, was: Position| {
        let next = Rect::centered(at, w, h);
        let prev = Rect::centered(was, w, h);
        blockers
            .iter()
            .any(|b| next.intersects(b) && !prev.intersects(b))
    };

    let max_step = w.min(h).max(1.0);
    let steps = (distance / max_step).ceil().max(1.0) as u32;
    let step = distance / steps as f32;

    let mut pos = from;
    let (mut free_x, mut free_y) = (dx != 0.0, dy != 0.0);
    for _ in 0..steps {
        if free_x {
            let try_x = Position::new(clamp_centered(pos.x + dx * step, w, world.width), pos.y);
            if blocked(try_x, pos) {
                free_x = false;
            } else {
                pos = try_x;
            }
        }

        if free_y {
            let try_y = Position::new(pos.x, clamp_centered(pos.y + dy * step, h, world.height));
            if blocked(try_y, pos) {
                free_y = false;
            } else {
                pos = try_y;
            }
        }

        if !free_x && !free_y {
            break;
        }
    }

    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_walk_cycle_advances_every_interval() {
        let mut anim = AnimationState::new();
        anim.walk(Facing::Up, ms(100), ms(120));
        assert_eq!(anim.frame(), 0);
        anim.walk(Facing::Up, ms(20), ms(120));
        assert_eq!(anim.frame(), 1);
        anim.walk(Facing::Up, ms(240), ms(120));
        assert_eq!(anim.frame(), 0);
    }

    #[test]
    fn test_turning_restarts_cycle() {
        let mut anim = AnimationState::new();
        anim.walk(Facing::Up, ms(130), ms(120));
        assert_eq!(anim.frame(), 1);
        anim.walk(Facing::Right, ms(10), ms(120));
        assert_eq!(anim.frame(), 0);
        anim.idle();
        assert_eq!(anim.facing, Facing::Right);
        assert!(!anim.moving);
    }

    #[test]
    fn test_single_sheet_frames() {
        let mut sprites = SpriteConfig::default();
        sprites.strategy = SpriteStrategy::SingleSheet;
        let mut anim = AnimationState::new();
        assert_eq!(player_sprite_frame(&sprites, &anim).frame, 3);
        anim.facing = Facing::Left;
        let frame = player_sprite_frame(&sprites, &anim);
        assert_eq!(frame.frame, 1);
        assert!(!frame.flip_x);
    }

    #[test]
    fn test_walk_and_run_speed() {
        let movement = MovementConfig::default();
        let world = WorldConfig::default();
        let start = Position::new(1000.0, 700.0);

        let walked = step_position(start, 1, 0, false, ms(1000), &movement, &world, &[]);
        assert!((walked.x - 1220.0).abs() < 1e-3);

        let ran = step_position(start, 0, -1, true, ms(500), &movement, &world, &[]);
        assert!((ran.y - 540.0).abs() < 1e-3);
    }

    #[test]
    fn test_clamped_to_world() {
        let movement = MovementConfig::default();
        let world = WorldConfig::default();
        let pos = step_position(
            Position::new(30.0, 30.0),
            -1,
            -1,
            true,
            ms(1000),
            &movement,
            &world,
            &[],
        );
        assert_eq!(pos, Position::new(20.0, 28.0));
    }

    #[test]
    fn test_slides_along_blocker() {
        let movement = MovementConfig::default();
        let world = WorldConfig::default();
        let wall = Rect::new(1030.0, 0.0, 100.0, 1440.0);

        let pos = step_position(
            Position::new(1000.0, 700.0),
            1,
            1,
            false,
            ms(100),
            &movement,
            &world,
            &[wall],
        );
        assert_eq!(pos.x, 1000.0);
        assert!(pos.y > 700.0);
    }

    #[test]
    fn test_long_tick_cannot_cross_thin_wall() {
        let movement = MovementConfig::default();
        let world = WorldConfig::default();
        let wall = Rect::new(1000.0, 0.0, 40.0, 1440.0);

        let pos = step_position(
            Position::new(900.0, 700.0),
            1,
            0,
            true,
            ms(600),
            &movement,
            &world,
            &[wall],
        );
        assert!(pos.x > 900.0);
        assert!(pos.x + movement.footprint_width / 2.0 <= wall.x);

        // a frame stall of several seconds against a one-unit wall
        let sliver = Rect::new(1000.0, 0.0, 1.0, 1440.0);
        let pos = step_position(
            Position::new(900.0, 700.0),
            1,
            0,
            true,
            ms(5000),
            &movement,
            &world,
            &[sliver],
        );
        assert!(pos.x + movement.footprint_width / 2.0 <= sliver.x);
    }

    #[test]
    fn test_can_leave_overlapping_blocker() {
        let movement = MovementConfig::default();
        let world = WorldConfig::default();
        let actor = Rect::centered(Position::new(1000.0, 700.0), 40.0, 56.0);

        let pos = step_position(
            Position::new(1000.0, 700.0),
            1,
            0,
            false,
            ms(100),
            &movement,
            &world,
            &[actor],
        );
        assert!(pos.x > 1000.0);
    }
}
