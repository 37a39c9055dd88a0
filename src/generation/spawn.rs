//! # Spawn Placement
//!
//! Rejection sampling of spawn points that avoid buildings and keep actors apart.

use crate::game::{Position, Rect, WorldConfig};
use log::debug;
use rand::Rng;

/// Point returned when no sampling attempt was made.
pub const DEFAULT_SPAWN: Position = Position { x: 128.0, y: 128.0 };

/// Collision-aware random placement for actors and the player.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPlanner {
    pub world_width: f32,
    pub world_height: f32,
    /// Inset from every world edge
    pub border: i32,
    /// Extra margin around each building
    pub building_padding: f32,
    /// Minimum distance to every existing actor
    pub min_distance: f32,
}

impl SpawnPlanner {
    pub fn new(world: &WorldConfig) -> Self {
        Self {
            world_width: world.width,
            world_height: world.height,
            border: world.spawn_border,
            building_padding: world.building_padding,
            min_distance: world.min_actor_distance,
        }
    }

    /// Checks a candidate against the buildings and the existing actors.
    pub fn is_safe(&self, point: Position, buildings: &[Rect], existing: &[Position]) -> bool {
        !is_inside_building(point, buildings, self.building_padding)
            && existing
                .iter()
                .all(|other| point.distance(*other) >= self.min_distance)
    }

    /// Finds a spawn point, giving up after `max_tries` attempts.
    ///
    /// Points are sampled uniformly on integer coordinates inside the world inset by
    /// the border. When every attempt is rejected the last sample is returned anyway,
    /// so the caller always gets a point.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use taleplay::{GameConfig, SpawnPlanner};
    ///
    /// let planner = SpawnPlanner::new(&GameConfig::default().world);
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let point = planner.find_safe_spawn(&mut rng, &[], &[], 150);
    /// assert!(point.x >= 100.0 && point.x <= 2460.0);
    /// ```
    pub fn find_safe_spawn<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        buildings: &[Rect],
        existing: &[Position],
        max_tries: u32,
    ) -> Position {
        let max_x = (self.world_width as i32 - self.border).max(self.border);
        let max_y = (self.world_height as i32 - self.border).max(self.border);

        let mut candidate = DEFAULT_SPAWN;
        for _ in 0..max_tries {
            candidate = Position::new(
                rng.gen_range(self.border..=max_x) as f32,
                rng.gen_range(self.border..=max_y) as f32,
            );
            if self.is_safe(candidate, buildings, existing) {
                return candidate;
            }
        }

        if max_tries > 0 {
            debug!(
                "Spawn search exhausted after {} tries, using ({}, {})",
                max_tries, candidate.x, candidate.y
            );
        }
        candidate
    }
}

/// Checks if a point is inside any building grown by `padding`.
pub fn is_inside_building(point: Position, buildings: &[Rect], padding: f32) -> bool {
    buildings.iter().any(|b| b.contains_padded(point, padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use rand::{rngs::StdRng, SeedableRng};

    fn planner() -> SpawnPlanner {
        SpawnPlanner::new(&GameConfig::default().world)
    }

    #[test]
    fn test_zero_tries_returns_default() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(planner().find_safe_spawn(&mut rng, &[], &[], 0), DEFAULT_SPAWN);
    }

    #[test]
    fn test_spawn_avoids_buildings_and_actors() {
        let planner = planner();
        let buildings = vec![
            Rect::new(300.0, 300.0, 600.0, 400.0),
            Rect::new(1400.0, 200.0, 500.0, 700.0),
        ];
        let existing = vec![Position::new(1200.0, 1000.0), Position::new(400.0, 1100.0)];
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..50 {
            let p = planner.find_safe_spawn(&mut rng, &buildings, &existing, 150);
            assert!(planner.is_safe(p, &buildings, &existing));
        }
    }

    #[test]
    fn test_samples_stay_inside_border() {
        let planner = planner();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let p = planner.find_safe_spawn(&mut rng, &[], &[], 1);
            assert!(p.x >= 100.0 && p.x <= 2460.0);
            assert!(p.y >= 100.0 && p.y <= 1340.0);
        }
    }

    #[test]
    fn test_exhausted_search_returns_best_effort_point() {
        let planner = planner();
        // The whole world is one building
        let buildings = vec![Rect::new(0.0, 0.0, 2560.0, 1440.0)];
        let mut rng = StdRng::seed_from_u64(5);

        let p = planner.find_safe_spawn(&mut rng, &buildings, &[], 20);
        assert!(is_inside_building(p, &buildings, 10.0));
        assert_ne!(p, DEFAULT_SPAWN);
    }

    #[test]
    fn test_padding_applies() {
        let b = [Rect::new(500.0, 500.0, 100.0, 100.0)];
        assert!(is_inside_building(Position::new(495.0, 550.0), &b, 10.0));
        assert!(!is_inside_building(Position::new(489.0, 550.0), &b, 10.0));
    }
}
