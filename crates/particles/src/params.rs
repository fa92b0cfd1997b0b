//! Simulation parameters. Defaults reproduce the stock scene: 1000 particles
//! raining onto a floor with a pyramid standing in the way.

/// Axis-aligned no-fly box sitting on the floor. Particles entering the
/// footprint below `height` are absorbed and respawned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub center_x: f32,
    pub center_z: f32,
    pub half_x: f32,
    pub half_z: f32,
    pub height: f32,
}

impl Obstacle {
    pub const PYRAMID: Self = Self {
        center_x: 0.5 + 0.5 * 4.0,
        center_z: 0.5 * 8.5,
        half_x: 2.35,
        half_z: 2.0 * 2.35,
        height: 2.6,
    };

    /// Inclusive footprint test plus the height cut.
    #[inline]
    pub fn contains(&self, x: f32, y: f32, z: f32) -> bool {
        (x - self.center_x).abs() <= self.half_x
            && (z - self.center_z).abs() <= self.half_z
            && y < self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimParams {
    pub count: usize,
    /// Initial positions are uniform in `[-spawn_extent, spawn_extent]` per axis.
    pub spawn_extent: f32,
    /// Initial downward speed range `(min, max)`; velocity.y = -speed.
    pub fall_speed: (f32, f32),
    pub time_step: f32,
    pub gravity: f32,
    pub floor: f32,
    pub respawn_height: f32,
    pub obstacle: Option<Obstacle>,
    /// Half extent of the bounce cube used by `collision`.
    pub bounds: f32,
    pub restitution: f32,
    pub flock_weight: f32,
}

impl SimParams {
    pub const MAX_NUM_PARTICLES: usize = 1000;

    #[inline]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    #[inline]
    pub fn with_obstacle(mut self, obstacle: Option<Obstacle>) -> Self {
        self.obstacle = obstacle;
        self
    }

    #[inline]
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    #[inline]
    pub fn with_flock_weight(mut self, weight: f32) -> Self {
        self.flock_weight = weight;
        self
    }

    /// Whether a particle at `(x, y, z)` must be sent back to `respawn_height`.
    #[inline]
    pub fn needs_respawn(&self, x: f32, y: f32, z: f32) -> bool {
        y < self.floor || self.obstacle.is_some_and(|o| o.contains(x, y, z))
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            count: Self::MAX_NUM_PARTICLES,
            spawn_extent: 10.0,
            fall_speed: (1.0, 2.0),
            time_step: 0.1,
            gravity: 0.0001,
            floor: 0.0,
            respawn_height: 10.0,
            obstacle: Some(Obstacle::PYRAMID),
            bounds: 1.0,
            restitution: 0.5,
            flock_weight: 0.001,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pyramid_footprint_matches_stock_scene() {
        let o = Obstacle::PYRAMID;
        assert_eq!(o.center_x, 2.5);
        assert_eq!(o.center_z, 4.25);
        assert_eq!(o.half_z, 4.7);
        assert!(o.contains(2.5, 1.0, 4.25));
        assert!(!o.contains(2.5, 2.6, 4.25));
        assert!(!o.contains(5.0, 1.0, 4.25));
    }

    #[test]
    fn footprint_edges_are_inclusive() {
        let o = Obstacle {
            center_x: 0.0,
            center_z: 0.0,
            half_x: 1.0,
            half_z: 2.0,
            height: 1.0,
        };
        assert!(o.contains(1.0, 0.5, -2.0));
        assert!(o.contains(-1.0, 0.5, 2.0));
        assert!(!o.contains(1.5, 0.5, 0.0));
        assert!(!o.contains(0.0, 1.0, 0.0));
    }

    #[test]
    fn respawn_rule_covers_floor_and_obstacle() {
        let p = SimParams::default();
        assert!(p.needs_respawn(-8.0, -0.01, -8.0));
        assert!(p.needs_respawn(2.0, 2.0, 4.0));
        assert!(!p.needs_respawn(2.0, 3.0, 4.0));
        assert!(!p.needs_respawn(-8.0, 0.0, -8.0));

        let open = p.with_obstacle(None);
        assert!(!open.needs_respawn(2.0, 2.0, 4.0));
    }

    #[test]
    fn builders_override_single_fields() {
        let p = SimParams::default()
            .with_count(12)
            .with_gravity(0.5)
            .with_flock_weight(0.25);
        assert_eq!(p.count, 12);
        assert_eq!(p.gravity, 0.5);
        assert_eq!(p.flock_weight, 0.25);
        assert_eq!(p.obstacle, Some(Obstacle::PYRAMID));
    }
}
