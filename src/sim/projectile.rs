//! Player and enemy bullets
//!
//! Both variants share one shape; the kind decides the radius and which screen
//! edges cull the bullet.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::Poolable;
use super::state::Playfield;
use crate::consts::*;

/// Who fired the bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Travels up; leaves through the top
    Player,
    /// Travels in any direction; the top edge never culls it
    Enemy,
}

impl ProjectileKind {
    pub fn radius(&self) -> f32 {
        match self {
            ProjectileKind::Player => PLAYER_BULLET_RADIUS,
            ProjectileKind::Enemy => ENEMY_BULLET_RADIUS,
        }
    }
}

/// A pooled bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub active: bool,
}

impl Projectile {
    /// An inactive bullet of the given kind
    pub fn new(kind: ProjectileKind) -> Self {
        Self {
            kind,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: kind.radius(),
            active: false,
        }
    }

    /// Bring the slot to life. Inputs are not validated.
    pub fn activate(&mut self, pos: Vec2, vel: Vec2) {
        self.pos = pos;
        self.vel = vel;
        self.radius = self.kind.radius();
        self.active = true;
    }

    /// Integrate, then cull if outside the expanded screen rectangle
    pub fn update(&mut self, dt: f32, field: &Playfield) {
        self.pos += self.vel * dt;

        if self.is_out_of_bounds(field) {
            self.active = false;
        }
    }

    fn is_out_of_bounds(&self, field: &Playfield) -> bool {
        let m = BULLET_CULL_MARGIN;
        let off_sides = self.pos.x < -m || self.pos.x > field.width + m;
        match self.kind {
            ProjectileKind::Player => off_sides || self.pos.y < -m,
            ProjectileKind::Enemy => off_sides || self.pos.y > field.height + m,
        }
    }
}

impl Poolable for Projectile {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field() -> Playfield {
        Playfield::default()
    }

    #[test]
    fn test_activate_overwrites_stale_fields() {
        let mut bullet = Projectile::new(ProjectileKind::Enemy);
        bullet.activate(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        bullet.deactivate();
        bullet.activate(Vec2::new(10.0, 20.0), Vec2::new(0.0, 150.0));
        assert!(bullet.active);
        assert_eq!(bullet.pos, Vec2::new(10.0, 20.0));
        assert_eq!(bullet.vel, Vec2::new(0.0, 150.0));
        assert_eq!(bullet.radius, ENEMY_BULLET_RADIUS);
    }

    #[test]
    fn test_player_bullet_leaves_through_top() {
        let mut bullet = Projectile::new(ProjectileKind::Player);
        bullet.activate(Vec2::new(400.0, -15.0), Vec2::new(0.0, -600.0));
        bullet.update(1.0 / 60.0, &field());
        assert!(!bullet.active);
    }

    #[test]
    fn test_player_bullet_ignores_bottom_edge() {
        let mut bullet = Projectile::new(ProjectileKind::Player);
        bullet.activate(Vec2::new(400.0, 700.0), Vec2::ZERO);
        bullet.update(1.0 / 60.0, &field());
        assert!(bullet.active);
    }

    #[test]
    fn test_enemy_bullet_ignores_top_edge() {
        let mut bullet = Projectile::new(ProjectileKind::Enemy);
        bullet.activate(Vec2::new(400.0, -100.0), Vec2::new(0.0, -150.0));
        bullet.update(1.0 / 60.0, &field());
        assert!(bullet.active);
    }

    #[test]
    fn test_side_edges_cull_both_kinds() {
        for kind in [ProjectileKind::Player, ProjectileKind::Enemy] {
            let mut left = Projectile::new(kind);
            left.activate(Vec2::new(-21.0, 300.0), Vec2::ZERO);
            left.update(0.0, &field());
            assert!(!left.active);

            let mut right = Projectile::new(kind);
            right.activate(Vec2::new(821.0, 300.0), Vec2::ZERO);
            right.update(0.0, &field());
            assert!(!right.active);
        }
    }

    #[test]
    fn test_margin_is_exclusive() {
        let mut bullet = Projectile::new(ProjectileKind::Enemy);
        bullet.activate(Vec2::new(-20.0, 620.0), Vec2::ZERO);
        bullet.update(0.0, &field());
        assert!(bullet.active);
    }

    proptest! {
        #[test]
        fn prop_player_bullet_above_top_is_culled(
            x in -20.0f32..820.0,
            y in -5000.0f32..-20.01,
            vx in -1.0f32..1.0,
            vy in -1000.0f32..0.0,
        ) {
            let mut bullet = Projectile::new(ProjectileKind::Player);
            bullet.activate(Vec2::new(x, y), Vec2::new(vx, vy));
            bullet.update(1.0 / 60.0, &field());
            prop_assert!(!bullet.active);
        }

        #[test]
        fn prop_enemy_bullet_below_bottom_is_culled(
            x in -20.0f32..820.0,
            y in 620.01f32..5000.0,
            vx in -1.0f32..1.0,
            vy in 0.0f32..1000.0,
        ) {
            let mut bullet = Projectile::new(ProjectileKind::Enemy);
            bullet.activate(Vec2::new(x, y), Vec2::new(vx, vy));
            bullet.update(1.0 / 60.0, &field());
            prop_assert!(!bullet.active);
        }
    }
}
