//! Enemy units
//!
//! An enemy descends from above the screen, hovers once it is past
//! [`ENEMY_HOVER_Y`], and fires a radial burst on a fixed cadence until it is
//! shot down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::{Pool, Poolable};
use super::projectile::Projectile;
use super::state::Playfield;
use crate::consts::*;
use crate::direction_from_angle;

/// A pooled enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub health: i32,
    /// Seconds accumulated toward the next burst
    pub fire_timer: f32,
    pub active: bool,
}

impl Default for Enemy {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: ENEMY_RADIUS,
            health: ENEMY_HEALTH,
            fire_timer: 0.0,
            active: false,
        }
    }
}

impl Enemy {
    /// Reinitialize every field and bring the slot to life
    pub fn spawn(&mut self, pos: Vec2) {
        *self = Self {
            pos,
            vel: Vec2::new(0.0, ENEMY_DESCENT_SPEED),
            active: true,
            ..Self::default()
        };
    }

    /// Integrate, stop descending past the hover line, cull below the screen.
    /// Horizontal position never culls an enemy.
    pub fn update(&mut self, dt: f32, field: &Playfield) {
        self.pos += self.vel * dt;

        if self.pos.y > ENEMY_HOVER_Y {
            self.vel.y = 0.0;
        }

        if self.pos.y > field.height + ENEMY_EXIT_MARGIN {
            self.active = false;
        }
    }

    /// Advance the fire timer and emit a radial burst when it elapses.
    ///
    /// Each bullet is allocated independently, so a nearly full pool yields a
    /// partial burst. Returns the number of bullets emitted.
    pub fn fire(&mut self, dt: f32, bullets: &mut Pool<Projectile>) -> usize {
        self.fire_timer += dt;
        if self.fire_timer < ENEMY_FIRE_INTERVAL {
            return 0;
        }
        self.fire_timer = 0.0;

        let step = std::f32::consts::TAU / ENEMY_BURST_COUNT as f32;
        let mut emitted = 0;
        for i in 0..ENEMY_BURST_COUNT {
            let Some((_, bullet)) = bullets.allocate_mut() else {
                log::trace!("enemy bullet pool exhausted, burst truncated at {}", i);
                continue;
            };
            let dir = direction_from_angle(i as f32 * step);
            bullet.activate(self.pos, dir * ENEMY_BULLET_SPEED);
            emitted += 1;
        }
        emitted
    }

    /// Apply damage; returns `true` when this hit destroyed the enemy.
    ///
    /// The kill award is left to the caller.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        if self.health <= 0 {
            self.active = false;
            return true;
        }
        false
    }
}

impl Poolable for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}
