//! The player avatar

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::Pool;
use super::projectile::Projectile;
use super::state::Playfield;
use crate::consts::*;

/// The player's ship. One instance per session, reset between games.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Base movement speed (pixels/s)
    pub speed: f32,
    /// Visual radius
    pub radius: f32,
    /// Collision radius against enemy bullets (smaller than the sprite)
    pub hit_radius: f32,
    /// Focus (slow) mode
    pub focused: bool,
    pub score: u64,
    pub power: f32,
    /// Seconds until the next volley; ready once <= 0
    pub shoot_cooldown: f32,
    /// Where `reset` puts the ship
    spawn_point: Vec2,
}

impl Player {
    pub fn new(field: &Playfield) -> Self {
        let spawn_point = field.player_spawn();
        Self {
            pos: spawn_point,
            speed: PLAYER_SPEED,
            radius: PLAYER_RADIUS,
            hit_radius: PLAYER_HIT_RADIUS,
            focused: false,
            score: 0,
            power: PLAYER_START_POWER,
            shoot_cooldown: 0.0,
            spawn_point,
        }
    }

    /// Back to the spawn point with fresh stats. Cooldown and focus carry over.
    pub fn reset(&mut self) {
        self.pos = self.spawn_point;
        self.score = 0;
        self.power = PLAYER_START_POWER;
    }

    /// Current movement speed, honoring focus mode
    pub fn move_speed(&self) -> f32 {
        if self.focused {
            self.speed * FOCUS_FACTOR
        } else {
            self.speed
        }
    }

    /// Move by the directional input and tick the shot cooldown.
    ///
    /// `direction` components are expected in {-1, 0, 1}; a diagonal is
    /// normalized so it is no faster than an axis.
    pub fn update(&mut self, dt: f32, direction: Vec2, field: &Playfield) {
        let dir = direction.normalize_or_zero();
        self.pos += dir * self.move_speed() * dt;

        // A field narrower than both margins pins the ship to the near edge
        let m = PLAYER_EDGE_MARGIN;
        self.pos.x = self.pos.x.clamp(m, (field.width - m).max(m));
        self.pos.y = self.pos.y.clamp(m, (field.height - m).max(m));

        if self.shoot_cooldown > 0.0 {
            self.shoot_cooldown -= dt;
        }
    }

    pub fn set_focus(&mut self, held: bool) {
        self.focused = held;
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown <= 0.0
    }

    /// Fire a twin volley if the cooldown allows it.
    ///
    /// Each bullet is allocated on its own; an exhausted pool drops it
    /// silently. Returns the number of bullets created.
    pub fn shoot(&mut self, bullets: &mut Pool<Projectile>) -> usize {
        if !self.can_shoot() {
            return 0;
        }

        let mut fired = 0;
        for offset in SHOT_OFFSETS {
            if let Some((_, bullet)) = bullets.allocate_mut() {
                bullet.activate(
                    self.pos + Vec2::new(offset, -SHOT_RISE),
                    Vec2::new(0.0, -PLAYER_BULLET_SPEED),
                );
                fired += 1;
            }
        }

        self.shoot_cooldown = SHOOT_INTERVAL;
        fired
    }

    /// Credit points to the score
    pub fn award(&mut self, points: u64) {
        self.score += points;
    }
}
