//! Collision detection and resolution
//!
//! Everything here is a circle test. Both passes walk their pools in slot
//! order, so the outcome is reproducible: a player bullet that overlaps two
//! enemies hits the one in the lower slot.

use glam::Vec2;

use super::enemy::Enemy;
use super::player::Player;
use super::pool::Pool;
use super::projectile::Projectile;
use crate::consts::PLAYER_BULLET_DAMAGE;

/// What the collision pass found this frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Player bullets that connected, in slot order
    pub bullet_hits: usize,
    /// Enemy slots destroyed this frame, in the order they died
    pub enemies_killed: Vec<usize>,
    /// First enemy bullet found touching the player's hit circle
    pub player_hit_by: Option<usize>,
}

/// Circle-circle overlap test; touching circles count as a hit
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) <= reach * reach
}

/// Player bullets against enemies.
///
/// A bullet is spent on its first hit and takes no further part in the pass.
/// An enemy killed by an earlier bullet is skipped by later ones. Returns the
/// number of hits and pushes killed enemy slots onto `killed`.
pub fn player_bullets_vs_enemies(
    bullets: &mut Pool<Projectile>,
    enemies: &mut Pool<Enemy>,
    killed: &mut Vec<usize>,
) -> usize {
    let mut hits = 0;
    for (_, bullet) in bullets.iter_active_mut() {
        for (slot, enemy) in enemies.iter_active_mut() {
            if !circles_overlap(bullet.pos, bullet.radius, enemy.pos, enemy.radius) {
                continue;
            }
            bullet.active = false;
            hits += 1;
            if enemy.take_damage(PLAYER_BULLET_DAMAGE) {
                killed.push(slot);
            }
            break;
        }
    }
    hits
}

/// Enemy bullets against the player's hit circle.
///
/// The bullet is left active; a hit ends the run anyway.
pub fn enemy_bullets_vs_player(bullets: &Pool<Projectile>, player: &Player) -> Option<usize> {
    bullets
        .iter_active()
        .find(|(_, bullet)| {
            circles_overlap(bullet.pos, bullet.radius, player.pos, player.hit_radius)
        })
        .map(|(slot, _)| slot)
}

/// Run both passes
pub fn resolve_collisions(
    player_bullets: &mut Pool<Projectile>,
    enemies: &mut Pool<Enemy>,
    enemy_bullets: &Pool<Projectile>,
    player: &Player,
) -> CollisionReport {
    let mut enemies_killed = Vec::new();
    let bullet_hits = player_bullets_vs_enemies(player_bullets, enemies, &mut enemies_killed);
    CollisionReport {
        bullet_hits,
        enemies_killed,
        player_hit_by: enemy_bullets_vs_player(enemy_bullets, player),
    }
}
