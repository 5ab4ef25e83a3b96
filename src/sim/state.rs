//! Game state and core simulation types
//!
//! The world root owns the avatar and all three entity pools. Entities never
//! reach back into it; `tick` passes each one the pieces it needs.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize};

use super::enemy::Enemy;
use super::player::Player;
use super::pool::{Pool, Poolable};
use super::projectile::{Projectile, ProjectileKind};
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the confirm key
    Title,
    /// Active gameplay
    Playing,
    /// Player was hit; waiting for the confirm key
    GameOver,
}

/// Something the simulation did this tick that the outside world may care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    EnemySpawned { slot: usize },
    /// Enemy in `slot` was destroyed and `award` points were credited
    EnemyKilled { slot: usize, award: u64 },
    /// Enemy bullet in `bullet` touched the player's hit circle
    PlayerHit { bullet: usize },
}

/// Screen rectangle the simulation plays in; origin top-left, +y down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Player start position: horizontally centered near the bottom
    pub fn player_spawn(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - PLAYER_SPAWN_FROM_BOTTOM)
    }

    /// Inclusive integer range of enemy spawn X positions
    pub fn spawn_x_range(&self) -> (i32, i32) {
        let lo = SPAWN_X_MARGIN;
        let hi = (self.width as i32 - SPAWN_X_MARGIN).max(lo);
        (lo, hi)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn position RNG
    pub rng: Pcg32,
    pub playfield: Playfield,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter (all phases)
    pub time_ticks: u64,
    pub player: Player,
    #[serde(deserialize_with = "player_bullet_pool")]
    pub player_bullets: Pool<Projectile>,
    #[serde(deserialize_with = "enemy_pool")]
    pub enemies: Pool<Enemy>,
    #[serde(deserialize_with = "enemy_bullet_pool")]
    pub enemy_bullets: Pool<Projectile>,
    /// Seconds accumulated toward the next enemy spawn
    pub spawn_timer: f32,
}

impl GameState {
    /// Create a new game state on the default playfield
    pub fn new(seed: u64) -> Self {
        Self::with_playfield(seed, Playfield::default())
    }

    pub fn with_playfield(seed: u64, playfield: Playfield) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            playfield,
            phase: GamePhase::Title,
            time_ticks: 0,
            player: Player::new(&playfield),
            player_bullets: Pool::new(PLAYER_BULLET_CAPACITY, || {
                Projectile::new(ProjectileKind::Player)
            }),
            enemies: Pool::new(ENEMY_CAPACITY, Enemy::default),
            enemy_bullets: Pool::new(ENEMY_BULLET_CAPACITY, || {
                Projectile::new(ProjectileKind::Enemy)
            }),
            spawn_timer: 0.0,
        }
    }

    /// Reset the avatar and free every pooled entity
    pub fn start_new_game(&mut self) {
        self.player.reset();
        self.player_bullets.deactivate_all();
        self.enemies.deactivate_all();
        self.enemy_bullets.deactivate_all();
        self.spawn_timer = 0.0;
        log::info!("New game (seed {}, tick {})", self.seed, self.time_ticks);
    }

    /// Spawn an enemy at `pos` if a slot is free; returns its slot
    pub fn spawn_enemy(&mut self, pos: Vec2) -> Option<usize> {
        let Some((slot, enemy)) = self.enemies.allocate_mut() else {
            log::trace!("enemy pool exhausted, spawn dropped");
            return None;
        };
        enemy.spawn(pos);
        Some(slot)
    }

    /// Draw a spawn X from the run RNG
    pub fn roll_spawn_x(&mut self) -> f32 {
        let (lo, hi) = self.playfield.spawn_x_range();
        self.rng.random_range(lo..=hi) as f32
    }

    /// Total live entities across all pools
    pub fn live_entities(&self) -> usize {
        self.player_bullets.active_count()
            + self.enemies.active_count()
            + self.enemy_bullets.active_count()
    }
}

// Snapshots must keep the fixed pool capacities
fn pool_with_capacity<'de, D, T>(
    deserializer: D,
    capacity: usize,
    what: &str,
) -> Result<Pool<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Poolable + Deserialize<'de>,
{
    let pool = Pool::<T>::deserialize(deserializer)?;
    if pool.capacity() != capacity {
        return Err(<D::Error as serde::de::Error>::custom(format!(
            "{} pool has {} slots, expected {}",
            what,
            pool.capacity(),
            capacity
        )));
    }
    Ok(pool)
}

fn player_bullet_pool<'de, D: Deserializer<'de>>(d: D) -> Result<Pool<Projectile>, D::Error> {
    pool_with_capacity(d, PLAYER_BULLET_CAPACITY, "player bullet")
}

fn enemy_pool<'de, D: Deserializer<'de>>(d: D) -> Result<Pool<Enemy>, D::Error> {
    pool_with_capacity(d, ENEMY_CAPACITY, "enemy")
}

fn enemy_bullet_pool<'de, D: Deserializer<'de>>(d: D) -> Result<Pool<Projectile>, D::Error> {
    pool_with_capacity(d, ENEMY_BULLET_CAPACITY, "enemy bullet")
}
