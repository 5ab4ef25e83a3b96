//! Danmaku - A vertical bullet-hell shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity pools, collisions, game phases)
//! - `renderer`: Read-only draw pass against an external draw surface
//! - `session`: Frame driver that feeds input and elapsed time into the sim
//! - `settings`: JSON configuration

pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Pool capacities (hard ceilings, never grown)
    pub const PLAYER_BULLET_CAPACITY: usize = 200;
    pub const ENEMY_CAPACITY: usize = 50;
    pub const ENEMY_BULLET_CAPACITY: usize = 1000;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_RADIUS: f32 = 8.0;
    pub const PLAYER_HIT_RADIUS: f32 = 5.0;
    /// Speed multiplier while focus is held
    pub const FOCUS_FACTOR: f32 = 0.4;
    /// Distance kept between the avatar and every screen edge
    pub const PLAYER_EDGE_MARGIN: f32 = 10.0;
    /// Spawn point sits this far above the bottom edge, horizontally centered
    pub const PLAYER_SPAWN_FROM_BOTTOM: f32 = 100.0;
    pub const PLAYER_START_POWER: f32 = 1.0;

    /// Player shot: twin bullets, 20 volleys per second max
    pub const SHOOT_INTERVAL: f32 = 0.1;
    pub const SHOT_OFFSETS: [f32; 2] = [-5.0, 5.0];
    pub const SHOT_RISE: f32 = 15.0;
    pub const PLAYER_BULLET_SPEED: f32 = 600.0;
    pub const PLAYER_BULLET_RADIUS: f32 = 3.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 20.0;
    pub const ENEMY_HEALTH: i32 = 10;
    pub const ENEMY_DESCENT_SPEED: f32 = 50.0;
    /// Enemies stop descending once below this line
    pub const ENEMY_HOVER_Y: f32 = 150.0;
    pub const ENEMY_EXIT_MARGIN: f32 = 50.0;
    pub const ENEMY_KILL_SCORE: u64 = 100;

    /// Enemy radial burst
    pub const ENEMY_FIRE_INTERVAL: f32 = 1.5;
    pub const ENEMY_BURST_COUNT: usize = 8;
    pub const ENEMY_BULLET_SPEED: f32 = 150.0;
    pub const ENEMY_BULLET_RADIUS: f32 = 4.0;

    /// Bullets are culled this far outside the screen
    pub const BULLET_CULL_MARGIN: f32 = 20.0;

    /// Enemy spawner
    pub const SPAWN_INTERVAL: f32 = 1.0;
    pub const SPAWN_X_MARGIN: i32 = 100;
    pub const SPAWN_Y: f32 = -50.0;

    /// Damage dealt by one player bullet
    pub const PLAYER_BULLET_DAMAGE: i32 = 1;
}

/// Unit vector at the given angle (radians, screen space: +y is down)
#[inline]
pub fn direction_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
