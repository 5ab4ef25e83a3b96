//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod player;
pub mod pool;
pub mod projectile;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, circles_overlap, resolve_collisions};
pub use enemy::Enemy;
pub use player::Player;
pub use pool::{Pool, Poolable};
pub use projectile::{Projectile, ProjectileKind};
pub use state::{GameEvent, GamePhase, GameState, Playfield};
pub use tick::{TickInput, simulation_step, tick};
