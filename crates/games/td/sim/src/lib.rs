//! Tower-defense simulation core.
//!
//! Enemies walk a fixed waypoint path, towers shoot projectiles at them,
//! and the player spends money on towers and upgrades while waves grow.
//! Everything advances in fixed ticks; rendering and input live outside
//! and talk to this crate through [`TdAction`]s and [`td_types::TdObservation`].

pub mod actions;
pub mod config;
pub mod enemy;
pub mod errors;
pub mod events;
pub mod game;
pub mod geometry;
pub mod observe;
pub mod placement;
pub mod projectile;
pub mod systems;
pub mod tower;
pub mod world;

pub use actions::TdAction;
pub use config::{EnemyKind, EnemySpec, TdConfig, TowerEffect, TowerKind, TowerSpec};
pub use enemy::Enemy;
pub use errors::Rejection;
pub use events::TdEvent;
pub use game::TdGame;
pub use projectile::Projectile;
pub use tower::Tower;
pub use world::{EnemyId, GameStatus, ProjectileId, TdState, TowerId, World};
