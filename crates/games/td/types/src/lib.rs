//! Serializable read-only snapshot of a tower-defense session.
//!
//! Built once per frame by `sim_td` and consumed by renderers, agents and
//! the headless runner's JSON dump.

use serde::{Deserialize, Serialize};

/// Point on the playfield, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Whether the session still accepts input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(tag = "type")]
pub enum SessionStatus {
    #[default]
    Running,
    /// Lives ran out. Only a restart leaves this state.
    Over,
}

/// Current wave status.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(tag = "type")]
pub enum WaveStatus {
    /// Waiting for the player to start the next wave.
    Idle {
        /// Number of enemies the next wave will contain.
        next_wave_size: u32,
    },
    /// Enemies are spawning or still alive.
    InProgress {
        /// Enemies still queued to spawn.
        pending_spawns: u32,
        /// Ticks until the next spawn is allowed.
        spawn_cooldown: u32,
    },
}

impl Default for WaveStatus {
    fn default() -> Self {
        Self::Idle { next_wave_size: 0 }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct TowerInfo {
    pub id: String,
    pub position: Position,
    pub tower_type: String,
    pub level: u8,
    pub damage: f32,
    pub range: f32,
    /// Cost of the next upgrade, absent at max level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_cost: Option<u32>,
    pub cooldown: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct EnemyInfo {
    pub position: Position,
    pub enemy_type: String,
    pub health: f32,
    pub max_health: f32,
    pub radius: f32,
    pub slowed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ProjectileInfo {
    pub position: Position,
    /// `none`, `slow` or `splash`.
    pub effect: String,
    pub radius: f32,
}

/// Full session observation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct TdObservation {
    pub tick: u64,
    pub ticks_per_second: u32,

    pub map_width: f32,
    pub map_height: f32,
    pub grid_size: f32,
    pub path: Vec<Position>,

    pub money: u32,
    pub lives: i32,
    pub wave: u32,
    pub wave_status: WaveStatus,
    pub status: SessionStatus,

    pub towers: Vec<TowerInfo>,
    pub enemies: Vec<EnemyInfo>,
    pub projectiles: Vec<ProjectileInfo>,
}

impl TdObservation {
    pub fn wave_in_progress(&self) -> bool {
        matches!(self.wave_status, WaveStatus::InProgress { .. })
    }
}
