use crate::config::{EnemyKind, TowerKind};
use crate::errors::Rejection;
use crate::world::{EnemyId, TowerId};

#[derive(Clone, Debug, PartialEq)]
pub enum TdEvent {
    TowerPlaced {
        id: TowerId,
        x: f32,
        y: f32,
        kind: TowerKind,
    },
    TowerUpgraded {
        id: TowerId,
        level: u8,
    },
    WaveStarted {
        wave: u32,
        size: u32,
    },
    WaveCompleted {
        wave: u32,
        bonus: u32,
    },
    EnemySpawned {
        id: EnemyId,
        kind: EnemyKind,
    },
    EnemyKilled {
        id: EnemyId,
        reward: u32,
    },
    EnemyLeaked {
        id: EnemyId,
        damage: i32,
    },
    ProjectileFired {
        tower: TowerId,
        target: EnemyId,
    },
    GameOver {
        wave: u32,
    },
    Rejected {
        reason: Rejection,
    },
}
