use crate::config::{EnemyKind, TdConfig, TowerKind};
use crate::enemy::Enemy;
use crate::errors::Rejection;
use crate::events::TdEvent;
use crate::placement::Placement;
use crate::projectile::Projectile;
use crate::systems;
use crate::tower::Tower;
use glam::Vec2;
use sim_core::Tick;
use slotmap::{new_key_type, SlotMap};
use std::collections::VecDeque;

new_key_type! { pub struct TowerId; }
new_key_type! { pub struct EnemyId; }
new_key_type! { pub struct ProjectileId; }

/// Entity arenas. Slot maps reuse freed slots, so iteration order is not
/// creation order; passes that need a stable order go through the
/// `*_ids` snapshots, which sort by creation sequence.
#[derive(Clone, Debug, Default)]
pub struct World {
    pub towers: SlotMap<TowerId, Tower>,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub projectiles: SlotMap<ProjectileId, Projectile>,
    next_seq: u64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Towers are never removed during a session, so slot order is
    /// placement order.
    pub fn tower_ids(&self) -> Vec<TowerId> {
        self.towers.keys().collect()
    }

    pub fn enemy_ids(&self) -> Vec<EnemyId> {
        let mut ids: Vec<(u64, EnemyId)> =
            self.enemies.iter().map(|(id, e)| (e.seq, id)).collect();
        ids.sort_unstable_by_key(|(seq, _)| *seq);
        ids.into_iter().map(|(_, id)| id).collect()
    }

    pub fn projectile_ids(&self) -> Vec<ProjectileId> {
        let mut ids: Vec<(u64, ProjectileId)> =
            self.projectiles.iter().map(|(id, p)| (p.seq, id)).collect();
        ids.sort_unstable_by_key(|(seq, _)| *seq);
        ids.into_iter().map(|(_, id)| id).collect()
    }

    pub fn insert_enemy(&mut self, mut enemy: Enemy) -> EnemyId {
        enemy.seq = self.bump_seq();
        self.enemies.insert(enemy)
    }

    pub fn insert_projectile(&mut self, mut projectile: Projectile) -> ProjectileId {
        projectile.seq = self.bump_seq();
        self.projectiles.insert(projectile)
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Lives ran out. Terminal until an explicit reset.
    Over,
}

#[derive(Clone, Debug, Default)]
pub struct WaveState {
    pub in_progress: bool,
    /// Enemies still to spawn this wave, front first.
    pub queue: VecDeque<EnemyKind>,
    pub spawn_cooldown: u32,
}

/// The whole session: entities, economy and wave sequencing.
#[derive(Clone, Debug)]
pub struct TdState {
    pub config: TdConfig,
    pub tick: Tick,
    pub world: World,
    pub money: u32,
    pub lives: i32,
    /// Number of the next wave to start, or of the one in progress.
    pub wave: u32,
    pub waves: WaveState,
    pub status: GameStatus,
}

impl TdState {
    pub fn new(config: TdConfig) -> Self {
        Self {
            tick: 0,
            world: World::new(),
            money: config.money_start,
            lives: config.lives_start,
            wave: 1,
            waves: WaveState::default(),
            status: GameStatus::Running,
            config,
        }
    }

    /// Replace everything with a fresh session built from the same config.
    pub fn reset(&mut self) {
        *self = TdState::new(self.config.clone());
        tracing::info!("session reset");
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    /// Advance one fixed step. Does nothing once the game is over.
    pub fn tick(&mut self, events: &mut Vec<TdEvent>) {
        if self.is_over() {
            return;
        }
        self.tick += 1;

        systems::update_wave(self, events);
        systems::tower_attacks(self, events);
        systems::move_enemies(self, events);
        systems::move_projectiles(self, events);
    }

    pub fn start_wave(&mut self, events: &mut Vec<TdEvent>) -> Result<u32, Rejection> {
        systems::start_wave(self, events)
    }

    pub fn request_place_tower(
        &mut self,
        pos: Vec2,
        kind: TowerKind,
        events: &mut Vec<TdEvent>,
    ) -> Result<TowerId, Rejection> {
        systems::try_place_tower(self, pos, kind, events)
    }

    pub fn request_upgrade(
        &mut self,
        tower_id: TowerId,
        events: &mut Vec<TdEvent>,
    ) -> Result<u8, Rejection> {
        systems::try_upgrade_tower(self, tower_id, events)
    }

    pub fn placement(&self) -> Placement<'_> {
        Placement {
            grid_size: self.config.grid_size,
            width: self.config.width,
            height: self.config.height,
            path: &self.config.path,
        }
    }

    /// Where a tower would land for the cursor at `pos`, if it may go there.
    pub fn can_place_tower(&self, pos: Vec2) -> Option<Vec2> {
        self.placement()
            .validate(pos, self.world.towers.values().map(|t| t.pos))
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.config.path.first().copied().unwrap_or(Vec2::ZERO)
    }
}
