use crate::config::TowerEffect;
use crate::world::{GameStatus, TdState, TowerId};
use glam::Vec2;
use sim_core::Tick;
use slotmap::Key;
use td_types::{
    EnemyInfo, Position, ProjectileInfo, SessionStatus, TdObservation, TowerInfo, WaveStatus,
};

pub fn tower_id_to_string(id: TowerId) -> String {
    id.data().as_ffi().to_string()
}

pub fn string_to_tower_id(s: &str) -> Result<TowerId, String> {
    let ffi: u64 = s.parse().map_err(|_| format!("Invalid tower_id: {}", s))?;
    let key_data = slotmap::KeyData::from_ffi(ffi);
    Ok(TowerId::from(key_data))
}

fn position(p: Vec2) -> Position {
    Position { x: p.x, y: p.y }
}

fn effect_name(effect: TowerEffect) -> &'static str {
    match effect {
        TowerEffect::None => "none",
        TowerEffect::Slow { .. } => "slow",
        TowerEffect::Splash { .. } => "splash",
    }
}

pub fn build_observation(state: &TdState, tick: Tick) -> TdObservation {
    let config = &state.config;
    let world = &state.world;

    let wave_status = if state.waves.in_progress {
        WaveStatus::InProgress {
            pending_spawns: state.waves.queue.len() as u32,
            spawn_cooldown: state.waves.spawn_cooldown,
        }
    } else {
        WaveStatus::Idle {
            next_wave_size: config.wave_roster(state.wave).len() as u32,
        }
    };

    let status = match state.status {
        GameStatus::Running => SessionStatus::Running,
        GameStatus::Over => SessionStatus::Over,
    };

    TdObservation {
        tick,
        ticks_per_second: config.tick_hz,

        map_width: config.width,
        map_height: config.height,
        grid_size: config.grid_size,
        path: config.path.iter().copied().map(position).collect(),

        money: state.money,
        lives: state.lives,
        wave: state.wave,
        wave_status,
        status,

        towers: world
            .tower_ids()
            .into_iter()
            .filter_map(|id| world.towers.get(id).map(|t| (id, t)))
            .map(|(id, t)| TowerInfo {
                id: tower_id_to_string(id),
                position: position(t.pos),
                tower_type: t.kind.name().to_string(),
                level: t.level,
                damage: t.damage,
                range: t.range,
                upgrade_cost: (!t.is_max_level()).then(|| t.upgrade_cost()),
                cooldown: t.cooldown,
            })
            .collect(),
        enemies: world
            .enemy_ids()
            .into_iter()
            .filter_map(|id| world.enemies.get(id))
            .map(|e| EnemyInfo {
                position: position(e.pos),
                enemy_type: e.kind.name().to_string(),
                health: e.health,
                max_health: e.max_health,
                radius: e.radius,
                slowed: e.is_slowed(),
            })
            .collect(),
        projectiles: world
            .projectile_ids()
            .into_iter()
            .filter_map(|id| world.projectiles.get(id))
            .map(|p| ProjectileInfo {
                position: position(p.pos),
                effect: effect_name(p.effect).to_string(),
                radius: p.radius(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TdConfig, TowerKind};

    #[test]
    fn tower_ids_survive_string_round_trip() {
        let mut state = TdState::new(TdConfig::default());
        let id = state
            .request_place_tower(Vec2::new(100.0, 100.0), TowerKind::Basic, &mut Vec::new())
            .unwrap();
        let parsed = string_to_tower_id(&tower_id_to_string(id)).unwrap();
        assert_eq!(parsed, id);
        assert!(string_to_tower_id("not-a-number").is_err());
    }

    #[test]
    fn fresh_session_snapshot() {
        let state = TdState::new(TdConfig::default());
        let obs = build_observation(&state, 0);

        assert_eq!(obs.money, 300);
        assert_eq!(obs.lives, 20);
        assert_eq!(obs.wave, 1);
        assert_eq!(obs.status, SessionStatus::Running);
        assert_eq!(obs.path.len(), 8);
        assert!(!obs.wave_in_progress());
        match obs.wave_status {
            WaveStatus::Idle { next_wave_size } => assert_eq!(next_wave_size, 6),
            other => panic!("unexpected wave status {other:?}"),
        }
    }

    #[test]
    fn snapshot_lists_entities() {
        let mut state = TdState::new(TdConfig::default());
        let mut events = Vec::new();
        state
            .request_place_tower(Vec2::new(100.0, 260.0), TowerKind::Basic, &mut events)
            .unwrap();
        state.start_wave(&mut events).unwrap();
        for _ in 0..10 {
            state.tick(&mut events);
        }

        let obs = build_observation(&state, state.tick);
        assert_eq!(obs.towers.len(), 1);
        assert_eq!(obs.towers[0].tower_type, "basic");
        assert_eq!(obs.towers[0].upgrade_cost, Some(100));
        assert_eq!(obs.enemies.len(), 1);
        assert_eq!(obs.enemies[0].max_health, 30.0);
        assert!(obs.wave_in_progress());
        assert!(!obs.projectiles.is_empty());
        assert!(obs.projectiles.iter().all(|p| p.effect == "none" && p.radius == 3.0));
    }
}
