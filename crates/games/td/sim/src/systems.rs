use crate::config::{TowerEffect, TowerKind};
use crate::enemy::Enemy;
use crate::errors::Rejection;
use crate::events::TdEvent;
use crate::projectile::{splash_damage, Projectile};
use crate::tower::Tower;
use crate::world::{EnemyId, GameStatus, TdState, TowerId, World};
use glam::Vec2;
use tracing::{debug, info};

fn reject<T>(reason: Rejection, events: &mut Vec<TdEvent>) -> Result<T, Rejection> {
    debug!(%reason, "command rejected");
    events.push(TdEvent::Rejected { reason });
    Err(reason)
}

pub fn try_place_tower(
    state: &mut TdState,
    pos: Vec2,
    kind: TowerKind,
    events: &mut Vec<TdEvent>,
) -> Result<TowerId, Rejection> {
    if state.is_over() {
        return reject(Rejection::GameOver, events);
    }

    let Some(cell) = state.can_place_tower(pos) else {
        return reject(Rejection::InvalidPlacement, events);
    };

    let cost = state.config.tower_spec(kind).cost;
    if state.money < cost {
        return reject(
            Rejection::InsufficientFunds {
                cost,
                have: state.money,
            },
            events,
        );
    }

    state.money -= cost;
    let id = state.world.towers.insert(Tower::new(kind, cell, &state.config));

    info!(?id, kind = kind.name(), x = cell.x, y = cell.y, "tower placed");
    events.push(TdEvent::TowerPlaced {
        id,
        x: cell.x,
        y: cell.y,
        kind,
    });
    Ok(id)
}

pub fn try_upgrade_tower(
    state: &mut TdState,
    tower_id: TowerId,
    events: &mut Vec<TdEvent>,
) -> Result<u8, Rejection> {
    if state.is_over() {
        return reject(Rejection::GameOver, events);
    }

    let Some(tower) = state.world.towers.get_mut(tower_id) else {
        return reject(Rejection::UnknownTower, events);
    };

    if tower.is_max_level() {
        let level = tower.level;
        return reject(Rejection::MaxLevel { level }, events);
    }

    let cost = tower.upgrade_cost();
    if state.money < cost {
        let have = state.money;
        return reject(Rejection::InsufficientFunds { cost, have }, events);
    }

    state.money -= cost;
    let upgraded = tower.upgrade(&state.config.upgrade);
    debug_assert!(upgraded, "max level checked above");
    let level = tower.level;

    info!(id = ?tower_id, level, cost, "tower upgraded");
    events.push(TdEvent::TowerUpgraded {
        id: tower_id,
        level,
    });
    Ok(level)
}

/// Queue the current wave's roster. Returns the number of enemies queued.
pub fn start_wave(state: &mut TdState, events: &mut Vec<TdEvent>) -> Result<u32, Rejection> {
    if state.is_over() {
        return reject(Rejection::GameOver, events);
    }
    if state.waves.in_progress {
        return reject(Rejection::WaveInProgress, events);
    }

    let roster = state.config.wave_roster(state.wave);
    let size = roster.len() as u32;
    state.waves.queue = roster.into();
    state.waves.spawn_cooldown = 0;
    state.waves.in_progress = true;

    info!(wave = state.wave, size, "wave started");
    events.push(TdEvent::WaveStarted {
        wave: state.wave,
        size,
    });
    Ok(size)
}

/// Count down the spawn timer, spawn the next queued enemy, and close the
/// wave once the queue is drained and the field is clear.
pub fn update_wave(state: &mut TdState, events: &mut Vec<TdEvent>) {
    if state.waves.spawn_cooldown > 0 {
        state.waves.spawn_cooldown -= 1;
    }

    if !state.waves.in_progress {
        return;
    }

    if state.waves.spawn_cooldown == 0 {
        if let Some(kind) = state.waves.queue.pop_front() {
            let enemy = Enemy::new(
                kind,
                state.config.enemy_spec(kind),
                state.spawn_point(),
                state.config.enemy_radius(),
            );
            let id = state.world.insert_enemy(enemy);
            state.waves.spawn_cooldown = state.config.duration_to_ticks(state.config.spawn_interval);

            debug!(?id, kind = kind.name(), "enemy spawned");
            events.push(TdEvent::EnemySpawned { id, kind });
        }
    }

    if state.waves.queue.is_empty() && state.world.enemies.is_empty() {
        let cleared = state.wave;
        state.waves.in_progress = false;
        state.wave += 1;
        let bonus = state.config.wave_bonus(state.wave);
        state.money += bonus;

        info!(wave = cleared, bonus, money = state.money, "wave completed");
        events.push(TdEvent::WaveCompleted {
            wave: cleared,
            bonus,
        });
    }
}

pub fn tower_attacks(state: &mut TdState, events: &mut Vec<TdEvent>) {
    let enemy_ids = state.world.enemy_ids();
    let mut shots: Vec<Projectile> = Vec::new();

    for tower_id in state.world.tower_ids() {
        let World { towers, enemies, .. } = &mut state.world;
        let Some(tower) = towers.get_mut(tower_id) else {
            continue;
        };
        let enemies = &*enemies;
        let in_order = enemy_ids
            .iter()
            .filter_map(move |&id| enemies.get(id).map(|e| (id, e)));

        if let Some(target) = tower.tick(in_order, &mut shots) {
            debug!(tower = ?tower_id, ?target, "projectile fired");
            events.push(TdEvent::ProjectileFired {
                tower: tower_id,
                target,
            });
        }
    }

    for shot in shots {
        state.world.insert_projectile(shot);
    }
}

pub fn move_enemies(state: &mut TdState, events: &mut Vec<TdEvent>) {
    for id in state.world.enemy_ids() {
        let Some(enemy) = state.world.enemies.get_mut(id) else {
            continue;
        };
        enemy.advance(&state.config.path);
        if !enemy.has_leaked(&state.config.path) {
            continue;
        }

        let Some(enemy) = state.world.enemies.remove(id) else {
            continue;
        };
        state.lives -= enemy.leak_damage;
        debug!(?id, damage = enemy.leak_damage, lives = state.lives, "enemy leaked");
        events.push(TdEvent::EnemyLeaked {
            id,
            damage: enemy.leak_damage,
        });

        if state.lives <= 0 && state.status == GameStatus::Running {
            state.status = GameStatus::Over;
            info!(wave = state.wave, "game over");
            events.push(TdEvent::GameOver { wave: state.wave });
        }
    }
}

/// Move every projectile, resolve at most one direct hit each, then drop
/// the ones that left the field.
pub fn move_projectiles(state: &mut TdState, events: &mut Vec<TdEvent>) {
    let enemy_ids = state.world.enemy_ids();

    for pid in state.world.projectile_ids() {
        let Some(projectile) = state.world.projectiles.get_mut(pid) else {
            continue;
        };
        projectile.tick();

        let hit = enemy_ids.iter().copied().find(|&eid| {
            state
                .world
                .enemies
                .get(eid)
                .is_some_and(|e| projectile.hits(e.pos, e.radius))
        });

        if let Some(eid) = hit {
            if let Some(projectile) = state.world.projectiles.remove(pid) {
                apply_hit(state, &projectile, eid, events);
            }
            continue;
        }

        if projectile.fuse_expired() {
            if let Some(projectile) = state.world.projectiles.remove(pid) {
                if let TowerEffect::Splash { radius } = projectile.effect {
                    splash(state, projectile.pos, projectile.damage, radius, events);
                }
            }
            continue;
        }

        if projectile.is_out_of_bounds(state.config.width, state.config.height) {
            state.world.projectiles.remove(pid);
        }
    }
}

fn apply_hit(state: &mut TdState, projectile: &Projectile, target: EnemyId, events: &mut Vec<TdEvent>) {
    match projectile.effect {
        TowerEffect::None => {
            damage_enemy(state, target, projectile.damage, events);
        }
        TowerEffect::Slow { factor } => {
            let ticks = state.config.duration_to_ticks(state.config.slow_duration);
            if let Some(enemy) = state.world.enemies.get_mut(target) {
                enemy.apply_slow(factor, ticks);
            }
            damage_enemy(state, target, projectile.damage, events);
        }
        TowerEffect::Splash { radius } => {
            splash(state, projectile.pos, projectile.damage, radius, events);
        }
    }
}

/// Falloff damage to every enemy within `radius` of `center`.
fn splash(state: &mut TdState, center: Vec2, damage: f32, radius: f32, events: &mut Vec<TdEvent>) {
    let falloff = state.config.splash_falloff;
    for id in state.world.enemy_ids() {
        let Some(enemy) = state.world.enemies.get(id) else {
            continue;
        };
        let dist = enemy.pos.distance(center);
        if dist < radius {
            damage_enemy(state, id, splash_damage(damage, dist, radius, falloff), events);
        }
    }
}

fn damage_enemy(state: &mut TdState, id: EnemyId, amount: f32, events: &mut Vec<TdEvent>) {
    let Some(enemy) = state.world.enemies.get_mut(id) else {
        return;
    };
    enemy.take_damage(amount);
    if !enemy.is_dead() {
        return;
    }

    if let Some(enemy) = state.world.enemies.remove(id) {
        state.money += enemy.reward;
        debug!(?id, reward = enemy.reward, "enemy killed");
        events.push(TdEvent::EnemyKilled {
            id,
            reward: enemy.reward,
        });
    }
}
