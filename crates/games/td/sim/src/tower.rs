use crate::config::{TdConfig, TowerEffect, TowerKind, UpgradeScaling};
use crate::enemy::Enemy;
use crate::geometry::direction;
use crate::projectile::Projectile;
use glam::Vec2;

#[derive(Clone, Debug)]
pub struct Tower {
    pub kind: TowerKind,
    pub pos: Vec2,
    pub damage: f32,
    pub range: f32,
    /// Ticks between shots.
    pub fire_rate: u32,
    /// Ticks until the tower may fire again.
    pub cooldown: u32,
    pub level: u8,
    pub max_level: u8,
    pub effect: TowerEffect,
    pub base_cost: u32,
    pub shot_speed: f32,
}

impl Tower {
    pub fn new(kind: TowerKind, pos: Vec2, config: &TdConfig) -> Self {
        let spec = config.tower_spec(kind);
        Self {
            kind,
            pos,
            damage: spec.damage,
            range: spec.range,
            fire_rate: spec.fire_rate,
            cooldown: 0,
            level: 1,
            max_level: config.max_tower_level,
            effect: spec.effect,
            base_cost: spec.cost,
            shot_speed: config.projectile_speed,
        }
    }

    /// Closest enemy strictly inside range. Ties go to the first enemy
    /// yielded, so callers must iterate in a stable order.
    pub fn acquire_target<'a, K>(
        &self,
        enemies: impl IntoIterator<Item = (K, &'a Enemy)>,
    ) -> Option<(K, &'a Enemy)> {
        let mut best: Option<(K, &'a Enemy, f32)> = None;
        for (id, enemy) in enemies {
            let dist = self.pos.distance(enemy.pos);
            if dist >= self.range {
                continue;
            }
            if best.as_ref().map_or(true, |(_, _, best_dist)| dist < *best_dist) {
                best = Some((id, enemy, dist));
            }
        }
        best.map(|(id, enemy, _)| (id, enemy))
    }

    /// Count down the cooldown and, once it reaches zero, shoot at the
    /// closest enemy in range. Returns the enemy fired at.
    pub fn tick<'a, K>(
        &mut self,
        enemies: impl IntoIterator<Item = (K, &'a Enemy)>,
        sink: &mut Vec<Projectile>,
    ) -> Option<K> {
        if self.cooldown > 0 {
            self.cooldown -= 1;
        }
        if self.cooldown > 0 {
            return None;
        }

        let (id, target) = self.acquire_target(enemies)?;
        sink.push(self.fire_at(target.pos));
        self.cooldown = self.fire_rate;
        Some(id)
    }

    fn fire_at(&self, aim: Vec2) -> Projectile {
        let dir = direction(self.pos, aim);
        Projectile::new(self.pos, dir, self.shot_speed, self.damage, self.effect)
            .with_fuse(self.pos.distance(aim))
    }

    pub fn upgrade_cost(&self) -> u32 {
        self.base_cost * self.level as u32
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= self.max_level
    }

    /// Raise the level by one, scaling damage, range and the variant
    /// parameter. Returns false at max level without changing anything.
    pub fn upgrade(&mut self, scaling: &UpgradeScaling) -> bool {
        if self.is_max_level() {
            return false;
        }

        self.level += 1;
        self.damage *= scaling.damage;
        self.range *= scaling.range;
        self.effect = match self.effect {
            TowerEffect::None => TowerEffect::None,
            TowerEffect::Slow { factor } => TowerEffect::Slow {
                factor: factor * scaling.slow_factor,
            },
            TowerEffect::Splash { radius } => TowerEffect::Splash {
                radius: radius * scaling.splash_radius,
            },
        };
        true
    }
}
