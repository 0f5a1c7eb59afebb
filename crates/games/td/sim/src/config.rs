use glam::Vec2;
use sim_core::Micros;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TowerKind {
    Basic,
    Sniper,
    Rapid,
    Slow,
    Splash,
}

impl TowerKind {
    pub fn name(self) -> &'static str {
        match self {
            TowerKind::Basic => "basic",
            TowerKind::Sniper => "sniper",
            TowerKind::Rapid => "rapid",
            TowerKind::Slow => "slow",
            TowerKind::Splash => "splash",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
}

impl EnemyKind {
    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Fast => "fast",
            EnemyKind::Tank => "tank",
        }
    }
}

/// Variant-specific parameter carried by a tower and its projectiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TowerEffect {
    None,
    /// Speed multiplier applied to struck enemies (lower is slower).
    Slow { factor: f32 },
    /// Area damage around the impact point.
    Splash { radius: f32 },
}

#[derive(Clone, Debug)]
pub struct TowerSpec {
    pub cost: u32,
    pub damage: f32,
    pub range: f32,
    /// Ticks between shots.
    pub fire_rate: u32,
    pub effect: TowerEffect,
}

#[derive(Clone, Debug)]
pub struct EnemySpec {
    pub health: f32,
    /// Pixels per tick.
    pub speed: f32,
    pub reward: u32,
    /// Lives lost when this enemy leaks.
    pub leak_damage: i32,
}

/// Per-level multipliers applied by a tower upgrade.
#[derive(Clone, Debug)]
pub struct UpgradeScaling {
    pub damage: f32,
    pub range: f32,
    pub slow_factor: f32,
    pub splash_radius: f32,
}

#[derive(Clone, Debug)]
pub struct TdConfig {
    pub width: f32,
    pub height: f32,
    pub grid_size: f32,
    pub tick_hz: u32,
    /// Spawn point first, leak point last.
    pub path: Vec<Vec2>,

    // Economy
    pub money_start: u32,
    pub lives_start: i32,
    pub wave_bonus_base: u32,
    pub wave_bonus_growth: u32,

    // Pacing
    pub spawn_interval: Micros,
    pub slow_duration: Micros,

    // Combat
    pub projectile_speed: f32,
    pub splash_falloff: f32,
    pub max_tower_level: u8,
    pub upgrade: UpgradeScaling,

    pub basic_tower: TowerSpec,
    pub sniper_tower: TowerSpec,
    pub rapid_tower: TowerSpec,
    pub slow_tower: TowerSpec,
    pub splash_tower: TowerSpec,

    pub basic_enemy: EnemySpec,
    pub fast_enemy: EnemySpec,
    pub tank_enemy: EnemySpec,
}

impl TdConfig {
    pub fn tower_spec(&self, kind: TowerKind) -> &TowerSpec {
        match kind {
            TowerKind::Basic => &self.basic_tower,
            TowerKind::Sniper => &self.sniper_tower,
            TowerKind::Rapid => &self.rapid_tower,
            TowerKind::Slow => &self.slow_tower,
            TowerKind::Splash => &self.splash_tower,
        }
    }

    pub fn enemy_spec(&self, kind: EnemyKind) -> &EnemySpec {
        match kind {
            EnemyKind::Basic => &self.basic_enemy,
            EnemyKind::Fast => &self.fast_enemy,
            EnemyKind::Tank => &self.tank_enemy,
        }
    }

    pub fn duration_to_ticks(&self, d: Micros) -> u32 {
        d.to_ticks(self.tick_hz).min(u32::MAX as u64) as u32
    }

    /// Enemies are drawn and hit-tested as circles a third of a cell wide.
    pub fn enemy_radius(&self) -> f32 {
        (self.grid_size / 3.0).floor()
    }

    /// Money credited when wave `new_wave - 1` is cleared.
    pub fn wave_bonus(&self, new_wave: u32) -> u32 {
        self.wave_bonus_base + self.wave_bonus_growth * new_wave
    }

    /// Enemy roster for `wave`: basics first, then fast, then tanks.
    pub fn wave_roster(&self, wave: u32) -> Vec<EnemyKind> {
        let basic = 5 + wave as usize;
        let fast = wave.saturating_sub(2) as usize;
        let tank = wave.saturating_sub(4) as usize;

        let mut roster = Vec::with_capacity(basic + fast + tank);
        roster.extend(std::iter::repeat(EnemyKind::Basic).take(basic));
        roster.extend(std::iter::repeat(EnemyKind::Fast).take(fast));
        roster.extend(std::iter::repeat(EnemyKind::Tank).take(tank));
        roster
    }

    pub fn in_bounds(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

impl Default for TdConfig {
    fn default() -> Self {
        let (w, h) = (800.0, 600.0);
        Self {
            width: w,
            height: h,
            grid_size: 40.0,
            tick_hz: 60,
            path: vec![
                Vec2::new(0.0, h / 2.0),
                Vec2::new(w / 4.0, h / 2.0),
                Vec2::new(w / 4.0, h / 4.0),
                Vec2::new(w / 2.0, h / 4.0),
                Vec2::new(w / 2.0, 3.0 * h / 4.0),
                Vec2::new(3.0 * w / 4.0, 3.0 * h / 4.0),
                Vec2::new(3.0 * w / 4.0, h / 2.0),
                Vec2::new(w, h / 2.0),
            ],

            money_start: 300,
            lives_start: 20,
            wave_bonus_base: 100,
            wave_bonus_growth: 10,

            spawn_interval: Micros::from_secs(1),
            slow_duration: Micros::from_secs(3),

            projectile_speed: 5.0,
            splash_falloff: 0.5,
            max_tower_level: 3,
            upgrade: UpgradeScaling {
                damage: 1.5,
                range: 1.2,
                slow_factor: 0.8,
                splash_radius: 1.3,
            },

            basic_tower: TowerSpec {
                cost: 100,
                damage: 10.0,
                range: 150.0,
                fire_rate: 60,
                effect: TowerEffect::None,
            },
            sniper_tower: TowerSpec {
                cost: 150,
                damage: 30.0,
                range: 250.0,
                fire_rate: 120,
                effect: TowerEffect::None,
            },
            rapid_tower: TowerSpec {
                cost: 200,
                damage: 5.0,
                range: 120.0,
                fire_rate: 20,
                effect: TowerEffect::None,
            },
            slow_tower: TowerSpec {
                cost: 175,
                damage: 5.0,
                range: 130.0,
                fire_rate: 45,
                effect: TowerEffect::Slow { factor: 0.5 },
            },
            splash_tower: TowerSpec {
                cost: 225,
                damage: 15.0,
                range: 140.0,
                fire_rate: 80,
                effect: TowerEffect::Splash { radius: 50.0 },
            },

            basic_enemy: EnemySpec {
                health: 30.0,
                speed: 1.5,
                reward: 10,
                leak_damage: 1,
            },
            fast_enemy: EnemySpec {
                health: 15.0,
                speed: 3.0,
                reward: 15,
                leak_damage: 1,
            },
            tank_enemy: EnemySpec {
                health: 100.0,
                speed: 0.8,
                reward: 25,
                leak_damage: 3,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_roster_sizes() {
        let config = TdConfig::default();
        for wave in 1..=12u32 {
            let expected = (5 + wave) + wave.saturating_sub(2) + wave.saturating_sub(4);
            assert_eq!(config.wave_roster(wave).len() as u32, expected, "wave {wave}");
        }
    }

    #[test]
    fn first_wave_is_six_basics() {
        let roster = TdConfig::default().wave_roster(1);
        assert_eq!(roster, vec![EnemyKind::Basic; 6]);
    }

    #[test]
    fn later_waves_append_fast_then_tank() {
        let roster = TdConfig::default().wave_roster(6);
        assert_eq!(roster.len(), 11 + 4 + 2);
        assert!(roster[..11].iter().all(|k| *k == EnemyKind::Basic));
        assert!(roster[11..15].iter().all(|k| *k == EnemyKind::Fast));
        assert!(roster[15..].iter().all(|k| *k == EnemyKind::Tank));
    }

    #[test]
    fn durations_follow_tick_rate() {
        let config = TdConfig::default();
        assert_eq!(config.duration_to_ticks(config.spawn_interval), 60);
        assert_eq!(config.duration_to_ticks(config.slow_duration), 180);
    }

    #[test]
    fn enemy_radius_uses_whole_pixels() {
        assert_eq!(TdConfig::default().enemy_radius(), 13.0);
    }
}
