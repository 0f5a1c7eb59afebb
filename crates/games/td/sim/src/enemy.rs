use crate::config::{EnemyKind, EnemySpec};
use glam::Vec2;

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    /// Index of the waypoint being walked towards. Always in `1..=path.len()`;
    /// `path.len()` means the enemy has leaked.
    pub waypoint: usize,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub speed_multiplier: f32,
    pub slow_ticks: u32,
    pub reward: u32,
    pub leak_damage: i32,
    pub radius: f32,
    /// Spawn order, used to iterate enemies oldest first.
    pub seq: u64,
}

impl Enemy {
    pub fn new(kind: EnemyKind, spec: &EnemySpec, spawn: Vec2, radius: f32) -> Self {
        Self {
            kind,
            pos: spawn,
            waypoint: 1,
            health: spec.health,
            max_health: spec.health,
            speed: spec.speed,
            speed_multiplier: 1.0,
            slow_ticks: 0,
            reward: spec.reward,
            leak_damage: spec.leak_damage,
            radius,
            seq: 0,
        }
    }

    pub fn effective_speed(&self) -> f32 {
        self.speed * self.speed_multiplier
    }

    /// Walk one tick along `path`.
    pub fn advance(&mut self, path: &[Vec2]) {
        if let Some(&target) = path.get(self.waypoint) {
            let step = self.effective_speed();
            let to_target = target - self.pos;
            let dist = to_target.length();

            if dist < step {
                self.pos = target;
                self.waypoint += 1;
            } else {
                self.pos += to_target.normalize_or_zero() * step;
            }
        }

        if self.slow_ticks > 0 {
            self.slow_ticks -= 1;
            if self.slow_ticks == 0 {
                self.speed_multiplier = 1.0;
            }
        }
    }

    pub fn has_leaked(&self, path: &[Vec2]) -> bool {
        self.waypoint >= path.len()
    }

    /// Overwrites any slow already in effect; slows never stack.
    pub fn apply_slow(&mut self, factor: f32, ticks: u32) {
        self.speed_multiplier = factor;
        self.slow_ticks = ticks;
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health -= amount.max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn is_slowed(&self) -> bool {
        self.slow_ticks > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TdConfig;

    fn straight_path() -> Vec<Vec2> {
        vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)]
    }

    fn basic(path: &[Vec2]) -> Enemy {
        let config = TdConfig::default();
        Enemy::new(EnemyKind::Basic, &config.basic_enemy, path[0], 13.0)
    }

    #[test]
    fn moves_by_speed_towards_waypoint() {
        let path = straight_path();
        let mut enemy = basic(&path);
        enemy.advance(&path);
        assert_eq!(enemy.pos, Vec2::new(1.5, 0.0));
        assert_eq!(enemy.waypoint, 1);
    }

    #[test]
    fn snaps_when_within_one_step() {
        let path = straight_path();
        let mut enemy = basic(&path);
        enemy.pos = Vec2::new(9.0, 0.0);
        enemy.advance(&path);
        assert_eq!(enemy.pos, Vec2::new(10.0, 0.0));
        assert_eq!(enemy.waypoint, 2);
    }

    #[test]
    fn landing_exactly_on_waypoint_snaps_next_tick() {
        let config = TdConfig::default();
        let path = vec![Vec2::ZERO, Vec2::new(6.0, 0.0), Vec2::new(100.0, 0.0)];
        let mut enemy = Enemy::new(EnemyKind::Fast, &config.fast_enemy, path[0], 13.0);

        enemy.advance(&path);
        enemy.advance(&path);
        assert_eq!(enemy.pos, Vec2::new(6.0, 0.0));
        assert_eq!(enemy.waypoint, 1);

        enemy.advance(&path);
        assert_eq!(enemy.pos, Vec2::new(6.0, 0.0));
        assert_eq!(enemy.waypoint, 2);

        enemy.advance(&path);
        assert_eq!(enemy.pos, Vec2::new(9.0, 0.0));
    }

    #[test]
    fn stalled_enemy_on_waypoint_stays_put() {
        let path = straight_path();
        let mut enemy = basic(&path);
        enemy.speed = 0.0;
        enemy.pos = path[1];
        enemy.advance(&path);
        assert_eq!(enemy.pos, path[1]);
        assert_eq!(enemy.waypoint, 1);
        assert!(!enemy.pos.is_nan());
    }

    #[test]
    fn waypoint_index_is_monotonic_and_bounded() {
        let path = straight_path();
        let mut enemy = basic(&path);
        let mut last = enemy.waypoint;
        for _ in 0..100 {
            enemy.advance(&path);
            assert!(enemy.waypoint >= last);
            assert!(enemy.waypoint <= path.len());
            last = enemy.waypoint;
        }
        assert!(enemy.has_leaked(&path));
        assert_eq!(enemy.pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn slow_expires_after_duration() {
        let path = vec![Vec2::ZERO, Vec2::new(1000.0, 0.0)];
        let mut enemy = basic(&path);
        enemy.apply_slow(0.5, 3);

        enemy.advance(&path);
        assert!((enemy.pos.x - 0.75).abs() < 1e-5);
        enemy.advance(&path);
        enemy.advance(&path);
        assert!(!enemy.is_slowed());
        assert_eq!(enemy.speed_multiplier, 1.0);

        let before = enemy.pos.x;
        enemy.advance(&path);
        assert!((enemy.pos.x - before - 1.5).abs() < 1e-5);
    }

    #[test]
    fn reapplied_slow_overwrites() {
        let path = straight_path();
        let mut enemy = basic(&path);
        enemy.apply_slow(0.5, 180);
        enemy.apply_slow(0.4, 180);
        assert_eq!(enemy.speed_multiplier, 0.4);
        assert_eq!(enemy.slow_ticks, 180);
        assert!((enemy.effective_speed() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn dies_at_zero_health() {
        let path = straight_path();
        let mut enemy = basic(&path);
        enemy.take_damage(20.0);
        assert!(!enemy.is_dead());
        enemy.take_damage(10.0);
        assert!(enemy.is_dead());
    }
}
