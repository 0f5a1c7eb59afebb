use crate::config::TowerEffect;
use glam::Vec2;

/// Straight-line mover fired by a tower.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub pos: Vec2,
    /// Unit vector, or zero when fired at a target on top of the tower.
    pub dir: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub effect: TowerEffect,
    /// Distance left before a splash round bursts at its aim point.
    pub fuse: Option<f32>,
    pub seq: u64,
}

impl Projectile {
    pub fn new(pos: Vec2, dir: Vec2, speed: f32, damage: f32, effect: TowerEffect) -> Self {
        Self {
            pos,
            dir,
            speed,
            damage,
            effect,
            fuse: None,
            seq: 0,
        }
    }

    /// Arm a splash round to burst after travelling `distance`.
    pub fn with_fuse(mut self, distance: f32) -> Self {
        if matches!(self.effect, TowerEffect::Splash { .. }) {
            self.fuse = Some(distance);
        }
        self
    }

    pub fn radius(&self) -> f32 {
        match self.effect {
            TowerEffect::None => 3.0,
            TowerEffect::Slow { .. } => 4.0,
            TowerEffect::Splash { .. } => 5.0,
        }
    }

    pub fn tick(&mut self) {
        self.pos += self.dir * self.speed;
        if let Some(fuse) = self.fuse.as_mut() {
            *fuse -= self.speed;
        }
    }

    pub fn fuse_expired(&self) -> bool {
        self.fuse.is_some_and(|f| f <= 0.0)
    }

    pub fn hits(&self, center: Vec2, radius: f32) -> bool {
        self.pos.distance(center) < radius + self.radius()
    }

    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.pos.x < 0.0 || self.pos.x > width || self.pos.y < 0.0 || self.pos.y > height
    }
}

/// Area damage at `dist` from the impact: full at the center, halved at the
/// rim for the default falloff, never negative.
pub fn splash_damage(damage: f32, dist: f32, radius: f32, falloff: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    (damage * (1.0 - falloff * dist / radius)).max(0.0)
}
