//! Expanding blasts: hostile explosions and friendly air bursts.
//!
//! Both grow and shrink along `max_radius * sin(t * π / duration)` and
//! damage anything hostile their hull touches. They differ only in
//! their friend tables and tuning.

use std::f64::consts::PI;

use missile_command_core::enums::ObjectType;

use super::{Body, Frame, GameObject};
use crate::sprite::SpriteUpdate;

pub struct Explosion {
    pub body: Body,
    max_radius: f64,
    duration_ms: u64,
    elapsed_ms: u64,
    damage: i32,
    intensity: u32,
}

impl Explosion {
    /// `body.kind()` selects the friend table (`Explosion` or `AirBurst`).
    pub fn new(body: Body, max_radius: f64, duration_ms: u64, damage: i32, intensity: u32) -> Self {
        Self {
            body,
            max_radius,
            duration_ms,
            elapsed_ms: 0,
            damage,
            intensity,
        }
    }

    pub fn intensity(&self) -> u32 {
        self.intensity
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Size in `[0, 1]` after `elapsed_ms`.
    pub fn scalar_at(&self, elapsed_ms: u64) -> f64 {
        if elapsed_ms >= self.duration_ms || self.duration_ms == 0 {
            return 0.0;
        }
        (elapsed_ms as f64 * PI / self.duration_ms as f64).sin()
    }

    pub fn is_friend(&self, other: ObjectType) -> bool {
        match self.body.kind() {
            ObjectType::AirBurst => matches!(
                other,
                ObjectType::AirBurst
                    | ObjectType::City
                    | ObjectType::Cursor
                    | ObjectType::Turret
                    | ObjectType::TurretShot
            ),
            own => {
                other == own
                    || matches!(
                        other,
                        ObjectType::Bomber | ObjectType::Cursor | ObjectType::Missile
                    )
            }
        }
    }

    pub fn interact(&mut self, other: &mut GameObject) {
        if !self.body.is_alive() || self.body.hull_radius <= 0.0 {
            return;
        }
        if self.is_friend(other.kind()) || self.body.hull_distance(other.body()) > 0.0 {
            return;
        }
        let target = other.body_mut();
        if target.apply_damage(self.damage).died {
            target.kill_sprite();
        }
    }

    pub fn update(&mut self, frame: &Frame<'_>) {
        self.elapsed_ms += frame.tick_ms;
        let scalar = self.scalar_at(self.elapsed_ms);
        if self.elapsed_ms >= self.duration_ms {
            self.body.hull_radius = 0.0;
            self.body.destroy();
            self.body.kill_sprite();
            return;
        }
        self.body.hull_radius = scalar * self.max_radius;
        let mut update = SpriteUpdate::alive(self.body.center());
        update.size_scalar = scalar;
        self.body.push_sprite(update);
    }
}
