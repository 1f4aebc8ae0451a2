//! Ballistic missiles and MIRVs.

use missile_command_core::enums::ObjectType;

use super::{Body, Frame, GameObject, Signal};
use crate::sprite::SpriteUpdate;

pub struct Missile {
    pub body: Body,
    detonated: bool,
}

impl Missile {
    pub fn new(body: Body) -> Self {
        Self {
            body,
            detonated: false,
        }
    }

    pub fn is_friend(other: ObjectType) -> bool {
        matches!(
            other,
            ObjectType::Missile | ObjectType::Bomber | ObjectType::Explosion | ObjectType::Cursor
        )
    }

    pub fn has_detonated(&self) -> bool {
        self.detonated
    }

    /// Detonate on contact with anything hostile that is not a projectile
    /// or an air burst.
    pub fn interact(&mut self, other: &mut GameObject, signals: &mut Vec<Signal>) {
        if !self.body.is_alive() || Self::is_friend(other.kind()) {
            return;
        }
        if matches!(other.kind(), ObjectType::TurretShot | ObjectType::AirBurst) {
            return;
        }
        if self.body.hull_distance(other.body()) <= 0.0 {
            self.explode(signals);
            signals.push(Signal::Collision {
                first: self.body.id(),
                second: other.id(),
            });
        }
    }

    pub fn update(&mut self, frame: &Frame<'_>, signals: &mut Vec<Signal>) {
        if self.body.center().y <= frame.params.ground_level {
            self.explode(signals);
        } else if self.body.is_alive() {
            self.body.particle.advance();
            let update = SpriteUpdate::alive(self.body.center());
            self.body.push_sprite(update);
        } else {
            self.body.kill_sprite();
        }
    }

    fn explode(&mut self, signals: &mut Vec<Signal>) {
        if self.detonated {
            return;
        }
        self.detonated = true;
        self.body.destroy();
        signals.push(Signal::MissileDetonated {
            at: self.body.particle,
        });
        self.body.kill_sprite();
    }
}

/// A missile that splits in two once it descends past its deploy altitude.
pub struct Mirv {
    pub missile: Missile,
    deploy_altitude: f64,
    armed: bool,
}

impl Mirv {
    pub fn new(body: Body, deploy_altitude: f64) -> Self {
        Self {
            missile: Missile::new(body),
            deploy_altitude,
            armed: true,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn update(&mut self, frame: &Frame<'_>, signals: &mut Vec<Signal>) {
        self.missile.update(frame, signals);

        let body = &self.missile.body;
        if self.armed && body.is_alive() && body.center().y <= self.deploy_altitude {
            self.armed = false;
            signals.push(Signal::MirvDeployed {
                from: body.particle,
            });
        }
    }
}
