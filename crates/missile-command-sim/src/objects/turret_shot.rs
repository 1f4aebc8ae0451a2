//! Interceptor fired by a turret.

use missile_command_core::constants::TURRET_SHOT_ARRIVAL_TOLERANCE;
use missile_command_core::enums::ObjectType;
use missile_command_core::types::Position;

use super::{Body, Frame, GameObject, Signal};
use crate::sprite::SpriteUpdate;

pub struct TurretShot {
    pub body: Body,
    target: Position,
    detonated: bool,
}

impl TurretShot {
    pub fn new(body: Body, target: Position) -> Self {
        Self {
            body,
            target,
            detonated: false,
        }
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn is_friend(other: ObjectType) -> bool {
        matches!(
            other,
            ObjectType::TurretShot
                | ObjectType::City
                | ObjectType::Turret
                | ObjectType::Cursor
                | ObjectType::AirBurst
        )
    }

    /// Arrival only looks at altitude: the shot is done once it climbs to
    /// within the tolerance of the target's altitude.
    pub fn has_exceeded_target(&self, frame: &Frame<'_>) -> bool {
        let y = self.body.center().y;
        y >= frame.params.ground_level && y >= self.target.y - TURRET_SHOT_ARRIVAL_TOLERANCE
    }

    /// Stop on contact with a hostile object; the air burst follows on the
    /// next update.
    pub fn interact(&mut self, other: &mut GameObject, signals: &mut Vec<Signal>) {
        if !self.body.is_alive() || Self::is_friend(other.kind()) {
            return;
        }
        if self.body.hull_distance(other.body()) <= 0.0 && self.body.destroy().died {
            signals.push(Signal::Collision {
                first: self.body.id(),
                second: other.id(),
            });
        }
    }

    pub fn update(&mut self, frame: &Frame<'_>, signals: &mut Vec<Signal>) {
        if self.has_exceeded_target(frame) || !self.body.is_alive() {
            self.detonate(signals);
        } else {
            self.body.particle.advance();
            let update = SpriteUpdate::alive(self.body.center());
            self.body.push_sprite(update);
        }
    }

    fn detonate(&mut self, signals: &mut Vec<Signal>) {
        if self.detonated {
            return;
        }
        self.detonated = true;
        self.body.destroy();
        signals.push(Signal::ShotArrived {
            at: self.body.particle,
        });
        self.body.kill_sprite();
    }
}
