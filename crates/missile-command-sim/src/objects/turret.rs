//! Ground turrets.

use std::fmt;

use missile_command_core::enums::ObjectType;
use missile_command_core::types::Position;

use super::{Body, Signal};
use crate::sprite::SpriteUpdate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotError {
    OutOfAmmo,
    Destroyed,
}

impl fmt::Display for ShotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotError::OutOfAmmo => write!(f, "turret is out of ammo"),
            ShotError::Destroyed => write!(f, "turret is destroyed"),
        }
    }
}

impl std::error::Error for ShotError {}

pub struct Turret {
    pub body: Body,
    ammo: u32,
}

impl Turret {
    pub fn new(body: Body, ammo: u32) -> Self {
        Self { body, ammo }
    }

    pub fn is_friend(other: ObjectType) -> bool {
        other != ObjectType::Turret && other != ObjectType::TurretShot
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    /// Alive with at least one round.
    pub fn is_armed(&self) -> bool {
        self.body.is_alive() && self.ammo > 0
    }

    /// Fire one round at `target` from the top of the turret. A refused
    /// shot emits nothing and is logged here as an error.
    pub fn shoot(&mut self, target: Position, signals: &mut Vec<Signal>) -> Result<(), ShotError> {
        let refused = if !self.body.is_alive() {
            Some(ShotError::Destroyed)
        } else if self.ammo == 0 {
            Some(ShotError::OutOfAmmo)
        } else {
            None
        };
        if let Some(e) = refused {
            log::error!("turret {}: {e}", self.body.id());
            return Err(e);
        }
        self.ammo -= 1;
        let source = self.body.center().offset(0.0, self.body.sprite_height() / 2.0);
        signals.push(Signal::TurretFired {
            turret: self.body.id(),
            source,
            target,
        });
        Ok(())
    }

    pub fn update(&mut self) {
        if self.body.is_alive() {
            let mut update = SpriteUpdate::alive(self.body.center());
            update.label = Some(self.ammo.to_string());
            self.body.push_sprite(update);
        } else {
            self.body.kill_sprite();
        }
    }
}
