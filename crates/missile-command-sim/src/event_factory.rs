//! Builds event packets, including the randomized spawns used to seed a
//! level and the follow-ups of detonations.

use std::f64::consts::PI;

use rand::Rng;

use missile_command_core::config::GameParameters;
use missile_command_core::constants::*;
use missile_command_core::events::EventPacket;
use missile_command_core::fault::{FaultKind, FaultLog};
use missile_command_core::types::{Particle, Position};

#[derive(Debug, Clone)]
pub struct EventFactory {
    params: GameParameters,
}

impl EventFactory {
    pub fn new(params: GameParameters) -> Self {
        Self { params }
    }

    pub fn explosion(&self, position: Position) -> EventPacket {
        EventPacket::Explosion {
            position,
            intensity: MISSILE_EXPLOSION_INTENSITY,
        }
    }

    pub fn air_burst(&self, position: Position) -> EventPacket {
        EventPacket::AirBurst {
            position,
            intensity: AIR_BURST_INTENSITY,
        }
    }

    pub fn turret_shot(&self, source: Position, target: Position) -> EventPacket {
        EventPacket::TurretShot { source, target }
    }

    pub fn bomber(&self) -> EventPacket {
        EventPacket::SpawnBomber {
            start_position: Position::new(self.params.min_x, self.params.bomber_altitude),
        }
    }

    /// Missile entering at a random point of the top edge, aimed at one of
    /// `targets`.
    pub fn random_missile(
        &self,
        rng: &mut impl Rng,
        targets: &[Position],
        faults: &mut FaultLog,
    ) -> EventPacket {
        EventPacket::SpawnMissile {
            start: self.random_entry(rng, targets, faults),
        }
    }

    pub fn random_mirv(
        &self,
        rng: &mut impl Rng,
        targets: &[Position],
        faults: &mut FaultLog,
    ) -> EventPacket {
        EventPacket::SpawnMirv {
            start: self.random_entry(rng, targets, faults),
            deploy_altitude: self.params.mirv_deploy_altitude,
        }
    }

    fn random_entry(
        &self,
        rng: &mut impl Rng,
        targets: &[Position],
        faults: &mut FaultLog,
    ) -> Particle {
        let x = rng.gen_range(0..(self.params.max_x as u32).max(1)) as f64;
        let start = Position::new(x, self.params.max_y);
        let theta = if targets.is_empty() {
            faults.raise(FaultKind::MissingTarget, "no city or turret to aim at");
            0.0
        } else {
            start.point_tangent(&targets[rng.gen_range(0..targets.len())])
        };
        Particle::new(start, MISSILE_VELOCITY, MISSILE_ACCELERATION, theta)
    }

    /// A bomb released from `from`, falling within a cone around straight
    /// down.
    pub fn bomb_drop(&self, from: Particle, rng: &mut impl Rng) -> EventPacket {
        let theta = 1.5 * PI - BOMB_THETA_FUZZ / 2.0 + rng.gen_range(0.0..BOMB_THETA_FUZZ);
        EventPacket::SpawnMissile {
            start: Particle::new(from.position, MISSILE_VELOCITY, MISSILE_ACCELERATION, theta),
        }
    }

    /// The two warheads of a MIRV split. They never split again.
    pub fn mirv_split(&self, from: Particle, rng: &mut impl Rng) -> [EventPacket; 2] {
        [-MIRV_SPLIT_ANGLE, MIRV_SPLIT_ANGLE].map(|offset| {
            let jitter = rng.gen_range(0..MIRV_VELOCITY_JITTER) as f64 / 100.0;
            let start = Particle {
                velocity: from.velocity + jitter,
                theta: from.theta + offset,
                ..from
            };
            EventPacket::SpawnMirv {
                start,
                deploy_altitude: self.params.min_y,
            }
        })
    }
}
