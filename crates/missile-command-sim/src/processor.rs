//! Main event processor: turns bus traffic into objects in the world.

use rand::Rng;

use missile_command_core::constants::DETONATION_FUZZ;
use missile_command_core::events::{EventPacket, MouseInput};
use missile_command_core::fault::{Fault, FaultKind};
use missile_command_core::types::Position;

use crate::event_bus::{EventListener, EventSender};
use crate::monitor::EventMonitor;
use crate::world::SimWorld;

/// Blasts spawned per detonation: one exact, the rest jittered.
const FUZZY_BLASTS: usize = 2;

pub struct MainEventProcessor {
    monitor: EventMonitor,
    bus: EventSender,
}

impl MainEventProcessor {
    pub fn new(monitor: EventMonitor, bus: EventSender) -> Self {
        Self { monitor, bus }
    }

    fn spawn_blasts(world: &mut SimWorld, position: Position, intensity: u32, air_burst: bool) {
        let mut points = vec![position];
        for _ in 0..FUZZY_BLASTS {
            let dx = fuzz(&mut world.rng);
            let dy = fuzz(&mut world.rng);
            points.push(position.offset(dx, dy));
        }
        for point in points {
            let blast = if air_burst {
                world.factory.air_burst(point, intensity)
            } else {
                world.factory.explosion(point, intensity)
            };
            world.objects.add(blast);
        }
    }

    /// Fire a random armed turret at the click position.
    fn fire(&self, world: &mut SimWorld, click: &MouseInput) {
        if !click.is_left_click {
            return;
        }
        let armed = world.armed_turrets();
        if armed.is_empty() {
            world.faults.raise(FaultKind::NoArmedTurret, "NO ARMED TURRETS");
            return;
        }
        let index = armed[world.rng.gen_range(0..armed.len())];
        let Some(turret) = world.objects.get_mut(index).and_then(|o| o.as_turret_mut()) else {
            return;
        };

        let mut signals = Vec::new();
        match turret.shoot(click.position, &mut signals) {
            Ok(()) => {
                if turret.ammo() == 0 {
                    self.bus.send(EventPacket::OutOfAmmo {
                        turret: turret.body.id(),
                    });
                }
                self.monitor.publish_all(signals, &mut world.rng);
            }
            Err(e) => {
                // Already logged by the turret.
                let id = turret.body.id();
                let fault = Fault::new(FaultKind::OutOfAmmo, format!("turret {id}: {e}"));
                world.faults.extend_logged([fault]);
            }
        }
    }
}

impl EventListener<SimWorld> for MainEventProcessor {
    fn name(&self) -> &str {
        "main-event-processor"
    }

    fn notify(&mut self, packet: &EventPacket, world: &mut SimWorld) {
        match packet {
            EventPacket::Explosion {
                position,
                intensity,
            } => Self::spawn_blasts(world, *position, *intensity, false),
            EventPacket::AirBurst {
                position,
                intensity,
            } => Self::spawn_blasts(world, *position, *intensity, true),
            EventPacket::SpawnMissile { start } => {
                let missile = world.factory.missile(*start);
                world.objects.add(missile);
            }
            EventPacket::SpawnMirv {
                start,
                deploy_altitude,
            } => {
                let mirv = world.factory.mirv(*start, *deploy_altitude);
                world.objects.add(mirv);
            }
            EventPacket::SpawnBomber { start_position } => {
                let bomber = world.factory.bomber(*start_position, &mut world.rng);
                world.objects.add(bomber);
            }
            EventPacket::TurretShot { source, target } => {
                let shot = world.factory.turret_shot(*source, *target);
                world.objects.add(shot);
            }
            EventPacket::MouseInput(click) => self.fire(world, click),
            EventPacket::KeyboardInput { pressed_keys } => {
                log::debug!("keyboard input ignored: {pressed_keys:?}");
            }
            EventPacket::Collision { first, second } => {
                log::debug!("collision between {first} and {second}");
            }
            EventPacket::OutOfAmmo { turret } => {
                log::info!("turret {turret} is out of ammo");
            }
            EventPacket::CityDestroyed { city, position } => {
                log::info!("city {city} destroyed at ({:.0}, {:.0})", position.x, position.y);
            }
        }
    }
}

/// Random offset in `(-DETONATION_FUZZ, DETONATION_FUZZ)`: odd draws are
/// positive, even draws negative.
fn fuzz(rng: &mut impl Rng) -> f64 {
    let r = rng.gen_range(0..DETONATION_FUZZ);
    if r % 2 == 0 {
        -(r as f64)
    } else {
        r as f64
    }
}
