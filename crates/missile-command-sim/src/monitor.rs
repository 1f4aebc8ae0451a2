//! Forwards object signals to the event bus as packets.

use rand::Rng;

use missile_command_core::events::EventPacket;

use crate::event_bus::EventSender;
use crate::event_factory::EventFactory;
use crate::objects::Signal;

#[derive(Debug, Clone)]
pub struct EventMonitor {
    events: EventFactory,
    bus: EventSender,
}

impl EventMonitor {
    pub fn new(events: EventFactory, bus: EventSender) -> Self {
        Self { events, bus }
    }

    pub fn publish(&self, signal: Signal, rng: &mut impl Rng) {
        for packet in self.translate(signal, rng) {
            self.bus.send(packet);
        }
    }

    pub fn publish_all(&self, signals: impl IntoIterator<Item = Signal>, rng: &mut impl Rng) {
        for signal in signals {
            self.publish(signal, rng);
        }
    }

    /// Packets a signal turns into.
    pub fn translate(&self, signal: Signal, rng: &mut impl Rng) -> Vec<EventPacket> {
        match signal {
            Signal::MissileDetonated { at } | Signal::BomberDestroyed { at } => {
                vec![self.events.explosion(at.position)]
            }
            Signal::ShotArrived { at } => vec![self.events.air_burst(at.position)],
            Signal::BombDropped { from } => vec![self.events.bomb_drop(from, rng)],
            Signal::MirvDeployed { from } => self.events.mirv_split(from, rng).to_vec(),
            Signal::TurretFired { source, target, .. } => {
                vec![self.events.turret_shot(source, target)]
            }
            Signal::Collision { first, second } => vec![EventPacket::Collision { first, second }],
            Signal::CityDestroyed { city, at } => vec![EventPacket::CityDestroyed {
                city,
                position: at,
            }],
        }
    }
}
