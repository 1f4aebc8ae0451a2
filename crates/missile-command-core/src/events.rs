//! Event vocabulary carried by the event bus and the timer queue.

use serde::{Deserialize, Serialize};

use crate::types::{ObjectId, Particle, Position};

/// Subscription key for the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Explosion,
    SpawnMissile,
    SpawnMirv,
    SpawnBomber,
    TurretShot,
    AirBurst,
    MouseInput,
    KeyboardInput,
    Collision,
    OutOfAmmo,
    CityDestroyed,
}

impl EventType {
    /// Every event type, in declaration order.
    pub const ALL: [EventType; 11] = [
        EventType::Explosion,
        EventType::SpawnMissile,
        EventType::SpawnMirv,
        EventType::SpawnBomber,
        EventType::TurretShot,
        EventType::AirBurst,
        EventType::MouseInput,
        EventType::KeyboardInput,
        EventType::Collision,
        EventType::OutOfAmmo,
        EventType::CityDestroyed,
    ];
}

/// A single event with its typed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventPacket {
    // --- Detonations ---
    /// Hostile blast at `position`.
    Explosion { position: Position, intensity: u32 },
    /// Friendly blast where a turret shot arrived.
    AirBurst { position: Position, intensity: u32 },

    // --- Spawns ---
    SpawnMissile { start: Particle },
    SpawnMirv { start: Particle, deploy_altitude: f64 },
    /// Bomber entering at `start_position`; altitude and speed are
    /// randomized by the object factory.
    SpawnBomber { start_position: Position },
    /// Interceptor fired from `source` toward `target`.
    TurretShot { source: Position, target: Position },

    // --- Input ---
    MouseInput(MouseInput),
    KeyboardInput { pressed_keys: Vec<String> },

    // --- Notifications ---
    Collision { first: ObjectId, second: ObjectId },
    OutOfAmmo { turret: ObjectId },
    CityDestroyed { city: ObjectId, position: Position },
}

/// Mouse click sample from an input device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseInput {
    pub position: Position,
    pub is_left_click: bool,
}

impl EventPacket {
    /// The subscription key for this packet.
    pub fn kind(&self) -> EventType {
        match self {
            EventPacket::Explosion { .. } => EventType::Explosion,
            EventPacket::AirBurst { .. } => EventType::AirBurst,
            EventPacket::SpawnMissile { .. } => EventType::SpawnMissile,
            EventPacket::SpawnMirv { .. } => EventType::SpawnMirv,
            EventPacket::SpawnBomber { .. } => EventType::SpawnBomber,
            EventPacket::TurretShot { .. } => EventType::TurretShot,
            EventPacket::MouseInput(_) => EventType::MouseInput,
            EventPacket::KeyboardInput { .. } => EventType::KeyboardInput,
            EventPacket::Collision { .. } => EventType::Collision,
            EventPacket::OutOfAmmo { .. } => EventType::OutOfAmmo,
            EventPacket::CityDestroyed { .. } => EventType::CityDestroyed,
        }
    }
}
