//! Enumerations used across the simulation.

use serde::{Deserialize, Serialize};

/// Classification of a game object, used for friend tests and the
/// same-type prune of the interaction sweep.
///
/// MIRVs classify as `Missile` so warheads from one split never
/// collide with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Missile,
    Explosion,
    City,
    Turret,
    Bomber,
    TurretShot,
    /// Player pointer. Never spawned by the simulation, but part of
    /// every friend table.
    Cursor,
    AirBurst,
}

impl ObjectType {
    /// Hostile objects that keep a level running while present.
    pub fn is_enemy(&self) -> bool {
        matches!(
            self,
            ObjectType::Missile | ObjectType::Bomber | ObjectType::Explosion
        )
    }
}

/// Top-level match phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance and levels play out.
    #[default]
    Active,
    /// The match ended and the observer declined a retry.
    Finished,
}
