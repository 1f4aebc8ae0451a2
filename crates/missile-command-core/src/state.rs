//! Snapshots and reports handed to presentation and match collaborators.

use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, ObjectType};
use crate::types::{ObjectId, Position, SimTime};

/// Complete simulation state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Zero-based index of the level being played.
    pub level: usize,
    pub score: u32,
    /// Timed events still waiting in the scheduler.
    pub pending_spawns: usize,
    pub objects: Vec<ObjectView>,
}

/// Read-only view of one live object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectView {
    pub id: ObjectId,
    pub kind: ObjectType,
    pub position: Position,
    pub health: i32,
    pub hull_radius: f64,
}

impl GameStateSnapshot {
    pub fn count(&self, kind: ObjectType) -> usize {
        self.objects.iter().filter(|o| o.kind == kind).count()
    }
}

/// Handed to the match observer when a level is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelReport {
    pub level: usize,
    pub remaining_cities: u32,
    pub remaining_ammo: u32,
    /// Points earned by this level.
    pub level_score: u32,
    /// Running total including this level.
    pub score: u32,
}

/// Handed to the match observer when the match ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverReport {
    pub final_score: u32,
    pub won: bool,
}
