//! Level descriptions.
//!
//! A level only says how many of each enemy to schedule. Levels are
//! stored as JSON:
//!
//! ```json
//! { "num_missiles": 10, "num_mirvs": 2, "num_bombers": 1, "num_deathheads": 0 }
//! ```
//!
//! Missing fields default to zero.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::fault::{FaultKind, FaultLog};

/// Enemy counts for one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level {
    pub num_missiles: u32,
    pub num_mirvs: u32,
    pub num_bombers: u32,
    /// Scheduled as extra bombers.
    pub num_deathheads: u32,
}

#[derive(Debug)]
pub enum LevelError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io(e) => write!(f, "failed to read level: {e}"),
            LevelError::Parse(e) => write!(f, "failed to parse level: {e}"),
        }
    }
}

impl std::error::Error for LevelError {}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::Io(e)
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::Parse(e)
    }
}

impl Level {
    pub fn new(num_missiles: u32, num_mirvs: u32, num_bombers: u32, num_deathheads: u32) -> Self {
        Self {
            num_missiles,
            num_mirvs,
            num_bombers,
            num_deathheads,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load a level, falling back to an empty level on any error.
    pub fn load_or_empty(path: impl AsRef<Path>, faults: &mut FaultLog) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(level) => level,
            Err(e) => {
                faults.raise(FaultKind::LevelLoad, format!("{}: {e}", path.display()));
                Self::default()
            }
        }
    }

    /// Every bomber-type enemy in the level.
    pub fn total_bombers(&self) -> u32 {
        self.num_bombers + self.num_deathheads
    }
}
