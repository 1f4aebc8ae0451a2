//! State shared between the game loop thread and its controllers.

use std::sync::{Arc, Mutex};

use missile_command_core::state::GameStateSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameLoopCommand {
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the game loop after every tick and read by
/// the input producer.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

#[derive(Default)]
pub struct AppState {
    pub latest_snapshot: SharedSnapshot,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the most recent snapshot, if any tick has run.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }
}
