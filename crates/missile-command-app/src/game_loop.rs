//! Game loop thread: runs the simulation engine at ~60Hz and publishes
//! snapshots.
//!
//! The engine is moved into the thread. Control commands arrive over a
//! crossbeam channel; input events bypass the loop and go straight into
//! the engine's event bus through an `EventSender`.

use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use missile_command_core::constants::TICK_MS;
use missile_command_core::enums::GamePhase;
use missile_command_core::state::GameStateSnapshot;
use missile_command_sim::event_bus::EventSender;
use missile_command_sim::SimulationEngine;

use crate::state::{GameLoopCommand, SharedSnapshot};

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_millis(TICK_MS);

#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Sleep between ticks to hold the nominal rate.
    pub realtime: bool,
    pub max_ticks: Option<u64>,
}

/// Handles to a running game loop.
pub struct GameLoopHandle {
    pub commands: Sender<GameLoopCommand>,
    /// Enqueue input events into the simulation.
    pub events: EventSender,
    /// Yields the last snapshot when the loop exits.
    pub thread: JoinHandle<GameStateSnapshot>,
}

/// Move `engine` into a new game loop thread.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    options: LoopOptions,
    latest_snapshot: SharedSnapshot,
) -> std::io::Result<GameLoopHandle> {
    let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<GameLoopCommand>();
    let events = engine.event_sender();

    let thread = std::thread::Builder::new()
        .name("missile-command-game-loop".into())
        .spawn(move || run_game_loop(engine, options, &cmd_rx, &latest_snapshot))?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        events,
        thread,
    })
}

/// The game loop. Runs until the match finishes, the tick limit is hit,
/// or a Shutdown command arrives.
fn run_game_loop(
    mut engine: SimulationEngine,
    options: LoopOptions,
    cmd_rx: &Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
) -> GameStateSnapshot {
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain control commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Shutdown) | Err(TryRecvError::Disconnected) => {
                    log::info!("game loop shutting down");
                    return engine.snapshot();
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick();

        // 3. Publish for other threads
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }

        if snapshot.phase == GamePhase::Finished {
            return snapshot;
        }
        if options.max_ticks.is_some_and(|max| snapshot.time.tick >= max) {
            log::info!("tick limit reached at {}", snapshot.time.tick);
            return snapshot;
        }

        // 4. Sleep until next tick
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind: reset instead of bursting to catch up.
                next_tick_time = now;
            }
        }
    }
}
