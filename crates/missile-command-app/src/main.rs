use std::path::PathBuf;
use std::time::Duration;

use missile_command_app::autopilot::spawn_autopilot;
use missile_command_app::config::AppConfig;
use missile_command_app::game_loop::{spawn_game_loop, LoopOptions, TICK_DURATION};
use missile_command_app::observer::ConsoleObserver;
use missile_command_app::state::AppState;
use missile_command_core::fault::FaultLog;
use missile_command_sim::sprite::NullSpriteFactory;
use missile_command_sim::SimulationEngine;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load_or_default(config_path.as_deref());

    let mut faults = FaultLog::default();
    let sim_config = config.sim_config(&mut faults);
    if !faults.is_empty() {
        log::warn!("{} level file(s) could not be loaded", faults.len());
    }

    let sprites = NullSpriteFactory::new(&sim_config.params);
    let engine = SimulationEngine::with_collaborators(
        sim_config,
        Box::new(sprites),
        Box::new(ConsoleObserver::new(config.retries)),
    );

    let state = AppState::new();
    let options = LoopOptions {
        realtime: config.realtime,
        max_ticks: config.max_ticks,
    };
    let game_loop = match spawn_game_loop(engine, options, state.latest_snapshot.clone()) {
        Ok(handle) => handle,
        Err(e) => {
            log::error!("failed to start game loop: {e}");
            std::process::exit(1);
        }
    };

    let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
    let autopilot = if config.autopilot {
        let interval = if config.realtime {
            TICK_DURATION * 10
        } else {
            Duration::from_millis(1)
        };
        match spawn_autopilot(
            game_loop.events.clone(),
            state.latest_snapshot.clone(),
            stop_rx,
            interval,
        ) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::error!("failed to start autopilot: {e}");
                None
            }
        }
    } else {
        None
    };

    let last = match game_loop.thread.join() {
        Ok(snapshot) => snapshot,
        Err(_) => {
            log::error!("game loop thread panicked");
            std::process::exit(1);
        }
    };
    let _ = stop_tx.send(());
    if let Some(handle) = autopilot {
        match handle.join() {
            Ok(clicks) => log::info!("autopilot clicked {clicks} times"),
            Err(_) => log::error!("autopilot thread panicked"),
        }
    }

    println!(
        "Final score {} after {} ticks ({:.1}s simulated)",
        last.score,
        last.time.tick,
        last.time.elapsed_secs()
    );
}
