//! Simulation engine: the per-tick controller.
//!
//! `SimulationEngine` owns the world, the event bus, the timer queue and
//! the match state, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use missile_command_core::config::GameParameters;
use missile_command_core::constants::TICK_MS;
use missile_command_core::enums::GamePhase;
use missile_command_core::events::{EventPacket, EventType};
use missile_command_core::fault::FaultLog;
use missile_command_core::level::Level;
use missile_command_core::state::GameStateSnapshot;
use missile_command_core::types::SimTime;

use crate::event_bus::{EventBus, EventSender};
use crate::event_factory::EventFactory;
use crate::match_manager::{LoggingObserver, MatchManager, MatchObserver, MatchStatus};
use crate::monitor::EventMonitor;
use crate::objects::Signal;
use crate::processor::MainEventProcessor;
use crate::sprite::{NullSpriteFactory, SpriteFactory};
use crate::timer_queue::TimerQueue;
use crate::world::SimWorld;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub params: GameParameters,
    /// Played in order; the match is won after the last one.
    pub levels: Vec<Level>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            params: GameParameters::default(),
            levels: default_levels(),
        }
    }
}

/// Built-in campaign used when no level files are supplied.
pub fn default_levels() -> Vec<Level> {
    vec![
        Level::new(10, 0, 0, 0),
        Level::new(15, 2, 1, 0),
        Level::new(20, 4, 2, 1),
    ]
}

pub struct SimulationEngine {
    world: SimWorld,
    bus: EventBus<SimWorld>,
    timers: TimerQueue,
    monitor: EventMonitor,
    matches: MatchManager,
    observer: Box<dyn MatchObserver>,
    time: SimTime,
    phase: GamePhase,
    signals: Vec<Signal>,
}

impl SimulationEngine {
    /// Headless engine with null sprites and a logging observer.
    pub fn new(config: SimConfig) -> Self {
        let sprites = NullSpriteFactory::new(&config.params);
        Self::with_collaborators(config, Box::new(sprites), Box::new(LoggingObserver))
    }

    pub fn with_collaborators(
        config: SimConfig,
        sprites: Box<dyn SpriteFactory>,
        observer: Box<dyn MatchObserver>,
    ) -> Self {
        let events = EventFactory::new(config.params.clone());
        let mut world = SimWorld::new(config.params, sprites, config.seed);

        let mut bus = EventBus::new();
        let monitor = EventMonitor::new(events.clone(), bus.sender());
        let processor = MainEventProcessor::new(monitor.clone(), bus.sender());
        let id = bus.register(Box::new(processor));
        bus.subscribe_multiple(id, &EventType::ALL);

        let mut timers = TimerQueue::new(bus.sender());
        let mut matches = MatchManager::new(config.levels, events);
        matches.load_level(0, &mut world, &mut timers);

        Self {
            world,
            bus,
            timers,
            monitor,
            matches,
            observer,
            time: SimTime::default(),
            phase: GamePhase::default(),
            signals: Vec::new(),
        }
    }

    /// Queue an event for the next tick (simulation thread).
    pub fn queue_event(&self, packet: EventPacket) {
        self.bus.receive(packet);
    }

    /// Enqueue handle for input producers on other threads.
    pub fn event_sender(&self) -> EventSender {
        self.bus.input_sender()
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        if self.phase == GamePhase::Active {
            self.run_tick();
            self.time.advance(TICK_MS);
        }
        self.snapshot()
    }

    fn run_tick(&mut self) {
        // 1. Release due spawns
        self.timers.tick(TICK_MS as i64);

        // 2. Dispatch queued events
        let dropped = self.bus.process_all(&mut self.world);
        self.world.faults.extend_logged(dropped);

        // 3. Model pass or level wrap-up
        let status = self.matches.update(
            &mut self.world,
            &mut self.timers,
            &mut self.signals,
            self.observer.as_mut(),
        );

        // 4. Forward what objects emitted
        self.monitor
            .publish_all(self.signals.drain(..), &mut self.world.rng);

        if status == MatchStatus::Finished {
            log::info!("match finished with score {}", self.matches.score());
            self.phase = GamePhase::Finished;
        }
    }

    pub fn snapshot(&self) -> GameStateSnapshot {
        GameStateSnapshot {
            time: self.time,
            phase: self.phase,
            level: self.matches.current_level(),
            score: self.matches.score(),
            pending_spawns: self.timers.len(),
            objects: self.world.objects.iter().map(|o| o.view()).collect(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> u32 {
        self.matches.score()
    }

    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    pub fn faults(&self) -> &FaultLog {
        &self.world.faults
    }

    pub fn pending_spawns(&self) -> usize {
        self.timers.len()
    }

    /// Mutable world access for test setups.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut SimWorld {
        &mut self.world
    }

    /// Drop every scheduled spawn (for tests that place enemies by hand).
    #[cfg(test)]
    pub fn clear_schedule(&mut self) {
        self.timers.clear();
    }
}
