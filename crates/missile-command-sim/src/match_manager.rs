//! Level progression and scoring.
//!
//! A level is seeded into the timer queue when it loads. It completes once
//! the queue has run dry and no enemy is left; the observer is then told
//! the result before the next level (or the end of the match).

use rand::Rng;

use missile_command_core::constants::*;
use missile_command_core::level::Level;
use missile_command_core::state::{GameOverReport, LevelReport};

use crate::event_factory::EventFactory;
use crate::model;
use crate::objects::Signal;
use crate::timer_queue::{TimedEvent, TimerQueue};
use crate::world::SimWorld;

/// Receives match results. Calls block the simulation thread until they
/// return.
pub trait MatchObserver: Send {
    fn level_complete(&mut self, report: &LevelReport);

    /// Return `true` to play again from the first level.
    fn game_over(&mut self, report: &GameOverReport) -> bool;
}

/// Logs results and never retries.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl MatchObserver for LoggingObserver {
    fn level_complete(&mut self, report: &LevelReport) {
        log::info!(
            "level {} complete: {} cities, {} rounds, +{} (total {})",
            report.level + 1,
            report.remaining_cities,
            report.remaining_ammo,
            report.level_score,
            report.score
        );
    }

    fn game_over(&mut self, report: &GameOverReport) -> bool {
        log::info!(
            "game over ({}): final score {}",
            if report.won { "won" } else { "lost" },
            report.final_score
        );
        false
    }
}

/// What a call to [`MatchManager::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// The model advanced one tick.
    Playing,
    /// A level was cleared and the next one loaded.
    NextLevel,
    /// The match ended and the observer asked for a retry.
    Restarted,
    /// The match ended for good.
    Finished,
}

pub struct MatchManager {
    levels: Vec<Level>,
    current: usize,
    score: u32,
    events: EventFactory,
}

impl MatchManager {
    /// An empty level list plays a single empty level.
    pub fn new(levels: Vec<Level>, events: EventFactory) -> Self {
        let levels = if levels.is_empty() {
            vec![Level::default()]
        } else {
            levels
        };
        Self {
            levels,
            current: 0,
            score: 0,
            events,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_level(&self) -> usize {
        self.current
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Reset the ground layout and schedule every enemy of level `index`.
    pub fn load_level(&mut self, index: usize, world: &mut SimWorld, timers: &mut TimerQueue) {
        self.current = index % self.level_count();
        let level = self.levels[self.current];
        log::info!("loading level {}: {level:?}", self.current + 1);

        world.setup_base();
        timers.clear();
        self.seed_timers(&level, world, timers);
    }

    fn seed_timers(&self, level: &Level, world: &mut SimWorld, timers: &mut TimerQueue) {
        let targets = world.targets();
        let SimWorld { rng, faults, .. } = world;

        let mut missiles = |count: u32, base: i64, spread: i64, timers: &mut TimerQueue| {
            for _ in 0..count {
                let delay = base + rng.gen_range(0..spread);
                let packet = self.events.random_missile(rng, &targets, faults);
                timers.insert(TimedEvent::new(delay, packet));
            }
        };
        missiles(WAVE_SIZE, 0, WAVE_JITTER_MS, timers);
        missiles(level.num_missiles, 0, LEVEL_DURATION_MS, timers);
        missiles(WAVE_SIZE, LEVEL_DURATION_MS, WAVE_JITTER_MS, timers);

        for _ in 0..level.num_mirvs {
            let delay = LEVEL_DURATION_MS + WAVE_JITTER_MS + rng.gen_range(0..WAVE_JITTER_MS);
            let packet = self.events.random_mirv(rng, &targets, faults);
            timers.insert(TimedEvent::new(delay, packet));
        }

        for _ in 0..level.total_bombers() {
            let delay = rng.gen_range(0..LEVEL_DURATION_MS);
            timers.insert(TimedEvent::new(delay, self.events.bomber()));
        }
    }

    pub fn is_level_complete(&self, world: &SimWorld, timers: &TimerQueue) -> bool {
        timers.is_empty() && !world.enemies_remain()
    }

    pub fn level_report(&self, world: &SimWorld) -> LevelReport {
        let remaining_cities = world.remaining_cities();
        let remaining_ammo = world.remaining_ammo();
        let level_score = remaining_cities * POINTS_PER_CITY + remaining_ammo * POINTS_PER_ROUND;
        LevelReport {
            level: self.current,
            remaining_cities,
            remaining_ammo,
            level_score,
            score: self.score + level_score,
        }
    }

    /// Advance the model, or wrap up the level once it is complete.
    pub fn update(
        &mut self,
        world: &mut SimWorld,
        timers: &mut TimerQueue,
        signals: &mut Vec<Signal>,
        observer: &mut dyn MatchObserver,
    ) -> MatchStatus {
        if !self.is_level_complete(world, timers) {
            model::refresh(&mut world.objects, &world.params, TICK_MS, signals);
            return MatchStatus::Playing;
        }

        let report = self.level_report(world);
        self.score = report.score;
        observer.level_complete(&report);

        let lost = report.remaining_cities == 0;
        let last = self.current + 1 >= self.level_count();
        if !lost && !last {
            self.load_level(self.current + 1, world, timers);
            return MatchStatus::NextLevel;
        }

        let game_over = GameOverReport {
            final_score: self.score,
            won: !lost,
        };
        if observer.game_over(&game_over) {
            self.score = 0;
            self.load_level(0, world, timers);
            MatchStatus::Restarted
        } else {
            MatchStatus::Finished
        }
    }
}
