//! Console match observer.

use missile_command_core::state::{GameOverReport, LevelReport};
use missile_command_sim::match_manager::MatchObserver;

/// Prints results and accepts a fixed number of retries.
#[derive(Debug, Default)]
pub struct ConsoleObserver {
    retries_left: u32,
    pub levels_cleared: u32,
}

impl ConsoleObserver {
    pub fn new(retries: u32) -> Self {
        Self {
            retries_left: retries,
            levels_cleared: 0,
        }
    }
}

impl MatchObserver for ConsoleObserver {
    fn level_complete(&mut self, report: &LevelReport) {
        self.levels_cleared += 1;
        println!(
            "Level {} cleared: {} cities x {} + {} rounds x {} = {} (total {})",
            report.level + 1,
            report.remaining_cities,
            missile_command_core::constants::POINTS_PER_CITY,
            report.remaining_ammo,
            missile_command_core::constants::POINTS_PER_ROUND,
            report.level_score,
            report.score
        );
    }

    fn game_over(&mut self, report: &GameOverReport) -> bool {
        let outcome = if report.won { "VICTORY" } else { "THE END" };
        println!("{outcome}: final score {}", report.final_score);
        if self.retries_left == 0 {
            return false;
        }
        self.retries_left -= 1;
        log::info!("retrying ({} retries left)", self.retries_left);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retries_are_counted_down() {
        let mut observer = ConsoleObserver::new(1);
        let report = GameOverReport {
            final_score: 10,
            won: false,
        };
        assert!(observer.game_over(&report));
        assert!(!observer.game_over(&report));
    }

    #[test]
    fn test_levels_cleared_counter() {
        let mut observer = ConsoleObserver::new(0);
        observer.level_complete(&LevelReport {
            level: 0,
            remaining_cities: 6,
            remaining_ammo: 100,
            level_score: 1600,
            score: 1600,
        });
        assert_eq!(observer.levels_cleared, 1);
    }
}
