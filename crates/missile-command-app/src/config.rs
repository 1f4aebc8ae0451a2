//! Runner configuration, read from a JSON file.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use missile_command_core::config::GameParameters;
use missile_command_core::fault::{FaultKind, FaultLog};
use missile_command_core::level::Level;
use missile_command_sim::engine::SimConfig;

/// Campaign compiled into the binary, used when no level files are given.
const SHIPPED_LEVELS: [(&str, &str); 3] = [
    ("level1.json", include_str!("../levels/level1.json")),
    ("level2.json", include_str!("../levels/level2.json")),
    ("level3.json", include_str!("../levels/level3.json")),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub seed: u64,
    pub screen_width: f64,
    pub screen_height: f64,
    /// Level files, played in order. Empty means the shipped campaign.
    pub levels: Vec<PathBuf>,
    /// Stop after this many ticks even if the match is still running.
    pub max_ticks: Option<u64>,
    /// Pace ticks to wall-clock time.
    pub realtime: bool,
    /// Run the automatic input producer.
    pub autopilot: bool,
    /// How many times to accept a retry at game over.
    pub retries: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            screen_width: 1024.0,
            screen_height: 768.0,
            levels: Vec::new(),
            max_ticks: None,
            realtime: true,
            autopilot: true,
            retries: 0,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json(&text)
    }

    /// Read `path` if given, falling back to defaults on any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Build the engine configuration, loading every level file.
    ///
    /// Unreadable level files become empty levels and are recorded in
    /// `faults`.
    pub fn sim_config(&self, faults: &mut FaultLog) -> SimConfig {
        let levels: Vec<Level> = if self.levels.is_empty() {
            shipped_levels(faults)
        } else {
            self.levels
                .iter()
                .map(|path| Level::load_or_empty(path, faults))
                .collect()
        };
        SimConfig {
            seed: self.seed,
            params: GameParameters::for_screen(self.screen_width, self.screen_height),
            levels,
        }
    }
}

/// Parse the compiled-in campaign. A level that fails to parse becomes an
/// empty level and is recorded in `faults`.
fn shipped_levels(faults: &mut FaultLog) -> Vec<Level> {
    SHIPPED_LEVELS
        .iter()
        .map(|(name, json)| {
            Level::from_json(json).unwrap_or_else(|e| {
                faults.raise(FaultKind::LevelLoad, format!("shipped {name}: {e}"));
                Level::default()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use missile_command_sim::engine::default_levels;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_json(r#"{ "seed": 7, "realtime": false }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert!(!config.realtime);
        assert_eq!(config.screen_width, 1024.0);
        assert!(config.levels.is_empty());
    }

    #[test]
    fn test_missing_config_falls_back() {
        let config = AppConfig::load_or_default(Some(Path::new("/nonexistent/mc.json")));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_bad_level_file_becomes_empty_level() {
        let config = AppConfig {
            levels: vec![PathBuf::from("/nonexistent/level.json")],
            ..Default::default()
        };
        let mut faults = FaultLog::new();
        let sim = config.sim_config(&mut faults);
        assert_eq!(sim.levels, vec![Level::default()]);
        assert_eq!(faults.count(FaultKind::LevelLoad), 1);
    }

    #[test]
    fn test_default_config_plays_shipped_campaign() {
        let config = AppConfig {
            screen_width: 800.0,
            screen_height: 600.0,
            ..Default::default()
        };
        let mut faults = FaultLog::new();
        let sim = config.sim_config(&mut faults);
        assert!(faults.is_empty(), "no level file is read from disk");
        assert_eq!(sim.levels, default_levels());
        assert!(sim.levels.iter().all(|l| *l != Level::default()));
        assert_eq!(sim.params.max_x, 800.0);
    }

    #[test]
    fn test_shipped_levels_parse() {
        for (name, json) in SHIPPED_LEVELS {
            let level = Level::from_json(json);
            assert!(level.is_ok(), "{name} should parse: {level:?}");
        }
    }

    #[test]
    fn test_level_file_overrides_shipped_campaign() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("levels/level2.json");
        let config = AppConfig {
            levels: vec![path],
            ..Default::default()
        };
        let mut faults = FaultLog::new();
        let sim = config.sim_config(&mut faults);
        assert!(faults.is_empty());
        assert_eq!(sim.levels, vec![Level::new(15, 2, 1, 0)]);
    }
}
