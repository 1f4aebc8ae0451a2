//! Screen-dependent game geometry.

use serde::{Deserialize, Serialize};

use crate::constants::GROUND_SLOTS;
use crate::types::Position;

/// Geometry derived from the play-field dimensions.
///
/// All values are in pixels with the origin at the bottom-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameParameters {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    /// Missiles at or below this altitude hit the ground.
    pub ground_level: f64,
    /// Altitude at which a MIRV splits.
    pub mirv_deploy_altitude: f64,
    pub bomber_altitude: f64,
    /// Exclusive bound of the random altitude added to a bomber.
    pub bomber_altitude_fuzz: u32,
    pub ground_sprite_width: f64,
    pub ground_sprite_height: f64,
    pub ground_sprite_spacing: f64,
    pub max_explosion_radius: f64,
    pub max_air_burst_radius: f64,
    /// Axis-aligned prune distance of the interaction sweep.
    pub min_separation: f64,
    /// Hull radius of cities, turrets and bombers.
    pub ground_hull_radius: f64,
}

impl GameParameters {
    /// Derive the geometry for a `width` x `height` play field.
    pub fn for_screen(width: f64, height: f64) -> Self {
        let ground_sprite_width = (0.05 * width).trunc();
        let ground_sprite_height = (0.04 * width).trunc();
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: width,
            max_y: height,
            ground_level: (0.01 * height).trunc(),
            mirv_deploy_altitude: 0.40 * height,
            bomber_altitude: (0.75 * height).trunc(),
            bomber_altitude_fuzz: ((height / 6.0) as u32).max(1),
            ground_sprite_width,
            ground_sprite_height,
            ground_sprite_spacing: (0.5 * ground_sprite_width).trunc(),
            max_explosion_radius: ground_sprite_width * 1.2,
            max_air_burst_radius: ground_sprite_width * 1.5,
            min_separation: ground_sprite_width,
            ground_hull_radius: (ground_sprite_width / 2.0).trunc(),
        }
    }

    /// Centre of ground slot `slot` (0-based, left to right).
    pub fn ground_slot(&self, slot: usize) -> Position {
        let offset = (self.max_x - self.ground_sprite_spacing) / GROUND_SLOTS as f64;
        Position::new(
            (offset * slot as f64 + self.ground_sprite_spacing).trunc(),
            (self.min_y + self.ground_sprite_height / 2.0).trunc(),
        )
    }
}

impl Default for GameParameters {
    fn default() -> Self {
        Self::for_screen(1024.0, 768.0)
    }
}
