//! Simulation constants. Screen-dependent geometry lives in
//! [`crate::config::GameParameters`].

use std::f64::consts::PI;

// --- Timing ---

/// Nominal tick length in milliseconds (~60Hz).
pub const TICK_MS: u64 = 17;

/// Length of the main spawn window of a level.
pub const LEVEL_DURATION_MS: i64 = 20_000;

/// Spread of the opening and closing missile waves.
pub const WAVE_JITTER_MS: i64 = 1_500;

/// Lifetime of hostile explosions.
pub const EXPLOSION_DURATION_MS: u64 = 2_500;

/// Lifetime of friendly air bursts.
pub const AIR_BURST_DURATION_MS: u64 = 2_500;

// --- Level seeding ---

/// Missiles in the opening wave and in the closing wave.
pub const WAVE_SIZE: u32 = 5;

// --- Base layout ---

pub const NUM_CITIES: usize = 6;

/// Slots across the ground line; turrets take slots 0, 4 and 8.
pub const GROUND_SLOTS: usize = 9;

pub const TURRET_SLOTS: [usize; 3] = [0, 4, 8];

pub const CITY_SLOTS: [usize; NUM_CITIES] = [1, 2, 3, 5, 6, 7];

// --- Health ---

pub const MISSILE_HEALTH: i32 = 10;
pub const EXPLOSION_HEALTH: i32 = 10;
pub const BOMBER_HEALTH: i32 = 100;
pub const CITY_HEALTH: i32 = 100;
pub const TURRET_HEALTH: i32 = 100;

// --- Damage ---

pub const EXPLOSION_DAMAGE: i32 = 100;
pub const AIR_BURST_DAMAGE: i32 = 100;

pub const MISSILE_EXPLOSION_INTENSITY: u32 = 150;
pub const AIR_BURST_INTENSITY: u32 = 150;

/// Max jitter (pixels, per axis) applied to the secondary blasts.
pub const DETONATION_FUZZ: i32 = 20;

// --- Missiles ---

pub const MISSILE_VELOCITY: f64 = 0.75;
pub const MISSILE_ACCELERATION: f64 = 0.0;
pub const MISSILE_WIDTH: i32 = 3;
pub const MISSILE_HULL_RADIUS: f64 = (MISSILE_WIDTH / 2) as f64;

/// Heading offset of each MIRV warhead from the parent's heading.
pub const MIRV_SPLIT_ANGLE: f64 = PI / 18.0;

/// Exclusive upper bound of the speed jitter given to MIRV warheads,
/// in hundredths of a pixel per tick.
pub const MIRV_VELOCITY_JITTER: u32 = 15;

/// Width of the downward cone bombs fall within.
pub const BOMB_THETA_FUZZ: f64 = PI / 6.0;

// --- Turrets ---

pub const TURRET_AMMO: u32 = 150;
pub const TURRET_SHOT_VELOCITY: f64 = 3.0;
pub const TURRET_SHOT_ACCELERATION: f64 = 3.0;

/// A shot has arrived once its altitude is within this many pixels of
/// the target altitude.
pub const TURRET_SHOT_ARRIVAL_TOLERANCE: f64 = 5.0;

// --- Bombers ---

pub const BOMBER_AMMO: usize = 5;
pub const BOMBER_VELOCITY: f64 = 1.125;
pub const BOMBER_VELOCITY_FUZZ: u32 = 1;

// --- Scoring ---

pub const POINTS_PER_CITY: u32 = 100;
pub const POINTS_PER_ROUND: u32 = 10;
