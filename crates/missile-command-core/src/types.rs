//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Identity assigned by the object container on insertion.
pub type ObjectId = u64;

/// 2D position in screen space (pixels). y grows upward from the ground.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Kinematic state of a moving object.
///
/// Speed and acceleration are scalars along a heading that never changes
/// after creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Position,
    /// Scalar speed along `theta` (pixels per tick).
    pub velocity: f64,
    /// Added to `velocity` after every position step.
    pub acceleration: f64,
    /// Heading in radians (0 = +x, counter-clockwise).
    pub theta: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub elapsed_ms: u64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }

    /// Heading from this position toward `target`, in `[0, 2π)`.
    ///
    /// Coincident points yield 0.
    pub fn point_tangent(&self, target: &Position) -> f64 {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        dy.atan2(dx).rem_euclid(std::f64::consts::TAU)
    }

    /// Return a copy shifted by the given offsets.
    pub fn offset(&self, dx: f64, dy: f64) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

impl Particle {
    pub fn new(position: Position, velocity: f64, acceleration: f64, theta: f64) -> Self {
        Self {
            position,
            velocity,
            acceleration,
            theta,
        }
    }

    /// Advance one tick: step along the heading, then apply acceleration.
    pub fn advance(&mut self) {
        self.position.x += self.theta.cos() * self.velocity;
        self.position.y += self.theta.sin() * self.velocity;
        self.velocity += self.acceleration;
    }

    /// Stationary particle at `position`.
    pub fn at_rest(position: Position) -> Self {
        Self::new(position, 0.0, 0.0, 0.0)
    }
}

impl SimTime {
    /// Advance by one tick of `tick_ms` milliseconds.
    pub fn advance(&mut self, tick_ms: u64) {
        self.tick += 1;
        self.elapsed_ms += tick_ms;
    }

    /// Elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }
}
