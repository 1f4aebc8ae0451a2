//! Missile command headless runner.
//!
//! Wires the simulation to a fixed-rate game-loop thread, an input
//! producer, and a console match observer.

pub mod autopilot;
pub mod config;
pub mod game_loop;
pub mod observer;
pub mod state;

pub use missile_command_core as core;
