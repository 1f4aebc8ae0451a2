//! Simulation engine for missile command.
//!
//! Owns the game objects, the event bus and the spawn scheduler, runs the
//! interaction and update passes at a fixed tick, and produces
//! GameStateSnapshots for presentation layers.

pub mod container;
pub mod engine;
pub mod event_bus;
pub mod event_factory;
pub mod factory;
pub mod match_manager;
pub mod model;
pub mod monitor;
pub mod objects;
pub mod processor;
pub mod sprite;
pub mod timer_queue;
pub mod world;

pub use engine::SimulationEngine;
pub use missile_command_core as core;
