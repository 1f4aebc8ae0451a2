//! Core types and definitions for the missile-command simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! kinematics, event packets, game parameters, level descriptions,
//! faults, and state snapshots. It has no dependency on any runtime.

pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod fault;
pub mod level;
pub mod state;
pub mod types;
