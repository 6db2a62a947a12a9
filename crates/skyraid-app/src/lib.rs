//! SKYRAID headless runner.
//!
//! This crate wires the simulation to a fixed-rate loop thread, a scripted
//! autopilot standing in for input devices, and the JSON progress store.

pub mod autopilot;
pub mod game_loop;
pub mod state;

pub use skyraid_core as core;
