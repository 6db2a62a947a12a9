//! Enemy AI for SKYRAID.
//!
//! Implements the seven enemy variants: spawn profiles, per-tick movement
//! laws and firing policies. No ECS dependency, operates on plain data.

pub mod behavior;
pub mod profiles;

pub use skyraid_core as core;

#[cfg(test)]
mod tests;
