//! Persistent campaign progress for SKYRAID.
//!
//! The progress record, its JSON file store and the upgrade shop. The
//! simulation owns a [`Progress`] in memory; only the runner touches disk.

pub mod progress;
pub mod save_load;
pub mod shop;

pub use progress::{Progress, Upgrades};
pub use save_load::SaveError;
pub use shop::{Receipt, ShopError};
