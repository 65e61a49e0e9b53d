//! Arena Shooter — a single-screen arcade shooter for the terminal.
//!
//! Core modules:
//! - `entities`: pure data (geometry, entity kinds, game objects)
//! - `compute`: per-object behaviour (movement, bounds, collision)
//! - `world`: the loop controller and its Idle/Running/GameOver machine
//! - `timing`: fixed-cadence triggers feeding the loop
//! - `assets`, `raster`, `sound`: embedded sprites, the off-screen buffer
//!   and fire-and-forget sound cues
//! - `settings`, `error`: configuration and the error taxonomy

pub mod assets;
pub mod compute;
pub mod entities;
pub mod error;
pub mod raster;
pub mod settings;
pub mod sound;
pub mod timing;
pub mod world;

pub use assets::AssetTable;
pub use error::{AssetError, ConfigError, GameError};
pub use settings::Settings;
pub use world::World;
