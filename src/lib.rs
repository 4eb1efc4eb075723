//! Water Rush - a grid-tap arcade game
//!
//! Core modules:
//! - `session`: Pure game session core (lifecycle, spawning, scoring)
//! - `presentation`: Abstract rendering surface driven by the session
//! - `web`: Browser DOM binding (wasm32 only)
//! - `settings`: Remembered player preferences

pub mod presentation;
pub mod session;
pub mod settings;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use session::{Difficulty, DifficultyProfile, SessionController, SpawnPolicy};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Number of cells in the 3x3 grid
    pub const CELL_COUNT: usize = 9;
    /// Points awarded per collected reward item
    pub const POINTS_PER_CAN: u32 = 1;
    /// Chance that a spawn tick produces a penalty item instead of a reward
    pub const PENALTY_PROBABILITY: f64 = 0.18;
    /// Countdown tick interval
    pub const COUNTDOWN_INTERVAL_MS: u32 = 1000;
}
