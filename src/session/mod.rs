//! Game session core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Timers modeled as explicit cancellable tasks
//! - No rendering or platform dependencies

pub mod controller;
pub mod messages;
pub mod profile;
pub mod spawn;
pub mod state;
pub mod timers;

pub use controller::SessionController;
pub use profile::{Difficulty, DifficultyProfile};
pub use spawn::SpawnPolicy;
pub use state::{ItemKind, LiveItem, SessionPhase, SessionState, SpawnEvent};
pub use timers::{Scheduler, TimerHandle, TimerKind};
