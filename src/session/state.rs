//! Session state and core types
//!
//! One `SessionState` per play-through, created fresh on every start; the
//! controller is the only mutator.

use serde::{Deserialize, Serialize};

use super::profile::DifficultyProfile;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionPhase {
    /// Before the first start, or after a reset
    #[default]
    Idle,
    /// Between start and end; timers are live
    Running,
    /// After end; stats stay on screen until the next start
    Ended,
}

/// What a spawn tick produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Water can: collecting it raises score and the win counter
    Reward,
    /// Oil tank: hitting it costs score, never the win counter
    Penalty,
}

/// A single spawn decision, consumed immediately by the presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnEvent {
    pub kind: ItemKind,
    /// Grid cell the item appears in
    pub cell_index: usize,
}

/// The one item currently on the grid, if any
///
/// `resolved` stays set until the next spawn tick clears the item, so a
/// double click on the same id changes state only once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveItem {
    pub id: u32,
    pub kind: ItemKind,
    pub cell: usize,
    pub resolved: bool,
}

/// Mutable per-session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: SessionPhase,
    /// Reward items collected; only increases while Running
    pub collected: u32,
    /// Never negative: penalties subtract with saturation
    pub score: u32,
    /// Seconds left on the countdown
    pub time_remaining: u32,
    /// Fixed for the session at start
    pub profile: DifficultyProfile,
}

impl SessionState {
    /// Fresh state for a new session
    pub fn new(profile: DifficultyProfile) -> Self {
        Self {
            phase: SessionPhase::Running,
            collected: 0,
            score: 0,
            time_remaining: profile.duration_seconds,
            profile,
        }
    }

    /// Idle state showing a profile's goal and duration, nothing running
    pub fn idle(profile: DifficultyProfile) -> Self {
        Self {
            phase: SessionPhase::Idle,
            collected: 0,
            score: 0,
            time_remaining: profile.duration_seconds,
            profile,
        }
    }

    #[inline]
    pub fn active(&self) -> bool {
        self.phase == SessionPhase::Running
    }
}
