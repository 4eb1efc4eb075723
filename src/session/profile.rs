//! Difficulty presets
//!
//! A profile is immutable once a session starts; exactly one is active per
//! play-through.

use serde::{Deserialize, Serialize};

/// Named difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// The fixed profile for this difficulty
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                name: *self,
                duration_seconds: 40,
                spawn_interval_ms: 1000,
                goal_points: 15,
                penalty_per_hit: 3,
            },
            Difficulty::Normal => DifficultyProfile {
                name: *self,
                duration_seconds: 30,
                spawn_interval_ms: 900,
                goal_points: 20,
                penalty_per_hit: 5,
            },
            Difficulty::Hard => DifficultyProfile {
                name: *self,
                duration_seconds: 20,
                spawn_interval_ms: 700,
                goal_points: 25,
                penalty_per_hit: 7,
            },
        }
    }
}

/// Session parameters fixed at start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub name: Difficulty,
    /// Countdown length in seconds
    pub duration_seconds: u32,
    /// Spawn tick interval
    pub spawn_interval_ms: u32,
    /// Reward items needed to win (a count, independent of score deductions)
    pub goal_points: u32,
    /// Score subtracted per penalty hit, clamped at zero
    pub penalty_per_hit: u32,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::Normal.profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_roundtrip() {
        for d in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_preset_values() {
        let normal = Difficulty::Normal.profile();
        assert_eq!(normal.duration_seconds, 30);
        assert_eq!(normal.spawn_interval_ms, 900);
        assert_eq!(normal.goal_points, 20);
        assert_eq!(normal.penalty_per_hit, 5);

        // Harder presets trade time for goal size
        let easy = Difficulty::Easy.profile();
        let hard = Difficulty::Hard.profile();
        assert!(easy.duration_seconds > hard.duration_seconds);
        assert!(easy.goal_points < hard.goal_points);
        assert!(easy.spawn_interval_ms > hard.spawn_interval_ms);
    }
}
