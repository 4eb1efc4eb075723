//! Abstract presentation surface
//!
//! The session core drives rendering only through this trait; the concrete
//! DOM binding lives in `web` and a terminal recorder backs the native demo
//! and the tests. No gameplay rule may depend on how any of these calls are
//! realized.

use crate::session::state::SpawnEvent;

pub trait Presentation {
    /// (Re)build an empty grid of `cell_count` cells
    fn render_grid(&mut self, cell_count: usize);

    /// Display a reward/penalty item at its cell; `item_id` identifies it in
    /// later input callbacks
    fn render_spawn(&mut self, item_id: u32, event: &SpawnEvent);

    /// Remove whatever item is currently displayed
    fn clear_unresolved(&mut self);

    /// Transient floating indicator near the interaction point
    fn show_delta(&mut self, delta: i32);

    /// Refresh the displayed counters
    fn update_stats(&mut self, collected: u32, goal: u32, score: u32, time_remaining: u32);

    /// Display the end-of-session message
    fn show_outcome(&mut self, won: bool, final_score: u32, message: &str);

    /// Play a one-time visual celebration
    fn celebrate(&mut self);
}
