//! Water Rush entry point
//!
//! On wasm32 this hands off to the browser bootstrap; natively it runs a
//! headless scripted session so the core can be exercised without a browser.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    water_rush::web::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use water_rush::presentation::Presentation;
    use water_rush::session::state::SpawnEvent;
    use water_rush::session::{
        Difficulty, ItemKind, Scheduler, SessionController, SpawnPolicy, TimerHandle, TimerKind,
    };

    struct ConsolePresentation;

    impl Presentation for ConsolePresentation {
        fn render_grid(&mut self, cell_count: usize) {
            log::info!("grid rebuilt with {cell_count} cells");
        }
        fn render_spawn(&mut self, item_id: u32, event: &SpawnEvent) {
            log::debug!(
                "spawn #{item_id}: {:?} in cell {}",
                event.kind,
                event.cell_index
            );
        }
        fn clear_unresolved(&mut self) {}
        fn show_delta(&mut self, delta: i32) {
            log::debug!("score delta {delta:+}");
        }
        fn update_stats(&mut self, collected: u32, goal: u32, score: u32, time_remaining: u32) {
            log::debug!("{collected}/{goal} collected, score {score}, {time_remaining}s left");
        }
        fn show_outcome(&mut self, won: bool, final_score: u32, message: &str) {
            let result = if won { "WIN" } else { "LOSS" };
            log::info!("[{result}] {message} You scored {final_score} points.");
        }
        fn celebrate(&mut self) {
            log::info!("confetti!");
        }
    }

    /// Ticks are driven by the loop below, so scheduling is a no-op
    struct NullScheduler;

    impl Scheduler for NullScheduler {
        fn every(&mut self, _kind: TimerKind, _interval_ms: u32) -> TimerHandle {
            TimerHandle(0)
        }
        fn cancel(&mut self, _handle: TimerHandle) {}
    }

    env_logger::init();
    log::info!("Water Rush (headless demo) - run with `trunk serve` for the web version");

    let mut controller = SessionController::new(
        ConsolePresentation,
        NullScheduler,
        SpawnPolicy::default(),
        2024,
    );
    controller.start(Difficulty::Normal.profile());

    // One spawn and one countdown tick per iteration, resolving every item
    // the moment it appears
    while controller.state().active() {
        if let Some(item) = controller.live_item().copied() {
            match item.kind {
                ItemKind::Reward => controller.on_collect(item.id),
                ItemKind::Penalty => controller.on_penalty_hit(item.id),
            }
        }
        controller.on_spawn_tick();
        controller.on_countdown_tick();
    }
}
