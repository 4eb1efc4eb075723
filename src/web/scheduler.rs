//! Browser timer source
//!
//! Maps the `Scheduler` trait onto `setInterval`/`clearInterval`. Interval
//! callbacks reach back into the game through a `Weak` reference, so a timer
//! the browser fires after teardown simply does nothing.

use std::cell::RefCell;
use std::rc::Weak;

use wasm_bindgen::prelude::*;

use crate::session::{Scheduler, TimerHandle, TimerKind};

use super::Game;

pub struct WebScheduler {
    game: Weak<RefCell<Game>>,
}

impl WebScheduler {
    pub fn new() -> Self {
        Self { game: Weak::new() }
    }

    /// Wire the shared game in after construction; `every` is inert until
    /// this is called
    pub fn bind(&mut self, game: Weak<RefCell<Game>>) {
        self.game = game;
    }
}

impl Default for WebScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for WebScheduler {
    fn every(&mut self, kind: TimerKind, interval_ms: u32) -> TimerHandle {
        let Some(window) = web_sys::window() else {
            return TimerHandle(0);
        };

        let game = self.game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(game) = game.upgrade() {
                let mut g = game.borrow_mut();
                match kind {
                    TimerKind::Spawn => g.controller.on_spawn_tick(),
                    TimerKind::Countdown => g.controller.on_countdown_tick(),
                }
            }
        });

        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                interval_ms as i32,
            )
            .unwrap_or(0);
        closure.forget();

        TimerHandle(id)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if handle.0 == 0 {
            return;
        }
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(handle.0);
        }
    }
}
