//! DOM presentation binding
//!
//! Implements the `Presentation` trait over the page's grid, counters, and
//! popup elements. Item buttons report activation back into the controller
//! through a `Weak` game reference; missing elements are tolerated silently,
//! the page just shows less.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent};

use crate::presentation::Presentation;
use crate::session::{ItemKind, SpawnEvent};

use super::{Game, confetti};

/// Fade applied by `clear_unresolved` before the wrapper is dropped
const FADE_OUT_MS: i32 = 280;
/// How long a collected can lingers while its animation plays
const COLLECT_REMOVE_MS: i32 = 300;
/// Same for a hit oil tank
const HIT_REMOVE_MS: i32 = 360;
const POPUP_VISIBLE_MS: i32 = 700;
const POPUP_REMOVE_MS: i32 = 900;

pub struct DomPresentation {
    document: Document,
    game: Weak<RefCell<Game>>,
    /// Last pointer position, used to anchor score popups
    pointer: Rc<Cell<Option<(i32, i32)>>>,
    /// Visual-only randomness (confetti scatter)
    rng: Pcg32,
}

impl DomPresentation {
    pub fn new(document: Document, seed: u64) -> Self {
        Self {
            document,
            game: Weak::new(),
            pointer: Rc::new(Cell::new(None)),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Wire the shared game in after construction; item buttons are inert
    /// until this is called
    pub fn bind(&mut self, game: Weak<RefCell<Game>>) {
        self.game = game;
    }

    fn set_text(&self, id: &str, value: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(value));
        }
    }

    /// Attach click + keyboard activation to an item button
    fn wire_item(&self, button: &Element, item_id: u32, kind: ItemKind) {
        {
            let game = self.game.clone();
            let pointer = self.pointer.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |ev: MouseEvent| {
                pointer.set(Some((ev.client_x(), ev.client_y())));
                if let Some(game) = game.upgrade() {
                    let mut g = game.borrow_mut();
                    match kind {
                        ItemKind::Reward => g.controller.on_collect(item_id),
                        ItemKind::Penalty => g.controller.on_penalty_hit(item_id),
                    }
                }
            });
            let _ =
                button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = self.game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |ev: KeyboardEvent| {
                let key = ev.key();
                if key == "Enter" || key == " " {
                    ev.prevent_default();
                    if let Some(game) = game.upgrade() {
                        let mut g = game.borrow_mut();
                        match kind {
                            ItemKind::Reward => g.controller.on_collect(item_id),
                            ItemKind::Penalty => g.controller.on_penalty_hit(item_id),
                        }
                    }
                }
            });
            let _ = button
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn popup_anchor(&self) -> (i32, i32) {
        if let Some(coords) = self.pointer.get() {
            return coords;
        }
        // No pointer seen yet (keyboard play): center of the viewport
        let window = web_sys::window();
        let dim = |v: Option<Result<JsValue, JsValue>>| {
            v.and_then(|r| r.ok()).and_then(|v| v.as_f64()).unwrap_or(0.0) as i32
        };
        (
            dim(window.as_ref().map(|w| w.inner_width())) / 2,
            dim(window.as_ref().map(|w| w.inner_height())) / 2,
        )
    }
}

impl Presentation for DomPresentation {
    fn render_grid(&mut self, cell_count: usize) {
        let Some(grid) = self.document.query_selector(".game-grid").ok().flatten() else {
            return;
        };
        grid.set_inner_html("");
        for _ in 0..cell_count {
            if let Ok(cell) = self.document.create_element("div") {
                cell.set_class_name("grid-cell");
                let _ = cell.set_attribute("role", "button");
                let _ = cell.set_attribute("tabindex", "0");
                let _ = grid.append_child(&cell);
            }
        }
    }

    fn render_spawn(&mut self, item_id: u32, event: &SpawnEvent) {
        let Ok(cells) = self.document.query_selector_all(".grid-cell") else {
            return;
        };
        let Some(cell) = cells
            .item(event.cell_index as u32)
            .and_then(|n| n.dyn_into::<Element>().ok())
        else {
            return;
        };

        let Ok(wrapper) = self.document.create_element("div") else {
            return;
        };
        wrapper.set_class_name("item-wrapper spawn");

        let Ok(button) = self.document.create_element("button") else {
            return;
        };
        let (class, label, glyph) = match event.kind {
            ItemKind::Reward => ("water-can", "Collect can", "\u{1F4A7}"),
            ItemKind::Penalty => ("oil-tank", "Oil tank - avoid", "\u{1F6E2}\u{FE0F}"),
        };
        button.set_class_name(class);
        let _ = button.set_attribute("aria-label", label);
        button.set_text_content(Some(glyph));
        self.wire_item(&button, item_id, event.kind);

        let _ = wrapper.append_child(&button);
        let _ = cell.append_child(&wrapper);

        // Let the element hit the DOM in its "spawn" state, then release the
        // class so the CSS transition plays
        let spawned = wrapper.clone();
        next_frame(move |_| {
            let _ = spawned.class_list().remove_1("spawn");
        });
    }

    fn clear_unresolved(&mut self) {
        let Ok(wrappers) = self.document.query_selector_all(".item-wrapper") else {
            return;
        };
        for i in 0..wrappers.length() {
            if let Some(el) = wrappers.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                let _ = el.class_list().add_1("fade-out");
                after_ms(FADE_OUT_MS, move || el.remove());
            }
        }
    }

    fn show_delta(&mut self, delta: i32) {
        let negative = delta < 0;

        // Resolution animation on the item that was just activated
        if let Ok(Some(button)) = self.document.query_selector(".item-wrapper button") {
            let (class, remove_ms) = if negative {
                ("hit", HIT_REMOVE_MS)
            } else {
                ("collected", COLLECT_REMOVE_MS)
            };
            let _ = button.class_list().add_1(class);
            after_ms(remove_ms, move || button.remove());
        }

        // Floating popup at the interaction point
        let Ok(popup) = self.document.create_element("div") else {
            return;
        };
        popup.set_class_name(if negative {
            "score-popup negative"
        } else {
            "score-popup"
        });
        popup.set_text_content(Some(&format!("{delta:+}")));

        let Ok(popup) = popup.dyn_into::<HtmlElement>() else {
            return;
        };
        let (x, y) = self.popup_anchor();
        let _ = popup.style().set_property("left", &format!("{}px", x - 20));
        let _ = popup.style().set_property("top", &format!("{}px", y - 30));

        if let Some(body) = self.document.body() {
            let _ = body.append_child(&popup);
        }

        let visible = popup.clone();
        next_frame(move |_| {
            let _ = visible.class_list().add_1("visible");
        });
        let fading = popup.clone();
        after_ms(POPUP_VISIBLE_MS, move || {
            let _ = fading.class_list().remove_1("visible");
        });
        after_ms(POPUP_REMOVE_MS, move || popup.remove());
    }

    fn update_stats(&mut self, collected: u32, goal: u32, score: u32, time_remaining: u32) {
        self.set_text("current-cans", &collected.to_string());
        self.set_text("goal-cans", &goal.to_string());
        self.set_text("score", &score.to_string());
        self.set_text("timer", &time_remaining.to_string());
    }

    fn show_outcome(&mut self, _won: bool, final_score: u32, message: &str) {
        self.set_text(
            "achievements",
            &format!("{message} You scored {final_score} points."),
        );
    }

    fn celebrate(&mut self) {
        confetti::fire(&self.document, &mut self.rng);
    }
}

/// Run `f` on the next animation frame
pub fn next_frame<F: FnOnce(f64) + 'static>(f: F) {
    if let Some(window) = web_sys::window() {
        let cb = Closure::once_into_js(f);
        let _ = window.request_animation_frame(cb.unchecked_ref());
    }
}

/// Run `f` after `delay_ms`
pub fn after_ms<F: FnOnce() + 'static>(delay_ms: i32, f: F) {
    if let Some(window) = web_sys::window() {
        let cb = Closure::once_into_js(f);
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay_ms);
    }
}
