//! One-shot win celebration
//!
//! Scatters colored squares from the upper third of the viewport. Each piece
//! gets randomized CSS custom properties and the `fall` class on the next
//! frame; the stylesheet drives the actual motion.

use rand::Rng;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::dom::{after_ms, next_frame};

const COLORS: [&str; 5] = ["#2E9DF7", "#FF9F1C", "#7ED957", "#FFD6E0", "#6C5CE7"];
const PIECE_COUNT: usize = 28;
const REMOVE_MS: i32 = 2200;

pub fn fire<R: Rng>(document: &Document, rng: &mut R) {
    let Some(body) = document.body() else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0);

    for _ in 0..PIECE_COUNT {
        let Ok(el) = document.create_element("div") else {
            continue;
        };
        el.set_class_name("confetti");
        let Ok(el) = el.dyn_into::<HtmlElement>() else {
            continue;
        };

        let style = el.style();
        let color = COLORS[rng.random_range(0..COLORS.len())];
        let x = width / 2.0 + rng.random_range(-100.0..100.0);
        let y = height / 3.0 + rng.random_range(-20.0..20.0);
        let _ = style.set_property("background", color);
        let _ = style.set_property("left", &format!("{x:.0}px"));
        let _ = style.set_property("top", &format!("{y:.0}px"));
        let _ = style.set_property("--dx", &format!("{:.0}px", rng.random_range(-300.0..300.0)));
        let _ = style.set_property(
            "--dy",
            &format!("{:.0}px", 400.0 + rng.random_range(0.0..200.0)),
        );
        let _ = style.set_property("--rot", &format!("{:.0}deg", rng.random_range(-360.0..360.0)));
        let _ = style.set_property("--dur", &format!("{}ms", 1500 + rng.random_range(0..800)));

        let _ = body.append_child(&el);

        let falling = el.clone();
        next_frame(move |_| {
            let _ = falling.class_list().add_1("fall");
        });
        after_ms(REMOVE_MS, move || el.remove());
    }
}
