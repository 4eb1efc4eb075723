//! Browser bootstrap
//!
//! Builds the shared game, binds the DOM presentation and interval scheduler
//! to it, and wires the page controls (start/reset buttons, difficulty
//! select, keyboard shortcuts).

pub mod confetti;
pub mod dom;
pub mod scheduler;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlSelectElement, KeyboardEvent, MouseEvent};

use crate::consts::CELL_COUNT;
use crate::session::{Difficulty, DifficultyProfile, SessionController, SpawnPolicy};
use crate::settings::Settings;

use dom::DomPresentation;
use scheduler::WebScheduler;

/// Shared game instance behind the event callbacks
pub struct Game {
    pub controller: SessionController<DomPresentation, WebScheduler>,
}

pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Water Rush starting...");

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let settings = Settings::load();
    let seed = js_sys::Date::now() as u64;

    let presentation = DomPresentation::new(document.clone(), seed ^ 0x5DEECE66D);
    let controller =
        SessionController::new(presentation, WebScheduler::new(), SpawnPolicy::default(), seed);
    let game = Rc::new(RefCell::new(Game { controller }));

    // The presentation and scheduler call back into the game they live in,
    // so they get a weak reference once the Rc exists
    let weak = Rc::downgrade(&game);
    {
        let mut g = game.borrow_mut();
        g.controller.presentation_mut().bind(weak.clone());
        g.controller.scheduler_mut().bind(weak);
    }

    log::info!("Game initialized with seed: {seed}");

    // Preselect the remembered difficulty before reading it back
    if let Some(select) = difficulty_select(&document) {
        select.set_value(settings.difficulty.as_str());
    }

    // Initial empty grid and zeroed stats for the selected profile
    {
        let mut g = game.borrow_mut();
        g.controller.presentation_mut().render_grid(CELL_COUNT);
        let profile = selected_profile(&document);
        g.controller.reset(profile);
    }

    setup_start_button(&document, game.clone());
    setup_reset_button(&document, game.clone());
    setup_difficulty_select(&document, game.clone());
    setup_keyboard(&document, game);

    log::info!("Water Rush running!");
}

fn difficulty_select(document: &Document) -> Option<HtmlSelectElement> {
    document
        .get_element_by_id("difficulty")
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
}

/// Profile for whatever the difficulty select currently shows
fn selected_profile(document: &Document) -> DifficultyProfile {
    difficulty_select(document)
        .and_then(|select| Difficulty::from_str(&select.value()))
        .unwrap_or_default()
        .profile()
}

fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) {
    if let Some(btn) = document.get_element_by_id("start-game") {
        let document = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_ev: MouseEvent| {
            let profile = selected_profile(&document);
            game.borrow_mut().controller.start(profile);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn setup_reset_button(document: &Document, game: Rc<RefCell<Game>>) {
    if let Some(btn) = document.get_element_by_id("reset-game") {
        let document = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_ev: MouseEvent| {
            if let Some(el) = document.get_element_by_id("achievements") {
                el.set_text_content(Some(""));
            }
            let profile = selected_profile(&document);
            game.borrow_mut().controller.reset(profile);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn setup_difficulty_select(document: &Document, game: Rc<RefCell<Game>>) {
    if let Some(select) = difficulty_select(document) {
        let document = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_ev: web_sys::Event| {
            let difficulty = difficulty_select(&document)
                .and_then(|s| Difficulty::from_str(&s.value()))
                .unwrap_or_default();
            Settings { difficulty }.save();

            // Refresh the displayed goal/timer while nothing is running
            let mut g = game.borrow_mut();
            if !g.controller.state().active() {
                g.controller.reset(difficulty.profile());
            }
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn setup_keyboard(document: &Document, game: Rc<RefCell<Game>>) {
    let doc = document.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |ev: KeyboardEvent| {
        let key = ev.key();
        if key != "Enter" && key != " " {
            return;
        }
        let focused_start = doc
            .active_element()
            .map(|el| el.id() == "start-game")
            .unwrap_or(false);
        if focused_start && !game.borrow().controller.state().active() {
            let profile = selected_profile(&doc);
            game.borrow_mut().controller.start(profile);
        }
    });
    let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
