//! Browser bindings via wasm-bindgen.
//!
//! This module is only compiled when the `web` feature is enabled.
//!
//! # Usage
//!
//! Build with wasm-pack:
//! ```bash
//! wasm-pack build --target web --features web
//! ```
//!
//! # JavaScript Example
//!
//! ```javascript
//! import init, { vitrine_init, Vitrine } from './vitrine.js';
//!
//! await init();
//! vitrine_init();
//!
//! // Boots on construction; waits for DOMContentLoaded if needed.
//! const page = new Vitrine();
//!
//! // Or pick a reveal profile: "standard", "hero", or "replay"
//! const hero = Vitrine.with_reveal_profile("hero");
//! ```

mod motion_gate;
mod reveal_dom;
mod tilt_dom;
mod typewriter_dom;

pub use motion_gate::MotionGate;
pub use reveal_dom::RevealController;
pub use tilt_dom::TiltController;
pub use typewriter_dom::TypewriterController;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;

use crate::reveal::RevealConfig;
use crate::typewriter::TypewriterConfig;

const YEAR_ID: &str = "year";
const YEAR_DONE_ATTR: &str = "data-filled";

/// Phrase rotation for the typewriter line.
const PHRASES: [&str; 3] = [
    "Software engineer.",
    "Open-source tinkerer.",
    "Occasional writer.",
];

// ═══════════════════════════════════════════════════════════════════════════
// Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize the wasm module. Call this once before using any other
/// functions. Sets up panic hooks and console logging.
#[wasm_bindgen]
pub fn vitrine_init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).ok();
}

// ═══════════════════════════════════════════════════════════════════════════
// Page wiring
// ═══════════════════════════════════════════════════════════════════════════

struct App {
    gate: MotionGate,
    reveal: Rc<RevealController>,
    typewriter: Rc<TypewriterController>,
    tilt: Rc<TiltController>,
    ready: RefCell<Option<EventListener>>,
}

impl App {
    fn new(reveal_config: RevealConfig) -> Rc<Self> {
        Rc::new(Self {
            gate: MotionGate::new(),
            reveal: RevealController::new(reveal_config),
            typewriter: TypewriterController::new(
                PHRASES.iter().map(|p| p.to_string()).collect(),
                TypewriterConfig::default(),
            ),
            tilt: TiltController::new(),
            ready: RefCell::new(None),
        })
    }

    /// Boot now, or defer to DOMContentLoaded while the document is
    /// still loading.
    fn mount(self: &Rc<Self>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if document.ready_state() == "loading" {
            let app = Rc::clone(self);
            let listener = EventListener::once(&document, "DOMContentLoaded", move |_| {
                app.ready.borrow_mut().take();
                app.boot();
            });
            *self.ready.borrow_mut() = Some(listener);
        } else {
            self.boot();
        }
    }

    fn boot(self: &Rc<Self>) {
        stamp_year();

        let preference = self.gate.preference();
        log::debug!("booting with motion preference {preference:?}");

        self.reveal.initialize(preference);
        self.typewriter.start(preference);
        self.tilt.initialize(preference);

        let reveal = Rc::clone(&self.reveal);
        let typewriter = Rc::clone(&self.typewriter);
        let tilt = Rc::clone(&self.tilt);
        self.gate.subscribe(move |preference| {
            if preference.is_reduced() {
                reveal.force_visible();
                typewriter.stop(true);
                tilt.force_reset();
            } else {
                reveal.initialize(preference);
                typewriter.start(preference);
                tilt.initialize(preference);
            }
        });
    }

    fn dispose(&self) {
        self.gate.dispose();
        self.reveal.dispose();
        self.typewriter.stop(false);
        self.tilt.dispose();
        self.ready.borrow_mut().take();
    }
}

/// Stamp the current year into `#year`, marking completion.
fn stamp_year() {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(YEAR_ID))
    else {
        return;
    };
    let year = js_sys::Date::new_0().get_full_year();
    element.set_text_content(Some(&year.to_string()));
    let _ = element.set_attribute(YEAR_DONE_ATTR, "true");
}

// ═══════════════════════════════════════════════════════════════════════════
// Exported handle
// ═══════════════════════════════════════════════════════════════════════════

/// Page-level handle owning all three controllers and the motion gate.
///
/// Construction boots the page (DOM-ready aware). Keep the handle
/// alive for the lifetime of the page; `dispose` tears everything
/// down explicitly.
#[wasm_bindgen]
pub struct Vitrine {
    app: Rc<App>,
}

#[wasm_bindgen]
impl Vitrine {
    /// Mount with the standard reveal profile.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Vitrine {
        Vitrine::with_reveal_profile("standard")
    }

    /// Mount with a named reveal profile: `"standard"`, `"hero"`, or
    /// `"replay"`. Unknown names fall back to standard.
    pub fn with_reveal_profile(profile: &str) -> Vitrine {
        let config = match profile {
            "hero" => RevealConfig::hero(),
            "replay" => RevealConfig::replay(),
            "standard" => RevealConfig::standard(),
            other => {
                log::debug!("unknown reveal profile {other:?}, using standard");
                RevealConfig::standard()
            }
        };
        let app = App::new(config);
        app.mount();
        Vitrine { app }
    }

    /// Tear down watchers, timers, and listeners. Safe to call twice.
    pub fn dispose(&self) {
        self.app.dispose();
    }
}
