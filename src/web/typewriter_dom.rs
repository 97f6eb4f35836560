// src/web/typewriter_dom.rs
//
// Timer loop and text rendering for the typewriter. The session state
// machine lives in the core; this owns the Timeout handle and the
// target/cursor elements.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::motion::MotionPreference;
use crate::typewriter::{TypewriterConfig, TypewriterSession};

pub const TEXT_TARGET_ID: &str = "typed-text";
pub const CURSOR_ID: &str = "typed-cursor";
const CURSOR_ACTIVE_ATTR: &str = "data-active";

pub struct TypewriterController {
    phrases: Vec<String>,
    config: TypewriterConfig,
    target: RefCell<Option<HtmlElement>>,
    cursor: RefCell<Option<HtmlElement>>,
    session: RefCell<Option<TypewriterSession>>,
    timer: RefCell<Option<Timeout>>,
}

impl TypewriterController {
    pub fn new(phrases: Vec<String>, config: TypewriterConfig) -> Rc<Self> {
        Rc::new(Self {
            phrases,
            config,
            target: RefCell::new(None),
            cursor: RefCell::new(None),
            session: RefCell::new(None),
            timer: RefCell::new(None),
        })
    }

    /// Start the loop, cancelling any in-flight session first. Under
    /// reduced motion the first phrase is shown statically instead.
    pub fn start(self: &Rc<Self>, preference: MotionPreference) {
        self.stop(false);
        self.resolve_targets();

        let Some(target) = self.target.borrow().clone() else {
            log::debug!("typewriter target missing; nothing to animate");
            return;
        };

        if preference.is_reduced() {
            target.set_text_content(Some(self.first_phrase()));
            self.set_cursor_active(false);
            return;
        }

        let Some(session) = TypewriterSession::new(self.phrases.clone(), self.config) else {
            return;
        };
        target.set_text_content(Some(""));
        *self.session.borrow_mut() = Some(session);
        self.set_cursor_active(true);
        self.schedule(self.config.start_ms);
    }

    /// Cancel the timer and drop the session. With `preserve_text` the
    /// display resets to the first phrase and the cursor deactivates.
    pub fn stop(&self, preserve_text: bool) {
        if let Some(timer) = self.timer.borrow_mut().take() {
            timer.cancel();
        }
        self.session.borrow_mut().take();

        if preserve_text {
            if let Some(target) = self.target.borrow().as_ref() {
                target.set_text_content(Some(self.first_phrase()));
            }
            self.set_cursor_active(false);
        }
    }

    fn tick(self: &Rc<Self>) {
        let next = {
            let mut session = self.session.borrow_mut();
            let Some(session) = session.as_mut() else {
                return;
            };
            let delay = session.tick();
            if let Some(target) = self.target.borrow().as_ref() {
                target.set_text_content(Some(&session.text()));
            }
            delay
        };
        self.schedule(next);
    }

    fn schedule(self: &Rc<Self>, delay_ms: u32) {
        let controller = Rc::clone(self);
        let timeout = Timeout::new(delay_ms, move || controller.tick());
        *self.timer.borrow_mut() = Some(timeout);
    }

    fn resolve_targets(&self) {
        if self.target.borrow().is_some() {
            return;
        }
        let document = web_sys::window().and_then(|w| w.document());
        let lookup = |id: &str| {
            document
                .as_ref()
                .and_then(|d| d.get_element_by_id(id))
                .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        };
        *self.target.borrow_mut() = lookup(TEXT_TARGET_ID);
        *self.cursor.borrow_mut() = lookup(CURSOR_ID);
    }

    fn first_phrase(&self) -> &str {
        self.phrases.first().map(String::as_str).unwrap_or("")
    }

    fn set_cursor_active(&self, active: bool) {
        if let Some(cursor) = self.cursor.borrow().as_ref() {
            if active {
                let _ = cursor.set_attribute(CURSOR_ACTIVE_ATTR, "true");
            } else {
                let _ = cursor.remove_attribute(CURSOR_ACTIVE_ATTR);
            }
        }
    }
}
