// src/web/motion_gate.rs
//
// Reduced-motion media query wrapper.

use std::cell::RefCell;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{MediaQueryList, MediaQueryListEvent};

use crate::motion::MotionPreference;

const QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Owns the `prefers-reduced-motion` query and its change subscription.
///
/// Subscription goes through `addEventListener` where available, with a
/// fallback to the legacy `addListener` API for older engines. The
/// listener handle is owned here; dropping the gate detaches it.
pub struct MotionGate {
    query: Option<MediaQueryList>,
    modern: RefCell<Option<EventListener>>,
    legacy: RefCell<Option<Closure<dyn FnMut(MediaQueryListEvent)>>>,
}

impl MotionGate {
    pub fn new() -> Self {
        let query = web_sys::window().and_then(|w| w.match_media(QUERY).ok().flatten());
        if query.is_none() {
            log::debug!("matchMedia unavailable; assuming no motion preference");
        }
        Self {
            query,
            modern: RefCell::new(None),
            legacy: RefCell::new(None),
        }
    }

    /// Current preference. Absent query support reads as no preference.
    pub fn preference(&self) -> MotionPreference {
        let matches = self.query.as_ref().map(|q| q.matches()).unwrap_or(false);
        MotionPreference::from_matches(matches)
    }

    /// Subscribe to preference changes. Replaces any prior subscription.
    pub fn subscribe(&self, mut on_change: impl FnMut(MotionPreference) + 'static) {
        let Some(query) = &self.query else {
            return;
        };

        let has_modern =
            js_sys::Reflect::has(query, &"addEventListener".into()).unwrap_or(false);

        if has_modern {
            let listener = EventListener::new(query, "change", move |event| {
                let matches = event
                    .dyn_ref::<MediaQueryListEvent>()
                    .map(|e| e.matches())
                    .unwrap_or(false);
                on_change(MotionPreference::from_matches(matches));
            });
            *self.modern.borrow_mut() = Some(listener);
        } else {
            let closure = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
                move |event: MediaQueryListEvent| {
                    on_change(MotionPreference::from_matches(event.matches()));
                },
            );
            let _ = query.add_listener_with_opt_callback(Some(closure.as_ref().unchecked_ref()));
            *self.legacy.borrow_mut() = Some(closure);
        }
    }

    /// Detach the change subscription. Safe to call twice.
    pub fn dispose(&self) {
        self.modern.borrow_mut().take();
        if let Some(closure) = self.legacy.borrow_mut().take() {
            if let Some(query) = &self.query {
                let _ =
                    query.remove_listener_with_opt_callback(Some(closure.as_ref().unchecked_ref()));
            }
        }
    }
}

impl Default for MotionGate {
    fn default() -> Self {
        Self::new()
    }
}
