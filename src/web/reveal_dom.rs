// src/web/reveal_dom.rs
//
// DOM side of the scroll reveal: element discovery, delay properties,
// the IntersectionObserver, and class toggling. All visibility
// decisions live in the core tracker.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::JsValue;
use web_sys::{
    Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::motion::MotionPreference;
use crate::reveal::{self, IntersectionUpdate, RevealAction, RevealConfig, RevealTracker};

pub const ANIMATE_SELECTOR: &str = "[data-animate]";
const DELAY_ATTR: &str = "data-delay";
const DELAY_PROP: &str = "--delay";
const VISIBLE_CLASS: &str = "is-visible";

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

pub struct RevealController {
    config: RevealConfig,
    elements: RefCell<Vec<HtmlElement>>,
    tracker: RefCell<RevealTracker>,
    observer: RefCell<Option<IntersectionObserver>>,
    callback: RefCell<Option<ObserverCallback>>,
}

impl RevealController {
    pub fn new(config: RevealConfig) -> Rc<Self> {
        Rc::new(Self {
            tracker: RefCell::new(RevealTracker::new(0, config.replay)),
            config,
            elements: RefCell::new(Vec::new()),
            observer: RefCell::new(None),
            callback: RefCell::new(None),
        })
    }

    /// Scan for animated elements and arm the watcher. Safe to call
    /// repeatedly: any previous watcher is disposed first.
    pub fn initialize(self: &Rc<Self>, preference: MotionPreference) {
        self.dispose();

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let elements = collect_animated(&document);
        if elements.is_empty() {
            log::debug!("no animated elements found");
            return;
        }

        for (index, element) in elements.iter().enumerate() {
            apply_delay(element, index, &self.config);
        }

        *self.tracker.borrow_mut() = RevealTracker::new(elements.len(), self.config.replay);
        *self.elements.borrow_mut() = elements;

        if preference.is_reduced() || !observer_supported() {
            self.force_visible();
            return;
        }

        let controller = Rc::clone(self);
        let callback: ObserverCallback = Closure::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                controller.on_entries(&entries);
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(self.config.threshold));
        options.set_root_margin(&self.config.root_margin());

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => {
                for element in self.elements.borrow().iter() {
                    observer.observe(element);
                }
                *self.observer.borrow_mut() = Some(observer);
                *self.callback.borrow_mut() = Some(callback);
            }
            Err(err) => {
                log::warn!("intersection observer rejected options: {err:?}");
                self.force_visible();
            }
        }
    }

    /// Force the static end-state: every element visible, stagger
    /// delays cleared, watcher disposed. Idempotent.
    pub fn force_visible(&self) {
        self.dispose();
        let actions = self.tracker.borrow_mut().force_all_visible();
        self.apply(&actions);
        for element in self.elements.borrow().iter() {
            let _ = element.style().remove_property(DELAY_PROP);
        }
    }

    /// Tear down the watcher. Safe to call twice.
    pub fn dispose(&self) {
        if let Some(observer) = self.observer.borrow_mut().take() {
            observer.disconnect();
        }
        self.callback.borrow_mut().take();
    }

    fn on_entries(&self, entries: &js_sys::Array) {
        let viewport_h = viewport_height();

        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let Ok(target) = entry.target().dyn_into::<HtmlElement>() else {
                continue;
            };
            let index = self.elements.borrow().iter().position(|e| *e == target);
            let Some(index) = index else {
                continue;
            };

            let intersecting = entry.is_intersecting();
            let update = IntersectionUpdate {
                index,
                intersecting,
                // The observer margin shrinks the viewport, so consult
                // the real bounding rect before treating the element as
                // scrolled away.
                outside_viewport: !intersecting && fully_outside(&target, viewport_h),
            };
            let actions = self.tracker.borrow_mut().observe(update);
            self.apply(&actions);
        }
    }

    fn apply(&self, actions: &[RevealAction]) {
        let elements = self.elements.borrow();
        for action in actions {
            match *action {
                RevealAction::Show(index) => {
                    if let Some(element) = elements.get(index) {
                        let _ = element.class_list().add_1(VISIBLE_CLASS);
                    }
                }
                RevealAction::Hide(index) => {
                    if let Some(element) = elements.get(index) {
                        let _ = element.class_list().remove_1(VISIBLE_CLASS);
                    }
                }
                RevealAction::Retire(index) => {
                    if let (Some(observer), Some(element)) =
                        (self.observer.borrow().as_ref(), elements.get(index))
                    {
                        observer.unobserve(element);
                    }
                }
            }
        }
    }
}

fn collect_animated(document: &Document) -> Vec<HtmlElement> {
    let mut out = Vec::new();
    if let Ok(list) = document.query_selector_all(ANIMATE_SELECTOR) {
        for i in 0..list.length() {
            if let Some(node) = list.get(i) {
                if let Ok(element) = node.dyn_into::<HtmlElement>() {
                    out.push(element);
                }
            }
        }
    }
    out
}

/// Assign the entrance delay custom property for one element.
///
/// An explicit `data-delay` wins; otherwise a delay already set inline
/// is respected, and the computed stagger fills the rest.
fn apply_delay(element: &HtmlElement, index: usize, config: &RevealConfig) {
    let style = element.style();
    let explicit = element.get_attribute(DELAY_ATTR);

    if explicit.is_none() {
        if let Ok(existing) = style.get_property_value(DELAY_PROP) {
            if !existing.is_empty() {
                return;
            }
        }
    }

    let delay = reveal::resolve_delay(explicit.as_deref(), index, config);
    let _ = style.set_property(DELAY_PROP, &reveal::format_delay(delay));
}

fn observer_supported() -> bool {
    web_sys::window()
        .map(|w| js_sys::Reflect::has(&w, &"IntersectionObserver".into()).unwrap_or(false))
        .unwrap_or(false)
}

fn viewport_height() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

fn fully_outside(element: &HtmlElement, viewport_height: f64) -> bool {
    let rect = element.get_bounding_client_rect();
    rect.bottom() < 0.0 || rect.top() > viewport_height
}
