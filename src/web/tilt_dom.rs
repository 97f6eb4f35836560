// src/web/tilt_dom.rs
//
// Pointer wiring for the portrait tilt. Geometry and the two-phase
// reset live in the core; this owns the listeners, the frame handle,
// and the style writes.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{AnimationFrame, request_animation_frame};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, PointerEvent};

use crate::motion::MotionPreference;
use crate::tilt::{ElementBounds, MAX_TILT_DEG, TiltAngles, TiltMotion, tilt_angles};

pub const TILT_SELECTOR: &str = "[data-tilt]";
const TILTING_ATTR: &str = "data-tilting";
const TILT_X_PROP: &str = "--tilt-x";
const TILT_Y_PROP: &str = "--tilt-y";

pub struct TiltController {
    element: RefCell<Option<HtmlElement>>,
    motion: RefCell<TiltMotion>,
    listeners: RefCell<Vec<EventListener>>,
    frame: RefCell<Option<AnimationFrame>>,
    pending: Cell<Option<(f64, f64)>>,
    installed: Cell<bool>,
    suspended: Cell<bool>,
}

impl TiltController {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            element: RefCell::new(None),
            motion: RefCell::new(TiltMotion::new()),
            listeners: RefCell::new(Vec::new()),
            frame: RefCell::new(None),
            pending: Cell::new(None),
            installed: Cell::new(false),
            suspended: Cell::new(false),
        })
    }

    /// One-time listener install, skipped entirely under reduced
    /// motion. Re-invocation only clears a prior suspension.
    pub fn initialize(self: &Rc<Self>, preference: MotionPreference) {
        if preference.is_reduced() {
            return;
        }
        self.suspended.set(false);
        if self.installed.get() {
            return;
        }

        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(TILT_SELECTOR).ok().flatten())
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let Some(element) = element else {
            log::debug!("tilt element missing; controller disabled");
            return;
        };
        *self.element.borrow_mut() = Some(element.clone());
        self.installed.set(true);

        let mut listeners = self.listeners.borrow_mut();

        for kind in ["pointerenter", "pointermove"] {
            let controller = Rc::clone(self);
            listeners.push(EventListener::new(&element, kind, move |event| {
                if let Some(event) = event.dyn_ref::<PointerEvent>() {
                    controller.on_move(event);
                }
            }));
        }

        for kind in ["pointerleave", "pointercancel", "pointerup"] {
            let controller = Rc::clone(self);
            listeners.push(EventListener::new(&element, kind, move |_event| {
                controller.on_release();
            }));
        }
    }

    /// Immediate reset for a mid-interaction preference change. The
    /// controller stays suspended until re-initialized.
    pub fn force_reset(&self) {
        self.suspended.set(true);
        self.frame.borrow_mut().take();
        self.pending.set(None);
        {
            let mut motion = self.motion.borrow_mut();
            motion.release();
            motion.settle();
        }
        self.write_angles(TiltAngles::default());
        if let Some(element) = self.element.borrow().as_ref() {
            let _ = element.remove_attribute(TILTING_ATTR);
        }
    }

    /// Drop listeners and pending work. Safe to call twice.
    pub fn dispose(&self) {
        self.force_reset();
        self.listeners.borrow_mut().clear();
        self.installed.set(false);
        self.element.borrow_mut().take();
    }

    fn on_move(self: &Rc<Self>, event: &PointerEvent) {
        if self.suspended.get() {
            return;
        }
        // No touch tilt
        if event.pointer_type() != "mouse" {
            return;
        }

        self.pending
            .set(Some((event.client_x() as f64, event.client_y() as f64)));
        if self.frame.borrow().is_some() {
            return;
        }

        let controller = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            controller.frame.borrow_mut().take();
            controller.apply_pending();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn apply_pending(&self) {
        let Some((x, y)) = self.pending.take() else {
            return;
        };
        let Some(element) = self.element.borrow().clone() else {
            return;
        };

        let rect = element.get_bounding_client_rect();
        let bounds = ElementBounds {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        };
        let angles = self
            .motion
            .borrow_mut()
            .point(tilt_angles(x, y, &bounds, MAX_TILT_DEG));
        self.write_angles(angles);
        let _ = element.set_attribute(TILTING_ATTR, "true");
    }

    fn on_release(self: &Rc<Self>) {
        // Drop any coalesced move before it renders
        self.frame.borrow_mut().take();
        self.pending.set(None);

        let angles = self.motion.borrow_mut().release();
        self.write_angles(angles);

        // Marker comes off a frame later so the reset transition renders
        let controller = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            controller.frame.borrow_mut().take();
            if controller.motion.borrow_mut().settle() {
                if let Some(element) = controller.element.borrow().as_ref() {
                    let _ = element.remove_attribute(TILTING_ATTR);
                }
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn write_angles(&self, angles: TiltAngles) {
        if let Some(element) = self.element.borrow().as_ref() {
            let style = element.style();
            let _ = style.set_property(TILT_X_PROP, &format!("{:.2}deg", angles.x));
            let _ = style.set_property(TILT_Y_PROP, &format!("{:.2}deg", angles.y));
        }
    }
}
