// src/lib.rs
//
// Presentation behaviors for a personal site: scroll reveals, a
// typewriter line, and a pointer-driven portrait tilt, all gated by
// the reduced-motion preference.
//
// The core modules are host-agnostic state machines; the `web` feature
// wires them to the DOM through wasm-bindgen.

pub mod motion;
pub mod reveal;
pub mod tilt;
pub mod typewriter;

#[cfg(feature = "web")]
pub mod web;

// Re-export key types for Rust consumers
pub use motion::MotionPreference;
pub use reveal::{ReplayMode, RevealConfig, RevealTracker};
pub use tilt::{MAX_TILT_DEG, TiltAngles, TiltMotion};
pub use typewriter::{TypewriterConfig, TypewriterSession};
