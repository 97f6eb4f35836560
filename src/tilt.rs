// src/tilt.rs
//
// Pointer-driven parallax tilt.
//
// Pure geometry plus the two-phase reset machine. The web layer feeds
// pointer coordinates and bounding rects in, and applies the returned
// angles as style state on animation frames.

/// Maximum tilt magnitude per axis, in degrees.
pub const MAX_TILT_DEG: f32 = 8.0;

/// Rotation applied to the tilted element.
///
/// `x` rotates around the horizontal axis (pointer above center tips
/// the top away), `y` around the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltAngles {
    pub x: f32,
    pub y: f32,
}

/// Element bounds in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Map a pointer position to tilt angles.
///
/// The offset from the element center is normalized to [-1, 1] per
/// axis (clamped, so pointer capture outside the bounds stays sane)
/// and scaled by `max_deg`. The vertical sign is inverted: a pointer
/// near the top edge produces a positive x rotation.
pub fn tilt_angles(client_x: f64, client_y: f64, bounds: &ElementBounds, max_deg: f32) -> TiltAngles {
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return TiltAngles::default();
    }

    let norm_x = (((client_x - bounds.left) / bounds.width) * 2.0 - 1.0).clamp(-1.0, 1.0);
    let norm_y = (((client_y - bounds.top) / bounds.height) * 2.0 - 1.0).clamp(-1.0, 1.0);

    TiltAngles {
        x: -(norm_y as f32) * max_deg,
        y: (norm_x as f32) * max_deg,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TiltPhase {
    Idle,

    /// Pointer over the element, angles live.
    Tilting,

    /// Angles reset to zero; the active marker comes off on the next
    /// frame so the reset transition gets a chance to render.
    Settling,
}

/// Two-phase tilt state machine.
#[derive(Debug)]
pub struct TiltMotion {
    phase: TiltPhase,
    angles: TiltAngles,
}

impl TiltMotion {
    pub fn new() -> Self {
        Self {
            phase: TiltPhase::Idle,
            angles: TiltAngles::default(),
        }
    }

    pub fn angles(&self) -> TiltAngles {
        self.angles
    }

    /// Whether the active marker should currently be present.
    pub fn is_active(&self) -> bool {
        self.phase == TiltPhase::Tilting || self.phase == TiltPhase::Settling
    }

    /// Pointer moved: record the new angles.
    pub fn point(&mut self, angles: TiltAngles) -> TiltAngles {
        self.phase = TiltPhase::Tilting;
        self.angles = angles;
        angles
    }

    /// Pointer left (or interaction was cancelled): zero both angles
    /// immediately and enter the settling phase.
    pub fn release(&mut self) -> TiltAngles {
        self.angles = TiltAngles::default();
        if self.phase == TiltPhase::Tilting {
            self.phase = TiltPhase::Settling;
        }
        self.angles
    }

    /// Next-frame step of the reset. Returns true exactly once per
    /// release, when the active marker should be removed.
    pub fn settle(&mut self) -> bool {
        if self.phase == TiltPhase::Settling {
            self.phase = TiltPhase::Idle;
            true
        } else {
            false
        }
    }
}

impl Default for TiltMotion {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: ElementBounds = ElementBounds {
        left: 100.0,
        top: 200.0,
        width: 300.0,
        height: 400.0,
    };

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-4, "{a} != {b}");
    }

    #[test]
    fn test_center_is_level() {
        let angles = tilt_angles(250.0, 400.0, &BOUNDS, MAX_TILT_DEG);
        assert_close(angles.x, 0.0);
        assert_close(angles.y, 0.0);
    }

    #[test]
    fn test_edges_reach_max_tilt() {
        // Right edge: full positive y rotation
        let right = tilt_angles(400.0, 400.0, &BOUNDS, MAX_TILT_DEG);
        assert_close(right.y, MAX_TILT_DEG);
        assert_close(right.x, 0.0);

        // Left edge
        let left = tilt_angles(100.0, 400.0, &BOUNDS, MAX_TILT_DEG);
        assert_close(left.y, -MAX_TILT_DEG);

        // Top edge: inverted vertical sign, positive x rotation
        let top = tilt_angles(250.0, 200.0, &BOUNDS, MAX_TILT_DEG);
        assert_close(top.x, MAX_TILT_DEG);
        assert_close(top.y, 0.0);

        // Bottom edge
        let bottom = tilt_angles(250.0, 600.0, &BOUNDS, MAX_TILT_DEG);
        assert_close(bottom.x, -MAX_TILT_DEG);
    }

    #[test]
    fn test_pointer_outside_bounds_is_clamped() {
        let angles = tilt_angles(10_000.0, -10_000.0, &BOUNDS, MAX_TILT_DEG);
        assert_close(angles.y, MAX_TILT_DEG);
        assert_close(angles.x, MAX_TILT_DEG);
    }

    #[test]
    fn test_degenerate_bounds_are_level() {
        let flat = ElementBounds {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
        };
        assert_eq!(tilt_angles(50.0, 50.0, &flat, MAX_TILT_DEG), TiltAngles::default());
    }

    #[test]
    fn test_release_and_settle_two_phase() {
        let mut motion = TiltMotion::new();
        assert!(!motion.is_active());
        assert!(!motion.settle());

        motion.point(TiltAngles { x: 3.0, y: -2.0 });
        assert!(motion.is_active());

        // Release zeroes the angles but keeps the marker one more frame
        let angles = motion.release();
        assert_eq!(angles, TiltAngles::default());
        assert!(motion.is_active());

        assert!(motion.settle());
        assert!(!motion.is_active());

        // Settling is one-shot
        assert!(!motion.settle());
    }

    #[test]
    fn test_release_while_idle_is_harmless() {
        let mut motion = TiltMotion::new();
        assert_eq!(motion.release(), TiltAngles::default());
        assert!(!motion.is_active());
        assert!(!motion.settle());
    }
}
