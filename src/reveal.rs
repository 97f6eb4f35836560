// src/reveal.rs
//
// Scroll-reveal bookkeeping.
//
// This module owns everything about entrance animations that does not
// touch the DOM: delay assignment (explicit attribute vs. computed
// stagger) and the per-element visibility state machine fed by
// intersection updates. The web layer translates observer entries into
// `IntersectionUpdate`s and applies the returned `RevealAction`s.

// ═══════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════

/// What happens after an element has been revealed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayMode {
    /// Entrance animation never replays; the element is retired from
    /// observation after its first reveal.
    Once,

    /// Visibility follows the viewport: re-entering re-adds the visible
    /// state, and leaving the viewport bounds entirely removes it.
    Toggle,
}

/// Reveal tuning for one page.
///
/// The presets differ in stagger constants, observer threshold/margin,
/// and replay policy. These are product choices, not alternatives to
/// reconcile; pick one per deployment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    /// Stagger step per element index, in seconds.
    pub stagger_step: f32,

    /// Maximum computed stagger, in seconds.
    pub stagger_cap: f32,

    /// Fraction of the element that must be visible to count as entered.
    pub threshold: f64,

    /// Bottom root margin in percent. Negative values shrink the
    /// effective viewport so elements reveal slightly after entering.
    pub bottom_margin_pct: i32,

    pub replay: ReplayMode,
}

impl RevealConfig {
    /// The default profile: gentle stagger, one-shot reveals.
    pub fn standard() -> Self {
        Self {
            stagger_step: 0.06,
            stagger_cap: 0.35,
            threshold: 0.12,
            bottom_margin_pct: -6,
            replay: ReplayMode::Once,
        }
    }

    /// Slower, more dramatic profile for hero sections.
    pub fn hero() -> Self {
        Self {
            stagger_step: 0.08,
            stagger_cap: 0.6,
            threshold: 0.18,
            bottom_margin_pct: -12,
            replay: ReplayMode::Once,
        }
    }

    /// Tight stagger with reversible visibility, so animations replay
    /// on repeated scroll.
    pub fn replay() -> Self {
        Self {
            stagger_step: 0.02,
            stagger_cap: 0.08,
            threshold: 0.12,
            bottom_margin_pct: -6,
            replay: ReplayMode::Toggle,
        }
    }

    /// Root margin string for the intersection watcher,
    /// e.g. `"0px 0px -6%"`.
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}%", self.bottom_margin_pct)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::standard()
    }
}

// ═══════════════════════════════════════════════════════════════════
// Delay assignment
// ═══════════════════════════════════════════════════════════════════

/// Computed stagger delay for the element at `index`, in seconds.
#[inline]
pub fn stagger_delay(index: usize, config: &RevealConfig) -> f32 {
    (index as f32 * config.stagger_step).min(config.stagger_cap)
}

/// Resolve the entrance delay for one element.
///
/// An explicit attribute value wins when it parses as a finite number.
/// Malformed values are ignored and fall through to the computed
/// stagger.
pub fn resolve_delay(explicit: Option<&str>, index: usize, config: &RevealConfig) -> f32 {
    if let Some(raw) = explicit {
        if let Ok(value) = raw.trim().parse::<f32>() {
            if value.is_finite() {
                return value;
            }
        }
        log::debug!("ignoring malformed delay attribute: {raw:?}");
    }
    stagger_delay(index, config)
}

/// Format a delay for a CSS custom property, e.g. `"0.12s"`.
pub fn format_delay(seconds: f32) -> String {
    format!("{seconds:.2}s")
}

// ═══════════════════════════════════════════════════════════════════
// Visibility tracking
// ═══════════════════════════════════════════════════════════════════

/// One intersection report for a tracked element.
#[derive(Debug, Clone, Copy)]
pub struct IntersectionUpdate {
    pub index: usize,

    /// The watcher's intersecting flag.
    pub intersecting: bool,

    /// Whether the element's bounding rect lies fully outside the
    /// viewport. Only consulted in toggle mode: the observer margin
    /// shrinks the viewport, so "not intersecting" alone is not
    /// "scrolled away".
    pub outside_viewport: bool,
}

/// Side effect the web layer must apply for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    /// Add the visible state.
    Show(usize),

    /// Remove the visible state (toggle mode only).
    Hide(usize),

    /// Stop observing the element; its entrance will never replay.
    Retire(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Pending,
    Visible,
    Hidden,
    Retired,
}

/// Per-element visibility state machine.
///
/// Pure bookkeeping: fed by the web layer, never touches the DOM.
/// All transitions are idempotent, so replayed observer entries and
/// repeated force-visible calls produce no duplicate actions.
#[derive(Debug)]
pub struct RevealTracker {
    replay: ReplayMode,
    slots: Vec<SlotState>,
}

impl RevealTracker {
    pub fn new(count: usize, replay: ReplayMode) -> Self {
        Self {
            replay,
            slots: vec![SlotState::Pending; count],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_visible(&self, index: usize) -> bool {
        matches!(
            self.slots.get(index),
            Some(SlotState::Visible | SlotState::Retired)
        )
    }

    /// Apply one intersection update, returning the actions to perform.
    pub fn observe(&mut self, update: IntersectionUpdate) -> Vec<RevealAction> {
        let mut actions = Vec::new();
        let Some(slot) = self.slots.get_mut(update.index) else {
            return actions;
        };

        match self.replay {
            ReplayMode::Once => {
                if update.intersecting && *slot == SlotState::Pending {
                    *slot = SlotState::Retired;
                    actions.push(RevealAction::Show(update.index));
                    actions.push(RevealAction::Retire(update.index));
                }
            }

            ReplayMode::Toggle => {
                if update.intersecting {
                    if *slot != SlotState::Visible {
                        *slot = SlotState::Visible;
                        actions.push(RevealAction::Show(update.index));
                    }
                } else if update.outside_viewport && *slot == SlotState::Visible {
                    *slot = SlotState::Hidden;
                    actions.push(RevealAction::Hide(update.index));
                }
            }
        }

        actions
    }

    /// Force every element visible (reduced motion, or no watcher
    /// support). Elements already visible produce no action.
    pub fn force_all_visible(&mut self) -> Vec<RevealAction> {
        let mut actions = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if *slot != SlotState::Visible && *slot != SlotState::Retired {
                *slot = SlotState::Retired;
                actions.push(RevealAction::Show(index));
            }
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter(index: usize) -> IntersectionUpdate {
        IntersectionUpdate {
            index,
            intersecting: true,
            outside_viewport: false,
        }
    }

    fn exit(index: usize, outside: bool) -> IntersectionUpdate {
        IntersectionUpdate {
            index,
            intersecting: false,
            outside_viewport: outside,
        }
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn test_stagger_delay_capped() {
        let config = RevealConfig::standard();
        assert_close(stagger_delay(0, &config), 0.0);
        assert_close(stagger_delay(3, &config), 0.18);
        // 10 * 0.06 = 0.6 exceeds the cap
        assert_close(stagger_delay(10, &config), 0.35);

        let hero = RevealConfig::hero();
        assert_close(stagger_delay(5, &hero), 0.4);
        assert_close(stagger_delay(20, &hero), 0.6);

        let replay = RevealConfig::replay();
        assert_close(stagger_delay(2, &replay), 0.04);
        assert_close(stagger_delay(9, &replay), 0.08);
    }

    #[test]
    fn test_explicit_delay_wins() {
        let config = RevealConfig::standard();
        assert_eq!(resolve_delay(Some("0.5"), 3, &config), 0.5);
        assert_eq!(resolve_delay(Some(" 1.25 "), 0, &config), 1.25);
        assert_eq!(resolve_delay(Some("0"), 7, &config), 0.0);
    }

    #[test]
    fn test_malformed_delay_falls_back_to_stagger() {
        let config = RevealConfig::standard();
        assert_close(resolve_delay(Some("fast"), 2, &config), 0.12);
        assert_close(resolve_delay(Some(""), 2, &config), 0.12);
        assert_close(resolve_delay(Some("NaN"), 2, &config), 0.12);
        assert_close(resolve_delay(None, 2, &config), 0.12);
    }

    #[test]
    fn test_format_delay() {
        assert_eq!(format_delay(0.12), "0.12s");
        assert_eq!(format_delay(0.0), "0.00s");
        assert_eq!(format_delay(0.355), "0.35s");
    }

    #[test]
    fn test_root_margin_string() {
        assert_eq!(RevealConfig::standard().root_margin(), "0px 0px -6%");
        assert_eq!(RevealConfig::hero().root_margin(), "0px 0px -12%");
    }

    #[test]
    fn test_once_reveals_then_retires() {
        let mut tracker = RevealTracker::new(2, ReplayMode::Once);

        let actions = tracker.observe(enter(0));
        assert_eq!(
            actions,
            vec![RevealAction::Show(0), RevealAction::Retire(0)]
        );
        assert!(tracker.is_visible(0));

        // Replayed entries for a retired element do nothing
        assert!(tracker.observe(enter(0)).is_empty());
        assert!(tracker.observe(exit(0, true)).is_empty());
        assert!(tracker.observe(enter(0)).is_empty());

        assert!(!tracker.is_visible(1));
    }

    #[test]
    fn test_toggle_replays_on_reentry() {
        let mut tracker = RevealTracker::new(1, ReplayMode::Toggle);

        assert_eq!(tracker.observe(enter(0)), vec![RevealAction::Show(0)]);
        // Still intersecting per the watcher, just re-reported
        assert!(tracker.observe(enter(0)).is_empty());

        // Left the observer margin but not the viewport: stays visible
        assert!(tracker.observe(exit(0, false)).is_empty());
        assert!(tracker.is_visible(0));

        // Fully scrolled away: hidden, then shown again on re-entry
        assert_eq!(tracker.observe(exit(0, true)), vec![RevealAction::Hide(0)]);
        assert!(!tracker.is_visible(0));
        assert_eq!(tracker.observe(enter(0)), vec![RevealAction::Show(0)]);
    }

    #[test]
    fn test_force_all_visible_is_idempotent() {
        let mut tracker = RevealTracker::new(3, ReplayMode::Once);
        tracker.observe(enter(1));

        let actions = tracker.force_all_visible();
        assert_eq!(
            actions,
            vec![RevealAction::Show(0), RevealAction::Show(2)]
        );
        assert!((0..3).all(|i| tracker.is_visible(i)));

        assert!(tracker.force_all_visible().is_empty());
    }

    #[test]
    fn test_out_of_range_update_is_ignored() {
        let mut tracker = RevealTracker::new(1, ReplayMode::Once);
        assert!(tracker.observe(enter(5)).is_empty());
    }
}
