//! Investment-flow interaction: hover, pin, threshold and keyboard focus.
//!
//! The reducer is plain data; the flow chart keeps one instance per mounted
//! chart inside an `RwSignal` and feeds [`FlowInteraction::query`] to the
//! geometry engine on every change.

use impact_core::Region;
use serde::{Deserialize, Serialize};

/// Share of the largest link used as the initial threshold
pub const DEFAULT_THRESHOLD_RATIO: f64 = 0.08;
/// Share of the largest link used when a stale threshold exceeds the max
pub const RESET_THRESHOLD_RATIO: f64 = 0.5;
/// Number of slider steps across the full range
pub const SLIDER_STEPS: f64 = 80.0;

/// Initial minimum link amount for a dataset whose largest link is `max`
pub fn default_threshold(max: f64) -> f64 {
    if max.is_finite() && max > 0.0 {
        (max * DEFAULT_THRESHOLD_RATIO).round()
    } else {
        0.0
    }
}

/// Slider step: one eightieth of the range, at least 1
pub fn slider_step(max: f64) -> f64 {
    if max.is_finite() {
        (max / SLIDER_STEPS).round().max(1.0)
    } else {
        1.0
    }
}

/// Slider upper bound
pub fn slider_max(max: f64) -> f64 {
    if max.is_finite() { max.round().max(1.0) } else { 1.0 }
}

// ============================================================================
// QUERY
// ============================================================================

/// What the flow geometry needs from the interaction state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowQuery {
    pub threshold: f64,
    pub focus: Option<Region>,
    pub hide_others: bool,
}

// ============================================================================
// KEYBOARD
// ============================================================================

/// Keys understood by the region badge row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Next,
    Previous,
    TogglePin,
    ClearPin,
}

impl NavKey {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" | "ArrowDown" => Some(Self::Next),
            "ArrowLeft" | "ArrowUp" => Some(Self::Previous),
            "Enter" | " " | "Spacebar" => Some(Self::TogglePin),
            "Escape" | "Esc" => Some(Self::ClearPin),
            _ => None,
        }
    }
}

// ============================================================================
// REDUCER
// ============================================================================

/// Per-chart interaction state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowInteraction {
    pub hover: Option<Region>,
    pub pinned: Option<Region>,
    pub threshold: f64,
    pub hide_others: bool,
    /// Index of the badge holding the roving tab stop
    pub focus_index: usize,
}

impl FlowInteraction {
    /// Fresh state for a dataset whose largest link is `max`
    pub fn new(max: f64) -> Self {
        Self {
            hover: None,
            pinned: None,
            threshold: default_threshold(max),
            hide_others: false,
            focus_index: 0,
        }
    }

    /// The pinned region wins over the hovered one
    pub fn focus(&self) -> Option<Region> {
        self.pinned.or(self.hover)
    }

    pub fn query(&self) -> FlowQuery {
        FlowQuery {
            threshold: self.threshold,
            focus: self.focus(),
            hide_others: self.hide_others,
        }
    }

    pub fn is_selected(&self, region: Region) -> bool {
        self.focus() == Some(region)
    }

    pub fn set_hover(&mut self, region: Option<Region>) {
        self.hover = region;
    }

    /// Hovering a link previews its destination unless a region is pinned
    pub fn hover_link(&mut self, to: Option<Region>) {
        if self.pinned.is_none() {
            self.hover = to;
        }
    }

    pub fn toggle_pin(&mut self, region: Region) {
        self.pinned = if self.pinned == Some(region) {
            None
        } else {
            Some(region)
        };
        tracing::trace!(pinned = ?self.pinned, "flow pin toggled");
    }

    pub fn clear_focus(&mut self) {
        self.pinned = None;
        self.hover = None;
    }

    pub fn set_hide_others(&mut self, hide: bool) {
        self.hide_others = hide;
    }

    /// Set the threshold from the slider, bounded to `[0, max]`
    pub fn set_threshold(&mut self, value: f64, max: f64) {
        let upper = if max.is_finite() { max.max(0.0) } else { 0.0 };
        self.threshold = if value.is_finite() {
            value.clamp(0.0, upper)
        } else {
            0.0
        };
    }

    /// A threshold above the current max hides everything; fall back to half the max
    pub fn reconcile(&mut self, max: f64) {
        if max > 0.0 && self.threshold > max {
            self.threshold = (max * RESET_THRESHOLD_RATIO).round();
            tracing::debug!(threshold = self.threshold, "flow threshold reset");
        }
    }

    /// Tab stop index, wrapped into `[0, len)`
    pub fn tab_stop(&self, len: usize) -> usize {
        if len == 0 { 0 } else { self.focus_index % len }
    }

    /// Apply a key pressed on badge `index`. Returns the badge index that
    /// should receive DOM focus when the key moved the tab stop.
    pub fn handle_key(&mut self, key: NavKey, index: usize, regions: &[Region]) -> Option<usize> {
        let n = regions.len();
        if n == 0 {
            return None;
        }
        let index = index % n;
        match key {
            NavKey::Next => {
                self.focus_index = (index + 1) % n;
                Some(self.focus_index)
            }
            NavKey::Previous => {
                self.focus_index = (index + n - 1) % n;
                Some(self.focus_index)
            }
            NavKey::TogglePin => {
                self.toggle_pin(regions[index]);
                None
            }
            NavKey::ClearPin => {
                self.pinned = None;
                None
            }
        }
    }
}

impl Default for FlowInteraction {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RING: &[Region] = &[
        Region::West,
        Region::North,
        Region::Central,
        Region::East,
        Region::Southern,
    ];

    #[test]
    fn test_default_threshold() {
        assert_eq!(default_threshold(120.0), 10.0);
        assert_eq!(default_threshold(0.0), 0.0);
        assert_eq!(default_threshold(f64::NAN), 0.0);
        assert_eq!(FlowInteraction::new(500.0).threshold, 40.0);
    }

    #[test]
    fn test_slider_bounds() {
        assert_eq!(slider_step(40.0), 1.0);
        assert_eq!(slider_step(800.0), 10.0);
        assert_eq!(slider_max(0.0), 1.0);
        assert_eq!(slider_max(412.4), 412.0);
    }

    #[test]
    fn test_reconcile_resets_stale_threshold() {
        let mut s = FlowInteraction::new(1000.0);
        s.threshold = 900.0;
        s.reconcile(300.0);
        assert_eq!(s.threshold, 150.0);

        s.threshold = 100.0;
        s.reconcile(300.0);
        assert_eq!(s.threshold, 100.0);

        s.threshold = 100.0;
        s.reconcile(0.0);
        assert_eq!(s.threshold, 100.0);
    }

    #[test]
    fn test_set_threshold_clamps() {
        let mut s = FlowInteraction::default();
        s.set_threshold(50.0, 40.0);
        assert_eq!(s.threshold, 40.0);
        s.set_threshold(-3.0, 40.0);
        assert_eq!(s.threshold, 0.0);
    }

    #[test]
    fn test_pin_wins_over_hover() {
        let mut s = FlowInteraction::default();
        s.set_hover(Some(Region::East));
        assert_eq!(s.focus(), Some(Region::East));

        s.toggle_pin(Region::West);
        assert_eq!(s.focus(), Some(Region::West));

        s.hover_link(Some(Region::North));
        assert_eq!(s.hover, Some(Region::East), "pinned state ignores link hover");

        s.toggle_pin(Region::West);
        assert_eq!(s.pinned, None);
        s.hover_link(Some(Region::North));
        assert_eq!(s.focus(), Some(Region::North));

        s.clear_focus();
        assert_eq!(s.focus(), None);
        assert_eq!(s.query().focus, None);
    }

    #[test]
    fn test_nav_key_mapping() {
        assert_eq!(NavKey::from_key("ArrowDown"), Some(NavKey::Next));
        assert_eq!(NavKey::from_key("ArrowUp"), Some(NavKey::Previous));
        assert_eq!(NavKey::from_key(" "), Some(NavKey::TogglePin));
        assert_eq!(NavKey::from_key("Enter"), Some(NavKey::TogglePin));
        assert_eq!(NavKey::from_key("Escape"), Some(NavKey::ClearPin));
        assert_eq!(NavKey::from_key("Tab"), None);
    }

    #[test]
    fn test_keyboard_wraps() {
        let mut s = FlowInteraction::default();
        assert_eq!(s.handle_key(NavKey::Previous, 0, RING), Some(4));
        assert_eq!(s.focus_index, 4);
        assert_eq!(s.handle_key(NavKey::Next, 4, RING), Some(0));

        assert_eq!(s.handle_key(NavKey::TogglePin, 2, RING), None);
        assert_eq!(s.pinned, Some(Region::Central));
        s.handle_key(NavKey::ClearPin, 2, RING);
        assert_eq!(s.pinned, None);

        assert_eq!(s.handle_key(NavKey::Next, 0, &[]), None);
    }

    proptest! {
        #[test]
        fn prop_navigation_stays_in_range(
            start in 0usize..20,
            moves in proptest::collection::vec(any::<bool>(), 0..40),
        ) {
            let mut s = FlowInteraction::default();
            let mut i = start;
            for forward in moves {
                let key = if forward { NavKey::Next } else { NavKey::Previous };
                if let Some(next) = s.handle_key(key, i, RING) {
                    prop_assert!(next < RING.len());
                    i = next;
                }
            }
            prop_assert!(s.tab_stop(RING.len()) < RING.len());
        }

        #[test]
        fn prop_full_cycle_returns_home(start in 0usize..5) {
            let mut s = FlowInteraction::default();
            let mut i = start;
            for _ in 0..RING.len() {
                i = s.handle_key(NavKey::Next, i, RING).unwrap_or(i);
            }
            prop_assert_eq!(i, start);
        }
    }
}
