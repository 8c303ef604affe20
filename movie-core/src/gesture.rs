//! Double-tap gesture suppression.
//!
//! Some recording tools emit a derived gesture (a rapid direction
//! double-tap followed by a secondary action) as overlapping raw key
//! events even though only one effective action is intended. The filter
//! detects the pattern over a short window of recent frames and drops
//! the secondary key from the triggering frame only.

/// A per-format double-tap rule.
///
/// The rule fires when `secondary` is newly pressed on the current frame
/// immediately after a direction double-tap: some `directions` keysym
/// was newly pressed at least twice within the lookback window, with the
/// second tap on the current or immediately preceding frame.
#[derive(Clone, Copy, Debug)]
pub struct DoubleTapRule {
    /// Direction keysyms eligible for double-tap detection.
    pub directions: &'static [u32],
    /// Keysym suppressed when the gesture fires.
    pub secondary: u32,
    /// Lookback window in frames (the current frame is not included).
    pub window: usize,
}

/// Decide whether `secondary` should be dropped from the current frame.
///
/// `history` holds the newly-pressed keysyms of recent frames, most
/// recent last; only the trailing `rule.window` entries are consulted.
/// Pure function over the explicit history buffer.
#[must_use]
pub fn suppressed(history: &[Vec<u32>], pressed_now: &[u32], rule: &DoubleTapRule) -> bool {
    if !pressed_now.contains(&rule.secondary) {
        return false;
    }
    let start = history.len().saturating_sub(rule.window);
    let window = &history[start..];
    rule.directions.iter().any(|dir| {
        let second_tap_is_recent = pressed_now.contains(dir)
            || window.last().is_some_and(|frame| frame.contains(dir));
        if !second_tap_is_recent {
            return false;
        }
        let mut taps = window.iter().filter(|frame| frame.contains(dir)).count();
        if pressed_now.contains(dir) {
            taps += 1;
        }
        taps >= 2
    })
}
