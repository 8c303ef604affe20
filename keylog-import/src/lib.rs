//! Key-event log import.
//!
//! A sparse keyboard recording: one line per change of keyboard state
//! with an absolute or delta frame marker, press/release/tap tokens, and
//! hold-until-changed semantics between lines. The recording tool also
//! logs the raw keys of its dash gesture (direction double-tap plus
//! space), so playback applies the double-tap suppression rule.

pub mod mapping;
pub mod parser;

pub use mapping::keysym_for;
pub use parser::KeylogReader;

use ltm_format::{keysym, ChannelLayout};
use movie_core::DoubleTapRule;

/// Output channels of this format.
pub const LAYOUT: ChannelLayout = ChannelLayout::KEYBOARD;

/// Padding frames emitted after the final event so held state gets a
/// bounded duration.
pub const TAIL_FRAMES: u32 = 60;

/// Dash gesture logged by the recording tool as raw overlapping keys.
pub const DOUBLE_TAP: DoubleTapRule = DoubleTapRule {
    directions: &keysym::ARROWS,
    secondary: keysym::XK_SPACE,
    window: 15,
};
