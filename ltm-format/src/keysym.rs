//! X11 keysym constants shared by the importers.
//!
//! The movie format stores keyboard inputs as raw keysym values, so the
//! importers map their tool-specific key identifiers onto these.

pub const XK_BACKSPACE: u32 = 0xff08;
pub const XK_TAB: u32 = 0xff09;
pub const XK_RETURN: u32 = 0xff0d;
pub const XK_ESCAPE: u32 = 0xff1b;
pub const XK_LEFT: u32 = 0xff51;
pub const XK_UP: u32 = 0xff52;
pub const XK_RIGHT: u32 = 0xff53;
pub const XK_DOWN: u32 = 0xff54;
pub const XK_SHIFT_L: u32 = 0xffe1;
pub const XK_CONTROL_L: u32 = 0xffe3;
pub const XK_ALT_L: u32 = 0xffe9;
pub const XK_SPACE: u32 = 0x20;

/// Keysym for a latin letter or digit: identical to the lowercase ASCII
/// code.
#[inline]
#[must_use]
pub const fn latin(c: u8) -> u32 {
    c.to_ascii_lowercase() as u32
}

/// The four arrow keysyms, in left/up/right/down order.
pub const ARROWS: [u32; 4] = [XK_LEFT, XK_UP, XK_RIGHT, XK_DOWN];
