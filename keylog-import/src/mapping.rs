//! Key-name resolution.
//!
//! Log tokens name keys three ways: a single letter or digit, a named
//! special key, or a raw hex keysym (`0xff0d`). All three resolve to the
//! keysym the movie format stores.

use ltm_format::keysym;

/// Resolves a key name to its keysym, or `None` for unrecognized names.
#[must_use]
pub fn keysym_for(name: &str) -> Option<u32> {
    if let Some(hex) = name.strip_prefix("0x") {
        return u32::from_str_radix(hex, 16).ok();
    }
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphanumeric() {
            return Some(keysym::latin(c as u8));
        }
        return None;
    }
    let sym = match name.to_ascii_lowercase().as_str() {
        "up" => keysym::XK_UP,
        "down" => keysym::XK_DOWN,
        "left" => keysym::XK_LEFT,
        "right" => keysym::XK_RIGHT,
        "space" => keysym::XK_SPACE,
        "shift" => keysym::XK_SHIFT_L,
        "ctrl" => keysym::XK_CONTROL_L,
        "alt" => keysym::XK_ALT_L,
        "enter" => keysym::XK_RETURN,
        "esc" => keysym::XK_ESCAPE,
        "tab" => keysym::XK_TAB,
        "backspace" => keysym::XK_BACKSPACE,
        _ => return None,
    };
    Some(sym)
}
