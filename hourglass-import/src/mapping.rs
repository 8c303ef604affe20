//! Windows virtual-key codes to X11 keysyms.

use ltm_format::keysym;

/// Map one virtual-key code to its keysym. Returns `None` for codes the
/// movie format has no equivalent for; callers skip those slots.
#[must_use]
pub fn vk_to_keysym(vk: u8) -> Option<u32> {
    match vk {
        0x08 => Some(keysym::XK_BACKSPACE),
        0x09 => Some(keysym::XK_TAB),
        0x0d => Some(keysym::XK_RETURN),
        0x10 => Some(keysym::XK_SHIFT_L),
        0x11 => Some(keysym::XK_CONTROL_L),
        0x12 => Some(keysym::XK_ALT_L),
        0x1b => Some(keysym::XK_ESCAPE),
        0x20 => Some(keysym::XK_SPACE),
        0x25 => Some(keysym::XK_LEFT),
        0x26 => Some(keysym::XK_UP),
        0x27 => Some(keysym::XK_RIGHT),
        0x28 => Some(keysym::XK_DOWN),
        // Digits and letters share their ASCII codes; keysyms are the
        // lowercase form.
        0x30..=0x39 | 0x41..=0x5a => Some(keysym::latin(vk)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_digits() {
        assert_eq!(vk_to_keysym(0x41), Some(0x61)); // VK_A -> 'a'
        assert_eq!(vk_to_keysym(0x5a), Some(0x7a)); // VK_Z -> 'z'
        assert_eq!(vk_to_keysym(0x37), Some(0x37)); // VK_7 -> '7'
    }

    #[test]
    fn test_arrows() {
        assert_eq!(vk_to_keysym(0x25), Some(keysym::XK_LEFT));
        assert_eq!(vk_to_keysym(0x28), Some(keysym::XK_DOWN));
    }

    #[test]
    fn test_unmapped() {
        assert_eq!(vk_to_keysym(0x07), None);
        assert_eq!(vk_to_keysym(0xff), None);
    }
}
