//! Movie input row encoding.
//!
//! One output frame becomes one text row of `|`-delimited fields:
//!
//! ```text
//! |keyboard|mouse|controller|
//! ```
//!
//! - keyboard: colon-separated lowercase hex keysyms, empty when idle
//! - mouse: `<dx>:<dy>:R:` then five pointer-button slots, each the
//!   slot's digit (`1`-`5`) when pressed or `.` otherwise (`R` marks
//!   relative motion)
//! - controller: six colon-separated axis values, then sixteen button
//!   slots, each the slot's hex digit when pressed or `.` otherwise
//!
//! Trailing channels a format does not produce are omitted entirely, but
//! fields are positional: a format with a controller channel always gets
//! a mouse field, neutral if necessary.

use std::fmt::Write;

use movie_core::{FrameRecord, MouseButtons, PadButtons};

/// Which channels a source format produces. The keyboard field is always
/// present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelLayout {
    pub mouse: bool,
    pub controller: bool,
}

impl ChannelLayout {
    /// Keyboard field only.
    pub const KEYBOARD: Self = Self {
        mouse: false,
        controller: false,
    };
    /// Keyboard and mouse fields.
    pub const WITH_MOUSE: Self = Self {
        mouse: true,
        controller: false,
    };
    /// All three fields.
    pub const FULL: Self = Self {
        mouse: true,
        controller: true,
    };
    /// Keyboard and controller fields (mouse encoded neutral).
    pub const CONTROLLER: Self = Self {
        mouse: false,
        controller: true,
    };
}

/// Append one frame's row (without trailing newline) to `out`.
///
/// Total over any well-formed record; performs no validation beyond
/// structural separators.
pub fn encode_frame(record: &FrameRecord, layout: ChannelLayout, out: &mut String) {
    out.push('|');
    for (i, keysym) in record.keys.iter().enumerate() {
        if i > 0 {
            out.push(':');
        }
        let _ = write!(out, "{keysym:x}");
    }
    out.push('|');

    if layout.mouse || layout.controller {
        let _ = write!(out, "{}:{}:R:", record.mouse.dx, record.mouse.dy);
        for slot in 0..MouseButtons::SLOTS {
            if record.mouse.buttons.contains(MouseButtons(1 << slot)) {
                let _ = write!(out, "{}", slot + 1);
            } else {
                out.push('.');
            }
        }
        out.push('|');
    }

    if layout.controller {
        for axis in record.pad.axes {
            let _ = write!(out, "{axis}:");
        }
        for slot in 0..PadButtons::SLOTS {
            if record.pad.buttons.contains(PadButtons(1 << slot)) {
                out.push(char::from_digit(slot as u32, 16).unwrap_or('.'));
            } else {
                out.push('.');
            }
        }
        out.push('|');
    }
}

/// Encode one frame as an owned row string.
#[must_use]
pub fn frame_to_row(record: &FrameRecord, layout: ChannelLayout) -> String {
    let mut out = String::new();
    encode_frame(record, layout, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_core::{MouseState, PadState};

    #[test]
    fn test_keyboard_only_idle_row() {
        let record = FrameRecord::default();
        assert_eq!(frame_to_row(&record, ChannelLayout::KEYBOARD), "||");
    }

    #[test]
    fn test_keyboard_keys_hex_colon_separated() {
        let record = FrameRecord {
            keys: vec![0x20, 0x72, 0xffe3],
            ..Default::default()
        };
        assert_eq!(
            frame_to_row(&record, ChannelLayout::KEYBOARD),
            "|20:72:ffe3|"
        );
    }

    #[test]
    fn test_mouse_field_slots_and_relative_flag() {
        let record = FrameRecord {
            mouse: MouseState {
                dx: -123,
                dy: 4,
                buttons: MouseButtons::LEFT | MouseButtons::RIGHT,
            },
            ..Default::default()
        };
        assert_eq!(
            frame_to_row(&record, ChannelLayout::WITH_MOUSE),
            "||-123:4:R:1.3..|"
        );
    }

    #[test]
    fn test_full_row_matches_reference_layout() {
        // Byte layout of the reference converter's output for a row with
        // jump held, a yaw turn, and strafe joystick values.
        let record = FrameRecord {
            keys: vec![0x20],
            mouse: MouseState {
                dx: -57,
                dy: 0,
                buttons: MouseButtons::NONE,
            },
            pad: PadState {
                axes: [-801, 0, 0, 0, 0, 0],
                buttons: PadButtons::NONE,
            },
        };
        assert_eq!(
            frame_to_row(&record, ChannelLayout::FULL),
            "|20|-57:0:R:.....|-801:0:0:0:0:0:................|"
        );
    }

    #[test]
    fn test_controller_layout_gets_neutral_mouse() {
        let record = FrameRecord {
            pad: PadState {
                axes: [0; 6],
                buttons: PadButtons::A | PadButtons::DPAD_UP,
            },
            ..Default::default()
        };
        assert_eq!(
            frame_to_row(&record, ChannelLayout::CONTROLLER),
            "||0:0:R:.....|0:0:0:0:0:0:0..........b....|"
        );
    }
}
