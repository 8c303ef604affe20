//! Core input types: buttons, axis samples, events, and frame records.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Mouse button state as a bitfield.
///
/// Five pointer buttons, matching the five slots of the movie file's
/// mouse field.
///
/// # Example
///
/// ```
/// use movie_core::MouseButtons;
///
/// let buttons = MouseButtons::LEFT | MouseButtons::RIGHT;
/// assert!(buttons.contains(MouseButtons::LEFT));
/// assert!(!buttons.contains(MouseButtons::MIDDLE));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MouseButtons(pub u8);

impl MouseButtons {
    pub const LEFT: Self = Self(1 << 0);
    pub const MIDDLE: Self = Self(1 << 1);
    pub const RIGHT: Self = Self(1 << 2);
    pub const X1: Self = Self(1 << 3);
    pub const X2: Self = Self(1 << 4);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Number of pointer button slots in the movie format.
    pub const SLOTS: usize = 5;

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: MouseButtons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, button: MouseButtons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for MouseButtons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for MouseButtons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for MouseButtons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for MouseButtons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for MouseButtons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Virtual controller button state as a bitfield.
///
/// Bit positions follow the slot order of the movie file's controller
/// field: A, B, X, Y, Back, Guide, Start, left/right stick press,
/// left/right shoulder, then the four dpad directions.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct PadButtons(pub u16);

impl PadButtons {
    pub const A: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const X: Self = Self(1 << 2);
    pub const Y: Self = Self(1 << 3);
    pub const BACK: Self = Self(1 << 4);
    pub const GUIDE: Self = Self(1 << 5);
    pub const START: Self = Self(1 << 6);
    pub const LS: Self = Self(1 << 7);
    pub const RS: Self = Self(1 << 8);
    pub const LB: Self = Self(1 << 9);
    pub const RB: Self = Self(1 << 10);
    pub const DPAD_UP: Self = Self(1 << 11);
    pub const DPAD_DOWN: Self = Self(1 << 12);
    pub const DPAD_LEFT: Self = Self(1 << 13);
    pub const DPAD_RIGHT: Self = Self(1 << 14);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Number of controller button slots in the movie format.
    pub const SLOTS: usize = 16;

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: PadButtons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, button: PadButtons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for PadButtons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PadButtons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for PadButtons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for PadButtons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for PadButtons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// One discrete input channel across all device kinds.
///
/// Keyboard keys are identified by their X11 keysym value, which is what
/// the movie format stores directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    /// Keyboard key (X11 keysym).
    Key(u32),
    /// Pointer button(s).
    Mouse(MouseButtons),
    /// Virtual controller button(s).
    Pad(PadButtons),
}

/// The six analog axis slots of the virtual controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StickAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    TriggerLeft,
    TriggerRight,
}

impl StickAxis {
    /// Slot index within [`PadState::axes`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            StickAxis::LeftX => 0,
            StickAxis::LeftY => 1,
            StickAxis::RightX => 2,
            StickAxis::RightY => 3,
            StickAxis::TriggerLeft => 4,
            StickAxis::TriggerRight => 5,
        }
    }
}

/// Angular look axes fed through the quantization solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewAxis {
    Yaw,
    Pitch,
}

/// One analog sample from a source recording.
///
/// A given axis stream is either always direct stick values or always
/// absolute angles; the two kinds never alternate within one stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisSample {
    /// Direct controller axis value, already in the target range
    /// [-32767, 32767]. Persists until the next sample for that axis.
    Stick { axis: StickAxis, value: i16 },
    /// Absolute camera angle in degrees, converted to a relative mouse
    /// delta for the frame of the carrying event.
    Angle { axis: ViewAxis, degrees: f64 },
}

/// How an event positions itself on the output frame timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventTiming {
    /// Emit the event's state for exactly N frames (run-length encoding).
    /// N may be 0: the state change applies but no frame is emitted.
    Repeat(u32),
    /// The previous state lasts up to (excluding) this absolute frame
    /// index, then the event's state is emitted for one frame.
    AtFrame(u64),
    /// The previous state lasts N-1 more frames (one was already emitted
    /// for the previous marker row), then the event's state is emitted
    /// for one frame.
    AfterFrames(u64),
    /// The event covers exactly one frame (one-row-per-frame formats).
    Single,
}

/// A normalized sample from a source recording, produced by the
/// format-specific front-ends.
///
/// Invariant: `held` is a subset of `pressed`. Buttons in
/// `pressed - held` are one-shot: asserted only on the first frame the
/// event covers. Buttons in `held` persist across subsequent events
/// until listed in some event's `released`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputEvent {
    pub timing: EventTiming,
    pub pressed: Vec<Button>,
    pub held: Vec<Button>,
    pub released: Vec<Button>,
    pub axes: Vec<AxisSample>,
}

impl Default for EventTiming {
    fn default() -> Self {
        EventTiming::Single
    }
}

/// Pointer state for one output frame. Deltas are per-frame relative
/// motion counts; repeats of a held state carry zero deltas.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MouseState {
    pub dx: i32,
    pub dy: i32,
    pub buttons: MouseButtons,
}

/// Virtual controller state for one output frame.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct PadState {
    pub axes: [i16; 6],
    pub buttons: PadButtons,
}

/// The fully-resolved input state for exactly one output frame.
///
/// Produced by the timeline builder, immutable once emitted, consumed
/// exactly once by the row encoder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameRecord {
    /// Active keyboard keysyms, sorted and deduplicated.
    pub keys: Vec<u32>,
    pub mouse: MouseState,
    pub pad: PadState,
}
