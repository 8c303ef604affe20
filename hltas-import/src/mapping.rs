//! Frame-bulk rows to normalized movie events.
//!
//! Two output variants exist for the same recordings:
//!
//! - **keyboard**: movement directions become w/a/d/s key presses, the
//!   way the game is normally played;
//! - **joystick**: movement becomes virtual left-stick deflections
//!   derived from the `cl_*speed` values, reproducing the exporter's
//!   joystick math (the engine halves a movement speed on the first
//!   frame a direction is freshly pressed, so the axis value compensates
//!   by halving the speed before encoding it as `+-(1 + 2*v)`).
//!
//! Both variants emit the six actions (jump/duck/use/reload as keys,
//! the two attacks as mouse buttons) and absolute yaw/pitch samples for
//! the angle solver.

use ltm_format::keysym;
use movie_core::{AxisSample, Button, EventTiming, InputEvent, MouseButtons, StickAxis, ViewAxis};

use crate::parser::{RawRow, SpeedKind};

/// Movement output variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Keyboard,
    Joystick,
}

/// Movement keys for the keyboard variant, in forward/left/right/back
/// order.
pub const MOVE_KEYS: [u32; 4] = [
    keysym::latin(b'w'),
    keysym::latin(b'a'),
    keysym::latin(b'd'),
    keysym::latin(b's'),
];

/// Action buttons in field order: jump, duck, use, attack1, attack2,
/// reload.
pub const ACTION_BUTTONS: [Button; 6] = [
    Button::Key(keysym::XK_SPACE),
    Button::Key(keysym::XK_CONTROL_L),
    Button::Key(keysym::latin(b'e')),
    Button::Mouse(MouseButtons::LEFT),
    Button::Mouse(MouseButtons::RIGHT),
    Button::Key(keysym::latin(b'r')),
];

/// Stateful row-to-event mapper. Tracks the previous row's buttons to
/// derive releases, and the previous movement directions for the
/// first-frame speed halving.
#[derive(Debug)]
pub struct HltasMapper {
    variant: Variant,
    prev_dirs: [bool; 4],
    prev_buttons: Vec<Button>,
}

impl HltasMapper {
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            prev_dirs: [false; 4],
            prev_buttons: Vec::new(),
        }
    }

    /// Map one frame row to a single-frame event.
    pub fn map_row(&mut self, row: &RawRow) -> InputEvent {
        let mut pressed = Vec::new();
        for (i, &active) in row.actions.iter().enumerate() {
            if active {
                pressed.push(ACTION_BUTTONS[i]);
            }
        }
        if self.variant == Variant::Keyboard {
            for (i, &active) in row.dirs.iter().enumerate() {
                if active {
                    pressed.push(Button::Key(MOVE_KEYS[i]));
                }
            }
        }

        let released: Vec<Button> = self
            .prev_buttons
            .iter()
            .filter(|b| !pressed.contains(b))
            .copied()
            .collect();

        let mut axes = vec![
            AxisSample::Angle {
                axis: ViewAxis::Yaw,
                degrees: row.yaw,
            },
            AxisSample::Angle {
                axis: ViewAxis::Pitch,
                degrees: row.pitch,
            },
        ];
        if self.variant == Variant::Joystick {
            let (x, y) = self.strafe_axes(row);
            axes.push(AxisSample::Stick {
                axis: StickAxis::LeftX,
                value: x,
            });
            axes.push(AxisSample::Stick {
                axis: StickAxis::LeftY,
                value: y,
            });
        }

        self.prev_dirs = row.dirs;
        self.prev_buttons = pressed.clone();

        InputEvent {
            timing: EventTiming::Single,
            held: pressed.clone(),
            pressed,
            released,
            axes,
        }
    }

    /// The exporter's joystick math: speeds become axis magnitudes
    /// `1 + 2*v`, halved on the first frame of a fresh direction press,
    /// with the x sign from the active strafe direction.
    fn strafe_axes(&self, row: &RawRow) -> (i16, i16) {
        let [front, left, right, back] = row.dirs;
        let side_dir: i32 = if right {
            1
        } else if left {
            -1
        } else {
            0
        };

        let mut x: i32 = 0;
        let mut y: i32 = 0;
        for (kind, value) in row.speeds.iter().flatten() {
            let mut v = *value as i32;
            match kind {
                SpeedKind::Forward => {
                    if front && !self.prev_dirs[0] {
                        v /= 2;
                    }
                    y = -(1 + 2 * v);
                }
                SpeedKind::Side => {
                    if (left && !self.prev_dirs[1]) || (right && !self.prev_dirs[2]) {
                        v /= 2;
                    }
                    x = (1 + 2 * v) * side_dir;
                }
                SpeedKind::Back => {
                    if back && !self.prev_dirs[3] {
                        v /= 2;
                    }
                    y = 1 + 2 * v;
                }
            }
        }
        (clamp_axis(x), clamp_axis(y))
    }
}

#[inline]
fn clamp_axis(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}
