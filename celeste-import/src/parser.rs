//! Studio file parsing.
//!
//! Frame lines are comma-separated, right-aligned in the original tool:
//!
//! ```text
//!   13,R,J
//!    4,R,X
//!   36
//! ```
//!
//! The leading number is the frame count; the remaining tokens are the
//! inputs held for that entire duration. Each line fully replaces the
//! previous line's state; a bare count clears everything. Comments,
//! breakpoints (`***`), room labels, and console commands are skipped.

use log::warn;
use std::io::BufRead;

use movie_core::{AxisSample, Button, EventSource, EventTiming, InputEvent, PadButtons, SourceError, StickAxis};

use crate::mapping::{button_for, feather_stick, STICK_MAX};

/// Streaming reader over a Studio recording.
pub struct CelesteReader<R> {
    input: R,
    line: String,
    prev_buttons: PadButtons,
}

impl<R: BufRead> CelesteReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
            prev_buttons: PadButtons::NONE,
        }
    }

    fn parse_line(&mut self, line: &str) -> Option<InputEvent> {
        let mut tokens = line.split(',').map(str::trim);
        let frames: u32 = tokens.next()?.parse().ok()?;

        let mut buttons = PadButtons::NONE;
        let mut stick = (0i16, 0i16);
        while let Some(token) = tokens.next() {
            let mut chars = token.chars();
            let (Some(letter), None) = (chars.next(), chars.next()) else {
                if !token.is_empty() {
                    warn!("unknown input token {token:?}, ignoring");
                }
                continue;
            };
            match letter.to_ascii_uppercase() {
                'R' => stick.0 = STICK_MAX,
                'L' => stick.0 = -STICK_MAX,
                'U' => stick.1 = -STICK_MAX,
                'D' => stick.1 = STICK_MAX,
                'F' => {
                    let Some(angle) = tokens.next().and_then(|t| t.parse::<f64>().ok()) else {
                        warn!("feather token without angle, ignoring");
                        continue;
                    };
                    stick = feather_stick(angle);
                }
                letter => match button_for(letter) {
                    Some(button) => buttons |= button,
                    None => warn!("unknown input token {token:?}, ignoring"),
                },
            }
        }

        let pressed = split_buttons(buttons);
        let released = split_buttons(self.prev_buttons & !buttons);
        self.prev_buttons = buttons;

        Some(InputEvent {
            timing: EventTiming::Repeat(frames),
            held: pressed.clone(),
            pressed,
            released,
            axes: vec![
                AxisSample::Stick {
                    axis: StickAxis::LeftX,
                    value: stick.0,
                },
                AxisSample::Stick {
                    axis: StickAxis::LeftY,
                    value: stick.1,
                },
            ],
        })
    }
}

fn split_buttons(buttons: PadButtons) -> Vec<Button> {
    (0..PadButtons::SLOTS)
        .map(|slot| PadButtons(1 << slot))
        .filter(|&bit| buttons.contains(bit))
        .map(Button::Pad)
        .collect()
}

impl<R: BufRead> EventSource for CelesteReader<R> {
    fn next_event(&mut self) -> Result<Option<InputEvent>, SourceError> {
        loop {
            self.line.clear();
            if self.input.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let line = self.line.trim().to_owned();
            // Frame lines start with a digit; everything else (comments,
            // breakpoints, room labels, commands) is ignored.
            if !line.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                continue;
            }
            match self.parse_line(&line) {
                Some(event) => return Ok(Some(event)),
                None => warn!("malformed frame line, skipping: {line:?}"),
            }
        }
    }
}
