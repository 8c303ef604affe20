//! Key-event log parsing.
//!
//! Each event line starts with a frame marker followed by key tokens:
//!
//! ```text
//! # jump over the first gap
//! 120  +right
//! +30  space
//! 180  -right up
//! ```
//!
//! A bare number is an absolute frame; `+n` is a delta from the previous
//! event. Key tokens are `+name` (press and hold), `-name` (release), or
//! a bare `name` (tap for one frame). State between markers is held
//! unchanged. Comment (`#`) and blank lines are skipped.

use log::warn;
use std::io::BufRead;

use movie_core::{Button, EventSource, EventTiming, InputEvent, SourceError};

use crate::mapping::keysym_for;

/// Streaming reader over a key-event log.
pub struct KeylogReader<R> {
    input: R,
    line: String,
}

impl<R: BufRead> KeylogReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
        }
    }
}

fn parse_line(line: &str) -> Option<InputEvent> {
    let mut tokens = line.split_whitespace();
    let marker = tokens.next()?;
    let timing = match marker.strip_prefix('+') {
        Some(delta) => EventTiming::AfterFrames(delta.parse().ok()?),
        None => EventTiming::AtFrame(marker.parse().ok()?),
    };

    let mut event = InputEvent {
        timing,
        ..InputEvent::default()
    };
    for token in tokens {
        let (name, press, release) = if let Some(name) = token.strip_prefix('+') {
            (name, true, false)
        } else if let Some(name) = token.strip_prefix('-') {
            (name, false, true)
        } else {
            (token, false, false)
        };
        let Some(sym) = keysym_for(name) else {
            warn!("unknown key token {token:?}, ignoring");
            continue;
        };
        let button = Button::Key(sym);
        if release {
            event.released.push(button);
        } else {
            event.pressed.push(button);
            if press {
                event.held.push(button);
            }
        }
    }
    Some(event)
}

impl<R: BufRead> EventSource for KeylogReader<R> {
    fn next_event(&mut self) -> Result<Option<InputEvent>, SourceError> {
        loop {
            self.line.clear();
            if self.input.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let line = self.line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_line(line) {
                Some(event) => return Ok(Some(event)),
                None => warn!("malformed event line, skipping: {line:?}"),
            }
        }
    }
}
