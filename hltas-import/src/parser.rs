//! HLTAS frame-bulk row recognition.
//!
//! Exported HLTAS recordings carry one line per simulated frame:
//!
//! ```text
//! ----------|flrb|jdu12r|0.010000000|92.5|-3.2|1|cl_forwardspeed 400;cl_sidespeed 400;
//! ```
//!
//! Field 1 holds the four movement directions (forward/left/right/back,
//! `-` for released), field 2 the six actions (jump, duck, use, attack1,
//! attack2, reload), then frametime, absolute yaw and pitch in degrees,
//! the frame count of the bulk, and up to two `cl_*speed` console
//! commands carrying the movement speeds of that frame.

use lazy_regex::{lazy_regex, Lazy, Regex};
use log::warn;
use std::io::BufRead;

use movie_core::{EventSource, InputEvent, SourceError};

use crate::mapping::HltasMapper;

static ROW: Lazy<Regex> = lazy_regex!(
    r"^----------\|([a-z\-]+)\|([a-z\d\-]+)\|([\d\.]+)\|(-?[\d\.]+)\|(-?[\d\.]+)\|(\d+)(?:\|cl_([a-z]+)speed ([\d\.]+);)?(?:cl_([a-z]+)speed ([\d\.]+);)?"
);

/// Movement speed console command kinds of interest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeedKind {
    Forward,
    Side,
    Back,
}

impl SpeedKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "forward" => Some(SpeedKind::Forward),
            "side" => Some(SpeedKind::Side),
            "back" => Some(SpeedKind::Back),
            _ => None,
        }
    }
}

/// One parsed frame-bulk row.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawRow {
    /// forward, left, right, back
    pub dirs: [bool; 4],
    /// jump, duck, use, attack1, attack2, reload
    pub actions: [bool; 6],
    pub yaw: f64,
    pub pitch: f64,
    pub speeds: [Option<(SpeedKind, f64)>; 2],
}

/// Parse one line as a frame-bulk row. Returns `None` for every
/// non-frame line (headers, properties, comments).
#[must_use]
pub fn parse_row(line: &str) -> Option<RawRow> {
    let caps = ROW.captures(line)?;

    let dir_field = caps.get(1)?.as_str().as_bytes();
    let action_field = caps.get(2)?.as_str().as_bytes();
    if dir_field.len() < 4 || action_field.len() < 6 {
        warn!("malformed frame row, skipping: {line}");
        return None;
    }

    let mut row = RawRow {
        yaw: caps.get(4)?.as_str().parse().ok()?,
        pitch: caps.get(5)?.as_str().parse().ok()?,
        ..Default::default()
    };
    for (i, slot) in row.dirs.iter_mut().enumerate() {
        *slot = dir_field[i] != b'-';
    }
    for (i, slot) in row.actions.iter_mut().enumerate() {
        *slot = action_field[i] != b'-';
    }

    for (out, group) in row.speeds.iter_mut().zip([7, 9]) {
        let (Some(kind), Some(value)) = (caps.get(group), caps.get(group + 1)) else {
            continue;
        };
        let Some(kind) = SpeedKind::from_name(kind.as_str()) else {
            warn!("unknown speed command cl_{}speed, ignoring", kind.as_str());
            continue;
        };
        match value.as_str().parse() {
            Ok(value) => *out = Some((kind, value)),
            Err(_) => warn!("unreadable speed value {:?}, ignoring", value.as_str()),
        }
    }

    Some(row)
}

/// Streaming reader over an HLTAS export, yielding one event per frame
/// row.
pub struct HltasReader<R> {
    input: R,
    mapper: HltasMapper,
    line: String,
}

impl<R: BufRead> HltasReader<R> {
    pub fn new(input: R, mapper: HltasMapper) -> Self {
        Self {
            input,
            mapper,
            line: String::new(),
        }
    }
}

impl<R: BufRead> EventSource for HltasReader<R> {
    fn next_event(&mut self) -> Result<Option<InputEvent>, SourceError> {
        loop {
            self.line.clear();
            if self.input.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            if let Some(row) = parse_row(self.line.trim_end()) {
                return Ok(Some(self.mapper.map_row(&row)));
            }
        }
    }
}
