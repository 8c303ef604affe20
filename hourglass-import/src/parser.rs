//! Hourglass movie reading.
//!
//! An Hourglass movie is a binary stream: an optional fixed-size header
//! (recognized by its magic bytes) followed by one record per frame,
//! each record holding eight virtual-key code slots. A zero byte is an
//! empty slot; any key present in a record is held for that frame.

use log::{debug, warn};
use std::io::{BufRead, Read};

use movie_core::{Button, EventSource, EventTiming, InputEvent, SourceError};

use crate::mapping::vk_to_keysym;

/// Key slots per frame record.
pub const KEY_SLOTS: usize = 8;

/// Header magic and fixed header size.
pub const HEADER_MAGIC: [u8; 4] = *b"wtf1";
pub const HEADER_SIZE: usize = 1024;

/// Streaming reader over an Hourglass movie.
pub struct HourglassReader<R> {
    input: R,
    prev_keys: Vec<u32>,
}

impl<R: BufRead> HourglassReader<R> {
    /// Wrap a movie stream, consuming the header if one is present.
    pub fn new(mut input: R) -> Result<Self, SourceError> {
        if input.fill_buf()?.starts_with(&HEADER_MAGIC) {
            let mut header = [0u8; HEADER_SIZE];
            input
                .read_exact(&mut header)
                .map_err(|_| SourceError::Format("truncated movie header".into()))?;
        } else {
            debug!("no movie header magic, assuming raw key stream");
        }
        Ok(Self {
            input,
            prev_keys: Vec::new(),
        })
    }

    /// Read the next frame record, tolerating a truncated final record.
    fn read_record(&mut self) -> Result<Option<[u8; KEY_SLOTS]>, SourceError> {
        let mut buf = [0u8; KEY_SLOTS];
        let mut filled = 0;
        while filled < KEY_SLOTS {
            let n = self.input.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        if filled == 0 {
            return Ok(None);
        }
        if filled < KEY_SLOTS {
            warn!("truncated final frame record ({filled} bytes), ignoring");
            return Ok(None);
        }
        Ok(Some(buf))
    }
}

impl<R: BufRead> EventSource for HourglassReader<R> {
    fn next_event(&mut self) -> Result<Option<InputEvent>, SourceError> {
        let Some(record) = self.read_record()? else {
            return Ok(None);
        };

        let mut keys = Vec::new();
        for vk in record.into_iter().filter(|&vk| vk != 0) {
            match vk_to_keysym(vk) {
                Some(keysym) => {
                    if !keys.contains(&keysym) {
                        keys.push(keysym);
                    }
                }
                // One bad slot must not cost the frame's other keys.
                None => warn!("unrecognized virtual-key byte {vk:#04x}, skipping slot"),
            }
        }

        let pressed: Vec<Button> = keys.iter().copied().map(Button::Key).collect();
        let released: Vec<Button> = self
            .prev_keys
            .iter()
            .filter(|k| !keys.contains(k))
            .copied()
            .map(Button::Key)
            .collect();
        self.prev_keys = keys;

        Ok(Some(InputEvent {
            timing: EventTiming::Single,
            held: pressed.clone(),
            pressed,
            released,
            axes: Vec::new(),
        }))
    }
}
