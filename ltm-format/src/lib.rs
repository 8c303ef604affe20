//! libTAS movie input row encoding.
//!
//! The playback engine consumes a plain text inputs file with one row
//! per frame:
//!
//! ```text
//! |20:ffe3|-57:0:R:1....|-801:0:0:0:0:0:................|
//! ```
//!
//! This crate encodes resolved [`FrameRecord`]s into that layout
//! ([`encode_frame`], [`ChannelLayout`]) and provides the X11 keysym
//! constants ([`keysym`]) the importers map their key identifiers onto.
//!
//! [`FrameRecord`]: movie_core::FrameRecord

pub mod keysym;
pub mod row;

pub use row::{encode_frame, frame_to_row, ChannelLayout};

/// File extension of the produced movie inputs file.
pub const MOVIE_EXTENSION: &str = "ltm";
