//! Hourglass movie import.
//!
//! Hourglass records Windows games as a binary stream of per-frame
//! virtual-key records (eight key slots per frame). Each record maps
//! onto the keyboard channel; unrecognized key bytes lose their slot
//! only, never the frame.

pub mod mapping;
pub mod parser;

pub use mapping::vk_to_keysym;
pub use parser::{HourglassReader, HEADER_MAGIC, HEADER_SIZE, KEY_SLOTS};

use ltm_format::ChannelLayout;

/// Output channels of this format.
pub const LAYOUT: ChannelLayout = ChannelLayout::KEYBOARD;
