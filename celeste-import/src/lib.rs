//! Celeste Studio recording import.
//!
//! Studio files are run-length encoded: each line declares a frame
//! count and the inputs held for that whole duration, mapped here onto
//! the virtual controller channel (movement and feather angles as left
//! stick deflections, actions as pad buttons).

pub mod mapping;
pub mod parser;

pub use mapping::{button_for, feather_stick, STICK_MAX};
pub use parser::CelesteReader;

use ltm_format::ChannelLayout;

/// Output channels of this format.
pub const LAYOUT: ChannelLayout = ChannelLayout::CONTROLLER;
