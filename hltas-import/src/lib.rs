//! HLTAS recording import.
//!
//! Parses exported HLTAS frame-bulk rows (one line per simulated frame)
//! and maps them to normalized movie events. Movement can be rendered
//! either as keyboard presses or as virtual joystick deflections; view
//! angles are passed through as absolute samples for the core's
//! quantization solver.
//!
//! # Example
//!
//! ```
//! use hltas_import::{HltasMapper, HltasReader, Variant};
//! use movie_core::EventSource;
//!
//! let text = "version 1\nframes\n----------|f---|j-----|0.010000000|90|0|1\n";
//! let mut reader = HltasReader::new(text.as_bytes(), HltasMapper::new(Variant::Keyboard));
//! let event = reader.next_event().unwrap().unwrap();
//! assert!(!event.pressed.is_empty());
//! ```

pub mod mapping;
pub mod parser;

pub use mapping::{HltasMapper, Variant, ACTION_BUTTONS, MOVE_KEYS};
pub use parser::{parse_row, HltasReader, RawRow, SpeedKind};

use ltm_format::ChannelLayout;

/// Output channels of the keyboard variant.
pub const KEYBOARD_LAYOUT: ChannelLayout = ChannelLayout::WITH_MOUSE;

/// Output channels of the joystick variant.
pub const JOYSTICK_LAYOUT: ChannelLayout = ChannelLayout::FULL;
