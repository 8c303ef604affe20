//! Normalized TAS input model and conversion core.
//!
//! This crate holds everything shared by the format-specific importers:
//!
//! - [`types`]: the normalized event model ([`InputEvent`], [`FrameRecord`],
//!   button bitfields, axis samples)
//! - [`anglemod`]: the inverse solver for the engine's 16-bit angle
//!   quantizer ([`resolve_delta`], [`QuantizerState`])
//! - [`timeline`]: the frame timeline builder expanding run-length,
//!   frame-marker, and row-per-frame encodings into per-frame records
//! - [`gesture`]: the double-tap suppression filter
//! - [`source`]: the [`EventSource`] / [`RecordSink`] seams
//! - [`bridge`]: [`MovieBridge`], driving one conversion end to end
//!
//! One conversion owns one [`TimelineBuilder`]; nothing is shared across
//! files, so concurrent conversions need no coordination.

pub mod anglemod;
pub mod bridge;
pub mod gesture;
pub mod source;
pub mod timeline;
pub mod types;

pub use anglemod::{angle_mod, quantize, resolve_delta, QuantizerState, DEGREES_PER_COUNT};
pub use bridge::{BridgeError, MovieBridge};
pub use gesture::DoubleTapRule;
pub use source::{EventSource, RecordSink, SinkError, SourceError, VecSink};
pub use timeline::{resolve_events, TimelineBuilder, TimelineConfig};
pub use types::{
    AxisSample, Button, EventTiming, FrameRecord, InputEvent, MouseButtons, MouseState, PadButtons,
    PadState, StickAxis, ViewAxis,
};
