//! Event source and record sink traits at the format seams.

use thiserror::Error;

use crate::types::{FrameRecord, InputEvent};

/// Fatal errors from a source-format reader.
///
/// Recoverable problems (unknown tokens, malformed rows) are handled
/// inside the reader: the token or row is dropped with a warning and
/// conversion continues. Only problems that make further reading
/// meaningless surface here.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("i/o error reading recording: {0}")]
    Io(#[from] std::io::Error),
    #[error("unusable recording: {0}")]
    Format(String),
}

/// Fatal errors from a record sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("i/o error writing movie: {0}")]
    Io(#[from] std::io::Error),
}

/// A format-specific front-end yielding normalized input events.
///
/// Implementations must yield events in increasing time order and
/// classify each button as sticky or one-shot consistently with the
/// format's physical input model.
pub trait EventSource {
    /// Read the next event, or `None` at end of stream.
    fn next_event(&mut self) -> Result<Option<InputEvent>, SourceError>;
}

/// Destination for resolved per-frame records.
pub trait RecordSink {
    fn write_record(&mut self, record: &FrameRecord) -> Result<(), SinkError>;
}

/// A sink collecting records in memory, for tests and inspection.
#[derive(Debug, Default)]
pub struct VecSink {
    pub records: Vec<FrameRecord>,
}

impl RecordSink for VecSink {
    fn write_record(&mut self, record: &FrameRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }
}
