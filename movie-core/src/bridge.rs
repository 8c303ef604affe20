//! MovieBridge: drives one conversion from an event source to a record
//! sink through the timeline builder.

use thiserror::Error;

use crate::source::{EventSource, RecordSink, SinkError, SourceError};
use crate::timeline::{TimelineBuilder, TimelineConfig};

/// Error type for a conversion run.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Connects one source-format reader to one movie sink.
///
/// All conversion state (frame cursor, sticky buttons, quantizer
/// baselines) lives in the bridge's builder; separate conversions are
/// fully independent.
pub struct MovieBridge<S, K> {
    source: S,
    sink: K,
    builder: TimelineBuilder,
}

impl<S: EventSource, K: RecordSink> MovieBridge<S, K> {
    pub fn new(source: S, sink: K, config: TimelineConfig) -> Self {
        Self {
            source,
            sink,
            builder: TimelineBuilder::new(config),
        }
    }

    /// Run the conversion to completion and return the number of frames
    /// written.
    pub fn run(&mut self) -> Result<u64, BridgeError> {
        while let Some(event) = self.source.next_event()? {
            self.builder.push(&event);
            self.flush_pending()?;
        }
        self.builder.finish();
        self.flush_pending()?;
        Ok(self.builder.frames_emitted())
    }

    fn flush_pending(&mut self) -> Result<(), SinkError> {
        for record in self.builder.take_records() {
            self.sink.write_record(&record)?;
        }
        Ok(())
    }

    /// Decompose the bridge into its source and sink.
    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }
}
