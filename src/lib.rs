//! tas2ltm: converts TAS input recordings into libTAS movie input files.
//!
//! Each supported recording tool has its own importer crate producing a
//! normalized event stream; this crate selects the importer, configures
//! the timeline builder for that format, and serializes the resolved
//! frames as movie input rows.

use std::ffi::OsStr;
use std::io::{BufRead, Write};
use std::path::Path;

use clap::ValueEnum;

use ltm_format::{encode_frame, ChannelLayout};
use movie_core::{
    BridgeError, EventSource, FrameRecord, MovieBridge, RecordSink, SinkError, TimelineConfig,
};

/// Supported source recording formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// HLTAS frame-bulk export (Half-Life)
    Hltas,
    /// Celeste Studio recording
    Celeste,
    /// Hourglass binary virtual-key movie
    Hourglass,
    /// Key-event log
    Keylog,
}

impl Format {
    /// Detect the format from the input file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(OsStr::to_str)?;
        match ext.to_ascii_lowercase().as_str() {
            "hltas" => Some(Format::Hltas),
            "tas" => Some(Format::Celeste),
            "wtf" => Some(Format::Hourglass),
            "keylog" => Some(Format::Keylog),
            _ => None,
        }
    }
}

/// Per-invocation settings beyond the format defaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConvertOptions {
    /// Map HLTAS movement to the virtual joystick instead of keys.
    pub joystick: bool,
    /// Override the format's trailing-padding frame count.
    pub tail_frames: Option<u32>,
}

/// Movie sink writing one input row per resolved frame.
pub struct LtmWriter<W> {
    out: W,
    layout: ChannelLayout,
    row: String,
}

impl<W: Write> LtmWriter<W> {
    pub fn new(out: W, layout: ChannelLayout) -> Self {
        Self {
            out,
            layout,
            row: String::new(),
        }
    }

    pub fn flush(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> RecordSink for LtmWriter<W> {
    fn write_record(&mut self, record: &FrameRecord) -> Result<(), SinkError> {
        self.row.clear();
        encode_frame(record, self.layout, &mut self.row);
        self.row.push('\n');
        self.out.write_all(self.row.as_bytes())?;
        Ok(())
    }
}

/// Convert one recording stream into movie rows on `output`.
///
/// Returns the number of frames written.
pub fn convert<R, W>(
    format: Format,
    input: R,
    output: W,
    options: &ConvertOptions,
) -> Result<u64, BridgeError>
where
    R: BufRead,
    W: Write,
{
    let mut config = TimelineConfig::default();
    if let Some(tail) = options.tail_frames {
        config.tail_frames = tail;
    }
    match format {
        Format::Hltas => {
            let (variant, layout) = if options.joystick {
                (hltas_import::Variant::Joystick, hltas_import::JOYSTICK_LAYOUT)
            } else {
                (hltas_import::Variant::Keyboard, hltas_import::KEYBOARD_LAYOUT)
            };
            let mapper = hltas_import::HltasMapper::new(variant);
            let reader = hltas_import::HltasReader::new(input, mapper);
            run_bridge(reader, output, layout, config)
        }
        Format::Celeste => {
            let reader = celeste_import::CelesteReader::new(input);
            run_bridge(reader, output, celeste_import::LAYOUT, config)
        }
        Format::Hourglass => {
            let reader = hourglass_import::HourglassReader::new(input)?;
            run_bridge(reader, output, hourglass_import::LAYOUT, config)
        }
        Format::Keylog => {
            if options.tail_frames.is_none() {
                config.tail_frames = keylog_import::TAIL_FRAMES;
            }
            config.gesture = Some(keylog_import::DOUBLE_TAP);
            let reader = keylog_import::KeylogReader::new(input);
            run_bridge(reader, output, keylog_import::LAYOUT, config)
        }
    }
}

fn run_bridge<S, W>(
    source: S,
    output: W,
    layout: ChannelLayout,
    config: TimelineConfig,
) -> Result<u64, BridgeError>
where
    S: EventSource,
    W: Write,
{
    let mut bridge = MovieBridge::new(source, LtmWriter::new(output, layout), config);
    let frames = bridge.run()?;
    let (_, mut sink) = bridge.into_parts();
    sink.flush().map_err(BridgeError::Sink)?;
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert_to_string(format: Format, input: &[u8], options: &ConvertOptions) -> (u64, String) {
        let mut out = Vec::new();
        let frames = convert(format, input, &mut out, options).unwrap();
        (frames, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("run.hltas")), Some(Format::Hltas));
        assert_eq!(Format::from_path(Path::new("1A.tas")), Some(Format::Celeste));
        assert_eq!(Format::from_path(Path::new("any.WTF")), Some(Format::Hourglass));
        assert_eq!(Format::from_path(Path::new("run.keylog")), Some(Format::Keylog));
        assert_eq!(Format::from_path(Path::new("movie.ltm")), None);
        assert_eq!(Format::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_keylog_end_to_end_with_tail() {
        let options = ConvertOptions {
            tail_frames: Some(2),
            ..Default::default()
        };
        let (frames, text) = convert_to_string(Format::Keylog, b"0 +right\n", &options);
        assert_eq!(frames, 3);
        assert_eq!(text, "|ff53|\n|ff53|\n|ff53|\n");
    }

    #[test]
    fn test_keylog_tap_lasts_one_frame() {
        let options = ConvertOptions {
            tail_frames: Some(1),
            ..Default::default()
        };
        let (_, text) = convert_to_string(Format::Keylog, b"0 +w\n+2 e\n", &options);
        assert_eq!(text, "|77|\n|77|\n|65:77|\n|77|\n");
    }

    #[test]
    fn test_hourglass_end_to_end() {
        let movie = [0x41u8, 0, 0, 0, 0, 0, 0, 0];
        let (frames, text) =
            convert_to_string(Format::Hourglass, &movie, &ConvertOptions::default());
        assert_eq!(frames, 1);
        assert_eq!(text, "|61|\n");
    }

    #[test]
    fn test_celeste_end_to_end() {
        let (frames, text) =
            convert_to_string(Format::Celeste, b"2,R,J\n", &ConvertOptions::default());
        assert_eq!(frames, 2);
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("||0:0:R:.....|"));
        assert!(first.contains("32767:0:0:0:0:0:"));
    }

    #[test]
    fn test_hltas_end_to_end() {
        let row = "----------|f---|------|0.010000000|0|0|1|cl_forwardspeed 400;\n";
        let (frames, text) =
            convert_to_string(Format::Hltas, row.as_bytes(), &ConvertOptions::default());
        assert_eq!(frames, 1);
        // Forward is the 'w' key; the first yaw sample is the baseline, so
        // the mouse channel stays idle.
        assert_eq!(text, "|77|0:0:R:.....|\n");
    }
}
