use anyhow::{bail, Context};
use clap::Parser;
use log::{info, LevelFilter};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use ltm_format::MOVIE_EXTENSION;
use tas2ltm::{convert, ConvertOptions, Format};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input recording file
    input: PathBuf,

    /// Source format (default: detected from the input extension)
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Output movie file (default: input with the .ltm extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Map HLTAS movement to the virtual joystick instead of keys
    #[arg(long)]
    joystick: bool,

    /// Trailing padding frames after the final event
    #[arg(long)]
    tail_frames: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let format = match args.format.or_else(|| Format::from_path(&args.input)) {
        Some(format) => format,
        None => bail!(
            "cannot detect the format of {}, pass --format",
            args.input.display()
        ),
    };
    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension(MOVIE_EXTENSION));

    let input = File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    let movie = File::create(&output)
        .with_context(|| format!("creating {}", output.display()))?;

    let options = ConvertOptions {
        joystick: args.joystick,
        tail_frames: args.tail_frames,
    };
    info!("converting {} as {format:?}", args.input.display());
    let frames = convert(format, BufReader::new(input), BufWriter::new(movie), &options)
        .with_context(|| format!("converting {}", args.input.display()))?;

    println!("wrote {frames} frames to {}", output.display());
    Ok(())
}
