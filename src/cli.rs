//! Command-line interface.
//!
//! Resolves flags and unit-bearing literals into the immutable
//! [`ScanConfig`] the pipeline consumes. Malformed literals are reported
//! as configuration errors before any decoding starts.

use std::path::PathBuf;

use clap::Parser;

use engravekit_core::error::ConfigResult;
use engravekit_core::units::{parse_length, parse_resolution};
use engravekit_raster::ScanConfig;

/// Convert an image to a G-code engraving program.
#[derive(Parser, Debug)]
#[command(
    name = "engravekit",
    version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"),
    about = "Convert raster and vector images to G-code for 2-axis laser engravers"
)]
pub struct Cli {
    /// Input image (SVG, PNG, JPEG, ...)
    pub infile: PathBuf,

    /// Output file; standard output when omitted
    pub outfile: Option<PathBuf>,

    /// Increase log output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Invert pixels of the input image
    #[arg(short, long)]
    pub invert: bool,

    /// Flip left and right
    #[arg(short, long)]
    pub mirror: bool,

    /// Set every non-background pixel to maximum intensity
    #[arg(short, long)]
    pub black_and_white: bool,

    /// Target resolution (dpi, or a dot pitch like 0.05mm)
    #[arg(short = 'r', long, default_value = "508dpi")]
    pub target_resolution: String,

    /// Resolution the raster input was authored at (defaults to the target)
    #[arg(long)]
    pub source_resolution: Option<String>,

    /// Threshold pixel value interpreted as background
    #[arg(short, long, default_value_t = 1)]
    pub clip: u8,

    /// Command to turn the engraver on
    #[arg(short = '1', long, default_value = "M106")]
    pub on_command: String,

    /// Command to turn the engraver off
    #[arg(short = '0', long, default_value = "M107")]
    pub off_command: String,

    /// Feed rate for light engraving (mm/min)
    #[arg(short = 'f', long, default_value_t = 500)]
    pub light_speed: u32,

    /// Feed rate for full engraving (mm/min)
    #[arg(short = 'l', long, default_value_t = 70)]
    pub low_speed: u32,

    /// Feed rate when moving without engraving (mm/min)
    #[arg(long, default_value_t = 2000)]
    pub move_speed: u32,

    /// Threshold driving value for the engraver
    #[arg(short = 't', long = "engraver-threshold", default_value_t = 90)]
    pub low_power: u32,

    /// Maximal driving value for the engraver
    #[arg(short = 'M', long = "engraver-max", default_value_t = 255)]
    pub max_power: u32,

    /// Offset from the zero position in x-direction
    #[arg(short = 'x', long, default_value = "20mm")]
    pub x_offset: String,

    /// Offset from the zero position in y-direction
    #[arg(short = 'y', long, default_value = "20mm")]
    pub y_offset: String,

    /// File replacing the built-in preamble template
    #[arg(long)]
    pub preamble: Option<PathBuf>,

    /// File replacing the built-in postamble template
    #[arg(long)]
    pub postamble: Option<PathBuf>,
}

impl Cli {
    /// Resolve the unit-bearing literals into a validated scan
    /// configuration.
    pub fn scan_config(&self) -> ConfigResult<ScanConfig> {
        let config = ScanConfig {
            target_resolution: parse_resolution(&self.target_resolution)?,
            x_offset: parse_length(&self.x_offset)?,
            y_offset: parse_length(&self.y_offset)?,
            clip_threshold: self.clip,
            invert: self.invert,
            black_and_white: self.black_and_white,
            mirror: self.mirror,
            on_command: self.on_command.clone(),
            off_command: self.off_command.clone(),
            low_power: self.low_power,
            max_power: self.max_power,
            light_speed: self.light_speed,
            low_speed: self.low_speed,
            move_speed: self.move_speed,
        };
        config.validate()?;
        Ok(config)
    }
}
