//! # EngraveKit
//!
//! Convert raster and vector images to G-code for 2-axis laser engravers.
//!
//! ## Architecture
//!
//! EngraveKit is organized as a workspace with multiple crates:
//!
//! 1. **engravekit-core** - Error taxonomy and unit parsing/formatting
//! 2. **engravekit-decode** - SVG rasterization and raster image decode
//! 3. **engravekit-raster** - Preprocessing, boustrophedon scan, emission
//! 4. **engravekit** - Main binary tying the pipeline together
//!
//! The pipeline is a single-threaded batch transform: decode the input to
//! an intensity matrix, preprocess it, scan it into motion events, render
//! the program, and write it to a file or stdout.

pub mod cli;
pub mod pipeline;

pub use engravekit_decode::{decode_file, DecodeError, DecodeOptions};
pub use engravekit_raster::{
    preprocess, render_program, scan, write_program, EmitError, MotionEvent, RasterError,
    ScanConfig, Sink,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging.
///
/// Sets up structured logging with console output, `RUST_LOG` environment
/// variable support, and a default level raised by the number of `-v`
/// occurrences on the command line.
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    // the program itself may be written to stdout, so logs go to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
