//! Pipeline orchestration: decode, preprocess, scan, render, write.

use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use engravekit_decode::{decode_file, DecodeOptions};
use engravekit_raster::{
    preprocess, render_program, scan, write_program, Sink, DEFAULT_POSTAMBLE, DEFAULT_PREAMBLE,
};

use crate::cli::Cli;

/// Run one engraving conversion.
///
/// Either a complete, well-formed program is written to the sink, or an
/// error propagates and nothing is written.
pub fn run(cli: &Cli) -> Result<()> {
    let config = cli.scan_config().context("Invalid configuration")?;

    let source_resolution = cli
        .source_resolution
        .as_deref()
        .map(engravekit_core::units::parse_resolution)
        .transpose()
        .context("Invalid source resolution")?;
    let decode_opts = DecodeOptions {
        target_resolution: config.target_resolution,
        source_resolution,
    };

    let matrix = decode_file(&cli.infile, &decode_opts)
        .with_context(|| format!("Failed to decode '{}'", cli.infile.display()))?;
    info!(
        rows = matrix.height(),
        cols = matrix.width(),
        "input decoded"
    );

    let cropped = preprocess(&matrix, &config).context("Preprocessing failed")?;

    let events = scan(&cropped, &config);

    let preamble = load_template(cli.preamble.as_deref(), DEFAULT_PREAMBLE)?;
    let postamble = load_template(cli.postamble.as_deref(), DEFAULT_POSTAMBLE)?;
    let program = render_program(
        &events,
        &config,
        cropped.width(),
        cropped.height(),
        &preamble,
        &postamble,
    );

    let sink = match &cli.outfile {
        Some(path) => Sink::Path(path.clone()),
        None => Sink::Stdout,
    };
    write_program(&sink, &program).context("Failed to write program")?;

    Ok(())
}

/// Load a template override from a file, or fall back to the built-in text.
fn load_template(path: Option<&std::path::Path>, default: &str) -> Result<String> {
    match path {
        Some(p) => {
            fs::read_to_string(p).with_context(|| format!("Failed to read template '{}'", p.display()))
        }
        None => Ok(default.to_string()),
    }
}
