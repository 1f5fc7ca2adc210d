//! Toolpath program rendering and sink writing.

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::info;

use engravekit_core::units::format_mm;

use crate::config::ScanConfig;
use crate::error::EmitResult;
use crate::scan::MotionEvent;
use crate::template::{expand_template, TemplateVars};

/// Output destination for the finished program.
#[derive(Debug, Clone)]
pub enum Sink {
    /// The standard output stream.
    Stdout,
    /// A named file, replaced atomically on success.
    Path(PathBuf),
}

/// Render the full program text: expanded preamble, one tool-state line and
/// one positioning line per motion event, a blank line per row marker, and
/// the expanded postamble.
pub fn render_program(
    events: &[MotionEvent],
    config: &ScanConfig,
    cols: u32,
    rows: u32,
    preamble: &str,
    postamble: &str,
) -> String {
    let vars = TemplateVars::new(config, cols, rows);
    let mut program = expand_template(preamble, &vars);
    for event in events {
        match event {
            MotionEvent::Travel { x, y, feed } => {
                program.push_str(&config.off_command);
                program.push('\n');
                program.push_str(&format!(
                    "G1 X{} Y{} F{}\n",
                    format_mm(*x),
                    format_mm(*y),
                    feed
                ));
            }
            MotionEvent::Engrave { x, y, feed, power } => {
                program.push_str(&format!("{} S{}\n", config.on_command, power));
                program.push_str(&format!(
                    "G1 X{} Y{} F{}\n",
                    format_mm(*x),
                    format_mm(*y),
                    feed
                ));
            }
            MotionEvent::RowEnd => program.push('\n'),
        }
    }
    program.push_str(&expand_template(postamble, &vars));
    program
}

/// Write a finished program to its sink.
///
/// File writes go through a temporary file in the destination directory
/// that is persisted over the target only after the full program has been
/// written, so a failure leaves the destination in its prior state.
pub fn write_program(sink: &Sink, program: &str) -> EmitResult<()> {
    match sink {
        Sink::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(program.as_bytes())?;
            handle.flush()?;
        }
        Sink::Path(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
            tmp.write_all(program.as_bytes())?;
            tmp.flush()?;
            tmp.persist(path).map_err(|e| e.error)?;
            info!(path = %path.display(), bytes = program.len(), "toolpath written");
        }
    }
    Ok(())
}
