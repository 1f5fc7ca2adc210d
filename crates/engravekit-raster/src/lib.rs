//! # EngraveKit Raster
//!
//! The raster-to-toolpath engine. Takes a grayscale intensity matrix and an
//! immutable scan configuration and produces a textual G-code program:
//!
//! 1. **Preprocessing** - thresholding, optional binarization and inversion,
//!    tight bounding-box crop, optional mirroring.
//! 2. **Scanning** - a boustrophedon (zigzag) walk over the cropped matrix
//!    that coalesces runs of constant tool power into minimal motion events.
//! 3. **Emission** - rendering the event sequence between preamble and
//!    postamble templates and writing it atomically to a file or stdout.
//!
//! The pipeline is a single-threaded batch transform; every stage consumes
//! an immutable input and returns a fresh value.

pub mod config;
pub mod emit;
pub mod error;
pub mod mapper;
pub mod preprocess;
pub mod scan;
pub mod template;

pub use config::ScanConfig;
pub use emit::{render_program, write_program, Sink};
pub use error::{EmitError, EmitResult, RasterError, RasterResult};
pub use mapper::{CoordinateMapper, PowerMapper};
pub use preprocess::preprocess;
pub use scan::{scan, MotionEvent};
pub use template::{expand_template, TemplateVars, DEFAULT_POSTAMBLE, DEFAULT_PREAMBLE};
