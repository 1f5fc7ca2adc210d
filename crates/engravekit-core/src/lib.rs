//! # EngraveKit Core
//!
//! Core types and utilities shared by the EngraveKit crates:
//! configuration error taxonomy and physical-unit parsing/formatting
//! for resolutions, lengths, and G-code coordinate text.

pub mod error;
pub mod types;
pub mod units;

pub use error::{ConfigError, ConfigResult};
pub use types::BoxedIterator;
pub use units::{format_mm, parse_length, parse_resolution};
