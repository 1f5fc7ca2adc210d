//! Unit parsing and formatting utilities.
//!
//! Handles the unit-bearing literals accepted on the command line
//! (resolutions as dpi or dot pitch, lengths in metric or imperial units)
//! and the fixed-point coordinate text used in generated G-code.

use crate::error::{ConfigError, ConfigResult};

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Split a literal into its numeric part and trailing unit suffix.
fn split_unit(literal: &str) -> (&str, &str) {
    let trimmed = literal.trim();
    let split_at = trimmed
        .rfind(|c: char| !c.is_ascii_alphabetic())
        .map_or(0, |i| i + 1);
    let (number, unit) = trimmed.split_at(split_at);
    (number.trim(), unit)
}

fn parse_number(literal: &str, number: &str) -> ConfigResult<f64> {
    number
        .parse::<f64>()
        .map_err(|_| ConfigError::MalformedNumber(literal.to_string()))
}

/// Parse a length literal to millimeters.
///
/// Accepts a bare number (assumed mm) or a `mm`, `cm`, `in`, or `mil`
/// suffix: `"20"`, `"20mm"`, `"2cm"`, `"0.79in"`.
pub fn parse_length(literal: &str) -> ConfigResult<f64> {
    let (number, unit) = split_unit(literal);
    let value = parse_number(literal, number)?;
    match unit.to_lowercase().as_str() {
        "" | "mm" => Ok(value),
        "cm" => Ok(value * 10.0),
        "in" => Ok(value * MM_PER_INCH),
        "mil" => Ok(value * MM_PER_INCH / 1000.0),
        other => Err(ConfigError::UnknownUnit {
            literal: literal.to_string(),
            unit: other.to_string(),
        }),
    }
}

/// Parse a resolution literal to dots per inch.
///
/// Accepts a bare number or `dpi` suffix (`"508"`, `"508dpi"`), or a dot
/// pitch given as a length (`"0.05mm"`, `"2mil"`), which resolves to the
/// reciprocal resolution.
pub fn parse_resolution(literal: &str) -> ConfigResult<f64> {
    let (number, unit) = split_unit(literal);
    let value = parse_number(literal, number)?;
    let dpi = match unit.to_lowercase().as_str() {
        "" | "dpi" => value,
        // A length is a dot pitch; one dot every `pitch` of length.
        "mm" | "cm" | "in" | "mil" => {
            let pitch_mm = parse_length(literal)?;
            if pitch_mm <= 0.0 {
                return Err(ConfigError::NonPositiveResolution(pitch_mm));
            }
            MM_PER_INCH / pitch_mm
        }
        other => {
            return Err(ConfigError::UnknownUnit {
                literal: literal.to_string(),
                unit: other.to_string(),
            })
        }
    };
    if dpi <= 0.0 {
        return Err(ConfigError::NonPositiveResolution(dpi));
    }
    Ok(dpi)
}

/// Format a millimeter coordinate for G-code output.
///
/// Fixed-point with up to three decimals, trailing zeros trimmed, and at
/// least one decimal kept, so `20.0` renders as `"20.0"` and `20.15` as
/// `"20.15"`.
pub fn format_mm(value: f64) -> String {
    let mut text = format!("{:.3}", value);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.push('0');
    }
    text
}
