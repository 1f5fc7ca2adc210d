//! Preamble/postamble templates with an enumerated slot set.
//!
//! Templates are plain text with named `{slot}` placeholders. Only the
//! slots listed in [`TemplateVars::lookup`] substitute; anything else is
//! left verbatim (and logged), rather than formatting against an unrelated
//! bag of variables.

use tracing::warn;

use engravekit_core::units::format_mm;

use crate::config::ScanConfig;
use crate::mapper::CoordinateMapper;

/// Default program preamble: machine setup, a low-power bounding-box trace
/// for placement, and warning movements before engraving starts.
pub const DEFAULT_PREAMBLE: &str = "\
;This G-code has been generated for a 2-axis laser engraver
;It assumes the laser is controlled by a fan output
;Creation Date: {timestamp}
;----------------------------------------------------------------------------
G26                          ; clear potential 'probe fail' condition
G21                          ; metric values
G90                          ; absolute positioning
M82                          ; set extruder to absolute mode
{off_command}                         ; start with the laser off
M104 S0                      ; hotend off
M140 S0                      ; heated bed off
G92 E0                       ; set extruder position to 0
G28                          ; home all
G1 Z25  F{move_speed}                ; set Z out of the way
G28 X0 Y0                    ; home x and y
M204 S300                    ; set probing acceleration
G29                          ; probe
M204 S2000                   ; restore standard acceleration
G1 X5 Y15 Z25 F5000          ; clear the probe area
G4 S1                        ; pause
M400                         ; clear buffer
{on_low}                     ; laser just visible for focusing
G4 S100                      ; dwell to allow for laser focusing

; Bounding box for placement
G1 X{x0} Y{y0} ; start (lower left corner)
{on_full}
G1 X{x1} Y{y0} F{light_speed} ; lower right
G1 X{x1} Y{y1} F{light_speed} ; upper right
G1 X{x0} Y{y1} F{light_speed} ; upper left
G1 X{x0} Y{y0} F{light_speed} ; lower left
{off_command}
G4 S100 ; dwell for positioning
{on_low}
G1 X{x0} Y{y1} F{light_speed} ; warning movement
G1 X{x0} Y{y0} F{light_speed} ; warning movement
G4 S5   ; dwell to let the warning sink in

; Start engraving
";

/// Default program postamble: laser and heater shutdown.
pub const DEFAULT_POSTAMBLE: &str = "\
; End engraving

; Cleanup
{on_command} S0                               ; laser off
{off_command}                                 ; laser really off
M104 S0                                      ; hotend off
M140 S0                                      ; heated bed off
M84                                          ; steppers off
G90                                          ; absolute positioning
";

/// Values for the enumerated template slots.
#[derive(Debug, Clone)]
pub struct TemplateVars {
    pub timestamp: String,
    pub on_command: String,
    pub off_command: String,
    pub on_low: String,
    pub on_full: String,
    pub x0: String,
    pub y0: String,
    pub x1: String,
    pub y1: String,
    pub light_speed: String,
    pub low_speed: String,
    pub move_speed: String,
}

impl TemplateVars {
    /// Build the slot values for a run: tool tokens and feed rates from the
    /// configuration, bounding-box corners mapped from the matrix extent.
    pub fn new(config: &ScanConfig, cols: u32, rows: u32) -> Self {
        let coords = CoordinateMapper::new(config);
        Self {
            timestamp: chrono::Local::now().format("%a %b %e %T %Y").to_string(),
            on_command: config.on_command.clone(),
            off_command: config.off_command.clone(),
            on_low: format!("{} S{}", config.on_command, config.low_power),
            on_full: format!("{} S{}", config.on_command, config.max_power),
            x0: format_mm(coords.to_x(0)),
            y0: format_mm(coords.to_y(0)),
            x1: format_mm(coords.to_x(cols)),
            y1: format_mm(coords.to_y(rows)),
            light_speed: config.light_speed.to_string(),
            low_speed: config.low_speed.to_string(),
            move_speed: config.move_speed.to_string(),
        }
    }

    /// Value for a slot name, or `None` for an unknown slot.
    fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "timestamp" => Some(&self.timestamp),
            "on_command" => Some(&self.on_command),
            "off_command" => Some(&self.off_command),
            "on_low" => Some(&self.on_low),
            "on_full" => Some(&self.on_full),
            "x0" => Some(&self.x0),
            "y0" => Some(&self.y0),
            "x1" => Some(&self.x1),
            "y1" => Some(&self.y1),
            "light_speed" => Some(&self.light_speed),
            "low_speed" => Some(&self.low_speed),
            "move_speed" => Some(&self.move_speed),
            _ => None,
        }
    }
}

/// Substitute the enumerated slots in a template.
///
/// Unknown slots and unterminated braces are copied through verbatim.
pub fn expand_template(template: &str, vars: &TemplateVars) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match vars.lookup(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        warn!(slot = name, "unknown template slot left verbatim");
                        out.push_str(&rest[open..open + close + 2]);
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}
