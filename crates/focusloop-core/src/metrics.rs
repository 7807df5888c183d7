//! Pure display metrics consumed by renderers.
//!
//! Everything here is deterministic and side-effect free; the state machine
//! never calls these, observers do.

use serde::{Deserialize, Serialize};

use crate::session::Phase;

/// Ring radius the progress circle is drawn with, in SVG user units.
pub const RING_RADIUS: f64 = 90.0;

/// Format a second count as zero-padded `MM:SS`. Minutes are not capped
/// at 59, so an hour-long countdown renders as `60:00`.
pub fn format_seconds(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format a second count as `Xh Ym`, dropping the hour part below one hour.
pub fn format_duration(secs: u32) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Stroke-dashoffset for the countdown ring: 0 when full, the whole
/// circumference when empty. A zero-duration phase yields 0 rather than
/// dividing by zero.
pub fn progress_ring_offset(remaining: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let circumference = 2.0 * std::f64::consts::PI * RING_RADIUS;
    circumference * (1.0 - remaining as f64 / total as f64)
}

/// Visual urgency category for the remaining-time ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBand {
    Blue,
    Yellow,
    Red,
}

/// Band for a raw remaining/total ratio. Boundary ratios land in the
/// lower band: exactly 0.5 is yellow, exactly 0.2 is red.
pub fn color_band(remaining: u32, total: u32) -> ColorBand {
    if total == 0 {
        return ColorBand::Red;
    }
    let ratio = remaining as f64 / total as f64;
    if ratio > 0.5 {
        ColorBand::Blue
    } else if ratio > 0.2 {
        ColorBand::Yellow
    } else {
        ColorBand::Red
    }
}

/// Band as actually rendered: the urgency scale only applies to work
/// phases, breaks are always shown blue.
pub fn band_for_phase(phase: Phase, remaining: u32, total: u32) -> ColorBand {
    if phase == Phase::Work {
        color_band(remaining, total)
    } else {
        ColorBand::Blue
    }
}

/// Whether the low-time pulse effect should be active.
pub fn pulse_active(remaining: u32, total: u32, running: bool, phase: Phase) -> bool {
    if !running || phase != Phase::Work || total == 0 {
        return false;
    }
    (remaining as f64 / total as f64) < 0.2
}
