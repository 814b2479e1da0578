//! Per-frame parameter derivation: timeline progress in, shader uniforms and
//! mask offset out.

use crate::animation::options::Options;
use crate::animation::timeline::{TimeWindow, Timeline};

/// The three animated values derived from the timeline each tick.
///
/// `amplitude` and `frequency` feed the turbulence shader uniforms;
/// `mask_offset` drives the outline inflate/deflate distance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameParams {
    /// Turbulence amplitude uniform.
    pub amplitude: f64,
    /// Turbulence frequency uniform.
    pub frequency: f64,
    /// Signed mask outline offset, in mask pixels.
    pub mask_offset: f64,
}

impl FrameParams {
    /// Stateless derivation from the current timeline position.
    ///
    /// All three parameters currently ramp over the full duration; the
    /// windowing mechanism stays general so individual parameters can be
    /// confined to a sub-window later.
    pub fn derive(timeline: &Timeline, options: &Options) -> Self {
        let ramp = |from: f64, to: f64| {
            timeline.transition_in_range(from, to, TimeWindow::FULL, options.duration_ms)
        };

        Self {
            amplitude: ramp(options.from_amplitude, options.to_amplitude),
            frequency: ramp(options.from_frequency, options.to_frequency),
            mask_offset: ramp(options.from_offset, options.to_offset),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/params.rs"]
mod tests;
