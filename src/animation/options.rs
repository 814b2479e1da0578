//! Animation configuration: defaults plus shallow per-key merges from a
//! loosely-typed JSON value, frozen after construction.

use crate::foundation::error::{AquarelleError, AquarelleResult};

/// Immutable-after-merge animation configuration.
///
/// Built from the crate defaults plus one shallow merge of user overrides.
/// Override keys use the wire names of the original options object
/// (`fromAmplitude`, `toOffset`, `loop`, `duration`, ...).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Options {
    /// Turbulence amplitude at progress 0.
    pub from_amplitude: f64,
    /// Turbulence amplitude at progress 1.
    pub to_amplitude: f64,
    /// Turbulence frequency at progress 0.
    pub from_frequency: f64,
    /// Turbulence frequency at progress 1.
    pub to_frequency: f64,
    /// Mask outline offset at progress 0. Negative deflates, positive inflates.
    pub from_offset: f64,
    /// Mask outline offset at progress 1.
    pub to_offset: f64,
    /// Start playback as soon as assets finish loading.
    pub autoplay: bool,
    /// Restart automatically after completing, unless paused at completion.
    pub looping: bool,
    /// Total animation duration in milliseconds. Always finite and > 0.
    pub duration_ms: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            from_amplitude: 50.0,
            to_amplitude: 0.0,
            from_frequency: 8.0,
            to_frequency: 7.0,
            from_offset: -30.0,
            to_offset: 28.0,
            autoplay: false,
            looping: false,
            duration_ms: 8000.0,
        }
    }
}

impl Options {
    /// Build the final configuration: defaults, then one shallow merge of
    /// `overrides`.
    ///
    /// A non-object value is ignored entirely and the defaults are kept.
    /// Unknown keys and wrongly-typed values are ignored per-key. A `duration`
    /// override must be finite and positive; anything else is a validation
    /// error since it would corrupt every subsequent progress step.
    pub fn from_value(overrides: &serde_json::Value) -> AquarelleResult<Self> {
        let mut options = Self::default();
        options.merge_value(overrides)?;
        Ok(options)
    }

    fn merge_value(&mut self, value: &serde_json::Value) -> AquarelleResult<()> {
        let Some(map) = value.as_object() else {
            return Ok(());
        };

        let num = |key: &str| map.get(key).and_then(|v| v.as_f64());

        if let Some(v) = num("fromAmplitude") {
            self.from_amplitude = v;
        }
        if let Some(v) = num("toAmplitude") {
            self.to_amplitude = v;
        }
        if let Some(v) = num("fromFrequency") {
            self.from_frequency = v;
        }
        if let Some(v) = num("toFrequency") {
            self.to_frequency = v;
        }
        if let Some(v) = num("fromOffset") {
            self.from_offset = v;
        }
        if let Some(v) = num("toOffset") {
            self.to_offset = v;
        }
        if let Some(v) = map.get("autoplay").and_then(|v| v.as_bool()) {
            self.autoplay = v;
        }
        if let Some(v) = map.get("loop").and_then(|v| v.as_bool()) {
            self.looping = v;
        }
        if let Some(v) = num("duration") {
            if !v.is_finite() || v <= 0.0 {
                return Err(AquarelleError::validation(format!(
                    "duration must be a finite positive number of milliseconds, got {v}"
                )));
            }
            self.duration_ms = v;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/options.rs"]
mod tests;
