//! Normalized playback timeline: progress in [0,1], a direction, and the pure
//! math that maps progress through per-parameter time windows.

use crate::foundation::core::Direction;

/// Clamp a raw progress value into the canonical [0,1] range.
pub fn clamp_progress(progress: f64) -> f64 {
    progress.clamp(0.0, 1.0)
}

/// Inverse lerp: where `value` sits inside `start..end`, unclamped.
///
/// A zero-width range is defined (not NaN): the result is 1.0 when `value`
/// has reached `start`, else 0.0, so a degenerate window behaves as a
/// constant-progress window instead of poisoning the pipeline.
pub fn progress_for_value_in_range(value: f64, start: f64, end: f64) -> f64 {
    if start == end {
        return if value >= start { 1.0 } else { 0.0 };
    }
    (value - start) / (end - start)
}

/// Forward lerp from `start` to `end` by `progress`.
pub fn transition_for_progress_in_range(progress: f64, start: f64, end: f64) -> f64 {
    start + (end - start) * progress
}

/// A sub-window of the overall duration, in milliseconds.
///
/// Each animated parameter may ramp over its own slice of the timeline; the
/// default window spans the full duration. `end_ms == None` means "until the
/// end of the animation", whatever the configured duration is.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeWindow {
    /// Window start, in milliseconds from the beginning of the timeline.
    pub start_ms: f64,
    /// Window end in milliseconds; `None` extends to the full duration.
    pub end_ms: Option<f64>,
}

impl TimeWindow {
    /// The full-duration window.
    pub const FULL: TimeWindow = TimeWindow {
        start_ms: 0.0,
        end_ms: None,
    };

    /// A window covering `start_ms..end_ms`.
    pub fn new(start_ms: f64, end_ms: f64) -> Self {
        Self {
            start_ms,
            end_ms: Some(end_ms),
        }
    }

    fn resolve(self, duration_ms: f64) -> (f64, f64) {
        (self.start_ms, self.end_ms.unwrap_or(duration_ms))
    }
}

/// Playback position state: progress, direction and the paused flag.
///
/// The timeline itself is inert; the controller owns every mutation. All
/// query methods are pure functions of the current fields.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Normalized position in [0,1]. Always clamped.
    pub progress: f64,
    /// Playback direction.
    pub direction: Direction,
    /// Whether progress is currently frozen.
    pub paused: bool,
}

impl Default for Timeline {
    fn default() -> Self {
        // A fresh instance rests at the forward end, paused; `start()` rewinds
        // it before playback.
        Self {
            progress: 1.0,
            direction: Direction::Forward,
            paused: true,
        }
    }
}

impl Timeline {
    /// Candidate progress after `delta_seconds` of wall-clock time.
    ///
    /// Pure: returns the clamped value without committing it.
    pub fn advance(&self, delta_seconds: f64, duration_ms: f64) -> f64 {
        clamp_progress(
            self.progress + self.direction.signum() * delta_seconds / (duration_ms / 1000.0),
        )
    }

    /// Map the global progress into `window` and lerp `start..end` by the
    /// windowed progress.
    pub fn transition_in_range(
        &self,
        start: f64,
        end: f64,
        window: TimeWindow,
        duration_ms: f64,
    ) -> f64 {
        let (window_start_ms, window_end_ms) = window.resolve(duration_ms);
        let local = clamp_progress(progress_for_value_in_range(
            self.progress,
            window_start_ms / duration_ms,
            window_end_ms / duration_ms,
        ));
        transition_for_progress_in_range(local, start, end)
    }

    /// True iff progress sits exactly on the boundary the direction is
    /// heading toward. Exact equality on purpose: clamping guarantees the
    /// boundary is reached as exactly 0.0 or 1.0.
    pub fn is_complete(&self) -> bool {
        match self.direction {
            Direction::Forward => self.progress == 1.0,
            Direction::Reverse => self.progress == 0.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
