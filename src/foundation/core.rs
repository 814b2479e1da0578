pub use kurbo::{BezPath, Point};

/// Pixel dimensions of a drawing surface, sized from the loaded texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Playback direction of the dissolve timeline. There is no zero direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Playing toward progress = 1.
    #[default]
    Forward,
    /// Playing toward progress = 0.
    Reverse,
}

impl Direction {
    /// Sign applied to elapsed time when advancing progress.
    pub fn signum(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => -1.0,
        }
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    /// Progress value the timeline rests at once this direction completes.
    pub fn rest_progress(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => 0.0,
        }
    }

    /// Progress value the timeline starts from in this direction.
    pub fn start_progress(self) -> f64 {
        match self {
            Self::Forward => 0.0,
            Self::Reverse => 1.0,
        }
    }
}
