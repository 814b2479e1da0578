//! Aquarelle is the progress-driven core of a watercolor dissolve/reveal
//! transition: a textured image dissolves into (or out of) transparency along
//! a mask contour, distorted by a turbulence shader.
//!
//! # Pipeline overview
//!
//! 1. **Tick**: [`Scheduler`] measures the wall-clock delta and advances every
//!    live instance once per display frame.
//! 2. **Advance**: [`Aquarelle`] maps the delta through direction/duration
//!    into a clamped [`Timeline`] progress.
//! 3. **Derive**: [`FrameParams`] turns progress into turbulence uniforms and
//!    the mask outline offset via per-parameter time windows.
//! 4. **Rasterize**: [`MaskState`] re-draws the contour outline, inflated or
//!    deflated by the offset, as the alpha texture the shader samples.
//! 5. **Compose**: the external [`Compositor`] collaborator consumes the
//!    uniforms and mask texture and produces the frame.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded cooperative scheduling**: all state transitions happen
//!   synchronously inside a tick; there is no locking.
//! - **No GPU work here**: shader compilation, composition and contour
//!   tracing are collaborator contracts ([`Compositor`], [`ContourSource`]),
//!   not implementations.
//! - **Defined no-ops over errors**: redundant `play()`/`pause()`/`stop()`
//!   calls and malformed configuration never raise.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod control;
mod foundation;
mod mask;
mod render;

pub use animation::options::Options;
pub use animation::params::FrameParams;
pub use animation::timeline::{
    TimeWindow, Timeline, clamp_progress, progress_for_value_in_range,
    transition_for_progress_in_range,
};
pub use assets::decode::{ImageSource, PreparedImage, decode_image};
pub use control::controller::Aquarelle;
pub use control::events::{AnimationEvent, EventBus, EventKind, ListenerId};
pub use control::scheduler::{InstanceId, Scheduler};
pub use foundation::core::{BezPath, Canvas, Direction, Point};
pub use foundation::error::{AquarelleError, AquarelleResult};
pub use mask::contour::{ContourSource, contour_path};
pub use mask::raster::{MaskState, MaskTexture};
pub use render::compositor::{
    Compositor, CompositorFactory, NullCompositor, NullCompositorFactory, Pass, TurbulenceUniforms,
};
