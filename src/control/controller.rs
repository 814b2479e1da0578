//! The dissolve instance: orchestrates timeline, parameter derivation, mask
//! rasterization and the compositor, and emits lifecycle events.

use crate::animation::options::Options;
use crate::animation::params::FrameParams;
use crate::animation::timeline::Timeline;
use crate::assets::decode::ImageSource;
use crate::control::events::{AnimationEvent, EventBus, EventKind, ListenerId};
use crate::foundation::core::Direction;
use crate::foundation::error::{AquarelleError, AquarelleResult};
use crate::mask::contour::ContourSource;
use crate::mask::raster::MaskState;
use crate::render::compositor::{Compositor, CompositorFactory, Pass, TurbulenceUniforms};

/// Where the instance is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Assets not yet resolved; `render`/`reset` are no-ops.
    Pending,
    /// Compositor built, animation live.
    Ready,
    /// Asset loading or rendering failed; permanently inert.
    Failed,
}

struct PendingAssets {
    texture: ImageSource,
    mask: ImageSource,
}

/// A watercolor dissolve animation instance.
///
/// Exclusively owns its [`Timeline`], [`Options`] and [`MaskState`]; the
/// compositor is external-collaborator state, built lazily on the first tick
/// once both images resolved. Play/pause/stop/start misuse (calling them
/// redundantly) is a defined no-op, never an error.
pub struct Aquarelle {
    options: Options,
    timeline: Timeline,
    mask: MaskState,
    contours: Box<dyn ContourSource>,
    factory: Box<dyn CompositorFactory>,
    compositor: Option<Box<dyn Compositor>>,
    pending: Option<PendingAssets>,
    phase: Phase,
    initialized: bool,
    events: EventBus,
}

impl Aquarelle {
    /// Build an instance from its asset sources and configuration overrides.
    ///
    /// `overrides` follows the shallow-merge rules of [`Options::from_value`];
    /// loading is deferred to the first tick, so a bad image path surfaces as
    /// a `load_failed` event rather than a constructor error.
    pub fn new(
        texture: ImageSource,
        mask: ImageSource,
        overrides: &serde_json::Value,
        contours: Box<dyn ContourSource>,
        factory: Box<dyn CompositorFactory>,
    ) -> AquarelleResult<Self> {
        Ok(Self {
            options: Options::from_value(overrides)?,
            timeline: Timeline::default(),
            mask: MaskState::default(),
            contours,
            factory,
            compositor: None,
            pending: Some(PendingAssets { texture, mask }),
            phase: Phase::Pending,
            initialized: false,
            events: EventBus::default(),
        })
    }

    /// The merged, frozen configuration.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current normalized progress.
    pub fn progress(&self) -> f64 {
        self.timeline.progress
    }

    /// Current playback direction.
    pub fn direction(&self) -> Direction {
        self.timeline.direction
    }

    /// Whether playback is frozen.
    pub fn is_paused(&self) -> bool {
        self.timeline.paused
    }

    /// Whether progress sits on the boundary the direction heads toward.
    pub fn is_complete(&self) -> bool {
        self.timeline.is_complete()
    }

    /// Whether assets resolved and the first reset ran.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the instance gave up after a load or render failure.
    pub fn has_failed(&self) -> bool {
        self.phase == Phase::Failed
    }

    /// Register an event listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&AnimationEvent) + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    /// Remove an event listener.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Resume playback. No-op if already playing.
    pub fn play(&mut self) {
        if !self.timeline.paused {
            return;
        }
        self.timeline.paused = false;
        self.emit(EventKind::Played);
    }

    /// Freeze playback. No-op if already paused.
    pub fn pause(&mut self) {
        if self.timeline.paused {
            return;
        }
        self.timeline.paused = true;
        if self.initialized {
            self.emit(EventKind::Paused);
        }
    }

    /// Force progress to the direction's rest value and pause.
    ///
    /// No-op when already resting and paused.
    pub fn stop(&mut self) {
        let rest = self.timeline.direction.rest_progress();
        if self.timeline.progress == rest && self.timeline.paused {
            return;
        }
        self.timeline.progress = rest;
        self.pause();
        if self.initialized {
            self.emit(EventKind::Stopped);
        }
    }

    /// Rewind progress to the direction's start value and play.
    ///
    /// No-op when already at the start and playing.
    pub fn start(&mut self) {
        let begin = self.timeline.direction.start_progress();
        if self.timeline.progress == begin && !self.timeline.paused {
            return;
        }
        self.timeline.progress = begin;
        self.emit(EventKind::Started);
        self.play();
    }

    /// Flip the playback direction. Toggle only: progress is untouched and no
    /// event fires.
    pub fn reverse(&mut self) {
        self.timeline.direction = self.timeline.direction.reversed();
    }

    /// Re-derive all mapped parameters from the current progress and handle
    /// completion.
    ///
    /// No-op until the compositor exists. On completion the ordering is a
    /// deliberate two-step protocol: snapshot the paused flag, then `stop()`
    /// (which itself forces paused), then consult the snapshot for the loop
    /// restart — so a pause issued during the completing frame suppresses the
    /// restart. Do not reorder.
    pub fn reset(&mut self) {
        let Some(compositor) = self.compositor.as_mut() else {
            return;
        };

        let params = FrameParams::derive(&self.timeline, &self.options);
        compositor.set_uniforms(TurbulenceUniforms {
            amplitude: params.amplitude,
            frequency: params.frequency,
        });
        self.mask.set_offset(params.mask_offset);

        self.emit(EventKind::Changed);

        if self.timeline.is_complete() {
            self.emit(EventKind::Completed);

            let was_paused = self.timeline.paused;
            self.stop();

            if self.timeline.is_complete() && self.options.looping && !was_paused {
                self.start();
            }
        }
    }

    /// Advance one frame by `delta_seconds` of wall-clock time.
    ///
    /// Runs deferred initialization on the first call; afterwards advances
    /// the timeline (when playing), re-derives parameters on any progress
    /// change, re-rasterizes the mask and drives the compositor. A compositor
    /// failure flips this instance to the failed state without affecting any
    /// sibling instance.
    pub fn render(&mut self, delta_seconds: f64) -> AquarelleResult<()> {
        self.ensure_initialized();
        if self.phase != Phase::Ready || self.compositor.is_none() {
            return Ok(());
        }

        let candidate = self.timeline.advance(delta_seconds, self.options.duration_ms);
        if !self.timeline.paused && candidate != self.timeline.progress {
            self.timeline.progress = candidate;
            self.reset();
        }

        let upload = self.mask.take_dirty();
        let texture = self.mask.rasterize()?;

        let compositor = self
            .compositor
            .as_mut()
            .ok_or_else(|| AquarelleError::render("compositor disappeared mid-frame"))?;
        if upload && let Some(texture) = texture {
            compositor.upload_mask(texture)?;
        }
        compositor.clear();
        if let Err(err) = compositor.render(delta_seconds) {
            self.phase = Phase::Failed;
            return Err(err);
        }
        Ok(())
    }

    fn ensure_initialized(&mut self) {
        let Some(assets) = self.pending.take() else {
            return;
        };
        match self.initialize(assets) {
            Ok(()) => {
                self.phase = Phase::Ready;
                self.emit(EventKind::Created);
                if self.options.autoplay {
                    self.start();
                }
                self.reset();
                self.initialized = true;
            }
            Err(err) => {
                tracing::warn!(error = %err, "asset load failed; instance disabled");
                self.phase = Phase::Failed;
                self.emit(EventKind::LoadFailed);
            }
        }
    }

    fn initialize(&mut self, assets: PendingAssets) -> AquarelleResult<()> {
        let texture = assets.texture.resolve()?;
        let mask_image = assets.mask.resolve()?;

        self.mask.load_contour(&mask_image, self.contours.as_ref());

        let mut compositor = self.factory.create(&texture)?;
        compositor.add_pass(Pass::Clear)?;
        compositor.add_pass(Pass::Turbulence(TurbulenceUniforms::default()))?;
        compositor.add_pass(Pass::Output)?;
        self.compositor = Some(compositor);
        Ok(())
    }

    fn emit(&mut self, kind: EventKind) {
        let event = AnimationEvent::now(
            kind,
            self.timeline.direction,
            self.timeline.progress,
            self.timeline.is_complete(),
        );
        self.events.dispatch(&event);
    }
}

impl std::fmt::Debug for Aquarelle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aquarelle")
            .field("phase", &self.phase)
            .field("timeline", &self.timeline)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/control/controller.rs"]
mod tests;
