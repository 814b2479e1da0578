//! Renderer/compositor collaborator contract.
//!
//! The core never touches a GPU: it derives uniforms and the mask texture and
//! issues opaque calls against these traits. Backends (GPU, test doubles,
//! headless) live outside the crate.

use crate::assets::decode::PreparedImage;
use crate::foundation::core::Canvas;
use crate::foundation::error::AquarelleResult;
use crate::mask::raster::MaskTexture;

/// Turbulence shader uniforms derived from the timeline each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TurbulenceUniforms {
    /// Distortion intensity.
    pub amplitude: f64,
    /// Distortion scale.
    pub frequency: f64,
}

/// Composition passes installed once at initialization, mirroring the
/// clear → turbulence → output chain of the dissolve effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pass {
    /// Clear the target to transparent.
    Clear,
    /// The watercolor turbulence pass over (texture, mask).
    Turbulence(TurbulenceUniforms),
    /// Copy the composed result to the screen/output surface.
    Output,
}

/// The external rendering collaborator.
///
/// A failure reported from [`Compositor::render`] is fatal to the owning
/// instance only; the scheduler keeps ticking every other instance.
pub trait Compositor {
    /// Pixel dimensions of the drawing surface, sized from the loaded texture.
    fn canvas(&self) -> Canvas;

    /// Append a pass to the composition chain.
    fn add_pass(&mut self, pass: Pass) -> AquarelleResult<()>;

    /// Update the turbulence uniforms for the next frame.
    fn set_uniforms(&mut self, uniforms: TurbulenceUniforms);

    /// Re-upload the mask alpha texture after it changed.
    fn upload_mask(&mut self, mask: &MaskTexture) -> AquarelleResult<()>;

    /// Clear the drawing surface ahead of the frame.
    fn clear(&mut self);

    /// Compose and present one frame.
    fn render(&mut self, delta_seconds: f64) -> AquarelleResult<()>;
}

/// Builds the compositor lazily, sized from the decoded texture.
pub trait CompositorFactory {
    /// Create the compositor for `texture`. Called once per instance, on the
    /// first tick after both assets resolved.
    fn create(&mut self, texture: &PreparedImage) -> AquarelleResult<Box<dyn Compositor>>;
}

/// A compositor that accepts everything and draws nothing.
///
/// Useful for headless runs where only the timeline/event side of the core is
/// wanted, and as a starting point for test doubles.
#[derive(Debug)]
pub struct NullCompositor {
    canvas: Canvas,
}

impl NullCompositor {
    /// Build a null compositor with the given surface size.
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas }
    }
}

impl Compositor for NullCompositor {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn add_pass(&mut self, _pass: Pass) -> AquarelleResult<()> {
        Ok(())
    }

    fn set_uniforms(&mut self, _uniforms: TurbulenceUniforms) {}

    fn upload_mask(&mut self, _mask: &MaskTexture) -> AquarelleResult<()> {
        Ok(())
    }

    fn clear(&mut self) {}

    fn render(&mut self, _delta_seconds: f64) -> AquarelleResult<()> {
        Ok(())
    }
}

/// Factory producing [`NullCompositor`]s sized from the texture.
#[derive(Debug, Default)]
pub struct NullCompositorFactory;

impl CompositorFactory for NullCompositorFactory {
    fn create(&mut self, texture: &PreparedImage) -> AquarelleResult<Box<dyn Compositor>> {
        Ok(Box::new(NullCompositor::new(Canvas {
            width: texture.width,
            height: texture.height,
        })))
    }
}
