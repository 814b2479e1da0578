//! Mask outline rasterization.
//!
//! Every render tick the contour polygon is re-rasterized with the current
//! offset: a stroke band of width `2 * |offset|` is composed outside-additively
//! (inflate) or subtractively (deflate) with the filled contour, producing the
//! soft alpha boundary the turbulence shader samples.

use kurbo::{Cap, Join, Stroke, StrokeOpts};

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{BezPath, Canvas, Point};
use crate::foundation::error::{AquarelleError, AquarelleResult};
use crate::mask::contour::{ContourSource, contour_path};

/// Flattening tolerance for stroke expansion, in mask pixels.
const STROKE_TOLERANCE: f64 = 0.25;

/// Single-channel alpha texture produced from the mask outline, consumed by
/// the compositor as the dissolve boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskTexture {
    /// Width in pixels (mask image dimensions).
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major coverage values, one byte per pixel.
    pub alpha: Vec<u8>,
}

impl MaskTexture {
    /// Coverage at `(x, y)`; out-of-bounds reads as 0.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[y as usize * self.width as usize + x as usize]
    }
}

/// Owns the traced contour and the offset applied when rasterizing it.
///
/// The outline is recomputed from `contour + offset` on every render tick;
/// the dirty flag tells the controller when the compositor needs a re-upload.
#[derive(Debug, Default)]
pub struct MaskState {
    contour: Vec<Point>,
    path: BezPath,
    canvas: Option<Canvas>,
    offset: f64,
    texture: Option<MaskTexture>,
    dirty: bool,
}

impl MaskState {
    /// Derive the outline polygon from the mask image's alpha occupancy.
    ///
    /// Called once when the mask image becomes available.
    pub fn load_contour(&mut self, image: &PreparedImage, source: &dyn ContourSource) {
        self.contour = source.trace(image.width, image.height, &|x, y| image.is_opaque_at(x, y));
        self.path = contour_path(&self.contour);
        self.canvas = Some(Canvas {
            width: image.width,
            height: image.height,
        });
        self.dirty = true;
    }

    /// The traced outline polygon.
    pub fn contour(&self) -> &[Point] {
        &self.contour
    }

    /// Current signed outline offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Set the outline offset and mark the texture for re-upload.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
        self.dirty = true;
    }

    /// Consume the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Rasterize the outline with the current offset.
    ///
    /// With no contour loaded (or a degenerate one) this is a no-op and the
    /// last-drawn texture, if any, is returned unchanged.
    pub fn rasterize(&mut self) -> AquarelleResult<Option<&MaskTexture>> {
        let Some(canvas) = self.canvas else {
            return Ok(self.texture.as_ref());
        };
        if self.path.elements().is_empty() {
            return Ok(self.texture.as_ref());
        }

        self.texture = Some(rasterize_outline(&self.path, canvas, self.offset)?);
        Ok(self.texture.as_ref())
    }
}

/// Stroke-then-fill rasterization of the contour path.
#[tracing::instrument(skip(path), fields(width = canvas.width, height = canvas.height))]
fn rasterize_outline(path: &BezPath, canvas: Canvas, offset: f64) -> AquarelleResult<MaskTexture> {
    let fill = coverage(path, canvas)?;

    let alpha = if offset == 0.0 {
        fill
    } else {
        let style = Stroke::new(offset.abs() * 2.0)
            .with_join(Join::Round)
            .with_caps(Cap::Round);
        let band_path = kurbo::stroke(
            path.elements().iter().copied(),
            &style,
            &StrokeOpts::default(),
            STROKE_TOLERANCE,
        );
        let band = coverage(&band_path, canvas)?;

        let compose = if offset < 0.0 {
            subtract_band
        } else {
            add_band
        };
        fill.iter()
            .zip(band.iter())
            .map(|(&f, &b)| compose(f, b))
            .collect()
    };

    Ok(MaskTexture {
        width: canvas.width,
        height: canvas.height,
        alpha,
    })
}

/// Fill `path` white on a transparent surface and return the alpha channel.
fn coverage(path: &BezPath, canvas: Canvas) -> AquarelleResult<Vec<u8>> {
    let width: u16 = canvas
        .width
        .try_into()
        .map_err(|_| AquarelleError::render("mask width exceeds u16"))?;
    let height: u16 = canvas
        .height
        .try_into()
        .map_err(|_| AquarelleError::render("mask height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    ctx.fill_path(&bezpath_to_cpu(path));
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);

    Ok(pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .map(|px| px[3])
        .collect())
}

// Band composition, premultiplied-alpha arithmetic. "Add to outside" is the
// band over the fill (inflate); "subtract from outside" punches the band out
// of the fill (deflate).
fn add_band(fill: u8, band: u8) -> u8 {
    band.saturating_add(mul_div255(u16::from(fill), 255 - u16::from(band)))
}

fn subtract_band(fill: u8, band: u8) -> u8 {
    mul_div255(u16::from(fill), 255 - u16::from(band))
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/mask/raster.rs"]
mod tests;
