use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::AquarelleResult;

/// A decoded RGBA8 image, premultiplied, shared cheaply between the core and
/// the compositor collaborator.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 pixel data, row-major.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Alpha channel value at `(x, y)`. Out-of-bounds coordinates read as 0.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4 + 3;
        self.rgba8_premul.get(idx).copied().unwrap_or(0)
    }

    /// Alpha-occupancy test used for contour tracing: any non-zero alpha
    /// counts as inside the mask.
    pub fn is_opaque_at(&self, x: u32, y: u32) -> bool {
        self.alpha_at(x, y) > 0
    }
}

/// Where a texture or mask image comes from.
///
/// The variant is resolved exactly once, when the instance initializes on its
/// first tick; a path that fails to read or decode moves the instance into the
/// failed state instead of silently never initializing.
#[derive(Clone, Debug)]
pub enum ImageSource {
    /// Read and decode from a filesystem path on first use.
    Path(PathBuf),
    /// An already-decoded image handle.
    Loaded(PreparedImage),
}

impl ImageSource {
    pub(crate) fn resolve(self) -> AquarelleResult<PreparedImage> {
        match self {
            Self::Loaded(img) => Ok(img),
            Self::Path(path) => {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("read image {}", path.display()))?;
                decode_image(&bytes)
            }
        }
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> AquarelleResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}
