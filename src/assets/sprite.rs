use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{SlitscanError, SlitscanResult};

/// Immutable sprite image: premultiplied RGBA8 pixels shared behind an `Arc`.
///
/// Cloning is cheap; clones view the same pixels.
#[derive(Clone)]
pub struct Sprite {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
    pixmap: Arc<vello_cpu::Pixmap>,
}

impl std::fmt::Debug for Sprite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sprite")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Sprite {
    /// Build a sprite from premultiplied RGBA8 bytes, row-major and tightly packed.
    pub fn from_premul_rgba8(width: u32, height: u32, bytes: Vec<u8>) -> SlitscanResult<Self> {
        if width == 0 || height == 0 {
            return Err(SlitscanError::asset("sprite dimensions must be non-zero"));
        }
        let pixmap = pixmap_from_premul_bytes(&bytes, width, height)?;
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(bytes),
            pixmap: Arc::new(pixmap),
        })
    }

    /// Build a sprite from straight-alpha RGBA8 bytes.
    pub fn from_straight_rgba8(width: u32, height: u32, mut bytes: Vec<u8>) -> SlitscanResult<Self> {
        premultiply_rgba8_in_place(&mut bytes);
        Self::from_premul_rgba8(width, height, bytes)
    }

    /// Decode encoded image bytes (PNG, JPEG, ...).
    pub fn decode(bytes: &[u8]) -> SlitscanResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_straight_rgba8(width, height, rgba.into_raw())
    }

    /// Read and decode an image file.
    pub fn from_path(path: impl AsRef<Path>) -> SlitscanResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read sprite image '{}'", path.display()))?;
        Self::decode(&bytes)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 pixels.
    pub fn pixels(&self) -> &[u8] {
        &self.rgba8_premul
    }

    pub(crate) fn paint(&self) -> vello_cpu::Image {
        vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::clone(&self.pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        }
    }
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> SlitscanResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SlitscanError::asset("sprite width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SlitscanError::asset("sprite height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(SlitscanError::asset("sprite byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    let may_have_opacities = bytes.chunks_exact(4).any(|px| px[3] != 255);
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
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

#[cfg(test)]
#[path = "../../tests/unit/assets/sprite.rs"]
mod tests;
