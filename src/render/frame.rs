use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::SlitscanResult;
use crate::foundation::math::unpremul_px;

/// A rendered frame as RGBA8 pixels.
///
/// Frames produced by [`crate::Surface`] are **premultiplied alpha**; the `premultiplied` flag
/// makes this explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel data converted to straight alpha.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&unpremul_px([px[0], px[1], px[2], px[3]]));
        }
        out
    }

    /// Write the frame as a PNG file, creating parent directories as needed.
    pub fn save_png(&self, path: impl AsRef<Path>) -> SlitscanResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}
