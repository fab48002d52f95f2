use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{Affine, Rect, Rgba8, Vec2};
use crate::foundation::error::{SlitscanError, SlitscanResult};
use crate::render::frame::FrameRGBA;
use crate::scan::column::{affine_to_cpu, rect_to_cpu};

/// Destination raster for compositing, backed by a `vello_cpu` render context.
///
/// Draw calls are recorded with the current user-to-device transform and clip stack and are
/// rasterized lazily: pixel reads and frame export flush pending work into the backing pixmap
/// first. Pixels are premultiplied RGBA8.
pub struct Surface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: Arc<vello_cpu::Pixmap>,
    pending: bool,
    transform: Affine,
    clips: Vec<(Affine, Rect)>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("transform", &self.transform)
            .field("clips", &self.clips)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(width: u32, height: u32) -> SlitscanResult<Self> {
        if width == 0 || height == 0 {
            return Err(SlitscanError::config("surface dimensions must be non-zero"));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| SlitscanError::config("surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| SlitscanError::config("surface height exceeds u16"))?;
        Ok(Self {
            width: w,
            height: h,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: Arc::new(vello_cpu::Pixmap::new(w, h)),
            pending: false,
            transform: Affine::IDENTITY,
            clips: Vec::new(),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Premultiplied RGBA8 pixels, row-major.
    pub fn data(&mut self) -> &[u8] {
        self.flush();
        self.pixmap.data_as_u8_slice()
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&mut self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.flush();
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.pixmap.data_as_u8_slice()[idx..idx + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Overwrite every pixel, ignoring transform and clip.
    pub fn clear(&mut self, color: Rgba8) {
        self.ctx.reset();
        self.pending = true;
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    /// Current user-to-device transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Replace the current transform.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Post-multiply the current transform by `a`.
    pub fn concat(&mut self, a: Affine) {
        self.transform = self.transform * a;
    }

    /// Translate user space by `v`.
    pub fn translate(&mut self, v: Vec2) {
        self.concat(Affine::translate(v));
    }

    /// Rotate user space by `angle` radians about its origin.
    pub fn rotate(&mut self, angle: f64) {
        self.concat(Affine::rotate(angle));
    }

    /// Device-space bounding box of the current clip.
    pub fn clip(&self) -> Rect {
        self.clips.iter().fold(self.device_rect(), |acc, (a, r)| {
            acc.intersect(a.transform_rect_bbox(*r))
        })
    }

    /// Intersect the clip with `rect` under the current transform.
    pub fn clip_rect(&mut self, rect: Rect) {
        self.clips.push((self.transform, rect.abs()));
    }

    /// Visible device area mapped back into user space, `None` for a singular transform.
    pub fn user_bounds(&self) -> Option<Rect> {
        let det = self.transform.determinant();
        if !det.is_finite() || det == 0.0 {
            return None;
        }
        Some(self.transform.inverse().transform_rect_bbox(self.clip()))
    }

    /// Save transform and clip; both are restored when the guard drops.
    pub fn save(&mut self) -> SurfaceState<'_> {
        let transform = self.transform;
        let clip_depth = self.clips.len();
        SurfaceState {
            surface: self,
            transform,
            clip_depth,
        }
    }

    /// Fill `rect` (user space) with a solid color.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.fill_rect_by(
            rect,
            vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a),
            Affine::IDENTITY,
        );
    }

    /// Fill `rect` (user space) with an image paint.
    ///
    /// `paint_transform` places image pixel space into user space, so image pixel `(u, v)`
    /// lands on user point `paint_transform * (u, v)`.
    pub fn fill_rect_with(
        &mut self,
        rect: Rect,
        image: &vello_cpu::Image,
        paint_transform: Affine,
    ) {
        self.fill_rect_by(rect, image.clone(), paint_transform);
    }

    /// Rasterize pending draw calls into the backing pixmap.
    pub fn flush(&mut self) {
        if !self.pending {
            return;
        }
        self.ctx.flush();
        let pixmap = Arc::make_mut(&mut self.pixmap);
        pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(pixmap);
        self.ctx.reset();
        self.pending = false;
    }

    /// Copy the pixels out as a frame.
    pub fn to_frame(&mut self) -> FrameRGBA {
        let data = self.data().to_vec();
        FrameRGBA {
            width: self.width(),
            height: self.height(),
            data,
            premultiplied: true,
        }
    }

    /// Consume the surface into a frame.
    pub fn into_frame(mut self) -> FrameRGBA {
        self.flush();
        FrameRGBA {
            width: self.width(),
            height: self.height(),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn device_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Start recording on top of the last flushed pixels.
    fn begin(&mut self) {
        if self.pending {
            return;
        }
        self.ctx.reset();
        self.pending = true;
        self.ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::clone(&self.pixmap)),
            sampler: vello_cpu::peniko::ImageSampler {
                quality: vello_cpu::peniko::ImageQuality::Low,
                ..Default::default()
            },
        });
        self.ctx.fill_rect(&rect_to_cpu(self.device_rect()));
    }

    fn fill_rect_by(
        &mut self,
        rect: Rect,
        paint: impl Into<vello_cpu::PaintType>,
        paint_transform: Affine,
    ) {
        let rect = rect.abs();
        if !rect.is_finite() || rect.area() <= 0.0 {
            return;
        }
        let det = self.transform.determinant() * paint_transform.determinant();
        if !det.is_finite() || det == 0.0 {
            return;
        }
        if self.clip().area() <= 0.0 {
            return;
        }

        self.begin();
        for (a, r) in &self.clips {
            self.ctx.set_transform(affine_to_cpu(*a));
            self.ctx.push_clip_layer(&rect_to_cpu(*r).to_path(0.1));
        }
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx.set_paint_transform(affine_to_cpu(paint_transform));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&rect_to_cpu(rect));
        self.ctx.reset_paint_transform();
        for _ in &self.clips {
            self.ctx.pop_layer();
        }
        self.ctx.reset_transform();
    }
}

/// Scoped state save for a [`Surface`]; restores transform and clip on drop.
#[derive(Debug)]
pub struct SurfaceState<'s> {
    surface: &'s mut Surface,
    transform: Affine,
    clip_depth: usize,
}

impl Deref for SurfaceState<'_> {
    type Target = Surface;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl DerefMut for SurfaceState<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for SurfaceState<'_> {
    fn drop(&mut self) {
        self.surface.transform = self.transform;
        self.surface.clips.truncate(self.clip_depth);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
