use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{SlitscanError, SlitscanResult};
use crate::scan::column::{ColumnContext, ColumnPainter};
use crate::scan::mapper::TimeMapper;

/// Largest buffer dimension supported by the column rasterizer.
pub const MAX_BUFFER_DIM: u32 = u16::MAX as u32;

/// Construction parameters for a slit-scan buffer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlitscanConfig {
    /// Buffer height in pixels (perpendicular to the time axis).
    pub extent: u32,
    /// Buffer width in pixels: number of time slots in one cycle.
    pub steps: u32,
    /// Time span represented by one full cycle of `steps` columns.
    pub duration: f64,
    /// Fill applied to every column before it is drawn.
    pub background: Rgba8,
}

impl SlitscanConfig {
    /// Check construction invariants.
    pub fn validate(&self) -> SlitscanResult<()> {
        if self.extent == 0 || self.extent > MAX_BUFFER_DIM {
            return Err(SlitscanError::config(format!(
                "extent must be in 1..={MAX_BUFFER_DIM}, got {}",
                self.extent
            )));
        }
        if self.steps == 0 || self.steps > MAX_BUFFER_DIM {
            return Err(SlitscanError::config(format!(
                "steps must be in 1..={MAX_BUFFER_DIM}, got {}",
                self.steps
            )));
        }
        TimeMapper::new(self.steps as usize, self.duration)?;
        Ok(())
    }
}

/// Cyclic `steps x extent` pixel strip painted one column at a time.
///
/// Pixels are premultiplied RGBA8, row-major, `steps` pixels per row, held in a shared
/// `vello_cpu` pixmap so the compositor can sample the strip as an image paint.
pub struct ScanBuffer {
    extent: u32,
    mapper: TimeMapper,
    background: Rgba8,
    strip: Arc<vello_cpu::Pixmap>,
    column_ctx: vello_cpu::RenderContext,
    column_pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for ScanBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanBuffer")
            .field("extent", &self.extent)
            .field("mapper", &self.mapper)
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}

impl ScanBuffer {
    /// Allocate a buffer filled with the background color.
    pub fn new(config: &SlitscanConfig) -> SlitscanResult<Self> {
        config.validate()?;
        let mapper = TimeMapper::new(config.steps as usize, config.duration)?;
        let extent_u16: u16 = config
            .extent
            .try_into()
            .map_err(|_| SlitscanError::config("extent exceeds u16"))?;
        let steps_u16: u16 = config
            .steps
            .try_into()
            .map_err(|_| SlitscanError::config("steps exceeds u16"))?;

        let px = vello_cpu::peniko::color::PremulRgba8::from_u8_array(
            config.background.to_premul().to_array(),
        );
        let pixels = vec![px; (config.steps as usize) * (config.extent as usize)];
        let strip = vello_cpu::Pixmap::from_parts_with_opacity(pixels, steps_u16, extent_u16, true);

        Ok(Self {
            extent: config.extent,
            mapper,
            background: config.background,
            strip: Arc::new(strip),
            column_ctx: vello_cpu::RenderContext::new(1, extent_u16),
            column_pixmap: vello_cpu::Pixmap::new(1, extent_u16),
        })
    }

    /// Buffer height in pixels.
    pub fn extent(&self) -> u32 {
        self.extent
    }

    /// Buffer width in pixels.
    pub fn steps(&self) -> usize {
        self.mapper.steps()
    }

    /// Time span of one cycle.
    pub fn duration(&self) -> f64 {
        self.mapper.duration()
    }

    /// Background fill color.
    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Time-to-offset mapping for this buffer.
    pub fn mapper(&self) -> TimeMapper {
        self.mapper
    }

    /// Raw premultiplied RGBA8 pixels, `steps` wide and `extent` tall.
    pub fn pixels(&self) -> &[u8] {
        self.strip.data_as_u8_slice()
    }

    /// The strip as an image paint that tiles in both directions and samples bilinearly.
    pub fn image(&self) -> vello_cpu::Image {
        vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::clone(&self.strip)),
            sampler: vello_cpu::peniko::ImageSampler {
                x_extend: vello_cpu::peniko::Extend::Repeat,
                y_extend: vello_cpu::peniko::Extend::Repeat,
                quality: vello_cpu::peniko::ImageQuality::Medium,
                alpha: 1.0,
            },
        }
    }

    /// Premultiplied RGBA8 pixel at `(column, row)`.
    pub fn pixel(&self, column: usize, row: u32) -> Option<[u8; 4]> {
        if column >= self.steps() || row >= self.extent {
            return None;
        }
        let idx = ((row as usize) * self.steps() + column) * 4;
        let p = &self.pixels()[idx..idx + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Paint the column that time `t` maps to.
    pub fn paint_column_at<P: ColumnPainter + ?Sized>(
        &mut self,
        t: f64,
        painter: &mut P,
    ) -> SlitscanResult<usize> {
        let offset = self.mapper.offset(t);
        self.paint_column(offset, t, painter)?;
        Ok(offset)
    }

    /// Fill column `offset` with the background, let `painter` draw into it at time `t`, and
    /// store the result in the buffer.
    ///
    /// The painter sees a context whose `(0, 0)..(1, extent)` box is exactly this column.
    pub fn paint_column<P: ColumnPainter + ?Sized>(
        &mut self,
        offset: usize,
        t: f64,
        painter: &mut P,
    ) -> SlitscanResult<()> {
        let steps = self.steps();
        if offset >= steps {
            return Err(SlitscanError::config(format!(
                "column offset {offset} out of range for {steps} steps"
            )));
        }

        let extent = f64::from(self.extent);
        let bg = self.background;
        self.column_ctx.reset();
        self.column_ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.column_ctx
            .set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.column_ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        self.column_ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 1.0, extent));

        {
            let mut ctx =
                ColumnContext::new(&mut self.column_ctx, self.mapper, self.extent, offset, t);
            painter.paint_column(&mut ctx, t)?;
        }

        self.column_ctx.flush();
        self.column_pixmap.data_as_u8_slice_mut().fill(0);
        self.column_ctx.render_to_pixmap(&mut self.column_pixmap);

        // Copies the strip if a pending surface draw still holds it.
        let dst = Arc::make_mut(&mut self.strip).data_as_u8_slice_mut();
        let src = self.column_pixmap.data_as_u8_slice();
        for (row, px) in src.chunks_exact(4).enumerate() {
            let idx = (row * steps + offset) * 4;
            dst[idx..idx + 4].copy_from_slice(px);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scan/buffer.rs"]
mod tests;
