use crate::compositor::perspective::{Trajectory, plan_columns, reachable_columns};
use crate::foundation::core::{Affine, Rect, Vec2};
use crate::foundation::error::{SlitscanError, SlitscanResult};
use crate::render::surface::Surface;
use crate::scan::buffer::{ScanBuffer, SlitscanConfig};
use crate::scan::column::ColumnPainter;
use crate::scan::scheduler::{CatchupScheduler, CatchupStats};

/// Summary of one [`Slitscan::render`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Catch-up work done before compositing.
    pub catchup: CatchupStats,
    /// Destination columns composited.
    pub columns_drawn: usize,
}

/// A scan buffer, its catch-up cursor and the painter that fills it.
///
/// Each [`Slitscan::render`] advances the buffer to the requested time and projects it onto a
/// [`Trajectory`] of the destination surface with perspective foreshortening.
#[derive(Debug)]
pub struct Slitscan<P> {
    buffer: ScanBuffer,
    scheduler: CatchupScheduler,
    painter: P,
}

impl<P: ColumnPainter> Slitscan<P> {
    /// Allocate the buffer and take ownership of `painter`.
    pub fn new(config: &SlitscanConfig, painter: P) -> SlitscanResult<Self> {
        Ok(Self {
            buffer: ScanBuffer::new(config)?,
            scheduler: CatchupScheduler::new(),
            painter,
        })
    }

    /// The scan buffer.
    pub fn buffer(&self) -> &ScanBuffer {
        &self.buffer
    }

    /// The column painter.
    pub fn painter(&self) -> &P {
        &self.painter
    }

    /// Mutable access to the column painter.
    pub fn painter_mut(&mut self) -> &mut P {
        &mut self.painter
    }

    /// Time of the last advance, `None` before the first.
    pub fn last_drawn_time(&self) -> Option<f64> {
        self.scheduler.last_drawn_time()
    }

    /// Paint every column that became due up to time `t`.
    pub fn advance_to(&mut self, t: f64) -> SlitscanResult<CatchupStats> {
        self.scheduler
            .advance_to(&mut self.buffer, &mut self.painter, t)
    }

    /// Advance to `t` and composite the buffer along `trajectory`.
    ///
    /// The surface's transform and clip are the same on return as on entry, including when an
    /// error is returned. Invalid geometry is rejected before the buffer is touched.
    #[tracing::instrument(skip(self, surface))]
    pub fn render(
        &mut self,
        surface: &mut Surface,
        t: f64,
        trajectory: &Trajectory,
    ) -> SlitscanResult<RenderStats> {
        if !t.is_finite() {
            return Err(SlitscanError::geometry(format!(
                "animation time must be finite, got {t}"
            )));
        }
        trajectory.validate()?;

        let catchup = self.advance_to(t)?;
        let columns_drawn = self.composite(surface, t, trajectory)?;
        tracing::trace!(columns_drawn, "composited scan buffer");
        Ok(RenderStats {
            catchup,
            columns_drawn,
        })
    }

    fn composite(
        &self,
        surface: &mut Surface,
        t: f64,
        trajectory: &Trajectory,
    ) -> SlitscanResult<usize> {
        let span = trajectory.span();
        if span == 0.0 {
            return Ok(0);
        }

        let steps = self.buffer.steps();
        let extent = f64::from(self.buffer.extent());
        let base = self.buffer.mapper().offset(t);
        let from = trajectory.from;
        let source = self.buffer.image();

        let mut s = surface.save();
        let pivot = from.to_vec2();
        s.concat(
            Affine::translate(pivot)
                * Affine::rotate(trajectory.angle())
                * Affine::translate(-pivot),
        );
        // Columns past the farthest visible point can never land on the surface.
        let reach = s
            .user_bounds()
            .map_or(0, |bounds| reachable_columns(from, bounds));

        let mut drawn = 0;
        for col in plan_columns(
            span,
            trajectory.from_extent,
            trajectory.to_extent,
            steps,
            base,
        )
        .take(reach)
        {
            let e0 = col.near_extent;
            let dst_x = from.x + col.x;
            let dst_y = from.y - e0 / 2.0;
            let dst = Rect::new(dst_x, dst_y, dst_x + col.width, dst_y + e0);
            let paint_transform = Affine::translate(Vec2::new(dst_x, dst_y))
                * Affine::scale(e0 / extent)
                * Affine::translate(Vec2::new(-col.src_start, 0.0));
            s.fill_rect_with(dst, &source, paint_transform);
            drawn += 1;
        }
        Ok(drawn)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/slitscan.rs"]
mod tests;
