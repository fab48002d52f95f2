use std::ops::{Deref, DerefMut};

use crate::assets::sprite::Sprite;
use crate::foundation::core::{Affine, BezPath, Rect, Rgba8, Vec2};
use crate::foundation::error::SlitscanResult;
use crate::scan::mapper::TimeMapper;

/// Per-column draw callback invoked by the catch-up scheduler.
///
/// Implementations draw one time-slice of the scan buffer. They must only draw through the
/// supplied context and must not retain it past the call.
pub trait ColumnPainter {
    /// Draw the column for animation time `t`.
    fn paint_column(&mut self, ctx: &mut ColumnContext<'_>, t: f64) -> SlitscanResult<()>;
}

impl<P: ColumnPainter + ?Sized> ColumnPainter for Box<P> {
    fn paint_column(&mut self, ctx: &mut ColumnContext<'_>, t: f64) -> SlitscanResult<()> {
        (**self).paint_column(ctx, t)
    }
}

/// [`ColumnPainter`] backed by a closure; see [`column_painter`].
pub struct FnPainter<F>(F);

impl<F> std::fmt::Debug for FnPainter<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FnPainter").finish_non_exhaustive()
    }
}

impl<F> ColumnPainter for FnPainter<F>
where
    F: FnMut(&mut ColumnContext<'_>, f64) -> SlitscanResult<()>,
{
    fn paint_column(&mut self, ctx: &mut ColumnContext<'_>, t: f64) -> SlitscanResult<()> {
        (self.0)(ctx, t)
    }
}

/// Wrap a closure `|ctx, t| ...` as a [`ColumnPainter`].
pub fn column_painter<F>(f: F) -> FnPainter<F>
where
    F: FnMut(&mut ColumnContext<'_>, f64) -> SlitscanResult<()>,
{
    FnPainter(f)
}

/// Drawing context for one buffer column.
///
/// The underlying raster is one pixel wide and `extent` pixels tall, so everything drawn is
/// clipped to the column. User space starts out as the identity: `(0, 0)..(1, extent)` covers
/// the column exactly.
pub struct ColumnContext<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
    mapper: TimeMapper,
    extent: u32,
    offset: usize,
    time: f64,
    transform: Affine,
}

impl std::fmt::Debug for ColumnContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnContext")
            .field("extent", &self.extent)
            .field("offset", &self.offset)
            .field("time", &self.time)
            .field("transform", &self.transform)
            .finish_non_exhaustive()
    }
}

impl<'a> ColumnContext<'a> {
    pub(crate) fn new(
        ctx: &'a mut vello_cpu::RenderContext,
        mapper: TimeMapper,
        extent: u32,
        offset: usize,
        time: f64,
    ) -> Self {
        Self {
            ctx,
            mapper,
            extent,
            offset,
            time,
            transform: Affine::IDENTITY,
        }
    }

    /// Animation time this column represents.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Buffer column being drawn.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Column height in pixels.
    pub fn extent(&self) -> f64 {
        f64::from(self.extent)
    }

    /// Number of columns in the buffer.
    pub fn steps(&self) -> usize {
        self.mapper.steps()
    }

    /// Time span of one buffer cycle.
    pub fn duration(&self) -> f64 {
        self.mapper.duration()
    }

    /// Current user-to-column transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Replace the current transform.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Translate user space by `v`.
    pub fn translate(&mut self, v: Vec2) {
        self.transform = self.transform * Affine::translate(v);
    }

    /// Scale user space by `(sx, sy)`.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.transform = self.transform * Affine::scale_non_uniform(sx, sy);
    }

    /// Save the transform; it is restored when the returned guard drops.
    pub fn save(&mut self) -> ColumnState<'_, 'a> {
        let saved = self.transform;
        ColumnState { ctx: self, saved }
    }

    /// Fill `rect` (user space) with a solid color.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.apply_color(color);
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Fill `path` (user space) with a solid color using the non-zero rule.
    pub fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.apply_color(color);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Paint `sprite` with its top-left corner at the user-space origin, one user unit per
    /// sprite pixel.
    pub fn draw_sprite(&mut self, sprite: &Sprite) {
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(sprite.paint());
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(sprite.width()),
            f64::from(sprite.height()),
        ));
    }

    /// Direct access to the rasterizer with the current transform applied.
    pub fn render_context(&mut self) -> &mut vello_cpu::RenderContext {
        self.ctx.set_transform(affine_to_cpu(self.transform));
        &mut *self.ctx
    }

    fn apply_color(&mut self, color: Rgba8) {
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }
}

/// Scoped transform save for a [`ColumnContext`]; restores on drop.
pub struct ColumnState<'s, 'a> {
    ctx: &'s mut ColumnContext<'a>,
    saved: Affine,
}

impl std::fmt::Debug for ColumnState<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnState")
            .field("saved", &self.saved)
            .finish_non_exhaustive()
    }
}

impl<'a> Deref for ColumnState<'_, 'a> {
    type Target = ColumnContext<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.ctx
    }
}

impl DerefMut for ColumnState<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.ctx
    }
}

impl Drop for ColumnState<'_, '_> {
    fn drop(&mut self) {
        self.ctx.transform = self.saved;
    }
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scan/column.rs"]
mod tests;
