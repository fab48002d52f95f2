use super::*;
use crate::foundation::core::{Point, Rgba8};
use crate::scan::buffer::{ScanBuffer, SlitscanConfig};

fn buffer() -> ScanBuffer {
    ScanBuffer::new(&SlitscanConfig {
        extent: 8,
        steps: 4,
        duration: 2.0,
        background: Rgba8::rgb(0, 0, 0),
    })
    .unwrap()
}

#[test]
fn context_exposes_column_geometry() {
    let mut buf = buffer();
    let mut seen = None;
    let mut probe = column_painter(|ctx, t| {
        seen = Some((ctx.offset(), ctx.time(), t, ctx.extent(), ctx.steps(), ctx.duration()));
        Ok(())
    });
    buf.paint_column(3, 0.25, &mut probe).unwrap();
    assert_eq!(seen, Some((3, 0.25, 0.25, 8.0, 4, 2.0)));
}

#[test]
fn save_guard_restores_transform() {
    let mut buf = buffer();
    let mut checks = Vec::new();
    let mut probe = column_painter(|ctx, _t| {
        checks.push(ctx.transform() == Affine::IDENTITY);
        {
            let mut g = ctx.save();
            g.translate(Vec2::new(3.0, 4.0));
            g.scale(2.0, 0.5);
            let p = g.transform() * Point::new(1.0, 2.0);
            checks.push(p == Point::new(5.0, 5.0));
        }
        checks.push(ctx.transform() == Affine::IDENTITY);
        Ok(())
    });
    buf.paint_column(0, 0.0, &mut probe).unwrap();
    assert_eq!(checks, vec![true, true, true]);
}

#[test]
fn transformed_fill_lands_in_scaled_rows() {
    let mut buf = buffer();
    let mut painter = column_painter(|ctx, _t| {
        let mut g = ctx.save();
        g.translate(Vec2::new(0.0, 2.0));
        g.scale(1.0, 2.0);
        g.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba8::rgb(0, 0, 255));
        Ok(())
    });
    buf.paint_column(1, 0.0, &mut painter).unwrap();
    assert_eq!(buf.pixel(1, 1), Some([0, 0, 0, 255]));
    assert_eq!(buf.pixel(1, 2), Some([0, 0, 255, 255]));
    assert_eq!(buf.pixel(1, 3), Some([0, 0, 255, 255]));
    assert_eq!(buf.pixel(1, 4), Some([0, 0, 0, 255]));
}

#[test]
fn fill_path_covers_polygon_rows() {
    let mut buf = buffer();
    let mut painter = column_painter(|ctx, _t| {
        let mut path = BezPath::new();
        path.move_to((-1.0, 4.0));
        path.line_to((2.0, 4.0));
        path.line_to((2.0, 8.0));
        path.line_to((-1.0, 8.0));
        path.close_path();
        ctx.fill_path(&path, Rgba8::rgb(255, 255, 0));
        Ok(())
    });
    buf.paint_column(2, 0.0, &mut painter).unwrap();
    assert_eq!(buf.pixel(2, 3), Some([0, 0, 0, 255]));
    assert_eq!(buf.pixel(2, 4), Some([255, 255, 0, 255]));
    assert_eq!(buf.pixel(2, 7), Some([255, 255, 0, 255]));
}

#[test]
fn boxed_painters_forward_calls() {
    let mut buf = buffer();
    let mut count = 0usize;
    {
        let mut boxed: Box<dyn ColumnPainter + '_> = Box::new(column_painter(|_ctx, _t| {
            count += 1;
            Ok(())
        }));
        buf.paint_column(0, 0.0, &mut boxed).unwrap();
        buf.paint_column(1, 0.5, &mut boxed).unwrap();
    }
    assert_eq!(count, 2);
}
