use super::*;
use crate::foundation::core::Rgba8;
use crate::scan::buffer::SlitscanConfig;
use crate::scan::column::ColumnContext;

#[derive(Default)]
struct Recorder {
    calls: Vec<(usize, f64)>,
    fail_on_call: Option<usize>,
}

impl ColumnPainter for Recorder {
    fn paint_column(&mut self, ctx: &mut ColumnContext<'_>, t: f64) -> SlitscanResult<()> {
        if self.fail_on_call == Some(self.calls.len()) {
            self.fail_on_call = None;
            return Err(SlitscanError::animation("painter failed"));
        }
        self.calls.push((ctx.offset(), t));
        Ok(())
    }
}

fn buffer(extent: u32, steps: u32, duration: f64) -> ScanBuffer {
    ScanBuffer::new(&SlitscanConfig {
        extent,
        steps,
        duration,
        background: Rgba8::rgb(0, 0, 0),
    })
    .unwrap()
}

#[test]
fn first_advance_paints_one_bootstrap_column() {
    let mut buf = buffer(10, 8, 1.0);
    let mut sched = CatchupScheduler::new();
    let mut rec = Recorder::default();
    assert_eq!(sched.last_drawn_time(), None);

    let stats = sched.advance_to(&mut buf, &mut rec, 0.0).unwrap();
    assert_eq!(stats.columns_painted, 1);
    assert!(!stats.full_repaint);
    assert_eq!(rec.calls, vec![(7, 0.0)]);
    assert_eq!(sched.last_drawn_time(), Some(0.0));
}

#[test]
fn half_period_advance_paints_half_the_columns() {
    let mut buf = buffer(10, 8, 1.0);
    let mut sched = CatchupScheduler::new();
    let mut rec = Recorder::default();
    sched.advance_to(&mut buf, &mut rec, 0.0).unwrap();
    rec.calls.clear();

    let stats = sched.advance_to(&mut buf, &mut rec, 0.5).unwrap();
    assert_eq!(stats.columns_painted, 4);
    assert_eq!(
        rec.calls,
        vec![(6, 0.125), (5, 0.25), (4, 0.375), (3, 0.5)]
    );
}

#[test]
fn repeated_time_is_a_noop() {
    let mut buf = buffer(10, 8, 1.0);
    let mut sched = CatchupScheduler::new();
    let mut rec = Recorder::default();
    sched.advance_to(&mut buf, &mut rec, 0.3).unwrap();
    let before = rec.calls.len();

    let stats = sched.advance_to(&mut buf, &mut rec, 0.3).unwrap();
    assert_eq!(stats, CatchupStats::default());
    assert_eq!(rec.calls.len(), before);
}

#[test]
fn increasing_times_visit_each_offset_once_in_order() {
    let mut buf = buffer(4, 8, 1.0);
    let mut sched = CatchupScheduler::new();
    let mut rec = Recorder::default();
    for t in [0.0, 0.1, 0.3, 0.31, 0.6, 0.9] {
        sched.advance_to(&mut buf, &mut rec, t).unwrap();
    }

    let offsets: Vec<usize> = rec.calls.iter().map(|c| c.0).collect();
    assert_eq!(offsets, vec![7, 6, 5, 4, 3, 2, 1, 0]);
    assert!(rec.calls.windows(2).all(|w| w[0].1 < w[1].1));
}

#[test]
fn sub_column_advance_paints_nothing_but_moves_cursor() {
    let mut buf = buffer(4, 8, 1.0);
    let mut sched = CatchupScheduler::new();
    let mut rec = Recorder::default();
    sched.advance_to(&mut buf, &mut rec, 0.0).unwrap();

    let stats = sched.advance_to(&mut buf, &mut rec, 0.01).unwrap();
    assert_eq!(stats.columns_painted, 0);
    assert_eq!(sched.last_drawn_time(), Some(0.01));
}

#[test]
fn jump_beyond_one_period_repaints_every_column_once() {
    let mut buf = buffer(4, 8, 1.0);
    let mut sched = CatchupScheduler::new();
    let mut rec = Recorder::default();
    sched.advance_to(&mut buf, &mut rec, 0.0).unwrap();
    rec.calls.clear();

    let stats = sched.advance_to(&mut buf, &mut rec, 3.7).unwrap();
    assert!(stats.full_repaint);
    assert_eq!(stats.columns_painted, 8);

    let mut offsets: Vec<usize> = rec.calls.iter().map(|c| c.0).collect();
    assert_eq!(offsets.last().copied(), Some(buf.mapper().offset(3.7)));
    offsets.sort_unstable();
    assert_eq!(offsets, (0..8).collect::<Vec<_>>());

    let last_t = rec.calls.last().unwrap().1;
    assert!((last_t - 3.7).abs() < 1e-9);
    assert!(rec.calls.iter().all(|c| c.1 > 2.7 - 1e-9));
}

#[test]
fn exact_one_period_jump_still_repaints() {
    let mut buf = buffer(4, 8, 1.0);
    let mut sched = CatchupScheduler::new();
    let mut rec = Recorder::default();
    sched.advance_to(&mut buf, &mut rec, 0.0).unwrap();
    rec.calls.clear();

    let stats = sched.advance_to(&mut buf, &mut rec, 1.0).unwrap();
    assert_eq!(stats.columns_painted, 8);
}

#[test]
fn rewind_walks_the_cursor_back_to_the_new_offset() {
    let mut buf = buffer(4, 8, 1.0);
    let mut sched = CatchupScheduler::new();
    let mut rec = Recorder::default();
    sched.advance_to(&mut buf, &mut rec, 0.5).unwrap();
    rec.calls.clear();

    let stats = sched.advance_to(&mut buf, &mut rec, 0.25).unwrap();
    assert!(!stats.full_repaint);
    assert_eq!(stats.columns_painted, 6);
    assert_eq!(
        rec.calls,
        vec![
            (2, 0.625),
            (1, 0.75),
            (0, 0.875),
            (7, 1.0),
            (6, 1.125),
            (5, 1.25)
        ]
    );
    assert_eq!(sched.last_drawn_time(), Some(0.25));
}

#[test]
fn rewind_to_the_same_offset_paints_nothing() {
    let mut buf = buffer(4, 8, 1.0);
    let mut sched = CatchupScheduler::new();
    let mut rec = Recorder::default();
    sched.advance_to(&mut buf, &mut rec, 0.5).unwrap();
    rec.calls.clear();

    let stats = sched.advance_to(&mut buf, &mut rec, 0.49).unwrap();
    assert_eq!(stats.columns_painted, 0);
    assert!(rec.calls.is_empty());
    assert_eq!(sched.last_drawn_time(), Some(0.49));
}

#[test]
fn catchup_never_exceeds_steps() {
    let mut buf = buffer(2, 5, 0.75);
    let mut sched = CatchupScheduler::new();
    let mut rec = Recorder::default();
    for t in [0.0, 0.2, 100.0, 99.0, 1e7, 1e7 + 0.1, -3.0, -2.9] {
        let stats = sched.advance_to(&mut buf, &mut rec, t).unwrap();
        assert!(stats.columns_painted <= 5, "t = {t}");
    }
}

#[test]
fn non_finite_time_is_rejected_without_side_effects() {
    let mut buf = buffer(2, 8, 1.0);
    let mut sched = CatchupScheduler::new();
    let mut rec = Recorder::default();
    sched.advance_to(&mut buf, &mut rec, 0.0).unwrap();

    assert!(sched.advance_to(&mut buf, &mut rec, f64::NAN).is_err());
    assert!(sched.advance_to(&mut buf, &mut rec, f64::INFINITY).is_err());
    assert_eq!(sched.last_drawn_time(), Some(0.0));
    assert_eq!(rec.calls.len(), 1);
}

#[test]
fn painter_failure_keeps_progress_and_retry_resumes() {
    let mut buf = buffer(2, 8, 1.0);
    let mut sched = CatchupScheduler::new();
    let mut rec = Recorder::default();
    sched.advance_to(&mut buf, &mut rec, 0.0).unwrap();

    rec.fail_on_call = Some(3);
    assert!(sched.advance_to(&mut buf, &mut rec, 0.5).is_err());
    assert_eq!(sched.last_drawn_time(), Some(0.25));

    let stats = sched.advance_to(&mut buf, &mut rec, 0.5).unwrap();
    assert_eq!(stats.columns_painted, 2);
    let offsets: Vec<usize> = rec.calls.iter().map(|c| c.0).collect();
    assert_eq!(offsets, vec![7, 6, 5, 4, 3]);
}

#[test]
fn reset_bootstraps_again() {
    let mut buf = buffer(2, 8, 1.0);
    let mut sched = CatchupScheduler::new();
    let mut rec = Recorder::default();
    sched.advance_to(&mut buf, &mut rec, 0.0).unwrap();
    sched.reset();
    assert_eq!(sched.last_drawn_time(), None);

    let stats = sched.advance_to(&mut buf, &mut rec, 0.5).unwrap();
    assert_eq!(stats.columns_painted, 1);
}

#[test]
fn single_step_buffer_paints_at_most_one_column() {
    let mut buf = buffer(2, 1, 1.0);
    let mut sched = CatchupScheduler::new();
    let mut rec = Recorder::default();
    let stats = sched.advance_to(&mut buf, &mut rec, 0.0).unwrap();
    assert_eq!(stats.columns_painted, 1);
    let stats = sched.advance_to(&mut buf, &mut rec, 0.4).unwrap();
    assert_eq!(stats.columns_painted, 0);
    let stats = sched.advance_to(&mut buf, &mut rec, 5.0).unwrap();
    assert_eq!(stats.columns_painted, 1);
}
