use crate::foundation::error::{SlitscanError, SlitscanResult};
use crate::scan::buffer::ScanBuffer;
use crate::scan::column::ColumnPainter;

/// Last painted position of the scan buffer: the time of the most recent advance and the
/// column it landed on.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Cursor {
    time: f64,
    offset: usize,
}

/// Summary of one [`CatchupScheduler::advance_to`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CatchupStats {
    /// Number of draw-callback invocations.
    pub columns_painted: usize,
    /// `true` when every column was repainted after a forward jump of at least one full
    /// period.
    pub full_repaint: bool,
}

/// Incremental redraw scheduler for a [`ScanBuffer`].
///
/// Each advance paints exactly the columns that became due since the previous advance, oldest
/// first, so draw cost tracks elapsed buffer columns rather than frame count.
#[derive(Clone, Debug, Default)]
pub struct CatchupScheduler {
    cursor: Option<Cursor>,
}

impl CatchupScheduler {
    /// Scheduler that has not painted anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time of the most recent successful advance, `None` before the first one.
    pub fn last_drawn_time(&self) -> Option<f64> {
        self.cursor.map(|c| c.time)
    }

    /// Forget the cursor; the next advance bootstraps again.
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    /// Bring `buffer` up to time `t`, invoking `painter` once per newly exposed column in
    /// chronological order.
    ///
    /// Repeated calls with the same `t` are no-ops. At most `steps` columns are painted per
    /// call. Going back in time walks the cursor from its column to the column of `t` like any
    /// other advance, stamping the steps after the previous time. If the painter fails, the cursor stays on the last column that was fully painted.
    pub fn advance_to<P: ColumnPainter + ?Sized>(
        &mut self,
        buffer: &mut ScanBuffer,
        painter: &mut P,
        t: f64,
    ) -> SlitscanResult<CatchupStats> {
        if !t.is_finite() {
            return Err(SlitscanError::geometry(format!(
                "animation time must be finite, got {t}"
            )));
        }

        let mapper = buffer.mapper();
        let steps = mapper.steps();
        let dt = mapper.column_interval();
        let base = mapper.offset(t);

        // (time before the first step, cursor before the first step, number of steps)
        let (start_time, mut offset, count, full_repaint) = match self.cursor {
            None => {
                tracing::trace!(t, "bootstrapping scan buffer");
                (t - dt, (base + 1) % steps, 1, false)
            }
            Some(c) if c.time == t => return Ok(CatchupStats::default()),
            Some(c) if t - c.time >= mapper.duration() => {
                (t - mapper.duration(), base, steps, true)
            }
            Some(c) => (c.time, c.offset, (c.offset + steps - base) % steps, false),
        };

        for k in 1..=count {
            offset = if offset == 0 { steps - 1 } else { offset - 1 };
            let step_time = start_time + (k as f64) * dt;
            buffer.paint_column(offset, step_time, painter)?;
            self.cursor = Some(Cursor {
                time: step_time,
                offset,
            });
        }

        self.cursor = Some(Cursor { time: t, offset: base });
        tracing::debug!(t, columns = count, full_repaint, "scan buffer catch-up");
        Ok(CatchupStats {
            columns_painted: count,
            full_repaint,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scan/scheduler.rs"]
mod tests;
