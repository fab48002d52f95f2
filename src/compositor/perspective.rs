//! Reciprocal-interpolation math for projecting the scan buffer onto a trajectory.
//!
//! Everything here is pure: no pixels, no drawing state.

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{SlitscanError, SlitscanResult};

/// Destination placement of the scan buffer for one render call.
///
/// The buffer's time axis runs from `from` to `to`; its perpendicular axis is drawn
/// `from_extent` pixels tall at `from` and `to_extent` pixels tall at `to`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Trajectory {
    /// Start point in destination coordinates.
    pub from: Point,
    /// Perpendicular extent at `from`.
    pub from_extent: f64,
    /// End point in destination coordinates.
    pub to: Point,
    /// Perpendicular extent at `to`.
    pub to_extent: f64,
}

impl Trajectory {
    /// Build a trajectory from its endpoints and extents.
    pub fn new(from: Point, from_extent: f64, to: Point, to_extent: f64) -> Self {
        Self {
            from,
            from_extent,
            to,
            to_extent,
        }
    }

    /// Reject geometry the compositor cannot project.
    ///
    /// Coordinates and extents must be finite, extents non-zero and of the same sign.
    pub fn validate(&self) -> SlitscanResult<()> {
        let coords = [self.from.x, self.from.y, self.to.x, self.to.y];
        if coords.iter().any(|v| !v.is_finite()) {
            return Err(SlitscanError::geometry(
                "trajectory endpoints must be finite",
            ));
        }
        for (name, e) in [("from_extent", self.from_extent), ("to_extent", self.to_extent)] {
            if !e.is_finite() || e == 0.0 {
                return Err(SlitscanError::geometry(format!(
                    "{name} must be finite and non-zero, got {e}"
                )));
            }
        }
        if self.from_extent.signum() != self.to_extent.signum() {
            return Err(SlitscanError::geometry(
                "from_extent and to_extent must have the same sign",
            ));
        }
        Ok(())
    }

    /// Length of the trajectory in destination pixels.
    pub fn span(&self) -> f64 {
        (self.to - self.from).hypot()
    }

    /// Direction of the trajectory in radians.
    pub fn angle(&self) -> f64 {
        let d = self.to - self.from;
        d.y.atan2(d.x)
    }
}

/// Extent at fraction `u` along the trajectory (linear).
pub fn lerp_extent(from_extent: f64, to_extent: f64, u: f64) -> f64 {
    from_extent + u * (to_extent - from_extent)
}

/// Fraction of the buffer cycle shown at fraction `u` along the trajectory.
///
/// Reciprocal interpolation of the extent: `(1/e(u) - 1/from) / (1/to - 1/from)`, evaluated
/// in the closed form `u * to / e(u)`. Equal extents yield the identity ramp `u`.
pub fn perspective_fraction(from_extent: f64, to_extent: f64, u: f64) -> f64 {
    if from_extent == to_extent {
        return u;
    }
    u * to_extent / lerp_extent(from_extent, to_extent, u)
}

/// Continuous source column for fraction `u`, reduced into `[0, steps)`.
pub fn source_offset(from_extent: f64, to_extent: f64, u: f64, steps: usize, base: usize) -> f64 {
    let steps_f = steps as f64;
    (perspective_fraction(from_extent, to_extent, u) * steps_f + base as f64 - 1.0)
        .rem_euclid(steps_f)
}

/// One destination column of a projected strip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSpan {
    /// Column index along the trajectory.
    pub index: usize,
    /// Offset of the column's near edge from the trajectory start.
    pub x: f64,
    /// Column width; `1` except for a fractional last column.
    pub width: f64,
    /// Extent at the near edge.
    pub near_extent: f64,
    /// Extent at the far edge.
    pub far_extent: f64,
    /// Source column at the near edge.
    pub src_start: f64,
    /// Source column at the far edge; `>= src_start`, possibly past `steps` when the range
    /// wraps.
    pub src_end: f64,
}

impl ColumnSpan {
    /// Source width sampled by this column.
    pub fn src_width(&self) -> f64 {
        self.src_end - self.src_start
    }
}

/// Number of leading columns of a trajectory starting at `from` that can intersect `bounds`.
///
/// Every point of column `i` lies at least `i` away from `from`, so columns beyond the farthest
/// corner of `bounds` are invisible.
pub fn reachable_columns(from: Point, bounds: Rect) -> usize {
    let corners = [
        Point::new(bounds.x0, bounds.y0),
        Point::new(bounds.x1, bounds.y0),
        Point::new(bounds.x0, bounds.y1),
        Point::new(bounds.x1, bounds.y1),
    ];
    let far = corners
        .iter()
        .map(|c| c.distance(from))
        .fold(0.0_f64, f64::max);
    if !far.is_finite() {
        return 0;
    }
    (far.floor() as usize).saturating_add(1)
}

/// Split a trajectory of length `span` into destination columns.
///
/// Yields `ceil(span)` columns; zero or negative spans yield none.
pub fn plan_columns(
    span: f64,
    from_extent: f64,
    to_extent: f64,
    steps: usize,
    base: usize,
) -> impl Iterator<Item = ColumnSpan> {
    let count = if span.is_finite() && span > 0.0 {
        span.ceil() as usize
    } else {
        0
    };
    (0..count).map(move |index| {
        let x = index as f64;
        let width = (span - x).min(1.0);
        let u0 = x / span;
        let u1 = (x + width) / span;
        let src_start = source_offset(from_extent, to_extent, u0, steps, base);
        let mut src_end = source_offset(from_extent, to_extent, u1, steps, base);
        if src_end < src_start {
            src_end += steps as f64;
        }
        ColumnSpan {
            index,
            x,
            width,
            near_extent: lerp_extent(from_extent, to_extent, u0),
            far_extent: lerp_extent(from_extent, to_extent, u1),
            src_start,
            src_end,
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/perspective.rs"]
mod tests;
