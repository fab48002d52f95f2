use crate::animation::anim::{Anim, Interpolator};
use crate::compositor::perspective::Trajectory;
use crate::compositor::slitscan::{RenderStats, Slitscan};
use crate::foundation::core::Point;
use crate::foundation::error::SlitscanResult;
use crate::render::surface::Surface;
use crate::scan::column::ColumnPainter;

/// Animated trajectory: each endpoint coordinate and extent is an [`Anim<f64>`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrajectoryAnim {
    /// Start x.
    pub from_x: Anim<f64>,
    /// Start y.
    pub from_y: Anim<f64>,
    /// Extent at the start.
    pub from_extent: Anim<f64>,
    /// End x.
    pub to_x: Anim<f64>,
    /// End y.
    pub to_y: Anim<f64>,
    /// Extent at the end.
    pub to_extent: Anim<f64>,
}

impl From<Trajectory> for TrajectoryAnim {
    fn from(t: Trajectory) -> Self {
        Self {
            from_x: t.from.x.into(),
            from_y: t.from.y.into(),
            from_extent: t.from_extent.into(),
            to_x: t.to.x.into(),
            to_y: t.to.y.into(),
            to_extent: t.to_extent.into(),
        }
    }
}

impl TrajectoryAnim {
    /// Validate every parameter animation.
    pub fn validate(&self) -> SlitscanResult<()> {
        for anim in self.params() {
            anim.validate()?;
        }
        Ok(())
    }

    /// Resolve the trajectory at animation time `t`.
    pub fn sample(&self, t: f64) -> SlitscanResult<Trajectory> {
        resolve_trajectory(self.params(), t)
    }

    /// Resolve the trajectory at `t` and render `scan` onto `surface` along it.
    pub fn render<P: ColumnPainter>(
        &self,
        scan: &mut Slitscan<P>,
        surface: &mut Surface,
        t: f64,
    ) -> SlitscanResult<RenderStats> {
        let trajectory = self.sample(t)?;
        scan.render(surface, t, &trajectory)
    }

    fn params(&self) -> [&Anim<f64>; 6] {
        [
            &self.from_x,
            &self.from_y,
            &self.from_extent,
            &self.to_x,
            &self.to_y,
            &self.to_extent,
        ]
    }
}

/// Sample `[from_x, from_y, from_extent, to_x, to_y, to_extent]` at `t`.
pub fn resolve_trajectory<I>(params: [&I; 6], t: f64) -> SlitscanResult<Trajectory>
where
    I: Interpolator<f64> + ?Sized,
{
    let [fx, fy, fe, tx, ty, te] = params;
    Ok(Trajectory::new(
        Point::new(fx.value_at(t)?, fy.value_at(t)?),
        fe.value_at(t)?,
        Point::new(tx.value_at(t)?, ty.value_at(t)?),
        te.value_at(t)?,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/driver.rs"]
mod tests;
