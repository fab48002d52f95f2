//! Slit-scan animation compositing.
//!
//! A cyclic scan buffer is painted one time-slice (column) at a time by a [`ColumnPainter`],
//! and each output frame projects the buffer onto a moving [`Trajectory`] with perspective
//! foreshortening:
//!
//! - Create a [`Slitscan`] from a [`SlitscanConfig`] and a painter (for example an
//!   [`ItemLayer`])
//! - Call [`Slitscan::render`] once per frame with a destination [`Surface`]
//! - Or describe the whole animation as a [`SceneDef`] and drive it with a [`SceneRenderer`]
//!
//! Advancing is incremental: each render repaints only the buffer columns that became due since
//! the previous one, and never more than one full cycle.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod animation;
pub(crate) mod compositor;
pub(crate) mod items;
pub(crate) mod render;
pub(crate) mod scan;
pub(crate) mod scene;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{SlitscanError, SlitscanResult};

pub use crate::animation::anim::{
    Anim, Expr, InterpMode, Interpolator, Keyframe, Keyframes, Lerp, LoopMode,
};
pub use crate::animation::ease::Ease;
pub use crate::animation::ops::{delay, loop_, mix, ramp, sequence, speed};
pub use crate::assets::sprite::Sprite;
pub use crate::compositor::driver::{TrajectoryAnim, resolve_trajectory};
pub use crate::compositor::perspective::{
    ColumnSpan, Trajectory, lerp_extent, perspective_fraction, plan_columns, reachable_columns,
    source_offset,
};
pub use crate::compositor::slitscan::{RenderStats, Slitscan};
pub use crate::items::layer::{Item, ItemLayer};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::surface::{Surface, SurfaceState};
pub use crate::scan::buffer::{MAX_BUFFER_DIM, ScanBuffer, SlitscanConfig};
pub use crate::scan::column::{
    ColumnContext, ColumnPainter, ColumnState, FnPainter, column_painter,
};
pub use crate::scan::mapper::TimeMapper;
pub use crate::scan::scheduler::{CatchupScheduler, CatchupStats};
pub use crate::scene::model::{ItemDef, SceneDef};
pub use crate::scene::renderer::SceneRenderer;

/// The rasterizer behind [`Surface`] and [`ScanBuffer`], re-exported for image paints.
pub use vello_cpu;
