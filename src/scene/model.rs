use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::compositor::driver::TrajectoryAnim;
use crate::foundation::core::{Canvas, Fps, Rgba8};
use crate::foundation::error::{SlitscanError, SlitscanResult};
use crate::scan::buffer::SlitscanConfig;

/// JSON description of a slit-scan animation.
///
/// Item image paths are resolved relative to an assets root chosen by the caller (usually the
/// directory holding the scene file).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDef {
    /// Output frame size.
    pub canvas: Canvas,
    /// Output frame rate; frame `n` shows animation time `n / fps`.
    pub fps: Fps,
    /// Number of frames in the animation.
    pub frames: u64,
    /// Color each output frame is cleared to before compositing.
    #[serde(default = "default_clear")]
    pub clear: Rgba8,
    /// Scan buffer configuration.
    pub slitscan: SlitscanConfig,
    /// Items drawn into the scan buffer, in draw order.
    #[serde(default)]
    pub items: Vec<ItemDef>,
    /// Where the buffer is projected in each frame.
    pub trajectory: TrajectoryAnim,
}

/// One [`crate::Item`] as written in a scene file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ItemDef {
    /// Image path, relative to the assets root unless absolute.
    pub image: String,
    /// Span along the time axis, in time units.
    pub width: f64,
    /// Span along the perpendicular axis, as a fraction of the extent.
    pub height: f64,
    /// Start time.
    pub x_offset: f64,
    /// Start position along the perpendicular axis, as a fraction of the extent.
    #[serde(default)]
    pub y_offset: f64,
}

fn default_clear() -> Rgba8 {
    Rgba8::rgb(0, 0, 0)
}

impl SceneDef {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SlitscanResult<Self> {
        serde_json::from_reader(r).map_err(|e| SlitscanError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON string.
    pub fn from_json_str(s: &str) -> SlitscanResult<Self> {
        serde_json::from_str(s).map_err(|e| SlitscanError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SlitscanResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SlitscanError::config(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> SlitscanResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SlitscanError::serde(format!("serialize scene JSON: {e}")))
    }

    /// Check everything that can be checked without loading images.
    pub fn validate(&self) -> SlitscanResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SlitscanError::config("canvas width/height must be > 0"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.frames == 0 {
            return Err(SlitscanError::config("frames must be > 0"));
        }
        self.slitscan.validate()?;

        for (idx, item) in self.items.iter().enumerate() {
            if item.image.trim().is_empty() {
                return Err(SlitscanError::config(format!(
                    "item {idx} has an empty image path"
                )));
            }
            let dims = [item.width, item.height, item.x_offset, item.y_offset];
            if dims.iter().any(|v| !v.is_finite()) {
                return Err(SlitscanError::config(format!(
                    "item {idx} has non-finite placement"
                )));
            }
            if item.width <= 0.0 || item.height <= 0.0 {
                return Err(SlitscanError::config(format!(
                    "item {idx} width/height must be > 0"
                )));
            }
        }

        self.trajectory.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
