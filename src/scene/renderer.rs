use std::collections::HashMap;
use std::path::Path;

use crate::assets::sprite::Sprite;
use crate::compositor::slitscan::Slitscan;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{SlitscanError, SlitscanResult};
use crate::items::layer::{Item, ItemLayer};
use crate::render::frame::FrameRGBA;
use crate::render::surface::Surface;
use crate::scene::model::SceneDef;

/// Renders the frames of a [`SceneDef`].
///
/// The scan buffer persists across calls, so rendering frames in increasing order only paints
/// the columns that became due since the previous frame. Any order still produces correct
/// frames.
#[derive(Debug)]
pub struct SceneRenderer {
    def: SceneDef,
    scan: Slitscan<ItemLayer>,
}

impl SceneRenderer {
    /// Validate `def`, load its item images from `assets_root` and allocate the scan buffer.
    pub fn new(def: &SceneDef, assets_root: impl AsRef<Path>) -> SlitscanResult<Self> {
        def.validate()?;
        let root = assets_root.as_ref();

        let mut sprites: HashMap<&str, Sprite> = HashMap::new();
        let mut items = Vec::with_capacity(def.items.len());
        for item in &def.items {
            let sprite = match sprites.get(item.image.as_str()) {
                Some(s) => s.clone(),
                None => {
                    let path = root.join(&item.image);
                    let s = Sprite::from_path(&path)?;
                    tracing::debug!(
                        path = %path.display(),
                        width = s.width(),
                        height = s.height(),
                        "loaded item sprite"
                    );
                    sprites.insert(item.image.as_str(), s.clone());
                    s
                }
            };
            items.push(Item::new(
                sprite,
                item.width,
                item.height,
                item.x_offset,
                item.y_offset,
            ));
        }

        let scan = Slitscan::new(&def.slitscan, ItemLayer::new(items))?;
        Ok(Self {
            def: def.clone(),
            scan,
        })
    }

    /// The scene being rendered.
    pub fn def(&self) -> &SceneDef {
        &self.def
    }

    /// Number of frames in the scene.
    pub fn frame_count(&self) -> u64 {
        self.def.frames
    }

    /// Animation time shown by `frame`.
    pub fn time_of(&self, frame: FrameIndex) -> f64 {
        self.def.fps.frame_to_secs(frame)
    }

    /// The underlying slit-scan compositor.
    pub fn slitscan(&self) -> &Slitscan<ItemLayer> {
        &self.scan
    }

    /// Render one frame.
    #[tracing::instrument(skip(self), fields(t))]
    pub fn render_frame(&mut self, frame: FrameIndex) -> SlitscanResult<FrameRGBA> {
        if frame.0 >= self.def.frames {
            return Err(SlitscanError::config(format!(
                "frame {} out of range (scene has {} frames)",
                frame.0, self.def.frames
            )));
        }
        let t = self.time_of(frame);
        tracing::Span::current().record("t", t);

        let mut surface = Surface::new(self.def.canvas.width, self.def.canvas.height)?;
        surface.clear(self.def.clear);
        let stats = self
            .def
            .trajectory
            .render(&mut self.scan, &mut surface, t)?;
        tracing::debug!(
            columns_painted = stats.catchup.columns_painted,
            columns_drawn = stats.columns_drawn,
            "rendered frame"
        );
        Ok(surface.into_frame())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/renderer.rs"]
mod tests;
