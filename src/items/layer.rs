use crate::assets::sprite::Sprite;
use crate::foundation::core::Vec2;
use crate::foundation::error::SlitscanResult;
use crate::scan::column::{ColumnContext, ColumnPainter};

/// A sprite placed in time and space within a slit-scan animation.
///
/// `x_offset` and `width` are in animation time units. `y_offset` and `height` are fractions
/// of the buffer extent.
#[derive(Clone, Debug)]
pub struct Item {
    /// Image drawn for this item; shared, not copied.
    pub sprite: Sprite,
    /// Span along the time axis.
    pub width: f64,
    /// Span along the perpendicular axis, as a fraction of the extent.
    pub height: f64,
    /// Start time.
    pub x_offset: f64,
    /// Start position along the perpendicular axis, as a fraction of the extent.
    pub y_offset: f64,
}

impl Item {
    /// Place `sprite` at `(x_offset, y_offset)` with size `(width, height)`.
    pub fn new(sprite: Sprite, width: f64, height: f64, x_offset: f64, y_offset: f64) -> Self {
        Self {
            sprite,
            width,
            height,
            x_offset,
            y_offset,
        }
    }

    /// Whether the item's start or end time lies in the column window `[t, t + duration]`.
    ///
    /// An item that starts before and ends after the window is not visible.
    pub fn is_visible(&self, t: f64, duration: f64) -> bool {
        let window = t..=t + duration;
        window.contains(&self.x_offset) || window.contains(&(self.x_offset + self.width))
    }
}

/// Column painter drawing a fixed list of [`Item`]s.
///
/// Items are drawn in list order, so later items cover earlier ones.
#[derive(Clone, Debug, Default)]
pub struct ItemLayer {
    items: Vec<Item>,
}

impl ItemLayer {
    /// Layer drawing `items` in the given order.
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Items in draw order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items visible in the column window starting at `t`.
    pub fn visible_at(&self, t: f64, duration: f64) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |it| it.is_visible(t, duration))
    }
}

impl ColumnPainter for ItemLayer {
    fn paint_column(&mut self, ctx: &mut ColumnContext<'_>, t: f64) -> SlitscanResult<()> {
        let duration = ctx.duration();
        let steps = ctx.steps() as f64;
        let extent = ctx.extent();

        for item in self.visible_at(t, duration) {
            let sw = f64::from(item.sprite.width());
            let sh = f64::from(item.sprite.height());
            let mut g = ctx.save();
            g.translate(Vec2::new(
                (item.x_offset - t) / duration * steps,
                item.y_offset * extent,
            ));
            g.scale(
                item.width / duration * steps / sw,
                item.height * extent / sh,
            );
            g.draw_sprite(&item.sprite);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/items/layer.rs"]
mod tests;
