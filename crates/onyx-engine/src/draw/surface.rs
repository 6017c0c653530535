use crate::coords::{Rect, Viewport};
use crate::paint::Color;

use super::{DrawList, FillCmd, ZIndex};

/// Frame-sized canvas that records solid fills.
///
/// A repainting frame starts with [`clear`](Self::clear); everything filled
/// afterwards is drawn on top of the clear color, ordered by layer and then
/// by call order.
#[derive(Debug)]
pub struct Surface {
    viewport: Viewport,
    clear_color: Color,
    layer: ZIndex,
    draw_list: DrawList,
}

impl Surface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            clear_color: Color::BLACK,
            layer: ZIndex::default(),
            draw_list: DrawList::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The whole surface as a rect at the origin.
    pub fn rect(&self) -> Rect {
        self.viewport.rect()
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Drops all recorded fills and sets the color the frame is cleared to.
    pub fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.layer = ZIndex::default();
        self.draw_list.clear();
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Layer subsequent fills are recorded on.
    pub fn set_layer(&mut self, layer: ZIndex) {
        self.layer = layer;
    }

    pub fn layer(&self) -> ZIndex {
        self.layer
    }

    /// Fills the entire surface on the current layer.
    pub fn fill(&mut self, color: Color) {
        self.fill_rect(self.rect(), color);
    }

    /// Fills `rect` on the current layer. Empty rects are dropped.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = rect.normalized();
        if rect.is_empty() || !rect.is_finite() {
            return;
        }
        self.draw_list.push(self.layer, FillCmd { rect, color });
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn draw_list_mut(&mut self) -> &mut DrawList {
        &mut self.draw_list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_covers_viewport_on_current_layer() {
        let mut surface = Surface::new(Viewport::new(300.0, 200.0));
        surface.set_layer(ZIndex(2));
        surface.fill(Color::RED);

        let item = &surface.draw_list().items()[0];
        assert_eq!(item.cmd.rect, Rect::new(0.0, 0.0, 300.0, 200.0));
        assert_eq!(item.key.z, ZIndex(2));
    }

    #[test]
    fn empty_rects_are_dropped() {
        let mut surface = Surface::new(Viewport::new(10.0, 10.0));
        surface.fill_rect(Rect::new(1.0, 1.0, 0.0, 5.0), Color::WHITE);
        assert!(surface.draw_list().is_empty());
    }

    #[test]
    fn clear_resets_fills_and_layer() {
        let mut surface = Surface::new(Viewport::new(10.0, 10.0));
        surface.set_layer(ZIndex(4));
        surface.fill(Color::WHITE);

        surface.clear(Color::BLUE);
        assert!(surface.draw_list().is_empty());
        assert_eq!(surface.layer(), ZIndex(0));
        assert_eq!(surface.clear_color(), Color::BLUE);
    }
}
