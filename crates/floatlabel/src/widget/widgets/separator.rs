//! The optional separator line along the field's bottom edge.

use crate::types::{Color, Rect};
use crate::widget::layout::ElementId;

/// A thin filled rectangle.
#[derive(Debug, Clone)]
pub struct SeparatorLine {
    id: ElementId,
    frame: Rect,
    color: Color,
}

impl SeparatorLine {
    /// Create a separator filling `frame` with `color`.
    pub fn new(frame: Rect, color: Color) -> Self {
        Self {
            id: ElementId::next(),
            frame,
            color,
        }
    }

    /// Place a separator of `thickness` along the bottom of `bounds`,
    /// starting `offset_x` from the left edge.
    pub fn along_bottom(bounds: Rect, offset_x: f32, thickness: f32, color: Color) -> Self {
        let frame = Rect::new(
            bounds.left() + offset_x,
            bounds.bottom() - thickness,
            (bounds.width() - offset_x).max(0.0),
            thickness,
        );
        Self::new(frame, color)
    }

    /// This separator instance's element ID.
    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The line thickness.
    pub fn thickness(&self) -> f32 {
        self.frame.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_along_bottom() {
        let line = SeparatorLine::along_bottom(
            Rect::new(0.0, 0.0, 300.0, 60.0),
            16.0,
            1.0,
            Color::GRAY,
        );
        assert_eq!(line.frame(), Rect::new(16.0, 59.0, 284.0, 1.0));
        assert_eq!(line.thickness(), 1.0);
    }
}
