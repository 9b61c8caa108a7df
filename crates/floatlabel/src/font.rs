//! Font metrics used for sizing text.

/// The platform's default point size for body text.
pub const SYSTEM_FONT_SIZE: f32 = 14.0;

/// Line height as a multiple of point size when no explicit height is set.
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Average glyph advance as a multiple of point size.
const AVERAGE_ADVANCE_FACTOR: f32 = 0.5;

/// A system font at a given point size.
///
/// Only the metrics the widget needs for sizing are modeled: the line height
/// and an average glyph advance for estimating soft wraps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    size: f32,
    line_height: Option<f32>,
}

impl Font {
    /// The system font at `size` points.
    pub fn system(size: f32) -> Self {
        Self {
            size,
            line_height: None,
        }
    }

    /// Override the line height reported by the font.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    /// The point size.
    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Height of one line of text.
    #[inline]
    pub fn line_height(&self) -> f32 {
        self.line_height.unwrap_or(self.size * LINE_HEIGHT_FACTOR)
    }

    /// Average horizontal advance of one glyph.
    #[inline]
    pub fn average_advance(&self) -> f32 {
        self.size * AVERAGE_ADVANCE_FACTOR
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::system(SYSTEM_FONT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_height_override() {
        let font = Font::system(10.0);
        assert!((font.line_height() - 12.0).abs() < f32::EPSILON);
        assert_eq!(font.with_line_height(20.0).line_height(), 20.0);
        assert_eq!(font.with_line_height(20.0).size(), 10.0);
    }
}
