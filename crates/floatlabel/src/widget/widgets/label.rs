//! The floating placeholder label.

use crate::font::Font;
use crate::types::{Color, HorizontalAlign, Rect, Size};
use crate::widget::layout::ElementId;
use crate::widget::text_surface::grapheme_len;

/// A static text overlay that shows the field's hint.
///
/// The label wraps onto as many lines as it needs (`number_of_lines == 0`)
/// and has a transparent background.
#[derive(Debug, Clone)]
pub struct PlaceholderLabel {
    id: ElementId,
    text: String,
    font: Font,
    color: Color,
    alignment: HorizontalAlign,
    number_of_lines: usize,
    background_color: Color,
    frame: Rect,
}

impl PlaceholderLabel {
    /// Create a label with `text` in `font`.
    pub fn new(text: impl Into<String>, font: Font) -> Self {
        Self {
            id: ElementId::next(),
            text: text.into(),
            font,
            color: Color::GRAY,
            alignment: HorizontalAlign::Left,
            number_of_lines: 0,
            background_color: Color::TRANSPARENT,
            frame: Rect::ZERO,
        }
    }

    /// This label instance's element ID.
    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn alignment(&self) -> HorizontalAlign {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: HorizontalAlign) {
        self.alignment = alignment;
    }

    /// Maximum number of lines; zero means unlimited.
    pub fn number_of_lines(&self) -> usize {
        self.number_of_lines
    }

    pub fn set_number_of_lines(&mut self, lines: usize) {
        self.number_of_lines = lines;
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    /// The size the label wants when laid out at `width`.
    pub fn preferred_size(&self, width: f32) -> Size {
        let glyphs = grapheme_len(&self.text);
        let natural_width = glyphs as f32 * self.font.average_advance();

        let mut lines = if width > 0.0 && natural_width > width {
            (natural_width / width).ceil() as usize
        } else {
            1
        };
        if self.number_of_lines > 0 {
            lines = lines.min(self.number_of_lines);
        }

        Size::new(natural_width.min(width.max(0.0)), lines as f32 * self.font.line_height())
    }
}
