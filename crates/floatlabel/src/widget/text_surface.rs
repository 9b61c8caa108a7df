//! The editable multi-line text primitive wrapped by the widget.
//!
//! [`TextSurface`] is the seam to the platform's text-editing element: cursor
//! handling, text storage and input methods live behind it. The widget only
//! needs the surface's text, visual attributes, scroll enablement, frame and
//! measured content size.
//!
//! [`PlainTextSurface`] is an in-memory implementation that estimates text
//! metrics from [`Font`] and is used by tests and headless hosts.
//!
//! All lengths and ranges count grapheme clusters, so a combined emoji or an
//! accented letter counts as one character.

use unicode_segmentation::UnicodeSegmentation;

use crate::font::Font;
use crate::types::{Color, HorizontalAlign, Rect, Size, TextRange};

/// Vertical inset between the surface's frame and its first/last line.
pub const TEXT_CONTAINER_INSET: f32 = 8.0;

/// Horizontal padding at both ends of every line fragment.
pub const LINE_FRAGMENT_PADDING: f32 = 5.0;

/// Number of grapheme clusters in `text`.
#[inline]
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Byte offset of the grapheme boundary at `index`, clamped to the text end.
pub fn grapheme_offset(text: &str, index: usize) -> usize {
    text.grapheme_indices(true)
        .nth(index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Keep at most `max` grapheme clusters of `text`, dropping the tail.
///
/// Returns the number of graphemes removed.
pub fn truncate_graphemes(text: &mut String, max: usize) -> usize {
    let len = grapheme_len(text);
    if len <= max {
        return 0;
    }
    let cut = grapheme_offset(text, max);
    text.truncate(cut);
    len - max
}

/// A platform text-editing element.
///
/// Implementations report measurements in the same coordinate space as the
/// widget's container.
pub trait TextSurface {
    /// Construct a fresh surface occupying `frame`.
    fn create(frame: Rect) -> Self
    where
        Self: Sized;

    /// The displayed text.
    fn text(&self) -> &str;

    /// Replace the displayed text without emitting any edit callbacks.
    fn set_text(&mut self, text: &str);

    /// Replace the graphemes in `range` with `replacement`.
    ///
    /// The range is clamped to the current text. The caret is placed after
    /// the inserted text.
    fn replace(&mut self, range: TextRange, replacement: &str);

    fn font(&self) -> Font;
    fn set_font(&mut self, font: Font);

    fn text_color(&self) -> Color;
    fn set_text_color(&mut self, color: Color);

    fn alignment(&self) -> HorizontalAlign;
    fn set_alignment(&mut self, alignment: HorizontalAlign);

    fn background_color(&self) -> Color;
    fn set_background_color(&mut self, color: Color);

    /// Whether the surface scrolls its content internally.
    fn is_scroll_enabled(&self) -> bool;
    fn set_scroll_enabled(&mut self, enabled: bool);

    fn frame(&self) -> Rect;
    fn set_frame(&mut self, frame: Rect);

    /// Size of the laid-out content at the current frame width.
    fn content_size(&self) -> Size;

    /// Smallest size that shows all content when constrained to `width`.
    fn size_that_fits(&self, width: f32) -> Size;

    fn has_focus(&self) -> bool;
    fn set_focused(&mut self, focused: bool);

    fn selection(&self) -> TextRange;
    fn set_selection(&mut self, range: TextRange);
}

/// An in-memory [`TextSurface`].
///
/// Content height is the wrapped line count times the font's line height plus
/// [`TEXT_CONTAINER_INSET`] above and below. Soft wraps are estimated from the
/// font's average glyph advance.
#[derive(Debug, Clone)]
pub struct PlainTextSurface {
    text: String,
    font: Font,
    text_color: Color,
    alignment: HorizontalAlign,
    background_color: Color,
    scroll_enabled: bool,
    frame: Rect,
    focused: bool,
    selection: TextRange,
}

impl PlainTextSurface {
    /// Number of visual lines `self.text` occupies at `width`.
    pub fn line_count(&self, width: f32) -> usize {
        let usable = width - 2.0 * LINE_FRAGMENT_PADDING;
        let per_line = if usable > 0.0 {
            ((usable / self.font.average_advance()).floor() as usize).max(1)
        } else {
            usize::MAX
        };

        self.text
            .split('\n')
            .map(|line| grapheme_len(line).div_ceil(per_line).max(1))
            .sum()
    }

    fn measure(&self, width: f32) -> Size {
        let lines = self.line_count(width) as f32;
        Size::new(
            width,
            lines * self.font.line_height() + 2.0 * TEXT_CONTAINER_INSET,
        )
    }
}

impl Default for PlainTextSurface {
    fn default() -> Self {
        Self::create(Rect::ZERO)
    }
}

impl TextSurface for PlainTextSurface {
    fn create(frame: Rect) -> Self {
        Self {
            text: String::new(),
            font: Font::default(),
            text_color: Color::BLACK,
            alignment: HorizontalAlign::Left,
            background_color: Color::WHITE,
            scroll_enabled: true,
            frame,
            focused: false,
            selection: TextRange::default(),
        }
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_owned();
            self.selection = TextRange::caret(grapheme_len(&self.text));
        }
    }

    fn replace(&mut self, range: TextRange, replacement: &str) {
        let start = grapheme_offset(&self.text, range.location);
        let end = grapheme_offset(&self.text, range.end());
        self.text.replace_range(start..end, replacement);

        let caret = grapheme_len(&self.text[..start]) + grapheme_len(replacement);
        self.selection = TextRange::caret(caret);
    }

    fn font(&self) -> Font {
        self.font
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn text_color(&self) -> Color {
        self.text_color
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    fn alignment(&self) -> HorizontalAlign {
        self.alignment
    }

    fn set_alignment(&mut self, alignment: HorizontalAlign) {
        self.alignment = alignment;
    }

    fn background_color(&self) -> Color {
        self.background_color
    }

    fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    fn is_scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }

    fn frame(&self) -> Rect {
        self.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn content_size(&self) -> Size {
        self.measure(self.frame.width())
    }

    fn size_that_fits(&self, width: f32) -> Size {
        self.measure(width)
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn selection(&self) -> TextRange {
        self.selection
    }

    fn set_selection(&mut self, range: TextRange) {
        let len = grapheme_len(&self.text);
        let location = range.location.min(len);
        let length = range.length.min(len - location);
        self.selection = TextRange::new(location, length);
    }
}
