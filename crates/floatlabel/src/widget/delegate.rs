//! Editing callbacks: the widget's sink and the host's optional delegate.
//!
//! The platform text surface reports seven editing callbacks. The widget
//! receives them through [`TextSurfaceSink`], updates its own state, then
//! forwards each one to the host's [`PlaceholderTextEditDelegate`] if one is
//! set. Every delegate method has a default, so hosts implement only what
//! they care about: the two boolean queries permit the action and the rest do
//! nothing.

use crate::types::TextRange;
use crate::widget::text_surface::TextSurface;

/// Host-side observer of a [`PlaceholderTextEdit`](crate::widget::widgets::PlaceholderTextEdit).
///
/// # Example
///
/// ```
/// use floatlabel::widget::{PlaceholderTextEditDelegate, TextSurface};
///
/// struct NoNewlines;
///
/// impl PlaceholderTextEditDelegate for NoNewlines {
///     fn should_change_text(
///         &self,
///         _surface: &dyn TextSurface,
///         _range: floatlabel::TextRange,
///         replacement: &str,
///     ) -> bool {
///         !replacement.contains('\n')
///     }
/// }
/// ```
pub trait PlaceholderTextEditDelegate {
    /// Whether editing may begin.
    fn should_begin_editing(&self, _surface: &dyn TextSurface) -> bool {
        true
    }

    /// Whether editing may end.
    fn should_end_editing(&self, _surface: &dyn TextSurface) -> bool {
        true
    }

    fn did_begin_editing(&self, _surface: &dyn TextSurface) {}

    fn did_end_editing(&self, _surface: &dyn TextSurface) {}

    /// Whether the graphemes in `range` may be replaced with `replacement`.
    fn should_change_text(
        &self,
        _surface: &dyn TextSurface,
        _range: TextRange,
        _replacement: &str,
    ) -> bool {
        true
    }

    /// Called after every user edit, once the widget has applied its own
    /// placeholder, length and height rules.
    fn did_change(&self, _surface: &dyn TextSurface) {}

    fn did_change_selection(&self, _surface: &dyn TextSurface) {}
}

/// Receiver of the text surface's editing callbacks.
///
/// Platform glue (or a test) calls these in the order the platform reports
/// them. Boolean answers are the final verdict after the delegate was asked.
pub trait TextSurfaceSink {
    fn text_surface_should_begin_editing(&mut self) -> bool;
    fn text_surface_should_end_editing(&mut self) -> bool;
    fn text_surface_did_begin_editing(&mut self);
    fn text_surface_did_end_editing(&mut self);
    fn text_surface_should_change_text(&mut self, range: TextRange, replacement: &str) -> bool;
    fn text_surface_did_change(&mut self);
    fn text_surface_did_change_selection(&mut self);
}
