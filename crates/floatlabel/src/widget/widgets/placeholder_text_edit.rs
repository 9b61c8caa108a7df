//! Multi-line text field with a floating placeholder label.
//!
//! [`PlaceholderTextEdit`] composes three sub-elements inside one container:
//!
//! - a [`TextSurface`] that receives user input,
//! - a [`PlaceholderLabel`] whose top edge is driven by a single mutable
//!   constraint,
//! - an optional [`SeparatorLine`] along the bottom edge.
//!
//! The widget is its text surface's [`TextSurfaceSink`]. Every editing
//! callback updates the widget's own state and is then forwarded to the
//! host's [`PlaceholderTextEditDelegate`], if any.
//!
//! # Placeholder position
//!
//! The placeholder rests at `placeholder_offset_y` ([`PlaceholderPosition::Normal`])
//! and rises to the top ([`PlaceholderPosition::Raised`]) once editing
//! begins or text exists. Each move overwrites the constraint constant and
//! restarts a 200 ms animation of the presented offset; drive it with
//! [`tick`](PlaceholderTextEdit::tick).
//!
//! # Auto-grow
//!
//! When the host supplies an external height constraint, every edit
//! recomputes the field height: below `max_lines_before_scroll` lines the text
//! surface is sized to fit and the constraint follows it; from then on the
//! surface scrolls and the constraint is left alone.
//!
//! # Example
//!
//! ```
//! use floatlabel::widget::{PlaceholderPosition, PlaceholderTextEdit, TextSurfaceSink};
//! use floatlabel::Rect;
//!
//! let mut edit = PlaceholderTextEdit::new();
//! edit.set_placeholder_text("Comment");
//! edit.set_max_text_length(5);
//! edit.layout(Rect::new(0.0, 0.0, 320.0, 60.0));
//!
//! assert!(edit.focus());
//! assert_eq!(edit.placeholder_position(), PlaceholderPosition::Raised);
//!
//! edit.insert_text("abcdef");
//! assert_eq!(edit.text(), "abcde");
//! ```

use std::sync::{Arc, Weak};
use std::time::Duration;

use floatlabel_core::logging::{span_names, targets};
use floatlabel_core::{PerfSpan, Property, Signal};

use crate::font::Font;
use crate::types::{Color, HorizontalAlign, Rect, Size, TextRange};
use crate::widget::animation::{ConstantTransition, TransitionState};
use crate::widget::config::{
    ChangeEffect, ConfigField, ConfigPatch, SubElement, WidgetConfig, WidgetDescription,
};
use crate::widget::delegate::{PlaceholderTextEditDelegate, TextSurfaceSink};
use crate::widget::layout::{
    resolve_frame, AnchorLine, ConstraintHandle, ConstraintId, ConstraintTable, ElementId,
};
use crate::widget::text_surface::{grapheme_len, truncate_graphemes, PlainTextSurface, TextSurface};

use super::label::PlaceholderLabel;
use super::separator::SeparatorLine;

/// Gap between the text surface's top edge and the resting placeholder.
const TEXT_SURFACE_TOP_INSET: f32 = 5.0;

/// Left padding of the placeholder label.
const PLACEHOLDER_LEFT_PADDING: f32 = 5.0;

/// Where the placeholder label sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaceholderPosition {
    /// Resting inside the field, `placeholder_offset_y` from the top.
    #[default]
    Normal,
    /// Floated to the top edge of the field.
    Raised,
}

/// How the field accommodates its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeightMode {
    /// The field grows with its content.
    #[default]
    AutoGrow,
    /// The field keeps its height and the text surface scrolls.
    Scrolling,
}

impl HeightMode {
    /// Classify content of `content_height` rendered with `line_height`.
    ///
    /// Returns the number of whole lines and the resulting mode. A field
    /// grows while it holds fewer than `max_lines` lines.
    pub fn evaluate(content_height: f32, line_height: f32, max_lines: usize) -> (usize, HeightMode) {
        let lines = (content_height / line_height).floor().max(0.0) as usize;
        let mode = if lines < max_lines {
            HeightMode::AutoGrow
        } else {
            HeightMode::Scrolling
        };
        (lines, mode)
    }
}

/// A multi-line text field with a floating placeholder and auto-growing height.
///
/// The type parameter selects the platform text element; it defaults to the
/// in-memory [`PlainTextSurface`].
pub struct PlaceholderTextEdit<S: TextSurface = PlainTextSurface> {
    config: WidgetConfig,
    bounds: Rect,

    /// The single source of truth for the field's text.
    text: Property<String>,

    text_surface: S,
    text_surface_id: ElementId,
    placeholder: PlaceholderLabel,
    separator: Option<SeparatorLine>,

    /// Anchors of the widget's own sub-elements.
    constraints: ConstraintTable,
    placeholder_top: ConstraintId,
    placeholder_offset: ConstantTransition,

    /// Host-owned height constraint that opts the field into auto-grow.
    height_constraint: Option<ConstraintHandle>,
    delegate: Option<Weak<dyn PlaceholderTextEditDelegate>>,

    position: Property<PlaceholderPosition>,
    height_mode: Property<HeightMode>,
    needs_layout: bool,
    /// Set by the first layout pass. Until then placeholder moves snap.
    shown: bool,

    /// Emitted after every text change with the resulting text.
    pub text_changed: Signal<String>,
    /// Emitted when the placeholder moves between positions.
    pub placeholder_position_changed: Signal<PlaceholderPosition>,
    /// Emitted when auto-grow switches between growing and scrolling.
    pub height_mode_changed: Signal<HeightMode>,
    /// Emitted with the number of graphemes removed by the length limit.
    pub text_truncated: Signal<usize>,
}

impl PlaceholderTextEdit<PlainTextSurface> {
    /// Create a field with the default configuration.
    pub fn new() -> Self {
        Self::with_config(WidgetConfig::default())
    }
}

impl Default for PlaceholderTextEdit<PlainTextSurface> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TextSurface> PlaceholderTextEdit<S> {
    /// Create a field with `config` and build its sub-elements.
    pub fn with_config(config: WidgetConfig) -> Self {
        let mut constraints = ConstraintTable::new();
        let text_surface_id = ElementId::next();
        let placeholder = PlaceholderLabel::new(
            config.placeholder_text.clone(),
            Font::system(config.placeholder_font_size),
        );
        let placeholder_top =
            constraints.add_edge(placeholder.id(), AnchorLine::Top, config.placeholder_offset_y);

        let mut edit = Self {
            placeholder_offset: ConstantTransition::new(config.placeholder_offset_y),
            config,
            bounds: Rect::ZERO,
            text: Property::new(String::new()),
            text_surface: S::create(Rect::ZERO),
            text_surface_id,
            placeholder,
            separator: None,
            constraints,
            placeholder_top,
            height_constraint: None,
            delegate: None,
            position: Property::new(PlaceholderPosition::Normal),
            height_mode: Property::new(HeightMode::AutoGrow),
            needs_layout: true,
            shown: false,
            text_changed: Signal::new(),
            placeholder_position_changed: Signal::new(),
            height_mode_changed: Signal::new(),
            text_truncated: Signal::new(),
        };

        edit.build_text_surface();
        edit.build_placeholder();
        edit.update_text_surface();
        edit
    }

    /// Restore a field from a serialized description.
    pub fn from_description(description: WidgetDescription) -> Self {
        let mut edit = Self::with_config(description.config);
        edit.set_text(description.text);
        edit
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The current configuration.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// The field's text.
    pub fn text(&self) -> String {
        self.text.get()
    }

    /// The text length in grapheme clusters.
    pub fn text_len(&self) -> usize {
        self.text.with(|t| grapheme_len(t))
    }

    pub fn text_surface(&self) -> &S {
        &self.text_surface
    }

    /// Element ID of the current text surface instance.
    pub fn text_surface_id(&self) -> ElementId {
        self.text_surface_id
    }

    pub fn placeholder(&self) -> &PlaceholderLabel {
        &self.placeholder
    }

    pub fn separator(&self) -> Option<&SeparatorLine> {
        self.separator.as_ref()
    }

    /// The widget's own constraint table.
    pub fn constraints(&self) -> &ConstraintTable {
        &self.constraints
    }

    /// The placeholder's top constraint constant: `0` when raised,
    /// `placeholder_offset_y` when resting.
    pub fn placeholder_constant(&self) -> f32 {
        self.constraints
            .constant(self.placeholder_top)
            .unwrap_or(self.config.placeholder_offset_y)
    }

    /// The placeholder's animated offset at this instant.
    pub fn presented_placeholder_offset(&self) -> f32 {
        self.placeholder_offset.presented()
    }

    /// Whether a placeholder animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.placeholder_offset.is_running()
    }

    pub fn placeholder_position(&self) -> PlaceholderPosition {
        self.position.get()
    }

    pub fn is_placeholder_raised(&self) -> bool {
        self.placeholder_position() == PlaceholderPosition::Raised
    }

    /// The mode chosen by the last height recalculation.
    pub fn height_mode(&self) -> HeightMode {
        self.height_mode.get()
    }

    pub fn has_height_constraint(&self) -> bool {
        self.height_constraint.is_some()
    }

    pub fn has_focus(&self) -> bool {
        self.text_surface.has_focus()
    }

    /// Whether a layout pass has been requested.
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    // =========================================================================
    // Host wiring
    // =========================================================================

    /// Set the host's delegate. The widget keeps only a weak reference.
    pub fn set_delegate<D: PlaceholderTextEditDelegate + 'static>(&mut self, delegate: &Arc<D>) {
        let weak = Arc::downgrade(delegate);
        self.delegate = Some(weak);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    fn delegate(&self) -> Option<Arc<dyn PlaceholderTextEditDelegate>> {
        self.delegate.as_ref()?.upgrade()
    }

    /// Opt into auto-grow by handing over the host's height constraint, or
    /// opt out with `None`.
    ///
    /// While a height constraint is set the text surface's bottom edge is
    /// left free, so its height follows its content.
    pub fn set_height_constraint(&mut self, handle: Option<ConstraintHandle>) {
        self.height_constraint = handle;
        self.anchor_text_surface_bottom();
        if self.height_constraint.is_some() {
            self.text_surface.set_scroll_enabled(false);
        }
        self.set_needs_layout();
    }

    fn anchor_text_surface_bottom(&mut self) {
        let anchored = self
            .constraints
            .has_anchor(self.text_surface_id, AnchorLine::Bottom);
        match (self.height_constraint.is_some(), anchored) {
            (false, false) => {
                self.constraints
                    .add_edge(self.text_surface_id, AnchorLine::Bottom, 0.0);
            }
            (true, true) => {
                self.constraints.remove_element(self.text_surface_id);
                self.anchor_text_surface();
            }
            _ => {}
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Write every `Some` field of `patch` and carry out the resulting
    /// rebuilds or layout request. Returns the effects performed, each once.
    pub fn apply_config(&mut self, patch: ConfigPatch) -> Vec<ChangeEffect> {
        let written = self.config.apply(patch);

        let mut effects: Vec<ChangeEffect> = Vec::new();
        for field in &written {
            let effect = field.effect();
            if !effects.contains(&effect) {
                effects.push(effect);
            }
        }

        for effect in &effects {
            match effect {
                ChangeEffect::Rebuild(SubElement::TextSurface) => {
                    self.build_text_surface();
                    self.update_text_surface();
                }
                ChangeEffect::Rebuild(SubElement::Placeholder) => self.build_placeholder(),
                ChangeEffect::Rebuild(SubElement::Separator) => self.build_separator(),
                ChangeEffect::Relayout => self.set_needs_layout(),
            }
        }

        if written.contains(&ConfigField::MaxTextLength) {
            self.enforce_max_length();
        }

        effects
    }

    pub fn set_placeholder_text(&mut self, text: impl Into<String>) -> Vec<ChangeEffect> {
        self.apply_config(ConfigPatch {
            placeholder_text: Some(text.into()),
            ..ConfigPatch::new()
        })
    }

    pub fn set_placeholder_font_size(&mut self, size: f32) -> Vec<ChangeEffect> {
        self.apply_config(ConfigPatch {
            placeholder_font_size: Some(size),
            ..ConfigPatch::new()
        })
    }

    pub fn set_placeholder_color(&mut self, color: Color) -> Vec<ChangeEffect> {
        self.apply_config(ConfigPatch {
            placeholder_color: Some(color),
            ..ConfigPatch::new()
        })
    }

    pub fn set_placeholder_alignment(&mut self, alignment: HorizontalAlign) -> Vec<ChangeEffect> {
        self.apply_config(ConfigPatch {
            placeholder_alignment: Some(alignment),
            ..ConfigPatch::new()
        })
    }

    pub fn set_placeholder_offset_y(&mut self, offset: f32) -> Vec<ChangeEffect> {
        self.apply_config(ConfigPatch {
            placeholder_offset_y: Some(offset),
            ..ConfigPatch::new()
        })
    }

    pub fn set_text_font_size(&mut self, size: f32) -> Vec<ChangeEffect> {
        self.apply_config(ConfigPatch {
            text_font_size: Some(size),
            ..ConfigPatch::new()
        })
    }

    pub fn set_text_color(&mut self, color: Color) -> Vec<ChangeEffect> {
        self.apply_config(ConfigPatch {
            text_color: Some(color),
            ..ConfigPatch::new()
        })
    }

    /// Set the length limit. Text already over the new limit is cut at once.
    pub fn set_max_text_length(&mut self, max: usize) -> Vec<ChangeEffect> {
        self.apply_config(ConfigPatch {
            max_text_length: Some(max),
            ..ConfigPatch::new()
        })
    }

    pub fn set_text_alignment(&mut self, alignment: HorizontalAlign) -> Vec<ChangeEffect> {
        self.apply_config(ConfigPatch {
            text_alignment: Some(alignment),
            ..ConfigPatch::new()
        })
    }

    pub fn set_max_lines_before_scroll(&mut self, lines: usize) -> Vec<ChangeEffect> {
        self.apply_config(ConfigPatch {
            max_lines_before_scroll: Some(lines),
            ..ConfigPatch::new()
        })
    }

    pub fn set_separator_enabled(&mut self, enabled: bool) -> Vec<ChangeEffect> {
        self.apply_config(ConfigPatch {
            separator_enabled: Some(enabled),
            ..ConfigPatch::new()
        })
    }

    pub fn set_separator_color(&mut self, color: Color) -> Vec<ChangeEffect> {
        self.apply_config(ConfigPatch {
            separator_color: Some(color),
            ..ConfigPatch::new()
        })
    }

    pub fn set_separator_height(&mut self, height: f32) -> Vec<ChangeEffect> {
        self.apply_config(ConfigPatch {
            separator_height: Some(height),
            ..ConfigPatch::new()
        })
    }

    pub fn set_separator_offset_x(&mut self, offset: f32) -> Vec<ChangeEffect> {
        self.apply_config(ConfigPatch {
            separator_offset_x: Some(offset),
            ..ConfigPatch::new()
        })
    }

    // =========================================================================
    // Sub-element builders
    // =========================================================================

    /// Replace the text surface with a fresh instance.
    fn build_text_surface(&mut self) {
        let _span = tracing::debug_span!(target: span_names::REBUILD, "text_surface").entered();

        self.constraints.remove_element(self.text_surface_id);
        self.text_surface_id = ElementId::next();

        let mut surface = S::create(self.bounds);
        surface.set_font(Font::system(self.config.text_font_size));
        self.text_surface = surface;
        self.anchor_text_surface();

        tracing::debug!(
            target: targets::WIDGET,
            element = self.text_surface_id.raw(),
            font_size = self.config.text_font_size,
            "rebuilt text surface"
        );
        self.set_needs_layout();
    }

    fn anchor_text_surface(&mut self) {
        let id = self.text_surface_id;
        self.constraints.add_edge(id, AnchorLine::Left, 0.0);
        self.constraints.add_edge(id, AnchorLine::Right, 0.0);
        self.constraints.add_edge(
            id,
            AnchorLine::Top,
            self.config.placeholder_offset_y - TEXT_SURFACE_TOP_INSET,
        );
        if self.height_constraint.is_none() {
            self.constraints.add_edge(id, AnchorLine::Bottom, 0.0);
        }
    }

    /// Replace the placeholder label with a fresh instance.
    ///
    /// The new label starts raised if the field holds text or has focus,
    /// without animating.
    fn build_placeholder(&mut self) {
        let _span = tracing::debug_span!(target: span_names::REBUILD, "placeholder").entered();

        self.constraints.remove_element(self.placeholder.id());
        self.placeholder = PlaceholderLabel::new(
            self.config.placeholder_text.clone(),
            Font::system(self.config.placeholder_font_size),
        );

        let id = self.placeholder.id();
        self.constraints
            .add_edge(id, AnchorLine::Left, PLACEHOLDER_LEFT_PADDING);
        self.constraints.add_edge(id, AnchorLine::Right, 0.0);

        let position = self.expected_position();
        self.placeholder_top =
            self.constraints
                .add_edge(id, AnchorLine::Top, self.constant_for(position));
        self.place_placeholder(position);

        tracing::debug!(
            target: targets::WIDGET,
            element = id.raw(),
            text = %self.config.placeholder_text,
            ?position,
            "rebuilt placeholder"
        );
        self.set_needs_layout();
    }

    /// Recreate the separator for the current bounds, or drop it when
    /// disabled.
    fn build_separator(&mut self) {
        if !self.config.separator_enabled {
            self.separator = None;
            return;
        }
        self.separator = Some(SeparatorLine::along_bottom(
            Rect::new(0.0, 0.0, self.bounds.width(), self.bounds.height()),
            self.config.separator_offset_x,
            self.config.separator_height,
            self.config.separator_color,
        ));
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Request a layout pass from the host.
    pub fn set_needs_layout(&mut self) {
        self.needs_layout = true;
    }

    /// Lay out the sub-elements inside `bounds`.
    ///
    /// Recreates the separator, refreshes the visual attributes of the label
    /// and text surface, re-derives offset-dependent anchors and resolves
    /// every sub-element frame.
    pub fn layout(&mut self, bounds: Rect) {
        let _perf = PerfSpan::new("placeholder_text_edit_layout");
        self.bounds = bounds;
        let local = Rect::new(0.0, 0.0, bounds.width(), bounds.height());

        self.build_separator();
        self.refresh_offset_anchors();
        self.update_placeholder();
        self.update_text_surface();

        let current = self.text_surface.frame();
        let preferred_height = if current.height() > 0.0 {
            current.height()
        } else {
            self.text_surface.size_that_fits(local.width()).height
        };
        let anchors = self.constraints.anchors_for(self.text_surface_id);
        let frame = resolve_frame(local, &anchors, Size::new(local.width(), preferred_height));
        self.text_surface.set_frame(frame);

        self.layout_placeholder(local);
        self.needs_layout = false;
        self.shown = true;

        if self.height_constraint.is_some() {
            self.recalculate_height();
        }

        tracing::trace!(
            target: targets::LAYOUT,
            width = bounds.width(),
            height = bounds.height(),
            text_surface = ?frame,
            "laid out placeholder text edit"
        );
    }

    fn layout_placeholder(&mut self, local: Rect) {
        let width = local.width() - PLACEHOLDER_LEFT_PADDING;
        let preferred = self.placeholder.preferred_size(width);
        let mut anchors = self.constraints.anchors_for(self.placeholder.id());
        for anchor in anchors.iter_mut() {
            if anchor.source_line == AnchorLine::Top {
                anchor.margin = self.placeholder_offset.presented();
            }
        }
        let frame = resolve_frame(local, &anchors, preferred);
        self.placeholder.set_frame(frame);
    }

    /// Constants that derive from `placeholder_offset_y` follow it on every
    /// layout pass.
    fn refresh_offset_anchors(&mut self) {
        let offset = self.config.placeholder_offset_y;
        if let Some(top) = self
            .constraints
            .find_anchor(self.text_surface_id, AnchorLine::Top)
        {
            let _ = self
                .constraints
                .set_constant(top, offset - TEXT_SURFACE_TOP_INSET);
        }

        if self.position.get() == PlaceholderPosition::Normal
            && self.placeholder_constant() != offset
        {
            let _ = self.constraints.set_constant(self.placeholder_top, offset);
            if self.placeholder_offset.is_running() {
                self.placeholder_offset.animate_to(offset);
            } else {
                self.placeholder_offset.snap_to(offset);
            }
        }
    }

    fn update_placeholder(&mut self) {
        let font = Font::system(self.config.placeholder_font_size);
        let label = &mut self.placeholder;
        label.set_font(font);
        label.set_text(self.config.placeholder_text.clone());
        label.set_color(self.config.placeholder_color);
        label.set_number_of_lines(0);
        label.set_background_color(Color::TRANSPARENT);
        label.set_alignment(self.config.placeholder_alignment);
    }

    fn update_text_surface(&mut self) {
        let text = self.text.get();
        let surface = &mut self.text_surface;
        if surface.text() != text {
            surface.set_text(&text);
        }
        surface.set_font(Font::system(self.config.text_font_size));
        surface.set_text_color(self.config.text_color);
        surface.set_alignment(self.config.text_alignment);
        surface.set_background_color(Color::TRANSPARENT);

        if self.height_constraint.is_some() && self.height_mode.get() == HeightMode::AutoGrow {
            surface.set_scroll_enabled(false);
        }
    }

    /// Advance the placeholder animation by `dt` and move the label to the
    /// presented offset.
    pub fn tick(&mut self, dt: Duration) -> TransitionState {
        let state = self.placeholder_offset.advance(dt);
        let mut frame = self.placeholder.frame();
        frame.origin.y = self.placeholder_offset.presented();
        self.placeholder.set_frame(frame);
        state
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Replace the text programmatically.
    ///
    /// The length limit applies, the placeholder follows the new text, and
    /// `text_changed` fires if the text differs. No delegate callbacks run.
    /// Before the first layout pass the placeholder is placed without
    /// animating.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let mut text = text.into();
        let removed = truncate_graphemes(&mut text, self.config.max_text_length);
        if removed > 0 {
            self.text_truncated.emit(removed);
        }

        let changed = self.text.set(text.clone());
        self.text_surface.set_text(&text);

        let expected = self.expected_position();
        if !self.shown {
            self.place_placeholder(expected);
        } else {
            if expected != self.position.get() {
                self.move_placeholder(expected);
            }
            self.recalculate_height();
        }

        if changed {
            self.text_changed.emit(text);
        }
    }

    /// Replace the graphemes in `range` as if the user typed `replacement`.
    ///
    /// Returns `false` if the delegate vetoed the edit.
    pub fn replace_text(&mut self, range: TextRange, replacement: &str) -> bool {
        if !self.text_surface_should_change_text(range, replacement) {
            return false;
        }
        self.text_surface.replace(range, replacement);
        self.text_surface_did_change();
        true
    }

    /// Insert `text` over the current selection as if typed.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let selection = self.text_surface.selection();
        self.replace_text(selection, text)
    }

    /// Delete the selection, or the grapheme before the caret.
    pub fn delete_backward(&mut self) -> bool {
        let selection = self.text_surface.selection();
        let range = if selection.length > 0 {
            selection
        } else if selection.location > 0 {
            TextRange::new(selection.location - 1, 1)
        } else {
            return false;
        };
        self.replace_text(range, "")
    }

    /// Move the selection as the user would.
    pub fn set_selection(&mut self, range: TextRange) {
        self.text_surface.set_selection(range);
        self.text_surface_did_change_selection();
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Begin editing. Returns `false` if the delegate refused.
    pub fn focus(&mut self) -> bool {
        if self.text_surface.has_focus() {
            return true;
        }
        if !self.text_surface_should_begin_editing() {
            return false;
        }
        self.text_surface.set_focused(true);
        self.text_surface_did_begin_editing();
        true
    }

    /// End editing. Returns `false` if the delegate refused.
    pub fn clear_focus(&mut self) -> bool {
        if !self.text_surface.has_focus() {
            return true;
        }
        if !self.text_surface_should_end_editing() {
            return false;
        }
        self.text_surface.set_focused(false);
        self.text_surface_did_end_editing();
        true
    }

    // =========================================================================
    // Placeholder position
    // =========================================================================

    fn expected_position(&self) -> PlaceholderPosition {
        let has_text = self.text.with(|t| !t.is_empty());
        if has_text || self.text_surface.has_focus() {
            PlaceholderPosition::Raised
        } else {
            PlaceholderPosition::Normal
        }
    }

    fn constant_for(&self, position: PlaceholderPosition) -> f32 {
        match position {
            PlaceholderPosition::Raised => 0.0,
            PlaceholderPosition::Normal => self.config.placeholder_offset_y,
        }
    }

    /// Overwrite the placeholder constant and (re)start its animation.
    fn move_placeholder(&mut self, position: PlaceholderPosition) {
        let constant = self.constant_for(position);
        if let Err(err) = self.constraints.set_constant(self.placeholder_top, constant) {
            tracing::debug!(target: targets::WIDGET, %err, "placeholder constraint missing");
        }
        self.placeholder_offset.animate_to(constant);
        tracing::debug!(
            target: targets::ANIMATION,
            ?position,
            constant,
            from = self.placeholder_offset.presented(),
            "animating placeholder"
        );
        self.record_position(position);
    }

    /// Overwrite the placeholder constant without animating.
    fn place_placeholder(&mut self, position: PlaceholderPosition) {
        let constant = self.constant_for(position);
        let _ = self.constraints.set_constant(self.placeholder_top, constant);
        self.placeholder_offset.snap_to(constant);
        self.record_position(position);
    }

    fn record_position(&mut self, position: PlaceholderPosition) {
        if self.position.set(position) {
            self.placeholder_position_changed.emit(position);
        }
    }

    fn sync_text_from_surface(&mut self) {
        let text = self.text_surface.text().to_owned();
        self.text.set(text);
    }

    // =========================================================================
    // Length and height
    // =========================================================================

    /// Cut the text to `max_text_length` graphemes, writing the result back
    /// into the text surface. Returns the number of graphemes removed.
    pub fn enforce_max_length(&mut self) -> usize {
        let mut text = self.text.get();
        let removed = truncate_graphemes(&mut text, self.config.max_text_length);
        if removed == 0 {
            return 0;
        }

        tracing::debug!(
            target: targets::WIDGET,
            removed,
            max = self.config.max_text_length,
            "truncated text to length limit"
        );
        self.text_surface.set_text(&text);
        self.text.set(text);
        self.text_truncated.emit(removed);
        removed
    }

    /// Recompute the field height from the text surface's content.
    ///
    /// Does nothing and returns `None` without a host height constraint.
    /// A stale constraint handle is logged and otherwise ignored.
    pub fn recalculate_height(&mut self) -> Option<HeightMode> {
        let handle = self.height_constraint.as_ref()?;
        let line_height = self.text_surface.font().line_height();
        if line_height <= 0.0 {
            return None;
        }

        let content = self.text_surface.content_size();
        let (lines, mode) =
            HeightMode::evaluate(content.height, line_height, self.config.max_lines_before_scroll);

        match mode {
            HeightMode::AutoGrow => {
                self.text_surface.set_scroll_enabled(false);
                let frame = self.text_surface.frame();
                let fitting = self.text_surface.size_that_fits(frame.width());
                self.text_surface.set_frame(frame.with_height(fitting.height));

                if let Err(err) = handle.set_constant(frame.top() + fitting.height) {
                    tracing::debug!(target: targets::LAYOUT, %err, "height constraint unavailable");
                }
            }
            HeightMode::Scrolling => {
                self.text_surface.set_scroll_enabled(true);
            }
        }

        tracing::trace!(target: targets::LAYOUT, lines, ?mode, "recalculated height");
        if self.height_mode.set(mode) {
            tracing::debug!(target: targets::LAYOUT, lines, ?mode, "height mode changed");
            self.height_mode_changed.emit(mode);
        }
        Some(mode)
    }
}

impl<S: TextSurface> TextSurfaceSink for PlaceholderTextEdit<S> {
    fn text_surface_should_begin_editing(&mut self) -> bool {
        match self.delegate() {
            Some(delegate) => delegate.should_begin_editing(&self.text_surface),
            None => true,
        }
    }

    fn text_surface_should_end_editing(&mut self) -> bool {
        match self.delegate() {
            Some(delegate) => delegate.should_end_editing(&self.text_surface),
            None => true,
        }
    }

    fn text_surface_did_begin_editing(&mut self) {
        self.sync_text_from_surface();

        let is_empty = self.text.with(|t| t.is_empty());
        if is_empty || self.position.get() != PlaceholderPosition::Raised {
            self.move_placeholder(PlaceholderPosition::Raised);
        }

        if let Some(delegate) = self.delegate() {
            delegate.did_begin_editing(&self.text_surface);
        }
    }

    fn text_surface_did_end_editing(&mut self) {
        self.sync_text_from_surface();

        if self.text.with(|t| t.is_empty()) {
            self.move_placeholder(PlaceholderPosition::Normal);
        }

        if let Some(delegate) = self.delegate() {
            delegate.did_end_editing(&self.text_surface);
        }
    }

    fn text_surface_should_change_text(&mut self, range: TextRange, replacement: &str) -> bool {
        match self.delegate() {
            Some(delegate) => delegate.should_change_text(&self.text_surface, range, replacement),
            None => true,
        }
    }

    fn text_surface_did_change(&mut self) {
        self.sync_text_from_surface();

        if self.text.with(|t| t.is_empty()) {
            self.move_placeholder(PlaceholderPosition::Normal);
        } else {
            self.move_placeholder(PlaceholderPosition::Raised);
        }

        // A zero limit empties the text, so the placeholder comes back down.
        if self.enforce_max_length() > 0 && self.text.with(|t| t.is_empty()) {
            self.move_placeholder(PlaceholderPosition::Normal);
        }

        self.recalculate_height();
        self.text_changed.emit(self.text.get());

        if let Some(delegate) = self.delegate() {
            delegate.did_change(&self.text_surface);
        }
    }

    fn text_surface_did_change_selection(&mut self) {
        if let Some(delegate) = self.delegate() {
            delegate.did_change_selection(&self.text_surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit_with(patch: ConfigPatch) -> PlaceholderTextEdit {
        let mut edit = PlaceholderTextEdit::new();
        edit.apply_config(patch);
        edit.layout(Rect::new(0.0, 0.0, 300.0, 60.0));
        edit
    }

    #[test]
    fn test_height_mode_boundary() {
        assert_eq!(HeightMode::evaluate(90.0, 20.0, 5), (4, HeightMode::AutoGrow));
        assert_eq!(HeightMode::evaluate(110.0, 20.0, 5), (5, HeightMode::Scrolling));
        assert_eq!(HeightMode::evaluate(99.9, 20.0, 5), (4, HeightMode::AutoGrow));
    }

    #[test]
    fn test_initial_anchors() {
        let edit = PlaceholderTextEdit::new();
        let surface = edit.text_surface_id();
        let anchors = edit.constraints().anchors_for(surface);
        assert_eq!(anchors.len(), 4);
        let top = anchors
            .iter()
            .find(|a| a.source_line == AnchorLine::Top)
            .unwrap();
        assert_eq!(top.margin, 15.0);

        let label = edit.constraints().anchors_for(edit.placeholder().id());
        let left = label
            .iter()
            .find(|a| a.source_line == AnchorLine::Left)
            .unwrap();
        assert_eq!(left.margin, PLACEHOLDER_LEFT_PADDING);
        assert_eq!(edit.placeholder_constant(), 20.0);
    }

    #[test]
    fn test_layout_resolves_frames() {
        let edit = edit_with(ConfigPatch::new());
        assert_eq!(edit.text_surface().frame(), Rect::new(0.0, 15.0, 300.0, 45.0));
        assert_eq!(edit.placeholder().frame().left(), 5.0);
        assert_eq!(edit.placeholder().frame().top(), 20.0);
        assert!(!edit.needs_layout());
    }

    #[test]
    fn test_visual_attributes_applied_on_layout() {
        let mut edit = edit_with(ConfigPatch::new());
        edit.set_text_color(Color::BLACK);
        edit.set_text_alignment(HorizontalAlign::Right);
        assert!(edit.needs_layout());
        assert_eq!(edit.text_surface().text_color(), Color::WHITE);

        edit.layout(edit.bounds());
        assert_eq!(edit.text_surface().text_color(), Color::BLACK);
        assert_eq!(edit.text_surface().alignment(), HorizontalAlign::Right);
        assert_eq!(edit.text_surface().background_color(), Color::TRANSPARENT);
    }

    #[test]
    fn test_offset_change_refreshes_anchors_on_layout() {
        let mut edit = edit_with(ConfigPatch::new());
        let surface_id = edit.text_surface_id();
        let effects = edit.set_placeholder_offset_y(30.0);
        assert_eq!(effects, vec![ChangeEffect::Relayout]);
        assert_eq!(edit.text_surface_id(), surface_id);

        edit.layout(edit.bounds());
        assert_eq!(edit.placeholder_constant(), 30.0);
        assert_eq!(edit.text_surface().frame().top(), 25.0);
    }

    #[test]
    fn test_separator_follows_config() {
        let mut edit = edit_with(ConfigPatch {
            separator_enabled: Some(true),
            separator_height: Some(2.0),
            separator_offset_x: Some(10.0),
            ..ConfigPatch::new()
        });
        let frame = edit.separator().unwrap().frame();
        assert_eq!(frame, Rect::new(10.0, 58.0, 290.0, 2.0));

        edit.set_separator_enabled(false);
        edit.layout(edit.bounds());
        assert!(edit.separator().is_none());
    }

    #[test]
    fn test_height_constraint_frees_bottom_anchor() {
        let host = ConstraintTable::shared();
        let id = host.write().add_height(ElementId::next(), 60.0);

        let mut edit = PlaceholderTextEdit::new();
        edit.set_height_constraint(Some(ConstraintHandle::new(&host, id)));
        assert!(!edit
            .constraints()
            .has_anchor(edit.text_surface_id(), AnchorLine::Bottom));
        assert!(!edit.text_surface().is_scroll_enabled());

        edit.set_height_constraint(None);
        assert!(edit
            .constraints()
            .has_anchor(edit.text_surface_id(), AnchorLine::Bottom));
    }

    #[test]
    fn test_recalculate_height_without_constraint_is_inert() {
        let mut edit = edit_with(ConfigPatch::new());
        assert_eq!(edit.recalculate_height(), None);
        assert!(edit.text_surface().is_scroll_enabled());
    }

    #[test]
    fn test_stale_height_constraint_is_ignored() {
        let host = ConstraintTable::shared();
        let id = host.write().add_height(ElementId::next(), 60.0);
        let mut edit = PlaceholderTextEdit::new();
        edit.set_height_constraint(Some(ConstraintHandle::new(&host, id)));
        edit.layout(Rect::new(0.0, 0.0, 300.0, 60.0));
        drop(host);

        edit.insert_text("still works");
        assert_eq!(edit.text(), "still works");
        assert_eq!(edit.height_mode(), HeightMode::AutoGrow);
    }

    #[test]
    fn test_tick_moves_label() {
        let mut edit = edit_with(ConfigPatch::new());
        edit.focus();
        assert!(edit.is_animating());
        assert_eq!(edit.placeholder_constant(), 0.0);

        edit.tick(Duration::from_millis(100));
        let mid = edit.placeholder().frame().top();
        assert!(mid > 0.0 && mid < 20.0);

        edit.tick(Duration::from_millis(100));
        assert!(!edit.is_animating());
        assert_eq!(edit.placeholder().frame().top(), 0.0);
    }

    #[test]
    fn test_set_delegate_with_concrete_type() {
        struct Refuse;
        impl PlaceholderTextEditDelegate for Refuse {
            fn should_begin_editing(&self, _surface: &dyn TextSurface) -> bool {
                false
            }
        }

        let mut edit = edit_with(ConfigPatch::new());
        let delegate = Arc::new(Refuse);
        edit.set_delegate(&delegate);
        assert!(!edit.focus());

        edit.clear_delegate();
        assert!(edit.focus());
    }

    #[test]
    fn test_offset_change_retargets_lowering_animation() {
        let mut edit = edit_with(ConfigPatch::new());
        edit.focus();
        edit.tick(Duration::from_millis(300));
        edit.clear_focus();
        assert!(edit.is_animating());

        edit.set_placeholder_offset_y(30.0);
        edit.layout(edit.bounds());
        edit.tick(Duration::from_millis(300));
        edit.layout(edit.bounds());

        assert_eq!(edit.placeholder_constant(), 30.0);
        assert_eq!(edit.presented_placeholder_offset(), 30.0);
        assert_eq!(edit.placeholder().frame().top(), 30.0);
    }

    #[test]
    fn test_layout_recomputes_host_height() {
        let host = ConstraintTable::shared();
        let id = host.write().add_height(ElementId::next(), 60.0);

        let mut edit = PlaceholderTextEdit::new();
        edit.set_text("restored");
        edit.set_height_constraint(Some(ConstraintHandle::new(&host, id)));
        edit.layout(Rect::new(0.0, 0.0, 300.0, 60.0));

        let fitted = edit.text_surface().size_that_fits(300.0).height;
        assert_eq!(edit.text_surface().frame().height(), fitted);
        assert_eq!(host.read().constant(id).ok(), Some(15.0 + fitted));
    }
}
