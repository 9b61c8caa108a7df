//! End-to-end behavior of the placeholder text edit.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use floatlabel::prelude::*;
use floatlabel::widget::SharedConstraintTable;
use floatlabel::widget::text_surface::grapheme_len;

const BOUNDS: Rect = Rect {
    origin: Point { x: 0.0, y: 0.0 },
    size: Size {
        width: 300.0,
        height: 60.0,
    },
};

fn laid_out(patch: ConfigPatch) -> PlaceholderTextEdit {
    let mut edit = PlaceholderTextEdit::new();
    edit.apply_config(patch);
    edit.layout(BOUNDS);
    edit
}

fn host_height_constraint() -> (SharedConstraintTable, ConstraintHandle) {
    let table = ConstraintTable::shared();
    let id = table.write().add_height(ElementId::next(), BOUNDS.height());
    let handle = ConstraintHandle::new(&table, id);
    (table, handle)
}

/// A surface whose content is 10 points tall per grapheme with 20 point lines.
struct MeteredSurface {
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

impl MeteredSurface {
    fn content_height(&self) -> f32 {
        grapheme_len(&self.text) as f32 * 10.0
    }
}

impl TextSurface for MeteredSurface {
    fn create(frame: Rect) -> Self {
        Self {
            text: String::new(),
            font: Font::system(14.0).with_line_height(20.0),
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
        self.text = text.to_owned();
        self.selection = TextRange::caret(grapheme_len(text));
    }

    fn replace(&mut self, range: TextRange, replacement: &str) {
        let mut chars: Vec<char> = self.text.chars().collect();
        let end = range.end().min(chars.len());
        let start = range.location.min(end);
        chars.splice(start..end, replacement.chars());
        self.text = chars.into_iter().collect();
        self.selection = TextRange::caret(start + grapheme_len(replacement));
    }

    fn font(&self) -> Font {
        self.font
    }

    fn set_font(&mut self, font: Font) {
        self.font = font.with_line_height(20.0);
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
        Size::new(self.frame.width(), self.content_height())
    }

    fn size_that_fits(&self, width: f32) -> Size {
        Size::new(width, self.content_height())
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
        self.selection = range;
    }
}

/// Records every callback and answers the boolean queries from flags.
#[derive(Default)]
struct RecordingDelegate {
    refuse_begin: AtomicBool,
    refuse_end: AtomicBool,
    veto_digits: AtomicBool,
    calls: Mutex<Vec<&'static str>>,
    changes_seen: AtomicUsize,
}

impl RecordingDelegate {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }
}

impl PlaceholderTextEditDelegate for RecordingDelegate {
    fn should_begin_editing(&self, _surface: &dyn TextSurface) -> bool {
        self.calls.lock().push("should_begin");
        !self.refuse_begin.load(Ordering::SeqCst)
    }

    fn should_end_editing(&self, _surface: &dyn TextSurface) -> bool {
        self.calls.lock().push("should_end");
        !self.refuse_end.load(Ordering::SeqCst)
    }

    fn did_begin_editing(&self, _surface: &dyn TextSurface) {
        self.calls.lock().push("did_begin");
    }

    fn did_end_editing(&self, _surface: &dyn TextSurface) {
        self.calls.lock().push("did_end");
    }

    fn should_change_text(&self, _surface: &dyn TextSurface, _range: TextRange, replacement: &str) -> bool {
        self.calls.lock().push("should_change");
        !(self.veto_digits.load(Ordering::SeqCst) && replacement.chars().any(|c| c.is_ascii_digit()))
    }

    fn did_change(&self, surface: &dyn TextSurface) {
        self.calls.lock().push("did_change");
        self.changes_seen.store(grapheme_len(surface.text()), Ordering::SeqCst);
    }

    fn did_change_selection(&self, _surface: &dyn TextSurface) {
        self.calls.lock().push("did_change_selection");
    }
}

// =========================================================================
// Placeholder position
// =========================================================================

#[test]
fn test_placeholder_rises_on_focus_and_returns_when_empty() {
    let mut edit = laid_out(ConfigPatch::new());
    assert_eq!(edit.placeholder_constant(), 20.0);
    assert_eq!(edit.placeholder_position(), PlaceholderPosition::Normal);

    assert!(edit.focus());
    assert_eq!(edit.placeholder_constant(), 0.0);
    assert!(edit.is_placeholder_raised());

    assert!(edit.clear_focus());
    assert_eq!(edit.placeholder_constant(), 20.0);
    assert_eq!(edit.placeholder_position(), PlaceholderPosition::Normal);
}

#[test]
fn test_placeholder_stays_raised_after_focus_loss_with_text() {
    let mut edit = laid_out(ConfigPatch::new());
    edit.focus();
    edit.insert_text("hi");
    edit.clear_focus();
    assert_eq!(edit.placeholder_constant(), 0.0);
    assert!(edit.is_placeholder_raised());
}

#[test]
fn test_placeholder_follows_text_emptiness() {
    let mut edit = laid_out(ConfigPatch::new());
    edit.focus();
    edit.insert_text("ab");
    assert!(edit.is_placeholder_raised());

    edit.delete_backward();
    edit.delete_backward();
    assert_eq!(edit.text(), "");
    assert_eq!(edit.placeholder_position(), PlaceholderPosition::Normal);
    assert_eq!(edit.placeholder_constant(), 20.0);
}

#[test]
fn test_placeholder_law_holds_over_edit_sequence() {
    let mut edit = laid_out(ConfigPatch {
        max_text_length: Some(4),
        ..ConfigPatch::new()
    });
    edit.focus();

    let steps = [
        Some("a"),
        Some("bcdefg"),
        None,
        Some("x"),
        None,
        None,
    ];
    for step in steps {
        match step {
            Some(typed) => edit.insert_text(typed),
            None => edit.delete_backward(),
        };
        assert!(edit.text_len() <= 4);
        assert_eq!(edit.is_placeholder_raised(), !edit.text().is_empty());
    }
}

#[test]
fn test_position_signal_fires_on_each_move() {
    let mut edit = laid_out(ConfigPatch::new());
    let positions = Arc::new(Mutex::new(Vec::new()));
    let sink = positions.clone();
    edit.placeholder_position_changed
        .connect(move |p| sink.lock().push(*p));

    edit.focus();
    edit.clear_focus();

    assert_eq!(
        *positions.lock(),
        vec![PlaceholderPosition::Raised, PlaceholderPosition::Normal]
    );
}

#[test]
fn test_retriggered_transition_restarts_from_presented_offset() {
    let mut edit = laid_out(ConfigPatch::new());
    edit.focus();
    edit.tick(Duration::from_millis(100));
    let mid = edit.presented_placeholder_offset();
    assert!(mid > 0.0 && mid < 20.0);

    edit.clear_focus();
    assert!(edit.is_animating());
    assert!((edit.presented_placeholder_offset() - mid).abs() < 1e-4);

    edit.tick(Duration::from_millis(200));
    assert!(!edit.is_animating());
    assert_eq!(edit.presented_placeholder_offset(), 20.0);
    assert_eq!(edit.placeholder().frame().top(), 20.0);
}

// =========================================================================
// Length limit
// =========================================================================

#[test]
fn test_typing_past_limit_truncates_once() {
    let mut edit = laid_out(ConfigPatch {
        max_text_length: Some(5),
        ..ConfigPatch::new()
    });
    let truncations = Arc::new(AtomicUsize::new(0));
    let counter = truncations.clone();
    edit.text_truncated.connect(move |removed| {
        assert_eq!(*removed, 1);
        counter.fetch_add(1, Ordering::SeqCst);
    });

    edit.focus();
    edit.insert_text("abcdef");

    assert_eq!(edit.text(), "abcde");
    assert_eq!(edit.text_surface().text(), "abcde");
    assert_eq!(truncations.load(Ordering::SeqCst), 1);
}

#[test]
fn test_truncation_is_idempotent() {
    let mut edit = laid_out(ConfigPatch {
        max_text_length: Some(3),
        ..ConfigPatch::new()
    });
    edit.set_text("abcdef");
    assert_eq!(edit.text(), "abc");
    assert_eq!(edit.enforce_max_length(), 0);
    assert_eq!(edit.text(), "abc");
}

#[test]
fn test_limit_counts_graphemes() {
    let mut edit = laid_out(ConfigPatch {
        max_text_length: Some(2),
        ..ConfigPatch::new()
    });
    edit.focus();
    edit.insert_text("e\u{301}e\u{301}e\u{301}");
    assert_eq!(edit.text(), "e\u{301}e\u{301}");
    assert_eq!(edit.text_len(), 2);
}

#[test]
fn test_lowering_limit_cuts_existing_text() {
    let mut edit = laid_out(ConfigPatch::new());
    edit.set_text("hello world");
    let effects = edit.set_max_text_length(5);
    assert_eq!(effects, vec![ChangeEffect::Relayout]);
    assert_eq!(edit.text(), "hello");
}

#[test]
fn test_zero_limit_strips_input_and_lowers_placeholder() {
    let mut edit = laid_out(ConfigPatch {
        max_text_length: Some(0),
        ..ConfigPatch::new()
    });
    edit.insert_text("abc");
    assert_eq!(edit.text(), "");
    assert_eq!(edit.placeholder_position(), PlaceholderPosition::Normal);
    assert_eq!(edit.placeholder_constant(), 20.0);
}

// =========================================================================
// Height adaptation
// =========================================================================

#[test]
fn test_height_mode_boundary_with_twenty_point_lines() {
    let (table, handle) = host_height_constraint();
    let constraint = handle.id();
    let mut edit: PlaceholderTextEdit<MeteredSurface> = PlaceholderTextEdit::with_config(WidgetConfig::default());
    edit.set_height_constraint(Some(handle));
    edit.layout(BOUNDS);

    edit.insert_text("123456789");
    assert_eq!(edit.height_mode(), HeightMode::AutoGrow);
    assert!(!edit.text_surface().is_scroll_enabled());
    assert_eq!(edit.text_surface().frame().height(), 90.0);
    assert_eq!(table.read().constant(constraint).ok(), Some(15.0 + 90.0));

    edit.insert_text("01");
    assert_eq!(edit.height_mode(), HeightMode::Scrolling);
    assert!(edit.text_surface().is_scroll_enabled());
    assert_eq!(table.read().constant(constraint).ok(), Some(105.0));
}

#[test]
fn test_height_mode_signal_reports_switches() {
    let (_table, handle) = host_height_constraint();
    let mut edit: PlaceholderTextEdit<MeteredSurface> = PlaceholderTextEdit::with_config(WidgetConfig::default());
    edit.set_height_constraint(Some(handle));
    edit.layout(BOUNDS);

    let modes = Arc::new(Mutex::new(Vec::new()));
    let sink = modes.clone();
    edit.height_mode_changed.connect(move |m| sink.lock().push(*m));

    edit.insert_text("0123456789");
    edit.delete_backward();
    assert_eq!(*modes.lock(), vec![HeightMode::Scrolling, HeightMode::AutoGrow]);
}

#[test]
fn test_without_height_constraint_surface_is_pinned() {
    let mut edit: PlaceholderTextEdit<MeteredSurface> = PlaceholderTextEdit::with_config(WidgetConfig::default());
    edit.layout(BOUNDS);
    edit.insert_text("0123456789abcdef");

    assert_eq!(edit.text_surface().frame(), Rect::new(0.0, 15.0, 300.0, 45.0));
    assert!(edit.text_surface().is_scroll_enabled());
}

// =========================================================================
// Delegate forwarding
// =========================================================================

#[test]
fn test_should_begin_defaults_to_true() {
    let mut edit = laid_out(ConfigPatch::new());
    assert!(edit.text_surface_should_begin_editing());
    assert!(edit.text_surface_should_end_editing());
    assert!(edit.text_surface_should_change_text(TextRange::caret(0), "x"));
}

#[test]
fn test_delegate_sees_every_callback_in_order() {
    let mut edit = laid_out(ConfigPatch::new());
    let delegate = Arc::new(RecordingDelegate::default());
    edit.set_delegate(&delegate);

    edit.focus();
    edit.insert_text("abc");
    edit.set_selection(TextRange::new(0, 1));
    edit.clear_focus();

    assert_eq!(
        delegate.calls(),
        vec![
            "should_begin",
            "did_begin",
            "should_change",
            "did_change",
            "did_change_selection",
            "should_end",
            "did_end",
        ]
    );
}

#[test]
fn test_delegate_answers_pass_through() {
    let mut edit = laid_out(ConfigPatch::new());
    let delegate = Arc::new(RecordingDelegate::default());
    delegate.refuse_begin.store(true, Ordering::SeqCst);
    edit.set_delegate(&delegate);

    assert!(!edit.focus());
    assert!(!edit.has_focus());
    assert_eq!(edit.placeholder_position(), PlaceholderPosition::Normal);

    delegate.refuse_begin.store(false, Ordering::SeqCst);
    delegate.refuse_end.store(true, Ordering::SeqCst);
    assert!(edit.focus());
    assert!(!edit.clear_focus());
    assert!(edit.has_focus());
}

#[test]
fn test_delegate_veto_leaves_text_untouched() {
    let mut edit = laid_out(ConfigPatch::new());
    let delegate = Arc::new(RecordingDelegate::default());
    delegate.veto_digits.store(true, Ordering::SeqCst);
    edit.set_delegate(&delegate);

    assert!(edit.insert_text("ab"));
    assert!(!edit.insert_text("c1"));
    assert_eq!(edit.text(), "ab");
}

#[test]
fn test_delegate_observes_truncated_text() {
    let mut edit = laid_out(ConfigPatch {
        max_text_length: Some(3),
        ..ConfigPatch::new()
    });
    let delegate = Arc::new(RecordingDelegate::default());
    edit.set_delegate(&delegate);

    edit.insert_text("abcdef");
    assert_eq!(delegate.changes_seen.load(Ordering::SeqCst), 3);
}

#[test]
fn test_dropped_delegate_is_ignored() {
    let mut edit = laid_out(ConfigPatch::new());
    let delegate = Arc::new(RecordingDelegate::default());
    delegate.refuse_begin.store(true, Ordering::SeqCst);
    edit.set_delegate(&delegate);
    drop(delegate);

    assert!(edit.focus());
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn test_structural_writes_rebuild_and_others_relayout() {
    let mut edit = laid_out(ConfigPatch::new());
    let surface = edit.text_surface_id();
    let label = edit.placeholder().id();

    assert_eq!(edit.set_text_color(Color::BLACK), vec![ChangeEffect::Relayout]);
    assert_eq!(edit.text_surface_id(), surface);
    assert_eq!(edit.placeholder().id(), label);

    assert_eq!(
        edit.set_placeholder_text("Name"),
        vec![ChangeEffect::Rebuild(SubElement::Placeholder)]
    );
    assert_ne!(edit.placeholder().id(), label);
    assert_eq!(edit.text_surface_id(), surface);

    assert_eq!(
        edit.set_text_font_size(18.0),
        vec![ChangeEffect::Rebuild(SubElement::TextSurface)]
    );
    assert_ne!(edit.text_surface_id(), surface);
    assert!(edit.needs_layout());
}

#[test]
fn test_rebuilt_surface_keeps_text() {
    let mut edit = laid_out(ConfigPatch::new());
    edit.set_text("kept");
    edit.set_text_font_size(20.0);
    assert_eq!(edit.text_surface().text(), "kept");
    assert_eq!(edit.text_surface().font().size(), 20.0);
}

#[test]
fn test_rebuilt_placeholder_keeps_raised_state() {
    let mut edit = laid_out(ConfigPatch::new());
    edit.set_text("x");
    edit.set_placeholder_font_size(11.0);
    assert!(edit.is_placeholder_raised());
    assert_eq!(edit.placeholder_constant(), 0.0);
    assert!(!edit.is_animating());
}

#[test]
fn test_old_constraints_are_detached_on_rebuild() {
    let mut edit = laid_out(ConfigPatch::new());
    let count = edit.constraints().len();
    edit.set_placeholder_text("again");
    edit.set_text_font_size(16.0);
    assert_eq!(edit.constraints().len(), count);
}

#[test]
fn test_from_description_restores_text_and_config() {
    let desc = WidgetDescription::from_toml_str(
        r##"
        text = "restored text"
        placeholder_text = "Notes"
        max_text_length = 8
        "##,
    )
    .unwrap();
    let edit: PlaceholderTextEdit = PlaceholderTextEdit::from_description(desc);
    assert_eq!(edit.text(), "restored");
    assert_eq!(edit.placeholder().text(), "Notes");
    assert!(edit.is_placeholder_raised());
}

#[test]
fn test_set_text_emits_change_without_delegate_calls() {
    let mut edit = laid_out(ConfigPatch::new());
    let delegate = Arc::new(RecordingDelegate::default());
    edit.set_delegate(&delegate);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    edit.text_changed.connect(move |t| sink.lock().push(t.clone()));

    edit.set_text("one");
    edit.set_text("one");
    assert_eq!(*seen.lock(), vec!["one".to_string()]);
    assert!(delegate.calls().is_empty());
}

#[test]
fn test_text_before_first_layout_places_placeholder_without_animation() {
    let mut edit = PlaceholderTextEdit::new();
    edit.set_text("preset");
    assert!(edit.is_placeholder_raised());
    assert!(!edit.is_animating());
    assert_eq!(edit.presented_placeholder_offset(), 0.0);

    edit.layout(BOUNDS);
    assert_eq!(edit.placeholder().frame().top(), 0.0);

    edit.set_text("");
    assert!(edit.is_animating());
}

#[test]
fn test_replace_with_unbounded_range_is_clamped() {
    let mut edit = laid_out(ConfigPatch::new());
    edit.insert_text("abc");
    assert!(edit.replace_text(TextRange::new(1, usize::MAX), ""));
    assert_eq!(edit.text(), "a");
}

#[test]
fn test_restored_widget_sizes_host_on_first_layout() {
    let desc = WidgetDescription::from_toml_str(r#"text = "123456""#).unwrap();
    let mut edit = PlaceholderTextEdit::<MeteredSurface>::from_description(desc);
    let (table, handle) = host_height_constraint();
    let constraint = handle.id();
    edit.set_height_constraint(Some(handle));
    assert_eq!(table.read().constant(constraint).ok(), Some(60.0));

    edit.layout(BOUNDS);
    assert_eq!(edit.height_mode(), HeightMode::AutoGrow);
    assert_eq!(table.read().constant(constraint).ok(), Some(15.0 + 60.0));
}
