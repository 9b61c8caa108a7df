//! Host Screen Example
//!
//! Embeds a placeholder text edit in a simulated screen: the host owns a
//! constraint table with the field's height constraint, hands the widget a
//! non-owning handle, feeds it input and drives the placeholder animation
//! with a fixed frame clock.
//!
//! Run with: cargo run -p floatlabel --example host_screen
//! Increase verbosity with: RUST_LOG=floatlabel=trace

use std::sync::Arc;
use std::time::Duration;

use floatlabel::prelude::*;
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_millis(16);

/// Rejects tab characters and logs each edit.
struct CommentDelegate;

impl PlaceholderTextEditDelegate for CommentDelegate {
    fn should_change_text(&self, _surface: &dyn TextSurface, range: TextRange, replacement: &str) -> bool {
        let allowed = !replacement.contains('\t');
        tracing::info!(?range, replacement, allowed, "host asked to change text");
        allowed
    }

    fn did_change(&self, surface: &dyn TextSurface) {
        tracing::info!(text = surface.text(), "host saw change");
    }
}

fn run_animation(edit: &mut PlaceholderTextEdit) {
    while edit.is_animating() {
        edit.tick(FRAME);
    }
    tracing::info!(
        offset = edit.presented_placeholder_offset(),
        position = ?edit.placeholder_position(),
        "placeholder settled"
    );
}

fn main() -> floatlabel::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("floatlabel=debug,host_screen=info")),
        )
        .init();

    let description = WidgetDescription::from_toml_str(
        r##"
        placeholder_text = "Leave a comment"
        placeholder_offset_y = 22.0
        max_text_length = 120
        max_lines_before_scroll = 3
        separator_enabled = true
        separator_color = "#3C3C3C"
        "##,
    )?;

    let screen = ConstraintTable::shared();
    let field_element = ElementId::next();
    let field_height = screen.write().add_height(field_element, 60.0);

    let mut edit = PlaceholderTextEdit::from_description(description);
    let delegate = Arc::new(CommentDelegate);
    edit.set_delegate(&delegate);
    edit.set_height_constraint(Some(ConstraintHandle::new(&screen, field_height)));

    let _changes = edit
        .text_changed
        .connect_scoped(|text| tracing::info!(len = text.chars().count(), "text changed"));
    let _modes = edit
        .height_mode_changed
        .connect_scoped(|mode| tracing::info!(?mode, "height mode changed"));

    let mut bounds = Rect::new(16.0, 120.0, 280.0, 60.0);
    edit.layout(bounds);

    edit.focus();
    run_animation(&mut edit);

    for line in ["First line of feedback.", "\tindented", "\nSecond line.", "\nThird line, long enough to wrap onto another."] {
        edit.insert_text(line);
        let height = screen.read().constant(field_height)?;
        if edit.needs_layout() || bounds.height() != height {
            bounds = bounds.with_height(height);
            edit.layout(bounds);
        }
        tracing::info!(height, mode = ?edit.height_mode(), "after edit");
    }

    edit.clear_focus();
    run_animation(&mut edit);

    println!("{}", edit.text());
    Ok(())
}
