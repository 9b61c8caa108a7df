//! floatlabel - a multi-line text field with a floating placeholder label.
//!
//! The field shows a hint label inside an empty text area. When editing
//! begins or text exists, the label animates up to the top edge. With a
//! host-supplied height constraint the field grows with its content until a
//! line threshold, after which it scrolls. An optional separator line runs
//! along the bottom, and a length limit cuts overlong input.
//!
//! # Example
//!
//! ```
//! use floatlabel::prelude::*;
//!
//! let host = ConstraintTable::shared();
//! let height = host.write().add_height(ElementId::next(), 60.0);
//!
//! let mut edit = PlaceholderTextEdit::new();
//! edit.set_placeholder_text("Describe the issue");
//! edit.set_height_constraint(Some(ConstraintHandle::new(&host, height)));
//! edit.layout(Rect::new(0.0, 0.0, 320.0, 60.0));
//!
//! edit.focus();
//! edit.insert_text("It crashes on start");
//! assert_eq!(edit.height_mode(), HeightMode::AutoGrow);
//! ```

pub mod error;
pub mod font;
pub mod prelude;
pub mod types;
pub mod widget;

pub use error::{Error, Result};
pub use font::Font;
pub use types::{Color, HorizontalAlign, Point, Rect, Size, TextRange};

/// Reactive plumbing re-exported from `floatlabel-core`.
pub use floatlabel_core::{ConnectionGuard, ConnectionId, PerfSpan, Property, Signal};
