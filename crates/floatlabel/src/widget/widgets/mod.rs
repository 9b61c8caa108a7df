//! Concrete widgets and the sub-elements they compose.

mod label;
mod placeholder_text_edit;
mod separator;

pub use label::PlaceholderLabel;
pub use placeholder_text_edit::{HeightMode, PlaceholderPosition, PlaceholderTextEdit};
pub use separator::SeparatorLine;
