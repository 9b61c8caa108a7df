//! The placeholder text edit and its building blocks.
//!
//! - [`PlaceholderTextEdit`]: the composite widget
//! - [`TextSurface`]: the platform text element it wraps, with the in-memory
//!   [`PlainTextSurface`]
//! - [`layout`]: anchors, constraint tables and non-owning constraint handles
//! - [`animation`]: the placeholder's constant transition
//! - [`config`]: field configuration, change effects and serialized
//!   descriptions
//! - [`PlaceholderTextEditDelegate`]: optional host callbacks
//!
//! # Overview
//!
//! A widget owns its sub-elements and its own [`ConstraintTable`]. The host
//! owns the container the widget sits in; it lays the widget out by calling
//! [`PlaceholderTextEdit::layout`] whenever
//! [`needs_layout`](PlaceholderTextEdit::needs_layout) reports a pending
//! pass, and drives animations through [`PlaceholderTextEdit::tick`].
//!
//! User input arrives through the [`TextSurfaceSink`] callbacks, either from
//! a platform binding or from the convenience methods
//! ([`focus`](PlaceholderTextEdit::focus),
//! [`insert_text`](PlaceholderTextEdit::insert_text) and friends).

pub mod animation;
pub mod config;
pub mod delegate;
pub mod layout;
pub mod text_surface;
pub mod widgets;

pub use config::{ChangeEffect, ConfigField, ConfigPatch, SubElement, WidgetConfig, WidgetDescription};
pub use delegate::{PlaceholderTextEditDelegate, TextSurfaceSink};
pub use layout::{ConstraintHandle, ConstraintTable, ElementId, SharedConstraintTable};
pub use text_surface::{PlainTextSurface, TextSurface};
pub use widgets::{
    HeightMode, PlaceholderLabel, PlaceholderPosition, PlaceholderTextEdit, SeparatorLine,
};
