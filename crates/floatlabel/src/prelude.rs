//! Prelude module for floatlabel.
//!
//! ```
//! use floatlabel::prelude::*;
//! ```
//!
//! This provides access to:
//! - The widget (`PlaceholderTextEdit`) and its state enums
//! - Configuration (`WidgetConfig`, `ConfigPatch`, `WidgetDescription`)
//! - Host wiring (`PlaceholderTextEditDelegate`, `ConstraintHandle`)
//! - Geometry types (`Point`, `Size`, `Rect`, `Color`)

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use floatlabel_core::{ConnectionGuard, ConnectionId, Property, Signal};

// ============================================================================
// Widget
// ============================================================================

pub use crate::widget::{
    HeightMode, PlaceholderPosition, PlaceholderTextEdit, PlainTextSurface, TextSurface,
    TextSurfaceSink,
};

// ============================================================================
// Configuration
// ============================================================================

pub use crate::widget::{ChangeEffect, ConfigPatch, SubElement, WidgetConfig, WidgetDescription};

// ============================================================================
// Host Integration
// ============================================================================

pub use crate::widget::PlaceholderTextEditDelegate;
pub use crate::widget::layout::{AnchorLine, ConstraintHandle, ConstraintTable, ElementId};

// ============================================================================
// Geometry, Color and Text
// ============================================================================

pub use crate::font::Font;
pub use crate::types::{Color, HorizontalAlign, Point, Rect, Size, TextRange};
pub use crate::{Error, Result};
