//! Anchor lines and frame resolution.
//!
//! Every sub-element of the widget is positioned by anchoring its edges to the
//! container's edges. Each anchor carries a margin that pushes the edge inward
//! from the container line; negative margins push outward.
//!
//! # Resolution Rules
//!
//! - If both opposing edges are anchored (left+right or top+bottom), the item
//!   is resized to fit between them.
//! - If only one edge is anchored, the item keeps its preferred size and is
//!   positioned at that edge.
//! - Center anchors position the item's center point; size comes from the
//!   preferred size.
//! - Unanchored axes fall back to the container origin.

use crate::types::{Rect, Size};

/// Anchor lines available on each layout item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorLine {
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
    /// Horizontal center point.
    HorizontalCenter,
    /// Vertical center point.
    VerticalCenter,
}

impl AnchorLine {
    /// Check if this is a horizontal anchor line.
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        matches!(
            self,
            AnchorLine::Left | AnchorLine::Right | AnchorLine::HorizontalCenter
        )
    }

    /// Check if this is a vertical anchor line.
    #[inline]
    pub fn is_vertical(&self) -> bool {
        !self.is_horizontal()
    }

    /// Position of this line on `rect`.
    pub fn position_in(&self, rect: Rect) -> f32 {
        match self {
            AnchorLine::Left => rect.left(),
            AnchorLine::Right => rect.right(),
            AnchorLine::Top => rect.top(),
            AnchorLine::Bottom => rect.bottom(),
            AnchorLine::HorizontalCenter => rect.left() + rect.width() / 2.0,
            AnchorLine::VerticalCenter => rect.top() + rect.height() / 2.0,
        }
    }
}

/// An anchor binding one of an item's lines to a line of its container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// The anchor line on the item.
    pub source_line: AnchorLine,
    /// The container line to attach to.
    pub target_line: AnchorLine,
    /// Inward distance from the target line.
    pub margin: f32,
}

impl Anchor {
    /// Create a new anchor to the container.
    ///
    /// Returns `None` when the lines are on different axes.
    pub fn to_parent(source: AnchorLine, target: AnchorLine, margin: f32) -> Option<Self> {
        (source.is_horizontal() == target.is_horizontal()).then_some(Self {
            source_line: source,
            target_line: target,
            margin,
        })
    }

    /// Anchor a line to the same line of the container.
    pub fn edge(line: AnchorLine, margin: f32) -> Self {
        Self {
            source_line: line,
            target_line: line,
            margin,
        }
    }

    /// Resolved coordinate of the source line within `container`.
    fn resolve(&self, container: Rect) -> f32 {
        let target = self.target_line.position_in(container);
        match self.source_line {
            AnchorLine::Left | AnchorLine::Top => target + self.margin,
            AnchorLine::Right | AnchorLine::Bottom => target - self.margin,
            _ => target + self.margin,
        }
    }
}

/// Resolved anchor values for an item during calculation.
#[derive(Debug, Clone, Copy, Default)]
struct ResolvedAnchors {
    left: Option<f32>,
    right: Option<f32>,
    top: Option<f32>,
    bottom: Option<f32>,
    h_center: Option<f32>,
    v_center: Option<f32>,
}

impl ResolvedAnchors {
    fn set(&mut self, line: AnchorLine, value: f32) {
        match line {
            AnchorLine::Left => self.left = Some(value),
            AnchorLine::Right => self.right = Some(value),
            AnchorLine::Top => self.top = Some(value),
            AnchorLine::Bottom => self.bottom = Some(value),
            AnchorLine::HorizontalCenter => self.h_center = Some(value),
            AnchorLine::VerticalCenter => self.v_center = Some(value),
        }
    }
}

/// Resolve one axis into (origin, length).
fn resolve_axis(
    start: Option<f32>,
    end: Option<f32>,
    center: Option<f32>,
    preferred: f32,
    fallback: f32,
) -> (f32, f32) {
    match (start, end, center) {
        (Some(s), Some(e), _) => (s, (e - s).max(0.0)),
        (Some(s), None, _) => (s, preferred),
        (None, Some(e), _) => (e - preferred, preferred),
        (None, None, Some(c)) => (c - preferred / 2.0, preferred),
        (None, None, None) => (fallback, preferred),
    }
}

/// Compute an item's frame from its anchors.
///
/// `container` is the container's local bounds; `preferred` is used on any
/// axis that is not constrained from both sides.
pub fn resolve_frame<'a, I>(container: Rect, anchors: I, preferred: Size) -> Rect
where
    I: IntoIterator<Item = &'a Anchor>,
{
    let mut resolved = ResolvedAnchors::default();
    for anchor in anchors {
        resolved.set(anchor.source_line, anchor.resolve(container));
    }

    let (x, width) = resolve_axis(
        resolved.left,
        resolved.right,
        resolved.h_center,
        preferred.width,
        container.left(),
    );
    let (y, height) = resolve_axis(
        resolved.top,
        resolved.bottom,
        resolved.v_center,
        preferred.height,
        container.top(),
    );

    Rect::new(x, y, width, height)
}
