//! Anchor layout and constraint storage.

mod anchor;
mod constraint;

pub use anchor::{resolve_frame, Anchor, AnchorLine};
pub use constraint::{
    ConstraintAttribute, ConstraintHandle, ConstraintId, ConstraintTable, ElementId,
    LayoutConstraint, SharedConstraintTable,
};
