//! Constraint tables and non-owning constraint handles.
//!
//! A [`ConstraintTable`] stores the mutable layout constraints of a set of
//! elements. The widget owns one table for its own sub-elements; a host owns
//! another for its screen and may hand the widget a [`ConstraintHandle`] to a
//! height constraint in it. Handles never keep the host's table alive: every
//! access resolves the handle anew and reports [`Error::StaleConstraint`] once
//! the table or the constraint is gone.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};

use super::anchor::{Anchor, AnchorLine};
use crate::error::{Error, Result};

new_key_type! {
    /// Identifies a constraint within its [`ConstraintTable`].
    pub struct ConstraintId;
}

/// Identifies a laid-out element.
///
/// Each constructed sub-element gets a fresh ID, so a rebuilt element is
/// distinguishable from the one it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

impl ElementId {
    /// Allocate a new, process-unique element ID.
    pub fn next() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// What a constraint controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintAttribute {
    /// An edge of the element pinned to a line of its container.
    Anchor {
        source: AnchorLine,
        target: AnchorLine,
    },
    /// The element's height.
    Height,
}

/// A single mutable constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConstraint {
    /// The constrained element.
    pub element: ElementId,
    /// The constrained attribute.
    pub attribute: ConstraintAttribute,
    /// Anchor margin or height, depending on `attribute`.
    pub constant: f32,
}

impl LayoutConstraint {
    /// View this constraint as an anchor, if it is one.
    pub fn as_anchor(&self) -> Option<Anchor> {
        match self.attribute {
            ConstraintAttribute::Anchor { source, target } => Some(Anchor {
                source_line: source,
                target_line: target,
                margin: self.constant,
            }),
            ConstraintAttribute::Height => None,
        }
    }
}

/// A table of constraints shared between a host and the widgets it embeds.
pub type SharedConstraintTable = Arc<RwLock<ConstraintTable>>;

/// Storage for layout constraints keyed by [`ConstraintId`].
#[derive(Debug, Default)]
pub struct ConstraintTable {
    constraints: SlotMap<ConstraintId, LayoutConstraint>,
}

impl ConstraintTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table behind a shared lock.
    pub fn shared() -> SharedConstraintTable {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Pin `source` of `element` to the container's `target` line.
    ///
    /// Returns `None` when the lines are on different axes.
    pub fn add_anchor(
        &mut self,
        element: ElementId,
        source: AnchorLine,
        target: AnchorLine,
        margin: f32,
    ) -> Option<ConstraintId> {
        Anchor::to_parent(source, target, margin)?;
        Some(self.constraints.insert(LayoutConstraint {
            element,
            attribute: ConstraintAttribute::Anchor { source, target },
            constant: margin,
        }))
    }

    /// Pin `line` of `element` to the same container line.
    pub fn add_edge(&mut self, element: ElementId, line: AnchorLine, margin: f32) -> ConstraintId {
        self.constraints.insert(LayoutConstraint {
            element,
            attribute: ConstraintAttribute::Anchor {
                source: line,
                target: line,
            },
            constant: margin,
        })
    }

    /// Fix the height of `element`.
    pub fn add_height(&mut self, element: ElementId, height: f32) -> ConstraintId {
        self.constraints.insert(LayoutConstraint {
            element,
            attribute: ConstraintAttribute::Height,
            constant: height,
        })
    }

    /// Look up a constraint.
    pub fn get(&self, id: ConstraintId) -> Option<&LayoutConstraint> {
        self.constraints.get(id)
    }

    /// Read a constraint's constant.
    pub fn constant(&self, id: ConstraintId) -> Result<f32> {
        self.get(id)
            .map(|c| c.constant)
            .ok_or(Error::StaleConstraint)
    }

    /// Overwrite a constraint's constant.
    pub fn set_constant(&mut self, id: ConstraintId, constant: f32) -> Result<()> {
        let constraint = self.constraints.get_mut(id).ok_or(Error::StaleConstraint)?;
        constraint.constant = constant;
        Ok(())
    }

    /// Remove a single constraint.
    pub fn remove(&mut self, id: ConstraintId) -> bool {
        self.constraints.remove(id).is_some()
    }

    /// Remove every constraint of `element`, returning how many were removed.
    pub fn remove_element(&mut self, element: ElementId) -> usize {
        let before = self.constraints.len();
        self.constraints.retain(|_, c| c.element != element);
        before - self.constraints.len()
    }

    /// All anchors of `element`.
    pub fn anchors_for(&self, element: ElementId) -> Vec<Anchor> {
        self.constraints
            .values()
            .filter(|c| c.element == element)
            .filter_map(LayoutConstraint::as_anchor)
            .collect()
    }

    /// The constraint pinning `line` of `element`, if any.
    pub fn find_anchor(&self, element: ElementId, line: AnchorLine) -> Option<ConstraintId> {
        self.constraints.iter().find_map(|(id, c)| match c.attribute {
            ConstraintAttribute::Anchor { source, .. } if c.element == element && source == line => {
                Some(id)
            }
            _ => None,
        })
    }

    /// Whether `element` has an anchor on `line`.
    pub fn has_anchor(&self, element: ElementId, line: AnchorLine) -> bool {
        self.find_anchor(element, line).is_some()
    }

    /// Number of constraints in the table.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Whether the table holds no constraints.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

/// A non-owning reference to a constraint in someone else's table.
#[derive(Debug, Clone)]
pub struct ConstraintHandle {
    table: Weak<RwLock<ConstraintTable>>,
    id: ConstraintId,
}

impl ConstraintHandle {
    /// Reference constraint `id` of `table` without keeping the table alive.
    pub fn new(table: &SharedConstraintTable, id: ConstraintId) -> Self {
        Self {
            table: Arc::downgrade(table),
            id,
        }
    }

    /// The referenced constraint's ID.
    pub fn id(&self) -> ConstraintId {
        self.id
    }

    /// Whether the table and the constraint still exist.
    pub fn is_live(&self) -> bool {
        self.table
            .upgrade()
            .is_some_and(|table| table.read().get(self.id).is_some())
    }

    /// Read the constraint's constant.
    pub fn constant(&self) -> Result<f32> {
        let table = self.table.upgrade().ok_or(Error::StaleConstraint)?;
        let constant = table.read().constant(self.id);
        constant
    }

    /// Overwrite the constraint's constant.
    pub fn set_constant(&self, constant: f32) -> Result<()> {
        let table = self.table.upgrade().ok_or(Error::StaleConstraint)?;
        let result = table.write().set_constant(self.id, constant);
        result
    }
}
