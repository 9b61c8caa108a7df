//! Animation support for the placeholder label.
//!
//! Easing functions take a normalized progress value `t` (0.0 to 1.0) and
//! return a transformed value; [`ConstantTransition`] drives one constraint
//! constant along such a curve.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use floatlabel::widget::animation::{ConstantTransition, Easing};
//!
//! let mut offset = ConstantTransition::new(20.0);
//! offset.set_easing(Easing::Linear);
//! offset.animate_to(0.0);
//! offset.advance(Duration::from_millis(100));
//! assert!((offset.presented() - 10.0).abs() < 1e-4);
//! ```

mod easing;
mod transition;

pub use easing::{ease, lerp_eased, Easing};
pub use transition::{ConstantTransition, TransitionState, PLACEHOLDER_TRANSITION};
