//! Core systems for floatlabel.
//!
//! This crate provides the reactive plumbing shared by the widget crate:
//!
//! - **Signal/Slot System**: Type-safe notification of state changes
//! - **Property System**: Values with change detection
//! - **Logging**: `tracing` targets, span names and helpers
//!
//! # Signal/Slot Example
//!
//! ```
//! use floatlabel_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::{Property, ReadOnlyProperty};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
