//! Logging facilities for floatlabel.
//!
//! floatlabel uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("floatlabel=debug")
//!     .init();
//! ```

/// Span names used throughout floatlabel for tracing.
pub mod span_names {
    /// Widget layout pass span.
    pub const LAYOUT: &str = "floatlabel::layout";
    /// Sub-element rebuild span.
    pub const REBUILD: &str = "floatlabel::rebuild";
    /// Signal emission span.
    pub const SIGNAL: &str = "floatlabel::signal";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "floatlabel_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "floatlabel_core::signal";
    /// Widget state machine target.
    pub const WIDGET: &str = "floatlabel::widget";
    /// Anchor and constraint layout target.
    pub const LAYOUT: &str = "floatlabel::layout";
    /// Placeholder animation target.
    pub const ANIMATION: &str = "floatlabel::animation";
    /// Configuration loading and patching target.
    pub const CONFIG: &str = "floatlabel::config";
}

/// A guard for timing an operation.
///
/// The span stays entered until the guard is dropped.
///
/// ```
/// use floatlabel_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("layout");
///     // ... timed work ...
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "floatlabel::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Trace-level event under the core target.
#[macro_export]
macro_rules! floatlabel_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "floatlabel_core", $($arg)*)
    };
}

/// Debug-level event under the core target.
#[macro_export]
macro_rules! floatlabel_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "floatlabel_core", $($arg)*)
    };
}

/// Warn-level event under the core target.
#[macro_export]
macro_rules! floatlabel_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "floatlabel_core", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_with_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new("test_operation");
            floatlabel_debug!(value = 1, "inside span");
        });
    }

    #[test]
    fn test_targets_are_namespaced() {
        assert!(targets::WIDGET.starts_with("floatlabel"));
        assert!(targets::SIGNAL.starts_with(targets::CORE));
    }
}
