//! Animated transition of a single constraint constant.
//!
//! The widget overwrites the placeholder's top constant immediately and then
//! animates the *presented* value toward it. Re-targeting while a transition
//! is in flight restarts from whatever value is currently presented.

use std::time::Duration;

use super::easing::{ease, lerp_eased, Easing};

/// Duration of a placeholder raise or lower.
pub const PLACEHOLDER_TRANSITION: Duration = Duration::from_millis(200);

/// Current state of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransitionState {
    /// No transition in progress.
    #[default]
    Idle,
    /// Transition is running.
    Running {
        /// Eased progress from 0.0 to 1.0.
        progress: f32,
        /// Value presented at this instant.
        value: f32,
    },
}

impl TransitionState {
    /// Check if a transition is currently in progress.
    pub fn is_running(&self) -> bool {
        matches!(self, TransitionState::Running { .. })
    }

    /// Get the current progress if running.
    pub fn progress(&self) -> Option<f32> {
        match self {
            TransitionState::Running { progress, .. } => Some(*progress),
            TransitionState::Idle => None,
        }
    }
}

/// Animates one `f32` from its presented value to a target.
///
/// Time is supplied by the caller through [`advance`](Self::advance), which
/// keeps the controller deterministic and independent of any display loop.
#[derive(Debug, Clone)]
pub struct ConstantTransition {
    easing: Easing,
    duration: Duration,
    from: f32,
    to: f32,
    elapsed: Duration,
    running: bool,
    restarts: u64,
}

impl ConstantTransition {
    /// A transition resting at `value`.
    pub fn new(value: f32) -> Self {
        Self {
            easing: Easing::default(),
            duration: PLACEHOLDER_TRANSITION,
            from: value,
            to: value,
            elapsed: Duration::ZERO,
            running: false,
            restarts: 0,
        }
    }

    /// Get the easing function.
    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Set the easing function.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Get the transition duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Set the transition duration.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Check if a transition is currently running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The value the transition is heading to.
    #[inline]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// How many times [`animate_to`](Self::animate_to) has (re)started motion.
    #[inline]
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// The value presented right now.
    pub fn presented(&self) -> f32 {
        if !self.running {
            return self.to;
        }
        lerp_eased(self.easing, self.from, self.to, self.raw_progress())
    }

    /// Start animating toward `target` from the presented value.
    ///
    /// Always restarts the clock, even when `target` equals the current
    /// target.
    pub fn animate_to(&mut self, target: f32) {
        self.from = self.presented();
        self.to = target;
        self.elapsed = Duration::ZERO;
        self.running = !self.duration.is_zero();
        self.restarts += 1;
    }

    /// Jump to `value` without animating.
    pub fn snap_to(&mut self, value: f32) {
        self.from = value;
        self.to = value;
        self.elapsed = Duration::ZERO;
        self.running = false;
    }

    /// Advance the clock by `dt` and report the resulting state.
    pub fn advance(&mut self, dt: Duration) -> TransitionState {
        if !self.running {
            return TransitionState::Idle;
        }

        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.running = false;
            self.from = self.to;
            return TransitionState::Idle;
        }

        let raw = self.raw_progress();
        TransitionState::Running {
            progress: ease(self.easing, raw),
            value: lerp_eased(self.easing, self.from, self.to, raw),
        }
    }

    fn raw_progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }
}

impl Default for ConstantTransition {
    fn default() -> Self {
        Self::new(0.0)
    }
}
