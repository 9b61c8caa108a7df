//! Easing curves for placeholder motion.

/// Timing curves available to a [`ConstantTransition`](super::ConstantTransition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Quadratic: starts slow, accelerates.
    EaseIn,
    /// Quadratic: starts fast, decelerates.
    EaseOut,
    /// Quadratic: slow at both ends. The platform's default view animation curve.
    #[default]
    EaseInOut,
}

/// Map linear progress `t` (clamped to 0.0..=1.0) through `easing`.
///
/// ```
/// use floatlabel::widget::animation::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.5), 0.5);
/// assert!(ease(Easing::EaseIn, 0.5) < 0.5);
/// assert!(ease(Easing::EaseOut, 0.5) > 0.5);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
    }
}

/// Interpolate from `start` to `end` along `easing` at progress `t`.
#[inline]
pub fn lerp_eased(easing: Easing, start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * ease(easing, t)
}
