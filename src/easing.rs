//! Easing curves for keyframe interpolation.
//!
//! Every curve maps normalized segment progress in `[0, 1]` to shaped
//! progress in `[0, 1]`, with `apply(0) = 0`, `apply(1) = 1` and monotonic
//! non-decreasing output in between.

use serde::{Deserialize, Serialize};

/// Easing applied when leaving a keyframe toward the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Shapes normalized progress `t`. Input is clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            // Smoothstep
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}
