// ============================================================================
// EASING FUNCTIONS for the touch envelope and parameter tweens
// ============================================================================

use std::f32::consts::FRAC_PI_2;

/// Ease-out sine: quick start, soft landing.
/// Drives both halves of the touch intensity envelope.
pub fn ease_out_sine(t: f32) -> f32 {
    (t * FRAC_PI_2).sin()
}

/// Ease-in quadratic: slow at start, fast at end
/// Used when the depth parameter falls away on hide
pub fn ease_in_quad(t: f32) -> f32 {
    t * t
}

/// Ease-out quadratic: fast at start, decelerates (default tween curve)
pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Linear: no easing, constant speed
pub fn linear(t: f32) -> f32 {
    t
}

/// Curve selector for parameter tweens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    InQuad,
    #[default]
    OutQuad,
    OutSine,
}

impl Ease {
    /// Evaluate the curve; `t` is clamped to [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => linear(t),
            Ease::InQuad => ease_in_quad(t),
            Ease::OutQuad => ease_out_quad(t),
            Ease::OutSine => ease_out_sine(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_hit_endpoints() {
        for ease in [Ease::Linear, Ease::InQuad, Ease::OutQuad, Ease::OutSine] {
            assert!(ease.apply(0.0).abs() < 1e-6, "{:?} should start at 0", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{:?} should end at 1", ease);
        }
    }

    #[test]
    fn test_apply_clamps_progress() {
        assert_eq!(Ease::OutQuad.apply(-2.0), 0.0);
        assert_eq!(Ease::OutQuad.apply(3.0), 1.0);
    }

    #[test]
    fn test_ease_out_is_ahead_of_linear() {
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!(ease_out_sine(t) > t);
            assert!(ease_out_quad(t) > t);
            assert!(ease_in_quad(t) < t);
        }
    }
}
