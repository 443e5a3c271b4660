//! Time-based interpolation of the named shader parameters.

use super::easing::Ease;

/// Scalar shader inputs animated by show/hide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderParam {
    Size,
    Randomness,
    Depth,
}

/// Current values of the animated parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderParams {
    pub size: f32,
    pub randomness: f32,
    pub depth: f32,
}

impl Default for ShaderParams {
    fn default() -> Self {
        Self {
            size: 0.0,
            randomness: 1.0,
            depth: 2.0,
        }
    }
}

impl ShaderParams {
    pub fn get(&self, param: ShaderParam) -> f32 {
        match param {
            ShaderParam::Size => self.size,
            ShaderParam::Randomness => self.randomness,
            ShaderParam::Depth => self.depth,
        }
    }

    pub fn set(&mut self, param: ShaderParam, value: f32) {
        match param {
            ShaderParam::Size => self.size = value,
            ShaderParam::Randomness => self.randomness = value,
            ShaderParam::Depth => self.depth = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamTween {
    pub param: ShaderParam,
    pub from: f32,
    pub to: f32,
    /// Seconds
    pub duration: f32,
    pub elapsed: f32,
    pub ease: Ease,
}

impl ParamTween {
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn value(&self) -> f32 {
        let t = self.ease.apply(self.progress());
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// At most one running tween per parameter; a new one replaces the old
#[derive(Debug, Clone, Default)]
pub struct Animator {
    tweens: Vec<ParamTween>,
}

impl Animator {
    /// Animate `param` from `from` to `to`, snapping it to `from` right away
    pub fn from_to(
        &mut self,
        params: &mut ShaderParams,
        param: ShaderParam,
        from: f32,
        to: f32,
        duration: f32,
        ease: Ease,
    ) {
        params.set(param, from);
        self.tweens.retain(|tween| tween.param != param);
        self.tweens.push(ParamTween {
            param,
            from,
            to,
            duration,
            elapsed: 0.0,
            ease,
        });
    }

    /// Animate `param` from wherever it is now
    pub fn to(
        &mut self,
        params: &mut ShaderParams,
        param: ShaderParam,
        to: f32,
        duration: f32,
        ease: Ease,
    ) {
        let from = params.get(param);
        self.from_to(params, param, from, to, duration, ease);
    }

    /// Step every tween by `delta` seconds and write the results
    pub fn advance(&mut self, delta: f32, params: &mut ShaderParams) {
        for tween in &mut self.tweens {
            tween.elapsed += delta;
            params.set(tween.param, tween.value());
        }
        self.tweens.retain(|tween| !tween.is_finished());
    }

    pub fn is_animating(&self, param: ShaderParam) -> bool {
        self.tweens.iter().any(|tween| tween.param == param)
    }

    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_tween_midpoint_and_end() {
        let mut params = ShaderParams::default();
        let mut animator = Animator::default();
        animator.from_to(&mut params, ShaderParam::Size, 0.0, 2.0, 1.0, Ease::Linear);

        animator.advance(0.5, &mut params);
        assert!((params.size - 1.0).abs() < 1e-5);

        animator.advance(0.75, &mut params);
        assert_eq!(params.size, 2.0);
        assert!(animator.is_idle());
    }

    #[test]
    fn test_from_to_snaps_start_value() {
        let mut params = ShaderParams::default();
        let mut animator = Animator::default();
        animator.from_to(&mut params, ShaderParam::Depth, 40.0, 4.0, 1.5, Ease::OutQuad);

        assert_eq!(params.depth, 40.0);
    }

    #[test]
    fn test_to_starts_from_current_value() {
        let mut params = ShaderParams::default();
        let mut animator = Animator::default();
        animator.to(&mut params, ShaderParam::Randomness, 5.0, 1.0, Ease::Linear);

        animator.advance(0.5, &mut params);
        assert!((params.randomness - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_new_tween_replaces_running_one() {
        let mut params = ShaderParams::default();
        let mut animator = Animator::default();
        animator.to(&mut params, ShaderParam::Size, 10.0, 1.0, Ease::Linear);
        animator.advance(0.5, &mut params);
        animator.to(&mut params, ShaderParam::Size, 0.0, 1.0, Ease::Linear);
        animator.advance(1.0, &mut params);

        assert_eq!(params.size, 0.0);
        assert!(!animator.is_animating(ShaderParam::Size));
    }

    #[test]
    fn test_zero_duration_completes_on_next_step() {
        let mut params = ShaderParams::default();
        let mut animator = Animator::default();
        animator.to(&mut params, ShaderParam::Depth, -20.0, 0.0, Ease::InQuad);

        animator.advance(0.0, &mut params);
        assert_eq!(params.depth, -20.0);
        assert!(animator.is_idle());
    }

    #[test]
    fn test_params_independent() {
        let mut params = ShaderParams::default();
        let mut animator = Animator::default();
        animator.to(&mut params, ShaderParam::Size, 1.0, 1.0, Ease::Linear);
        animator.to(&mut params, ShaderParam::Depth, 0.0, 2.0, Ease::Linear);

        animator.advance(1.0, &mut params);
        assert_eq!(params.size, 1.0);
        assert!(animator.is_animating(ShaderParam::Depth));
        assert!(!animator.is_animating(ShaderParam::Size));
    }
}
