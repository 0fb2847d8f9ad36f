// extensions/easing.rs
//
// Pure easing curves for timeline interpolation.
// No dependencies on the scene, just math.

/// Easing curve applied to a directive's normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Slow start and end. Default for SVG-style transitions.
    #[default]
    CubicInOut,
}

impl Easing {
    /// Apply the curve to `t` in [0, 1]; out-of-range input is clamped.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 2] = [Easing::Linear, Easing::CubicInOut];

    #[test]
    fn endpoints_are_fixed() {
        for e in ALL {
            assert!(e.apply(0.0).abs() < 1e-6, "{:?} at 0", e);
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", e);
        }
    }

    #[test]
    fn cubic_in_out_is_symmetric() {
        let a = Easing::CubicInOut.apply(0.25);
        let b = Easing::CubicInOut.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-6);
        assert!((Easing::CubicInOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn clamps_input() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn ease_interpolates() {
        let result = ease(1.0, 0.0, 0.5, Easing::Linear);
        assert!((result - 0.5).abs() < 0.001);
    }
}
