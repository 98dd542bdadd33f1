//! Easing curves for control tweens

/// Maps linear progress in [0, 1] to eased progress
///
/// Every curve fixes both endpoints: `apply(0) == 0`, `apply(1) == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Ease {
    Linear,
    /// Quadratic ease-out, fast start and slow settle
    #[default]
    QuadOut,
    /// Cubic ease-in-out
    CubicInOut,
}

impl Ease {
    /// Apply the curve to `t`, clamped to [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Ease::Linear)]
    #[test_case(Ease::QuadOut)]
    #[test_case(Ease::CubicInOut)]
    fn test_endpoints_fixed(ease: Ease) {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }

    #[test_case(Ease::Linear)]
    #[test_case(Ease::QuadOut)]
    #[test_case(Ease::CubicInOut)]
    fn test_monotonic(ease: Ease) {
        let mut last = 0.0;
        for step in 0..=64 {
            let v = ease.apply(step as f32 / 64.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_quad_out_leads_linear() {
        assert!((Ease::QuadOut.apply(0.5) - 0.75).abs() < 1e-6);
        assert!((Ease::CubicInOut.apply(0.5) - 0.5).abs() < 1e-6);
    }
}
