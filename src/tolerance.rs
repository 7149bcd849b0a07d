//! Approximate comparison of coordinates

use crate::numeric::{Abs, Minus};

/// What an [`AbsoluteTolerance`] can compare: bare numbers, and quantities
/// of any unit
pub trait Tolerable: Copy + PartialOrd + Minus<Output = Self> + Abs<Output = Self> {}

impl<T> Tolerable for T where T: Copy + PartialOrd + Minus<Output = T> + Abs<Output = T> {}

/// Two values are equal when they differ by at most `epsilon`. Orderings are
/// strict: `a` is less than `b` only when it is below `b` by more than
/// `epsilon`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsoluteTolerance<T> {
    pub epsilon: T,
}

impl<T: Tolerable> AbsoluteTolerance<T> {
    pub fn new(epsilon: T) -> Self {
        Self {
            epsilon: epsilon.abs(),
        }
    }

    #[inline]
    pub fn equals(&self, a: T, b: T) -> bool {
        a.minus(b).abs() <= self.epsilon
    }

    #[inline]
    pub fn is_zero(&self, a: T) -> bool {
        a.abs() <= self.epsilon
    }

    #[inline]
    pub fn less_than(&self, a: T, b: T) -> bool {
        a < b && !self.equals(a, b)
    }

    #[inline]
    pub fn greater_than(&self, a: T, b: T) -> bool {
        self.less_than(b, a)
    }

    #[inline]
    pub fn less_or_equal(&self, a: T, b: T) -> bool {
        a < b || self.equals(a, b)
    }

    #[inline]
    pub fn greater_or_equal(&self, a: T, b: T) -> bool {
        self.less_or_equal(b, a)
    }
}

impl Default for AbsoluteTolerance<f64> {
    fn default() -> Self {
        Self { epsilon: 1e-10 }
    }
}

impl Default for AbsoluteTolerance<f32> {
    fn default() -> Self {
        Self { epsilon: 1e-5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{meters, Meters};
    use rstest::*;

    #[rstest]
    #[case(1.0, 1.0 + 1e-11, true)]
    #[case(1.0, 1.0 + 1e-9, false)]
    #[case(-2.0, -2.0, true)]
    fn default_f64_equality(#[case] a: f64, #[case] b: f64, #[case] expected: bool) {
        assert_eq!(AbsoluteTolerance::default().equals(a, b), expected);
    }

    #[test]
    fn strict_orderings() {
        let t = AbsoluteTolerance::new(0.1);
        assert!(t.less_than(1.0, 1.5));
        assert!(!t.less_than(1.0, 1.05));
        assert!(!t.less_than(1.5, 1.0));
        assert!(t.greater_than(1.5, 1.0));
        assert!(t.less_or_equal(1.05, 1.0));
        assert!(!t.less_or_equal(1.5, 1.0));
        assert!(t.greater_or_equal(0.95, 1.0));
        assert!(t.greater_or_equal(2.0, 1.0));
        assert!(t.is_zero(-0.05));
        assert!(!t.is_zero(0.2));
    }

    #[test]
    fn negative_epsilon_is_taken_absolutely() {
        assert_eq!(AbsoluteTolerance::new(-0.5f32).epsilon, 0.5);
    }

    #[test]
    fn quantities_compare_in_their_unit() {
        let t: AbsoluteTolerance<Meters> = AbsoluteTolerance::new(meters(0.01));
        assert!(t.equals(meters(1.0), meters(1.005)));
        assert!(t.less_than(meters(1.0), meters(1.1)));
    }
}
