//! Orientation predicates in the plane: on which side of a line a point
//! lies, whether three points are aligned, and whether a direction falls
//! inside an angular sector
//!
//! Every predicate takes an [`AbsoluteTolerance`] on the exterior product it
//! computes. For points in meters, that is a tolerance in square meters.

use crate::{
    dispatch::*,
    expr::{Binary, Expr, IntoOperand},
    numeric::{Field, Zero},
    rank::*,
    tensor::Point,
    tolerance::{AbsoluteTolerance, Tolerable},
    Operand,
};

/// Which side of the directed line `a -> b` a third point is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Right = -1,
    Collinear = 0,
    Left = 1,
}

/// `(b - a) ^ (c - a)`
pub type TurnOf<P> = Binary<CrossOp, Binary<SubOp, P, P>, Binary<SubOp, P, P>>;

/// What [`turn`] returns for points `P`
pub type Turn<P> = <TurnOf<<P as IntoOperand>::Operand> as Operand>::Coord;

/// The exterior product `a ^ b` of two planar vectors
pub type SpanOf<V> = <Binary<CrossOp, V, V> as Operand>::Coord;

/// Twice the signed area of the triangle `a b c`: positive when `c` is on the
/// left of `a -> b`, negative when on its right
#[inline]
pub fn turn<P>(a: P, b: P, c: P) -> Turn<P>
where
    P: IntoOperand,
    P::Operand: Copy,
    TurnOf<P::Operand>: Operand<Rank = ScalarRank>,
{
    let (a, b, c) = (a.into_operand(), b.into_operand(), c.into_operand());
    let ab = Expr::<Binary<SubOp, _, _>>::binary(b, a).into_inner();
    let ac = Expr::<Binary<SubOp, _, _>>::binary(c, a).into_inner();
    Expr::<TurnOf<P::Operand>>::binary(ab, ac).value()
}

/// ```
/// use tensex::{
///     orientation::{get_orientation, Orientation},
///     units::{meters, square_meters},
///     AbsoluteTolerance, Point,
/// };
///
/// let a = Point::new([meters(0.0), meters(0.0)]);
/// let b = Point::new([meters(2.0), meters(0.0)]);
/// let c = Point::new([meters(1.0), meters(3.0)]);
/// let tol = AbsoluteTolerance::new(square_meters(1e-9));
/// assert_eq!(get_orientation(&a, &b, &c, &tol), Orientation::Left);
/// assert_eq!(get_orientation(&b, &a, &c, &tol), Orientation::Right);
/// ```
pub fn get_orientation<P>(a: P, b: P, c: P, tolerance: &AbsoluteTolerance<Turn<P>>) -> Orientation
where
    P: IntoOperand,
    P::Operand: Copy,
    TurnOf<P::Operand>: Operand<Rank = ScalarRank>,
    Turn<P>: Tolerable + Zero,
{
    let t = turn(a, b, c);
    if tolerance.less_than(t, Zero::zero()) {
        Orientation::Right
    } else if tolerance.greater_than(t, Zero::zero()) {
        Orientation::Left
    } else {
        Orientation::Collinear
    }
}

#[inline]
pub fn is_collinear<P>(a: P, b: P, c: P, tolerance: &AbsoluteTolerance<Turn<P>>) -> bool
where
    P: IntoOperand,
    P::Operand: Copy,
    TurnOf<P::Operand>: Operand<Rank = ScalarRank>,
    Turn<P>: Tolerable,
{
    tolerance.is_zero(turn(a, b, c))
}

/// Whether `c` lies on the segment `[a, b]`. The position along the segment
/// is read on x, or on y when the segment is vertical. With
/// `include_bounds`, `c` may be equal to `a` or `b`
///
/// The same tolerance is used for the collinearity test and for coordinate
/// comparisons, hence bare coordinates only
pub fn is_between<T: Field>(
    a: &Point<T, 2>,
    b: &Point<T, 2>,
    c: &Point<T, 2>,
    include_bounds: bool,
    tolerance: &AbsoluteTolerance<T>,
) -> bool {
    if !tolerance.is_zero(turn(a, b, c)) {
        return false;
    }
    let axis = if tolerance.equals(a.0[0], b.0[0]) { 1 } else { 0 };
    let (a, b, c) = (a.0[axis], b.0[axis], c.0[axis]);
    if include_bounds {
        (tolerance.less_or_equal(a, c) && tolerance.less_or_equal(c, b))
            || (tolerance.greater_or_equal(a, c) && tolerance.greater_or_equal(c, b))
    } else {
        (tolerance.less_than(a, c) && tolerance.less_than(c, b))
            || (tolerance.greater_than(a, c) && tolerance.greater_than(c, b))
    }
}

/// Whether the direction of `c` is inside the sector swept counter-clockwise
/// from `a` to `b`. The sector is reflex when `b` is clockwise from `a`. With
/// `include_bounds`, `c` may be aligned with `a` or `b`
pub fn is_vector_between<V>(
    a: V,
    b: V,
    c: V,
    include_bounds: bool,
    tolerance: &AbsoluteTolerance<SpanOf<V::Operand>>,
) -> bool
where
    V: IntoOperand,
    V::Operand: Copy,
    <V::Operand as Classified>::Rank: VectorShape,
    Binary<CrossOp, V::Operand, V::Operand>: Operand<Rank = ScalarRank>,
    SpanOf<V::Operand>: Tolerable + Zero,
{
    let (a, b, c) = (a.into_operand(), b.into_operand(), c.into_operand());
    let span = |x: V::Operand, y: V::Operand| Expr::<Binary<CrossOp, _, _>>::binary(x, y).value();
    let inside = |s: SpanOf<V::Operand>| {
        if include_bounds {
            !tolerance.less_than(s, Zero::zero())
        } else {
            tolerance.greater_than(s, Zero::zero())
        }
    };
    let (ac, cb) = (inside(span(a, c)), inside(span(c, b)));
    if tolerance.less_than(span(a, b), Zero::zero()) {
        ac || cb
    } else {
        ac && cb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        units::{meters, square_meters},
        Vector,
    };
    use rstest::*;

    #[fixture]
    fn tol() -> AbsoluteTolerance<f64> {
        AbsoluteTolerance::new(1e-10)
    }

    #[rstest]
    #[case([1.0, 1.0], Orientation::Left)]
    #[case([1.0, -1.0], Orientation::Right)]
    #[case([3.0, 0.0], Orientation::Collinear)]
    #[case([-1.0, 1e-12], Orientation::Collinear)]
    fn side_of_the_x_axis(#[case] c: [f64; 2], #[case] expected: Orientation, tol: AbsoluteTolerance<f64>) {
        let a = Point::new([0.0, 0.0]);
        let b = Point::new([1.0, 0.0]);
        assert_eq!(get_orientation(&a, &b, &Point::new(c), &tol), expected);
    }

    #[test]
    fn turn_is_twice_the_signed_area() {
        let a = Point::new([0.0, 0.0]);
        let b = Point::new([4.0, 0.0]);
        let c = Point::new([0.0, 3.0]);
        assert_eq!(turn(&a, &b, &c), 12.0);
        assert_eq!(turn(&a, &c, &b), -12.0);
    }

    #[test]
    fn collinearity_in_meters() {
        let a = Point::new([meters(0.0), meters(0.0)]);
        let b = Point::new([meters(1.0), meters(1.0)]);
        let c = Point::new([meters(5.0), meters(5.0)]);
        let tol = AbsoluteTolerance::new(square_meters(1e-9));
        assert_eq!(turn(&a, &b, &c), square_meters(0.0));
        assert!(is_collinear(&a, &b, &c, &tol));
        assert!(!is_collinear(&a, &b, &Point::new([meters(5.0), meters(6.0)]), &tol));
    }

    #[rstest]
    #[case([1.0, 1.0], true, true)]
    #[case([1.0, 1.0], false, true)]
    #[case([0.0, 0.0], true, true)]
    #[case([0.0, 0.0], false, false)]
    #[case([2.0, 2.0], false, false)]
    #[case([3.0, 3.0], true, false)]
    #[case([1.0, 1.5], true, false)]
    fn points_on_a_segment(
        #[case] c: [f64; 2],
        #[case] include_bounds: bool,
        #[case] expected: bool,
        tol: AbsoluteTolerance<f64>,
    ) {
        let a = Point::new([0.0, 0.0]);
        let b = Point::new([2.0, 2.0]);
        assert_eq!(is_between(&a, &b, &Point::new(c), include_bounds, &tol), expected);
        assert_eq!(is_between(&b, &a, &Point::new(c), include_bounds, &tol), expected);
    }

    #[rstest]
    fn vertical_segments_compare_on_y(tol: AbsoluteTolerance<f64>) {
        let a = Point::new([1.0, 0.0]);
        let b = Point::new([1.0, 4.0]);
        assert!(is_between(&a, &b, &Point::new([1.0, 2.0]), false, &tol));
        assert!(!is_between(&a, &b, &Point::new([1.0, 5.0]), true, &tol));
    }

    #[rstest]
    #[case([1.0, 1.0], true, true)]
    #[case([1.0, 0.0], true, true)]
    #[case([1.0, 0.0], false, false)]
    #[case([1.0, -1.0], true, false)]
    #[case([-1.0, -1.0], true, false)]
    fn quarter_sector(
        #[case] c: [f64; 2],
        #[case] include_bounds: bool,
        #[case] expected: bool,
        tol: AbsoluteTolerance<f64>,
    ) {
        let a = Vector::new([1.0, 0.0]);
        let b = Vector::new([0.0, 1.0]);
        assert_eq!(is_vector_between(&a, &b, &Vector::new(c), include_bounds, &tol), expected);
    }

    #[rstest]
    fn reflex_sector(tol: AbsoluteTolerance<f64>) {
        // counter-clockwise from +y all the way round to +x
        let a = Vector::new([0.0, 1.0]);
        let b = Vector::new([1.0, 0.0]);
        assert!(is_vector_between(&a, &b, &Vector::new([-1.0, 0.0]), false, &tol));
        assert!(is_vector_between(&a, &b, &Vector::new([0.0, -1.0]), false, &tol));
        assert!(!is_vector_between(&a, &b, &Vector::new([1.0, 1.0]), false, &tol));
    }
}
