//! Operations derived from the core operators: norms, normalization,
//! distances, interpolation, bisectors and bearings

use crate::{
    dispatch::*,
    expr::{dot, exterior_product_area, Binary, DotOf, Expr, IntoOperand},
    numeric::{Atan2, Field, Over, Plus, Sqrt, Zero},
    rank::*,
    tensor::Vector,
    units::{Angle, Quantity},
    Operand,
};

/// What [`magnitude`] returns for `A`: the square root of its dot product
/// with itself
pub type Magnitude<A> = <DotOf<A, A> as Sqrt>::Output;

/// `q - p`, as a node
pub type Difference<P, Q> = Binary<SubOp, <Q as IntoOperand>::Operand, <P as IntoOperand>::Operand>;

/// What [`distance_sqrd`] returns
pub type DistanceSqrd<P, Q> = <Binary<MulOp, Difference<P, Q>, Difference<P, Q>> as Operand>::Coord;

/// What [`lerp`] builds
pub type Lerp<P, Q, T> = Binary<
    AddOp,
    <P as IntoOperand>::Operand,
    Binary<MulOp, <T as IntoOperand>::Operand, Difference<P, Q>>,
>;

/// What [`angle_from_a_to_b`] returns: an angle whose value has the type the
/// coordinates' `atan2` gives
pub type Bearing<P, Q> = Quantity<<<Difference<P, Q> as Operand>::Coord as Atan2>::Output, Angle>;

/// `a . a`
#[inline]
pub fn magnitude_sqrd<A>(a: A) -> DotOf<A, A>
where
    A: IntoOperand + Copy,
    <A::Operand as Classified>::Rank: VectorShape,
    Binary<MulOp, A::Operand, A::Operand>: Operand<Rank = ScalarRank>,
{
    dot(a, a)
}

/// `|a|`. For a vector of lengths, this is a length
#[inline]
pub fn magnitude<A>(a: A) -> Magnitude<A>
where
    A: IntoOperand + Copy,
    <A::Operand as Classified>::Rank: VectorShape,
    Binary<MulOp, A::Operand, A::Operand>: Operand<Rank = ScalarRank>,
    DotOf<A, A>: Sqrt,
{
    magnitude_sqrd(a).sqrt()
}

/// `a / |a|`, as a lazy expression. The norm is computed once, right away;
/// the division happens per component on evaluation. For a vector of
/// lengths, the result is dimensionless
///
/// ```
/// use tensex::{construct, normalize, units::{dimensionless, meters, Dimensionless, Quantity}, Vector};
///
/// let v = Vector::new([meters(3.0), meters(4.0)]);
/// let u: Vector<Quantity<f64, Dimensionless>, 2> = construct(normalize(&v));
/// assert_eq!(u, Vector::new([dimensionless(0.6), dimensionless(0.8)]));
/// ```
#[inline]
pub fn normalize<A>(a: A) -> Expr<Binary<DivOp, A::Operand, Magnitude<A>>>
where
    A: IntoOperand + Copy,
    <A::Operand as Classified>::Rank: VectorShape,
    Binary<MulOp, A::Operand, A::Operand>: Operand<Rank = ScalarRank>,
    DotOf<A, A>: Sqrt,
    Binary<DivOp, A::Operand, Magnitude<A>>: Classified,
{
    let norm = magnitude(a);
    Expr::binary(a.into_operand(), norm)
}

/// `|q - p|²`. For points in meters, this is an area
#[inline]
pub fn distance_sqrd<P, Q>(p: P, q: Q) -> DistanceSqrd<P, Q>
where
    P: IntoOperand,
    Q: IntoOperand,
    P::Operand: Copy,
    Q::Operand: Copy,
    Difference<P, Q>: Classified,
    <Difference<P, Q> as Classified>::Rank: VectorShape,
    Binary<MulOp, Difference<P, Q>, Difference<P, Q>>: Operand<Rank = ScalarRank>,
{
    let d = Expr::<Difference<P, Q>>::binary(q.into_operand(), p.into_operand()).into_inner();
    Expr::<Binary<MulOp, _, _>>::binary(d, d).value()
}

/// `|q - p|`. For points in meters, this is a length
#[inline]
pub fn distance<P, Q>(p: P, q: Q) -> <DistanceSqrd<P, Q> as Sqrt>::Output
where
    P: IntoOperand,
    Q: IntoOperand,
    P::Operand: Copy,
    Q::Operand: Copy,
    Difference<P, Q>: Classified,
    <Difference<P, Q> as Classified>::Rank: VectorShape,
    Binary<MulOp, Difference<P, Q>, Difference<P, Q>>: Operand<Rank = ScalarRank>,
    DistanceSqrd<P, Q>: Sqrt,
{
    distance_sqrd(p, q).sqrt()
}

/// `p + t * (q - p)`, as a lazy expression: `p` for `t = 0`, `q` for
/// `t = 1`. With points, the result is a point
#[inline]
pub fn lerp<P, Q, T>(p: P, q: Q, t: T) -> Expr<Lerp<P, Q, T>>
where
    P: IntoOperand,
    Q: IntoOperand,
    T: IntoOperand,
    P::Operand: Copy,
    Lerp<P, Q, T>: Classified,
{
    let p = p.into_operand();
    let step = Expr::<Difference<P, Q>>::binary(q.into_operand(), p).into_inner();
    let scaled = Expr::<Binary<MulOp, _, _>>::binary(t.into_operand(), step).into_inner();
    Expr::binary(p, scaled)
}

/// Whether `a` is the zero vector, exactly
#[inline]
pub fn is_null<A>(a: A) -> bool
where
    A: IntoOperand + Copy,
    <A::Operand as Classified>::Rank: VectorShape,
    Binary<MulOp, A::Operand, A::Operand>: Operand<Rank = ScalarRank>,
    DotOf<A, A>: PartialEq + Zero,
{
    magnitude_sqrd(a) == Zero::zero()
}

/// The unit vector halfway between the directions of `a` and `b`, on the side
/// swept counter-clockwise from `a` to `b` when that is the shorter way.
/// Opposite directions bisect to the left of `a`, and equal directions to
/// `-a`
///
/// ```
/// use tensex::{bisect, Vector};
///
/// assert_eq!(bisect(&Vector::new([1.0, 0.0]), &Vector::new([-1.0, 0.0])), Vector::new([0.0, 1.0]));
/// ```
pub fn bisect<T>(a: &Vector<T, 2>, b: &Vector<T, 2>) -> Vector<T, 2>
where
    T: Field + Sqrt<Output = T>,
{
    let unit = |v: &Vector<T, 2>| -> Vector<T, 2> {
        let sqrd: T = dot(v, v);
        let norm = sqrd.sqrt();
        Vector::from_fn(|i| v.0[i].over(norm))
    };
    let (a, b) = (unit(a), unit(b));
    let turn: T = exterior_product_area(&a, &b);
    let zero = T::zero();
    if turn == zero {
        let along: T = dot(&a, &b);
        if along > zero {
            Vector::new([-a.0[0], -a.0[1]])
        } else {
            Vector::new([-a.0[1], a.0[0]])
        }
    } else {
        let mid = unit(&Vector::from_fn(|i| a.0[i].plus(b.0[i])));
        if turn > zero {
            mid
        } else {
            Vector::new([-mid.0[0], -mid.0[1]])
        }
    }
}

/// Direction of the line from `a` to `b`, measured counter-clockwise from the
/// x axis, in `(-pi, pi]`. Zero when the points are equal
///
/// ```
/// use tensex::{angle_from_a_to_b, units::{meters, radians}, Point};
///
/// let a = Point::new([meters(1.0), meters(1.0)]);
/// let b = Point::new([meters(1.0), meters(3.0)]);
/// assert_eq!(angle_from_a_to_b(&a, &b), radians(std::f64::consts::FRAC_PI_2));
/// ```
pub fn angle_from_a_to_b<P, Q>(a: P, b: Q) -> Bearing<P, Q>
where
    P: IntoOperand,
    Q: IntoOperand,
    Difference<P, Q>: Operand<Rank = VectorRank<2>>,
    <Difference<P, Q> as Operand>::Coord: Atan2,
{
    let d = Expr::<Difference<P, Q>>::binary(b.into_operand(), a.into_operand());
    Quantity::new(d.at(1).atan2(d.at(0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        construct,
        test_macros::*,
        units::{meters, radians, square_meters, Radians},
        Point,
    };
    use std::f64::consts::{FRAC_PI_2, PI};
    use rstest::*;

    #[fixture]
    fn p1() -> Point<f64, 3> {
        Point::new([1.0, 2.0, 3.0])
    }

    #[fixture]
    fn p2() -> Point<f64, 3> {
        Point::new([4.0, 6.0, 3.0])
    }

    #[rstest]
    fn distances(p1: Point<f64, 3>, p2: Point<f64, 3>) {
        assert_eq!(distance_sqrd(&p1, &p2), 25.0);
        assert_eq!(distance(&p1, &p2), 5.0);
        assert_eq!(distance(&p2, &p1), 5.0);
    }

    #[rstest]
    #[case(0.0, [1.0, 2.0, 3.0])]
    #[case(1.0, [4.0, 6.0, 3.0])]
    #[case(0.5, [2.5, 4.0, 3.0])]
    fn interpolation(p1: Point<f64, 3>, p2: Point<f64, 3>, #[case] t: f64, #[case] expected: [f64; 3]) {
        let p: Point<f64, 3> = construct(lerp(&p1, &p2, t));
        assert_eq!(p, Point::new(expected));
    }

    #[test]
    fn norms() {
        let v = Vector::new([3.0, 0.0, 4.0]);
        assert_eq!(magnitude_sqrd(&v), 25.0);
        assert_eq!(magnitude(&v), 5.0);
        let u: Vector<f64, 3> = construct(normalize(&v));
        assert_close!(magnitude(&u), 1.0);
    }

    #[test]
    fn units_follow_the_norms() {
        let a = Point::new([meters(0.0), meters(0.0)]);
        let b = Point::new([meters(6.0), meters(8.0)]);
        assert_eq!(distance_sqrd(&a, &b), square_meters(100.0));
        assert_eq!(distance(&a, &b), meters(10.0));
        let v = Vector::new([meters(6.0), meters(8.0)]);
        assert_eq!(magnitude(&v), meters(10.0));
    }

    #[rstest]
    #[case([0.0, 0.0], true)]
    #[case([0.0, 1.0], false)]
    #[case([1.0, 1.0], false)]
    fn null_vectors(#[case] v: [f64; 2], #[case] expected: bool) {
        assert_eq!(is_null(&Vector::new(v)), expected);
    }

    #[rstest]
    #[case::first_quadrant([1.0, 0.0], [0.0, 1.0], [0.5f64.sqrt(), 0.5f64.sqrt()])]
    #[case::half_turn([1.0, 0.0], [-1.0, 0.0], [0.0, 1.0])]
    #[case::clockwise([1.0, -1.0], [-1.0, -1.0], [0.0, 1.0])]
    #[case::vertical_half_turn([0.0, 1.0], [0.0, -1.0], [-1.0, 0.0])]
    #[case::same_direction([1.0, 0.0], [1.0, 0.0], [-1.0, 0.0])]
    #[case::unnormalized([3.0, 0.0], [0.0, 0.5], [0.5f64.sqrt(), 0.5f64.sqrt()])]
    fn bisectors(#[case] a: [f64; 2], #[case] b: [f64; 2], #[case] expected: [f64; 2]) {
        assert_close!(bisect(&Vector::new(a), &Vector::new(b)), Vector::new(expected));
    }

    #[rstest]
    #[case([1.0, 1.0], [3.0, 1.0], 0.0)]
    #[case([1.0, 1.0], [1.0, 3.0], FRAC_PI_2)]
    #[case([1.0, 1.0], [-1.0, 1.0], PI)]
    #[case([1.0, 1.0], [1.0, -1.0], -FRAC_PI_2)]
    fn bearings(#[case] a: [f64; 2], #[case] b: [f64; 2], #[case] expected: f64) {
        assert_close!(angle_from_a_to_b(&Point::new(a), &Point::new(b)), radians(expected));
    }

    #[test]
    fn bearing_between_equal_points_in_meters() {
        let a = Point::new([meters(10.0), meters(5.0)]);
        let angle: Radians = angle_from_a_to_b(&a, &a);
        assert_eq!(angle, radians(0.0));
    }
}
