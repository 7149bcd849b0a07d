//! Planar rotations

use crate::{
    dispatch::*,
    expr::{dot, exterior_product_area, Binary, DotOf, Expr, IntoOperand},
    functions::magnitude,
    numeric::{Field, Over, Product, Quotient, Sqrt, Times, Trig},
    policy::construct,
    rank::*,
    tensor::{Matrix, Point, Vector},
    Operand,
};
use std::ops::Neg;

/// What [`rotate_point`] builds
pub type RotatedPoint<'m, M, P, O> = Binary<
    AddOp,
    <O as IntoOperand>::Operand,
    Binary<MulOp, &'m M, Binary<SubOp, <P as IntoOperand>::Operand, <O as IntoOperand>::Operand>>,
>;

/// The norm of a vector operand `V`
pub type Norm<V> = <DotOf<V, V> as Sqrt>::Output;

/// The entries of a [`rotation_matrix`] between vectors `V`: dimensionless
/// for vectors of lengths, bare numbers for bare coordinates
pub type Ratio<V> = Quotient<DotOf<V, V>, Product<Norm<V>, Norm<V>>>;

/// The rotation taking the direction of `from` to the direction of `to`.
/// Neither needs to be normalized: the cosine and sine of the angle are their
/// dot and exterior products over the product of their norms
///
/// ```
/// use tensex::{construct, rotation::rotation_matrix, units::meters, Vector};
///
/// let x = Vector::new([1.0, 0.0]);
/// let y = Vector::new([0.0, 1.0]);
/// let r = rotation_matrix(&x, &y);
/// let v: Vector<f64, 2> = construct(&r * &x);
/// assert_eq!(v, y);
///
/// let east = Vector::new([meters(3.0), meters(0.0)]);
/// let north = Vector::new([meters(0.0), meters(2.0)]);
/// let r = rotation_matrix(&east, &north);
/// let turned: Vector<_, 2> = construct(&r * &east);
/// assert_eq!(turned, Vector::new([meters(0.0), meters(3.0)]));
/// ```
pub fn rotation_matrix<V>(from: V, to: V) -> Matrix<Ratio<V>, 2, 2>
where
    V: IntoOperand + Copy,
    <V::Operand as Classified>::Rank: VectorShape,
    Binary<MulOp, V::Operand, V::Operand>: Operand<Rank = ScalarRank>,
    Binary<CrossOp, V::Operand, V::Operand>: Operand<Rank = ScalarRank, Coord = DotOf<V, V>>,
    DotOf<V, V>: Sqrt + Over<Product<Norm<V>, Norm<V>>>,
    Norm<V>: Times,
    Product<Norm<V>, Norm<V>>: Copy,
    Ratio<V>: Copy + Neg<Output = Ratio<V>>,
{
    let scale = magnitude(from).times(magnitude(to));
    let cos = dot(from, to).over(scale);
    let sin = exterior_product_area(from, to).over(scale);
    Matrix::new([[cos, -sin], [sin, cos]])
}

/// The counter-clockwise rotation by `angle`, which can be a bare float or
/// a [`Radians`](crate::units::Radians)
pub fn rotation_matrix_from_angle<A>(angle: A) -> Matrix<A::Output, 2, 2>
where
    A: Trig,
    A::Output: Copy + Neg<Output = A::Output>,
{
    let (sin, cos) = angle.sin_cos();
    Matrix::new([[cos, -sin], [sin, cos]])
}

/// `rot * v`, as a lazy expression
#[inline]
pub fn rotate_vector<'m, M, V>(rot: &'m M, v: V) -> Expr<Binary<MulOp, &'m M, V::Operand>>
where
    M: Classified<Rank = MatrixRank<2, 2>>,
    V: IntoOperand,
    Binary<MulOp, &'m M, V::Operand>: Classified<Rank = VectorRank<2>>,
{
    Expr::binary(rot, v.into_operand())
}

/// `origin + rot * (p - origin)`, as a lazy expression: `p` rotated about
/// `origin`
#[inline]
pub fn rotate_point<'m, M, P, O>(rot: &'m M, p: P, origin: O) -> Expr<RotatedPoint<'m, M, P, O>>
where
    M: Classified<Rank = MatrixRank<2, 2>>,
    P: IntoOperand,
    O: IntoOperand,
    O::Operand: Copy,
    RotatedPoint<'m, M, P, O>: Classified<Rank = PointRank<2>>,
{
    let origin = origin.into_operand();
    let offset = Expr::<Binary<SubOp, _, _>>::binary(p.into_operand(), origin).into_inner();
    let turned = Expr::<Binary<MulOp, _, _>>::binary(rot, offset).into_inner();
    Expr::binary(origin, turned)
}

/// Rotate each point about `origin`, then move it by `translation`
///
/// ```
/// use tensex::{rotation::{rotate_translate_points, rotation_matrix_from_angle}, Point, Vector};
///
/// let half_turn = rotation_matrix_from_angle(std::f64::consts::PI);
/// let origin = Point::new([0.0, 0.0]);
/// let up = Vector::new([0.0, 5.0]);
/// let moved = rotate_translate_points(&[Point::new([1.0, 0.0])], &half_turn, &up, &origin);
/// assert!((moved[0].0[0] + 1.0).abs() < 1e-12);
/// assert!((moved[0].0[1] - 5.0).abs() < 1e-12);
/// ```
pub fn rotate_translate_points<T: Field>(
    points: &[Point<T, 2>],
    rot: &Matrix<T, 2, 2>,
    translation: &Vector<T, 2>,
    origin: &Point<T, 2>,
) -> Vec<Point<T, 2>> {
    points
        .iter()
        .map(|p| construct(rotate_point(rot, p, origin) + translation))
        .collect()
}
