/*!
# Lazy, rank-checked tensor expressions

Build linear algebra expressions over scalars, vectors, points and matrices
with the usual operators, and evaluate them without any temporary. The main
type is [`Expr`], which every operator returns and which computes nothing
until a concrete value is [`construct`]ed or [`assign`]ed from it.

`tensex` is agnostic over the types used to store data. Any type becomes an
operand by telling which kind of object it is (its _rank_: scalar, vector or
point of dimension `D`, or `R`x`C` matrix) through [`Classified`], and how to
read its components through [`Operand`] (all components share one type) or
[`Slot`] (each component has its own type). [`Vector`], [`Point`] and
[`Matrix`] are provided, and are built on that same public protocol.

Evaluation happens in 2 phases:

- 1: **Expression construction**, done entirely by the type checker. Each
  operator looks up the ranks of its operands in the
  [`dispatch`](dispatch) table, which gives the rank of the result or
  rejects the expression: adding two points, mixing dimensions or negating
  a point are compile errors, not runtime ones. The resulting tree only
  holds references to its leaves and scalars by value.
- 2: **Evaluation**, one output component at a time. Component `i` of
  `&a + s * &c` is computed as `a[i] + s * c[i]`, with no intermediate
  vector for `s * c`. Each component is computed once per evaluation.

Coordinates do not need to all be `f64`: arithmetic goes through the
promotion traits of [`numeric`], so adding an `i32` vector to an `f64` one
gives `f64` coordinates, and coordinates in physical [`units`] combine into
the right unit (the dot product of two length vectors is an area).

```
use tensex::{construct, dot, units::{meters, square_meters}, Point, Vector};

let p = Point::new([meters(1.0), meters(2.0)]);
let v = Vector::new([meters(10.0), meters(5.0)]);
let w = Vector::new([meters(5.0), meters(10.0)]);

let q: Point<_, 2> = construct(&p + &v - &w);
assert_eq!(q, Point::new([meters(6.0), meters(-3.0)]));
assert_eq!(dot(&v, &w), square_meters(100.0));
```

On top of this core, the crate provides usual derived operations (norms,
distances, interpolation, bisectors), orientation predicates in the plane,
planar rotations, LUP decomposition of square matrices, and tolerance-based
comparisons.
*/

pub mod access;
pub mod dispatch;
pub mod expr;
pub mod functions;
pub mod lup;
pub mod numeric;
pub mod orientation;
pub mod policy;
pub mod rank;
pub mod rotation;
pub mod tensor;
pub mod tolerance;
pub mod units;

pub use access::{get_at, set_at, Access, Indexed, Operand, OperandMut, Slot};
pub use expr::{abs, as_point, as_vector, cross, dot, exterior_product_area, Binary, Expr, IntoOperand, Unary};
pub use functions::{
    angle_from_a_to_b, bisect, distance, distance_sqrd, is_null, lerp, magnitude, magnitude_sqrd, normalize,
};
pub use lup::{Lup, LupError};
pub use orientation::{get_orientation, is_between, is_collinear, is_vector_between, Orientation};
pub use policy::{assign, construct, AssignFrom, ConstructFrom};
pub use rank::{cols, dimension, is_homogeneous, is_matrix, is_point, is_scalar, is_vector, rows, Classified};
pub use tensor::{Matrix, Point, Vector};
pub use tolerance::AbsoluteTolerance;
pub use units::Quantity;
