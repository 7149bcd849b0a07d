//! Lazy expressions
//!
//! Applying an operator to operands builds an [`Expr`] wrapping a [`Binary`]
//! or [`Unary`] node, and computes nothing. Nodes hold their leaves by
//! reference (`&'a Vector<_, _>`, `&'a Matrix<_, _, _>`...) and scalars by
//! value, so building an expression copies no aggregate. The tree is only
//! walked when a target is constructed or assigned from it (see
//! [`policy`](crate::policy)), once per component of the target: for
//! `&a + s * &c`, component `i` is computed as `a[i] + s * c[i]` with no
//! intermediate vector for `s * c`.
//!
//! Whether an operator applies is decided by the rank of its operands,
//! through the [`dispatch`](crate::dispatch) table:
//!
//! ```
//! use tensex::{construct, Point, Vector};
//!
//! let p = Point::new([1.0, 2.0]);
//! let v = Vector::new([10.0, 20.0]);
//! let moved: Point<f64, 2> = construct(&p + &v);
//! assert_eq!(moved, Point::new([11.0, 22.0]));
//! let back: Point<f64, 2> = construct(&moved - &v);
//! assert_eq!(back, p);
//! ```
//!
//! Adding two points has no meaning and does not compile:
//!
//! ```compile_fail
//! use tensex::Point;
//!
//! let p = Point::new([1.0, 2.0]);
//! let q = Point::new([3.0, 4.0]);
//! let _ = &p + &q;
//! ```
//!
//! and neither does mixing dimensions:
//!
//! ```compile_fail
//! use tensex::Vector;
//!
//! let a = Vector::new([1.0, 2.0]);
//! let b = Vector::new([1.0, 2.0, 3.0]);
//! let _ = &a + &b;
//! ```
//!
//! ```compile_fail
//! use tensex::{dot, Vector};
//!
//! let a = Vector::new([1.0, 2.0]);
//! let b = Vector::new([1.0, 2.0, 3.0]);
//! let _ = dot(&a, &b);
//! ```
//!
//! nor negating a point:
//!
//! ```compile_fail
//! use tensex::Point;
//!
//! let p = Point::new([1.0, 2.0]);
//! let _ = -&p;
//! ```

use crate::{access::*, dispatch::*, rank::*, units::Quantity};
use std::marker::PhantomData;

// # TYPES & TRAITS //

/// An operator applied to two operands. `L` and `R` are leaves (references
/// or scalars) or other nodes
#[derive(Debug, Clone, Copy)]
pub struct Binary<Op, L, R> {
    lhs: L,
    rhs: R,
    op: PhantomData<Op>,
}

/// An operator applied to one operand
#[derive(Debug, Clone, Copy)]
pub struct Unary<Op, E> {
    inner: E,
    op: PhantomData<Op>,
}

/// The user-facing handle on an unevaluated expression. All the operators
/// are implemented on it, so it can be combined further; it is consumed by
/// [`construct`](crate::construct) and [`assign`](crate::assign)
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Expr<E>(E);

/// Anything that can be an operand of an expression: references to
/// registered types, scalars, and expressions themselves
pub trait IntoOperand {
    type Operand: Classified;
    fn into_operand(self) -> Self::Operand;
}

impl<E: Classified> IntoOperand for Expr<E> {
    type Operand = E;
    #[inline]
    fn into_operand(self) -> E {
        self.0
    }
}

/// Reuse an expression without consuming it
impl<'a, E: Classified> IntoOperand for &'a Expr<E> {
    type Operand = &'a E;
    #[inline]
    fn into_operand(self) -> &'a E {
        &self.0
    }
}

impl<Op, L, R> Expr<Binary<Op, L, R>> {
    /// Combine two operands under `Op`. This is what the operator overloads
    /// call; it is public so that [`impl_tensor_ops!`] can be used by
    /// downstream crates
    #[doc(hidden)]
    #[inline]
    pub fn binary(lhs: L, rhs: R) -> Self {
        Expr(Binary {
            lhs,
            rhs,
            op: PhantomData,
        })
    }
}

impl<Op, E> Expr<Unary<Op, E>> {
    #[doc(hidden)]
    #[inline]
    pub fn unary(inner: E) -> Self {
        Expr(Unary {
            inner,
            op: PhantomData,
        })
    }
}

impl<E> Expr<E> {
    /// The root node
    pub fn into_inner(self) -> E {
        self.0
    }

    pub fn as_inner(&self) -> &E {
        &self.0
    }

    /// Evaluate a scalar expression. This is the one evaluator call
    /// a rank 0 result needs
    #[inline]
    pub fn value(&self) -> <E as Operand>::Coord
    where
        E: Operand<Rank = ScalarRank>,
    {
        self.0.at(())
    }
}

// # CLASSIFICATION OF NODES //

impl<Op, L, R> Classified for Binary<Op, L, R>
where
    L: Classified,
    R: Classified,
    (L::Rank, R::Rank): RankRule<Op>,
    L::Diversity: Join<R::Diversity>,
{
    type Rank = <(L::Rank, R::Rank) as RankRule<Op>>::Output;
    type Diversity = <L::Diversity as Join<R::Diversity>>::Output;
}

impl<Op, L, R> Operand for Binary<Op, L, R>
where
    L: Classified,
    R: Classified,
    (L::Rank, R::Rank): Rule<Op, L, R>,
    L::Diversity: Join<R::Diversity>,
{
    type Coord = <(L::Rank, R::Rank) as Rule<Op, L, R>>::Coord;
    #[inline]
    fn at(&self, idx: <Self::Rank as Rank>::Index) -> Self::Coord {
        <(L::Rank, R::Rank) as Rule<Op, L, R>>::eval(&self.lhs, &self.rhs, idx)
    }
}

impl<Op, L, R, const I: usize> Slot<I> for Binary<Op, L, R>
where
    L: Classified,
    R: Classified,
    (L::Rank, R::Rank): SlotRule<Op, L, R, I>,
    L::Diversity: Join<R::Diversity>,
{
    type Output = <(L::Rank, R::Rank) as SlotRule<Op, L, R, I>>::Value;
    #[inline]
    fn slot(&self) -> Self::Output {
        <(L::Rank, R::Rank) as SlotRule<Op, L, R, I>>::eval(&self.lhs, &self.rhs)
    }
}

impl<Op, E> Classified for Unary<Op, E>
where
    E: Classified,
    E::Rank: UnaryRankRule<Op>,
{
    type Rank = <E::Rank as UnaryRankRule<Op>>::Output;
    type Diversity = E::Diversity;
}

impl<Op, E> Operand for Unary<Op, E>
where
    E: Classified,
    E::Rank: UnaryRule<Op, E>,
{
    type Coord = <E::Rank as UnaryRule<Op, E>>::Coord;
    #[inline]
    fn at(&self, idx: <Self::Rank as Rank>::Index) -> Self::Coord {
        <E::Rank as UnaryRule<Op, E>>::eval(&self.inner, idx)
    }
}

impl<Op, E, const I: usize> Slot<I> for Unary<Op, E>
where
    E: Classified,
    E::Rank: UnarySlotRule<Op, E, I>,
{
    type Output = <E::Rank as UnarySlotRule<Op, E, I>>::Value;
    #[inline]
    fn slot(&self) -> Self::Output {
        <E::Rank as UnarySlotRule<Op, E, I>>::eval(&self.inner)
    }
}

/// An [`Expr`] reads exactly like its root node
impl<E: Classified> Classified for Expr<E> {
    type Rank = E::Rank;
    type Diversity = E::Diversity;
}

impl<E: Operand> Operand for Expr<E> {
    type Coord = E::Coord;
    #[inline]
    fn at(&self, idx: <Self::Rank as Rank>::Index) -> Self::Coord {
        self.0.at(idx)
    }
}

impl<E: Slot<I>, const I: usize> Slot<I> for Expr<E> {
    type Output = E::Output;
    #[inline]
    fn slot(&self) -> Self::Output {
        self.0.slot()
    }
}

// # OPERATORS //

macro_rules! expr_binary_ops {
    ($($tr:ident $method:ident $op:ident),*) => {
        $(
        impl<E, Rhs> std::ops::$tr<Rhs> for Expr<E>
        where
            E: Classified,
            Rhs: IntoOperand,
            Binary<$op, E, Rhs::Operand>: Classified,
        {
            type Output = Expr<Binary<$op, E, Rhs::Operand>>;
            #[inline]
            fn $method(self, rhs: Rhs) -> Self::Output {
                Expr::binary(self.0, rhs.into_operand())
            }
        }
        )*
    };
}

expr_binary_ops!(
    Add add AddOp,
    Sub sub SubOp,
    Mul mul MulOp,
    Div div DivOp,
    BitXor bitxor CrossOp
);

/// The operators of `Expr`, on a borrowed expression: the new node holds
/// a reference to the root of the existing tree
macro_rules! expr_ref_binary_ops {
    ($($tr:ident $method:ident $op:ident),*) => {
        $(
        impl<'a, E, Rhs> std::ops::$tr<Rhs> for &'a Expr<E>
        where
            E: Classified,
            Rhs: IntoOperand,
            Binary<$op, &'a E, Rhs::Operand>: Classified,
        {
            type Output = Expr<Binary<$op, &'a E, Rhs::Operand>>;
            #[inline]
            fn $method(self, rhs: Rhs) -> Self::Output {
                Expr::binary(&self.0, rhs.into_operand())
            }
        }
        )*
    };
}

expr_ref_binary_ops!(
    Add add AddOp,
    Sub sub SubOp,
    Mul mul MulOp,
    Div div DivOp,
    BitXor bitxor CrossOp
);

impl<E> std::ops::Neg for Expr<E>
where
    E: Classified,
    Unary<NegOp, E>: Classified,
{
    type Output = Expr<Unary<NegOp, E>>;
    #[inline]
    fn neg(self) -> Self::Output {
        Expr::unary(self.0)
    }
}

impl<'a, E> std::ops::Neg for &'a Expr<E>
where
    E: Classified,
    Unary<NegOp, &'a E>: Classified,
{
    type Output = Expr<Unary<NegOp, &'a E>>;
    #[inline]
    fn neg(self) -> Self::Output {
        Expr::unary(&self.0)
    }
}

/// Scalars on the left of `*`. A foreign scalar type cannot get a generic
/// `Mul<Rhs>` impl, so each right-hand side is spelled out
macro_rules! scalar_lhs_mul {
    ($($s:ty),*) => {
        $(
        impl<E> std::ops::Mul<Expr<E>> for $s
        where
            E: Classified,
            Binary<MulOp, $s, E>: Classified,
        {
            type Output = Expr<Binary<MulOp, $s, E>>;
            #[inline]
            fn mul(self, rhs: Expr<E>) -> Self::Output {
                Expr::binary(self, rhs.0)
            }
        }
        impl<'a, E> std::ops::Mul<&'a Expr<E>> for $s
        where
            E: Classified,
            Binary<MulOp, $s, &'a E>: Classified,
        {
            type Output = Expr<Binary<MulOp, $s, &'a E>>;
            #[inline]
            fn mul(self, rhs: &'a Expr<E>) -> Self::Output {
                Expr::binary(self, &rhs.0)
            }
        }
        )*
    };
}
scalar_lhs_mul!(f32, f64, i32, i64);

impl<E, V, U> std::ops::Mul<Expr<E>> for Quantity<V, U>
where
    E: Classified,
    Binary<MulOp, Quantity<V, U>, E>: Classified,
{
    type Output = Expr<Binary<MulOp, Quantity<V, U>, E>>;
    #[inline]
    fn mul(self, rhs: Expr<E>) -> Self::Output {
        Expr::binary(self, rhs.0)
    }
}

impl<'a, E, V, U> std::ops::Mul<&'a Expr<E>> for Quantity<V, U>
where
    E: Classified,
    Binary<MulOp, Quantity<V, U>, &'a E>: Classified,
{
    type Output = Expr<Binary<MulOp, Quantity<V, U>, &'a E>>;
    #[inline]
    fn mul(self, rhs: &'a Expr<E>) -> Self::Output {
        Expr::binary(self, &rhs.0)
    }
}

// # REGISTRATION MACROS //

/// Make a type usable as a scalar operand: rank 0, a single coordinate which
/// is the value itself. Generic parameters go between brackets, each
/// followed by a comma:
///
/// ```ignore
/// impl_scalar_operand!(MyFixedPoint);
/// impl_scalar_operand!([T: Copy,] Wrapped<T>);
/// ```
#[macro_export]
macro_rules! impl_scalar_operand {
    ([$($g:tt)*] $ty:ty) => {
        impl<$($g)*> $crate::Classified for $ty {
            type Rank = $crate::rank::ScalarRank;
            type Diversity = $crate::rank::Homogeneous;
        }
        impl<$($g)*> $crate::Operand for $ty
        where
            $ty: ::core::marker::Copy,
        {
            type Coord = $ty;
            #[inline]
            fn at(&self, _: ()) -> $ty {
                *self
            }
        }
        impl<$($g)*> $crate::IntoOperand for $ty {
            type Operand = $ty;
            #[inline]
            fn into_operand(self) -> $ty {
                self
            }
        }
    };
    ($($ty:ty),*) => {
        $($crate::impl_scalar_operand!([] $ty);)*
    };
}

impl_scalar_operand!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Give a [`Classified`] type the arithmetic operators: `&a + x`, `&a - x`,
/// `&a * x`, `&a / x`, `&a ^ x`, `-&a`, and `s * &a` for the built-in scalar
/// types and [`Quantity`]. Generic parameters go between brackets, each
/// followed by a comma:
///
/// ```
/// use tensex::{construct, rank::{Homogeneous, VectorRank}, Classified, Operand, Vector};
///
/// /// A 2D offset stored as two named fields
/// #[derive(Clone, Copy)]
/// struct Offset { dx: f64, dy: f64 }
///
/// impl Classified for Offset {
///     type Rank = VectorRank<2>;
///     type Diversity = Homogeneous;
/// }
/// impl Operand for Offset {
///     type Coord = f64;
///     fn at(&self, i: usize) -> f64 {
///         if i == 0 { self.dx } else { self.dy }
///     }
/// }
/// tensex::impl_tensor_ops!([] Offset);
///
/// let o = Offset { dx: 1.0, dy: 2.0 };
/// let doubled: Vector<f64, 2> = construct(2.0 * &o + &o);
/// assert_eq!(doubled, Vector::new([3.0, 6.0]));
/// ```
#[macro_export]
macro_rules! impl_tensor_ops {
    (@binop [$($g:tt)*] $ty:ty: $tr:ident $method:ident $op:ident) => {
        impl<'a, $($g)* Rhs> ::core::ops::$tr<Rhs> for &'a $ty
        where
            $ty: $crate::Classified,
            Rhs: $crate::IntoOperand,
            $crate::Binary<$crate::dispatch::$op, &'a $ty, <Rhs as $crate::IntoOperand>::Operand>:
                $crate::Classified,
        {
            type Output = $crate::Expr<
                $crate::Binary<$crate::dispatch::$op, &'a $ty, <Rhs as $crate::IntoOperand>::Operand>,
            >;
            #[inline]
            fn $method(self, rhs: Rhs) -> Self::Output {
                $crate::Expr::binary(self, $crate::IntoOperand::into_operand(rhs))
            }
        }
    };
    (@smul [$($g:tt)*] $ty:ty: $s:ty) => {
        impl<'a, $($g)*> ::core::ops::Mul<&'a $ty> for $s
        where
            $ty: $crate::Classified,
            $crate::Binary<$crate::dispatch::MulOp, $s, &'a $ty>: $crate::Classified,
        {
            type Output = $crate::Expr<$crate::Binary<$crate::dispatch::MulOp, $s, &'a $ty>>;
            #[inline]
            fn mul(self, rhs: &'a $ty) -> Self::Output {
                $crate::Expr::binary(self, rhs)
            }
        }
    };
    (@qmul [$($g:tt)*] $ty:ty) => {
        impl<'a, $($g)* QV, QU> ::core::ops::Mul<&'a $ty> for $crate::Quantity<QV, QU>
        where
            $ty: $crate::Classified,
            $crate::Binary<$crate::dispatch::MulOp, $crate::Quantity<QV, QU>, &'a $ty>: $crate::Classified,
        {
            type Output = $crate::Expr<$crate::Binary<$crate::dispatch::MulOp, $crate::Quantity<QV, QU>, &'a $ty>>;
            #[inline]
            fn mul(self, rhs: &'a $ty) -> Self::Output {
                $crate::Expr::binary(self, rhs)
            }
        }
    };
    ([$($g:tt)*] $ty:ty) => {
        impl<'a, $($g)*> $crate::IntoOperand for &'a $ty
        where
            $ty: $crate::Classified,
        {
            type Operand = &'a $ty;
            #[inline]
            fn into_operand(self) -> Self::Operand {
                self
            }
        }
        impl<'a, $($g)*> ::core::ops::Neg for &'a $ty
        where
            $ty: $crate::Classified,
            $crate::Unary<$crate::dispatch::NegOp, &'a $ty>: $crate::Classified,
        {
            type Output = $crate::Expr<$crate::Unary<$crate::dispatch::NegOp, &'a $ty>>;
            #[inline]
            fn neg(self) -> Self::Output {
                $crate::Expr::unary(self)
            }
        }
        $crate::impl_tensor_ops!(@binop [$($g)*] $ty: Add add AddOp);
        $crate::impl_tensor_ops!(@binop [$($g)*] $ty: Sub sub SubOp);
        $crate::impl_tensor_ops!(@binop [$($g)*] $ty: Mul mul MulOp);
        $crate::impl_tensor_ops!(@binop [$($g)*] $ty: Div div DivOp);
        $crate::impl_tensor_ops!(@binop [$($g)*] $ty: BitXor bitxor CrossOp);
        $crate::impl_tensor_ops!(@smul [$($g)*] $ty: f32);
        $crate::impl_tensor_ops!(@smul [$($g)*] $ty: f64);
        $crate::impl_tensor_ops!(@smul [$($g)*] $ty: i32);
        $crate::impl_tensor_ops!(@smul [$($g)*] $ty: i64);
        $crate::impl_tensor_ops!(@qmul [$($g)*] $ty);
    };
}

// # STANDALONE OPERATIONS //

/// The type [`dot`] returns for operands `A` and `B`
pub type DotOf<A, B> =
    <Binary<MulOp, <A as IntoOperand>::Operand, <B as IntoOperand>::Operand> as Operand>::Coord;

/// The type [`exterior_product_area`] returns for operands `A` and `B`
pub type AreaOf<A, B> =
    <Binary<CrossOp, <A as IntoOperand>::Operand, <B as IntoOperand>::Operand> as Operand>::Coord;

/// Dot product of two vectors of the same dimension, evaluated right away.
/// Same as `(a * b).value()`
///
/// ```
/// use tensex::{dot, units::{meters, square_meters}, Vector};
///
/// let a = Vector::new([meters(10.0), meters(5.0)]);
/// let b = Vector::new([meters(5.0), meters(10.0)]);
/// assert_eq!(dot(&a, &b), square_meters(100.0));
/// ```
#[inline]
pub fn dot<A, B>(a: A, b: B) -> DotOf<A, B>
where
    A: IntoOperand,
    B: IntoOperand,
    <A::Operand as Classified>::Rank: VectorShape,
    Binary<MulOp, A::Operand, B::Operand>: Operand<Rank = ScalarRank>,
{
    Expr::<Binary<MulOp, _, _>>::binary(a.into_operand(), b.into_operand()).value()
}

/// Cross product of two 3D vectors, as a lazy expression. Same as `a ^ b`
#[inline]
pub fn cross<A, B>(a: A, b: B) -> Expr<Binary<CrossOp, A::Operand, B::Operand>>
where
    A: IntoOperand,
    B: IntoOperand,
    Binary<CrossOp, A::Operand, B::Operand>: Classified<Rank = VectorRank<3>>,
{
    Expr::binary(a.into_operand(), b.into_operand())
}

/// Signed area of the parallelogram spanned by two 2D vectors, positive when
/// `b` is counter-clockwise from `a`
///
/// ```
/// use tensex::{exterior_product_area, Vector};
///
/// let a = Vector::new([1.0, 0.0]);
/// let b = Vector::new([0.0, 2.0]);
/// assert_eq!(exterior_product_area(&a, &b), 2.0);
/// assert_eq!(exterior_product_area(&b, &a), -2.0);
/// ```
#[inline]
pub fn exterior_product_area<A, B>(a: A, b: B) -> AreaOf<A, B>
where
    A: IntoOperand,
    B: IntoOperand,
    Binary<CrossOp, A::Operand, B::Operand>: Operand<Rank = ScalarRank>,
{
    Expr::<Binary<CrossOp, _, _>>::binary(a.into_operand(), b.into_operand()).value()
}

/// Componentwise absolute value, as a lazy expression
#[inline]
pub fn abs<A>(a: A) -> Expr<Unary<AbsOp, A::Operand>>
where
    A: IntoOperand,
    Unary<AbsOp, A::Operand>: Classified,
{
    Expr::unary(a.into_operand())
}

/// A point seen as the vector from the origin to it
#[inline]
pub fn as_vector<A>(a: A) -> Expr<Unary<AsVectorOp, A::Operand>>
where
    A: IntoOperand,
    Unary<AsVectorOp, A::Operand>: Classified,
{
    Expr::unary(a.into_operand())
}

/// A vector seen as the point it reaches from the origin
#[inline]
pub fn as_point<A>(a: A) -> Expr<Unary<AsPointOp, A::Operand>>
where
    A: IntoOperand,
    Unary<AsPointOp, A::Operand>: Classified,
{
    Expr::unary(a.into_operand())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        construct, magnitude,
        numeric::{Plus, Times},
        test_macros::*,
        units::{meters, square_meters},
        Access, Matrix, Point, Vector,
    };
    use rstest::*;
    use std::cell::Cell;

    #[fixture]
    fn a() -> Vector<f64, 3> {
        Vector::new([1.0, 2.0, 3.0])
    }

    #[fixture]
    fn b() -> Vector<f64, 3> {
        Vector::new([-4.0, 0.5, 2.0])
    }

    #[fixture]
    fn c() -> Vector<f64, 3> {
        Vector::new([0.0, 7.0, -1.0])
    }

    #[rstest]
    fn componentwise_add_sub_neg(a: Vector<f64, 3>, b: Vector<f64, 3>) {
        let sum = &a + &b;
        let diff = &a - &b;
        let neg = -&a;
        for i in 0..3 {
            assert_eq!(sum.get_at(i), a.0[i] + b.0[i]);
            assert_eq!(diff.get_at(i), a.0[i] - b.0[i]);
            assert_eq!(neg.get_at(i), -a.0[i]);
        }
    }

    #[rstest]
    fn scalar_scaling(a: Vector<f64, 3>) {
        let left: Vector<f64, 3> = construct(2.0 * &a);
        let right: Vector<f64, 3> = construct(&a * 2.0);
        let divided: Vector<f64, 3> = construct(&a / 2.0);
        assert_eq!(left, Vector::new([2.0, 4.0, 6.0]));
        assert_eq!(left, right);
        assert_eq!(divided, Vector::new([0.5, 1.0, 1.5]));
    }

    #[rstest]
    fn dot_is_symmetric(a: Vector<f64, 3>, b: Vector<f64, 3>) {
        assert_eq!(dot(&a, &b), dot(&b, &a));
        assert_eq!(dot(&a, &b), (&a * &b).value());
    }

    #[rstest]
    fn dot_is_bilinear(a: Vector<f64, 3>, b: Vector<f64, 3>, c: Vector<f64, 3>) {
        assert_close!(dot(&a, &b + &c), dot(&a, &b) + dot(&a, &c));
        assert_close!(dot(3.0 * &a, &b), 3.0 * dot(&a, &b));
    }

    #[rstest]
    fn nested_expressions(a: Vector<f64, 3>, b: Vector<f64, 3>, c: Vector<f64, 3>) {
        let e: Vector<f64, 3> = construct((&a + &b) * 2.0 - -&c);
        for i in 0..3 {
            assert_eq!(e.0[i], (a.0[i] + b.0[i]) * 2.0 + c.0[i]);
        }
    }

    #[rstest]
    fn expressions_can_be_reused(a: Vector<f64, 3>, b: Vector<f64, 3>) {
        let d = &b - &a;
        assert_eq!(dot(&d, &d), dot(d, d));
        let twice: Vector<f64, 3> = construct(&d + &d);
        assert_eq!(twice, construct(2.0 * d));
    }

    #[rstest]
    fn borrowed_expressions_compose(a: Vector<f64, 3>, b: Vector<f64, 3>) {
        let d = &b - &a;
        let double: Vector<f64, 3> = construct(2.0 * &d);
        assert_eq!(double, Vector::new([-10.0, -3.0, -2.0]));
        assert_eq!(construct::<Vector<f64, 3>, _>(&d * 3.0 - &d), double);
        assert_eq!(construct::<Vector<f64, 3>, _>(&d / 0.5), double);
        assert_eq!(construct::<Vector<f64, 3>, _>(-&d + &d), Vector::zero());
        assert_close!(dot(&d ^ &a, &a), 0.0);
    }

    #[rstest]
    fn cross_product(a: Vector<f64, 3>, b: Vector<f64, 3>) {
        let x = Vector::new([1.0, 0.0, 0.0]);
        let y = Vector::new([0.0, 1.0, 0.0]);
        let z: Vector<f64, 3> = construct(cross(&x, &y));
        assert_eq!(z, Vector::new([0.0, 0.0, 1.0]));
        let n: Vector<f64, 3> = construct(&a ^ &b);
        assert_close!(dot(&n, &a), 0.0);
        assert_close!(dot(&n, &b), 0.0);
        let anti: Vector<f64, 3> = construct(&b ^ &a);
        assert_eq!(anti, construct(-&n));
    }

    #[test]
    fn absolute_value() {
        let v = Vector::new([-1.5, 2.0, -0.0]);
        let m = Matrix::new([[-1, 2], [3, -4]]);
        assert_eq!(construct::<Vector<f64, 3>, _>(abs(&v)), Vector::new([1.5, 2.0, 0.0]));
        assert_eq!(construct::<Matrix<i32, 2, 2>, _>(abs(&m)), Matrix::new([[1, 2], [3, 4]]));
        assert_eq!(abs(-3.0).value(), 3.0);
    }

    #[test]
    fn point_and_vector_views() {
        let p = Point::new([1.0, 2.0]);
        let v: Vector<f64, 2> = construct(as_vector(&p));
        assert_eq!(v, Vector::new([1.0, 2.0]));
        let q: Point<f64, 2> = construct(as_point(10.0 * as_vector(&p)));
        assert_eq!(q, Point::new([10.0, 20.0]));
    }

    #[test]
    fn matrix_products() {
        let m = Matrix::new([[1, 2, 3], [4, 5, 6]]);
        let n = Matrix::new([[1, 0], [0, 1], [1, 1]]);
        let mn: Matrix<i32, 2, 2> = construct(&m * &n);
        assert_eq!(mn, Matrix::new([[4, 5], [10, 11]]));
        let nm: Matrix<i32, 3, 3> = construct(&n * &m);
        assert_eq!(nm, Matrix::new([[1, 2, 3], [4, 5, 6], [5, 7, 9]]));
        let sum: Matrix<i32, 2, 3> = construct(&m + &m - &m * 3);
        assert_eq!(sum, construct(-&m));
    }

    #[test]
    fn matrix_times_vector_is_a_column_product() {
        let m = Matrix::new([[1, 2, 3], [4, 5, 6]]);
        let v = Vector::new([1, 0, -1]);
        let mv: Vector<i32, 2> = construct(&m * &v);
        assert_eq!(mv, Vector::new([-2, -2]));
    }

    #[test]
    fn vector_times_matrix_is_a_row_product() {
        // vector(3) * matrix(3, 4) gives vector(4)
        let v = Vector::new([1, 2, 3]);
        let m = Matrix::new([[1, 0, 0, 1], [0, 1, 0, 1], [0, 0, 1, 1]]);
        let vm: Vector<i32, 4> = construct(&v * &m);
        assert_eq!(vm, Vector::new([1, 2, 3, 6]));
        assert_eq!(crate::dimension::<Vector<i32, 4>>(), 4);
    }

    #[test]
    fn mixed_numeric_types_are_promoted() {
        let i = Vector::new([1, 2]);
        let f = Vector::new([0.5, 0.25]);
        let sum: Vector<f64, 2> = construct(&i + &f);
        assert_eq!(sum, Vector::new([1.5, 2.25]));
        assert_eq!(dot(&i, &f), 1.0);
    }

    #[test]
    fn length_vectors() {
        let v1 = Vector::new([meters(10.0), meters(5.0)]);
        let v2 = Vector::new([meters(5.0), meters(10.0)]);
        assert_eq!(dot(&v1, &v2), square_meters(100.0));
        assert_eq!(exterior_product_area(&v1, &v2), square_meters(75.0));
        assert_eq!((&v1 ^ &v2).value(), square_meters(75.0));
        assert_eq!(magnitude(&Vector::new([meters(3.0), meters(4.0)])), meters(5.0));
        let sum: Vector<_, 2> = construct(&v1 + &v2);
        assert_eq!(sum, Vector::new([meters(15.0), meters(15.0)]));
        let scaled: Vector<_, 2> = construct(meters(2.0) * &v1);
        assert_eq!(scaled, Vector::new([square_meters(20.0), square_meters(10.0)]));
        let d = &v1 - &v2;
        let scaled_difference: Vector<_, 2> = construct(meters(2.0) * &d);
        assert_eq!(scaled_difference, Vector::new([square_meters(10.0), square_meters(-10.0)]));
    }

    thread_local! {
        static MULS: Cell<usize> = const { Cell::new(0) };
        static ADDS: Cell<usize> = const { Cell::new(0) };
    }

    /// A scalar that counts the operations done on it
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Counted(f64);

    impl Plus for Counted {
        type Output = Counted;
        fn plus(self, rhs: Counted) -> Counted {
            ADDS.with(|n| n.set(n.get() + 1));
            Counted(self.0 + rhs.0)
        }
    }

    impl Times for Counted {
        type Output = Counted;
        fn times(self, rhs: Counted) -> Counted {
            MULS.with(|n| n.set(n.get() + 1));
            Counted(self.0 * rhs.0)
        }
    }

    crate::impl_scalar_operand!(Counted);

    fn reset_counts() {
        MULS.with(|n| n.set(0));
        ADDS.with(|n| n.set(0));
    }

    fn counts() -> (usize, usize) {
        (MULS.with(Cell::get), ADDS.with(Cell::get))
    }

    #[test]
    fn one_pass_per_component() {
        let a = Vector::new([Counted(1.0), Counted(2.0), Counted(3.0), Counted(4.0)]);
        let c = Vector::new([Counted(5.0), Counted(6.0), Counted(7.0), Counted(8.0)]);
        let s = Counted(2.0);

        reset_counts();
        let e = &a + &c * s;
        // building the expression computes nothing, and it only holds two
        // references and a scalar
        assert_eq!(counts(), (0, 0));
        assert_eq!(
            std::mem::size_of_val(&e),
            2 * std::mem::size_of::<&Vector<Counted, 4>>() + std::mem::size_of::<Counted>()
        );

        let r: Vector<Counted, 4> = construct(e);
        assert_eq!(counts(), (4, 4));
        assert_eq!(r, Vector::new([Counted(11.0), Counted(14.0), Counted(17.0), Counted(20.0)]));

        reset_counts();
        assert_eq!(e.get_at(2), Counted(17.0));
        assert_eq!(counts(), (1, 1));
    }

    #[test]
    fn dot_product_work() {
        let a = Vector::new([Counted(1.0), Counted(2.0), Counted(3.0)]);
        reset_counts();
        assert_eq!(dot(&a, &a), Counted(14.0));
        // D products, D - 1 additions
        assert_eq!(counts(), (3, 2));
    }
}
