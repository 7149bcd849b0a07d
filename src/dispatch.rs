//! The operator dispatch table
//!
//! Each supported `(operator, left rank, right rank)` combination is one impl
//! of [`RankRule`] on the tuple of the two rank markers, giving the rank of
//! the result. Alongside it, [`Rule`] gives the evaluator for one component
//! of the result when both operands are homogeneous, and [`SlotRule`] gives
//! it per slot for diverse operands. Unary operators follow the same scheme
//! with [`UnaryRankRule`], [`UnaryRule`] and [`UnarySlotRule`] implemented on
//! the operand's rank marker.
//!
//! The table is closed: a combination without an impl (point + point,
//! vectors of different dimensions, a 3-column matrix times a 2-vector...)
//! simply does not compile. Impls never overlap, since each one is keyed on a
//! distinct pair of rank markers.
//!
//! Evaluators are pure and are called once per output component. Sums (dot
//! products, matrix products) are accumulated in index order starting from
//! the first term, so they need no additive identity and no summation over
//! zero terms ever happens.
//!
//! Implementation notes: rules are written against [`Operand`] and [`Slot`],
//! never against concrete storage, and coordinate arithmetic goes through the
//! promotion traits of [`numeric`](crate::numeric), so that `Coord` is
//! whatever the operands' coordinate types combine into (eg. an area for two
//! lengths).

use crate::{access::*, numeric::*, rank::*};
use std::ops::Neg;

// # OPERATOR TAGS //

macro_rules! op_tags {
    ($($(#[$meta:meta])* $name:ident),*) => {
        $(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;
        )*
    };
}

op_tags! {
    /// `+`
    AddOp,
    /// binary `-`
    SubOp,
    /// `*`: scaling, matrix products, or the dot product of two vectors
    MulOp,
    /// `/` by a scalar
    DivOp,
    /// `^`: the cross product in 3D, the exterior product (signed area) in 2D
    CrossOp,
    /// unary `-`
    NegOp,
    /// componentwise absolute value
    AbsOp,
    /// reads a point as the vector from the origin to it
    AsVectorOp,
    /// reads a vector as the point it reaches from the origin
    AsPointOp
}

// # TYPES & TRAITS //

/// The rank of `Op` applied to a `(left rank, right rank)` pair
pub trait RankRule<Op> {
    type Output: Rank;
}

/// How to compute one component of `Op(l, r)`, for homogeneous operands
pub trait Rule<Op, L, R>: RankRule<Op> {
    type Coord;
    fn eval(l: &L, r: &R, idx: <Self::Output as Rank>::Index) -> Self::Coord;
}

/// How to compute slot `I` of `Op(l, r)`, where each slot may have its own
/// type
pub trait SlotRule<Op, L, R, const I: usize>: RankRule<Op> {
    type Value;
    fn eval(l: &L, r: &R) -> Self::Value;
}

/// The rank of `Op` applied to an operand of rank `Self`
pub trait UnaryRankRule<Op>: Rank {
    type Output: Rank;
}

pub trait UnaryRule<Op, E>: UnaryRankRule<Op> {
    type Coord;
    fn eval(e: &E, idx: <Self::Output as Rank>::Index) -> Self::Coord;
}

pub trait UnarySlotRule<Op, E, const I: usize>: UnaryRankRule<Op> {
    type Value;
    fn eval(e: &E) -> Self::Value;
}

/// `term(0) + term(1) + ... + term(n-1)`, left to right. `n` must be
/// non-zero, which callers assert at compile time
#[inline(always)]
fn sum_of<P: Plus<Output = P>>(n: usize, mut term: impl FnMut(usize) -> P) -> P {
    let mut acc = term(0);
    for k in 1..n {
        acc = acc.plus(term(k));
    }
    acc
}

// # COMPONENTWISE RULES //

/// Same index on both sides, same index in the result
macro_rules! componentwise {
    ($($op:ident $tr:ident $method:ident: [$($g:tt)*] $l:ty, $r:ty => $out:ty;)*) => {
        $(
        impl<$($g)*> RankRule<$op> for ($l, $r) {
            type Output = $out;
        }

        impl<$($g)* Lhs, Rhs> Rule<$op, Lhs, Rhs> for ($l, $r)
        where
            Lhs: Operand<Rank = $l>,
            Rhs: Operand<Rank = $r>,
            Lhs::Coord: $tr<Rhs::Coord>,
        {
            type Coord = <Lhs::Coord as $tr<Rhs::Coord>>::Output;
            #[inline]
            fn eval(l: &Lhs, r: &Rhs, idx: <$out as Rank>::Index) -> Self::Coord {
                $tr::$method(l.at(idx), r.at(idx))
            }
        }
        )*
    };
}

componentwise! {
    AddOp Plus plus: [] ScalarRank, ScalarRank => ScalarRank;
    SubOp Minus minus: [] ScalarRank, ScalarRank => ScalarRank;
    MulOp Times times: [] ScalarRank, ScalarRank => ScalarRank;
    DivOp Over over: [] ScalarRank, ScalarRank => ScalarRank;

    AddOp Plus plus: [const D: usize,] VectorRank<D>, VectorRank<D> => VectorRank<D>;
    SubOp Minus minus: [const D: usize,] VectorRank<D>, VectorRank<D> => VectorRank<D>;
    AddOp Plus plus: [const D: usize,] PointRank<D>, VectorRank<D> => PointRank<D>;
    SubOp Minus minus: [const D: usize,] PointRank<D>, VectorRank<D> => PointRank<D>;
    SubOp Minus minus: [const D: usize,] PointRank<D>, PointRank<D> => VectorRank<D>;

    AddOp Plus plus: [const R: usize, const C: usize,] MatrixRank<R, C>, MatrixRank<R, C> => MatrixRank<R, C>;
    SubOp Minus minus: [const R: usize, const C: usize,] MatrixRank<R, C>, MatrixRank<R, C> => MatrixRank<R, C>;
}

/// Per-slot counterpart of [`componentwise!`], for vectors and points
macro_rules! componentwise_slots {
    ($($op:ident $tr:ident $method:ident: $l:ident, $r:ident;)*) => {
        $(
        impl<const D: usize, const I: usize, Lhs, Rhs> SlotRule<$op, Lhs, Rhs, I> for ($l<D>, $r<D>)
        where
            Lhs: Slot<I> + Classified<Rank = $l<D>>,
            Rhs: Slot<I> + Classified<Rank = $r<D>>,
            <Lhs as Slot<I>>::Output: $tr<<Rhs as Slot<I>>::Output>,
        {
            type Value = <<Lhs as Slot<I>>::Output as $tr<<Rhs as Slot<I>>::Output>>::Output;
            #[inline]
            fn eval(l: &Lhs, r: &Rhs) -> Self::Value {
                $tr::$method(l.slot(), r.slot())
            }
        }
        )*
    };
}

componentwise_slots! {
    AddOp Plus plus: VectorRank, VectorRank;
    SubOp Minus minus: VectorRank, VectorRank;
    AddOp Plus plus: PointRank, VectorRank;
    SubOp Minus minus: PointRank, VectorRank;
    SubOp Minus minus: PointRank, PointRank;
}

// # SCALING RULES //

/// A scalar on one side, broadcast to every component of the other side
macro_rules! scaling {
    ($($op:ident $tr:ident $method:ident: [$($g:tt)*] $side:ident $rk:ty;)*) => {
        $(scaling!(@$side $op $tr $method [$($g)*] $rk);)*
    };
    (@left $op:ident $tr:ident $method:ident [$($g:tt)*] $rk:ty) => {
        impl<$($g)*> RankRule<$op> for (ScalarRank, $rk) {
            type Output = $rk;
        }
        impl<$($g)* Lhs, Rhs> Rule<$op, Lhs, Rhs> for (ScalarRank, $rk)
        where
            Lhs: Operand<Rank = ScalarRank>,
            Rhs: Operand<Rank = $rk>,
            Lhs::Coord: $tr<Rhs::Coord>,
        {
            type Coord = <Lhs::Coord as $tr<Rhs::Coord>>::Output;
            #[inline]
            fn eval(l: &Lhs, r: &Rhs, idx: <$rk as Rank>::Index) -> Self::Coord {
                $tr::$method(l.at(()), r.at(idx))
            }
        }
    };
    (@right $op:ident $tr:ident $method:ident [$($g:tt)*] $rk:ty) => {
        impl<$($g)*> RankRule<$op> for ($rk, ScalarRank) {
            type Output = $rk;
        }
        impl<$($g)* Lhs, Rhs> Rule<$op, Lhs, Rhs> for ($rk, ScalarRank)
        where
            Lhs: Operand<Rank = $rk>,
            Rhs: Operand<Rank = ScalarRank>,
            Lhs::Coord: $tr<Rhs::Coord>,
        {
            type Coord = <Lhs::Coord as $tr<Rhs::Coord>>::Output;
            #[inline]
            fn eval(l: &Lhs, r: &Rhs, idx: <$rk as Rank>::Index) -> Self::Coord {
                $tr::$method(l.at(idx), r.at(()))
            }
        }
    };
}

scaling! {
    MulOp Times times: [const D: usize,] left VectorRank<D>;
    MulOp Times times: [const D: usize,] right VectorRank<D>;
    DivOp Over over: [const D: usize,] right VectorRank<D>;
    MulOp Times times: [const R: usize, const C: usize,] left MatrixRank<R, C>;
    MulOp Times times: [const R: usize, const C: usize,] right MatrixRank<R, C>;
    DivOp Over over: [const R: usize, const C: usize,] right MatrixRank<R, C>;
}

impl<const D: usize, const I: usize, Lhs, Rhs> SlotRule<MulOp, Lhs, Rhs, I> for (ScalarRank, VectorRank<D>)
where
    Lhs: Operand<Rank = ScalarRank>,
    Rhs: Slot<I> + Classified<Rank = VectorRank<D>>,
    Lhs::Coord: Times<<Rhs as Slot<I>>::Output>,
{
    type Value = Product<Lhs::Coord, <Rhs as Slot<I>>::Output>;
    #[inline]
    fn eval(l: &Lhs, r: &Rhs) -> Self::Value {
        l.at(()).times(r.slot())
    }
}

macro_rules! scaling_slots_right {
    ($($op:ident $tr:ident $method:ident),*) => {
        $(
        impl<const D: usize, const I: usize, Lhs, Rhs> SlotRule<$op, Lhs, Rhs, I> for (VectorRank<D>, ScalarRank)
        where
            Lhs: Slot<I> + Classified<Rank = VectorRank<D>>,
            Rhs: Operand<Rank = ScalarRank>,
            <Lhs as Slot<I>>::Output: $tr<Rhs::Coord>,
        {
            type Value = <<Lhs as Slot<I>>::Output as $tr<Rhs::Coord>>::Output;
            #[inline]
            fn eval(l: &Lhs, r: &Rhs) -> Self::Value {
                $tr::$method(l.slot(), r.at(()))
            }
        }
        )*
    };
}
scaling_slots_right!(MulOp Times times, DivOp Over over);

// # CONTRACTIONS //

/// Dot product: `v(D) * v(D) -> scalar`
impl<const D: usize> RankRule<MulOp> for (VectorRank<D>, VectorRank<D>) {
    type Output = ScalarRank;
}
impl<const D: usize, Lhs, Rhs> Rule<MulOp, Lhs, Rhs> for (VectorRank<D>, VectorRank<D>)
where
    Lhs: Operand<Rank = VectorRank<D>>,
    Rhs: Operand<Rank = VectorRank<D>>,
    Lhs::Coord: Times<Rhs::Coord>,
    Product<Lhs::Coord, Rhs::Coord>: Plus<Output = Product<Lhs::Coord, Rhs::Coord>>,
{
    type Coord = Product<Lhs::Coord, Rhs::Coord>;
    #[inline]
    fn eval(l: &Lhs, r: &Rhs, _: ()) -> Self::Coord {
        const { assert!(D > 0, "dot product of empty vectors") };
        sum_of(D, |k| l.at(k).times(r.at(k)))
    }
}

/// `m(R, C) * v(C)`, where the vector is a column on the right of the
/// matrix. Rows of `m` are dotted with `v`. The right-hand side may also be
/// a point, in which case so is the result (an affine map without
/// translation)
macro_rules! matrix_times_column {
    ($($rhs:ident => $out:ident),*) => {
        $(
        impl<const R: usize, const C: usize> RankRule<MulOp> for (MatrixRank<R, C>, $rhs<C>) {
            type Output = $out<R>;
        }
        impl<const R: usize, const C: usize, Lhs, Rhs> Rule<MulOp, Lhs, Rhs> for (MatrixRank<R, C>, $rhs<C>)
        where
            Lhs: Operand<Rank = MatrixRank<R, C>>,
            Rhs: Operand<Rank = $rhs<C>>,
            Lhs::Coord: Times<Rhs::Coord>,
            Product<Lhs::Coord, Rhs::Coord>: Plus<Output = Product<Lhs::Coord, Rhs::Coord>>,
        {
            type Coord = Product<Lhs::Coord, Rhs::Coord>;
            #[inline]
            fn eval(m: &Lhs, v: &Rhs, i: usize) -> Self::Coord {
                const { assert!(C > 0, "product with an empty vector") };
                sum_of(C, |k| m.at((i, k)).times(v.at(k)))
            }
        }
        )*
    };
}
matrix_times_column!(VectorRank => VectorRank, PointRank => PointRank);

/// `v(R) * m(R, C) -> v(C)`. The vector on the left is a row (a 1xR
/// matrix), so component `j` of the result is `v` dotted with column `j` of
/// `m`. This is not `m * v` with `m` transposed implicitly: with a non
/// symmetric `m` both products differ
impl<const R: usize, const C: usize> RankRule<MulOp> for (VectorRank<R>, MatrixRank<R, C>) {
    type Output = VectorRank<C>;
}
impl<const R: usize, const C: usize, Lhs, Rhs> Rule<MulOp, Lhs, Rhs> for (VectorRank<R>, MatrixRank<R, C>)
where
    Lhs: Operand<Rank = VectorRank<R>>,
    Rhs: Operand<Rank = MatrixRank<R, C>>,
    Lhs::Coord: Times<Rhs::Coord>,
    Product<Lhs::Coord, Rhs::Coord>: Plus<Output = Product<Lhs::Coord, Rhs::Coord>>,
{
    type Coord = Product<Lhs::Coord, Rhs::Coord>;
    #[inline]
    fn eval(v: &Lhs, m: &Rhs, j: usize) -> Self::Coord {
        const { assert!(R > 0, "product with an empty vector") };
        sum_of(R, |k| v.at(k).times(m.at((k, j))))
    }
}

/// `a(R, K) * b(K, C) -> m(R, C)`, row of `a` dotted with column of `b`
impl<const R: usize, const K: usize, const C: usize> RankRule<MulOp> for (MatrixRank<R, K>, MatrixRank<K, C>) {
    type Output = MatrixRank<R, C>;
}
impl<const R: usize, const K: usize, const C: usize, Lhs, Rhs> Rule<MulOp, Lhs, Rhs>
    for (MatrixRank<R, K>, MatrixRank<K, C>)
where
    Lhs: Operand<Rank = MatrixRank<R, K>>,
    Rhs: Operand<Rank = MatrixRank<K, C>>,
    Lhs::Coord: Times<Rhs::Coord>,
    Product<Lhs::Coord, Rhs::Coord>: Plus<Output = Product<Lhs::Coord, Rhs::Coord>>,
{
    type Coord = Product<Lhs::Coord, Rhs::Coord>;
    #[inline]
    fn eval(a: &Lhs, b: &Rhs, (i, j): (usize, usize)) -> Self::Coord {
        const { assert!(K > 0, "product over an empty inner dimension") };
        sum_of(K, |k| a.at((i, k)).times(b.at((k, j))))
    }
}

// # CROSS PRODUCTS //

impl RankRule<CrossOp> for (VectorRank<3>, VectorRank<3>) {
    type Output = VectorRank<3>;
}
impl<Lhs, Rhs> Rule<CrossOp, Lhs, Rhs> for (VectorRank<3>, VectorRank<3>)
where
    Lhs: Operand<Rank = VectorRank<3>>,
    Rhs: Operand<Rank = VectorRank<3>>,
    Lhs::Coord: Times<Rhs::Coord>,
    Product<Lhs::Coord, Rhs::Coord>: Minus,
{
    type Coord = <Product<Lhs::Coord, Rhs::Coord> as Minus>::Output;
    #[inline]
    fn eval(l: &Lhs, r: &Rhs, i: usize) -> Self::Coord {
        let (j, k) = ((i + 1) % 3, (i + 2) % 3);
        l.at(j).times(r.at(k)).minus(l.at(k).times(r.at(j)))
    }
}

/// In the plane, the only non-zero component of the cross product: the
/// signed area of the parallelogram spanned by both vectors
impl RankRule<CrossOp> for (VectorRank<2>, VectorRank<2>) {
    type Output = ScalarRank;
}
impl<Lhs, Rhs> Rule<CrossOp, Lhs, Rhs> for (VectorRank<2>, VectorRank<2>)
where
    Lhs: Operand<Rank = VectorRank<2>>,
    Rhs: Operand<Rank = VectorRank<2>>,
    Lhs::Coord: Times<Rhs::Coord>,
    Product<Lhs::Coord, Rhs::Coord>: Minus,
{
    type Coord = <Product<Lhs::Coord, Rhs::Coord> as Minus>::Output;
    #[inline]
    fn eval(l: &Lhs, r: &Rhs, _: ()) -> Self::Coord {
        l.at(0).times(r.at(1)).minus(l.at(1).times(r.at(0)))
    }
}

// # UNARY RULES //

/// `f(component)` for every component, keeping the rank
macro_rules! unary_mapped {
    ($op:ident $tr:ident $method:ident: $([$($g:tt)*] $rk:ty),*) => {
        $(
        impl<$($g)*> UnaryRankRule<$op> for $rk {
            type Output = $rk;
        }
        impl<$($g)* E> UnaryRule<$op, E> for $rk
        where
            E: Operand<Rank = $rk>,
            E::Coord: $tr,
        {
            type Coord = <E::Coord as $tr>::Output;
            #[inline]
            fn eval(e: &E, idx: <$rk as Rank>::Index) -> Self::Coord {
                $tr::$method(e.at(idx))
            }
        }
        )*
        impl<const D: usize, const I: usize, E> UnarySlotRule<$op, E, I> for VectorRank<D>
        where
            E: Slot<I> + Classified<Rank = VectorRank<D>>,
            <E as Slot<I>>::Output: $tr,
        {
            type Value = <<E as Slot<I>>::Output as $tr>::Output;
            #[inline]
            fn eval(e: &E) -> Self::Value {
                $tr::$method(e.slot())
            }
        }
    };
}

unary_mapped!(NegOp Neg neg:
    [] ScalarRank, [const D: usize,] VectorRank<D>, [const R: usize, const C: usize,] MatrixRank<R, C>);
unary_mapped!(AbsOp Abs abs:
    [] ScalarRank, [const D: usize,] VectorRank<D>, [const R: usize, const C: usize,] MatrixRank<R, C>);

/// Same components, other flavour of rank 1
macro_rules! reinterpret {
    ($($op:ident: $from:ident => $to:ident),*) => {
        $(
        impl<const D: usize> UnaryRankRule<$op> for $from<D> {
            type Output = $to<D>;
        }
        impl<const D: usize, E> UnaryRule<$op, E> for $from<D>
        where
            E: Operand<Rank = $from<D>>,
        {
            type Coord = E::Coord;
            #[inline]
            fn eval(e: &E, i: usize) -> Self::Coord {
                e.at(i)
            }
        }
        impl<const D: usize, const I: usize, E> UnarySlotRule<$op, E, I> for $from<D>
        where
            E: Slot<I> + Classified<Rank = $from<D>>,
        {
            type Value = <E as Slot<I>>::Output;
            #[inline]
            fn eval(e: &E) -> Self::Value {
                e.slot()
            }
        }
        )*
    };
}
reinterpret!(AsVectorOp: PointRank => VectorRank, AsPointOp: VectorRank => PointRank);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Matrix, Point, Vector};

    /// The result rank of `Op` on two operand types
    fn result_rank<Op, L: Classified, R: Classified>() -> (usize, bool, usize)
    where
        (L::Rank, R::Rank): RankRule<Op>,
    {
        type Out<Op, L, R> = <(<L as Classified>::Rank, <R as Classified>::Rank) as RankRule<Op>>::Output;
        (
            <Out<Op, L, R> as Rank>::ORDER,
            <Out<Op, L, R> as Rank>::IS_POINT,
            <Out<Op, L, R> as Rank>::LEN,
        )
    }

    type V2 = Vector<f64, 2>;
    type V3 = Vector<f64, 3>;
    type P3 = Point<f64, 3>;
    type M34 = Matrix<f64, 3, 4>;
    type M43 = Matrix<f64, 4, 3>;

    #[test]
    fn rank_table() {
        // (order, is point, component count)
        assert_eq!(result_rank::<AddOp, V3, V3>(), (1, false, 3));
        assert_eq!(result_rank::<AddOp, P3, V3>(), (1, true, 3));
        assert_eq!(result_rank::<SubOp, P3, P3>(), (1, false, 3));
        assert_eq!(result_rank::<SubOp, P3, V3>(), (1, true, 3));
        assert_eq!(result_rank::<MulOp, V3, V3>(), (0, false, 1));
        assert_eq!(result_rank::<MulOp, f64, V3>(), (1, false, 3));
        assert_eq!(result_rank::<DivOp, V3, f64>(), (1, false, 3));
        assert_eq!(result_rank::<MulOp, M43, V3>(), (1, false, 4));
        assert_eq!(result_rank::<MulOp, M43, P3>(), (1, true, 4));
        assert_eq!(result_rank::<MulOp, V3, M34>(), (1, false, 4));
        assert_eq!(result_rank::<MulOp, M34, M43>(), (2, false, 9));
        assert_eq!(result_rank::<MulOp, M43, M34>(), (2, false, 16));
        assert_eq!(result_rank::<CrossOp, V3, V3>(), (1, false, 3));
        assert_eq!(result_rank::<CrossOp, V2, V2>(), (0, false, 1));
        assert_eq!(result_rank::<AddOp, M34, M34>(), (2, false, 12));
    }

    #[test]
    fn sum_is_left_to_right() {
        let mut order = Vec::new();
        let total = sum_of(4, |k| {
            order.push(k);
            k as i32
        });
        assert_eq!(total, 6);
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn row_vector_and_column_vector_products_differ() {
        let v = Vector::new([1.0, 2.0]);
        let m = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
        let row = <(VectorRank<2>, MatrixRank<2, 2>) as Rule<MulOp, _, _>>::eval(&&v, &&m, 0);
        let col = <(MatrixRank<2, 2>, VectorRank<2>) as Rule<MulOp, _, _>>::eval(&&m, &&v, 0);
        // [1 2] . column 0 = 1*1 + 2*3, row 0 . [1 2] = 1*1 + 2*2
        assert_eq!(row, 7.0);
        assert_eq!(col, 5.0);
    }
}
