//! The component accessor protocol: how the core reads and writes the slots
//! of a [`Classified`] type, with either a compile-time or a runtime index
//!
//! There are two read paths:
//!
//! - [`Operand::at`] takes a runtime index and returns one coordinate type
//!   for all slots. This is the path every homogeneous type and every
//!   expression over homogeneous types provides, and the one construction
//!   loops over.
//! - [`Slot<I>`] is indexed at compile time and may return a different type
//!   per slot. Diverse types (eg. a pose made of two lengths and an angle)
//!   only provide this one.

use crate::rank::*;
use std::ops::{Index, IndexMut};

/// Runtime bounds check on the accessor path. Active in debug builds, and
/// in all builds with the `checked-access` feature
macro_rules! precondition {
    ($cond:expr, $($arg:tt)+) => {
        #[cfg(feature = "checked-access")]
        assert!($cond, $($arg)+);
        #[cfg(not(feature = "checked-access"))]
        debug_assert!($cond, $($arg)+);
    };
}

// # TYPES & TRAITS //

/// A type whose components can all be read as one `Coord` type, given a
/// runtime index
pub trait Operand: Classified {
    type Coord;
    /// Read the component at `idx`. Implementations may assume `idx` is in
    /// bounds: checked access goes through [`Access::get_at`]
    fn at(&self, idx: <Self::Rank as Rank>::Index) -> Self::Coord;
}

/// A homogeneous type whose components can be overwritten in place
pub trait OperandMut: Operand {
    fn set(&mut self, idx: <Self::Rank as Rank>::Index, value: Self::Coord);
}

/// Compile-time access to slot `I`, whose type may differ from one slot to
/// the next
pub trait Slot<const I: usize>: Classified {
    type Output;
    fn slot(&self) -> Self::Output;
}

impl<T: Operand + ?Sized> Operand for &T {
    type Coord = T::Coord;
    #[inline]
    fn at(&self, idx: <Self::Rank as Rank>::Index) -> Self::Coord {
        (**self).at(idx)
    }
}

impl<T: Slot<I> + ?Sized, const I: usize> Slot<I> for &T {
    type Output = T::Output;
    #[inline]
    fn slot(&self) -> Self::Output {
        (**self).slot()
    }
}

/// Index-checked accessors, available on every [`Classified`] type
///
/// ```
/// use tensex::{Access, Matrix, Vector};
///
/// let v = Vector::new([1.0, 2.0, 3.0]);
/// assert_eq!(v.get::<2>(), 3.0);
/// assert_eq!(v.get_at(1), 2.0);
///
/// let m = Matrix::new([[1, 2], [3, 4]]);
/// assert_eq!(m.entry::<1, 0>(), 3);
/// assert_eq!(m.get_at((0, 1)), 2);
/// ```
///
/// A compile-time index past the end does not build:
///
/// ```compile_fail
/// use tensex::{Access, Vector};
///
/// let v = Vector::new([1.0, 2.0, 3.0]);
/// v.get::<3>();
/// ```
///
/// ```compile_fail
/// use tensex::{Access, Matrix};
///
/// let m = Matrix::new([[1, 2], [3, 4]]);
/// m.entry::<0, 2>();
/// ```
pub trait Access: Classified {
    /// Slot `I`, resolved at compile time
    #[inline]
    fn get<const I: usize>(&self) -> <Self as Slot<I>>::Output
    where
        Self: Slot<I>,
    {
        self.slot()
    }

    /// Matrix entry at row `R`, column `C`, resolved at compile time
    #[inline]
    fn entry<const R: usize, const C: usize>(&self) -> <Self as Operand>::Coord
    where
        Self: Operand,
        Self::Rank: MatrixShape,
    {
        const {
            assert!(
                R < <Self::Rank as MatrixShape>::ROWS && C < <Self::Rank as MatrixShape>::COLS,
                "matrix entry out of range"
            )
        };
        self.at((R, C))
    }

    /// Component at a runtime index. Panics on an out-of-range index in
    /// debug builds, or always with the `checked-access` feature
    #[inline]
    fn get_at(&self, idx: <Self::Rank as Rank>::Index) -> <Self as Operand>::Coord
    where
        Self: Operand,
    {
        precondition!(
            <Self::Rank as Rank>::in_bounds(idx),
            "index {:?} out of range for {}",
            idx,
            std::any::type_name::<Self>()
        );
        self.at(idx)
    }

    /// Overwrite the component at a runtime index, with the same bounds
    /// checking as [`Access::get_at`]
    #[inline]
    fn set_at(&mut self, idx: <Self::Rank as Rank>::Index, value: <Self as Operand>::Coord)
    where
        Self: OperandMut,
    {
        precondition!(
            <Self::Rank as Rank>::in_bounds(idx),
            "index {:?} out of range for {}",
            idx,
            std::any::type_name::<Self>()
        );
        self.set(idx, value)
    }
}

impl<T: Classified + ?Sized> Access for T {}

/// Free-function form of [`Access::get_at`]
#[inline]
pub fn get_at<T: Operand + ?Sized>(t: &T, idx: <T::Rank as Rank>::Index) -> T::Coord {
    t.get_at(idx)
}

/// Free-function form of [`Access::set_at`]
#[inline]
pub fn set_at<T: OperandMut + ?Sized>(t: &mut T, idx: <T::Rank as Rank>::Index, value: T::Coord) {
    t.set_at(idx, value)
}

// # ADAPTERS //

/// Makes any type that can be indexed with `[]` (a `Vec`, a slice, a third
/// party array type...) usable as a vector of dimension `D`, without touching
/// the wrapped type. Only the first `D` elements are visible: reading or
/// writing past them panics, in every build profile, even when the wrapped
/// value is longer
#[derive(Debug, Clone, PartialEq)]
pub struct Indexed<T, const D: usize>(pub T);

impl<T, const D: usize> Classified for Indexed<T, D> {
    type Rank = VectorRank<D>;
    type Diversity = Homogeneous;
}

impl<T, const D: usize> Operand for Indexed<T, D>
where
    T: Index<usize>,
    T::Output: Copy + Sized,
{
    type Coord = T::Output;
    #[inline]
    fn at(&self, i: usize) -> Self::Coord {
        assert!(i < D, "index {i} out of range for dimension {D}");
        self.0[i]
    }
}

impl<T, const D: usize> OperandMut for Indexed<T, D>
where
    T: IndexMut<usize>,
    T::Output: Copy + Sized,
{
    #[inline]
    fn set(&mut self, i: usize, value: Self::Coord) {
        assert!(i < D, "index {i} out of range for dimension {D}");
        self.0[i] = value;
    }
}

impl<T, const D: usize, const I: usize> Slot<I> for Indexed<T, D>
where
    T: Index<usize>,
    T::Output: Copy + Sized,
{
    type Output = T::Output;
    #[inline]
    fn slot(&self) -> Self::Output {
        const { assert!(I < D, "slot index out of range") };
        self.0[I]
    }
}

crate::impl_tensor_ops!([T, const D: usize,] Indexed<T, D>);
