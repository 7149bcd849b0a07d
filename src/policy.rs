//! Construction and assignment of concrete values from expressions
//!
//! The core knows nothing about storage. A target type opts in by
//! implementing [`ConstructFrom`] (build a fresh value) and/or [`AssignFrom`]
//! (overwrite an existing one in place) for the expressions it accepts.
//! Homogeneous targets usually loop over [`Operand::at`](crate::Operand::at);
//! diverse targets read each [`Slot`](crate::Slot) in turn.
//!
//! Either way, every component of the expression is evaluated exactly once,
//! in index order. Component evaluators cannot fail, so an assignment never
//! stops halfway. A target cannot appear among the leaves of an expression
//! being assigned to it, since the expression borrows its leaves:
//!
//! ```compile_fail
//! use tensex::{assign, Vector};
//!
//! let mut a = Vector::new([1.0, 2.0]);
//! let b = Vector::new([3.0, 4.0]);
//! assign(&mut a, &a + &b);
//! ```

use crate::expr::{Expr, IntoOperand};

/// Build a `Self` by evaluating `E`
pub trait ConstructFrom<E>: Sized {
    fn construct_from(e: &E) -> Self;
}

/// Overwrite `self` with the evaluation of `E`, without building a
/// temporary
pub trait AssignFrom<E> {
    fn assign_from(&mut self, e: &E);
}

/// Evaluate `x` into a new `T`:
///
/// ```
/// use tensex::{construct, Vector};
///
/// let a = Vector::new([1, 2]);
/// let b = Vector::new([10, 20]);
/// let c: Vector<i32, 2> = construct(&a + &b);
/// assert_eq!(c, Vector::new([11, 22]));
/// ```
#[inline]
pub fn construct<T, X>(x: X) -> T
where
    X: IntoOperand,
    T: ConstructFrom<X::Operand>,
{
    T::construct_from(&x.into_operand())
}

/// Evaluate `x` into an existing `target`:
///
/// ```
/// use tensex::{assign, Vector};
///
/// let a = Vector::new([1, 2]);
/// let mut c = Vector::new([0, 0]);
/// assign(&mut c, 3 * &a);
/// assert_eq!(c, Vector::new([3, 6]));
/// ```
#[inline]
pub fn assign<T, X>(target: &mut T, x: X)
where
    T: AssignFrom<X::Operand> + ?Sized,
    X: IntoOperand,
{
    target.assign_from(&x.into_operand())
}

impl<E> Expr<E> {
    /// Evaluate into a new `T`. Same as [`construct`], with the target type
    /// given as a type parameter
    #[inline]
    pub fn construct<T: ConstructFrom<E>>(&self) -> T {
        T::construct_from(self.as_inner())
    }

    /// Evaluate into `target`. Same as [`assign`]
    #[inline]
    pub fn assign_to<T: AssignFrom<E> + ?Sized>(&self, target: &mut T) {
        target.assign_from(self.as_inner())
    }
}
