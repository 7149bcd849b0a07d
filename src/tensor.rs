//! Fixed-size storage: [`Vector`], [`Point`] and [`Matrix`], backed by
//! const-generic arrays
//!
//! These types plug into the core only through the public protocol
//! ([`Classified`], [`Operand`], [`Slot`], [`ConstructFrom`], [`AssignFrom`]
//! and [`impl_tensor_ops!`](crate::impl_tensor_ops)), the same way a
//! downstream type would.

use crate::{
    access::*,
    numeric::{One, Zero},
    policy::*,
    rank::*,
};
use array_init::array_init;

// # TYPES //

/// A free vector (a displacement)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector<T, const D: usize>(pub [T; D]);

/// A position. Subtracting two points gives a [`Vector`], adding a vector to
/// a point gives a point, and points cannot be added together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point<T, const D: usize>(pub [T; D]);

/// A row-major `R`x`C` matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix<T, const R: usize, const C: usize>(pub [[T; C]; R]);

macro_rules! rank1_storage {
    ($($name:ident $rank:ident),*) => {
        $(
        impl<T, const D: usize> $name<T, D> {
            #[inline]
            pub const fn new(coords: [T; D]) -> Self {
                Self(coords)
            }

            /// Build from a function of the index
            #[inline]
            pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
                Self(array_init(f))
            }

            #[inline]
            pub fn coords(&self) -> &[T; D] {
                &self.0
            }
        }

        impl<T: Zero, const D: usize> $name<T, D> {
            /// All coordinates zero. For a point, the origin
            pub fn zero() -> Self {
                Self(array_init(|_| T::zero()))
            }
        }

        impl<T, const D: usize> From<[T; D]> for $name<T, D> {
            fn from(coords: [T; D]) -> Self {
                Self(coords)
            }
        }

        impl<T, const D: usize> Classified for $name<T, D> {
            type Rank = $rank<D>;
            type Diversity = Homogeneous;
        }

        impl<T: Copy, const D: usize> Operand for $name<T, D> {
            type Coord = T;
            #[inline]
            fn at(&self, i: usize) -> T {
                self.0[i]
            }
        }

        impl<T: Copy, const D: usize> OperandMut for $name<T, D> {
            #[inline]
            fn set(&mut self, i: usize, value: T) {
                self.0[i] = value;
            }
        }

        impl<T: Copy, const D: usize, const I: usize> Slot<I> for $name<T, D> {
            type Output = T;
            #[inline]
            fn slot(&self) -> T {
                const { assert!(I < D, "slot index out of range") };
                self.0[I]
            }
        }

        impl<T, const D: usize, E> ConstructFrom<E> for $name<T, D>
        where
            E: Operand<Rank = $rank<D>, Coord = T>,
        {
            #[inline]
            fn construct_from(e: &E) -> Self {
                Self(array_init(|i| e.at(i)))
            }
        }

        impl<T, const D: usize, E> AssignFrom<E> for $name<T, D>
        where
            E: Operand<Rank = $rank<D>, Coord = T>,
        {
            #[inline]
            fn assign_from(&mut self, e: &E) {
                for (i, x) in self.0.iter_mut().enumerate() {
                    *x = e.at(i);
                }
            }
        }

        crate::impl_tensor_ops!([T, const D: usize,] $name<T, D>);
        )*
    };
}
rank1_storage!(Vector VectorRank, Point PointRank);

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    #[inline]
    pub const fn new(rows: [[T; C]; R]) -> Self {
        Self(rows)
    }

    /// Build from a function of `(row, col)`
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> T) -> Self {
        Self(array_init(|r| array_init(|c| f(r, c))))
    }

    #[inline]
    pub fn rows(&self) -> &[[T; C]; R] {
        &self.0
    }
}

impl<T: Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    pub fn row(&self, r: usize) -> Vector<T, C> {
        Vector(self.0[r])
    }

    pub fn column(&self, c: usize) -> Vector<T, R> {
        Vector(array_init(|r| self.0[r][c]))
    }

    pub fn transpose(&self) -> Matrix<T, C, R> {
        Matrix::from_fn(|r, c| self.0[c][r])
    }
}

impl<T: Zero, const R: usize, const C: usize> Matrix<T, R, C> {
    pub fn zero() -> Self {
        Self(array_init(|_| array_init(|_| T::zero())))
    }
}

impl<T: Zero + One, const N: usize> Matrix<T, N, N> {
    pub fn identity() -> Self {
        Self::from_fn(|r, c| if r == c { T::one() } else { T::zero() })
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T, R, C> {
    fn from(rows: [[T; C]; R]) -> Self {
        Self(rows)
    }
}

impl<T, const R: usize, const C: usize> Classified for Matrix<T, R, C> {
    type Rank = MatrixRank<R, C>;
    type Diversity = Homogeneous;
}

impl<T: Copy, const R: usize, const C: usize> Operand for Matrix<T, R, C> {
    type Coord = T;
    #[inline]
    fn at(&self, (r, c): (usize, usize)) -> T {
        self.0[r][c]
    }
}

impl<T: Copy, const R: usize, const C: usize> OperandMut for Matrix<T, R, C> {
    #[inline]
    fn set(&mut self, (r, c): (usize, usize), value: T) {
        self.0[r][c] = value;
    }
}

impl<T, const R: usize, const C: usize, E> ConstructFrom<E> for Matrix<T, R, C>
where
    E: Operand<Rank = MatrixRank<R, C>, Coord = T>,
{
    #[inline]
    fn construct_from(e: &E) -> Self {
        Self(array_init(|r| array_init(|c| e.at((r, c)))))
    }
}

impl<T, const R: usize, const C: usize, E> AssignFrom<E> for Matrix<T, R, C>
where
    E: Operand<Rank = MatrixRank<R, C>, Coord = T>,
{
    #[inline]
    fn assign_from(&mut self, e: &E) {
        for (r, row) in self.0.iter_mut().enumerate() {
            for (c, x) in row.iter_mut().enumerate() {
                *x = e.at((r, c));
            }
        }
    }
}

crate::impl_tensor_ops!([T, const R: usize, const C: usize,] Matrix<T, R, C>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{construct, test_macros::*};

    simple_eqs! {
        vector_from_fn: Vector::<usize, 3>::from_fn(|i| i * i) => Vector::new([0, 1, 4]),
        point_zero: Point::<f64, 2>::zero() => Point::new([0.0, 0.0]),
        identity: Matrix::<i32, 2, 2>::identity() => Matrix::new([[1, 0], [0, 1]]),
        transpose: Matrix::new([[1, 2, 3], [4, 5, 6]]).transpose() => Matrix::new([[1, 4], [2, 5], [3, 6]]),
        row: Matrix::new([[1, 2], [3, 4]]).row(1) => Vector::new([3, 4]),
        column: Matrix::new([[1, 2], [3, 4]]).column(1) => Vector::new([2, 4]),
        from_array: Vector::from([1, 2]) => Vector::new([1, 2])
    }

    #[test]
    fn identity_is_neutral() {
        let m = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
        let i = Matrix::<f64, 2, 2>::identity();
        assert_eq!(construct::<Matrix<f64, 2, 2>, _>(&m * &i), m);
        assert_eq!(construct::<Matrix<f64, 2, 2>, _>(&i * &m), m);
    }

    #[test]
    fn matrix_assignment() {
        let a = Matrix::new([[1, 2], [3, 4]]);
        let mut m = Matrix::<i32, 2, 2>::zero();
        crate::assign(&mut m, &a * &a);
        assert_eq!(m, Matrix::new([[7, 10], [15, 22]]));
    }
}
