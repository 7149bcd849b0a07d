//! LUP decomposition of square matrices, with partial pivoting
//!
//! `P * M = L * U`, where `P` permutes the rows of `M`, `L` is lower
//! triangular with a unit diagonal and `U` is upper triangular. Both `L` and
//! `U` are stored in the same matrix. Once decomposed, `M` can be used to
//! solve linear systems, and its determinant and inverse come almost for
//! free.
//!
//! ```
//! use tensex::{AbsoluteTolerance, Lup, Matrix, Vector};
//!
//! let m = Matrix::new([[2.0, 1.0], [1.0, 3.0]]);
//! let lup = Lup::decompose(&m, &AbsoluteTolerance::default())?;
//! assert_eq!(lup.determinant(), 5.0);
//! assert_eq!(lup.solve(&Vector::new([3.0, 4.0])), Vector::new([1.0, 1.0]));
//! # Ok::<(), tensex::LupError>(())
//! ```

use crate::{
    expr::IntoOperand,
    numeric::*,
    rank::VectorRank,
    tensor::{Matrix, Vector},
    tolerance::AbsoluteTolerance,
    Operand,
};
use array_init::array_init;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LupError {
    /// No usable pivot was found in this column: the matrix is singular
    /// (within the given tolerance)
    #[error("singular matrix: no pivot in column {column}")]
    Singular { column: usize },
}

/// A decomposed `N`x`N` matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lup<T, const N: usize> {
    lu: Matrix<T, N, N>,
    permutation: [usize; N],
    swaps: usize,
}

impl<T: Field + Debug, const N: usize> Lup<T, N> {
    /// Decompose `m`. At each column, the row with the largest pivot (in
    /// absolute value) is moved up. Fails when that pivot is zero within
    /// `tolerance`
    pub fn decompose(m: &Matrix<T, N, N>, tolerance: &AbsoluteTolerance<T>) -> Result<Self, LupError> {
        let mut lu = *m;
        let mut permutation: [usize; N] = array_init(|i| i);
        let mut swaps = 0;

        for k in 0..N {
            let mut pivot_row = k;
            let mut pivot = lu.0[k][k].abs();
            for i in k + 1..N {
                let candidate = lu.0[i][k].abs();
                if candidate > pivot {
                    pivot_row = i;
                    pivot = candidate;
                }
            }
            if tolerance.is_zero(pivot) {
                tracing::debug!(column = k, ?pivot, "no pivot found, matrix is singular");
                return Err(LupError::Singular { column: k });
            }
            if pivot_row != k {
                tracing::trace!(column = k, with = pivot_row, "swapping rows");
                permutation.swap(k, pivot_row);
                lu.0.swap(k, pivot_row);
                swaps += 1;
            }
            for i in k + 1..N {
                let factor = lu.0[i][k].over(lu.0[k][k]);
                lu.0[i][k] = factor;
                for j in k + 1..N {
                    lu.0[i][j] = lu.0[i][j].minus(factor.times(lu.0[k][j]));
                }
            }
        }

        Ok(Lup {
            lu,
            permutation,
            swaps,
        })
    }

    /// Solve `M * x = b`. `b` may be any vector operand, including an
    /// unevaluated expression
    pub fn solve<B>(&self, b: B) -> Vector<T, N>
    where
        B: IntoOperand,
        B::Operand: Operand<Rank = VectorRank<N>, Coord = T>,
    {
        let b = b.into_operand();
        let lu = &self.lu.0;

        // L * y = P * b
        let mut y = [T::zero(); N];
        for i in 0..N {
            let yi = (0..i).fold(b.at(self.permutation[i]), |acc, j| acc.minus(lu[i][j].times(y[j])));
            y[i] = yi;
        }
        // U * x = y
        let mut x = [T::zero(); N];
        for i in (0..N).rev() {
            let rest = (i + 1..N).fold(y[i], |acc, j| acc.minus(lu[i][j].times(x[j])));
            x[i] = rest.over(lu[i][i]);
        }
        Vector::new(x)
    }

    pub fn determinant(&self) -> T {
        let d = (0..N).fold(T::one(), |acc, i| acc.times(self.lu.0[i][i]));
        if self.swaps % 2 == 1 {
            -d
        } else {
            d
        }
    }

    /// `M⁻¹`, one solved column at a time
    pub fn inverse(&self) -> Matrix<T, N, N> {
        let columns: [Vector<T, N>; N] = array_init(|c| {
            let unit = Vector::from_fn(|r| if r == c { T::one() } else { T::zero() });
            self.solve(&unit)
        });
        Matrix::from_fn(|r, c| columns[c].0[r])
    }

    /// `L`, with its unit diagonal
    pub fn lower(&self) -> Matrix<T, N, N> {
        Matrix::from_fn(|r, c| match r.cmp(&c) {
            std::cmp::Ordering::Greater => self.lu.0[r][c],
            std::cmp::Ordering::Equal => T::one(),
            std::cmp::Ordering::Less => T::zero(),
        })
    }

    pub fn upper(&self) -> Matrix<T, N, N> {
        Matrix::from_fn(|r, c| if r <= c { self.lu.0[r][c] } else { T::zero() })
    }

    /// Row `i` of `P * M` is row `permutation()[i]` of `M`
    pub fn permutation(&self) -> &[usize; N] {
        &self.permutation
    }

    pub fn permutation_matrix(&self) -> Matrix<T, N, N> {
        Matrix::from_fn(|r, c| if self.permutation[r] == c { T::one() } else { T::zero() })
    }

    /// How many row swaps the pivoting did
    pub fn swaps(&self) -> usize {
        self.swaps
    }
}

/// Determinant of `m`, zero if `m` is singular within `tolerance`
pub fn determinant<T: Field + Debug, const N: usize>(m: &Matrix<T, N, N>, tolerance: &AbsoluteTolerance<T>) -> T {
    match Lup::decompose(m, tolerance) {
        Ok(lup) => lup.determinant(),
        Err(LupError::Singular { .. }) => T::zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{construct, test_macros::*};
    use rstest::*;

    #[fixture]
    fn clrs() -> Matrix<f64, 4, 4> {
        Matrix::new([
            [2.0, 0.0, 2.0, 0.6],
            [3.0, 3.0, 4.0, -2.0],
            [5.0, 5.0, 4.0, 2.0],
            [-1.0, -2.0, 3.4, -1.0],
        ])
    }

    #[fixture]
    fn tolerance() -> AbsoluteTolerance<f64> {
        AbsoluteTolerance::default()
    }

    #[rstest]
    fn pivoting(clrs: Matrix<f64, 4, 4>, tolerance: AbsoluteTolerance<f64>) {
        let lup = Lup::decompose(&clrs, &tolerance).unwrap();
        assert_eq!(lup.permutation(), &[2, 0, 3, 1]);
        assert_eq!(lup.swaps(), 3);
        let u = lup.upper();
        assert_close!(Vector::new([u.0[0][0], u.0[1][1], u.0[2][2], u.0[3][3]]), Vector::new([5.0, -2.0, 4.0, -3.0]));
    }

    #[rstest]
    fn factors_recompose(clrs: Matrix<f64, 4, 4>, tolerance: AbsoluteTolerance<f64>) {
        let lup = Lup::decompose(&clrs, &tolerance).unwrap();
        let (l, u, p) = (lup.lower(), lup.upper(), lup.permutation_matrix());
        let lu: Matrix<f64, 4, 4> = construct(&l * &u);
        let pm: Matrix<f64, 4, 4> = construct(&p * &clrs);
        assert_close!(lu, pm);
    }

    #[rstest]
    fn determinant_and_inverse(clrs: Matrix<f64, 4, 4>, tolerance: AbsoluteTolerance<f64>) {
        let lup = Lup::decompose(&clrs, &tolerance).unwrap();
        assert_close!(lup.determinant(), -120.0);
        assert_close!(determinant(&clrs, &tolerance), -120.0);
        let inv = lup.inverse();
        let id: Matrix<f64, 4, 4> = construct(&inv * &clrs);
        assert_close!(id, Matrix::identity());
    }

    #[rstest]
    fn solver(tolerance: AbsoluteTolerance<f64>) {
        let m = Matrix::new([
            [1.0, 2.0, 0.0, 5.0],
            [3.0, 5.0, 4.0, 6.0],
            [5.0, 6.0, 3.0, 7.0],
            [8.0, 10.0, 9.0, 9.0],
        ]);
        let b = Vector::new([0.1, 12.5, 10.3, 8.0]);
        let lup = Lup::decompose(&m, &tolerance).unwrap();
        let x = lup.solve(&b);
        let residual: Vector<f64, 4> = construct(&m * &x);
        assert_close!(residual, b);
        // the right-hand side can be left unevaluated
        assert_close!(lup.solve(&m * &x), x);
    }

    #[rstest]
    #[case::rank_one(Matrix::new([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [3.0, 6.0, 9.0]]), 1)]
    #[case::dependent_rows(Matrix::new([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 0.0, 1.0]]), 2)]
    #[case::zero(Matrix::zero(), 0)]
    fn singular_matrices(#[case] m: Matrix<f64, 3, 3>, #[case] column: usize, tolerance: AbsoluteTolerance<f64>) {
        assert_eq!(Lup::decompose(&m, &tolerance), Err(LupError::Singular { column }));
        assert_eq!(determinant(&m, &tolerance), 0.0);
    }

    #[test]
    fn error_message() {
        assert_eq!(
            LupError::Singular { column: 2 }.to_string(),
            "singular matrix: no pivot in column 2"
        );
    }
}
