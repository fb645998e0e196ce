//! Gauss-Jordan solver with partial pivoting on plain numeric matrices
//!
//! Solves `Ax = b` for a square `A` by reducing the augmented matrix `[A | b]`
//! and rounding the result to a fixed number of decimals.
//!
//! The pivoting and zero-pivot handling reproduce the behavior of the solver
//! this crate replaces, which differs from textbook partial pivoting:
//! - the pivot search swaps as soon as it finds a larger candidate and keeps
//!   comparing against the row it just swapped out
//! - an exact-zero pivot during forward elimination is swapped with the last
//!   row; if the pivot is still zero, forward elimination stops there

use crate::row_ops::{add_scaled_row, swap_rows};
use crate::traits::RealField;
use crate::{LinearSystemError, Result};
use ndarray::{Array1, Array2, s};
use serde::{Deserialize, Serialize};

/// Partial-pivot solver configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartialPivotConfig<R> {
    /// Diagonal and right-hand-side entries below this magnitude count as zero
    /// during back substitution
    pub tolerance: R,
    /// Decimal places kept in the result
    pub decimal_places: u32,
}

impl<R: RealField> Default for PartialPivotConfig<R> {
    fn default() -> Self {
        Self {
            tolerance: R::EXACT_ZERO,
            decimal_places: 4,
        }
    }
}

/// Partial-pivot solver result
#[derive(Debug, Clone, PartialEq)]
pub struct PartialPivotSolution<T: RealField> {
    /// Solution vector (last column of `reduced`)
    pub x: Array1<T>,
    /// Rounded working matrix after back substitution
    pub reduced: Array2<T>,
}

/// Build the augmented matrix `[A | b]`
pub fn augment_matrix<T: RealField>(a: &Array2<T>, b: &Array1<T>) -> Result<Array2<T>> {
    if a.nrows() != b.len() {
        return Err(LinearSystemError::DimensionMismatch {
            expected: a.nrows(),
            got: b.len(),
        });
    }

    let cols = a.ncols();
    let mut m = Array2::zeros((a.nrows(), cols + 1));
    m.slice_mut(s![.., ..cols]).assign(a);
    m.column_mut(cols).assign(b);
    Ok(m)
}

/// Round every entry of `m` to `decimal_places` decimals
pub fn round_matrix<T: RealField>(m: &mut Array2<T>, decimal_places: u32) {
    m.mapv_inplace(|v| v.round_to(decimal_places));
}

/// Solve `Ax = b` by Gauss-Jordan elimination with partial pivoting.
///
/// Returns `Ok(None)` when `A` and `b` have different row counts or when the
/// system has no solution. A singular but consistent system yields one
/// particular solution, with the undetermined variables left at whatever the
/// reduction produced.
///
/// # Errors
///
/// [`LinearSystemError::DimensionMismatch`] if `A` is not square.
pub fn partial_pivot_solve<T: RealField>(
    a: &Array2<T>,
    b: &Array1<T>,
    config: &PartialPivotConfig<T>,
) -> Result<Option<PartialPivotSolution<T>>> {
    if a.nrows() != b.len() {
        log::debug!(
            "Row count mismatch: A has {} rows, b has {}",
            a.nrows(),
            b.len()
        );
        return Ok(None);
    }
    if !a.is_square() {
        return Err(LinearSystemError::DimensionMismatch {
            expected: a.nrows(),
            got: a.ncols(),
        });
    }

    let n = a.nrows();
    log::info!("Partial-pivot solve of a {}x{} system", n, n);

    let mut m = augment_matrix(a, b)?;
    sort_pivot_rows(&mut m)?;
    forward_eliminate(&mut m)?;
    if !back_substitute(&mut m, config.tolerance) {
        return Ok(None);
    }

    round_matrix(&mut m, config.decimal_places);
    let x = m.column(n).to_owned();
    Ok(Some(PartialPivotSolution { x, reduced: m }))
}

fn sort_pivot_rows<T: RealField>(m: &mut Array2<T>) -> Result<()> {
    let n = m.nrows();
    for col in 0..n {
        let mut bigrow = col;
        for row in col + 1..n {
            if m[[row, col]].abs() > m[[bigrow, col]].abs() {
                bigrow = row;
                swap_rows(m, col, bigrow)?;
            }
        }
    }
    Ok(())
}

fn forward_eliminate<T: RealField>(m: &mut Array2<T>) -> Result<()> {
    let n = m.nrows();
    for col in 0..n {
        for row in col + 1..n {
            if m[[col, col]].is_zero() {
                swap_rows(m, col, n - 1)?;
                if m[[col, col]].is_zero() {
                    log::debug!("Zero pivot in column {}, stopping forward elimination", col);
                    return Ok(());
                }
            }
            let factor = -m[[row, col]] / m[[col, col]];
            if !factor.is_zero() {
                add_scaled_row(m, col, row, factor)?;
            }
        }
    }
    Ok(())
}

/// Normalize and knock up from the last row. Returns `false` on a row that
/// reads `0 = k` with `k` non-zero.
fn back_substitute<T: RealField>(m: &mut Array2<T>, tol: T) -> bool {
    let n = m.nrows();
    let aug = m.ncols() - 1;

    for rb in (0..n).rev() {
        let diag = m[[rb, rb]];
        if diag.is_near_zero(tol) {
            if m[[rb, aug]].is_near_zero(tol) {
                continue;
            }
            log::debug!("Row {} is inconsistent, no solution", rb);
            return false;
        }

        m.slice_mut(s![rb, rb..]).mapv_inplace(|v| v / diag);

        for kup in (0..rb).rev() {
            let factor = -m[[kup, rb]] / m[[rb, rb]];
            if factor.is_zero() {
                continue;
            }
            let (pivot_row, mut target) = m.multi_slice_mut((s![rb, rb..], s![kup, rb..]));
            target.scaled_add(factor, &pivot_row);
        }
    }
    true
}
