//! Elementary row operations
//!
//! These three functions are the only mutators the elimination engine uses.
//! They work on anything implementing [`RowOperand`], so the hyperplane-based
//! and the numeric solvers share them.

use crate::traits::{RealField, RowOperand};
use crate::{LinearSystemError, Result};

#[inline]
fn check_row<T: RealField, M: RowOperand<T> + ?Sized>(m: &M, row: usize) -> Result<()> {
    let rows = m.num_rows();
    if row >= rows {
        return Err(LinearSystemError::RowOutOfBounds { row, rows });
    }
    Ok(())
}

/// Exchange rows `r1` and `r2`
pub fn swap_rows<T: RealField, M: RowOperand<T> + ?Sized>(
    m: &mut M,
    r1: usize,
    r2: usize,
) -> Result<()> {
    check_row(m, r1)?;
    check_row(m, r2)?;
    m.swap(r1, r2);
    Ok(())
}

/// Multiply row `r`, constant term included, by `factor`.
///
/// A zero factor would erase the row and is rejected with
/// [`LinearSystemError::InvalidScale`].
pub fn scale_row<T: RealField, M: RowOperand<T> + ?Sized>(
    m: &mut M,
    r: usize,
    factor: T,
) -> Result<()> {
    check_row(m, r)?;
    if factor.is_zero() {
        return Err(LinearSystemError::InvalidScale);
    }
    m.scale(r, factor);
    Ok(())
}

/// `target <- target + factor * source`.
///
/// A zero factor is a no-op and is rejected with
/// [`LinearSystemError::InvalidScale`].
pub fn add_scaled_row<T: RealField, M: RowOperand<T> + ?Sized>(
    m: &mut M,
    source: usize,
    target: usize,
    factor: T,
) -> Result<()> {
    check_row(m, source)?;
    check_row(m, target)?;
    if factor.is_zero() {
        return Err(LinearSystemError::InvalidScale);
    }
    m.add_scaled(source, target, factor);
    Ok(())
}
