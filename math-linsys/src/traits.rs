//! Core traits for the elimination engine
//!
//! This module defines the two abstractions the solvers are written against:
//! - [`RealField`]: Trait for the real scalar types (f64, f32)
//! - [`RowOperand`]: Trait for row-addressable structures that elementary row
//!   operations can mutate (symbolic [`LinearSystem`](crate::LinearSystem)s and
//!   plain numeric `Array2` matrices)

use ndarray::{Array2, Zip, s};
use num_traits::{Float, FromPrimitive, NumAssign, ToPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types that can be used by the elimination engine.
///
/// # Implementations
///
/// Provided for:
/// - `f64` (default for most callers)
/// - `f32` (for memory-constrained applications, with looser tolerances)
pub trait RealField:
    Float + NumAssign + FromPrimitive + ToPrimitive + Send + Sync + Debug + Display + 'static
{
    /// Default magnitude below which a coefficient is not a pivot
    const NEAR_ZERO: Self;

    /// Default magnitude below which the numeric solver treats an entry as zero
    const EXACT_ZERO: Self;

    /// Check if this is zero within `tol`
    #[inline]
    fn is_near_zero(self, tol: Self) -> bool {
        self.abs() < tol
    }

    /// Round half away from zero to `places` decimal digits.
    ///
    /// Values that cannot be scaled without overflow are returned unchanged.
    #[inline]
    fn round_to(self, places: u32) -> Self {
        let Some(scale) = Self::from_u32(10)
            .and_then(|ten| i32::try_from(places).ok().map(|p| ten.powi(p)))
        else {
            return self;
        };
        let scaled = self * scale;
        if !scale.is_finite() || !scaled.is_finite() {
            return self;
        }
        scaled.round() / scale
    }
}

impl RealField for f64 {
    const NEAR_ZERO: f64 = 1e-10;
    const EXACT_ZERO: f64 = 1e-16;
}

impl RealField for f32 {
    const NEAR_ZERO: f32 = 1e-6;
    const EXACT_ZERO: f32 = 1e-7;
}

/// Trait for structures made of rows that elementary row operations act on.
///
/// Implementations perform the raw mutation only. Validation (zero factors,
/// row bounds) lives in [`row_ops`](crate::row_ops), which is the only caller
/// the engine uses.
pub trait RowOperand<T: RealField> {
    /// Number of rows
    fn num_rows(&self) -> usize;

    /// Exchange rows `r1` and `r2`
    fn swap(&mut self, r1: usize, r2: usize);

    /// Multiply every entry of row `r` by `factor`
    fn scale(&mut self, r: usize, factor: T);

    /// `target <- target + factor * source`
    fn add_scaled(&mut self, source: usize, target: usize, factor: T);
}

impl<T: RealField> RowOperand<T> for Array2<T> {
    fn num_rows(&self) -> usize {
        self.nrows()
    }

    fn swap(&mut self, r1: usize, r2: usize) {
        if r1 == r2 {
            return;
        }
        let (mut a, mut b) = self.multi_slice_mut((s![r1, ..], s![r2, ..]));
        Zip::from(&mut a)
            .and(&mut b)
            .for_each(|x, y| std::mem::swap(x, y));
    }

    fn scale(&mut self, r: usize, factor: T) {
        self.row_mut(r).mapv_inplace(|v| v * factor);
    }

    fn add_scaled(&mut self, source: usize, target: usize, factor: T) {
        let src = self.row(source).to_owned();
        self.row_mut(target).scaled_add(factor, &src);
    }
}
