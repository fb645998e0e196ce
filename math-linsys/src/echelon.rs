//! Triangular and reduced row-echelon forms
//!
//! Both transforms work on a copy of the input system and express every step
//! as a sequence of [`row_ops`](crate::row_ops) calls.

use crate::Result;
use crate::row_ops::{add_scaled_row, scale_row, swap_rows};
use crate::system::LinearSystem;
use crate::traits::RealField;
use serde::{Deserialize, Serialize};

/// Elimination configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EliminationConfig<R> {
    /// Coefficients with magnitude below this are treated as zero
    pub tolerance: R,
}

impl<R: RealField> Default for EliminationConfig<R> {
    fn default() -> Self {
        Self {
            tolerance: R::NEAR_ZERO,
        }
    }
}

impl<R: RealField> EliminationConfig<R> {
    pub fn with_tolerance(tolerance: R) -> Self {
        Self { tolerance }
    }
}

/// Bring `system` to triangular form.
///
/// Rows are visited top to bottom with a column cursor that is never reset.
/// When the coefficient under the cursor is near zero, the first row below
/// with a usable coefficient is swapped in; if there is none, the cursor moves
/// right and the same row is tried again. Pivot search only looks downward.
pub fn triangular_form<T: RealField>(
    system: &LinearSystem<T>,
    config: &EliminationConfig<T>,
) -> Result<LinearSystem<T>> {
    let mut tf = system.clone();
    let num_equations = tf.len();
    let num_variables = tf.dimension();

    let mut j = 0;
    for i in 0..num_equations {
        while j < num_variables {
            if tf[i].coefficient(j).is_near_zero(config.tolerance)
                && !swap_with_row_below_for_nonzero_coefficient(&mut tf, i, j, config.tolerance)?
            {
                log::debug!("No pivot for row {} in column {}", i, j);
                j += 1;
                continue;
            }
            clear_coefficients_below(&mut tf, i, j)?;
            j += 1;
            break;
        }
    }

    Ok(tf)
}

fn swap_with_row_below_for_nonzero_coefficient<T: RealField>(
    system: &mut LinearSystem<T>,
    row: usize,
    col: usize,
    tol: T,
) -> Result<bool> {
    let below = (row + 1..system.len()).find(|&k| !system[k].coefficient(col).is_near_zero(tol));
    match below {
        Some(k) => {
            log::debug!("Swapping row {} with row {} for column {}", row, k, col);
            swap_rows(system, row, k)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn clear_coefficients_below<T: RealField>(
    system: &mut LinearSystem<T>,
    row: usize,
    col: usize,
) -> Result<()> {
    let beta = system[row].coefficient(col);
    for k in row + 1..system.len() {
        let alpha = -system[k].coefficient(col) / beta;
        if !alpha.is_zero() {
            add_scaled_row(system, row, k, alpha)?;
        }
    }
    Ok(())
}

/// Bring `system` to reduced row-echelon form.
///
/// Starts from [`triangular_form`] and walks rows bottom to top: each pivot is
/// scaled to one and its column cleared in every row above.
pub fn rref<T: RealField>(
    system: &LinearSystem<T>,
    config: &EliminationConfig<T>,
) -> Result<LinearSystem<T>> {
    let mut tf = triangular_form(system, config)?;

    for i in (0..tf.len()).rev() {
        let Some(j) = tf[i].first_nonzero_index(config.tolerance) else {
            continue;
        };
        scale_row_to_make_coefficient_equal_one(&mut tf, i, j)?;
        clear_coefficients_above(&mut tf, i, j)?;
    }

    Ok(tf)
}

fn scale_row_to_make_coefficient_equal_one<T: RealField>(
    system: &mut LinearSystem<T>,
    row: usize,
    col: usize,
) -> Result<()> {
    let beta = T::one() / system[row].coefficient(col);
    scale_row(system, row, beta)
}

fn clear_coefficients_above<T: RealField>(
    system: &mut LinearSystem<T>,
    row: usize,
    col: usize,
) -> Result<()> {
    for k in (0..row).rev() {
        let alpha = -system[k].coefficient(col);
        if !alpha.is_zero() {
            add_scaled_row(system, row, k, alpha)?;
        }
    }
    Ok(())
}

/// Check the reduced row-echelon shape within `tol`.
///
/// Pivot rows come first with strictly increasing pivot columns, every pivot
/// is one, and each pivot column is zero outside its own row.
pub fn is_rref<T: RealField>(system: &LinearSystem<T>, tol: T) -> bool {
    let pivots = system.pivot_indices(tol);

    let mut last: Option<usize> = None;
    let mut seen_zero_row = false;
    for pivot in &pivots {
        match (*pivot, last) {
            (None, _) => seen_zero_row = true,
            (Some(_), _) if seen_zero_row => return false,
            (Some(p), Some(prev)) if p <= prev => return false,
            (Some(p), _) => last = Some(p),
        }
    }

    pivots.iter().enumerate().all(|(i, pivot)| match pivot {
        None => true,
        Some(p) => {
            (system[i].coefficient(*p) - T::one()).is_near_zero(tol)
                && (0..system.len())
                    .filter(|&k| k != i)
                    .all(|k| system[k].coefficient(*p).is_near_zero(tol))
        }
    })
}
