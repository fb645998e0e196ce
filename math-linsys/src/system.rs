//! Linear systems as ordered lists of equations

use crate::equation::Equation;
use crate::traits::{RealField, RowOperand};
use crate::{LinearSystemError, Result};
use std::fmt;
use std::ops::Index;

/// An ordered list of equations sharing one dimension.
///
/// Row order matters: pivot search scans downward from the current row.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem<T: RealField> {
    equations: Vec<Equation<T>>,
    dimension: usize,
}

impl<T: RealField> LinearSystem<T> {
    /// Build a system from equations of equal dimension.
    ///
    /// An empty list gives a system of dimension 0.
    pub fn new(equations: Vec<Equation<T>>) -> Result<Self> {
        let dimension = equations.first().map_or(0, Equation::dimension);
        if let Some(eq) = equations.iter().find(|eq| eq.dimension() != dimension) {
            return Err(LinearSystemError::DimensionMismatch {
                expected: dimension,
                got: eq.dimension(),
            });
        }
        Ok(Self {
            equations,
            dimension,
        })
    }

    /// Number of equations
    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// Number of variables
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn equations(&self) -> &[Equation<T>] {
        &self.equations
    }

    pub fn get(&self, i: usize) -> Option<&Equation<T>> {
        self.equations.get(i)
    }

    /// Replace equation `i`, keeping the system's dimension
    pub fn set(&mut self, i: usize, equation: Equation<T>) -> Result<()> {
        if equation.dimension() != self.dimension {
            return Err(LinearSystemError::DimensionMismatch {
                expected: self.dimension,
                got: equation.dimension(),
            });
        }
        let rows = self.len();
        let slot = self
            .equations
            .get_mut(i)
            .ok_or(LinearSystemError::RowOutOfBounds { row: i, rows })?;
        *slot = equation;
        Ok(())
    }

    /// Column of the first non-near-zero coefficient of every row.
    ///
    /// Rows without one map to `None`. Always computed from the current rows.
    pub fn pivot_indices(&self, tol: T) -> Vec<Option<usize>> {
        self.equations
            .iter()
            .map(|eq| eq.first_nonzero_index(tol))
            .collect()
    }

    /// Number of rows that have a pivot
    pub fn num_pivots(&self, tol: T) -> usize {
        self.pivot_indices(tol).iter().flatten().count()
    }
}

impl<T: RealField> Index<usize> for LinearSystem<T> {
    type Output = Equation<T>;

    fn index(&self, i: usize) -> &Equation<T> {
        &self.equations[i]
    }
}

impl<T: RealField> RowOperand<T> for LinearSystem<T> {
    fn num_rows(&self) -> usize {
        self.len()
    }

    fn swap(&mut self, r1: usize, r2: usize) {
        self.equations.swap(r1, r2);
    }

    fn scale(&mut self, r: usize, factor: T) {
        self.equations[r] = self.equations[r].times_scalar(factor);
    }

    fn add_scaled(&mut self, source: usize, target: usize, factor: T) {
        let (normal, constant) = {
            let src = &self.equations[source];
            (src.normal_vector().to_owned(), src.constant_term())
        };
        let tgt = &self.equations[target];
        let mut sum = tgt.normal_vector().to_owned();
        sum.scaled_add(factor, &normal);
        let sum = Equation::new(sum, tgt.constant_term() + factor * constant);
        self.equations[target] = sum;
    }
}

impl<T: RealField> fmt::Display for LinearSystem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Linear System:")?;
        for (i, eq) in self.equations.iter().enumerate() {
            write!(f, "\nEquation {}: {}", i + 1, eq)?;
        }
        Ok(())
    }
}
