//! Hyperplane equations
//!
//! An [`Equation`] is one row of a linear system: a normal vector `n` and a
//! constant term `k`, read as `n · x = k`.

use crate::traits::RealField;
use crate::{LinearSystemError, Result};
use ndarray::{Array1, ArrayView1};
use std::fmt;

/// A hyperplane `normal_vector · x = constant_term`
#[derive(Debug, Clone, PartialEq)]
pub struct Equation<T: RealField> {
    normal_vector: Array1<T>,
    constant_term: T,
}

impl<T: RealField> Equation<T> {
    /// Create an equation from a normal vector and a constant term
    pub fn new(normal_vector: Array1<T>, constant_term: T) -> Self {
        Self {
            normal_vector,
            constant_term,
        }
    }

    /// Create an equation from a coefficient slice
    pub fn from_slice(coefficients: &[T], constant_term: T) -> Self {
        Self::new(Array1::from_vec(coefficients.to_vec()), constant_term)
    }

    /// Number of variables
    pub fn dimension(&self) -> usize {
        self.normal_vector.len()
    }

    pub fn normal_vector(&self) -> ArrayView1<'_, T> {
        self.normal_vector.view()
    }

    pub fn constant_term(&self) -> T {
        self.constant_term
    }

    /// Coefficient of variable `j`
    #[inline]
    pub fn coefficient(&self, j: usize) -> T {
        self.normal_vector[j]
    }

    /// Scale both sides by `factor`
    pub fn times_scalar(&self, factor: T) -> Self {
        Self {
            normal_vector: self.normal_vector.mapv(|v| v * factor),
            constant_term: self.constant_term * factor,
        }
    }

    /// Add two equations side by side
    pub fn plus(&self, other: &Self) -> Result<Self> {
        if self.dimension() != other.dimension() {
            return Err(LinearSystemError::DimensionMismatch {
                expected: self.dimension(),
                got: other.dimension(),
            });
        }
        Ok(Self {
            normal_vector: &self.normal_vector + &other.normal_vector,
            constant_term: self.constant_term + other.constant_term,
        })
    }

    /// Index of the first coefficient with magnitude at least `tol`.
    ///
    /// Returns `None` when every coefficient is near zero.
    pub fn first_nonzero_index(&self, tol: T) -> Option<usize> {
        self.normal_vector.iter().position(|c| !c.is_near_zero(tol))
    }

    /// `0 = k` with `k` not near zero
    pub fn is_contradictory(&self, tol: T) -> bool {
        self.first_nonzero_index(tol).is_none() && !self.constant_term.is_near_zero(tol)
    }

    /// Check that `point` lies on the hyperplane within `tol`
    pub fn satisfied_by(&self, point: ArrayView1<'_, T>, tol: T) -> bool {
        if point.len() != self.dimension() {
            return false;
        }
        (self.normal_vector.dot(&point) - self.constant_term).is_near_zero(tol)
    }
}

impl<T: RealField> fmt::Display for Equation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote_term = false;
        for (j, &c) in self.normal_vector.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            if wrote_term {
                if c.is_sign_negative() {
                    write!(f, " - {}x_{}", c.abs(), j + 1)?;
                } else {
                    write!(f, " + {}x_{}", c, j + 1)?;
                }
            } else {
                write!(f, "{}x_{}", c, j + 1)?;
            }
            wrote_term = true;
        }
        if !wrote_term {
            write!(f, "0")?;
        }
        write!(f, " = {}", self.constant_term)
    }
}
