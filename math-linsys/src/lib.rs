//! Gaussian elimination for small dense linear systems
//!
//! This crate solves systems of linear equations `Ax = b`, given either as a
//! list of hyperplanes or as a plain numeric matrix, and reports a unique
//! solution, a parametrization of an infinite solution set, or no solution.
//!
//! # Features
//!
//! - **Row operations**: swap, scale and add-scaled-row, shared by both paths
//! - **Echelon forms**: triangular form and reduced row-echelon form with a
//!   near-zero pivot tolerance
//! - **Solution extraction**: exact solution vector, or base point plus
//!   direction vectors for the free variables
//! - **Numeric path**: partial-pivoting Gauss-Jordan on an augmented matrix,
//!   rounded to a fixed number of decimals
//! - **Generic Scalar Types**: Works with f64 and f32
//!
//! # Example
//!
//! ```
//! use math_audio_linsys::{EliminationConfig, Equation, LinearSystem, solve_parametrized};
//!
//! let system = LinearSystem::new(vec![
//!     Equation::from_slice(&[1.0, 1.0, 1.0], 1.0),
//!     Equation::from_slice(&[2.0, 2.0, 2.0], 2.0),
//!     Equation::from_slice(&[1.0, 2.0, 3.0], 4.0),
//! ])
//! .unwrap();
//!
//! let solution = solve_parametrized(&system, &EliminationConfig::default()).unwrap();
//! assert_eq!(solution.num_free_variables(), 1);
//! ```

pub mod config;
pub mod echelon;
pub mod equation;
pub mod numeric;
pub mod row_ops;
pub mod solution;
pub mod system;
pub mod traits;

pub use config::{EquationConfig, SolverSettings, SystemConfig};
pub use echelon::{EliminationConfig, is_rref, rref, triangular_form};
pub use equation::Equation;
pub use numeric::{
    PartialPivotConfig, PartialPivotSolution, augment_matrix, partial_pivot_solve, round_matrix,
};
pub use row_ops::{add_scaled_row, scale_row, swap_rows};
pub use solution::{
    Parametrization, check_consistent, check_enough_pivots, compute_solution,
    extract_unique_solution, parametrize_solution, solve_exact, solve_parametrized,
};
pub use system::LinearSystem;
pub use traits::{RealField, RowOperand};

/// Error types for linear system operations
#[derive(Debug, thiserror::Error)]
pub enum LinearSystemError {
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Row operations require a non-zero scale factor")]
    InvalidScale,

    #[error("Row {row} is out of bounds for a system of {rows} rows")]
    RowOutOfBounds { row: usize, rows: usize },

    #[error("No solutions")]
    NoSolution,

    #[error("Infinitely many solutions")]
    InfiniteSolutions,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse system description: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LinearSystemError>;
