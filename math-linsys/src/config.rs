//! JSON description of a linear system and solver settings

use crate::echelon::EliminationConfig;
use crate::equation::Equation;
use crate::numeric::PartialPivotConfig;
use crate::system::LinearSystem;
use crate::{LinearSystemError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete system description loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Equations, one per row
    pub equations: Vec<EquationConfig>,
    /// Solver settings
    #[serde(default)]
    pub solver: SolverSettings,
}

/// One equation `coefficients · x = constant`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationConfig {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub constant: f64,
}

/// Solver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Near-zero tolerance for pivot detection
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Zero threshold for the partial-pivot solver
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Decimal places kept by the partial-pivot solver
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            epsilon: default_epsilon(),
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_epsilon() -> f64 {
    1e-16
}

fn default_decimal_places() -> u32 {
    4
}

impl SystemConfig {
    /// Parse a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Build the hyperplane system
    pub fn to_system(&self) -> Result<LinearSystem<f64>> {
        LinearSystem::new(
            self.equations
                .iter()
                .map(|eq| Equation::from_slice(&eq.coefficients, eq.constant))
                .collect(),
        )
    }

    /// Split into a coefficient matrix and a right-hand side
    pub fn to_matrix_parts(&self) -> Result<(Array2<f64>, Array1<f64>)> {
        let rows = self.equations.len();
        let cols = self.equations.first().map_or(0, |eq| eq.coefficients.len());

        let mut a = Array2::zeros((rows, cols));
        for (i, eq) in self.equations.iter().enumerate() {
            if eq.coefficients.len() != cols {
                return Err(LinearSystemError::DimensionMismatch {
                    expected: cols,
                    got: eq.coefficients.len(),
                });
            }
            a.row_mut(i).assign(&Array1::from_vec(eq.coefficients.clone()));
        }
        let b = self.equations.iter().map(|eq| eq.constant).collect();
        Ok((a, b))
    }

    pub fn elimination_config(&self) -> EliminationConfig<f64> {
        EliminationConfig::with_tolerance(self.solver.tolerance)
    }

    pub fn partial_pivot_config(&self) -> PartialPivotConfig<f64> {
        PartialPivotConfig {
            tolerance: self.solver.epsilon,
            decimal_places: self.solver.decimal_places,
        }
    }
}
