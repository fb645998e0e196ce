//! Solution extraction from reduced row-echelon form
//!
//! Two ways to read a solution off an RREF system:
//! - [`extract_unique_solution`]: requires one pivot per variable
//! - [`parametrize_solution`]: base point plus one direction vector per free
//!   variable, valid for any consistent system
//!
//! [`solve_exact`] and [`solve_parametrized`] run the full pipeline from an
//! arbitrary system.

use crate::echelon::{EliminationConfig, rref};
use crate::system::LinearSystem;
use crate::traits::RealField;
use crate::{LinearSystemError, Result};
use ndarray::Array1;
use std::fmt;

/// Affine description of a solution set: `basepoint + Σ tᵢ · direction_vectors[i]`
#[derive(Debug, Clone, PartialEq)]
pub struct Parametrization<T: RealField> {
    /// Particular solution with every free variable set to zero
    pub basepoint: Array1<T>,
    /// One vector per free variable, in ascending variable order
    pub direction_vectors: Vec<Array1<T>>,
}

impl<T: RealField> Parametrization<T> {
    pub fn dimension(&self) -> usize {
        self.basepoint.len()
    }

    pub fn num_free_variables(&self) -> usize {
        self.direction_vectors.len()
    }

    /// True when the solution set is a single point
    pub fn is_unique(&self) -> bool {
        self.direction_vectors.is_empty()
    }

    /// Point of the solution set for the given free-variable values
    pub fn point_at(&self, parameters: &[T]) -> Result<Array1<T>> {
        if parameters.len() != self.num_free_variables() {
            return Err(LinearSystemError::DimensionMismatch {
                expected: self.num_free_variables(),
                got: parameters.len(),
            });
        }
        let mut point = self.basepoint.clone();
        for (t, direction) in parameters.iter().zip(&self.direction_vectors) {
            point.scaled_add(*t, direction);
        }
        Ok(point)
    }
}

impl<T: RealField> fmt::Display for Parametrization<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Basepoint: {}", self.basepoint)?;
        for (i, direction) in self.direction_vectors.iter().enumerate() {
            write!(f, "\nDirection vector {}: {}", i + 1, direction)?;
        }
        Ok(())
    }
}

/// Fail with [`LinearSystemError::NoSolution`] if some row reads `0 = k`, `k ≠ 0`
pub fn check_consistent<T: RealField>(rref: &LinearSystem<T>, tol: T) -> Result<()> {
    if let Some(i) = rref.equations().iter().position(|eq| eq.is_contradictory(tol)) {
        log::debug!("Equation {} is contradictory: {}", i + 1, rref[i]);
        return Err(LinearSystemError::NoSolution);
    }
    Ok(())
}

/// Fail with [`LinearSystemError::InfiniteSolutions`] if some variable has no pivot
pub fn check_enough_pivots<T: RealField>(rref: &LinearSystem<T>, tol: T) -> Result<()> {
    if rref.num_pivots(tol) < rref.dimension() {
        return Err(LinearSystemError::InfiniteSolutions);
    }
    Ok(())
}

/// Read the unique solution off an RREF system.
///
/// With one pivot per variable, row `i` reads `x_i = k_i`.
pub fn extract_unique_solution<T: RealField>(rref: &LinearSystem<T>, tol: T) -> Result<Array1<T>> {
    check_consistent(rref, tol)?;
    check_enough_pivots(rref, tol)?;

    Ok(Array1::from_shape_fn(rref.dimension(), |i| {
        rref[i].constant_term()
    }))
}

/// Parametrize the solution set of a consistent RREF system.
///
/// The base point puts each pivot row's constant on its pivot variable and
/// zero on the free variables. The direction vector of free variable `f` has
/// a one at `f` and `-coefficient[f]` of every pivot row at that row's pivot
/// variable.
pub fn parametrize_solution<T: RealField>(
    rref: &LinearSystem<T>,
    tol: T,
) -> Result<Parametrization<T>> {
    check_consistent(rref, tol)?;

    let num_variables = rref.dimension();
    let pivot_indices = rref.pivot_indices(tol);

    let mut is_free = vec![true; num_variables];
    for &p in pivot_indices.iter().flatten() {
        is_free[p] = false;
    }

    let basepoint = extract_base_point(rref, &pivot_indices);
    let direction_vectors = (0..num_variables)
        .filter(|&f| is_free[f])
        .map(|f| extract_direction_vector(rref, &pivot_indices, f))
        .collect();

    Ok(Parametrization {
        basepoint,
        direction_vectors,
    })
}

fn extract_base_point<T: RealField>(
    rref: &LinearSystem<T>,
    pivot_indices: &[Option<usize>],
) -> Array1<T> {
    let mut coords = Array1::zeros(rref.dimension());
    for (eq, pivot) in rref.equations().iter().zip(pivot_indices) {
        if let Some(p) = pivot {
            coords[*p] = eq.constant_term();
        }
    }
    coords
}

fn extract_direction_vector<T: RealField>(
    rref: &LinearSystem<T>,
    pivot_indices: &[Option<usize>],
    free_var: usize,
) -> Array1<T> {
    let mut coords = Array1::zeros(rref.dimension());
    coords[free_var] = T::one();
    for (eq, pivot) in rref.equations().iter().zip(pivot_indices) {
        if let Some(p) = pivot {
            coords[*p] = -eq.coefficient(free_var);
        }
    }
    coords
}

/// Reduce `system` and parametrize its solution set.
///
/// This is the default solve: it never fails with
/// [`LinearSystemError::InfiniteSolutions`], and a unique solution shows up as
/// a parametrization without direction vectors.
pub fn compute_solution<T: RealField>(
    system: &LinearSystem<T>,
    config: &EliminationConfig<T>,
) -> Result<Parametrization<T>> {
    let reduced = rref(system, config)?;
    parametrize_solution(&reduced, config.tolerance)
}

/// Solve a system that must have exactly one solution
pub fn solve_exact<T: RealField>(
    system: &LinearSystem<T>,
    config: &EliminationConfig<T>,
) -> Result<Array1<T>> {
    log::info!(
        "Solving {} equations in {} variables for a unique solution",
        system.len(),
        system.dimension()
    );
    let reduced = rref(system, config)?;
    extract_unique_solution(&reduced, config.tolerance)
}

/// Solve a system and describe its full solution set
pub fn solve_parametrized<T: RealField>(
    system: &LinearSystem<T>,
    config: &EliminationConfig<T>,
) -> Result<Parametrization<T>> {
    log::info!(
        "Parametrizing {} equations in {} variables",
        system.len(),
        system.dimension()
    );
    compute_solution(system, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::Equation;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn system(rows: &[(&[f64], f64)]) -> LinearSystem<f64> {
        LinearSystem::new(
            rows.iter()
                .map(|(n, k)| Equation::from_slice(*n, *k))
                .collect(),
        )
        .unwrap()
    }

    fn assert_vec_eq(actual: &Array1<f64>, expected: &Array1<f64>) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert_relative_eq!(*a, *e, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_solve_exact_unique() {
        let s = system(&[
            (&[0.0, 1.0, 1.0], 2.0),
            (&[1.0, -1.0, 1.0], 2.0),
            (&[1.0, 2.0, -5.0], 3.0),
        ]);
        let x = solve_exact(&s, &EliminationConfig::default()).unwrap();
        assert_vec_eq(&x, &array![26.0 / 9.0, 13.0 / 9.0, 5.0 / 9.0]);
    }

    #[test]
    fn test_solve_exact_overdetermined_consistent() {
        let s = system(&[
            (&[1.0, 1.0], 3.0),
            (&[1.0, -1.0], 1.0),
            (&[2.0, 0.0], 4.0),
        ]);
        let x = solve_exact(&s, &EliminationConfig::default()).unwrap();
        assert_vec_eq(&x, &array![2.0, 1.0]);
    }

    #[test]
    fn test_solve_exact_infinite() {
        let s = system(&[(&[1.0, 1.0, 1.0], 1.0), (&[0.0, 1.0, 1.0], 2.0)]);
        assert!(matches!(
            solve_exact(&s, &EliminationConfig::default()),
            Err(LinearSystemError::InfiniteSolutions)
        ));
    }

    #[test]
    fn test_contradiction_wins_over_too_few_pivots() {
        let s = system(&[(&[1.0, 1.0], 1.0), (&[2.0, 2.0], 3.0)]);
        assert!(matches!(
            solve_exact(&s, &EliminationConfig::default()),
            Err(LinearSystemError::NoSolution)
        ));
    }

    #[test]
    fn test_no_solution_both_paths() {
        let s = system(&[(&[1.0], 1.0), (&[1.0], 2.0)]);
        let config = EliminationConfig::default();
        assert!(matches!(
            solve_exact(&s, &config),
            Err(LinearSystemError::NoSolution)
        ));
        assert!(matches!(
            solve_parametrized(&s, &config),
            Err(LinearSystemError::NoSolution)
        ));
    }

    #[test]
    fn test_parametrize_dependent_rows() {
        let s = system(&[
            (&[1.0, 1.0, 1.0], 1.0),
            (&[2.0, 2.0, 2.0], 2.0),
            (&[1.0, 2.0, 3.0], 4.0),
        ]);
        let p = solve_parametrized(&s, &EliminationConfig::default()).unwrap();

        assert_eq!(p.num_free_variables(), 1);
        assert_vec_eq(&p.basepoint, &array![-2.0, 3.0, 0.0]);
        assert_vec_eq(&p.direction_vectors[0], &array![1.0, -2.0, 1.0]);

        for t in [-3.0, 0.0, 0.5, 10.0] {
            let point = p.point_at(&[t]).unwrap();
            for eq in s.equations() {
                assert!(eq.satisfied_by(point.view(), 1e-9));
            }
        }
    }

    #[test]
    fn test_parametrize_two_free_variables() {
        let s = system(&[(&[0.0, 1.0, 0.0, 2.0], 5.0), (&[0.0, 0.0, 1.0, -1.0], 1.0)]);
        let p = solve_parametrized(&s, &EliminationConfig::default()).unwrap();

        assert_vec_eq(&p.basepoint, &array![0.0, 5.0, 1.0, 0.0]);
        assert_eq!(p.num_free_variables(), 2);
        assert_vec_eq(&p.direction_vectors[0], &array![1.0, 0.0, 0.0, 0.0]);
        assert_vec_eq(&p.direction_vectors[1], &array![0.0, -2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_parametrize_unique_matches_exact() {
        let s = system(&[
            (&[0.0, 1.0, 1.0], 2.0),
            (&[1.0, -1.0, 1.0], 2.0),
            (&[1.0, 2.0, -5.0], 3.0),
        ]);
        let config = EliminationConfig::default();
        let exact = solve_exact(&s, &config).unwrap();
        let param = solve_parametrized(&s, &config).unwrap();

        assert!(param.is_unique());
        assert_vec_eq(&param.basepoint, &exact);
        assert_vec_eq(&param.point_at(&[]).unwrap(), &exact);
    }

    #[test]
    fn test_nearly_dependent_planes() {
        let config = EliminationConfig::default();

        // Rows 1 and 2 contradict each other once reduced
        let s = system(&[
            (&[5.862, 1.178, -10.366], -8.15),
            (&[-2.931, -0.589, 5.183], -4.075),
            (&[1.0, 1.0, 1.0], 2.0),
        ]);
        assert!(matches!(
            solve_parametrized(&s, &config),
            Err(LinearSystemError::NoSolution)
        ));

        // Third plane is a combination of the first two up to rounding residue
        let s = system(&[
            (&[8.631, 5.112, -1.816], -5.113),
            (&[4.315, 11.132, -5.27], -6.775),
            (&[-2.158, 3.01, -1.727], -0.831),
        ]);
        assert!(matches!(
            solve_exact(&s, &config),
            Err(LinearSystemError::InfiniteSolutions)
        ));
        let p = solve_parametrized(&s, &config).unwrap();
        assert_eq!(p.num_free_variables(), 1);
        for t in [-1.0, 2.0] {
            let point = p.point_at(&[t]).unwrap();
            for eq in s.equations() {
                assert!(eq.satisfied_by(point.view(), 1e-9));
            }
        }
    }

    #[test]
    fn test_point_at_checks_parameter_count() {
        let p = Parametrization {
            basepoint: array![1.0_f64, 0.0],
            direction_vectors: vec![array![-1.0, 1.0]],
        };
        assert_vec_eq(&p.point_at(&[2.0]).unwrap(), &array![-1.0, 2.0]);
        assert!(matches!(
            p.point_at(&[]),
            Err(LinearSystemError::DimensionMismatch {
                expected: 1,
                got: 0
            })
        ));
    }

    #[test]
    fn test_check_consistent_ignores_zero_rows() {
        let s = system(&[(&[1.0, 0.0], 1.0), (&[0.0, 0.0], 1e-12)]);
        assert!(check_consistent(&s, 1e-10).is_ok());
        assert!(check_enough_pivots(&s, 1e-10).is_err());
    }

    #[test]
    fn test_display() {
        let p = Parametrization {
            basepoint: array![1.0_f64, 0.0],
            direction_vectors: vec![array![-1.0, 1.0]],
        };
        assert_eq!(
            p.to_string(),
            "Basepoint: [1, 0]\nDirection vector 1: [-1, 1]"
        );
    }
}
