/*!
# Linear Programming

Simplex-family solvers for small dense linear programs:

- [`SimplexSolver::solve_standard`]: the tableau method for problems already in
  standard form (all constraints `<=`, all right-hand sides non-negative),
- [`SimplexSolver::solve_two_phase`]: general `<=`/`=`/`>=` constraints via artificial
  variables, delegating to the standard path when possible,
- [`SimplexSolver::solve_revised`]: the matrix form recomputing `B⁻¹` per iteration.

All solvers minimize internally; maximization problems are negated on the way in and
their objective value negated on the way out. Every numeric comparison runs against the
solver's single configurable tolerance, and a configurable iteration cap acts as the
circuit breaker against cycling: the entering rule is the classical most-negative
reduced cost, which is *not* cycle-proof on degenerate problems (Bland's rule would be,
at the price of more iterations; we keep the textbook rule and the cap).

Input validation is eager: shape errors are [`LpError`]s raised before any pivoting.
Everything that can only be discovered *during* the solve (infeasibility, unboundedness,
a singular basis, hitting the iteration cap) is a [`SolveStatus`] on the returned
[`LpSolution`]; callers branch on the status, never on panics.
*/

use thiserror::Error;

mod revised;
mod standard;
mod tableau;
mod two_phase;

use crate::DEFAULT_TOLERANCE;

/// Default pivot cap of the simplex solvers
pub const DEFAULT_ITERATION_LIMIT: usize = 1000;

/// Optimization direction of an [`LpProblem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Maximize,
    Minimize,
}

/// Relation of a single constraint row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    /// `<=`
    Le,
    /// `=`
    Eq,
    /// `>=`
    Ge,
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Relation::Le => "<=",
            Relation::Eq => "=",
            Relation::Ge => ">=",
        })
    }
}

/// Shape errors raised by eager input validation, before any pivoting happens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LpError {
    /// Two parts of the problem disagree on a dimension
    #[error("dimension mismatch: {what} has length {found}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// The chosen solver requires standard form (`<=` rows, `b >= 0`)
    #[error("problem is not in standard form ({reason}); use the two-phase solver")]
    NotStandardForm { reason: &'static str },
}

/// A dense linear program `opt c'x  s.t.  A x (<=|=|>=) b, x >= 0`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LpProblem {
    direction: Direction,
    objective: Vec<f64>,
    rows: Vec<Vec<f64>>,
    relations: Vec<Relation>,
    rhs: Vec<f64>,
}

impl LpProblem {
    /// Builds a problem and validates all dimensions eagerly
    pub fn new(
        direction: Direction,
        objective: Vec<f64>,
        rows: Vec<Vec<f64>>,
        relations: Vec<Relation>,
        rhs: Vec<f64>,
    ) -> Result<Self, LpError> {
        let n = objective.len();
        let m = rows.len();

        for row in &rows {
            if row.len() != n {
                return Err(LpError::DimensionMismatch {
                    what: "constraint row",
                    expected: n,
                    found: row.len(),
                });
            }
        }
        if relations.len() != m {
            return Err(LpError::DimensionMismatch {
                what: "relations",
                expected: m,
                found: relations.len(),
            });
        }
        if rhs.len() != m {
            return Err(LpError::DimensionMismatch {
                what: "right-hand side",
                expected: m,
                found: rhs.len(),
            });
        }

        Ok(Self {
            direction,
            objective,
            rows,
            relations,
            rhs,
        })
    }

    /// Builds a standard-form problem: every row constrained by `<=`
    pub fn with_le_rows(
        direction: Direction,
        objective: Vec<f64>,
        rows: Vec<Vec<f64>>,
        rhs: Vec<f64>,
    ) -> Result<Self, LpError> {
        let relations = vec![Relation::Le; rows.len()];
        Self::new(direction, objective, rows, relations, rhs)
    }

    /// Returns the number of decision variables
    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    /// Returns the number of constraint rows
    pub fn num_constraints(&self) -> usize {
        self.rows.len()
    }

    /// Returns the optimization direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the objective coefficient vector
    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    /// Returns the constraint matrix rows
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Returns the per-row relations
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Returns the right-hand-side vector
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// Returns *true* if every row is `<=` with a non-negative right-hand side, the
    /// precondition of the standard and revised solvers
    pub fn is_standard_form(&self) -> bool {
        self.relations.iter().all(|&r| r == Relation::Le) && self.rhs.iter().all(|&b| b >= 0.0)
    }

    pub(crate) fn ensure_standard_form(&self) -> Result<(), LpError> {
        if self.relations.iter().any(|&r| r != Relation::Le) {
            return Err(LpError::NotStandardForm {
                reason: "not every constraint is <=",
            });
        }
        if self.rhs.iter().any(|&b| b < 0.0) {
            return Err(LpError::NotStandardForm {
                reason: "a right-hand side is negative",
            });
        }
        Ok(())
    }

    /// Objective coefficients under the internal minimization convention
    pub(crate) fn internal_objective(&self) -> Vec<f64> {
        match self.direction {
            Direction::Minimize => self.objective.clone(),
            Direction::Maximize => self.objective.iter().map(|&c| -c).collect(),
        }
    }

    /// Translates an internal (minimization) objective value back to the caller's
    /// direction
    pub(crate) fn external_value(&self, internal: f64) -> f64 {
        match self.direction {
            Direction::Minimize => internal,
            Direction::Maximize => -internal,
        }
    }
}

/// Terminal state of a simplex run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    /// An optimal vertex was found
    Optimal,
    /// Phase 1 proved that no feasible point exists
    Infeasible,
    /// The objective is unbounded over the feasible region
    Unbounded,
    /// The pivot cap was hit, most likely due to degenerate cycling
    IterationLimit,
    /// The basis matrix of the revised method became numerically non-invertible
    SingularBasis,
}

/// Pivot counts of a solve, split by phase. Single-phase solvers report all work as
/// phase two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationCount {
    pub phase_one: usize,
    pub phase_two: usize,
}

impl IterationCount {
    pub(crate) fn single_phase(iterations: usize) -> Self {
        Self {
            phase_one: 0,
            phase_two: iterations,
        }
    }

    /// Returns the combined pivot count of both phases
    pub fn total(&self) -> usize {
        self.phase_one + self.phase_two
    }
}

/// Outcome of a solve: terminal status plus, for optimal solves, the optimum itself
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LpSolution {
    /// Terminal state of the run
    pub status: SolveStatus,
    /// Optimal objective value in the problem's own direction; `None` unless optimal
    pub objective: Option<f64>,
    /// Optimal assignment restricted to the original variables; `None` unless optimal
    pub variables: Option<Vec<f64>>,
    /// Pivot counts per phase
    pub iterations: IterationCount,
    /// *true* if a two-phase solve delegated to the standard fast path
    pub used_standard: bool,
}

impl LpSolution {
    pub(crate) fn failed(status: SolveStatus, iterations: IterationCount) -> Self {
        Self {
            status,
            objective: None,
            variables: None,
            iterations,
            used_standard: false,
        }
    }
}

/// Configuration of the simplex engines: one tolerance for every numeric comparison and
/// the pivot cap. Construct once, reuse for any number of solves.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimplexSolver {
    tolerance: f64,
    iteration_limit: usize,
}

impl Default for SimplexSolver {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            iteration_limit: DEFAULT_ITERATION_LIMIT,
        }
    }
}

impl SimplexSolver {
    /// Creates a solver with the default tolerance and iteration cap
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the absolute tolerance used by every comparison (reduced costs, ratio
    /// test, feasibility checks)
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the pivot cap per phase
    pub fn with_iteration_limit(mut self, iteration_limit: usize) -> Self {
        self.iteration_limit = iteration_limit;
        self
    }

    /// Returns the configured tolerance
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the configured pivot cap
    pub fn iteration_limit(&self) -> usize {
        self.iteration_limit
    }

    /// Solves a standard-form problem with the tableau method. Rejects problems that
    /// are not in standard form with [`LpError::NotStandardForm`].
    pub fn solve_standard(&self, problem: &LpProblem) -> Result<LpSolution, LpError> {
        standard::solve(self, problem)
    }

    /// Solves a general problem with the two-phase method, delegating to the standard
    /// solver when the problem already is in standard form.
    pub fn solve_two_phase(&self, problem: &LpProblem) -> Result<LpSolution, LpError> {
        two_phase::solve(self, problem)
    }

    /// Solves a standard-form problem with the revised (matrix-form) method. Rejects
    /// problems that are not in standard form with [`LpError::NotStandardForm`].
    pub fn solve_revised(&self, problem: &LpProblem) -> Result<LpSolution, LpError> {
        revised::solve(self, problem)
    }
}
