/*!
# Standard Simplex

The tableau method for problems already in standard form: build `[A | I | b]` with the
slack identity block, start from the all-slack basis, and hand over to the shared pivot
engine. Anything else is rejected up front and belongs to the two-phase solver.
*/

use log::debug;

use super::tableau::{PivotRun, Tableau};
use super::{IterationCount, LpError, LpProblem, LpSolution, SimplexSolver, SolveStatus};

pub(crate) fn solve(solver: &SimplexSolver, problem: &LpProblem) -> Result<LpSolution, LpError> {
    problem.ensure_standard_form()?;

    let n = problem.num_variables();
    let m = problem.num_constraints();
    let cols = n + m;

    // constraint rows [A | I | b]
    let rows = problem
        .rows()
        .iter()
        .zip(problem.rhs())
        .enumerate()
        .map(|(i, (coeffs, &b))| {
            let mut row = vec![0.0; cols + 1];
            row[..n].copy_from_slice(coeffs);
            row[n + i] = 1.0;
            row[cols] = b;
            row
        })
        .collect();

    // objective row [c | 0 | 0] under the minimization convention
    let mut objective = vec![0.0; cols + 1];
    objective[..n].copy_from_slice(&problem.internal_objective());

    let mut tableau = Tableau::from_parts(rows, objective, (n..cols).collect());

    match tableau.run(solver.tolerance(), solver.iteration_limit()) {
        PivotRun::Optimal { iterations } => {
            debug!("standard simplex: optimal after {iterations} pivots");
            Ok(LpSolution {
                status: SolveStatus::Optimal,
                objective: Some(problem.external_value(-tableau.negated_objective_value())),
                variables: Some(tableau.basic_solution(n)),
                iterations: IterationCount::single_phase(iterations),
                used_standard: false,
            })
        }
        PivotRun::Unbounded { iterations } => Ok(LpSolution::failed(
            SolveStatus::Unbounded,
            IterationCount::single_phase(iterations),
        )),
        PivotRun::IterationLimit => Ok(LpSolution::failed(
            SolveStatus::IterationLimit,
            IterationCount::single_phase(solver.iteration_limit()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Direction, Relation};
    use super::*;

    fn solver() -> SimplexSolver {
        SimplexSolver::new()
    }

    /// maximize 3x1 + 2x2  s.t.  x1 + x2 <= 4, 2x1 + x2 <= 5, -x1 + 2x2 <= 2
    fn sample_max() -> LpProblem {
        LpProblem::with_le_rows(
            Direction::Maximize,
            vec![3.0, 2.0],
            vec![
                vec![1.0, 1.0],
                vec![2.0, 1.0],
                vec![-1.0, 2.0],
            ],
            vec![4.0, 5.0, 2.0],
        )
        .unwrap()
    }

    #[test]
    fn solves_the_sample_maximization() {
        let solution = solver().solve_standard(&sample_max()).unwrap();

        assert_eq!(solution.status, SolveStatus::Optimal);
        let value = solution.objective.unwrap();
        assert!((value - 8.4).abs() < 1e-9, "value {value}");

        let x = solution.variables.unwrap();
        assert!((x[0] - 1.6).abs() < 1e-9);
        assert!((x[1] - 1.8).abs() < 1e-9);

        assert_eq!(solution.iterations.phase_one, 0);
        assert!(solution.iterations.total() > 0);
    }

    #[test]
    fn solves_minimization_directly() {
        // minimize -(3x1 + 2x2) over the same region
        let problem = LpProblem::with_le_rows(
            Direction::Minimize,
            vec![-3.0, -2.0],
            vec![
                vec![1.0, 1.0],
                vec![2.0, 1.0],
                vec![-1.0, 2.0],
            ],
            vec![4.0, 5.0, 2.0],
        )
        .unwrap();

        let solution = solver().solve_standard(&problem).unwrap();
        assert_eq!(solution.status, SolveStatus::Optimal);
        assert!((solution.objective.unwrap() + 8.4).abs() < 1e-9);
    }

    #[test]
    fn detects_unboundedness() {
        // maximize x1, only bounded from below
        let problem = LpProblem::with_le_rows(
            Direction::Maximize,
            vec![1.0, 0.0],
            vec![vec![-1.0, 1.0]],
            vec![2.0],
        )
        .unwrap();

        let solution = solver().solve_standard(&problem).unwrap();
        assert_eq!(solution.status, SolveStatus::Unbounded);
        assert_eq!(solution.objective, None);
        assert_eq!(solution.variables, None);
    }

    #[test]
    fn zero_variables_stay_zero() {
        // x2 never profitable
        let problem = LpProblem::with_le_rows(
            Direction::Maximize,
            vec![1.0, -5.0],
            vec![vec![1.0, 1.0]],
            vec![3.0],
        )
        .unwrap();

        let solution = solver().solve_standard(&problem).unwrap();
        assert_eq!(solution.variables.unwrap(), vec![3.0, 0.0]);
        assert!((solution.objective.unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_standard_input() {
        let ge = LpProblem::new(
            Direction::Maximize,
            vec![1.0],
            vec![vec![1.0]],
            vec![Relation::Ge],
            vec![1.0],
        )
        .unwrap();
        assert_eq!(
            solver().solve_standard(&ge).unwrap_err(),
            LpError::NotStandardForm {
                reason: "not every constraint is <="
            }
        );

        let negative_rhs = LpProblem::with_le_rows(
            Direction::Maximize,
            vec![1.0],
            vec![vec![1.0]],
            vec![-1.0],
        )
        .unwrap();
        assert_eq!(
            solver().solve_standard(&negative_rhs).unwrap_err(),
            LpError::NotStandardForm {
                reason: "a right-hand side is negative"
            }
        );
    }

    #[test]
    fn iteration_cap_is_reported() {
        let solution = solver()
            .with_iteration_limit(1)
            .solve_standard(&sample_max())
            .unwrap();
        assert_eq!(solution.status, SolveStatus::IterationLimit);
        assert_eq!(solution.iterations.total(), 1);
    }
}
