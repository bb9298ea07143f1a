/*!
# Two-Phase Simplex

Handles general `<=` / `=` / `>=` constraint mixes. Rows with a negative right-hand
side are first negated (flipping their relation), then the matrix is augmented with a
slack per `<=` row, a surplus per `>=` row, and one artificial variable per `>=`/`=`
row. Phase 1 minimizes the artificial sum: a positive optimum proves infeasibility.
Otherwise the artificial columns are dropped: degenerate basic artificials are pivoted
out on any usable non-artificial column, and a row is deleted outright when no such
column exists, since phase-1 optimality at level zero then shows the constraint is
implied by the others (redundant rather than a hidden infeasibility).
Phase 2 re-prices the true objective over the surviving basis and pivots to optimality.

Problems that are already in standard form never enter the machinery at all; they are
delegated to the standard solver and flagged with `used_standard`.
*/

use log::debug;

use super::standard;
use super::tableau::{PivotRun, Tableau};
use super::{IterationCount, LpError, LpProblem, LpSolution, Relation, SimplexSolver, SolveStatus};

pub(crate) fn solve(solver: &SimplexSolver, problem: &LpProblem) -> Result<LpSolution, LpError> {
    if problem.is_standard_form() {
        debug!("two-phase: input is in standard form, delegating");
        let mut solution = standard::solve(solver, problem)?;
        solution.used_standard = true;
        return Ok(solution);
    }

    let eps = solver.tolerance();
    let n = problem.num_variables();
    let m = problem.num_constraints();

    // normalize: non-negative right-hand sides, relations flipped accordingly
    let mut rows = problem.rows().to_vec();
    let mut rhs = problem.rhs().to_vec();
    let mut relations = problem.relations().to_vec();
    for i in 0..m {
        if rhs[i] < 0.0 {
            rows[i].iter_mut().for_each(|a| *a = -*a);
            rhs[i] = -rhs[i];
            relations[i] = match relations[i] {
                Relation::Le => Relation::Ge,
                Relation::Ge => Relation::Le,
                Relation::Eq => Relation::Eq,
            };
        }
    }

    // column layout: [original | slack | surplus | artificial | rhs]
    let num_slack = relations.iter().filter(|&&r| r == Relation::Le).count();
    let num_surplus = relations.iter().filter(|&&r| r == Relation::Ge).count();
    let num_artificial = relations.iter().filter(|&&r| r != Relation::Le).count();
    let artificial_start = n + num_slack + num_surplus;
    let cols = artificial_start + num_artificial;

    let mut augmented = Vec::with_capacity(m);
    let mut basis = Vec::with_capacity(m);
    let mut slack_idx = n;
    let mut surplus_idx = n + num_slack;
    let mut artificial_idx = artificial_start;

    for i in 0..m {
        let mut row = vec![0.0; cols + 1];
        row[..n].copy_from_slice(&rows[i]);
        row[cols] = rhs[i];

        match relations[i] {
            Relation::Le => {
                row[slack_idx] = 1.0;
                basis.push(slack_idx);
                slack_idx += 1;
            }
            Relation::Ge => {
                row[surplus_idx] = -1.0;
                row[artificial_idx] = 1.0;
                basis.push(artificial_idx);
                surplus_idx += 1;
                artificial_idx += 1;
            }
            Relation::Eq => {
                row[artificial_idx] = 1.0;
                basis.push(artificial_idx);
                artificial_idx += 1;
            }
        }
        augmented.push(row);
    }

    // phase-2 objective over the augmented (artificial-free) columns
    let phase2_objective = |width: usize| {
        let mut c = vec![0.0; width + 1];
        c[..n].copy_from_slice(&problem.internal_objective());
        c
    };

    if num_artificial == 0 {
        // row normalization turned everything into <=: a single ordinary phase
        let mut tableau = Tableau::from_parts(augmented, phase2_objective(cols), basis);
        let run = tableau.run(eps, solver.iteration_limit());
        return Ok(finish(solver, problem, run, &tableau, 0));
    }

    // phase 1: minimize the artificial sum
    let mut phase1_objective = vec![0.0; cols + 1];
    for col in artificial_start..cols {
        phase1_objective[col] = 1.0;
    }

    let mut tableau = Tableau::from_parts(augmented, phase1_objective, basis);
    tableau.price_out_basis(eps);

    let phase_one = match tableau.run(eps, solver.iteration_limit()) {
        PivotRun::Optimal { iterations } => iterations,
        PivotRun::Unbounded { iterations } => {
            // the artificial sum is bounded below by zero; only numerical breakdown
            // lands here
            debug!("two-phase: phase 1 reported unbounded after {iterations} pivots");
            return Ok(LpSolution::failed(
                SolveStatus::Infeasible,
                IterationCount {
                    phase_one: iterations,
                    phase_two: 0,
                },
            ));
        }
        PivotRun::IterationLimit => {
            return Ok(LpSolution::failed(
                SolveStatus::IterationLimit,
                IterationCount {
                    phase_one: solver.iteration_limit(),
                    phase_two: 0,
                },
            ));
        }
    };

    let artificial_sum = -tableau.negated_objective_value();
    if artificial_sum.abs() > eps {
        debug!("two-phase: infeasible, artificial sum {artificial_sum} after {phase_one} pivots");
        return Ok(LpSolution::failed(
            SolveStatus::Infeasible,
            IterationCount {
                phase_one,
                phase_two: 0,
            },
        ));
    }

    // transition: pivot degenerate basic artificials out, drop redundant rows
    let mut row = 0;
    while row < tableau.num_rows() {
        if tableau.basis[row] >= artificial_start {
            let replacement = (0..artificial_start)
                .find(|&col| tableau.rows[row][col].abs() > eps);
            match replacement {
                Some(col) => {
                    debug!("two-phase: pivoting artificial out of row {row} via column {col}");
                    tableau.pivot(row, col, eps);
                }
                None => {
                    debug!("two-phase: dropping redundant row {row}");
                    tableau.remove_row(row);
                    continue;
                }
            }
        }
        row += 1;
    }

    // drop the artificial columns and install the true objective
    let rows2: Vec<Vec<f64>> = tableau
        .rows
        .iter()
        .map(|r| {
            let mut trimmed = r[..artificial_start].to_vec();
            trimmed.push(r[cols]);
            trimmed
        })
        .collect();

    let mut tableau = Tableau::from_parts(rows2, phase2_objective(artificial_start), tableau.basis.clone());
    tableau.price_out_basis(eps);

    let run = tableau.run(eps, solver.iteration_limit());
    Ok(finish(solver, problem, run, &tableau, phase_one))
}

fn finish(
    solver: &SimplexSolver,
    problem: &LpProblem,
    run: PivotRun,
    tableau: &Tableau,
    phase_one: usize,
) -> LpSolution {
    match run {
        PivotRun::Optimal { iterations } => LpSolution {
            status: SolveStatus::Optimal,
            objective: Some(problem.external_value(-tableau.negated_objective_value())),
            variables: Some(tableau.basic_solution(problem.num_variables())),
            iterations: IterationCount {
                phase_one,
                phase_two: iterations,
            },
            used_standard: false,
        },
        PivotRun::Unbounded { iterations } => LpSolution::failed(
            SolveStatus::Unbounded,
            IterationCount {
                phase_one,
                phase_two: iterations,
            },
        ),
        PivotRun::IterationLimit => LpSolution::failed(
            SolveStatus::IterationLimit,
            IterationCount {
                phase_one,
                phase_two: solver.iteration_limit(),
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::super::Direction;
    use super::*;

    fn solver() -> SimplexSolver {
        SimplexSolver::new()
    }

    #[test]
    fn standard_form_input_takes_the_fast_path() {
        let problem = LpProblem::with_le_rows(
            Direction::Maximize,
            vec![3.0, 2.0],
            vec![vec![1.0, 1.0], vec![2.0, 1.0], vec![-1.0, 2.0]],
            vec![4.0, 5.0, 2.0],
        )
        .unwrap();

        let solution = solver().solve_two_phase(&problem).unwrap();
        assert!(solution.used_standard);
        assert_eq!(solution.iterations.phase_one, 0);
        assert!((solution.objective.unwrap() - 8.4).abs() < 1e-9);
    }

    #[test]
    fn handles_ge_constraints() {
        // minimize 2x + 3y  s.t.  x + y >= 4, x <= 3, y <= 3  (optimum 9 at (3, 1))
        let problem = LpProblem::new(
            Direction::Minimize,
            vec![2.0, 3.0],
            vec![vec![1.0, 1.0], vec![1.0, 0.0], vec![0.0, 1.0]],
            vec![Relation::Ge, Relation::Le, Relation::Le],
            vec![4.0, 3.0, 3.0],
        )
        .unwrap();

        let solution = solver().solve_two_phase(&problem).unwrap();
        assert_eq!(solution.status, SolveStatus::Optimal);
        assert!(!solution.used_standard);
        assert!(solution.iterations.phase_one > 0);

        let value = solution.objective.unwrap();
        assert!((value - 9.0).abs() < 1e-9, "value {value}");
        let x = solution.variables.unwrap();
        assert!((x[0] - 3.0).abs() < 1e-9 && (x[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn handles_equality_constraints() {
        // maximize x + 2y  s.t.  x + y = 3, x <= 2  (optimum at (0, 3): 6)
        let problem = LpProblem::new(
            Direction::Maximize,
            vec![1.0, 2.0],
            vec![vec![1.0, 1.0], vec![1.0, 0.0]],
            vec![Relation::Eq, Relation::Le],
            vec![3.0, 2.0],
        )
        .unwrap();

        let solution = solver().solve_two_phase(&problem).unwrap();
        assert_eq!(solution.status, SolveStatus::Optimal);
        assert!((solution.objective.unwrap() - 6.0).abs() < 1e-9);

        let x = solution.variables.unwrap();
        assert!(x[0].abs() < 1e-9 && (x[1] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn detects_infeasibility() {
        // x <= 1 and x >= 3 cannot both hold
        let problem = LpProblem::new(
            Direction::Maximize,
            vec![1.0],
            vec![vec![1.0], vec![1.0]],
            vec![Relation::Le, Relation::Ge],
            vec![1.0, 3.0],
        )
        .unwrap();

        let solution = solver().solve_two_phase(&problem).unwrap();
        assert_eq!(solution.status, SolveStatus::Infeasible);
        assert_eq!(solution.objective, None);
        assert!(solution.iterations.phase_one > 0);
        assert_eq!(solution.iterations.phase_two, 0);
    }

    #[test]
    fn negative_rhs_rows_are_normalized() {
        // -x <= -2 is x >= 2; with x <= 5 and max x the optimum is 5
        let problem = LpProblem::with_le_rows(
            Direction::Maximize,
            vec![1.0],
            vec![vec![-1.0], vec![1.0]],
            vec![-2.0, 5.0],
        )
        .unwrap();

        let solution = solver().solve_two_phase(&problem).unwrap();
        assert_eq!(solution.status, SolveStatus::Optimal);
        assert!((solution.objective.unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn redundant_equality_rows_are_dropped() {
        // the duplicated equality keeps one artificial basic at level zero
        let problem = LpProblem::new(
            Direction::Maximize,
            vec![1.0, 1.0],
            vec![vec![1.0, 1.0], vec![1.0, 1.0]],
            vec![Relation::Eq, Relation::Eq],
            vec![2.0, 2.0],
        )
        .unwrap();

        let solution = solver().solve_two_phase(&problem).unwrap();
        assert_eq!(solution.status, SolveStatus::Optimal);
        assert!((solution.objective.unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn agrees_with_the_standard_solver_on_shared_inputs() {
        // same region expressed with a redundant >= 0 row, defeating the fast path
        let le_only = LpProblem::with_le_rows(
            Direction::Maximize,
            vec![3.0, 2.0],
            vec![vec![1.0, 1.0], vec![2.0, 1.0], vec![-1.0, 2.0]],
            vec![4.0, 5.0, 2.0],
        )
        .unwrap();
        let with_ge = LpProblem::new(
            Direction::Maximize,
            vec![3.0, 2.0],
            vec![
                vec![1.0, 1.0],
                vec![2.0, 1.0],
                vec![-1.0, 2.0],
                vec![1.0, 0.0],
            ],
            vec![Relation::Le, Relation::Le, Relation::Le, Relation::Ge],
            vec![4.0, 5.0, 2.0, 0.0],
        )
        .unwrap();

        let a = solver().solve_standard(&le_only).unwrap();
        let b = solver().solve_two_phase(&with_ge).unwrap();
        assert_eq!(a.status, SolveStatus::Optimal);
        assert_eq!(b.status, SolveStatus::Optimal);
        assert!((a.objective.unwrap() - b.objective.unwrap()).abs() < 1e-9);
    }
}
