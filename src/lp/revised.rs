/*!
# Revised Simplex

The matrix form of the simplex method for standard-form problems: only the basis index
set is carried between iterations, and `B⁻¹` is recomputed from scratch by Gauss-Jordan
elimination every round. A product-form update would amortize that work, but at the
problem sizes this crate targets the explicit inverse is simpler and fast enough.

Pricing, ratio test, and termination mirror the tableau method; a basis matrix that
fails to invert is reported as [`SolveStatus::SingularBasis`]. That cannot arise from
exact pivoting, but numerical degeneracy can produce it.
*/

use log::{debug, trace};

use super::{IterationCount, LpError, LpProblem, LpSolution, SimplexSolver, SolveStatus};

/// Inverts a dense square matrix by Gauss-Jordan elimination with partial pivoting.
/// Returns `None` if a pivot below `eps` is the best available, i.e. the matrix is
/// (numerically) singular.
fn invert(mut a: Vec<Vec<f64>>, eps: f64) -> Option<Vec<Vec<f64>>> {
    let m = a.len();
    let mut inv: Vec<Vec<f64>> = (0..m)
        .map(|i| (0..m).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    for col in 0..m {
        let pivot_row = (col..m)
            .max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))?;
        if a[pivot_row][col].abs() <= eps {
            return None;
        }
        a.swap(col, pivot_row);
        inv.swap(col, pivot_row);

        let p = a[col][col];
        for j in 0..m {
            a[col][j] /= p;
            inv[col][j] /= p;
        }

        for row in 0..m {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor != 0.0 {
                for j in 0..m {
                    a[row][j] -= factor * a[col][j];
                    inv[row][j] -= factor * inv[col][j];
                }
            }
        }
    }

    Some(inv)
}

fn mat_vec(m: &[Vec<f64>], v: &[f64]) -> Vec<f64> {
    m.iter()
        .map(|row| row.iter().zip(v).map(|(a, b)| a * b).sum())
        .collect()
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub(crate) fn solve(solver: &SimplexSolver, problem: &LpProblem) -> Result<LpSolution, LpError> {
    problem.ensure_standard_form()?;

    let eps = solver.tolerance();
    let n = problem.num_variables();
    let m = problem.num_constraints();

    // implicit slack-extended matrix [A | I]; columns are materialized on demand
    let column = |j: usize| -> Vec<f64> {
        if j < n {
            problem.rows().iter().map(|row| row[j]).collect()
        } else {
            (0..m).map(|i| if i == j - n { 1.0 } else { 0.0 }).collect()
        }
    };

    let mut cost = problem.internal_objective();
    cost.resize(n + m, 0.0);

    let mut basis: Vec<usize> = (n..n + m).collect();
    let mut non_basis: Vec<usize> = (0..n).collect();

    for iteration in 1..=solver.iteration_limit() {
        let basis_columns: Vec<Vec<f64>> = basis.iter().map(|&j| column(j)).collect();
        let b_matrix: Vec<Vec<f64>> = (0..m)
            .map(|i| basis_columns.iter().map(|c| c[i]).collect())
            .collect();
        let Some(b_inv) = invert(b_matrix, eps) else {
            debug!("revised simplex: singular basis at iteration {iteration}");
            return Ok(LpSolution::failed(
                SolveStatus::SingularBasis,
                IterationCount::single_phase(iteration - 1),
            ));
        };

        let x_basic = mat_vec(&b_inv, problem.rhs());

        // simplex multipliers and pricing: reduced cost c_j - c_B B⁻¹ a_j
        let cost_basic: Vec<f64> = basis.iter().map(|&j| cost[j]).collect();
        let multipliers: Vec<f64> = (0..m)
            .map(|j| (0..m).map(|i| cost_basic[i] * b_inv[i][j]).sum())
            .collect();

        let mut entering_pos = None;
        let mut most_negative = -eps;
        for (pos, &j) in non_basis.iter().enumerate() {
            let reduced = cost[j] - dot(&multipliers, &column(j));
            if reduced < most_negative {
                most_negative = reduced;
                entering_pos = Some(pos);
            }
        }

        let Some(entering_pos) = entering_pos else {
            // optimal: assemble the full solution from the basic values
            let mut x = vec![0.0; n + m];
            for (i, &j) in basis.iter().enumerate() {
                x[j] = x_basic[i];
            }
            let internal = dot(&cost_basic, &x_basic);
            debug!("revised simplex: optimal after {} pivots", iteration - 1);
            return Ok(LpSolution {
                status: SolveStatus::Optimal,
                objective: Some(problem.external_value(internal)),
                variables: Some(x[..n].to_vec()),
                iterations: IterationCount::single_phase(iteration - 1),
                used_standard: false,
            });
        };

        let entering = non_basis[entering_pos];
        let direction = mat_vec(&b_inv, &column(entering));

        // ratio test over positive direction entries, first row on ties
        let mut leaving_pos = None;
        let mut best = f64::INFINITY;
        for (i, &d) in direction.iter().enumerate() {
            if d > eps {
                let ratio = x_basic[i] / d;
                if ratio < best {
                    best = ratio;
                    leaving_pos = Some(i);
                }
            }
        }
        let Some(leaving_pos) = leaving_pos else {
            return Ok(LpSolution::failed(
                SolveStatus::Unbounded,
                IterationCount::single_phase(iteration - 1),
            ));
        };

        trace!(
            "revised pivot {iteration}: column {entering} enters, column {} leaves",
            basis[leaving_pos]
        );
        non_basis[entering_pos] = basis[leaving_pos];
        basis[leaving_pos] = entering;
    }

    Ok(LpSolution::failed(
        SolveStatus::IterationLimit,
        IterationCount::single_phase(solver.iteration_limit()),
    ))
}
