/*!
# Tableau Pivot Engine

The dense simplex tableau shared by the standard and two-phase solvers. The engine
always *minimizes*; direction handling lives in the callers.

Layout: `m` constraint rows plus a separate objective row, each `num_columns + 1` wide
with the right-hand side in the last slot. The basis holds one column index per
constraint row.
*/

use log::trace;

/// Terminal state of a pivot loop. Iteration counts are completed pivots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PivotRun {
    Optimal { iterations: usize },
    Unbounded { iterations: usize },
    IterationLimit,
}

/// A dense simplex tableau under the minimization convention
pub(crate) struct Tableau {
    /// constraint rows, `num_columns + 1` wide (rhs last)
    pub(crate) rows: Vec<Vec<f64>>,
    /// objective row, same width; its rhs slot holds the negated objective value
    pub(crate) objective: Vec<f64>,
    /// basic column index per constraint row
    pub(crate) basis: Vec<usize>,
}

impl Tableau {
    pub(crate) fn from_parts(rows: Vec<Vec<f64>>, objective: Vec<f64>, basis: Vec<usize>) -> Self {
        debug_assert_eq!(rows.len(), basis.len());
        debug_assert!(rows.iter().all(|r| r.len() == objective.len()));
        Self {
            rows,
            objective,
            basis,
        }
    }

    pub(crate) fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn num_columns(&self) -> usize {
        self.objective.len() - 1
    }

    pub(crate) fn rhs(&self, row: usize) -> f64 {
        self.rows[row][self.num_columns()]
    }

    /// The current objective value, negated (the sign the elimination steps leave in
    /// the objective row's rhs slot)
    pub(crate) fn negated_objective_value(&self) -> f64 {
        self.objective[self.num_columns()]
    }

    /// Subtracts multiples of the constraint rows from the objective row until every
    /// basic column has coefficient zero, establishing the invariant the pivot loop
    /// maintains. Needed whenever a fresh objective row meets an existing basis.
    pub(crate) fn price_out_basis(&mut self, eps: f64) {
        for row in 0..self.num_rows() {
            let factor = self.objective[self.basis[row]];
            if factor.abs() > eps {
                for col in 0..self.objective.len() {
                    self.objective[col] -= factor * self.rows[row][col];
                }
            }
        }
    }

    /// Makes `col` basic in `row`: normalizes the pivot row and eliminates the pivot
    /// column from every other row, the objective row included.
    pub(crate) fn pivot(&mut self, row: usize, col: usize, eps: f64) {
        let p = self.rows[row][col];
        for x in self.rows[row].iter_mut() {
            *x /= p;
        }

        let (before, rest) = self.rows.split_at_mut(row);
        let (pivot_row, after) = rest.split_first_mut().unwrap();
        for other in before
            .iter_mut()
            .chain(after.iter_mut())
            .chain(std::iter::once(&mut self.objective))
        {
            let factor = other[col];
            if factor.abs() > eps {
                for (x, &pivot_entry) in other.iter_mut().zip(pivot_row.iter()) {
                    *x -= factor * pivot_entry;
                }
            }
        }

        self.basis[row] = col;
    }

    /// Removes a constraint row (and its basis entry), used when a redundant row is
    /// dropped during the two-phase transition
    pub(crate) fn remove_row(&mut self, row: usize) {
        self.rows.remove(row);
        self.basis.remove(row);
    }

    /// Runs the pivot loop to termination or to the iteration cap
    pub(crate) fn run(&mut self, eps: f64, limit: usize) -> PivotRun {
        let cols = self.num_columns();

        for iteration in 1..=limit {
            // entering variable: most negative reduced cost, first index on ties.
            // This is the classical (non-Bland) rule; it can cycle on degenerate
            // problems, which the iteration cap guards against.
            let mut entering = 0;
            for col in 1..cols {
                if self.objective[col] < self.objective[entering] {
                    entering = col;
                }
            }
            if self.objective[entering] >= -eps {
                return PivotRun::Optimal {
                    iterations: iteration - 1,
                };
            }

            // ratio test: smallest rhs / column entry over strictly positive entries,
            // first row on ties
            let mut leaving = None;
            let mut best = f64::INFINITY;
            for row in 0..self.num_rows() {
                let a = self.rows[row][entering];
                if a > eps {
                    let ratio = self.rhs(row) / a;
                    if ratio < best {
                        best = ratio;
                        leaving = Some(row);
                    }
                }
            }
            let Some(leaving) = leaving else {
                return PivotRun::Unbounded {
                    iterations: iteration - 1,
                };
            };

            trace!("pivot {iteration}: column {entering} enters, row {leaving} leaves");
            self.pivot(leaving, entering, eps);
        }

        PivotRun::IterationLimit
    }

    /// Reads the current basic solution, restricted to the first `take` columns
    pub(crate) fn basic_solution(&self, take: usize) -> Vec<f64> {
        let mut x = vec![0.0; take];
        for (row, &col) in self.basis.iter().enumerate() {
            if col < take {
                x[col] = self.rhs(row);
            }
        }
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// min -3x - 2y  s.t.  x + y <= 4, x <= 3  (optimum -11 at (3, 1))
    fn sample() -> Tableau {
        Tableau::from_parts(
            vec![
                vec![1.0, 1.0, 1.0, 0.0, 4.0],
                vec![1.0, 0.0, 0.0, 1.0, 3.0],
            ],
            vec![-3.0, -2.0, 0.0, 0.0, 0.0],
            vec![2, 3],
        )
    }

    #[test]
    fn pivots_to_the_optimum() {
        let mut t = sample();
        let run = t.run(1e-10, 100);

        assert!(matches!(run, PivotRun::Optimal { .. }));
        assert_eq!(t.basic_solution(2), vec![3.0, 1.0]);
        assert_eq!(-t.negated_objective_value(), -11.0);
    }

    #[test]
    fn detects_unbounded_columns() {
        // min -x with no binding constraint on x
        let mut t = Tableau::from_parts(
            vec![vec![-1.0, 1.0, 5.0]],
            vec![-1.0, 0.0, 0.0],
            vec![1],
        );
        assert_eq!(t.run(1e-10, 100), PivotRun::Unbounded { iterations: 0 });
    }

    #[test]
    fn honors_the_iteration_cap() {
        let mut t = sample();
        assert_eq!(t.run(1e-10, 1), PivotRun::IterationLimit);
    }

    #[test]
    fn price_out_clears_basic_columns() {
        let mut t = sample();
        t.run(1e-10, 100);

        // fresh objective row over the same basis
        t.objective = vec![1.0, 1.0, 0.0, 0.0, 0.0];
        t.price_out_basis(1e-10);
        for (row, &col) in t.basis.clone().iter().enumerate() {
            assert!(t.objective[col].abs() < 1e-9, "basic column {col} not priced out (row {row})");
        }
    }
}
