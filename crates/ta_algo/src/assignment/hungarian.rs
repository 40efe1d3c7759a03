//! Hungarian method (shortest augmenting paths with row/column potentials).
//!
//! Minimizes `Σ cost[i][row_to_col[i]]` over all bijections of an `n × n`
//! matrix in O(n³). The final potentials form a feasible dual whose value
//! equals the primal cost; `verify_optimal` re-checks that certificate so a
//! non-optimal matching can never leave this module.

use super::SolveError;

const INF: i64 = i64::MAX / 4;

/// Dense square cost matrix, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostMatrix {
    n: usize,
    cells: Vec<i64>,
}

impl CostMatrix {
    /// All-zero `n × n` matrix.
    pub fn zeros(n: usize) -> Self {
        Self { n, cells: vec![0; n * n] }
    }

    /// From rows; every row must have `rows.len()` entries.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, SolveError> {
        let n = rows.len();
        let mut cells = Vec::with_capacity(n * n);
        for r in rows {
            if r.len() != n {
                return Err(SolveError::NotSquare { rows: n, cols: r.len() });
            }
            cells.extend_from_slice(r);
        }
        Ok(Self { n, cells })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.cells[row * self.n + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cost: i64) {
        self.cells[row * self.n + col] = cost;
    }
}

/// Optimal matching plus its dual certificate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matching {
    pub row_to_col: Vec<usize>,
    pub total_cost: i64,
    row_potential: Vec<i64>,
    col_potential: Vec<i64>,
}

/// Minimum-cost perfect matching.
pub fn min_cost_matching(cost: &CostMatrix) -> Result<Matching, SolveError> {
    let n = cost.size();
    // 1-based internally; index 0 is the virtual source row/column.
    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; n + 1];
    let mut col_owner = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for row in 1..=n {
        col_owner[0] = row;
        let mut j0 = 0usize;
        let mut minv = vec![INF; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[j0] = true;
            let i0 = col_owner[j0];
            let mut delta = INF;
            let mut j1 = 0usize;
            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let reduced = cost.get(i0 - 1, j - 1) - u[i0] - v[j];
                if reduced < minv[j] {
                    minv[j] = reduced;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }
            if j1 == 0 {
                return Err(SolveError::NotOptimal("no augmenting path"));
            }
            for j in 0..=n {
                if used[j] {
                    u[col_owner[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }
            j0 = j1;
            if col_owner[j0] == 0 {
                break;
            }
        }

        // Flip the augmenting path back to the source.
        loop {
            let j1 = way[j0];
            col_owner[j0] = col_owner[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut row_to_col = vec![usize::MAX; n];
    for j in 1..=n {
        let i = col_owner[j];
        if i == 0 {
            return Err(SolveError::NotOptimal("column left unmatched"));
        }
        row_to_col[i - 1] = j - 1;
    }
    let total_cost = row_to_col
        .iter()
        .enumerate()
        .map(|(i, &j)| cost.get(i, j))
        .sum();

    let m = Matching {
        row_to_col,
        total_cost,
        row_potential: u[1..].to_vec(),
        col_potential: v[1..].to_vec(),
    };
    verify_optimal(cost, &m)?;
    Ok(m)
}

/// Check the matching is a bijection and the potentials certify optimality:
/// `u[i] + v[j] <= cost[i][j]` everywhere and `Σu + Σv == total_cost`.
pub fn verify_optimal(cost: &CostMatrix, m: &Matching) -> Result<(), SolveError> {
    let n = cost.size();
    if m.row_to_col.len() != n {
        return Err(SolveError::NotOptimal("matching is incomplete"));
    }
    let mut seen = vec![false; n];
    for &j in &m.row_to_col {
        if j >= n || seen[j] {
            return Err(SolveError::NotOptimal("matching is not a bijection"));
        }
        seen[j] = true;
    }
    for i in 0..n {
        for j in 0..n {
            if m.row_potential[i] + m.col_potential[j] > cost.get(i, j) {
                return Err(SolveError::NotOptimal("dual infeasible"));
            }
        }
    }
    let dual: i64 = m.row_potential.iter().sum::<i64>() + m.col_potential.iter().sum::<i64>();
    if dual != m.total_cost {
        return Err(SolveError::NotOptimal("duality gap"));
    }
    Ok(())
}
