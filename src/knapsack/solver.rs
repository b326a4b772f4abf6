//! Dynamic-programming 0/1 knapsack over a single criterion.
//!
//! # Algorithm
//!
//! `dp[i][w]` is the best criterion sum reachable with the first `i`
//! projects and capacity `w`:
//!
//! ```text
//! dp[i][w] = dp[i-1][w]                                   if cost_i > w
//!          = max(dp[i-1][w], dp[i-1][w - cost_i] + v_i)   otherwise
//! ```
//!
//! The selection is reconstructed backward from `dp[n][budget]`. Whenever
//! including project `i` reproduces the table value, it is included, even
//! if excluding it would too. That bias makes the chosen optimum
//! reproducible when several optima exist.
//!
//! Time and space are `O(n * budget)`.

use tracing::debug;

use crate::error::{check_budget, PortfolioError, Result};
use crate::model::{Combination, Criterion, ProjectSet};

/// Default largest budget the drivers hand to the knapsack solver.
pub const DEFAULT_MAX_BUDGET: i64 = 100_000;

/// Rejects budgets whose DP table would be too wide.
///
/// # Errors
///
/// [`PortfolioError::NegativeBudget`] if `budget < 0`,
/// [`PortfolioError::BudgetTooLarge`] if `budget > limit`.
pub fn ensure_budget(budget: i64, limit: i64) -> Result<()> {
    check_budget(budget)?;
    if budget > limit {
        return Err(PortfolioError::BudgetTooLarge { budget, limit });
    }
    Ok(())
}

/// Row-major `(n + 1) x (budget + 1)` DP table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DpTable {
    width: usize,
    cells: Vec<i64>,
}

impl DpTable {
    /// `None` if `rows * width` does not fit in `usize`.
    fn new(rows: usize, width: usize) -> Option<Self> {
        let len = rows.checked_mul(width)?;
        Some(Self {
            width,
            cells: vec![0; len],
        })
    }

    /// Number of rows (`n + 1`).
    pub fn rows(&self) -> usize {
        self.cells.len() / self.width
    }

    /// Number of columns (`budget + 1`).
    pub fn columns(&self) -> usize {
        self.width
    }

    /// Value of cell `(item, capacity)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the table.
    pub fn get(&self, item: usize, capacity: usize) -> i64 {
        assert!(capacity < self.width, "capacity {capacity} out of range");
        self.cells[item * self.width + capacity]
    }

    fn set(&mut self, item: usize, capacity: usize, value: i64) {
        self.cells[item * self.width + capacity] = value;
    }

    /// Row `item` of the table (first `item` projects, every capacity).
    pub fn row(&self, item: usize) -> &[i64] {
        &self.cells[item * self.width..(item + 1) * self.width]
    }

    /// The table as nested rows, for display or export.
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.cells.chunks(self.width).map(<[i64]>::to_vec).collect()
    }
}

/// Outcome of a single-criterion knapsack solve.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackResult {
    /// Criterion that was maximized.
    pub criterion: Criterion,
    /// Reconstructed optimal selection.
    pub selection: Combination,
    /// `dp[n][budget]`.
    pub optimal_value: i64,
    /// Full DP table.
    pub table: DpTable,
    /// Cells `(item, remaining capacity)` visited by the reconstruction,
    /// from item 1 up to item n. Illustrative only. No `(0, 0)` origin
    /// cell is included; charts that start the path at the table origin
    /// must prepend it.
    pub path: Vec<(usize, usize)>,
}

impl KnapsackResult {
    /// Total cost of the selection.
    pub fn cost(&self, projects: &ProjectSet) -> i64 {
        self.selection.cost(projects)
    }
}

/// 0/1 knapsack solver.
pub struct KnapsackSolver;

impl KnapsackSolver {
    /// Maximizes `criterion` subject to total cost `<= budget`.
    ///
    /// # Errors
    ///
    /// [`PortfolioError::NegativeBudget`] if `budget < 0`,
    /// [`PortfolioError::BudgetTooLarge`] if the table size overflows
    /// `usize`. Callers bound the budget with [`ensure_budget`] first; a
    /// large table that still fits `usize` may fail to allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_portfolio::knapsack::KnapsackSolver;
    /// use u_portfolio::model::{sample_projects, Criterion};
    ///
    /// let projects = sample_projects();
    /// let result = KnapsackSolver::solve(&projects, 6, Criterion::Profit).unwrap();
    /// assert_eq!(result.optimal_value, 90);
    /// assert_eq!(result.selection.labels(), "x2, x3, x4");
    /// ```
    pub fn solve(projects: &ProjectSet, budget: i64, criterion: Criterion) -> Result<KnapsackResult> {
        let capacity = check_budget(budget)?;
        let n = projects.len();
        let mut table = capacity
            .checked_add(1)
            .and_then(|width| DpTable::new(n + 1, width))
            .ok_or(PortfolioError::BudgetTooLarge {
                budget,
                limit: (usize::MAX / (n + 1)).saturating_sub(1).min(i64::MAX as usize) as i64,
            })?;

        for (idx, project) in projects.iter().enumerate() {
            let i = idx + 1;
            let cost = project.cost() as usize;
            let value = project.value(criterion);
            for w in 0..=capacity {
                let skip = table.get(i - 1, w);
                let best = if cost <= w {
                    skip.max(table.get(i - 1, w - cost) + value)
                } else {
                    skip
                };
                table.set(i, w, best);
            }
        }

        let mut selection = Combination::empty(n);
        let mut path = Vec::with_capacity(n);
        let mut w = capacity;
        for i in (1..=n).rev() {
            let project = &projects.as_slice()[i - 1];
            let cost = project.cost() as usize;
            path.push((i, w));
            if w >= cost && table.get(i, w) == table.get(i - 1, w - cost) + project.value(criterion) {
                selection.set(i - 1, true);
                w -= cost;
            }
        }
        path.reverse();

        let optimal_value = table.get(n, capacity);
        debug!(
            n,
            budget,
            %criterion,
            optimal_value,
            selection = %selection,
            "knapsack solved"
        );

        Ok(KnapsackResult {
            criterion,
            selection,
            optimal_value,
            table,
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::CombinationEnumerator;
    use crate::model::{sample_projects, Project, RandomPortfolio, MAX_PROJECT_VALUE};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_profit() {
        let projects = sample_projects();
        let r = KnapsackSolver::solve(&projects, 6, Criterion::Profit).unwrap();
        // x1+x2+x3 and x2+x3+x4 both reach 90 at cost 6; inclusion bias
        // keeps x4, the first project the reconstruction looks at.
        assert_eq!(r.optimal_value, 90);
        assert_eq!(r.selection, Combination::from_indices(4, &[1, 2, 3]));
        assert_eq!(r.cost(&projects), 6);
        assert_eq!(r.table.rows(), 5);
        assert_eq!(r.table.columns(), 7);
    }

    #[test]
    fn test_largest_values_do_not_overflow() {
        let m = MAX_PROJECT_VALUE;
        let projects = ProjectSet::from_triples(&[(1, m, m), (1, m, m), (2, m, 0)]).unwrap();
        let r = KnapsackSolver::solve(&projects, 2, Criterion::Profit).unwrap();
        assert_eq!(r.optimal_value, 2 * m);
        assert_eq!(r.selection.labels(), "x1, x2");
    }

    #[test]
    fn test_table_size_overflow_is_an_error() {
        let err = KnapsackSolver::solve(&sample_projects(), i64::MAX, Criterion::Profit)
            .unwrap_err();
        assert!(matches!(
            err,
            PortfolioError::BudgetTooLarge { budget: i64::MAX, .. }
        ));
    }

    #[test]
    fn test_ensure_budget() {
        assert!(ensure_budget(0, DEFAULT_MAX_BUDGET).is_ok());
        assert!(ensure_budget(DEFAULT_MAX_BUDGET, DEFAULT_MAX_BUDGET).is_ok());
        assert_eq!(
            ensure_budget(DEFAULT_MAX_BUDGET + 1, DEFAULT_MAX_BUDGET),
            Err(PortfolioError::BudgetTooLarge {
                budget: DEFAULT_MAX_BUDGET + 1,
                limit: DEFAULT_MAX_BUDGET,
            })
        );
        assert_eq!(
            ensure_budget(-1, DEFAULT_MAX_BUDGET),
            Err(PortfolioError::NegativeBudget(-1))
        );
    }

    #[test]
    fn test_sample_expert() {
        let projects = sample_projects();
        let r = KnapsackSolver::solve(&projects, 6, Criterion::ExpertScore).unwrap();
        // x1 + x2 + x4: cost 5, score 12
        assert_eq!(r.optimal_value, 12);
        assert_eq!(r.selection.labels(), "x1, x2, x4");
    }

    #[test]
    fn test_zero_budget() {
        let projects = sample_projects();
        for criterion in Criterion::ALL {
            let r = KnapsackSolver::solve(&projects, 0, criterion).unwrap();
            assert_eq!(r.optimal_value, 0);
            assert_eq!(r.selection, Combination::empty(4));
            assert_eq!(r.table.columns(), 1);
        }
    }

    #[test]
    fn test_all_items_too_expensive() {
        let projects = ProjectSet::from_triples(&[(5, 10, 1), (7, 20, 2)]).unwrap();
        let r = KnapsackSolver::solve(&projects, 4, Criterion::Profit).unwrap();
        assert_eq!(r.optimal_value, 0);
        assert_eq!(r.selection.selected_count(), 0);
    }

    #[test]
    fn test_negative_budget() {
        let err = KnapsackSolver::solve(&sample_projects(), -1, Criterion::Profit).unwrap_err();
        assert_eq!(err, PortfolioError::NegativeBudget(-1));
    }

    #[test]
    fn test_empty_project_set() {
        let r = KnapsackSolver::solve(&ProjectSet::default(), 5, Criterion::Profit).unwrap();
        assert_eq!(r.optimal_value, 0);
        assert!(r.selection.is_empty());
        assert!(r.path.is_empty());
        assert_eq!(r.table.to_rows(), vec![vec![0; 6]]);
    }

    #[test]
    fn test_tie_prefers_inclusion() {
        // Either project alone reaches 10; reconstruction walks from the
        // last project and includes it first.
        let projects = ProjectSet::from_triples(&[(3, 10, 0), (3, 10, 0)]).unwrap();
        let r = KnapsackSolver::solve(&projects, 3, Criterion::Profit).unwrap();
        assert_eq!(r.optimal_value, 10);
        assert_eq!(r.selection.labels(), "x2");
    }

    #[test]
    fn test_zero_value_item_included_on_tie() {
        let projects = ProjectSet::from_triples(&[(1, 5, 0), (1, 0, 0)]).unwrap();
        let r = KnapsackSolver::solve(&projects, 2, Criterion::Profit).unwrap();
        assert_eq!(r.optimal_value, 5);
        assert_eq!(r.selection.labels(), "x1, x2");
    }

    #[test]
    fn test_path_visits_every_item() {
        let projects = sample_projects();
        let r = KnapsackSolver::solve(&projects, 6, Criterion::Profit).unwrap();
        let items: Vec<usize> = r.path.iter().map(|&(i, _)| i).collect();
        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(r.path, vec![(1, 0), (2, 1), (3, 4), (4, 6)]);
    }

    #[test]
    fn test_table_rows_are_monotone_in_capacity() {
        let (projects, budget) = RandomPortfolio::default()
            .generate(8, &mut StdRng::seed_from_u64(3))
            .unwrap();
        let r = KnapsackSolver::solve(&projects, budget, Criterion::Profit).unwrap();
        for row in r.table.to_rows() {
            assert!(row.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force(
            rows in prop::collection::vec((1i64..8, 0i64..50, 0i64..10), 0..10),
            budget in 0i64..25,
        ) {
            let projects = ProjectSet::new(
                rows.iter().map(|&(c, p, e)| Project::new(c, p, e).unwrap()).collect(),
            );
            let all = CombinationEnumerator::enumerate(&projects, budget).unwrap();
            for criterion in Criterion::ALL {
                let r = KnapsackSolver::solve(&projects, budget, criterion).unwrap();
                let brute = all.iter().map(|c| c.total(criterion)).max().unwrap_or(0);
                prop_assert_eq!(r.optimal_value, brute);
                prop_assert!(r.selection.cost(&projects) <= budget);
                prop_assert_eq!(r.selection.total(&projects, criterion), r.optimal_value);
            }
        }
    }
}
