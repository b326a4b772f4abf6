//! Exhaustive enumeration of budget-feasible project subsets.

use tracing::debug;

use crate::error::{check_budget, PortfolioError, Result};
use crate::model::{Combination, Criterion, ProjectSet};

/// Project count above which exhaustive enumeration is refused by the
/// analysis drivers. Enumeration yields up to `2^n` combinations.
pub const DEFAULT_MAX_PROJECTS: usize = 24;

/// Rejects inputs too large to enumerate.
///
/// # Errors
///
/// [`PortfolioError::TooManyProjects`] if `projects > limit`.
pub fn ensure_enumerable(projects: usize, limit: usize) -> Result<()> {
    if projects > limit {
        return Err(PortfolioError::TooManyProjects { projects, limit });
    }
    Ok(())
}

/// A feasible combination together with its totals.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumeratedCombination {
    pub combination: Combination,
    pub cost: i64,
    pub profit: i64,
    pub expert_score: i64,
}

impl EnumeratedCombination {
    /// Total of the given criterion.
    pub fn total(&self, criterion: Criterion) -> i64 {
        match criterion {
            Criterion::Profit => self.profit,
            Criterion::ExpertScore => self.expert_score,
        }
    }
}

/// Pending node of the inclusion/exclusion search.
struct Frame {
    index: usize,
    bits: Vec<bool>,
    cost: i64,
    profit: i64,
    expert_score: i64,
}

/// Inclusion/exclusion backtracking enumerator.
pub struct CombinationEnumerator;

impl CombinationEnumerator {
    /// Enumerates every combination with total cost `<= budget`.
    ///
    /// Projects are decided in input order, exclusion before inclusion,
    /// and a branch is cut only when including a project would exceed the
    /// budget. The output order is therefore canonical: the empty
    /// combination comes first, and ties elsewhere are resolved against
    /// this order.
    ///
    /// The result has up to `2^n` entries; callers should bound `n`
    /// (see [`ensure_enumerable`]).
    ///
    /// # Errors
    ///
    /// [`PortfolioError::NegativeBudget`] if `budget < 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_portfolio::enumerate::CombinationEnumerator;
    /// use u_portfolio::model::ProjectSet;
    ///
    /// let projects = ProjectSet::from_triples(&[(1, 5, 1), (2, 7, 3)]).unwrap();
    /// let all = CombinationEnumerator::enumerate(&projects, 2).unwrap();
    /// let labels: Vec<String> = all.iter().map(|c| c.combination.labels()).collect();
    /// assert_eq!(labels, vec!["None", "x2", "x1"]);
    /// ```
    pub fn enumerate(projects: &ProjectSet, budget: i64) -> Result<Vec<EnumeratedCombination>> {
        check_budget(budget)?;
        let items = projects.as_slice();
        let n = items.len();

        let mut out = Vec::new();
        let mut stack = vec![Frame {
            index: 0,
            bits: Vec::with_capacity(n),
            cost: 0,
            profit: 0,
            expert_score: 0,
        }];

        while let Some(frame) = stack.pop() {
            if frame.index == n {
                out.push(EnumeratedCombination {
                    combination: Combination::from_bits(frame.bits),
                    cost: frame.cost,
                    profit: frame.profit,
                    expert_score: frame.expert_score,
                });
                continue;
            }

            let project = &items[frame.index];
            // LIFO: push the inclusion branch first so exclusion is explored first.
            if frame.cost + project.cost() <= budget {
                let mut bits = frame.bits.clone();
                bits.push(true);
                stack.push(Frame {
                    index: frame.index + 1,
                    bits,
                    cost: frame.cost + project.cost(),
                    profit: frame.profit + project.profit(),
                    expert_score: frame.expert_score + project.expert_score(),
                });
            }
            let mut bits = frame.bits;
            bits.push(false);
            stack.push(Frame {
                index: frame.index + 1,
                bits,
                cost: frame.cost,
                profit: frame.profit,
                expert_score: frame.expert_score,
            });
        }

        debug!(n, budget, feasible = out.len(), "combinations enumerated");
        Ok(out)
    }
}
