//! Side-by-side comparison of the two methods' final answers.
//!
//! Differences are reported as `ideal point - sequential concessions`.
//! Relative differences are taken against the larger of the two values.

use crate::concession::ConcessionResult;
use crate::ideal_point::RankedSolution;
use crate::model::{Combination, Criterion};

/// Relative difference (percent) below which both answers count as close.
pub const CLOSE_THRESHOLD_PCT: f64 = 15.0;

/// Relative difference (percent) above which the answers diverge.
pub const DIVERGENT_THRESHOLD_PCT: f64 = 30.0;

/// How far apart the two recommendations are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Agreement {
    /// Both methods selected the same projects.
    Identical,
    /// Different projects, both criteria within [`CLOSE_THRESHOLD_PCT`].
    Close,
    /// Neither close nor divergent.
    Moderate,
    /// Some criterion differs by more than [`DIVERGENT_THRESHOLD_PCT`].
    Divergent,
}

/// One method's answer, reduced to the comparable metrics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodSummary {
    pub combination: Combination,
    pub selected: String,
    pub cost: i64,
    pub profit: i64,
    pub expert_score: i64,
    /// Cost as a percentage of the budget; 0 for a zero budget.
    pub budget_utilization: f64,
}

impl MethodSummary {
    fn new(combination: Combination, cost: i64, profit: i64, expert_score: i64, budget: i64) -> Self {
        Self {
            selected: combination.labels(),
            combination,
            cost,
            profit,
            expert_score,
            budget_utilization: percent_of(cost, budget),
        }
    }

    /// Summarizes an ideal-point recommendation.
    pub fn from_ranked(solution: &RankedSolution, budget: i64) -> Self {
        Self::new(
            solution.combination.clone(),
            solution.cost,
            solution.profit,
            solution.expert_score,
            budget,
        )
    }

    /// Summarizes the current answer of a concession session.
    pub fn from_concession(result: &ConcessionResult, budget: i64) -> Self {
        Self::new(
            result.solution.clone(),
            result.cost,
            result.value(Criterion::Profit),
            result.value(Criterion::ExpertScore),
            budget,
        )
    }

    pub fn value(&self, criterion: Criterion) -> i64 {
        match criterion {
            Criterion::Profit => self.profit,
            Criterion::ExpertScore => self.expert_score,
        }
    }
}

fn percent_of(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// `|a - b|` as a percentage of `max(a, b)`; 0 when both are 0.
fn relative_difference(a: i64, b: i64) -> f64 {
    percent_of((a - b).abs(), a.max(b))
}

/// Comparison of an ideal-point answer against a sequential-concessions answer.
///
/// # Examples
///
/// ```
/// use u_portfolio::compare::{Agreement, MethodComparison};
/// use u_portfolio::concession::{ConcessionConfig, SequentialConcessionEngine};
/// use u_portfolio::ideal_point::{IdealPointConfig, IdealPointMethod};
/// use u_portfolio::model::{sample_projects, Criterion};
///
/// let projects = sample_projects();
/// let analysis = IdealPointMethod::run(&projects, 6, &IdealPointConfig::default()).unwrap();
/// let state = SequentialConcessionEngine::initialize(
///     &projects, 6, Criterion::Profit, Criterion::ExpertScore, &ConcessionConfig::default(),
/// ).unwrap();
///
/// let cmp = MethodComparison::new(
///     analysis.best().unwrap(),
///     &SequentialConcessionEngine::current_result(&state),
///     6,
/// );
/// assert_eq!(cmp.agreement, Agreement::Identical);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodComparison {
    pub ideal_point: MethodSummary,
    pub sequential: MethodSummary,
    pub cost_difference: i64,
    pub profit_difference: i64,
    pub expert_score_difference: i64,
    /// Difference in budget utilization, in percentage points.
    pub utilization_difference: f64,
    pub profit_difference_pct: f64,
    pub expert_score_difference_pct: f64,
    pub agreement: Agreement,
}

impl MethodComparison {
    pub fn new(ideal: &RankedSolution, concession: &ConcessionResult, budget: i64) -> Self {
        Self::from_summaries(
            MethodSummary::from_ranked(ideal, budget),
            MethodSummary::from_concession(concession, budget),
        )
    }

    pub fn from_summaries(ideal_point: MethodSummary, sequential: MethodSummary) -> Self {
        let profit_difference_pct = relative_difference(ideal_point.profit, sequential.profit);
        let expert_score_difference_pct =
            relative_difference(ideal_point.expert_score, sequential.expert_score);

        let agreement = if ideal_point.combination == sequential.combination {
            Agreement::Identical
        } else if profit_difference_pct < CLOSE_THRESHOLD_PCT
            && expert_score_difference_pct < CLOSE_THRESHOLD_PCT
        {
            Agreement::Close
        } else if profit_difference_pct > DIVERGENT_THRESHOLD_PCT
            || expert_score_difference_pct > DIVERGENT_THRESHOLD_PCT
        {
            Agreement::Divergent
        } else {
            Agreement::Moderate
        };

        Self {
            cost_difference: ideal_point.cost - sequential.cost,
            profit_difference: ideal_point.profit - sequential.profit,
            expert_score_difference: ideal_point.expert_score - sequential.expert_score,
            utilization_difference: ideal_point.budget_utilization - sequential.budget_utilization,
            profit_difference_pct,
            expert_score_difference_pct,
            agreement,
            ideal_point,
            sequential,
        }
    }

    pub fn same_selection(&self) -> bool {
        self.agreement == Agreement::Identical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(indices: &[usize], cost: i64, profit: i64, expert: i64) -> MethodSummary {
        MethodSummary::new(Combination::from_indices(4, indices), cost, profit, expert, 6)
    }

    #[test]
    fn test_identical() {
        let a = summary(&[1, 2, 3], 6, 90, 10);
        let cmp = MethodComparison::from_summaries(a.clone(), a);
        assert_eq!(cmp.agreement, Agreement::Identical);
        assert!(cmp.same_selection());
        assert_eq!(cmp.cost_difference, 0);
        assert!((cmp.ideal_point.budget_utilization - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_close() {
        // 90 vs 80: 11.1%, 10 vs 9: 10%
        let cmp = MethodComparison::from_summaries(
            summary(&[1, 2, 3], 6, 90, 10),
            summary(&[0, 1, 2], 6, 80, 9),
        );
        assert_eq!(cmp.agreement, Agreement::Close);
        assert_eq!(cmp.profit_difference, 10);
        assert!((cmp.profit_difference_pct - 100.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_moderate() {
        // 90 vs 70: 22.2%, 10 vs 12: 16.7%
        let cmp = MethodComparison::from_summaries(
            summary(&[1, 2, 3], 6, 90, 10),
            summary(&[0, 1, 3], 5, 70, 12),
        );
        assert_eq!(cmp.agreement, Agreement::Moderate);
        assert_eq!(cmp.expert_score_difference, -2);
        assert_eq!(cmp.cost_difference, 1);
        assert!((cmp.utilization_difference - 100.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_divergent() {
        let cmp = MethodComparison::from_summaries(
            summary(&[1, 2, 3], 6, 90, 10),
            summary(&[0], 2, 20, 4),
        );
        assert_eq!(cmp.agreement, Agreement::Divergent);
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(relative_difference(0, 0), 0.0);
        assert_eq!(percent_of(3, 0), 0.0);
    }
}
