//! Ideal point computation and distance ranking.

use tracing::debug;

use crate::enumerate::EnumeratedCombination;
use crate::error::Result;
use crate::knapsack::{KnapsackResult, KnapsackSolver};
use crate::model::{Combination, Criterion, ProjectSet};
use crate::normalize::Normalization;

/// Best independently achievable value of each criterion.
///
/// The point is generally not reachable by a single combination.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdealPoint {
    /// Knapsack solve maximizing profit.
    pub profit: KnapsackResult,
    /// Knapsack solve maximizing expert score.
    pub expert_score: KnapsackResult,
    /// Normalized profit of the profit-optimal selection.
    pub normalized_profit: f64,
    /// Normalized expert score of the score-optimal selection.
    pub normalized_expert_score: f64,
}

impl IdealPoint {
    /// Solves one knapsack per criterion and projects the optima onto the
    /// normalized scale.
    pub fn compute(
        projects: &ProjectSet,
        budget: i64,
        normalization: &Normalization,
    ) -> Result<Self> {
        let profit = KnapsackSolver::solve(projects, budget, Criterion::Profit)?;
        let expert_score = KnapsackSolver::solve(projects, budget, Criterion::ExpertScore)?;
        let normalized_profit = profit
            .selection
            .normalized_total(&normalization.profit.values);
        let normalized_expert_score = expert_score
            .selection
            .normalized_total(&normalization.expert_score.values);

        Ok(Self {
            profit,
            expert_score,
            normalized_profit,
            normalized_expert_score,
        })
    }

    /// Raw coordinates `(max profit, max expert score)`.
    pub fn raw(&self) -> (i64, i64) {
        (self.profit.optimal_value, self.expert_score.optimal_value)
    }

    /// Normalized coordinates.
    pub fn normalized(&self) -> (f64, f64) {
        (self.normalized_profit, self.normalized_expert_score)
    }

    /// Optimal knapsack result for `criterion`.
    pub fn solution(&self, criterion: Criterion) -> &KnapsackResult {
        match criterion {
            Criterion::Profit => &self.profit,
            Criterion::ExpertScore => &self.expert_score,
        }
    }
}

/// A combination with its distance to the ideal point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedSolution {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub combination: Combination,
    pub cost: i64,
    pub profit: i64,
    pub expert_score: i64,
    pub normalized_profit: f64,
    pub normalized_expert_score: f64,
    /// Euclidean distance to the ideal point in normalized space.
    pub distance: f64,
}

impl RankedSolution {
    /// Raw total of `criterion`.
    pub fn total(&self, criterion: Criterion) -> i64 {
        match criterion {
            Criterion::Profit => self.profit,
            Criterion::ExpertScore => self.expert_score,
        }
    }
}

/// Ranks combinations by Euclidean distance to an ideal point.
pub struct IdealPointRanker;

impl IdealPointRanker {
    /// Scores every combination and sorts ascending by distance
    /// `sqrt((p - p*)^2 + (e - e*)^2)` in normalized space.
    ///
    /// The sort is stable: combinations at exactly equal distance keep
    /// their enumeration order, so the first one enumerated ranks first.
    /// Several combinations may share the minimum distance.
    pub fn rank(
        combinations: &[EnumeratedCombination],
        normalization: &Normalization,
        ideal: (f64, f64),
    ) -> Vec<RankedSolution> {
        let (ideal_profit, ideal_expert) = ideal;

        let mut ranked: Vec<RankedSolution> = combinations
            .iter()
            .map(|c| {
                let normalized_profit = c
                    .combination
                    .normalized_total(&normalization.profit.values);
                let normalized_expert_score = c
                    .combination
                    .normalized_total(&normalization.expert_score.values);
                let dp = normalized_profit - ideal_profit;
                let de = normalized_expert_score - ideal_expert;
                RankedSolution {
                    rank: 0,
                    combination: c.combination.clone(),
                    cost: c.cost,
                    profit: c.profit,
                    expert_score: c.expert_score,
                    normalized_profit,
                    normalized_expert_score,
                    distance: (dp * dp + de * de).sqrt(),
                }
            })
            .collect();

        ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        for (i, r) in ranked.iter_mut().enumerate() {
            r.rank = i + 1;
        }

        if let Some(best) = ranked.first() {
            debug!(
                ranked = ranked.len(),
                best = %best.combination,
                distance = best.distance,
                "ranked by distance to ideal point"
            );
        }
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::CombinationEnumerator;
    use crate::model::{sample_projects, Project};
    use crate::normalize::{Normalizer, ZeroColumnPolicy};
    use proptest::prelude::*;

    fn sample_ranking() -> (IdealPoint, Vec<RankedSolution>) {
        let projects = sample_projects();
        let norm = Normalizer::normalize_all(&projects, ZeroColumnPolicy::Reject).unwrap();
        let ideal = IdealPoint::compute(&projects, 6, &norm).unwrap();
        let all = CombinationEnumerator::enumerate(&projects, 6).unwrap();
        let ranked = IdealPointRanker::rank(&all, &norm, ideal.normalized());
        (ideal, ranked)
    }

    #[test]
    fn test_ideal_point_coordinates() {
        let (ideal, _) = sample_ranking();
        assert_eq!(ideal.raw(), (90, 12));
        assert!((ideal.normalized_profit - 90.0 / 3300f64.sqrt()).abs() < 1e-12);
        assert!((ideal.normalized_expert_score - 12.0 / 54f64.sqrt()).abs() < 1e-12);
        assert_eq!(ideal.solution(Criterion::ExpertScore).optimal_value, 12);
    }

    #[test]
    fn test_sample_best_solution() {
        let (_, ranked) = sample_ranking();
        assert_eq!(ranked.len(), 14);
        // x2+x3+x4: profit 90, score 10 -> distance 2/sqrt(54)
        let best = &ranked[0];
        assert_eq!(best.rank, 1);
        assert_eq!(best.combination.labels(), "x2, x3, x4");
        assert_eq!((best.cost, best.profit, best.expert_score), (6, 90, 10));
        assert!((best.distance - 2.0 / 54f64.sqrt()).abs() < 1e-12);
        // The empty combination is the farthest point.
        assert_eq!(ranked.last().unwrap().combination.selected_count(), 0);
    }

    #[test]
    fn test_sorted_and_ranked() {
        let (_, ranked) = sample_ranking();
        assert!(ranked.windows(2).all(|w| w[0].distance <= w[1].distance));
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, (1..=14).collect::<Vec<_>>());
    }

    #[test]
    fn test_ties_keep_enumeration_order() {
        // x1 and x2 are identical, so their singletons tie exactly.
        let projects = ProjectSet::from_triples(&[(1, 5, 5), (1, 5, 5)]).unwrap();
        let norm = Normalizer::normalize_all(&projects, ZeroColumnPolicy::Reject).unwrap();
        let all = CombinationEnumerator::enumerate(&projects, 1).unwrap();
        let ideal = IdealPoint::compute(&projects, 1, &norm).unwrap();
        let ranked = IdealPointRanker::rank(&all, &norm, ideal.normalized());
        // Enumeration order: None, x2, x1.
        assert_eq!(ranked[0].combination.labels(), "x2");
        assert_eq!(ranked[1].combination.labels(), "x1");
        assert_eq!(ranked[0].distance, ranked[1].distance);
    }

    #[test]
    fn test_empty_input() {
        let norm = Normalizer::normalize_all(&sample_projects(), ZeroColumnPolicy::Reject).unwrap();
        assert!(IdealPointRanker::rank(&[], &norm, (1.0, 1.0)).is_empty());
    }

    proptest! {
        #[test]
        fn prop_ranking_is_deterministic(
            rows in prop::collection::vec((1i64..6, 1i64..30, 1i64..10), 1..9),
            budget in 0i64..15,
        ) {
            let projects = ProjectSet::new(
                rows.iter().map(|&(c, p, e)| Project::new(c, p, e).unwrap()).collect(),
            );
            let norm = Normalizer::normalize_all(&projects, ZeroColumnPolicy::Reject).unwrap();
            let ideal = IdealPoint::compute(&projects, budget, &norm).unwrap();
            let all = CombinationEnumerator::enumerate(&projects, budget).unwrap();
            let first = IdealPointRanker::rank(&all, &norm, ideal.normalized());
            let second = IdealPointRanker::rank(&all, &norm, ideal.normalized());
            prop_assert_eq!(&first, &second);
            prop_assert!(first.windows(2).all(|w| w[0].distance <= w[1].distance));
        }
    }
}
