//! End-to-end ideal point analysis.

use tracing::info;

use super::config::IdealPointConfig;
use super::ranker::{IdealPoint, IdealPointRanker, RankedSolution};
use crate::enumerate::{ensure_enumerable, CombinationEnumerator};
use crate::error::{PortfolioError, Result};
use crate::knapsack::ensure_budget;
use crate::model::ProjectSet;
use crate::normalize::{Normalization, Normalizer};

/// Everything the ideal point method produces for one instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdealPointAnalysis {
    pub budget: i64,
    pub normalization: Normalization,
    pub ideal: IdealPoint,
    /// Every feasible combination, nearest to the ideal point first.
    pub ranking: Vec<RankedSolution>,
    top_n: usize,
}

impl IdealPointAnalysis {
    /// The recommended solution: minimum distance, first enumerated on ties.
    ///
    /// Always present, since the empty combination is feasible.
    pub fn best(&self) -> Option<&RankedSolution> {
        self.ranking.first()
    }

    /// The leading `top_n` solutions of the ranking.
    pub fn top(&self) -> &[RankedSolution] {
        &self.ranking[..self.top_n.min(self.ranking.len())]
    }

    /// Solutions tied with the best at exactly the same distance.
    pub fn best_ties(&self) -> &[RankedSolution] {
        match self.ranking.first() {
            Some(best) => {
                let n = self
                    .ranking
                    .iter()
                    .take_while(|r| r.distance == best.distance)
                    .count();
                &self.ranking[..n]
            }
            None => &[],
        }
    }
}

/// Runs normalization, the two ideal-point knapsacks, enumeration and
/// ranking in sequence.
pub struct IdealPointMethod;

impl IdealPointMethod {
    /// Executes the ideal point method.
    ///
    /// # Errors
    ///
    /// - [`PortfolioError::InvalidConfig`] if `config` does not validate.
    /// - [`PortfolioError::NegativeBudget`] if `budget < 0`.
    /// - [`PortfolioError::BudgetTooLarge`] above `config.max_budget`.
    /// - [`PortfolioError::TooManyProjects`] above `config.max_projects`.
    /// - [`PortfolioError::DivisionByZero`] for an all-zero criterion under
    ///   [`ZeroColumnPolicy::Reject`](crate::normalize::ZeroColumnPolicy::Reject).
    ///
    /// # Examples
    ///
    /// ```
    /// use u_portfolio::ideal_point::{IdealPointConfig, IdealPointMethod};
    /// use u_portfolio::model::{sample_projects, SAMPLE_BUDGET};
    ///
    /// let analysis = IdealPointMethod::run(
    ///     &sample_projects(),
    ///     SAMPLE_BUDGET,
    ///     &IdealPointConfig::default().with_top_n(3),
    /// ).unwrap();
    /// assert_eq!(analysis.ideal.raw(), (90, 12));
    /// assert_eq!(analysis.best().unwrap().combination.labels(), "x2, x3, x4");
    /// assert_eq!(analysis.top().len(), 3);
    /// ```
    pub fn run(
        projects: &ProjectSet,
        budget: i64,
        config: &IdealPointConfig,
    ) -> Result<IdealPointAnalysis> {
        config.validate().map_err(PortfolioError::InvalidConfig)?;
        ensure_budget(budget, config.max_budget)?;
        ensure_enumerable(projects.len(), config.max_projects)?;

        let normalization = Normalizer::normalize_all(projects, config.zero_column_policy)?;
        let ideal = IdealPoint::compute(projects, budget, &normalization)?;
        let combinations = CombinationEnumerator::enumerate(projects, budget)?;
        let ranking = IdealPointRanker::rank(&combinations, &normalization, ideal.normalized());

        if let Some(best) = ranking.first() {
            info!(
                projects = projects.len(),
                budget,
                combinations = ranking.len(),
                best = %best.combination,
                distance = best.distance,
                "ideal point analysis complete"
            );
        }

        Ok(IdealPointAnalysis {
            budget,
            normalization,
            ideal,
            ranking,
            top_n: config.top_n,
        })
    }
}
