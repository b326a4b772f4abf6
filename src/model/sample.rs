//! Sample instances: the reference example and seeded random portfolios.

use rand::Rng;

use super::types::{Project, ProjectSet};
use crate::error::{PortfolioError, Result};

/// The four-project reference instance, as `(cost, profit, expert_score)`.
pub const SAMPLE_PROJECTS: [(i64, i64, i64); 4] = [(2, 20, 4), (1, 30, 3), (3, 40, 2), (2, 20, 5)];

/// Budget paired with [`SAMPLE_PROJECTS`].
pub const SAMPLE_BUDGET: i64 = 6;

/// Returns the reference instance.
pub fn sample_projects() -> ProjectSet {
    ProjectSet::new(
        SAMPLE_PROJECTS
            .iter()
            .filter_map(|&(c, p, e)| Project::new(c, p, e).ok())
            .collect(),
    )
}

/// Value ranges for randomly generated portfolios.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_portfolio::model::RandomPortfolio;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let generator = RandomPortfolio::default().with_cost_range(1, 5);
/// let (projects, budget) = generator.generate(8, &mut rng).unwrap();
/// assert_eq!(projects.len(), 8);
/// assert!(budget >= 0);
/// ```
#[derive(Debug, Clone)]
pub struct RandomPortfolio {
    /// Inclusive cost range; the lower bound must be at least 1.
    pub cost_range: (i64, i64),
    /// Inclusive profit range.
    pub profit_range: (i64, i64),
    /// Inclusive expert score range.
    pub expert_range: (i64, i64),
    /// Budget as a fraction of the total cost of all projects.
    pub budget_ratio: f64,
}

impl Default for RandomPortfolio {
    fn default() -> Self {
        Self {
            cost_range: (1, 10),
            profit_range: (0, 100),
            expert_range: (0, 10),
            budget_ratio: 0.5,
        }
    }
}

impl RandomPortfolio {
    pub fn with_cost_range(mut self, lo: i64, hi: i64) -> Self {
        self.cost_range = (lo, hi);
        self
    }

    pub fn with_profit_range(mut self, lo: i64, hi: i64) -> Self {
        self.profit_range = (lo, hi);
        self
    }

    pub fn with_expert_range(mut self, lo: i64, hi: i64) -> Self {
        self.expert_range = (lo, hi);
        self
    }

    pub fn with_budget_ratio(mut self, ratio: f64) -> Self {
        self.budget_ratio = ratio;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.cost_range.0 < 1 {
            return Err(format!(
                "cost range must start at 1 or more, got {}",
                self.cost_range.0
            ));
        }
        for (name, (lo, hi)) in [
            ("cost", self.cost_range),
            ("profit", self.profit_range),
            ("expert", self.expert_range),
        ] {
            if lo > hi {
                return Err(format!("{name} range is empty: {lo}..={hi}"));
            }
        }
        if self.profit_range.0 < 0 || self.expert_range.0 < 0 {
            return Err("criterion ranges must be non-negative".into());
        }
        if !(0.0..=1.0).contains(&self.budget_ratio) {
            return Err(format!(
                "budget_ratio must be in [0, 1], got {}",
                self.budget_ratio
            ));
        }
        Ok(())
    }

    /// Draws `n` projects and a budget.
    ///
    /// # Errors
    ///
    /// [`PortfolioError::InvalidConfig`] if the configuration does not pass
    /// [`validate`](Self::validate); [`PortfolioError::ValueTooLarge`] if a
    /// range reaches past [`MAX_PROJECT_VALUE`](super::MAX_PROJECT_VALUE).
    pub fn generate<R: Rng>(&self, n: usize, rng: &mut R) -> Result<(ProjectSet, i64)> {
        self.validate().map_err(PortfolioError::InvalidConfig)?;
        let projects = (0..n)
            .map(|_| {
                Project::new(
                    rng.random_range(self.cost_range.0..=self.cost_range.1),
                    rng.random_range(self.profit_range.0..=self.profit_range.1),
                    rng.random_range(self.expert_range.0..=self.expert_range.1),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        let projects = ProjectSet::new(projects);
        let budget = (projects.total_cost() as f64 * self.budget_ratio).floor() as i64;
        Ok((projects, budget))
    }
}
