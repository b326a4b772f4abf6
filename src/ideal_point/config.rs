//! Ideal point method configuration.

use crate::enumerate::DEFAULT_MAX_PROJECTS;
use crate::knapsack::DEFAULT_MAX_BUDGET;
use crate::normalize::ZeroColumnPolicy;

/// Configuration for [`IdealPointMethod`](super::IdealPointMethod).
///
/// # Examples
///
/// ```
/// use u_portfolio::ideal_point::IdealPointConfig;
/// use u_portfolio::normalize::ZeroColumnPolicy;
///
/// let config = IdealPointConfig::default()
///     .with_zero_column_policy(ZeroColumnPolicy::ZeroFill)
///     .with_max_projects(16)
///     .with_top_n(5);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.top_n, 5);
/// ```
#[derive(Debug, Clone)]
pub struct IdealPointConfig {
    /// Handling of all-zero criterion columns.
    pub zero_column_policy: ZeroColumnPolicy,

    /// Largest project count accepted for exhaustive enumeration.
    pub max_projects: usize,

    /// Largest budget accepted; bounds the `(n + 1) x (budget + 1)`
    /// knapsack tables.
    pub max_budget: i64,

    /// Number of leading ranked solutions exposed by
    /// [`IdealPointAnalysis::top`](super::IdealPointAnalysis::top).
    pub top_n: usize,
}

impl Default for IdealPointConfig {
    fn default() -> Self {
        Self {
            zero_column_policy: ZeroColumnPolicy::Reject,
            max_projects: DEFAULT_MAX_PROJECTS,
            max_budget: DEFAULT_MAX_BUDGET,
            top_n: 10,
        }
    }
}

impl IdealPointConfig {
    pub fn with_zero_column_policy(mut self, policy: ZeroColumnPolicy) -> Self {
        self.zero_column_policy = policy;
        self
    }

    pub fn with_max_projects(mut self, n: usize) -> Self {
        self.max_projects = n;
        self
    }

    pub fn with_max_budget(mut self, budget: i64) -> Self {
        self.max_budget = budget;
        self
    }

    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_projects == 0 {
            return Err("max_projects must be at least 1".into());
        }
        if self.max_budget < 0 {
            return Err("max_budget must be non-negative".into());
        }
        if self.top_n == 0 {
            return Err("top_n must be at least 1".into());
        }
        Ok(())
    }
}
