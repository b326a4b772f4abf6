//! Sequential concessions configuration.

use crate::enumerate::DEFAULT_MAX_PROJECTS;
use crate::knapsack::DEFAULT_MAX_BUDGET;

/// Smallest concession accepted by
/// [`SequentialConcessionEngine::concede`](super::SequentialConcessionEngine::concede),
/// in units of the primary criterion.
pub const MIN_CONCESSION: i64 = 1;

/// Configuration for a sequential-concessions session.
///
/// # Examples
///
/// ```
/// use u_portfolio::concession::ConcessionConfig;
///
/// let config = ConcessionConfig::default().with_max_projects(16);
/// assert_eq!(config.max_projects, 16);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ConcessionConfig {
    /// Largest project count accepted for the one-off enumeration done
    /// by `initialize`.
    pub max_projects: usize,

    /// Largest budget accepted for the round-0 knapsack.
    pub max_budget: i64,
}

impl Default for ConcessionConfig {
    fn default() -> Self {
        Self {
            max_projects: DEFAULT_MAX_PROJECTS,
            max_budget: DEFAULT_MAX_BUDGET,
        }
    }
}

impl ConcessionConfig {
    pub fn with_max_projects(mut self, n: usize) -> Self {
        self.max_projects = n;
        self
    }

    pub fn with_max_budget(mut self, budget: i64) -> Self {
        self.max_budget = budget;
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
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConcessionConfig::default();
        assert_eq!(config.max_projects, 24);
        assert_eq!(config.max_budget, 100_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_negative_max_budget() {
        assert!(ConcessionConfig::default()
            .with_max_budget(-5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_zero_max_projects() {
        assert!(ConcessionConfig::default()
            .with_max_projects(0)
            .validate()
            .is_err());
    }
}
