//! Error types shared by every component.

use thiserror::Error;

use crate::concession::ConcessionPhase;
use crate::model::Criterion;

/// Coarse classification of a [`PortfolioError`].
///
/// Presentation layers branch on the kind; the variant carries the context
/// needed to build a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any computation started.
    InvalidInput,
    /// A criterion column is entirely zero and cannot be normalized.
    DivisionByZero,
}

/// Errors returned by the portfolio selection core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortfolioError {
    /// Budget must be a non-negative integer.
    #[error("budget must be non-negative, got {0}")]
    NegativeBudget(i64),

    /// Project cost must be a positive integer.
    #[error("project x{} has non-positive cost {cost}", .index + 1)]
    NonPositiveCost { index: usize, cost: i64 },

    /// Criterion values must be non-negative integers.
    #[error("project x{} has negative {criterion} value {value}", .index + 1)]
    NegativeCriterion {
        index: usize,
        criterion: Criterion,
        value: i64,
    },

    /// Costs and criterion values are bounded by `MAX_PROJECT_VALUE`.
    #[error("project x{} has {field} {value} above the limit of {limit}", .index + 1)]
    ValueTooLarge {
        index: usize,
        field: &'static str,
        value: i64,
        limit: i64,
    },

    /// Primary and secondary criteria must be the two distinct criteria.
    #[error("primary and secondary criteria must differ, got {primary} and {secondary}")]
    CriteriaNotComplementary {
        primary: Criterion,
        secondary: Criterion,
    },

    /// A concession must be at least one unit of the primary criterion.
    #[error("concession amount must be at least 1, got {0}")]
    ConcessionOutOfRange(i64),

    /// The negotiation session no longer accepts this operation.
    #[error("negotiation session is {phase}, expected negotiating")]
    SessionClosed { phase: ConcessionPhase },

    /// Input is too large for exhaustive enumeration.
    #[error("{projects} projects exceed the enumeration limit of {limit}")]
    TooManyProjects { projects: usize, limit: usize },

    /// Budget is too large for the knapsack table.
    #[error("budget {budget} exceeds the knapsack limit of {limit}")]
    BudgetTooLarge { budget: i64, limit: i64 },

    /// A configuration struct failed its `validate()` check.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Every value of a criterion is zero.
    #[error("all {0} values are zero, normalizing factor is 0")]
    DivisionByZero(Criterion),
}

impl PortfolioError {
    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PortfolioError::DivisionByZero(_) => ErrorKind::DivisionByZero,
            _ => ErrorKind::InvalidInput,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PortfolioError>;

/// Converts a caller-supplied budget into a table width.
pub(crate) fn check_budget(budget: i64) -> Result<usize> {
    usize::try_from(budget).map_err(|_| PortfolioError::NegativeBudget(budget))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            PortfolioError::DivisionByZero(Criterion::Profit).kind(),
            ErrorKind::DivisionByZero
        );
        assert_eq!(
            PortfolioError::NegativeBudget(-1).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            PortfolioError::ConcessionOutOfRange(0).kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_messages_use_one_based_labels() {
        let err = PortfolioError::NonPositiveCost { index: 2, cost: 0 };
        assert_eq!(err.to_string(), "project x3 has non-positive cost 0");
    }

    #[test]
    fn test_value_too_large_message() {
        let err = PortfolioError::ValueTooLarge {
            index: 0,
            field: "profit",
            value: 4_000_000_000,
            limit: 2_147_483_647,
        };
        assert_eq!(
            err.to_string(),
            "project x1 has profit 4000000000 above the limit of 2147483647"
        );
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_check_budget() {
        assert_eq!(check_budget(0), Ok(0));
        assert_eq!(check_budget(7), Ok(7));
        assert_eq!(check_budget(-3), Err(PortfolioError::NegativeBudget(-3)));
    }
}
