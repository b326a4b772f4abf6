//! Euclidean column normalization.

use tracing::warn;

use crate::error::{PortfolioError, Result};
use crate::model::{project_label, Criterion, ProjectSet};

/// Tolerance for the unit sum-of-squares check.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-4;

/// What to do with a criterion column whose values are all zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZeroColumnPolicy {
    /// Fail with [`PortfolioError::DivisionByZero`].
    #[default]
    Reject,
    /// Normalize every value to 0.0 and report a factor of 0.0.
    ///
    /// The column then carries no weight in distance computations and
    /// fails [`NormalizationResult::is_unit`].
    ZeroFill,
}

/// Normalized values of one criterion column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizationResult {
    /// Criterion this column belongs to.
    pub criterion: Criterion,
    /// One normalized value per project, in project order.
    pub values: Vec<f64>,
    /// Euclidean norm of the raw column.
    pub factor: f64,
}

impl NormalizationResult {
    /// Sum of squared normalized values; 1.0 for a proper column.
    pub fn sum_of_squares(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }

    /// Whether the sum of squares is 1.0 within [`NORMALIZATION_TOLERANCE`].
    pub fn is_unit(&self) -> bool {
        (self.sum_of_squares() - 1.0).abs() < NORMALIZATION_TOLERANCE
    }

    /// Per-project breakdown for display.
    pub fn rows(&self, projects: &ProjectSet) -> Vec<NormalizationRow> {
        projects
            .iter()
            .zip(&self.values)
            .enumerate()
            .map(|(i, (p, &normalized))| {
                let raw = p.value(self.criterion);
                NormalizationRow {
                    label: project_label(i),
                    raw,
                    squared: raw * raw,
                    normalized,
                }
            })
            .collect()
    }
}

/// One line of a normalization table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizationRow {
    pub label: String,
    pub raw: i64,
    pub squared: i64,
    pub normalized: f64,
}

/// Normalized columns for both criteria.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Normalization {
    pub profit: NormalizationResult,
    pub expert_score: NormalizationResult,
}

impl Normalization {
    /// Returns the column for `criterion`.
    pub fn get(&self, criterion: Criterion) -> &NormalizationResult {
        match criterion {
            Criterion::Profit => &self.profit,
            Criterion::ExpertScore => &self.expert_score,
        }
    }

    /// Checks the unit sum-of-squares property of both columns.
    pub fn verify(&self) -> [NormalizationCheck; 2] {
        Criterion::ALL.map(|c| {
            let column = self.get(c);
            NormalizationCheck {
                criterion: c,
                sum_of_squares: column.sum_of_squares(),
                valid: column.is_unit(),
            }
        })
    }
}

/// Outcome of verifying one normalized column.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizationCheck {
    pub criterion: Criterion,
    pub sum_of_squares: f64,
    pub valid: bool,
}

/// Euclidean normalizer: `v_i / sqrt(sum v_j^2)` per criterion column.
pub struct Normalizer;

impl Normalizer {
    /// Normalizes one criterion column.
    ///
    /// An empty project set counts as an all-zero column.
    ///
    /// # Errors
    ///
    /// [`PortfolioError::DivisionByZero`] if every value is zero and
    /// `policy` is [`ZeroColumnPolicy::Reject`].
    ///
    /// # Examples
    ///
    /// ```
    /// use u_portfolio::model::{Criterion, ProjectSet};
    /// use u_portfolio::normalize::{Normalizer, ZeroColumnPolicy};
    ///
    /// let projects = ProjectSet::from_triples(&[(1, 3, 1), (1, 4, 1)]).unwrap();
    /// let r = Normalizer::normalize(&projects, Criterion::Profit, ZeroColumnPolicy::Reject).unwrap();
    /// assert!((r.factor - 5.0).abs() < 1e-12);
    /// assert!((r.values[0] - 0.6).abs() < 1e-12);
    /// assert!(r.is_unit());
    /// ```
    pub fn normalize(
        projects: &ProjectSet,
        criterion: Criterion,
        policy: ZeroColumnPolicy,
    ) -> Result<NormalizationResult> {
        let column = projects.column(criterion);
        let factor = column
            .iter()
            .map(|&v| (v as f64) * (v as f64))
            .sum::<f64>()
            .sqrt();

        if factor == 0.0 {
            return match policy {
                ZeroColumnPolicy::Reject => Err(PortfolioError::DivisionByZero(criterion)),
                ZeroColumnPolicy::ZeroFill => {
                    warn!(%criterion, "all-zero criterion column, normalizing to zeros");
                    Ok(NormalizationResult {
                        criterion,
                        values: vec![0.0; column.len()],
                        factor: 0.0,
                    })
                }
            };
        }

        Ok(NormalizationResult {
            criterion,
            values: column.iter().map(|&v| v as f64 / factor).collect(),
            factor,
        })
    }

    /// Normalizes both criterion columns independently.
    pub fn normalize_all(projects: &ProjectSet, policy: ZeroColumnPolicy) -> Result<Normalization> {
        Ok(Normalization {
            profit: Self::normalize(projects, Criterion::Profit, policy)?,
            expert_score: Self::normalize(projects, Criterion::ExpertScore, policy)?,
        })
    }
}
