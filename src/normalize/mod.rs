//! Euclidean normalization of criterion columns.
//!
//! Each criterion column `v` is rescaled by its Euclidean norm
//! `sqrt(sum v_i^2)` so that both criteria live on a comparable
//! unit-sum-of-squares scale before distances are measured.
//!
//! All-zero columns are governed by [`ZeroColumnPolicy`].

mod normalizer;

pub use normalizer::{
    Normalization, NormalizationCheck, NormalizationResult, NormalizationRow, Normalizer,
    ZeroColumnPolicy, NORMALIZATION_TOLERANCE,
};
