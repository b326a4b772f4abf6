//! Ideal point method.
//!
//! Each criterion is first maximized on its own with the knapsack solver;
//! the resulting optima form the ideal point, which is usually out of
//! reach for any single combination. Every feasible combination is then
//! placed in normalized criterion space and ranked by its Euclidean
//! distance to that point. The nearest combination is recommended.
//!
//! # References
//!
//! - Zeleny (1974), "A Concept of Compromise Solutions and the Method of
//!   the Displaced Ideal"
//! - Hwang & Yoon (1981), "Multiple Attribute Decision Making"

mod config;
mod method;
mod ranker;

pub use config::IdealPointConfig;
pub use method::{IdealPointAnalysis, IdealPointMethod};
pub use ranker::{IdealPoint, IdealPointRanker, RankedSolution};
