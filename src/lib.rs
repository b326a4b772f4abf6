//! Multi-criteria project portfolio selection under a single budget.
//!
//! Projects carry a cost and two criteria (profit and expert score). Two
//! decision methods pick a budget-feasible subset:
//!
//! - **Ideal point**: each criterion is maximized on its own by a 0/1
//!   knapsack; every feasible combination is ranked by its Euclidean
//!   distance to that (usually unreachable) ideal point in normalized
//!   criterion space.
//! - **Sequential concessions**: an interactive session that starts from
//!   the best solution on a primary criterion and, round by round, trades
//!   primary value for a better secondary value.
//!
//! # Modules
//!
//! - [`model`]: projects, criteria and combinations.
//! - [`normalize`]: Euclidean normalization of criterion columns.
//! - [`knapsack`]: single-criterion dynamic-programming knapsack.
//! - [`enumerate`]: exhaustive enumeration of feasible combinations.
//! - [`ideal_point`]: ideal point computation and distance ranking.
//! - [`concession`]: the sequential-concessions state machine.
//! - [`compare`]: side-by-side comparison of both methods' answers.
//!
//! # Scale
//!
//! Both methods enumerate every feasible combination, which is `O(2^n)`.
//! The drivers refuse more than
//! [`DEFAULT_MAX_PROJECTS`](enumerate::DEFAULT_MAX_PROJECTS) projects
//! unless configured otherwise. The knapsack is `O(n * budget)`.
//!
//! Everything runs synchronously on the calling thread. Presentation,
//! file import/export and charting are left to the caller; result types
//! expose table rows and, with the `serde` feature, serialize directly.

pub mod compare;
pub mod concession;
pub mod enumerate;
pub mod error;
pub mod ideal_point;
pub mod knapsack;
pub mod model;
pub mod normalize;

pub use error::{ErrorKind, PortfolioError, Result};
