//! Single-criterion 0/1 knapsack.
//!
//! Used to find the best achievable value of each criterion on its own,
//! which gives the coordinates of the ideal point and the starting
//! solution of a sequential-concessions session.
//!
//! # References
//!
//! - Bellman (1957), "Dynamic Programming"
//! - Kellerer, Pferschy & Pisinger (2004), "Knapsack Problems"

mod solver;

pub use solver::{ensure_budget, DpTable, KnapsackResult, KnapsackSolver, DEFAULT_MAX_BUDGET};
