//! Data model: projects, criteria and combinations.
//!
//! A [`Project`] is a fixed `(cost, profit, expert_score)` triple,
//! identified only by its position in a [`ProjectSet`]. A [`Combination`]
//! is an inclusion vector over that set; its totals are always derived
//! from the set rather than stored.

mod combination;
mod sample;
mod types;

pub use combination::Combination;
pub use sample::{sample_projects, RandomPortfolio, SAMPLE_BUDGET, SAMPLE_PROJECTS};
pub use types::{
    check_complementary, project_label, Criterion, Project, ProjectSet, MAX_PROJECT_VALUE,
};
