//! Sequential concessions method.
//!
//! An interactive procedure for two ranked criteria. The session starts
//! from the solution that is best on the primary criterion; in each round
//! the decision maker gives up some of the primary value, and the engine
//! moves to the feasible combination that is best on the secondary
//! criterion without falling below the relaxed floor.
//!
//! The session is an explicit, caller-owned [`ConcessionState`] driven
//! through [`SequentialConcessionEngine`]; between rounds control returns
//! to the caller, who either concedes again or accepts. Abandoning a
//! session is simply dropping its state.
//!
//! # References
//!
//! - Podinovskii & Nogin (1982), "Pareto-Optimal Solutions of
//!   Multicriteria Problems"
//! - Haimes, Lasdon & Wismer (1971), "On a bicriterion formulation of the
//!   problems of integrated system identification and system optimization"

mod config;
mod engine;
mod types;

pub use config::{ConcessionConfig, MIN_CONCESSION};
pub use engine::SequentialConcessionEngine;
pub use types::{
    AcceptableCombination, AcceptableRow, ConcessionPhase, ConcessionResult, ConcessionRound,
    ConcessionState, HistoryRow, RoundOutcome,
};
