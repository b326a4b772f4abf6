//! Session state, history entries and results of a negotiation.

use std::fmt;

use crate::enumerate::EnumeratedCombination;
use crate::model::{Combination, Criterion, ProjectSet};

/// Where a negotiation session stands.
///
/// `initialize` returns a session already in `Negotiating`. `Exhausted`
/// and `Accepted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConcessionPhase {
    /// Waiting for the caller to concede or accept.
    Negotiating,
    /// A concession found no acceptable combination; the last solution stands.
    Exhausted,
    /// The caller accepted the current solution.
    Accepted,
}

impl ConcessionPhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, ConcessionPhase::Negotiating)
    }
}

impl fmt::Display for ConcessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConcessionPhase::Negotiating => "negotiating",
            ConcessionPhase::Exhausted => "exhausted",
            ConcessionPhase::Accepted => "accepted",
        })
    }
}

/// A combination that met a round's primary-criterion floor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcceptableCombination {
    pub combination: Combination,
    pub cost: i64,
    pub primary_value: i64,
    pub secondary_value: i64,
}

/// One entry of the session history.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConcessionRound {
    /// Solution in force after this round.
    pub solution: Combination,
    pub primary_value: i64,
    pub secondary_value: i64,
    pub cost: i64,
    /// Concession applied to reach this round; 0 for round 0.
    pub concession_amount: i64,
    /// Primary-criterion floor tested this round; `None` for round 0.
    pub floor: Option<i64>,
    /// Human-readable status.
    pub message: String,
    /// Combinations that met the floor, in enumeration order. `None` for
    /// round 0; an empty list means the round found nothing.
    pub acceptable: Option<Vec<AcceptableCombination>>,
}

impl ConcessionRound {
    /// Acceptable combinations as table rows, marking the chosen one.
    pub fn acceptable_rows(&self) -> Vec<AcceptableRow> {
        self.acceptable
            .iter()
            .flatten()
            .enumerate()
            .map(|(i, a)| AcceptableRow {
                rank: i + 1,
                selected: a.combination.labels(),
                cost: a.cost,
                primary_value: a.primary_value,
                secondary_value: a.secondary_value,
                chosen: a.combination == self.solution,
            })
            .collect()
    }
}

/// Row of a per-round acceptable-combinations table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcceptableRow {
    pub rank: usize,
    pub selected: String,
    pub cost: i64,
    pub primary_value: i64,
    pub secondary_value: i64,
    pub chosen: bool,
}

/// Row of the session history table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryRow {
    pub iteration: usize,
    pub concession: i64,
    pub selected: String,
    pub primary_value: i64,
    pub secondary_value: i64,
    pub cost: i64,
    pub message: String,
}

/// What a single `concede` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundOutcome {
    /// A new solution was chosen among the combinations meeting `floor`.
    Advanced { round: usize, floor: i64 },
    /// Nothing met `floor`; the session is exhausted and the previous
    /// solution is final.
    Exhausted { round: usize, floor: i64 },
}

impl RoundOutcome {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RoundOutcome::Exhausted { .. })
    }

    /// History index of the round this call appended.
    pub fn round(&self) -> usize {
        match *self {
            RoundOutcome::Advanced { round, .. } | RoundOutcome::Exhausted { round, .. } => round,
        }
    }
}

/// Snapshot of the current answer of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConcessionResult {
    pub primary: Criterion,
    pub secondary: Criterion,
    pub solution: Combination,
    pub primary_value: i64,
    pub secondary_value: i64,
    pub cost: i64,
    /// Rounds that found an acceptable combination.
    pub iterations: usize,
    /// Concession applied in the latest round.
    pub last_concession: i64,
    /// Primary value given up since round 0.
    pub total_concession: i64,
    pub phase: ConcessionPhase,
}

impl ConcessionResult {
    /// Value of `criterion` for the current solution.
    pub fn value(&self, criterion: Criterion) -> i64 {
        if criterion == self.primary {
            self.primary_value
        } else {
            self.secondary_value
        }
    }
}

/// State of one negotiation session.
///
/// Created by
/// [`SequentialConcessionEngine::initialize`](super::SequentialConcessionEngine::initialize),
/// mutated only by `concede` and `accept`, and owned by a single caller.
/// Independent sessions need independent states.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConcessionState {
    pub(crate) projects: ProjectSet,
    pub(crate) budget: i64,
    pub(crate) primary: Criterion,
    pub(crate) secondary: Criterion,
    pub(crate) solution: Combination,
    pub(crate) primary_value: i64,
    pub(crate) secondary_value: i64,
    pub(crate) cost: i64,
    pub(crate) original_primary: i64,
    pub(crate) combinations: Vec<EnumeratedCombination>,
    pub(crate) iteration: usize,
    pub(crate) history: Vec<ConcessionRound>,
    pub(crate) phase: ConcessionPhase,
}

impl ConcessionState {
    pub fn projects(&self) -> &ProjectSet {
        &self.projects
    }

    pub fn budget(&self) -> i64 {
        self.budget
    }

    pub fn primary(&self) -> Criterion {
        self.primary
    }

    pub fn secondary(&self) -> Criterion {
        self.secondary
    }

    pub fn phase(&self) -> ConcessionPhase {
        self.phase
    }

    pub fn solution(&self) -> &Combination {
        &self.solution
    }

    pub fn primary_value(&self) -> i64 {
        self.primary_value
    }

    pub fn secondary_value(&self) -> i64 {
        self.secondary_value
    }

    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Primary-optimal value found in round 0.
    pub fn original_primary(&self) -> i64 {
        self.original_primary
    }

    /// Number of rounds that found an acceptable combination.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Feasible combinations enumerated once at initialization.
    pub fn combinations(&self) -> &[EnumeratedCombination] {
        &self.combinations
    }

    /// All rounds so far, round 0 first.
    pub fn history(&self) -> &[ConcessionRound] {
        &self.history
    }

    /// The history as table rows.
    pub fn history_rows(&self) -> Vec<HistoryRow> {
        self.history
            .iter()
            .enumerate()
            .map(|(i, r)| HistoryRow {
                iteration: i,
                concession: r.concession_amount,
                selected: r.solution.labels(),
                primary_value: r.primary_value,
                secondary_value: r.secondary_value,
                cost: r.cost,
                message: r.message.clone(),
            })
            .collect()
    }
}
