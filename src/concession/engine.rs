//! Sequential concessions state machine.
//!
//! # Algorithm
//!
//! 1. Maximize the primary criterion with the knapsack solver; that
//!    selection is round 0. Enumerate all feasible combinations once.
//! 2. Each `concede(a)` sets `floor = current primary - a`, keeps the
//!    combinations whose primary sum is at least `floor`, and moves to the
//!    one with the largest secondary sum (first in enumeration order on
//!    ties).
//! 3. The caller stops by accepting, or the session ends on its own when a
//!    floor admits nothing.

use tracing::{debug, trace};

use super::config::{ConcessionConfig, MIN_CONCESSION};
use super::types::{
    AcceptableCombination, ConcessionPhase, ConcessionResult, ConcessionRound, ConcessionState,
    RoundOutcome,
};
use crate::enumerate::{ensure_enumerable, CombinationEnumerator};
use crate::error::{PortfolioError, Result};
use crate::knapsack::{ensure_budget, KnapsackSolver};
use crate::model::{check_complementary, Criterion, ProjectSet};

/// Drives [`ConcessionState`] through its rounds.
pub struct SequentialConcessionEngine;

impl SequentialConcessionEngine {
    /// Starts a session from the primary-optimal knapsack solution.
    ///
    /// The secondary value of round 0 is that of the same selection; it
    /// is not optimized separately.
    ///
    /// # Errors
    ///
    /// - [`PortfolioError::CriteriaNotComplementary`] unless `primary` and
    ///   `secondary` are the two distinct criteria.
    /// - [`PortfolioError::NegativeBudget`] if `budget < 0`.
    /// - [`PortfolioError::BudgetTooLarge`] above `config.max_budget`.
    /// - [`PortfolioError::TooManyProjects`] above `config.max_projects`.
    /// - [`PortfolioError::InvalidConfig`] if `config` does not validate.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_portfolio::concession::{ConcessionConfig, ConcessionPhase, SequentialConcessionEngine};
    /// use u_portfolio::model::{sample_projects, Criterion};
    ///
    /// let mut state = SequentialConcessionEngine::initialize(
    ///     &sample_projects(),
    ///     6,
    ///     Criterion::Profit,
    ///     Criterion::ExpertScore,
    ///     &ConcessionConfig::default(),
    /// ).unwrap();
    /// assert_eq!(state.primary_value(), 90);
    ///
    /// let outcome = SequentialConcessionEngine::concede(&mut state, 20).unwrap();
    /// assert!(!outcome.is_exhausted());
    /// assert_eq!(state.secondary_value(), 12);
    ///
    /// SequentialConcessionEngine::accept(&mut state).unwrap();
    /// let result = SequentialConcessionEngine::current_result(&state);
    /// assert_eq!(result.phase, ConcessionPhase::Accepted);
    /// assert_eq!(result.total_concession, 20);
    /// ```
    pub fn initialize(
        projects: &ProjectSet,
        budget: i64,
        primary: Criterion,
        secondary: Criterion,
        config: &ConcessionConfig,
    ) -> Result<ConcessionState> {
        config.validate().map_err(PortfolioError::InvalidConfig)?;
        check_complementary(primary, secondary)?;
        ensure_budget(budget, config.max_budget)?;
        ensure_enumerable(projects.len(), config.max_projects)?;

        let start = KnapsackSolver::solve(projects, budget, primary)?;
        let solution = start.selection;
        let primary_value = start.optimal_value;
        let secondary_value = solution.total(projects, secondary);
        let cost = solution.cost(projects);
        let combinations = CombinationEnumerator::enumerate(projects, budget)?;

        debug!(
            %primary,
            primary_value,
            secondary_value,
            combinations = combinations.len(),
            "concession session initialized"
        );

        let round0 = ConcessionRound {
            solution: solution.clone(),
            primary_value,
            secondary_value,
            cost,
            concession_amount: 0,
            floor: None,
            message: format!("Initial solution maximizing {primary}."),
            acceptable: None,
        };

        Ok(ConcessionState {
            projects: projects.clone(),
            budget,
            primary,
            secondary,
            solution,
            primary_value,
            secondary_value,
            cost,
            original_primary: primary_value,
            combinations,
            iteration: 0,
            history: vec![round0],
            phase: ConcessionPhase::Negotiating,
        })
    }

    /// Gives up `amount` of the primary criterion in search of a better
    /// secondary value.
    ///
    /// On [`RoundOutcome::Exhausted`] the current solution is left as it
    /// was and the session becomes terminal.
    ///
    /// # Errors
    ///
    /// - [`PortfolioError::SessionClosed`] outside
    ///   [`ConcessionPhase::Negotiating`].
    /// - [`PortfolioError::ConcessionOutOfRange`] if `amount` is below
    ///   [`MIN_CONCESSION`].
    ///
    /// The state is untouched on error.
    pub fn concede(state: &mut ConcessionState, amount: i64) -> Result<RoundOutcome> {
        if state.phase != ConcessionPhase::Negotiating {
            return Err(PortfolioError::SessionClosed { phase: state.phase });
        }
        if amount < MIN_CONCESSION {
            return Err(PortfolioError::ConcessionOutOfRange(amount));
        }

        let floor = state.primary_value - amount;
        let round = state.history.len();
        let (primary, secondary) = (state.primary, state.secondary);
        trace!(round, amount, floor, "concession round");

        let acceptable: Vec<AcceptableCombination> = state
            .combinations
            .iter()
            .filter(|c| c.total(primary) >= floor)
            .map(|c| AcceptableCombination {
                combination: c.combination.clone(),
                cost: c.cost,
                primary_value: c.total(primary),
                secondary_value: c.total(secondary),
            })
            .collect();

        // First maximum wins; `Iterator::max_by_key` would keep the last.
        let mut chosen: Option<&AcceptableCombination> = None;
        for candidate in &acceptable {
            if chosen.map_or(true, |c| candidate.secondary_value > c.secondary_value) {
                chosen = Some(candidate);
            }
        }

        let Some(chosen) = chosen.cloned() else {
            debug!(round, floor, "no combination meets the floor, session exhausted");
            state.history.push(ConcessionRound {
                solution: state.solution.clone(),
                primary_value: state.primary_value,
                secondary_value: state.secondary_value,
                cost: state.cost,
                concession_amount: amount,
                floor: Some(floor),
                message: format!("No combinations with {primary} >= {floor}."),
                acceptable: Some(Vec::new()),
            });
            state.phase = ConcessionPhase::Exhausted;
            return Ok(RoundOutcome::Exhausted { round, floor });
        };

        state.solution = chosen.combination.clone();
        state.primary_value = chosen.primary_value;
        state.secondary_value = chosen.secondary_value;
        state.cost = chosen.cost;
        state.iteration += 1;

        debug!(
            round,
            floor,
            acceptable = acceptable.len(),
            solution = %state.solution,
            primary_value = state.primary_value,
            secondary_value = state.secondary_value,
            "concession applied"
        );

        state.history.push(ConcessionRound {
            solution: chosen.combination,
            primary_value: chosen.primary_value,
            secondary_value: chosen.secondary_value,
            cost: chosen.cost,
            concession_amount: amount,
            floor: Some(floor),
            message: format!(
                "Concession {amount}: {primary} = {}, {secondary} = {}.",
                chosen.primary_value, chosen.secondary_value
            ),
            acceptable: Some(acceptable),
        });

        Ok(RoundOutcome::Advanced { round, floor })
    }

    /// Accepts the current solution as final.
    ///
    /// # Errors
    ///
    /// [`PortfolioError::SessionClosed`] outside
    /// [`ConcessionPhase::Negotiating`].
    pub fn accept(state: &mut ConcessionState) -> Result<()> {
        if state.phase != ConcessionPhase::Negotiating {
            return Err(PortfolioError::SessionClosed { phase: state.phase });
        }
        state.phase = ConcessionPhase::Accepted;
        debug!(solution = %state.solution, "concession session accepted");
        Ok(())
    }

    /// Reads the current answer in any phase.
    pub fn current_result(state: &ConcessionState) -> ConcessionResult {
        ConcessionResult {
            primary: state.primary,
            secondary: state.secondary,
            solution: state.solution.clone(),
            primary_value: state.primary_value,
            secondary_value: state.secondary_value,
            cost: state.cost,
            iterations: state.iteration,
            last_concession: state
                .history
                .last()
                .map_or(0, |r| r.concession_amount),
            total_concession: state.original_primary - state.primary_value,
            phase: state.phase,
        }
    }
}
