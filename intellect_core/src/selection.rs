//! Greedy, reserve-aware picking of the best rested agents.
//!
//! Every allocation pass draws its agents through
//! [`select_next_best_ready_agents`]: the least exhausted candidate wins and
//! ties are broken uniformly at random, which keeps the roster rotating over
//! many turns.

use std::collections::HashSet;

use crate::{
    agent::AgentId,
    config::SelectionConfig,
    rng::{RandomKey, TieBreaker},
    stats::AgentWithStats,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionOptions {
    /// Fall back to agents in training once no other candidate is left.
    pub include_in_training: bool,
    /// Stop before the candidate pool drops under the reserve fraction.
    pub keep_reserve: bool,
    pub max_exhaustion_pct: f64,
    pub reserve_fraction: f64,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self::from_config(&SelectionConfig::default())
    }
}

impl SelectionOptions {
    pub fn from_config(config: &SelectionConfig) -> Self {
        Self {
            include_in_training: true,
            keep_reserve: true,
            max_exhaustion_pct: config.max_exhaustion_pct(),
            reserve_fraction: config.reserve_fraction(),
        }
    }

    pub fn include_in_training(mut self, include: bool) -> Self {
        self.include_in_training = include;
        self
    }

    pub fn keep_reserve(mut self, keep: bool) -> Self {
        self.keep_reserve = keep;
        self
    }

    pub fn max_exhaustion_pct(mut self, max: f64) -> Self {
        self.max_exhaustion_pct = max;
        self
    }
}

/// Pick up to `count` agents from `pool`, least exhausted first.
///
/// `already_selected_count` is how many agents the calling pass has taken
/// so far; together with `total_agent_count` it drives the reserve stop.
pub fn select_next_best_ready_agents(
    pool: &[AgentWithStats],
    count: usize,
    exclude_ids: &HashSet<AgentId>,
    already_selected_count: usize,
    total_agent_count: usize,
    options: SelectionOptions,
    rng: &mut TieBreaker,
) -> Vec<AgentWithStats> {
    let mut excluded = exclude_ids.clone();
    let mut selected: Vec<AgentWithStats> = Vec::with_capacity(count.min(pool.len()));
    let mut running_count = already_selected_count;
    let reserve = total_agent_count as f64 * options.reserve_fraction;

    while selected.len() < count {
        let ready = |entry: &&AgentWithStats| {
            !excluded.contains(entry.id()) && entry.exhaustion_pct_value <= options.max_exhaustion_pct
        };
        let available: Vec<&AgentWithStats> = pool
            .iter()
            .filter(ready)
            .filter(|entry| !entry.is_in_training)
            .collect();
        let candidates = if !available.is_empty() {
            available
        } else if options.include_in_training {
            pool.iter()
                .filter(ready)
                .filter(|entry| entry.is_in_training)
                .collect()
        } else {
            Vec::new()
        };

        if candidates.is_empty() {
            break;
        }
        if options.keep_reserve && (candidates.len() as f64 - running_count as f64) < reserve {
            break;
        }

        let lowest = candidates
            .iter()
            .map(|entry| entry.exhaustion_pct_value)
            .fold(f64::INFINITY, f64::min);
        let rested: Vec<&AgentWithStats> = candidates
            .into_iter()
            .filter(|entry| entry.exhaustion_pct_value == lowest)
            .collect();
        let chosen = *rng.pick(RandomKey::AgentSelection, &rested);

        excluded.insert(chosen.id().clone());
        selected.push(chosen.clone());
        running_count += 1;
    }

    selected
}
