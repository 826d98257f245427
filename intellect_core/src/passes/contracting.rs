//! The three contracting passes: keeping the books out of the red, covering
//! upkeep with a margin, and parking whoever is left on paid work.

use std::{collections::HashSet, slice};

use tracing::{debug, info};

use super::{agent_ids, without, AgentPool};
use crate::{
    agent::AgentId,
    api::PlayTurnApi,
    selection::{select_next_best_ready_agents, SelectionOptions},
    stats::{contracting_income_total, projected_money_income},
    turn::{AllocationError, TurnContext},
};

/// Put rested agents on contracting one at a time until the projected
/// income for the turn is no longer negative.
pub fn assign_urgent_contracting<A: PlayTurnApi + ?Sized>(
    ctx: &mut TurnContext<'_, A>,
    pool: AgentPool,
) -> Result<AgentPool, AllocationError> {
    let options = SelectionOptions::from_config(ctx.config.selection())
        .include_in_training(true)
        .max_exhaustion_pct(ctx.config.contracting().urgent_max_exhaustion_pct());
    let mut assigned: HashSet<AgentId> = HashSet::new();

    loop {
        let state = ctx.api.game_state();
        if !projected_money_income(state, ctx.config).is_negative() {
            break;
        }
        let total_agent_count = state.total_agent_count();
        let mut next = select_next_best_ready_agents(
            &pool,
            1,
            &assigned,
            assigned.len(),
            total_agent_count,
            options,
            ctx.rng,
        );
        let Some(agent) = next.pop() else {
            debug!(
                target: "basic_intellect::contracting",
                assigned = assigned.len(),
                "contracting.urgent=out_of_agents"
            );
            break;
        };
        ctx.api
            .assign_agents_to_contracting(slice::from_ref(agent.id()))?;
        assigned.insert(agent.id().clone());
    }

    ctx.report.urgent_contracting = assigned.len();
    if !assigned.is_empty() {
        info!(
            target: "basic_intellect::contracting",
            assigned = assigned.len(),
            "contracting.urgent={}",
            assigned.len()
        );
    }
    Ok(without(pool, &assigned))
}

/// Keep contracting income at least `baseline_income_multiplier` times the
/// total agent upkeep.
pub fn assign_baseline_contracting<A: PlayTurnApi + ?Sized>(
    ctx: &mut TurnContext<'_, A>,
    pool: AgentPool,
) -> Result<AgentPool, AllocationError> {
    let options = SelectionOptions::from_config(ctx.config.selection()).include_in_training(false);
    let multiplier = ctx.config.contracting().baseline_income_multiplier();
    let mut assigned: HashSet<AgentId> = HashSet::new();

    loop {
        let state = ctx.api.game_state();
        let target = state.agent_upkeep_total() * multiplier;
        if contracting_income_total(state, ctx.config) >= target {
            break;
        }
        let total_agent_count = state.total_agent_count();
        let mut next = select_next_best_ready_agents(
            &pool,
            1,
            &assigned,
            assigned.len(),
            total_agent_count,
            options,
            ctx.rng,
        );
        let Some(agent) = next.pop() else {
            break;
        };
        ctx.api
            .assign_agents_to_contracting(slice::from_ref(agent.id()))?;
        assigned.insert(agent.id().clone());
    }

    ctx.report.baseline_contracting = assigned.len();
    debug!(
        target: "basic_intellect::contracting",
        assigned = assigned.len(),
        "contracting.baseline={}",
        assigned.len()
    );
    Ok(without(pool, &assigned))
}

/// Send every remaining rested agent that is not training to contracting.
pub fn assign_leftover_contracting<A: PlayTurnApi + ?Sized>(
    ctx: &mut TurnContext<'_, A>,
    pool: AgentPool,
) -> Result<AgentPool, AllocationError> {
    let options = SelectionOptions::from_config(ctx.config.selection())
        .keep_reserve(false)
        .include_in_training(false);
    let total_agent_count = ctx.api.game_state().total_agent_count();
    let selected = select_next_best_ready_agents(
        &pool,
        pool.len(),
        &HashSet::new(),
        0,
        total_agent_count,
        options,
        ctx.rng,
    );
    if selected.is_empty() {
        return Ok(pool);
    }

    let ids = agent_ids(&selected);
    ctx.api.assign_agents_to_contracting(&ids)?;
    ctx.report.leftover_contracting = ids.len();
    debug!(
        target: "basic_intellect::contracting",
        assigned = ids.len(),
        "contracting.leftover={}",
        ids.len()
    );
    let consumed: HashSet<AgentId> = ids.into_iter().collect();
    Ok(without(pool, &consumed))
}
