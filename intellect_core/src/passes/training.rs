use std::collections::HashSet;

use tracing::debug;

use super::{agent_ids, without, AgentPool};
use crate::{
    agent::AgentId,
    api::PlayTurnApi,
    selection::{select_next_best_ready_agents, SelectionOptions},
    turn::{AllocationError, TurnContext},
};

/// Fill free training slots with rested agents.
pub fn assign_to_training<A: PlayTurnApi + ?Sized>(
    ctx: &mut TurnContext<'_, A>,
    pool: AgentPool,
) -> Result<AgentPool, AllocationError> {
    let (free_slots, total_agent_count) = {
        let state = ctx.api.game_state();
        (
            (state.training_cap as usize).saturating_sub(state.agents_in_training()),
            state.total_agent_count(),
        )
    };
    if free_slots == 0 {
        return Ok(pool);
    }

    let options = SelectionOptions::from_config(ctx.config.selection())
        .include_in_training(false)
        .max_exhaustion_pct(ctx.config.training().max_exhaustion_pct());
    let selected = select_next_best_ready_agents(
        &pool,
        free_slots,
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
    ctx.api.assign_agents_to_training(&ids)?;
    ctx.report.agents_trained = ids.len();
    debug!(
        target: "basic_intellect::training",
        assigned = ids.len(),
        free_slots,
        "training.assigned={}",
        ids.len()
    );
    let consumed: HashSet<AgentId> = ids.into_iter().collect();
    Ok(without(pool, &consumed))
}
