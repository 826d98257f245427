use std::collections::HashSet;

use tracing::{debug, info};

use super::{agent_ids, without, AgentPool};
use crate::{
    agent::AgentId,
    api::PlayTurnApi,
    feasibility::{can_deploy_mission_with_current_resources, DeploymentPlan},
    metrics::DeploymentCancellation,
    mission::Mission,
    rng::{RandomKey, TieBreaker},
    turn::{AllocationError, TurnContext},
};

/// Which pending mission to attempt next: any HQ raid first, otherwise the
/// one expiring soonest. Ties are broken at random.
pub(crate) fn next_mission_index(pending: &[Mission], rng: &mut TieBreaker) -> Option<usize> {
    let raids: Vec<usize> = pending
        .iter()
        .enumerate()
        .filter(|(_, mission)| mission.is_hq_raid())
        .map(|(index, _)| index)
        .collect();
    if !raids.is_empty() {
        return Some(*rng.pick(RandomKey::MissionSelection, &raids));
    }

    let earliest = pending.iter().map(|mission| mission.expires_in).min()?;
    let soonest: Vec<usize> = pending
        .iter()
        .enumerate()
        .filter(|(_, mission)| mission.expires_in == earliest)
        .map(|(index, _)| index)
        .collect();
    Some(*rng.pick(RandomKey::MissionSelection, &soonest))
}

/// Deploy to pending missions in priority order until one cannot be staffed
/// or transported; that mission and everything after it waits a turn.
pub fn deploy_to_missions<A: PlayTurnApi + ?Sized>(
    ctx: &mut TurnContext<'_, A>,
    mut pool: AgentPool,
) -> Result<AgentPool, AllocationError> {
    let mut pending: Vec<Mission> = ctx
        .api
        .game_state()
        .missions
        .iter()
        .filter(|mission| mission.is_pending())
        .cloned()
        .collect();

    while let Some(index) = next_mission_index(&pending, ctx.rng) {
        let mission = pending.swap_remove(index);
        let plan = can_deploy_mission_with_current_resources(
            ctx.api.game_state(),
            &mission,
            &pool,
            ctx.config,
            ctx.rng,
        );

        let agents = match plan {
            DeploymentPlan::Deployable { agents } => agents,
            DeploymentPlan::Blocked { reason, details } => {
                info!(
                    target: "basic_intellect::deployment",
                    mission = %mission.id,
                    reason = reason.as_str(),
                    details = %details,
                    "deployment.cancelled={}",
                    mission.id
                );
                ctx.report.deployment_cancellations.push(DeploymentCancellation {
                    mission_id: mission.id.clone(),
                    reason,
                    details,
                });
                break;
            }
        };

        let trainees: Vec<AgentId> = agents
            .iter()
            .filter(|entry| entry.is_in_training)
            .map(|entry| entry.id().clone())
            .collect();
        if !trainees.is_empty() {
            ctx.api.recall_agents(&trainees)?;
        }

        let ids = agent_ids(&agents);
        ctx.api.deploy_agents_to_mission(&mission.id, &ids)?;
        ctx.report.missions_deployed += 1;
        ctx.report.agents_deployed += ids.len();
        debug!(
            target: "basic_intellect::deployment",
            mission = %mission.id,
            agents = ids.len(),
            from_training = trainees.len(),
            "deployment.committed={}",
            mission.id
        );

        let consumed: HashSet<AgentId> = ids.into_iter().collect();
        pool = without(pool, &consumed);
    }

    Ok(pool)
}
