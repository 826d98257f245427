use std::collections::HashSet;

use serde::Serialize;

use crate::{
    agent::AgentId,
    config::IntellectConfig,
    mission::Mission,
    rng::TieBreaker,
    selection::{select_next_best_ready_agents, SelectionOptions},
    state::GameState,
    stats::{agent_threat, mission_enemy_threat, AgentWithStats},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockedReason {
    InsufficientThreat,
    InsufficientTransport,
}

impl BlockedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockedReason::InsufficientThreat => "insufficient_threat",
            BlockedReason::InsufficientTransport => "insufficient_transport",
        }
    }
}

/// Outcome of planning a deployment against the agents still unassigned.
#[derive(Debug, Clone, PartialEq)]
pub enum DeploymentPlan {
    Deployable {
        agents: Vec<AgentWithStats>,
    },
    Blocked {
        reason: BlockedReason,
        details: String,
    },
}

impl DeploymentPlan {
    pub fn can_deploy(&self) -> bool {
        matches!(self, DeploymentPlan::Deployable { .. })
    }

    pub fn selected_agents(&self) -> &[AgentWithStats] {
        match self {
            DeploymentPlan::Deployable { agents } => agents,
            DeploymentPlan::Blocked { .. } => &[],
        }
    }

    pub fn blocked_reason(&self) -> Option<BlockedReason> {
        match self {
            DeploymentPlan::Deployable { .. } => None,
            DeploymentPlan::Blocked { reason, .. } => Some(*reason),
        }
    }
}

/// Work out which agents would beat `mission` and whether they fit into
/// the remaining transport. Nothing is committed.
pub fn can_deploy_mission_with_current_resources(
    state: &GameState,
    mission: &Mission,
    available_agents: &[AgentWithStats],
    config: &IntellectConfig,
    rng: &mut TieBreaker,
) -> DeploymentPlan {
    let ratings = config.ratings();
    let enemy_threat = mission_enemy_threat(mission, ratings);
    let target_threat = enemy_threat * config.deployment().threat_multiplier();
    let options = SelectionOptions::from_config(config.selection())
        .keep_reserve(false)
        .include_in_training(true);
    let total_agent_count = state.total_agent_count();

    let mut selected: Vec<AgentWithStats> = Vec::new();
    let mut excluded: HashSet<AgentId> = HashSet::new();
    let mut current_threat = 0.0;

    // A deployment always needs at least one agent on the ground.
    while current_threat < target_threat || selected.is_empty() {
        let mut next = select_next_best_ready_agents(
            available_agents,
            1,
            &excluded,
            selected.len(),
            total_agent_count,
            options,
            rng,
        );
        let Some(agent) = next.pop() else {
            break;
        };
        current_threat += agent_threat(&agent.agent, ratings);
        excluded.insert(agent.id().clone());
        selected.push(agent);
    }

    if selected.is_empty() || current_threat < target_threat {
        return DeploymentPlan::Blocked {
            reason: BlockedReason::InsufficientThreat,
            details: format!(
                "gathered threat {:.2} from {} agents, mission {} requires {:.2} (enemy threat {:.2})",
                current_threat,
                selected.len(),
                mission.id,
                target_threat,
                enemy_threat
            ),
        };
    }

    let remaining_transport = state.remaining_transport();
    if selected.len() > remaining_transport {
        return DeploymentPlan::Blocked {
            reason: BlockedReason::InsufficientTransport,
            details: format!(
                "mission {} needs {} transport slots, {} of {} remaining",
                mission.id,
                selected.len(),
                remaining_transport,
                state.transport_cap
            ),
        };
    }

    DeploymentPlan::Deployable { agents: selected }
}
