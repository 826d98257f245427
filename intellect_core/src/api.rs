use thiserror::Error;

use crate::{
    agent::{AgentId, AgentState},
    lead::{InvestigationId, LeadId},
    mission::MissionId,
    state::{GameData, GameState},
};

/// The only surface through which allocation passes change the game.
///
/// Reads go through [`PlayTurnApi::game_state`], which must reflect every
/// command applied earlier in the same turn.
pub trait PlayTurnApi {
    fn game_state(&self) -> &GameState;

    fn game_data(&self) -> &GameData;

    fn assign_agents_to_contracting(&mut self, agent_ids: &[AgentId]) -> Result<(), ApiError>;

    fn assign_agents_to_training(&mut self, agent_ids: &[AgentId]) -> Result<(), ApiError>;

    fn recall_agents(&mut self, agent_ids: &[AgentId]) -> Result<(), ApiError>;

    fn deploy_agents_to_mission(
        &mut self,
        mission_id: &MissionId,
        agent_ids: &[AgentId],
    ) -> Result<(), ApiError>;

    fn start_lead_investigation(
        &mut self,
        lead_id: &LeadId,
        agent_ids: &[AgentId],
    ) -> Result<(), ApiError>;

    fn add_agents_to_investigation(
        &mut self,
        investigation_id: &InvestigationId,
        agent_ids: &[AgentId],
    ) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("no agents given for {0}")]
    NoAgents(&'static str),
    #[error("agent '{0}' not found")]
    UnknownAgent(AgentId),
    #[error("agent '{agent}' cannot be {action} while {state}")]
    AgentUnavailable {
        agent: AgentId,
        state: AgentState,
        action: &'static str,
    },
    #[error("mission '{0}' not found")]
    UnknownMission(MissionId),
    #[error("mission '{0}' is not awaiting deployment")]
    MissionNotPending(MissionId),
    #[error("deploying {requested} agents exceeds the {remaining} remaining transport slots")]
    TransportExceeded { requested: usize, remaining: usize },
    #[error("training {requested} more agents exceeds capacity {cap} ({in_training} in training)")]
    TrainingCapacityExceeded {
        requested: usize,
        in_training: usize,
        cap: u32,
    },
    #[error("lead '{0}' not found")]
    UnknownLead(LeadId),
    #[error("lead '{0}' already has an active investigation")]
    InvestigationAlreadyActive(LeadId),
    #[error("lead '{0}' cannot be investigated now")]
    LeadUnavailable(LeadId),
    #[error("investigation '{0}' not found")]
    UnknownInvestigation(InvestigationId),
    #[error("investigation '{0}' is not active")]
    InvestigationNotActive(InvestigationId),
}
