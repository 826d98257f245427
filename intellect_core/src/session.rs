//! In-memory game session applying allocation commands to a [`GameState`].

use serde::{Deserialize, Serialize};

use crate::{
    agent::{Agent, AgentAssignment, AgentId, AgentState},
    api::{ApiError, PlayTurnApi},
    lead::{InvestigationId, InvestigationState, LeadId, LeadInvestigation},
    mission::{MissionId, MissionState},
    scalar::scalar_zero,
    state::{GameData, GameState},
};

/// A command accepted by a [`GameSession`], in issue order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum IssuedCommand {
    AssignContracting {
        agent_ids: Vec<AgentId>,
    },
    AssignTraining {
        agent_ids: Vec<AgentId>,
    },
    Recall {
        agent_ids: Vec<AgentId>,
    },
    Deploy {
        mission_id: MissionId,
        agent_ids: Vec<AgentId>,
    },
    StartInvestigation {
        lead_id: LeadId,
        investigation_id: InvestigationId,
        agent_ids: Vec<AgentId>,
    },
    AddToInvestigation {
        investigation_id: InvestigationId,
        agent_ids: Vec<AgentId>,
    },
}

/// A game state together with the static data it refers to, as stored in
/// scenario files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub state: GameState,
    #[serde(default)]
    pub data: GameData,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn into_session(self) -> GameSession {
        GameSession::new(self.state, self.data)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GameSession {
    state: GameState,
    data: GameData,
    command_log: Vec<IssuedCommand>,
}

impl GameSession {
    pub fn new(state: GameState, data: GameData) -> Self {
        Self {
            state,
            data,
            command_log: Vec::new(),
        }
    }

    pub fn command_log(&self) -> &[IssuedCommand] {
        &self.command_log
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    fn agent_mut(&mut self, id: &AgentId) -> Option<&mut Agent> {
        self.state.agents.iter_mut().find(|agent| &agent.id == id)
    }

    /// Check every agent before anything is touched so a rejected command
    /// leaves the state as it was.
    fn validate_agents<F>(
        &self,
        agent_ids: &[AgentId],
        action: &'static str,
        eligible: F,
    ) -> Result<(), ApiError>
    where
        F: Fn(&Agent) -> bool,
    {
        if agent_ids.is_empty() {
            return Err(ApiError::NoAgents(action));
        }
        for id in agent_ids {
            let agent = self
                .state
                .agent(id)
                .ok_or_else(|| ApiError::UnknownAgent(id.clone()))?;
            if !eligible(agent) {
                return Err(ApiError::AgentUnavailable {
                    agent: id.clone(),
                    state: agent.state,
                    action,
                });
            }
        }
        Ok(())
    }

    fn move_agents(&mut self, agent_ids: &[AgentId], state: AgentState, assignment: AgentAssignment) {
        for id in agent_ids {
            if let Some(agent) = self.agent_mut(id) {
                agent.state = state;
                agent.assignment = assignment.clone();
            }
        }
    }

    fn next_investigation_id(&self) -> InvestigationId {
        let mut index = self.state.lead_investigations.len() + 1;
        loop {
            let candidate = InvestigationId::new(format!("investigation-{index}"));
            if !self
                .state
                .lead_investigations
                .iter()
                .any(|investigation| investigation.id == candidate)
            {
                return candidate;
            }
            index += 1;
        }
    }
}

impl PlayTurnApi for GameSession {
    fn game_state(&self) -> &GameState {
        &self.state
    }

    fn game_data(&self) -> &GameData {
        &self.data
    }

    fn assign_agents_to_contracting(&mut self, agent_ids: &[AgentId]) -> Result<(), ApiError> {
        self.validate_agents(agent_ids, "assigned to contracting", Agent::is_assignable)?;
        self.move_agents(agent_ids, AgentState::InTransit, AgentAssignment::Contracting);
        self.command_log.push(IssuedCommand::AssignContracting {
            agent_ids: agent_ids.to_vec(),
        });
        Ok(())
    }

    fn assign_agents_to_training(&mut self, agent_ids: &[AgentId]) -> Result<(), ApiError> {
        self.validate_agents(agent_ids, "assigned to training", |agent| {
            agent.state == AgentState::Available
        })?;
        let in_training = self.state.agents_in_training();
        if in_training + agent_ids.len() > self.state.training_cap as usize {
            return Err(ApiError::TrainingCapacityExceeded {
                requested: agent_ids.len(),
                in_training,
                cap: self.state.training_cap,
            });
        }
        self.move_agents(agent_ids, AgentState::InTraining, AgentAssignment::Training);
        self.command_log.push(IssuedCommand::AssignTraining {
            agent_ids: agent_ids.to_vec(),
        });
        Ok(())
    }

    fn recall_agents(&mut self, agent_ids: &[AgentId]) -> Result<(), ApiError> {
        self.validate_agents(agent_ids, "recalled", Agent::is_recallable)?;
        for id in agent_ids {
            let Some(agent) = self.agent_mut(id) else {
                continue;
            };
            let investigation = agent.assignment.investigation().cloned();
            agent.state = if agent.state == AgentState::InTraining {
                AgentState::Available
            } else {
                AgentState::InTransit
            };
            agent.assignment = AgentAssignment::Standby;
            if let Some(investigation_id) = investigation {
                if let Some(investigation) = self
                    .state
                    .lead_investigations
                    .iter_mut()
                    .find(|investigation| investigation.id == investigation_id)
                {
                    investigation.agent_ids.retain(|assigned| assigned != id);
                }
            }
        }
        self.command_log.push(IssuedCommand::Recall {
            agent_ids: agent_ids.to_vec(),
        });
        Ok(())
    }

    fn deploy_agents_to_mission(
        &mut self,
        mission_id: &MissionId,
        agent_ids: &[AgentId],
    ) -> Result<(), ApiError> {
        let mission = self
            .state
            .mission(mission_id)
            .ok_or_else(|| ApiError::UnknownMission(mission_id.clone()))?;
        if !mission.is_pending() {
            return Err(ApiError::MissionNotPending(mission_id.clone()));
        }
        self.validate_agents(agent_ids, "deployed", |agent| {
            agent.state == AgentState::Available
        })?;
        let remaining = self.state.remaining_transport();
        if agent_ids.len() > remaining {
            return Err(ApiError::TransportExceeded {
                requested: agent_ids.len(),
                remaining,
            });
        }

        self.move_agents(
            agent_ids,
            AgentState::StartingTransit,
            AgentAssignment::Mission(mission_id.clone()),
        );
        if let Some(mission) = self
            .state
            .missions
            .iter_mut()
            .find(|mission| &mission.id == mission_id)
        {
            mission.state = MissionState::Deployed;
            mission.agent_ids = agent_ids.to_vec();
        }
        self.command_log.push(IssuedCommand::Deploy {
            mission_id: mission_id.clone(),
            agent_ids: agent_ids.to_vec(),
        });
        Ok(())
    }

    fn start_lead_investigation(
        &mut self,
        lead_id: &LeadId,
        agent_ids: &[AgentId],
    ) -> Result<(), ApiError> {
        let lead = self
            .data
            .lead(lead_id)
            .ok_or_else(|| ApiError::UnknownLead(lead_id.clone()))?;
        if self.state.active_investigation_for(lead_id).is_some() {
            return Err(ApiError::InvestigationAlreadyActive(lead_id.clone()));
        }
        if !self.state.lead_is_available(lead) {
            return Err(ApiError::LeadUnavailable(lead_id.clone()));
        }
        self.validate_agents(agent_ids, "sent to investigate", Agent::is_assignable)?;

        let investigation_id = self.next_investigation_id();
        self.move_agents(
            agent_ids,
            AgentState::InTransit,
            AgentAssignment::Investigation(investigation_id.clone()),
        );
        self.state.lead_investigations.push(LeadInvestigation {
            id: investigation_id.clone(),
            lead_id: lead_id.clone(),
            state: InvestigationState::Active,
            agent_ids: agent_ids.to_vec(),
            progress: scalar_zero(),
        });
        self.command_log.push(IssuedCommand::StartInvestigation {
            lead_id: lead_id.clone(),
            investigation_id,
            agent_ids: agent_ids.to_vec(),
        });
        Ok(())
    }

    fn add_agents_to_investigation(
        &mut self,
        investigation_id: &InvestigationId,
        agent_ids: &[AgentId],
    ) -> Result<(), ApiError> {
        let investigation = self
            .state
            .lead_investigations
            .iter()
            .find(|investigation| &investigation.id == investigation_id)
            .ok_or_else(|| ApiError::UnknownInvestigation(investigation_id.clone()))?;
        if !investigation.is_active() {
            return Err(ApiError::InvestigationNotActive(investigation_id.clone()));
        }
        self.validate_agents(agent_ids, "sent to investigate", Agent::is_assignable)?;

        self.move_agents(
            agent_ids,
            AgentState::InTransit,
            AgentAssignment::Investigation(investigation_id.clone()),
        );
        if let Some(investigation) = self
            .state
            .lead_investigations
            .iter_mut()
            .find(|investigation| &investigation.id == investigation_id)
        {
            investigation.agent_ids.extend(agent_ids.iter().cloned());
        }
        self.command_log.push(IssuedCommand::AddToInvestigation {
            investigation_id: investigation_id.clone(),
            agent_ids: agent_ids.to_vec(),
        });
        Ok(())
    }
}
