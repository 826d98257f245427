use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    lead::InvestigationId,
    mission::MissionId,
    scalar::{scalar_zero, Scalar},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    Available,
    InTraining,
    OnAssignment,
    OnMission,
    InTransit,
    StartingTransit,
    Recovering,
    Contracting,
    Investigating,
    Terminated,
    Sacked,
}

impl AgentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentState::Available => "available",
            AgentState::InTraining => "in_training",
            AgentState::OnAssignment => "on_assignment",
            AgentState::OnMission => "on_mission",
            AgentState::InTransit => "in_transit",
            AgentState::StartingTransit => "starting_transit",
            AgentState::Recovering => "recovering",
            AgentState::Contracting => "contracting",
            AgentState::Investigating => "investigating",
            AgentState::Terminated => "terminated",
            AgentState::Sacked => "sacked",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentState::Terminated | AgentState::Sacked)
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentAssignment {
    Standby,
    Training,
    Contracting,
    Investigation(InvestigationId),
    Mission(MissionId),
    Recovery,
}

impl AgentAssignment {
    pub fn investigation(&self) -> Option<&InvestigationId> {
        match self {
            AgentAssignment::Investigation(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub damage: Scalar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    #[serde(default)]
    pub name: String,
    pub state: AgentState,
    pub assignment: AgentAssignment,
    /// Fatigue in percent; 0 is fully rested.
    #[serde(default = "scalar_zero")]
    pub exhaustion_pct: Scalar,
    pub hit_points: Scalar,
    pub max_hit_points: Scalar,
    pub skill: Scalar,
    pub weapon: Weapon,
}

impl Agent {
    pub fn is_terminated(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn is_in_training(&self) -> bool {
        self.state == AgentState::InTraining && self.assignment == AgentAssignment::Training
    }

    /// Agents the allocation passes may hand out this turn.
    pub fn is_assignable(&self) -> bool {
        self.state == AgentState::Available || self.is_in_training()
    }

    /// Agents on a duty a recall can end: training, contracting or an
    /// investigation, including while still travelling to it.
    pub fn is_recallable(&self) -> bool {
        if self.is_in_training() {
            return true;
        }
        let on_duty = matches!(
            self.assignment,
            AgentAssignment::Contracting | AgentAssignment::Investigation(_)
        );
        on_duty
            && matches!(
                self.state,
                AgentState::OnAssignment
                    | AgentState::Contracting
                    | AgentState::Investigating
                    | AgentState::InTransit
            )
    }
}
