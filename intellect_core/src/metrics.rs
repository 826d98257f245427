use serde::Serialize;

use crate::{feasibility::BlockedReason, lead::LeadId, mission::MissionId};

/// Counters gathered while one turn's passes run. Diagnostic only: nothing
/// in the allocation reads them back.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TurnReport {
    pub turn: u32,
    pub initial_pool: usize,
    pub recalled_exhausted: usize,
    pub urgent_contracting: usize,
    pub missions_deployed: usize,
    pub agents_deployed: usize,
    pub deployment_cancellations: Vec<DeploymentCancellation>,
    pub baseline_contracting: usize,
    pub investigations_started: usize,
    pub agents_started_investigating: usize,
    pub agents_added_to_investigations: usize,
    pub lead_cancellations: Vec<LeadCancellation>,
    pub agents_trained: usize,
    pub leftover_contracting: usize,
    pub remaining_pool: usize,
}

impl TurnReport {
    pub fn new(turn: u32) -> Self {
        Self {
            turn,
            ..Self::default()
        }
    }

    pub fn contracting_total(&self) -> usize {
        self.urgent_contracting + self.baseline_contracting + self.leftover_contracting
    }

    pub fn investigators_total(&self) -> usize {
        self.agents_started_investigating + self.agents_added_to_investigations
    }

    /// Agents given a new duty this turn; recalls are not counted.
    pub fn agents_assigned(&self) -> usize {
        self.contracting_total()
            + self.agents_deployed
            + self.investigators_total()
            + self.agents_trained
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentCancellation {
    pub mission_id: MissionId,
    pub reason: BlockedReason,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadCancellationReason {
    NoAvailableLead,
    InsufficientAgents,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadCancellation {
    pub lead_id: Option<LeadId>,
    pub reason: LeadCancellationReason,
    pub details: String,
}
