use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    agent::{Agent, AgentId},
    lead::{Lead, LeadId, LeadInvestigation},
    mission::{Mission, MissionId, MissionTemplate, MissionTemplateId},
    scalar::{scalar_zero, Scalar},
};

/// Snapshot of everything the allocation passes read while planning a turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default)]
    pub turn: u32,
    #[serde(default = "scalar_zero")]
    pub money: Scalar,
    /// Income granted every turn regardless of assignments.
    #[serde(default = "scalar_zero")]
    pub funding: Scalar,
    /// Upkeep paid per non-terminated agent every turn.
    #[serde(default = "scalar_zero")]
    pub agent_upkeep: Scalar,
    #[serde(default)]
    pub agents: Vec<Agent>,
    #[serde(default)]
    pub missions: Vec<Mission>,
    #[serde(default)]
    pub lead_investigations: Vec<LeadInvestigation>,
    #[serde(default)]
    pub lead_investigation_counts: BTreeMap<LeadId, u32>,
    #[serde(default)]
    pub won_mission_template_ids: Vec<MissionTemplateId>,
    #[serde(default)]
    pub transport_cap: u32,
    #[serde(default)]
    pub training_cap: u32,
}

impl GameState {
    pub fn agent(&self, id: &AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| &agent.id == id)
    }

    pub fn mission(&self, id: &MissionId) -> Option<&Mission> {
        self.missions.iter().find(|mission| &mission.id == id)
    }

    pub fn total_agent_count(&self) -> usize {
        self.agents
            .iter()
            .filter(|agent| !agent.is_terminated())
            .count()
    }

    pub fn agent_upkeep_total(&self) -> Scalar {
        self.agent_upkeep * Scalar::from_u32(self.total_agent_count() as u32)
    }

    pub fn transport_in_use(&self) -> usize {
        self.missions
            .iter()
            .filter(|mission| mission.occupies_transport())
            .map(|mission| mission.agent_ids.len())
            .sum()
    }

    pub fn remaining_transport(&self) -> usize {
        (self.transport_cap as usize).saturating_sub(self.transport_in_use())
    }

    pub fn agents_in_training(&self) -> usize {
        self.agents
            .iter()
            .filter(|agent| agent.is_in_training())
            .count()
    }

    pub fn investigating_agent_count(&self) -> usize {
        self.agents
            .iter()
            .filter(|agent| !agent.is_terminated() && agent.assignment.investigation().is_some())
            .count()
    }

    pub fn active_investigation_for(&self, lead: &LeadId) -> Option<&LeadInvestigation> {
        self.lead_investigations
            .iter()
            .find(|investigation| investigation.is_active() && &investigation.lead_id == lead)
    }

    pub fn investigation_count(&self, lead: &LeadId) -> u32 {
        self.lead_investigation_counts
            .get(lead)
            .copied()
            .unwrap_or(0)
    }

    fn dependency_met(&self, dependency: &str) -> bool {
        self.investigation_count(&LeadId::new(dependency)) > 0
            || self
                .won_mission_template_ids
                .iter()
                .any(|template| template.as_str() == dependency)
    }

    /// Whether a fresh investigation of `lead` may be started this turn.
    pub fn lead_is_available(&self, lead: &Lead) -> bool {
        if self.active_investigation_for(&lead.id).is_some() {
            return false;
        }
        if !lead.repeatable && self.investigation_count(&lead.id) > 0 {
            return false;
        }
        lead.depends_on
            .iter()
            .all(|dependency| self.dependency_met(dependency))
    }
}

/// Read-only reference tables for leads and mission templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameData {
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub mission_templates: Vec<MissionTemplate>,
}

impl GameData {
    pub fn lead(&self, id: &LeadId) -> Option<&Lead> {
        self.leads.iter().find(|lead| &lead.id == id)
    }

    pub fn templates_unlocked_by<'a>(
        &'a self,
        lead: &'a LeadId,
    ) -> impl Iterator<Item = &'a MissionTemplate> + 'a {
        self.mission_templates
            .iter()
            .filter(move |template| template.unlocked_by(lead))
    }
}
