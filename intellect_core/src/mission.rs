use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{agent::AgentId, lead::LeadId, scalar::Scalar};

/// Operation level of an assault on headquarters; losing it ends the campaign.
pub const HQ_RAID_OPERATION_LEVEL: u8 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionId(pub String);

impl MissionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionTemplateId(pub String);

impl MissionTemplateId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionState {
    Active,
    Deployed,
    Won,
    Wiped,
    Retreated,
    Expired,
}

/// Turns left before a mission lapses. `Never` orders after every finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expiry {
    Turns(u32),
    Never,
}

impl Expiry {
    pub fn has_lapsed(&self) -> bool {
        matches!(self, Expiry::Turns(0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    #[serde(default)]
    pub name: String,
    pub skill: Scalar,
    pub hit_points: Scalar,
    pub weapon_damage: Scalar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub template_id: MissionTemplateId,
    #[serde(default)]
    pub name: String,
    pub state: MissionState,
    /// Set only on defensive missions launched by an enemy faction.
    #[serde(default)]
    pub operation_level: Option<u8>,
    pub expires_in: Expiry,
    #[serde(default)]
    pub enemies: Vec<Enemy>,
    #[serde(default)]
    pub agent_ids: Vec<AgentId>,
}

impl Mission {
    /// Still waiting for a deployment this turn.
    pub fn is_pending(&self) -> bool {
        self.state == MissionState::Active
            && self.agent_ids.is_empty()
            && !self.expires_in.has_lapsed()
    }

    pub fn is_hq_raid(&self) -> bool {
        self.operation_level == Some(HQ_RAID_OPERATION_LEVEL)
    }

    pub fn occupies_transport(&self) -> bool {
        matches!(self.state, MissionState::Deployed | MissionState::Active)
    }
}

/// Static definition a mission is spawned from once its leads are resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionTemplate {
    pub id: MissionTemplateId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub depends_on: Vec<LeadId>,
    #[serde(default)]
    pub enemies: Vec<Enemy>,
    #[serde(default)]
    pub operation_level: Option<u8>,
    #[serde(default = "default_template_expiry")]
    pub expires_in: Expiry,
}

fn default_template_expiry() -> Expiry {
    Expiry::Never
}

impl MissionTemplate {
    pub fn unlocked_by(&self, lead: &LeadId) -> bool {
        self.depends_on.iter().any(|dependency| dependency == lead)
    }

    /// The mission this template would spawn, before it has been placed in the game.
    pub fn instantiate(&self, id: MissionId) -> Mission {
        Mission {
            id,
            template_id: self.id.clone(),
            name: self.name.clone(),
            state: MissionState::Active,
            operation_level: self.operation_level,
            expires_in: self.expires_in,
            enemies: self.enemies.clone(),
            agent_ids: Vec::new(),
        }
    }
}
