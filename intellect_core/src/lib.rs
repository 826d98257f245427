//! Turn-resolution agent allocation for the basic intellect.
//!
//! [`manage_agents`] runs one turn's allocation passes against any
//! [`PlayTurnApi`] implementation: recall worn-out agents, keep income
//! positive, deploy to missions, cover upkeep, work leads, train, and send
//! whoever is left to contracting. [`GameSession`] is the in-memory
//! implementation used by the harness and tests.

pub mod agent;
pub mod api;
pub mod config;
pub mod feasibility;
pub mod lead;
pub mod metrics;
pub mod mission;
pub mod passes;
pub mod rng;
mod scalar;
pub mod selection;
pub mod session;
pub mod state;
pub mod stats;
mod turn;

#[cfg(test)]
mod test_support;

pub use agent::{Agent, AgentAssignment, AgentId, AgentState, Weapon};
pub use api::{ApiError, PlayTurnApi};
pub use config::{
    load_intellect_config_from_env, IntellectConfig, IntellectConfigError,
    IntellectConfigMetadata, BUILTIN_INTELLECT_CONFIG, INTELLECT_CONFIG_PATH_ENV,
};
pub use feasibility::{can_deploy_mission_with_current_resources, BlockedReason, DeploymentPlan};
pub use lead::{InvestigationId, InvestigationState, Lead, LeadId, LeadInvestigation};
pub use metrics::{DeploymentCancellation, LeadCancellation, LeadCancellationReason, TurnReport};
pub use mission::{
    Enemy, Expiry, Mission, MissionId, MissionState, MissionTemplate, MissionTemplateId,
    HQ_RAID_OPERATION_LEVEL,
};
pub use rng::{RandomKey, TieBreaker};
pub use scalar::{scalar_from_f64, scalar_zero, Scalar};
pub use selection::{select_next_best_ready_agents, SelectionOptions};
pub use session::{GameSession, IssuedCommand, Scenario};
pub use state::{GameData, GameState};
pub use stats::{enrich_agents, AgentWithStats};
pub use turn::{manage_agents, AllocationError, TurnContext};
