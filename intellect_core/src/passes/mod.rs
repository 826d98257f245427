//! The per-turn allocation passes, in the order [`crate::manage_agents`]
//! runs them. Each takes the pool left by the previous pass and returns what
//! it did not consume.

pub mod contracting;
pub mod deployment;
pub mod investigation;
pub mod recall;
pub mod training;

use std::collections::HashSet;

use crate::{agent::AgentId, stats::AgentWithStats};

pub type AgentPool = Vec<AgentWithStats>;

pub(crate) fn agent_ids(agents: &[AgentWithStats]) -> Vec<AgentId> {
    agents.iter().map(|entry| entry.id().clone()).collect()
}

pub(crate) fn without(pool: AgentPool, consumed: &HashSet<AgentId>) -> AgentPool {
    pool.into_iter()
        .filter(|entry| !consumed.contains(entry.id()))
        .collect()
}
