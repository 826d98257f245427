//! Builders shared by the unit tests.

use crate::{
    agent::{Agent, AgentAssignment, AgentId, AgentState, Weapon},
    lead::{Lead, LeadId},
    mission::{Enemy, Expiry, Mission, MissionId, MissionState, MissionTemplate, MissionTemplateId},
    scalar::{scalar_from_f64, scalar_zero, Scalar},
    session::GameSession,
    state::{GameData, GameState},
};

pub fn agent(id: &str, state: AgentState, assignment: AgentAssignment) -> Agent {
    Agent {
        id: AgentId::new(id),
        name: id.to_string(),
        state,
        assignment,
        exhaustion_pct: scalar_zero(),
        hit_points: scalar_from_f64(30.0),
        max_hit_points: scalar_from_f64(30.0),
        skill: scalar_from_f64(100.0),
        weapon: Weapon {
            damage: scalar_from_f64(10.0),
        },
    }
}

/// A rested reference agent on standby.
pub fn named(id: &str) -> Agent {
    agent(id, AgentState::Available, AgentAssignment::Standby)
}

pub fn rookie(index: usize) -> Agent {
    named(&format!("agent-{index:03}"))
}

pub fn roster(count: usize) -> Vec<Agent> {
    (0..count).map(rookie).collect()
}

pub fn grunt() -> Enemy {
    Enemy {
        name: "Operative".to_string(),
        skill: scalar_from_f64(100.0),
        hit_points: scalar_from_f64(30.0),
        weapon_damage: scalar_from_f64(10.0),
    }
}

pub fn mission(id: &str, enemies: usize, expires_in: Expiry) -> Mission {
    Mission {
        id: MissionId::new(id),
        template_id: MissionTemplateId::new(format!("{id}_template")),
        name: id.to_string(),
        state: MissionState::Active,
        operation_level: None,
        expires_in,
        enemies: (0..enemies).map(|_| grunt()).collect(),
        agent_ids: Vec::new(),
    }
}

pub fn lead(id: &str, difficulty: u32, repeatable: bool) -> Lead {
    Lead {
        id: LeadId::new(id),
        name: id.to_string(),
        difficulty,
        repeatable,
        depends_on: Vec::new(),
    }
}

pub fn template(id: &str, unlocked_by: &str, enemies: usize) -> MissionTemplate {
    MissionTemplate {
        id: MissionTemplateId::new(id),
        name: id.to_string(),
        depends_on: vec![LeadId::new(unlocked_by)],
        enemies: (0..enemies).map(|_| grunt()).collect(),
        operation_level: None,
        expires_in: Expiry::Turns(5),
    }
}

/// A solvent base with roomy transport and no training slots.
pub fn base_state(agents: Vec<Agent>) -> GameState {
    GameState {
        turn: 1,
        money: Scalar::from_i64(500),
        funding: Scalar::from_i64(1_000),
        agent_upkeep: scalar_zero(),
        agents,
        transport_cap: 20,
        ..GameState::default()
    }
}

pub fn session(state: GameState, data: GameData) -> GameSession {
    GameSession::new(state, data)
}
