#![allow(dead_code)]

use std::sync::Once;

use intellect_core::{
    scalar_from_f64, scalar_zero, Agent, AgentAssignment, AgentId, AgentState, Enemy, Expiry,
    GameState, Mission, MissionId, MissionState, MissionTemplateId, Scalar, Weapon,
    INTELLECT_CONFIG_PATH_ENV,
};
use integration_tests::fixture_path;

static INIT: Once = Once::new();

pub fn ensure_test_config() {
    INIT.call_once(|| {
        let config_path = fixture_path("test_intellect_config.json");

        debug_assert!(
            config_path.exists(),
            "missing test intellect config at {}",
            config_path.display()
        );

        std::env::set_var(INTELLECT_CONFIG_PATH_ENV, &config_path);
    });
}

pub fn rookie(index: usize) -> Agent {
    Agent {
        id: AgentId::new(format!("agent-{index:03}")),
        name: format!("Agent {index}"),
        state: AgentState::Available,
        assignment: AgentAssignment::Standby,
        exhaustion_pct: scalar_zero(),
        hit_points: scalar_from_f64(30.0),
        max_hit_points: scalar_from_f64(30.0),
        skill: scalar_from_f64(100.0),
        weapon: Weapon {
            damage: scalar_from_f64(10.0),
        },
    }
}

pub fn mission(id: &str, enemies: usize, expires_in: Expiry) -> Mission {
    Mission {
        id: MissionId::new(id),
        template_id: MissionTemplateId::new("raid_safehouse"),
        name: id.to_string(),
        state: MissionState::Active,
        operation_level: None,
        expires_in,
        enemies: (0..enemies)
            .map(|_| Enemy {
                name: "Operative".to_string(),
                skill: scalar_from_f64(100.0),
                hit_points: scalar_from_f64(30.0),
                weapon_damage: scalar_from_f64(10.0),
            })
            .collect(),
        agent_ids: Vec::new(),
    }
}

pub fn state_with(agent_count: usize, transport_cap: u32) -> GameState {
    GameState {
        turn: 1,
        money: Scalar::from_i64(500),
        funding: Scalar::from_i64(1_000),
        agents: (0..agent_count).map(rookie).collect(),
        transport_cap,
        ..GameState::default()
    }
}
