mod common;

use common::{mission, state_with};
use intellect_core::{
    manage_agents, AgentAssignment, AgentId, AgentState, BlockedReason, Expiry, GameData, GameSession,
    IntellectConfig, IssuedCommand, Lead, LeadCancellationReason, LeadId, MissionId, MissionState,
    PlayTurnApi, TieBreaker, TurnReport, HQ_RAID_OPERATION_LEVEL,
};

#[test]
fn idle_roster_is_left_untouched() {
    let mut state = state_with(4, 10);
    for agent in state.agents.iter_mut() {
        agent.state = AgentState::Recovering;
        agent.assignment = AgentAssignment::Recovery;
    }
    state.missions.push(mission("mission-1", 1, Expiry::Turns(1)));
    let before = state.clone();
    let mut api = GameSession::new(state, GameData::default());
    let mut rng = TieBreaker::from_seed(17);

    let report = manage_agents(&mut api, &IntellectConfig::default(), &mut rng)
        .expect("idle turn succeeds");

    assert_eq!(report, TurnReport::new(1));
    assert!(api.command_log().is_empty());
    assert_eq!(api.into_state(), before);
}

#[test]
fn deployments_never_exceed_transport_capacity() {
    for seed in 0..25 {
        let mut state = state_with(16, 5);
        state.missions = (0..6)
            .map(|index| {
                let expires_in = Expiry::Turns(1 + index as u32);
                mission(&format!("mission-{index}"), 1 + index % 3, expires_in)
            })
            .collect();
        let mut api = GameSession::new(state, GameData::default());
        let mut rng = TieBreaker::from_seed(seed);

        let report = manage_agents(&mut api, &IntellectConfig::default(), &mut rng)
            .expect("turn succeeds");

        let state = api.game_state();
        assert!(
            state.transport_in_use() <= state.transport_cap as usize,
            "seed {seed}: {} agents in transit for {} slots",
            state.transport_in_use(),
            state.transport_cap
        );
        assert!(report.missions_deployed >= 1);
        if report.missions_deployed < 6 {
            assert_eq!(report.deployment_cancellations.len(), 1);
        }
    }
}

#[test]
fn insufficient_transport_is_reported_once_threat_is_covered() {
    let mut state = state_with(10, 3);
    let mut elsewhere = mission("elsewhere", 1, Expiry::Never);
    elsewhere.state = MissionState::Deployed;
    elsewhere.agent_ids = vec![AgentId::new("agent-x1"), AgentId::new("agent-x2")];
    state.missions = vec![elsewhere, mission("mission-1", 4, Expiry::Turns(2))];
    let mut api = GameSession::new(state, GameData::default());
    let mut rng = TieBreaker::from_seed(3);

    let report = manage_agents(&mut api, &IntellectConfig::default(), &mut rng)
        .expect("turn succeeds");

    assert_eq!(report.missions_deployed, 0);
    let cancellation = &report.deployment_cancellations[0];
    assert_eq!(cancellation.mission_id, MissionId::new("mission-1"));
    assert_eq!(cancellation.reason, BlockedReason::InsufficientTransport);
}

#[test]
fn hq_raid_is_always_attempted_first() {
    for seed in 0..25 {
        let mut state = state_with(3, 10);
        let mut raid = mission("hq-raid", 1, Expiry::Never);
        raid.operation_level = Some(HQ_RAID_OPERATION_LEVEL);
        state.missions = vec![mission("ambush", 1, Expiry::Turns(1)), raid];
        let mut api = GameSession::new(state, GameData::default());
        let mut rng = TieBreaker::from_seed(seed);

        let report = manage_agents(&mut api, &IntellectConfig::default(), &mut rng)
            .expect("turn succeeds");

        match api.command_log().first() {
            Some(IssuedCommand::Deploy { mission_id, .. }) => {
                assert_eq!(mission_id, &MissionId::new("hq-raid"), "seed {seed}");
            }
            other => panic!("seed {seed}: expected a deployment first, got {other:?}"),
        }
        // Two rookies go to the raid; the one left cannot cover the ambush.
        assert_eq!(report.missions_deployed, 1);
        assert_eq!(
            report.deployment_cancellations[0].mission_id,
            MissionId::new("ambush")
        );
    }
}

#[test]
fn twenty_agents_keep_three_investigator_slots() {
    let state = state_with(20, 10);
    let data = GameData {
        leads: vec![Lead {
            id: LeadId::new("informant"),
            name: "Informant".to_string(),
            difficulty: 10,
            repeatable: false,
            depends_on: Vec::new(),
        }],
        mission_templates: Vec::new(),
    };
    let mut api = GameSession::new(state, data);
    let mut rng = TieBreaker::from_seed(8);

    let report = manage_agents(&mut api, &IntellectConfig::default(), &mut rng)
        .expect("turn succeeds");

    assert_eq!(report.investigations_started, 1);
    assert_eq!(report.agents_started_investigating, 2);
    assert_eq!(
        report.lead_cancellations[0].reason,
        LeadCancellationReason::NoAvailableLead
    );
    assert_eq!(api.game_state().investigating_agent_count(), 2);
    // Everyone else ends up contracting.
    assert_eq!(report.leftover_contracting, 18);
}
