use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use intellect_core::{
    manage_agents, scalar_from_f64, Agent, AgentAssignment, AgentId, AgentState, Enemy, Expiry,
    GameData, GameSession, GameState, IntellectConfig, Lead, LeadId, Mission, MissionId,
    MissionState, MissionTemplateId, Scalar, TieBreaker, Weapon,
};
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn enemy(rng: &mut SmallRng) -> Enemy {
    Enemy {
        name: "Operative".to_string(),
        skill: scalar_from_f64(rng.gen_range(60.0..140.0)),
        hit_points: scalar_from_f64(rng.gen_range(20.0..40.0)),
        weapon_damage: scalar_from_f64(rng.gen_range(6.0..14.0)),
    }
}

fn session(agent_count: usize) -> GameSession {
    let mut rng = SmallRng::seed_from_u64(agent_count as u64);
    let agents = (0..agent_count)
        .map(|index| {
            let max_hit_points = rng.gen_range(25.0..40.0);
            Agent {
                id: AgentId::new(format!("agent-{index:04}")),
                name: format!("Agent {index}"),
                state: AgentState::Available,
                assignment: AgentAssignment::Standby,
                exhaustion_pct: scalar_from_f64(rng.gen_range(0.0..40.0)),
                hit_points: scalar_from_f64(max_hit_points),
                max_hit_points: scalar_from_f64(max_hit_points),
                skill: scalar_from_f64(rng.gen_range(80.0..160.0)),
                weapon: Weapon {
                    damage: scalar_from_f64(rng.gen_range(8.0..14.0)),
                },
            }
        })
        .collect();
    let missions = (0..agent_count / 8)
        .map(|index| Mission {
            id: MissionId::new(format!("mission-{index}")),
            template_id: MissionTemplateId::new("raid"),
            name: format!("Mission {index}"),
            state: MissionState::Active,
            operation_level: None,
            expires_in: Expiry::Turns(rng.gen_range(1..6)),
            enemies: (0..rng.gen_range(1..4)).map(|_| enemy(&mut rng)).collect(),
            agent_ids: Vec::new(),
        })
        .collect();
    let leads = (0..8)
        .map(|index| Lead {
            id: LeadId::new(format!("lead-{index}")),
            name: format!("Lead {index}"),
            difficulty: rng.gen_range(5..30),
            repeatable: index % 2 == 0,
            depends_on: Vec::new(),
        })
        .collect();

    let state = GameState {
        turn: 1,
        money: Scalar::from_i64(500),
        funding: Scalar::from_i64(200),
        agent_upkeep: Scalar::from_i64(5),
        agents,
        missions,
        transport_cap: (agent_count / 2) as u32,
        training_cap: (agent_count / 10) as u32,
        ..GameState::default()
    };
    GameSession::new(
        state,
        GameData {
            leads,
            mission_templates: Vec::new(),
        },
    )
}

fn bench_turn(c: &mut Criterion) {
    let mut group = c.benchmark_group("turn");
    let config = IntellectConfig::default();

    for size in [16usize, 64, 256, 1024] {
        group.bench_with_input(BenchmarkId::new("agents", size), &size, |b, &size| {
            b.iter_batched(
                || (session(size), TieBreaker::from_seed(size as u64)),
                |(mut api, mut tie_breaker)| {
                    manage_agents(&mut api, &config, &mut tie_breaker)
                        .expect("allocation succeeds");
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(turn_benches, bench_turn);
criterion_main!(turn_benches);
