mod common;

use common::{ensure_test_config, state_with};
use intellect_core::{
    load_intellect_config_from_env, manage_agents, GameData, GameSession, Lead, LeadId,
    TieBreaker,
};
use integration_tests::fixture_path;

#[test]
fn config_path_from_environment_is_honoured() {
    ensure_test_config();
    let (config, metadata) = load_intellect_config_from_env();

    assert_eq!(
        metadata.path(),
        Some(&fixture_path("test_intellect_config.json"))
    );
    assert_eq!(config.investigation().agents_per_investigator(), 5);
    assert_eq!(config.investigation().difficulty_divisor(), 2);
    // Sections absent from the file keep their defaults.
    assert_eq!(config.recall().exhaustion_threshold_pct().to_f64(), 30.0);
}

#[test]
fn loaded_config_drives_investigation_staffing() {
    ensure_test_config();
    let (config, _) = load_intellect_config_from_env();
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
    let mut api = GameSession::new(state_with(20, 10), data);
    let mut rng = TieBreaker::from_seed(5);

    let report = manage_agents(&mut api, &config, &mut rng).expect("turn succeeds");

    // Difficulty 10 over divisor 2.
    assert_eq!(report.agents_started_investigating, 5);
}
