use tracing::debug;

use crate::{
    agent::AgentId,
    api::PlayTurnApi,
    turn::{AllocationError, TurnContext},
};

/// Pull worn-out agents off training, contracting and investigations so
/// they rest instead of being reassigned this turn.
pub fn unassign_exhausted_agents<A: PlayTurnApi + ?Sized>(
    ctx: &mut TurnContext<'_, A>,
) -> Result<(), AllocationError> {
    let threshold = ctx.config.recall().exhaustion_threshold_pct();
    let exhausted: Vec<AgentId> = ctx
        .api
        .game_state()
        .agents
        .iter()
        .filter(|agent| agent.is_recallable() && agent.exhaustion_pct >= threshold)
        .map(|agent| agent.id.clone())
        .collect();

    if exhausted.is_empty() {
        return Ok(());
    }

    ctx.api.recall_agents(&exhausted)?;
    ctx.report.recalled_exhausted = exhausted.len();
    debug!(
        target: "basic_intellect::recall",
        recalled = exhausted.len(),
        threshold = %threshold,
        "recall.exhausted={}",
        exhausted.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentAssignment, AgentState};
    use crate::config::IntellectConfig;
    use crate::lead::InvestigationId;
    use crate::metrics::TurnReport;
    use crate::rng::TieBreaker;
    use crate::scalar::scalar_from_f64;
    use crate::state::GameData;
    use crate::test_support::{base_state, roster, session};

    #[test]
    fn recalls_only_tired_agents_on_recallable_duty() {
        let mut agents = roster(5);
        agents[0].state = AgentState::Contracting;
        agents[0].assignment = AgentAssignment::Contracting;
        agents[0].exhaustion_pct = scalar_from_f64(30.0);
        agents[1].state = AgentState::InTraining;
        agents[1].assignment = AgentAssignment::Training;
        agents[1].exhaustion_pct = scalar_from_f64(45.0);
        agents[2].state = AgentState::Investigating;
        agents[2].assignment = AgentAssignment::Investigation(InvestigationId::new("investigation-1"));
        agents[2].exhaustion_pct = scalar_from_f64(29.5);
        // Resting agents are never recalled, however tired.
        agents[3].exhaustion_pct = scalar_from_f64(80.0);
        agents[4].state = AgentState::OnMission;
        agents[4].exhaustion_pct = scalar_from_f64(80.0);

        let mut api = session(base_state(agents), GameData::default());
        let config = IntellectConfig::default();
        let mut rng = TieBreaker::from_seed(1);
        let mut ctx = TurnContext::new(&mut api, &config, &mut rng);

        unassign_exhausted_agents(&mut ctx).expect("recall succeeds");
        assert_eq!(ctx.report.recalled_exhausted, 2);

        let state = api.game_state();
        assert_eq!(state.agents[0].state, AgentState::InTransit);
        assert_eq!(state.agents[0].assignment, AgentAssignment::Standby);
        assert_eq!(state.agents[1].state, AgentState::Available);
        assert_eq!(state.agents[2].state, AgentState::Investigating);
    }

    #[test]
    fn nothing_to_recall_issues_no_command() {
        let mut api = session(base_state(roster(3)), GameData::default());
        let config = IntellectConfig::default();
        let mut rng = TieBreaker::from_seed(1);
        let mut ctx = TurnContext::new(&mut api, &config, &mut rng);

        unassign_exhausted_agents(&mut ctx).expect("recall succeeds");
        assert_eq!(ctx.report, TurnReport::new(1));
        assert!(api.command_log().is_empty());
    }
}
