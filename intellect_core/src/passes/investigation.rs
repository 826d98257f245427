//! Lead investigation pass.
//!
//! Keeps `1 + total / agents_per_investigator` agents on investigations.
//! Non-repeatable leads are always started first. Repeatable leads are
//! ranked by the strongest mission they could unlock, restricted to those
//! the current pool could actually win, and once one is running it absorbs
//! every remaining investigator slot.

use std::collections::HashSet;

use tracing::{debug, info};

use super::{agent_ids, without, AgentPool};
use crate::{
    agent::AgentId,
    api::PlayTurnApi,
    config::IntellectConfig,
    feasibility::can_deploy_mission_with_current_resources,
    lead::{InvestigationId, Lead},
    metrics::{LeadCancellation, LeadCancellationReason},
    mission::MissionId,
    rng::{RandomKey, TieBreaker},
    selection::{select_next_best_ready_agents, SelectionOptions},
    state::{GameData, GameState},
    stats::{enemies_threat, AgentWithStats},
    turn::{AllocationError, TurnContext},
};

/// Agents a freshly started investigation of `lead` is staffed with.
pub fn crew_size(lead: &Lead, config: &IntellectConfig) -> usize {
    if lead.repeatable {
        return 1;
    }
    let divisor = config.investigation().difficulty_divisor();
    (lead.difficulty.div_ceil(divisor) as usize).max(1)
}

/// The active investigation of a repeatable lead, if any.
fn active_repeatable_investigation(
    state: &GameState,
    data: &GameData,
) -> Result<Option<InvestigationId>, AllocationError> {
    for investigation in state.lead_investigations.iter().filter(|inv| inv.is_active()) {
        let lead = data
            .lead(&investigation.lead_id)
            .ok_or_else(|| AllocationError::MissingLead(investigation.lead_id.clone()))?;
        if lead.repeatable {
            return Ok(Some(investigation.id.clone()));
        }
    }
    Ok(None)
}

struct RankedLead<'a> {
    lead: &'a Lead,
    rating: f64,
    feasible: bool,
}

/// Rate a repeatable lead by the strongest mission it unlocks and check
/// whether `pool` could deploy to that mission right now. Leads that unlock
/// nothing rate zero and are always feasible.
fn rank_repeatable<'a>(
    lead: &'a Lead,
    state: &GameState,
    data: &GameData,
    pool: &[AgentWithStats],
    config: &IntellectConfig,
    rng: &mut TieBreaker,
) -> RankedLead<'a> {
    let strongest = data
        .templates_unlocked_by(&lead.id)
        .map(|template| (template, enemies_threat(&template.enemies, config.ratings())))
        .max_by(|a, b| a.1.total_cmp(&b.1));

    match strongest {
        None => RankedLead {
            lead,
            rating: 0.0,
            feasible: true,
        },
        Some((template, rating)) => {
            let preview_id = MissionId::new(format!("{}-preview", template.id.as_str()));
            let hypothetical = template.instantiate(preview_id);
            let plan =
                can_deploy_mission_with_current_resources(state, &hypothetical, pool, config, rng);
            RankedLead {
                lead,
                rating,
                feasible: plan.can_deploy(),
            }
        }
    }
}

/// The next lead to start, or `None` when nothing is worth starting.
pub(crate) fn choose_lead<'a>(
    state: &GameState,
    data: &'a GameData,
    pool: &[AgentWithStats],
    config: &IntellectConfig,
    rng: &mut TieBreaker,
) -> Option<&'a Lead> {
    let available: Vec<&Lead> = data
        .leads
        .iter()
        .filter(|lead| state.lead_is_available(lead))
        .collect();

    let one_off: Vec<&Lead> = available
        .iter()
        .copied()
        .filter(|lead| !lead.repeatable)
        .collect();
    if !one_off.is_empty() {
        return Some(*rng.pick(RandomKey::LeadSelection, &one_off));
    }

    let mut ranked: Vec<RankedLead<'a>> = available
        .into_iter()
        .map(|lead| rank_repeatable(lead, state, data, pool, config, rng))
        .filter(|ranked| ranked.feasible)
        .collect();
    let best_rating = ranked
        .iter()
        .map(|ranked| ranked.rating)
        .fold(f64::NEG_INFINITY, f64::max);
    ranked.retain(|ranked| ranked.rating == best_rating);

    let fewest = ranked
        .iter()
        .map(|ranked| state.investigation_count(&ranked.lead.id))
        .min()?;
    let least_worked: Vec<&Lead> = ranked
        .into_iter()
        .filter(|ranked| state.investigation_count(&ranked.lead.id) == fewest)
        .map(|ranked| ranked.lead)
        .collect();
    Some(*rng.pick(RandomKey::LeadSelection, &least_worked))
}

pub fn assign_to_leads<A: PlayTurnApi + ?Sized>(
    ctx: &mut TurnContext<'_, A>,
    mut pool: AgentPool,
) -> Result<AgentPool, AllocationError> {
    let (total_agent_count, investigating) = {
        let state = ctx.api.game_state();
        (state.total_agent_count(), state.investigating_agent_count())
    };
    let target = 1 + total_agent_count / ctx.config.investigation().agents_per_investigator();
    let mut needed = target.saturating_sub(investigating);
    let options = SelectionOptions::from_config(ctx.config.selection());
    let no_exclusions: HashSet<AgentId> = HashSet::new();
    let mut selected_count = 0;

    debug!(
        target: "basic_intellect::investigation",
        target_investigators = target,
        investigating,
        needed,
        "investigation.needed={}",
        needed
    );

    while needed > 0 {
        let running = active_repeatable_investigation(ctx.api.game_state(), ctx.api.game_data())?;
        if let Some(investigation_id) = running {
            let picked = select_next_best_ready_agents(
                &pool,
                needed,
                &no_exclusions,
                selected_count,
                total_agent_count,
                options,
                ctx.rng,
            );
            if !picked.is_empty() {
                let ids = agent_ids(&picked);
                ctx.api.add_agents_to_investigation(&investigation_id, &ids)?;
                ctx.report.agents_added_to_investigations += ids.len();
                debug!(
                    target: "basic_intellect::investigation",
                    investigation = %investigation_id,
                    agents = ids.len(),
                    "investigation.reinforced={}",
                    investigation_id
                );
                let consumed: HashSet<AgentId> = ids.into_iter().collect();
                pool = without(pool, &consumed);
            }
            break;
        }

        let chosen = choose_lead(
            ctx.api.game_state(),
            ctx.api.game_data(),
            &pool,
            ctx.config,
            ctx.rng,
        )
        .cloned();
        let Some(lead) = chosen else {
            ctx.report.lead_cancellations.push(LeadCancellation {
                lead_id: None,
                reason: LeadCancellationReason::NoAvailableLead,
                details: format!("{needed} investigator slots left without a lead to work"),
            });
            break;
        };

        let crew = crew_size(&lead, ctx.config);
        let picked = select_next_best_ready_agents(
            &pool,
            crew,
            &no_exclusions,
            selected_count,
            total_agent_count,
            options,
            ctx.rng,
        );
        if picked.len() < crew {
            info!(
                target: "basic_intellect::investigation",
                lead = %lead.id,
                crew,
                found = picked.len(),
                "investigation.cancelled={}",
                lead.id
            );
            ctx.report.lead_cancellations.push(LeadCancellation {
                lead_id: Some(lead.id.clone()),
                reason: LeadCancellationReason::InsufficientAgents,
                details: format!(
                    "lead {} needs {} agents, only {} ready",
                    lead.id,
                    crew,
                    picked.len()
                ),
            });
            break;
        }

        let ids = agent_ids(&picked);
        ctx.api.start_lead_investigation(&lead.id, &ids)?;
        ctx.report.investigations_started += 1;
        ctx.report.agents_started_investigating += ids.len();
        debug!(
            target: "basic_intellect::investigation",
            lead = %lead.id,
            agents = ids.len(),
            "investigation.started={}",
            lead.id
        );
        selected_count += ids.len();
        needed = needed.saturating_sub(ids.len());
        let consumed: HashSet<AgentId> = ids.into_iter().collect();
        pool = without(pool, &consumed);
    }

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentAssignment, AgentState};
    use crate::lead::{InvestigationState, LeadId, LeadInvestigation};
    use crate::scalar::scalar_zero;
    use crate::session::IssuedCommand;
    use crate::stats::enrich_agents;
    use crate::test_support::{base_state, lead, roster, session, template};

    #[test]
    fn crew_size_rounds_difficulty_up() {
        let config = IntellectConfig::default();
        assert_eq!(crew_size(&lead("a", 10, false), &config), 2);
        assert_eq!(crew_size(&lead("b", 11, false), &config), 3);
        assert_eq!(crew_size(&lead("c", 0, false), &config), 1);
        assert_eq!(crew_size(&lead("d", 40, true), &config), 1);
    }

    #[test]
    fn twenty_agents_start_one_lead_with_two_investigators() {
        let data = GameData {
            leads: vec![lead("criminal_contacts", 10, false)],
            mission_templates: Vec::new(),
        };
        let mut api = session(base_state(roster(20)), data);
        let config = IntellectConfig::default();
        let pool = enrich_agents(&api.game_state().agents, &config);
        let mut rng = TieBreaker::from_seed(2);

        let mut ctx = TurnContext::new(&mut api, &config, &mut rng);
        let pool = assign_to_leads(&mut ctx, pool).expect("pass succeeds");
        assert_eq!(ctx.report.investigations_started, 1);
        assert_eq!(ctx.report.agents_started_investigating, 2);
        assert_eq!(
            ctx.report.lead_cancellations[0].reason,
            LeadCancellationReason::NoAvailableLead
        );
        assert_eq!(pool.len(), 18);
        assert_eq!(api.game_state().investigating_agent_count(), 2);
    }

    #[test]
    fn running_repeatable_investigation_absorbs_remaining_slots() {
        let mut agents = roster(20);
        let investigation_id = InvestigationId::new("investigation-1");
        agents[0].state = AgentState::Investigating;
        agents[0].assignment = AgentAssignment::Investigation(investigation_id.clone());
        let mut state = base_state(agents);
        state.lead_investigations.push(LeadInvestigation {
            id: investigation_id.clone(),
            lead_id: LeadId::new("safehouse_sweep"),
            state: InvestigationState::Active,
            agent_ids: vec![AgentId::new("agent-000")],
            progress: scalar_zero(),
        });
        let data = GameData {
            leads: vec![lead("safehouse_sweep", 20, true), lead("informant", 5, false)],
            mission_templates: Vec::new(),
        };
        let mut api = session(state, data);
        let config = IntellectConfig::default();
        let pool = enrich_agents(&api.game_state().agents, &config);
        let mut rng = TieBreaker::from_seed(2);

        let mut ctx = TurnContext::new(&mut api, &config, &mut rng);
        assign_to_leads(&mut ctx, pool).expect("pass succeeds");
        // Target 3, one already investigating.
        assert_eq!(ctx.report.agents_added_to_investigations, 2);
        assert_eq!(ctx.report.investigations_started, 0);
        match &api.command_log()[0] {
            IssuedCommand::AddToInvestigation {
                investigation_id: id,
                agent_ids,
            } => {
                assert_eq!(id, &investigation_id);
                assert_eq!(agent_ids.len(), 2);
            }
            other => panic!("expected a batch add, got {other:?}"),
        }
    }

    #[test]
    fn new_repeatable_lead_starts_with_one_agent_then_takes_the_rest() {
        let data = GameData {
            leads: vec![lead("street_rumours", 15, true)],
            mission_templates: Vec::new(),
        };
        let mut api = session(base_state(roster(20)), data);
        let config = IntellectConfig::default();
        let pool = enrich_agents(&api.game_state().agents, &config);
        let mut rng = TieBreaker::from_seed(6);

        let mut ctx = TurnContext::new(&mut api, &config, &mut rng);
        let pool = assign_to_leads(&mut ctx, pool).expect("pass succeeds");
        assert_eq!(ctx.report.investigations_started, 1);
        assert_eq!(ctx.report.agents_started_investigating, 1);
        assert_eq!(ctx.report.agents_added_to_investigations, 2);
        assert!(ctx.report.lead_cancellations.is_empty());
        assert_eq!(pool.len(), 17);

        let log = api.command_log();
        assert_eq!(log.len(), 2);
        let started = match &log[0] {
            IssuedCommand::StartInvestigation {
                lead_id,
                investigation_id,
                agent_ids,
            } => {
                assert_eq!(lead_id, &LeadId::new("street_rumours"));
                assert_eq!(agent_ids.len(), 1);
                investigation_id.clone()
            }
            other => panic!("expected a new investigation, got {other:?}"),
        };
        match &log[1] {
            IssuedCommand::AddToInvestigation {
                investigation_id,
                agent_ids,
            } => {
                assert_eq!(investigation_id, &started);
                assert_eq!(agent_ids.len(), 2);
            }
            other => panic!("expected a batch add, got {other:?}"),
        }
        assert_eq!(api.game_state().investigating_agent_count(), 3);
    }

    #[test]
    fn one_off_leads_take_priority_over_repeatable_ones() {
        let state = base_state(roster(10));
        let data = GameData {
            leads: vec![lead("patrol", 5, true), lead("informant", 5, false)],
            mission_templates: Vec::new(),
        };
        let config = IntellectConfig::default();
        let pool = enrich_agents(&state.agents, &config);
        let mut rng = TieBreaker::from_seed(0);

        let chosen = choose_lead(&state, &data, &pool, &config, &mut rng).expect("lead chosen");
        assert_eq!(chosen.id, LeadId::new("informant"));
    }

    #[test]
    fn strongest_winnable_repeatable_lead_is_preferred() {
        let state = base_state(roster(5));
        let data = GameData {
            leads: vec![
                lead("street_rumours", 5, true),
                lead("warehouse_tip", 5, true),
                lead("fortress_intel", 5, true),
            ],
            mission_templates: vec![
                template("mugging", "street_rumours", 1),
                template("warehouse", "warehouse_tip", 3),
                // Beyond what five rookies can field.
                template("fortress", "fortress_intel", 8),
            ],
        };
        let config = IntellectConfig::default();
        let pool = enrich_agents(&state.agents, &config);
        let mut rng = TieBreaker::from_seed(0);

        let chosen = choose_lead(&state, &data, &pool, &config, &mut rng).expect("lead chosen");
        assert_eq!(chosen.id, LeadId::new("warehouse_tip"));
    }

    #[test]
    fn equal_leads_fall_back_to_fewest_past_investigations() {
        let mut state = base_state(roster(5));
        state
            .lead_investigation_counts
            .insert(LeadId::new("patrol_north"), 3);
        state
            .lead_investigation_counts
            .insert(LeadId::new("patrol_south"), 1);
        let data = GameData {
            leads: vec![lead("patrol_north", 5, true), lead("patrol_south", 5, true)],
            mission_templates: Vec::new(),
        };
        let config = IntellectConfig::default();
        let pool = enrich_agents(&state.agents, &config);
        let mut rng = TieBreaker::from_seed(0);

        let chosen = choose_lead(&state, &data, &pool, &config, &mut rng).expect("lead chosen");
        assert_eq!(chosen.id, LeadId::new("patrol_south"));
    }

    #[test]
    fn unstaffable_lead_is_cancelled() {
        let data = GameData {
            leads: vec![lead("deep_cover", 50, false)],
            mission_templates: Vec::new(),
        };
        let mut api = session(base_state(roster(6)), data);
        let config = IntellectConfig::default();
        let pool = enrich_agents(&api.game_state().agents, &config);
        let mut rng = TieBreaker::from_seed(2);

        let mut ctx = TurnContext::new(&mut api, &config, &mut rng);
        let pool = assign_to_leads(&mut ctx, pool).expect("pass succeeds");
        let cancellation = &ctx.report.lead_cancellations[0];
        assert_eq!(cancellation.reason, LeadCancellationReason::InsufficientAgents);
        assert_eq!(cancellation.lead_id, Some(LeadId::new("deep_cover")));
        assert_eq!(pool.len(), 6);
        assert!(api.command_log().is_empty());
    }

    #[test]
    fn active_investigation_of_unknown_lead_is_fatal() {
        let mut state = base_state(roster(5));
        state.lead_investigations.push(LeadInvestigation {
            id: InvestigationId::new("investigation-1"),
            lead_id: LeadId::new("vanished"),
            state: InvestigationState::Active,
            agent_ids: Vec::new(),
            progress: scalar_zero(),
        });
        let mut api = session(state, GameData::default());
        let config = IntellectConfig::default();
        let pool = enrich_agents(&api.game_state().agents, &config);
        let mut rng = TieBreaker::from_seed(2);

        let mut ctx = TurnContext::new(&mut api, &config, &mut rng);
        let err = assign_to_leads(&mut ctx, pool).expect_err("unknown lead aborts the pass");
        assert!(matches!(err, AllocationError::MissingLead(id) if id == LeadId::new("vanished")));
    }
}
