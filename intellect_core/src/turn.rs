use thiserror::Error;
use tracing::{debug, info};

use crate::{
    api::{ApiError, PlayTurnApi},
    config::IntellectConfig,
    lead::LeadId,
    metrics::TurnReport,
    passes::{contracting, deployment, investigation, recall, training},
    rng::TieBreaker,
    stats::enrich_agents,
};

#[derive(Debug, Error)]
pub enum AllocationError {
    #[error(transparent)]
    Rejected(#[from] ApiError),
    #[error("active investigation refers to unknown lead '{0}'")]
    MissingLead(LeadId),
}

/// Everything a pass needs besides the agent pool it is handed.
pub struct TurnContext<'a, A: PlayTurnApi + ?Sized> {
    pub api: &'a mut A,
    pub config: &'a IntellectConfig,
    pub rng: &'a mut TieBreaker,
    pub report: TurnReport,
}

impl<'a, A: PlayTurnApi + ?Sized> TurnContext<'a, A> {
    pub fn new(api: &'a mut A, config: &'a IntellectConfig, rng: &'a mut TieBreaker) -> Self {
        let report = TurnReport::new(api.game_state().turn);
        Self {
            api,
            config,
            rng,
            report,
        }
    }
}

/// Allocate every assignable agent for the current turn.
///
/// Passes run in a fixed order, each handed the pool the previous one left
/// behind. Infeasible missions or leads are skipped and recorded in the
/// report; a command rejected by the game aborts the turn.
pub fn manage_agents<A: PlayTurnApi + ?Sized>(
    api: &mut A,
    config: &IntellectConfig,
    rng: &mut TieBreaker,
) -> Result<TurnReport, AllocationError> {
    let mut ctx = TurnContext::new(api, config, rng);

    if enrich_agents(&ctx.api.game_state().agents, ctx.config).is_empty() {
        debug!(
            target: "basic_intellect::turn",
            turn = ctx.report.turn,
            "turn.skipped=no_assignable_agents"
        );
        return Ok(ctx.report);
    }

    recall::unassign_exhausted_agents(&mut ctx)?;

    let pool = enrich_agents(&ctx.api.game_state().agents, ctx.config);
    ctx.report.initial_pool = pool.len();

    let pool = contracting::assign_urgent_contracting(&mut ctx, pool)?;
    let pool = deployment::deploy_to_missions(&mut ctx, pool)?;
    let pool = contracting::assign_baseline_contracting(&mut ctx, pool)?;
    let pool = investigation::assign_to_leads(&mut ctx, pool)?;
    let pool = training::assign_to_training(&mut ctx, pool)?;
    let pool = contracting::assign_leftover_contracting(&mut ctx, pool)?;
    ctx.report.remaining_pool = pool.len();

    let report = ctx.report;
    info!(
        target: "basic_intellect::turn",
        turn = report.turn,
        initial_pool = report.initial_pool,
        recalled = report.recalled_exhausted,
        contracting = report.contracting_total(),
        missions = report.missions_deployed,
        deployed = report.agents_deployed,
        investigating = report.investigators_total(),
        trained = report.agents_trained,
        remaining = report.remaining_pool,
        "turn.allocated"
    );
    Ok(report)
}
