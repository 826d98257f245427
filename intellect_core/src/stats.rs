//! Per-turn derived agent metrics shared by every allocation pass.

use crate::{
    agent::{Agent, AgentAssignment, AgentId},
    config::{IntellectConfig, RatingConfig},
    mission::{Enemy, Mission},
    scalar::{scalar_from_f64, Scalar},
    state::GameState,
};

/// An assignable agent annotated with the numbers selection passes compare.
///
/// Rebuilt every turn and dropped when the turn resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentWithStats {
    pub agent: Agent,
    pub contracting_income: Scalar,
    pub combat_rating: f64,
    pub exhaustion_pct_value: f64,
    pub is_in_training: bool,
}

impl AgentWithStats {
    pub fn from_agent(agent: &Agent, config: &IntellectConfig) -> Self {
        Self {
            agent: agent.clone(),
            contracting_income: contracting_income(agent, config),
            combat_rating: agent_combat_rating(agent, config.ratings()),
            exhaustion_pct_value: agent.exhaustion_pct.to_f64(),
            is_in_training: agent.is_in_training(),
        }
    }

    pub fn id(&self) -> &AgentId {
        &self.agent.id
    }
}

/// Project the live roster onto the agents passes may assign this turn.
pub fn enrich_agents(agents: &[Agent], config: &IntellectConfig) -> Vec<AgentWithStats> {
    agents
        .iter()
        .filter(|agent| agent.is_assignable())
        .map(|agent| AgentWithStats::from_agent(agent, config))
        .collect()
}

fn fraction(value: f64, reference: f64) -> f64 {
    if reference <= 0.0 {
        0.0
    } else {
        value / reference
    }
}

/// Skill scaled by toughness and firepower; the reference agent rates 1.0.
pub fn combat_rating_of(skill: f64, hit_points: f64, weapon_damage: f64, ratings: &RatingConfig) -> f64 {
    let hp_fraction = fraction(hit_points, ratings.reference_hit_points());
    let damage_fraction = fraction(weapon_damage, ratings.reference_weapon_damage());
    let multiplier = (hp_fraction + damage_fraction) / 2.0;
    fraction(skill * multiplier, ratings.reference_skill())
}

pub fn agent_combat_rating(agent: &Agent, ratings: &RatingConfig) -> f64 {
    combat_rating_of(
        agent.skill.to_f64(),
        agent.max_hit_points.to_f64(),
        agent.weapon.damage.to_f64(),
        ratings,
    )
}

/// What an agent brings to a fight right now: current hit points and
/// skill worn down by exhaustion.
pub fn agent_threat(agent: &Agent, ratings: &RatingConfig) -> f64 {
    let exhaustion = agent.exhaustion_pct.to_f64().clamp(0.0, 100.0);
    let effective_skill = agent.skill.to_f64() * (1.0 - exhaustion / 100.0);
    combat_rating_of(
        effective_skill,
        agent.hit_points.to_f64(),
        agent.weapon.damage.to_f64(),
        ratings,
    )
}

pub fn enemy_rating(enemy: &Enemy, ratings: &RatingConfig) -> f64 {
    combat_rating_of(
        enemy.skill.to_f64(),
        enemy.hit_points.to_f64(),
        enemy.weapon_damage.to_f64(),
        ratings,
    )
}

pub fn enemies_threat(enemies: &[Enemy], ratings: &RatingConfig) -> f64 {
    enemies.iter().map(|enemy| enemy_rating(enemy, ratings)).sum()
}

/// Combined rating of everything waiting at the mission site.
pub fn mission_enemy_threat(mission: &Mission, ratings: &RatingConfig) -> f64 {
    enemies_threat(&mission.enemies, ratings)
}

pub fn contracting_income(agent: &Agent, config: &IntellectConfig) -> Scalar {
    let reference_skill = scalar_from_f64(config.ratings().reference_skill());
    if reference_skill <= Scalar::zero() {
        return Scalar::zero();
    }
    config.contracting().base_income() * agent.skill / reference_skill
}

/// Income produced this turn by agents already on contracting duty.
pub fn contracting_income_total(state: &GameState, config: &IntellectConfig) -> Scalar {
    state
        .agents
        .iter()
        .filter(|agent| !agent.is_terminated() && agent.assignment == AgentAssignment::Contracting)
        .map(|agent| contracting_income(agent, config))
        .sum()
}

/// Net money change expected at the end of this turn.
pub fn projected_money_income(state: &GameState, config: &IntellectConfig) -> Scalar {
    state.funding + contracting_income_total(state, config) - state.agent_upkeep_total()
}
