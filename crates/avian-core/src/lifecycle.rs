use crate::agent::{palette_color, Agent, AgentId, BirdState, Traits};
use crate::config::{EvolutionSettings, SimConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    OldAge,
    Starvation,
}

/// One agent culled during a tick, with its age at death.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Death {
    pub agent_id: AgentId,
    pub cause: DeathCause,
    pub age: f64,
}

/// Advance age and energy by `dt` seconds. Energy stays within `[0, max_energy]`.
pub fn metabolize(agent: &mut Agent, config: &SimConfig, evolution: &EvolutionSettings, dt: f64) {
    agent.age += dt * evolution.aging_speed;
    agent.energy -= config.metabolic_rate * dt;
    if agent.state == BirdState::Foraging {
        agent.energy += config.foraging_rate * dt * evolution.food_abundance;
    }
    agent.energy = agent.energy.clamp(0.0, config.max_energy);
}

/// Eligibility is checked before the Bernoulli draw, so ineligible agents
/// consume no randomness.
pub fn wants_to_reproduce<R: Rng + ?Sized>(
    agent: &Agent,
    config: &SimConfig,
    dt: f64,
    rng: &mut R,
) -> bool {
    agent.age > config.maturation_age
        && agent.energy > config.reproduction_threshold
        && rng.random::<f64>() < config.base_reproduction_rate * dt
}

/// Copy `parent` traits with per-trait mutation scaled by `mutation_rate`.
///
/// The rate is used as given; values outside `[0, 1]` saturate or amplify
/// the jitter but never panic.
pub fn mutate_traits<R: Rng + ?Sized>(parent: &Traits, mutation_rate: f64, rng: &mut R) -> Traits {
    let color = if rng.random::<f64>() < mutation_rate {
        palette_color(rng)
    } else {
        parent.color
    };
    let pitch = parent.pitch + (rng.random::<f64>() - 0.5) * 100.0 * mutation_rate;
    let scale = parent.scale * (1.0 + (rng.random::<f64>() - 0.5) * 0.2 * mutation_rate);
    let mut melody = parent.melody.clone();
    if !melody.is_empty() && rng.random::<f64>() < mutation_rate {
        let idx = rng.random_range(0..melody.len());
        melody[idx] = (melody[idx] + (rng.random::<f64>() - 0.5) * 0.5).max(1.0);
    }
    Traits {
        color,
        scale,
        pitch,
        melody,
    }
}

pub fn death_cause(agent: &Agent) -> Option<DeathCause> {
    if agent.age > agent.max_age {
        Some(DeathCause::OldAge)
    } else if agent.energy <= 0.0 {
        Some(DeathCause::Starvation)
    } else {
        None
    }
}
