//! Reynolds-style steering for flying agents and the lightweight drift used
//! in every other state.

use crate::agent::{Agent, AgentLocation, BirdState};
use crate::config::{SimConfig, SimSettings};
use crate::constants::{
    ALIGNMENT_WEIGHT, BASE_MAX_FORCE, BOB_AMPLITUDE, BOB_RATE, BOUNDARY_FORCE_SCALE,
    COHESION_WEIGHT, ELDER_AGE_FRACTION, ELDER_SPEED_FACTOR, FORAGING_DAMPING,
    JUVENILE_SPEED_FACTOR, MIN_SPEED_FRACTION, SEPARATION_FORCE_CAP, SEPARATION_PRESCALE,
    SEPARATION_WEIGHT, WANDER_FRACTION, WANDER_VERTICAL_DAMPING,
};
use crate::spatial;
use glam::DVec3;
use rand::Rng;
use rstar::RTree;

/// Soft containment limits. Agents are pushed back, never clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    /// |x| and |z| beyond which the walls push inward.
    pub wall: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl WorldBounds {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            wall: config.world_size / 2.0 - config.wall_margin,
            floor: config.floor_altitude,
            ceiling: config.ceiling_altitude,
        }
    }

    /// Unnormalized push back toward the interior; zero when inside.
    pub fn push(&self, position: DVec3) -> DVec3 {
        let mut force = DVec3::ZERO;
        if position.x > self.wall {
            force.x -= 1.0;
        }
        if position.x < -self.wall {
            force.x += 1.0;
        }
        if position.z > self.wall {
            force.z -= 1.0;
        }
        if position.z < -self.wall {
            force.z += 1.0;
        }
        if position.y < self.floor {
            force.y += 2.0;
        }
        if position.y > self.ceiling {
            force.y -= 1.0;
        }
        force
    }
}

/// Per-tick steering inputs combining structural config with live settings.
#[derive(Clone, Copy, Debug)]
pub struct SteeringParams {
    pub perception_radius: f64,
    pub separation_distance: f64,
    pub base_speed: f64,
    pub speed: f64,
    pub agility: f64,
    pub maturation_age: f64,
    pub bounds: WorldBounds,
    /// Frame delta in seconds; drives only the idle bob.
    pub dt: f64,
}

impl SteeringParams {
    pub fn new(config: &SimConfig, settings: &SimSettings, dt: f64) -> Self {
        Self {
            perception_radius: config.perception_radius,
            separation_distance: config.separation_distance,
            base_speed: config.base_speed,
            speed: settings.speed,
            agility: settings.agility,
            maturation_age: config.maturation_age,
            bounds: WorldBounds::from_config(config),
            dt,
        }
    }

    pub fn max_speed(&self) -> f64 {
        self.base_speed * self.speed
    }

    /// Steering authority scales with speed so slow motion also turns slowly.
    pub fn max_force(&self) -> f64 {
        BASE_MAX_FORCE * self.agility * self.speed
    }

    /// `(min_speed, speed_limit)` for this agent's age.
    pub fn speed_band(&self, agent: &Agent) -> (f64, f64) {
        let age_factor = if agent.age < self.maturation_age {
            JUVENILE_SPEED_FACTOR
        } else if agent.age > agent.max_age * ELDER_AGE_FRACTION {
            ELDER_SPEED_FACTOR
        } else {
            1.0
        };
        let limit = self.max_speed() * age_factor;
        (limit * MIN_SPEED_FRACTION, limit)
    }
}

/// Advance one agent by one tick against the tick-start `snapshot`.
pub fn steer_agent<R: Rng + ?Sized>(
    agent: &mut Agent,
    snapshot: &RTree<AgentLocation>,
    params: &SteeringParams,
    rng: &mut R,
) {
    if agent.state == BirdState::Flying {
        fly(agent, snapshot, params, rng);
    } else {
        drift(agent, params);
    }
}

fn fly<R: Rng + ?Sized>(
    agent: &mut Agent,
    snapshot: &RTree<AgentLocation>,
    params: &SteeringParams,
    rng: &mut R,
) {
    let pos = agent.position;
    let vel = agent.velocity;
    let max_speed = params.max_speed();
    let max_force = params.max_force();

    let mut alignment = DVec3::ZERO;
    let mut cohesion = DVec3::ZERO;
    let mut separation = DVec3::ZERO;
    let mut neighbor_count = 0usize;
    spatial::for_each_neighbor(
        snapshot,
        pos,
        params.perception_radius,
        Some(agent.id),
        |neighbor, dist_sq| {
            alignment += neighbor.velocity;
            cohesion += neighbor.position;
            let dist = dist_sq.sqrt();
            if dist < params.separation_distance && dist > 0.0 {
                separation += (pos - neighbor.position).normalize_or_zero() / dist;
            }
            neighbor_count += 1;
        },
    );

    let mut acceleration = DVec3::ZERO;
    if neighbor_count > 0 {
        let n = neighbor_count as f64;
        let align_force = steer_towards(alignment / n, vel, max_speed, max_force);
        let cohesion_force = steer_towards(cohesion / n - pos, vel, max_speed, max_force);
        let separation_force = steer_towards(
            separation * SEPARATION_PRESCALE,
            vel,
            max_speed,
            max_force * SEPARATION_FORCE_CAP,
        );
        acceleration += align_force * ALIGNMENT_WEIGHT;
        acceleration += cohesion_force * COHESION_WEIGHT;
        acceleration += separation_force * SEPARATION_WEIGHT;
    } else {
        let wander = DVec3::new(
            rng.random::<f64>() - 0.5,
            (rng.random::<f64>() - 0.5) * WANDER_VERTICAL_DAMPING,
            rng.random::<f64>() - 0.5,
        );
        acceleration += wander.normalize_or_zero() * max_force * WANDER_FRACTION;
    }

    let push = params.bounds.push(pos);
    if push.length_squared() > 0.0 {
        acceleration += push.normalize() * max_force * BOUNDARY_FORCE_SCALE;
    }

    let (min_speed, speed_limit) = params.speed_band(agent);
    agent.velocity = clamp_speed(vel + acceleration, min_speed, speed_limit, rng);
    agent.position += agent.velocity;
}

/// Classic `steer = desired - velocity`, with desired rescaled to `max_speed`
/// and the result capped at `max_force`. A zero desired vector yields a
/// braking force against `velocity`, so separation brakes whenever any
/// neighbour is in range.
fn steer_towards(desired: DVec3, velocity: DVec3, max_speed: f64, max_force: f64) -> DVec3 {
    (desired.normalize_or_zero() * max_speed - velocity).clamp_length_max(max_force.max(0.0))
}

/// Rescale `v` into `[min, max]`. A vanishing velocity gets a random heading at `min`.
fn clamp_speed<R: Rng + ?Sized>(v: DVec3, min: f64, max: f64, rng: &mut R) -> DVec3 {
    let len = v.length();
    if len < 1e-12 {
        return random_unit(rng) * min;
    }
    if len < min {
        v * (min / len)
    } else if len > max {
        v * (max / len)
    } else {
        v
    }
}

pub(crate) fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    let v = DVec3::new(
        rng.random::<f64>() - 0.5,
        rng.random::<f64>() - 0.5,
        rng.random::<f64>() - 0.5,
    );
    let unit = v.normalize_or_zero();
    if unit == DVec3::ZERO {
        DVec3::X
    } else {
        unit
    }
}

/// Positional damping while foraging, plus a bounded vertical bob in every
/// non-flying state. No neighbour scan.
fn drift(agent: &mut Agent, params: &SteeringParams) {
    if agent.state == BirdState::Foraging {
        agent.position += agent.velocity;
        agent.velocity *= FORAGING_DAMPING;
    }
    let before = agent.bob_phase.sin();
    agent.bob_phase += BOB_RATE * params.dt;
    agent.position.y += BOB_AMPLITUDE * (agent.bob_phase.sin() - before);
}
