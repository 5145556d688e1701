//! Per-agent state machine: timed state draws, observer actions and calls.

use crate::agent::{ActionType, Agent, AgentId, BirdState, CallType};
use crate::constants::{
    CHIRP_RETRY_DELAY, DISTRACT_BURST_FACTOR, DISTRACT_DWELL, FEED_DWELL, FEED_PITCH_LIFT,
    FEED_SINK_SPEED, STAGNANT_SPEED_SQ, STATE_DWELL_BASE, STATE_DWELL_JITTER,
};
use crate::flocking::random_unit;
use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A call handed to the audio collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vocalization {
    pub agent_id: AgentId,
    pub call: CallType,
    pub pitch: f64,
    pub melody: Vec<f64>,
}

#[derive(Clone, Copy, Debug)]
pub struct BehaviorParams {
    pub maturation_age: f64,
    pub crowding_threshold: usize,
    pub base_speed: f64,
    pub speed: f64,
    /// Simulation clock, recorded on each call.
    pub clock: f64,
}

/// Cumulative thresholds for (flying, idle, foraging); singing takes the rest.
const ADULT_STATE_CDF: [f64; 3] = [0.6, 0.8, 0.9];
const JUVENILE_STATE_CDF: [f64; 3] = [0.4, 0.6, 0.9];

/// Run one tick of the state machine for `agent`.
///
/// `listeners` counts other agents within the social radius of a position; it
/// is only invoked when a call is actually attempted.
pub fn update_behavior<R, F>(
    agent: &mut Agent,
    params: &BehaviorParams,
    mut listeners: F,
    rng: &mut R,
    calls: &mut Vec<Vocalization>,
) where
    R: Rng + ?Sized,
    F: FnMut(DVec3, AgentId) -> usize,
{
    agent.state_timer -= 1.0;
    agent.chirp_timer -= 1.0;

    if let Some(action) = agent.pending_action.take() {
        if agent
            .last_action_time
            .is_none_or(|last| action.timestamp > last)
        {
            agent.last_action_time = Some(action.timestamp);
            trace!(agent = %agent.id, kind = ?action.kind, "consumed action");
            apply_action(agent, action.kind, params, rng, calls);
        }
    }

    if agent.state_timer <= 0.0 {
        agent.state_timer = STATE_DWELL_BASE + rng.random::<f64>() * STATE_DWELL_JITTER;
        agent.state = draw_state(agent.is_juvenile(params.maturation_age), rng);
        if agent.state == BirdState::Flying && agent.velocity.length_squared() < STAGNANT_SPEED_SQ
        {
            agent.velocity = random_unit(rng) * params.base_speed * params.speed;
        }
    }

    if agent.chirp_timer <= 0.0 && agent.state != BirdState::Flying {
        let probability = if agent.state == BirdState::Singing {
            0.8
        } else {
            0.3
        };
        if rng.random::<f64>() < probability {
            let count = listeners(agent.position, agent.id);
            let call = classify_call(count, agent.age > params.maturation_age, params);
            agent.chirp_timer = rearm_delay(call, rng);
            let pitch = agent.traits.pitch;
            emit(agent, call, pitch, params.clock, calls);
        } else {
            agent.chirp_timer = CHIRP_RETRY_DELAY;
        }
    }
}

fn apply_action<R: Rng + ?Sized>(
    agent: &mut Agent,
    kind: ActionType,
    params: &BehaviorParams,
    rng: &mut R,
    calls: &mut Vec<Vocalization>,
) {
    match kind {
        ActionType::Feed => {
            agent.state = BirdState::Foraging;
            agent.state_timer = FEED_DWELL;
            agent.velocity = DVec3::new(0.0, -FEED_SINK_SPEED, 0.0);
            let pitch = agent.traits.pitch * FEED_PITCH_LIFT;
            emit(agent, CallType::Social, pitch, params.clock, calls);
        }
        ActionType::Distract => {
            agent.state = BirdState::Flying;
            agent.state_timer = DISTRACT_DWELL;
            let burst = params.base_speed * DISTRACT_BURST_FACTOR * params.speed;
            let heading = DVec3::new(
                (rng.random::<f64>() - 0.5) * 2.0,
                0.5 + rng.random::<f64>(),
                (rng.random::<f64>() - 0.5) * 2.0,
            );
            agent.velocity = heading.normalize_or_zero() * burst;
            let pitch = agent.traits.pitch;
            emit(agent, CallType::Territorial, pitch, params.clock, calls);
        }
    }
}

fn emit(agent: &mut Agent, call: CallType, pitch: f64, clock: f64, calls: &mut Vec<Vocalization>) {
    agent.last_chirp = clock;
    calls.push(Vocalization {
        agent_id: agent.id,
        call,
        pitch,
        melody: agent.traits.melody.clone(),
    });
}

pub fn draw_state<R: Rng + ?Sized>(juvenile: bool, rng: &mut R) -> BirdState {
    let cdf = if juvenile {
        JUVENILE_STATE_CDF
    } else {
        ADULT_STATE_CDF
    };
    let roll = rng.random::<f64>();
    if roll < cdf[0] {
        BirdState::Flying
    } else if roll < cdf[1] {
        BirdState::Idle
    } else if roll < cdf[2] {
        BirdState::Foraging
    } else {
        BirdState::Singing
    }
}

/// Crowding wins over courtship; a lone listener only draws a mating call from an adult.
pub fn classify_call(listeners: usize, adult: bool, params: &BehaviorParams) -> CallType {
    if listeners > params.crowding_threshold {
        CallType::Territorial
    } else if listeners == 1 && adult {
        CallType::Mating
    } else {
        CallType::Social
    }
}

/// Ticks until the next call attempt. Territorial calls re-arm fastest.
fn rearm_delay<R: Rng + ?Sized>(call: CallType, rng: &mut R) -> f64 {
    match call {
        CallType::Territorial => 80.0,
        CallType::Social => 200.0 + rng.random::<f64>() * 400.0,
        CallType::Mating => 300.0 + rng.random::<f64>() * 400.0,
    }
}
