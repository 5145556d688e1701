use crate::color::Rgb;
use crate::config::SimConfig;
use crate::constants::{
    CHIRP_TIMER_INITIAL_MAX, FOUNDER_INTERVALS, FOUNDER_PALETTE, INTRODUCED_INTERVALS,
    MELODY_DRAWS, STATE_TIMER_INITIAL_MAX,
};
use glam::DVec3;
use rand::Rng;
use rstar::{RTreeObject, AABB};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable agent identity. Assigned monotonically and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bird-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BirdState {
    Idle,
    #[default]
    Flying,
    Singing,
    Foraging,
}

impl BirdState {
    pub const ALL: [BirdState; 4] = [
        BirdState::Idle,
        BirdState::Flying,
        BirdState::Singing,
        BirdState::Foraging,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BirdState::Idle => "IDLE",
            BirdState::Flying => "FLYING",
            BirdState::Singing => "SINGING",
            BirdState::Foraging => "FORAGING",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallType {
    Social,
    Mating,
    Territorial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Feed,
    Distract,
}

/// An observer action waiting to be consumed by the behaviour pass.
///
/// Written once per event from outside the core, read and cleared by the core.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingAction {
    pub kind: ActionType,
    pub timestamp: f64,
}

/// Heritable traits, fixed at birth.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    pub color: Rgb,
    /// Adult body scale factor.
    pub scale: f64,
    /// Base vocal pitch in Hz.
    pub pitch: f64,
    /// Ordered interval ratios, leading with unison.
    pub melody: Vec<f64>,
}

/// Base traits for `IntroduceSpecies`. Not validated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesParams {
    pub color: Rgb,
    pub scale: f64,
    pub pitch: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub position: DVec3,
    pub velocity: DVec3,
    pub traits: Traits,
    /// Simulated seconds since birth.
    pub age: f64,
    pub max_age: f64,
    pub energy: f64,
    pub generation: u32,
    pub state: BirdState,
    /// Ticks until the next state draw.
    pub state_timer: f64,
    /// Ticks until the next vocalization attempt.
    pub chirp_timer: f64,
    pub pending_action: Option<PendingAction>,
    /// Timestamp of the last consumed action; `None` until the first one.
    pub last_action_time: Option<f64>,
    /// Simulation clock at the last vocalization.
    pub last_chirp: f64,
    /// Phase of the idle vertical bob.
    pub bob_phase: f64,
}

impl Agent {
    fn with_traits<R: Rng + ?Sized>(
        id: AgentId,
        position: DVec3,
        traits: Traits,
        generation: u32,
        config: &SimConfig,
        rng: &mut R,
    ) -> Self {
        Self {
            id,
            position,
            velocity: DVec3::new(
                (rng.random::<f64>() - 0.5) * 0.1,
                0.0,
                (rng.random::<f64>() - 0.5) * 0.1,
            ),
            traits,
            age: 0.0,
            max_age: config.lifespan_min + rng.random::<f64>() * config.lifespan_jitter,
            energy: config.initial_energy,
            generation,
            state: BirdState::Flying,
            state_timer: rng.random::<f64>() * STATE_TIMER_INITIAL_MAX,
            chirp_timer: rng.random::<f64>() * CHIRP_TIMER_INITIAL_MAX,
            pending_action: None,
            last_action_time: None,
            last_chirp: 0.0,
            bob_phase: id.0 as f64,
        }
    }

    /// A founder with random palette colour, pitch, scale and melody, placed in
    /// the normal spawn band.
    pub fn founder<R: Rng + ?Sized>(id: AgentId, config: &SimConfig, rng: &mut R) -> Self {
        let position = spawn_position(config, 5.0, rng);
        let traits = Traits {
            color: palette_color(rng),
            scale: 0.5 + rng.random::<f64>() * 0.5,
            pitch: config.base_frequency + rng.random::<f64>() * 600.0,
            melody: draw_melody(&FOUNDER_INTERVALS, rng),
        };
        Self::with_traits(id, position, traits, 0, config, rng)
    }

    /// A member of an introduced species, entering from the elevated band.
    pub fn introduced<R: Rng + ?Sized>(
        id: AgentId,
        params: &SpeciesParams,
        config: &SimConfig,
        rng: &mut R,
    ) -> Self {
        let position = spawn_position(config, 15.0, rng);
        let traits = Traits {
            color: params.color,
            scale: params.scale * (0.9 + rng.random::<f64>() * 0.2),
            pitch: params.pitch * (0.95 + rng.random::<f64>() * 0.1),
            melody: draw_melody(&INTRODUCED_INTERVALS, rng),
        };
        Self::with_traits(id, position, traits, 0, config, rng)
    }

    /// An offspring placed beside `parent`, carrying already-mutated traits.
    pub fn offspring<R: Rng + ?Sized>(
        id: AgentId,
        parent: &Agent,
        traits: Traits,
        config: &SimConfig,
        rng: &mut R,
    ) -> Self {
        let position = parent.position
            + DVec3::new(
                (rng.random::<f64>() - 0.5) * 2.0,
                0.0,
                (rng.random::<f64>() - 0.5) * 2.0,
            );
        Self::with_traits(
            id,
            position,
            traits,
            parent.generation.saturating_add(1),
            config,
            rng,
        )
    }

    pub fn is_juvenile(&self, maturation_age: f64) -> bool {
        self.age < maturation_age
    }
}

/// A uniformly drawn founder palette colour.
pub fn palette_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    let hex = FOUNDER_PALETTE[rng.random_range(0..FOUNDER_PALETTE.len())];
    Rgb::from_hex(hex).unwrap_or(Rgb::new(0xFF, 0x6B, 0x6B))
}

fn draw_melody<R: Rng + ?Sized>(intervals: &[f64], rng: &mut R) -> Vec<f64> {
    let mut melody = Vec::with_capacity(MELODY_DRAWS + 1);
    melody.push(1.0);
    for _ in 0..MELODY_DRAWS {
        melody.push(intervals[rng.random_range(0..intervals.len())]);
    }
    melody
}

/// Horizontal position within 80% of the world, altitude in `[band_floor, band_floor + 10)`.
fn spawn_position<R: Rng + ?Sized>(config: &SimConfig, band_floor: f64, rng: &mut R) -> DVec3 {
    let spread = config.world_size * 0.8;
    DVec3::new(
        (rng.random::<f64>() - 0.5) * spread,
        band_floor + rng.random::<f64>() * 10.0,
        (rng.random::<f64>() - 0.5) * spread,
    )
}

/// Position/velocity record used for neighbour queries against a tick-start snapshot.
#[derive(Clone, Debug)]
pub struct AgentLocation {
    pub id: AgentId,
    pub position: DVec3,
    pub velocity: DVec3,
}

impl From<&Agent> for AgentLocation {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            position: agent.position,
            velocity: agent.velocity,
        }
    }
}

impl RTreeObject for AgentLocation {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position.to_array())
    }
}
