pub mod agent;
pub mod behavior;
pub mod color;
pub mod config;
pub mod constants;
pub mod flocking;
pub mod lifecycle;
pub mod metrics;
pub mod rng;
pub mod scenery;
pub mod spatial;
pub mod taxonomy;
pub mod world;

pub use agent::{ActionType, Agent, AgentId, BirdState, CallType, SpeciesParams, Traits};
pub use behavior::Vocalization;
pub use color::Rgb;
pub use config::{EvolutionSettings, Settings, SimConfig, SimConfigError, SimSettings};
pub use constants::MAX_WORLD_SIZE;
pub use lifecycle::{Death, DeathCause};
pub use metrics::{FlockStats, RunSummary};
pub use taxonomy::{SpeciesAnalysis, TraitSnapshot};
pub use world::{
    ExperimentError, StepTimings, TickReport, World, WorldCommand, WorldInitError,
};
