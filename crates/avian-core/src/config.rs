use serde::{Deserialize, Serialize};

/// Structural constants of a simulation run. Validated once at world construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Deterministic seed for reproducible simulation runs.
    pub seed: u64,
    /// Width/depth of the square world; x and z span `[-world_size/2, world_size/2]`.
    pub world_size: f64,
    /// Number of founders seeded at construction.
    pub initial_population: usize,
    /// Number of static trees generated at construction.
    pub tree_count: usize,
    /// Base flight speed in world units per tick.
    pub base_speed: f64,
    /// Neighbour radius for flocking and flock connectivity.
    pub perception_radius: f64,
    /// Radius inside which neighbours repel each other.
    pub separation_distance: f64,
    /// Radius used to count listeners when classifying a call.
    pub social_radius: f64,
    /// Listener count above which a call becomes territorial.
    pub crowding_threshold: usize,
    /// Distance from the world edge at which the soft walls engage.
    pub wall_margin: f64,
    /// Altitude below which agents are pushed upward.
    pub floor_altitude: f64,
    /// Altitude above which agents are pushed downward.
    pub ceiling_altitude: f64,
    /// Lowest founder base pitch (Hz); founders draw from `[base, base + 600)`.
    pub base_frequency: f64,
    /// Energy assigned to every newly created agent.
    pub initial_energy: f64,
    /// Upper bound of the energy band.
    pub max_energy: f64,
    /// Flat energy drain per simulated second.
    pub metabolic_rate: f64,
    /// Energy gain per simulated second while foraging, before food abundance.
    pub foraging_rate: f64,
    /// Energy an agent must exceed to reproduce.
    pub reproduction_threshold: f64,
    /// Energy deducted from a parent per offspring.
    pub reproduction_cost: f64,
    /// Age (seconds) below which an agent is juvenile.
    pub maturation_age: f64,
    /// Per-second reproduction probability of an eligible agent.
    pub base_reproduction_rate: f64,
    /// Minimum lifespan in seconds.
    pub lifespan_min: f64,
    /// Random lifespan extension in seconds, drawn uniformly.
    pub lifespan_jitter: f64,
    /// Wall-clock seconds between telemetry samples.
    pub stats_interval: f64,
    /// Optional carrying capacity for reproduction. `None` means unbounded.
    pub max_population: Option<usize>,
    /// Frame delta used by headless runs.
    pub frame_dt: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_size: 250.0,
            initial_population: 40,
            tree_count: 150,
            base_speed: 0.15,
            perception_radius: 10.0,
            separation_distance: 2.0,
            social_radius: 8.0,
            crowding_threshold: 2,
            wall_margin: 5.0,
            floor_altitude: 3.0,
            ceiling_altitude: 30.0,
            base_frequency: 500.0,
            initial_energy: 60.0,
            max_energy: 100.0,
            metabolic_rate: 2.0,
            foraging_rate: 15.0,
            reproduction_threshold: 90.0,
            reproduction_cost: 40.0,
            maturation_age: 15.0,
            base_reproduction_rate: 0.05,
            lifespan_min: 60.0,
            lifespan_jitter: 120.0,
            stats_interval: 0.5,
            max_population: None,
            frame_dt: 1.0 / 60.0,
        }
    }
}

macro_rules! define_sim_config_error {
    (
        $(
            $variant:ident $( { $($field:ident : $type:ty),* } )? => $fmt:literal $(, $arg:expr)*
        );* $(;)?
    ) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum SimConfigError {
            $(
                $variant $( { $($field : $type),* } )?,
            )*
        }

        impl std::fmt::Display for SimConfigError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$variant $( { $($field),* } )? => write!(f, $fmt $(, $arg)*),
                    )*
                }
            }
        }
    };
}

define_sim_config_error! {
    InvalidWorldSize => "world_size must be positive and finite";
    WorldSizeTooLarge { max: f64, actual: f64 } => "world_size ({actual}) exceeds supported maximum ({max})";
    TooManyAgents { max: usize, actual: usize } => "initial_population ({actual}) exceeds supported maximum ({max})";
    InvalidBaseSpeed => "base_speed must be positive and finite";
    InvalidPerceptionRadius => "perception_radius must be positive and finite";
    InvalidSeparationDistance => "separation_distance must be positive, finite and smaller than perception_radius";
    InvalidSocialRadius => "social_radius must be positive, finite and smaller than perception_radius";
    InvalidWallMargin => "wall_margin must be finite, non-negative and smaller than half the world size";
    InvalidAltitudeBand => "floor_altitude and ceiling_altitude must be finite with floor < ceiling";
    InvalidBaseFrequency => "base_frequency must be positive and finite";
    InvalidMaxEnergy => "max_energy must be positive and finite";
    InvalidInitialEnergy => "initial_energy must be finite and within (0, max_energy]";
    InvalidMetabolicRate => "metabolic_rate must be finite and non-negative";
    InvalidForagingRate => "foraging_rate must be finite and non-negative";
    InvalidReproductionThreshold => "reproduction_threshold must be finite and within [0, max_energy]";
    InvalidReproductionCost => "reproduction_cost must be finite and positive";
    InvalidMaturationAge => "maturation_age must be finite and non-negative";
    InvalidReproductionRate => "base_reproduction_rate must be finite and non-negative";
    InvalidLifespan => "lifespan_min must be positive and lifespan_jitter non-negative, both finite";
    InvalidStatsInterval => "stats_interval must be positive and finite";
    InvalidMaxPopulation => "max_population must be positive when set";
    InvalidFrameDt => "frame_dt must be positive and finite";
}

impl std::error::Error for SimConfigError {}

fn positive_finite(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn non_negative_finite(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

impl SimConfig {
    pub const MAX_WORLD_SIZE: f64 = crate::constants::MAX_WORLD_SIZE;

    pub const MAX_INITIAL_POPULATION: usize = 100_000;

    pub fn validate(&self) -> Result<(), SimConfigError> {
        self.validate_world()?;
        self.validate_flight()?;
        self.validate_energy()?;
        self.validate_lifecycle()?;
        self.validate_timing()?;
        Ok(())
    }

    fn validate_world(&self) -> Result<(), SimConfigError> {
        if !positive_finite(self.world_size) {
            return Err(SimConfigError::InvalidWorldSize);
        }
        if self.world_size > Self::MAX_WORLD_SIZE {
            return Err(SimConfigError::WorldSizeTooLarge {
                max: Self::MAX_WORLD_SIZE,
                actual: self.world_size,
            });
        }
        if self.initial_population > Self::MAX_INITIAL_POPULATION {
            return Err(SimConfigError::TooManyAgents {
                max: Self::MAX_INITIAL_POPULATION,
                actual: self.initial_population,
            });
        }
        if !(non_negative_finite(self.wall_margin) && self.wall_margin < self.world_size / 2.0) {
            return Err(SimConfigError::InvalidWallMargin);
        }
        if !(self.floor_altitude.is_finite()
            && self.ceiling_altitude.is_finite()
            && self.floor_altitude < self.ceiling_altitude)
        {
            return Err(SimConfigError::InvalidAltitudeBand);
        }
        Ok(())
    }

    fn validate_flight(&self) -> Result<(), SimConfigError> {
        if !positive_finite(self.base_speed) {
            return Err(SimConfigError::InvalidBaseSpeed);
        }
        if !positive_finite(self.perception_radius) {
            return Err(SimConfigError::InvalidPerceptionRadius);
        }
        if !(positive_finite(self.separation_distance)
            && self.separation_distance < self.perception_radius)
        {
            return Err(SimConfigError::InvalidSeparationDistance);
        }
        if !(positive_finite(self.social_radius) && self.social_radius < self.perception_radius) {
            return Err(SimConfigError::InvalidSocialRadius);
        }
        if !positive_finite(self.base_frequency) {
            return Err(SimConfigError::InvalidBaseFrequency);
        }
        Ok(())
    }

    fn validate_energy(&self) -> Result<(), SimConfigError> {
        if !positive_finite(self.max_energy) {
            return Err(SimConfigError::InvalidMaxEnergy);
        }
        if !(positive_finite(self.initial_energy) && self.initial_energy <= self.max_energy) {
            return Err(SimConfigError::InvalidInitialEnergy);
        }
        if !non_negative_finite(self.metabolic_rate) {
            return Err(SimConfigError::InvalidMetabolicRate);
        }
        if !non_negative_finite(self.foraging_rate) {
            return Err(SimConfigError::InvalidForagingRate);
        }
        if !(non_negative_finite(self.reproduction_threshold)
            && self.reproduction_threshold <= self.max_energy)
        {
            return Err(SimConfigError::InvalidReproductionThreshold);
        }
        if !positive_finite(self.reproduction_cost) {
            return Err(SimConfigError::InvalidReproductionCost);
        }
        Ok(())
    }

    fn validate_lifecycle(&self) -> Result<(), SimConfigError> {
        if !non_negative_finite(self.maturation_age) {
            return Err(SimConfigError::InvalidMaturationAge);
        }
        if !non_negative_finite(self.base_reproduction_rate) {
            return Err(SimConfigError::InvalidReproductionRate);
        }
        if !(positive_finite(self.lifespan_min) && non_negative_finite(self.lifespan_jitter)) {
            return Err(SimConfigError::InvalidLifespan);
        }
        if self.max_population == Some(0) {
            return Err(SimConfigError::InvalidMaxPopulation);
        }
        Ok(())
    }

    fn validate_timing(&self) -> Result<(), SimConfigError> {
        if !positive_finite(self.stats_interval) {
            return Err(SimConfigError::InvalidStatsInterval);
        }
        if !positive_finite(self.frame_dt) {
            return Err(SimConfigError::InvalidFrameDt);
        }
        Ok(())
    }
}

/// Flight controls read every tick. Never validated: out-of-range values flow
/// straight into force and speed magnitudes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimSettings {
    pub speed: f64,
    pub agility: f64,
    /// Consumed only by the renderer's fog and culling.
    pub render_distance: f64,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            agility: 1.0,
            render_distance: 150.0,
        }
    }
}

/// Lifecycle controls read every tick. Never validated.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvolutionSettings {
    pub enabled: bool,
    pub aging_speed: f64,
    /// Conceptually a probability in `[0, 1]`, but not clamped.
    pub mutation_rate: f64,
    pub food_abundance: f64,
}

impl Default for EvolutionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            aging_speed: 1.0,
            mutation_rate: 0.1,
            food_abundance: 1.0,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub sim: SimSettings,
    pub evolution: EvolutionSettings,
}
