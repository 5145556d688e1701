/// Largest valid world dimension (world units). Keeps spatial-index envelopes finite.
pub const MAX_WORLD_SIZE: f64 = 4096.0;

/// Prime multiplier used to derive independent RNG streams from a base seed.
pub const RNG_DERIVATION_PRIME: u64 = 7919;

/// Stream id reserved for static scenery generation.
pub const SCENERY_RNG_STREAM: u64 = 1;

/// Founder colour palette (sRGB hex).
pub const FOUNDER_PALETTE: [&str; 6] = [
    "#FF6B6B", // red
    "#4ECDC4", // teal
    "#45B7D1", // blue
    "#F7D794", // yellow
    "#786FA6", // purple
    "#F19066", // orange
];

/// Interval ratios a founder melody is drawn from.
pub const FOUNDER_INTERVALS: [f64; 8] = [1.0, 1.125, 1.25, 1.33, 1.5, 1.66, 1.875, 2.0];

/// Interval ratios an introduced species' melody is drawn from.
pub const INTRODUCED_INTERVALS: [f64; 5] = [1.0, 1.2, 1.25, 1.5, 1.8];

/// Number of drawn intervals appended after the leading unison.
pub const MELODY_DRAWS: usize = 3;

// Steering weights.
pub const ALIGNMENT_WEIGHT: f64 = 1.0;
pub const COHESION_WEIGHT: f64 = 0.8;
pub const SEPARATION_WEIGHT: f64 = 2.0;
pub const SEPARATION_PRESCALE: f64 = 1.5;
pub const SEPARATION_FORCE_CAP: f64 = 2.0;
pub const BASE_MAX_FORCE: f64 = 0.01;
pub const WANDER_FRACTION: f64 = 0.5;
pub const WANDER_VERTICAL_DAMPING: f64 = 0.3;
pub const BOUNDARY_FORCE_SCALE: f64 = 3.0;
pub const MIN_SPEED_FRACTION: f64 = 0.5;
pub const JUVENILE_SPEED_FACTOR: f64 = 0.8;
pub const ELDER_SPEED_FACTOR: f64 = 0.7;
/// Fraction of max age past which an agent counts as near death.
pub const ELDER_AGE_FRACTION: f64 = 0.9;

// Idle / foraging drift.
pub const FORAGING_DAMPING: f64 = 0.9;
pub const BOB_AMPLITUDE: f64 = 0.05;
pub const BOB_RATE: f64 = 2.0;

// Behaviour timers, in ticks.
pub const STATE_TIMER_INITIAL_MAX: f64 = 100.0;
pub const STATE_DWELL_BASE: f64 = 200.0;
pub const STATE_DWELL_JITTER: f64 = 300.0;
pub const CHIRP_TIMER_INITIAL_MAX: f64 = 500.0;
pub const CHIRP_RETRY_DELAY: f64 = 50.0;
pub const FEED_DWELL: f64 = 300.0;
pub const DISTRACT_DWELL: f64 = 200.0;

pub const FEED_SINK_SPEED: f64 = 0.02;
pub const FEED_PITCH_LIFT: f64 = 1.1;
pub const DISTRACT_BURST_FACTOR: f64 = 3.0;
/// Squared speed below which a newly flying agent is kick-started.
pub const STAGNANT_SPEED_SQ: f64 = 0.001;
