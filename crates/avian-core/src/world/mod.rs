use crate::agent::{ActionType, Agent, AgentId, PendingAction, SpeciesParams};
use crate::behavior::Vocalization;
use crate::config::{Settings, SimConfig, SimConfigError};
use crate::lifecycle::Death;
use crate::metrics::{FlockStats, RunSummary};
use crate::rng::create_rng;
use crate::scenery::{self, Tree};
use crate::spatial;
use crate::taxonomy::{self, SpeciesAnalysis, TraitSnapshot};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Instant;
use thiserror::Error;

/// An edge-triggered instruction from outside the core. Applied once, at the
/// start of the next unpaused tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorldCommand {
    Add { count: usize },
    /// Removes up to `count` agents from the front of the collection.
    Remove { count: usize },
    SelectRandom,
    IntroduceSpecies { count: usize, params: SpeciesParams },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StepTimings {
    pub command_us: u64,
    pub lifecycle_us: u64,
    pub snapshot_build_us: u64,
    pub behavior_us: u64,
    pub steering_us: u64,
    pub stats_us: u64,
    pub total_us: u64,
}

/// Everything observable that happened during one call to [`World::tick`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub clock: f64,
    pub paused: bool,
    pub timings: StepTimings,
    pub births: Vec<AgentId>,
    pub deaths: Vec<Death>,
    pub calls: Vec<Vocalization>,
    pub stats: Option<FlockStats>,
    /// Agent picked by a `SelectRandom` command applied this tick.
    pub selected: Option<AgentId>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldInitError {
    #[error(transparent)]
    Config(#[from] SimConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExperimentError {
    #[error("frame_dt must be positive and finite")]
    InvalidFrameDt,
    #[error("ticks ({actual}) exceed supported maximum ({max})")]
    TooManyTicks { max: usize, actual: usize },
}

pub struct World {
    agents: Vec<Agent>,
    trees: Vec<Tree>,
    config: SimConfig,
    settings: Settings,
    rng: ChaCha12Rng,
    next_agent_id: u64,
    tick_index: u64,
    clock: f64,
    last_stats_at: f64,
    paused: bool,
    pending_commands: VecDeque<WorldCommand>,
    selected: Option<AgentId>,
    latest_stats: Option<FlockStats>,
    total_births: usize,
    deaths_old_age: usize,
    deaths_starvation: usize,
}

impl World {
    pub const MAX_HEADLESS_TICKS: usize = 10_000_000;

    pub fn new(config: SimConfig) -> Result<Self, WorldInitError> {
        Self::with_settings(config, Settings::default())
    }

    pub fn with_settings(config: SimConfig, settings: Settings) -> Result<Self, WorldInitError> {
        config.validate()?;
        let trees = scenery::generate_trees(config.seed, config.tree_count, config.world_size);
        let mut world = Self {
            agents: Vec::with_capacity(config.initial_population),
            trees,
            rng: create_rng(config.seed),
            config,
            settings,
            next_agent_id: 0,
            tick_index: 0,
            clock: 0.0,
            last_stats_at: 0.0,
            paused: false,
            pending_commands: VecDeque::new(),
            selected: None,
            latest_stats: None,
            total_births: 0,
            deaths_old_age: 0,
            deaths_starvation: 0,
        };
        world.spawn_founders(world.config.initial_population);
        Ok(world)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings are read every tick and never validated.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// `None` once the agent has died or been removed.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn population(&self) -> usize {
        self.agents.len()
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn tick_index(&self) -> u64 {
        self.tick_index
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Queue a command. Accepted while paused.
    pub fn submit(&mut self, command: WorldCommand) {
        self.pending_commands.push_back(command);
    }

    pub fn pending_command_count(&self) -> usize {
        self.pending_commands.len()
    }

    /// Record an observer action on `id`. Returns `false` for unknown ids.
    ///
    /// The behaviour pass consumes it once; a repeated timestamp is ignored.
    pub fn signal_action(&mut self, id: AgentId, kind: ActionType, timestamp: f64) -> bool {
        match self.agents.iter_mut().find(|a| a.id == id) {
            Some(agent) => {
                agent.pending_action = Some(PendingAction { kind, timestamp });
                true
            }
            None => false,
        }
    }

    pub fn select(&mut self, id: AgentId) -> bool {
        let exists = self.agent(id).is_some();
        if exists {
            self.selected = Some(id);
        }
        exists
    }

    /// The selected id, or `None` if nothing is selected or it is no longer alive.
    pub fn selected(&self) -> Option<AgentId> {
        self.selected.filter(|&id| self.agent(id).is_some())
    }

    pub fn selected_agent(&self) -> Option<&Agent> {
        self.selected.and_then(|id| self.agent(id))
    }

    pub fn latest_stats(&self) -> Option<&FlockStats> {
        self.latest_stats.as_ref()
    }

    /// Sample telemetry now, outside the periodic cadence.
    pub fn stats_now(&self) -> FlockStats {
        FlockStats::collect(
            &self.agents,
            self.config.perception_radius,
            self.clock,
            self.total_births,
            self.total_deaths(),
        )
    }

    pub fn total_births(&self) -> usize {
        self.total_births
    }

    pub fn total_deaths(&self) -> usize {
        self.deaths_old_age + self.deaths_starvation
    }

    /// Deterministic species text for a live agent.
    pub fn analyze(&self, id: AgentId) -> Option<SpeciesAnalysis> {
        self.agent(id)
            .map(|agent| taxonomy::analyze(&TraitSnapshot::from(agent)))
    }

    fn next_id(&mut self) -> AgentId {
        let id = AgentId(self.next_agent_id);
        self.next_agent_id += 1;
        id
    }

    fn spawn_founders(&mut self, count: usize) {
        self.agents.reserve(count);
        for _ in 0..count {
            let id = self.next_id();
            let agent = Agent::founder(id, &self.config, &mut self.rng);
            self.agents.push(agent);
        }
    }

    /// Advance by `delta` seconds. A paused world returns an empty report and
    /// keeps queued commands for later.
    pub fn tick(&mut self, delta: f64) -> TickReport {
        if self.paused {
            return TickReport {
                tick: self.tick_index,
                clock: self.clock,
                paused: true,
                ..TickReport::default()
            };
        }

        let total_start = Instant::now();
        self.tick_index += 1;
        self.clock += delta;
        let mut report = TickReport {
            tick: self.tick_index,
            clock: self.clock,
            ..TickReport::default()
        };

        let t0 = Instant::now();
        self.step_command_phase(&mut report);
        report.timings.command_us = t0.elapsed().as_micros() as u64;

        let t1 = Instant::now();
        if self.settings.evolution.enabled {
            self.step_lifecycle_phase(delta, &mut report);
        }
        report.timings.lifecycle_us = t1.elapsed().as_micros() as u64;

        let t2 = Instant::now();
        let snapshot = spatial::build_index(&self.agents);
        report.timings.snapshot_build_us = t2.elapsed().as_micros() as u64;

        let t3 = Instant::now();
        self.step_behavior_phase(&snapshot, &mut report.calls);
        report.timings.behavior_us = t3.elapsed().as_micros() as u64;

        let t4 = Instant::now();
        self.step_steering_phase(&snapshot, delta);
        report.timings.steering_us = t4.elapsed().as_micros() as u64;

        let t5 = Instant::now();
        report.stats = self.step_stats_phase();
        report.timings.stats_us = t5.elapsed().as_micros() as u64;

        report.timings.total_us = total_start.elapsed().as_micros() as u64;
        report
    }

    /// Drive the world for `ticks` frames of `frame_dt` seconds.
    pub fn run_headless(&mut self, ticks: usize) -> Result<RunSummary, ExperimentError> {
        let dt = self.config.frame_dt;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ExperimentError::InvalidFrameDt);
        }
        if ticks > Self::MAX_HEADLESS_TICKS {
            return Err(ExperimentError::TooManyTicks {
                max: Self::MAX_HEADLESS_TICKS,
                actual: ticks,
            });
        }

        let births_before = self.total_births;
        let old_age_before = self.deaths_old_age;
        let starvation_before = self.deaths_starvation;
        let mut samples = Vec::new();
        let mut vocalizations = 0;
        let mut lifespans = Vec::new();
        for _ in 0..ticks {
            let report = self.tick(dt);
            vocalizations += report.calls.len();
            lifespans.extend(report.deaths.iter().map(|death| death.age));
            samples.extend(report.stats);
        }
        Ok(RunSummary {
            schema_version: 1,
            ticks,
            frame_dt: dt,
            seed: self.config.seed,
            final_population: self.agents.len(),
            samples,
            lifespans,
            births: self.total_births - births_before,
            deaths_old_age: self.deaths_old_age - old_age_before,
            deaths_starvation: self.deaths_starvation - starvation_before,
            vocalizations,
        })
    }
}

mod phases;
#[cfg(test)]
mod tests;
