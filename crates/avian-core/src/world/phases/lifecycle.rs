use super::super::{TickReport, World};
use crate::agent::Agent;
use crate::lifecycle::{self, Death, DeathCause};
use tracing::debug;

impl World {
    /// Age, feed, breed and cull every agent, then publish survivors followed
    /// by newborns as the new collection.
    pub(in crate::world) fn step_lifecycle_phase(&mut self, dt: f64, report: &mut TickReport) {
        let evolution = self.settings.evolution.clone();
        let capacity = self.config.max_population;
        let current = std::mem::take(&mut self.agents);
        let total = current.len();
        let mut survivors = Vec::with_capacity(total);
        let mut newborns = Vec::new();

        for (idx, mut agent) in current.into_iter().enumerate() {
            lifecycle::metabolize(&mut agent, &self.config, &evolution, dt);

            if lifecycle::wants_to_reproduce(&agent, &self.config, dt, &mut self.rng) {
                // Upper bound on the published size: survivors so far, everyone not yet
                // culled, and newborns.
                let projected = survivors.len() + (total - idx) + newborns.len();
                if capacity.is_none_or(|cap| projected < cap) {
                    agent.energy = (agent.energy - self.config.reproduction_cost).max(0.0);
                    let traits =
                        lifecycle::mutate_traits(&agent.traits, evolution.mutation_rate, &mut self.rng);
                    let id = self.next_id();
                    let child = Agent::offspring(id, &agent, traits, &self.config, &mut self.rng);
                    report.births.push(id);
                    newborns.push(child);
                }
            }

            match lifecycle::death_cause(&agent) {
                Some(cause) => {
                    match cause {
                        DeathCause::OldAge => self.deaths_old_age += 1,
                        DeathCause::Starvation => self.deaths_starvation += 1,
                    }
                    report.deaths.push(Death {
                        agent_id: agent.id,
                        cause,
                        age: agent.age,
                    });
                }
                None => survivors.push(agent),
            }
        }

        self.total_births += newborns.len();
        if !newborns.is_empty() || !report.deaths.is_empty() {
            debug!(
                births = newborns.len(),
                deaths = report.deaths.len(),
                population = survivors.len() + newborns.len(),
                "lifecycle"
            );
        }
        survivors.append(&mut newborns);
        self.agents = survivors;
    }
}
