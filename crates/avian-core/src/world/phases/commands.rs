use super::super::{TickReport, World, WorldCommand};
use crate::agent::Agent;
use rand::Rng;
use tracing::debug;

impl World {
    /// Apply every queued command in submission order.
    pub(in crate::world) fn step_command_phase(&mut self, report: &mut TickReport) {
        while let Some(command) = self.pending_commands.pop_front() {
            self.apply_command(command, report);
        }
    }

    fn apply_command(&mut self, command: WorldCommand, report: &mut TickReport) {
        match command {
            WorldCommand::Add { count } => {
                self.spawn_founders(count);
                debug!(count, population = self.agents.len(), "added founders");
            }
            WorldCommand::Remove { count } => {
                let count = count.min(self.agents.len());
                self.agents.drain(..count);
                debug!(count, population = self.agents.len(), "removed agents");
            }
            WorldCommand::SelectRandom => {
                if self.agents.is_empty() {
                    debug!("select-random on empty population ignored");
                    return;
                }
                let idx = self.rng.random_range(0..self.agents.len());
                let id = self.agents[idx].id;
                self.selected = Some(id);
                report.selected = Some(id);
                debug!(agent = %id, "selected agent");
            }
            WorldCommand::IntroduceSpecies { count, params } => {
                self.agents.reserve(count);
                for _ in 0..count {
                    let id = self.next_id();
                    let agent = Agent::introduced(id, &params, &self.config, &mut self.rng);
                    self.agents.push(agent);
                }
                debug!(
                    count,
                    color = %params.color,
                    name = params.name.as_deref().unwrap_or("unnamed"),
                    "introduced species"
                );
            }
        }
    }
}
