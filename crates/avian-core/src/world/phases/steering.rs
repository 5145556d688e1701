use super::super::World;
use crate::agent::AgentLocation;
use crate::flocking::{self, SteeringParams};
use rstar::RTree;

impl World {
    pub(in crate::world) fn step_steering_phase(&mut self, snapshot: &RTree<AgentLocation>, dt: f64) {
        let params = SteeringParams::new(&self.config, &self.settings.sim, dt);
        for agent in &mut self.agents {
            flocking::steer_agent(agent, snapshot, &params, &mut self.rng);
        }
    }
}
