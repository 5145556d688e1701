use super::super::World;
use crate::agent::AgentLocation;
use crate::behavior::{self, BehaviorParams, Vocalization};
use crate::spatial;
use rstar::RTree;

impl World {
    /// Run the state machine for every agent. Listener counts read the
    /// tick-start snapshot.
    pub(in crate::world) fn step_behavior_phase(
        &mut self,
        snapshot: &RTree<AgentLocation>,
        calls: &mut Vec<Vocalization>,
    ) {
        let params = BehaviorParams {
            maturation_age: self.config.maturation_age,
            crowding_threshold: self.config.crowding_threshold,
            base_speed: self.config.base_speed,
            speed: self.settings.sim.speed,
            clock: self.clock,
        };
        let social_radius = self.config.social_radius;
        for agent in &mut self.agents {
            behavior::update_behavior(
                agent,
                &params,
                |position, id| spatial::count_neighbors(snapshot, position, social_radius, Some(id)),
                &mut self.rng,
                calls,
            );
        }
    }
}
