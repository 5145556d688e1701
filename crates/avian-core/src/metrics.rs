use crate::agent::{Agent, AgentLocation, BirdState};
use crate::spatial;
use rstar::RTree;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Periodic telemetry sample. Read-only over the agent set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockStats {
    /// Simulation clock at sampling time.
    pub clock: f64,
    pub population: usize,
    pub flock_count: usize,
    pub idle: usize,
    pub flying: usize,
    pub singing: usize,
    pub foraging: usize,
    /// Agents currently singing.
    pub active_voices: usize,
    pub mean_altitude: f64,
    pub mean_energy: f64,
    pub max_generation: u32,
    pub total_births: usize,
    pub total_deaths: usize,
}

impl FlockStats {
    pub fn collect(
        agents: &[Agent],
        perception_radius: f64,
        clock: f64,
        total_births: usize,
        total_deaths: usize,
    ) -> Self {
        let mut stats = FlockStats {
            clock,
            population: agents.len(),
            flock_count: count_flocks(agents, perception_radius),
            total_births,
            total_deaths,
            ..FlockStats::default()
        };
        let mut altitude_sum = 0.0;
        let mut energy_sum = 0.0;
        for agent in agents {
            match agent.state {
                BirdState::Idle => stats.idle += 1,
                BirdState::Flying => stats.flying += 1,
                BirdState::Singing => stats.singing += 1,
                BirdState::Foraging => stats.foraging += 1,
            }
            altitude_sum += agent.position.y;
            energy_sum += agent.energy;
            stats.max_generation = stats.max_generation.max(agent.generation);
        }
        stats.active_voices = stats.singing;
        let denom = agents.len().max(1) as f64;
        stats.mean_altitude = altitude_sum / denom;
        stats.mean_energy = energy_sum / denom;
        stats
    }

    pub fn state_count(&self, state: BirdState) -> usize {
        match state {
            BirdState::Idle => self.idle,
            BirdState::Flying => self.flying,
            BirdState::Singing => self.singing,
            BirdState::Foraging => self.foraging,
        }
    }
}

/// Connected components under the "distance < radius" adjacency.
pub fn count_flocks(agents: &[Agent], radius: f64) -> usize {
    let tree = spatial::build_index(agents);
    count_flocks_in(&tree, agents, radius)
}

/// Iterative depth-first traversal; the result does not depend on `agents` order.
pub fn count_flocks_in(tree: &RTree<AgentLocation>, agents: &[Agent], radius: f64) -> usize {
    let mut visited = HashSet::with_capacity(agents.len());
    let mut stack = Vec::new();
    let mut flocks = 0;
    for agent in agents {
        if !visited.insert(agent.id) {
            continue;
        }
        flocks += 1;
        stack.push(agent.position);
        while let Some(position) = stack.pop() {
            spatial::for_each_neighbor(tree, position, radius, None, |loc, _| {
                if visited.insert(loc.id) {
                    stack.push(loc.position);
                }
            });
        }
    }
    flocks
}

fn default_schema_version() -> u32 {
    1
}

/// Result of a headless run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub ticks: usize,
    pub frame_dt: f64,
    pub seed: u64,
    pub final_population: usize,
    pub samples: Vec<FlockStats>,
    /// Ages at death, in simulated seconds.
    #[serde(default)]
    pub lifespans: Vec<f64>,
    #[serde(default)]
    pub births: usize,
    #[serde(default)]
    pub deaths_old_age: usize,
    #[serde(default)]
    pub deaths_starvation: usize,
    #[serde(default)]
    pub vocalizations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentId;
    use crate::config::SimConfig;
    use crate::rng::create_rng;
    use glam::DVec3;

    fn at(id: u64, x: f64, y: f64, z: f64) -> Agent {
        let mut rng = create_rng(id);
        let mut agent = Agent::founder(AgentId(id), &SimConfig::default(), &mut rng);
        agent.position = DVec3::new(x, y, z);
        agent
    }

    #[test]
    fn empty_population_has_no_flocks() {
        assert_eq!(count_flocks(&[], 10.0), 0);
        let stats = FlockStats::collect(&[], 10.0, 0.0, 0, 0);
        assert_eq!(stats.population, 0);
        assert_eq!(stats.mean_energy, 0.0);
    }

    #[test]
    fn chain_is_one_flock() {
        // Each link is 9 apart; endpoints are 27 apart.
        let agents: Vec<Agent> = (0..4).map(|i| at(i, i as f64 * 9.0, 10.0, 0.0)).collect();
        assert_eq!(count_flocks(&agents, 10.0), 1);
    }

    #[test]
    fn boundary_distance_is_not_adjacent() {
        let agents = vec![at(0, 0.0, 10.0, 0.0), at(1, 10.0, 10.0, 0.0)];
        assert_eq!(count_flocks(&agents, 10.0), 2);
    }

    #[test]
    fn matches_naive_components_regardless_of_order() {
        let mut rng = create_rng(99);
        use rand::Rng;
        let mut agents: Vec<Agent> = (0..120)
            .map(|i| {
                at(
                    i,
                    rng.random_range(-60.0..60.0),
                    rng.random_range(0.0..20.0),
                    rng.random_range(-60.0..60.0),
                )
            })
            .collect();
        let expected = naive_components(&agents, 10.0);
        assert_eq!(count_flocks(&agents, 10.0), expected);
        agents.reverse();
        assert_eq!(count_flocks(&agents, 10.0), expected);
        agents.rotate_left(37);
        assert_eq!(count_flocks(&agents, 10.0), expected);
    }

    fn naive_components(agents: &[Agent], radius: f64) -> usize {
        // Union-find over all pairs.
        let n = agents.len();
        let mut parent: Vec<usize> = (0..n).collect();
        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if agents[i].position.distance_squared(agents[j].position) < radius * radius {
                    let (a, b) = (find(&mut parent, i), find(&mut parent, j));
                    parent[a] = b;
                }
            }
        }
        (0..n).filter(|&i| find(&mut parent, i) == i).count()
    }

    #[test]
    fn stats_count_states_and_means() {
        let mut agents = vec![at(0, 0.0, 10.0, 0.0), at(1, 50.0, 20.0, 0.0)];
        agents[0].state = BirdState::Singing;
        agents[1].state = BirdState::Foraging;
        agents[0].energy = 40.0;
        agents[1].energy = 80.0;
        agents[1].generation = 3;
        let stats = FlockStats::collect(&agents, 10.0, 1.5, 4, 2);
        assert_eq!(stats.population, 2);
        assert_eq!(stats.flock_count, 2);
        assert_eq!(stats.active_voices, 1);
        assert_eq!(stats.state_count(BirdState::Foraging), 1);
        assert_eq!(stats.state_count(BirdState::Flying), 0);
        assert!((stats.mean_altitude - 15.0).abs() < 1e-12);
        assert!((stats.mean_energy - 60.0).abs() < 1e-12);
        assert_eq!(stats.max_generation, 3);
        assert_eq!((stats.total_births, stats.total_deaths), (4, 2));
    }
}
