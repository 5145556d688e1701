use crate::agent::{Agent, AgentId, AgentLocation};
use glam::DVec3;
use rstar::{RTree, AABB};

/// Build an R*-tree over a snapshot of agent positions and velocities (O(n log n)).
pub fn build_index(agents: &[Agent]) -> RTree<AgentLocation> {
    RTree::bulk_load(agents.iter().map(AgentLocation::from).collect())
}

/// Visit every agent strictly closer than `radius` to `center`, excluding `self_id`.
///
/// Uses an AABB envelope query, then filters by Euclidean distance.
pub fn for_each_neighbor<'a>(
    tree: &'a RTree<AgentLocation>,
    center: DVec3,
    radius: f64,
    self_id: Option<AgentId>,
    mut visitor: impl FnMut(&'a AgentLocation, f64),
) {
    if !(radius > 0.0) {
        return;
    }
    let r_sq = radius * radius;
    let envelope = AABB::from_corners(
        (center - DVec3::splat(radius)).to_array(),
        (center + DVec3::splat(radius)).to_array(),
    );
    for loc in tree.locate_in_envelope(&envelope) {
        if Some(loc.id) == self_id {
            continue;
        }
        let dist_sq = loc.position.distance_squared(center);
        if dist_sq < r_sq {
            visitor(loc, dist_sq);
        }
    }
}

/// Count neighbours strictly within `radius` of `center` (excludes `self_id`).
/// Avoids allocation, returns count only.
pub fn count_neighbors(
    tree: &RTree<AgentLocation>,
    center: DVec3,
    radius: f64,
    self_id: Option<AgentId>,
) -> usize {
    let mut count = 0usize;
    for_each_neighbor(tree, center, radius, self_id, |_, _| count += 1);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::rng::create_rng;

    fn make_agent(id: u64, x: f64, y: f64, z: f64) -> Agent {
        let mut rng = create_rng(id);
        let mut agent = Agent::founder(AgentId(id), &SimConfig::default(), &mut rng);
        agent.position = DVec3::new(x, y, z);
        agent
    }

    fn neighbor_ids(
        tree: &RTree<AgentLocation>,
        center: DVec3,
        radius: f64,
        self_id: Option<AgentId>,
    ) -> Vec<AgentId> {
        let mut ids = Vec::new();
        for_each_neighbor(tree, center, radius, self_id, |loc, _| ids.push(loc.id));
        ids.sort_unstable();
        ids
    }

    #[test]
    fn query_finds_agents_within_radius() {
        let agents = vec![
            make_agent(0, 5.0, 5.0, 5.0),
            make_agent(1, 6.0, 5.0, 5.0),
            make_agent(2, 50.0, 50.0, 50.0),
        ];
        let tree = build_index(&agents);
        let result = neighbor_ids(&tree, DVec3::splat(5.0), 2.0, None);
        assert_eq!(result, vec![AgentId(0), AgentId(1)]);
    }

    #[test]
    fn query_excludes_self() {
        let agents = vec![make_agent(0, 5.0, 5.0, 5.0), make_agent(1, 6.0, 5.0, 5.0)];
        let tree = build_index(&agents);
        let result = neighbor_ids(&tree, DVec3::splat(5.0), 2.0, Some(AgentId(0)));
        assert_eq!(result, vec![AgentId(1)]);
    }

    #[test]
    fn radius_boundary_is_exclusive() {
        let agents = vec![make_agent(0, 0.0, 0.0, 0.0), make_agent(1, 0.0, 0.0, 2.0)];
        let tree = build_index(&agents);
        assert_eq!(count_neighbors(&tree, DVec3::ZERO, 2.0, Some(AgentId(0))), 0);
        assert_eq!(
            count_neighbors(&tree, DVec3::ZERO, 2.0 + 1e-9, Some(AgentId(0))),
            1
        );
    }

    #[test]
    fn uses_all_three_axes() {
        let agents = vec![make_agent(0, 0.0, 0.0, 0.0), make_agent(1, 1.0, 1.0, 1.0)];
        let tree = build_index(&agents);
        // sqrt(3) ~ 1.732
        assert_eq!(count_neighbors(&tree, DVec3::ZERO, 1.7, Some(AgentId(0))), 0);
        assert_eq!(count_neighbors(&tree, DVec3::ZERO, 1.8, Some(AgentId(0))), 1);
    }

    #[test]
    fn zero_radius_finds_nothing() {
        let agents = vec![make_agent(0, 0.0, 0.0, 0.0), make_agent(1, 0.0, 0.0, 0.0)];
        let tree = build_index(&agents);
        assert_eq!(count_neighbors(&tree, DVec3::ZERO, 0.0, None), 0);
    }
}
