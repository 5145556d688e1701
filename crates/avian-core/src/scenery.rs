use crate::constants::SCENERY_RNG_STREAM;
use crate::rng::derive_rng;
use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeKind {
    Pine,
    Oak,
}

/// Static, render-only scenery. Agents never collide with trees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub id: usize,
    pub position: DVec3,
    pub scale: f64,
    pub kind: TreeKind,
}

/// Scatter `count` trees over the ground plane on a stream derived from `seed`.
pub fn generate_trees(seed: u64, count: usize, world_size: f64) -> Vec<Tree> {
    let mut rng = derive_rng(seed, SCENERY_RNG_STREAM);
    (0..count)
        .map(|id| {
            let x = (rng.random::<f64>() - 0.5) * world_size;
            let z = (rng.random::<f64>() - 0.5) * world_size;
            let scale = 0.8 + rng.random::<f64>() * 1.5;
            let kind = if rng.random::<f64>() > 0.4 {
                TreeKind::Pine
            } else {
                TreeKind::Oak
            };
            Tree {
                id,
                position: DVec3::new(x, 0.0, z),
                scale,
                kind,
            }
        })
        .collect()
}
