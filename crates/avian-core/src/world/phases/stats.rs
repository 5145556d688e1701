use super::super::World;
use crate::metrics::FlockStats;

impl World {
    /// Sample telemetry once more than `stats_interval` seconds have passed
    /// since the previous sample.
    pub(in crate::world) fn step_stats_phase(&mut self) -> Option<FlockStats> {
        if self.clock - self.last_stats_at <= self.config.stats_interval {
            return None;
        }
        self.last_stats_at = self.clock;
        let stats = self.stats_now();
        self.latest_stats = Some(stats.clone());
        Some(stats)
    }
}
