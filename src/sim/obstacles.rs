//! Obstacle spawning, scrolling and pruning

use super::rng::RangeSource;
use super::state::{GameEvent, GameSession, Obstacle, SpikePair, Viewport};
use crate::tuning::Tuning;

/// Width of every obstacle, independent of its actual cluster size
#[inline]
pub fn obstacle_width(tuning: &Tuning, viewport: Viewport) -> f64 {
    viewport.width * tuning.obstacle_slot * tuning.cluster_max as f64
}

/// Build a new cluster just off the right edge of the screen
pub fn spawn_obstacle<R: RangeSource>(
    rng: &mut R,
    tuning: &Tuning,
    viewport: Viewport,
    id: u32,
) -> Obstacle {
    let h = viewport.height;

    let gap_height = h * tuning.gap_height;
    let min_gap_y = h * tuning.gap_margin;
    let max_gap_y = h - min_gap_y - gap_height;
    let gap_y = rng.range(min_gap_y, max_gap_y);

    let count = rng
        .range(tuning.cluster_min as f64, (tuning.cluster_max + 1) as f64)
        .floor() as u32;
    let count = count.clamp(tuning.cluster_min, tuning.cluster_max);

    let spike_min = h * tuning.spike_min;
    let spike_max = h * tuning.spike_max;
    let min_total = h * tuning.spike_min_total;

    let cluster = (0..count)
        .map(|_| {
            let stalagmite = rng.range(spike_min, spike_max);
            let stalactite = rng.range(spike_min, spike_max);
            let sprite = rng.range(0.0, tuning.spike_sprites as f64).floor() as u32;
            let mut pair = SpikePair {
                stalactite,
                stalagmite,
                sprite,
            };
            pair.enforce_min_total(min_total);
            pair.clamp_sprite(tuning.spike_sprites);
            pair
        })
        .collect();

    Obstacle {
        id,
        x: viewport.width,
        gap_y,
        gap_height,
        cluster,
        passed: false,
    }
}

/// Move every obstacle left by the scroll speed
pub fn advance_obstacles(obstacles: &mut [Obstacle], tuning: &Tuning, viewport: Viewport) {
    let speed = viewport.width * tuning.scroll;
    let min_total = viewport.height * tuning.spike_min_total;
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= speed;
        // Re-check against the current height in case the canvas was resized
        for pair in &mut obstacle.cluster {
            pair.enforce_min_total(min_total);
            pair.clamp_sprite(tuning.spike_sprites);
        }
    }
}

/// Drop obstacles whose right edge is at or past the left edge of the screen
///
/// Stable: survivors keep their relative order. Returns how many were removed.
pub fn prune_obstacles(obstacles: &mut Vec<Obstacle>, width: f64) -> usize {
    let before = obstacles.len();
    obstacles.retain(|o| o.right_edge(width) > 0.0);
    before - obstacles.len()
}

/// Flag obstacles the bat has fully cleared
pub fn mark_passed(obstacles: &mut [Obstacle], width: f64, bat_x: f64) {
    for obstacle in obstacles.iter_mut().filter(|o| !o.passed) {
        if obstacle.right_edge(width) < bat_x {
            obstacle.passed = true;
        }
    }
}

impl GameSession {
    /// Spawn one cluster at the right edge and record the spawn time
    pub fn spawn_obstacle(&mut self, now_ms: f64) {
        let id = self.next_entity_id();
        let obstacle = spawn_obstacle(&mut self.rng, &self.tuning, self.viewport, id);
        log::debug!(
            "spawn obstacle {}: x={:.1} gap_y={:.1} pairs={}",
            id,
            obstacle.x,
            obstacle.gap_y,
            obstacle.cluster.len()
        );
        let pairs = obstacle.cluster.len();
        self.obstacles.push(obstacle);
        self.clock.last_spawn_ms = now_ms;
        self.push_event(GameEvent::ObstacleSpawned { id, pairs });
    }

    /// Spawn if more time than a freshly drawn interval has passed since the last spawn
    pub fn maybe_spawn(&mut self, now_ms: f64) -> bool {
        let interval = self.rng.range(
            self.tuning.spawn_interval_min_ms,
            self.tuning.spawn_interval_max_ms,
        );
        if now_ms - self.clock.last_spawn_ms > interval {
            self.spawn_obstacle(now_ms);
            true
        } else {
            false
        }
    }

    /// Scroll, flag and prune obstacles for one frame
    pub fn update_obstacles(&mut self) {
        let width = self.obstacle_width();
        advance_obstacles(&mut self.obstacles, &self.tuning, self.viewport);
        mark_passed(&mut self.obstacles, width, self.bat.pos.x);
        let removed = prune_obstacles(&mut self.obstacles, width);
        if removed > 0 {
            log::debug!("pruned {} obstacle(s), {} live", removed, self.obstacles.len());
        }
    }
}
