//! Axis-aligned collision tests between the bat, the spikes and the cave
//!
//! Overlap is strict: rectangles that only share an edge do not collide.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::{GameSession, Obstacle};

/// What ended the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Bat flew above the top of the screen
    Ceiling,
    /// Bat fell below the bottom of the screen
    Floor,
    /// Hit the hanging spike of `pair` in obstacle `obstacle`
    Stalactite { obstacle: u32, pair: usize },
    /// Hit the rising spike of `pair` in obstacle `obstacle`
    Stalagmite { obstacle: u32, pair: usize },
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            size: DVec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> DVec2 {
        self.min + self.size
    }

    /// Open-interval overlap test
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// Bat hit box: a square of side `size` at the bat's position
pub fn bat_rect(pos: DVec2, size: f64) -> Rect {
    Rect {
        min: pos,
        size: DVec2::splat(size),
    }
}

/// Hit boxes for one spike pair: (stalactite from the ceiling, stalagmite from the floor)
pub fn spike_rects(
    x: f64,
    width: f64,
    canvas_height: f64,
    stalactite: f64,
    stalagmite: f64,
) -> (Rect, Rect) {
    (
        Rect::new(x, 0.0, width, stalactite),
        Rect::new(x, canvas_height - stalagmite, width, stalagmite),
    )
}

/// Bat leaving the screen vertically
pub fn check_bounds(bat_y: f64, bat_size: f64, canvas_height: f64) -> Option<Collision> {
    if bat_y < 0.0 {
        Some(Collision::Ceiling)
    } else if bat_y + bat_size > canvas_height {
        Some(Collision::Floor)
    } else {
        None
    }
}

/// Test the bat against every spike pair of one obstacle
pub fn check_obstacle(
    bat: &Rect,
    obstacle: &Obstacle,
    width: f64,
    canvas_height: f64,
) -> Option<Collision> {
    obstacle.cluster.iter().enumerate().find_map(|(i, pair)| {
        let (stalactite, stalagmite) =
            spike_rects(obstacle.x, width, canvas_height, pair.stalactite, pair.stalagmite);
        if bat.overlaps(&stalagmite) {
            Some(Collision::Stalagmite {
                obstacle: obstacle.id,
                pair: i,
            })
        } else if bat.overlaps(&stalactite) {
            Some(Collision::Stalactite {
                obstacle: obstacle.id,
                pair: i,
            })
        } else {
            None
        }
    })
}

impl GameSession {
    /// First collision found this frame: bounds, then obstacles in spawn order
    pub fn detect_collision(&self) -> Option<Collision> {
        let size = self.bat_size();
        let height = self.viewport.height;
        if let Some(hit) = check_bounds(self.bat.pos.y, size, height) {
            return Some(hit);
        }

        let bat = bat_rect(self.bat.pos, size);
        let width = self.obstacle_width();
        self.obstacles
            .iter()
            .find_map(|obstacle| check_obstacle(&bat, obstacle, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{SpikePair, Viewport};

    fn obstacle(x: f64, pairs: &[(f64, f64)]) -> Obstacle {
        Obstacle {
            id: 7,
            x,
            gap_y: 200.0,
            gap_height: 168.0,
            cluster: pairs
                .iter()
                .map(|&(stalactite, stalagmite)| SpikePair {
                    stalactite,
                    stalagmite,
                    sprite: 0,
                })
                .collect(),
            passed: false,
        }
    }

    #[test]
    fn test_edge_touching_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
        assert!(a.overlaps(&Rect::new(9.5, 9.5, 10.0, 10.0)));
    }

    #[test]
    fn test_floor_boundary() {
        let h = 600.0;
        let size = h * 0.08;
        assert_eq!(check_bounds(h - size + 1.0, size, h), Some(Collision::Floor));
        assert_eq!(check_bounds(h - size, size, h), None);
    }

    #[test]
    fn test_ceiling_boundary() {
        assert_eq!(check_bounds(-0.5, 48.0, 600.0), Some(Collision::Ceiling));
        assert_eq!(check_bounds(0.0, 48.0, 600.0), None);
    }

    #[test]
    fn test_stalactite_and_stalagmite_hits() {
        let obs = obstacle(100.0, &[(150.0, 150.0)]);
        let top = bat_rect(DVec2::new(120.0, 100.0), 48.0);
        assert_eq!(
            check_obstacle(&top, &obs, 237.6, 600.0),
            Some(Collision::Stalactite { obstacle: 7, pair: 0 })
        );

        let bottom = bat_rect(DVec2::new(120.0, 420.0), 48.0);
        assert_eq!(
            check_obstacle(&bottom, &obs, 237.6, 600.0),
            Some(Collision::Stalagmite { obstacle: 7, pair: 0 })
        );

        let gap = bat_rect(DVec2::new(120.0, 200.0), 48.0);
        assert_eq!(check_obstacle(&gap, &obs, 237.6, 600.0), None);
    }

    #[test]
    fn test_every_pair_in_cluster_is_checked() {
        // Second pair has the longer stalactite
        let obs = obstacle(100.0, &[(150.0, 150.0), (260.0, 150.0)]);
        let bat = bat_rect(DVec2::new(120.0, 200.0), 48.0);
        assert_eq!(
            check_obstacle(&bat, &obs, 237.6, 600.0),
            Some(Collision::Stalactite { obstacle: 7, pair: 1 })
        );
    }

    #[test]
    fn test_horizontal_miss() {
        let obs = obstacle(400.0, &[(300.0, 300.0)]);
        let bat = bat_rect(DVec2::new(144.0, 200.0), 48.0);
        assert_eq!(check_obstacle(&bat, &obs, 237.6, 600.0), None);
        // Bat right edge exactly at the obstacle's left edge
        let touching = bat_rect(DVec2::new(352.0, 200.0), 48.0);
        assert_eq!(check_obstacle(&touching, &obs, 237.6, 600.0), None);
    }

    #[test]
    fn test_session_checks_bounds_first() {
        let mut session = GameSession::new(1, Viewport::new(800.0, 600.0));
        session.bat.pos.y = 590.0;
        session.obstacles.push(obstacle(100.0, &[(300.0, 300.0)]));
        assert_eq!(session.detect_collision(), Some(Collision::Floor));

        session.bat.pos.y = 200.0;
        assert_eq!(
            session.detect_collision(),
            Some(Collision::Stalactite { obstacle: 7, pair: 0 })
        );
    }
}
