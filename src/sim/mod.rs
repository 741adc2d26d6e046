//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, time injected by the host
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{Collision, Rect, bat_rect, check_bounds, check_obstacle, spike_rects};
pub use obstacles::{advance_obstacles, obstacle_width, prune_obstacles, spawn_obstacle};
pub use rng::{RangeSource, SimRng};
pub use state::{
    Bat, GameEvent, GamePhase, GameSession, Obstacle, RoundClock, RoundParams, SpikePair, Viewport,
};
pub use tick::{TickInput, tick};
