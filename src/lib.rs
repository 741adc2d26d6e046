//! Gone Batty - a cave-flying arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game loop)
//! - `renderer`: Pure render step producing sprite draw commands
//! - `ui`: Overlay text for the start and game-over screens
//! - `tuning`: Data-driven game balance
//! - `autopilot`: Demo controller that plays the game
//! - `platform`: Browser/native host adapters

pub mod autopilot;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use sim::{GamePhase, GameSession, TickInput, tick};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// Ratios are relative to the canvas: `_H` ratios scale with height,
/// `_W` ratios with width. Per-frame values assume a steady frame cadence.
pub mod consts {
    /// Bat is a square this fraction of the canvas height
    pub const BAT_SIZE_H: f64 = 0.08;
    /// Fixed horizontal bat position
    pub const BAT_X_W: f64 = 0.18;
    /// Downward acceleration per frame
    pub const GRAVITY_H: f64 = 0.0005;
    /// Flap sets velocity to minus this (per frame)
    pub const FLAP_H: f64 = 0.010;

    /// Bat sprite sheet: 5 frames, advanced every 6 ticks
    pub const BAT_FRAMES: u32 = 5;
    pub const BAT_TICKS_PER_FRAME: u32 = 6;
    pub const BAT_FRAME_PX: f64 = 32.0;

    /// Spike heights drawn from [MIN, MAX] of canvas height
    pub const SPIKE_MIN_H: f64 = 0.121;
    pub const SPIKE_MAX_H: f64 = 0.242;
    /// Stalactite + stalagmite must cover at least this much height
    pub const SPIKE_MIN_TOTAL_H: f64 = 0.5;
    /// Sprites in the stalagmite sheet
    pub const SPIKE_SPRITES: u32 = 6;

    /// Passage through a cluster
    pub const GAP_HEIGHT_H: f64 = 0.28;
    pub const GAP_MARGIN_H: f64 = 0.18;

    /// Spawn interval, redrawn on every spawn check (ms)
    pub const SPAWN_INTERVAL_MIN_MS: f64 = 1500.0;
    pub const SPAWN_INTERVAL_MAX_MS: f64 = 3750.0;

    /// Spike pairs per cluster (inclusive)
    pub const CLUSTER_MIN: u32 = 1;
    pub const CLUSTER_MAX: u32 = 3;
    /// Spacing between drawn cluster members
    pub const CLUSTER_GAP_W: f64 = 0.01;

    /// Obstacle width per cluster slot; total width uses CLUSTER_MAX slots
    pub const OBSTACLE_SLOT_W: f64 = 0.099;
    /// Leftward scroll per frame
    pub const SCROLL_W: f64 = 0.0035;

    /// Pause between round start and the first physics update (ms)
    pub const GRACE_MS: f64 = 500.0;
}
