//! Game session and core simulation types
//!
//! All state one round needs lives in [`GameSession`]; nothing is global.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::Collision;
use super::rng::SimRng;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title overlay, waiting for the first input
    Start,
    /// Active round
    Playing,
    /// Round ended by a collision, waiting for restart
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Start => "start",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameover",
        }
    }
}

/// Canvas size in pixels, as last reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The player's bat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bat {
    /// Top-left corner; x is fixed for the whole round
    pub pos: DVec2,
    /// Vertical velocity (px/frame, positive is down)
    pub vel: f64,
    /// Animation frame index
    pub frame: u32,
    /// Ticks since the round started, drives `frame`
    pub frame_ticks: u32,
}

impl Bat {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            vel: 0.0,
            frame: 0,
            frame_ticks: 0,
        }
    }
}

/// Constants derived from the viewport when a round starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundParams {
    /// Downward acceleration per frame
    pub gravity: f64,
    /// Velocity a flap sets (negative, upward)
    pub flap_impulse: f64,
    pub bat_x: f64,
}

impl RoundParams {
    pub fn derive(tuning: &Tuning, viewport: Viewport) -> Self {
        Self {
            gravity: viewport.height * tuning.gravity,
            flap_impulse: -viewport.height * tuning.flap,
            bat_x: viewport.width * tuning.bat_x,
        }
    }
}

/// One stalactite/stalagmite pair in a cluster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpikePair {
    /// Hangs from the ceiling
    pub stalactite: f64,
    /// Rises from the floor
    pub stalagmite: f64,
    /// Sprite in the stalagmite sheet
    pub sprite: u32,
}

impl SpikePair {
    pub fn total(&self) -> f64 {
        self.stalactite + self.stalagmite
    }

    /// Grow both spikes by half the deficit when they cover less than `min_total`
    pub fn enforce_min_total(&mut self, min_total: f64) {
        let total = self.total();
        if total < min_total {
            let extra = min_total - total;
            self.stalactite += extra / 2.0;
            self.stalagmite += extra / 2.0;
        }
    }

    pub fn clamp_sprite(&mut self, sprite_count: u32) {
        self.sprite = self.sprite.min(sprite_count.saturating_sub(1));
    }
}

/// A scrolling cluster of 1-3 spike pairs sharing one passage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge, decreasing every frame
    pub x: f64,
    /// Top of the passage
    pub gap_y: f64,
    pub gap_height: f64,
    /// Spike pairs, left to right
    pub cluster: Vec<SpikePair>,
    /// Set once the bat is past the right edge
    pub passed: bool,
}

impl Obstacle {
    pub fn right_edge(&self, width: f64) -> f64 {
        self.x + width
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    ObstacleSpawned { id: u32, pairs: usize },
    Crashed { collision: Collision, score: u32 },
}

/// Millisecond timestamps for the current round
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundClock {
    pub started_at_ms: f64,
    /// Physics starts once `now >= resume_at_ms`
    pub resume_at_ms: f64,
    pub last_spawn_ms: f64,
}

/// Everything the game loop owns
#[derive(Debug, Clone)]
pub struct GameSession {
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub rng: SimRng,
    pub phase: GamePhase,
    pub params: RoundParams,
    pub bat: Bat,
    /// Spawn order, which is also left-to-right order
    pub obstacles: Vec<Obstacle>,
    /// Whole seconds since the round started
    pub score: u32,
    pub clock: RoundClock,
    /// Physics ticks simulated this round
    pub time_ticks: u64,
    /// Set when the last round ended
    pub last_collision: Option<Collision>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameSession {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self::with_tuning(seed, viewport, Tuning::default())
    }

    pub fn with_tuning(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        let params = RoundParams::derive(&tuning, viewport);
        Self {
            bat: Bat::new(params.bat_x, viewport.height / 2.0),
            tuning,
            viewport,
            rng: SimRng::new(seed),
            phase: GamePhase::Start,
            params,
            obstacles: Vec::new(),
            score: 0,
            clock: RoundClock::default(),
            time_ticks: 0,
            last_collision: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Canvas resized; takes effect from the next frame
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn bat_size(&self) -> f64 {
        self.viewport.height * self.tuning.bat_size
    }

    /// Fixed obstacle width used for spacing, pruning and hit boxes
    pub fn obstacle_width(&self) -> f64 {
        super::obstacles::obstacle_width(&self.tuning, self.viewport)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
