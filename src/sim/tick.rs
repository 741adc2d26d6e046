//! Per-frame game loop and phase transitions
//!
//! One call to [`tick`] is one frame. Time is supplied by the host in
//! milliseconds; the simulation never reads a clock of its own.

use super::physics;
use super::state::{Bat, GameEvent, GamePhase, GameSession, RoundClock, RoundParams};

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Press/click/tap while playing
    pub flap: bool,
    /// Begin or restart control while on an overlay
    pub begin: bool,
}

impl GameSession {
    /// Reset the bat, obstacles, score and timers, then spawn the first cluster
    pub fn start_round(&mut self, now_ms: f64) {
        self.params = RoundParams::derive(&self.tuning, self.viewport);
        self.bat = Bat::new(self.params.bat_x, self.viewport.height / 2.0);
        self.obstacles.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.last_collision = None;
        self.clock = RoundClock {
            started_at_ms: now_ms,
            resume_at_ms: now_ms + self.tuning.grace_ms,
            last_spawn_ms: now_ms,
        };
        self.phase = GamePhase::Playing;
        log::info!(
            "round started: {}x{} gravity={:.3} flap={:.3}",
            self.viewport.width,
            self.viewport.height,
            self.params.gravity,
            self.params.flap_impulse
        );
        self.push_event(GameEvent::RoundStarted);
        self.spawn_obstacle(now_ms);
    }

    /// Stop the round; further ticks leave the simulation untouched
    pub fn end_round(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::GameOver;
            log::info!("round ended after {} seconds", self.score);
        }
    }

    /// Set the bat's velocity to the flap impulse. Ignored unless playing.
    pub fn flap(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        physics::flap(&mut self.bat, self.params.flap_impulse);
        true
    }

    /// Still inside the pause that follows a round start
    pub fn in_grace(&self, now_ms: f64) -> bool {
        now_ms < self.clock.resume_at_ms
    }

    fn crash(&mut self, collision: super::Collision) {
        log::info!("game over: {:?} at y={:.1} score={}", collision, self.bat.pos.y, self.score);
        self.last_collision = Some(collision);
        self.push_event(GameEvent::Crashed {
            collision,
            score: self.score,
        });
        self.end_round();
    }
}

/// Advance the session by one frame
///
/// Returns `true` while the host should keep scheduling frames.
pub fn tick(session: &mut GameSession, input: &TickInput, now_ms: f64) -> bool {
    match session.phase {
        GamePhase::Start | GamePhase::GameOver => {
            if input.begin {
                session.start_round(now_ms);
            }
            return session.is_playing();
        }
        GamePhase::Playing => {}
    }

    if input.flap {
        session.flap();
    }

    if session.in_grace(now_ms) {
        return true;
    }

    session.time_ticks += 1;
    let ticks_per_frame = session.tuning.bat_ticks_per_frame;
    let frames = session.tuning.bat_frames;
    physics::step(&mut session.bat, &session.params, ticks_per_frame, frames);

    session.maybe_spawn(now_ms);
    session.update_obstacles();

    if let Some(collision) = session.detect_collision() {
        session.crash(collision);
        return false;
    }

    session.score = ((now_ms - session.clock.started_at_ms) / 1000.0).floor().max(0.0) as u32;
    true
}
