//! Headless host: drives the loop with a simulated frame clock
//!
//! Used by the native binary and by soak tests. Renders into a [`DrawList`]
//! so the render step runs every frame exactly as it would in a browser.

use crate::renderer::{DrawList, SpriteSheets, render};
use crate::sim::{Collision, GameEvent, GameSession, TickInput, tick};

/// Outcome of one simulated round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    pub score: u32,
    pub ticks: u64,
    /// `None` if the round hit the time limit
    pub collision: Option<Collision>,
    pub obstacles_spawned: usize,
    /// Most sprites drawn in a single frame
    pub peak_draws: usize,
}

pub struct HeadlessRunner {
    pub session: GameSession,
    pub sheets: SpriteSheets,
    /// Simulated frame length (ms)
    pub frame_ms: f64,
    pub now_ms: f64,
    frame: DrawList,
}

impl HeadlessRunner {
    pub fn new(session: GameSession, frame_ms: f64) -> Self {
        Self {
            session,
            sheets: SpriteSheets::default(),
            frame_ms,
            now_ms: 0.0,
            frame: DrawList::new(),
        }
    }

    /// Last rendered frame
    pub fn frame(&self) -> &DrawList {
        &self.frame
    }

    /// Start a round and play it until it ends or `limit_ms` elapses
    pub fn run_round<F>(&mut self, mut controller: F, limit_ms: f64) -> RoundReport
    where
        F: FnMut(&GameSession) -> TickInput,
    {
        // A round cut short by the time limit is still playing
        self.session.end_round();
        let begin = TickInput {
            begin: true,
            flap: false,
        };
        tick(&mut self.session, &begin, self.now_ms);
        let started = self.now_ms;

        let mut report = RoundReport {
            score: 0,
            ticks: 0,
            collision: None,
            obstacles_spawned: 0,
            peak_draws: 0,
        };

        loop {
            self.count_events(&mut report);
            render(&self.session, &self.sheets, &mut self.frame);
            report.peak_draws = report.peak_draws.max(self.frame.draws.len());

            if !self.session.is_playing() || self.now_ms - started >= limit_ms {
                break;
            }

            self.now_ms += self.frame_ms;
            let input = controller(&self.session);
            tick(&mut self.session, &input, self.now_ms);
        }

        report.score = self.session.score;
        report.ticks = self.session.time_ticks;
        report.collision = self.session.last_collision;
        log::info!(
            "round over: score={} ticks={} collision={:?} spawned={}",
            report.score,
            report.ticks,
            report.collision,
            report.obstacles_spawned
        );
        report
    }

    fn count_events(&mut self, report: &mut RoundReport) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::ObstacleSpawned { .. } => report.obstacles_spawned += 1,
                GameEvent::Crashed { collision, score } => {
                    log::debug!("crashed into {:?} with score {}", collision, score)
                }
                GameEvent::RoundStarted => {}
            }
        }
    }
}
