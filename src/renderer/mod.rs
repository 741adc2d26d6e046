//! Render step
//!
//! Reads a [`GameSession`] and emits sprite blits to a [`SpriteSink`].
//! Nothing here mutates the simulation.

pub mod sprite;

pub use sprite::{SheetId, SpriteDraw, SpriteSheet, SpriteSheets};

use crate::sim::{Bat, GamePhase, GameSession, Obstacle, Rect, Viewport};

/// Host drawing surface
pub trait SpriteSink {
    /// Clear the frame and paint the cave background
    fn clear(&mut self, _viewport: Viewport) {}

    fn draw_sprite(&mut self, draw: &SpriteDraw);

    /// Score display hook
    fn show_score(&mut self, _score: u32) {}
}

/// Records a frame for headless use and tests
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub draws: Vec<SpriteDraw>,
    pub cleared: bool,
    pub score: Option<u32>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpriteSink for DrawList {
    fn clear(&mut self, _viewport: Viewport) {
        self.draws.clear();
        self.cleared = true;
    }

    fn draw_sprite(&mut self, draw: &SpriteDraw) {
        self.draws.push(*draw);
    }

    fn show_score(&mut self, score: u32) {
        self.score = Some(score);
    }
}

/// Draw one frame
///
/// Overlay phases only get the background; the host draws the overlay text.
pub fn render<S: SpriteSink>(session: &GameSession, sheets: &SpriteSheets, sink: &mut S) {
    sink.clear(session.viewport);
    if session.phase != GamePhase::Playing {
        return;
    }

    for obstacle in &session.obstacles {
        draw_obstacle(obstacle, session, &sheets.spikes, sink);
    }
    draw_bat(&session.bat, session.bat_size(), session.tuning.bat_frames, &sheets.bat, sink);
    sink.show_score(session.score);
}

/// Cluster members left to right; widths keep the sprite's aspect ratio
fn draw_obstacle<S: SpriteSink>(
    obstacle: &Obstacle,
    session: &GameSession,
    sheet: &SpriteSheet,
    sink: &mut S,
) {
    let canvas_h = session.viewport.height;
    let spacing = session.viewport.width * session.tuning.cluster_gap;
    let aspect = sheet.frame_width() / sheet.height;

    let mut x = obstacle.x;
    for pair in &obstacle.cluster {
        let src = sheet.frame_rect(pair.sprite);
        let stalactite_w = pair.stalactite * aspect;
        let stalagmite_w = pair.stalagmite * aspect;

        sink.draw_sprite(&SpriteDraw {
            sheet: SheetId::Spikes,
            src,
            dst: Rect::new(x, 0.0, stalactite_w, pair.stalactite),
            flip_x: false,
            flip_y: false,
        });
        sink.draw_sprite(&SpriteDraw {
            sheet: SheetId::Spikes,
            src,
            dst: Rect::new(x, canvas_h - pair.stalagmite, stalagmite_w, pair.stalagmite),
            flip_x: false,
            flip_y: true,
        });

        x += stalactite_w.max(stalagmite_w) + spacing;
    }
}

/// The sheet faces left, so the bat is mirrored to fly right
fn draw_bat<S: SpriteSink>(bat: &Bat, size: f64, frames: u32, sheet: &SpriteSheet, sink: &mut S) {
    sink.draw_sprite(&SpriteDraw {
        sheet: SheetId::Bat,
        src: sheet.frame_rect(bat.frame % frames.max(1)),
        dst: Rect::new(bat.pos.x, bat.pos.y, size, size),
        flip_x: true,
        flip_y: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::{SpikePair, TickInput, tick};

    fn playing() -> GameSession {
        let mut session = GameSession::new(3, Viewport::new(800.0, 600.0));
        tick(&mut session, &TickInput { begin: true, flap: false }, 0.0);
        session
    }

    #[test]
    fn test_start_screen_draws_background_only() {
        let session = GameSession::new(3, Viewport::new(800.0, 600.0));
        let mut list = DrawList::new();
        render(&session, &SpriteSheets::default(), &mut list);
        assert!(list.cleared);
        assert!(list.draws.is_empty());
        assert_eq!(list.score, None);
    }

    #[test]
    fn test_bat_drawn_last_and_mirrored() {
        let session = playing();
        let mut list = DrawList::new();
        render(&session, &SpriteSheets::default(), &mut list);

        let pairs = session.obstacles[0].cluster.len();
        assert_eq!(list.draws.len(), pairs * 2 + 1);

        let bat = list.draws.last().unwrap();
        assert_eq!(bat.sheet, SheetId::Bat);
        assert!(bat.flip_x);
        assert_eq!(bat.dst, Rect::new(144.0, 300.0, 48.0, 48.0));
        assert_eq!(list.score, Some(0));
    }

    #[test]
    fn test_cluster_layout() {
        let mut session = playing();
        session.obstacles[0].x = 400.0;
        session.obstacles[0].cluster = vec![
            SpikePair {
                stalactite: 128.0,
                stalagmite: 192.0,
                sprite: 1,
            },
            SpikePair {
                stalactite: 160.0,
                stalagmite: 160.0,
                sprite: 4,
            },
        ];
        let mut list = DrawList::new();
        render(&session, &SpriteSheets::default(), &mut list);

        // Spike frames are 64x256: width is a quarter of the height
        let top = list.draws[0];
        assert_eq!(top.dst, Rect::new(400.0, 0.0, 32.0, 128.0));
        assert_eq!(top.src, Rect::new(64.0, 0.0, 64.0, 256.0));
        assert!(!top.flip_y);

        let bottom = list.draws[1];
        assert_eq!(bottom.dst, Rect::new(400.0, 408.0, 48.0, 192.0));
        assert!(bottom.flip_y);

        // Next member starts after the wider spike plus 1% of the width
        assert_eq!(list.draws[2].dst.min.x, 400.0 + 48.0 + 8.0);
        assert_eq!(list.draws[2].src.min.x, 256.0);
    }

    #[test]
    fn test_gameover_draws_background_only() {
        let mut session = playing();
        session.end_round();
        let mut list = DrawList::new();
        render(&session, &SpriteSheets::default(), &mut list);
        assert!(list.draws.is_empty());
    }


    #[test]
    fn test_cluster_spacing_follows_tuning() {
        let tuning = Tuning {
            cluster_gap: 0.05,
            ..Tuning::default()
        };
        let mut session = GameSession::with_tuning(3, Viewport::new(800.0, 600.0), tuning);
        tick(&mut session, &TickInput { begin: true, flap: false }, 0.0);
        session.obstacles[0].x = 400.0;
        session.obstacles[0].cluster = vec![
            SpikePair {
                stalactite: 160.0,
                stalagmite: 160.0,
                sprite: 0,
            };
            2
        ];
        let mut list = DrawList::new();
        render(&session, &SpriteSheets::default(), &mut list);

        // 40px at 5% of 800
        assert_eq!(list.draws[2].dst.min.x, 400.0 + 40.0 + 40.0);
    }
}
