//! Demo controller
//!
//! Flaps to keep the bat level with the passage of the next obstacle ahead.
//! Good enough for attract mode and soak tests, not for high scores.

use crate::sim::{GamePhase, GameSession, Obstacle, TickInput};

/// Nearest obstacle whose right edge is still ahead of the bat
pub fn next_obstacle(session: &GameSession) -> Option<&Obstacle> {
    let width = session.obstacle_width();
    let bat_x = session.bat.pos.x;
    session
        .obstacles
        .iter()
        .filter(|o| !o.passed && o.right_edge(width) >= bat_x)
        .min_by(|a, b| a.x.total_cmp(&b.x))
}

/// Where the bat's centre should be
pub fn target_y(session: &GameSession) -> f64 {
    match next_obstacle(session) {
        Some(obstacle) => {
            // Aim between the longest stalactite and the longest stalagmite
            let h = session.viewport.height;
            let top = obstacle
                .cluster
                .iter()
                .map(|p| p.stalactite)
                .fold(0.0, f64::max);
            let bottom = obstacle
                .cluster
                .iter()
                .map(|p| h - p.stalagmite)
                .fold(h, f64::min);
            (top + bottom) / 2.0
        }
        None => session.viewport.height / 2.0,
    }
}

/// Input for the next frame
pub fn decide(session: &GameSession) -> TickInput {
    match session.phase {
        GamePhase::Start | GamePhase::GameOver => TickInput {
            begin: true,
            flap: false,
        },
        GamePhase::Playing => {
            let bottom = session.bat.pos.y + session.bat_size();
            let falling = session.bat.vel >= 0.0;
            TickInput {
                begin: false,
                flap: falling && bottom > target_y(session) + session.bat_size() / 2.0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SpikePair, Viewport, tick};

    #[test]
    fn test_begins_from_overlay() {
        let session = GameSession::new(1, Viewport::new(800.0, 600.0));
        assert!(decide(&session).begin);
    }

    #[test]
    fn test_targets_passage_between_spikes() {
        let mut session = GameSession::new(1, Viewport::new(800.0, 600.0));
        session.start_round(0.0);
        session.obstacles[0].cluster = vec![
            SpikePair {
                stalactite: 100.0,
                stalagmite: 250.0,
                sprite: 0,
            },
            SpikePair {
                stalactite: 200.0,
                stalagmite: 100.0,
                sprite: 0,
            },
        ];
        // top = 200, bottom = 600 - 250 = 350
        assert_eq!(target_y(&session), 275.0);
    }

    #[test]
    fn test_survives_several_seconds() {
        let mut session = GameSession::new(2024, Viewport::new(800.0, 600.0));
        let mut now = 0.0;
        let input = decide(&session);
        tick(&mut session, &input, now);
        while now < 5000.0 {
            now += 1000.0 / 60.0;
            let input = decide(&session);
            if !tick(&mut session, &input, now) {
                break;
            }
        }
        // Gravity alone ends the round in well under a second after the grace delay
        assert!(session.time_ticks > 60);
    }
}
