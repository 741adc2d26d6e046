//! Overlay text for the start and game-over screens
//!
//! The host owns the DOM/terminal; this module only decides what it says.

use crate::sim::{GamePhase, GameSession};

/// Contents of a full-screen overlay with one button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: String,
    pub body: String,
    pub button: String,
}

impl Overlay {
    fn new(title: &str, body: &str, button: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.strip_suffix('.').unwrap_or(body).to_string(),
            button: button.to_string(),
        }
    }
}

pub fn start_overlay() -> Overlay {
    Overlay::new("Gone Batty", "Click or tap to flap, flap, flap.", "Start winging it")
}

pub fn game_over_overlay(score: u32) -> Overlay {
    let body = if score < 2 {
        "Bat's a wrap, alas, too soon".to_string()
    } else {
        format!("Bat's a wrap, after {} glorious seconds", score)
    };
    Overlay::new("Game over", &body, "Fly again")
}

/// Overlay for the current phase, if any
pub fn overlay_for(session: &GameSession) -> Option<Overlay> {
    match session.phase {
        GamePhase::Start => Some(start_overlay()),
        GamePhase::Playing => None,
        GamePhase::GameOver => Some(game_over_overlay(session.score)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Viewport;

    #[test]
    fn test_start_body_drops_trailing_period() {
        let overlay = start_overlay();
        assert_eq!(overlay.title, "Gone Batty");
        assert_eq!(overlay.body, "Click or tap to flap, flap, flap");
        assert_eq!(overlay.button, "Start winging it");
    }

    #[test]
    fn test_game_over_messages() {
        assert_eq!(game_over_overlay(0).body, "Bat's a wrap, alas, too soon");
        assert_eq!(game_over_overlay(1).body, "Bat's a wrap, alas, too soon");
        assert_eq!(
            game_over_overlay(12).body,
            "Bat's a wrap, after 12 glorious seconds"
        );
        assert_eq!(game_over_overlay(2).button, "Fly again");
    }

    #[test]
    fn test_overlay_follows_phase() {
        let mut session = GameSession::new(1, Viewport::new(800.0, 600.0));
        assert_eq!(overlay_for(&session), Some(start_overlay()));
        session.start_round(0.0);
        assert_eq!(overlay_for(&session), None);
        session.score = 5;
        session.end_round();
        assert_eq!(overlay_for(&session), Some(game_over_overlay(5)));
    }
}
