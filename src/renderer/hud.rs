//! HUD text model
//!
//! The canvas pipeline draws shapes only; text lives in DOM overlays. This is
//! the plain data those overlays are filled from.

use glam::Vec2;

use crate::sim::Snapshot;

/// A thought's label, anchored above its disc
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: &'static str,
    /// Pixel position of the text centre
    pub pos: Vec2,
}

/// Final screen text
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverText {
    pub title: String,
    pub summary: String,
    pub hint: String,
}

/// All text shown this frame
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub time: String,
    /// "<ABILITY> ACTIVE" while the banner is up
    pub banner: Option<String>,
    pub labels: Vec<Label>,
    pub game_over: Option<GameOverText>,
}

impl Hud {
    pub fn from_snapshot(snap: &Snapshot) -> Self {
        Self {
            time: format!("TIME: {}s", snap.survived_secs),
            banner: snap
                .banner
                .map(|ability| format!("{} ACTIVE", ability.label())),
            labels: snap
                .thoughts
                .iter()
                .map(|t| Label {
                    text: t.kind.label(),
                    pos: t.pos - Vec2::new(0.0, t.size),
                })
                .collect(),
            game_over: snap.game_over.then(|| GameOverText {
                title: "YOUR MIND COLLAPSED".to_string(),
                summary: format!("You stayed clear for {} seconds", snap.survived_secs),
                hint: "Refresh to try again".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Ability, GameState, activate};

    #[test]
    fn test_time_and_banner() {
        let mut state = GameState::new(1, Vec2::new(800.0, 600.0));
        state.survived_secs = 12;
        assert_eq!(Hud::from_snapshot(&state.snapshot()).banner, None);

        activate(&mut state, Ability::Acceptance);
        let hud = Hud::from_snapshot(&state.snapshot());
        assert_eq!(hud.time, "TIME: 12s");
        assert_eq!(hud.banner.as_deref(), Some("ACCEPTANCE ACTIVE"));
        assert!(hud.game_over.is_none());
    }

    #[test]
    fn test_labels_sit_above_thoughts() {
        let mut state = GameState::new(1, Vec2::new(800.0, 600.0));
        crate::sim::spawn_thought(&mut state);
        let thought = state.thoughts[0].clone();

        let hud = Hud::from_snapshot(&state.snapshot());
        assert_eq!(hud.labels.len(), 1);
        assert_eq!(hud.labels[0].text, thought.kind.label());
        assert_eq!(hud.labels[0].pos, thought.pos - Vec2::new(0.0, thought.size));
    }

    #[test]
    fn test_game_over_text() {
        let mut state = GameState::new(1, Vec2::new(800.0, 600.0));
        state.survived_secs = 47;
        let mut snap = state.snapshot();
        snap.game_over = true;

        let text = Hud::from_snapshot(&snap).game_over.unwrap();
        assert_eq!(text.title, "YOUR MIND COLLAPSED");
        assert_eq!(text.summary, "You stayed clear for 47 seconds");
        assert_eq!(text.hint, "Refresh to try again");
    }
}
