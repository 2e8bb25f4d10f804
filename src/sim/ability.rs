//! Player abilities
//!
//! Focus and Acceptance are timed status effects; Silence is instantaneous.
//! Activation never touches audio directly: it returns events, plus a deferred
//! event for Silence's delayed ambient resume.

use serde::Serialize;

use super::state::{GameEvent, GameState};
use super::timers::Deferred;
use crate::consts::*;

/// Externally triggered abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Ability {
    /// Slows every thought for a while
    Focus,
    /// Collisions stop draining clarity for a while
    Acceptance,
    /// Clears all thoughts at once
    Silence,
}

impl Ability {
    pub const ALL: [Ability; 3] = [Ability::Focus, Ability::Acceptance, Ability::Silence];

    pub fn label(&self) -> &'static str {
        match self {
            Ability::Focus => "FOCUS",
            Ability::Acceptance => "ACCEPTANCE",
            Ability::Silence => "SILENCE",
        }
    }

    /// Keyboard shortcut used by the web front-end
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "1" => Some(Ability::Focus),
            "2" => Some(Ability::Acceptance),
            "3" => Some(Ability::Silence),
            _ => None,
        }
    }
}

/// What an activation asks the outside world to do
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Activation {
    /// Fire now
    pub events: Vec<GameEvent>,
    /// Fire later, on the wall clock
    pub deferred: Option<Deferred>,
}

/// Apply an ability to the state. No-op once the game is over.
pub fn activate(state: &mut GameState, ability: Ability) -> Activation {
    if state.is_game_over() {
        return Activation::default();
    }

    let mut activation = Activation::default();

    match ability {
        Ability::Focus => state.abilities.focus.activate(ABILITY_DURATION_TICKS),
        Ability::Acceptance => state.abilities.acceptance.activate(ABILITY_DURATION_TICKS),
        Ability::Silence => {
            let cleared = state.thoughts.len();
            state.thoughts.clear();
            log::debug!("Silence cleared {} thoughts", cleared);

            activation.events.push(GameEvent::AmbientPause);
            if state.heartbeat {
                state.heartbeat = false;
                activation.events.push(GameEvent::HeartbeatStop);
            }
            activation.events.push(GameEvent::SilenceChime);
            activation.deferred = Some(Deferred {
                delay_ms: SILENCE_RESUME_MS,
                event: GameEvent::AmbientResume,
            });
        }
    }

    state.banner.show(ability);
    activation.events.push(GameEvent::AbilityActivated(ability));
    log::debug!("{} activated at tick {}", ability.label(), state.time_ticks);

    activation
}
