//! Thought spawning
//!
//! Runs on its own wall-clock interval, independent of the tick cadence.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Thought, ThoughtKind};
use super::timers::IntervalTimer;
use crate::consts::*;

/// Interval-driven spawner
#[derive(Debug, Clone)]
pub struct Spawner {
    timer: IntervalTimer,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(SPAWN_INTERVAL_MS)
    }
}

impl Spawner {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            timer: IntervalTimer::new(interval_ms),
        }
    }

    /// Milliseconds until the next scheduled spawn
    pub fn next_spawn_in_ms(&self) -> f64 {
        self.timer.remaining_ms()
    }

    /// Advance the wall clock, spawning one thought per elapsed interval.
    ///
    /// The timer keeps running after game over but nothing is added.
    pub fn advance(&mut self, state: &mut GameState, dt_ms: f64) -> Vec<GameEvent> {
        let fired = self.timer.advance(dt_ms);
        if state.is_game_over() {
            return Vec::new();
        }
        (0..fired)
            .map(|_| GameEvent::ThoughtSpawned {
                kind: spawn_thought(state),
            })
            .collect()
    }
}

/// Append one thought just outside a random screen edge
pub fn spawn_thought(state: &mut GameState) -> ThoughtKind {
    let size = THOUGHT_SIZE;
    let Vec2 { x: w, y: h } = state.viewport;
    let rng = &mut state.rng;

    let pos = match rng.random_range(0..4u8) {
        0 => Vec2::new(rng.random::<f32>() * w, -size),
        1 => Vec2::new(w + size, rng.random::<f32>() * h),
        2 => Vec2::new(rng.random::<f32>() * w, h + size),
        _ => Vec2::new(-size, rng.random::<f32>() * h),
    };
    let speed = rng.random_range(THOUGHT_MIN_SPEED..THOUGHT_MAX_SPEED);
    let kind = ThoughtKind::ALL[rng.random_range(0..ThoughtKind::ALL.len())];

    let id = state.next_entity_id();
    state.thoughts.push(Thought {
        id,
        pos,
        size,
        speed,
        kind,
    });
    log::debug!("Spawned {} #{} at ({:.0}, {:.0})", kind.label(), id, pos.x, pos.y);

    kind
}
