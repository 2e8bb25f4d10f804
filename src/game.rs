//! Loop driver
//!
//! Owns the simulation state and everything that advances it: the fixed-step
//! accumulator, the spawn interval and the deferred event queue. Platform code
//! feeds it frame deltas and input; it hands back events for the audio layer.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{
    Ability, DeferredQueue, GameEvent, GamePhase, GameState, InputState, Snapshot, Spawner,
    TickInput, activate, tick,
};

/// A single play session
pub struct Game {
    pub state: GameState,
    pub input: InputState,
    spawner: Spawner,
    deferred: DeferredQueue,
    accumulator: f32,
    /// Events produced between frames (ability triggers)
    outbox: Vec<GameEvent>,
    last_phase: GamePhase,
}

impl Game {
    pub fn new(seed: u64, viewport: Vec2) -> Self {
        log::info!(
            "New session: seed {}, viewport {}x{}",
            seed,
            viewport.x,
            viewport.y
        );
        Self {
            state: GameState::new(seed, viewport),
            input: InputState::default(),
            spawner: Spawner::default(),
            deferred: DeferredQueue::new(),
            accumulator: 0.0,
            outbox: Vec::new(),
            last_phase: GamePhase::Active,
        }
    }

    /// Viewport changed (window resize); the player is re-clamped on the next tick
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.state.viewport = Vec2::new(width, height);
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Milliseconds until the spawner adds the next thought
    pub fn next_spawn_in_ms(&self) -> f64 {
        self.spawner.next_spawn_in_ms()
    }

    /// Trigger an ability right away (key press or button)
    pub fn trigger(&mut self, ability: Ability) {
        let activation = activate(&mut self.state, ability);
        if let Some(deferred) = activation.deferred {
            self.deferred.push(deferred);
        }
        self.outbox.extend(activation.events);
    }

    /// Advance by one rendered frame of `dt` seconds.
    ///
    /// Runs as many fixed ticks as the accumulator allows, then the wall-clock
    /// timers. Returns every event produced since the previous call.
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        let mut events = std::mem::take(&mut self.outbox);

        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                movement: self.input.movement_intent(),
            };
            events.extend(tick(&mut self.state, &input));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        let dt_ms = f64::from(dt) * 1000.0;
        events.extend(self.spawner.advance(&mut self.state, dt_ms));
        events.extend(self.deferred.advance(dt_ms));

        if self.state.phase != self.last_phase {
            log::info!(
                "Phase {:?} -> {:?} (survived {}s)",
                self.last_phase,
                self.state.phase,
                self.state.survived_secs
            );
            self.last_phase = self.state.phase;
        }

        events
    }
}
