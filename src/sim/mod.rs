//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies (side effects leave as `GameEvent`s)

pub mod ability;
pub mod collision;
pub mod input;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timers;

pub use ability::{Ability, Activation, activate};
pub use collision::{circles_overlap, player_hits};
pub use input::{Direction, DirectionSet, InputState, joystick_from_drag};
pub use spawner::{Spawner, spawn_thought};
pub use state::{
    AbilityTimer, Abilities, Banner, Effects, GameEvent, GamePhase, GameState, Player, Snapshot,
    Thought, ThoughtKind, ThoughtView,
};
pub use tick::{TickInput, tick};
pub use timers::{Deferred, DeferredQueue, IntervalTimer};
