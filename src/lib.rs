//! Clear Mind - a survival arcade game about keeping your head clear
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input, spawning, abilities, game state)
//! - `game`: Loop driver tying the simulation to wall-clock time
//! - `renderer`: Scene building and the WebGPU pipeline
//! - `audio`: Procedural Web Audio driven by simulation events
//! - `settings`: Runtime preferences

pub mod audio;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// Per-tick quantities are tuned for one tick per 60 Hz frame.
pub mod consts {
    /// Fixed simulation timestep (one original display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per second of simulated time
    pub const TICKS_PER_SEC: u64 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the driver accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Pixels per tick at full input deflection
    pub const PLAYER_SPEED: f32 = 4.0;
    /// Pulse phase advance per tick (visual only)
    pub const PULSE_STEP: f32 = 0.1;

    /// Thought defaults
    pub const THOUGHT_SIZE: f32 = 26.0;
    pub const THOUGHT_MIN_SPEED: f32 = 1.0;
    pub const THOUGHT_MAX_SPEED: f32 = 2.0;
    /// Wall-clock spawn interval
    pub const SPAWN_INTERVAL_MS: f64 = 2000.0;

    /// Clarity resource
    pub const CLARITY_MAX: f32 = 100.0;
    /// Clarity lost per colliding thought per tick
    pub const COLLISION_DRAIN: f32 = 0.25;

    /// Heartbeat starts below this clarity...
    pub const HEARTBEAT_ON_BELOW: f32 = 60.0;
    /// ...and stops again above this one
    pub const HEARTBEAT_OFF_ABOVE: f32 = 70.0;

    /// Transient effects set on collision, decayed every tick
    pub const SHAKE_ON_HIT: f32 = 10.0;
    pub const FLASH_ON_HIT: f32 = 0.4;
    pub const EFFECT_DECAY: f32 = 0.9;

    /// Abilities
    pub const ABILITY_DURATION_TICKS: u32 = 300;
    pub const BANNER_DURATION_TICKS: u32 = 120;
    /// Thought speed multiplier while Focus is active
    pub const FOCUS_SLOWDOWN: f32 = 0.3;
    /// Delay before ambient audio returns after Silence
    pub const SILENCE_RESUME_MS: f64 = 2000.0;
}

/// Clamp the top-left corner of a `size` box so the box stays inside `viewport`.
///
/// A viewport smaller than the box pins it to the origin.
#[inline]
pub fn clamp_box(pos: Vec2, size: f32, viewport: Vec2) -> Vec2 {
    let max = (viewport - Vec2::splat(size)).max(Vec2::ZERO);
    pos.clamp(Vec2::ZERO, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_box_inside_is_untouched() {
        let pos = clamp_box(Vec2::new(50.0, 60.0), 30.0, Vec2::new(800.0, 600.0));
        assert_eq!(pos, Vec2::new(50.0, 60.0));
    }

    #[test]
    fn test_clamp_box_edges() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(clamp_box(Vec2::new(-5.0, -1.0), 30.0, viewport), Vec2::ZERO);
        assert_eq!(
            clamp_box(Vec2::new(900.0, 700.0), 30.0, viewport),
            Vec2::new(770.0, 570.0)
        );
    }

    #[test]
    fn test_clamp_box_tiny_viewport() {
        let pos = clamp_box(Vec2::new(10.0, 10.0), 30.0, Vec2::new(20.0, 20.0));
        assert_eq!(pos, Vec2::ZERO);
    }
}
