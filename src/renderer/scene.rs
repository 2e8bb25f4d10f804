//! Frame composition
//!
//! Turns a `Snapshot` into a pixel-space triangle list. Never touches the
//! simulation; the only randomness (shake jitter) is passed in by the caller.

use glam::Vec2;
use rand::Rng;

use super::ambient::AmbientLayer;
use super::shapes;
use super::vertex::{Vertex, colors, with_alpha};
use crate::consts::CLARITY_MAX;
use crate::settings::Settings;
use crate::sim::Snapshot;

/// Clarity bar placement (top-left HUD)
pub const BAR_POS: Vec2 = Vec2::new(20.0, 20.0);
pub const BAR_SIZE: Vec2 = Vec2::new(200.0, 12.0);

/// Glow radius swing driven by the player's pulse phase
const PULSE_AMPLITUDE: f32 = 4.0;
/// Dim layer over a finished run
const GAME_OVER_DIM: f32 = 0.85;

/// Random camera offset for the current shake magnitude
pub fn shake_offset(rng: &mut impl Rng, shake: f32, settings: &Settings) -> Vec2 {
    if !settings.effective_screen_shake() || shake <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * shake
}

/// Width of the filled part of the clarity bar
pub fn clarity_bar_width(clarity: f32) -> f32 {
    BAR_SIZE.x * (clarity / CLARITY_MAX).clamp(0.0, 1.0)
}

/// Build the full frame.
///
/// World layers (backdrop, player, thoughts) are moved by `shake`; the HUD and
/// the game-over overlay stay put.
pub fn build_scene(
    snap: &Snapshot,
    ambient: &AmbientLayer,
    settings: &Settings,
    time_secs: f32,
    shake: Vec2,
) -> Vec<Vertex> {
    let viewport = snap.viewport;
    let segments = settings.quality.circle_segments();

    let mut world = ambient.background(viewport, time_secs);

    // Player glow
    let pulse_size = snap.player_size + snap.player_pulse.sin() * PULSE_AMPLITUDE;
    let center = snap.player_pos + Vec2::splat(pulse_size / 2.0);
    world.extend(shapes::radial_gradient(
        center,
        pulse_size / 2.0,
        colors::PLAYER_CORE,
        shapes::mix(colors::PLAYER_CORE, colors::PLAYER_HALO, 0.5),
        segments,
    ));
    world.extend(shapes::ring(
        center,
        pulse_size / 2.0,
        pulse_size,
        shapes::mix(colors::PLAYER_CORE, colors::PLAYER_HALO, 0.5),
        colors::PLAYER_HALO,
        segments,
    ));

    for thought in &snap.thoughts {
        world.extend(shapes::circle(
            thought.pos,
            thought.size / 2.0,
            colors::THOUGHT,
            segments,
        ));
    }

    world.extend(ambient.vignette(viewport, snap.clarity));

    for v in &mut world {
        v.position[0] += shake.x;
        v.position[1] += shake.y;
    }

    let mut vertices = world;

    // HUD: clarity bar
    vertices.extend(shapes::rect(BAR_POS, BAR_SIZE, colors::BAR_BACK));
    vertices.extend(shapes::rect(
        BAR_POS,
        Vec2::new(clarity_bar_width(snap.clarity), BAR_SIZE.y),
        colors::BAR_FILL,
    ));
    vertices.extend(shapes::rect_outline(BAR_POS, BAR_SIZE, 1.0, colors::BAR_OUTLINE));

    if settings.effective_red_flash() && snap.flash > 0.0 {
        vertices.extend(shapes::rect(
            Vec2::ZERO,
            viewport,
            with_alpha(colors::FLASH, snap.flash.min(1.0)),
        ));
    }

    if snap.game_over {
        vertices.extend(shapes::rect(
            Vec2::ZERO,
            viewport,
            with_alpha(colors::SHADOW, GAME_OVER_DIM),
        ));
    }

    vertices
}
