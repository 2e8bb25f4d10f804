//! Ambient background layers
//!
//! One parameterized description of the backdrop: base gradient, drifting fog,
//! rising mist, a breathing darkness overlay and the panic vignette. All
//! positions are derived from a seed and the clock, so drawing is pure.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::shapes;
use super::vertex::{Vertex, colors, rgb_hex, with_alpha};
use crate::settings::QualityPreset;

/// Large soft blobs sweeping sideways on a sine
#[derive(Debug, Clone)]
pub struct FogConfig {
    pub count: u32,
    pub radius: f32,
    pub color: [f32; 4],
    /// Radians per second of the horizontal sweep
    pub sweep_speed: f32,
}

/// Full-screen darkness whose alpha follows a slow sine
#[derive(Debug, Clone)]
pub struct BreatheConfig {
    pub base_alpha: f32,
    pub depth: f32,
    /// Radians per second
    pub frequency: f32,
}

/// Soft particles rising from the bottom edge and wrapping around
#[derive(Debug, Clone)]
pub struct MistConfig {
    pub count: u32,
    pub radius: (f32, f32),
    /// Pixels per second
    pub speed: (f32, f32),
    pub alpha: (f32, f32),
    pub color: [f32; 4],
    pub seed: u64,
}

/// Edge darkening that deepens as clarity drops
#[derive(Debug, Clone)]
pub struct VignetteConfig {
    /// Clear radius as a fraction of viewport width
    pub inner: f32,
    /// Fully dark radius as a fraction of viewport width
    pub outer: f32,
    pub base_alpha: f32,
    /// Extra alpha at zero clarity
    pub panic_alpha: f32,
}

/// Complete backdrop description
#[derive(Debug, Clone)]
pub struct AmbientLayer {
    /// Vertical gradient `(offset, color)` stops
    pub stops: Vec<(f32, [f32; 4])>,
    pub fog: FogConfig,
    pub breathe: BreatheConfig,
    pub mist: MistConfig,
    pub vignette: VignetteConfig,
    pub segments: u32,
}

impl Default for AmbientLayer {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Per-particle constants for the mist
#[derive(Debug, Clone, Copy)]
struct MistSeed {
    x: f32,
    y: f32,
    radius: f32,
    speed: f32,
    alpha: f32,
}

impl AmbientLayer {
    /// The horror backdrop used in play
    pub fn canonical() -> Self {
        Self {
            stops: vec![
                (0.0, rgb_hex(0x020203, 1.0)),
                (0.5, rgb_hex(0x06060d, 1.0)),
                (1.0, rgb_hex(0x000000, 1.0)),
            ],
            fog: FogConfig {
                count: 18,
                radius: 350.0,
                color: rgb_hex(0x28283c, 0.05),
                sweep_speed: 0.12,
            },
            breathe: BreatheConfig {
                base_alpha: 0.15,
                depth: 0.15,
                frequency: 1.5,
            },
            mist: MistConfig {
                count: 25,
                radius: (200.0, 500.0),
                speed: (6.0, 24.0),
                alpha: (0.02, 0.06),
                color: rgb_hex(0x28283c, 1.0),
                seed: 0x5eed,
            },
            vignette: VignetteConfig {
                inner: 0.25,
                outer: 0.75,
                base_alpha: 0.5,
                panic_alpha: 0.4,
            },
            segments: 28,
        }
    }

    /// Scale particle counts and tessellation to a quality preset
    pub fn with_quality(mut self, quality: QualityPreset) -> Self {
        let scale = quality.particle_scale();
        self.fog.count = (self.fog.count as f32 * scale).round() as u32;
        self.mist.count = (self.mist.count as f32 * scale).round() as u32;
        self.segments = quality.circle_segments();
        self
    }

    /// Everything drawn behind the entities
    pub fn background(&self, viewport: Vec2, time_secs: f32) -> Vec<Vertex> {
        let mut vertices = shapes::vertical_gradient(Vec2::ZERO, viewport, &self.stops);

        for center in self.fog_positions(viewport, time_secs) {
            vertices.extend(shapes::radial_gradient(
                center,
                self.fog.radius,
                self.fog.color,
                colors::CLEAR,
                self.segments,
            ));
        }

        for (center, radius, alpha) in self.mist_positions(viewport, time_secs) {
            vertices.extend(shapes::radial_gradient(
                center,
                radius,
                with_alpha(self.mist.color, alpha),
                colors::CLEAR,
                self.segments,
            ));
        }

        vertices.extend(shapes::rect(
            Vec2::ZERO,
            viewport,
            with_alpha(colors::SHADOW, self.breathe_alpha(time_secs)),
        ));

        vertices
    }

    /// Alpha of the breathing overlay at `time_secs`
    pub fn breathe_alpha(&self, time_secs: f32) -> f32 {
        let breathe = ((time_secs * self.breathe.frequency).sin() + 1.0) / 2.0;
        self.breathe.base_alpha + breathe * self.breathe.depth
    }

    /// Fog blob centres: evenly spaced rows, each swinging across the screen
    pub fn fog_positions(&self, viewport: Vec2, time_secs: f32) -> Vec<Vec2> {
        let count = self.fog.count.max(1) as f32;
        let phase = time_secs * self.fog.sweep_speed;
        (0..self.fog.count)
            .map(|i| {
                let x = ((phase + i as f32).sin() + 1.0) * viewport.x / 2.0;
                let y = i as f32 / count * viewport.y;
                Vec2::new(x, y)
            })
            .collect()
    }

    /// Mist particles as `(centre, radius, alpha)`.
    ///
    /// Each rises at its own speed and re-enters from below once it has fully
    /// left the top, shifted sideways on every lap.
    pub fn mist_positions(&self, viewport: Vec2, time_secs: f32) -> Vec<(Vec2, f32, f32)> {
        self.mist_seeds(viewport)
            .into_iter()
            .map(|p| {
                let span = viewport.y + 2.0 * p.radius;
                let travelled = p.speed * time_secs;
                // Distance from the bottom wrap point, in [0, span)
                let offset = (viewport.y + p.radius - p.y + travelled).rem_euclid(span);
                let lap = ((viewport.y + p.radius - p.y + travelled) / span).floor();
                let y = viewport.y + p.radius - offset;
                let x = (p.x + lap * 0.618_034 * viewport.x).rem_euclid(viewport.x.max(1.0));
                (Vec2::new(x, y), p.radius, p.alpha)
            })
            .collect()
    }

    fn mist_seeds(&self, viewport: Vec2) -> Vec<MistSeed> {
        let mut rng = Pcg32::seed_from_u64(self.mist.seed);
        let (r0, r1) = self.mist.radius;
        let (s0, s1) = self.mist.speed;
        let (a0, a1) = self.mist.alpha;
        (0..self.mist.count)
            .map(|_| MistSeed {
                x: rng.random::<f32>() * viewport.x,
                y: rng.random::<f32>() * viewport.y,
                radius: r0 + rng.random::<f32>() * (r1 - r0),
                speed: s0 + rng.random::<f32>() * (s1 - s0),
                alpha: a0 + rng.random::<f32>() * (a1 - a0),
            })
            .collect()
    }

    /// Edge alpha of the vignette for a clarity in [0, 100]
    pub fn vignette_alpha(&self, clarity: f32) -> f32 {
        let panic = 1.0 - (clarity / 100.0).clamp(0.0, 1.0);
        self.vignette.base_alpha + panic * self.vignette.panic_alpha
    }

    /// Vignette drawn over the playfield
    pub fn vignette(&self, viewport: Vec2, clarity: f32) -> Vec<Vertex> {
        let center = viewport / 2.0;
        let inner = viewport.x * self.vignette.inner;
        let outer = viewport.x * self.vignette.outer;
        let dark = with_alpha(colors::SHADOW, self.vignette_alpha(clarity));
        // Past `outer` stays fully dark out to the corners
        let corner = center.length().max(outer) + 1.0;

        let mut vertices = shapes::ring(center, inner, outer, colors::CLEAR, dark, self.segments);
        vertices.extend(shapes::ring(center, outer, corner, dark, dark, self.segments));
        vertices
    }
}
