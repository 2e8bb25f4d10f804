//! Audio driven by simulation events
//!
//! Procedurally generated with the Web Audio API - no sound files needed.
//! The simulation never calls into audio; the loop driver forwards its
//! `GameEvent`s here. Every Web Audio failure is swallowed.

use crate::sim::{Ability, GameEvent};

/// What the audio layer should do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Ambient drone loop
    PauseAmbient,
    ResumeAmbient,
    /// Heartbeat loop (low clarity)
    StartHeartbeat,
    StopHeartbeat,
    /// Thought contact thud
    Hit,
    /// Silence ability bell
    Chime,
    /// Focus / Acceptance activation blip
    AbilityBlip(Ability),
    /// Clarity ran out
    Collapse,
}

/// Map a simulation event to its sound, if it has one
pub fn cue_for(event: &GameEvent) -> Option<AudioCue> {
    match event {
        GameEvent::Collision { .. } => Some(AudioCue::Hit),
        GameEvent::ClarityDepleted { .. } => Some(AudioCue::Collapse),
        GameEvent::HeartbeatStart => Some(AudioCue::StartHeartbeat),
        GameEvent::HeartbeatStop => Some(AudioCue::StopHeartbeat),
        GameEvent::AmbientPause => Some(AudioCue::PauseAmbient),
        GameEvent::AmbientResume => Some(AudioCue::ResumeAmbient),
        GameEvent::SilenceChime => Some(AudioCue::Chime),
        // Silence already has its chime
        GameEvent::AbilityActivated(Ability::Silence) => None,
        GameEvent::AbilityActivated(ability) => Some(AudioCue::AbilityBlip(*ability)),
        GameEvent::ThoughtSpawned { .. } => None,
    }
}

/// Which loops should currently be audible
///
/// Pause/resume requests are idempotent: repeating one is not a change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopState {
    pub ambient: bool,
    pub heartbeat: bool,
}

impl LoopState {
    /// Apply a cue, returning true when a loop actually changed state
    pub fn apply(&mut self, cue: AudioCue) -> bool {
        let (slot, on) = match cue {
            AudioCue::PauseAmbient => (&mut self.ambient, false),
            AudioCue::ResumeAmbient => (&mut self.ambient, true),
            AudioCue::StartHeartbeat => (&mut self.heartbeat, true),
            AudioCue::StopHeartbeat => (&mut self.heartbeat, false),
            _ => return false,
        };
        let changed = *slot != on;
        *slot = on;
        changed
    }
}

/// Minimum spacing between hit thuds (seconds); collisions fire every tick
pub const HIT_COOLDOWN_SECS: f64 = 0.12;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioCue, HIT_COOLDOWN_SECS, LoopState, cue_for};
    use crate::settings::Settings;
    use crate::sim::{Ability, GameEvent};

    /// A running oscillator bank behind one gain node
    struct Drone {
        _oscillators: Vec<OscillatorNode>,
        gain: GainNode,
        level: f32,
    }

    impl Drone {
        /// Fade to `level` (or silence) without stopping the oscillators
        fn fade(&self, ctx: &AudioContext, on: bool) {
            let target = if on { self.level } else { 0.0 };
            let t = ctx.current_time();
            let param = self.gain.gain();
            param.cancel_scheduled_values(t).ok();
            param.set_target_at_time(target, t, 0.15).ok();
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        ambient_gain: f32,
        sfx_gain: f32,
        loops: LoopState,
        ambient: Option<Drone>,
        heartbeat: Option<Drone>,
        started: bool,
        last_hit: f64,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                ambient_gain: settings.ambient_gain(),
                sfx_gain: settings.sfx_gain(),
                loops: LoopState::default(),
                ambient: None,
                heartbeat: None,
                started: false,
                last_hit: f64::NEG_INFINITY,
            }
        }

        /// First user gesture: unlock the context and start the ambient loop
        pub fn start(&mut self) {
            let Some(ctx) = &self.ctx else { return };
            let _ = ctx.resume();
            if self.started {
                return;
            }
            self.started = true;
            self.ambient = self.build_ambient(ctx);
            self.heartbeat = self.build_heartbeat(ctx);
            self.loops.ambient = true;
            if let Some(drone) = &self.ambient {
                drone.fade(ctx, true);
            }
            log::info!("Audio started");
        }

        /// React to a batch of simulation events
        pub fn handle(&mut self, events: &[GameEvent]) {
            for cue in events.iter().filter_map(cue_for) {
                self.play(cue);
            }
        }

        fn play(&mut self, cue: AudioCue) {
            let Some(ctx) = self.ctx.clone() else { return };
            if !self.started {
                return;
            }

            if self.loops.apply(cue) {
                let (drone, on) = match cue {
                    AudioCue::PauseAmbient | AudioCue::ResumeAmbient => {
                        (&self.ambient, self.loops.ambient)
                    }
                    _ => (&self.heartbeat, self.loops.heartbeat),
                };
                if let Some(drone) = drone {
                    drone.fade(&ctx, on);
                }
                return;
            }

            let vol = self.sfx_gain;
            if vol <= 0.0 {
                return;
            }
            match cue {
                AudioCue::Hit => {
                    let now = ctx.current_time();
                    if now - self.last_hit >= HIT_COOLDOWN_SECS {
                        self.last_hit = now;
                        play_hit(&ctx, vol);
                    }
                }
                AudioCue::Chime => play_chime(&ctx, vol),
                AudioCue::AbilityBlip(ability) => play_blip(&ctx, vol, ability),
                AudioCue::Collapse => play_collapse(&ctx, vol),
                _ => {}
            }
        }

        /// Detuned low sines, a slow unsettled drone
        fn build_ambient(&self, ctx: &AudioContext) -> Option<Drone> {
            let gain = ctx.create_gain().ok()?;
            gain.gain().set_value(0.0);
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let mut oscillators = Vec::new();
            for (freq, kind) in [
                (55.0, OscillatorType::Sine),
                (55.7, OscillatorType::Sine),
                (110.3, OscillatorType::Triangle),
            ] {
                let osc = ctx.create_oscillator().ok()?;
                osc.set_type(kind);
                osc.frequency().set_value(freq);
                osc.connect_with_audio_node(&gain).ok()?;
                osc.start().ok()?;
                oscillators.push(osc);
            }

            Some(Drone {
                _oscillators: oscillators,
                gain,
                level: 0.25 * self.ambient_gain,
            })
        }

        /// Low thump amplitude-modulated at about 72 bpm
        fn build_heartbeat(&self, ctx: &AudioContext) -> Option<Drone> {
            let out = ctx.create_gain().ok()?;
            out.gain().set_value(0.0);
            out.connect_with_audio_node(&ctx.destination()).ok()?;

            let pulse = ctx.create_gain().ok()?;
            pulse.gain().set_value(0.5);
            pulse.connect_with_audio_node(&out).ok()?;

            let tone = ctx.create_oscillator().ok()?;
            tone.set_type(OscillatorType::Sine);
            tone.frequency().set_value(48.0);
            tone.connect_with_audio_node(&pulse).ok()?;

            let lfo = ctx.create_oscillator().ok()?;
            lfo.set_type(OscillatorType::Square);
            lfo.frequency().set_value(1.2);
            let depth = ctx.create_gain().ok()?;
            depth.gain().set_value(0.5);
            lfo.connect_with_audio_node(&depth).ok()?;
            depth.connect_with_audio_param(&pulse.gain()).ok()?;

            tone.start().ok()?;
            lfo.start().ok()?;

            Some(Drone {
                _oscillators: vec![tone, lfo],
                gain: out,
                level: 0.8 * self.ambient_gain,
            })
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Contact - dull thud
    fn play_hit(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 90.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(90.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(40.0, t + 0.15)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.16).ok();
    }

    /// Silence - long fading bell
    fn play_chime(ctx: &AudioContext, vol: f32) {
        for (freq, level) in [(880.0, 0.3), (1320.0, 0.12)] {
            let Some((osc, gain)) = create_osc(ctx, freq, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 1.8)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 1.85).ok();
        }
    }

    /// Focus / Acceptance - short rising blip
    fn play_blip(ctx: &AudioContext, vol: f32, ability: Ability) {
        let (from, to) = match ability {
            Ability::Focus => (440.0, 660.0),
            _ => (330.0, 495.0),
        };
        let Some((osc, gain)) = create_osc(ctx, from, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .linear_ramp_to_value_at_time(to, t + 0.12)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.32).ok();
    }

    /// Game over - slow falling groan
    fn play_collapse(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 220.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 2.5)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(35.0, t + 2.5)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 2.6).ok();
    }
}
