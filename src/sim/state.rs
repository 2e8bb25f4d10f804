//! Game state and core simulation types
//!
//! The entity store (player and thoughts) plus every counter the simulation
//! step reads or writes. The loop driver owns exactly one `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::ability::Ability;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Simulation running
    Active,
    /// Clarity ran out. Terminal; the state no longer changes
    GameOver,
}

/// The player's avatar
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner, kept inside the viewport
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    /// Monotonic phase for the glow animation
    pub pulse: f32,
}

impl Player {
    /// Spawn centred in the viewport
    pub fn new(viewport: Vec2) -> Self {
        Self {
            pos: viewport / 2.0,
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            pulse: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Thought categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ThoughtKind {
    Stress,
    Fear,
    Doubt,
}

impl ThoughtKind {
    pub const ALL: [ThoughtKind; 3] = [ThoughtKind::Stress, ThoughtKind::Fear, ThoughtKind::Doubt];

    pub fn label(&self) -> &'static str {
        match self {
            ThoughtKind::Stress => "STRESS",
            ThoughtKind::Fear => "FEAR",
            ThoughtKind::Doubt => "DOUBT",
        }
    }
}

/// An enemy that homes in on the player
#[derive(Debug, Clone)]
pub struct Thought {
    pub id: u32,
    /// Centre position; starts just off-screen
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per tick, fixed at spawn
    pub speed: f32,
    pub kind: ThoughtKind,
}

/// Countdown for a timed ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AbilityTimer {
    #[default]
    Inactive,
    Active { remaining: u32 },
}

impl AbilityTimer {
    /// Start or restart; re-triggering refreshes to the full duration, never stacks
    pub fn activate(&mut self, duration: u32) {
        *self = if duration == 0 {
            AbilityTimer::Inactive
        } else {
            AbilityTimer::Active {
                remaining: duration,
            }
        };
    }

    /// Advance by one tick, deactivating when the countdown runs out
    pub fn tick(&mut self) {
        if let AbilityTimer::Active { remaining } = *self {
            *self = if remaining <= 1 {
                AbilityTimer::Inactive
            } else {
                AbilityTimer::Active {
                    remaining: remaining - 1,
                }
            };
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, AbilityTimer::Active { .. })
    }

    pub fn remaining(&self) -> u32 {
        match self {
            AbilityTimer::Active { remaining } => *remaining,
            AbilityTimer::Inactive => 0,
        }
    }
}

/// Timed abilities (Silence is instantaneous and has no timer)
#[derive(Debug, Clone, Default)]
pub struct Abilities {
    pub focus: AbilityTimer,
    pub acceptance: AbilityTimer,
}

/// "<ABILITY> ACTIVE" banner shown after any activation
#[derive(Debug, Clone, Default)]
pub struct Banner {
    pub ability: Option<Ability>,
    pub ticks: u32,
}

impl Banner {
    /// Replace whatever is showing
    pub fn show(&mut self, ability: Ability) {
        self.ability = Some(ability);
        self.ticks = BANNER_DURATION_TICKS;
    }

    pub fn tick(&mut self) {
        self.ticks = self.ticks.saturating_sub(1);
        if self.ticks == 0 {
            self.ability = None;
        }
    }
}

/// Transient visual intensities, decayed geometrically every tick
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub shake: f32,
    pub flash: f32,
}

impl Effects {
    pub fn trigger_hit(&mut self) {
        self.shake = SHAKE_ON_HIT;
        self.flash = FLASH_ON_HIT;
    }

    pub fn decay(&mut self) {
        self.shake *= EFFECT_DECAY;
        self.flash *= EFFECT_DECAY;
    }
}

/// Side effects requested by the simulation, consumed by audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// One or more thoughts touched the player this tick
    Collision { count: u32 },
    /// Clarity hit zero; emitted exactly once
    ClarityDepleted { survived_secs: u64 },
    HeartbeatStart,
    HeartbeatStop,
    AbilityActivated(Ability),
    AmbientPause,
    AmbientResume,
    SilenceChime,
    ThoughtSpawned { kind: ThoughtKind },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Visible area in pixels
    pub viewport: Vec2,
    pub player: Player,
    /// Live thoughts (sorted by id)
    pub thoughts: Vec<Thought>,
    /// Remaining clarity in [0, CLARITY_MAX]
    pub clarity: f32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Score: whole seconds survived
    pub survived_secs: u64,
    pub abilities: Abilities,
    pub banner: Banner,
    pub effects: Effects,
    /// Whether the heartbeat loop is meant to be playing
    pub heartbeat: bool,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and viewport size
    pub fn new(seed: u64, viewport: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            player: Player::new(viewport),
            thoughts: Vec::new(),
            clarity: CLARITY_MAX,
            phase: GamePhase::Active,
            time_ticks: 0,
            survived_secs: 0,
            abilities: Abilities::default(),
            banner: Banner::default(),
            effects: Effects::default(),
            heartbeat: false,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Read-only view for presentation
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            viewport: self.viewport,
            player_pos: self.player.pos,
            player_size: self.player.size,
            player_pulse: self.player.pulse,
            thoughts: self
                .thoughts
                .iter()
                .map(|t| ThoughtView {
                    pos: t.pos,
                    size: t.size,
                    kind: t.kind,
                })
                .collect(),
            clarity: self.clarity,
            survived_secs: self.survived_secs,
            game_over: self.is_game_over(),
            shake: self.effects.shake,
            flash: self.effects.flash,
            banner: self.banner.ability,
            focus_active: self.abilities.focus.is_active(),
            acceptance_active: self.abilities.acceptance.is_active(),
        }
    }
}

/// Per-thought data needed for drawing
#[derive(Debug, Clone, Serialize)]
pub struct ThoughtView {
    pub pos: Vec2,
    pub size: f32,
    pub kind: ThoughtKind,
}

/// Everything the presentation layer may read, captured once per frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub viewport: Vec2,
    pub player_pos: Vec2,
    pub player_size: f32,
    pub player_pulse: f32,
    pub thoughts: Vec<ThoughtView>,
    pub clarity: f32,
    pub survived_secs: u64,
    pub game_over: bool,
    pub shake: f32,
    pub flash: f32,
    pub banner: Option<Ability>,
    pub focus_active: bool,
    pub acceptance_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7, Vec2::new(800.0, 600.0));
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.clarity, CLARITY_MAX);
        assert!(state.thoughts.is_empty());
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.center(), Vec2::new(415.0, 315.0));
    }

    #[test]
    fn test_ability_timer_transitions() {
        let mut timer = AbilityTimer::default();
        assert!(!timer.is_active());

        timer.activate(3);
        assert_eq!(timer.remaining(), 3);
        timer.tick();
        timer.tick();
        assert_eq!(timer, AbilityTimer::Active { remaining: 1 });
        timer.tick();
        assert_eq!(timer, AbilityTimer::Inactive);
        timer.tick();
        assert_eq!(timer, AbilityTimer::Inactive);
    }

    #[test]
    fn test_ability_timer_refresh_does_not_stack() {
        let mut timer = AbilityTimer::default();
        timer.activate(ABILITY_DURATION_TICKS);
        for _ in 0..100 {
            timer.tick();
        }
        timer.activate(ABILITY_DURATION_TICKS);
        assert_eq!(timer.remaining(), ABILITY_DURATION_TICKS);
    }

    #[test]
    fn test_banner_expires() {
        let mut banner = Banner::default();
        banner.show(Ability::Focus);
        for _ in 0..BANNER_DURATION_TICKS - 1 {
            banner.tick();
        }
        assert_eq!(banner.ability, Some(Ability::Focus));
        banner.tick();
        assert_eq!(banner.ability, None);
    }

    #[test]
    fn test_banner_is_overwritten() {
        let mut banner = Banner::default();
        banner.show(Ability::Focus);
        for _ in 0..50 {
            banner.tick();
        }
        banner.show(Ability::Silence);
        assert_eq!(banner.ability, Some(Ability::Silence));
        assert_eq!(banner.ticks, BANNER_DURATION_TICKS);
    }

    #[test]
    fn test_effects_decay_toward_zero() {
        let mut fx = Effects::default();
        fx.trigger_hit();
        fx.decay();
        assert!((fx.shake - 9.0).abs() < 1e-5);
        assert!((fx.flash - 0.36).abs() < 1e-6);
        for _ in 0..200 {
            fx.decay();
        }
        assert!(fx.shake < 1e-6);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(1, Vec2::new(640.0, 480.0));
        let id = state.next_entity_id();
        state.thoughts.push(Thought {
            id,
            pos: Vec2::new(-26.0, 100.0),
            size: THOUGHT_SIZE,
            speed: 1.5,
            kind: ThoughtKind::Fear,
        });
        state.abilities.focus.activate(10);

        let snap = state.snapshot();
        assert_eq!(snap.thoughts.len(), 1);
        assert_eq!(snap.thoughts[0].kind, ThoughtKind::Fear);
        assert!(snap.focus_active);
        assert!(!snap.acceptance_active);
        assert!(!snap.game_over);
    }
}
