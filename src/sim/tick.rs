//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::player_hits;
use super::state::{GameEvent, GamePhase, GameState};
use crate::clamp_box;
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intent, length <= 1 (see `InputState::movement_intent`)
    pub movement: Vec2,
}

/// Advance the game state by one fixed timestep
///
/// Once the game is over this returns immediately: nothing in the state changes.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    if state.phase == GamePhase::GameOver {
        return Vec::new();
    }

    let mut events = Vec::new();

    state.time_ticks += 1;
    state.survived_secs = state.time_ticks / TICKS_PER_SEC;

    // Player movement, kept fully on screen
    let player = &mut state.player;
    let movement = input.movement.clamp_length_max(1.0);
    player.pos = clamp_box(
        player.pos + movement * player.speed,
        player.size,
        state.viewport,
    );
    player.pulse += PULSE_STEP;

    // Thoughts home in on the player
    let target = state.player.center();
    let slowdown = if state.abilities.focus.is_active() {
        FOCUS_SLOWDOWN
    } else {
        1.0
    };
    for thought in &mut state.thoughts {
        let to_player = target - thought.pos;
        let dist = to_player.length();
        if dist > 0.0 {
            thought.pos += to_player / dist * thought.speed * slowdown;
        }
    }

    // Collisions: every overlapping thought drains clarity separately
    let hits = state
        .thoughts
        .iter()
        .filter(|t| player_hits(&state.player, t))
        .count() as u32;
    if hits > 0 {
        if !state.abilities.acceptance.is_active() {
            state.clarity -= COLLISION_DRAIN * hits as f32;
        }
        state.effects.trigger_hit();
        events.push(GameEvent::Collision { count: hits });
    }

    if state.clarity <= 0.0 {
        state.clarity = 0.0;
        state.phase = GamePhase::GameOver;
        log::info!(
            "Mind collapsed after {}s ({} thoughts on screen)",
            state.survived_secs,
            state.thoughts.len()
        );
        events.push(GameEvent::ClarityDepleted {
            survived_secs: state.survived_secs,
        });
    }

    // Heartbeat with a hysteresis band so it does not flicker at the threshold
    if state.clarity < HEARTBEAT_ON_BELOW && !state.heartbeat {
        state.heartbeat = true;
        events.push(GameEvent::HeartbeatStart);
    } else if state.clarity > HEARTBEAT_OFF_ABOVE && state.heartbeat {
        state.heartbeat = false;
        events.push(GameEvent::HeartbeatStop);
    }

    state.effects.decay();

    state.abilities.focus.tick();
    state.abilities.acceptance.tick();
    state.banner.tick();

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ability::{Ability, activate};
    use crate::sim::state::{Thought, ThoughtKind};
    use proptest::prelude::*;

    fn viewport() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    fn push_thought(state: &mut GameState, pos: Vec2, speed: f32) {
        let id = state.next_entity_id();
        state.thoughts.push(Thought {
            id,
            pos,
            size: THOUGHT_SIZE,
            speed,
            kind: ThoughtKind::Stress,
        });
    }

    /// Park a thought on the player's centre with zero speed so it keeps colliding
    fn pin_thought_on_player(state: &mut GameState) {
        let center = state.player.center();
        push_thought(state, center, 0.0);
    }

    #[test]
    fn test_player_moves_and_pulses() {
        let mut state = GameState::new(1, viewport());
        let start = state.player.pos;
        tick(&mut state, &TickInput { movement: Vec2::X });
        assert_eq!(state.player.pos, start + Vec2::new(PLAYER_SPEED, 0.0));
        assert!((state.player.pulse - PULSE_STEP).abs() < 1e-6);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_player_clamped_to_viewport() {
        let mut state = GameState::new(1, viewport());
        let up_left = TickInput {
            movement: Vec2::new(-1.0, -1.0).normalize(),
        };
        for _ in 0..1000 {
            tick(&mut state, &up_left);
        }
        assert_eq!(state.player.pos, Vec2::ZERO);

        let down_right = TickInput {
            movement: Vec2::new(1.0, 1.0).normalize(),
        };
        for _ in 0..1000 {
            tick(&mut state, &down_right);
        }
        assert_eq!(
            state.player.pos,
            Vec2::new(800.0 - PLAYER_SIZE, 600.0 - PLAYER_SIZE)
        );
    }

    #[test]
    fn test_survived_time_counts_seconds() {
        let mut state = GameState::new(1, viewport());
        for _ in 0..(TICKS_PER_SEC * 3 - 1) {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.survived_secs, 2);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.survived_secs, 3);
    }

    #[test]
    fn test_thought_moves_toward_player() {
        let mut state = GameState::new(1, viewport());
        let target = state.player.center();
        push_thought(&mut state, Vec2::new(-THOUGHT_SIZE, target.y), 1.5);

        tick(&mut state, &TickInput::default());
        let t = &state.thoughts[0];
        assert!((t.pos.x - (-THOUGHT_SIZE + 1.5)).abs() < 1e-4);
        assert!((t.pos.y - target.y).abs() < 1e-4);
    }

    #[test]
    fn test_thought_on_player_center_does_not_move() {
        let mut state = GameState::new(1, viewport());
        let center = state.player.center();
        push_thought(&mut state, center, 2.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.thoughts[0].pos, center);
        assert!(state.thoughts[0].pos.is_finite());
    }

    #[test]
    fn test_focus_slows_thoughts() {
        let start = Vec2::new(0.0, 0.0);

        let mut plain = GameState::new(1, viewport());
        push_thought(&mut plain, start, 1.8);
        tick(&mut plain, &TickInput::default());
        let plain_step = plain.thoughts[0].pos - start;

        let mut focused = GameState::new(1, viewport());
        push_thought(&mut focused, start, 1.8);
        activate(&mut focused, Ability::Focus);
        tick(&mut focused, &TickInput::default());
        let focused_step = focused.thoughts[0].pos - start;

        assert!((focused_step - plain_step * FOCUS_SLOWDOWN).length() < 1e-5);
    }

    #[test]
    fn test_collision_drains_and_shakes() {
        let mut state = GameState::new(1, viewport());
        pin_thought_on_player(&mut state);

        let events = tick(&mut state, &TickInput::default());
        assert!((state.clarity - (CLARITY_MAX - COLLISION_DRAIN)).abs() < 1e-5);
        assert!(events.contains(&GameEvent::Collision { count: 1 }));
        // Set to trigger values, then decayed once at the end of the tick
        assert!((state.effects.shake - SHAKE_ON_HIT * EFFECT_DECAY).abs() < 1e-5);
        assert!((state.effects.flash - FLASH_ON_HIT * EFFECT_DECAY).abs() < 1e-5);
    }

    #[test]
    fn test_simultaneous_collisions_stack() {
        let mut state = GameState::new(1, viewport());
        pin_thought_on_player(&mut state);
        pin_thought_on_player(&mut state);
        pin_thought_on_player(&mut state);

        let events = tick(&mut state, &TickInput::default());
        assert!((state.clarity - (CLARITY_MAX - 3.0 * COLLISION_DRAIN)).abs() < 1e-5);
        assert!(events.contains(&GameEvent::Collision { count: 3 }));
    }

    #[test]
    fn test_acceptance_blocks_drain_but_not_effects() {
        let mut state = GameState::new(1, viewport());
        pin_thought_on_player(&mut state);
        activate(&mut state, Ability::Acceptance);

        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.clarity, CLARITY_MAX);
            assert!((state.effects.shake - SHAKE_ON_HIT * EFFECT_DECAY).abs() < 1e-5);
            assert!((state.effects.flash - FLASH_ON_HIT * EFFECT_DECAY).abs() < 1e-5);
        }
    }

    #[test]
    fn test_effects_decay_without_collision() {
        let mut state = GameState::new(1, viewport());
        state.effects.trigger_hit();
        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        assert!((state.effects.shake - SHAKE_ON_HIT * 0.81).abs() < 1e-4);
        assert!(state.effects.shake > 0.0);
    }

    #[test]
    fn test_game_over_exactly_once_and_frozen() {
        let mut state = GameState::new(1, viewport());
        state.clarity = 0.5;
        pin_thought_on_player(&mut state);
        pin_thought_on_player(&mut state);
        pin_thought_on_player(&mut state);

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.clarity, 0.0);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::ClarityDepleted { .. }))
                .count(),
            1
        );

        let frozen_ticks = state.time_ticks;
        let frozen_pos = state.player.pos;
        let frozen_shake = state.effects.shake;
        for _ in 0..50 {
            let events = tick(&mut state, &TickInput { movement: Vec2::X });
            assert!(events.is_empty());
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.clarity, 0.0);
        assert_eq!(state.time_ticks, frozen_ticks);
        assert_eq!(state.player.pos, frozen_pos);
        assert_eq!(state.effects.shake, frozen_shake);
    }

    #[test]
    fn test_heartbeat_hysteresis() {
        let mut state = GameState::new(1, viewport());

        state.clarity = 65.0;
        assert!(tick(&mut state, &TickInput::default()).is_empty());
        assert!(!state.heartbeat);

        state.clarity = 59.0;
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::HeartbeatStart]);
        assert!(state.heartbeat);

        // Inside the band: no toggling either way
        state.clarity = 65.0;
        assert!(tick(&mut state, &TickInput::default()).is_empty());
        assert!(state.heartbeat);

        state.clarity = 71.0;
        assert_eq!(
            tick(&mut state, &TickInput::default()),
            vec![GameEvent::HeartbeatStop]
        );
        assert!(!state.heartbeat);
    }

    #[test]
    fn test_focus_timer_expires() {
        let mut state = GameState::new(1, viewport());
        state.abilities.focus.activate(1);
        tick(&mut state, &TickInput::default());
        assert!(!state.abilities.focus.is_active());
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
            assert!(!state.abilities.focus.is_active());
        }
    }

    #[test]
    fn test_ability_lasts_full_duration() {
        let mut state = GameState::new(1, viewport());
        activate(&mut state, Ability::Acceptance);
        for _ in 0..ABILITY_DURATION_TICKS - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.abilities.acceptance.is_active());
        tick(&mut state, &TickInput::default());
        assert!(!state.abilities.acceptance.is_active());
    }

    #[test]
    fn test_banner_clears_after_display_time() {
        let mut state = GameState::new(1, viewport());
        activate(&mut state, Ability::Silence);
        for _ in 0..BANNER_DURATION_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.banner.ability, None);
    }

    #[test]
    fn test_determinism() {
        use crate::sim::spawner::spawn_thought;

        let mut a = GameState::new(99999, viewport());
        let mut b = GameState::new(99999, viewport());
        let inputs = [Vec2::X, Vec2::NEG_Y, Vec2::new(0.6, 0.8), Vec2::ZERO];

        for step in 0..400 {
            if step % 50 == 0 {
                spawn_thought(&mut a);
                spawn_thought(&mut b);
            }
            let input = TickInput {
                movement: inputs[step % inputs.len()],
            };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.clarity, b.clarity);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.thoughts.len(), b.thoughts.len());
    }

    proptest! {
        #[test]
        fn prop_clarity_in_range_and_player_on_screen(
            seed in any::<u64>(),
            moves in proptest::collection::vec((-1.0f32..=1.0, -1.0f32..=1.0), 1..200),
            thoughts in 0usize..12,
        ) {
            use crate::sim::spawner::spawn_thought;

            let mut state = GameState::new(seed, viewport());
            for _ in 0..thoughts {
                spawn_thought(&mut state);
            }
            // Start some right on top of the player so collisions actually happen
            pin_thought_on_player(&mut state);

            let mut was_over = false;
            for (x, y) in moves {
                tick(&mut state, &TickInput { movement: Vec2::new(x, y) });

                prop_assert!(state.clarity >= 0.0 && state.clarity <= CLARITY_MAX);
                let p = state.player.pos;
                prop_assert!(p.x >= 0.0 && p.x <= 800.0 - PLAYER_SIZE);
                prop_assert!(p.y >= 0.0 && p.y <= 600.0 - PLAYER_SIZE);
                if was_over {
                    prop_assert_eq!(state.phase, GamePhase::GameOver);
                }
                was_over = state.is_game_over();
                prop_assert_eq!(was_over, state.clarity == 0.0);
            }
        }
    }
}
