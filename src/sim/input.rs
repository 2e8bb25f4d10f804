//! Input aggregation
//!
//! Folds held keys, the on-screen D-pad and the touch joystick into a single
//! movement intent per tick. Screen coordinates: +x right, +y down.

use glam::Vec2;

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` to a direction (WASD or arrows)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" | "W" | "ArrowUp" => Some(Direction::Up),
            "s" | "S" | "ArrowDown" => Some(Direction::Down),
            "a" | "A" | "ArrowLeft" => Some(Direction::Left),
            "d" | "D" | "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Unit vector for this direction
    pub fn vector(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }
}

/// Four independent held/not-held flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionSet {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionSet {
    pub fn set(&mut self, dir: Direction, pressed: bool) {
        match dir {
            Direction::Up => self.up = pressed,
            Direction::Down => self.down = pressed,
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Axis contribution; opposite directions cancel out
    pub fn axis(&self) -> Vec2 {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
        .into_iter()
        .filter(|dir| self.is_held(*dir))
        .map(Direction::vector)
        .sum()
    }
}

/// Drag distance (px) that maps to a fully tilted touch joystick
pub const JOYSTICK_RADIUS: f32 = 60.0;

/// Joystick vector for a drag from `origin` to `current`, inside the unit disc
pub fn joystick_from_drag(origin: Vec2, current: Vec2) -> Vec2 {
    ((current - origin) / JOYSTICK_RADIUS).clamp_length_max(1.0)
}

/// Raw input state, written by the platform layer and polled once per tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Keyboard (letters and arrows share one set)
    pub keys: DirectionSet,
    /// On-screen directional pad
    pub dpad: DirectionSet,
    /// Touch joystick, each axis in [-1, 1]
    joystick: Vec2,
}

impl InputState {
    pub fn set_joystick(&mut self, v: Vec2) {
        self.joystick = v.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    pub fn joystick(&self) -> Vec2 {
        self.joystick
    }

    /// Drop everything (window lost focus, key-up events will never arrive)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Combined movement intent, never longer than 1
    ///
    /// Sources are summed so keyboard and joystick can coexist; the sum is
    /// only rescaled when it overshoots, which keeps partial joystick tilt analog.
    pub fn movement_intent(&self) -> Vec2 {
        let sum = self.keys.axis() + self.dpad.axis() + self.joystick;
        if sum.length_squared() > 1.0 {
            sum.normalize()
        } else {
            sum
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(Direction::from_key("w"), Some(Direction::Up));
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("D"), Some(Direction::Right));
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("x"), None);
    }

    #[test]
    fn test_no_input_is_zero() {
        assert_eq!(InputState::default().movement_intent(), Vec2::ZERO);
    }

    #[test]
    fn test_diagonal_is_not_faster() {
        let mut input = InputState::default();
        input.keys.set(Direction::Up, true);
        input.keys.set(Direction::Right, true);
        let intent = input.movement_intent();
        assert!((intent.length() - 1.0).abs() < 1e-6);
        assert!(intent.x > 0.0 && intent.y < 0.0);
    }

    #[test]
    fn test_opposites_cancel() {
        let mut input = InputState::default();
        input.keys.set(Direction::Left, true);
        input.dpad.set(Direction::Right, true);
        assert_eq!(input.movement_intent(), Vec2::ZERO);
    }

    #[test]
    fn test_keyboard_and_joystick_do_not_compound() {
        let mut input = InputState::default();
        input.keys.set(Direction::Right, true);
        input.set_joystick(Vec2::new(1.0, 0.0));
        assert_eq!(input.movement_intent(), Vec2::X);
    }

    #[test]
    fn test_partial_joystick_stays_analog() {
        let mut input = InputState::default();
        input.set_joystick(Vec2::new(0.3, 0.4));
        assert!((input.movement_intent().length() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::default();
        input.keys.set(Direction::Down, true);
        input.set_joystick(Vec2::new(0.5, 0.5));
        input.release_all();
        assert_eq!(input.movement_intent(), Vec2::ZERO);
    }

    #[test]
    fn test_joystick_drag() {
        let origin = Vec2::new(100.0, 100.0);
        assert_eq!(joystick_from_drag(origin, origin), Vec2::ZERO);
        assert_eq!(
            joystick_from_drag(origin, Vec2::new(130.0, 100.0)),
            Vec2::new(0.5, 0.0)
        );
        let far = joystick_from_drag(origin, Vec2::new(100.0, -500.0));
        assert!((far - Vec2::NEG_Y).length() < 1e-6);
    }

    fn direction_set() -> impl Strategy<Value = DirectionSet> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(up, down, left, right)| DirectionSet {
                up,
                down,
                left,
                right,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_intent_never_exceeds_unit(
            keys in direction_set(),
            dpad in direction_set(),
            jx in -1.0f32..=1.0,
            jy in -1.0f32..=1.0,
        ) {
            let mut input = InputState { keys, dpad, ..Default::default() };
            input.set_joystick(Vec2::new(jx, jy));

            let raw = keys.axis() + dpad.axis() + Vec2::new(jx, jy);
            let intent = input.movement_intent();
            prop_assert!(intent.length() <= 1.0 + 1e-5);
            if raw.length() > 1.0 {
                prop_assert!((intent.length() - 1.0).abs() < 1e-5);
            }
        }
    }
}
