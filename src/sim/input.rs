//! Raw key and pointer events to movement and look intent
//!
//! Keys are tracked as held/released; movement is derived from the held set
//! every frame, so key repeat from the host does not matter.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::yaw_basis;

/// Movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
}

const MOVE_KEY_COUNT: usize = 4;

impl MoveKey {
    const fn index(self) -> usize {
        match self {
            MoveKey::Forward => 0,
            MoveKey::Back => 1,
            MoveKey::Left => 2,
            MoveKey::Right => 3,
        }
    }
}

/// One-shot commands issued by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    ToggleCamera,
    /// Jump to the other level immediately
    SwitchLevel,
    /// Regenerate the current level
    RestartLevel,
}

/// What a key symbol means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    Move(MoveKey),
    Command(Command),
}

impl KeyBinding {
    /// Map a host key symbol (case-insensitive)
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_lowercase() {
            'w' => Some(KeyBinding::Move(MoveKey::Forward)),
            's' => Some(KeyBinding::Move(MoveKey::Back)),
            'a' => Some(KeyBinding::Move(MoveKey::Left)),
            'd' => Some(KeyBinding::Move(MoveKey::Right)),
            'c' => Some(KeyBinding::Command(Command::ToggleCamera)),
            'l' => Some(KeyBinding::Command(Command::SwitchLevel)),
            'r' => Some(KeyBinding::Command(Command::RestartLevel)),
            _ => None,
        }
    }
}

/// Yaw/pitch change produced by pointer motion
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookDelta {
    pub yaw: f32,
    pub pitch: f32,
}

/// Held-key and pointer tracking
#[derive(Debug, Clone)]
pub struct InputTranslator {
    held: [bool; MOVE_KEY_COUNT],
    /// Last absolute pointer position; None until the baseline event
    last_pointer: Option<Vec2>,
    /// Set by the first pointer event after activation
    pointer_active: bool,
    sensitivity: f32,
}

impl InputTranslator {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            held: [false; MOVE_KEY_COUNT],
            last_pointer: None,
            pointer_active: false,
            sensitivity,
        }
    }

    pub fn set_held(&mut self, key: MoveKey, down: bool) {
        self.held[key.index()] = down;
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held[key.index()]
    }

    /// Forget all held keys (e.g. focus lost)
    pub fn release_all(&mut self) {
        self.held = [false; MOVE_KEY_COUNT];
    }

    /// Player-local intent: x = strafe right, y = forward. Unit length or zero.
    pub fn intent(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.is_held(MoveKey::Forward) {
            v.y += 1.0;
        }
        if self.is_held(MoveKey::Back) {
            v.y -= 1.0;
        }
        if self.is_held(MoveKey::Left) {
            v.x -= 1.0;
        }
        if self.is_held(MoveKey::Right) {
            v.x += 1.0;
        }
        v.normalize_or_zero()
    }

    /// World-space (x, z) displacement for this frame
    pub fn displacement(&self, yaw: f32, speed: f32, dt: f32) -> Vec2 {
        let intent = self.intent();
        if intent == Vec2::ZERO {
            return Vec2::ZERO;
        }
        let (forward, right) = yaw_basis(yaw);
        (forward * intent.y + right * intent.x) * speed * dt
    }

    /// Absolute pointer position in pixels.
    ///
    /// The first event after activation only sets the baseline.
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> Option<LookDelta> {
        if !(x.is_finite() && y.is_finite()) {
            log::debug!("Ignoring non-finite pointer position ({}, {})", x, y);
            return None;
        }
        let p = Vec2::new(x, y);
        self.pointer_active = true;
        let previous = self.last_pointer.replace(p)?;
        let d = p - previous;
        Some(self.scale(d.x, d.y))
    }

    /// Relative pointer motion in pixels (pointer-lock style hosts).
    ///
    /// The first delta after activation is dropped; hosts often report the
    /// whole jump into the window as one motion event.
    pub fn look(&mut self, dx: f32, dy: f32) -> Option<LookDelta> {
        if !(dx.is_finite() && dy.is_finite()) {
            log::debug!("Ignoring non-finite pointer delta ({}, {})", dx, dy);
            return None;
        }
        if !self.pointer_active {
            self.pointer_active = true;
            return None;
        }
        Some(self.scale(dx, dy))
    }

    fn scale(&self, dx: f32, dy: f32) -> LookDelta {
        LookDelta {
            yaw: dx * self.sensitivity,
            // Screen y grows downward; moving the pointer up looks up
            pitch: -dy * self.sensitivity,
        }
    }

    /// Require a new baseline before the next pointer delta
    pub fn reset_pointer(&mut self) {
        self.last_pointer = None;
        self.pointer_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_bindings() {
        assert_eq!(
            KeyBinding::from_symbol('W'),
            Some(KeyBinding::Move(MoveKey::Forward))
        );
        assert_eq!(
            KeyBinding::from_symbol('l'),
            Some(KeyBinding::Command(Command::SwitchLevel))
        );
        assert_eq!(KeyBinding::from_symbol('x'), None);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut input = InputTranslator::new(0.0045);
        input.set_held(MoveKey::Forward, true);
        input.set_held(MoveKey::Right, true);
        assert!((input.intent().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut input = InputTranslator::new(0.0045);
        input.set_held(MoveKey::Left, true);
        input.set_held(MoveKey::Right, true);
        assert_eq!(input.intent(), Vec2::ZERO);
        assert_eq!(input.displacement(0.3, 8.0, 0.1), Vec2::ZERO);
    }

    #[test]
    fn test_forward_follows_yaw() {
        let mut input = InputTranslator::new(0.0045);
        input.set_held(MoveKey::Forward, true);

        let d = input.displacement(0.0, 8.0, 0.5);
        assert!((d - Vec2::new(0.0, -4.0)).length() < 1e-5);

        let d = input.displacement(FRAC_PI_2, 8.0, 0.5);
        assert!((d - Vec2::new(4.0, 0.0)).length() < 1e-5);

        input.release_all();
        input.set_held(MoveKey::Right, true);
        let d = input.displacement(0.0, 8.0, 0.5);
        assert!((d - Vec2::new(4.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_first_pointer_event_is_baseline() {
        let mut input = InputTranslator::new(0.01);
        assert_eq!(input.pointer_moved(640.0, 400.0), None);

        let look = input.pointer_moved(650.0, 390.0).expect("delta");
        assert!((look.yaw - 0.1).abs() < 1e-6);
        assert!((look.pitch - 0.1).abs() < 1e-6);

        input.reset_pointer();
        assert_eq!(input.pointer_moved(0.0, 0.0), None);
    }

    #[test]
    fn test_first_pointer_delta_is_dropped() {
        let mut input = InputTranslator::new(0.01);
        assert_eq!(input.look(500.0, 300.0), None);

        let look = input.look(10.0, -10.0).expect("delta");
        assert!((look.yaw - 0.1).abs() < 1e-6);
        assert!((look.pitch - 0.1).abs() < 1e-6);

        input.reset_pointer();
        assert_eq!(input.look(500.0, 300.0), None);
        assert!(input.look(1.0, 0.0).is_some());
    }

    #[test]
    fn test_absolute_baseline_activates_deltas() {
        let mut input = InputTranslator::new(0.01);
        assert_eq!(input.pointer_moved(640.0, 400.0), None);
        assert!(input.look(5.0, 0.0).is_some());
    }

    #[test]
    fn test_non_finite_pointer_is_ignored() {
        let mut input = InputTranslator::new(0.01);
        input.look(0.0, 0.0);
        assert_eq!(input.look(f32::NAN, 0.0), None);
        assert_eq!(input.look(0.0, f32::INFINITY), None);

        assert_eq!(input.pointer_moved(10.0, 10.0), None);
        assert_eq!(input.pointer_moved(f32::NAN, 10.0), None);
        // The bad sample does not replace the baseline
        let look = input.pointer_moved(20.0, 10.0).expect("delta");
        assert!((look.yaw - 0.1).abs() < 1e-6);
    }
}
