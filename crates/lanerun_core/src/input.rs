//! Per-frame input for the controllers.
//!
//! The controllers never poll devices.  Whatever produces input (keyboard,
//! mouse, touch, a replay script) reduces it to one [`InputSnapshot`] per
//! frame and hands that to the frame driver.
//!
//! With the `input` feature (on by default) this module also provides
//! [`InputState`], a small tracker fed with `winit` key and pointer events
//! that produces those snapshots.

/// Discrete lane intents a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneAction {
    MoveLeft,
    MoveRight,
}

/// Source-agnostic input for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    /// Pointer/touch movement since the previous frame, device-agnostic units.
    pub pointer_dx: f32,
    pub pointer_dy: f32,
}

impl InputSnapshot {
    pub fn left() -> Self {
        Self { move_left: true, ..Default::default() }
    }

    pub fn right() -> Self {
        Self { move_right: true, ..Default::default() }
    }

    pub fn look(dx: f32, dy: f32) -> Self {
        Self { pointer_dx: dx, pointer_dy: dy, ..Default::default() }
    }

    /// True when the pointer moved this frame.
    #[inline]
    pub fn has_pointer_motion(&self) -> bool {
        self.pointer_dx != 0.0 || self.pointer_dy != 0.0
    }
}

#[cfg(feature = "input")]
pub use tracker::{InputState, KeyBindings, KeyCode};

#[cfg(feature = "input")]
mod tracker {
    use std::collections::{HashMap, HashSet};

    use super::{InputSnapshot, LaneAction};

    /// Re-exported from `winit` so callers don't need the dependency.
    pub use winit::keyboard::KeyCode;

    /// Maps keys to lane actions.
    ///
    /// Binding the same key twice overwrites the old binding.
    #[derive(Debug, Clone)]
    pub struct KeyBindings {
        mappings: HashMap<KeyCode, LaneAction>,
    }

    impl KeyBindings {
        /// Creates an empty set of bindings.
        pub fn new() -> Self {
            Self { mappings: HashMap::new() }
        }

        /// `A`/`←` move left, `D`/`→` move right.
        pub fn with_default_layout() -> Self {
            let mut b = Self::new();
            b.bind(KeyCode::KeyA, LaneAction::MoveLeft);
            b.bind(KeyCode::ArrowLeft, LaneAction::MoveLeft);
            b.bind(KeyCode::KeyD, LaneAction::MoveRight);
            b.bind(KeyCode::ArrowRight, LaneAction::MoveRight);
            b
        }

        pub fn bind(&mut self, key: KeyCode, action: LaneAction) {
            self.mappings.insert(key, action);
        }

        pub fn unbind(&mut self, key: KeyCode) {
            self.mappings.remove(&key);
        }

        pub fn action(&self, key: KeyCode) -> Option<LaneAction> {
            self.mappings.get(&key).copied()
        }

        /// True if any key bound to `action` is held in `input`.
        pub fn is_active(&self, input: &InputState, action: LaneAction) -> bool {
            self.mappings
                .iter()
                .any(|(key, bound)| *bound == action && input.is_key_pressed(*key))
        }
    }

    impl Default for KeyBindings {
        fn default() -> Self {
            Self::with_default_layout()
        }
    }

    /// State of the keyboard and pointer at a given moment.
    ///
    /// The event loop drives this structure with the events coming from
    /// `winit`; once per frame [`InputState::snapshot`] reduces it to an
    /// [`InputSnapshot`].
    #[derive(Debug, Default)]
    pub struct InputState {
        keys_down: HashSet<KeyCode>,
        /// pointer movement accumulated since the last snapshot
        pointer_delta: (f32, f32),
    }

    impl InputState {
        /// Creates a fresh, empty input state.
        pub fn new() -> Self {
            Default::default()
        }

        /// Called by the event loop when a keyboard event arrives.
        pub fn update_key(&mut self, key: KeyCode, pressed: bool) {
            if pressed {
                self.keys_down.insert(key);
            } else {
                self.keys_down.remove(&key);
            }
        }

        /// Returns true if the given key is currently pressed down.
        pub fn is_key_pressed(&self, key: KeyCode) -> bool {
            self.keys_down.contains(&key)
        }

        /// Accumulate raw pointer or touch movement.  Several events may
        /// arrive between two frames; all of them end up in the next snapshot.
        pub fn add_pointer_delta(&mut self, dx: f32, dy: f32) {
            self.pointer_delta.0 += dx;
            self.pointer_delta.1 += dy;
        }

        /// Movement accumulated so far, without consuming it.
        pub fn pointer_delta(&self) -> (f32, f32) {
            self.pointer_delta
        }

        /// Drops held keys and pending pointer movement, e.g. on focus loss.
        pub fn clear(&mut self) {
            *self = Self::default();
        }

        /// Reduce the current state to a frame snapshot and reset the pointer
        /// accumulator.  Held keys stay held.
        pub fn snapshot(&mut self, bindings: &KeyBindings) -> InputSnapshot {
            let (dx, dy) = std::mem::take(&mut self.pointer_delta);
            InputSnapshot {
                move_left: bindings.is_active(self, LaneAction::MoveLeft),
                move_right: bindings.is_active(self, LaneAction::MoveRight),
                pointer_dx: dx,
                pointer_dy: dy,
            }
        }
    }
}
