//! Keyboard state
//!
//! Tracks which keys are held (case-insensitive) and maps them onto the
//! four driving directions for the active control layout.

use crate::settings::ControlScheme;
use std::collections::HashSet;

/// Directions held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// Throttle axis: +1 forward, -1 backward.
    pub fn drive(&self) -> f32 {
        axis(self.forward, self.backward)
    }

    /// Steering axis: +1 right, -1 left.
    pub fn steer(&self) -> f32 {
        axis(self.right, self.left)
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    (positive as i8 - negative as i8) as f32
}

struct Bindings {
    forward: &'static [&'static str],
    backward: &'static [&'static str],
    left: &'static [&'static str],
    right: &'static [&'static str],
}

const WASD: Bindings = Bindings {
    forward: &["w"],
    backward: &["s"],
    left: &["a"],
    right: &["d"],
};

const ARROWS: Bindings = Bindings {
    forward: &["arrowup"],
    backward: &["arrowdown"],
    left: &["arrowleft"],
    right: &["arrowright"],
};

const HYBRID: Bindings = Bindings {
    forward: &["arrowup", "w"],
    backward: &["arrowdown", "s"],
    left: &["arrowleft", "a"],
    right: &["arrowright", "d"],
};

fn bindings(layout: ControlScheme) -> &'static Bindings {
    match layout {
        ControlScheme::Wasd => &WASD,
        ControlScheme::Arrows => &ARROWS,
        ControlScheme::Hybrid => &HYBRID,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    layout: ControlScheme,
    active: HashSet<String>,
}

impl Keyboard {
    pub fn new(layout: ControlScheme) -> Self {
        Self {
            layout,
            active: HashSet::new(),
        }
    }

    pub fn layout(&self) -> ControlScheme {
        self.layout
    }

    pub fn set_layout(&mut self, layout: ControlScheme) {
        self.layout = layout;
    }

    pub fn key_down(&mut self, key: &str) {
        self.active.insert(key.to_lowercase());
    }

    pub fn key_up(&mut self, key: &str) {
        self.active.remove(&key.to_lowercase());
    }

    pub fn release_all(&mut self) {
        self.active.clear();
    }

    fn any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.active.contains(*key))
    }

    pub fn read(&self) -> InputState {
        let bindings = bindings(self.layout);
        InputState {
            forward: self.any(bindings.forward),
            backward: self.any(bindings.backward),
            left: self.any(bindings.left),
            right: self.any(bindings.right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let mut keyboard = Keyboard::new(ControlScheme::Wasd);
        keyboard.key_down("W");
        assert!(keyboard.read().forward);
        keyboard.key_up("w");
        assert!(keyboard.read().is_idle());
    }

    #[test]
    fn layouts_filter_bindings() {
        let mut keyboard = Keyboard::new(ControlScheme::Wasd);
        keyboard.key_down("ArrowUp");
        assert!(!keyboard.read().forward);

        keyboard.set_layout(ControlScheme::Arrows);
        assert!(keyboard.read().forward);

        keyboard.set_layout(ControlScheme::Hybrid);
        keyboard.key_down("a");
        let state = keyboard.read();
        assert!(state.forward && state.left);
    }

    #[test]
    fn opposite_keys_cancel_out() {
        let mut keyboard = Keyboard::new(ControlScheme::Hybrid);
        keyboard.key_down("w");
        keyboard.key_down("ArrowDown");
        keyboard.key_down("d");
        let state = keyboard.read();
        assert_eq!(state.drive(), 0.0);
        assert_eq!(state.steer(), 1.0);
    }
}
