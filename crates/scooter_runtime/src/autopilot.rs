//! Scripted driver for the headless loop

use scooter_services::Keyboard;

/// Holds the throttle and weaves left and right on a fixed cadence.
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Frames spent in each leg of the weave.
    pub leg_frames: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { leg_frames: 90 }
    }
}

impl Autopilot {
    /// Press the keys for `frame`. Both key sets are held so every layout
    /// sees the same input.
    pub fn drive(&self, frame: u32, keyboard: &mut Keyboard) {
        keyboard.release_all();
        keyboard.key_down("w");
        keyboard.key_down("arrowup");
        match (frame / self.leg_frames.max(1)) % 4 {
            1 => {
                keyboard.key_down("d");
                keyboard.key_down("arrowright");
            }
            3 => {
                keyboard.key_down("a");
                keyboard.key_down("arrowleft");
            }
            _ => {}
        }
    }
}
