//! Scooter Services Layer
//!
//! Thin platform-facing services the simulation treats as black boxes:
//! settings persistence, keyboard state and the HUD models.

pub mod hud;
pub mod input;
pub mod settings;

pub use hud::{GameOverOverlay, Scoreboard, Telemetry, TelemetryPatch};
pub use input::{InputState, Keyboard};
pub use settings::{
    ControlScheme, FileStore, MemoryStore, Settings, SettingsError, SettingsStore, Theme,
};
