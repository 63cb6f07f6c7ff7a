//! HUD models
//!
//! Renderer-agnostic state behind the scoreboard and the game-over panel.
//! Timeouts run on the caller's clock through [`Scoreboard::tick`].

use scooter_core::math::Vec3;

/// Seconds the "last hit" line stays up.
pub const LAST_HIT_SECONDS: f32 = 2.5;

pub const DEFAULT_GAME_OVER_REASON: &str = "The scooter has seen better days.";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Telemetry {
    pub speed: f32,
    pub position: Vec3,
}

/// Partial telemetry update; `None` fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TelemetryPatch {
    pub speed: Option<f32>,
    pub position: Option<Vec3>,
}

#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    score: u32,
    last_line: String,
    last_line_ttl: Option<f32>,
    telemetry: Telemetry,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add points and show them on the last-hit line. Returns the new total.
    pub fn award(&mut self, points: u32, label: &str) -> u32 {
        self.score = self.score.saturating_add(points);
        self.last_line = format!("Last hit: +{points} for {label}");
        self.last_line_ttl = Some(LAST_HIT_SECONDS);
        self.score
    }

    /// Replace the last-hit line with a message that stays until replaced.
    pub fn set_message(&mut self, message: Option<&str>) {
        self.last_line = message.unwrap_or_default().to_string();
        self.last_line_ttl = None;
    }

    pub fn patch_telemetry(&mut self, patch: TelemetryPatch) {
        if let Some(speed) = patch.speed {
            self.telemetry.speed = speed;
        }
        if let Some(position) = patch.position {
            self.telemetry.position = position;
        }
    }

    pub fn tick(&mut self, delta: f32) {
        if let Some(ttl) = self.last_line_ttl.as_mut() {
            *ttl -= delta;
            if *ttl <= 0.0 {
                self.last_line.clear();
                self.last_line_ttl = None;
            }
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn score_line(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn last_line(&self) -> &str {
        &self.last_line
    }

    pub fn telemetry(&self) -> Telemetry {
        self.telemetry
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default)]
pub struct GameOverOverlay {
    visible: bool,
    reason: String,
}

impl GameOverOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, reason: Option<&str>) {
        self.reason = reason.unwrap_or(DEFAULT_GAME_OVER_REASON).to_string();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}
