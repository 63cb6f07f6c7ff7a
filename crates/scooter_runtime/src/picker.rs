//! Spawn-point picker
//!
//! A modal session: the caller hovers points on the floor, then confirms
//! (Enter or click) or cancels (Escape). Resolving the hovered point into
//! a navigable spot is left to the game, which owns the arena.

use scooter_core::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickResult {
    /// A floor point was chosen; still needs a navigable fix-up.
    Target(Vec3),
    /// Nothing chosen; use the precomputed fallback as is.
    Fallback(Vec3),
}

#[derive(Debug, Clone, Copy)]
struct Session {
    fallback: Vec3,
    hovered: Option<Vec3>,
}

#[derive(Debug, Default)]
pub struct SpawnPicker {
    session: Option<Session>,
}

impl SpawnPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the picker. Reopening discards any earlier hover.
    pub fn begin(&mut self, fallback: Vec3) {
        self.session = Some(Session {
            fallback,
            hovered: None,
        });
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn hovered(&self) -> Option<Vec3> {
        self.session.and_then(|s| s.hovered)
    }

    /// Track the floor point under the pointer; ignored when closed.
    pub fn hover(&mut self, point: Vec3) {
        if let Some(session) = self.session.as_mut() {
            session.hovered = Some(point);
        }
    }

    pub fn confirm(&mut self) -> Option<PickResult> {
        let session = self.session.take()?;
        Some(match session.hovered {
            Some(point) => PickResult::Target(point),
            None => PickResult::Fallback(session.fallback),
        })
    }

    pub fn cancel(&mut self) -> Option<PickResult> {
        let session = self.session.take()?;
        Some(PickResult::Fallback(session.fallback))
    }

    /// Enter confirms, Escape cancels; other keys leave the picker open.
    pub fn handle_key(&mut self, key: &str) -> Option<PickResult> {
        match key.to_lowercase().as_str() {
            "enter" => self.confirm(),
            "escape" => self.cancel(),
            _ => None,
        }
    }
}
