//! Top-level game controller
//!
//! Owns the run: score, game-over state, the player's scooter and the
//! arena. Everything the frame loop mutates goes through here.

use crate::picker::{PickResult, SpawnPicker};
use crate::player::{self, Player};
use scooter_asset::MallAssets;
use scooter_core::math::{GameRng, Vec3};
use scooter_core::physics::HeadlessPhysics;
use scooter_core::scene::HeadlessScene;
use scooter_core::time::FixedStep;
use scooter_services::{GameOverOverlay, InputState, Keyboard, Scoreboard, Settings, TelemetryPatch};
use scooter_world::{
    Arena, ArenaConfig, CollisionOutcome, NavigableOptions, PopulationMode, PopulationReport,
};

/// Separation used when dropping the scooter somewhere.
pub const TELEPORT_CLEARANCE: f32 = 4.5;

/// Everything needed to build (and rebuild) a run.
#[derive(Debug, Clone)]
pub struct GameSetup {
    pub arena: ArenaConfig,
    pub assets: MallAssets,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Running,
    Over { reason: String },
}

/// Summary of one frame, for the loop's logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub substeps: u32,
    pub points: u32,
    pub crashed: bool,
}

pub struct Game {
    setup: GameSetup,
    arena: Arena,
    player: Player,
    keyboard: Keyboard,
    scoreboard: Scoreboard,
    overlay: GameOverOverlay,
    picker: SpawnPicker,
    fixed_step: FixedStep,
    state: RunState,
    population: Option<Option<PopulationMode>>,
}

impl Game {
    pub fn new(setup: GameSetup, settings: Settings) -> Self {
        let (arena, player) = build_arena(&setup);
        Self {
            setup,
            arena,
            player,
            keyboard: Keyboard::new(settings.control_scheme),
            scoreboard: Scoreboard::new(),
            overlay: GameOverOverlay::new(),
            picker: SpawnPicker::new(),
            fixed_step: FixedStep::default(),
            state: RunState::Running,
            population: None,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn keyboard_mut(&mut self) -> &mut Keyboard {
        &mut self.keyboard
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn overlay(&self) -> &GameOverOverlay {
        &self.overlay
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, RunState::Over { .. })
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    pub fn player_position(&self) -> Vec3 {
        self.player.position(self.arena.physics())
    }

    /// Fill the mall. Remembered so [`Game::reset`] can repeat it.
    pub fn populate(&mut self, mode: Option<PopulationMode>) -> PopulationReport {
        self.population = Some(mode);
        self.arena.populate(mode)
    }

    /// Run one rendered frame of `delta` seconds.
    pub fn frame(&mut self, delta: f32) -> FrameReport {
        let mut report = FrameReport::default();
        let input = if self.is_over() {
            InputState::default()
        } else {
            self.keyboard.read()
        };

        report.substeps = self.fixed_step.accumulate(delta);
        if report.substeps > 0 && !self.is_over() {
            self.player.apply_input(self.arena.physics_mut(), input, delta);
        }

        let dt = self.fixed_step.step();
        let player_body = self.player.body();
        for _ in 0..report.substeps {
            for contact in self.arena.step(dt) {
                let Some(other) = contact.other(player_body) else {
                    continue;
                };
                if self.is_over() {
                    break;
                }
                match self.arena.handle_collision(other, player_body) {
                    Some(CollisionOutcome::Fatal { label }) => {
                        self.end_run(&label);
                        report.crashed = true;
                    }
                    Some(CollisionOutcome::Score { label, points, .. }) => {
                        let total = self.scoreboard.award(points, &label);
                        report.points += points;
                        tracing::info!("+{} for {} (total {})", points, label, total);
                    }
                    None => {}
                }
            }
        }

        let physics = self.arena.physics();
        self.scoreboard.patch_telemetry(TelemetryPatch {
            speed: Some(self.player.speed(physics)),
            position: Some(self.player.position(physics)),
        });

        self.arena.tick(delta);
        let (physics, scene) = self.arena.split_mut();
        self.player.sync(physics, scene);
        self.scoreboard.tick(delta);
        report
    }

    fn end_run(&mut self, label: &str) {
        let reason = format!("Crashed into {label}");
        self.player.freeze(self.arena.physics_mut());
        self.keyboard.release_all();
        self.overlay.show(Some(&reason));
        self.scoreboard.set_message(Some(&reason));
        tracing::info!("Game over: {} (score {})", reason, self.scoreboard.score());
        self.state = RunState::Over { reason };
    }

    /// Nearest free spot to `target`, ignoring the scooter itself.
    pub fn safe_point(&mut self, target: Vec3) -> Vec3 {
        let options = NavigableOptions::default().ignoring(self.player.body());
        self.arena
            .find_nearest_navigable_point(target, TELEPORT_CLEARANCE, &options)
    }

    /// Move the scooter to a free spot near `target`, at rest.
    pub fn teleport_player(&mut self, target: Vec3) -> Vec3 {
        let point = self.safe_point(target);
        self.player.teleport(self.arena.physics_mut(), point);
        tracing::debug!("Teleported player to ({:.1}, {:.1})", point.x, point.z);
        point
    }

    pub fn picker(&self) -> &SpawnPicker {
        &self.picker
    }

    /// Open the picker with a fallback near the start position.
    pub fn begin_spawn_pick(&mut self) {
        let fallback = self.safe_point(player::START);
        self.picker.begin(fallback);
    }

    pub fn hover_spawn(&mut self, point: Vec3) {
        self.picker.hover(point);
    }

    pub fn confirm_spawn_pick(&mut self) -> Option<Vec3> {
        let result = self.picker.confirm()?;
        Some(self.finish_pick(result))
    }

    pub fn cancel_spawn_pick(&mut self) -> Option<Vec3> {
        let result = self.picker.cancel()?;
        Some(self.finish_pick(result))
    }

    /// Route a key press to the open picker. Returns where the scooter went.
    pub fn spawn_pick_key(&mut self, key: &str) -> Option<Vec3> {
        let result = self.picker.handle_key(key)?;
        Some(self.finish_pick(result))
    }

    fn finish_pick(&mut self, result: PickResult) -> Vec3 {
        match result {
            PickResult::Target(point) => self.teleport_player(point),
            PickResult::Fallback(point) => {
                self.player.teleport(self.arena.physics_mut(), point);
                point
            }
        }
    }

    /// Throw the current run away and start over with the same setup.
    pub fn reset(&mut self) {
        let (arena, player) = build_arena(&self.setup);
        self.arena = arena;
        self.player = player;
        if let Some(mode) = self.population {
            self.arena.populate(mode);
        }
        self.keyboard.release_all();
        self.scoreboard.reset();
        self.overlay.hide();
        self.picker = SpawnPicker::new();
        self.fixed_step.reset();
        self.state = RunState::Running;
        tracing::info!("Run reset");
    }
}

fn build_arena(setup: &GameSetup) -> (Arena, Player) {
    let mut physics = HeadlessPhysics::new();
    let mut scene = HeadlessScene::new();
    let player = Player::spawn(&mut physics, &mut scene, setup.assets.scooter_node());
    let arena = Arena::new(
        setup.arena.clone(),
        physics,
        scene,
        setup.assets.clone(),
        GameRng::new(setup.seed),
    );
    (arena, player)
}
