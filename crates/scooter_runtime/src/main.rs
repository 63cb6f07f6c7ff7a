//! Grand Theft Scooter runtime
//!
//! Boots the mall headlessly: loads config, settings and assets, populates
//! the arena and drives the scooter on autopilot for a fixed number of
//! frames.

mod autopilot;
mod config;
mod game;
mod picker;
mod player;

use anyhow::{Context, Result};
use autopilot::Autopilot;
use config::RuntimeConfig;
use game::{Game, GameSetup};
use scooter_asset::{AssetLibrary, AssetManifest, MallAssets};
use scooter_core::math::Vec3;
use scooter_services::{FileStore, Settings};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Grand Theft Scooter v{}", scooter_core::VERSION);
    let config = config::load_runtime_config();

    let mut store = FileStore::new(&config.settings_dir);
    let settings = Settings::load(&store);
    tracing::info!("Controls: {:?}, theme: {:?}", settings.control_scheme, settings.theme);

    let assets = load_assets(&config);
    let setup = GameSetup {
        arena: config.arena.clone(),
        assets,
        seed: config.seed,
    };
    let mut game = Game::new(setup, settings);
    game.populate(config.population);

    if let Some([x, z]) = config.spawn_point {
        game.begin_spawn_pick();
        game.hover_spawn(Vec3::new(x, 0.0, z));
        if let Some(at) = game.spawn_pick_key("Enter") {
            tracing::info!("Starting at ({:.1}, {:.1})", at.x, at.z);
        }
    }

    let pilot = Autopilot::default();
    let mut frames = 0;
    let mut substeps = 0;
    for frame in 0..config.frames {
        pilot.drive(frame, game.keyboard_mut());
        let report = game.frame(config.frame_delta);
        frames = frame + 1;
        substeps += report.substeps;
        if report.points > 0 {
            tracing::debug!("Frame {}: {}", frame, game.scoreboard().last_line());
        }
        if report.crashed {
            break;
        }
    }

    let at = game.player_position();
    tracing::info!(
        "Run finished after {} frames ({} physics steps) at ({:.1}, {:.1}): {} ({})",
        frames,
        substeps,
        at.x,
        at.z,
        game.scoreboard().score_line(),
        if game.is_over() { game.overlay().reason() } else { "still riding" }
    );

    settings
        .save(&mut store)
        .with_context(|| format!("saving settings to {}", store.dir().display()))?;
    Ok(())
}

fn load_assets(config: &RuntimeConfig) -> MallAssets {
    let Some(path) = config.asset_manifest.as_deref() else {
        return MallAssets::empty();
    };
    match AssetManifest::load(path) {
        Ok(manifest) => AssetLibrary::new(manifest.root.clone()).load_mall_assets(&manifest),
        Err(e) => {
            tracing::warn!("No asset manifest at {} ({}), using fallbacks", path.display(), e);
            MallAssets::empty()
        }
    }
}
