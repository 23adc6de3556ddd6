use bevy::prelude::*;
use bevy::window::WindowResolution;
use slingshot::assets::GameAssets;
use slingshot::config::GameConfig;
use slingshot::constants::{CONFIG_PATH, SEED_ENV_VAR};
use slingshot::error::GameResult;
use slingshot::frame::SlingshotPlugin;
use slingshot::world::{create_world, world_rng, WorldParams};
use std::env;

fn main() {
    if let Err(e) = run() {
        eprintln!("[FATAL] {e}");
        std::process::exit(1);
    }
}

/// Everything that can fail happens before the window opens.
fn run() -> GameResult<()> {
    let mut config = GameConfig::load_or_default(CONFIG_PATH);
    if let Some(seed) = config.apply_seed_override(env::var(SEED_ENV_VAR).ok().as_deref()) {
        eprintln!("[SETUP] World seed pinned to {seed} via {SEED_ENV_VAR}");
    }
    config.validate()?;

    let assets = GameAssets::discover(&config)?;
    let mut rng = world_rng(config.seed);
    let world = create_world(
        &WorldParams::from(&config),
        &assets.planet_images,
        &assets.ship_images,
        &mut rng,
    )?;

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: config.window_title.clone(),
                    resolution: WindowResolution::new(config.window_width, config.window_height),
                    resizable: false,
                    ..Default::default()
                }),
                ..Default::default()
            })
            .set(AssetPlugin {
                file_path: config.asset_root.to_string_lossy().into_owned(),
                ..Default::default()
            }),
    )
    .insert_resource(ClearColor(slingshot::render::BACKGROUND_COLOR))
    .insert_resource(world)
    .insert_resource(config)
    .add_plugins(SlingshotPlugin);

    app.run();
    Ok(())
}
