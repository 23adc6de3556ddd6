//! Frame loop: one game tick and the Bevy plugin that schedules it.
//!
//! ## Schedule
//!
//! | System                          | Schedule      | Purpose                                   |
//! |---------------------------------|---------------|-------------------------------------------|
//! | `capture_device_state_system`   | Update        | Snapshot keys, latch end-turn, sum scroll |
//! | `frame_tick_system`             | FixedUpdate   | Camera → input → draw list                |
//! | `graphics::*`                   | Update        | Present the draw list through Bevy        |
//!
//! `Time<Fixed>` is set to the configured tick interval, which replaces a
//! blocking sleep: pacing never holds the thread, so closing the window
//! exits promptly.

use crate::camera::CameraState;
use crate::config::GameConfig;
use crate::graphics;
use crate::input::{self, capture_device_state_system, DeviceState, KeyBindings, ShipTuning};
use crate::render::{render_world, DrawList, Renderer};
use crate::world::GameWorld;
use bevy::prelude::*;
use std::time::Duration;

/// Viewport centre in screen units, fixed for the window's lifetime.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Vec2,
}

/// What happened during one [`tick`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub elapsed: f32,
    pub turn_advanced: bool,
    pub ship_changed: bool,
}

/// Run one game tick.
///
/// 1. Advance the camera by the wall-clock time since the previous tick.
/// 2. Apply device input to the active player's ship (and maybe end the turn).
/// 3. Hand the world and view transform to `renderer`.
///
/// Scroll and the end-turn latch are consumed; held keys are left alone.
pub fn tick<R: Renderer + ?Sized>(
    world: &mut GameWorld,
    camera: &mut CameraState,
    device: &mut DeviceState,
    now: Duration,
    tuning: &ShipTuning,
    viewport_center: Vec2,
    renderer: &mut R,
) -> TickReport {
    let elapsed = camera.elapsed_since_last(now);
    *camera = camera.update(elapsed, device.pan, device.scroll);

    let active = world.turn_index();
    let outcome = input::apply(world, active, device, tuning);

    render_world(world, camera.view_transform(viewport_center), renderer);
    device.consume_one_shots();

    TickReport {
        elapsed,
        turn_advanced: outcome.turn_advanced,
        ship_changed: outcome.ship_changed,
    }
}

/// Fixed-timestep system wrapping [`tick`].
pub fn frame_tick_system(
    time: Res<Time<Real>>,
    viewport: Res<Viewport>,
    tuning: Res<ShipTuning>,
    mut world: ResMut<GameWorld>,
    mut camera: ResMut<CameraState>,
    mut device: ResMut<DeviceState>,
    mut draw_list: ResMut<DrawList>,
) {
    let report = tick(
        &mut world,
        &mut camera,
        &mut device,
        time.elapsed(),
        &tuning,
        viewport.center,
        &mut *draw_list,
    );
    if report.turn_advanced {
        debug!("[frame] Turn advanced to {}", world.turn_index());
    }
}

/// Wires the frame loop into a Bevy app.
///
/// Expects [`GameWorld`] and [`GameConfig`] to be inserted by the caller;
/// everything else is derived from the config.
pub struct SlingshotPlugin;

impl Plugin for SlingshotPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<GameConfig>()
            .cloned()
            .unwrap_or_default();
        let center = config.viewport_center();

        app.insert_resource(Time::<Fixed>::from_duration(config.tick_interval()))
            .insert_resource(Viewport { center })
            .insert_resource(ShipTuning::from(&config))
            .insert_resource(
                CameraState::new(center, config.pan_speed, config.zoom_speed)
                    .with_zoom_limits(config.zoom_limits()),
            )
            .init_resource::<KeyBindings>()
            .init_resource::<DeviceState>()
            .init_resource::<DrawList>()
            .init_resource::<graphics::GameFont>()
            .insert_resource(config)
            .add_systems(
                Startup,
                (graphics::load_game_font, graphics::setup_camera, graphics::setup_hud).chain(),
            )
            .add_systems(Update, capture_device_state_system)
            .add_systems(FixedUpdate, frame_tick_system)
            .add_systems(
                Update,
                (
                    graphics::present_view_system,
                    graphics::present_sprites_system,
                    graphics::present_hud_system,
                )
                    .after(capture_device_state_system),
            );
    }
}
