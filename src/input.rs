//! Input mapping: device state → ship parameter changes and turn commands.
//!
//! ## Pipeline
//!
//! 1. [`capture_device_state_system`] (every `Update` frame) copies held keys
//!    into [`DeviceState`], accumulates scroll, and latches the end-turn key on
//!    its press edge.
//! 2. The frame tick reads the snapshot: the camera consumes pan + scroll, then
//!    [`apply`] mutates the active ship and possibly ends the turn.
//! 3. The tick calls [`DeviceState::consume_one_shots`] so a single key press
//!    ends exactly one turn no matter how many ticks it stays held.
//!
//! Rotation and power change by a fixed step once per tick while held, so
//! their rate follows the tick interval rather than elapsed time.

use crate::camera::PanInput;
use crate::config::GameConfig;
use crate::constants::SCROLL_PIXELS_PER_LINE;
use crate::world::GameWorld;
use bevy::input::mouse::{AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;

/// Snapshot of everything the tick needs from the keyboard and mouse.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct DeviceState {
    pub pan: PanInput,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub power_up: bool,
    pub power_down: bool,
    /// Set on the frame the end-turn key goes down; cleared by the tick.
    pub end_turn: bool,
    /// Scroll lines accumulated since the last tick.
    pub scroll: f32,
}

impl DeviceState {
    /// Reset the edge-triggered and accumulated fields after a tick used them.
    pub fn consume_one_shots(&mut self) {
        self.end_turn = false;
        self.scroll = 0.0;
    }
}

/// Per-tick step sizes and optional clamps for ship parameters.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ShipTuning {
    pub angle_step: f32,
    pub power_step: f32,
    pub power_limits: Option<(f32, f32)>,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            angle_step: crate::constants::ANGLE_STEP,
            power_step: crate::constants::POWER_STEP,
            power_limits: None,
        }
    }
}

impl From<&GameConfig> for ShipTuning {
    fn from(config: &GameConfig) -> Self {
        Self {
            angle_step: config.angle_step,
            power_step: config.power_step,
            power_limits: config.power_limits(),
        }
    }
}

/// What [`apply`] did this tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputOutcome {
    pub ship_changed: bool,
    pub turn_advanced: bool,
}

/// Apply one tick of device input to the ship of player `active`.
///
/// Rotate left adds `angle_step` degrees, rotate right subtracts it; power
/// up/down add/subtract `power_step`.  Opposing keys cancel.  The end-turn
/// latch advances the turn once, after the ship changes.  No other entity
/// is touched.
pub fn apply(
    world: &mut GameWorld,
    active: usize,
    device: &DeviceState,
    tuning: &ShipTuning,
) -> InputOutcome {
    let mut outcome = InputOutcome::default();

    if let Some(ship) = world.ship_mut(active) {
        let turn = step(device.rotate_left, device.rotate_right) * tuning.angle_step;
        let thrust = step(device.power_up, device.power_down) * tuning.power_step;
        if turn != 0.0 {
            ship.angle += turn;
            outcome.ship_changed = true;
        }
        if thrust != 0.0 {
            ship.power += thrust;
            if let Some((min, max)) = tuning.power_limits {
                ship.power = ship.power.clamp(min, max);
            }
            outcome.ship_changed = true;
        }
    } else {
        warn!("[input] No ship for active player {active}");
    }

    if device.end_turn {
        let next = world.end_turn();
        info!("[turn] Player {active} ended their turn; player {next} is up");
        outcome.turn_advanced = true;
    }

    outcome
}

fn step(increase: bool, decrease: bool) -> f32 {
    f32::from(u8::from(increase)) - f32::from(u8::from(decrease))
}

// ── Device capture ────────────────────────────────────────────────────────────

/// Keyboard layout for every game action.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub pan_left: KeyCode,
    pub pan_right: KeyCode,
    pub pan_down: KeyCode,
    pub pan_up: KeyCode,
    pub rotate_left: KeyCode,
    pub rotate_right: KeyCode,
    pub power_up: KeyCode,
    pub power_down: KeyCode,
    pub end_turn: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            pan_left: KeyCode::ArrowLeft,
            pan_right: KeyCode::ArrowRight,
            pan_down: KeyCode::ArrowDown,
            pan_up: KeyCode::ArrowUp,
            rotate_left: KeyCode::KeyA,
            rotate_right: KeyCode::KeyD,
            power_up: KeyCode::KeyW,
            power_down: KeyCode::KeyS,
            end_turn: KeyCode::Space,
        }
    }
}

/// Convert a raw wheel delta to scroll lines.
pub fn scroll_lines(unit: MouseScrollUnit, delta_y: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => delta_y,
        MouseScrollUnit::Pixel => delta_y / SCROLL_PIXELS_PER_LINE,
    }
}

/// Copy this frame's keyboard and wheel state into [`DeviceState`].
///
/// Held keys are level-triggered and overwritten every frame.  The end-turn
/// key is OR-ed in on `just_pressed`, and scroll is summed, until the next
/// tick consumes them.
pub fn capture_device_state_system(
    keys: Res<ButtonInput<KeyCode>>,
    scroll: Option<Res<AccumulatedMouseScroll>>,
    bindings: Res<KeyBindings>,
    mut device: ResMut<DeviceState>,
) {
    device.pan = PanInput {
        left: keys.pressed(bindings.pan_left),
        right: keys.pressed(bindings.pan_right),
        down: keys.pressed(bindings.pan_down),
        up: keys.pressed(bindings.pan_up),
    };
    device.rotate_left = keys.pressed(bindings.rotate_left);
    device.rotate_right = keys.pressed(bindings.rotate_right);
    device.power_up = keys.pressed(bindings.power_up);
    device.power_down = keys.pressed(bindings.power_down);
    if keys.just_pressed(bindings.end_turn) {
        device.end_turn = true;
    }
    if let Some(scroll) = scroll {
        device.scroll += scroll_lines(scroll.unit, scroll.delta.y);
    }
}
