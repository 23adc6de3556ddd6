//! Presentation: turns the recorded [`DrawList`] into Bevy camera, sprite,
//! and UI state.
//!
//! Sprites and HUD lines are pooled by draw index.  Extra pool entries are
//! hidden rather than despawned, since the entity count only changes when the
//! world does.

use crate::config::GameConfig;
use crate::render::{DrawList, SpriteDraw, HIGHLIGHT_COLOR, TEXT_COLOR};
use crate::world::ImageRef;
use bevy::prelude::*;
use std::collections::HashMap;

/// Game font resource.  Holds Bevy's built-in font unless a font is configured.
#[derive(Resource, Default)]
pub struct GameFont(pub Handle<Font>);

#[derive(Component)]
pub struct MainCamera;

/// Pool slot `n` shows the `n`-th sprite of the draw list.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSlot(pub usize);

#[derive(Component)]
pub struct HudRoot;

/// Pool slot `n` shows the `n`-th HUD text line.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudLine(pub usize);

/// Load the configured font, if any, at startup.
///
/// The file was already parsed during startup validation, so a missing
/// font here means the asset root moved underneath us.
pub fn load_game_font(
    mut font: ResMut<GameFont>,
    config: Res<GameConfig>,
    asset_server: Res<AssetServer>,
) {
    if let Some(path) = &config.font_path {
        font.0 = asset_server.load(path.clone());
        info!("[SETUP] Game font loaded from {}", path.display());
    } else {
        info!("[SETUP] Using built-in font");
    }
}

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
    info!("[SETUP] Camera spawned");
}

/// Spawn the score panel in the top-left corner; lines are added on first draw.
pub fn setup_hud(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            flex_direction: FlexDirection::Column,
            ..default()
        },
        HudRoot,
    ));
}

/// Point the Bevy camera at the view focus and apply the clear colour.
///
/// Bevy already centres the camera translation in the viewport, so the
/// view transform reduces to `translation = focus`, `scale = 1 / zoom`.
pub fn present_view_system(
    draw_list: Res<DrawList>,
    mut clear_color: ResMut<ClearColor>,
    mut q_camera: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
) {
    if !draw_list.is_changed() {
        return;
    }
    clear_color.0 = draw_list.clear_color;
    let Ok((mut transform, mut projection)) = q_camera.single_mut() else {
        return;
    };
    transform.translation.x = draw_list.view.focus.x;
    transform.translation.y = draw_list.view.focus.y;
    if let Projection::Orthographic(ortho) = &mut *projection {
        ortho.scale = draw_list.view.zoom.recip();
    }
}

fn sprite_transform(index: usize, draw: &SpriteDraw) -> Transform {
    // Later draws stack on top of earlier ones.
    Transform::from_xyz(draw.position.x, draw.position.y, index as f32 * 0.001)
        .with_rotation(Quat::from_rotation_z(draw.rotation_degrees.to_radians()))
}

pub fn present_sprites_system(
    mut commands: Commands,
    draw_list: Res<DrawList>,
    asset_server: Res<AssetServer>,
    mut handles: Local<HashMap<ImageRef, Handle<Image>>>,
    mut slots: Query<(&SpriteSlot, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    if !draw_list.is_changed() {
        return;
    }
    let mut handle_for = |image: &ImageRef| {
        handles
            .entry(image.clone())
            .or_insert_with(|| asset_server.load(image.as_str().to_string()))
            .clone()
    };

    let mut pooled = 0;
    for (slot, mut sprite, mut transform, mut visibility) in &mut slots {
        pooled = pooled.max(slot.0 + 1);
        match draw_list.sprites.get(slot.0) {
            Some(draw) => {
                sprite.image = handle_for(&draw.image);
                *transform = sprite_transform(slot.0, draw);
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
    for (index, draw) in draw_list.sprites.iter().enumerate().skip(pooled) {
        commands.spawn((
            Sprite::from_image(handle_for(&draw.image)),
            sprite_transform(index, draw),
            SpriteSlot(index),
        ));
    }
}

pub fn present_hud_system(
    mut commands: Commands,
    draw_list: Res<DrawList>,
    font: Res<GameFont>,
    config: Res<GameConfig>,
    q_root: Query<Entity, With<HudRoot>>,
    mut lines: Query<(&HudLine, &mut Text, &mut TextColor, &mut Visibility)>,
) {
    if !draw_list.is_changed() {
        return;
    }
    let color_for = |highlighted: bool| if highlighted { HIGHLIGHT_COLOR } else { TEXT_COLOR };

    let mut pooled = 0;
    for (line, mut text, mut color, mut visibility) in &mut lines {
        pooled = pooled.max(line.0 + 1);
        match draw_list.text.get(line.0) {
            Some(source) => {
                text.0.clone_from(&source.text);
                color.0 = color_for(source.highlighted);
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    let Ok(root) = q_root.single() else {
        return;
    };
    for (index, source) in draw_list.text.iter().enumerate().skip(pooled) {
        commands.spawn((
            Text::new(source.text.clone()),
            TextFont {
                font: font.0.clone(),
                font_size: config.hud_font_size,
                ..default()
            },
            TextColor(color_for(source.highlighted)),
            HudLine(index),
            ChildOf(root),
        ));
    }
}
