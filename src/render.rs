//! Draw-call contract between the game core and whatever puts pixels on screen.
//!
//! [`render_world`] issues the calls for one tick in a fixed order:
//!
//! | Call                  | Count        | Data                                   |
//! |-----------------------|--------------|----------------------------------------|
//! | `set_view`            | 1            | camera [`ViewTransform`]               |
//! | `clear`               | 1            | [`BACKGROUND_COLOR`]                   |
//! | `draw_sprite`         | per planet   | image, position, rotation 0            |
//! | `draw_sprite`         | per ship     | image, position, ship angle            |
//! | `draw_text`           | 1            | one line per player, active highlighted|
//!
//! [`DrawList`] is the in-engine implementation: it records the calls into a
//! resource that [`crate::graphics`] turns into Bevy sprites and UI text.

use crate::camera::ViewTransform;
use crate::world::{GameWorld, ImageRef, Player};
use bevy::prelude::*;

/// Sky-blue background.
pub const BACKGROUND_COLOR: Color = Color::srgb(0.529, 0.808, 0.922);
/// Colour of a normal HUD line.
pub const TEXT_COLOR: Color = Color::srgb(0.1, 0.1, 0.15);
/// Colour of the active player's HUD line.
pub const HIGHLIGHT_COLOR: Color = Color::srgb(0.95, 0.88, 0.45);

/// One line of HUD text.  `highlighted` marks the active player.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    pub image: ImageRef,
    pub position: Vec2,
    pub rotation_degrees: f32,
}

/// Rendering collaborator driven once per tick.
pub trait Renderer {
    fn set_view(&mut self, view: ViewTransform);
    fn clear(&mut self, color: Color);
    fn draw_sprite(&mut self, image: &ImageRef, position: Vec2, rotation_degrees: f32);
    fn draw_text(&mut self, lines: &[TextLine]);
}

/// HUD line for player `index`.
pub fn score_line(index: usize, player: &Player) -> String {
    format!(
        "Player {}: {} Points  (angle {:.0}°, power {:.0})",
        index, player.score, player.ship.angle, player.ship.power
    )
}

/// Issue the draw calls for `world` as seen through `view`.
pub fn render_world<R: Renderer + ?Sized>(world: &GameWorld, view: ViewTransform, renderer: &mut R) {
    renderer.set_view(view);
    renderer.clear(BACKGROUND_COLOR);
    for planet in world.planets() {
        debug!(
            "[render] Drawing planet at {:.1} {:.1}",
            planet.position().x,
            planet.position().y
        );
        renderer.draw_sprite(planet.image(), planet.position(), 0.0);
    }
    for player in world.players() {
        debug!(
            "[render] Drawing ship at {:.1} {:.1}",
            player.ship.position.x, player.ship.position.y
        );
        renderer.draw_sprite(&player.ship.image, player.ship.position, player.ship.angle);
    }
    let lines: Vec<TextLine> = world
        .players()
        .iter()
        .enumerate()
        .map(|(index, player)| TextLine {
            text: score_line(index, player),
            highlighted: index == world.turn_index(),
        })
        .collect();
    renderer.draw_text(&lines);
}

/// Recorded draw calls for the most recent tick.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct DrawList {
    pub view: ViewTransform,
    pub clear_color: Color,
    pub sprites: Vec<SpriteDraw>,
    pub text: Vec<TextLine>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self {
            view: ViewTransform::default(),
            clear_color: BACKGROUND_COLOR,
            sprites: Vec::new(),
            text: Vec::new(),
        }
    }
}

impl Renderer for DrawList {
    fn set_view(&mut self, view: ViewTransform) {
        self.view = view;
    }

    /// Starts a new frame: previous sprites and text are dropped.
    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.sprites.clear();
        self.text.clear();
    }

    fn draw_sprite(&mut self, image: &ImageRef, position: Vec2, rotation_degrees: f32) {
        self.sprites.push(SpriteDraw {
            image: image.clone(),
            position,
            rotation_degrees,
        });
    }

    fn draw_text(&mut self, lines: &[TextLine]) {
        self.text.extend_from_slice(lines);
    }
}
