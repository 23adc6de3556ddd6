//! Entity model and world factory.
//!
//! [`GameWorld`] owns every planet and player for the lifetime of the process.
//! It is built once by [`create_world`] and afterwards mutated only through
//! [`GameWorld::ship_mut`] (input mapping) and [`GameWorld::end_turn`]
//! (turn rotation, see [`crate::turn`]).

use crate::error::{AssetCategory, GameError, GameResult};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Opaque reference to a sprite asset, stored as a path relative to the asset root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A planetary obstacle.  Immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    position: Vec2,
    diameter: f32,
    image: ImageRef,
}

impl Planet {
    /// Returns `None` unless `diameter` is strictly positive.
    pub fn new(position: Vec2, diameter: f32, image: ImageRef) -> Option<Self> {
        (diameter > 0.0).then_some(Self {
            position,
            diameter,
            image,
        })
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn diameter(&self) -> f32 {
        self.diameter
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }
}

/// A player's ship.
///
/// `angle` is in degrees and deliberately not normalised; `power` starts at
/// the configured initial power and is unbounded unless limits are configured.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceShip {
    pub position: Vec2,
    pub angle: f32,
    pub power: f32,
    pub image: ImageRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub ship: SpaceShip,
    /// Never changed by the current rules; displayed on the HUD.
    pub score: u32,
}

/// The whole game state: planets, players in turn order, and whose turn it is.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameWorld {
    planets: Vec<Planet>,
    players: Vec<Player>,
    pub(crate) turn_index: usize,
}

impl GameWorld {
    /// Assemble a world from already-built entities.  The turn starts at player 0.
    pub fn new(planets: Vec<Planet>, players: Vec<Player>) -> GameResult<Self> {
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        Ok(Self {
            planets,
            players,
            turn_index: 0,
        })
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Index of the active player; always `< players().len()`.
    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    pub fn ship_mut(&mut self, index: usize) -> Option<&mut SpaceShip> {
        self.players.get_mut(index).map(|player| &mut player.ship)
    }
}

/// Counts, bounds, and ship defaults consumed by [`create_world`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldParams {
    pub planet_count: usize,
    pub player_count: usize,
    pub width: f32,
    pub height: f32,
    pub max_planet_diameter: f32,
    pub initial_power: f32,
    pub angle_spread: f32,
}

impl WorldParams {
    /// Parameters with the stock ship defaults (power 10, 90° spread, diameters up to 100).
    pub fn new(planet_count: usize, player_count: usize, width: f32, height: f32) -> Self {
        Self {
            planet_count,
            player_count,
            width,
            height,
            max_planet_diameter: crate::constants::MAX_PLANET_DIAMETER,
            initial_power: crate::constants::INITIAL_POWER,
            angle_spread: crate::constants::ANGLE_SPREAD,
        }
    }
}

impl From<&crate::config::GameConfig> for WorldParams {
    fn from(config: &crate::config::GameConfig) -> Self {
        Self {
            planet_count: config.planet_count,
            player_count: config.player_count,
            width: config.world_width,
            height: config.world_height,
            max_planet_diameter: config.max_planet_diameter,
            initial_power: config.initial_power,
            angle_spread: config.angle_spread,
        }
    }
}

/// Build the generator used for world creation.
///
/// A fixed seed makes the layout reproducible; `None` seeds from OS entropy.
pub fn world_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Create the initial world.
///
/// Positions are uniform in `[0, width) × [0, height)`, planet diameters
/// uniform in `(0, max_planet_diameter]`.  Entity `i` gets image
/// `images[i % images.len()]`, and player `i` starts at angle
/// `(angle_spread * i) mod 360` with `initial_power`.  `rng` is the only
/// source of randomness.
pub fn create_world<R: Rng>(
    params: &WorldParams,
    planet_images: &[ImageRef],
    ship_images: &[ImageRef],
    rng: &mut R,
) -> GameResult<GameWorld> {
    if planet_images.is_empty() {
        return Err(GameError::NoAssets {
            category: AssetCategory::Planet,
        });
    }
    if ship_images.is_empty() {
        return Err(GameError::NoAssets {
            category: AssetCategory::Ship,
        });
    }
    if params.player_count == 0 {
        return Err(GameError::NoPlayers);
    }
    if !(params.width.is_finite()
        && params.height.is_finite()
        && params.width > 0.0
        && params.height > 0.0)
    {
        return Err(GameError::InvalidWorldBounds {
            width: params.width,
            height: params.height,
        });
    }
    if !(params.max_planet_diameter.is_finite() && params.max_planet_diameter > 0.0) {
        return Err(GameError::InvalidConfig {
            name: "max_planet_diameter",
            value: f64::from(params.max_planet_diameter),
            safe_range: "(0.0, ∞)",
        });
    }

    let mut planets = Vec::with_capacity(params.planet_count);
    for i in 0..params.planet_count {
        let position = random_position(params, rng);
        // gen_range is half-open, so subtracting from the max gives (0, max].
        let diameter = params.max_planet_diameter - rng.gen_range(0.0..params.max_planet_diameter);
        let image = round_robin(planet_images, i).clone();
        let planet = Planet::new(position, diameter, image).ok_or(GameError::InvalidConfig {
            name: "max_planet_diameter",
            value: f64::from(params.max_planet_diameter),
            safe_range: "(0.0, ∞)",
        })?;
        planets.push(planet);
    }

    let players = (0..params.player_count)
        .map(|i| Player {
            ship: SpaceShip {
                position: random_position(params, rng),
                angle: (params.angle_spread * i as f32).rem_euclid(360.0),
                power: params.initial_power,
                image: round_robin(ship_images, i).clone(),
            },
            score: 0,
        })
        .collect();

    let world = GameWorld::new(planets, players)?;
    debug!(
        "[world] Created {} planets and {} players in {} x {}",
        world.planets().len(),
        world.players().len(),
        params.width,
        params.height
    );
    Ok(world)
}

fn random_position<R: Rng>(params: &WorldParams, rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.gen_range(0.0..params.width),
        rng.gen_range(0.0..params.height),
    )
}

/// `assets[i % assets.len()]`.  Callers guarantee `assets` is non-empty.
fn round_robin(assets: &[ImageRef], i: usize) -> &ImageRef {
    &assets[i % assets.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(names: &[&str]) -> Vec<ImageRef> {
        names.iter().map(|n| ImageRef::new(*n)).collect()
    }

    #[test]
    fn three_planets_two_players_layout() {
        let mut rng = world_rng(Some(7));
        let world = create_world(
            &WorldParams::new(3, 2, 1000.0, 800.0),
            &images(&["a"]),
            &images(&["b", "c"]),
            &mut rng,
        )
        .unwrap();

        assert_eq!(world.planets().len(), 3);
        assert!(world.planets().iter().all(|p| p.image().as_str() == "a"));
        assert_eq!(world.players().len(), 2);
        assert_eq!(world.players()[0].ship.image.as_str(), "b");
        assert_eq!(world.players()[1].ship.image.as_str(), "c");
        assert_eq!(world.players()[0].ship.angle, 0.0);
        assert_eq!(world.players()[1].ship.angle, 90.0);
        assert_eq!(world.turn_index(), 0);
    }

    #[test]
    fn ships_start_with_initial_power_and_zero_score() {
        let mut rng = world_rng(Some(1));
        let world = create_world(
            &WorldParams::new(0, 3, 100.0, 100.0),
            &images(&["p"]),
            &images(&["s"]),
            &mut rng,
        )
        .unwrap();
        for player in world.players() {
            assert_eq!(player.ship.power, 10.0);
            assert_eq!(player.score, 0);
        }
    }

    #[test]
    fn angles_fan_out_and_wrap_at_360() {
        let mut rng = world_rng(Some(3));
        let world = create_world(
            &WorldParams::new(0, 6, 50.0, 50.0),
            &images(&["p"]),
            &images(&["s"]),
            &mut rng,
        )
        .unwrap();
        let angles: Vec<f32> = world.players().iter().map(|p| p.ship.angle).collect();
        assert_eq!(angles, vec![0.0, 90.0, 180.0, 270.0, 0.0, 90.0]);
    }

    #[test]
    fn diameters_are_positive_and_bounded() {
        let mut rng = world_rng(Some(99));
        let world = create_world(
            &WorldParams::new(200, 1, 10.0, 10.0),
            &images(&["p"]),
            &images(&["s"]),
            &mut rng,
        )
        .unwrap();
        for planet in world.planets() {
            assert!(planet.diameter() > 0.0 && planet.diameter() <= 100.0);
        }
    }

    #[test]
    fn same_seed_same_world() {
        let params = WorldParams::new(4, 2, 640.0, 480.0);
        let planets = images(&["p1", "p2"]);
        let ships = images(&["s1"]);
        let a = create_world(&params, &planets, &ships, &mut world_rng(Some(5))).unwrap();
        let b = create_world(&params, &planets, &ships, &mut world_rng(Some(5))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_asset_lists_are_rejected() {
        let params = WorldParams::new(1, 1, 10.0, 10.0);
        let mut rng = world_rng(Some(0));
        assert!(matches!(
            create_world(&params, &[], &images(&["s"]), &mut rng),
            Err(GameError::NoAssets {
                category: AssetCategory::Planet
            })
        ));
        assert!(matches!(
            create_world(&params, &images(&["p"]), &[], &mut rng),
            Err(GameError::NoAssets {
                category: AssetCategory::Ship
            })
        ));
    }

    #[test]
    fn zero_players_and_bad_bounds_are_rejected() {
        let mut rng = world_rng(Some(0));
        let p = images(&["p"]);
        let s = images(&["s"]);
        assert!(matches!(
            create_world(&WorldParams::new(1, 0, 10.0, 10.0), &p, &s, &mut rng),
            Err(GameError::NoPlayers)
        ));
        assert!(matches!(
            create_world(&WorldParams::new(1, 1, 0.0, 10.0), &p, &s, &mut rng),
            Err(GameError::InvalidWorldBounds { .. })
        ));
    }

    #[test]
    fn planet_requires_positive_diameter() {
        assert!(Planet::new(Vec2::ZERO, 0.0, ImageRef::new("p")).is_none());
        assert!(Planet::new(Vec2::ZERO, 1.0, ImageRef::new("p")).is_some());
    }

    #[test]
    fn ship_mut_is_bounds_checked() {
        let mut world = GameWorld::new(
            Vec::new(),
            vec![Player {
                ship: SpaceShip {
                    position: Vec2::ZERO,
                    angle: 0.0,
                    power: 10.0,
                    image: ImageRef::new("s"),
                },
                score: 0,
            }],
        )
        .unwrap();
        assert!(world.ship_mut(0).is_some());
        assert!(world.ship_mut(1).is_none());
        assert!(matches!(
            GameWorld::new(Vec::new(), Vec::new()),
            Err(GameError::NoPlayers)
        ));
    }
}
