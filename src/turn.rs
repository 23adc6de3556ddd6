//! Turn rotation.
//!
//! The turn index cycles `0 → 1 → … → n-1 → 0` forever; there is no
//! terminal state and no legality check before advancing.

use crate::world::{GameWorld, Player};

/// Index of the player after `current` in a table of `player_count` players.
pub fn next_turn(current: usize, player_count: usize) -> usize {
    debug_assert!(player_count > 0, "turn rotation needs at least one player");
    (current + 1) % player_count
}

impl GameWorld {
    /// Hand control to the next player and return the new turn index.
    pub fn end_turn(&mut self) -> usize {
        self.turn_index = next_turn(self.turn_index, self.players().len());
        debug_assert!(self.turn_index < self.players().len());
        self.turn_index
    }

    pub fn active_player(&self) -> &Player {
        &self.players()[self.turn_index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{create_world, world_rng, ImageRef, WorldParams};
    use proptest::prelude::*;

    fn world_with_players(count: usize) -> GameWorld {
        create_world(
            &WorldParams::new(0, count, 100.0, 100.0),
            &[ImageRef::new("p")],
            &[ImageRef::new("s")],
            &mut world_rng(Some(11)),
        )
        .unwrap()
    }

    #[test]
    fn next_turn_wraps() {
        assert_eq!(next_turn(0, 3), 1);
        assert_eq!(next_turn(2, 3), 0);
        assert_eq!(next_turn(0, 1), 0);
    }

    #[test]
    fn end_turn_walks_every_player_in_order() {
        let mut world = world_with_players(3);
        assert_eq!(world.turn_index(), 0);
        assert_eq!(world.end_turn(), 1);
        assert_eq!(world.end_turn(), 2);
        assert_eq!(world.end_turn(), 0);
    }

    #[test]
    fn active_player_follows_turn_index() {
        let mut world = world_with_players(2);
        assert_eq!(world.active_player().ship.angle, 0.0);
        world.end_turn();
        assert_eq!(world.active_player().ship.angle, 90.0);
    }

    proptest! {
        /// Ending the turn `n` times brings any `n`-player game back to the same player.
        #[test]
        fn n_turns_return_to_start(players in 1usize..=16, start_offset in 0usize..16) {
            let mut world = world_with_players(players);
            for _ in 0..(start_offset % players) {
                world.end_turn();
            }
            let start = world.turn_index();
            for _ in 0..players {
                world.end_turn();
                prop_assert!(world.turn_index() < players);
            }
            prop_assert_eq!(world.turn_index(), start);
        }
    }
}
