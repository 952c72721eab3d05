use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rounds won by each player across sessions.
///
/// Serializes as `{"X": n, "O": n}`; a stored object missing one of the keys
/// loads it as zero so both players are always present.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    #[serde(rename = "X", default)]
    x: u32,
    #[serde(rename = "O", default)]
    o: u32,
}

impl Scores {
    pub const fn new(x: u32, o: u32) -> Self {
        Self { x, o }
    }

    pub const fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Returns the winner's new total.
    pub fn record_win(&mut self, winner: Player) -> u32 {
        let slot = match winner {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        };
        *slot = slot.saturating_add(1);
        *slot
    }
}

impl Index<Player> for Scores {
    type Output = u32;

    fn index(&self, player: Player) -> &Self::Output {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }
}

/// Durable home of the running [`Scores`].
///
/// Implementations swallow their own I/O failures: a store that cannot be
/// read reports `None`, and a failed write must not disturb the game.
pub trait ScoreStore {
    /// Previously saved scores, or `None` when nothing usable is stored.
    fn load(&self) -> Option<Scores>;

    fn save(&mut self, scores: &Scores);

    fn clear(&mut self);
}

impl<S: ScoreStore + ?Sized> ScoreStore for &mut S {
    fn load(&self) -> Option<Scores> {
        (**self).load()
    }

    fn save(&mut self, scores: &Scores) {
        (**self).save(scores)
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}
