use serde::{Deserialize, Serialize};

use crate::*;

/// Who opens the round that follows a win or a draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartPolicy {
    /// Whoever was active when the round ended keeps the turn.
    CarryOver,
    /// Every round starts with the same player.
    Fixed(Player),
}

impl StartPolicy {
    pub const fn opening_player(self) -> Player {
        match self {
            Self::CarryOver => Player::X,
            Self::Fixed(player) => player,
        }
    }

    const fn next_round_player(self, last_active: Player) -> Player {
        match self {
            Self::CarryOver => last_active,
            Self::Fixed(player) => player,
        }
    }
}

impl Default for StartPolicy {
    fn default() -> Self {
        Self::CarryOver
    }
}

/// Outcome of selecting a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The cell was already taken, nothing changed.
    Ignored,
    Continued,
    Won { winner: Player, line: Line },
    Draw,
}

impl MoveOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    pub const fn is_round_over(self) -> bool {
        matches!(self, Self::Won { .. } | Self::Draw)
    }
}

#[derive(Debug)]
pub struct GameController<S> {
    store: S,
    policy: StartPolicy,
    board: Board,
    active: Player,
    scores: Scores,
}

impl<S: ScoreStore> GameController<S> {
    pub fn new(store: S, policy: StartPolicy) -> Self {
        let scores = store.load().unwrap_or_else(|| {
            log::debug!("no stored scores, starting from zero");
            Scores::default()
        });
        Self {
            store,
            policy,
            board: Board::default(),
            active: policy.opening_player(),
            scores,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, index: CellIndex) -> Result<Cell> {
        self.board.cell_at(index)
    }

    pub fn active_player(&self) -> Player {
        self.active
    }

    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    pub fn start_policy(&self) -> StartPolicy {
        self.policy
    }

    /// Places the active player's mark at `index` and settles the round.
    ///
    /// Selecting a taken cell is not an error and reports [`MoveOutcome::Ignored`].
    pub fn select_cell(&mut self, index: CellIndex) -> Result<MoveOutcome> {
        let index = self.board.validate_index(index)?;
        if !self.board[index].is_empty() {
            log::trace!("cell {} already taken", index);
            return Ok(MoveOutcome::Ignored);
        }

        self.board = self.board.with_mark(index, self.active)?;
        log::debug!("{} marks cell {}", self.active, index);
        Ok(self.evaluate_round())
    }

    /// Clears stored scores and restarts from a blank board.
    pub fn reset_scores(&mut self) {
        self.store.clear();
        self.scores = Scores::default();
        self.board = Board::default();
        self.active = self.policy.opening_player();
        log::info!("scores reset");
    }

    fn evaluate_round(&mut self) -> MoveOutcome {
        match self.board.status() {
            RoundStatus::Won { winner, line } => {
                self.resolve_win(winner);
                MoveOutcome::Won { winner, line }
            }
            RoundStatus::Draw => {
                self.resolve_draw();
                MoveOutcome::Draw
            }
            RoundStatus::InProgress => {
                self.active = self.active.opponent();
                MoveOutcome::Continued
            }
        }
    }

    fn resolve_win(&mut self, winner: Player) {
        let total = self.scores.record_win(winner);
        log::info!("{} wins, {} rounds so far", winner, total);
        self.store.save(&self.scores);
        self.start_next_round();
    }

    fn resolve_draw(&mut self) {
        log::info!("round drawn");
        self.start_next_round();
    }

    fn start_next_round(&mut self) {
        self.board = Board::default();
        self.active = self.policy.next_round_player(self.active);
    }
}
