use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Whether the session still accepts reveals and flags.
    pub const fn is_playable(self) -> bool {
        !self.is_finished()
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// One playthrough, from a fresh board to a won or lost board. Sessions are never reused: start a new
/// one for a new game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    mines_left: i32,
    elapsed_seconds: u32,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    pub fn new(board: Board) -> Self {
        let mines_left = board.mine_count().into();
        Self {
            board,
            mines_left,
            elapsed_seconds: 0,
            status: GameStatus::NotStarted,
            triggered_mine: None,
        }
    }

    /// Fresh session on a board produced by `generator`.
    pub fn generate(config: BoardConfig, generator: impl MinefieldGenerator) -> Self {
        Self::new(generator.generate(config))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Mine count minus flags placed. Display only, goes negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        self.mines_left
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_view(&self, coords: Coord2) -> CellView {
        let cell = self.board[coords];
        if cell.is_revealed() && cell.is_mine() {
            if self.triggered_mine == Some(coords) {
                CellView::TriggeredMine
            } else {
                CellView::Mine
            }
        } else if cell.is_revealed() {
            CellView::Revealed(cell.neighbor_mines())
        } else if cell.is_flagged() {
            CellView::Flagged
        } else {
            CellView::Hidden
        }
    }

    /// Primary-click handler.
    ///
    /// Ignored once the game is over, and for flagged, revealed, or out-of-bounds cells. Opening a mine
    /// exposes every mine and loses the game, anything else runs the flood fill and checks for a win. The
    /// first accepted reveal starts the clock.
    pub fn handle_reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.status.is_finished() {
            return RevealOutcome::NoChange;
        }
        let Some(cell) = self.board.get(coords) else {
            return RevealOutcome::NoChange;
        };
        if !cell.is_revealable() {
            return RevealOutcome::NoChange;
        }

        self.mark_started();

        if cell.is_mine() {
            let exposed = self.board.reveal_all_mines();
            log::debug!("hit mine at {:?}, exposed {} mines", coords, exposed);
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        let revealed = self.board.reveal_cell(coords);
        log::debug!("revealed {} cells from {:?}", revealed, coords);

        if self.board.check_win() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Secondary-click handler. Flips the flag on an unrevealed cell and moves `mines_left` the opposite
    /// way. Flagging before the first reveal is allowed and does not start the clock.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.status.is_finished() {
            return MarkOutcome::NoChange;
        }

        match self.board.toggle_flag(coords) {
            Some(true) => {
                self.mines_left -= 1;
                MarkOutcome::Flagged
            }
            Some(false) => {
                self.mines_left += 1;
                MarkOutcome::Unflagged
            }
            None => MarkOutcome::NoChange,
        }
    }

    /// One-second timer tick. Only counts while the game is in progress; the value is kept once the game
    /// ends. Returns whether the counter moved.
    pub fn tick(&mut self) -> bool {
        if matches!(self.status, GameStatus::InProgress) {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
            true
        } else {
            false
        }
    }

    fn mark_started(&mut self) {
        if matches!(self.status, GameStatus::NotStarted) {
            log::debug!("session started");
            self.status = GameStatus::InProgress;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }
        self.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        log::debug!(
            "session ended: {:?} after {}s",
            self.status,
            self.elapsed_seconds
        );
    }
}
