use serde::{Deserialize, Serialize};

/// One grid position. Only the board mutates cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    pub(crate) neighbor_mines: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Number of mines among the Moore neighbors, always 0 for mine cells.
    pub const fn neighbor_mines(self) -> u8 {
        self.neighbor_mines
    }

    /// Whether a reveal on this cell could change anything.
    pub const fn is_revealable(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}

/// What the renderer is allowed to know about a cell.
///
/// Mine identity is only exposed for revealed cells, which after a loss includes every mine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    TriggeredMine,
}

impl CellView {
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
