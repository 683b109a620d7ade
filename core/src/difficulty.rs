use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

/// Form field a custom-difficulty value came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputField {
    Rows,
    Cols,
    Mines,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rows => "rows",
            Self::Cols => "columns",
            Self::Mines => "mines",
        })
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DifficultyError {
    #[error("rows must be between {min} and {max}, got {value}")]
    RowsOutOfRange { value: u32, min: u32, max: u32 },
    #[error("columns must be between {min} and {max}, got {value}")]
    ColsOutOfRange { value: u32, min: u32, max: u32 },
    #[error("mines must be between {min} and {max}, got {value}")]
    MinesOutOfRange { value: u32, min: u32, max: u32 },
    #[error("{field} is not a number")]
    NotANumber { field: InputField },
}

/// Board dimensions and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl BoardConfig {
    pub const MIN_SIDE: u32 = 5;
    pub const MAX_SIDE: u32 = 30;

    const fn preset(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub const fn beginner() -> Self {
        Self::preset(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::preset(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::preset(16, 30, 99)
    }

    /// Validates a player-chosen board: both sides in `5..=30` and between one mine and 90% of the cells.
    pub fn custom(rows: u32, cols: u32, mines: u32) -> core::result::Result<Self, DifficultyError> {
        let side_range = Self::MIN_SIDE..=Self::MAX_SIDE;
        if !side_range.contains(&rows) {
            return Err(DifficultyError::RowsOutOfRange {
                value: rows,
                min: Self::MIN_SIDE,
                max: Self::MAX_SIDE,
            });
        }
        if !side_range.contains(&cols) {
            return Err(DifficultyError::ColsOutOfRange {
                value: cols,
                min: Self::MIN_SIDE,
                max: Self::MAX_SIDE,
            });
        }

        let max_mines = Self::max_mines(rows, cols);
        if !(1..=max_mines).contains(&mines) {
            return Err(DifficultyError::MinesOutOfRange {
                value: mines,
                min: 1,
                max: max_mines,
            });
        }

        // all three fit their types once inside the ranges above
        Ok(Self::preset(rows as Coord, cols as Coord, mines as CellCount))
    }

    /// Parses the raw custom-difficulty form fields, then validates them like [`BoardConfig::custom`].
    pub fn from_input(rows: &str, cols: &str, mines: &str) -> core::result::Result<Self, DifficultyError> {
        fn parse(value: &str, field: InputField) -> core::result::Result<u32, DifficultyError> {
            value
                .trim()
                .parse()
                .map_err(|_| DifficultyError::NotANumber { field })
        }

        Self::custom(
            parse(rows, InputField::Rows)?,
            parse(cols, InputField::Cols)?,
            parse(mines, InputField::Mines)?,
        )
    }

    /// Highest mine count allowed for a custom board: 90% of the cells, rounded down.
    pub const fn max_mines(rows: u32, cols: u32) -> u32 {
        rows.saturating_mul(cols).saturating_mul(9) / 10
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
    Custom(BoardConfig),
}

impl Difficulty {
    pub const ALL_PRESETS: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> BoardConfig {
        match self {
            Self::Beginner => BoardConfig::beginner(),
            Self::Intermediate => BoardConfig::intermediate(),
            Self::Expert => BoardConfig::expert(),
            Self::Custom(config) => config,
        }
    }

    /// Identifier used by the difficulty selector.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
            Self::Custom(_) => "custom",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Expert => "Expert",
            Self::Custom(_) => "Custom",
        }
    }

    /// Looks up a preset by selector name. `"custom"` has no board of its own and yields `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL_PRESETS
            .into_iter()
            .find(|difficulty| difficulty.name() == name)
    }

    pub const fn is_custom(self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}
