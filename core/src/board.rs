use alloc::vec;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular minefield, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Allocates an empty `rows × cols` board: no mines, nothing revealed or flagged.
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    /// Board with mines at exactly `mine_coords` and neighbor counts already computed.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size);
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            let cell = &mut board.cells[coords.to_nd_index()];
            if !cell.is_mine {
                cell.is_mine = true;
                board.mine_count += 1;
            }
        }
        board.calculate_numbers();
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        iter_coords(self.size())
    }

    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size())
    }

    /// Marks `count` additional distinct cells as mines by rejection sampling: draw a random position and
    /// retry whenever it already holds a mine.
    ///
    /// Every cell is a candidate, so the first cell the player opens may be a mine. Neighbor counts are
    /// not updated, call [`Board::calculate_numbers`] afterwards.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, count: CellCount, rng: &mut R) -> Result<()> {
        use rand::RngExt;

        if count > self.safe_cell_count() {
            return Err(GameError::TooManyMines);
        }

        let (rows, cols) = self.size();
        let mut placed = 0;
        while placed < count {
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            let cell = &mut self.cells[coords.to_nd_index()];
            if !cell.is_mine {
                cell.is_mine = true;
                placed += 1;
            }
        }
        self.mine_count += placed;
        log::debug!("placed {} mines on a {}x{} board", placed, rows, cols);
        Ok(())
    }

    /// Fills in `neighbor_mines` for every non-mine cell.
    pub fn calculate_numbers(&mut self) {
        for coords in self.iter_coords() {
            let count = if self[coords].is_mine {
                0
            } else {
                self.count_adjacent_mines(coords)
            };
            self.cells[coords.to_nd_index()].neighbor_mines = count;
        }
    }

    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        let count = self.neighbors(coords).filter(|&pos| self[pos].is_mine).count();
        // at most 8 neighbors
        count as u8
    }

    /// Reveals a cell and, when it has no adjacent mines, cascades through the connected zero region and its
    /// numbered border. Out-of-bounds, revealed, and flagged cells are left alone.
    ///
    /// The cascade uses an explicit stack, so board size never affects call depth. Returns the number of cells
    /// revealed by this call.
    pub fn reveal_cell(&mut self, coords: Coord2) -> CellCount {
        if !self.get(coords).is_some_and(Cell::is_revealable) {
            return 0;
        }

        let mut revealed = 0;
        let mut pending = vec![coords];
        while let Some(visit) = pending.pop() {
            let cell = &mut self.cells[visit.to_nd_index()];
            if !cell.is_revealable() {
                continue;
            }
            cell.is_revealed = true;
            revealed += 1;

            if cell.neighbor_mines == 0 && !cell.is_mine {
                log::trace!("flood fill continues from {:?}", visit);
                pending.extend(
                    self.neighbors(visit)
                        .filter(|&pos| self[pos].is_revealable()),
                );
            }
        }
        revealed
    }

    /// Reveals every mine, flagged or not. Returns how many were newly revealed.
    pub fn reveal_all_mines(&mut self) -> CellCount {
        let mut revealed = 0;
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine) {
            if !cell.is_revealed {
                cell.is_revealed = true;
                revealed += 1;
            }
        }
        revealed
    }

    /// Flips the flag on an unrevealed cell, returning the new flag state, or `None` when nothing changed.
    pub(crate) fn toggle_flag(&mut self, coords: Coord2) -> Option<bool> {
        let cell = self.cells.get_mut(coords.to_nd_index())?;
        if cell.is_revealed {
            return None;
        }
        cell.is_flagged = !cell.is_flagged;
        Some(cell.is_flagged)
    }

    /// True when every non-mine cell is revealed. Flags play no part.
    pub fn check_win(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_mine || cell.is_revealed)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use rand::prelude::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    fn random_board(seed: u64, size: Coord2, mines: CellCount) -> Board {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(size);
        board.place_mines(mines, &mut rng).unwrap();
        board.calculate_numbers();
        board
    }

    fn revealed_coords(board: &Board) -> Vec<Coord2> {
        board
            .iter_coords()
            .filter(|&pos| board[pos].is_revealed())
            .collect()
    }

    #[test]
    fn new_board_is_blank() {
        let board = Board::new((4, 7));

        assert_eq!(board.size(), (4, 7));
        assert_eq!(board.total_cells(), 28);
        assert_eq!(board.mine_count(), 0);
        assert!(board.iter_coords().all(|pos| board[pos] == Cell::default()));
    }

    #[test]
    fn beginner_placement_has_exact_mine_count() {
        let board = random_board(7, (9, 9), 10);
        let mines = board.iter_coords().filter(|&pos| board[pos].is_mine()).count();

        assert_eq!(mines, 10);
        assert_eq!(board.mine_count(), 10);
    }

    #[test]
    fn placement_is_exact_across_seeds_and_densities() {
        for seed in 0..32 {
            for &(size, mines) in &[((5, 5), 1), ((5, 5), 22), ((16, 30), 99), ((30, 30), 810)] {
                let board = random_board(seed, size, mines);
                let actual = board.iter_coords().filter(|&pos| board[pos].is_mine()).count();
                assert_eq!(actual, usize::from(mines), "seed {} size {:?}", seed, size);
            }
        }
    }

    #[test]
    fn placement_can_fill_whole_board() {
        let board = random_board(3, (2, 3), 6);
        assert_eq!(board.safe_cell_count(), 0);
    }

    #[test]
    fn placement_rejects_more_mines_than_cells() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut board = Board::new((2, 2));

        assert_eq!(board.place_mines(5, &mut rng), Err(GameError::TooManyMines));
        assert_eq!(board.mine_count(), 0);
    }

    #[test]
    fn numbers_match_literal_neighbor_counts() {
        for seed in 0..16 {
            let board = random_board(seed, (12, 9), 30);
            for pos in board.iter_coords().filter(|&pos| !board[pos].is_mine()) {
                let expected = board.neighbors(pos).filter(|&n| board[n].is_mine()).count();
                assert_eq!(usize::from(board[pos].neighbor_mines()), expected);
            }
        }
    }

    #[test]
    fn numbers_exclude_out_of_grid_neighbors() {
        let board = board((3, 3), &[(0, 0), (0, 2), (2, 0), (2, 2)]);

        assert_eq!(board[(1, 1)].neighbor_mines(), 4);
        assert_eq!(board[(0, 1)].neighbor_mines(), 2);
        assert_eq!(board[(1, 0)].neighbor_mines(), 2);
        assert_eq!(board[(0, 0)].neighbor_mines(), 0);
    }

    #[test]
    fn from_mine_coords_rejects_out_of_bounds() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn reveal_out_of_bounds_is_noop() {
        let mut board = board((3, 3), &[(1, 1)]);
        let before = board.clone();

        assert_eq!(board.reveal_cell((3, 0)), 0);
        assert_eq!(board.reveal_cell((0, 200)), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn reveal_numbered_cell_does_not_cascade() {
        let mut board = board((3, 3), &[(2, 2)]);

        assert_eq!(board.reveal_cell((1, 1)), 1);
        assert_eq!(revealed_coords(&board), [(1, 1)]);
    }

    #[test]
    fn flood_fill_reveals_zero_region_and_border() {
        // mine in the bottom right corner of a 4x4 board
        let mut board = board((4, 4), &[(3, 3)]);

        let revealed = board.reveal_cell((0, 0));

        assert_eq!(revealed, 15);
        assert!(!board[(3, 3)].is_revealed());
        assert!(board.check_win());
    }

    #[test]
    fn flood_fill_stops_at_flags() {
        let mut board = board((1, 5), &[]);
        board.toggle_flag((0, 2));

        assert_eq!(board.reveal_cell((0, 0)), 2);
        assert_eq!(revealed_coords(&board), [(0, 0), (0, 1)]);
        assert!(board[(0, 2)].is_flagged());
    }

    #[test]
    fn flagged_cell_is_not_revealed() {
        let mut board = board((2, 2), &[]);
        board.toggle_flag((0, 0));

        assert_eq!(board.reveal_cell((0, 0)), 0);
        assert!(!board[(0, 0)].is_revealed());
    }

    #[test]
    fn flood_fill_is_idempotent() {
        for seed in 0..16 {
            let mut once = random_board(seed, (16, 16), 40);
            let start = once
                .iter_coords()
                .find(|&pos| !once[pos].is_mine() && once[pos].neighbor_mines() == 0)
                .unwrap();
            once.reveal_cell(start);

            let mut twice = once.clone();
            assert_eq!(twice.reveal_cell(start), 0);
            assert_eq!(twice, once);
        }
    }

    #[test]
    fn flood_fill_never_reveals_mines_from_safe_origin() {
        for seed in 0..32 {
            let mut board = random_board(seed, (16, 30), 99);
            let origins: Vec<_> = board
                .iter_coords()
                .filter(|&pos| !board[pos].is_mine())
                .step_by(7)
                .collect();
            for origin in origins {
                board.reveal_cell(origin);
            }
            assert!(
                board
                    .iter_coords()
                    .all(|pos| !(board[pos].is_mine() && board[pos].is_revealed()))
            );
        }
    }

    #[test]
    fn large_open_board_reveals_in_one_call() {
        let mut board = board((30, 30), &[]);

        assert_eq!(board.reveal_cell((15, 15)), 900);
        assert!(board.check_win());
    }

    #[test]
    fn check_win_requires_every_safe_cell() {
        let mut board = board((1, 3), &[(0, 0)]);
        assert!(!board.check_win());

        board.reveal_cell((0, 1));
        assert!(!board.check_win());

        board.reveal_cell((0, 2));
        assert!(board.check_win());
    }

    #[test]
    fn check_win_ignores_flags() {
        let mut board = board((1, 2), &[(0, 0)]);
        board.toggle_flag((0, 0));
        assert!(!board.check_win());

        board.toggle_flag((0, 0));
        board.reveal_cell((0, 1));
        assert!(board.check_win());
    }

    #[test]
    fn reveal_all_mines_includes_flagged_mines() {
        let mut board = board((2, 2), &[(0, 0), (1, 1)]);
        board.toggle_flag((1, 1));

        assert_eq!(board.reveal_all_mines(), 2);
        assert!(board[(0, 0)].is_revealed());
        assert!(board[(1, 1)].is_revealed());
        assert!(!board[(0, 1)].is_revealed());
    }

    #[test]
    fn toggle_flag_skips_revealed_cells() {
        let mut board = board((1, 2), &[(0, 0)]);
        board.reveal_cell((0, 1));

        assert_eq!(board.toggle_flag((0, 1)), None);
        assert_eq!(board.toggle_flag((0, 0)), Some(true));
        assert_eq!(board.toggle_flag((0, 0)), Some(false));
        assert_eq!(board.toggle_flag((5, 5)), None);
    }
}
