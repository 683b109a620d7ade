use ndarray::Array2;

/// Single axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Grid position as `(row, col)`, also used for board size as `(rows, cols)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub(crate) fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (rows, cols) = grid.dim();
    (
        rows.try_into().unwrap_or(Coord::MAX),
        cols.try_into().unwrap_or(Coord::MAX),
    )
}

/// Row-major iterator over every position of a `(rows, cols)` grid.
pub fn iter_coords((rows, cols): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
}

/// Moore neighborhood offsets, row-major, skipping the center.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Iterator over the in-bounds Moore neighbors of a cell. Positions outside the grid are skipped, never
/// wrapped around.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    size: Coord2,
    next: usize,
}

impl Neighbors {
    pub fn new(center: Coord2, size: Coord2) -> Self {
        Self {
            center,
            size,
            next: 0,
        }
    }

    fn shift((row, col): Coord2, (d_row, d_col): (i8, i8), (rows, cols): Coord2) -> Option<Coord2> {
        let row = row.checked_add_signed(d_row).filter(|&row| row < rows)?;
        let col = col.checked_add_signed(d_col).filter(|&col| col < cols)?;
        Some((row, col))
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = OFFSETS.get(self.next) {
            self.next += 1;
            if let Some(pos) = Self::shift(self.center, offset, self.size) {
                return Some(pos);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let found: Vec<_> = Neighbors::new((0, 0), (3, 3)).collect();
        assert_eq!(found, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(Neighbors::new((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn neighbors_do_not_wrap_on_far_edge() {
        let found: Vec<_> = Neighbors::new((2, 4), (3, 5)).collect();
        assert_eq!(found, [(1, 3), (1, 4), (2, 3)]);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert_eq!(Neighbors::new((0, 0), (1, 1)).next(), None);
    }

    #[test]
    fn iter_coords_is_row_major() {
        let found: Vec<_> = iter_coords((2, 2)).collect();
        assert_eq!(found, [(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
