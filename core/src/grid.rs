use core::ops::{Index, IndexMut};
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular matrix of cells indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new(rows: Coord, cols: Coord) -> Self {
        Self {
            cells: Array2::default((rows, cols).to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoordinate)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// All cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    /// Cells as a row-major `Vec` of rows, matching `grid[row][col]`.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_mine)
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_revealed && !cell.is_mine)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_flagged)
    }

    fn count_where(&self, f: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells.iter().filter(|&cell| f(cell)).count() as CellCount
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_flagged)
            .count() as u8
    }

    /// Marks a mine, returns `false` when the cell already held one.
    pub fn place_mine(&mut self, coords: Coord2) -> bool {
        let cell = &mut self[coords];
        if cell.is_mine {
            false
        } else {
            cell.is_mine = true;
            true
        }
    }

    /// Randomly places `mines` mines outside the 3x3 zone around `exclude`.
    ///
    /// Returns how many were placed, which is less than requested only when the board cannot fit them.
    pub fn place_mines<R: Rng + ?Sized>(
        &mut self,
        mines: CellCount,
        exclude: Coord2,
        rng: &mut R,
    ) -> CellCount {
        let free_cells = self
            .iter()
            .filter(|&(pos, cell)| !cell.is_mine && !within_one(pos, exclude))
            .count() as CellCount;
        let target = if mines > free_cells {
            log::warn!(
                "Cannot fit {} mines outside the start zone, placing {}",
                mines,
                free_cells
            );
            free_cells
        } else {
            mines
        };

        let (rows, cols) = self.size();
        let mut placed = 0;
        while placed < target {
            let coords = (rng.gen_range(0..rows), rng.gen_range(0..cols));
            if within_one(coords, exclude) {
                continue;
            }
            if self.place_mine(coords) {
                placed += 1;
            }
        }
        placed
    }

    /// Stores the 8-neighborhood mine count on every non-mine cell.
    pub fn calculate_adjacent_mines(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self[coords].is_mine {
                    continue;
                }
                let count = self
                    .iter_neighbors(coords)
                    .filter(|&pos| self[pos].is_mine)
                    .count() as u8;
                self[coords].adjacent_mines = count;
            }
        }
    }
}

impl NeighborIterExt for Grid {
    fn board_size(&self) -> Coord2 {
        self.size()
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn with_mines(size: Coord2, mines: &[Coord2]) -> Grid {
        let mut grid = Grid::new(size.0, size.1);
        for &coords in mines {
            grid.place_mine(coords);
        }
        grid.calculate_adjacent_mines();
        grid
    }

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(16, 30);

        assert_eq!(grid.size(), (16, 30));
        assert_eq!(grid.total_cells(), 480);
        assert!(grid.iter().all(|(_, cell)| *cell == Cell::default()));
        assert_eq!(grid.to_rows().len(), 16);
        assert!(grid.to_rows().iter().all(|row| row.len() == 30));
    }

    #[test]
    fn validate_coords_rejects_out_of_bounds() {
        let grid = Grid::new(9, 9);

        assert_eq!(grid.validate_coords((8, 8)), Ok((8, 8)));
        assert_eq!(grid.validate_coords((9, 0)), Err(GameError::InvalidCoordinate));
        assert_eq!(grid.validate_coords((0, 9)), Err(GameError::InvalidCoordinate));
        assert!(grid.get((9, 9)).is_none());
    }

    #[test]
    fn adjacent_counts_cover_neighborhood() {
        let grid = with_mines((3, 4), &[(0, 0), (1, 1)]);

        assert_eq!(grid[(0, 1)].adjacent_mines, 2);
        assert_eq!(grid[(1, 0)].adjacent_mines, 2);
        assert_eq!(grid[(0, 2)].adjacent_mines, 1);
        assert_eq!(grid[(2, 2)].adjacent_mines, 1);
        assert_eq!(grid[(2, 3)].adjacent_mines, 0);
        assert_eq!(grid[(0, 0)].adjacent_mines, 0);
        assert_eq!(grid[(1, 1)].adjacent_mines, 0);
    }

    #[test]
    fn place_mine_reports_duplicates() {
        let mut grid = Grid::new(2, 2);

        assert!(grid.place_mine((1, 1)));
        assert!(!grid.place_mine((1, 1)));
        assert_eq!(grid.mine_count(), 1);
    }

    #[test]
    fn place_mines_avoids_exclusion_zone() {
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut grid = Grid::new(9, 9);
            let exclude = ((seed % 9) as Coord, (seed / 9 % 9) as Coord);

            let placed = grid.place_mines(10, exclude, &mut rng);

            assert_eq!(placed, 10);
            assert_eq!(grid.mine_count(), 10);
            for (pos, cell) in grid.iter() {
                if within_one(pos, exclude) {
                    assert!(!cell.is_mine, "mine at {pos:?} next to {exclude:?}");
                }
            }
        }
    }

    #[test]
    fn place_mines_caps_at_free_cells() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut grid = Grid::new(3, 4);

        let placed = grid.place_mines(10, (1, 1), &mut rng);

        assert_eq!(placed, 3);
        assert_eq!(grid.mine_count(), 3);
        assert!(grid[(0, 3)].is_mine && grid[(1, 3)].is_mine && grid[(2, 3)].is_mine);
    }

    #[test]
    fn neighbors_stay_on_board() {
        let grid = Grid::new(2, 3);

        let corner: Vec<_> = grid.iter_neighbors((1, 2)).collect();
        assert_eq!(corner, vec![(0, 1), (0, 2), (1, 1)]);
        assert_eq!(grid.iter_neighbors((0, 1)).count(), 5);
    }

    #[test]
    fn count_flagged_neighbors_ignores_center() {
        let mut grid = Grid::new(3, 3);
        grid[(1, 1)].is_flagged = true;
        grid[(0, 0)].is_flagged = true;
        grid[(2, 1)].is_flagged = true;

        assert_eq!(grid.count_flagged_neighbors((1, 1)), 2);
        assert_eq!(grid.count_flagged_neighbors((0, 1)), 2);
        assert_eq!(grid.flagged_count(), 3);
    }
}
