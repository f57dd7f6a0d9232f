use super::*;

/// Places a known layout, for puzzles and replays.
///
/// Entries inside the start zone or off the board are skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMinefieldGenerator {
    mines: Vec<Coord2>,
}

impl FixedMinefieldGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(&mut self, grid: &mut Grid, mines: CellCount, start: Coord2) -> CellCount {
        let mut placed = 0;
        for &coords in &self.mines {
            if placed >= mines {
                break;
            }
            if !grid.contains(coords) || within_one(coords, start) {
                log::warn!("Skipping fixed mine at {:?}, start at {:?}", coords, start);
                continue;
            }
            if grid.place_mine(coords) {
                placed += 1;
            }
        }
        placed
    }
}
