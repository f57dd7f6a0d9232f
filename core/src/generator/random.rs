use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Uniformly random placement that keeps the 3x3 start zone clear.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl Default for RandomMinefieldGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, grid: &mut Grid, mines: CellCount, start: Coord2) -> CellCount {
        let placed = grid.place_mines(mines, start, &mut self.rng);

        // double check mine count
        let count = grid.mine_count();
        if count != placed {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, placed: {}",
                count,
                placed
            );
        }
        placed
    }
}
