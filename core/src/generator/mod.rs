use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy for arming a fresh grid on the first reveal.
pub trait MinefieldGenerator {
    /// Places up to `mines` mines on `grid`, never within one cell of `start`.
    ///
    /// Returns how many mines were actually placed.
    fn generate(&mut self, grid: &mut Grid, mines: CellCount, start: Coord2) -> CellCount;
}

impl<G: MinefieldGenerator + ?Sized> MinefieldGenerator for &mut G {
    fn generate(&mut self, grid: &mut Grid, mines: CellCount, start: Coord2) -> CellCount {
        (**self).generate(grid, mines, start)
    }
}
