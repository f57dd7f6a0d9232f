use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use time::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod time;
mod types;

/// Cells around (and including) the first reveal that never hold a mine.
pub const START_ZONE_CELLS: CellCount = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Validated board, mines must fit outside the start zone wherever the first reveal lands.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        let config = Self::new_unchecked(rows, cols, mines);
        if mines > config.max_mines() {
            return Err(GameError::TooManyMines);
        }
        Ok(config)
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub const fn max_mines(&self) -> CellCount {
        self.total_cells().saturating_sub(START_ZONE_CELLS)
    }
}

impl From<Difficulty> for BoardConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> BoardConfig {
        match self {
            Self::Easy => BoardConfig::new_unchecked(9, 9, 10),
            Self::Medium => BoardConfig::new_unchecked(16, 16, 40),
            Self::Hard => BoardConfig::new_unchecked(16, 30, 99),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.label().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_table() {
        assert_eq!(Difficulty::Easy.config(), BoardConfig::new_unchecked(9, 9, 10));
        assert_eq!(Difficulty::Medium.config(), BoardConfig::new_unchecked(16, 16, 40));
        assert_eq!(Difficulty::Hard.config(), BoardConfig::new_unchecked(16, 30, 99));
    }

    #[test]
    fn presets_pass_validation() {
        for difficulty in Difficulty::ALL {
            let BoardConfig { rows, cols, mines } = difficulty.config();
            assert_eq!(BoardConfig::new(rows, cols, mines), Ok(difficulty.config()));
        }
    }

    #[test]
    fn validation_rejects_bad_boards() {
        assert_eq!(BoardConfig::new(0, 9, 1), Err(GameError::InvalidBoardShape));
        assert_eq!(BoardConfig::new(9, 0, 1), Err(GameError::InvalidBoardShape));
        assert_eq!(BoardConfig::new(9, 9, 73), Err(GameError::TooManyMines));
        assert_eq!(BoardConfig::new(2, 2, 1), Err(GameError::TooManyMines));
        assert!(BoardConfig::new(9, 9, 72).is_ok());
        assert!(BoardConfig::new(2, 2, 0).is_ok());
    }

    #[test]
    fn safe_cells_exclude_mines() {
        assert_eq!(Difficulty::Hard.config().safe_cell_count(), 480 - 99);
        assert_eq!(Difficulty::Easy.config().max_mines(), 72);
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("easy".parse(), Ok(Difficulty::Easy));
        assert_eq!(" Medium ".parse(), Ok(Difficulty::Medium));
        assert_eq!("HARD".parse(), Ok(Difficulty::Hard));
        assert_eq!("expert".parse::<Difficulty>(), Err(GameError::UnknownDifficulty));
    }

    #[test]
    fn difficulty_round_trips_through_label() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse(), Ok(difficulty));
        }
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Difficulty::Medium).unwrap(), "\"medium\"");
        assert_eq!(
            serde_json::from_str::<Difficulty>("\"hard\"").unwrap(),
            Difficulty::Hard
        );
    }
}
