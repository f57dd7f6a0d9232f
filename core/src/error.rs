use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the board")]
    InvalidCoordinate,
    #[error("Board needs at least one row and one column")]
    InvalidBoardShape,
    #[error("Too many mines to keep the first reveal clear")]
    TooManyMines,
    #[error("Unknown difficulty, expected easy, medium or hard")]
    UnknownDifficulty,
    #[error("Saved game does not match its board")]
    InconsistentState,
}

pub type Result<T> = core::result::Result<T, GameError>;
