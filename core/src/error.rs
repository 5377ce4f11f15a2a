use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, at least two cells must stay free")]
    TooManyMines,
    #[error("At least one mine is required")]
    NoMines,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Invalid cell value {0}")]
    InvalidCellValue(u8),
    #[error("Count at {0:?} does not match the surrounding mines")]
    InconsistentCount(Coord2),
}

pub type Result<T> = core::result::Result<T, GameError>;
