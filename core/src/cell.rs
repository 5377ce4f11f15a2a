use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Raw value used for mines when a board is written as plain numbers.
pub const MINE_VALUE: u8 = 9;

/// What a board cell holds: a mine, or the number of mines around it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    Count(u8),
}

impl CellValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_blank(self) -> bool {
        matches!(self, Self::Count(0))
    }

    pub fn from_raw(raw: u8) -> Result<Self> {
        match raw {
            MINE_VALUE => Ok(Self::Mine),
            count if count < MINE_VALUE => Ok(Self::Count(count)),
            other => Err(GameError::InvalidCellValue(other)),
        }
    }

    pub const fn to_raw(self) -> u8 {
        match self {
            Self::Mine => MINE_VALUE,
            Self::Count(count) => count,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Player-visible state of a cell, parallel to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellPosition {
    Closed,
    /// Held down by a click that has not been released yet.
    Pressed,
    Flagged,
    Opened,
}

impl CellPosition {
    /// Whether open and press commands leave this cell alone.
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Opened | Self::Flagged)
    }
}

impl Default for CellPosition {
    fn default() -> Self {
        Self::Closed
    }
}
