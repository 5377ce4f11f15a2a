use serde::{Deserialize, Serialize};

use crate::*;

/// What a single cell should look like.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Closed,
    Pressed,
    Flagged,
    /// The mine that ended the game.
    Hit,
    Mine,
    Open(u8),
}

/// Expression of the head button above the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    Smile,
    Pressed,
    Surprised,
    Won,
    Lost,
}

impl GameState {
    pub fn cell_view(&self, coords: Coord2) -> CellView {
        match self.position_at(coords) {
            CellPosition::Closed => CellView::Closed,
            CellPosition::Pressed => CellView::Pressed,
            CellPosition::Flagged => CellView::Flagged,
            CellPosition::Opened => match self.board()[coords] {
                CellValue::Mine if self.last_click() == Some(coords) => CellView::Hit,
                CellValue::Mine => CellView::Mine,
                CellValue::Count(count) => CellView::Open(count),
            },
        }
    }

    pub fn face(&self) -> Face {
        if self.is_head_pressed() {
            return Face::Pressed;
        }
        match self.status() {
            GameStatus::Lost => Face::Lost,
            GameStatus::Won => Face::Won,
            _ if self.is_move_in_progress() => Face::Surprised,
            _ => Face::Smile,
        }
    }
}

/// Three decimal digits of `value` for the counter displays, clamped into `0..=999`.
pub fn counter_digits(value: u64) -> [u8; 3] {
    let value = value.min(999);
    [
        (value / 100) as u8,
        (value / 10 % 10) as u8,
        (value % 10) as u8,
    ]
}
