use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use clock::*;
pub use error::*;
pub use generator::*;
pub use reducer::*;
pub use reveal::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod board;
mod cell;
mod clock;
mod error;
mod generator;
mod reducer;
mod reveal;
mod session;
mod types;
mod view;

pub const DEFAULT_WIDTH: Coord = 9;
pub const DEFAULT_HEIGHT: Coord = 9;
pub const DEFAULT_MINES: CellCount = 10;

pub const MIN_LINEAR_SIZE: Coord = 3;
pub const MAX_LINEAR_SIZE: Coord = 100;
pub const MIN_MINES: CellCount = 1;
pub const MAX_MINES: CellCount = 999;

/// Board dimensions and mine count of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps raw player input: each side into `3..=100`, mines into `1..=999` and then to at
    /// most `width * height - 2`.
    pub fn new(width: i64, height: i64, mines: i64) -> Self {
        let size_x = clamp_linear(width);
        let size_y = clamp_linear(height);
        let max_mines = mult(size_x, size_y).saturating_sub(2).min(MAX_MINES);
        let clamped_mines = mines.clamp(i64::from(MIN_MINES), i64::from(max_mines)) as CellCount;

        if i64::from(clamped_mines) != mines {
            log::warn!("Mine count {} clamped to {}", mines, clamped_mines);
        }

        Self::new_unchecked((size_x, size_y), clamped_mines)
    }

    /// Same as [`GameConfig::new`] for text input, values are rounded to the nearest integer.
    ///
    /// A side that is not a number falls back to 9, a mine count that is not a number to 10.
    /// Infinities count as numbers and clamp to the nearest bound.
    pub fn parse(width: &str, height: &str, mines: &str) -> Self {
        let width = parse_rounded(width).unwrap_or_else(|| {
            log::warn!("Width {:?} is not a number, using {}", width, DEFAULT_WIDTH);
            DEFAULT_WIDTH.into()
        });
        let height = parse_rounded(height).unwrap_or_else(|| {
            log::warn!("Height {:?} is not a number, using {}", height, DEFAULT_HEIGHT);
            DEFAULT_HEIGHT.into()
        });
        let mines = parse_rounded(mines).unwrap_or_else(|| {
            log::warn!("Mine count {:?} is not a number, using {}", mines, DEFAULT_MINES);
            DEFAULT_MINES.into()
        });
        Self::new(width, height, mines)
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((DEFAULT_WIDTH, DEFAULT_HEIGHT), DEFAULT_MINES)
    }
}

fn clamp_linear(input: i64) -> Coord {
    let clamped = input.clamp(MIN_LINEAR_SIZE.into(), MAX_LINEAR_SIZE.into()) as Coord;
    if i64::from(clamped) != input {
        log::warn!("Board side {} clamped to {}", input, clamped);
    }
    clamped
}

fn parse_rounded(input: &str) -> Option<i64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| !value.is_nan())
        .map(|value| value.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_sides() {
        assert_eq!(GameConfig::new(1, 250, 10).size, (3, 100));
        assert_eq!(GameConfig::new(-4, 0, 1).size, (3, 3));
        assert_eq!(GameConfig::new(16, 30, 99).size, (16, 30));
    }

    #[test]
    fn new_clamps_mines_to_free_cells() {
        assert_eq!(GameConfig::new(3, 3, 50).mines, 7);
        assert_eq!(GameConfig::new(9, 9, 0).mines, 1);
        assert_eq!(GameConfig::new(9, 9, -3).mines, 1);
        assert_eq!(GameConfig::new(100, 100, 5000).mines, 999);
        assert_eq!(GameConfig::new(9, 9, 79).mines, 79);
        assert_eq!(GameConfig::new(9, 9, 80).mines, 79);
    }

    #[test]
    fn parse_rounds_and_falls_back() {
        assert_eq!(
            GameConfig::parse("16.4", "15.6", "40"),
            GameConfig::new_unchecked((16, 16), 40)
        );
        assert_eq!(
            GameConfig::parse("wide", "", "lots"),
            GameConfig::new_unchecked((9, 9), 10)
        );
        assert_eq!(
            GameConfig::parse(" 4 ", "4", "NaN"),
            GameConfig::new_unchecked((4, 4), 10)
        );
        assert_eq!(
            GameConfig::parse("3", "3", "inf"),
            GameConfig::new_unchecked((3, 3), 7)
        );
    }

    #[test]
    fn parse_clamps_infinities() {
        assert_eq!(
            GameConfig::parse("Infinity", "-Infinity", "Infinity"),
            GameConfig::new_unchecked((100, 3), 298)
        );
        assert_eq!(
            GameConfig::parse("20", "inf", "-inf"),
            GameConfig::new_unchecked((20, 100), 1)
        );
    }

    #[test]
    fn default_is_beginner() {
        let config = GameConfig::default();

        assert_eq!((config.width(), config.height()), (9, 9));
        assert_eq!(config.mines, 10);
        assert_eq!(config.total_cells(), 81);
    }
}
