use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Source of fresh boards for new games and resets.
///
/// Returns the board together with its reserved coordinate, a cell guaranteed to be free of mines
/// that the first click may later move a mine onto.
pub trait BoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<(Board, Coord2)>;
}

/// Checks that `config` leaves room for the first click and the reserved cell.
pub(crate) fn check_mine_budget(config: GameConfig) -> Result<()> {
    if config.mines == 0 {
        return Err(GameError::NoMines);
    }
    let budget = config.total_cells().saturating_sub(2);
    if config.mines > budget {
        log::warn!(
            "Requested {} mines but only {} fit next to the reserved cells",
            config.mines,
            budget
        );
        return Err(GameError::TooManyMines);
    }
    Ok(())
}
