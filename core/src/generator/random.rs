use rand::rngs::SmallRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform generation: `mines + 1` distinct cells are drawn without replacement, the first one
/// becomes the reserved coordinate and the rest receive mines.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator<R = SmallRng> {
    rng: R,
}

impl<R: Rng> RandomBoardGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomBoardGenerator<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> BoardGenerator for RandomBoardGenerator<R> {
    fn generate(&mut self, config: GameConfig) -> Result<(Board, Coord2)> {
        check_mine_budget(config)?;

        let sample: Vec<CellCount> = index::sample(
            &mut self.rng,
            usize::from(config.total_cells()),
            usize::from(config.mines) + 1,
        )
        .into_iter()
        .map(|index| index as CellCount)
        .collect();
        log::trace!("Sampled cells {:?} for {:?}", sample, config);

        Board::from_sample(config.size, &sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_board_valid(board: &Board, reserved: Coord2, config: GameConfig) {
        assert_eq!(board.size(), config.size);
        assert_eq!(board.mine_count(), config.mines);
        assert_eq!(board.mine_coords().count(), usize::from(config.mines));
        assert!(!board.contains_mine(reserved));
        for coords in board.iter_coords() {
            if let CellValue::Count(count) = board[coords] {
                assert_eq!(count, board.adjacent_mine_count(coords));
            }
        }
    }

    #[test]
    fn generates_requested_mine_count() {
        let mut generator = RandomBoardGenerator::from_seed(7);

        for (size, mines) in [((9, 9), 10), ((16, 16), 40), ((30, 16), 99), ((3, 3), 7)] {
            let config = GameConfig::new_unchecked(size, mines);
            for _ in 0..20 {
                let (board, reserved) = generator.generate(config).unwrap();
                assert_board_valid(&board, reserved, config);
            }
        }
    }

    #[test]
    fn same_seed_same_board() {
        let config = GameConfig::default();

        let first = RandomBoardGenerator::from_seed(42).generate(config).unwrap();
        let second = RandomBoardGenerator::from_seed(42).generate(config).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn rejects_configs_without_room() {
        let mut generator = RandomBoardGenerator::from_seed(1);

        assert_eq!(
            generator.generate(GameConfig::new_unchecked((3, 3), 8)),
            Err(GameError::TooManyMines)
        );
        assert_eq!(
            generator.generate(GameConfig::new_unchecked((3, 3), 0)),
            Err(GameError::NoMines)
        );
    }
}
