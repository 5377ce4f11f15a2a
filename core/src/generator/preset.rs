use super::*;

/// Replays one fixed sample on every game, the first index being the reserved coordinate.
///
/// Useful for reproducing a reported game or scripting a scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetBoardGenerator {
    sample: Vec<CellCount>,
}

impl PresetBoardGenerator {
    pub fn new(sample: Vec<CellCount>) -> Self {
        Self { sample }
    }
}

impl BoardGenerator for PresetBoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<(Board, Coord2)> {
        check_mine_budget(config)?;
        if self.sample.len() != usize::from(config.mines) + 1 {
            return Err(GameError::InvalidBoardShape);
        }
        Board::from_sample(config.size, &self.sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_the_same_layout() {
        let mut generator = PresetBoardGenerator::new(vec![8, 5, 4, 7, 1, 9]);
        let config = GameConfig::new_unchecked((3, 4), 5);

        let (first, reserved) = generator.generate(config).unwrap();
        let (second, _) = generator.generate(config).unwrap();

        assert_eq!(first, second);
        assert_eq!(reserved, (2, 2));
    }

    #[test]
    fn rejects_mismatched_mine_count() {
        let mut generator = PresetBoardGenerator::new(vec![0, 1]);

        assert_eq!(
            generator.generate(GameConfig::new_unchecked((3, 3), 2)),
            Err(GameError::InvalidBoardShape)
        );
    }
}
