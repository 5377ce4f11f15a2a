use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine placement and adjacency counts of a single game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    cells: Array2<CellValue>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct BoardRepr {
    cells: Array2<CellValue>,
    mine_count: CellCount,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        let board = Self::from_raw(repr.cells.map(|cell| cell.to_raw()))?;
        if board.cells != repr.cells || board.mine_count != repr.mine_count {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(board)
    }
}

impl Board {
    /// Builds a board from plain numbers, `cells[[x, y]]`, with [`MINE_VALUE`] marking mines.
    ///
    /// Every count must equal the number of mines around its cell.
    pub fn from_raw(values: Array2<u8>) -> Result<Self> {
        let (x, y) = values.dim();
        if x == 0 || y == 0 || Coord::try_from(x).is_err() || Coord::try_from(y).is_err() {
            return Err(GameError::InvalidBoardShape);
        }

        let cells = values
            .iter()
            .map(|&raw| CellValue::from_raw(raw))
            .collect::<Result<Vec<_>>>()?;
        let cells = Array2::from_shape_vec(values.raw_dim(), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;
        let mine_count = cells
            .iter()
            .filter(|cell| cell.is_mine())
            .count()
            .try_into()
            .map_err(|_| GameError::InvalidBoardShape)?;

        let board = Self { cells, mine_count };
        let miscounted = board.iter_coords().find(|&coords| match board[coords] {
            CellValue::Count(count) => count != board.adjacent_mine_count(coords),
            CellValue::Mine => false,
        });
        if let Some(coords) = miscounted {
            return Err(GameError::InconsistentCount(coords));
        }

        Ok(board)
    }

    /// Lays out a board from distinct row-major cell indices.
    ///
    /// The first index is kept free of mines and returned as the reserved coordinate, every other
    /// index receives a mine.
    pub fn from_sample(size: Coord2, sample: &[CellCount]) -> Result<(Self, Coord2)> {
        let total_cells = mult(size.0, size.1);
        if total_cells == 0 {
            return Err(GameError::InvalidBoardShape);
        }

        let Some((&reserved, mine_indices)) = sample.split_first() else {
            return Err(GameError::NoMines);
        };
        if mine_indices.is_empty() {
            return Err(GameError::NoMines);
        }
        if mine_indices.len() > usize::from(total_cells.saturating_sub(2)) {
            return Err(GameError::TooManyMines);
        }
        if reserved >= total_cells {
            return Err(GameError::InvalidBoardShape);
        }

        let mut cells: Array2<CellValue> = Array2::default(size.to_nd_index());
        for &index in mine_indices {
            if index >= total_cells || index == reserved {
                return Err(GameError::InvalidBoardShape);
            }
            let cell = &mut cells[coordinates_from_index(index, size.0).to_nd_index()];
            if cell.is_mine() {
                return Err(GameError::InvalidBoardShape);
            }
            *cell = CellValue::Mine;
        }

        let mut board = Self {
            cells,
            mine_count: mine_indices.len() as CellCount,
        };
        board.recount();

        Ok((board, coordinates_from_index(reserved, size.0)))
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.cells.dim();
        (x as Coord, y as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn cells(&self) -> &Array2<CellValue> {
        &self.cells
    }

    pub fn to_raw(&self) -> Array2<u8> {
        self.cells.map(|cell| cell.to_raw())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.size())
            .into_iter()
            .filter(|&pos| self.contains_mine(pos))
            .count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (x_end, y_end) = self.size();
        (0..x_end).flat_map(move |x| (0..y_end).map(move |y| (x, y)))
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_coords().filter(|&coords| self.contains_mine(coords))
    }

    /// Moves the mine at `from` onto the free cell `to`, patching every count either move touches.
    ///
    /// Returns `false` and leaves the board alone when `from` holds no mine or `to` already does.
    pub fn relocate_mine(&mut self, from: Coord2, to: Coord2) -> bool {
        if !self.contains_mine(from) || self.contains_mine(to) {
            return false;
        }

        self[to] = CellValue::Mine;
        for pos in self.iter_neighbors(to) {
            if let CellValue::Count(count) = &mut self[pos] {
                *count += 1;
            }
        }

        let mut own_count = 0;
        self[from] = CellValue::Count(0);
        for pos in self.iter_neighbors(from) {
            match &mut self[pos] {
                CellValue::Mine => own_count += 1,
                CellValue::Count(count) => *count = count.saturating_sub(1),
            }
        }
        self[from] = CellValue::Count(own_count);

        log::debug!("Moved mine from {:?} to {:?}", from, to);
        true
    }

    fn recount(&mut self) {
        for coords in self.iter_coords() {
            if !self.contains_mine(coords) {
                self[coords] = CellValue::Count(self.adjacent_mine_count(coords));
            }
        }
    }
}

impl Index<Coord2> for Board {
    type Output = CellValue;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn assert_counts_consistent(board: &Board) {
        for coords in board.iter_coords() {
            if let CellValue::Count(count) = board[coords] {
                assert_eq!(
                    count,
                    board.adjacent_mine_count(coords),
                    "wrong count at {coords:?}"
                );
            }
        }
    }

    #[test]
    fn from_sample_reserves_first_index() {
        let (board, reserved) = Board::from_sample((3, 4), &[8, 5, 4, 7, 1, 9]).unwrap();

        assert_eq!(
            board.to_raw(),
            array![[2u8, 3, 3, 9], [9, 9, 9, 2], [3, 9, 3, 1]]
        );
        assert_eq!(reserved, (2, 2));
        assert_eq!(board.mine_count(), 5);
        assert!(!board.contains_mine(reserved));
    }

    #[test]
    fn from_sample_rejects_bad_samples() {
        assert_eq!(
            Board::from_sample((3, 3), &[0]).unwrap_err(),
            GameError::NoMines
        );
        assert_eq!(
            Board::from_sample((3, 3), &[0, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap_err(),
            GameError::TooManyMines
        );
        assert_eq!(
            Board::from_sample((3, 3), &[0, 1, 1]).unwrap_err(),
            GameError::InvalidBoardShape
        );
        assert_eq!(
            Board::from_sample((3, 3), &[0, 9]).unwrap_err(),
            GameError::InvalidBoardShape
        );
        assert_eq!(
            Board::from_sample((3, 3), &[4, 4]).unwrap_err(),
            GameError::InvalidBoardShape
        );
    }

    #[test]
    fn from_raw_counts_mines() {
        let board = Board::from_raw(array![[1, 9, 1], [2, 2, 1], [9, 1, 0]]).unwrap();

        assert_eq!(board.size(), (3, 3));
        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.safe_cell_count(), 7);
        assert_eq!(board[(0, 1)], CellValue::Mine);
        assert_eq!(board[(1, 0)], CellValue::Count(2));
        assert_eq!(board.mine_coords().collect::<Vec<_>>(), vec![(0, 1), (2, 0)]);
        assert_counts_consistent(&board);
    }

    #[test]
    fn from_raw_rejects_unknown_values() {
        assert_eq!(
            Board::from_raw(array![[1, 10], [0, 0]]).unwrap_err(),
            GameError::InvalidCellValue(10)
        );
    }

    #[test]
    fn from_raw_rejects_wrong_counts() {
        assert_eq!(
            Board::from_raw(array![[9, 8, 8], [8, 8, 8], [8, 8, 0]]).unwrap_err(),
            GameError::InconsistentCount((0, 1))
        );
        assert_eq!(
            Board::from_raw(array![[1, 9, 1], [2, 2, 1], [9, 1, 1]]).unwrap_err(),
            GameError::InconsistentCount((2, 2))
        );
    }

    #[test]
    fn deserialize_checks_cells() {
        let board = Board::from_raw(array![[1, 9, 1], [2, 2, 1], [9, 1, 0]]).unwrap();
        let value = serde_json::to_value(&board).unwrap();
        assert_eq!(serde_json::from_value::<Board>(value.clone()).unwrap(), board);

        let mut wrong_total = value.clone();
        wrong_total["mine_count"] = serde_json::json!(3);
        assert!(serde_json::from_value::<Board>(wrong_total).is_err());

        let mut wrong_count = value;
        wrong_count["cells"]["data"][4] = serde_json::json!({ "Count": 5 });
        assert!(serde_json::from_value::<Board>(wrong_count).is_err());
    }

    #[test]
    fn relocate_mine_patches_counts() {
        let mut board = Board::from_raw(array![[1, 9, 1], [2, 2, 1], [9, 1, 0]]).unwrap();

        assert!(board.relocate_mine((0, 1), (2, 2)));

        assert_eq!(board.mine_count(), 2);
        assert!(!board.contains_mine((0, 1)));
        assert!(board.contains_mine((2, 2)));
        assert_eq!(board[(0, 1)], CellValue::Count(0));
        assert_counts_consistent(&board);
    }

    #[test]
    fn relocate_mine_to_adjacent_cell() {
        let (mut board, reserved) = Board::from_sample((4, 4), &[5, 6, 15]).unwrap();
        assert_eq!(reserved, (1, 1));

        assert!(board.relocate_mine((2, 1), reserved));

        assert_eq!(board[(2, 1)], CellValue::Count(1));
        assert_counts_consistent(&board);
    }

    #[test]
    fn relocate_mine_requires_mine_and_free_target() {
        let mut board = Board::from_raw(array![[1, 9, 1], [2, 2, 1], [9, 1, 0]]).unwrap();
        let before = board.clone();

        assert!(!board.relocate_mine((0, 0), (2, 2)));
        assert!(!board.relocate_mine((0, 1), (2, 0)));
        assert_eq!(board, before);
    }
}
