use hashbrown::HashSet;
use ndarray::Array2;

use crate::*;

/// Player-visible state of every cell, indexed like the board.
pub type Positions = Array2<CellPosition>;

/// Opens `origin` and flood-fills through connected blank cells.
///
/// Every visited cell ends up `Opened`; only blank cells pass the fill on to their neighbors.
/// Flagged cells are neither opened nor expanded through. An `origin` that is already opened or
/// flagged yields an unchanged copy of `positions`.
pub fn reveal(origin: Coord2, board: &Board, positions: &Positions) -> Positions {
    let mut revealed = positions.clone();
    if positions[origin.to_nd_index()].is_settled() {
        return revealed;
    }

    let mut visited = HashSet::new();
    visited.insert(origin);
    let mut to_visit = vec![origin];

    while let Some(coords) = to_visit.pop() {
        revealed[coords.to_nd_index()] = CellPosition::Opened;

        if !board[coords].is_blank() {
            continue;
        }

        for pos in board.iter_neighbors(coords) {
            if positions[pos.to_nd_index()] == CellPosition::Flagged {
                log::trace!("Flood fill skips flag at {:?}", pos);
                continue;
            }
            if visited.insert(pos) {
                to_visit.push(pos);
            }
        }
    }

    log::trace!("Flood fill from {:?} opened {} cells", origin, visited.len());
    revealed
}
