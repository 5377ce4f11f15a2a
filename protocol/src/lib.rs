//! JSON messages exchanged between a UI and the game engine.
//!
//! The UI sends [`Command`]s and renders from [`Snapshot`]s; it never needs to look at the board
//! itself.

use sapper_core::{
    BoardGenerator, CellCount, CellView, Clock, Command, Coord, Face, GameError, GameState,
    GameStatus, Millis, Session, counter_digits,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Command rejected: {0}")]
    Rejected(#[from] GameError),
}

pub type Result<T> = core::result::Result<T, ProtocolError>;

/// Everything needed to draw the game at one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: Coord,
    pub height: Coord,
    pub status: GameStatus,
    pub mines_left: CellCount,
    pub mines_left_digits: [u8; 3],
    pub elapsed_secs: u64,
    pub elapsed_digits: [u8; 3],
    pub face: Face,
    /// Column-major, `cells[x][y]`.
    pub cells: Vec<Vec<CellView>>,
}

impl Snapshot {
    pub fn from_state(state: &GameState, now: Millis) -> Self {
        let elapsed_secs = state.elapsed_secs(now);
        let cells = (0..state.width())
            .map(|x| {
                (0..state.height())
                    .map(|y| state.cell_view((x, y)))
                    .collect::<Vec<_>>()
            })
            .collect();

        Self {
            width: state.width(),
            height: state.height(),
            status: state.status(),
            mines_left: state.mines_left(),
            mines_left_digits: counter_digits(state.mines_left().into()),
            elapsed_secs,
            elapsed_digits: counter_digits(elapsed_secs),
            face: state.face(),
            cells,
        }
    }
}

pub fn decode_command(input: &str) -> Result<Command> {
    Ok(serde_json::from_str(input)?)
}

pub fn encode_command(command: &Command) -> Result<String> {
    Ok(serde_json::to_string(command)?)
}

pub fn decode_snapshot(input: &str) -> Result<Snapshot> {
    Ok(serde_json::from_str(input)?)
}

pub fn encode_snapshot(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Decodes one command, applies it to `session` and answers with the resulting snapshot.
pub fn handle_message<G: BoardGenerator, C: Clock>(
    session: &mut Session<G, C>,
    input: &str,
) -> Result<String> {
    let command = decode_command(input)?;
    log::trace!("Received {:?}", command);
    session.dispatch(command)?;
    let now = session.reducer().clock().now_millis();
    encode_snapshot(&Snapshot::from_state(session.state(), now))
}
