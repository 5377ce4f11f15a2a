use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - NotStarted -> Won
/// - NotStarted -> Lost (only when a flag was toggled before the first open)
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// New games and resets always begin in `NotStarted`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Everything a UI can ask the engine to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    /// Button went down over a cell.
    PressStart(Coord2),
    /// Button released over the pressed cell, opens it.
    OpenFinish(Coord2),
    /// Pointer left a pressed cell without releasing.
    PressCancel(Coord2),
    /// Toggles a flag.
    RightClick(Coord2),
    PressHead,
    UnpressHead,
    /// New board with the current dimensions and mine count.
    Reset,
    /// New board from raw player input, clamped into the supported range.
    StartGame { width: i64, height: i64, mines: i64 },
}

/// Complete state of one game.
///
/// Transitions never mutate a state, each one returns a new value. A command that does not apply
/// returns a value equal to its input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GameStateRepr")]
pub struct GameState {
    config: GameConfig,
    mines_left: CellCount,
    status: GameStatus,
    last_click: Option<Coord2>,
    move_in_progress: bool,
    head_pressed: bool,
    reserved: Coord2,
    board: Board,
    positions: Positions,
    started_at: Option<Millis>,
    ended_at: Option<Millis>,
}

#[derive(Deserialize)]
struct GameStateRepr {
    config: GameConfig,
    mines_left: CellCount,
    status: GameStatus,
    last_click: Option<Coord2>,
    move_in_progress: bool,
    head_pressed: bool,
    reserved: Coord2,
    board: Board,
    positions: Positions,
    started_at: Option<Millis>,
    ended_at: Option<Millis>,
}

impl TryFrom<GameStateRepr> for GameState {
    type Error = GameError;

    /// Positions must cover exactly the board, and every stored coordinate must lie on it.
    fn try_from(repr: GameStateRepr) -> Result<Self> {
        let board = repr.board;
        if board.size() != repr.config.size
            || board.mine_count() != repr.config.mines
            || repr.positions.dim() != board.cells().dim()
            || repr.mines_left > repr.config.mines
        {
            return Err(GameError::InvalidBoardShape);
        }
        board.validate_coords(repr.reserved)?;
        if let Some(last_click) = repr.last_click {
            board.validate_coords(last_click)?;
        }

        Ok(Self {
            config: repr.config,
            mines_left: repr.mines_left,
            status: repr.status,
            last_click: repr.last_click,
            move_in_progress: repr.move_in_progress,
            head_pressed: repr.head_pressed,
            reserved: repr.reserved,
            board,
            positions: repr.positions,
            started_at: repr.started_at,
            ended_at: repr.ended_at,
        })
    }
}

impl GameState {
    /// Fresh, untouched game over a generated board.
    pub fn new(config: GameConfig, (board, reserved): (Board, Coord2)) -> Result<Self> {
        if board.size() != config.size || board.mine_count() != config.mines {
            return Err(GameError::InvalidBoardShape);
        }
        let reserved = board.validate_coords(reserved)?;
        if board.contains_mine(reserved) {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(Self {
            config,
            mines_left: config.mines,
            status: GameStatus::NotStarted,
            last_click: None,
            move_in_progress: false,
            head_pressed: false,
            reserved,
            positions: Array2::default(config.size.to_nd_index()),
            board,
            started_at: None,
            ended_at: None,
        })
    }

    /// Fresh game over a hand-made board, dimensions and mine count are taken from the board.
    pub fn from_board(board: Board, reserved: Coord2) -> Result<Self> {
        let config = GameConfig::new_unchecked(board.size(), board.mine_count());
        Self::new(config, (board, reserved))
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn width(&self) -> Coord {
        self.config.width()
    }

    pub fn height(&self) -> Coord {
        self.config.height()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    /// Mines minus placed flags, a display counter that trusts every flag.
    pub fn mines_left(&self) -> CellCount {
        self.mines_left
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn last_click(&self) -> Option<Coord2> {
        self.last_click
    }

    pub fn is_move_in_progress(&self) -> bool {
        self.move_in_progress
    }

    pub fn is_head_pressed(&self) -> bool {
        self.head_pressed
    }

    pub fn reserved(&self) -> Coord2 {
        self.reserved
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    pub fn position_at(&self, coords: Coord2) -> CellPosition {
        self.positions[coords.to_nd_index()]
    }

    pub fn started_at(&self) -> Option<Millis> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<Millis> {
        self.ended_at
    }

    /// Whole seconds since the first open, frozen once the game ended, 0 before it started.
    pub fn elapsed_secs(&self, now: Millis) -> u64 {
        match self.started_at {
            Some(started_at) => self.ended_at.unwrap_or(now).saturating_sub(started_at) / 1000,
            None => 0,
        }
    }

    pub fn press_start(&self, coords: Coord2) -> Result<Self> {
        let coords = self.board.validate_coords(coords)?;
        if self.is_finished() || self.position_at(coords).is_settled() {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        next.positions[coords.to_nd_index()] = CellPosition::Pressed;
        next.move_in_progress = true;
        Ok(next)
    }

    pub fn press_cancel(&self, coords: Coord2) -> Result<Self> {
        let coords = self.board.validate_coords(coords)?;
        if self.is_finished() || self.position_at(coords) != CellPosition::Pressed {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        next.positions[coords.to_nd_index()] = CellPosition::Closed;
        next.move_in_progress = false;
        Ok(next)
    }

    /// Opens a cell at time `now`.
    ///
    /// While no click has been recorded yet a mine under `coords` is first moved onto the
    /// reserved cell, so that click never loses.
    pub fn open_finish(&self, coords: Coord2, now: Millis) -> Result<Self> {
        let coords = self.board.validate_coords(coords)?;
        if self.is_finished() || self.position_at(coords).is_settled() {
            return Ok(self.clone());
        }

        let is_first_move = self.last_click.is_none();
        let mut next = self.clone();
        next.move_in_progress = false;
        next.last_click = Some(coords);
        if next.started_at.is_none() {
            next.started_at = Some(now);
        }

        if is_first_move && next.board.contains_mine(coords) {
            if next.board.relocate_mine(coords, next.reserved) {
                log::debug!(
                    "First click on a mine at {:?}, mine moved to {:?}",
                    coords,
                    next.reserved
                );
            } else {
                log::warn!("Reserved cell {:?} is not free, mine stays", next.reserved);
            }
        }

        if next.board.contains_mine(coords) {
            next.end_with_loss(now);
            return Ok(next);
        }

        next.positions = reveal(coords, &next.board, &next.positions);
        if next.all_safe_cells_settled() {
            next.end_with_win(now);
        } else {
            next.status = GameStatus::InProgress;
        }
        Ok(next)
    }

    pub fn right_click(&self, coords: Coord2) -> Result<Self> {
        use CellPosition::*;

        let coords = self.board.validate_coords(coords)?;
        if self.is_finished() {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        match self.position_at(coords) {
            Opened => return Ok(next),
            Flagged => {
                next.positions[coords.to_nd_index()] = Closed;
                next.mines_left += 1;
            }
            Closed | Pressed if self.mines_left == 0 => return Ok(next),
            Closed | Pressed => {
                next.positions[coords.to_nd_index()] = Flagged;
                next.mines_left -= 1;
            }
        }
        next.move_in_progress = false;
        next.last_click = Some(coords);
        Ok(next)
    }

    pub fn with_head_pressed(&self, head_pressed: bool) -> Self {
        Self {
            head_pressed,
            ..self.clone()
        }
    }

    fn all_safe_cells_settled(&self) -> bool {
        self.board.iter_coords().all(|coords| {
            self.board.contains_mine(coords) || self.position_at(coords).is_settled()
        })
    }

    fn end_with_loss(&mut self, now: Millis) {
        for coords in self.board.mine_coords() {
            let position = &mut self.positions[coords.to_nd_index()];
            if *position != CellPosition::Flagged {
                *position = CellPosition::Opened;
            }
        }
        self.status = GameStatus::Lost;
        self.ended_at = Some(now);
        log::debug!("Lost at {:?}", self.last_click);
    }

    fn end_with_win(&mut self, now: Millis) {
        for coords in self.board.mine_coords() {
            self.positions[coords.to_nd_index()] = CellPosition::Flagged;
        }
        self.mines_left = 0;
        self.status = GameStatus::Won;
        self.ended_at = Some(now);
        log::debug!("Won at {:?}", self.last_click);
    }
}

/// Applies commands to game states.
///
/// The transitions themselves are pure; the reducer only contributes fresh boards for new games
/// and the current time for opens.
#[derive(Clone, Debug)]
pub struct Reducer<G = RandomBoardGenerator, C = SystemClock> {
    generator: G,
    clock: C,
}

impl Reducer {
    /// Randomly seeded boards and wall-clock time.
    pub fn from_os_rng() -> Self {
        Self::new(RandomBoardGenerator::from_os_rng(), SystemClock)
    }
}

impl<G: BoardGenerator, C: Clock> Reducer<G, C> {
    pub fn new(generator: G, clock: C) -> Self {
        Self { generator, clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn new_game(&mut self, config: GameConfig) -> Result<GameState> {
        let generated = self.generator.generate(config)?;
        log::debug!(
            "New {}x{} game with {} mines",
            config.width(),
            config.height(),
            config.mines
        );
        GameState::new(config, generated)
    }

    pub fn reduce(&mut self, state: &GameState, command: Command) -> Result<GameState> {
        use Command::*;

        log::trace!("Applying {:?}", command);
        match command {
            PressStart(coords) => state.press_start(coords),
            OpenFinish(coords) => state.open_finish(coords, self.clock.now_millis()),
            PressCancel(coords) => state.press_cancel(coords),
            RightClick(coords) => state.right_click(coords),
            PressHead => Ok(state.with_head_pressed(true)),
            UnpressHead => Ok(state.with_head_pressed(false)),
            Reset => self.new_game(state.config),
            StartGame {
                width,
                height,
                mines,
            } => self.new_game(GameConfig::new(width, height, mines)),
        }
    }
}
