use crate::*;

/// Owner of the single live game, every dispatched command swaps in a whole new state.
#[derive(Clone, Debug)]
pub struct Session<G = RandomBoardGenerator, C = SystemClock> {
    reducer: Reducer<G, C>,
    state: GameState,
}

impl<G: BoardGenerator, C: Clock> Session<G, C> {
    pub fn new(mut reducer: Reducer<G, C>, config: GameConfig) -> Result<Self> {
        let state = reducer.new_game(config)?;
        Ok(Self { reducer, state })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn reducer(&self) -> &Reducer<G, C> {
        &self.reducer
    }

    pub fn reducer_mut(&mut self) -> &mut Reducer<G, C> {
        &mut self.reducer
    }

    /// Applies `command`, on error the current state stays in place.
    pub fn dispatch(&mut self, command: Command) -> Result<&GameState> {
        self.state = self.reducer.reduce(&self.state, command)?;
        Ok(&self.state)
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.state.elapsed_secs(self.reducer.clock().now_millis())
    }
}
