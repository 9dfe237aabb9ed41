//! Engine - runs a game against a persistence store
//!
//! [`Engine`] owns a [`GameState`] and a [`Store`] and performs the per-move
//! control flow that a front-end would otherwise have to get right by hand:
//!
//! 1. [`Engine::submit_move`] slides and merges (the renderer may now animate)
//! 2. [`Engine::settle`] spawns the next tile, saves the session and checks
//!    for game over
//! 3. on game over the final score is added to the history, exactly once
//!
//! Storage failures are logged and otherwise ignored; the game carries on in
//! memory.
//!
//! # Example
//!
//! ```
//! use tui_2048_core::SimpleRng;
//! use tui_2048_engine::Engine;
//! use tui_2048_store::Store;
//! use tui_2048_types::Direction;
//!
//! let mut engine = Engine::open(Store::in_memory(), SimpleRng::new(7));
//! assert_eq!(engine.game().grid().tile_count(), 2);
//!
//! let outcome = engine.play(Direction::Down).unwrap();
//! if outcome.moved {
//!     // Every completed move is saved for resuming.
//!     assert!(engine.store().load_session().is_some());
//! }
//! ```

use arrayvec::ArrayVec;
use log::{debug, info, warn};
use rand::RngCore;

use tui_2048_core::{GameSnapshot, GameState, MoveOutcome, MoveRejected, Settled, SimpleRng, SpawnedTile};
use tui_2048_store::{ScoreRecord, Store};
use tui_2048_types::{Direction, GameAction, GamePhase, INITIAL_TILES};

pub use tui_2048_core as core;
pub use tui_2048_store as store;
pub use tui_2048_types as types;

/// What an input action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// A move was resolved (and, if it moved anything, is waiting to settle).
    Moved(MoveOutcome),
    /// The move was not accepted in the current phase.
    Rejected(MoveRejected),
    /// A new game was started.
    Restarted,
}

pub struct Engine<R = SimpleRng> {
    game: GameState<R>,
    store: Store,
    /// The current game's score is already in the history.
    recorded: bool,
}

impl<R: RngCore> Engine<R> {
    /// Resume the saved session from `store`, or start a new game.
    pub fn open(store: Store, rng: R) -> Self {
        let mut game = GameState::with_rng(rng);
        match store.load_session() {
            Some(session) if game.restore(session.grid, session.score) => {
                info!("[Engine] Resumed saved session (score {})", session.score);
            }
            _ => {
                game.start();
                info!("[Engine] Started new game");
            }
        }

        Self {
            game,
            store,
            recorded: false,
        }
    }

    /// Slide and merge. See [`GameState::submit_move`].
    ///
    /// A move that changes nothing can still reveal that the game is over;
    /// that game is recorded immediately.
    pub fn submit_move(&mut self, direction: Direction) -> Result<MoveOutcome, MoveRejected> {
        let outcome = self.game.submit_move(direction)?;
        if outcome.game_over {
            self.finish();
        }
        Ok(outcome)
    }

    /// Spawn the next tile, persist, and check for game over.
    ///
    /// Returns `None` when no move is waiting to settle.
    pub fn settle(&mut self) -> Option<Settled> {
        let settled = self.game.settle()?;
        if settled.game_over {
            self.finish();
        } else {
            self.save();
        }
        Some(settled)
    }

    /// Submit and settle in one call.
    pub fn play(&mut self, direction: Direction) -> Result<MoveOutcome, MoveRejected> {
        let mut outcome = self.submit_move(direction)?;
        if let Some(settled) = self.settle() {
            outcome.spawned = settled.spawned;
            outcome.game_over = settled.game_over;
        }
        Ok(outcome)
    }

    /// Apply an input action. Moves are only submitted; the caller settles.
    pub fn apply(&mut self, action: GameAction) -> ActionResult {
        match action {
            GameAction::Move(direction) => match self.submit_move(direction) {
                Ok(outcome) => ActionResult::Moved(outcome),
                Err(rejected) => ActionResult::Rejected(rejected),
            },
            GameAction::Restart => {
                self.reset();
                ActionResult::Restarted
            }
        }
    }

    /// Abandon the current game and start a new one.
    ///
    /// An unfinished game with a non-zero score is recorded before it is
    /// discarded.
    pub fn reset(&mut self) -> ArrayVec<SpawnedTile, INITIAL_TILES> {
        if !self.recorded && self.game.score() > 0 {
            self.record(self.game.score());
        }
        if let Err(e) = self.store.clear_session() {
            warn!("[Engine] Could not clear saved session: {}", e);
        }
        self.recorded = false;
        let placed = self.game.reset();
        debug!("[Engine] Reset to episode {}", self.game.episode_id());
        placed
    }

    /// Record the finished game's score if that has not happened yet.
    ///
    /// Returns true when this call wrote the history entry. A finished game
    /// is no longer resumable, so its session slot is cleared. Does nothing
    /// while the game is still live.
    pub fn finish(&mut self) -> bool {
        if self.recorded || !self.game.game_over() {
            return false;
        }
        self.recorded = true;
        if let Err(e) = self.store.clear_session() {
            warn!("[Engine] Could not clear finished session: {}", e);
        }

        let score = self.game.score();
        if score == 0 {
            return false;
        }
        self.record(score)
    }

    fn record(&mut self, score: u64) -> bool {
        match self.store.record_score(score) {
            Ok(()) => {
                info!("[Engine] Recorded score {}", score);
                true
            }
            Err(e) => {
                warn!("[Engine] Could not record score {}: {}", score, e);
                false
            }
        }
    }

    fn save(&mut self) {
        let rows = self.game.grid().to_rows();
        if let Err(e) = self.store.save_session(rows, self.game.score()) {
            warn!("[Engine] Could not save session: {}", e);
        }
    }

    pub fn game(&self) -> &GameState<R> {
        &self.game
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn phase(&self) -> GamePhase {
        self.game.phase()
    }

    pub fn score(&self) -> u64 {
        self.game.score()
    }

    pub fn recorded(&self) -> bool {
        self.recorded
    }

    pub fn best_score(&self) -> u64 {
        self.store.best_score()
    }

    pub fn score_history(&self) -> Vec<ScoreRecord> {
        self.store.score_history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_2048_store::MemoryStorage;

    fn engine_with(rows: [[u32; 4]; 4], score: u64) -> Engine {
        let mut store = Store::new(MemoryStorage::new());
        store.save_session(rows, score).unwrap();
        Engine::open(store, SimpleRng::new(1))
    }

    #[test]
    fn open_without_session_starts_new_game() {
        let engine = Engine::open(Store::in_memory(), SimpleRng::new(1));
        assert_eq!(engine.game().grid().tile_count(), 2);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.phase(), GamePhase::Idle);
    }

    #[test]
    fn open_resumes_session() {
        let engine = engine_with([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]], 96);
        assert_eq!(engine.game().grid().to_rows()[0], [2, 4, 0, 0]);
        assert_eq!(engine.score(), 96);
    }

    #[test]
    fn settled_move_is_saved() {
        let mut engine = engine_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0);
        let outcome = engine.play(Direction::Left).unwrap();
        assert!(outcome.moved);
        assert!(outcome.spawned.is_some());

        let session = engine.store().load_session().unwrap();
        assert_eq!(session.score, 4);
        assert_eq!(session.grid, engine.game().grid().to_rows());
    }

    #[test]
    fn unsettled_move_is_not_saved_yet() {
        let mut engine = engine_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0);
        engine.submit_move(Direction::Left).unwrap();
        assert_eq!(engine.store().load_session().unwrap().score, 0);
        engine.settle().unwrap();
        assert_eq!(engine.store().load_session().unwrap().score, 4);
    }

    #[test]
    fn apply_maps_actions() {
        let mut engine = engine_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0);
        match engine.apply(GameAction::Move(Direction::Left)) {
            ActionResult::Moved(outcome) => assert!(outcome.moved),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            engine.apply(GameAction::Move(Direction::Right)),
            ActionResult::Rejected(MoveRejected::InFlight)
        );
        engine.settle();
        assert_eq!(engine.apply(GameAction::Restart), ActionResult::Restarted);
        assert_eq!(engine.score(), 0);
    }
}
