//! The game state machine: snapshot history, step pointer, transitions.

use crate::action::{Move, MoveError};
use crate::contracts::{Contract, MoveContract};
use crate::invariants::{InvariantSet, MachineInvariants};
use crate::position::Position;
use crate::rules;
use crate::snapshot::Snapshot;
use crate::types::{Board, GameStatus, Player, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Error that can occur when navigating or restoring the history.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum HistoryError {
    /// The requested step does not reference an existing snapshot.
    #[display("Step {} is out of range (history length {})", step, len)]
    StepOutOfRange {
        /// The requested step.
        step: usize,
        /// The current history length.
        len: usize,
    },

    /// A restored machine failed invariant validation.
    #[display("Restored state is invalid: {}", _0)]
    CorruptHistory(String),
}

impl std::error::Error for HistoryError {}

/// Tic-tac-toe state machine with snapshot history and time travel.
///
/// The machine owns an append-only history of board snapshots and a
/// step pointer into it. Moves always play forward from the snapshot
/// being viewed; playing a move while viewing an earlier step discards
/// the abandoned future before the new snapshot is appended.
///
/// The player to move is never stored - it is derived from the parity
/// of the viewed step (even step, X to move), which agrees with the
/// recorded history because turns strictly alternate.
///
/// Deserialization goes through a raw wire struct so that a saved
/// state is validated against the machine invariants before it becomes
/// a live machine; the projections can therefore never panic, even on
/// hand-edited input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SavedMachine")]
pub struct GameStateMachine {
    /// Board snapshots, oldest first. Never empty.
    history: Vec<Snapshot>,
    /// Index of the snapshot currently being viewed. Always in range.
    step: usize,
}

/// Wire form of a saved machine: same fields, no guarantees yet.
#[derive(Debug, Deserialize)]
struct SavedMachine {
    history: Vec<Snapshot>,
    step: usize,
}

impl TryFrom<SavedMachine> for GameStateMachine {
    type Error = HistoryError;

    fn try_from(saved: SavedMachine) -> Result<Self, HistoryError> {
        if saved.step >= saved.history.len() {
            return Err(HistoryError::StepOutOfRange {
                step: saved.step,
                len: saved.history.len(),
            });
        }

        let machine = Self {
            history: saved.history,
            step: saved.step,
        };
        MachineInvariants::check_all(&machine).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            HistoryError::CorruptHistory(descriptions)
        })?;

        Ok(machine)
    }
}

impl GameStateMachine {
    /// Creates a fresh machine: empty board, step 0, X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            history: vec![Snapshot::initial()],
            step: 0,
        }
    }

    /// Applies a move at the given position for the player whose turn
    /// it is, silently ignoring illegal moves.
    ///
    /// A move is illegal when the game being viewed is already won, or
    /// when the target square is occupied. Illegal moves leave the
    /// machine completely unchanged, matching a UI where invalid
    /// clicks simply do nothing.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, pos: Position) {
        if let Err(reason) = self.try_move(pos) {
            debug!(%reason, "move ignored");
        }
    }

    /// Applies a move, reporting why it was rejected if illegal.
    ///
    /// Same transition as [`apply_move`](Self::apply_move); rejected
    /// moves leave the machine unchanged.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the viewed board already has a winner.
    /// - [`MoveError::SquareOccupied`] if the target square is filled.
    #[instrument(skip(self), fields(player = %self.current_player()))]
    pub fn try_move(&mut self, pos: Position) -> Result<(), MoveError> {
        MoveContract::pre(self, &pos)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let player = self.current_player();
        let mut board = self.current_board().clone();
        board.set(pos, Square::Occupied(player));

        // Divergence truncation: drop the abandoned future, then append.
        self.history.truncate(self.step + 1);
        self.history.push(Snapshot::new(board, Move::new(player, pos)));
        self.step += 1;

        #[cfg(debug_assertions)]
        MoveContract::post(&before, self)?;

        Ok(())
    }

    /// Moves the step pointer to an existing snapshot.
    ///
    /// This is a pure viewing operation: history is never altered, and
    /// jumping to the same step twice is idempotent. The player to move
    /// is re-derived from the parity of the new step.
    ///
    /// # Errors
    ///
    /// [`HistoryError::StepOutOfRange`] if no snapshot exists at `step`.
    #[instrument(skip(self))]
    pub fn jump_to(&mut self, step: usize) -> Result<(), HistoryError> {
        if step >= self.history.len() {
            return Err(HistoryError::StepOutOfRange {
                step,
                len: self.history.len(),
            });
        }
        self.step = step;
        Ok(())
    }

    /// Rebuilds a machine by replaying a recorded move sequence.
    ///
    /// Unlike the interactive surface, replay validates that each
    /// recorded move belongs to the player whose turn it was.
    ///
    /// # Errors
    ///
    /// [`MoveError::WrongPlayer`] if a recorded move is out of turn, or
    /// any error [`try_move`](Self::try_move) reports.
    #[instrument]
    pub fn replay(moves: &[Move]) -> Result<Self, MoveError> {
        let mut machine = Self::new();
        for mov in moves {
            if mov.player() != machine.current_player() {
                return Err(MoveError::WrongPlayer(mov.player()));
            }
            machine.try_move(mov.position())?;
        }
        Ok(machine)
    }

    /// Returns the board at the viewed step.
    pub fn current_board(&self) -> &Board {
        self.history[self.step].board()
    }

    /// Returns the player whose turn it is at the viewed step.
    pub fn current_player(&self) -> Player {
        if self.step % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// Returns the winner on the viewed board, if any.
    ///
    /// Always recomputed from the board, never cached.
    pub fn winner(&self) -> Option<Player> {
        rules::check_winner(self.current_board())
    }

    /// Returns the status of the game at the viewed step.
    pub fn status(&self) -> GameStatus {
        if let Some(winner) = self.winner() {
            GameStatus::Won(winner)
        } else if rules::is_full(self.current_board()) {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Returns the number of snapshots in history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns the step currently being viewed.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Returns the full snapshot history, oldest first.
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// Returns the status text a frontend would show above the board.
    pub fn status_line(&self) -> String {
        match self.status() {
            GameStatus::Won(winner) => format!("Winner: {}", winner),
            GameStatus::Draw => "Draw".to_string(),
            GameStatus::InProgress => format!("Next player: {}", self.current_player()),
        }
    }
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
