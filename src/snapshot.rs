//! Board snapshots for the move history.

use crate::action::Move;
use crate::types::Board;
use serde::{Deserialize, Serialize};

/// One entry in the move history: a board plus the move that produced it.
///
/// Snapshots are immutable once appended. The initial snapshot holds the
/// empty board and no producing move; every later snapshot extends its
/// predecessor by exactly one mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    board: Board,
    last_move: Option<Move>,
}

impl Snapshot {
    /// Creates the initial snapshot: empty board, no move.
    pub fn initial() -> Self {
        Self {
            board: Board::new(),
            last_move: None,
        }
    }

    /// Creates a snapshot produced by the given move.
    pub fn new(board: Board, last_move: Move) -> Self {
        Self {
            board,
            last_move: Some(last_move),
        }
    }

    /// Returns the board at this point in history.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the move that produced this snapshot, if any.
    ///
    /// `None` only for the initial snapshot.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::initial()
    }
}
