//! Tic-tac-toe game logic as an explicit state machine.
//!
//! The crate owns the board, the move history, and the turn order; a
//! rendering frontend owns a [`GameStateMachine`] instance, feeds it
//! cell clicks, and redraws from its read-only projections. No I/O,
//! no async, no rendering lives here.
//!
//! # Architecture
//!
//! - **Machine**: [`GameStateMachine`] - append-only snapshot history
//!   with a step pointer; supports time travel via [`GameStateMachine::jump_to`]
//! - **Rules**: pure win/draw detection over a board
//! - **Contracts**: pre/postconditions for the move transition
//! - **Invariants**: composable properties checked in debug builds
//!
//! # Example
//!
//! ```
//! use tictactoe_machine::{GameStateMachine, Player, Position};
//!
//! let mut game = GameStateMachine::new();
//! game.apply_move(Position::Center);
//! assert_eq!(game.current_player(), Player::O);
//!
//! // Travel back and play a different line; the future is discarded.
//! game.jump_to(0).unwrap();
//! game.apply_move(Position::TopLeft);
//! assert_eq!(game.history_len(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod invariants;
mod machine;
mod position;
mod rules;
mod snapshot;
mod types;

// Crate-level exports - actions and errors
pub use action::{Move, MoveError};

// Crate-level exports - contracts
pub use contracts::{Contract, GameNotOver, LegalMove, MoveContract, SquareIsEmpty};

// Crate-level exports - invariants
pub use invariants::{
    AlternatingTurnInvariant, Invariant, InvariantSet, InvariantViolation, MachineInvariants,
    SnapshotChainInvariant, StepInBoundsInvariant,
};

// Crate-level exports - the machine
pub use machine::{GameStateMachine, HistoryError};

// Crate-level exports - rules
pub use rules::{check_winner, is_full};

// Crate-level exports - domain types
pub use position::Position;
pub use snapshot::Snapshot;
pub use types::{Board, GameStatus, Player, Square};
