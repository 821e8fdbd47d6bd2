//! Contract-based validation for move transitions.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::action::MoveError;
use crate::invariants::{InvariantSet, MachineInvariants};
use crate::machine::GameStateMachine;
use crate::position::Position;
use crate::rules;
use tracing::instrument;

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: The game being viewed must not already be won.
///
/// Checked before the occupancy rule, so a click on a filled square
/// after the game ends reports `GameOver`, not `SquareOccupied`.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with `GameOver` if the viewed board has a winner.
    #[instrument(skip(machine))]
    pub fn check(machine: &GameStateMachine) -> Result<(), MoveError> {
        if rules::check_winner(machine.current_board()).is_some() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: The square at the move's position must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Fails with `SquareOccupied` if the target square is filled.
    #[instrument(skip(machine))]
    pub fn check(pos: Position, machine: &GameStateMachine) -> Result<(), MoveError> {
        if !machine.current_board().is_empty(pos) {
            Err(MoveError::SquareOccupied(pos))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: A move is legal if the game is still on and
/// the square is empty.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move, in order.
    #[instrument(skip(machine))]
    pub fn check(pos: Position, machine: &GameStateMachine) -> Result<(), MoveError> {
        GameNotOver::check(machine)?;
        SquareIsEmpty::check(pos, machine)?;
        Ok(())
    }
}

/// Contract for move transitions.
///
/// Preconditions:
/// - Game must not be won
/// - Square must be empty
///
/// Postconditions:
/// - Snapshot chain remains monotonic
/// - Players still alternate
/// - Step pointer stays in bounds
pub struct MoveContract;

impl Contract<GameStateMachine, Position> for MoveContract {
    fn pre(machine: &GameStateMachine, pos: &Position) -> Result<(), MoveError> {
        LegalMove::check(*pos, machine)
    }

    fn post(_before: &GameStateMachine, after: &GameStateMachine) -> Result<(), MoveError> {
        MachineInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
