//! Alternating turn invariant: recorded moves alternate X, O, X, O, ...

use super::Invariant;
use crate::machine::GameStateMachine;
use crate::types::Player;

/// Invariant: Players alternate turns.
///
/// The recorded moves in history must show the X, O, X, O, ... pattern
/// with X first, and the derived current player must match the parity
/// of the viewed step.
pub struct AlternatingTurnInvariant;

impl Invariant<GameStateMachine> for AlternatingTurnInvariant {
    fn holds(machine: &GameStateMachine) -> bool {
        // Snapshot k (k >= 1) was produced by move k-1; move k-1 belongs
        // to X iff k-1 is even. Snapshot 0 has no producing move.
        for (index, snapshot) in machine.history().iter().enumerate() {
            let expected = match index {
                0 => None,
                _ if (index - 1) % 2 == 0 => Some(Player::X),
                _ => Some(Player::O),
            };
            if snapshot.last_move().map(|m| m.player()) != expected {
                return false;
            }
        }

        // Derived turn must match step parity.
        let expected_next = if machine.step() % 2 == 0 {
            Player::X
        } else {
            Player::O
        };

        machine.current_player() == expected_next
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
