//! Snapshot chain invariant: each snapshot extends its predecessor by
//! exactly one mark.

use super::Invariant;
use crate::machine::GameStateMachine;
use crate::snapshot::Snapshot;
use crate::types::Square;

/// Invariant: The history forms a monotonic chain of boards.
///
/// Snapshot 0 is the empty board with no producing move. Every later
/// snapshot's board is its predecessor's board with exactly the one
/// square named by its recorded move changed from empty to that move's
/// player. Squares are never overwritten or cleared.
pub struct SnapshotChainInvariant;

impl Invariant<GameStateMachine> for SnapshotChainInvariant {
    fn holds(machine: &GameStateMachine) -> bool {
        let history = machine.history();

        let Some(first) = history.first() else {
            return false;
        };
        if first != &Snapshot::initial() {
            return false;
        }

        for pair in history.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);

            let Some(mov) = next.last_move() else {
                return false;
            };

            // The move's square transitions Empty -> Occupied(player).
            if prev.board().get(mov.position()) != Square::Empty {
                return false;
            }
            if next.board().get(mov.position()) != Square::Occupied(mov.player()) {
                return false;
            }

            // Every other square is untouched.
            let untouched = crate::position::Position::ALL
                .iter()
                .filter(|&&pos| pos != mov.position())
                .all(|&pos| prev.board().get(pos) == next.board().get(pos));
            if !untouched {
                return false;
            }
        }

        true
    }

    fn description() -> &'static str {
        "History snapshots form a monotonic chain (one new mark per step)"
    }
}
