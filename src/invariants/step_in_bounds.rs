//! Step bounds invariant: the viewed step always points at a snapshot.

use super::Invariant;
use crate::machine::GameStateMachine;

/// Invariant: History is never empty and the step pointer is in range.
///
/// A fresh machine starts with one snapshot at step 0; `apply_move`
/// appends, `jump_to` only accepts existing steps, so the pointer can
/// never dangle.
pub struct StepInBoundsInvariant;

impl Invariant<GameStateMachine> for StepInBoundsInvariant {
    fn holds(machine: &GameStateMachine) -> bool {
        !machine.history().is_empty() && machine.step() < machine.history_len()
    }

    fn description() -> &'static str {
        "Step pointer references an existing snapshot"
    }
}
