//! Edit subcommands expressed as reducer actions.

use log::warn;
use scribe_core::app::{Action, AppState};
use scribe_core::command::Command;
use scribe_core::error::Result;

use crate::cli_args::EditOperation;

/// The reducer actions that carry out `operation`, in order.
pub fn actions_for(operation: &EditOperation) -> Vec<Action> {
    match operation.clone() {
        EditOperation::Insert {
            at,
            action,
            target,
            value,
        } => vec![Action::InsertCommand {
            command: Command::new(&action, &target, &value),
            at,
        }],
        EditOperation::InsertBlank { at } => vec![Action::InsertBlank(at)],
        EditOperation::Remove { index } => vec![Action::RemoveCommand(index)],
        EditOperation::Duplicate { index } => vec![Action::DuplicateCommand(index)],
        EditOperation::Set {
            index,
            field,
            value,
        } => vec![Action::UpdateField {
            index,
            field,
            value,
        }],
        EditOperation::Move { from, after } => vec![Action::Cut(from), Action::Paste(after)],
        EditOperation::CopyTo { from, after } => vec![Action::Copy(from), Action::Paste(after)],
    }
}

/// Applies `operation` to `state`.
///
/// # Errors
///
/// Returns the first error reported by the reducer. Earlier actions of the
/// same operation stay applied.
pub fn apply(state: &mut AppState, operation: &EditOperation) -> Result<()> {
    for action in actions_for(operation) {
        state.reduce(action)?;
    }

    Ok(())
}

/// Applies `operation`, treating a soft failure as "nothing to do".
///
/// Returns `false` when the reducer refused the operation with a soft error,
/// such as an index past the end. `state` may then hold a partly applied
/// operation and should not be saved.
///
/// # Errors
///
/// Any error that is not soft.
pub fn apply_lenient(state: &mut AppState, operation: &EditOperation) -> Result<bool> {
    match apply(state, operation) {
        Ok(()) => Ok(true),
        Err(e) if e.is_soft() => {
            warn!("Skipping {operation:?}: {e}");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
