//! Move emission: translate a decided `Action` into calls against the
//! harness's live, mutable board, refusing to act on anything but a hidden
//! cell.

use thiserror::Error;

use crate::types::{Action, BoardSnapshot, CellView};

/// The harness-side contract the emitter drives.
pub trait MoveSink {
    fn reveal(&mut self, x: usize, y: usize);
    fn flag(&mut self, x: usize, y: usize);
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EmitError {
    #[error("refusing to act on non-hidden cell ({x}, {y})")]
    NotHidden { x: usize, y: usize },
}

/// Apply `action` to `sink`, validating against `snapshot` first.
pub fn emit(
    action: Action,
    snapshot: &impl BoardSnapshot,
    sink: &mut impl MoveSink,
) -> Result<(), EmitError> {
    match action {
        Action::Reveal { x, y } => {
            require_hidden(snapshot, x, y)?;
            sink.reveal(x, y);
            Ok(())
        }
        Action::Flag { x, y } => {
            require_hidden(snapshot, x, y)?;
            sink.flag(x, y);
            Ok(())
        }
        Action::NoMove => Ok(()),
    }
}

fn require_hidden(snapshot: &impl BoardSnapshot, x: usize, y: usize) -> Result<(), EmitError> {
    if snapshot.cell(x, y) != CellView::Hidden {
        return Err(EmitError::NotHidden { x, y });
    }
    Ok(())
}
