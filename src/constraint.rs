//! Constraint extraction: one constraint per revealed numbered cell whose
//! hidden neighbor set is non-empty.

use std::collections::HashSet;

use crate::error::{EngineError, Result};
use crate::types::{all_coordinates, BoardSnapshot, CellView};

/// "Exactly `k` of these hidden cells are mines."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub cells: Vec<(usize, usize)>,
    pub k: i32,
}

impl Constraint {
    pub fn cell_set(&self) -> HashSet<(usize, usize)> {
        self.cells.iter().copied().collect()
    }

    pub fn is_satisfied_by(&self, mines: &HashSet<(usize, usize)>) -> bool {
        let count = self.cells.iter().filter(|c| mines.contains(c)).count() as i32;
        count == self.k
    }
}

/// Extract the constraint for a single revealed numbered anchor, or `None`
/// if it has no hidden neighbors (nothing left to deduce there).
///
/// Returns `EngineError::IllegalPosition` when the anchor's value is smaller
/// than its already-flagged neighbor count.
pub fn extract_constraint(
    snapshot: &impl BoardSnapshot,
    x: usize,
    y: usize,
    value: u8,
) -> Result<Option<Constraint>> {
    let mut hidden = Vec::new();
    let mut flagged = 0u8;
    for &(nx, ny) in snapshot.neighbors(x, y) {
        match snapshot.cell(nx, ny) {
            CellView::Hidden => hidden.push((nx, ny)),
            CellView::Flagged => flagged += 1,
            CellView::Revealed(_) => {}
        }
    }

    let k = value as i32 - flagged as i32;
    if k < 0 {
        return Err(EngineError::IllegalPosition {
            x,
            y,
            value,
            flagged_neighbors: flagged,
        });
    }
    if hidden.is_empty() {
        return Ok(None);
    }
    Ok(Some(Constraint { cells: hidden, k }))
}

/// Extract one constraint per revealed numbered cell on the whole board.
pub fn extract_all_constraints(snapshot: &impl BoardSnapshot) -> Result<Vec<Constraint>> {
    let mut constraints = Vec::new();
    for (x, y) in all_coordinates(snapshot) {
        if let CellView::Revealed(v) = snapshot.cell(x, y) {
            if let Some(c) = extract_constraint(snapshot, x, y, v)? {
                constraints.push(c);
            }
        }
    }
    Ok(constraints)
}
