//! Pattern rules: four cheap, locally-certain deductions tried before the
//! engine resorts to probability. R1 and R2 look only at one anchor's own
//! neighborhood; R3 compares two overlapping anchors; R4 compares an anchor
//! with a cardinal neighbor.

use std::collections::HashSet;

use log::trace;

use crate::types::{Action, BoardSnapshot, CellView};

struct Context {
    value: u8,
    flagged: i32,
    hidden: Vec<(usize, usize)>,
}

impl Context {
    fn remaining(&self) -> i32 {
        self.value as i32 - self.flagged
    }
}

fn context_at(snapshot: &impl BoardSnapshot, x: usize, y: usize) -> Option<Context> {
    let value = match snapshot.cell(x, y) {
        CellView::Revealed(v) => v,
        _ => return None,
    };
    let mut hidden = Vec::new();
    let mut flagged = 0i32;
    for &(nx, ny) in snapshot.neighbors(x, y) {
        match snapshot.cell(nx, ny) {
            CellView::Hidden => hidden.push((nx, ny)),
            CellView::Flagged => flagged += 1,
            CellView::Revealed(_) => {}
        }
    }
    Some(Context { value, flagged, hidden })
}

/// R1 — saturation: every hidden neighbor of a saturated anchor is a mine.
pub fn saturation(snapshot: &impl BoardSnapshot, x: usize, y: usize) -> Option<Action> {
    let ctx = context_at(snapshot, x, y)?;
    let remaining = ctx.remaining();
    if remaining > 0 && ctx.hidden.len() as i32 == remaining {
        let (hx, hy) = ctx.hidden[0];
        trace!("R1 saturation at ({x},{y}): flag ({hx},{hy})");
        return Some(Action::Flag { x: hx, y: hy });
    }
    None
}

/// R2 — completion: an anchor whose mines are all already flagged has only
/// safe hidden neighbors left.
pub fn completion(snapshot: &impl BoardSnapshot, x: usize, y: usize) -> Option<Action> {
    let ctx = context_at(snapshot, x, y)?;
    if ctx.remaining() == 0 && !ctx.hidden.is_empty() {
        let (hx, hy) = ctx.hidden[0];
        trace!("R2 completion at ({x},{y}): reveal ({hx},{hy})");
        return Some(Action::Reveal { x: hx, y: hy });
    }
    None
}

fn two_hop_candidates(
    snapshot: &impl BoardSnapshot,
    x: usize,
    y: usize,
) -> Vec<(usize, usize)> {
    let mut seen = HashSet::new();
    for &(nx, ny) in snapshot.neighbors(x, y) {
        seen.insert((nx, ny));
        for &(nnx, nny) in snapshot.neighbors(nx, ny) {
            if (nnx, nny) != (x, y) {
                seen.insert((nnx, nny));
            }
        }
    }
    seen.into_iter().collect()
}

/// R3 — subset and overlap: compare an anchor's unknown set against every
/// other numbered cell within two hops, deducing from set containment or
/// partial intersection.
pub fn subset_overlap(snapshot: &impl BoardSnapshot, x: usize, y: usize) -> Option<Action> {
    let ctx_a = context_at(snapshot, x, y)?;
    let k_a = ctx_a.remaining();
    if ctx_a.hidden.is_empty() || k_a <= 0 {
        return None;
    }
    let u_a: HashSet<(usize, usize)> = ctx_a.hidden.iter().copied().collect();

    for (bx, by) in two_hop_candidates(snapshot, x, y) {
        if (bx, by) == (x, y) {
            continue;
        }
        let ctx_b = match context_at(snapshot, bx, by) {
            Some(c) => c,
            None => continue,
        };
        let k_b = ctx_b.remaining();
        if ctx_b.hidden.is_empty() || k_b <= 0 {
            continue;
        }
        let u_b: HashSet<(usize, usize)> = ctx_b.hidden.iter().copied().collect();

        if let Some(action) = try_subset(&u_a, k_a, &u_b, k_b) {
            trace!("R3 subset at ({x},{y})/({bx},{by}): {action:?}");
            return Some(action);
        }
        if let Some(action) = try_subset(&u_b, k_b, &u_a, k_a) {
            trace!("R3 subset at ({bx},{by})/({x},{y}): {action:?}");
            return Some(action);
        }
        if let Some(action) = try_overlap(&u_a, k_a, &u_b, k_b) {
            trace!("R3 overlap at ({x},{y})/({bx},{by}): {action:?}");
            return Some(action);
        }
    }
    None
}

fn try_subset(
    u_a: &HashSet<(usize, usize)>,
    k_a: i32,
    u_b: &HashSet<(usize, usize)>,
    k_b: i32,
) -> Option<Action> {
    if u_b.len() >= u_a.len() || !u_b.is_subset(u_a) {
        return None;
    }
    let diff: Vec<(usize, usize)> = u_a.difference(u_b).copied().collect();
    if diff.is_empty() {
        return None;
    }
    if k_a - k_b == diff.len() as i32 {
        let (fx, fy) = diff[0];
        return Some(Action::Flag { x: fx, y: fy });
    }
    if k_a == k_b {
        let (rx, ry) = diff[0];
        return Some(Action::Reveal { x: rx, y: ry });
    }
    None
}

fn try_overlap(
    u_a: &HashSet<(usize, usize)>,
    k_a: i32,
    u_b: &HashSet<(usize, usize)>,
    k_b: i32,
) -> Option<Action> {
    if u_a.is_subset(u_b) || u_b.is_subset(u_a) {
        return None;
    }
    let diff_a: Vec<(usize, usize)> = u_a.difference(u_b).copied().collect();
    let diff_b: Vec<(usize, usize)> = u_b.difference(u_a).copied().collect();
    if diff_a.len() != 1 || diff_b.len() != 1 {
        return None;
    }
    let intersection_len = u_a.intersection(u_b).count();
    if intersection_len == 0 {
        return None;
    }
    let alpha = diff_a[0];
    let beta = diff_b[0];
    let max_intersection_mines = (intersection_len as i32).min(k_a).min(k_b);
    let min_intersection_mines = 0.max(k_a - 1).max(k_b - 1);

    if k_a > max_intersection_mines {
        return Some(Action::Flag { x: alpha.0, y: alpha.1 });
    }
    if k_b > max_intersection_mines {
        return Some(Action::Flag { x: beta.0, y: beta.1 });
    }
    if k_a == min_intersection_mines {
        return Some(Action::Reveal { x: alpha.0, y: alpha.1 });
    }
    if k_b == min_intersection_mines {
        return Some(Action::Reveal { x: beta.0, y: beta.1 });
    }
    None
}

struct FullContext {
    unknown: usize,
    remaining: i32,
    hidden: Vec<(usize, usize)>,
}

fn full_context(snapshot: &impl BoardSnapshot, x: usize, y: usize) -> Option<FullContext> {
    let ctx = context_at(snapshot, x, y)?;
    Some(FullContext {
        unknown: ctx.hidden.len(),
        remaining: ctx.remaining(),
        hidden: ctx.hidden,
    })
}

fn farthest_along_axis(triad: &[(usize, usize)], dx: i64, dy: i64) -> Option<(usize, usize)> {
    if dx != 0 {
        let fixed_y = triad[0].1;
        if !triad.iter().all(|&(_, ty)| ty == fixed_y) {
            return None;
        }
        if dx > 0 {
            triad.iter().max_by_key(|&&(tx, _)| tx).copied()
        } else {
            triad.iter().min_by_key(|&&(tx, _)| tx).copied()
        }
    } else {
        let fixed_x = triad[0].0;
        if !triad.iter().all(|&(tx, _)| tx == fixed_x) {
            return None;
        }
        if dy > 0 {
            triad.iter().max_by_key(|&&(_, ty)| ty).copied()
        } else {
            triad.iter().min_by_key(|&&(_, ty)| ty).copied()
        }
    }
}

/// R4 — transitive: a numbered anchor compared with a cardinal numbered
/// neighbor can identify a mine or a safe cell further along the same axis,
/// even without a direct shared unknown.
pub fn transitive(snapshot: &impl BoardSnapshot, x: usize, y: usize) -> Option<Action> {
    let anchor_ctx = full_context(snapshot, x, y)?;

    let has_unknown_cardinal = snapshot
        .cardinal_neighbors(x, y)
        .iter()
        .any(|&(nx, ny)| snapshot.cell(nx, ny).is_hidden());
    if !has_unknown_cardinal {
        return None;
    }

    for &(nx, ny) in snapshot.cardinal_neighbors(x, y) {
        if !matches!(snapshot.cell(nx, ny), CellView::Revealed(_)) {
            continue;
        }
        let neighbor_ctx = match full_context(snapshot, nx, ny) {
            Some(c) => c,
            None => continue,
        };
        if neighbor_ctx.unknown != 3 {
            continue;
        }

        let dx = nx as i64 - x as i64;
        let dy = ny as i64 - y as i64;
        let farthest = match farthest_along_axis(&neighbor_ctx.hidden, dx, dy) {
            Some(c) => c,
            None => continue,
        };

        let is_safe = anchor_ctx.unknown == 2
            && neighbor_ctx.remaining == anchor_ctx.remaining
            && (anchor_ctx.remaining == 1 || anchor_ctx.remaining == 2);

        let is_mine = neighbor_ctx.remaining == 2
            && anchor_ctx.remaining == 1
            && (anchor_ctx.unknown == 2 || anchor_ctx.unknown == 3);

        if is_safe {
            trace!("R4 transitive safe at ({x},{y})/({nx},{ny}): reveal {farthest:?}");
            return Some(Action::Reveal { x: farthest.0, y: farthest.1 });
        }
        if is_mine {
            trace!("R4 transitive mine at ({x},{y})/({nx},{ny}): flag {farthest:?}");
            return Some(Action::Flag { x: farthest.0, y: farthest.1 });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Snapshot;

    #[test]
    fn saturation_flags_all_remaining_hidden_neighbors() {
        // 1x3 row: revealed '1' at (0,1) with exactly one hidden neighbor.
        let mut cells = vec![CellView::Hidden; 3];
        cells[1] = CellView::Revealed(1);
        cells[2] = CellView::Revealed(0);
        let snap = Snapshot::new(1, 3, cells);
        let action = saturation(&snap, 0, 1).unwrap();
        assert_eq!(action, Action::Flag { x: 0, y: 0 });
    }

    #[test]
    fn completion_reveals_when_mines_are_already_flagged() {
        let mut cells = vec![CellView::Hidden; 3];
        cells[1] = CellView::Revealed(1);
        cells[0] = CellView::Flagged;
        let snap = Snapshot::new(1, 3, cells);
        let action = completion(&snap, 0, 1).unwrap();
        assert_eq!(action, Action::Reveal { x: 0, y: 2 });
    }

    #[test]
    fn subset_flags_the_extra_mine() {
        // Row of 4 hidden cells: a covers {0,1,2} with k=1, b covers {0,1} with k=1.
        // b subset of a, diff={2}, k_a-k_b=0 != diff.len()=1 -> no flag.
        // Use a case that does flag: a covers {0,1,2} k=2, b covers {0,1} k=1.
        // diff = {2}; k_a - k_b = 1 == diff.len() -> flag (2).
        let width = 5;
        let height = 1;
        let mut cells = vec![CellView::Hidden; width * height];
        // anchor a at x=3, covering hidden neighbors 0..=2 via custom snapshot is
        // awkward with a plain grid; instead exercise try_subset directly.
        let _ = (&mut cells, width, height);
        let u_a: HashSet<(usize, usize)> = [(0, 0), (1, 0), (2, 0)].into_iter().collect();
        let u_b: HashSet<(usize, usize)> = [(0, 0), (1, 0)].into_iter().collect();
        let action = try_subset(&u_a, 2, &u_b, 1).unwrap();
        assert_eq!(action, Action::Flag { x: 2, y: 0 });
    }

    #[test]
    fn subset_reveals_the_extra_safe_cell() {
        let u_a: HashSet<(usize, usize)> = [(0, 0), (1, 0), (2, 0)].into_iter().collect();
        let u_b: HashSet<(usize, usize)> = [(0, 0), (1, 0)].into_iter().collect();
        let action = try_subset(&u_a, 1, &u_b, 1).unwrap();
        assert_eq!(action, Action::Reveal { x: 2, y: 0 });
    }

    #[test]
    fn overlap_flags_the_exclusive_cell_when_forced() {
        // a = {alpha, shared}, k_a=2 forces both mines -> alpha must be a mine
        // since max_intersection_mines = min(1,2,k_b) caps at intersection size 1.
        let u_a: HashSet<(usize, usize)> = [(0, 0), (1, 0)].into_iter().collect();
        let u_b: HashSet<(usize, usize)> = [(1, 0), (2, 0)].into_iter().collect();
        let action = try_overlap(&u_a, 2, &u_b, 1).unwrap();
        assert_eq!(action, Action::Flag { x: 0, y: 0 });
    }
}
