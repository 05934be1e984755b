//! Core data types: cell views, the neighbor cache, and the immutable
//! per-decision board snapshot.
//!
//! Grid storage uses a flat `Vec` with column-major layout: `cells[x * height + y]`,
//! the same convention the teacher crate used for its flat WASM-facing arrays.

/// A cell's state as seen by one decision.
///
/// `Revealed(v)` carries the adjacent-mine count; the engine never inspects
/// what lies under a `Hidden` cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellView {
    Revealed(u8),
    Flagged,
    Hidden,
}

impl CellView {
    pub fn is_hidden(self) -> bool {
        matches!(self, CellView::Hidden)
    }

    pub fn is_flagged(self) -> bool {
        matches!(self, CellView::Flagged)
    }

    pub fn revealed_value(self) -> Option<u8> {
        match self {
            CellView::Revealed(v) => Some(v),
            _ => None,
        }
    }
}

/// The chosen move for one decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Reveal { x: usize, y: usize },
    Flag { x: usize, y: usize },
    NoMove,
}

/// Read-only contract for one decision's board view.
///
/// Implemented by [`Snapshot`]; kept as a trait so rules and extraction can
/// be exercised against hand-built mock boards in tests without going
/// through the owned, cache-backed representation.
pub trait BoardSnapshot {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn cell(&self, x: usize, y: usize) -> CellView;
    fn neighbors(&self, x: usize, y: usize) -> &[(usize, usize)];
    fn cardinal_neighbors(&self, x: usize, y: usize) -> &[(usize, usize)];
}

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const CARDINAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

fn offset_in_bounds(
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    dx: i32,
    dy: i32,
) -> Option<(usize, usize)> {
    let nx = x as i32 + dx;
    let ny = y as i32 + dy;
    if nx >= 0 && nx < width as i32 && ny >= 0 && ny < height as i32 {
        Some((nx as usize, ny as usize))
    } else {
        None
    }
}

/// Pre-computed 8-directional and cardinal neighbor lists for every cell.
///
/// Built once per snapshot; flat-storage-plus-offsets layout matches the
/// teacher crate's `NeighborCache`, doubled up here for the cardinal set R4
/// needs.
#[derive(Clone)]
pub struct NeighborCache {
    height: usize,
    data: Vec<(usize, usize)>,
    offsets: Vec<usize>,
    cardinal_data: Vec<(usize, usize)>,
    cardinal_offsets: Vec<usize>,
}

impl NeighborCache {
    pub fn new(width: usize, height: usize) -> Self {
        let total = width * height;
        let mut data = Vec::with_capacity(total * 8);
        let mut offsets = Vec::with_capacity(total + 1);
        let mut cardinal_data = Vec::with_capacity(total * 4);
        let mut cardinal_offsets = Vec::with_capacity(total + 1);

        for x in 0..width {
            for y in 0..height {
                offsets.push(data.len());
                for &(dx, dy) in &KING_OFFSETS {
                    if let Some(coord) = offset_in_bounds(width, height, x, y, dx, dy) {
                        data.push(coord);
                    }
                }

                cardinal_offsets.push(cardinal_data.len());
                for &(dx, dy) in &CARDINAL_OFFSETS {
                    if let Some(coord) = offset_in_bounds(width, height, x, y, dx, dy) {
                        cardinal_data.push(coord);
                    }
                }
            }
        }
        offsets.push(data.len());
        cardinal_offsets.push(cardinal_data.len());

        Self {
            height,
            data,
            offsets,
            cardinal_data,
            cardinal_offsets,
        }
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    #[inline(always)]
    pub fn neighbors(&self, x: usize, y: usize) -> &[(usize, usize)] {
        let idx = self.index(x, y);
        &self.data[self.offsets[idx]..self.offsets[idx + 1]]
    }

    #[inline(always)]
    pub fn cardinal_neighbors(&self, x: usize, y: usize) -> &[(usize, usize)] {
        let idx = self.index(x, y);
        &self.cardinal_data[self.cardinal_offsets[idx]..self.cardinal_offsets[idx + 1]]
    }
}

/// Owned, immutable snapshot of one decision's board state.
#[derive(Clone)]
pub struct Snapshot {
    width: usize,
    height: usize,
    cells: Vec<CellView>,
    neighbor_cache: NeighborCache,
}

impl Snapshot {
    /// `cells` must be in column-major order (`cells[x * height + y]`) and
    /// cover exactly `width * height` entries.
    pub fn new(width: usize, height: usize, cells: Vec<CellView>) -> Self {
        assert_eq!(
            cells.len(),
            width * height,
            "cell buffer must cover width*height cells"
        );
        Self {
            width,
            height,
            cells,
            neighbor_cache: NeighborCache::new(width, height),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

impl BoardSnapshot for Snapshot {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn cell(&self, x: usize, y: usize) -> CellView {
        self.cells[x * self.height + y]
    }

    fn neighbors(&self, x: usize, y: usize) -> &[(usize, usize)] {
        self.neighbor_cache.neighbors(x, y)
    }

    fn cardinal_neighbors(&self, x: usize, y: usize) -> &[(usize, usize)] {
        self.neighbor_cache.cardinal_neighbors(x, y)
    }
}

/// All coordinates on the board, in column-major iteration order.
pub fn all_coordinates(s: &impl BoardSnapshot) -> impl Iterator<Item = (usize, usize)> + '_ {
    (0..s.width()).flat_map(move |x| (0..s.height()).map(move |y| (x, y)))
}

pub fn hidden_cells(s: &impl BoardSnapshot) -> impl Iterator<Item = (usize, usize)> + '_ {
    all_coordinates(s).filter(move |&(x, y)| s.cell(x, y).is_hidden())
}

pub fn hidden_count(s: &impl BoardSnapshot) -> usize {
    hidden_cells(s).count()
}

pub fn flagged_count(s: &impl BoardSnapshot) -> usize {
    all_coordinates(s).filter(|&(x, y)| s.cell(x, y).is_flagged()).count()
}

pub fn has_revealed_zero(s: &impl BoardSnapshot) -> bool {
    all_coordinates(s).any(|(x, y)| s.cell(x, y) == CellView::Revealed(0))
}

/// All revealed numbered anchors, in the order the strategy cascade visits them.
pub fn revealed_numbered_cells(
    s: &impl BoardSnapshot,
) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
    all_coordinates(s).filter_map(move |(x, y)| s.cell(x, y).revealed_value().map(|v| (x, y, v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(width: usize, height: usize, view: CellView) -> Snapshot {
        Snapshot::new(width, height, vec![view; width * height])
    }

    #[test]
    fn neighbor_cache_corner_has_three() {
        let nc = NeighborCache::new(5, 5);
        assert_eq!(nc.neighbors(0, 0).len(), 3);
        assert_eq!(nc.neighbors(2, 2).len(), 8);
    }

    #[test]
    fn cardinal_neighbor_cache_corner_has_two() {
        let nc = NeighborCache::new(5, 5);
        assert_eq!(nc.cardinal_neighbors(0, 0).len(), 2);
        assert_eq!(nc.cardinal_neighbors(2, 2).len(), 4);
    }

    #[test]
    fn hidden_and_flagged_counts() {
        let mut cells = vec![CellView::Hidden; 9];
        cells[0] = CellView::Flagged;
        cells[1] = CellView::Revealed(1);
        let snap = Snapshot::new(3, 3, cells);
        assert_eq!(hidden_count(&snap), 7);
        assert_eq!(flagged_count(&snap), 1);
        assert!(!has_revealed_zero(&snap));
    }

    #[test]
    fn revealed_zero_detected() {
        let mut cells = vec![CellView::Hidden; 4];
        cells[0] = CellView::Revealed(0);
        let snap = Snapshot::new(2, 2, cells);
        assert!(has_revealed_zero(&snap));
    }

    #[test]
    #[should_panic]
    fn mismatched_cell_buffer_panics() {
        let _ = Snapshot::new(2, 2, vec![CellView::Hidden; 3]);
    }

    #[test]
    fn all_hidden_snapshot_has_no_numbered_anchor() {
        let snap = uniform(4, 4, CellView::Hidden);
        assert_eq!(revealed_numbered_cells(&snap).count(), 0);
    }
}
