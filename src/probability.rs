//! Global-weighted per-cell mine probability: groups constraints, generates
//! candidate configurations per group, then weights every configuration by
//! how many ways it extends over the *entire* board's remaining mine
//! budget, not just its own group. This is the part the original Python
//! implementation's alternate validator deliberately skipped (its own
//! comment calls out dodging a "0 valid configurations" case); this crate
//! does the global weighting properly instead of falling back silently.

use std::collections::HashMap;

use log::warn;

use crate::config::EngineConfig;
use crate::constraint::Constraint;
use crate::generator::generate_configurations;
use crate::grouper::group_constraints;
use crate::mathutil::{log_comb, logsumexp, weighted_mean_log};
use crate::rng::EngineRng;
use crate::types::{hidden_count, flagged_count, BoardSnapshot};

/// Per-cell mine probability, plus the shared probability for every hidden
/// cell not touched by any constraint.
#[derive(Debug, Clone, Default)]
pub struct ProbabilityMap {
    pub per_cell: HashMap<(usize, usize), f64>,
    pub unconstrained: f64,
}

impl ProbabilityMap {
    pub fn probability(&self, x: usize, y: usize) -> f64 {
        self.per_cell.get(&(x, y)).copied().unwrap_or(self.unconstrained)
    }

    /// The constrained cell with the highest probability, if it meets `threshold`.
    pub fn find_highest(&self, threshold: f64) -> Option<((usize, usize), f64)> {
        self.per_cell
            .iter()
            .map(|(&c, &p)| (c, p))
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
            .filter(|&(_, p)| p >= threshold)
    }

    /// The constrained cell with the lowest probability, breaking ties by
    /// distance to the nearest revealed cell (closer to the frontier wins),
    /// then by uniform random choice among whatever's left.
    pub fn find_lowest(
        &self,
        snapshot: &impl BoardSnapshot,
        rng: &mut EngineRng,
    ) -> Option<((usize, usize), f64)> {
        if self.per_cell.is_empty() {
            return None;
        }
        let min_p = self.per_cell.values().cloned().fold(f64::INFINITY, f64::min);
        let candidates: Vec<(usize, usize)> = self
            .per_cell
            .iter()
            .filter(|&(_, &p)| p == min_p)
            .map(|(&c, _)| c)
            .collect();
        if candidates.len() == 1 {
            return Some((candidates[0], min_p));
        }

        let min_dist = candidates
            .iter()
            .map(|&c| frontier_distance(snapshot, c))
            .min()
            .unwrap();
        let mut closest: Vec<(usize, usize)> = candidates
            .into_iter()
            .filter(|&c| frontier_distance(snapshot, c) == min_dist)
            .collect();
        // Sorted first so the pick below depends only on `rng`'s seed, not
        // on HashMap's per-instance random iteration order.
        closest.sort_unstable();
        let idx = rng.gen_range(closest.len());
        Some((closest[idx], min_p))
    }
}

fn frontier_distance(snapshot: &impl BoardSnapshot, (x, y): (usize, usize)) -> usize {
    let mut best = usize::MAX;
    for cx in 0..snapshot.width() {
        for cy in 0..snapshot.height() {
            if snapshot.cell(cx, cy).revealed_value().is_some() {
                let d = (x as isize - cx as isize).unsigned_abs()
                    + (y as isize - cy as isize).unsigned_abs();
                if d < best {
                    best = d;
                }
            }
        }
    }
    if best == usize::MAX {
        0
    } else {
        best
    }
}

/// Compute the probability map given the already-extracted constraints.
///
/// `total_mines` is the total mine count for the board; `flagged_count` is
/// subtracted to get the remaining mine budget.
pub fn calculate_probabilities(
    snapshot: &impl BoardSnapshot,
    constraints: &[Constraint],
    total_mines: usize,
    config: &EngineConfig,
    rng: &mut EngineRng,
) -> ProbabilityMap {
    let hidden = hidden_count(snapshot);
    let flagged = flagged_count(snapshot);
    let remaining = total_mines.saturating_sub(flagged);

    let uniform_fallback = || {
        let p = if hidden == 0 { 0.0 } else { remaining as f64 / hidden as f64 };
        ProbabilityMap { per_cell: HashMap::new(), unconstrained: p }
    };

    if constraints.is_empty() || hidden == 0 {
        return uniform_fallback();
    }

    let groups = group_constraints(constraints);
    if groups.is_empty() {
        return uniform_fallback();
    }

    let mut all_constrained: HashMap<(usize, usize), ()> = HashMap::new();
    let mut merged_constraints: Vec<Constraint> = Vec::new();
    for g in &groups {
        for &cell in &g.cells {
            all_constrained.insert(cell, ());
        }
        merged_constraints.extend(g.constraints.iter().cloned());
    }
    let constrained_cells: Vec<(usize, usize)> = all_constrained.into_keys().collect();
    let unconstrained_count = hidden.saturating_sub(constrained_cells.len());

    let configs = generate_configurations(&merged_constraints, &constrained_cells, config, rng);
    if configs.is_empty() {
        warn!("C7: generator produced zero valid configurations; falling back to uniform probability");
        return uniform_fallback();
    }

    let mut kept_indices = Vec::with_capacity(configs.len());
    let mut log_weights = Vec::with_capacity(configs.len());
    for (i, cfg) in configs.iter().enumerate() {
        if cfg.mine_count > remaining {
            continue;
        }
        let budget_for_unconstrained = remaining - cfg.mine_count;
        let lw = log_comb(unconstrained_count, budget_for_unconstrained);
        if lw.is_finite() {
            kept_indices.push(i);
            log_weights.push(lw);
        }
    }

    if log_weights.is_empty() {
        warn!("C7: no configuration compatible with the global mine budget; falling back to uniform probability");
        return uniform_fallback();
    }

    let log_total = logsumexp(&log_weights);

    let mut per_cell = HashMap::new();
    for &cell in &constrained_cells {
        let cell_log_weights: Vec<f64> = kept_indices
            .iter()
            .zip(&log_weights)
            .filter(|(&i, _)| configs[i].mines.contains(&cell))
            .map(|(_, &lw)| lw)
            .collect();
        let p = if cell_log_weights.is_empty() {
            0.0
        } else {
            (logsumexp(&cell_log_weights) - log_total).exp()
        };
        per_cell.insert(cell, p);
    }

    let unconstrained_prob = if unconstrained_count == 0 {
        0.0
    } else {
        let values: Vec<f64> = kept_indices
            .iter()
            .map(|&i| (remaining as f64 - configs[i].mine_count as f64) / unconstrained_count as f64)
            .collect();
        weighted_mean_log(&log_weights, &values)
    };

    ProbabilityMap { per_cell, unconstrained: unconstrained_prob }
}
