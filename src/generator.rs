//! Configuration generation: enumerate, or sample, mine placements over a
//! group's cells that satisfy every constraint in that group.

use std::collections::HashSet;

use log::debug;

use crate::config::EngineConfig;
use crate::constraint::Constraint;
use crate::rng::EngineRng;

/// One candidate placement of mines over a constraint group's cells.
pub struct Configuration {
    pub mines: HashSet<(usize, usize)>,
    pub mine_count: usize,
}

fn is_valid(constraints: &[Constraint], mines: &HashSet<(usize, usize)>) -> bool {
    constraints.iter().all(|c| c.is_satisfied_by(mines))
}

/// Below `exact_threshold` cells, enumerate every subset exactly; above it,
/// draw `sample_size` independent random placements and keep the valid ones.
pub fn generate_configurations(
    constraints: &[Constraint],
    cells: &[(usize, usize)],
    config: &EngineConfig,
    rng: &mut EngineRng,
) -> Vec<Configuration> {
    if cells.is_empty() {
        return Vec::new();
    }

    if cells.len() <= config.exact_threshold {
        debug!("C5: exact enumeration over {} cells", cells.len());
        enumerate_exact(constraints, cells)
    } else {
        debug!(
            "C5: sampling {} draws over {} cells (above exact threshold {})",
            config.sample_size,
            cells.len(),
            config.exact_threshold
        );
        sample(constraints, cells, config.sample_size, rng)
    }
}

fn enumerate_exact(constraints: &[Constraint], cells: &[(usize, usize)]) -> Vec<Configuration> {
    let n = cells.len();
    let mut out = Vec::new();
    for mask in 0u64..(1u64 << n) {
        let mines: HashSet<(usize, usize)> = (0..n)
            .filter(|i| (mask >> i) & 1 == 1)
            .map(|i| cells[i])
            .collect();
        if is_valid(constraints, &mines) {
            let mine_count = mines.len();
            out.push(Configuration { mines, mine_count });
        }
    }
    out
}

fn sample(
    constraints: &[Constraint],
    cells: &[(usize, usize)],
    sample_size: usize,
    rng: &mut EngineRng,
) -> Vec<Configuration> {
    let mut out = Vec::new();
    for _ in 0..sample_size {
        let mines: HashSet<(usize, usize)> =
            cells.iter().copied().filter(|_| rng.coin_flip()).collect();
        if is_valid(constraints, &mines) {
            let mine_count = mines.len();
            out.push(Configuration { mines, mine_count });
        }
    }
    out
}
