//! Property-based tests run against randomly constructed, internally
//! consistent boards: a ground-truth mine layout is chosen first, then every
//! `Revealed(v)` cell's value is derived from it, so every board produced
//! here is guaranteed legal and the ground truth is available to check the
//! engine's claims against.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use minesweeper_solver_engine::constraint::extract_all_constraints;
use minesweeper_solver_engine::grouper::group_constraints;
use minesweeper_solver_engine::probability::calculate_probabilities;
use minesweeper_solver_engine::rng::EngineRng;
use minesweeper_solver_engine::types::{hidden_cells, revealed_numbered_cells, NeighborCache};
use minesweeper_solver_engine::{rules, CellView, EngineConfig, Snapshot};

/// Build a legal board: pick `mine_count` distinct mines at random, then
/// reveal each non-mine cell (independently, with probability
/// `reveal_percent / 100`) with its true adjacent-mine count. Mines
/// themselves are always left `Hidden` — the engine must never be told where
/// they are directly.
fn legal_board(
    seed: u64,
    width: usize,
    height: usize,
    mine_count: usize,
    reveal_percent: u8,
) -> (Snapshot, HashSet<(usize, usize)>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut all: Vec<(usize, usize)> =
        (0..width).flat_map(|x| (0..height).map(move |y| (x, y))).collect();
    all.shuffle(&mut rng);
    let mine_count = mine_count.min(all.len());
    let mines: HashSet<(usize, usize)> = all[..mine_count].iter().copied().collect();

    let nc = NeighborCache::new(width, height);
    let mut cells = vec![CellView::Hidden; width * height];
    for x in 0..width {
        for y in 0..height {
            if mines.contains(&(x, y)) {
                continue; // stays Hidden
            }
            let count = nc.neighbors(x, y).iter().filter(|c| mines.contains(c)).count() as u8;
            let reveal = rng.random_bool(reveal_percent as f64 / 100.0);
            let idx = x * height + y;
            cells[idx] = if reveal { CellView::Revealed(count) } else { CellView::Hidden };
        }
    }
    (Snapshot::new(width, height, cells), mines)
}

proptest! {
    #[test]
    fn extracted_constraints_are_sound_against_the_true_mine_layout(
        seed in any::<u64>(),
        width in 1usize..=6,
        height in 1usize..=6,
        mine_count in 0usize..=36,
        reveal_percent in 0u8..=100,
    ) {
        let (snap, mines) = legal_board(seed, width, height, mine_count, reveal_percent);
        let constraints = extract_all_constraints(&snap).expect("a truthfully revealed board is always legal");
        for c in &constraints {
            prop_assert!(c.is_satisfied_by(&mines), "constraint {:?} violated by true mines {:?}", c, mines);
        }
    }

    #[test]
    fn rule_actions_never_contradict_the_true_mine_layout(
        seed in any::<u64>(),
        width in 1usize..=6,
        height in 1usize..=6,
        mine_count in 0usize..=36,
        reveal_percent in 0u8..=100,
    ) {
        let (snap, mines) = legal_board(seed, width, height, mine_count, reveal_percent);
        for (x, y, _) in revealed_numbered_cells(&snap) {
            for action in [
                rules::saturation(&snap, x, y),
                rules::completion(&snap, x, y),
                rules::transitive(&snap, x, y),
                rules::subset_overlap(&snap, x, y),
            ] {
                match action {
                    Some(minesweeper_solver_engine::Action::Flag { x: fx, y: fy }) => {
                        prop_assert!(mines.contains(&(fx, fy)), "flagged ({fx},{fy}) is not actually a mine");
                    }
                    Some(minesweeper_solver_engine::Action::Reveal { x: rx, y: ry }) => {
                        prop_assert!(!mines.contains(&(rx, ry)), "revealed ({rx},{ry}) is actually a mine");
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn groups_partition_the_constrained_cells_exactly(
        seed in any::<u64>(),
        width in 1usize..=6,
        height in 1usize..=6,
        mine_count in 0usize..=36,
        reveal_percent in 0u8..=100,
    ) {
        let (snap, _mines) = legal_board(seed, width, height, mine_count, reveal_percent);
        let constraints = extract_all_constraints(&snap).unwrap();
        let groups = group_constraints(&constraints);

        let mut all_cells: HashSet<(usize, usize)> = HashSet::new();
        for c in &constraints {
            all_cells.extend(c.cells.iter().copied());
        }
        let mut union: HashSet<(usize, usize)> = HashSet::new();
        for g in &groups {
            union.extend(g.cells.iter().copied());
        }
        prop_assert_eq!(union, all_cells);

        for i in 0..groups.len() {
            for j in (i + 1)..groups.len() {
                prop_assert!(groups[i].cells.is_disjoint(&groups[j].cells));
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn probabilities_sum_to_the_remaining_mine_budget_under_exact_enumeration(
        seed in any::<u64>(),
        width in 1usize..=3,
        height in 1usize..=3,
        mine_count in 0usize..=9,
        reveal_percent in 0u8..=100,
    ) {
        // Small enough that every hidden region stays at or under
        // `exact_threshold`, so the generator always enumerates exhaustively
        // rather than sampling.
        let (snap, mines) = legal_board(seed, width, height, mine_count, reveal_percent);
        let constraints = extract_all_constraints(&snap).unwrap();
        let config = EngineConfig::default();
        let mut rng = EngineRng::from_seed(seed);
        let map = calculate_probabilities(&snap, &constraints, mines.len(), &config, &mut rng);

        let sum: f64 = hidden_cells(&snap).map(|(x, y)| map.probability(x, y)).sum();
        let remaining = mines.len() as f64;
        prop_assert!(
            (sum - remaining).abs() < 1e-6,
            "probabilities summed to {sum}, expected {remaining}"
        );
    }
}
