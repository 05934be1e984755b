//! Strategy: the top-level cascade. Certain pattern rules first, then
//! probability-ranked fallback, then a random seed move when no revealed
//! zero exists yet to deduce from at all.

use log::trace;

use crate::config::EngineConfig;
use crate::constraint::extract_all_constraints;
use crate::error::Result;
use crate::probability::calculate_probabilities;
use crate::rng::EngineRng;
use crate::rules;
use crate::types::{has_revealed_zero, hidden_cells, revealed_numbered_cells, Action, BoardSnapshot};

/// Decide the next move for `snapshot`.
///
/// Returns the chosen action and whether it came from a deduction the
/// engine is certain about (`true`) or a probability/random fallback
/// (`false`).
pub fn decide(
    snapshot: &impl BoardSnapshot,
    total_mines: usize,
    config: &EngineConfig,
    rng: &mut EngineRng,
) -> Result<(Action, bool)> {
    if !has_revealed_zero(snapshot) {
        trace!("C8: no revealed zero yet, falling back to a random seed move");
        return Ok((random_seed_move(snapshot, rng), false));
    }

    let constraints = extract_all_constraints(snapshot)?;

    for (x, y, _) in revealed_numbered_cells(snapshot) {
        if let Some(action) = rules::saturation(snapshot, x, y) {
            return Ok((action, true));
        }
        if let Some(action) = rules::completion(snapshot, x, y) {
            return Ok((action, true));
        }
        if let Some(action) = rules::transitive(snapshot, x, y) {
            return Ok((action, true));
        }
        if let Some(action) = rules::subset_overlap(snapshot, x, y) {
            return Ok((action, true));
        }
    }

    let probabilities = calculate_probabilities(snapshot, &constraints, total_mines, config, rng);

    if let Some(((fx, fy), p)) = probabilities.find_highest(config.flag_threshold) {
        trace!("C8: flagging ({fx},{fy}) at probability {p:.3}");
        return Ok((Action::Flag { x: fx, y: fy }, true));
    }

    if let Some(((rx, ry), p)) = probabilities.find_lowest(snapshot, rng) {
        trace!("C8: revealing ({rx},{ry}) at probability {p:.3}");
        return Ok((Action::Reveal { x: rx, y: ry }, true));
    }

    trace!("C8: no certain rule, no confident probability, and no hidden cell left");
    Ok((Action::NoMove, true))
}

fn random_seed_move(snapshot: &impl BoardSnapshot, rng: &mut EngineRng) -> Action {
    let hidden: Vec<(usize, usize)> = hidden_cells(snapshot).collect();
    if hidden.is_empty() {
        return Action::NoMove;
    }
    let idx = rng.gen_range(hidden.len());
    let (x, y) = hidden[idx];
    Action::Reveal { x, y }
}
