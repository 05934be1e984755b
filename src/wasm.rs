//! WASM surface: the teacher crate's flat-array FFI convention pointed at
//! the new engine instead of the old board-generation/tank-solver one.

use wasm_bindgen::prelude::*;

use crate::config::EngineConfig;
use crate::rng::EngineRng;
use crate::strategy::decide;
use crate::types::{Action, CellView, Snapshot};

fn snapshot_from_flat(
    width: usize,
    height: usize,
    visible_flat: &[i8],
    flags_flat: &[u8],
) -> Snapshot {
    let cells: Vec<CellView> = visible_flat
        .iter()
        .zip(flags_flat.iter())
        .map(|(&v, &flagged)| {
            if flagged != 0 {
                CellView::Flagged
            } else if v < 0 {
                CellView::Hidden
            } else {
                CellView::Revealed(v as u8)
            }
        })
        .collect();
    Snapshot::new(width, height, cells)
}

/// Decide the next move for a flat-array board view.
///
/// Returns a JS object `{ kind: "reveal" | "flag" | "none", x, y, evaluable }`.
#[wasm_bindgen(js_name = "decide")]
pub fn wasm_decide(
    width: usize,
    height: usize,
    visible_flat: &[i8],
    flags_flat: &[u8],
    total_mines: usize,
    seed: Option<u32>,
) -> JsValue {
    let snapshot = snapshot_from_flat(width, height, visible_flat, flags_flat);
    let config = EngineConfig::default();
    let mut rng = match seed {
        Some(s) => EngineRng::from_seed(s as u64),
        None => EngineRng::new(),
    };

    let obj = js_sys::Object::new();
    match decide(&snapshot, total_mines, &config, &mut rng) {
        Ok((action, evaluable)) => {
            let (kind, x, y) = match action {
                Action::Reveal { x, y } => ("reveal", x, y),
                Action::Flag { x, y } => ("flag", x, y),
                Action::NoMove => ("none", 0, 0),
            };
            js_sys::Reflect::set(&obj, &"kind".into(), &kind.into()).unwrap();
            js_sys::Reflect::set(&obj, &"x".into(), &(x as u32).into()).unwrap();
            js_sys::Reflect::set(&obj, &"y".into(), &(y as u32).into()).unwrap();
            js_sys::Reflect::set(&obj, &"evaluable".into(), &evaluable.into()).unwrap();
        }
        Err(err) => {
            js_sys::Reflect::set(&obj, &"kind".into(), &"error".into()).unwrap();
            js_sys::Reflect::set(&obj, &"error".into(), &err.to_string().into()).unwrap();
        }
    }
    obj.into()
}

/// Ping function to verify WASM is loaded.
#[wasm_bindgen(js_name = "ping")]
pub fn wasm_ping() -> String {
    "minesweeper-solver-engine ready".to_string()
}
