//! Deduction and probability engine for an autonomous Minesweeper solver.
//!
//! Given a read-only [`types::Snapshot`] of one decision, [`strategy::decide`]
//! cascades four certain pattern rules, then a global-weighted probability
//! calculation, then a random seed move when no revealed zero exists yet to
//! deduce from at all. Board generation, rendering, input, the game loop,
//! and play statistics are external collaborators, not part of this crate.

pub mod config;
pub mod constraint;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod grouper;
pub mod mathutil;
pub mod probability;
pub mod rng;
pub mod rules;
pub mod strategy;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::EngineConfig;
pub use emitter::{emit, EmitError, MoveSink};
pub use error::{EngineError, Result};
pub use rng::EngineRng;
pub use strategy::decide;
pub use types::{Action, BoardSnapshot, CellView, Snapshot};
