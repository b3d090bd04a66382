//! divtris - a Tetris core that reports each tick as a minimal set of
//! cell mutations instead of a full frame.
//!
//! The simulation lives in [`core`] and is pure: feed it a 4-channel
//! input vector per tick, get back a [`core::StepDiff`] naming exactly
//! the cells to erase, paint or restyle. Renderers stay dumb; the
//! browser front end maps each cell to a DOM node and the bundled
//! terminal player maps it to a character cell, both replaying the same
//! diffs.

pub mod core;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use crate::core::{Board, StepDiff};
pub use types::{InputCodes, Signal, Style, HEIGHT, WIDTH};
