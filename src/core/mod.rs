//! Core game logic: deterministic, renderer-agnostic, no platform I/O.

pub mod board;
pub mod diff;
pub mod piece;
pub mod rng;

pub use board::Board;
pub use diff::{CellPatch, FrameLog, Status, StepDiff};
pub use piece::{Block, Tetromino};
pub use rng::{BagShuffle, SimpleRng};
