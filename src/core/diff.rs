//! Diff module - turns one simulation tick into the minimal set of screen
//! mutations.
//!
//! `FrameLog` remembers what the renderer was last told (locked cells, the
//! falling piece, the preview piece) and reports only the deltas. A
//! renderer that replays every `StepDiff` against a blank screen always
//! shows exactly the board's composite state; nothing is ever repainted
//! that did not change.
//!
//! Coordinates in the emitted patches are render coordinates: field cells
//! shift one column left (the wall sentinel is not drawn), preview cells
//! shift into the area right of the field.

use std::fmt;

use serde::Serialize;

use crate::core::piece::{Block, Tetromino};
use crate::types::{fresh_grid, Grid, Signal, Style, HEIGHT, READY_DX, READY_DY, WIDTH};

/// One cell mutation in render coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellPatch {
    pub x: i16,
    pub y: i16,
    pub style: Style,
}

impl CellPatch {
    pub fn pos(&self) -> (i16, i16) {
        (self.x, self.y)
    }
}

/// Scoreboard and lifecycle signal attached to every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub signal: Signal,
    pub swap_points: u8,
    pub lines: u32,
}

/// Everything the renderer needs to catch up with one tick.
///
/// `removed` cells are erased, `added` cells painted, `recolored` cells
/// restyled in place. `ready` is `Some` only when the preview piece
/// changed and then carries its complete new cell list; the renderer
/// wipes the preview area and draws these. A cell position never appears
/// in more than one of the three field lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDiff {
    pub removed: Vec<CellPatch>,
    pub added: Vec<CellPatch>,
    pub recolored: Vec<CellPatch>,
    pub ready: Option<Vec<CellPatch>>,
    pub status: Status,
}

impl StepDiff {
    /// A frame that changes no cells: paused, game over, or the clear-all
    /// announcement after a reset.
    pub fn signal_only(status: Status) -> Self {
        Self {
            removed: Vec::new(),
            added: Vec::new(),
            recolored: Vec::new(),
            ready: None,
            status,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
            && self.added.is_empty()
            && self.recolored.is_empty()
            && self.ready.is_none()
    }
}

impl fmt::Display for StepDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "-{} +{} ~{} ready:{} signal:{}",
            self.removed.len(),
            self.added.len(),
            self.recolored.len(),
            self.ready.is_some(),
            self.status.signal.code(),
        )
    }
}

/// Last-reported screen state and the differ over it.
#[derive(Debug, Clone)]
pub struct FrameLog {
    /// Locked cells as of the previous frame.
    screen: Grid,
    prev_active: Option<[Block; 4]>,
    prev_ready: Option<[Block; 4]>,
}

/// A falling-piece cell is drawable once it enters the visible rows;
/// legality checks already keep x inside the field.
fn visible(block: &Block) -> bool {
    block.y >= 0
}

fn field_patch(block: &Block) -> CellPatch {
    CellPatch {
        x: block.x - 1,
        y: block.y,
        style: block.style,
    }
}

impl FrameLog {
    pub fn new() -> Self {
        Self {
            screen: fresh_grid(),
            prev_active: None,
            prev_ready: None,
        }
    }

    /// Forget everything; the renderer was told to wipe.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Compute the delta from the previous frame to the given one and
    /// adopt the given frame as previous.
    pub fn diff(
        &mut self,
        grid: &Grid,
        active: &Tetromino,
        ready: &Tetromino,
        status: Status,
    ) -> StepDiff {
        let mut removed = Vec::new();
        let mut added = Vec::new();
        let mut recolored = Vec::new();

        self.diff_active(active, &mut removed, &mut added, &mut recolored);
        self.diff_grid(grid, &mut removed, &mut added, &mut recolored);
        let ready_cells = self.diff_ready(ready);

        // A piece that locked in place shows up as a remove (the falling
        // cell) plus an add (the locked cell) at the same position. Fold
        // every such pair into a recolor, or into nothing when the style
        // matches.
        let mut consumed = vec![false; removed.len()];
        let mut folded_added = Vec::with_capacity(added.len());
        for add in added {
            match (0..removed.len()).find(|&i| !consumed[i] && removed[i].pos() == add.pos()) {
                Some(i) => {
                    consumed[i] = true;
                    if removed[i].style != add.style {
                        recolored.push(add);
                    }
                }
                None => folded_added.push(add),
            }
        }
        let removed = removed
            .into_iter()
            .zip(consumed)
            .filter_map(|(r, used)| (!used).then_some(r))
            .collect();

        StepDiff {
            removed,
            added: folded_added,
            recolored,
            ready: ready_cells,
            status,
        }
    }

    /// Slot-wise comparison of the falling piece, one block per index.
    fn diff_active(
        &mut self,
        active: &Tetromino,
        removed: &mut Vec<CellPatch>,
        added: &mut Vec<CellPatch>,
        recolored: &mut Vec<CellPatch>,
    ) {
        match self.prev_active {
            None => {
                for block in active.blocks.iter().filter(|b| visible(b)) {
                    added.push(field_patch(block));
                }
            }
            Some(prev) => {
                for (old, new) in prev.iter().zip(&active.blocks) {
                    match (visible(old), visible(new)) {
                        (false, false) => {}
                        (false, true) => added.push(field_patch(new)),
                        (true, false) => removed.push(field_patch(old)),
                        (true, true) => {
                            if (old.x, old.y) != (new.x, new.y) {
                                removed.push(field_patch(old));
                                added.push(field_patch(new));
                            } else if old.style != new.style {
                                recolored.push(field_patch(new));
                            }
                        }
                    }
                }
            }
        }
        self.prev_active = Some(active.blocks);
    }

    /// Bottom-up sweep of the locked stack. Stops at the first row that is
    /// empty on both sides of the comparison; gravity keeps everything
    /// above such a row empty too.
    fn diff_grid(
        &mut self,
        grid: &Grid,
        removed: &mut Vec<CellPatch>,
        added: &mut Vec<CellPatch>,
        recolored: &mut Vec<CellPatch>,
    ) {
        for y in (0..HEIGHT).rev() {
            let mut occupied = 0;
            for x in 1..=WIDTH {
                let old = self.screen[y as usize][x as usize];
                let new = grid[y as usize][x as usize];
                if old >= 0 || new >= 0 {
                    occupied += 1;
                }
                let patch = CellPatch {
                    x: x - 1,
                    y,
                    style: if new >= 0 { new } else { old },
                };
                match (old >= 0, new >= 0) {
                    (false, true) => added.push(patch),
                    (true, false) => removed.push(patch),
                    (true, true) if old != new => recolored.push(patch),
                    _ => {}
                }
            }
            self.screen[y as usize] = grid[y as usize];
            if occupied == 0 {
                break;
            }
        }
    }

    /// The preview piece is small and replaced wholesale on any change.
    fn diff_ready(&mut self, ready: &Tetromino) -> Option<Vec<CellPatch>> {
        if self.prev_ready == Some(ready.blocks) {
            return None;
        }
        self.prev_ready = Some(ready.blocks);
        Some(
            ready
                .blocks
                .iter()
                .map(|b| CellPatch {
                    x: b.x + READY_DX,
                    y: b.y + READY_DY,
                    style: b.style,
                })
                .collect(),
        )
    }
}

impl Default for FrameLog {
    fn default() -> Self {
        Self::new()
    }
}
