//! Piece module - tetromino shape generation, translation and rotation.
//!
//! Shapes are not table-driven: apart from the straight 4-in-a-row piece,
//! every shape is the 3x2 lattice with two points excluded. The exclusion
//! rule below rejects any pair that would split the lattice or leave fewer
//! than four connected cells, so the survivors are exactly the L, J, T, S,
//! Z and O faces (O comes up twice as often under uniform sampling and is
//! deliberately not corrected).
//!
//! Lattice, exclusions marked `X`:
//!
//! ```text
//! O O .  O . O  . O O  O . .  . . O  + + +
//! . . .  . . .  . . .  O . .  . . O  + . +
//! ```

use crate::core::rng::SimpleRng;
use crate::types::Style;

/// A single movable grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Block {
    pub x: i16,
    pub y: i16,
    pub style: Style,
}

impl Block {
    pub fn set(&mut self, x: i16, y: i16, style: Style) {
        self.x = x;
        self.y = y;
        self.style = style;
    }
}

/// A 4-cell shape plus its directional blocked-flags.
///
/// The two board slots are recycled: `deal` re-initializes the blocks in
/// place rather than allocating, so a "blank" piece never aliases another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tetromino {
    pub blocks: [Block; 4],
    /// `[up, right, down, left]`; up stays false, no upward collision
    /// check exists anywhere in the simulation.
    pub ban_moves: [bool; 4],
}

impl Tetromino {
    pub fn new() -> Self {
        Self {
            blocks: [Block::default(); 4],
            ban_moves: [false; 4],
        }
    }

    /// Re-initialize this slot with a fresh shape of the given style.
    ///
    /// `line` forces the straight 4-in-a-row shape. Otherwise two excluded
    /// points are rejection-sampled from the 3x2 lattice; after three
    /// failed attempts the straight shape is dealt instead, which is the
    /// only way it enters normal play.
    ///
    /// Right and left start out blocked until the first legality pass runs.
    pub fn deal(&mut self, rng: &mut SimpleRng, style: Style, line: bool) {
        self.ban_moves = [false, true, false, true];

        if line {
            self.deal_line(style);
            return;
        }

        let mut tries = 0;
        let (ax, ay, bx, by) = loop {
            tries += 1;
            if tries > 3 {
                self.deal_line(style);
                return;
            }
            let ax = rng.next_range(3) as i16;
            let bx = rng.next_range(3) as i16;
            let ay = rng.next_range(2) as i16;
            let by = rng.next_range(2) as i16;

            let rejected = (ax == bx && ay == by)
                || (ay != by && ((ax - bx).abs() == 1 || (ax == bx && ax != 2)));
            if !rejected {
                break (ax, ay, bx, by);
            }
        };

        // Remaining lattice points in column-major order.
        let mut i = 0;
        for x in 0..3 {
            for y in 0..2 {
                if !((x == ax && y == ay) || (x == bx && y == by)) {
                    self.blocks[i].set(x, y, style);
                    i += 1;
                }
            }
        }
    }

    fn deal_line(&mut self, style: Style) {
        for (x, block) in self.blocks.iter_mut().enumerate() {
            block.set(x as i16, 0, style);
        }
    }

    /// Translate all four cells. No bounds checking; legality is the
    /// caller's job.
    pub fn move_by(&mut self, dx: i16, dy: i16) {
        for block in &mut self.blocks {
            block.x += dx;
            block.y += dy;
        }
    }

    /// Rotate 90 degrees about the bounding-box minimum corner within a
    /// 3x3 frame.
    ///
    /// Clockwise swaps the axes and flips vertically; counterclockwise
    /// swaps and flips horizontally. Degenerate one-row/one-column shapes
    /// are forced clockwise (the straight piece has a single effective
    /// orientation pair). When every cell lands off the frame's minimum
    /// column (clockwise) or row (counterclockwise), the whole shape is
    /// shifted one cell back toward it; downstream legality checks depend
    /// on exactly these output positions.
    pub fn rotate(&mut self, counterclockwise: bool) {
        let mut min_x = self.blocks[0].x;
        let mut min_y = self.blocks[0].y;
        let mut line_x = true;
        let mut line_y = true;
        for block in &self.blocks[1..] {
            min_x = min_x.min(block.x);
            min_y = min_y.min(block.y);
            line_x = line_x && block.x == self.blocks[0].x;
            line_y = line_y && block.y == self.blocks[0].y;
        }

        let ccw = if line_x || line_y {
            false
        } else {
            counterclockwise
        };

        let mut off_axis = 0;
        for block in &mut self.blocks {
            let old_x = block.x;
            block.x = if ccw {
                block.y - min_y
            } else {
                2 - (block.y - min_y)
            } + min_x;
            block.y = if ccw {
                2 - (old_x - min_x)
            } else {
                old_x - min_x
            } + min_y;
            off_axis += if ccw {
                (block.y != min_y) as usize
            } else {
                (block.x != min_x) as usize
            };
        }

        if off_axis == self.blocks.len() {
            if ccw {
                self.move_by(0, -1);
            } else {
                self.move_by(-1, 0);
            }
        }
    }

    /// Cell positions as a set-comparable, order-independent list.
    pub fn cell_set(&self) -> [(i16, i16); 4] {
        let mut cells = [(0, 0); 4];
        for (slot, block) in cells.iter_mut().zip(&self.blocks) {
            *slot = (block.x, block.y);
        }
        cells.sort_unstable();
        cells
    }
}

impl Default for Tetromino {
    fn default() -> Self {
        Self::new()
    }
}
