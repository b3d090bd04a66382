//! Core types shared across the crate.
//! Pure data with no external dependencies beyond serde derives.

use serde::{Serialize, Serializer};

/// Playfield dimensions (interior cells).
pub const WIDTH: i16 = 10;
pub const HEIGHT: i16 = 20;

/// Grid storage dimensions: one sentinel column on each side, one sentinel
/// row below the field.
pub const GRID_COLS: usize = WIDTH as usize + 2;
pub const GRID_ROWS: usize = HEIGHT as usize + 1;

/// Number of shape styles dealt by the randomizer. Style indices are opaque
/// to the core; the renderer maps them through its palette.
pub const STYLE_COUNT: usize = 4;

/// A fresh piece enters play shifted by this much from its dealt lattice
/// position, so it straddles the top edge of the field.
pub const SPAWN_DX: i16 = 5;
pub const SPAWN_DY: i16 = -1;

/// The on-deck piece is reported in render coordinates offset into the
/// preview area to the right of the field.
pub const READY_DX: i16 = WIDTH + 3;
pub const READY_DY: i16 = 2;

/// Automatic downward shift fires once every this many ticks.
pub const AUTO_DROP_CYCLE: i32 = 11;

/// Upper bound on accumulated swap currency.
pub const SWAP_POINT_CAP: u8 = 30;

/// Cell occupancy marker. Negative values are unoccupied or sentinel;
/// `>= 0` identifies the shape that locked there (doubles as color index).
pub type Style = i8;

/// Wall/border sentinel.
pub const WALL: Style = -1;
/// Unoccupied interior cell.
pub const EMPTY: Style = -3;

/// Sentinel-framed cell storage. Row `HEIGHT` and columns 0 and `WIDTH+1`
/// hold `WALL` permanently.
pub type Grid = [[Style; GRID_COLS]; GRID_ROWS];

/// An interior row framed by the two wall sentinels.
pub fn empty_row() -> [Style; GRID_COLS] {
    let mut row = [EMPTY; GRID_COLS];
    row[0] = WALL;
    row[GRID_COLS - 1] = WALL;
    row
}

/// An empty playfield with the full sentinel frame in place.
pub fn fresh_grid() -> Grid {
    let mut grid = [empty_row(); GRID_ROWS];
    grid[GRID_ROWS - 1] = [WALL; GRID_COLS];
    grid
}

/// Per-tick input vector: `[horizontal, vertical, swap, pause]`.
///
/// - horizontal: -1 left held, 0 released, 1 right held
/// - vertical: 1 rotate request, 0 released, -1 down held
/// - swap: 1 while the swap key is held
/// - pause: 1 while the game should stay frozen (level, not edge)
pub type InputCodes = [i8; 4];

pub const CH_HORIZONTAL: usize = 0;
pub const CH_VERTICAL: usize = 1;
pub const CH_SWAP: usize = 2;
pub const CH_PAUSE: usize = 3;

/// Directional blocked-flag indices in `Tetromino::ban_moves`.
/// Up is never computed; pieces are never pushed upward.
pub const BAN_UP: usize = 0;
pub const BAN_RIGHT: usize = 1;
pub const BAN_DOWN: usize = 2;
pub const BAN_LEFT: usize = 3;

/// Frame signal reported in every diff's status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Ordinary simulation frame; the diff lists apply.
    Normal,
    /// Frozen by the pause channel; the diff is empty.
    Paused,
    /// A piece locked above the field; the diff is empty and the board
    /// resets on the next unpaused tick.
    GameOver,
    /// The board was just reset; the renderer must wipe every field cell.
    ClearAll,
}

impl Signal {
    /// Numeric code on the wire, matching what the renderer switches on.
    pub fn code(self) -> u8 {
        match self {
            Signal::Normal => 0,
            Signal::Paused => 1,
            Signal::GameOver => 2,
            Signal::ClearAll => 3,
        }
    }
}

impl Serialize for Signal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}
