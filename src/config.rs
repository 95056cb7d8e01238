//! Game configuration constants.
//!
//! Grid dimensions, actor tuning and room odds. There is no config file; the only
//! runtime knob is `RUST_LOG`.

/// Number of room rows in the cave.
pub const ROWS: i32 = 5;

/// Number of room columns in the cave.
pub const COLUMNS: i32 = 7;

/// Edge length of one room in window pixels.
pub const CELL_SIZE: i32 = 100;

pub const PLAYER_START_HEALTH: i32 = 100;

/// Move budget restored at the end of every monster turn.
pub const MOVES_PER_TURN: i32 = 2;

pub const MONSTER_DAMAGE: i32 = 20;

/// Share of current health a trap takes, rounded up.
pub const TRAP_PENALTY_PERCENT: i32 = 20;

pub const POISON_EFFECT: i32 = -10;
pub const CURE_EFFECT: i32 = 25;

// Room odds in percent, drawn from a single roll per cell.
pub const TRAP_CHANCE: i32 = 30;
pub const POISON_CHANCE: i32 = 20;
pub const CURE_CHANCE: i32 = 20;

/// (row, col) of the player's starting room.
pub const PLAYER_START: (i32, i32) = (0, 0);

/// (row, col) of the monster's lair, the opposite corner.
pub const MONSTER_START: (i32, i32) = (ROWS - 1, COLUMNS - 1);

/// Font asset that must be present in the working directory.
pub const FONT_PATH: &str = "arial.ttf";

pub const WINDOW_TITLE: &str = "Cave Escape";

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";
