pub const GRID_ROWS: usize = 16;
pub const GRID_COLS: usize = 12;

// Tick periods in milliseconds for the two scheduler cadences
pub const GRAVITY_TICK_MS: u64 = 1000; // one automatic descent per second
pub const REDRAW_TICK_MS: u64 = 100;   // screen refresh
