use std::time::Duration;

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// A new block falls every gravity tick.
pub const GRAVITY_TICK: Duration = Duration::from_millis(333);
pub const FRAME_RATE: u32 = 60;

// Without key release events, a key counts as released after this long
// without a press or repeat.
pub const KEY_TIMEOUT: Duration = Duration::from_millis(100);
