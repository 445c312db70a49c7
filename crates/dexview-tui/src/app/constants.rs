//! Application constants.

/// Number of grid rows to move when pressing Page Up/Down.
pub const PAGE_ROWS: usize = 3;

/// Cards shown at most while a search filter is active.
pub const SEARCH_DISPLAY_LIMIT: usize = 10;

/// Channel buffer size for page load results.
pub const LOAD_CHANNEL_SIZE: usize = 100;

/// Event loop tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 80;

/// Spinner frames shown while a page is loading.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
