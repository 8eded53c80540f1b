// Central constants for paging, timing and limits.
pub const PRODUCT_PAGE_SIZE: usize = 5;
pub const CLUB_MENU_PAGE_SIZE: usize = 20; // 4 rows of 5 buttons, leaving one row for nav
pub const BUTTONS_PER_ROW: usize = 5;
pub const MAX_ACTION_ROWS: usize = 5;
pub const MAX_BUTTON_LABEL: usize = 80;

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 12;
pub const DEFAULT_EPHEMERAL_DELETE_SECS: u64 = 300;
pub const DEFAULT_HIGHLIGHT_COUNT: usize = 5;
pub const DEFAULT_COMMAND_PREFIX: &str = "!";

pub const CURRENCY_SYMBOL: &str = "₹";

// Command names, shared by slash registration, prefix parsing and help.
pub const CMD_BROWSE_CLUBS: &str = "browse-clubs";
pub const CMD_SEARCH: &str = "search";
pub const CMD_DAILY_HIGHLIGHTS: &str = "daily-highlights";
pub const CMD_HELP: &str = "help";
