use ratatui::style::palette::tailwind;

pub const PALETTE: tailwind::Palette = tailwind::BLUE;

pub const INFO_TEXT: [&str; 2] = [
    "(q/Esc) quit | (Tab/←/→) switch tab | (↑/↓) move row",
    "(r) refresh | (R) reload roster | (+/-) rows shown",
];

pub const ITEM_HEIGHT: usize = 1;
pub const POLL_DURATION_MS: u64 = 50;

pub const REFRESH_INTERVAL_SECS: u64 = 60;
pub const LOOKBACK_DAYS: u32 = 3;

pub const TOP_N_MIN: usize = 5;
pub const TOP_N_MAX: usize = 50;
pub const TOP_N_DEFAULT: usize = 10;

pub const FETCH_CONCURRENCY: usize = 16;
pub const HTTP_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

pub const LOG_FILE_PATH: &str = "/tmp/spx_movers.log";
