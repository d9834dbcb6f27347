mod conventions;
mod hot_games;
mod last_played;
mod top_ten;

pub use conventions::convention_countdown_report;
pub use hot_games::hot_games_report;
pub use last_played::last_played_report;
pub use top_ten::{collection_unavailable_report, personal_top_ten_report};

/// A formatted page: what the renderer draws, nothing more.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub body: String,
    pub font_size: u32,
}

pub(crate) const BODY_FONT_SIZE: u32 = 15;
pub(crate) const TOP_LIST_LEN: usize = 10;
