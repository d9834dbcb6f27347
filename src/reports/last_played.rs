use crate::bgg::PlayRecord;

use super::{Report, BODY_FONT_SIZE};

/// The most recent plays exactly as the API returned them; the plays feed
/// is already newest-first, so no re-sorting happens here.
pub fn last_played_report(plays: &[PlayRecord], limit: usize) -> Report {
    let mut body = String::new();
    for play in plays.iter().take(limit) {
        body.push_str(&format!(
            "{}: {}\n",
            play.date.format("%Y-%m-%d"),
            play.game_name
        ));
    }

    Report {
        title: format!("Last {} Games Played", limit),
        body,
        font_size: BODY_FONT_SIZE,
    }
}
