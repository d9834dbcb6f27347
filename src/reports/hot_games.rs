use crate::bgg::HotItem;

use super::{Report, BODY_FONT_SIZE, TOP_LIST_LEN};

pub fn hot_games_report(items: &[HotItem]) -> Report {
    let mut body = String::new();
    for item in items.iter().take(TOP_LIST_LEN) {
        body.push_str(&format!("{:<3}{}\n", item.rank, item.name));
    }

    Report {
        title: "Top 10 Hot Games".to_string(),
        body,
        font_size: BODY_FONT_SIZE,
    }
}
