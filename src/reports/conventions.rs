use chrono::NaiveDate;

use crate::config::Convention;

use super::{Report, BODY_FONT_SIZE};

/// Countdown lines for every convention that has not started yet.
/// `today` is passed in so the clock stays under the caller's control.
pub fn convention_countdown_report(conventions: &[Convention], today: NaiveDate) -> Report {
    let mut body = String::new();
    for convention in conventions {
        let days_until = (convention.start_date - today).num_days();
        if days_until < 0 {
            continue;
        }
        match days_until {
            0 => body.push_str(&format!("{} starts today!\n", convention.name)),
            1 => body.push_str(&format!("{} starts in 1 day.\n", convention.name)),
            days => body.push_str(&format!("{} starts in {} days.\n", convention.name, days)),
        }
    }

    Report {
        title: "Upcoming Gaming Conventions".to_string(),
        body,
        font_size: BODY_FONT_SIZE,
    }
}
