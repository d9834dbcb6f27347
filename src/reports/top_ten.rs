use std::cmp::Ordering;

use crate::bgg::CollectionItem;

use super::{Report, BODY_FONT_SIZE, TOP_LIST_LEN};

const TITLE: &str = "My Top 10 Games";

// How many plays it takes before half the weight sits on the personal
// rating instead of the collection mean.
const SHRINKAGE_PLAYS: f64 = 25.0;

/// Ranks the rated part of the collection by a shrinkage-adjusted score:
/// sparsely played games are pulled toward the collection mean so a single
/// enthusiastic rating does not dominate the list.
pub fn personal_top_ten_report(collection: &[CollectionItem]) -> Report {
    let rated: Vec<(&CollectionItem, f64)> = collection
        .iter()
        .filter_map(|item| item.rating.map(|rating| (item, rating)))
        .collect();

    let mut body = String::new();
    if !rated.is_empty() {
        let mean = rated.iter().map(|(_, rating)| *rating).sum::<f64>() / rated.len() as f64;
        let mut ranked: Vec<GameSummary> = rated
            .into_iter()
            .map(|(item, rating)| GameSummary {
                name: item.name.clone(),
                weighted_rating: weighted_rating(rating, item.plays, mean),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.weighted_rating
                .partial_cmp(&a.weighted_rating)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });

        for (position, game) in ranked.iter().take(TOP_LIST_LEN).enumerate() {
            body.push_str(&format!("{:<3}{}\n", position + 1, game.name));
        }
    }

    Report {
        title: TITLE.to_string(),
        body,
        font_size: BODY_FONT_SIZE,
    }
}

/// Fallback page shown when the collection export never left the queue.
pub fn collection_unavailable_report() -> Report {
    Report {
        title: TITLE.to_string(),
        body: "Could not fetch collection.\n".to_string(),
        font_size: BODY_FONT_SIZE,
    }
}

struct GameSummary {
    name: String,
    weighted_rating: f64,
}

pub(crate) fn weighted_rating(rating: f64, plays: u32, collection_mean: f64) -> f64 {
    let plays = plays as f64;
    let weight = plays / (plays + SHRINKAGE_PLAYS);
    weight * rating + (1.0 - weight) * collection_mean
}
