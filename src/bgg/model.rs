use chrono::NaiveDate;
use quick_xml::DeError;
use serde::Deserialize;

/// One entry of the hot-games list, already ranked by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct HotItem {
    pub rank: u32,
    pub name: String,
}

/// One owned game from the user's collection. `rating` is absent for
/// games the user never rated (the API reports those as `N/A`).
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionItem {
    pub name: String,
    pub rating: Option<f64>,
    pub plays: u32,
}

/// One logged play, in the order the API returns them.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRecord {
    pub date: NaiveDate,
    pub game_name: String,
}

pub(super) fn parse_hot_games(xml: &str) -> Result<Vec<HotItem>, DeError> {
    let doc: HotItemsDoc = quick_xml::de::from_str(xml)?;
    Ok(doc
        .items
        .into_iter()
        .map(|item| HotItem {
            rank: item.rank,
            name: item.name.value,
        })
        .collect())
}

pub(super) fn parse_collection(xml: &str) -> Result<Vec<CollectionItem>, DeError> {
    let doc: CollectionDoc = quick_xml::de::from_str(xml)?;
    Ok(doc
        .items
        .into_iter()
        .map(|item| CollectionItem {
            name: item.name.value,
            rating: item
                .stats
                .and_then(|stats| stats.rating)
                .and_then(|rating| rating.value.parse::<f64>().ok()),
            plays: item.numplays,
        })
        .collect())
}

pub(super) fn parse_plays(xml: &str) -> Result<Vec<PlayRecord>, DeError> {
    let doc: PlaysDoc = quick_xml::de::from_str(xml)?;
    Ok(doc
        .plays
        .into_iter()
        .map(|play| PlayRecord {
            date: play.date,
            game_name: play.item.name,
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct HotItemsDoc {
    #[serde(rename = "item", default)]
    items: Vec<HotItemNode>,
}

#[derive(Debug, Deserialize)]
struct HotItemNode {
    #[serde(rename = "@rank")]
    rank: u32,
    name: ValueNode,
}

#[derive(Debug, Deserialize)]
struct ValueNode {
    #[serde(rename = "@value")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct CollectionDoc {
    #[serde(rename = "item", default)]
    items: Vec<CollectionItemNode>,
}

#[derive(Debug, Deserialize)]
struct CollectionItemNode {
    name: TextNode,
    #[serde(default)]
    numplays: u32,
    stats: Option<StatsNode>,
}

#[derive(Debug, Deserialize)]
struct TextNode {
    #[serde(rename = "$text")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct StatsNode {
    rating: Option<RatingNode>,
}

#[derive(Debug, Deserialize)]
struct RatingNode {
    #[serde(rename = "@value")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct PlaysDoc {
    #[serde(rename = "play", default)]
    plays: Vec<PlayNode>,
}

#[derive(Debug, Deserialize)]
struct PlayNode {
    #[serde(rename = "@date")]
    date: NaiveDate,
    item: PlayItemNode,
}

#[derive(Debug, Deserialize)]
struct PlayItemNode {
    #[serde(rename = "@name")]
    name: String,
}
