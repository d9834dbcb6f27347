use chrono::NaiveDate;
use serde::Deserialize;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bgg: BggSection,
    #[serde(default)]
    pub game_conventions: Vec<Convention>,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub pages: PagesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BggSection {
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Convention {
    pub name: String,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    #[serde(default = "default_collection_retry_limit")]
    pub collection_retry_limit: u32,
    #[serde(default = "default_collection_retry_delay_secs")]
    pub collection_retry_delay_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_display_mode")]
    pub mode: DisplayMode,
    #[serde(default = "default_display_width")]
    pub width: u32,
    #[serde(default = "default_display_height")]
    pub height: u32,
    #[serde(default = "default_display_output_path")]
    pub output_path: String,
    #[serde(default = "default_display_border")]
    pub border: PanelColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    File,
    Null,
}

/// Colors the three-color panel can actually show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelColor {
    White,
    Black,
    Red,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagesConfig {
    #[serde(default = "default_page_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_last_played_count")]
    pub last_played_count: usize,
}
