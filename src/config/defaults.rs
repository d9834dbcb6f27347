use super::schema::{ApiConfig, DisplayConfig, DisplayMode, PagesConfig, PanelColor};

pub(super) fn default_api_base_url() -> String {
    "https://boardgamegeek.com/xmlapi2".to_string()
}

pub(super) fn default_collection_retry_limit() -> u32 {
    5
}

pub(super) fn default_collection_retry_delay_secs() -> u64 {
    2
}

pub(super) fn default_request_timeout_secs() -> u64 {
    30
}

pub(super) fn default_display_mode() -> DisplayMode {
    DisplayMode::File
}

// Inky wHAT panel geometry.
pub(super) fn default_display_width() -> u32 {
    400
}

pub(super) fn default_display_height() -> u32 {
    300
}

pub(super) fn default_display_output_path() -> String {
    "frame.png".to_string()
}

pub(super) fn default_display_border() -> PanelColor {
    PanelColor::Black
}

pub(super) fn default_page_interval_secs() -> u64 {
    30
}

pub(super) fn default_last_played_count() -> usize {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            collection_retry_limit: default_collection_retry_limit(),
            collection_retry_delay_secs: default_collection_retry_delay_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: default_display_mode(),
            width: default_display_width(),
            height: default_display_height(),
            output_path: default_display_output_path(),
            border: default_display_border(),
        }
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_page_interval_secs(),
            last_played_count: default_last_played_count(),
        }
    }
}
