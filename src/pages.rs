use chrono::{NaiveDate, Utc};
use image::RgbImage;
use thiserror::Error;
use tokio::time::{sleep, Duration};

use crate::bgg::{BggError, GameDataProvider};
use crate::config::{Config, DisplayConfig};
use crate::display::{DisplayError, DisplayTarget};
use crate::render::{render_page, RenderError};
use crate::reports::{
    collection_unavailable_report, convention_countdown_report, hot_games_report,
    last_played_report, personal_top_ten_report, Report,
};

#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Api(#[from] BggError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Display(#[from] DisplayError),
}

/// One full pass over the four pages, pausing between them, then done.
/// A collection export that never leaves the API queue degrades that one
/// page to a placeholder; every other failure aborts the pass.
pub async fn run_calendar_pass<P, T>(
    config: &Config,
    provider: &P,
    target: &mut T,
) -> Result<(), PageError>
where
    P: GameDataProvider,
    T: DisplayTarget,
{
    run_calendar_pass_with(config, provider, target, render_page).await
}

async fn run_calendar_pass_with<P, T, R>(
    config: &Config,
    provider: &P,
    target: &mut T,
    mut render: R,
) -> Result<(), PageError>
where
    P: GameDataProvider,
    T: DisplayTarget,
    R: FnMut(&Report, NaiveDate, &DisplayConfig) -> Result<RgbImage, RenderError>,
{
    let today = Utc::now().date_naive();
    let interval = Duration::from_secs(config.pages.interval_secs);
    let username = config.bgg.username.as_str();

    let hot_games = provider.hot_games().await?;
    show_page(&hot_games_report(&hot_games), today, config, target, &mut render)?;
    sleep(interval).await;

    let countdown = convention_countdown_report(&config.game_conventions, today);
    show_page(&countdown, today, config, target, &mut render)?;
    sleep(interval).await;

    let top_ten = match provider.collection(username).await {
        Ok(collection) => personal_top_ten_report(&collection),
        Err(BggError::CollectionQueued { username, attempts }) => {
            log::warn!(
                "collection_unavailable username={} attempts={}",
                username,
                attempts
            );
            collection_unavailable_report()
        }
        Err(error) => return Err(error.into()),
    };
    show_page(&top_ten, today, config, target, &mut render)?;
    sleep(interval).await;

    let plays = provider.plays(username).await?;
    let last_played = last_played_report(&plays, config.pages.last_played_count);
    show_page(&last_played, today, config, target, &mut render)?;

    log::info!("calendar_pass_complete pages=4");
    Ok(())
}

fn show_page<T, R>(
    report: &Report,
    today: NaiveDate,
    config: &Config,
    target: &mut T,
    render: &mut R,
) -> Result<(), PageError>
where
    T: DisplayTarget,
    R: FnMut(&Report, NaiveDate, &DisplayConfig) -> Result<RgbImage, RenderError>,
{
    log::info!("page_render title=\"{}\"", report.title);
    let frame = render(report, today, &config.display)?;
    target.show(&frame, config.display.border)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use image::RgbImage;

    use super::{run_calendar_pass_with, PageError};
    use crate::bgg::{HotItem, MockCollectionOutcome, MockGameDataProvider, PlayRecord};
    use crate::config::{Config, DisplayConfig};
    use crate::display::MockDisplayTarget;
    use crate::reports::Report;

    fn test_config() -> Config {
        serde_json::from_str(
            r#"{
                "bgg": {"username": "alice"},
                "pages": {"interval_secs": 0}
            }"#,
        )
        .expect("test config should parse")
    }

    fn hot_list() -> Vec<HotItem> {
        vec![HotItem {
            rank: 1,
            name: "Arcs".to_string(),
        }]
    }

    fn play_feed() -> Vec<PlayRecord> {
        vec![PlayRecord {
            date: NaiveDate::from_ymd_opt(2026, 8, 20).expect("valid date"),
            game_name: "Cascadia".to_string(),
        }]
    }

    #[tokio::test]
    async fn queued_collection_degrades_to_placeholder_page() {
        let config = test_config();
        let provider = MockGameDataProvider::new(
            hot_list(),
            MockCollectionOutcome::Queued { attempts: 5 },
            play_feed(),
        );
        let mut target = MockDisplayTarget::new();
        let mut rendered: Vec<Report> = Vec::new();

        run_calendar_pass_with(
            &config,
            &provider,
            &mut target,
            |report: &Report, _today: NaiveDate, _display: &DisplayConfig| {
                rendered.push(report.clone());
                Ok(RgbImage::new(1, 1))
            },
        )
        .await
        .expect("a queued collection must not abort the pass");

        assert_eq!(target.frames.len(), 4);
        assert_eq!(rendered.len(), 4);
        assert_eq!(rendered[2].title, "My Top 10 Games");
        assert!(rendered[2].body.contains("Could not fetch collection"));
        assert!(provider.plays_was_requested());
    }

    #[tokio::test]
    async fn hard_collection_error_aborts_the_pass() {
        let config = test_config();
        let provider = MockGameDataProvider::new(
            hot_list(),
            MockCollectionOutcome::ServerError,
            play_feed(),
        );
        let mut target = MockDisplayTarget::new();
        let mut rendered: Vec<Report> = Vec::new();

        let result = run_calendar_pass_with(
            &config,
            &provider,
            &mut target,
            |report: &Report, _today: NaiveDate, _display: &DisplayConfig| {
                rendered.push(report.clone());
                Ok(RgbImage::new(1, 1))
            },
        )
        .await;

        assert!(matches!(result, Err(PageError::Api(_))));
        assert_eq!(
            target.frames.len(),
            2,
            "hot list and countdown were already shown"
        );
        assert!(!provider.plays_was_requested());
    }

    #[tokio::test]
    async fn ready_collection_renders_the_ranked_page() {
        let config = test_config();
        let provider = MockGameDataProvider::new(
            hot_list(),
            MockCollectionOutcome::Ready(vec![crate::bgg::CollectionItem {
                name: "Catan".to_string(),
                rating: Some(7.5),
                plays: 12,
            }]),
            play_feed(),
        );
        let mut target = MockDisplayTarget::new();
        let mut rendered: Vec<Report> = Vec::new();

        run_calendar_pass_with(
            &config,
            &provider,
            &mut target,
            |report: &Report, _today: NaiveDate, _display: &DisplayConfig| {
                rendered.push(report.clone());
                Ok(RgbImage::new(1, 1))
            },
        )
        .await
        .expect("pass should complete");

        assert_eq!(rendered[2].body, "1  Catan\n");
        assert!(rendered[3].body.contains("Cascadia"));
    }
}
