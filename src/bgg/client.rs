use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use tokio::time::sleep;

use crate::config::ApiConfig;

use super::model::{self, CollectionItem, HotItem, PlayRecord};

#[derive(Debug, Error)]
pub enum BggError {
    #[error("request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: StatusCode },
    #[error("failed to parse response from {url}: {source}")]
    Parse {
        url: String,
        source: quick_xml::DeError,
    },
    #[error("collection for {username} still queued after {attempts} attempts")]
    CollectionQueued { username: String, attempts: u32 },
}

/// Read-only views of the game database the calendar pages are built from.
pub trait GameDataProvider {
    async fn hot_games(&self) -> Result<Vec<HotItem>, BggError>;

    /// The user's collection with stats. A `CollectionQueued` error means
    /// the export never became ready within the provider's retry budget.
    async fn collection(&self, username: &str) -> Result<Vec<CollectionItem>, BggError>;

    async fn plays(&self, username: &str) -> Result<Vec<PlayRecord>, BggError>;
}

pub struct BggClient {
    http: reqwest::Client,
    base_url: String,
    collection_retry_limit: u32,
    collection_retry_delay: Duration,
}

impl BggClient {
    pub fn new(api: &ApiConfig) -> Result<Self, BggError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.request_timeout_secs))
            .build()
            .map_err(|source| BggError::Http {
                url: api.base_url.clone(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            collection_retry_limit: api.collection_retry_limit,
            collection_retry_delay: Duration::from_secs(api.collection_retry_delay_secs),
        })
    }

    async fn get_ok(&self, url: &str) -> Result<String, BggError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| BggError::Http {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(BggError::Status {
                url: url.to_string(),
                status,
            });
        }
        response.text().await.map_err(|source| BggError::Http {
            url: url.to_string(),
            source,
        })
    }
}

impl GameDataProvider for BggClient {
    async fn hot_games(&self) -> Result<Vec<HotItem>, BggError> {
        let url = format!("{}/hot?type=boardgame", self.base_url);
        let body = self.get_ok(&url).await?;
        model::parse_hot_games(&body).map_err(|source| BggError::Parse { url, source })
    }

    /// The API queues cold collection requests and answers 202 until the
    /// export is ready, so this retries a bounded number of times and
    /// returns the data from the attempt that succeeded.
    async fn collection(&self, username: &str) -> Result<Vec<CollectionItem>, BggError> {
        let url = format!("{}/collection?username={}&stats=1", self.base_url, username);

        fetch_collection_with_retry(
            username,
            self.collection_retry_limit,
            self.collection_retry_delay,
            |_attempt| {
                let url = url.clone();
                async move {
                    let response =
                        self.http
                            .get(&url)
                            .send()
                            .await
                            .map_err(|source| BggError::Http {
                                url: url.clone(),
                                source,
                            })?;
                    let status = response.status();
                    if status == StatusCode::ACCEPTED {
                        return Ok(CollectionFetch::Queued);
                    }
                    if !status.is_success() {
                        return Err(BggError::Status { url, status });
                    }
                    let body = response.text().await.map_err(|source| BggError::Http {
                        url: url.clone(),
                        source,
                    })?;
                    let items = model::parse_collection(&body)
                        .map_err(|source| BggError::Parse { url, source })?;
                    Ok(CollectionFetch::Ready(items))
                }
            },
        )
        .await
    }

    async fn plays(&self, username: &str) -> Result<Vec<PlayRecord>, BggError> {
        let url = format!("{}/plays?username={}", self.base_url, username);
        let body = self.get_ok(&url).await?;
        model::parse_plays(&body).map_err(|source| BggError::Parse { url, source })
    }
}

pub(super) enum CollectionFetch {
    Queued,
    Ready(Vec<CollectionItem>),
}

async fn fetch_collection_with_retry<F, Fut>(
    username: &str,
    limit: u32,
    delay: Duration,
    mut fetch: F,
) -> Result<Vec<CollectionItem>, BggError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<CollectionFetch, BggError>>,
{
    for attempt in 1..=limit {
        match fetch(attempt).await? {
            CollectionFetch::Ready(items) => return Ok(items),
            CollectionFetch::Queued => {
                log::info!(
                    "collection_queued username={} attempt={} limit={}",
                    username,
                    attempt,
                    limit
                );
                if attempt < limit {
                    sleep(delay).await;
                }
            }
        }
    }

    Err(BggError::CollectionQueued {
        username: username.to_string(),
        attempts: limit,
    })
}

#[cfg(test)]
pub(crate) enum MockCollectionOutcome {
    Ready(Vec<CollectionItem>),
    Queued { attempts: u32 },
    ServerError,
}

#[cfg(test)]
pub(crate) struct MockGameDataProvider {
    hot_games: Vec<HotItem>,
    collection: MockCollectionOutcome,
    plays: Vec<PlayRecord>,
    plays_requested: std::cell::Cell<bool>,
}

#[cfg(test)]
impl MockGameDataProvider {
    pub(crate) fn new(
        hot_games: Vec<HotItem>,
        collection: MockCollectionOutcome,
        plays: Vec<PlayRecord>,
    ) -> Self {
        Self {
            hot_games,
            collection,
            plays,
            plays_requested: std::cell::Cell::new(false),
        }
    }

    pub(crate) fn plays_was_requested(&self) -> bool {
        self.plays_requested.get()
    }
}

#[cfg(test)]
impl GameDataProvider for MockGameDataProvider {
    async fn hot_games(&self) -> Result<Vec<HotItem>, BggError> {
        Ok(self.hot_games.clone())
    }

    async fn collection(&self, username: &str) -> Result<Vec<CollectionItem>, BggError> {
        match &self.collection {
            MockCollectionOutcome::Ready(items) => Ok(items.clone()),
            MockCollectionOutcome::Queued { attempts } => Err(BggError::CollectionQueued {
                username: username.to_string(),
                attempts: *attempts,
            }),
            MockCollectionOutcome::ServerError => Err(BggError::Status {
                url: format!("mock://collection/{}", username),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            }),
        }
    }

    async fn plays(&self, _username: &str) -> Result<Vec<PlayRecord>, BggError> {
        self.plays_requested.set(true);
        Ok(self.plays.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{fetch_collection_with_retry, BggError, CollectionFetch};
    use crate::bgg::CollectionItem;

    fn catan() -> CollectionItem {
        CollectionItem {
            name: "Catan".to_string(),
            rating: Some(7.5),
            plays: 12,
        }
    }

    #[tokio::test]
    async fn returns_data_from_the_retried_attempt() {
        let result = fetch_collection_with_retry("alice", 5, Duration::ZERO, |attempt| async move {
            if attempt < 3 {
                Ok(CollectionFetch::Queued)
            } else {
                Ok(CollectionFetch::Ready(vec![catan()]))
            }
        })
        .await;

        let items = result.expect("third attempt should return data");
        assert_eq!(items, vec![catan()]);
    }

    #[tokio::test]
    async fn gives_up_after_the_configured_attempt_count() {
        let result =
            fetch_collection_with_retry("alice", 5, Duration::ZERO, |_attempt| async move {
                Ok(CollectionFetch::Queued)
            })
            .await;

        assert!(matches!(
            result,
            Err(BggError::CollectionQueued { attempts: 5, .. })
        ));
    }

    #[tokio::test]
    async fn first_attempt_success_skips_retries() {
        let result = fetch_collection_with_retry("alice", 5, Duration::ZERO, |attempt| async move {
            assert_eq!(attempt, 1);
            Ok(CollectionFetch::Ready(Vec::new()))
        })
        .await;

        assert_eq!(result.expect("should succeed"), Vec::new());
    }

    #[tokio::test]
    async fn fetch_errors_are_not_retried() {
        let result = fetch_collection_with_retry("alice", 5, Duration::ZERO, |attempt| async move {
            assert_eq!(attempt, 1, "a hard error must not be retried");
            Err(BggError::CollectionQueued {
                username: "other".to_string(),
                attempts: 0,
            })
        })
        .await;

        assert!(result.is_err());
    }
}
