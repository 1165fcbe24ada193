//! Score feed boundary.

use async_trait::async_trait;

use crate::match_state::MatchState;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("feed url not configured")]
    Unconfigured,
}

/// Supplies the current state of every watched match.
///
/// Scraping and parsing the real upstream feed lives outside this
/// repo; the service only consumes pre-parsed match states.
#[async_trait]
pub trait ScoreSource: Send + Sync {
    async fn fetch_matches(&self) -> Result<Vec<MatchState>, SourceError>;
}

/// Polls a JSON endpoint serving an array of match states.
pub struct JsonFeedSource {
    client: reqwest::Client,
    url: String,
}

impl JsonFeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl ScoreSource for JsonFeedSource {
    async fn fetch_matches(&self) -> Result<Vec<MatchState>, SourceError> {
        if self.url.is_empty() {
            return Err(SourceError::Unconfigured);
        }
        let matches = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<MatchState>>()
            .await?;
        Ok(matches)
    }
}
